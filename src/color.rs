// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::codec::{Deserialize, FormatError, Serialize};

/// An ARGB color, or the invalid color (the default), which is
/// written as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    argb: Option<u32>,
}

impl Color {
    pub const fn invalid() -> Color {
        Color { argb: None }
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Color {
        Color {
            argb: Some((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
        }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color::from_argb(0xff, r, g, b)
    }

    pub fn is_valid(&self) -> bool {
        self.argb.is_some()
    }

    /// `[alpha, red, green, blue]`
    pub fn argb(&self) -> Option<[u8; 4]> {
        self.argb.map(u32::to_be_bytes)
    }

    /// Accepts `#rgb`, `#rrggbb` and `#aarrggbb`.
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#')?;
        if ! hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None
        }
        match hex.len() {
            3 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                let nibble = |shift: u32| ((v >> shift) & 0xf) as u8 * 17;
                Some(Color::from_rgb(nibble(8), nibble(4), nibble(0)))
            }
            6 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Color { argb: Some(0xff00_0000 | v) })
            }
            8 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                Some(Color { argb: Some(v) })
            }
            _ => None
        }
    }
}

impl Serialize for Color {
    fn serialize(&self) -> String {
        match self.argb {
            Some(v) => format!("#{:08x}", v),
            None => String::new(),
        }
    }
}

impl Deserialize for Color {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        Color::from_hex(s).ok_or(FormatError::InvalidColor)
    }
}
