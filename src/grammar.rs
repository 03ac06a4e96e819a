// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Character set rules for tokens and list names, and string
//! escaping. The tokenizer in [parse](../parse/index.html) uses the
//! same predicates, so anything accepted here reads back unchanged.

use std::fmt::Write;

/// Characters allowed in bare (unquoted) tokens.
pub fn is_token_char(c: char) -> bool {
    ! c.is_whitespace()
        && ! c.is_control()
        && c != '('
        && c != ')'
        && c != '"'
}

pub fn is_valid_token(s: &str) -> bool {
    ! s.is_empty() && s.chars().all(is_token_char)
}

/// `[a-z][a-z0-9_]*`
pub fn is_valid_list_name(s: &str) -> bool {
    let mut cs = s.chars();
    match cs.next() {
        Some(c) if c.is_ascii_lowercase() => {
            cs.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        _ => false
    }
}

/// Write `s` including the surrounding double quotes.
pub fn write_escaped_string(
    out: &mut impl Write,
    s: &str
) -> Result<(), std::fmt::Error> {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c.is_control() => {
                // all control characters are in the BMP
                out.write_fmt(format_args!("\\u{:04x}", c as u32))?
            }
            c => out.write_char(c)?
        }
    }
    out.write_char('"')
}

pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    // writing to a String can't fail
    let _ = write_escaped_string(&mut out, s);
    out
}
