// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for both reading (parsing) and writing (rendering)
//! documents.

/// Output layout.
#[derive(Debug)]
pub struct Format {
    /// Inserted once per nesting level on continuation lines
    pub indent: &'static str,
}

pub const DEFAULT_FORMAT : Format = Format {
    indent: " ",
};

pub const WIDE_FORMAT : Format = Format {
    indent: "  ",
};


#[derive(Debug)]
pub struct Modes {
    /// Turn newlines between list elements into LineBreak nodes
    pub retain_line_breaks: bool,
    /// Maximum list nesting accepted by the reader
    pub max_depth: u32,
}

// The limit with default settings on Linux is around 1200.
pub const DEFAULT_MODES : Modes = Modes {
    retain_line_breaks: false,
    max_depth: 500,
};

pub const LAYOUT_MODES : Modes = Modes {
    retain_line_breaks: true,
    max_depth: 500,
};

#[derive(Debug)]
pub struct Settings<'t> {
    pub format: &'t Format,
    pub modes: &'t Modes,
}

impl Default for Settings<'static> {
    fn default() -> Self {
        Settings {
            format: &DEFAULT_FORMAT,
            modes: &DEFAULT_MODES,
        }
    }
}
