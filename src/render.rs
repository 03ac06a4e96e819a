// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Canonical text output.
//!
//! A list without line break markers is written on a single line. In
//! a list with markers, each marker starts a new line indented one
//! level deeper than the list; several markers in a row give a single
//! blank line. A marker at the end of a list puts the closing paren
//! on its own line, at the list's level.

use crate::grammar::write_escaped_string;
use crate::node::{Kind, SExpression};
use crate::settings::{Format, DEFAULT_FORMAT};
use std::fmt::{Display, Formatter, Write};

fn write_indent(
    out: &mut impl Write,
    format: &Format,
    level: usize
) -> Result<(), std::fmt::Error> {
    for _ in 0..level {
        out.write_str(format.indent)?;
    }
    Ok(())
}

impl SExpression {
    /// `indent` is the nesting level of the line this node starts on.
    pub fn write_rendered(
        &self,
        out: &mut impl Write,
        indent: usize,
        format: &Format,
    ) -> Result<(), std::fmt::Error> {
        match self.kind() {
            Kind::List => {
                out.write_char('(')?;
                out.write_str(self.text())?;
                let children = self.children();
                let mut at_line_start = false;
                let mut i = 0;
                while i < children.len() {
                    let child = &children[i];
                    if child.is_line_break() {
                        let run = children[i..].iter()
                            .take_while(|c| c.is_line_break())
                            .count();
                        i += run;
                        out.write_char('\n')?;
                        if run > 1 {
                            out.write_char('\n')?;
                        }
                        let level = if i == children.len() { indent } else { indent + 1 };
                        write_indent(out, format, level)?;
                        at_line_start = true;
                    } else {
                        if ! at_line_start {
                            out.write_char(' ')?;
                        }
                        child.write_rendered(out, indent + 1, format)?;
                        at_line_start = false;
                        i += 1;
                    }
                }
                out.write_char(')')
            }
            Kind::Token => out.write_str(self.text()),
            Kind::String => write_escaped_string(out, self.text()),
            Kind::LineBreak => Ok(()),
        }
    }

    pub fn render_with(&self, indent: usize, format: &Format) -> String {
        let mut out = String::new();
        // writing to a String can't fail
        let _ = self.write_rendered(&mut out, indent, format);
        out
    }

    pub fn render(&self, indent: usize) -> String {
        self.render_with(indent, &DEFAULT_FORMAT)
    }
}

impl Display for SExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.write_rendered(f, 0, &DEFAULT_FORMAT)
    }
}
