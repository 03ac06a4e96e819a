// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Generic data types representing a parenthesized expression as
//! delivered by [read](../read/index.html), before it is classified
//! into a document [SExpression](../node/struct.SExpression.html).

//! Whereas [Atom](Atom) does not include lists, [VValue](VValue) adds
//! lists implemented using Rust vectors. Lists are not checked for
//! having a name or any other shape.

use crate::{grammar::write_escaped_string, pos::Pos};
use std::fmt::{Display, Write};
use kstring::KString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// Bare text, e.g. `-12.34`
    Token(KString),
    /// Text that appeared in double quotes, unescaped
    String(KString),
}

impl Atom {
    /// The text without quotes or escapes
    pub fn into_text(self) -> KString {
        match self {
            Atom::Token(s) => s,
            Atom::String(s) => s,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, Atom::String(_))
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Atom::Token(s) => f.write_str(s),
            Atom::String(s) => write_escaped_string(f, s),
        }
    }
}

/// Vec-based version of values; hard-coded to contain
/// VValueWithPos in recursive places.
#[derive(Debug, Clone, PartialEq)]
pub enum VValue {
    Atom(Atom),
    List(Vec<VValueWithPos>),
    /// A newline between list elements, only delivered when
    /// `Modes::retain_line_breaks` is set.
    LineBreak,
}

impl Display for VValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            VValue::Atom(t) => {
                Display::fmt(t, f)
            }
            VValue::List(v) => {
                f.write_char('(')?;
                let mut need_space = false;
                for item in v {
                    if let VValue::LineBreak = item.0 {
                        f.write_char('\n')?;
                        need_space = false;
                    } else {
                        if need_space {
                            f.write_char(' ')?;
                        }
                        Display::fmt(item, f)?;
                        need_space = true;
                    }
                }
                f.write_char(')')
            }
            VValue::LineBreak => f.write_char('\n'),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VValueWithPos(pub VValue, pub Pos);

impl Display for VValueWithPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        Display::fmt(&self.0, f)
    }
}

impl VValue {
    pub fn at(self, p: Pos) -> VValueWithPos {
        VValueWithPos(self, p)
    }
}

/// Easily create a bare token
pub fn token(s: &str) -> VValue {
    VValue::Atom(Atom::Token(KString::from_ref(s)))
}

/// Easily create a quoted string
pub fn string(s: &str) -> VValue {
    VValue::Atom(Atom::String(KString::from_ref(s)))
}
