// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Utilities for debugging documents

use crate::node::{Kind, SExpression};
use crate::context::SourceFile;
use kstring::KString;

// Names below are valid, so the checked constructors are not needed.
fn list(name: &str, node: &SExpression) -> SExpression {
    SExpression::new(Kind::List, KString::from_ref(name),
                     node.file().clone(), node.pos())
}

fn string(s: &str, node: &SExpression) -> SExpression {
    SExpression::new(Kind::String, KString::from_ref(s),
                     node.file().clone(), node.pos())
}

impl SExpression {
    /// Show the node kinds explicitly: `(list "name" ...)`,
    /// `(token "v")`, `(string "v")`, `(linebreak)`. Line breaks in
    /// the original become LineBreak markers of the dump too, so the
    /// layout is kept.
    pub fn dump(&self) -> SExpression {
        match self.kind() {
            Kind::List => {
                let mut l = list("list", self);
                l.push_child(string(self.text(), self));
                for c in self.children() {
                    l.push_child(c.dump());
                    if c.is_line_break() {
                        l.push_child(SExpression::new(
                            Kind::LineBreak, KString::new(),
                            SourceFile::Unknown, None));
                    }
                }
                l
            }
            Kind::Token => {
                let mut l = list("token", self);
                l.push_child(string(self.text(), self));
                l
            }
            Kind::String => {
                let mut l = list("string", self);
                l.push_child(string(self.text(), self));
                l
            }
            Kind::LineBreak => list("linebreak", self),
        }
    }
}
