// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Looking up nested lists by path.
//!
//! A path is a `/` separated sequence of list names, e.g.
//! `"net/pin"`. Each name can be followed by `[n]` to take the n-th
//! (zero based) list of that name instead of the first one, e.g.
//! `"net[2]/pin[1]"`. Only lists are matched.

use crate::error::{Result, SExpressionError};
use crate::node::SExpression;

/// `name[n]` → `(name, n)`; anything without a valid index suffix is
/// taken as a name as a whole.
fn parse_segment(segment: &str) -> (&str, usize) {
    if let Some(rest) = segment.strip_suffix(']') {
        if let Some((name, index)) = rest.split_once('[') {
            if let Ok(i) = index.parse::<usize>() {
                return (name, i)
            }
        }
    }
    (segment, 0)
}

impl SExpression {
    /// The n-th direct child list with the given name.
    fn nth_child_list(&self, name: &str, n: usize) -> Option<&SExpression> {
        self.children()
            .iter()
            .filter(|c| c.is_list() && c.name().map_or(false, |s| s == name))
            .nth(n)
    }

    /// The empty path yields `self`.
    pub fn try_child_by_path(&self, path: &str) -> Option<&SExpression> {
        let mut node = self;
        if path.is_empty() {
            return Some(node)
        }
        for segment in path.split('/') {
            let (name, n) = parse_segment(segment);
            match node.nth_child_list(name, n) {
                Some(child) => node = child,
                None => {
                    tracing::trace!(path, segment, "no match for path segment");
                    return None
                }
            }
        }
        Some(node)
    }

    pub fn child_by_path(&self, path: &str) -> Result<&SExpression> {
        self.try_child_by_path(path).ok_or_else(|| {
            SExpressionError::NotFound {
                path: path.to_owned(),
                file: self.file().clone(),
                pos: self.pos(),
            }
        })
    }
}
