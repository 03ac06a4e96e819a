// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The document tree.
//!
//! An [SExpression] is a list (with a name and children), a token, a
//! string, or a line break marker. Lists own their children; cloning
//! a node copies the whole subtree. Typed values go in via
//! [codec::Serialize](../codec/trait.Serialize.html) and come out via
//! [codec::Deserialize](../codec/trait.Deserialize.html).

use crate::codec::{Deserialize, Serialize};
use crate::context::SourceFile;
use crate::error::{FileParseError, FileParseReason, Result,
                   SExpressionError, StructureError};
use crate::grammar::{is_valid_list_name, is_valid_token};
use crate::pos::Pos;
use kstring::KString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Has a name and any number of children
    List,
    /// Value without quotes, e.g. `-12.34`
    Token,
    /// Value in double quotes, e.g. `"Foo!"`
    String,
    /// Manual line break inside a list
    LineBreak,
}

#[derive(Debug, Clone)]
pub struct SExpression {
    kind: Kind,
    /// The list name, token or string; empty for line breaks
    value: KString,
    children: Vec<SExpression>,
    file: SourceFile,
    pos: Option<Pos>,
}

/// Structural: provenance is ignored.
impl PartialEq for SExpression {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.value == other.value
            && self.children == other.children
    }
}

impl Eq for SExpression {}

impl SExpression {
    // No validation here; callers check the value for the kind.
    pub(crate) fn new(kind: Kind, value: KString,
                      file: SourceFile, pos: Option<Pos>) -> SExpression {
        SExpression { kind, value, children: Vec::new(), file, pos }
    }

    pub fn create_list(name: &str) -> Result<SExpression> {
        if ! is_valid_list_name(name) {
            return Err(StructureError::InvalidListName(
                KString::from_ref(name)).into())
        }
        Ok(SExpression::new(Kind::List, KString::from_ref(name),
                            SourceFile::Unknown, None))
    }

    pub fn create_token(token: &str) -> Result<SExpression> {
        if ! is_valid_token(token) {
            return Err(StructureError::InvalidToken(
                KString::from_ref(token)).into())
        }
        Ok(SExpression::new(Kind::Token, KString::from_ref(token),
                            SourceFile::Unknown, None))
    }

    pub fn create_string(string: &str) -> SExpression {
        SExpression::new(Kind::String, KString::from_ref(string),
                         SourceFile::Unknown, None)
    }

    pub fn create_line_break() -> SExpression {
        SExpression::new(Kind::LineBreak, KString::new(),
                         SourceFile::Unknown, None)
    }

    // ---- Getters ------------------------------------------------------

    pub fn kind(&self) -> Kind { self.kind }
    pub fn is_list(&self) -> bool { self.kind == Kind::List }
    pub fn is_token(&self) -> bool { self.kind == Kind::Token }
    pub fn is_string(&self) -> bool { self.kind == Kind::String }
    pub fn is_line_break(&self) -> bool { self.kind == Kind::LineBreak }

    /// The file this node was read from.
    pub fn file(&self) -> &SourceFile { &self.file }

    /// Where the node started in its file, for parsed nodes.
    pub fn pos(&self) -> Option<Pos> { self.pos }

    /// A list containing at least one line break marker directly.
    pub fn is_multi_line_list(&self) -> bool {
        self.is_list() && self.children.iter().any(|c| c.is_line_break())
    }

    pub fn name(&self) -> Result<&str> {
        if self.is_list() {
            Ok(self.value.as_str())
        } else {
            Err(StructureError::NotAList.into())
        }
    }

    /// The text of a token or string, without any conversion.
    pub fn raw_value(&self) -> Result<&str> {
        match self.kind {
            Kind::Token | Kind::String => Ok(self.value.as_str()),
            _ => Err(StructureError::NotTokenOrString.into())
        }
    }

    // List name, token or string, unchecked
    pub(crate) fn text(&self) -> &str {
        &self.value
    }

    /// Empty for anything but a list.
    pub fn children(&self) -> &[SExpression] {
        &self.children
    }

    /// Lists called `name`, and tokens or strings with the value
    /// `name`.
    pub fn children_named<'s>(
        &'s self,
        name: &'s str
    ) -> impl Iterator<Item = &'s SExpression> + 's {
        self.children.iter().filter(move |c| {
            c.kind != Kind::LineBreak && c.value.as_str() == name
        })
    }

    pub fn child_by_index(&self, index: usize) -> Result<&SExpression> {
        self.children.get(index).ok_or_else(|| {
            StructureError::IndexOutOfRange {
                index,
                count: self.children.len()
            }.into()
        })
    }

    // ---- Typed values -------------------------------------------------

    /// Convert the text of this token or string node to `T`.
    /// Conversion failures are reported with the node's file and
    /// position.
    pub fn value<T: Deserialize>(&self, reject_empty: bool) -> Result<T> {
        let text = self.raw_value()?;
        if text.is_empty() && reject_empty {
            return Err(SExpressionError::EmptyValue {
                file: self.file.clone(),
                pos: self.pos,
            })
        }
        T::deserialize(text).map_err(|e| {
            FileParseError {
                reason: FileParseReason::Format(e),
                file: self.file.clone(),
                pos: self.pos,
                text: Some(self.value.clone()),
            }.into()
        })
    }

    pub fn value_of_first_child<T: Deserialize>(
        &self, reject_empty: bool
    ) -> Result<T> {
        match self.children.first() {
            Some(child) => child.value(reject_empty),
            None => Err(StructureError::NoChildren.into())
        }
    }

    /// E.g. `root.value_by_path::<i32>("settings/width", false)` for
    /// `(root (settings (width 42)))`.
    pub fn value_by_path<T: Deserialize>(
        &self, path: &str, reject_empty: bool
    ) -> Result<T> {
        self.child_by_path(path)?.value_of_first_child(reject_empty)
    }

    // ---- Building -----------------------------------------------------

    fn children_mut(&mut self) -> Result<&mut Vec<SExpression>> {
        if self.is_list() {
            Ok(&mut self.children)
        } else {
            Err(StructureError::NotAList.into())
        }
    }

    /// Append `child`; `force_break` puts a line break marker after it.
    pub fn append_child(
        &mut self, child: SExpression, force_break: bool
    ) -> Result<&mut SExpression> {
        let children = self.children_mut()?;
        children.push(child);
        if force_break {
            children.push(SExpression::create_line_break());
        }
        Ok(self)
    }

    /// Returns the new child list, for filling it.
    pub fn append_list(
        &mut self, name: &str, force_break: bool
    ) -> Result<&mut SExpression> {
        let list = SExpression::create_list(name)?;
        let children = self.children_mut()?;
        children.push(list);
        let i = children.len() - 1;
        if force_break {
            children.push(SExpression::create_line_break());
        }
        Ok(&mut children[i])
    }

    pub fn append_token<T: Serialize + ?Sized>(
        &mut self, value: &T
    ) -> Result<&mut SExpression> {
        let token = SExpression::create_token(&value.serialize())?;
        self.append_child(token, false)
    }

    pub fn append_string<T: Serialize + ?Sized>(
        &mut self, value: &T
    ) -> Result<&mut SExpression> {
        let string = SExpression::create_string(&value.serialize());
        self.append_child(string, false)
    }

    /// Append `(name value)` with a token value; returns the new list.
    pub fn append_token_child<T: Serialize + ?Sized>(
        &mut self, name: &str, value: &T, force_break: bool
    ) -> Result<&mut SExpression> {
        self.append_list(name, force_break)?.append_token(value)
    }

    /// Append `(name "value")`; returns the new list.
    pub fn append_string_child<T: Serialize + ?Sized>(
        &mut self, name: &str, value: &T, force_break: bool
    ) -> Result<&mut SExpression> {
        self.append_list(name, force_break)?.append_string(value)
    }

    pub fn append_line_break(&mut self) -> Result<&mut SExpression> {
        self.children_mut()?.push(SExpression::create_line_break());
        Ok(self)
    }

    /// Strip all line break markers, recursively.
    pub fn remove_line_breaks(&mut self) {
        self.children.retain(|c| ! c.is_line_break());
        for child in &mut self.children {
            child.remove_line_breaks();
        }
    }

    // Used by the loader, which builds lists from already checked
    // parts.
    pub(crate) fn push_child(&mut self, child: SExpression) {
        self.children.push(child);
    }
}
