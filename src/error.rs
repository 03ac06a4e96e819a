// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of the document layer.
//!
//! Structure and path errors mean the caller expected a different
//! shape; they are passed on unchanged. Everything caused by the
//! content of a file ends up as a [FileParseError], which knows the
//! file, the position and, if available, the offending text.

use crate::codec::FormatError;
use crate::context::{Location, SourceFile};
use crate::pos::Pos;
use crate::read::ReadError;
use kstring::KString;
use thiserror::Error;
use std::fmt::{Display, Formatter};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("node is not a list")]
    NotAList,
    #[error("node is not a token or string")]
    NotTokenOrString,
    #[error("node does not have children")]
    NoChildren,
    #[error("child index {index} out of range (node has {count} children)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("invalid list name {0:?}")]
    InvalidListName(KString),
    #[error("invalid token {0:?}")]
    InvalidToken(KString),
}

#[derive(Error, Debug)]
pub enum FileParseReason {
    #[error("{0}")]
    Read(ReadError),
    #[error("{0}")]
    Format(FormatError),
    #[error("{0}")]
    Io(std::io::Error),
    #[error("empty list")]
    EmptyList,
    #[error("invalid list name")]
    InvalidListName,
    #[error("top-level value is not a list")]
    TopLevelNotList,
    #[error("expecting exactly one top-level list, got {0}")]
    TopLevelCount(usize),
}

#[derive(Error, Debug)]
pub struct FileParseError {
    pub reason: FileParseReason,
    pub file: SourceFile,
    pub pos: Option<Pos>,
    /// The text of the offending node, if any
    pub text: Option<KString>,
}

impl Display for FileParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} {}",
                                 self.reason,
                                 Location::new(&self.file, &self.pos)))?;
        if let Some(text) = &self.text {
            f.write_fmt(format_args!(": {:?}", text.as_str()))?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SExpressionError {
    #[error("{0}")]
    Structure(#[from] StructureError),
    #[error("child {path:?} not found {}", Location::new(.file, .pos))]
    NotFound { path: String, file: SourceFile, pos: Option<Pos> },
    #[error("node value is empty {}", Location::new(.file, .pos))]
    EmptyValue { file: SourceFile, pos: Option<Pos> },
    #[error("{0}")]
    FileParse(Box<FileParseError>),
}

impl From<FileParseError> for SExpressionError {
    fn from(e: FileParseError) -> SExpressionError {
        SExpressionError::FileParse(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, SExpressionError>;
