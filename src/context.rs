// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Holding the static information about the source of a document
//! (i.e. other than position). Every node of a tree carries one of
//! these for diagnostics.

use crate::pos::Pos;
use kstring::KString;
use std::{path::Path, sync::Arc, fmt::{Formatter, Debug, Display}};

pub trait Context : Debug + Send + Sync {
    /// Format location to be put *after* the error reason and a
    /// space, includes "in" or "from".
    fn format_with_pos(&self, p: Option<Pos>, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error>;
    /// Format location to be put *before* a colon and the error
    /// reason. Does not include the colon.
    fn format_without_pos(&self, f: &mut Formatter<'_>)
                          -> Result<(), std::fmt::Error>;
    /// Same as `format_without_pos` but as a string.
    fn to_string_without_pos(&self) -> String {
        format!("{}", &Helper(self))
    }
}

// Hack to get access to a Formatter, since Formatter::new is
// inaccessible:
struct Helper<'t, T: Context + ?Sized>(&'t T);
impl<'t, T: Context + ?Sized> Display for Helper<'t, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.format_without_pos(f)
    }
}


/// Where a node came from. The path is shared between all nodes of
/// a document; cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceFile {
    /// Built in memory
    #[default]
    Unknown,
    File(Arc<Path>),
    /// A named source that is not a file, e.g. "stdin"
    Special(KString),
}

impl SourceFile {
    pub fn special(name: &str) -> SourceFile {
        SourceFile::Special(KString::from_ref(name))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SourceFile::File(p) => Some(&**p),
            _ => None
        }
    }
}

impl From<&Path> for SourceFile {
    fn from(path: &Path) -> SourceFile {
        SourceFile::File(Arc::from(path))
    }
}

impl Context for SourceFile {
    fn format_with_pos(&self, pos: Option<Pos>, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error> {
        match self {
            SourceFile::Unknown => f.write_str("in (unknown)")?,
            SourceFile::File(path) => f.write_fmt(format_args!("in {:?}", path))?,
            SourceFile::Special(name) => f.write_fmt(format_args!("from ({})", name))?,
        }
        if let Some(pos) = pos {
            Display::fmt(&pos, f)?
        }
        Ok(())
    }
    fn format_without_pos(&self, f: &mut Formatter<'_>)
                          -> Result<(), std::fmt::Error> {
        match self {
            SourceFile::Unknown => f.write_str("(unknown)"),
            SourceFile::File(path) => f.write_fmt(format_args!("{:?}", path)),
            SourceFile::Special(name) => f.write_fmt(format_args!("({})", name)),
        }
    }
}

impl Display for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.format_without_pos(f)
    }
}

/// `Display`s a source together with an optional position, in the
/// form used after an error reason.
pub struct Location<'t> {
    pub file: &'t SourceFile,
    pub pos: Option<Pos>,
}

impl<'t> Location<'t> {
    pub fn new(file: &'t SourceFile, pos: &Option<Pos>) -> Location<'t> {
        Location { file, pos: *pos }
    }
}

impl<'t> Display for Location<'t> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.file.format_with_pos(self.pos, f)
    }
}
