// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning text into a document tree and back into a file.
//!
//! The raw shape comes from [read](../read/index.html); here bare
//! atoms become tokens, quoted ones strings, and each list takes its
//! first element as its name. A document is exactly one list.

use crate::context::SourceFile;
use crate::error::{FileParseError, FileParseReason};
use crate::grammar::is_valid_list_name;
use crate::node::{Kind, SExpression};
use crate::pos::Pos;
use crate::read::{read_all, read_str, ReadErrorWithPos};
use crate::settings::{Format, Settings};
use crate::value::{Atom, VValue, VValueWithPos};
use kstring::KString;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

fn file_error(
    reason: FileParseReason,
    file: &SourceFile,
    pos: Option<Pos>,
    text: Option<KString>,
) -> FileParseError {
    FileParseError { reason, file: file.clone(), pos, text }
}

fn read_error(e: ReadErrorWithPos, file: &SourceFile) -> FileParseError {
    let ReadErrorWithPos { err, pos } = e;
    file_error(FileParseReason::Read(err), file, Some(pos), None)
}

fn classify(
    v: VValueWithPos,
    file: &SourceFile
) -> Result<SExpression, FileParseError> {
    let VValueWithPos(val, pos) = v;
    match val {
        VValue::Atom(atom) => {
            let kind = if atom.is_quoted() { Kind::String } else { Kind::Token };
            Ok(SExpression::new(kind, atom.into_text(), file.clone(), Some(pos)))
        }
        VValue::LineBreak =>
            Ok(SExpression::new(Kind::LineBreak, KString::new(),
                                file.clone(), Some(pos))),
        VValue::List(items) => {
            // line breaks before the name carry no layout
            let mut items = items.into_iter()
                .skip_while(|v| matches!(v.0, VValue::LineBreak));
            let name = match items.next() {
                None => return Err(file_error(
                    FileParseReason::EmptyList, file, Some(pos), None)),
                Some(VValueWithPos(VValue::Atom(Atom::Token(name)), _))
                    if is_valid_list_name(&name) => name,
                Some(other) => return Err(file_error(
                    FileParseReason::InvalidListName, file, Some(other.1),
                    Some(KString::from_string(other.to_string())))),
            };
            let mut list = SExpression::new(Kind::List, name,
                                            file.clone(), Some(pos));
            for item in items {
                list.push_child(classify(item, file)?);
            }
            Ok(list)
        }
    }
}

fn document(
    mut values: Vec<VValueWithPos>,
    file: &SourceFile
) -> Result<SExpression, FileParseError> {
    if values.len() != 1 {
        return Err(file_error(FileParseReason::TopLevelCount(values.len()),
                              file, values.get(1).map(|v| v.1), None))
    }
    let root = values.remove(0);
    if let VValue::List(_) = root.0 {
        classify(root, file)
    } else {
        Err(file_error(FileParseReason::TopLevelNotList, file, Some(root.1),
                       Some(KString::from_string(root.to_string()))))
    }
}

impl SExpression {
    /// Parse a whole document; `file` is recorded in every node.
    pub fn parse(
        text: &str,
        file: &SourceFile
    ) -> Result<SExpression, FileParseError> {
        SExpression::parse_with(text, file, &Settings::default())
    }

    pub fn parse_with(
        text: &str,
        file: &SourceFile,
        settings: &Settings,
    ) -> Result<SExpression, FileParseError> {
        tracing::debug!(%file, len = text.len(), "parsing document");
        let values = read_str(text, settings).map_err(|e| read_error(e, file))?;
        document(values, file)
    }

    pub fn parse_reader(
        fh: impl Read,
        file: &SourceFile,
        settings: &Settings,
    ) -> Result<SExpression, FileParseError> {
        let values = read_all(fh, settings).map_err(|e| read_error(e, file))?;
        document(values, file)
    }

    pub fn parse_file(
        path: &Path,
        settings: &Settings,
    ) -> Result<SExpression, FileParseError> {
        let file = SourceFile::from(path);
        tracing::debug!(path = %path.display(), "loading document");
        let fh = File::open(path).map_err(|e| {
            file_error(FileParseReason::Io(e), &file, None, None)
        })?;
        SExpression::parse_reader(fh, &file, settings)
    }

    /// The canonical text of the document, followed by a newline.
    pub fn write_to(
        &self,
        mut out: impl Write,
        format: &Format,
    ) -> Result<(), std::io::Error> {
        writeln!(out, "{}", self.render_with(0, format))?;
        out.flush()
    }

    pub fn save_file(&self, path: &Path) -> Result<(), std::io::Error> {
        tracing::debug!(path = %path.display(), "saving document");
        self.write_to(BufWriter::new(File::create(path)?),
                      &crate::settings::DEFAULT_FORMAT)
    }
}
