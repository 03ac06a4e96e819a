// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An S-Expression document format as used for project files (schematics,
//! boards, libraries), with the following goals:
//!
//! * A typed tree, `sexpdoc::node::SExpression`, of lists (a name plus
//!   children), tokens, strings and line break markers, which is all a
//!   loader or saver of a file format needs to touch.
//!
//! * Typed values: anything implementing `codec::Serialize` and
//!   `codec::Deserialize` can be stored in and read from the tree,
//!   including `Option`s of types with a null representation.
//!
//! * Good error reporting: failures to read a value name the file,
//!   position and offending text.
//!
//! * A canonical text form: rendering is deterministic, line breaks
//!   are placed where the tree asks for them, and the output always
//!   reads back to the same tree.
//!
//! The lower layers (`buffered_chars`, `parse`, `read`, `value`) are a
//! plain tokenizer and reader for parenthesized expressions, usable on
//! their own.
//!
//! ```text
//! (board
//!  (name "Main Board")
//!  (width 100)
//! )
//! ```

pub mod buffered_chars;
pub mod codec;
pub mod color;
pub mod context;
pub mod debug;
pub mod error;
pub mod grammar;
pub mod load;
pub mod node;
pub mod parse;
pub mod path;
pub mod pos;
pub mod read;
pub mod render;
pub mod settings;
pub mod value;

pub use error::{FileParseError, SExpressionError, StructureError};
pub use node::{Kind, SExpression};
