// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building generic [VValue](../value/enum.VValue.html) trees from a
//! token stream. Only the shape is checked here (balanced
//! parentheses, nesting depth); what the lists mean is up to
//! [load](../load/index.html).

use crate::pos::Pos;
use crate::parse::{Token, TokenWithPos, parse,
                   ParseError, ParseErrorWithPos};
use crate::settings::Settings;
use crate::value::{VValue, VValueWithPos};
use crate::buffered_chars::{buffered_chars, str_chars};
use std::io::Read;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    PE(ParseError),
    #[error("nesting too deep")]
    NestingTooDeep,
    #[error("premature EOF while expecting closing character ')' for '('")]
    PrematureEofExpectingClosingParen,
    #[error("unexpected closing character ')'")]
    UnexpectedClosingParen,
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ReadErrorWithPos {
    pub err: ReadError,
    pub pos: Pos
}

impl ReadError {
    fn at(self, p: Pos) -> ReadErrorWithPos {
        ReadErrorWithPos {
            err: self,
            pos: p
        }
    }
}

impl From<ParseErrorWithPos> for ReadErrorWithPos {
    fn from(ep: ParseErrorWithPos) -> ReadErrorWithPos {
        let ParseErrorWithPos { err, pos } = ep;
        ReadErrorWithPos {
            err: ReadError::PE(err),
            pos
        }
    }
}


// Read and fill a vector of values up to the expected end paren
// (`opening` is the position of the '(' if inside a list).
fn slurp(
    ts: &mut impl Iterator<Item = Result<TokenWithPos,
                                         ParseErrorWithPos>>,
    opening: Option<Pos>,
    depth_fuel: u32,
) -> Result<Vec<VValueWithPos>, ReadErrorWithPos>
{
    let mut v = Vec::new();
    while let Some(te) = ts.next() {
        let TokenWithPos(t, pos) = te?;
        match t {
            Token::Whitespace(s) => {
                // Line breaks only mean something between list
                // elements
                if opening.is_some() {
                    for _ in s.chars().filter(|c| *c == '\n') {
                        v.push(VValue::LineBreak.at(pos));
                    }
                }
            }
            Token::Open => {
                if depth_fuel == 0 {
                    return Err(ReadError::NestingTooDeep.at(pos))
                }
                let e = slurp(ts, Some(pos), depth_fuel - 1)?;
                v.push(VValue::List(e).at(pos));
            }
            Token::Close => {
                if opening.is_some() {
                    return Ok(v)
                } else {
                    return Err(ReadError::UnexpectedClosingParen.at(pos))
                }
            }
            Token::Atom(a) => {
                v.push(VValue::Atom(a).at(pos));
            }
        }
    }
    if let Some(startpos) = opening {
        Err(ReadError::PrematureEofExpectingClosingParen.at(startpos))
    } else {
        Ok(v)
    }
}

/// Read all top-level values from a character stream as delivered
/// by the functions in `buffered_chars`.
pub fn read_chars(
    cs: impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    settings: &Settings,
) -> Result<Vec<VValueWithPos>, ReadErrorWithPos>
{
    let mut ts = parse(cs, settings);
    slurp(&mut ts, None, settings.modes.max_depth)
}

pub fn read_all(
    fh: impl Read,
    settings: &Settings,
) -> Result<Vec<VValueWithPos>, ReadErrorWithPos>
{
    read_chars(buffered_chars(fh), settings)
}

pub fn read_str(
    s: &str,
    settings: &Settings,
) -> Result<Vec<VValueWithPos>, ReadErrorWithPos>
{
    read_chars(str_chars(s), settings)
}
