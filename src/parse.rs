// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a character stream to a token stream. Atoms come out
//! as either bare tokens or (unescaped) strings; no further
//! classification happens here. The only tokens that denote nesting
//! are `Token::Open` and `Token::Close`. See
//! [read](../read/index.html) if interested in trees rather than
//! tokens.

use crate::grammar::is_token_char;
use crate::pos::Pos;
use crate::settings::Settings;
use crate::value::Atom;
use kstring::KString;
use thiserror::Error;
use genawaiter::rc::Gen;
use std::fmt::{Display, Write};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error ({0}) after")]
    IOError(anyhow::Error),
    #[error("unexpected EOF in string starting")]
    UnexpectedEOFInString,
    #[error("invalid escaped character '{0}'")]
    InvalidEscapedChar(char),
    #[error("not a hex digit: '{0}'")]
    NonHexDigit(char),
    #[error("invalid code point {0}")]
    InvalidCodePoint(u32),
    #[error("invalid character {0:?}")]
    InvalidChar(char),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ParseErrorWithPos {
    pub err: ParseError,
    pub pos: Pos
}

impl ParseError {
    pub(crate) fn at(self, p: Pos) -> ParseErrorWithPos {
        ParseErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Atom(Atom),
    Open,
    Close,
    /// Only delivered with `Modes::retain_line_breaks`
    Whitespace(KString),
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Atom(a) => Display::fmt(a, f),
            Token::Open => f.write_char('('),
            Token::Close => f.write_char(')'),
            Token::Whitespace(s) => f.write_str(s),
        }
    }
}

#[derive(Debug)]
pub struct TokenWithPos(pub Token, pub Pos);


fn next_or_eof(
    cs: &mut impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    startpos: Pos,
    lastpos: Pos,
) -> Result<(char, Pos), ParseErrorWithPos> {
    match cs.next() {
        None => Err(ParseError::UnexpectedEOFInString.at(startpos)),
        Some(Err(e)) => Err(ParseError::IOError(e).at(lastpos)),
        Some(Ok(cp)) => Ok(cp),
    }
}

// Exactly 4 hex digits, as written by grammar::write_escaped_string.
fn read_hex4_as_char(
    cs: &mut impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    startpos: Pos,
    escpos: Pos,
) -> Result<char, ParseErrorWithPos> {
    let mut code: u32 = 0;
    let mut lastpos = escpos;
    for _ in 0..4 {
        let (c, pos) = next_or_eof(cs, startpos, lastpos)?;
        lastpos = pos;
        if let Some(d) = c.to_digit(16) {
            code = code * 16 + d;
        } else {
            return Err(ParseError::NonHexDigit(c).at(pos))
        }
    }
    char::from_u32(code).ok_or(ParseError::InvalidCodePoint(code).at(escpos))
}

// Reads the rest of a string whose opening '"' was at `startpos`.
fn read_delimited(
    startpos: Pos,
    cs: &mut impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    out: &mut String
) -> Result<(), ParseErrorWithPos>
{
    out.clear();
    let mut lastpos = startpos;
    loop {
        let (c, pos) = next_or_eof(cs, startpos, lastpos)?;
        lastpos = pos;
        if c == '\\' {
            let (c, pos) = next_or_eof(cs, startpos, lastpos)?;
            lastpos = pos;
            match c {
                '"' => out.push('"'),
                '\\' => out.push('\\'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'u' => out.push(read_hex4_as_char(cs, startpos, pos)?),
                _ => return Err(ParseError::InvalidEscapedChar(c).at(pos))
            }
        } else if c == '"' {
            return Ok(());
        } else {
            out.push(c);
        }
    }
}

// Collects `c` and the following accepted characters into `out`;
// returns the first character not accepted, or None at EOF.
fn read_while(
    c: char,
    startpos: Pos,
    cs: &mut impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    accepted: fn(char) -> bool,
    out: &mut String,
) -> Result<Option<(char, Pos)>, ParseErrorWithPos> {
    out.clear();
    out.push(c);
    let mut lastpos = startpos;
    loop {
        match cs.next() {
            None => return Ok(None),
            Some(Err(e)) => return Err(ParseError::IOError(e).at(lastpos)),
            Some(Ok((c, pos))) => {
                lastpos = pos;
                if accepted(c) {
                    out.push(c);
                } else {
                    return Ok(Some((c, pos)));
                }
            }
        }
    }
}

fn is_whitespace_char(c: char) -> bool {
    c.is_whitespace()
}

pub fn parse<'s>(
    cs: impl Iterator<Item = anyhow::Result<(char, Pos)>> + 's,
    settings: &Settings,
)
    -> impl Iterator<Item = Result<TokenWithPos, ParseErrorWithPos>> + 's
{
    let retain_whitespace = settings.modes.retain_line_breaks;
    Gen::new(|co| async move {
        let mut cs = cs;
        let mut tmp = String::new();
        let mut maybe_next_c_pos = None;
        let mut lastpos = Pos::START;
        loop {
            let (c, pos) =
                if let Some(cp) = maybe_next_c_pos.take() {
                    cp
                } else {
                    match cs.next() {
                        None => return,
                        Some(Err(e)) => {
                            co.yield_(Err(
                                ParseError::IOError(e).at(lastpos))).await;
                            return;
                        }
                        Some(Ok(cp)) => cp
                    }
                };
            lastpos = pos;

            if c == '(' {
                co.yield_(Ok(TokenWithPos(Token::Open, pos))).await;
            } else if c == ')' {
                co.yield_(Ok(TokenWithPos(Token::Close, pos))).await;
            } else if c.is_whitespace() {
                match read_while(c, pos, &mut cs, is_whitespace_char, &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        if retain_whitespace {
                            co.yield_(Ok(TokenWithPos(
                                Token::Whitespace(KString::from_ref(&tmp)),
                                pos))).await;
                        }
                        if mcp.is_none() {
                            // avoid calling next() again!
                            return
                        }
                        maybe_next_c_pos = mcp;
                    }
                }
            } else if c == '"' {
                match read_delimited(pos, &mut cs, &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(()) => {
                        co.yield_(Ok(TokenWithPos(
                            Token::Atom(Atom::String(KString::from_ref(&tmp))),
                            pos))).await;
                    }
                }
            } else if is_token_char(c) {
                match read_while(c, pos, &mut cs, is_token_char, &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        co.yield_(Ok(TokenWithPos(
                            Token::Atom(Atom::Token(KString::from_ref(&tmp))),
                            pos))).await;
                        if mcp.is_none() {
                            return
                        }
                        maybe_next_c_pos = mcp;
                    }
                }
            } else {
                co.yield_(Err(ParseError::InvalidChar(c).at(pos))).await;
                return;
            }
        }
    }).into_iter()
}
