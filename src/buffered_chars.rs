// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters and their positions from anything implementing
//! `Read`, or from a string already in memory. Both feed
//! [parse](../parse/fn.parse.html).

use crate::pos::Pos;
use std::io::{self, Read};
use anyhow::{Result, anyhow};
use utf8::BufReadDecoder;
use genawaiter::rc::Gen;

const BOM: char = '\u{feff}';


/// Decodes `fh` as strict UTF-8; invalid sequences end the stream
/// with an error item. A leading byte order mark is skipped.
pub fn buffered_chars<R>(
    fh: R
) -> impl Iterator<Item=Result<(char, Pos)>>
    where R: Read
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        let mut pos = Pos::START;
        let mut at_start = true;
        while let Some(r) = inp.next_strict() {
            match r {
                Ok(x) => {
                    for c in x.chars() {
                        if at_start {
                            at_start = false;
                            if c == BOM {
                                continue;
                            }
                        }
                        co.yield_(Ok((c, pos))).await;
                        pos = pos.after(c);
                    }
                },
                Err(e) => {
                    co.yield_(Err(anyhow!("invalid input at {}: {}", pos, e)))
                        .await;
                    return;
                }
            }
        }
    }).into_iter()
}

/// Same item type as `buffered_chars`, never yields an error.
pub fn str_chars(
    s: &str
) -> impl Iterator<Item=Result<(char, Pos)>> + '_
{
    let s = s.strip_prefix(BOM).unwrap_or(s);
    s.chars().scan(Pos::START, |pos, c| {
        let here = *pos;
        *pos = pos.after(c);
        Some(Ok((c, here)))
    })
}
