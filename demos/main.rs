// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use sexpdoc::SExpression;
use sexpdoc::buffered_chars::buffered_chars;
use sexpdoc::context::SourceFile;
use sexpdoc::parse::{Token, parse, TokenWithPos};
use sexpdoc::settings::{Settings, DEFAULT_FORMAT, WIDE_FORMAT,
                        DEFAULT_MODES, LAYOUT_MODES};
use clap::Parser as ClapParser;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use anyhow::{Result, bail};


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Stream the tokens instead of loading a document
    #[clap(short, long, value_parser)]
    tokens: bool,
    /// Show the token position (only with --tokens)
    #[clap(long, value_parser)]
    pos: bool,
    /// Keep the line breaks of the input
    #[clap(short, long, value_parser)]
    layout: bool,
    /// Indent by two spaces per level
    #[clap(short, long, value_parser)]
    wide: bool,
    /// Print the node kinds instead of the canonical text
    #[clap(short, long, value_parser)]
    dump: bool,
    /// Write the canonical text back to the input file
    #[clap(long, value_parser)]
    in_place: bool,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings {
        format: if args.wide { &WIDE_FORMAT } else { &DEFAULT_FORMAT },
        modes: if args.layout { &LAYOUT_MODES } else { &DEFAULT_MODES },
    };

    if args.tokens {

        // Read through the token stream of the file contents and just
        // do some bookkeeping, printing the tokens.

        let fh = std::fs::File::open(&args.input_path)?;
        let ts = parse(buffered_chars(fh), &settings);
        let mut count_toplevel = 0;
        let mut count_enter = 0;
        let mut parenstack: Vec<_> = Vec::new();
        for te in ts {
            let TokenWithPos(token, pos) = te?;
            let indentlevel;
            match token {
                Token::Open => {
                    count_enter += 1;
                    if parenstack.is_empty() {
                        count_toplevel += 1;
                    }
                    indentlevel = parenstack.len();
                    parenstack.push(pos);
                }
                Token::Close => {
                    if parenstack.pop().is_none() {
                        bail!("unexpected closing character ')' at {:?}{}",
                              args.input_path, pos)
                    }
                    indentlevel = parenstack.len();
                }
                Token::Whitespace(_) => continue,
                _ => {
                    indentlevel = parenstack.len();
                }
            }
            if let Some(indent) = indentstr(indentlevel) {
                if args.pos {
                    println!("{indent}{pos} {token}");
                } else {
                    println!("{indent}{token}");
                }
            } else {
                bail!("lists nested too deeply at {:?}{}", args.input_path, pos)
            }
        }
        println!("; count_toplevel = {count_toplevel}, count_enter = {count_enter}");

    } else {

        let fh = std::fs::File::open(&args.input_path)?;
        let file = SourceFile::from(args.input_path.as_path());
        let doc = SExpression::parse_reader(fh, &file, &settings)?;
        let doc = if args.dump { doc.dump() } else { doc };
        tracing::info!(children = doc.children().len(), "loaded {}", file);
        if args.in_place {
            let fh = std::fs::File::create(&args.input_path)?;
            doc.write_to(BufWriter::new(fh), settings.format)?;
        } else {
            doc.write_to(BufWriter::new(stdout()), settings.format)?;
        }

    }
    Ok(())
}
