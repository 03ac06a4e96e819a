use anyhow::Result;
use sexpdoc::context::SourceFile;
use sexpdoc::error::FileParseReason;
use sexpdoc::parse::ParseError;
use sexpdoc::pos::Pos;
use sexpdoc::read::ReadError;
use sexpdoc::settings::{Modes, Settings, DEFAULT_FORMAT, DEFAULT_MODES,
                        LAYOUT_MODES};
use sexpdoc::{FileParseError, SExpression};
use std::path::Path;

const LAYOUT: Settings<'static> = Settings {
    format: &DEFAULT_FORMAT,
    modes: &LAYOUT_MODES,
};

fn parse_err(s: &str) -> FileParseError {
    SExpression::parse(s, &SourceFile::special("test")).unwrap_err()
}

#[test]
fn nodes_know_where_they_came_from() -> Result<()> {
    let file = SourceFile::special("board");
    let doc = SExpression::parse("(board\n (name \"x\")\n)", &file)?;
    assert_eq!(doc.pos(), Some(Pos { line: 0, col: 0 }));
    let name = doc.child_by_path("name")?;
    assert_eq!(name.file(), &file);
    assert_eq!(name.pos(), Some(Pos { line: 1, col: 1 }));
    assert_eq!(name.child_by_index(0)?.pos(), Some(Pos { line: 1, col: 7 }));
    assert!(name.child_by_index(0)?.is_string());
    Ok(())
}

#[test]
fn quoted_and_bare_atoms() -> Result<()> {
    let doc = SExpression::parse(r#"(a b "b" "µ\t")"#,
                                 &SourceFile::Unknown)?;
    let cs = doc.children();
    assert_eq!(cs.len(), 3);
    assert!(cs[0].is_token());
    assert!(cs[1].is_string());
    assert_eq!(cs[0].raw_value()?, cs[1].raw_value()?);
    assert_eq!(cs[2].raw_value()?, "µ\t");
    Ok(())
}

#[test]
fn line_breaks_dropped_by_default() -> Result<()> {
    let doc = SExpression::parse("(a\n b\n\n c\n)", &SourceFile::Unknown)?;
    assert_eq!(doc.children().len(), 2);
    assert!(! doc.is_multi_line_list());
    assert_eq!(doc.to_string(), "(a b c)");
    Ok(())
}

#[test]
fn line_breaks_retained_on_request() -> Result<()> {
    let text = "(a\n b\n\n c\n)";
    let doc = SExpression::parse_with(text, &SourceFile::Unknown, &LAYOUT)?;
    let kinds: Vec<bool> = doc.children().iter()
        .map(|c| c.is_line_break())
        .collect();
    assert_eq!(kinds, [true, false, true, true, false, true]);
    assert_eq!(doc.to_string(), text);

    // nothing to lay out before the name
    let doc = SExpression::parse_with("(\n a b)", &SourceFile::Unknown,
                                      &LAYOUT)?;
    assert_eq!(doc.name()?, "a");
    assert_eq!(doc.children().len(), 1);
    Ok(())
}

#[test]
fn unbalanced_parens() {
    let e = parse_err("(a (b)");
    assert!(matches!(e.reason, FileParseReason::Read(
        ReadError::PrematureEofExpectingClosingParen)));
    assert_eq!(e.pos, Some(Pos { line: 0, col: 0 }));

    let e = parse_err("(a))");
    assert!(matches!(e.reason, FileParseReason::Read(
        ReadError::UnexpectedClosingParen)));
    assert_eq!(e.to_string(), "unexpected closing character ')' from (test)@1.3");
}

#[test]
fn bad_strings() {
    let e = parse_err("(a \"bc");
    assert!(matches!(e.reason, FileParseReason::Read(
        ReadError::PE(ParseError::UnexpectedEOFInString))));
    assert_eq!(e.pos, Some(Pos { line: 0, col: 3 }));

    let e = parse_err(r#"(a "\q")"#);
    assert!(matches!(e.reason, FileParseReason::Read(
        ReadError::PE(ParseError::InvalidEscapedChar('q')))));
}

#[test]
fn list_names() {
    let e = parse_err("(a ())");
    assert!(matches!(e.reason, FileParseReason::EmptyList));
    assert_eq!(e.pos, Some(Pos { line: 0, col: 3 }));

    let e = parse_err("(Board)");
    assert!(matches!(e.reason, FileParseReason::InvalidListName));
    assert_eq!(e.text.as_deref(), Some("Board"));

    let e = parse_err("(\"a\" b)");
    assert!(matches!(e.reason, FileParseReason::InvalidListName));
    assert_eq!(e.text.as_deref(), Some("\"a\""));

    let e = parse_err("(a ((b) c))");
    assert!(matches!(e.reason, FileParseReason::InvalidListName));
    assert_eq!(e.pos, Some(Pos { line: 0, col: 4 }));
}

#[test]
fn exactly_one_top_level_list() {
    let e = parse_err("");
    assert!(matches!(e.reason, FileParseReason::TopLevelCount(0)));
    let e = parse_err("(a) (b)");
    assert!(matches!(e.reason, FileParseReason::TopLevelCount(2)));
    assert_eq!(e.pos, Some(Pos { line: 0, col: 4 }));
    let e = parse_err("a");
    assert!(matches!(e.reason, FileParseReason::TopLevelNotList));
    assert_eq!(e.text.as_deref(), Some("a"));
    assert!(SExpression::parse("\n  (a)\n\n", &SourceFile::Unknown).is_ok());
}

fn nested(depth: usize) -> Result<SExpression> {
    let mut node = SExpression::create_list("n")?;
    for _ in 1..depth {
        let mut outer = SExpression::create_list("n")?;
        outer.append_child(node, false)?;
        node = outer;
    }
    Ok(node)
}

#[test]
fn nesting_limit_bounds_round_trip() -> Result<()> {
    let modes = Modes { max_depth: 8, ..DEFAULT_MODES };
    let settings = Settings { format: &DEFAULT_FORMAT, modes: &modes };
    let file = SourceFile::Unknown;
    let fits = nested(8)?;
    assert_eq!(SExpression::parse_with(&fits.render(0), &file, &settings)?,
               fits);
    let e = SExpression::parse_with(&nested(9)?.render(0), &file, &settings)
        .unwrap_err();
    assert!(matches!(e.reason, FileParseReason::Read(ReadError::NestingTooDeep)));
    Ok(())
}

#[test]
fn leading_byte_order_mark_is_skipped() -> Result<()> {
    let file = SourceFile::Unknown;
    let doc = SExpression::parse("\u{feff}(a b)", &file)?;
    assert_eq!(doc.to_string(), "(a b)");
    assert_eq!(doc.child_by_index(0)?.pos(), Some(Pos { line: 0, col: 3 }));

    let doc = SExpression::parse_reader(&b"\xef\xbb\xbf(a b)"[..], &file,
                                        &Settings::default())?;
    assert_eq!(doc.to_string(), "(a b)");
    assert_eq!(doc.child_by_index(0)?.pos(), Some(Pos { line: 0, col: 3 }));

    // only at the very start
    assert!(SExpression::parse("(a)\u{feff}", &file).is_err());
    Ok(())
}

#[test]
fn nesting_too_deep() {
    let modes = Modes { max_depth: 2, ..DEFAULT_MODES };
    let settings = Settings { format: &DEFAULT_FORMAT, modes: &modes };
    let file = SourceFile::Unknown;
    assert!(SExpression::parse_with("(a (b))", &file, &settings).is_ok());
    let e = SExpression::parse_with("(a (b (c)))", &file, &settings)
        .unwrap_err();
    assert!(matches!(e.reason, FileParseReason::Read(ReadError::NestingTooDeep)));
    assert_eq!(e.pos, Some(Pos { line: 0, col: 6 }));
}

#[test]
fn from_reader() -> Result<()> {
    let file = SourceFile::special("stdin");
    let doc = SExpression::parse_reader("(a\n (b 1)\n)".as_bytes(), &file,
                                        &LAYOUT)?;
    assert_eq!(doc.to_string(), "(a\n (b 1)\n)");

    let e = SExpression::parse_reader(&b"(a \xff)"[..], &file,
                                      &Settings::default()).unwrap_err();
    assert!(matches!(e.reason, FileParseReason::Read(
        ReadError::PE(ParseError::IOError(_)))));
    Ok(())
}

#[test]
fn save_and_load_file() -> Result<()> {
    let path = std::env::temp_dir()
        .join(format!("sexpdoc-load-test-{}.lp", std::process::id()));
    let mut doc = SExpression::create_list("librepcb_board")?;
    doc.append_line_break()?;
    doc.append_string_child("name", "Main \"A\"", true)?;
    doc.append_token_child("width", &100, true)?;
    doc.save_file(&path)?;

    let text = std::fs::read_to_string(&path)?;
    assert_eq!(text, format!("{}\n", doc));
    assert_eq!(text, "(librepcb_board\n (name \"Main \\\"A\\\"\")\n (width 100)\n)\n");

    let back = SExpression::parse_file(&path, &Settings::default())?;
    assert!(! back.is_multi_line_list());
    assert_eq!(back.file(), &SourceFile::from(path.as_path()));
    assert_eq!(back.file().path(), Some(path.as_path()));
    assert_eq!(back.value_by_path::<String>("name", true)?, "Main \"A\"");
    assert_eq!(back.value_by_path::<u32>("width", true)?, 100);

    let with_layout = SExpression::parse_file(&path, &LAYOUT)?;
    assert_eq!(with_layout, doc);
    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn missing_file() {
    let path = Path::new("/nonexistent/sexpdoc/board.lp");
    let e = SExpression::parse_file(path, &Settings::default()).unwrap_err();
    assert!(matches!(e.reason, FileParseReason::Io(_)));
    assert_eq!(e.file.path(), Some(path));
    assert!(e.to_string().contains("board.lp"));
}

#[test]
fn dump_shows_kinds() -> Result<()> {
    let doc = SExpression::parse("(a b \"c\" (d))", &SourceFile::Unknown)?;
    assert_eq!(doc.dump().to_string(),
               "(list \"a\" (token \"b\") (string \"c\") (list \"d\"))");

    let mut built = SExpression::create_list("a")?;
    built.append_line_break()?.append_token("b")?;
    assert_eq!(built.dump().to_string(),
               "(list \"a\" (linebreak)\n (token \"b\"))");
    Ok(())
}
