use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use num::BigInt;
use sexpdoc::codec::{Deserialize, FormatError, Nullable, Serialize};
use sexpdoc::color::Color;
use sexpdoc::context::SourceFile;
use sexpdoc::SExpression;
use url::Url;

/// A domain type as a document model would define it.
#[derive(Debug, Clone, PartialEq)]
struct Layer(String);

impl Serialize for Layer {
    fn serialize(&self) -> String {
        format!("layer:{}", self.0)
    }
}

impl Deserialize for Layer {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        match s.strip_prefix("layer:") {
            Some(name) if ! name.is_empty() => Ok(Layer(name.to_owned())),
            _ => Err(FormatError::invalid(format!("not a layer: {:?}", s)))
        }
    }
}

impl Nullable for Layer {
    const NULL: &'static str = "none";
}

#[test]
fn booleans() {
    assert_eq!(bool::deserialize("true"), Ok(true));
    assert_eq!(bool::deserialize("false"), Ok(false));
    assert_eq!(bool::deserialize("maybe"), Err(FormatError::InvalidBool));
    assert_eq!(bool::deserialize("True"), Err(FormatError::InvalidBool));
    assert_eq!(true.serialize(), "true");
    assert_eq!(false.serialize(), "false");
}

#[test]
fn integers() {
    assert_eq!(i32::deserialize("42"), Ok(42));
    assert_eq!(i32::deserialize("-42"), Ok(-42));
    assert_eq!(i32::deserialize("4a"), Err(FormatError::InvalidInteger));
    assert_eq!(i32::deserialize(""), Err(FormatError::InvalidInteger));
    assert_eq!(i8::deserialize("128"), Err(FormatError::InvalidInteger));
    assert_eq!((-7i32).serialize(), "-7");
    assert_eq!(u32::deserialize("7"), Ok(7));
    assert_eq!(u32::deserialize("-7"), Err(FormatError::InvalidUnsigned));
    assert_eq!(u64::MAX.serialize(), "18446744073709551615");
}

#[test]
fn big_integers() {
    let n = BigInt::deserialize("-123456789012345678901234567890").unwrap();
    assert_eq!(n.serialize(), "-123456789012345678901234567890");
    assert_eq!(BigInt::deserialize("1_000"), Err(FormatError::InvalidInteger));
    assert_eq!(BigInt::deserialize("x"), Err(FormatError::InvalidInteger));
}

#[test]
fn strings_pass_through() {
    assert_eq!("a \"b\"\n".serialize(), "a \"b\"\n");
    assert_eq!(String::deserialize(""), Ok(String::new()));
}

#[test]
fn optionals() {
    assert_eq!(Option::<Layer>::deserialize("none"), Ok(None));
    assert_eq!(Option::<Layer>::None.serialize(), "none");
    let top = Some(Layer("top".to_owned()));
    assert_eq!(Option::<Layer>::deserialize(&top.serialize()), Ok(top));
    assert!(Option::<Layer>::deserialize("top").is_err());
}

#[test]
fn colors() {
    let c = Color::from_argb(0x80, 0x11, 0x22, 0x33);
    assert_eq!(c.serialize(), "#80112233");
    assert_eq!(Color::deserialize("#80112233"), Ok(c));
    assert_eq!(Color::deserialize("#123"), Ok(Color::from_rgb(0x11, 0x22, 0x33)));
    assert_eq!(Color::invalid().serialize(), "");
    assert_eq!(Color::default(), Color::invalid());
    assert_eq!(Color::deserialize("red"), Err(FormatError::InvalidColor));
}

#[test]
fn urls() {
    let url = Url::deserialize("https://example.com/lib?x=1").unwrap();
    assert_eq!(url.serialize(), "https://example.com/lib?x=1");
    assert_eq!(Url::deserialize("not a url"), Err(FormatError::InvalidUrl));
    // would need repairing, so refused in strict mode
    assert_eq!(Url::deserialize("https://example.com\\lib"),
               Err(FormatError::InvalidUrl));
    assert_eq!(Option::<Url>::deserialize(""), Ok(None));
    assert_eq!(Option::<Url>::None.serialize(), "");
    assert_eq!(Some(url.clone()).serialize(), url.serialize());
}

#[test]
fn timestamps() {
    let t = Utc.with_ymd_and_hms(2017, 10, 17, 12, 34, 56).unwrap();
    assert_eq!(t.serialize(), "2017-10-17T12:34:56Z");
    assert_eq!(DateTime::<Utc>::deserialize("2017-10-17T12:34:56Z"), Ok(t));
    assert_eq!(DateTime::<Utc>::deserialize("2017-10-17T14:34:56+02:00"), Ok(t));
    assert_eq!(DateTime::<Utc>::deserialize("2017-10-17T12:34:56"), Ok(t));
    assert_eq!(DateTime::<Utc>::deserialize("yesterday"),
               Err(FormatError::InvalidDateTime));
    let local = t.with_timezone(&chrono::Local);
    assert_eq!(local.serialize(), "2017-10-17T12:34:56Z");
}

#[test]
fn domain_types_in_a_tree() -> Result<()> {
    let mut root = SExpression::create_list("pad")?;
    root.append_token_child("layer", &Some(Layer("top".to_owned())), true)?;
    root.append_token_child("mirror", &Option::<Layer>::None, true)?;
    root.append_string_child("url", &Option::<Url>::None, true)?;
    root.append_string_child("color", &Color::from_rgb(1, 2, 3), true)?;
    let text = root.to_string();
    assert_eq!(text, "(pad (layer layer:top)\n (mirror none)\n (url \"\")\n (color \"#ff010203\")\n)");

    let back = SExpression::parse(&text, &SourceFile::Unknown)?;
    assert_eq!(back.value_by_path::<Option<Layer>>("layer", true)?,
               Some(Layer("top".to_owned())));
    assert_eq!(back.value_by_path::<Option<Layer>>("mirror", true)?, None);
    assert_eq!(back.value_by_path::<Option<Url>>("url", false)?, None);
    assert_eq!(back.value_by_path::<Color>("color", true)?,
               Color::from_rgb(1, 2, 3));
    Ok(())
}
