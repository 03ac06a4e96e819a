// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Converting typed values to the text of a token or string node and
//! back.
//!
//! Every type stored in a document implements [Serialize] and
//! [Deserialize]; types that can be absent additionally implement
//! [Nullable], which makes `Option<T>` work. Escaping is not done
//! here, that's the job of the renderer.

use kstring::KString;
use num::{BigInt, BigUint};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use url::Url;
use thiserror::Error;
use std::cell::Cell;
use std::fmt::Display;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("not a valid boolean")]
    InvalidBool,
    #[error("not a valid integer")]
    InvalidInteger,
    #[error("not a valid unsigned integer")]
    InvalidUnsigned,
    #[error("not a valid datetime")]
    InvalidDateTime,
    #[error("not a valid color")]
    InvalidColor,
    #[error("not a valid URL")]
    InvalidUrl,
    /// For types defined outside this crate
    #[error("{0}")]
    Invalid(String),
}

impl FormatError {
    pub fn invalid(msg: impl Display) -> FormatError {
        FormatError::Invalid(msg.to_string())
    }
}

pub trait Serialize {
    fn serialize(&self) -> String;
}

pub trait Deserialize: Sized {
    fn deserialize(s: &str) -> Result<Self, FormatError>;
}

/// The text representing an absent value of the type, when wrapped
/// in an `Option`.
pub trait Nullable {
    const NULL: &'static str;
}

impl<T: Serialize + Nullable> Serialize for Option<T> {
    fn serialize(&self) -> String {
        match self {
            Some(v) => v.serialize(),
            None => T::NULL.to_owned(),
        }
    }
}

impl<T: Deserialize + Nullable> Deserialize for Option<T> {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        if s == T::NULL {
            Ok(None)
        } else {
            T::deserialize(s).map(Some)
        }
    }
}


impl Serialize for str {
    fn serialize(&self) -> String {
        self.to_owned()
    }
}

impl Serialize for String {
    fn serialize(&self) -> String {
        self.clone()
    }
}

impl Deserialize for String {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        Ok(s.to_owned())
    }
}

impl Serialize for KString {
    fn serialize(&self) -> String {
        self.as_str().to_owned()
    }
}

impl Deserialize for KString {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        Ok(KString::from_ref(s))
    }
}

impl Serialize for bool {
    fn serialize(&self) -> String {
        (if *self { "true" } else { "false" }).to_owned()
    }
}

impl Deserialize for bool {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        match s {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(FormatError::InvalidBool)
        }
    }
}

// FromStr for the bignum types would also accept '_' separators
macro_rules! impl_integer {
    ($err:ident; $($t:ty),*) => {
        $(
            impl Serialize for $t {
                fn serialize(&self) -> String {
                    self.to_string()
                }
            }

            impl Deserialize for $t {
                fn deserialize(s: &str) -> Result<Self, FormatError> {
                    if s.contains('_') {
                        return Err(FormatError::$err)
                    }
                    s.parse().map_err(|_| FormatError::$err)
                }
            }
        )*
    }
}

impl_integer!(InvalidInteger; i8, i16, i32, i64, i128, isize, BigInt);
impl_integer!(InvalidUnsigned; u8, u16, u32, u64, u128, usize, BigUint);


impl Serialize for Url {
    fn serialize(&self) -> String {
        self.as_str().to_owned()
    }
}

impl Deserialize for Url {
    /// Strict: input the url crate would have to repair is refused.
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        let violated = Cell::new(false);
        let report = |_: url::SyntaxViolation| violated.set(true);
        let url = Url::options()
            .syntax_violation_callback(Some(&report))
            .parse(s)
            .map_err(|_| FormatError::InvalidUrl)?;
        if violated.get() {
            Err(FormatError::InvalidUrl)
        } else {
            Ok(url)
        }
    }
}

/// An absent URL is written as an empty string
impl Nullable for Url {
    const NULL: &'static str = "";
}


fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, FormatError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc))
    }
    // without zone, taken as UTC
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|t| Utc.from_utc_datetime(&t))
        .map_err(|_| FormatError::InvalidDateTime)
}

impl Serialize for DateTime<Utc> {
    fn serialize(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Deserialize for DateTime<Utc> {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        parse_timestamp(s)
    }
}

impl Serialize for DateTime<Local> {
    fn serialize(&self) -> String {
        self.with_timezone(&Utc).serialize()
    }
}

impl Deserialize for DateTime<Local> {
    fn deserialize(s: &str) -> Result<Self, FormatError> {
        Ok(parse_timestamp(s)?.with_timezone(&Local))
    }
}
