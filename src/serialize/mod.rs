//! Writing a converted `Document` out as JSON or as the line-oriented DSL.

pub mod dsl;
pub mod json;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use ::convert::Document;
use ::errors::{Error, ErrorKind, Result};


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    JsonVerbose,
    Dsl,
    DslVerbose,
}

impl Format {
    pub fn is_verbose(&self) -> bool {
        match *self {
            Format::JsonVerbose | Format::DslVerbose => true,
            Format::Json | Format::Dsl => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Format::Json => "json",
            Format::JsonVerbose => "jsonverbose",
            Format::Dsl => "dsl",
            Format::DslVerbose => "dslverbose",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the format names with or without a leading dash, so `-json` works as well as `json`.
impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = if s.starts_with('-') { &s[1..] } else { s };
        match name {
            "json" => Ok(Format::Json),
            "jsonverbose" => Ok(Format::JsonVerbose),
            "dsl" => Ok(Format::Dsl),
            "dslverbose" => Ok(Format::DslVerbose),
            _ => bail!(ErrorKind::BadOption("output format", s.to_owned())),
        }
    }
}

pub fn write_document(doc: &Document, format: Format, out: &mut Write) -> Result<()> {
    match format {
        Format::Json | Format::JsonVerbose => json::write_json(doc, format.is_verbose(), out),
        Format::Dsl | Format::DslVerbose => dsl::write_dsl(doc, format.is_verbose(), out),
    }
}
