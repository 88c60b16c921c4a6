//! Conversion entry points

use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::formatter::{render, Format};
use crate::normalize::normalize;
use crate::parser::{parse_single_with_config, parse_table_with_config};
use crate::value::Object;

/// How the input text is interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A single bare value: scalar, array or inline table
    Single,
    /// A document of assignments and table headers
    #[default]
    Table,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "table" => Ok(Self::Table),
            _ => Err(Error::new(ErrorKind::UnknownMode, s)),
        }
    }
}

/// Normalize and parse `text` with the default [`Config`]
pub fn convert(mode: Mode, text: &str) -> Result<Object> {
    convert_with_config(mode, text, &Config::default())
}

/// Normalize and parse `text`
///
/// The size limit applies to the raw input. In table mode the result is
/// always an [`Object::Table`].
#[instrument(level = "debug", skip(text, config), fields(len = text.len()))]
pub fn convert_with_config(mode: Mode, text: &str, config: &Config) -> Result<Object> {
    config.check_size(text.len())?;
    let normalized = normalize(text)?;
    match mode {
        Mode::Single => parse_single_with_config(&normalized, config),
        Mode::Table => parse_table_with_config(&normalized, config).map(Object::Table),
    }
}

/// Convert to JSON
pub fn to_json(mode: Mode, text: &str) -> Result<String> {
    convert(mode, text).map(|object| render(&object, Format::Json))
}

/// Convert to XML
pub fn to_xml(mode: Mode, text: &str) -> Result<String> {
    convert(mode, text).map(|object| render(&object, Format::Xml))
}

/// Convert to a PHP array literal
pub fn to_php(mode: Mode, text: &str) -> Result<String> {
    convert(mode, text).map(|object| render(&object, Format::Php))
}
