//! Output formatters
//!
//! Each formatter walks the tree read-only and never fails. A missing value
//! renders as the target's null literal.

mod json;
mod php;
mod xml;

use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::error::{Error, ErrorKind};
use crate::value::Object;

pub use json::JsonFormatter;
pub use php::PhpFormatter;
pub use xml::XmlFormatter;

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
    Php,
}

impl Format {
    pub const ALL: [Self; 3] = [Self::Json, Self::Xml, Self::Php];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Php => "php",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "php" => Ok(Self::Php),
            _ => Err(Error::new(ErrorKind::UnknownFormat, s)),
        }
    }
}

/// Formatter settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    /// Spaces per nesting level for PHP output and pretty JSON
    pub indent_spaces: usize,
    /// Pretty-print JSON instead of the compact form
    pub pretty: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 4,
            pretty: false,
        }
    }
}

impl FormatConfig {
    pub(crate) fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_spaces * depth)
    }
}

/// Renders a value tree as text
pub trait Formatter {
    /// Output for a missing value
    const NULL: &'static str;

    /// Append the rendering of `object` to `out`
    fn write(&self, object: &Object, out: &mut String);

    /// Render `object`, or the null literal for None
    fn render(&self, object: Option<&Object>) -> String {
        match object {
            Some(object) => {
                let mut out = String::new();
                self.write(object, &mut out);
                out
            }
            None => Self::NULL.to_owned(),
        }
    }
}

/// Render with the default [`FormatConfig`]
pub fn render<'o>(object: impl Into<Option<&'o Object>>, format: Format) -> String {
    render_with_config(object, format, &FormatConfig::default())
}

/// Render with explicit formatter settings
#[instrument(level = "debug", skip(object, config))]
pub fn render_with_config<'o>(
    object: impl Into<Option<&'o Object>>,
    format: Format,
    config: &FormatConfig,
) -> String {
    let object = object.into();
    match format {
        Format::Json => JsonFormatter::new(*config).render(object),
        Format::Xml => XmlFormatter.render(object),
        Format::Php => PhpFormatter::new(*config).render(object),
    }
}
