//! tomlconv - TOML dialect to JSON, XML and PHP array converter
//!
//! Input goes through three stages: [`normalize`] strips comments and folds
//! bracketed values onto one line, a parser builds an ordered [`Object`] tree,
//! and a formatter renders that tree. Arrays are tables keyed `0..n`, so a
//! table renders as a list exactly when its keys form that sequence.
//!
//! # Quick Start
//!
//! ```
//! use tomlconv::{convert, render, Format, Mode};
//! # fn main() -> Result<(), tomlconv::Error> {
//! let object = convert(Mode::Table, "[[fruit]]\nname = \"apple\"\n[[fruit]]\nname = \"banana\"")?;
//! assert_eq!(
//!     render(&object, Format::Json),
//!     r#"{"fruit":[{"name":"apple"},{"name":"banana"}]}"#
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod cursor;

pub mod config;
pub use config::Config;

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

pub mod escape;

pub mod value;
pub use value::{Key, KeyKind, Map, Object};

pub mod normalize;
pub use normalize::normalize;

pub mod parser;
pub use parser::{parse_single, parse_single_with_config, parse_table, parse_table_with_config};

pub mod formatter;
pub use formatter::{render, render_with_config, Format, FormatConfig, Formatter};

pub mod convert;
pub use convert::{convert, convert_with_config, to_json, to_php, to_xml, Mode};
