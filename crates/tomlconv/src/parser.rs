//! Value and document parsers

mod key;
mod table;
mod value;

pub use table::{parse_table, parse_table_with_config};
pub use value::{parse_single, parse_single_with_config};
