//! Line oriented document parser

use tracing::{debug, instrument};

use super::key::{find_assignment, has_unquoted, split_key_path};
use super::value::ValueParser;
use crate::config::Config;
use crate::error::{Error, ErrorKind, Pos, Result};
use crate::value::{join_path, Map, Object};

const TRIPLE_BASIC: &str = "\"\"\"";
const TRIPLE_LITERAL: &str = "'''";

/// Parse a normalized document with the default [`Config`]
pub fn parse_table(text: &str) -> Result<Map> {
    parse_table_with_config(text, &Config::default())
}

/// Parse a normalized document with an explicit [`Config`]
///
/// `text` is expected to have been through [`crate::normalize`]: comments
/// gone and every array or inline table on a single line.
#[instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn parse_table_with_config(text: &str, config: &Config) -> Result<Map> {
    TableParser::new(text, config).run()
}

struct TableParser<'a> {
    lines: Vec<&'a str>,
    config: &'a Config,
    root: Map,
    /// Resolved path of the current table header
    prefix: Vec<String>,
}

impl<'a> TableParser<'a> {
    fn new(text: &'a str, config: &'a Config) -> Self {
        Self {
            lines: text.split('\n').collect(),
            config,
            root: Map::new(),
            prefix: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Map> {
        let mut next = 0;
        while let Some(raw) = self.lines.get(next).copied() {
            let pos = Pos::line_start(u32::try_from(next + 1).unwrap_or(u32::MAX));
            next += 1;

            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                self.header(line).map_err(|err| err.or_at(pos))?;
            } else if let Some(eq) = find_assignment(line) {
                next = self
                    .assignment(line, eq, next)
                    .map_err(|err| err.or_at(pos))?;
            } else {
                return Err(Error::at(ErrorKind::SyntaxError, pos, line));
            }
        }
        Ok(self.root)
    }

    fn header(&mut self, line: &str) -> Result<()> {
        let array_name = line
            .strip_prefix("[[")
            .and_then(|rest| rest.strip_suffix("]]"))
            .filter(|_| line.len() >= 4);

        let plain_name = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']'));
        if array_name.or(plain_name).is_some_and(|name| has_unquoted(name, ']')) {
            return Err(Error::new(ErrorKind::KeyGroupNotAlone, line));
        }

        if let Some(name) = array_name {
            let path = split_key_path(name)?;
            self.prefix = resolve_path(&self.root, &path, true);
            debug!(table = %join_path(&self.prefix), "array of tables entry");
        } else if let Some(name) = plain_name {
            let path = split_key_path(name)?;
            self.prefix = resolve_path(&self.root, &path, false);
            debug!(table = %join_path(&self.prefix), "table header");
        } else {
            return Err(Error::new(ErrorKind::KeyGroupNotAlone, line));
        }

        self.config.check_depth(self.prefix.len(), line)?;
        self.root.ensure_table(&self.prefix)?;
        Ok(())
    }

    /// Handle `key = value`, returning the index of the next unread line
    fn assignment(&mut self, line: &str, eq: usize, mut next: usize) -> Result<usize> {
        let (field, rest) = line.split_at(eq);
        let mut value = rest.get(1..).unwrap_or_default().trim().to_owned();

        for (delimiter, unterminated) in [
            (TRIPLE_BASIC, ErrorKind::UnterminatedMultilineString),
            (TRIPLE_LITERAL, ErrorKind::UnterminatedMultilineLiteralString),
        ] {
            if opens_multiline(&value, delimiter) {
                next = self.continue_multiline(&mut value, delimiter, next, unterminated)?;
                break;
            }
        }

        let mut path = self.prefix.clone();
        path.extend(split_key_path(field)?);
        self.config.check_depth(path.len(), line)?;

        let object = ValueParser::new(self.config).parse(&value)?;
        debug!(key = %join_path(&path), "assignment");
        self.root.deep_add(&path, object)?;
        Ok(next)
    }

    /// Append raw lines to `value` until one ends with `delimiter`
    fn continue_multiline(
        &self,
        value: &mut String,
        delimiter: &str,
        mut next: usize,
        unterminated: ErrorKind,
    ) -> Result<usize> {
        loop {
            let Some(raw) = self.lines.get(next) else {
                return Err(Error::new(unterminated, value.lines().next().unwrap_or_default()));
            };
            next += 1;
            value.push('\n');
            value.push_str(raw);
            if raw.trim_end().ends_with(delimiter) {
                return Ok(next);
            }
        }
    }
}

fn opens_multiline(value: &str, delimiter: &str) -> bool {
    value.starts_with(delimiter) && (value.len() == delimiter.len() || !value.ends_with(delimiter))
}

/// Resolve a header path against the tree built so far
///
/// Intermediate segments that name an array of tables descend into its last
/// element. A table that merely holds a scalar under `0` is not one. With `append`, the final segment gets the next free slot.
fn resolve_path(root: &Map, path: &[String], append: bool) -> Vec<String> {
    let mut resolved = Vec::with_capacity(path.len() * 2);
    let mut current = Some(root);

    for (i, segment) in path.iter().enumerate() {
        resolved.push(segment.clone());
        let child = current
            .and_then(|table| table.get(segment))
            .and_then(Object::as_table);

        if i + 1 == path.len() {
            if append {
                resolved.push(child.map_or(0, Map::next_index).to_string());
            }
            break;
        }

        current = match child {
            Some(table) if table.is_array() => {
                let last = table.next_index().saturating_sub(1).to_string();
                match table.get(&last).and_then(Object::as_table) {
                    Some(element) => {
                        resolved.push(last);
                        Some(element)
                    }
                    None => Some(table),
                }
            }
            other => other,
        };
    }
    resolved
}
