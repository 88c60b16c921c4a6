//! Single value parser

use tracing::trace;

use super::key::{find_assignment, split_key_path, split_top_level, Quotes};
use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::escape::escape_literal;
use crate::value::{Key, Map, Object};

const TRIPLE_BASIC: &str = "\"\"\"";
const TRIPLE_LITERAL: &str = "'''";

/// Parse one value with the default [`Config`]
///
/// Surrounding whitespace is ignored. Arrays and inline tables come back as
/// [`Object::Table`].
pub fn parse_single(text: &str) -> Result<Object> {
    parse_single_with_config(text, &Config::default())
}

/// Parse one value with an explicit [`Config`]
pub fn parse_single_with_config(text: &str, config: &Config) -> Result<Object> {
    ValueParser::new(config).parse(text)
}

/// Recursive value parser tracking container depth
pub(crate) struct ValueParser<'c> {
    config: &'c Config,
    depth: usize,
}

impl<'c> ValueParser<'c> {
    pub(crate) fn new(config: &'c Config) -> Self {
        Self { config, depth: 0 }
    }

    pub(crate) fn parse(&mut self, text: &str) -> Result<Object> {
        let text = text.trim();

        if text == "true" || text == "false" {
            return Ok(Object::Boolean(text.to_owned()));
        }
        if is_number(text) {
            return Ok(Object::Number(text.to_owned()));
        }
        if let Some(content) = enclosed(text, TRIPLE_LITERAL) {
            return Ok(Object::String(
                escape_literal(strip_first_newline(content)).into_owned(),
            ));
        }
        if let Some(content) = enclosed(text, TRIPLE_BASIC) {
            return Ok(Object::String(strip_first_newline(content).to_owned()));
        }
        if let Some(content) = enclosed(text, "'") {
            if content.contains('\n') {
                return Err(Error::new(ErrorKind::NewlineInLiteralString, text));
            }
            return Ok(Object::String(escape_literal(content).into_owned()));
        }
        if let Some(content) = enclosed(text, "\"") {
            return Ok(Object::String(content.to_owned()));
        }
        if text.starts_with('[') && text.ends_with(']') {
            return self.nested(text, Self::parse_array).map(Object::Table);
        }
        if text.starts_with('{') && text.ends_with('}') {
            return self.nested(text, Self::parse_inline_table).map(Object::Table);
        }

        Err(Error::new(ErrorKind::UnknownValueType, text))
    }

    fn nested(
        &mut self,
        text: &str,
        parse: fn(&mut Self, &str) -> Result<Map>,
    ) -> Result<Map> {
        self.depth += 1;
        self.config.check_depth(self.depth, text)?;
        let map = parse(self, text)?;
        self.depth -= 1;
        Ok(map)
    }

    /// `[a, b, ...]` into a map keyed `0..n`
    fn parse_array(&mut self, text: &str) -> Result<Map> {
        let invalid = || Error::new(ErrorKind::InvalidArrayDefinition, text);
        let mut items = Map::new();
        let mut quotes = Quotes::default();
        let mut brackets = 0usize;
        let mut braces = 0usize;
        let mut element = String::new();

        for (i, ch) in text.char_indices() {
            let was_open = quotes.is_open();
            quotes.feed(ch);
            if was_open || quotes.is_open() {
                element.push(ch);
                continue;
            }

            match ch {
                '[' => {
                    brackets += 1;
                    if brackets == 1 {
                        continue;
                    }
                }
                ']' => {
                    brackets = brackets.checked_sub(1).ok_or_else(invalid)?;
                    if brackets == 0 {
                        let trailing = text.get(i + 1..).unwrap_or_default();
                        if !trailing.trim().is_empty() || braces != 0 {
                            return Err(invalid());
                        }
                        self.push_element(&mut items, &element)?;
                        return Ok(items);
                    }
                }
                '{' => braces += 1,
                '}' => braces = braces.checked_sub(1).ok_or_else(invalid)?,
                ',' if brackets == 1 && braces == 0 => {
                    self.push_element(&mut items, &element)?;
                    element.clear();
                    continue;
                }
                _ => {}
            }
            element.push(ch);
        }

        Err(invalid())
    }

    fn push_element(&mut self, items: &mut Map, element: &str) -> Result<()> {
        let element = element.trim();
        if element.is_empty() {
            return Ok(());
        }
        let value = self.parse(element)?;
        items.insert(Key::index(items.len()), value);
        Ok(())
    }

    /// `{ k = v, ... }` into a map, dotted field names nesting
    fn parse_inline_table(&mut self, text: &str) -> Result<Map> {
        let invalid = |snippet: &str| Error::new(ErrorKind::InvalidInlineTableDefinition, snippet);
        let inner = text
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .ok_or_else(|| invalid(text))?;

        let mut table = Map::new();
        for field in split_top_level(inner, ',').map_err(|_| invalid(text))? {
            if field.trim().is_empty() {
                continue;
            }
            let Some(eq) = find_assignment(field) else {
                return Err(invalid(field.trim()));
            };
            let (name, rest) = field.split_at(eq);
            let value = rest.get(1..).unwrap_or_default();
            if name.trim().is_empty() || value.trim().is_empty() {
                return Err(invalid(field.trim()));
            }

            let path = split_key_path(name)?;
            self.config.check_depth(self.depth + path.len(), field.trim())?;
            let value = self.parse(value)?;
            trace!(field = name.trim(), "inline table field");

            let mut fragment = Map::new();
            fragment.deep_add(&path, value)?;
            table.merge(fragment);
        }
        Ok(table)
    }
}

/// Content between matching delimiters, None if `text` is not so enclosed
fn enclosed<'t>(text: &'t str, delimiter: &str) -> Option<&'t str> {
    if text.len() < delimiter.len() * 2 {
        return None;
    }
    text.strip_prefix(delimiter)?.strip_suffix(delimiter)
}

fn strip_first_newline(content: &str) -> &str {
    content.strip_prefix('\n').unwrap_or(content)
}

/// `[+-]?(0|[1-9]\d*)(\.\d+)?([eE][+-]?[1-9]\d*)?`
pub(crate) fn is_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let bytes = match bytes {
        [b'+' | b'-', rest @ ..] => rest,
        _ => bytes,
    };

    let (integer, rest) = split_digits(bytes);
    if !matches!(integer, [b'0'] | [b'1'..=b'9', ..]) {
        return false;
    }

    let rest = match rest {
        [b'.', fraction @ ..] => {
            let (digits, rest) = split_digits(fraction);
            if digits.is_empty() {
                return false;
            }
            rest
        }
        _ => rest,
    };

    match rest {
        [] => true,
        [b'e' | b'E', exponent @ ..] => {
            let exponent = match exponent {
                [b'+' | b'-', digits @ ..] => digits,
                _ => exponent,
            };
            matches!(exponent, [b'1'..=b'9', tail @ ..] if tail.iter().all(u8::is_ascii_digit))
        }
        _ => false,
    }
}

fn split_digits(bytes: &[u8]) -> (&[u8], &[u8]) {
    let count = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    bytes.split_at(count)
}
