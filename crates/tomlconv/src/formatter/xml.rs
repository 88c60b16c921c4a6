use std::borrow::Cow;

use tracing::warn;

use super::Formatter;
use crate::value::{Map, Object};

/// XML output
///
/// Scalars are wrapped in CDATA sections. Array-shaped tables emit one `<item>`
/// per element; other tables use their keys as element names.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlFormatter;

impl Formatter for XmlFormatter {
    const NULL: &'static str = "<xml><single>null</single></xml>";

    fn write(&self, object: &Object, out: &mut String) {
        match object {
            Object::Table(map) => {
                out.push_str("<xml><table>");
                write_map(map, out);
                out.push_str("</table></xml>");
            }
            scalar => {
                out.push_str("<xml><single>");
                write_value(scalar, out);
                out.push_str("</single></xml>");
            }
        }
    }
}

fn write_map(map: &Map, out: &mut String) {
    let is_array = map.is_array();
    for (key, value) in map {
        let tag = if is_array {
            Cow::Borrowed("item")
        } else {
            element_name(key.as_str())
        };
        out.push('<');
        out.push_str(&tag);
        out.push('>');
        write_value(value, out);
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
    }
}

fn write_value(object: &Object, out: &mut String) {
    match object {
        Object::Table(map) => write_map(map, out),
        Object::Number(_) => write_cdata(object.number_literal().unwrap_or_default(), out),
        Object::Boolean(text) => write_cdata(text, out),
        Object::String(_) => write_cdata(&object.decoded().unwrap_or_default(), out),
    }
}

/// `]]>` cannot appear inside a CDATA section, so it is split across two
fn write_cdata(text: &str, out: &mut String) {
    out.push_str("<![CDATA[");
    out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
}

fn element_name(key: &str) -> Cow<'_, str> {
    let mut chars = key.chars();
    let valid = chars.next().is_some_and(is_name_start) && chars.all(is_name_char);
    if valid {
        return Cow::Borrowed(key);
    }

    let mut name: String = key
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();
    if !name.chars().next().is_some_and(is_name_start) {
        name.insert(0, '_');
    }
    warn!(key, element = %name, "sanitized XML element name");
    Cow::Owned(name)
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}
