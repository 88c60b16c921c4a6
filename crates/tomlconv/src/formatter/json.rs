
use super::{FormatConfig, Formatter};
use crate::value::{Map, Object};

/// JSON output
///
/// Newlines inside strings are written as-is rather than as `\n`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter {
    config: FormatConfig,
}

impl JsonFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    fn write_value(&self, object: &Object, depth: usize, out: &mut String) {
        match object {
            Object::Number(_) => out.push_str(object.number_literal().unwrap_or_default()),
            Object::Boolean(text) => out.push_str(text),
            Object::String(_) => {
                write_string(&object.decoded().unwrap_or_default(), out);
            }
            Object::Table(map) => self.write_map(map, depth, out),
        }
    }

    fn write_map(&self, map: &Map, depth: usize, out: &mut String) {
        let is_array = map.is_array();
        let (open, close) = if is_array { ('[', ']') } else { ('{', '}') };

        out.push(open);
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(depth + 1, out);
            if !is_array {
                write_string(key.as_str(), out);
                out.push(':');
                if self.config.pretty {
                    out.push(' ');
                }
            }
            self.write_value(value, depth + 1, out);
        }
        if !map.is_empty() {
            self.newline(depth, out);
        }
        out.push(close);
    }

    fn newline(&self, depth: usize, out: &mut String) {
        if self.config.pretty {
            out.push('\n');
            out.push_str(&self.config.indent(depth));
        }
    }
}

impl Formatter for JsonFormatter {
    const NULL: &'static str = "null";

    fn write(&self, object: &Object, out: &mut String) {
        self.write_value(object, 0, out);
    }
}

fn write_string(text: &str, out: &mut String) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push('\n'),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            c if u32::from(c) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Key;

    fn json(object: &Object) -> String {
        JsonFormatter::default().render(Some(object))
    }

    #[test]
    fn test_scalars() {
        assert_eq!(json(&Object::Number("+42".into())), "42");
        assert_eq!(json(&Object::Number("-1.5e3".into())), "-1.5e3");
        assert_eq!(json(&Object::from(false)), "false");
        assert_eq!(json(&Object::from("hello")), r#""hello""#);
    }

    #[test]
    fn test_string_escapes() {
        let object = Object::String(r#"say \"hi\"\tC:\\dir\nnext"#.into());
        assert_eq!(json(&object), "\"say \\\"hi\\\"\\tC:\\\\dir\nnext\"");
        assert_eq!(json(&Object::String("\u{1}".into())), r#""\u0001""#);
    }

    #[test]
    fn test_array_and_object() {
        let mut list = Map::new();
        list.insert(Key::index(0), 1);
        list.insert(Key::index(1), "two");
        let mut root = Map::new();
        root.insert(Key::name("list"), list);
        root.insert(Key::name("empty"), Map::new());

        assert_eq!(json(&Object::from(root)), r#"{"list":[1,"two"],"empty":{}}"#);
    }

    #[test]
    fn test_pretty() {
        let mut list = Map::new();
        list.insert(Key::index(0), 1);
        let mut root = Map::new();
        root.insert(Key::name("a"), list);
        root.insert(Key::name("b"), true);

        let config = FormatConfig {
            indent_spaces: 2,
            pretty: true,
        };
        let out = JsonFormatter::new(config).render(Some(&Object::from(root)));
        assert_eq!(out, "{\n  \"a\": [\n    1\n  ],\n  \"b\": true\n}");
    }
}
