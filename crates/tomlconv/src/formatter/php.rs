use super::{FormatConfig, Formatter};
use crate::value::{is_index_literal, Map, Object};

/// PHP array literal output
#[derive(Clone, Copy, Debug, Default)]
pub struct PhpFormatter {
    config: FormatConfig,
}

impl PhpFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    fn write_array(&self, map: &Map, depth: usize, out: &mut String) {
        let is_array = map.is_array();
        let entry_indent = self.config.indent(depth + 1);

        out.push_str("array(\n");
        for (key, value) in map {
            out.push_str(&entry_indent);
            if is_array || is_index_literal(key.as_str()) {
                out.push_str(key.as_str());
            } else {
                write_string(key.as_str(), out);
            }
            out.push_str(" => ");
            match value {
                Object::Table(inner) => self.write_array(inner, depth + 1, out),
                scalar => {
                    write_scalar(scalar, out);
                    out.push_str(",\n");
                }
            }
        }
        out.push_str(&self.config.indent(depth));
        out.push(')');
        out.push_str(if depth > 0 { ",\n" } else { "\n" });
    }
}

impl Formatter for PhpFormatter {
    const NULL: &'static str = "''";

    fn write(&self, object: &Object, out: &mut String) {
        match object {
            Object::Table(map) => self.write_array(map, 0, out),
            scalar => write_scalar(scalar, out),
        }
    }
}

/// Booleans stay bare under named keys too, so `'on' => true` keeps its PHP type
fn write_scalar(object: &Object, out: &mut String) {
    match object {
        Object::Number(_) => out.push_str(object.number_literal().unwrap_or_default()),
        Object::Boolean(text) => out.push_str(text),
        Object::String(_) => write_string(&object.decoded().unwrap_or_default(), out),
        Object::Table(_) => out.push_str(PhpFormatter::NULL),
    }
}

/// Single-quoted PHP string; only `'` and `\` need escaping
fn write_string(text: &str, out: &mut String) {
    out.push('\'');
    for ch in text.chars() {
        if matches!(ch, '\'' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
}
