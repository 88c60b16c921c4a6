//! String escape handling
//!
//! String objects always carry basic-string escaped text. Literal strings are
//! brought into that form when parsed ([`escape_literal`]) and every formatter
//! decodes with [`decode_basic`] before applying its own target escaping.

use std::borrow::Cow;

/// Bring literal string content into basic-string escaped form
pub fn escape_literal(content: &str) -> Cow<'_, str> {
    if content.contains('\\') {
        Cow::Owned(content.replace('\\', "\\\\"))
    } else {
        Cow::Borrowed(content)
    }
}

/// Decode basic-string escape sequences
///
/// Unknown or malformed sequences are kept verbatim.
pub fn decode_basic(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('b') => push_decoded(&mut out, &mut chars, '\x08'),
            Some('t') => push_decoded(&mut out, &mut chars, '\t'),
            Some('n') => push_decoded(&mut out, &mut chars, '\n'),
            Some('f') => push_decoded(&mut out, &mut chars, '\x0C'),
            Some('r') => push_decoded(&mut out, &mut chars, '\r'),
            Some('"') => push_decoded(&mut out, &mut chars, '"'),
            Some('\\') => push_decoded(&mut out, &mut chars, '\\'),
            Some(marker @ ('u' | 'U')) => {
                let digits = if marker == 'u' { 4 } else { 8 };
                let hex: String = chars.clone().skip(1).take(digits).collect();
                match unicode_scalar(&hex, digits) {
                    Some(decoded) => {
                        out.push(decoded);
                        for _ in 0..=digits {
                            chars.next();
                        }
                    }
                    None => out.push('\\'),
                }
            }
            _ => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

fn push_decoded(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    decoded: char,
) {
    out.push(decoded);
    chars.next();
}

fn unicode_scalar(hex: &str, digits: usize) -> Option<char> {
    if hex.chars().count() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
