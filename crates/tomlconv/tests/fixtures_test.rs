use std::fs;
use std::path::Path;

use tomlconv::{convert, render, ErrorKind, Format, Mode};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn expected_kind(stem: &str) -> Option<ErrorKind> {
    let kind = match stem {
        "unbalanced_bracket" => ErrorKind::UnbalancedBracket,
        "unexpected_close_bracket" => ErrorKind::UnexpectedCloseBracket,
        "multiline_key_group" => ErrorKind::DisallowedMultilineKeyGroup,
        "unterminated_key_group" => ErrorKind::UnterminatedKeyGroup,
        "unterminated_string" => ErrorKind::UnterminatedString,
        "unterminated_literal_string" => ErrorKind::UnterminatedLiteralString,
        "unterminated_multiline_string" => ErrorKind::UnterminatedMultilineString,
        "reserved_escape" => ErrorKind::ReservedEscapeSequence,
        "key_group_not_alone" => ErrorKind::KeyGroupNotAlone,
        "syntax_error" => ErrorKind::SyntaxError,
        "unknown_value_type" => ErrorKind::UnknownValueType,
        "invalid_array" => ErrorKind::InvalidArrayDefinition,
        "invalid_inline_table" => ErrorKind::InvalidInlineTableDefinition,
        "key_conflict" => ErrorKind::KeyConflict,
        "invalid_key" => ErrorKind::InvalidKey,
        _ => return None,
    };
    Some(kind)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[test]
fn test_valid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let valid_dir = Path::new(FIXTURES).join("valid");
    let mut checked = 0;

    for entry in fs::read_dir(&valid_dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "toml") {
            continue;
        }
        let input = fs::read_to_string(&path)?;
        let object = convert(Mode::Table, &input)
            .map_err(|err| format!("{}: {err}", path.display()))?;

        for format in Format::ALL {
            let expected_path = path.with_extension(format.as_str());
            if !expected_path.exists() {
                continue;
            }
            let expected = fs::read_to_string(&expected_path)?;
            let output = render(&object, format);
            assert_eq!(
                output.trim_end(),
                expected.trim_end(),
                "{} as {format}",
                file_stem(&path)
            );
            checked += 1;
        }
    }

    assert!(checked >= 6, "only {checked} expected outputs found");
    Ok(())
}

#[test]
fn test_invalid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let invalid_dir = Path::new(FIXTURES).join("invalid");

    for entry in fs::read_dir(&invalid_dir)? {
        let path = entry?.path();
        let stem = file_stem(&path);
        let input = fs::read_to_string(&path)?;

        let Err(err) = convert(Mode::Table, &input) else {
            return Err(format!("invalid fixture converted successfully: {stem}").into());
        };
        assert_eq!(Some(err.kind().clone()), expected_kind(&stem), "{stem}: {err}");
    }
    Ok(())
}
