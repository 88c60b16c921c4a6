use tomlconv::{
    convert, convert_with_config, normalize, parse_single, parse_table, render,
    render_with_config, to_json, to_php, to_xml, Config, ErrorKind, Format, FormatConfig, Map,
    Mode, Object,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn kind_of(mode: Mode, text: &str) -> Option<ErrorKind> {
    convert(mode, text).err().map(|err| err.kind().clone())
}

#[test]
fn test_single_values_to_json() -> TestResult {
    let cases = [
        ("123554", "123554"),
        ("23.4056", "23.4056"),
        ("+0.2399", "0.2399"),
        ("true", "true"),
        ("\"hello,world\"", "\"hello,world\""),
        ("\"https://example.com/\"", "\"https://example.com/\""),
        (
            r#"'{"merchant_id":"2"}'"#,
            r#""{\"merchant_id\":\"2\"}""#,
        ),
        (
            r#""{\"merchant_id\":\"2\"}""#,
            r#""{\"merchant_id\":\"2\"}""#,
        ),
    ];
    for (input, expected) in cases {
        assert_eq!(to_json(Mode::Single, input)?, expected, "{input}");
    }
    Ok(())
}

#[test]
fn test_single_values_to_xml_and_php() -> TestResult {
    assert_eq!(
        to_xml(Mode::Single, "+5")?,
        "<xml><single><![CDATA[5]]></single></xml>"
    );
    assert_eq!(
        to_xml(Mode::Single, "'raw'")?,
        "<xml><single><![CDATA[raw]]></single></xml>"
    );
    assert_eq!(to_php(Mode::Single, "false")?, "false");
    assert_eq!(to_php(Mode::Single, r#""it's""#)?, r"'it\'s'");
    Ok(())
}

#[test]
fn test_literal_array() -> TestResult {
    let json = to_json(Mode::Single, r#"[ 'literal,', 'strings', 'quo"ted' ]"#)?;
    assert_eq!(json, r#"["literal,","strings","quo\"ted"]"#);
    Ok(())
}

#[test]
fn test_inline_table_roundtrip() -> TestResult {
    let object = convert(Mode::Table, "pt = { x = 1, y = 2 }")?;
    let pt = object.as_table().and_then(|root| root.get("pt"));
    assert_eq!(pt.map(|pt| render(pt, Format::Json)).as_deref(), Some(r#"{"x":1,"y":2}"#));
    Ok(())
}

#[test]
fn test_array_of_tables_indexes() -> TestResult {
    let root = parse_table("[[fruit]]\nname=\"apple\"\n[[fruit]]\nname=\"banana\"")?;
    let fruit = root.get("fruit").and_then(Object::as_table);
    assert_eq!(fruit.map(Map::is_array), Some(true));

    let name = |slot: &str| {
        fruit
            .and_then(|f| f.get(slot))
            .and_then(Object::as_table)
            .and_then(|t| t.get("name"))
            .cloned()
    };
    assert_eq!(name("0"), Some(Object::from("apple")));
    assert_eq!(name("1"), Some(Object::from("banana")));
    Ok(())
}

#[test]
fn test_multiline_basic_string() -> TestResult {
    let object = convert(Mode::Table, "key = \"\"\"\nOne\nTwo\"\"\"")?;
    let key = object.as_table().and_then(|root| root.get("key"));
    assert_eq!(key, Some(&Object::from("One\nTwo")));
    Ok(())
}

#[test]
fn test_string_forms_to_json() -> TestResult {
    let input = r#"str1 = "Tab\tQuote\" and \u00e9"
winpath = 'C:\Users\nodejs\templates'
regex = '<\i\c*\s*>'
lines = '''
first
second
'''
joined = """\
    The quick brown \
    fox."""
"#;
    let json = to_json(Mode::Table, input)?;
    assert_eq!(
        json,
        "{\"str1\":\"Tab\\tQuote\\\" and \u{e9}\",\
         \"winpath\":\"C:\\\\Users\\\\nodejs\\\\templates\",\
         \"regex\":\"<\\\\i\\\\c*\\\\s*>\",\
         \"lines\":\"first\nsecond\n\",\
         \"joined\":\"The quick brown fox.\"}"
    );
    Ok(())
}

#[test]
fn test_literal_strings_to_php() -> TestResult {
    let php = to_php(Mode::Table, r"path = 'C:\temp'")?;
    assert_eq!(php, "array(\n    'path' => 'C:\\\\temp',\n)\n");
    Ok(())
}

#[test]
fn test_php_field_order_follows_source() -> TestResult {
    let php = to_php(Mode::Table, "zeta = 1\nalpha = 2\n[mid]\nb = 3\na = 4")?;
    assert_eq!(
        php,
        "array(\n    'zeta' => 1,\n    'alpha' => 2,\n    'mid' => array(\n        'b' => 3,\n        'a' => 4,\n    ),\n)\n"
    );
    Ok(())
}

#[test]
fn test_xml_sanitizes_keys() -> TestResult {
    let xml = to_xml(Mode::Table, "\"first name\" = \"Tom\"\n1st = 1")?;
    assert_eq!(
        xml,
        "<xml><table><first_name><![CDATA[Tom]]></first_name>\
         <_1st><![CDATA[1]]></_1st></table></xml>"
    );
    Ok(())
}

#[test]
fn test_empty_array_renders_as_object() -> TestResult {
    assert_eq!(to_json(Mode::Table, "a = []")?, r#"{"a":{}}"#);
    Ok(())
}

#[test]
fn test_nested_arrays() -> TestResult {
    let json = to_json(Mode::Table, "data = [ [\"gamma\", \"delta\"], [1, 2] ]")?;
    assert_eq!(json, r#"{"data":[["gamma","delta"],[1,2]]}"#);
    Ok(())
}

#[test]
fn test_render_none() {
    assert_eq!(render(None, Format::Json), "null");
    assert_eq!(render(None, Format::Xml), "<xml><single>null</single></xml>");
    assert_eq!(render(None, Format::Php), "''");
}

#[test]
fn test_pretty_json() -> TestResult {
    let object = convert(Mode::Table, "a = 1\n[b]\nc = [true]")?;
    let config = FormatConfig {
        indent_spaces: 2,
        pretty: true,
    };
    assert_eq!(
        render_with_config(&object, Format::Json, &config),
        "{\n  \"a\": 1,\n  \"b\": {\n    \"c\": [\n      true\n    ]\n  }\n}"
    );
    Ok(())
}

#[test]
fn test_unbalanced_bracket_is_an_error() {
    assert_eq!(
        kind_of(Mode::Table, "key = [1, 2"),
        Some(ErrorKind::UnbalancedBracket)
    );
    assert!(normalize("key = [1, 2").is_err());
}

#[test]
fn test_value_errors_carry_snippet() {
    let err = convert(Mode::Table, "a = 1\nb = maybe").err();
    assert_eq!(err.as_ref().map(|e| e.kind().clone()), Some(ErrorKind::UnknownValueType));
    assert_eq!(err.as_ref().map(|e| e.snippet()), Some("maybe"));
    assert_eq!(err.as_ref().and_then(|e| e.pos()).map(|p| p.line), Some(2));
}

#[test]
fn test_single_mode_errors() {
    assert_eq!(kind_of(Mode::Single, "nope"), Some(ErrorKind::UnknownValueType));
    assert_eq!(
        kind_of(Mode::Single, "[1, 2"),
        Some(ErrorKind::UnbalancedBracket)
    );
    assert!(parse_single("{ a = }").is_err());
}

#[test]
fn test_depth_limit() {
    let deep = format!("a = {}1{}", "[".repeat(10), "]".repeat(10));
    let config = Config::new(8, 0);
    let err = convert_with_config(Mode::Table, &deep, &config)
        .err()
        .map(|e| e.kind().clone());
    assert_eq!(err, Some(ErrorKind::MaxDepthExceeded { max: 8 }));
    assert!(convert_with_config(Mode::Table, &deep, &Config::unlimited()).is_ok());
}

#[test]
fn test_numeric_key_table_accepts_subtables() -> TestResult {
    let json = to_json(Mode::Table, "[codes]\n0 = \"zero\"\n[codes.extra]\nx = 1")?;
    assert_eq!(json, r#"{"codes":{"0":"zero","extra":{"x":1}}}"#);
    Ok(())
}
