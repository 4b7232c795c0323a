use super::*;

#[test]
fn test_default_options() {
    let options = CompileOptions::default();
    assert_eq!(options.tab_width, 2);
    assert_eq!(options.quote, QuoteStyle::Double);
    assert_eq!(options.indent_unit(), "  ");
}

#[test]
fn test_quote_chars() {
    assert_eq!(QuoteStyle::Double.as_char(), '"');
    assert_eq!(QuoteStyle::Double.other(), '\'');
    assert_eq!(QuoteStyle::Single.as_char(), '\'');
    assert_eq!(QuoteStyle::Single.other(), '"');
}

#[test]
fn test_options_deserialize_partial() {
    let options: CompileOptions =
        serde_json::from_str(r#"{"quote": "single"}"#).expect("valid options json");
    assert_eq!(options.quote, QuoteStyle::Single);
    assert_eq!(options.tab_width, 2);

    let options: CompileOptions =
        serde_json::from_str(r#"{"tabWidth": 4}"#).expect("valid options json");
    assert_eq!(options.tab_width, 4);
    assert_eq!(options.indent_unit(), "    ");
}
