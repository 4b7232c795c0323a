use clap::Parser;
use std::path::PathBuf;

use csz::QuoteStyle;

use super::args::CliArgs;
use super::config::{CszConfig, load_config, parse_config};

fn args(flags: &[&str]) -> CliArgs {
    let mut argv = vec!["csz"];
    argv.extend_from_slice(flags);
    CliArgs::try_parse_from(argv).expect("args should parse")
}

#[test]
fn parses_both_keys() {
    let config = parse_config(r#"{"tabWidth": 4, "quote": "single"}"#).expect("parses");
    assert_eq!(
        config,
        CszConfig {
            tab_width: Some(4),
            quote: Some(QuoteStyle::Single),
        }
    );
}

#[test]
fn empty_object_is_all_defaults() {
    let config = parse_config("{}").expect("parses");
    assert_eq!(config, CszConfig::default());
    assert_eq!(config.resolve(&args(&[])), csz::CompileOptions::default());
}

#[test]
fn rejects_unknown_keys() {
    let err = parse_config(r#"{"indent": 4}"#).expect_err("unknown key");
    assert!(format!("{err:#}").contains("indent"), "{err:#}");
}

#[test]
fn flags_override_file() {
    let config = CszConfig {
        tab_width: Some(8),
        quote: Some(QuoteStyle::Single),
    };
    let options = config.resolve(&args(&["--tab-width", "3"]));
    assert_eq!(options.tab_width, 3);
    assert_eq!(options.quote, QuoteStyle::Single);

    let options = config.resolve(&args(&["--quote", "double"]));
    assert_eq!(options.tab_width, 8);
    assert_eq!(options.quote, QuoteStyle::Double);
}

#[test]
fn load_reports_missing_file() {
    let path = PathBuf::from("definitely/not/here/csz.json");
    let err = load_config(&path).expect_err("missing file");
    assert!(
        format!("{err:#}").contains("failed to read config"),
        "{err:#}"
    );
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("csz.json");
    std::fs::write(&path, r#"{"quote": "single"}"#).expect("write config");
    let config = load_config(&path).expect("loads");
    assert_eq!(config.quote, Some(QuoteStyle::Single));
    assert_eq!(config.tab_width, None);
}
