use clap::Parser;
use std::path::Path;

use super::args::{CliArgs, Quote};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["csz"]).expect("default args should parse");

    assert!(args.input.is_none());
    assert!(args.out_file.is_none());
    assert!(args.config.is_none());
    assert_eq!(args.tab_width, None);
    assert_eq!(args.quote, None);
    assert!(args.reads_stdin());
}

#[test]
fn parses_formatting_flags() {
    let args = CliArgs::try_parse_from([
        "csz",
        "--tab-width",
        "4",
        "--quote",
        "SINGLE",
        "--config",
        "csz.json",
        "-o",
        "out/app.js",
        "app.json",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.tab_width, Some(4));
    assert_eq!(args.quote, Some(Quote::Single));
    assert_eq!(args.config.as_deref(), Some(Path::new("csz.json")));
    assert_eq!(args.out_file.as_deref(), Some(Path::new("out/app.js")));
    assert_eq!(args.input.as_deref(), Some(Path::new("app.json")));
    assert!(!args.reads_stdin());
}

#[test]
fn dash_reads_stdin() {
    let args = CliArgs::try_parse_from(["csz", "-"]).expect("dash should parse");
    assert!(args.reads_stdin());
}

#[test]
fn rejects_unknown_quote() {
    assert!(CliArgs::try_parse_from(["csz", "--quote", "backtick"]).is_err());
}
