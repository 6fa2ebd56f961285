//! Contract tests for the utility-CSS build configuration.

use std::path::Path;

use wallclock::tailwind::{load_build_config, parse_build_config, DarkModeStrategy, ParseError};

/// The document shipped in `static/`, inline.
const DOCUMENT: &str = r#"{
  "content": ["*.{html,js,php}"],
  "theme": {
    "extend": {
      "fontSize": {
        "8xl": "24vw",
        "4xl": "12vw",
        "2xl": "6vw"
      }
    }
  },
  "plugins": [],
  "darkMode": "selector"
}"#;

#[test]
fn parses_the_canonical_document() {
    let config = parse_build_config(DOCUMENT).expect("canonical document must parse");

    assert_eq!(config.content, vec!["*.{html,js,php}".to_string()]);
    assert_eq!(config.dark_mode, DarkModeStrategy::Selector);
    assert!(config.plugins.is_empty());

    let font_size = config
        .scale_extensions("fontSize")
        .expect("fontSize scale declared");
    assert_eq!(font_size.get("8xl").map(String::as_str), Some("24vw"));
    assert_eq!(font_size.get("4xl").map(String::as_str), Some("12vw"));
    assert_eq!(font_size.get("2xl").map(String::as_str), Some("6vw"));
}

#[test]
fn extension_map_contains_exactly_the_declared_overrides() {
    let config = parse_build_config(DOCUMENT).unwrap();

    assert_eq!(config.theme.extend.len(), 1, "only fontSize is extended");
    let font_size = config.scale_extensions("fontSize").unwrap();
    assert_eq!(font_size.len(), 3);
    // Declaration order is preserved.
    let keys: Vec<&str> = font_size.keys().map(String::as_str).collect();
    assert_eq!(keys, ["8xl", "4xl", "2xl"]);
}

#[test]
fn parsing_is_idempotent() {
    let first = parse_build_config(DOCUMENT).unwrap();
    let second = parse_build_config(DOCUMENT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn loads_the_shipped_file() {
    let from_file = load_build_config(Path::new("static/tailwind.config.json")).unwrap();
    let from_text = parse_build_config(DOCUMENT).unwrap();
    assert_eq!(from_file, from_text);
}

#[test]
fn empty_content_is_rejected() {
    let result = parse_build_config(r#"{"content": [], "darkMode": "media"}"#);
    assert!(matches!(result, Err(ParseError::EmptyContent)));
}

#[test]
fn missing_content_is_rejected() {
    let result = parse_build_config(r#"{"darkMode": "media"}"#);
    assert!(matches!(result, Err(ParseError::Syntax(_))));
}

#[test]
fn unknown_dark_mode_is_rejected() {
    let result = parse_build_config(r#"{"content": ["*.html"], "darkMode": "attribute"}"#);
    assert!(
        matches!(result, Err(ParseError::Syntax(_))),
        "darkMode outside {{selector, media, class}} must fail"
    );
}

#[test]
fn dark_mode_defaults_to_media() {
    let config = parse_build_config(r#"{"content": ["*.html"]}"#).unwrap();
    assert_eq!(config.dark_mode, DarkModeStrategy::Media);
    assert!(config.plugins.is_empty());
    assert!(config.theme.extend.is_empty());
}

#[test]
fn invalid_glob_syntax_is_rejected() {
    // Unclosed character class.
    let result = parse_build_config(r#"{"content": ["src/[html"]}"#);
    assert!(matches!(result, Err(ParseError::InvalidGlob { .. })));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_build_config(Path::new("static/no-such-config.json"));
    assert!(matches!(result, Err(ParseError::Io(_))));
}
