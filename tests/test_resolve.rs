//! Ambiguous optional-value resolution through the real argument parser
//!
//! `-O1`/`-O2` may be trailed by a fine-grained option string or by the next
//! input path; these tests drive clap parsing plus the resolver exactly the
//! way `core::run` does.

use clap::Parser;

use slimcss::cli::{resolve_levels, Args, LevelValue};

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|t| t.to_string()).collect()
}

fn parse_and_resolve(raw: &[&str]) -> (Option<slimcss::cli::LevelSpec>, Vec<String>) {
    let raw = tokens(raw);
    let mut parsed = Args::try_parse_from(&raw).expect("arguments parse");
    let levels = resolve_levels(&parsed.optimize, &raw, &mut parsed.inputs);
    (levels, parsed.inputs)
}

#[test]
fn test_path_like_token_stays_in_input_list() {
    for path in ["one.css", "styles/one", "https://example.com/reset.css"] {
        let (levels, inputs) = parse_and_resolve(&["slimcss", "-O1", path]);
        let spec = levels.expect("level 1 enabled");
        assert_eq!(spec.one, Some(LevelValue::Defaults));
        assert_eq!(inputs, vec![path.to_string()]);
    }
}

#[test]
fn test_option_string_is_consumed_from_input_list() {
    for opts in ["all:off", "roundingPrecision:4;specialComments:1"] {
        let (levels, inputs) = parse_and_resolve(&["slimcss", "-O1", opts, "one.css"]);
        let spec = levels.expect("level 1 enabled");
        assert_eq!(spec.one, Some(LevelValue::Options(opts.to_string())));
        assert_eq!(inputs, vec!["one.css".to_string()]);
    }
}

#[test]
fn test_trailing_level_flag_enables_defaults() {
    let (levels, inputs) = parse_and_resolve(&["slimcss", "one.css", "-O2"]);
    let spec = levels.expect("level 2 enabled");
    assert_eq!(spec.two, Some(LevelValue::Defaults));
    assert_eq!(spec.one, None);
    assert_eq!(inputs, vec!["one.css".to_string()]);
}

#[test]
fn test_level_zero_is_presence_only() {
    let (levels, inputs) = parse_and_resolve(&["slimcss", "-O0", "one.css"]);
    let spec = levels.expect("level 0 enabled");
    assert!(spec.zero);
    assert_eq!(spec.one, None);
    assert_eq!(inputs, vec!["one.css".to_string()]);
}

#[test]
fn test_interleaved_levels_and_inputs() {
    let (levels, inputs) = parse_and_resolve(&[
        "slimcss",
        "-O2",
        "mergeMedia:off",
        "one.css",
        "-O1",
        "two.css",
    ]);
    let spec = levels.expect("levels enabled");
    assert_eq!(spec.one, Some(LevelValue::Defaults));
    assert_eq!(
        spec.two,
        Some(LevelValue::Options("mergeMedia:off".to_string()))
    );
    assert_eq!(inputs, tokens(&["one.css", "two.css"]));
}

#[test]
fn test_no_level_flags_leaves_engine_default() {
    let (levels, inputs) = parse_and_resolve(&["slimcss", "one.css", "two.css"]);
    assert!(levels.is_none());
    assert_eq!(inputs, tokens(&["one.css", "two.css"]));
}
