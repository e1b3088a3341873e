//! Resolution of ambiguous optional flag values
//!
//! `-O1` and `-O2` may be followed by a fine-grained option string, by the
//! next input path, or by nothing at all. clap leaves the following token in
//! the positional list either way, so this module classifies it over the raw
//! token array: first a pure path-shape check, then consumption of the token
//! as the flag's value when it does not look like a path.
//!
//! The heuristic is lossy by design: a file literally named like an option
//! string (e.g. `all:off`) misclassifies. This is accepted behavior, kept
//! bug-for-bug stable, not something to fix.

/// Resolved optimization level specification.
///
/// Levels are independent: enabling level 2 says nothing about level 1's
/// sub-options. `None` for the whole spec means no level flag was given and
/// the engine applies its own default (level 1 with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSpec {
    pub zero: bool,
    pub one: Option<LevelValue>,
    pub two: Option<LevelValue>,
}

/// Value of a single `-O1`/`-O2` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelValue {
    /// Level enabled with engine defaults
    Defaults,
    /// Raw fine-grained option string, `key:value` pairs delimited by `;` or `,`
    Options(String),
}

/// Classify a raw token as path-shaped.
///
/// A token looks like a path when it contains a stylesheet extension, a path
/// separator, a backslash not immediately followed by a hyphen (Windows
/// separators, but not escaped flag text), or an absolute HTTP(S) URL.
pub fn looks_like_path(token: &str) -> bool {
    token.contains(".css")
        || token.contains('/')
        || has_windows_separator(token)
        || token.starts_with("http://")
        || token.starts_with("https://")
}

fn has_windows_separator(token: &str) -> bool {
    token
        .as_bytes()
        .windows(2)
        .any(|pair| pair[0] == b'\\' && pair[1] != b'-')
}

/// Resolve `-O0`/`-O1`/`-O2` occurrences into a [`LevelSpec`].
///
/// `parsed_levels` is the list of level digits clap collected for `-O`;
/// `raw` is the full process argument array; `positionals` is clap's
/// positional list, from which a consumed option-string token is removed
/// exactly once.
pub fn resolve_levels(
    parsed_levels: &[String],
    raw: &[String],
    positionals: &mut Vec<String>,
) -> Option<LevelSpec> {
    let mut spec = LevelSpec::default();

    for level in parsed_levels {
        match level.as_str() {
            "0" => spec.zero = true,
            "1" => spec.one = Some(trailing_value("-O1", raw, positionals)),
            "2" => spec.two = Some(trailing_value("-O2", raw, positionals)),
            _ => {}
        }
    }

    if spec.zero || spec.one.is_some() || spec.two.is_some() {
        Some(spec)
    } else {
        None
    }
}

fn trailing_value(flag: &str, raw: &[String], positionals: &mut Vec<String>) -> LevelValue {
    let Some(at) = raw.iter().position(|token| token == flag) else {
        // Level given in the spaced form (`-O 1`); no trailing value to claim.
        return LevelValue::Defaults;
    };

    let Some(next) = raw.get(at + 1) else {
        return LevelValue::Defaults;
    };

    if looks_like_path(next) {
        return LevelValue::Defaults;
    }

    // The token is this flag's option string; drop it from the positional
    // list so it is not double-counted as an input.
    if let Some(index) = positionals.iter().position(|p| p == next) {
        positionals.remove(index);
    }

    LevelValue::Options(next.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_path_shapes() {
        assert!(looks_like_path("one.css"));
        assert!(looks_like_path("styles/one.min.css"));
        assert!(looks_like_path("a/b"));
        assert!(looks_like_path("http://example.com/reset.css"));
        assert!(looks_like_path("https://example.com/reset"));
        assert!(looks_like_path("styles\\one"));

        assert!(!looks_like_path("all:off"));
        assert!(!looks_like_path("roundingPrecision:4;specialComments:1"));
        assert!(!looks_like_path("\\-escaped"));
    }

    #[test]
    fn test_flag_followed_by_path_keeps_positional() {
        let tokens = raw(&["slimcss", "-O1", "one.css"]);
        let mut positionals = raw(&["one.css"]);
        let spec = resolve_levels(&raw(&["1"]), &tokens, &mut positionals).unwrap();
        assert_eq!(spec.one, Some(LevelValue::Defaults));
        assert_eq!(positionals, raw(&["one.css"]));
    }

    #[test]
    fn test_flag_followed_by_options_consumes_token() {
        let tokens = raw(&["slimcss", "-O1", "all:off", "one.css"]);
        let mut positionals = raw(&["all:off", "one.css"]);
        let spec = resolve_levels(&raw(&["1"]), &tokens, &mut positionals).unwrap();
        assert_eq!(spec.one, Some(LevelValue::Options("all:off".to_string())));
        assert_eq!(positionals, raw(&["one.css"]));
    }

    #[test]
    fn test_flag_as_last_token() {
        let tokens = raw(&["slimcss", "one.css", "-O2"]);
        let mut positionals = raw(&["one.css"]);
        let spec = resolve_levels(&raw(&["2"]), &tokens, &mut positionals).unwrap();
        assert_eq!(spec.two, Some(LevelValue::Defaults));
        assert_eq!(positionals, raw(&["one.css"]));
    }

    #[test]
    fn test_no_level_flags() {
        let tokens = raw(&["slimcss", "one.css"]);
        let mut positionals = raw(&["one.css"]);
        assert_eq!(resolve_levels(&[], &tokens, &mut positionals), None);
    }

    #[test]
    fn test_independent_levels() {
        let tokens = raw(&["slimcss", "-O2", "mergeMedia:off", "-O1", "one.css"]);
        let mut positionals = raw(&["mergeMedia:off", "one.css"]);
        let spec = resolve_levels(&raw(&["2", "1"]), &tokens, &mut positionals).unwrap();
        assert_eq!(spec.one, Some(LevelValue::Defaults));
        assert_eq!(
            spec.two,
            Some(LevelValue::Options("mergeMedia:off".to_string()))
        );
        assert_eq!(positionals, raw(&["one.css"]));
        assert!(!spec.zero);
    }
}
