//! Compatibility profiles and the dotted-path override mini-language
//!
//! A compatibility value is a profile name (`ie7`, `ie8`, `ie9`), a list of
//! `key.path=value` overrides, or both in one string. Overrides are applied
//! onto the profile tree by walking the path one segment at a time; an
//! override whose intermediate segments do not resolve on the active profile
//! is dropped silently, which is how a profile rejects options it does not
//! know about. Right-hand values are stored as raw strings; consumers
//! interpret them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static COMPATIBILITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w.]+)=(\w+)").expect("compatibility pattern is valid"));

/// Build the profile selected by a compatibility value string and apply any
/// overrides it carries, in left-to-right order. Later overrides on the same
/// path win.
pub fn resolve_profile(spec: Option<&str>) -> Value {
    let name = spec
        .and_then(|s| s.split([',', ';']).next())
        .map(str::trim)
        .unwrap_or("");

    let mut profile = match name {
        "ie7" => ie7_profile(),
        "ie8" => ie8_profile(),
        "ie9" => ie9_profile(),
        _ => default_profile(),
    };

    if let Some(spec) = spec {
        apply_overrides(&mut profile, spec);
    }

    profile
}

/// Apply every `key.path=value` match found in `spec` onto `profile`.
///
/// A single failing override never aborts the ones after it.
pub fn apply_overrides(profile: &mut Value, spec: &str) {
    'pattern: for caps in COMPATIBILITY_PATTERN.captures_iter(spec) {
        let segments: Vec<&str> = caps[1].split('.').collect();
        let (last, intermediate) = segments.split_last().expect("pattern requires one segment");

        let mut scope = &mut *profile;
        for segment in intermediate {
            match scope.get_mut(*segment) {
                Some(next) if is_truthy(next) => scope = next,
                _ => continue 'pattern,
            }
        }

        // Assignment creates the leaf key; only intermediates are validated.
        if let Some(object) = scope.as_object_mut() {
            object.insert((*last).to_string(), Value::String(caps[2].to_string()));
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn default_profile() -> Value {
    json!({
        "colors": {
            "hexAlpha": false,
            "opacity": true
        },
        "properties": {
            "backgroundClipMerging": true,
            "colors": true,
            "ieBangHack": false,
            "ieFilters": false,
            "iePrefixHack": false,
            "ieSuffixHack": false,
            "merging": true,
            "shorterLengthUnits": false,
            "urlQuotes": true,
            "zeroUnits": true
        },
        "selectors": {
            "adjacentSpace": false,
            "ie7Hack": false,
            "mergeLimit": 8191,
            "multiplePseudoMerging": true
        },
        "units": {
            "ch": true,
            "in": true,
            "pc": true,
            "pt": true,
            "rem": true,
            "vh": true,
            "vmax": true,
            "vmin": true,
            "vw": true
        }
    })
}

fn ie9_profile() -> Value {
    let mut profile = default_profile();
    profile["properties"]["ieFilters"] = json!(true);
    profile["properties"]["ieSuffixHack"] = json!(true);
    profile
}

fn ie8_profile() -> Value {
    let mut profile = ie9_profile();
    profile["colors"]["opacity"] = json!(false);
    profile["properties"]["merging"] = json!(false);
    profile["units"]["rem"] = json!(false);
    profile["units"]["vh"] = json!(false);
    profile["units"]["vmax"] = json!(false);
    profile["units"]["vmin"] = json!(false);
    profile["units"]["vw"] = json!(false);
    profile
}

fn ie7_profile() -> Value {
    let mut profile = ie8_profile();
    profile["properties"]["ieBangHack"] = json!(true);
    profile["properties"]["iePrefixHack"] = json!(true);
    profile["selectors"]["ie7Hack"] = json!(true);
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_applied_on_existing_path() {
        let mut profile = default_profile();
        apply_overrides(&mut profile, "selectors.mergeLimit=2048");
        assert_eq!(profile["selectors"]["mergeLimit"], json!("2048"));
    }

    #[test]
    fn test_missing_intermediate_drops_only_that_override() {
        let mut profile = json!({ "a": { "b": true } });
        apply_overrides(&mut profile, "a.b=1,x.y=2");
        assert_eq!(profile["a"]["b"], json!("1"));
        assert!(profile.get("x").is_none());
    }

    #[test]
    fn test_later_override_on_same_path_wins() {
        let mut profile = default_profile();
        apply_overrides(&mut profile, "selectors.mergeLimit=1;selectors.mergeLimit=2");
        assert_eq!(profile["selectors"]["mergeLimit"], json!("2"));
    }

    #[test]
    fn test_falsy_intermediate_drops_override() {
        let mut profile = json!({ "properties": { "ieFilters": false } });
        apply_overrides(&mut profile, "properties.ieFilters.deep=1");
        assert_eq!(profile["properties"]["ieFilters"], json!(false));
    }

    #[test]
    fn test_profile_selection_with_overrides() {
        let profile = resolve_profile(Some("ie8,selectors.mergeLimit=4095"));
        assert_eq!(profile["colors"]["opacity"], json!(false));
        assert_eq!(profile["selectors"]["mergeLimit"], json!("4095"));
    }

    #[test]
    fn test_unknown_profile_falls_back_to_default() {
        let profile = resolve_profile(Some("ie6"));
        assert_eq!(profile["colors"]["opacity"], json!(true));
    }
}
