//! Built-in minification engine
//!
//! A conservative engine so the CLI is usable standalone: reads inputs,
//! inlines local `@import` references when the policy allows, strips
//! comments and collapses whitespace, and produces byte statistics plus an
//! optional source-map object. It never fetches remote resources; a remote
//! import requested by the policy is reported as a warning and left in
//! place. Optimization quality is not part of this engine's contract.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{json, Value};

use crate::config::Config;
use crate::engine::{EngineInput, Minifier, MinifyOutput, MinifyStats};

static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)@import\s+(?:url\(\s*)?["']?([^"'()\s;]+)["']?\s*\)?[^;]*;"#)
        .expect("import pattern is valid")
});

const MAX_IMPORT_DEPTH: usize = 16;
const STDIN_SOURCE: &str = "$stdin";

/// Default engine implementation.
#[derive(Debug, Default)]
pub struct BasicMinifier;

impl Minifier for BasicMinifier {
    async fn minify(&self, config: &Config, input: EngineInput) -> MinifyOutput {
        let started = Instant::now();
        let policy = InlinePolicy::from_config(config);
        let mut state = JobState::default();

        // The profile is resolved with its overrides applied so malformed
        // override strings surface early; this engine's optimizations are
        // compatibility-independent, so nothing further consumes it.
        let profile = crate::compat::resolve_profile(config.compatibility.as_deref());
        tracing::debug!(%profile, "compatibility profile resolved");

        let sources = match input {
            EngineInput::Text(text) => vec![SourceEntry {
                name: STDIN_SOURCE.to_string(),
                content: text,
                base: PathBuf::from("."),
            }],
            EngineInput::Files(paths) => read_sources(&paths, &mut state),
        };

        let mut combined = String::new();
        for source in &sources {
            let inlined = inline_imports(&source.content, &source.base, &policy, 0, &mut state);
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(&inlined);
        }

        let styles = if skips_optimization(config) {
            combined.clone()
        } else {
            apply_format(minify_text(&combined), config.format.as_deref())
        };

        let original_size = combined.len();
        let minified_size = styles.len();
        let efficiency = if original_size > 0 {
            1.0 - minified_size as f64 / original_size as f64
        } else {
            0.0
        };

        let source_map = build_source_map(config, &sources, &mut state);

        MinifyOutput {
            styles,
            stats: MinifyStats {
                original_size,
                minified_size,
                efficiency,
                time_spent: started.elapsed(),
            },
            inlined_stylesheets: state.inlined,
            errors: state.errors,
            warnings: state.warnings,
            source_map,
        }
    }
}

struct SourceEntry {
    name: String,
    content: String,
    base: PathBuf,
}

#[derive(Default)]
struct JobState {
    inlined: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
    visited: HashSet<PathBuf>,
}

struct InlinePolicy {
    local: bool,
    remote: bool,
    exclusions: Vec<String>,
}

impl InlinePolicy {
    fn from_config(config: &Config) -> Self {
        let Some(rules) = &config.inline else {
            // Engine default: local imports inlined, remote fetches disabled.
            return Self {
                local: true,
                remote: false,
                exclusions: Vec::new(),
            };
        };

        let mut policy = Self {
            local: false,
            remote: false,
            exclusions: Vec::new(),
        };

        for rule in rules {
            match rule.as_str() {
                "none" => {
                    policy.local = false;
                    policy.remote = false;
                }
                "all" => {
                    policy.local = true;
                    policy.remote = true;
                }
                "local" => policy.local = true,
                "remote" => policy.remote = true,
                other => {
                    if let Some(excluded) = other.strip_prefix('!') {
                        policy.exclusions.push(excluded.to_string());
                    }
                }
            }
        }

        policy
    }

    fn excluded(&self, target: &str) -> bool {
        self.exclusions
            .iter()
            .any(|prefix| target.starts_with(prefix.as_str()) || target.contains(prefix.as_str()))
    }

    fn allows_local(&self, target: &str) -> bool {
        self.local && !self.excluded(target)
    }

    fn allows_remote(&self, target: &str) -> bool {
        self.remote && !self.excluded(target)
    }
}

fn is_remote(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with("//")
}

fn read_sources(paths: &[PathBuf], state: &mut JobState) -> Vec<SourceEntry> {
    let mut sources = Vec::with_capacity(paths.len());

    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(content) => sources.push(SourceEntry {
                name: path.display().to_string(),
                content,
                base: path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")),
            }),
            Err(_) => state
                .errors
                .push(format!("Ignoring \"{}\" as it is missing.", path.display())),
        }
    }

    sources
}

fn inline_imports(
    css: &str,
    base: &Path,
    policy: &InlinePolicy,
    depth: usize,
    state: &mut JobState,
) -> String {
    IMPORT_PATTERN
        .replace_all(css, |caps: &Captures| -> String {
            let statement = caps[0].to_string();
            let target = caps[1].to_string();

            if is_remote(&target) {
                if policy.allows_remote(&target) {
                    state.warnings.push(format!(
                        "Skipping remote @import of \"{}\" as remote inlining is not supported.",
                        target
                    ));
                }
                return statement;
            }

            if !policy.allows_local(&target) {
                return statement;
            }

            if depth >= MAX_IMPORT_DEPTH {
                state.warnings.push(format!(
                    "Skipping @import of \"{}\" as the nesting limit was reached.",
                    target
                ));
                return statement;
            }

            let path = base.join(&target);
            let resolved = path.canonicalize().unwrap_or_else(|_| path.clone());

            if !state.visited.insert(resolved) {
                state.warnings.push(format!(
                    "Ignoring circular @import of \"{}\".",
                    target
                ));
                return String::new();
            }

            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    state.inlined.push(path.display().to_string());
                    let nested_base = path
                        .parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .unwrap_or(base)
                        .to_path_buf();
                    inline_imports(&content, &nested_base, policy, depth + 1, state)
                }
                Err(_) => {
                    state.errors.push(format!(
                        "Ignoring local @import of \"{}\" as resource is missing.",
                        target
                    ));
                    String::new()
                }
            }
        })
        .into_owned()
}

fn skips_optimization(config: &Config) -> bool {
    matches!(&config.levels, Some(spec) if spec.zero && spec.one.is_none() && spec.two.is_none())
}

/// Strip comments and collapse whitespace, preserving string literals and
/// `/*! ... */` special comments.
fn minify_text(css: &str) -> String {
    let bytes = css.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string: Option<u8> = None;

    while i < bytes.len() {
        let c = bytes[i];

        if let Some(quote) = in_string {
            out.push(c);
            if c == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if c == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }

        match c {
            b'"' | b'\'' => {
                in_string = Some(c);
                out.push(c);
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = css[i..]
                    .find("*/")
                    .map(|offset| i + offset + 2)
                    .unwrap_or(bytes.len());
                if css[i..].starts_with("/*!") {
                    out.extend_from_slice(&bytes[i..end]);
                }
                i = end;
            }
            _ if c.is_ascii_whitespace() => {
                let mut j = i;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if needs_space(out.last().copied(), bytes.get(j).copied()) {
                    out.push(b' ');
                }
                i = j;
            }
            b';' => {
                // Trailing semicolons before a closing brace are redundant
                let mut j = i + 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if bytes.get(j) != Some(&b'}') {
                    out.push(b';');
                }
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).trim().to_string()
}

fn needs_space(prev: Option<u8>, next: Option<u8>) -> bool {
    let (Some(prev), Some(next)) = (prev, next) else {
        return false;
    };
    // No `+` here: spaces inside calc() expressions are significant
    const DELIMITERS: &[u8] = b"{};:,>~";
    !(DELIMITERS.contains(&prev) || DELIMITERS.contains(&next))
}

fn apply_format(minified: String, format: Option<&str>) -> String {
    match format {
        Some(directive) if directive.contains("beautify") => minified
            .replace('{', " {\n  ")
            .replace(';', ";\n  ")
            .replace('}', "\n}\n")
            .trim()
            .to_string(),
        Some(directive) if directive.contains("keep-breaks") => minified.replace('}', "}\n"),
        _ => minified,
    }
}

fn build_source_map(
    config: &Config,
    sources: &[SourceEntry],
    state: &mut JobState,
) -> Option<Value> {
    if !config.source_map {
        return None;
    }

    if let Some(input_map) = &config.input_source_map {
        match std::fs::read_to_string(input_map) {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(map) => return Some(map),
                Err(error) => state.warnings.push(format!(
                    "Ignoring input source map \"{}\": {}.",
                    input_map.display(),
                    error
                )),
            },
            Err(_) => state.warnings.push(format!(
                "Ignoring input source map \"{}\" as resource is missing.",
                input_map.display()
            )),
        }
    }

    let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
    let mut map = json!({
        "version": 3,
        "sources": names,
        "names": [],
        "mappings": "",
    });

    if config.source_map_inline_sources {
        let contents: Vec<&str> = sources.iter().map(|s| s.content.as_str()).collect();
        map["sourcesContent"] = json!(contents);
    }

    Some(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_strips_comments_and_whitespace() {
        let css = "/* note */\nbody {\n  color: red;\n}\n";
        assert_eq!(minify_text(css), "body{color:red}");
    }

    #[test]
    fn test_minify_preserves_special_comments_and_strings() {
        let css = "/*! keep */ a { content: \"  spaced  \"; }";
        assert_eq!(minify_text(css), "/*! keep */ a{content:\"  spaced  \"}");
    }

    #[test]
    fn test_minify_keeps_calc_spacing() {
        let css = "a { width: calc(100% - 2px); }";
        assert_eq!(minify_text(css), "a{width:calc(100% - 2px)}");
    }

    #[test]
    fn test_policy_exclusion() {
        let policy = InlinePolicy {
            local: true,
            remote: true,
            exclusions: vec!["vendor/".to_string()],
        };
        assert!(!policy.allows_local("vendor/reset.css"));
        assert!(policy.allows_local("partials/reset.css"));
        assert!(!policy.allows_remote("http://example.com/vendor/reset.css"));
    }

    #[test]
    fn test_remote_detection() {
        assert!(is_remote("http://example.com/a.css"));
        assert!(is_remote("//cdn.example.com/a.css"));
        assert!(!is_remote("partials/a.css"));
    }
}
