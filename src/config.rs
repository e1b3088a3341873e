//! Job configuration assembly
//!
//! A [`Config`] is built exactly once per invocation, before any job starts,
//! and is read-only from then on; a batch reuses the same configuration for
//! every derived job.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::{Args, LevelSpec};

/// Immutable per-invocation job configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw compatibility value: profile name and/or dotted-path overrides
    pub compatibility: Option<String>,
    /// Formatting directive passed through to the engine
    pub format: Option<String>,
    /// Optimization levels; `None` leaves the engine default (level 1)
    pub levels: Option<LevelSpec>,
    /// Inlining policy tokens (`local`, `all`, `none`, `!prefix`);
    /// `None` leaves the engine default (remote inlining disabled)
    pub inline: Option<Vec<String>>,
    /// Per-connection timeout for remote stylesheet fetches
    pub inline_timeout: Duration,
    /// Whether relative URL references are rewritten for the output location
    pub rebase: bool,
    /// Directory URLs are rebased against; unset when rebasing is disabled
    pub rebase_to: Option<PathBuf>,
    pub source_map: bool,
    pub source_map_inline_sources: bool,
    pub input_source_map: Option<PathBuf>,
    pub batch: bool,
    pub batch_suffix: String,
    /// Output destination: `None` streams to stdout; a directory routes
    /// batch outputs
    pub output: Option<PathBuf>,
}

const DEFAULT_INLINE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the job configuration from parsed flags and resolved level specs.
///
/// Deterministic and side-effect-free apart from resolving the current
/// directory. Returns the configuration together with any builder warnings
/// to emit on the diagnostic stream.
pub fn build(args: &Args, levels: Option<LevelSpec>, from_stdin: bool) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();

    // An empty `-o` value means stdout, same as no `-o` at all.
    let output = args
        .output
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);

    let rebase = !args.skip_rebase;
    let rebase_to = if rebase {
        rebase_base(output.as_deref())
    } else {
        None
    };

    let input_source_map = args
        .input_source_map
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);

    // Consuming an input map implies producing an output map.
    let mut source_map = args.source_map || input_source_map.is_some();

    // Batch mode guarantees a file destination per job, except for stdin
    // input, where batch collapses to a single stdout-bound job.
    if source_map && output.is_none() && (!args.batch || from_stdin) {
        warnings.push(
            "Source maps will not be built because you have not specified an output file."
                .to_string(),
        );
        source_map = false;
    }

    let inline = args.inline.as_deref().map(|value| {
        if value.is_empty() {
            vec!["local".to_string()]
        } else {
            value
                .split(',')
                .map(str::trim)
                .filter(|rule| !rule.is_empty())
                .map(str::to_string)
                .collect()
        }
    });

    let config = Config {
        compatibility: args
            .compatibility
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        format: args.format.clone(),
        levels,
        inline,
        inline_timeout: Duration::try_from_secs_f64(args.inline_timeout)
            .unwrap_or(DEFAULT_INLINE_TIMEOUT),
        rebase,
        rebase_to,
        source_map,
        source_map_inline_sources: args.source_map_inline_sources,
        input_source_map,
        batch: args.batch,
        batch_suffix: args.batch_suffix.clone(),
        output,
    };

    (config, warnings)
}

/// Rebase base directory: the resolved output file's parent when an output
/// path is given, the current working directory otherwise.
fn rebase_base(output: Option<&Path>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    match output {
        Some(path) => {
            let resolved = if path.is_absolute() {
                path.to_path_buf()
            } else {
                cwd.join(path)
            };
            resolved.parent().map(Path::to_path_buf).or(Some(cwd))
        }
        None => Some(cwd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(tokens: &[&str]) -> Args {
        let mut full = vec!["slimcss"];
        full.extend_from_slice(tokens);
        Args::try_parse_from(full).expect("arguments parse")
    }

    #[test]
    fn test_source_map_without_output_is_disabled() {
        let args = parse(&["--source-map", "one.css"]);
        let (config, warnings) = build(&args, None, false);
        assert!(!config.source_map);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_source_map_survives_in_batch_mode() {
        let args = parse(&["--source-map", "--batch", "one.css"]);
        let (config, warnings) = build(&args, None, false);
        assert!(config.source_map);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_stdin_with_batch_disables_source_map_without_output() {
        let args = parse(&["--source-map", "--batch"]);
        let (config, warnings) = build(&args, None, true);
        assert!(!config.source_map);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_input_source_map_implies_output_map() {
        let args = parse(&["--input-source-map", "one.css.map", "-o", "out.css", "one.css"]);
        let (config, warnings) = build(&args, None, false);
        assert!(config.source_map);
        assert!(warnings.is_empty());
        assert_eq!(config.input_source_map, Some(PathBuf::from("one.css.map")));
    }

    #[test]
    fn test_rebase_to_defaults_to_output_parent() {
        let args = parse(&["-o", "dist/out.css", "one.css"]);
        let (config, _) = build(&args, None, false);
        let base = config.rebase_to.expect("rebase base set");
        assert!(base.ends_with("dist"));
    }

    #[test]
    fn test_skip_rebase_clears_base() {
        let args = parse(&["--skip-rebase", "one.css"]);
        let (config, _) = build(&args, None, false);
        assert!(!config.rebase);
        assert!(config.rebase_to.is_none());
    }

    #[test]
    fn test_inline_defaults_to_local() {
        let args = parse(&["--inline", "one.css"]);
        // `--inline` greedily takes the next token, so "one.css" became the
        // policy here; pass the flag explicitly instead.
        assert_eq!(args.inline.as_deref(), Some("one.css"));

        let args = parse(&["one.css", "--inline"]);
        let (config, _) = build(&args, None, false);
        assert_eq!(config.inline, Some(vec!["local".to_string()]));
    }

    #[test]
    fn test_inline_policy_list() {
        let args = parse(&["one.css", "--inline", "all,!example.com"]);
        let (config, _) = build(&args, None, false);
        assert_eq!(
            config.inline,
            Some(vec!["all".to_string(), "!example.com".to_string()])
        );
    }

    #[test]
    fn test_empty_output_means_stdout() {
        let args = parse(&["one.css", "-o"]);
        let (config, _) = build(&args, None, false);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_inline_timeout_seconds() {
        let args = parse(&["--inline-timeout", "2.5", "one.css"]);
        let (config, _) = build(&args, None, false);
        assert_eq!(config.inline_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_inline_timeout_overflow_falls_back_to_default() {
        for value in ["1e20", "inf", "nan"] {
            let args = parse(&["--inline-timeout", value, "one.css"]);
            let (config, _) = build(&args, None, false);
            assert_eq!(config.inline_timeout, Duration::from_secs(5), "value: {}", value);
        }
    }
}
