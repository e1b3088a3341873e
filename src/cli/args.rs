//! CLI argument definitions using clap
//!
//! This module defines all command-line arguments for slimcss.
//!
//! The `-O1`/`-O2` flags accept an *optional* trailing option string, which
//! clap cannot disambiguate from a following input path on its own; those
//! values are resolved after parsing by [`crate::cli::resolve`].

use clap::{ArgAction, Parser};

/// slimcss - a command-line front end for batch CSS minification
#[derive(Parser, Debug, Clone)]
#[command(name = "slimcss", version, about, long_about = None)]
#[command(disable_version_flag = true)] // We use -v for --version, as released tools in this family do
pub struct Args {
    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Input stylesheet files or glob patterns; a leading `!` excludes matches
    #[arg(value_name = "source-file")]
    pub inputs: Vec<String>,

    /// Process each input file independently, deriving one output per input
    #[arg(short = 'b', long = "batch")]
    pub batch: bool,

    /// Suffix inserted before the extension of derived batch outputs
    #[arg(long = "batch-suffix", value_name = "suffix", default_value = "-min")]
    pub batch_suffix: String,

    /// Use [output-file] (or a directory in batch mode) as output instead of STDOUT
    #[arg(
        short = 'o',
        long = "output",
        value_name = "output-file",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub output: Option<String>,

    /// Turn on level <n> optimizations; `-O1`/`-O2` optionally accept a list
    /// of fine-grained options as the next token
    #[arg(
        short = 'O',
        value_name = "n",
        action = ArgAction::Append,
        value_parser = ["0", "1", "2"]
    )]
    pub optimize: Vec<String>,

    /// Force compatibility mode; a profile name (`ie7`, `ie8`, `ie9`) and/or
    /// dotted-path overrides like `selectors.mergeLimit=2048`
    #[arg(
        short = 'c',
        long = "compatibility",
        value_name = "ie7|ie8|ie9",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub compatibility: Option<String>,

    /// Controls output formatting, e.g. `beautify` or `keep-breaks`
    #[arg(short = 'f', long = "format", value_name = "options")]
    pub format: Option<String>,

    /// Enables inlining for listed sources (defaults to `local`); accepts
    /// `none`, `all`, `local`, and `!<host-or-prefix>` exclusions
    #[arg(
        long = "inline",
        value_name = "rules",
        num_args = 0..=1,
        default_missing_value = "local"
    )]
    pub inline: Option<String>,

    /// Per connection timeout when fetching remote stylesheets (seconds)
    #[arg(long = "inline-timeout", value_name = "seconds", default_value_t = 5.0)]
    pub inline_timeout: f64,

    /// Remove files inlined in <source-file ...> or via `@import` statements
    #[arg(long = "remove-inlined-files")]
    pub remove_inlined_files: bool,

    /// Enable URL rebasing
    #[arg(long = "with-rebase", conflicts_with = "skip_rebase")]
    pub with_rebase: bool,

    /// Disable URL rebasing
    #[arg(long = "skip-rebase")]
    pub skip_rebase: bool,

    /// Enables building input's source map
    #[arg(long = "source-map")]
    pub source_map: bool,

    /// Enables inlining sources inside source maps
    #[arg(long = "source-map-inline-sources")]
    pub source_map_inline_sources: bool,

    /// Consume a source map produced by an earlier build step
    #[arg(
        long = "input-source-map",
        value_name = "file",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub input_source_map: Option<String>,

    /// Shows debug information (minification time & compression efficiency)
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}
