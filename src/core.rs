use std::io::Read;
use std::sync::Arc;

use clap::{CommandFactory, Parser};

use crate::cli::{self, Args};
use crate::config;
use crate::context::Environment;
use crate::engine::BasicMinifier;
use crate::inputs::{self, InputSet};
use crate::pipeline;
use crate::report;
use crate::status::ExitStatus;

/// Main entry point for the CLI.
///
/// Parses and resolves arguments, builds the job configuration, gathers the
/// input set (expanded files or buffered stdin), and dispatches to the
/// orchestrator.
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    if let Some(name) = args.first() {
        if let Some(basename) = std::path::Path::new(name).file_stem() {
            env.program_name = basename.to_string_lossy().to_string();
        }
    }

    init_tracing();

    let mut parsed = match Args::try_parse_from(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    // Claim the optional trailing values of -O1/-O2 before anything touches
    // the positional list; a consumed value must disappear from it.
    let levels = cli::resolve_levels(&parsed.optimize, &args, &mut parsed.inputs);

    // No inputs and nothing piped in: print help and exit cleanly.
    if parsed.inputs.is_empty() && !env.reads_from_stdin(false) {
        let mut command = Args::command();
        command.print_help().ok();
        return ExitStatus::Success;
    }

    let (config, warnings) = config::build(&parsed, levels, parsed.inputs.is_empty());
    report::feedback(&warnings, false);

    tracing::debug!(?config, "job configuration built");

    let input = if parsed.inputs.is_empty() {
        // Buffer the whole stream before any job starts.
        let mut data = String::new();
        if let Err(error) = env.stdin.lock().read_to_string(&mut data) {
            report::feedback(&[format!("Cannot read from stdin: {}", error)], true);
            return ExitStatus::Error;
        }
        InputSet::Stdin(data)
    } else {
        InputSet::Files(inputs::expand_globs(&parsed.inputs))
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    runtime.block_on(pipeline::run(
        Arc::new(BasicMinifier),
        Arc::new(config),
        input,
        parsed.debug,
        parsed.remove_inlined_files,
    ))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // try_init: tests may call run() more than once per process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
