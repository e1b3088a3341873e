//! Batch orchestration
//!
//! Decides between a single merged job and per-input batch jobs, derives
//! each batch job's output and map paths, dispatches engine calls, and folds
//! job outcomes into the process exit status. Batch jobs run as one task
//! each and are joined before the process exits; a failing job never stops
//! the others.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::Config;
use crate::emit;
use crate::engine::{EngineInput, Minifier, MinifyOutput};
use crate::inputs::InputSet;
use crate::report;
use crate::status::ExitStatus;

/// One derived batch job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub map: Option<PathBuf>,
}

/// Derive the batch job for one input path.
///
/// With an explicit output root that is a directory (or does not exist yet
/// while multiple inputs are present), the output lands under that root;
/// otherwise it lands next to its input. Either way the batch suffix is
/// inserted before the file extension, and the map path is the output path
/// with `.map` appended.
pub fn derive_batch_job(input: &Path, config: &Config, multiple_inputs: bool) -> BatchJob {
    let name = suffixed_file_name(input, &config.batch_suffix);

    let output = match &config.output {
        Some(root) if root.is_dir() || (!root.exists() && multiple_inputs) => root.join(&name),
        _ => match input.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(&name),
            _ => PathBuf::from(&name),
        },
    };

    let map = config.source_map.then(|| emit::map_path(&output));

    BatchJob {
        input: input.to_path_buf(),
        output,
        map,
    }
}

fn suffixed_file_name(input: &Path, suffix: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    }
}

/// Run the whole invocation: one merged job, or one job per batch input.
pub async fn run<E: Minifier>(
    engine: Arc<E>,
    config: Arc<Config>,
    input: InputSet,
    debug: bool,
    remove_inlined_files: bool,
) -> ExitStatus {
    // Batch mode is meaningless for stdin input: there is no per-file
    // output path to derive, so it collapses into a single merged job.
    let batch_paths = match (&input, config.batch) {
        (InputSet::Files(paths), true) => Some(paths.clone()),
        _ => None,
    };

    match batch_paths {
        Some(paths) => run_batch(engine, config, paths, debug, remove_inlined_files).await,
        None => run_single(engine, config, input, debug, remove_inlined_files).await,
    }
}

async fn run_batch<E: Minifier>(
    engine: Arc<E>,
    config: Arc<Config>,
    paths: Vec<PathBuf>,
    debug: bool,
    remove_inlined_files: bool,
) -> ExitStatus {
    let multiple_inputs = paths.len() > 1;
    let mut tasks: JoinSet<(usize, BatchJob, MinifyOutput)> = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let job = derive_batch_job(&path, &config, multiple_inputs);
        let engine = Arc::clone(&engine);
        let config = Arc::clone(&config);

        tracing::debug!(input = %job.input.display(), output = %job.output.display(), "dispatching batch job");

        tasks.spawn(async move {
            let minified = engine
                .minify(&config, EngineInput::Files(vec![job.input.clone()]))
                .await;
            (index, job, minified)
        });
    }

    let mut status = ExitStatus::Success;
    let mut completed: Vec<(usize, BatchJob, MinifyOutput)> = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => completed.push(result),
            Err(error) => {
                report::feedback(&[format!("Job aborted: {}", error)], true);
                status = ExitStatus::Error;
            }
        }
    }

    // Tasks complete in arbitrary order; report in the order the inputs
    // were given on the command line.
    completed.sort_by_key(|(index, _, _)| *index);

    for (_, job, minified) in completed {
        let failed = finish_job(
            &minified,
            Some(&job.output),
            debug,
            remove_inlined_files,
        );
        status = status.and(failed);
    }

    status
}

async fn run_single<E: Minifier>(
    engine: Arc<E>,
    config: Arc<Config>,
    input: InputSet,
    debug: bool,
    remove_inlined_files: bool,
) -> ExitStatus {
    let engine_input = match input {
        InputSet::Files(paths) => EngineInput::Files(paths),
        InputSet::Stdin(text) => EngineInput::Text(text),
    };

    let minified = engine.minify(&config, engine_input).await;
    let failed = finish_job(
        &minified,
        config.output.as_deref(),
        debug,
        remove_inlined_files,
    );

    ExitStatus::Success.and(failed)
}

/// Report one completed job and emit its output. Returns whether the job
/// failed. An engine error aborts emission entirely; inlined files are only
/// removed after a successful write.
fn finish_job(
    minified: &MinifyOutput,
    destination: Option<&Path>,
    debug: bool,
    remove_inlined_files: bool,
) -> bool {
    if debug {
        report::debug_stats(minified);
    }

    report::feedback(&minified.errors, true);
    report::feedback(&minified.warnings, false);

    if !minified.errors.is_empty() {
        return true;
    }

    if let Err(error) = emit::write_job(destination, &minified.styles, minified.source_map.as_ref())
    {
        report::feedback(&[error.to_string()], true);
        return true;
    }

    if remove_inlined_files {
        emit::remove_inlined_files(&minified.inlined_stylesheets);
    }

    false
}
