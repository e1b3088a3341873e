//! Minification engine seam
//!
//! The CLI treats the engine as an opaque collaborator: it hands over the
//! job configuration and input, and asynchronously receives minified text,
//! statistics, the inlined-resource list, and error/warning lists. The
//! orchestrator is generic over [`Minifier`] so tests can substitute a fake.

pub mod basic;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;

use crate::config::Config;

pub use basic::BasicMinifier;

/// Input handed to the engine for one job.
#[derive(Debug, Clone)]
pub enum EngineInput {
    /// Ordered file paths, concatenated in order
    Files(Vec<PathBuf>),
    /// In-memory stylesheet text (stdin mode)
    Text(String),
}

/// Byte-size statistics for one completed job.
#[derive(Debug, Clone, Default)]
pub struct MinifyStats {
    pub original_size: usize,
    pub minified_size: usize,
    /// Fraction of bytes removed, `1 - minified/original`
    pub efficiency: f64,
    pub time_spent: Duration,
}

/// Result of one engine call.
#[derive(Debug, Clone, Default)]
pub struct MinifyOutput {
    pub styles: String,
    pub stats: MinifyStats,
    /// Local paths and remote URLs actually inlined into the output
    pub inlined_stylesheets: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub source_map: Option<Value>,
}

/// Asynchronous minification engine.
pub trait Minifier: Send + Sync + 'static {
    fn minify(
        &self,
        config: &Config,
        input: EngineInput,
    ) -> impl Future<Output = MinifyOutput> + Send;
}
