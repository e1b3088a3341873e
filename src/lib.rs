//! slimcss library interface
//!
//! This crate provides a command-line front end for batch CSS minification.
//!
//! # Module Organization
//!
//! - [`cli`] - Argument definitions and ambiguous-value resolution
//! - [`inputs`] - Glob expansion and the resolved input set
//! - [`compat`] - Compatibility profiles and dotted-path overrides
//! - [`config`] - Job configuration assembly
//! - [`engine`] - Minification engine seam and the built-in engine
//! - [`pipeline`] - Batch orchestration
//! - [`emit`] - Output and source-map emission
//! - [`report`] - Diagnostics reporting
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod cli;
pub mod compat;
pub mod config;
pub mod context;
pub mod core;
pub mod emit;
pub mod engine;
pub mod errors;
pub mod inputs;
pub mod pipeline;
pub mod report;
pub mod status;
