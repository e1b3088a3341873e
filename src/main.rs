#![allow(dead_code)]

mod cli;
mod compat;
mod config;
mod context;
mod core;
mod emit;
mod engine;
mod errors;
mod inputs;
mod pipeline;
mod report;
mod status;

use context::Environment;
use status::ExitStatus;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the Ctrl+C handler; consulted once, after the jobs finish.
/// Mid-job cancellation is not supported.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Entry point - catches Ctrl+C and calls core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    // Set a flag instead of calling exit() so destructors run and partially
    // written outputs can be cleaned up by their owners
    ctrlc::set_handler(move || {
        INTERRUPTED.store(true, Ordering::SeqCst);

        eprintln!("\nInterrupted");

        // On second Ctrl+C, force exit (user really wants out)
        static SECOND_CTRL_C: AtomicBool = AtomicBool::new(false);
        if SECOND_CTRL_C.swap(true, Ordering::SeqCst) {
            std::process::exit(ExitStatus::Interrupted as i32);
        }
    })
    .ok();

    let args: Vec<String> = std::env::args().collect();
    let env = Environment::init();

    let status = core::run(args, env);

    if INTERRUPTED.load(Ordering::SeqCst) {
        return ExitStatus::Interrupted;
    }

    status
}
