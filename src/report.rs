//! Diagnostics reporting
//!
//! Engine errors and warnings go to stderr with distinct prefixes; debug
//! mode additionally prints per-job byte statistics and the inlined
//! stylesheet list before them.

use crate::engine::MinifyOutput;

/// Print engine-reported messages to the diagnostic stream.
pub fn feedback(messages: &[String], is_error: bool) {
    let prefix = if is_error {
        "\x1b[31mERROR\x1b[39m:"
    } else {
        "WARNING:"
    };

    for message in messages {
        eprintln!("{} {}", prefix, message);
    }
}

/// Print per-job statistics and inlined resources (debug mode).
pub fn debug_stats(minified: &MinifyOutput) {
    let stats = &minified.stats;

    eprintln!("Original: {} bytes", stats.original_size);
    eprintln!("Minified: {} bytes", stats.minified_size);
    eprintln!("Efficiency: {}%", (stats.efficiency * 10000.0).trunc() / 100.0);
    eprintln!("Time spent: {}ms", stats.time_spent.as_millis());

    if !minified.inlined_stylesheets.is_empty() {
        eprintln!("Inlined stylesheets:");
        for uri in &minified.inlined_stylesheets {
            eprintln!("- {}", uri);
        }
    }
}
