//! Environment struct (stdin/stdout/tty state)

use std::io::{self, Stdin, Stdout, Stderr};

/// Execution environment
pub struct Environment {
    pub stdin: Stdin,
    pub stdout: Stdout,
    pub stderr: Stderr,
    pub stdin_isatty: bool,
    pub stdout_isatty: bool,
    /// `__DIRECT__` forces argument-driven mode even with piped stdin
    pub direct_mode: bool,
    pub program_name: String,
}

impl Environment {
    pub fn init() -> Self {
        Self::default()
    }

    /// Whether this invocation should read the stylesheet from stdin.
    ///
    /// True only when no positional inputs were given, stdin is piped, and
    /// `__DIRECT__` is unset (scripted callers use it to force help output
    /// instead of hanging on an empty pipe).
    pub fn reads_from_stdin(&self, has_inputs: bool) -> bool {
        !has_inputs && !self.direct_mode && !self.stdin_isatty
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            stderr: io::stderr(),
            stdin_isatty: atty::is(atty::Stream::Stdin),
            stdout_isatty: atty::is(atty::Stream::Stdout),
            direct_mode: std::env::var_os("__DIRECT__").is_some(),
            program_name: "slimcss".to_string(),
        }
    }
}
