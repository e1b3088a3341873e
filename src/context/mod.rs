//! Execution context (environment, tty state)

pub mod environment;

pub use environment::Environment;
