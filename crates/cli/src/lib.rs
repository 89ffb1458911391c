//! `invoicedesk` command line: argument model and command execution.
//!
//! `main.rs` only parses arguments, wires logging and storage, and prints what
//! [`commands::execute`] returns.

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Command, FilterArgs};
pub use commands::{CommandOutput, execute};
pub use output::OutputFormat;
