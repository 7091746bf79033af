//! # CLI Layer
//!
//! This module is **one possible UI client** for marknotes, not the
//! application itself. It is the only place that knows about terminal I/O,
//! exit codes and argument parsing.
//!
//! ## Structure
//!
//! - [`commands`]: `run()`, context setup and one `handle_*` per subcommand
//! - [`print`]: turns `CmdResult`s into terminal output
//! - [`markdown`]: styled terminal rendering of note bodies
//!
//! CLI tests cover parsing and formatting only; business rules are tested
//! in the library.

mod commands;
mod markdown;
mod print;

pub use commands::run;
