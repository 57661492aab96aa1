//! # CLI Layer
//!
//! One possible client of the rxview library, and the only place that knows
//! about terminal I/O, argument parsing and exit codes.
//!
//! 1. **Argument parsing**: clap-derived [`args::Cli`]
//! 2. **Context setup**: settings scope, config, record and definition paths
//! 3. **API dispatch**: builds a `FilterState` from flags and calls `RxviewApi`
//! 4. **Output**: tables, facet lists and tab bars from `render`
//!
//! Business logic is tested in the library; tests here cover flag parsing
//! and the rendered text.

mod args;
mod commands;
mod logging;
mod render;

pub use commands::run;
