//! CLI command handlers
//!
//! Bridges clap argument parsing with the boundary decoders, the aggregation
//! functions and the exporters.

pub mod output;
pub mod report;
pub mod session;

pub use output::OutputArgs;
pub use report::{handle_report_command, ReportCommands};
pub use session::{handle_session_command, SessionCommands};
