//! PromptCanvas command-line shell.
//!
//! Drives the editing core without a UI: inspecting documents, replaying
//! recorded input sessions, running prompt generation and managing the
//! local document library.

pub mod cli;
pub mod commands;
pub mod error;
pub mod replay;
pub mod shortcuts;

pub use cli::Cli;
pub use commands::run;
pub use error::{AppError, AppResult};
