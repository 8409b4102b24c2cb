//! readmegen CLI - README.md files from Go package documentation.
//!
//! This crate provides the command-line interface for the `readmegen`
//! library.
//!
//! - [`cli`] - Argument definitions
//! - [`config`] - Layered render configuration (file, environment, flags)
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - `commands` - Command implementations
//!
//! # Example
//!
//! ```rust
//! use readmegen_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use error::{CliError, ConfigError, Result, ResultExt};
