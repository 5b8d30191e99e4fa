//! Newsclip Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the newsclip workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all newsclip workspace
//! members:
//!
//! - **Error Handling**: the [`NewsclipError`] taxonomy and [`Result`] alias
//! - **Logging**: tracing-based logging configuration and initialization
//!
//! # Example
//!
//! ```no_run
//! use newsclip_common::{NewsclipError, Result};
//!
//! fn load_token() -> Result<String> {
//!     std::env::var("NEWSCLIP_API_TOKEN")
//!         .map_err(|_| NewsclipError::Config("NEWSCLIP_API_TOKEN is not set".to_string()))
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{NewsclipError, Result};
