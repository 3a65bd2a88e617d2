//! Soundmint CLI Library
//!
//! Headless front-end for the Soundmint marketplace: lists the catalog and
//! plays it through the playback controller on a virtual clock.
//!
//! This library exposes the binary's components for testing purposes.

pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types for convenience
pub use config::SoundmintConfig;
pub use error::{CliError, Result};
pub use session::{OfflineMarketplace, SessionSettings, SessionSummary};
