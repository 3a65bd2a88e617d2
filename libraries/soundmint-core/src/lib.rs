//! Soundmint Core
//!
//! Platform-agnostic domain types, traits, and error handling shared by the
//! playback controller, the catalog clients and the CLI.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `Price`, `TokenRecord`
//! - **Collaborator Traits**: `CatalogSource`, `Marketplace`
//! - **Error Handling**: Unified `MarketError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soundmint_core::{Price, Track, TrackId};
//!
//! let price = Price::parse_major("1.5").unwrap();
//! let track = Track::new(TrackId::new("7"), "Night Drive", "https://cdn.example/7.mp3", price)
//!     .with_artist("Synthwave Collective");
//!
//! assert_eq!(track.price.to_string(), "1.5");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MarketError, Result};
pub use traits::{CatalogSource, Marketplace};
pub use types::{Price, TokenRecord, Track, TrackId};
