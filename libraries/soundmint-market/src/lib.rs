//! Soundmint - Catalog and Storefront
//!
//! Loads unsold listings and drives purchase and resale flows against an
//! injected [`Marketplace`](soundmint_core::Marketplace).
//!
//! This crate provides:
//! - [`HttpCatalog`]: listing index plus per-token JSON metadata over HTTP
//! - [`StaticCatalog`]: listings from a JSON file on disk
//! - [`Storefront`]: listing state, purchase and resale with price validation,
//!   plus the account's owned tokens and resales

mod catalog;
mod storefront;

pub use catalog::{HttpCatalog, StaticCatalog, DEFAULT_TIMEOUT};
pub use storefront::{Resales, Storefront, StorefrontStatus};
