//! Arta Stone Core - Shared types library.
//!
//! This crate provides common types used across Arta Stone components:
//! - `storefront` - Public-facing storefront service
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, statuses
//!   and payment gateways
//! - [`locale`] - Locale handling and bilingual number/price formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod locale;
pub mod types;

pub use locale::Locale;
pub use types::*;
