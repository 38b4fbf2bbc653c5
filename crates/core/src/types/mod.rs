//! Core types for Arta Stone.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod payment;
pub mod price;
pub mod status;

pub use id::*;
pub use payment::PaymentMethod;
pub use price::{DEFAULT_UNIT_PRICE, UnitPrice};
pub use status::*;
