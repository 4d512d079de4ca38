//! Core types for Murti.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod id;
pub mod status;
pub mod stock;

pub use amount::{AmountError, amount_in_words, format_inr};
pub use id::*;
pub use status::*;
pub use stock::{DEFAULT_LOW_STOCK_THRESHOLD, StockStatus};
