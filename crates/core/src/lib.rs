//! Murti Core - Shared types library.
//!
//! This crate provides common types used across the Murti admin components:
//! - `admin` - HTTP client and service layer for the store's REST API
//! - `cli` - Command-line front end over the service layer
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O and no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, status enums, stock thresholds and rupee amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
