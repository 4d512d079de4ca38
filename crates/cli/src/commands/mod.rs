//! CLI command implementations.

pub mod catalog;
pub mod orders;
pub mod people;
pub mod reports;
pub mod session;
