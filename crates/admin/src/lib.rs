//! Murti admin API client.
//!
//! Typed access to the store backend's REST API for the admin dashboard:
//! the catalogue, orders, customers, coupons, inventory, purchasing,
//! invoicing, GST and reports.
//!
//! ```no_run
//! # async fn run() -> Result<(), murti_admin::ApiError> {
//! use murti_admin::{AdminApi, ApiClient, ClientConfig};
//! use murti_admin::types::ProductQuery;
//!
//! let client = ApiClient::with_memory_store(&ClientConfig::default())?;
//! let api = AdminApi::new(client);
//! let page = api
//!     .products()
//!     .list(&ProductQuery {
//!         page: Some(2),
//!         limit: Some(20),
//!         ..ProductQuery::default()
//!     })
//!     .await?;
//! println!("{} of {} products", page.items.len(), page.pagination.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! The bearer token grants full admin access. It is held as a
//! [`secrecy::SecretString`], redacted from `Debug` output, and the
//! file-backed store writes it with owner-only permissions.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use api::{ApiClient, Body, FileTokenStore, FileUpload, MemoryTokenStore, TokenStore};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use services::{AdminApi, ApiResponse, Page, Pagination, QueryParams};
