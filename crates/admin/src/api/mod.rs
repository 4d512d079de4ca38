//! HTTP layer for the store REST API.
//!
//! Provides the [`ApiClient`] with bearer token injection, the JSON vs
//! multipart [`Body`] union, and the injectable [`TokenStore`] the client
//! reads its token from.

pub mod body;
pub mod client;
pub mod token;

pub use body::{Body, FileUpload, form_from_fields};
pub use client::ApiClient;
pub use token::{
    FileTokenStore, LEGACY_TOKEN_KEY, MemoryTokenStore, TOKEN_KEY, TokenStore, TokenStoreError,
};
