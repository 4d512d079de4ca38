//! Resource services on top of [`ApiClient`].
//!
//! [`AdminApi`] hands out one cheap-to-clone service per resource. Each
//! service method maps to exactly one backend action, unwraps the
//! `{ success, data, message }` envelope and returns typed data. Errors are
//! never caught or translated here; they propagate to the caller as
//! [`ApiError`](crate::error::ApiError).

/// Declare a resource service: a cloneable handle around the shared client.
macro_rules! service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            client: $crate::api::ApiClient,
        }

        impl $name {
            pub(crate) const fn new(client: $crate::api::ApiClient) -> Self {
                Self { client }
            }

            /// The underlying HTTP client.
            #[must_use]
            pub const fn client(&self) -> &$crate::api::ApiClient {
                &self.client
            }
        }
    };
}

pub mod auth;
pub mod categories;
pub mod coupons;
pub mod envelope;
pub mod gst;
pub mod inventory;
pub mod invoices;
pub mod orders;
pub mod page;
pub mod products;
pub mod purchase_orders;
pub mod query;
pub mod reports;
pub mod settings;
pub mod suppliers;
pub mod users;

use std::sync::Arc;

pub use auth::AuthService;
pub use categories::CategoryService;
pub use coupons::CouponService;
pub use envelope::{ApiResponse, handle_empty_response, handle_response};
pub use gst::GstService;
pub use inventory::InventoryService;
pub use invoices::InvoiceService;
pub use orders::OrderService;
pub use page::{Page, Pagination};
pub use products::ProductService;
pub use purchase_orders::PurchaseOrderService;
pub use query::QueryParams;
pub use reports::ReportService;
pub use settings::SettingsService;
pub use suppliers::SupplierService;
pub use users::UserService;

use crate::api::{ApiClient, TokenStore};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Entry point to the admin API.
///
/// Cheap to clone; every clone and every service it hands out share one
/// [`ApiClient`] and therefore one token store.
#[derive(Debug, Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Build a client from configuration and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn connect(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::new(config, tokens)?))
    }

    /// The underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone())
    }

    #[must_use]
    pub fn products(&self) -> ProductService {
        ProductService::new(self.client.clone())
    }

    #[must_use]
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.client.clone())
    }

    #[must_use]
    pub fn orders(&self) -> OrderService {
        OrderService::new(self.client.clone())
    }

    #[must_use]
    pub fn users(&self) -> UserService {
        UserService::new(self.client.clone())
    }

    #[must_use]
    pub fn coupons(&self) -> CouponService {
        CouponService::new(self.client.clone())
    }

    #[must_use]
    pub fn settings(&self) -> SettingsService {
        SettingsService::new(self.client.clone())
    }

    #[must_use]
    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.client.clone())
    }

    #[must_use]
    pub fn suppliers(&self) -> SupplierService {
        SupplierService::new(self.client.clone())
    }

    #[must_use]
    pub fn purchase_orders(&self) -> PurchaseOrderService {
        PurchaseOrderService::new(self.client.clone())
    }

    #[must_use]
    pub fn invoices(&self) -> InvoiceService {
        InvoiceService::new(self.client.clone())
    }

    #[must_use]
    pub fn gst(&self) -> GstService {
        GstService::new(self.client.clone())
    }

    #[must_use]
    pub fn reports(&self) -> ReportService {
        ReportService::new(self.client.clone())
    }
}
