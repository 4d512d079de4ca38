//! Data-transfer shapes mirrored from the backend's JSON.
//!
//! Field names follow the backend (camelCase, Mongo-style `_id`). Response
//! types are lenient: optional and defaulted fields keep a slightly
//! different payload from failing a whole page. Request types skip absent
//! fields so a partial update only sends what the caller set.

pub mod auth;
pub mod category;
pub mod coupon;
pub mod gst;
pub mod inventory;
pub mod invoice;
pub mod order;
pub mod product;
pub mod purchase_order;
pub mod report;
pub mod settings;
pub mod supplier;
pub mod user;

pub use auth::*;
pub use category::*;
pub use coupon::*;
pub use gst::*;
pub use inventory::*;
pub use invoice::*;
pub use order::*;
pub use product::*;
pub use purchase_order::*;
pub use report::*;
pub use settings::*;
pub use supplier::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Active/inactive filter shared by several list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Inactive,
}

impl StatusFilter {
    /// The query-string value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid status filter: {s}")),
        }
    }
}

/// Postal address as stored on orders, customers and suppliers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A reference that the backend sends either as a bare ID or, when the
/// relation is populated, as an embedded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<Id, Doc> {
    Id(Id),
    Populated(Doc),
}

impl<Id, Doc> Reference<Id, Doc> {
    /// The embedded document, if the relation was populated.
    #[must_use]
    pub const fn populated(&self) -> Option<&Doc> {
        match self {
            Self::Id(_) => None,
            Self::Populated(doc) => Some(doc),
        }
    }
}

pub(crate) const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use murti_core::CategoryId;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    struct Named {
        #[serde(rename = "_id")]
        id: CategoryId,
        name: String,
    }

    #[test]
    fn test_reference_accepts_bare_id() {
        let r: Reference<CategoryId, Named> = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(r, Reference::Id(CategoryId::new("abc")));
        assert!(r.populated().is_none());
    }

    #[test]
    fn test_reference_accepts_populated_document() {
        let r: Reference<CategoryId, Named> =
            serde_json::from_value(json!({"_id": "abc", "name": "Brass Idols"})).unwrap();
        assert_eq!(r.populated().unwrap().name, "Brass Idols");
    }

    #[test]
    fn test_status_filter_round_trip() {
        assert_eq!("active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!(StatusFilter::Inactive.to_string(), "inactive");
    }
}
