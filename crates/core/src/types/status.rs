//! Status enums for various entities.
//!
//! Values mirror the strings the backend stores. Enums that are read back
//! from list endpoints carry an `Unknown` catch-all so a new server-side
//! state does not break decoding of a whole page.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
    Returned,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// The wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the order can no longer move to another status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Returned)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "returned" => Ok(Self::Returned),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// The wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(format!("invalid payment status: {s}")),
        }
    }
}

/// Role of a platform account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Storefront customer.
    #[default]
    User,
    /// Store administrator.
    Admin,
    /// Delivery partner who can be assigned orders.
    DeliveryPartner,
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// The wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::DeliveryPartner => "delivery_partner",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "delivery_partner" => Ok(Self::DeliveryPartner),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Delivered by one of the store's own delivery partners.
    InHouse,
    /// Handed to a third-party courier with a tracking number.
    Courier,
    /// Collected by the customer at the store.
    StorePickup,
    #[serde(other)]
    Unknown,
}

impl DeliveryMethod {
    /// The wire representation of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InHouse => "in_house",
            Self::Courier => "courier",
            Self::StorePickup => "store_pickup",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_house" => Ok(Self::InHouse),
            "courier" => Ok(Self::Courier),
            "store_pickup" => Ok(Self::StorePickup),
            _ => Err(format!("invalid delivery method: {s}")),
        }
    }
}

/// Kind of discount a coupon grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Status of a purchase order raised with a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Ordered,
    PartiallyReceived,
    Received,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Status of a price estimate (quotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Converted,
    #[serde(other)]
    Unknown,
}

macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// The wire representation of the status.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_names!(PurchaseOrderStatus {
    Draft => "draft",
    Ordered => "ordered",
    PartiallyReceived => "partially_received",
    Received => "received",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

wire_names!(InvoiceStatus {
    Draft => "draft",
    Issued => "issued",
    Paid => "paid",
    Cancelled => "cancelled",
    Unknown => "unknown",
});

wire_names!(EstimateStatus {
    Draft => "draft",
    Sent => "sent",
    Accepted => "accepted",
    Rejected => "rejected",
    Converted => "converted",
    Unknown => "unknown",
});

/// Direction of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOperation {
    /// Add the quantity to the current stock.
    Add,
    /// Remove the quantity from the current stock.
    Subtract,
    /// Replace the current stock with the quantity.
    Set,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        assert_eq!(
            "out_for_delivery".parse::<OrderStatus>().unwrap(),
            OrderStatus::OutForDelivery
        );
    }

    #[test]
    fn test_unknown_status_does_not_fail_decoding() {
        let status: OrderStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);

        let role: UserRole = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, UserRole::Unknown);
    }

    #[test]
    fn test_back_office_statuses_display_wire_names() {
        assert_eq!(PurchaseOrderStatus::PartiallyReceived.to_string(), "partially_received");
        assert_eq!(InvoiceStatus::Issued.as_str(), "issued");
        assert_eq!(
            serde_json::to_string(&EstimateStatus::Converted).unwrap(),
            format!("\"{}\"", EstimateStatus::Converted)
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!("bogus".parse::<UserRole>().is_err());
        assert!("unknown".parse::<PaymentStatus>().is_err());
        assert_eq!("courier".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Courier);
    }
}
