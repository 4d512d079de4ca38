//! Business settings, edited one section at a time.
//!
//! The same shapes are read from `GET /admin/business-settings` and written
//! back to `PUT /admin/business-settings/{section}`, so every section is
//! both `Serialize` and `Deserialize`. Money and rate fields are read in any
//! numeric form and written as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Address;

/// All settings sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessSettings {
    pub company: CompanySettings,
    pub tax: TaxSettings,
    pub delivery: DeliverySettings,
    pub payment: PaymentSettings,
    pub invoice: InvoiceSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Identity printed on invoices and estimates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxSettings {
    pub gst_enabled: bool,
    pub prices_include_tax: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub default_gst_rate: Option<Decimal>,
    /// Two-digit GST state code of the business, e.g. `27` for Maharashtra.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliverySettings {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub free_delivery_threshold: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub delivery_charge: Option<Decimal>,
    pub store_pickup_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_days: Option<u32>,
    pub serviceable_pincodes: Vec<String>,
}

impl DeliverySettings {
    /// Delivery charge for an order of `subtotal`.
    #[must_use]
    pub fn charge_for(&self, subtotal: Decimal) -> Decimal {
        match self.free_delivery_threshold {
            Some(threshold) if subtotal >= threshold => Decimal::ZERO,
            _ => self.delivery_charge.unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSettings {
    pub cod_enabled: bool,
    pub online_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_note: Option<String>,
    pub show_logo: bool,
}

/// Result of `POST /admin/business-settings/logo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedLogo {
    #[serde(alias = "logo", alias = "logoUrl")]
    pub url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_settings_document() {
        let settings: BusinessSettings = serde_json::from_value(json!({
            "company": {"name": "Shree Murti Bhandar", "gstin": "27ABCDE1234F1Z5"},
            "delivery": {"freeDeliveryThreshold": 999, "deliveryCharge": "49"}
        }))
        .unwrap();
        assert_eq!(settings.company.name.as_deref(), Some("Shree Murti Bhandar"));
        assert!(!settings.tax.gst_enabled);
        assert_eq!(settings.delivery.charge_for(Decimal::new(500, 0)), Decimal::new(49, 0));
        assert_eq!(settings.delivery.charge_for(Decimal::new(999, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_tax_section_writes_numbers() {
        let tax = TaxSettings {
            gst_enabled: true,
            default_gst_rate: Some(Decimal::new(12, 0)),
            ..TaxSettings::default()
        };
        assert_eq!(
            serde_json::to_value(&tax).unwrap(),
            json!({"gstEnabled": true, "pricesIncludeTax": false, "defaultGstRate": 12.0})
        );
    }
}
