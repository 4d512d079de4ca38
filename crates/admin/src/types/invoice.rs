//! Tax invoices and price estimates.

use chrono::{DateTime, NaiveDate, Utc};
use murti_core::{
    AmountError, EstimateId, EstimateStatus, InvoiceId, InvoiceStatus, OrderId, ProductId,
    amount_in_words, format_inr,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Address, OrderSummary, Reference};

/// Billing party on an invoice or estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingParty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    pub address: Address,
}

/// A line on an invoice or estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    #[serde(alias = "name")]
    pub description: String,
    #[serde(default)]
    pub hsn_code: Option<String>,
    pub quantity: u32,
    #[serde(alias = "price")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub gst_rate: Option<Decimal>,
    #[serde(default)]
    pub tax_amount: Decimal,
    #[serde(default, alias = "amount")]
    pub total: Decimal,
}

/// A tax invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "_id", alias = "id")]
    pub id: InvoiceId,
    pub invoice_number: String,
    #[serde(default)]
    pub order: Option<Reference<OrderId, OrderSummary>>,
    #[serde(default)]
    pub customer: BillingParty,
    #[serde(default)]
    pub items: Vec<InvoiceLine>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub cgst: Decimal,
    #[serde(default)]
    pub sgst: Decimal,
    #[serde(default)]
    pub igst: Decimal,
    #[serde(default)]
    pub total_tax: Decimal,
    #[serde(default, alias = "totalAmount", alias = "grandTotal")]
    pub total: Decimal,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub invoice_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// The grand total spelled out, as printed under the totals table.
    ///
    /// # Errors
    ///
    /// Returns an error if the total is negative or beyond the supported range.
    pub fn amount_in_words(&self) -> Result<String, AmountError> {
        amount_in_words(self.total)
    }

    /// The grand total with Indian digit grouping.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format_inr(self.total)
    }
}

/// Filters for `GET /invoices`.
#[derive(Debug, Clone, Default)]
pub struct InvoiceQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Body of `PATCH /invoices/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceStatusUpdate {
    pub status: InvoiceStatus,
}

/// A price estimate (quotation) that can later become an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    #[serde(rename = "_id", alias = "id")]
    pub id: EstimateId,
    pub estimate_number: String,
    #[serde(default)]
    pub customer: BillingParty,
    #[serde(default)]
    pub items: Vec<InvoiceLine>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub total_tax: Decimal,
    #[serde(default, alias = "totalAmount", alias = "grandTotal")]
    pub total: Decimal,
    #[serde(default)]
    pub status: EstimateStatus,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub converted_invoice: Option<InvoiceId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for `GET /invoices/estimates`.
#[derive(Debug, Clone, Default)]
pub struct EstimateQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<EstimateStatus>,
}

/// A line of a new or edited estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateLineInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductId>,
    pub description: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub gst_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
}

/// Body for creating or replacing an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    pub customer: BillingParty,
    pub items: Vec<EstimateLineInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_invoice() -> Invoice {
        serde_json::from_value(json!({
            "_id": "inv1",
            "invoiceNumber": "INV-2024-0042",
            "order": "o1",
            "customer": {"name": "Meera Iyer", "address": {"city": "Pune"}},
            "items": [
                {"name": "Brass Ganesha", "hsnCode": "8306", "quantity": 1, "price": 1102.50, "gstRate": 12, "taxAmount": 132.30, "amount": 1234.80}
            ],
            "subtotal": 1102.50,
            "cgst": 66.15,
            "sgst": 66.15,
            "totalTax": 132.30,
            "totalAmount": 1234.50,
            "status": "issued"
        }))
        .unwrap()
    }

    #[test]
    fn test_invoice_from_backend_json() {
        let invoice = sample_invoice();
        assert_eq!(invoice.status, InvoiceStatus::Issued);
        assert_eq!(invoice.order, Some(Reference::Id(OrderId::new("o1"))));
        assert_eq!(invoice.items.first().unwrap().description, "Brass Ganesha");
        assert_eq!(invoice.customer.address.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn test_invoice_total_in_words() {
        let invoice = sample_invoice();
        assert_eq!(
            invoice.amount_in_words().unwrap(),
            "Rupees One Thousand Two Hundred Thirty Four and Fifty Paise Only"
        );
        assert_eq!(invoice.formatted_total(), "₹1,234.50");
    }

    #[test]
    fn test_estimate_input_body() {
        let body = serde_json::to_value(EstimateInput {
            customer: BillingParty {
                name: "Temple Trust".to_string(),
                ..BillingParty::default()
            },
            items: vec![EstimateLineInput {
                product: None,
                description: "Custom marble Shiva, 3 ft".to_string(),
                quantity: 1,
                unit_price: Decimal::new(45_000, 0),
                gst_rate: None,
                hsn_code: None,
            }],
            valid_until: None,
            notes: None,
        })
        .unwrap();
        assert_eq!(body["items"][0]["unitPrice"], json!(45_000.0));
        assert_eq!(body["customer"]["name"], "Temple Trust");
    }
}
