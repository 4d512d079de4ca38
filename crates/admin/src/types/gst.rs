use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-wide GST registration and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GstSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub default_rate: Option<Decimal>,
    pub composition_scheme: bool,
}

/// A GST slab, optionally tied to an HSN code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstRate {
    pub rate: Decimal,
    #[serde(default)]
    pub hsn_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /gst/calculate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GstCalculationRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_rate: Decimal,
    /// Destination state code; a state different from the store's makes the
    /// supply inter-state (IGST instead of CGST + SGST).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_state: Option<String>,
    pub is_inclusive: bool,
}

/// Tax split returned by `POST /gst/calculate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GstBreakdown {
    pub taxable_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total_tax: Decimal,
    #[serde(alias = "total")]
    pub total_amount: Decimal,
    pub is_interstate: bool,
}

/// Tax collected at one rate within a report period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GstRateSummary {
    pub rate: Decimal,
    pub taxable_value: Decimal,
    pub tax: Decimal,
}

/// Output of `GET /gst/reports`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GstReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub invoice_count: u64,
    pub total_taxable_value: Decimal,
    pub total_cgst: Decimal,
    pub total_sgst: Decimal,
    pub total_igst: Decimal,
    pub total_tax: Decimal,
    pub by_rate: Vec<GstRateSummary>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calculation_request_body() {
        let body = serde_json::to_value(GstCalculationRequest {
            amount: Decimal::new(1000, 0),
            gst_rate: Decimal::new(18, 0),
            customer_state: Some("29".to_string()),
            is_inclusive: false,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"amount": 1000.0, "gstRate": 18.0, "customerState": "29", "isInclusive": false})
        );
    }

    #[test]
    fn test_intrastate_breakdown() {
        let breakdown: GstBreakdown = serde_json::from_value(json!({
            "taxableAmount": 1000,
            "cgst": 90,
            "sgst": 90,
            "totalTax": 180,
            "total": 1180
        }))
        .unwrap();
        assert!(!breakdown.is_interstate);
        assert_eq!(breakdown.cgst + breakdown.sgst, breakdown.total_tax);
        assert_eq!(breakdown.total_amount, Decimal::new(1180, 0));
    }
}
