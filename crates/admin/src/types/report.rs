//! Analytics report shapes.

use chrono::NaiveDate;
use murti_core::{ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bucket size for time-series reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Day,
    Week,
    Month,
}

impl GroupBy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!("invalid grouping: {s}")),
        }
    }
}

/// Date window shared by the report endpoints. Unset bounds are left to the
/// backend's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub group_by: Option<GroupBy>,
}

impl ReportRange {
    /// Both bounds set, no grouping.
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            group_by: None,
        }
    }

    #[must_use]
    pub const fn grouped_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }
}

/// One bucket of a sales time series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesPoint {
    #[serde(alias = "_id", alias = "date")]
    pub period: String,
    #[serde(alias = "totalRevenue")]
    pub revenue: Decimal,
    #[serde(alias = "orderCount")]
    pub orders: u64,
}

/// Output of `GET /reports/sales`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesReport {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub average_order_value: Decimal,
    #[serde(alias = "salesData")]
    pub series: Vec<SalesPoint>,
}

/// A best-selling product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    #[serde(rename = "_id", alias = "productId", default)]
    pub product: Option<ProductId>,
    pub name: String,
    #[serde(default, alias = "totalSold")]
    pub quantity_sold: u64,
    #[serde(default, alias = "totalRevenue")]
    pub revenue: Decimal,
}

/// Stock held in one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryStock {
    #[serde(alias = "_id")]
    pub category: String,
    #[serde(alias = "productCount")]
    pub products: u64,
    #[serde(alias = "totalStock")]
    pub stock: u64,
    #[serde(alias = "stockValue")]
    pub value: Decimal,
}

/// Output of `GET /reports/inventory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryReport {
    pub total_products: u64,
    pub total_stock_value: Decimal,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
    pub by_category: Vec<CategoryStock>,
}

/// A customer ranked by spend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopCustomer {
    #[serde(rename = "_id", alias = "userId")]
    pub user: Option<UserId>,
    pub name: String,
    pub email: Option<String>,
    #[serde(alias = "orderCount")]
    pub orders: u64,
    pub total_spent: Decimal,
}

/// Output of `GET /reports/customers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerReport {
    pub total_customers: u64,
    pub new_customers: u64,
    pub returning_customers: u64,
    pub top_customers: Vec<TopCustomer>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sales_report_with_aggregation_ids() {
        let report: SalesReport = serde_json::from_value(json!({
            "totalRevenue": 125000,
            "totalOrders": 50,
            "salesData": [
                {"_id": "2024-03-01", "totalRevenue": 5000, "orderCount": 2},
                {"_id": "2024-03-02", "totalRevenue": 7500.5, "orderCount": 3}
            ]
        }))
        .unwrap();
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series.last().unwrap().revenue, Decimal::new(75_005, 1));
        assert_eq!(report.average_order_value, Decimal::ZERO);
    }

    #[test]
    fn test_top_product_aliases() {
        let top: TopProduct = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Brass Ganesha",
            "totalSold": 42,
            "totalRevenue": 62958
        }))
        .unwrap();
        assert_eq!(top.product, Some(ProductId::new("p1")));
        assert_eq!(top.quantity_sold, 42);
    }

    #[test]
    fn test_group_by_parse() {
        assert_eq!("week".parse::<GroupBy>().unwrap(), GroupBy::Week);
        assert!("year".parse::<GroupBy>().is_err());
    }
}
