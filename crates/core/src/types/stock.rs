//! Stock level classification used by the inventory screens.

use serde::{Deserialize, Serialize};

/// Quantity at or below which a product counts as low on stock when the
/// product does not carry its own threshold.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Availability bucket derived from a stock quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Classify a quantity against a low-stock threshold.
    ///
    /// A quantity of zero is always out of stock, even with a zero threshold.
    ///
    /// ```
    /// use murti_core::StockStatus;
    ///
    /// assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
    /// assert_eq!(StockStatus::classify(5, 5), StockStatus::LowStock);
    /// assert_eq!(StockStatus::classify(6, 5), StockStatus::InStock);
    /// ```
    #[must_use]
    pub const fn classify(quantity: u32, threshold: u32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity <= threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Classify using [`DEFAULT_LOW_STOCK_THRESHOLD`] when no threshold is given.
    #[must_use]
    pub fn from_quantity(quantity: u32, threshold: Option<u32>) -> Self {
        Self::classify(quantity, threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD))
    }

    /// The wire representation, as used in query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::LowStock => "low_stock",
            Self::OutOfStock => "out_of_stock",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_applies() {
        assert_eq!(StockStatus::from_quantity(10, None), StockStatus::LowStock);
        assert_eq!(StockStatus::from_quantity(11, None), StockStatus::InStock);
        assert_eq!(StockStatus::from_quantity(0, None), StockStatus::OutOfStock);
    }

    #[test]
    fn test_custom_threshold_overrides_default() {
        assert_eq!(StockStatus::from_quantity(3, Some(2)), StockStatus::InStock);
        assert_eq!(StockStatus::from_quantity(2, Some(2)), StockStatus::LowStock);
    }

    #[test]
    fn test_zero_threshold() {
        assert_eq!(StockStatus::classify(0, 0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(1, 0), StockStatus::InStock);
    }
}
