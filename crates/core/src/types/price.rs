//! Monetary amounts as served by the Storefront API.
//!
//! Shopify encodes amounts as decimal strings (`"19.99"`). They are kept as
//! strings on the wire so nothing is lost in transit, and parsed with
//! [`rust_decimal`] when a caller needs to compute with them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Parse the amount as an exact decimal.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream amount is not a valid decimal.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use shopfront_core::Money;
    ///
    /// let price = Money::new("19.99", "USD");
    /// assert_eq!(price.decimal().unwrap(), Decimal::new(1999, 2));
    /// ```
    pub fn decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        self.amount.trim().parse::<Decimal>()
    }

    /// Whether the amount parses as a decimal that is zero or greater.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.decimal().is_ok_and(|d| !d.is_sign_negative() || d.is_zero())
    }
}

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_is_exact() {
        let money = Money::new("0.10", "USD");
        let three = money.decimal().unwrap() * Decimal::from(3);
        assert_eq!(three, Decimal::new(30, 2));
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        assert!(Money::new("free", "USD").decimal().is_err());
        assert!(!Money::new("free", "USD").is_non_negative());
    }

    #[test]
    fn test_is_non_negative() {
        assert!(Money::new("0.0", "EUR").is_non_negative());
        assert!(Money::new("1250.00", "JPY").is_non_negative());
        assert!(!Money::new("-1.00", "USD").is_non_negative());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::json!({
            "minVariantPrice": { "amount": "12.50", "currencyCode": "CAD" }
        });
        let range: PriceRange = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(range.min_variant_price, Money::new("12.50", "CAD"));
        assert_eq!(serde_json::to_value(&range).unwrap(), json);
    }
}
