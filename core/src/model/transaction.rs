use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::time::parse_invoice_timestamp;

/// One row of the transaction log, as read from the CSV file.
///
/// Numbers are kept as text so that a malformed value is reported per row
/// instead of failing the whole file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawTransactionRow {
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "UnitPrice")]
    pub unit_price: String,
    #[serde(rename = "Discount")]
    pub discount: String,
}

/// Column names a transaction log must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["InvoiceDate", "Quantity", "UnitPrice", "Discount"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub timestamp: NaiveDateTime,
    pub quantity: f64,
    pub unit_price: f64,
    pub revenue: f64,
}

impl TransactionRecord {
    pub fn new(timestamp: NaiveDateTime, quantity: f64, unit_price: f64, discount: f64) -> Self {
        Self {
            timestamp,
            quantity,
            unit_price,
            revenue: revenue_of(quantity, unit_price, discount),
        }
    }

    pub fn parse(row: &RawTransactionRow) -> Result<Self, ParseError> {
        let timestamp = parse_invoice_timestamp(&row.invoice_date)?;
        let quantity = parse_number("Quantity", &row.quantity)?;
        let unit_price = parse_number("UnitPrice", &row.unit_price)?;
        let discount = parse_number("Discount", &row.discount)?;

        let record = Self::new(timestamp, quantity, unit_price, discount);
        if !record.revenue.is_finite() {
            return Err(ParseError::RevenueOverflow {
                quantity: row.quantity.clone(),
                unit_price: row.unit_price.clone(),
                discount: row.discount.clone(),
            });
        }
        Ok(record)
    }
}

pub fn revenue_of(quantity: f64, unit_price: f64, discount: f64) -> f64 {
    quantity * unit_price * (1.0 - discount)
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    };

    let number: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !number.is_finite() {
        return Err(invalid());
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn row(date: &str, qty: &str, price: &str, disc: &str) -> RawTransactionRow {
        RawTransactionRow {
            invoice_date: date.to_string(),
            quantity: qty.to_string(),
            unit_price: price.to_string(),
            discount: disc.to_string(),
        }
    }

    #[test]
    fn test_parse_computes_revenue() {
        let first = TransactionRecord::parse(&row("2022-06-25 09:00", "2", "10", "0")).unwrap();
        assert_eq!(first.revenue, 20.0);
        assert_eq!(first.quantity, 2.0);
        assert_eq!(first.unit_price, 10.0);
        assert_eq!(first.timestamp.hour(), 9);

        let second = TransactionRecord::parse(&row("2022-06-25 09:00", "1", "5", "0.1")).unwrap();
        assert!((second.revenue - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_is_non_negative_for_valid_discounts() {
        for (qty, price, disc) in [(0.0, 3.0, 0.5), (4.0, 2.5, 1.0), (7.0, 0.0, 0.0), (3.0, 9.99, 0.25)] {
            let revenue = revenue_of(qty, price, disc);
            assert!(revenue >= 0.0, "{qty} * {price} * (1 - {disc}) = {revenue}");
            assert_eq!(revenue, qty * price * (1.0 - disc));
        }
    }

    #[test]
    fn test_parse_rejects_overflowing_revenue() {
        let err = TransactionRecord::parse(&row("2022-06-25 09:00", "1e200", "1e200", "0")).unwrap_err();
        assert!(matches!(err, ParseError::RevenueOverflow { .. }));

        // inf * 0 is NaN
        let err = TransactionRecord::parse(&row("2022-06-25 09:00", "1e200", "1e200", "1")).unwrap_err();
        assert!(matches!(err, ParseError::RevenueOverflow { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        let err = TransactionRecord::parse(&row("2022-06-25 09:00", "two", "10", "0")).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber { field: "Quantity", value: "two".to_string() }
        );

        let err = TransactionRecord::parse(&row("2022-06-25 09:00", "2", "", "0")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "UnitPrice", .. }));

        let err = TransactionRecord::parse(&row("2022-06-25 09:00", "2", "10", "NaN")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { field: "Discount", .. }));
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let err = TransactionRecord::parse(&row("25/06/2022", "2", "10", "0")).unwrap_err();
        assert_eq!(err, ParseError::InvalidTimestamp("25/06/2022".to_string()));
    }
}
