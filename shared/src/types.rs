//! Common types used across the console

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of rows shown per page in every list view of the console
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Currency suffix used for every amount displayed by the console
pub const CURRENCY: &str = "GNF";

/// Date range for dashboard queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    #[serde(rename = "dateDebut")]
    pub start: NaiveDate,
    #[serde(rename = "dateFin")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Query-string pairs in the order the dashboard endpoint expects
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("dateDebut", self.start.format("%Y-%m-%d").to_string()),
            ("dateFin", self.end.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Pagination metadata for a list view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PageInfo {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Format an amount in Guinean francs: no decimals, space-grouped thousands.
///
/// `format_gnf(Decimal::from(1500))` gives `"1 500 GNF"`.
pub fn format_gnf(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{} {}", grouped, CURRENCY)
    } else {
        format!("{} {}", grouped, CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_gnf_groups_thousands() {
        assert_eq!(format_gnf(Decimal::from(0)), "0 GNF");
        assert_eq!(format_gnf(Decimal::from(950)), "950 GNF");
        assert_eq!(format_gnf(Decimal::from(1500)), "1 500 GNF");
        assert_eq!(format_gnf(Decimal::from(1_234_567)), "1 234 567 GNF");
    }

    #[test]
    fn test_format_gnf_rounds_and_signs() {
        assert_eq!(format_gnf(Decimal::new(10005, 1)), "1 001 GNF");
        assert_eq!(format_gnf(Decimal::from(-2500)), "-2 500 GNF");
    }

    #[test]
    fn test_date_range_query_pairs() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let pairs = range.query_pairs();
        assert_eq!(pairs[0], ("dateDebut", "2024-03-01".to_string()));
        assert_eq!(pairs[1], ("dateFin", "2024-03-31".to_string()));
    }
}
