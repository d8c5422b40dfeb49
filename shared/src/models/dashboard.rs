//! Dashboard statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate figures shown on the home dashboard.
///
/// Every field defaults to zero so a partial response still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardStats {
    #[serde(rename = "ventesDuJour")]
    pub sales_today: Decimal,
    #[serde(rename = "totalAchats")]
    pub total_purchases: Decimal,
    #[serde(rename = "beneficeDuJour")]
    pub profit_today: Decimal,
    #[serde(rename = "produitsEnStock")]
    pub products_in_stock: i64,
    #[serde(rename = "rupturesStock")]
    pub out_of_stock: i64,
    #[serde(rename = "alertesStock")]
    pub stock_alerts: i64,
    #[serde(rename = "valeurStock")]
    pub stock_value: Decimal,
}
