//! Sales ("ventes")

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductRef;
use crate::list_view::{LineFigures, LineItemSource, Searchable};

/// A persisted sale line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "produitId")]
    pub product_id: i64,
    #[serde(rename = "quantite")]
    pub quantity: i32,
    #[serde(rename = "prix_vente", default)]
    pub sale_price: Option<Decimal>,
    #[serde(rename = "prix_achat", default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,
    #[serde(rename = "Produit", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
}

impl LineFigures for SaleLine {
    fn quantity(&self) -> i32 {
        self.quantity
    }

    fn unit_purchase_price(&self) -> Option<Decimal> {
        self.purchase_price
    }

    fn resolved_purchase_price(&self) -> Option<Decimal> {
        self.product.as_ref().and_then(|p| p.purchase_price)
    }

    fn unit_sale_price(&self) -> Option<Decimal> {
        self.sale_price
    }
}

/// A persisted sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: i64,
    #[serde(default)]
    pub total: Decimal,
    #[serde(rename = "lignes", alias = "LigneVentes", default)]
    pub lines: Vec<SaleLine>,
}

impl LineItemSource for Sale {
    type Line = SaleLine;

    fn line_items(&self) -> &[SaleLine] {
        &self.lines
    }
}

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| l.product.as_ref().map(|p| p.name.as_str()))
            .collect()
    }
}
