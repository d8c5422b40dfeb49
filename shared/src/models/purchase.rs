//! Purchases ("achats") recorded from a supplier basket

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductRef;
use crate::list_view::{LineFigures, LineItemSource, Searchable};

/// A persisted purchase line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "utilisateurId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "fournisseurId", default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(rename = "produitId", default)]
    pub product_id: i64,
    #[serde(rename = "quantite")]
    pub quantity: i32,
    #[serde(rename = "prix_achat", default)]
    pub purchase_price: Option<Decimal>,
    #[serde(rename = "prix_vente", default)]
    pub sale_price: Option<Decimal>,
    #[serde(rename = "Produit", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
}

impl PurchaseLine {
    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown product")
    }
}

impl LineFigures for PurchaseLine {
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

/// A persisted purchase with its lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub id: i64,
    #[serde(default)]
    pub total: Decimal,
    #[serde(rename = "LigneAchats", default)]
    pub lines: Vec<PurchaseLine>,
}

impl LineItemSource for Purchase {
    type Line = PurchaseLine;

    fn line_items(&self) -> &[PurchaseLine] {
        &self.lines
    }
}

impl Searchable for Purchase {
    fn search_fields(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| l.product.as_ref().map(|p| p.name.as_str()))
            .collect()
    }
}
