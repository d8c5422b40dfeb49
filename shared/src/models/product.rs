//! Products and stock levels

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Category;
use crate::list_view::Searchable;
use crate::validation::validate_non_negative_price;

/// A product in the catalogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "prix_achat", default)]
    pub purchase_price: Decimal,
    #[serde(rename = "prix_vente", default)]
    pub sale_price: Decimal,
    #[serde(rename = "stock_actuel", default)]
    pub stock_current: i64,
    #[serde(rename = "stock_minimum", default)]
    pub stock_minimum: i64,
    #[serde(rename = "Categorie", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Product {
    /// Whether the product belongs on the low-stock alert list
    pub fn is_below_minimum(&self) -> bool {
        self.stock_current <= self.stock_minimum
    }

    /// Unit margin between sale and purchase price
    pub fn unit_margin(&self) -> Decimal {
        self.sale_price.saturating_sub(self.purchase_price)
    }

    /// Value of the stock on hand at purchase price
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.stock_current).saturating_mul(self.purchase_price)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(category) = self.category_name() {
            fields.push(category);
        }
        fields
    }
}

/// Product summary embedded in line items (`Produit` association)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    pub id: i64,
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(rename = "prix_achat", default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,
    #[serde(rename = "prix_vente", default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    #[serde(rename = "stock_actuel", default, skip_serializing_if = "Option::is_none")]
    pub stock_current: Option<i64>,
}

impl From<&Product> for ProductRef {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            purchase_price: Some(product.purchase_price),
            sale_price: Some(product.sale_price),
            stock_current: Some(product.stock_current),
        }
    }
}

/// Create/update body for a product
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ProductForm {
    #[serde(rename = "nom")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "prix_achat", serialize_with = "rust_decimal::serde::float::serialize")]
    #[validate(custom = "validate_non_negative_price")]
    pub purchase_price: Decimal,
    #[serde(rename = "prix_vente", serialize_with = "rust_decimal::serde::float::serialize")]
    #[validate(custom = "validate_non_negative_price")]
    pub sale_price: Decimal,
    #[serde(rename = "stock_actuel")]
    pub stock_current: i64,
    #[serde(rename = "stock_minimum")]
    pub stock_minimum: i64,
    #[serde(rename = "categorieId")]
    pub category_id: Option<i64>,
    #[serde(rename = "utilisateurId")]
    pub user_id: Option<i64>,
}

impl ProductForm {
    /// Prefill an edit form from an existing product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            purchase_price: product.purchase_price,
            sale_price: product.sale_price,
            stock_current: product.stock_current,
            stock_minimum: product.stock_minimum,
            category_id: product.category.as_ref().map(|c| c.id),
            user_id: None,
        }
    }
}
