//! Stock movements (manual entries and corrections)

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ProductRef, User};
use crate::list_view::Searchable;

/// Kind of stock movement (entry, exit, inventory correction, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovementType {
    pub id: i64,
    #[serde(rename = "type")]
    pub label: String,
}

/// A recorded stock movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockMovement {
    pub id: i64,
    #[serde(rename = "quantite")]
    pub quantity: i32,
    #[serde(rename = "motif", default)]
    pub reason: Option<String>,
    #[serde(rename = "Produit", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
    #[serde(rename = "TypeMvt", default, skip_serializing_if = "Option::is_none")]
    pub movement_type: Option<MovementType>,
    #[serde(rename = "Utilisateur", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Searchable for StockMovement {
    fn search_fields(&self) -> Vec<&str> {
        self.reason.as_deref().into_iter().collect()
    }
}

/// Create/update body for a stock movement
#[derive(Debug, Clone, Serialize, Validate)]
pub struct StockMovementForm {
    #[serde(rename = "quantite")]
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,
    #[serde(rename = "motif")]
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
    #[serde(rename = "produitId")]
    pub product_id: Option<i64>,
    #[serde(rename = "typeMvtId")]
    pub movement_type_id: Option<i64>,
    #[serde(rename = "utilisateurId")]
    pub user_id: Option<i64>,
}

impl StockMovementForm {
    pub fn from_movement(movement: &StockMovement) -> Self {
        Self {
            quantity: movement.quantity,
            reason: movement.reason.clone().unwrap_or_default(),
            product_id: movement.product.as_ref().map(|p| p.id),
            movement_type_id: movement.movement_type.as_ref().map(|t| t.id),
            user_id: movement.user.as_ref().map(|u| u.id),
        }
    }
}
