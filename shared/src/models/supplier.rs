//! Suppliers

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::list_view::Searchable;

/// A supplier of products
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Stored as a number by the backend
    #[serde(rename = "telephone", default)]
    pub phone: Option<i64>,
}

impl Searchable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

/// Create/update body for a supplier
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SupplierForm {
    #[serde(rename = "nom")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "adresse")]
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(rename = "telephone")]
    pub phone: i64,
    #[serde(rename = "utilisateurId")]
    pub user_id: Option<i64>,
}

impl SupplierForm {
    pub fn from_supplier(supplier: &Supplier) -> Self {
        Self {
            name: supplier.name.clone(),
            address: supplier.address.clone().unwrap_or_default(),
            email: supplier.email.clone(),
            phone: supplier.phone.unwrap_or_default(),
            user_id: None,
        }
    }
}
