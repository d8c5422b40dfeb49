//! Product categories

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::list_view::Searchable;

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
}

/// Create/update body for a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(rename = "nom")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "utilisateurId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Searchable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
