//! Users and roles

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::list_view::Searchable;

/// A role that can be assigned to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
}

/// A user account of the console
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "Role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

/// Create/update body for a user
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UserForm {
    #[serde(rename = "nom")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(rename = "mot_de_passe")]
    pub password: String,
    #[serde(rename = "roleId")]
    pub role_id: Option<i64>,
}

impl UserForm {
    /// Prefill an edit form; the password is never sent back by the backend
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone().unwrap_or_default(),
            password: String::new(),
            role_id: user.role.as_ref().map(|r| r.id),
        }
    }
}
