//! Reference data for form dropdowns

use std::future::Future;

use shared::{Category, MovementType, Product, Role, Supplier, User};

use crate::api::ApiClient;
use crate::error::ClientResult;

/// A dropdown source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Products,
    Categories,
    Suppliers,
    Users,
    Roles,
    MovementTypes,
}

/// Dropdown contents of a page.
///
/// Each lookup is applied on its own: a failing lookup leaves its slice empty
/// and records the error, the others still load.
#[derive(Debug, Clone, Default)]
pub struct LookupSet {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub suppliers: Vec<Supplier>,
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub movement_types: Vec<MovementType>,
    pub errors: Vec<(Lookup, String)>,
}

async fn fetch_if<T, F>(wanted: bool, fetch: F) -> Option<ClientResult<Vec<T>>>
where
    F: Future<Output = ClientResult<Vec<T>>>,
{
    if wanted {
        Some(fetch.await)
    } else {
        None
    }
}

impl LookupSet {
    /// Fetch the requested lookups concurrently
    pub async fn load(api: &ApiClient, wanted: &[Lookup]) -> Self {
        let wants = |lookup| wanted.contains(&lookup);
        let (products, categories, suppliers, users, roles, movement_types) = tokio::join!(
            fetch_if(wants(Lookup::Products), api.list::<Product>()),
            fetch_if(wants(Lookup::Categories), api.list::<Category>()),
            fetch_if(wants(Lookup::Suppliers), api.list::<Supplier>()),
            fetch_if(wants(Lookup::Users), api.list::<User>()),
            fetch_if(wants(Lookup::Roles), api.roles()),
            fetch_if(wants(Lookup::MovementTypes), api.movement_types()),
        );

        let mut set = Self::default();
        set.products = set.apply(Lookup::Products, products);
        set.categories = set.apply(Lookup::Categories, categories);
        set.suppliers = set.apply(Lookup::Suppliers, suppliers);
        set.users = set.apply(Lookup::Users, users);
        set.roles = set.apply(Lookup::Roles, roles);
        set.movement_types = set.apply(Lookup::MovementTypes, movement_types);
        set
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    fn apply<T>(&mut self, lookup: Lookup, result: Option<ClientResult<Vec<T>>>) -> Vec<T> {
        match result {
            Some(Ok(items)) => items,
            Some(Err(e)) => {
                tracing::warn!("Failed to load {:?} lookup: {}", lookup, e);
                self.errors.push((lookup, e.user_message()));
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
