//! Route table of the inventory backend

use std::fmt;

/// Resources with list/create/update/delete routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Product,
    Category,
    Supplier,
    User,
    StockMovement,
    Purchase,
    Sale,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Product,
        ResourceKind::Category,
        ResourceKind::Supplier,
        ResourceKind::User,
        ResourceKind::StockMovement,
        ResourceKind::Purchase,
        ResourceKind::Sale,
    ];

    /// Path segment, also the key single entities are nested under
    pub fn singular_key(&self) -> &'static str {
        match self {
            ResourceKind::Product => "produit",
            ResourceKind::Category => "categorie",
            ResourceKind::Supplier => "fournisseur",
            ResourceKind::User => "utilisateur",
            ResourceKind::StockMovement => "mouvementStock",
            ResourceKind::Purchase => "achat",
            ResourceKind::Sale => "vente",
        }
    }

    /// Key lists are nested under when the backend wraps them
    pub fn plural_key(&self) -> &'static str {
        match self {
            ResourceKind::Product => "produits",
            ResourceKind::Category => "categories",
            ResourceKind::Supplier => "fournisseurs",
            ResourceKind::User => "utilisateurs",
            ResourceKind::StockMovement => "mouvementStocks",
            ResourceKind::Purchase => "achats",
            ResourceKind::Sale => "ventes",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular_key())
    }
}

pub const LOGIN: &str = "/utilisateur/login";
pub const DASHBOARD_STATS: &str = "/dashboard/statistique";
pub const LOW_STOCK_ALERTS: &str = "/produit/alert";
pub const ROLES: &str = "/role/liste";
pub const MOVEMENT_TYPES: &str = "/typeMvtStock/liste";

/// Route the stock-movement page of the legacy console deleted through.
/// It points at the user resource; deletion uses [`delete`] instead.
pub const LEGACY_STOCK_MOVEMENT_DELETE: &str = "/utilisateur/supprimer/{id}";

pub fn list(kind: ResourceKind) -> String {
    format!("/{}/liste", kind.singular_key())
}

pub fn create(kind: ResourceKind) -> String {
    format!("/{}/create", kind.singular_key())
}

/// Update route; purchases and sales are immutable once recorded
pub fn update(kind: ResourceKind, id: i64) -> Option<String> {
    match kind {
        ResourceKind::Supplier => Some(format!("/fournisseur/modifier/{}", id)),
        ResourceKind::Purchase | ResourceKind::Sale => None,
        other => Some(format!("/{}/{}", other.singular_key(), id)),
    }
}

pub fn delete(kind: ResourceKind, id: i64) -> String {
    match kind {
        ResourceKind::Category => format!("/categorie/{}", id),
        other => format!("/{}/supprimer/{}", other.singular_key(), id),
    }
}
