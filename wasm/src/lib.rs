//! WebAssembly module for the Stock Admin console
//!
//! Exposes the pure page logic to the browser:
//! - Purchase and sale baskets
//! - Searchable paginated list views and line-item aggregates
//! - The session-gated navigation rule
//! - Money display
//!
//! Records and lines cross the boundary as JSON strings in the backend's
//! wire format.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::{
    guard_route, AggregateTotals, BasketKind, LineItem, LineItemBasket, LineItemSource,
    ListViewModel, RouteDecision, Searchable, SessionState, UnresolvedCost,
};

fn to_js(message: String) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

fn parse_kind(kind: &str) -> Result<BasketKind, String> {
    match kind {
        "achat" | "purchase" => Ok(BasketKind::Purchase),
        "vente" | "sale" => Ok(BasketKind::Sale),
        other => Err(format!("Unknown basket kind: {}", other)),
    }
}

fn parse_policy(policy: &str) -> Result<UnresolvedCost, String> {
    serde_json::from_value(Value::String(policy.to_string()))
        .map_err(|_| format!("Unknown cost policy: {}", policy))
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn stringify<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Draft purchase or sale
#[wasm_bindgen]
pub struct Basket {
    inner: LineItemBasket,
}

#[wasm_bindgen]
impl Basket {
    /// `kind` is `achat`/`purchase` or `vente`/`sale`
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str) -> Result<Basket, JsValue> {
        let kind = parse_kind(kind).map_err(to_js)?;
        Ok(Basket {
            inner: LineItemBasket::new(kind),
        })
    }

    /// Append a line, or replace the line at `index`; returns its position
    pub fn add_or_replace(&mut self, line_json: &str, index: Option<u32>) -> Result<u32, JsValue> {
        self.add_line(line_json, index).map_err(to_js)
    }

    /// Whether a line was removed
    pub fn remove_at(&mut self, index: u32) -> bool {
        self.inner.remove_at(index as usize).is_some()
    }

    pub fn len(&self) -> u32 {
        self.inner.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `empty`, `building` or `submitting`
    pub fn state(&self) -> String {
        serde_json::to_value(self.inner.state())
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn lines_json(&self) -> Result<String, JsValue> {
        stringify(&self.inner.lines()).map_err(to_js)
    }

    pub fn totals_json(&self) -> Result<String, JsValue> {
        stringify(&self.inner.totals()).map_err(to_js)
    }

    /// Request body for the create route, without entering the submitting state
    pub fn payload_json(&self) -> Result<String, JsValue> {
        self.payload().map_err(to_js)
    }

    /// Request body for the create route; edits are refused until completion
    pub fn begin_submission(&mut self) -> Result<String, JsValue> {
        let payload = self
            .inner
            .begin_submission()
            .map_err(|e| to_js(e.to_string()))?;
        stringify(&payload).map_err(to_js)
    }

    /// Clears the lines when `success`, keeps them otherwise
    pub fn complete_submission(&mut self, success: bool) -> Result<(), JsValue> {
        self.inner
            .complete_submission(success)
            .map_err(|e| to_js(e.to_string()))
    }
}

impl Basket {
    fn add_line(&mut self, line_json: &str, index: Option<u32>) -> Result<u32, String> {
        let line: LineItem = parse(line_json, "line")?;
        self.inner
            .add_or_replace(line, index.map(|i| i as usize))
            .map(|position| position as u32)
            .map_err(|e| e.to_string())
    }

    fn payload(&self) -> Result<String, String> {
        let payload = self.inner.to_submission_payload().map_err(|e| e.to_string())?;
        stringify(&payload)
    }
}

fn page_of<T>(records_json: &str, search: &str, page: u32, page_size: u32) -> Result<String, String>
where
    T: Searchable + Serialize + DeserializeOwned,
{
    let mut view = ListViewModel::new(page_size as usize);
    view.set_records(parse::<Vec<T>>(records_json, "records")?);
    view.set_search_term(search);
    view.go_to_page(page as usize);

    let info = view.page_info();
    stringify(&json!({
        "rows": view.visible_page(),
        "page": info.page,
        "pageSize": info.page_size,
        "totalItems": info.total_items,
        "totalPages": info.total_pages,
        "hasPrevious": info.has_previous(),
        "hasNext": info.has_next(),
    }))
}

fn list_page_inner(
    resource: &str,
    records_json: &str,
    search: &str,
    page: u32,
    page_size: u32,
) -> Result<String, String> {
    match resource {
        "produit" => page_of::<Product>(records_json, search, page, page_size),
        "categorie" => page_of::<Category>(records_json, search, page, page_size),
        "fournisseur" => page_of::<Supplier>(records_json, search, page, page_size),
        "utilisateur" => page_of::<User>(records_json, search, page, page_size),
        "mouvementStock" => page_of::<StockMovement>(records_json, search, page, page_size),
        "achat" => page_of::<Purchase>(records_json, search, page, page_size),
        "vente" => page_of::<Sale>(records_json, search, page, page_size),
        other => Err(format!("Unknown resource: {}", other)),
    }
}

/// One page of a resource list after applying the search term.
///
/// `resource` is the backend path segment (`produit`, `vente`, ...).
#[wasm_bindgen]
pub fn list_page(
    resource: &str,
    records_json: &str,
    search: &str,
    page: u32,
    page_size: u32,
) -> Result<String, JsValue> {
    list_page_inner(resource, records_json, search, page, page_size).map_err(to_js)
}

fn totals_of<T>(records_json: &str, policy: UnresolvedCost) -> Result<AggregateTotals, String>
where
    T: Searchable + LineItemSource + DeserializeOwned,
{
    let mut view = ListViewModel::new(DEFAULT_PAGE_SIZE);
    view.set_records(parse::<Vec<T>>(records_json, "records")?);
    Ok(view.aggregate_totals(policy))
}

fn aggregate_totals_inner(kind: &str, records_json: &str, policy: &str) -> Result<String, String> {
    let policy = parse_policy(policy)?;
    let totals = match parse_kind(kind)? {
        BasketKind::Purchase => totals_of::<Purchase>(records_json, policy)?,
        BasketKind::Sale => totals_of::<Sale>(records_json, policy)?,
    };
    stringify(&totals)
}

/// Acquisition, disposal and margin totals over every line of every record.
///
/// `policy` is `zero` or `at_sale_price`.
#[wasm_bindgen]
pub fn aggregate_totals(kind: &str, records_json: &str, policy: &str) -> Result<String, JsValue> {
    aggregate_totals_inner(kind, records_json, policy).map_err(to_js)
}

/// Path to redirect to, or an empty string when `path` can be shown
#[wasm_bindgen]
pub fn route_guard(token: Option<String>, path: &str, login_path: &str, home_path: &str) -> String {
    let state = token.map(SessionState::with_token).unwrap_or_default();
    match guard_route(&state, path, login_path, home_path) {
        RouteDecision::Allow => String::new(),
        RouteDecision::Redirect(to) => to,
    }
}

/// Amount in Guinean francs, e.g. `1 500 GNF`
#[wasm_bindgen]
pub fn format_amount(amount: f64) -> String {
    format_gnf(Decimal::try_from(amount).unwrap_or(Decimal::ZERO))
}
