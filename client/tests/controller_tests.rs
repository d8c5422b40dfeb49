//! Page controller tests
//!
//! - Stale reload responses are discarded
//! - The loading flag is cleared on every path
//! - Mutations reload on success and leave the list untouched on failure
//! - Lookups load independently

mod common;

use std::time::Duration;

use common::{context, FakeTransport, Reply};
use rust_decimal::Decimal;
use serde_json::json;
use shared::{Category, CategoryForm, Product, Purchase, UnresolvedCost};
use stock_admin_client::{Lookup, Method, ReloadOutcome};

fn categories(names: &[&str]) -> serde_json::Value {
    json!(names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": i + 1, "nom": name}))
        .collect::<Vec<_>>())
}

// ============================================================================
// Reload
// ============================================================================

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let fake = FakeTransport::new();
    fake.on(
        Method::Get,
        "/categorie/liste",
        Reply::ok(categories(&["Ancienne"])).after(Duration::from_millis(80)),
    );
    fake.on(Method::Get, "/categorie/liste", Reply::ok(categories(&["Boissons", "Epicerie"])));
    let list = context(fake).list::<Category>();

    let (first, second) = tokio::join!(list.reload(), list.reload());

    assert_eq!(first.unwrap(), ReloadOutcome::Stale);
    assert_eq!(second.unwrap(), ReloadOutcome::Applied { records: 2 });
    let names: Vec<String> = list.visible_page().await.into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Boissons", "Epicerie"]);
}

#[tokio::test]
async fn test_loading_flag_cleared_after_success_and_failure() {
    let fake = FakeTransport::new();
    fake.on(
        Method::Get,
        "/categorie/liste",
        Reply::ok(categories(&["Boissons"])).after(Duration::from_millis(50)),
    );
    fake.on(Method::Get, "/categorie/liste", Reply::json(500, json!({"message": "Erreur serveur"})));
    let list = context(fake).list::<Category>();
    assert!(!list.is_loading());

    let handle = tokio::spawn({
        let list = list.clone();
        async move { list.reload().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(list.is_loading());
    handle.await.unwrap().unwrap();
    assert!(!list.is_loading());

    let err = list.reload().await.unwrap_err();
    assert_eq!(err.user_message(), "Erreur serveur");
    assert!(!list.is_loading());
    assert_eq!(list.last_error().as_deref(), Some("Erreur serveur"));

    // Failed reload keeps the previous rows
    assert_eq!(list.page_info().await.total_items, 1);
}

#[tokio::test]
async fn test_search_and_paging_through_controller() {
    let fake = FakeTransport::new();
    let names: Vec<String> = (1..=12).map(|i| format!("Produit {i}")).collect();
    let products: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, n)| json!({"id": i + 1, "nom": n, "prix_achat": 10, "prix_vente": 12}))
        .collect();
    fake.on(Method::Get, "/produit/liste", Reply::ok(json!(products)));
    let list = context(fake).list::<Product>();
    list.reload().await.unwrap();

    let info = list.page_info().await;
    assert_eq!((info.total_items, info.total_pages, info.page_size), (12, 3, 5));

    list.go_to_page(9).await;
    assert_eq!(list.page_info().await.page, 3);
    assert_eq!(list.visible_page().await.len(), 2);

    list.set_search_term("produit 1").await;
    let info = list.page_info().await;
    assert_eq!(info.page, 1);
    assert_eq!(info.total_items, 4);
    assert_eq!(list.find(12).await.map(|p| p.name), Some("Produit 12".to_string()));
}

#[tokio::test]
async fn test_low_stock_page_reads_alert_route() {
    let fake = FakeTransport::new();
    fake.on(
        Method::Get,
        "/produit/alert",
        Reply::ok(json!([
            {"id": 3, "nom": "Sucre", "stock_actuel": 2, "stock_minimum": 10},
            {"id": 4, "nom": "Huile", "stock_actuel": 5, "stock_minimum": 5}
        ])),
    );
    let alerts = context(fake.clone()).low_stock_list();

    assert_eq!(alerts.reload().await.unwrap(), ReloadOutcome::Applied { records: 2 });
    assert!(alerts.visible_page().await.iter().all(Product::is_below_minimum));
    assert_eq!(fake.requests_to(Method::Get, "/produit/alert").len(), 1);
    assert!(fake.requests_to(Method::Get, "/produit/liste").is_empty());
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_create_reloads_list() {
    let fake = FakeTransport::new();
    fake.on(Method::Get, "/categorie/liste", Reply::ok(categories(&["Boissons"])));
    fake.on(Method::Get, "/categorie/liste", Reply::ok(categories(&["Boissons", "Epicerie"])));
    fake.on(Method::Post, "/categorie/create", Reply::json(201, json!({"categorie": {"id": 2, "nom": "Epicerie"}})));
    let list = context(fake.clone()).list::<Category>();
    list.reload().await.unwrap();

    let form = CategoryForm {
        name: "Epicerie".into(),
        user_id: Some(1),
    };
    let created = list.create(&form).await.unwrap();
    assert_eq!(created.map(|c| c.id), Some(2));
    assert_eq!(list.page_info().await.total_items, 2);
    assert_eq!(fake.requests_to(Method::Get, "/categorie/liste").len(), 2);
}

#[tokio::test]
async fn test_failed_delete_leaves_rows() {
    let fake = FakeTransport::new();
    fake.on(Method::Get, "/categorie/liste", Reply::ok(categories(&["Boissons", "Epicerie"])));
    fake.on(
        Method::Delete,
        "/categorie/1",
        Reply::json(400, json!({"message": "Catégorie utilisée par des produits"})),
    );
    let list = context(fake.clone()).list::<Category>();
    list.reload().await.unwrap();

    assert!(list.delete(1).await.is_err());
    assert_eq!(list.page_info().await.total_items, 2);
    assert_eq!(
        list.last_error().as_deref(),
        Some("Catégorie utilisée par des produits")
    );
    assert_eq!(fake.requests_to(Method::Get, "/categorie/liste").len(), 1);
}

#[tokio::test]
async fn test_purchase_list_totals() {
    let fake = FakeTransport::new();
    fake.on(
        Method::Get,
        "/achat/liste",
        Reply::ok(json!([
            {"id": 1, "total": 300, "LigneAchats": [
                {"produitId": 1, "quantite": 3, "prix_achat": 100, "prix_vente": 150}]},
            {"id": 2, "total": 100, "LigneAchats": [
                {"produitId": 2, "quantite": 2, "prix_vente": 80,
                 "Produit": {"id": 2, "nom": "Sucre", "prix_achat": 50}}]}
        ])),
    );
    let list = context(fake).list::<Purchase>();
    list.reload().await.unwrap();

    let totals = list.aggregate_totals(UnresolvedCost::Zero).await;
    assert_eq!(totals.total_acquisition_value, Decimal::from(400));
    assert_eq!(totals.total_disposal_value, Decimal::from(610));
    assert_eq!(totals.margin, Decimal::from(210));
    assert_eq!(totals.unresolved_lines, 0);
}

// ============================================================================
// Lookups and dashboard
// ============================================================================

#[tokio::test]
async fn test_lookups_load_independently() {
    let fake = FakeTransport::new();
    fake.on(Method::Get, "/categorie/liste", Reply::ok(categories(&["Boissons"])));
    fake.on(Method::Get, "/fournisseur/liste", Reply::unreachable());
    fake.on(Method::Get, "/role/liste", Reply::ok(json!([{"id": 1, "nom": "admin"}])));
    let ctx = context(fake.clone());

    let set = ctx
        .lookups(&[Lookup::Categories, Lookup::Suppliers, Lookup::Roles])
        .await;
    assert_eq!(set.categories.len(), 1);
    assert!(set.suppliers.is_empty());
    assert_eq!(set.roles.len(), 1);
    assert!(!set.is_complete());
    assert_eq!(set.errors.len(), 1);
    assert_eq!(set.errors[0].0, Lookup::Suppliers);

    // Lookups that were not asked for are not fetched
    assert!(fake.requests_to(Method::Get, "/produit/liste").is_empty());
}

#[tokio::test]
async fn test_dashboard_keeps_last_figures_on_failure() {
    let fake = FakeTransport::new();
    fake.on(Method::Get, "/dashboard/statistique", Reply::ok(json!({"produitsEnStock": 40})));
    fake.on(Method::Get, "/dashboard/statistique", Reply::json(500, json!({"error": "Erreur API"})));
    let dashboard = context(fake).dashboard();

    assert_eq!(dashboard.load(None).await.unwrap().products_in_stock, 40);
    assert!(dashboard.load(None).await.is_err());
    assert_eq!(dashboard.stats().await.products_in_stock, 40);
}

#[tokio::test]
async fn test_dashboard_today_sends_single_day_range() {
    let fake = FakeTransport::new();
    fake.on(Method::Get, "/dashboard/statistique", Reply::ok(json!({})));
    let dashboard = context(fake.clone()).dashboard();

    let stats = dashboard.load_today().await.unwrap();
    assert_eq!(stats.sales_today, Decimal::ZERO);

    let query = &fake.requests()[0].query;
    assert_eq!(query.len(), 2);
    assert_eq!(query[0].0, "dateDebut");
    assert_eq!(query[1].0, "dateFin");
    assert_eq!(query[0].1, query[1].1);
}
