//! Integration tests for per-user favorites over an on-disk sled database

use tempfile::TempDir;
use vitrine::api::Caller;
use vitrine::config::ApiConfig;
use vitrine::favorites::{FavoritesApi, FavoritesStore, ShortcutType};

fn api(dir: &TempDir, favorites_limit: usize) -> FavoritesApi {
    let store = FavoritesStore::new(dir.path().join("store")).unwrap();
    let limits = ApiConfig {
        favorites_limit,
        ..ApiConfig::default()
    };
    FavoritesApi::with_limits(store, limits)
}

#[test]
fn test_favorites_are_per_user_and_ordered() {
    let dir = TempDir::new().unwrap();
    let api = api(&dir, 20);
    let alice = Caller::user("alice@example.com");
    let bob = Caller::user("bob@example.com");

    assert!(api.add_to_favorites(&alice, "Sales Invoice", "Invoices", None).success);
    assert!(api
        .add_shortcut(
            &alice,
            "/app/query-report/General Ledger",
            "Ledger",
            ShortcutType::Report,
            None,
        )
        .success);
    assert!(api.add_to_favorites(&alice, "Item", "", None).success);
    assert!(api.add_to_favorites(&bob, "Customer", "Customers", None).success);

    let favorites = api.get_user_favorites(&alice);
    let routes: Vec<&str> = favorites.iter().map(|f| f.route.as_str()).collect();
    assert_eq!(
        routes,
        vec!["/app/sales-invoice", "/app/query-report/General Ledger", "/app/item"]
    );
    assert_eq!(favorites[2].label, "Item");
    assert_eq!(favorites[1].kind, ShortcutType::Report);

    let bobs = api.get_user_favorites(&bob);
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].label, "Customers");
}

#[test]
fn test_duplicates_and_missing_entries() {
    let dir = TempDir::new().unwrap();
    let api = api(&dir, 20);
    let user = Caller::user("alice@example.com");

    assert!(api.add_to_favorites(&user, "Item", "Items", None).success);
    let again = api.add_to_favorites(&user, "Item", "Items again", None);
    assert!(!again.success);
    assert_eq!(again.message.as_deref(), Some("Already in favorites"));

    assert!(api.remove_from_favorites(&user, "Item").success);
    let missing = api.remove_from_favorites(&user, "Item");
    assert!(!missing.success);
    assert_eq!(missing.message.as_deref(), Some("Not in favorites"));
    assert!(api.get_user_favorites(&user).is_empty());
}

#[test]
fn test_guest_and_empty_target_are_rejected() {
    let dir = TempDir::new().unwrap();
    let api = api(&dir, 20);

    let response = api.add_to_favorites(&Caller::Guest, "Item", "Items", None);
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Not permitted"));
    assert!(api.get_user_favorites(&Caller::Guest).is_empty());

    let response = api.add_to_favorites(&Caller::user("alice@example.com"), "   ", "x", None);
    assert!(!response.success);
    assert!(response.message.unwrap().contains("link_to"));
}

#[test]
fn test_list_is_capped_and_persisted() {
    let dir = TempDir::new().unwrap();
    let user = Caller::user("alice@example.com");
    {
        let api = api(&dir, 3);
        for doctype in ["Item", "Customer", "Supplier", "Employee", "Project"] {
            assert!(api.add_to_favorites(&user, doctype, "", None).success);
        }
        let labels: Vec<String> = api
            .get_user_favorites(&user)
            .into_iter()
            .map(|f| f.label)
            .collect();
        assert_eq!(labels, vec!["Item", "Customer", "Supplier"]);
        api.store().flush().unwrap();
    }

    let reopened = api(&dir, 20);
    assert_eq!(reopened.get_user_favorites(&user).len(), 5);
    assert!(reopened.store().contains("alice@example.com", "Project").unwrap());
}

#[test]
fn test_route_override() {
    let dir = TempDir::new().unwrap();
    let api = api(&dir, 20);
    let user = Caller::user("alice@example.com");
    assert!(api
        .add_to_favorites(&user, "Item", "Item Report", Some("/app/item/view/report"))
        .success);
    let favorites = api.get_user_favorites(&user);
    assert_eq!(favorites[0].route, "/app/item/view/report");
    assert_eq!(favorites[0].kind, ShortcutType::DocType);
}
