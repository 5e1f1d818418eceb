// Dispatcher and CLI coverage: call contracts, status mapping, and the
// environment-driven configuration of the `catalog` binary.
mod support;

use anyhow::{Context, Result};
use catalog_store::seed::VEGETABLES_ID;
use catalog_store::{CatalogStore, SharedCatalog, StoreConfig, dispatch};
use serde_json::{Value, json};
use support::{catalog_command, run_command, stdout_json, temp_store};

fn json_names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// Dispatch creates and filters against a journal that survives reopen.
#[test]
fn dispatch_against_journal_backed_store() -> Result<()> {
    let store_dir = temp_store()?;
    let config = StoreConfig {
        store_path: store_dir.path.clone(),
        seed_on_open: true,
    };
    let catalog = config.open()?;

    let created = dispatch(
        &catalog,
        "POST",
        "/products",
        Some(r#"{"name": "Leek", "id": "l-1", "category_id": "f4f986a3-748b-4636-8128-91a92fa4988a"}"#),
    );
    assert_eq!(created.status, 201);

    let listed = dispatch(&catalog, "GET", "/products?name=EE", None);
    let body = listed.json_body().context("list returns JSON")?;
    assert_eq!(json_names(body), vec!["Leek"]);

    drop(catalog);
    let reopened = SharedCatalog::new(CatalogStore::open(&store_dir.path)?);
    let again = dispatch(&reopened, "GET", "/products", None);
    assert_eq!(json_names(again.json_body().context("json")?).len(), 5);
    Ok(())
}

// A journal write failure surfaces as a 500 and stores nothing.
#[test]
fn storage_failure_maps_to_server_error() -> Result<()> {
    let store_dir = temp_store()?;
    let catalog = SharedCatalog::new(CatalogStore::open(&store_dir.path)?);
    // Occupy the journal path with a directory so the append fails.
    std::fs::create_dir(&store_dir.path)?;

    let response = dispatch(&catalog, "POST", "/products", Some(r#"{"name": "Kiwi"}"#));
    assert_eq!(response.status, 500);
    let body = response.json_body().context("error body is JSON")?;
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    assert!(catalog.list_products(None).is_empty());
    Ok(())
}

// The binary answers the health route with plain text.
#[test]
fn cli_health_check() -> Result<()> {
    let store_dir = temp_store()?;
    let mut cmd = catalog_command(&store_dir.path);
    cmd.arg("GET").arg("/");
    let output = run_command(cmd)?;
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "api-ok");
    Ok(())
}

// The binary seeds on first use and applies both list filters.
#[test]
fn cli_lists_seeded_catalog_with_filters() -> Result<()> {
    let store_dir = temp_store()?;

    let mut cmd = catalog_command(&store_dir.path);
    cmd.arg("GET").arg("/products?name=an");
    let products = stdout_json(&run_command(cmd)?)?;
    assert_eq!(json_names(&products), vec!["Banana"]);

    let mut cmd = catalog_command(&store_dir.path);
    cmd.arg("GET").arg(format!("/categories?ids={VEGETABLES_ID}"));
    let categories = stdout_json(&run_command(cmd)?)?;
    assert_eq!(json_names(&categories), vec!["Vegetables"]);
    assert!(categories[0]["generated"].is_string());
    Ok(())
}

// A repeated create through the binary exits 1 with the duplicate body.
#[test]
fn cli_create_then_duplicate() -> Result<()> {
    let store_dir = temp_store()?;
    let body = json!({"name": "Mango", "id": "m-1", "category_id": "d899"}).to_string();

    let mut cmd = catalog_command(&store_dir.path);
    cmd.arg("POST").arg("/products").arg("--body").arg(&body);
    let created = stdout_json(&run_command(cmd)?)?;
    assert_eq!(created["name"], "Mango");

    let mut cmd = catalog_command(&store_dir.path);
    cmd.arg("POST").arg("/products").arg("--body").arg(&body);
    let output = cmd.output().context("running duplicate create")?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)?, json!({"name": "Product already exists"}));
    Ok(())
}

// `catalog seed` reports inserts once and skips them afterwards.
#[test]
fn cli_seed_is_idempotent() -> Result<()> {
    let store_dir = temp_store()?;
    let mut first = catalog_command(&store_dir.path);
    first.arg("seed");
    let report = stdout_json(&run_command(first)?)?;
    assert_eq!(report["products_inserted"], 4);
    assert_eq!(report["categories_inserted"], 2);

    let mut second = catalog_command(&store_dir.path);
    second.arg("seed");
    let report = stdout_json(&run_command(second)?)?;
    assert_eq!(report["products_inserted"], 0);
    assert_eq!(report["products_skipped"], 4);
    Ok(())
}

// CATALOG_SKIP_SEED leaves a fresh store empty.
#[test]
fn cli_skip_seed_from_environment() -> Result<()> {
    let store_dir = temp_store()?;
    let mut cmd = catalog_command(&store_dir.path);
    cmd.env("CATALOG_SKIP_SEED", "1").arg("GET").arg("/categories");
    let categories = stdout_json(&run_command(cmd)?)?;
    assert_eq!(categories, json!([]));
    Ok(())
}
