use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use wordmatch::{
    catalog::{Catalog, CatalogEntry, CatalogOptions},
    handlers::{catalogs, suggest, ApiErr, Consts, Ctx, MaxQuery},
    manager::Manager,
    policy::{Decision, Outcome},
    suggester::{Alphabet, Strategy},
};

fn entry(name: &str, alt: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        alt_names: vec![alt.to_string()],
        synonyms: vec![],
    }
}

fn ctx() -> Arc<Ctx> {
    let entries = vec![
        entry("Мята", "mint"),
        entry("Шалфей", "sage"),
        entry("Крапива", "nettle"),
        entry("Мандрагора", "mandrake"),
    ];
    let opts = CatalogOptions {
        strategy: Strategy::Index,
        alphabet: Alphabet::CyrillicLatin,
        max_results: Some(2),
        ..Default::default()
    };
    let herbs = Catalog::new("herbs", entries, &opts).unwrap();

    Arc::new(Ctx {
        mgr: Arc::new(Manager::from_catalogs(vec![herbs])),
        consts: Consts { max_results_cap: 3 },
        version: "test".to_string(),
    })
}

fn path(catalog: &str, q: &str) -> Path<(String, String)> {
    Path((catalog.to_string(), q.to_string()))
}

fn expect_err<T>(res: Result<T, ApiErr>) -> ApiErr {
    match res {
        Ok(_) => panic!("expected an error"),
        Err(e) => e,
    }
}

#[tokio::test]
async fn test_get_config() {
    let resp = catalogs::get_config(State(ctx())).await.unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.version, "test");
    assert_eq!(data.max_results_cap, 3);
    assert_eq!(data.catalogs, ["herbs"]);
}

#[tokio::test]
async fn test_get_catalogs() {
    let resp = catalogs::get_catalogs(State(ctx())).await.unwrap();
    let stats = resp.data.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].entries, 4);
    assert_eq!(stats[0].max_results, 2);
}

#[tokio::test]
async fn test_suggest() {
    let resp = suggest::suggest(
        State(ctx()),
        path("herbs", "шалфей"),
        Query(MaxQuery::default()),
    )
    .await
    .unwrap();
    assert_eq!(resp.data.unwrap(), ["Шалфей"]);
}

#[tokio::test]
async fn test_suggest_unknown_catalog() {
    let err = expect_err(
        suggest::suggest(State(ctx()), path("potions", "mint"), Query(MaxQuery::default())).await,
    );
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggest_too_broad() {
    // "а" occurs in every Cyrillic name. The requested 10 is capped to 3.
    let err = expect_err(
        suggest::suggest(State(ctx()), path("herbs", "а"), Query(MaxQuery { max: 10 })).await,
    );
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "query is too broad, please be more specific");
}

#[tokio::test]
async fn test_empty_query() {
    let err = expect_err(
        suggest::lookup(State(ctx()), path("herbs", "  "), Query(MaxQuery::default())).await,
    );
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "query is required");
}

#[tokio::test]
async fn test_lookup_correction() {
    let resp = suggest::lookup(
        State(ctx()),
        path("herbs", "mandrak"),
        Query(MaxQuery::default()),
    )
    .await
    .unwrap();

    assert_eq!(resp.message.as_deref(), Some("interpreting mandrak as mandrake"));
    assert_eq!(
        resp.data.unwrap(),
        Decision::Accepted {
            word: "Мандрагора".to_string(),
            corrected_from: Some("mandrak".to_string()),
            suggestion: Some("mandrake".to_string())
        }
    );
}

#[tokio::test]
async fn test_lookup_serializes_status() {
    let resp = suggest::lookup(State(ctx()), path("herbs", "sage"), Query(MaxQuery::default()))
        .await
        .unwrap();

    let v = serde_json::to_value(&resp).unwrap();
    assert_eq!(v["message"], "found Шалфей");
    assert_eq!(v["data"]["status"], "accepted");
    assert_eq!(v["data"]["word"], "Шалфей");
    assert!(v["data"].get("corrected_from").is_none());
    assert!(v["data"].get("suggestion").is_none());
}

#[tokio::test]
async fn test_resolve() {
    let resp = suggest::resolve(State(ctx()), path("herbs", "2 mint + netle"))
        .await
        .unwrap();
    let r = resp.data.unwrap();

    assert!(r.complete);
    assert_eq!(r.disclosure.as_deref(), Some("interpreting netle as nettle"));
    assert_eq!(r.items[0].coefficient, 2);
    assert_eq!(
        r.items[0].outcome,
        Outcome::Found {
            word: "Мята".to_string()
        }
    );
    assert_eq!(
        r.items[1].outcome,
        Outcome::Corrected {
            word: "Крапива".to_string(),
            suggestion: "nettle".to_string()
        }
    );
}
