//! Integration tests for `DieselDocumentStore` against embedded PostgreSQL.
//!
//! Each test boots its own cluster, applies the embedded migrations, and
//! talks to the store through the `DocumentStore` port. Set
//! `SKIP_TEST_CLUSTER=1` to skip when PostgreSQL cannot be started.

use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use storefront::domain::ports::{DeleteStatus, DocumentStore, DocumentStoreError, FindOptions};
use storefront::domain::{Document, RecordId, SearchQuery, all_schemas};
use storefront::outbound::persistence::{
    DbPool, DieselDocumentStore, PoolConfig, run_pending_migrations,
};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use pg_embed::test_cluster;
use support::{document, handle_cluster_setup_failure};

struct StoreContext {
    runtime: Runtime,
    pool: DbPool,
    store: DieselDocumentStore,
    _cluster: TestCluster,
}

impl StoreContext {
    fn store_for(&self, branch: &str) -> DieselDocumentStore {
        let store = DieselDocumentStore::new(self.pool.clone(), branch);
        self.runtime
            .block_on(store.register_schemas(&all_schemas()))
            .expect("register schemas");
        store
    }

    fn create(&self, collection: &str, body: Value) -> Document {
        self.runtime
            .block_on(self.store.insert_one(collection, document(body)))
            .expect("insert document")
    }
}

fn setup_context() -> Result<StoreContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = cluster.connection().database_url("postgres");
    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    let store = DieselDocumentStore::new(pool.clone(), "main");
    runtime
        .block_on(store.register_schemas(&all_schemas()))
        .map_err(|err| err.to_string())?;

    Ok(StoreContext {
        runtime,
        pool,
        store,
        _cluster: cluster,
    })
}

#[fixture]
fn store_context() -> Option<StoreContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn id(raw: i64) -> RecordId {
    RecordId::new(raw).expect("positive id")
}

fn id_of(document: &Document) -> i64 {
    document
        .get("id")
        .and_then(Value::as_i64)
        .expect("stored documents carry an id")
}

#[rstest]
fn inserted_documents_read_back_with_their_id(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: inserted_documents_read_back_with_their_id skipped");
        return;
    };

    let first = ctx.create("products", json!({ "id": 99, "name": "Pen", "price": 1.5 }));
    let second = ctx.create("products", json!({ "name": "Ink" }));
    assert!(id_of(&second) > id_of(&first));
    assert_ne!(id_of(&first), 99, "client ids are ignored on insert");

    let fetched = ctx
        .runtime
        .block_on(ctx.store.find_one("products", id(id_of(&first))))
        .expect("find document");
    assert_eq!(fetched, Some(first));
}

#[rstest]
fn listing_is_ordered_and_paginated(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: listing_is_ordered_and_paginated skipped");
        return;
    };
    let created: Vec<Document> = ["A", "B", "C"]
        .into_iter()
        .map(|name| ctx.create("products", json!({ "name": name })))
        .collect();

    let page = ctx
        .runtime
        .block_on(ctx.store.find_many(
            "products",
            FindOptions {
                limit: Some(2),
                offset: Some(1),
            },
        ))
        .expect("list documents");
    assert_eq!(page, created.get(1..).expect("three documents").to_vec());
}

#[rstest]
fn replace_overwrites_and_creates(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: replace_overwrites_and_creates skipped");
        return;
    };
    let pen = ctx.create("products", json!({ "name": "Pen", "price": 1.5 }));

    let replaced = ctx
        .runtime
        .block_on(ctx.store.insert_or_replace_one(
            "products",
            id(id_of(&pen)),
            document(json!({ "name": "Pencil" })),
        ))
        .expect("replace document");
    assert_eq!(replaced, document(json!({ "id": id_of(&pen), "name": "Pencil" })));

    let created = ctx
        .runtime
        .block_on(ctx.store.insert_or_replace_one(
            "products",
            id(500),
            document(json!({ "name": "Nib" })),
        ))
        .expect("create document");
    assert_eq!(id_of(&created), 500);

    let next = ctx.create("products", json!({ "name": "Blotter" }));
    assert!(id_of(&next) > 500, "sequence should move past explicit ids");
}

#[rstest]
fn upserts_racing_inserts_never_collide(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: upserts_racing_inserts_never_collide skipped");
        return;
    };
    let seed = ctx.create("products", json!({ "name": "Pen" }));
    let next = id_of(&seed) + 1;

    let (upserted, inserted) = ctx.runtime.block_on(async {
        let upsert = ctx.store.insert_or_replace_one(
            "products",
            id(next),
            document(json!({ "name": "Nib" })),
        );
        let inserts = futures_util::future::join_all(
            ["Ink", "Blotter", "Quill"]
                .map(|name| ctx.store.insert_one("products", document(json!({ "name": name })))),
        );
        futures_util::join!(upsert, inserts)
    });

    let upserted = upserted.expect("upsert document");
    assert_eq!(id_of(&upserted), next);
    for result in inserted {
        result.expect("inserts never trip over the upserted id");
    }
    let after = ctx.create("products", json!({ "name": "Sand" }));
    assert!(id_of(&after) > next);
}

#[rstest]
fn delete_reports_whether_a_document_was_removed(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_reports_whether_a_document_was_removed skipped");
        return;
    };
    let pen = ctx.create("products", json!({ "name": "Pen" }));
    let pen_id = id(id_of(&pen));

    let first = ctx
        .runtime
        .block_on(ctx.store.delete_one("products", pen_id))
        .expect("delete document");
    let second = ctx
        .runtime
        .block_on(ctx.store.delete_one("products", pen_id))
        .expect("delete document");
    assert_eq!(first, DeleteStatus::Deleted);
    assert_eq!(second, DeleteStatus::NotFound);
}

#[rstest]
fn search_matches_whole_words(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: search_matches_whole_words skipped");
        return;
    };
    for name in ["Blue pen", "Red pen", "Stapler"] {
        ctx.create("products", json!({ "name": name }));
    }
    let search = |raw: &str| {
        let query = SearchQuery::parse(Some(raw.to_owned())).expect("valid query");
        let hits = ctx
            .runtime
            .block_on(ctx.store.search("products", &query))
            .expect("search documents");
        hits.iter()
            .filter_map(|hit| hit.get("name").and_then(Value::as_str).map(str::to_owned))
            .collect::<Vec<_>>()
    };

    assert_eq!(search("pen"), vec!["Blue pen", "Red pen"]);
    assert_eq!(search("blue pen"), vec!["Blue pen"]);
    assert!(search("eraser").is_empty());
}

#[rstest]
fn branches_do_not_share_documents(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: branches_do_not_share_documents skipped");
        return;
    };
    ctx.create("products", json!({ "name": "Pen" }));
    let feature = ctx.store_for("feature");

    let on_feature = ctx
        .runtime
        .block_on(feature.find_many("products", FindOptions::default()))
        .expect("list documents");
    assert!(on_feature.is_empty());
}

#[rstest]
fn schema_violations_and_unknown_collections_are_rejected(store_context: Option<StoreContext>) {
    let Some(ctx) = store_context else {
        eprintln!("SKIP-TEST-CLUSTER: schema_violations_and_unknown_collections_are_rejected skipped");
        return;
    };

    let missing_name = ctx
        .runtime
        .block_on(ctx.store.insert_one("products", document(json!({ "price": 2.0 }))));
    assert!(matches!(
        missing_name,
        Err(DocumentStoreError::Validation { .. })
    ));

    let unknown = ctx
        .runtime
        .block_on(ctx.store.find_many("widgets", FindOptions::default()));
    assert!(matches!(
        unknown,
        Err(DocumentStoreError::UnknownCollection { .. })
    ));
}
