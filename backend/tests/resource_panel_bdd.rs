//! Behavioural tests for the resource panel against a live storefront.
//!
//! The panel talks to the server through [`HttpResourceClient`]; time is
//! driven by a [`MutableClock`] so the invalid-input cue can be observed
//! expiring.

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use std::cell::RefCell;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use storefront::client::{
    HttpResourceClient, INVALID_CUE_DURATION, ResourceApi, ResourcePanel, ViewMode,
};
use storefront::domain::{Product, RecordId};
use storefront::test_support::MutableClock;
use support::document;
use support::server::StorefrontServer;

struct PanelWorld {
    server: StorefrontServer,
    clock: Arc<MutableClock>,
    panel: RefCell<Option<ResourcePanel>>,
}

impl PanelWorld {
    fn client(&self) -> HttpResourceClient {
        HttpResourceClient::for_resource::<Product>(self.server.base_url())
    }

    fn seed(&self, names: &[&str]) {
        let client = self.client();
        self.server.block_on(async {
            for name in names {
                client
                    .create(document(json!({ "name": name })))
                    .await
                    .expect("seed product");
            }
        });
    }

    /// Run `action` against the mounted panel inside the server's runtime.
    fn with_panel<T>(&self, action: impl AsyncFnOnce(&mut ResourcePanel) -> T) -> T {
        let mut slot = self.panel.borrow_mut();
        let panel = slot.as_mut().expect("panel should be mounted");
        self.server.block_on(action(panel))
    }

    fn inspect<T>(&self, read: impl FnOnce(&ResourcePanel) -> T) -> T {
        let slot = self.panel.borrow();
        read(slot.as_ref().expect("panel should be mounted"))
    }
}

#[fixture]
fn world() -> PanelWorld {
    let start = Utc
        .with_ymd_and_hms(2026, 1, 12, 9, 0, 0)
        .single()
        .expect("valid start time");
    PanelWorld {
        server: StorefrontServer::with_memory_store().expect("start storefront"),
        clock: Arc::new(MutableClock::new(start)),
        panel: RefCell::new(None),
    }
}

#[given("a storefront with {count} products")]
fn a_storefront_with_products(world: &PanelWorld, count: String) {
    let count: usize = count.parse().expect("numeric count");
    let names: Vec<String> = (1..=count).map(|n| format!("Product {n}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    world.seed(&names);
}

#[given("a storefront selling pens and a stapler")]
fn a_storefront_selling_pens_and_a_stapler(world: &PanelWorld) {
    world.seed(&["Blue pen", "Red pen", "Stapler"]);
}

#[when("the panel is mounted")]
fn the_panel_is_mounted(world: &PanelWorld) {
    let mut panel = ResourcePanel::new(Arc::new(world.client()), world.clock.clone())
        .expect("search rule compiles");
    world.server.block_on(panel.mount());
    world.panel.replace(Some(panel));
}

#[when("the user searches for {query}")]
fn the_user_searches_for(world: &PanelWorld, query: String) {
    let accepted = world.with_panel(async |panel| {
        panel.set_input(query);
        panel.submit_search().await
    });
    assert!(accepted, "search input should be accepted");
}

#[when("the user submits a blank search")]
fn the_user_submits_a_blank_search(world: &PanelWorld) {
    let accepted = world.with_panel(async |panel| {
        panel.set_input(" ");
        panel.submit_search().await
    });
    assert!(!accepted, "blank input should be rejected");
}

#[when("the cue duration elapses")]
fn the_cue_duration_elapses(world: &PanelWorld) {
    world.clock.advance(INVALID_CUE_DURATION);
}

#[when("the user returns to the list")]
fn the_user_returns_to_the_list(world: &PanelWorld) {
    world.with_panel(async |panel| panel.back_to_list().await);
}

#[when("the user creates a product named {name}")]
fn the_user_creates_a_product_named(world: &PanelWorld, name: String) {
    world.with_panel(async |panel| panel.create(document(json!({ "name": name }))).await);
}

#[when("the user renames record {id} to {name}")]
fn the_user_renames_record(world: &PanelWorld, id: String, name: String) {
    let id: i64 = id.parse().expect("numeric id");
    world.with_panel(async |panel| {
        panel
            .update(document(json!({ "id": id, "name": name })))
            .await;
    });
}

#[when("the user deletes record {id}")]
fn the_user_deletes_record(world: &PanelWorld, id: String) {
    let id = id
        .parse::<i64>()
        .ok()
        .and_then(|raw| RecordId::new(raw).ok())
        .expect("positive id");
    world.with_panel(async |panel| panel.delete(id).await);
}

#[then("the panel is in list mode")]
fn the_panel_is_in_list_mode(world: &PanelWorld) {
    assert_eq!(world.inspect(ResourcePanel::view), ViewMode::List);
}

#[then("the panel is in search mode")]
fn the_panel_is_in_search_mode(world: &PanelWorld) {
    assert_eq!(world.inspect(ResourcePanel::view), ViewMode::Search);
}

#[then("the panel shows {count} records")]
fn the_panel_shows_records(world: &PanelWorld, count: String) {
    let expected: usize = count.parse().expect("numeric count");
    let (shown, loading, failed) = world.inspect(|panel| {
        (panel.records().len(), panel.is_loading(), panel.has_error())
    });
    assert!(!loading, "panel should have settled");
    assert!(!failed, "panel should not report a fetch error");
    assert_eq!(shown, expected);
}

#[then("the invalid input cue is raised")]
fn the_invalid_input_cue_is_raised(world: &PanelWorld) {
    assert!(world.inspect(ResourcePanel::invalid_input_cue));
}

#[then("the invalid input cue is cleared")]
fn the_invalid_input_cue_is_cleared(world: &PanelWorld) {
    assert!(!world.inspect(ResourcePanel::invalid_input_cue));
}

#[then("the search input is empty")]
fn the_search_input_is_empty(world: &PanelWorld) {
    assert_eq!(world.inspect(|panel| panel.input().to_owned()), "");
}

#[then("no mutation error is reported")]
fn no_mutation_error_is_reported(world: &PanelWorld) {
    assert_eq!(
        world.inspect(|panel| panel.mutation_error().map(str::to_owned)),
        None
    );
}

#[then("the mutation error mentions {text}")]
fn the_mutation_error_mentions(world: &PanelWorld, text: String) {
    let message = world
        .inspect(|panel| panel.mutation_error().map(str::to_owned))
        .expect("mutation error");
    assert!(message.contains(&text), "unexpected mutation error {message}");
}

#[scenario(
    path = "tests/features/resource_panel.feature",
    name = "Mounting shows the first page"
)]
fn mounting_shows_the_first_page(world: PanelWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/resource_panel.feature",
    name = "Searching narrows the records"
)]
fn searching_narrows_the_records(world: PanelWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/resource_panel.feature",
    name = "Rejected input raises a short-lived cue"
)]
fn rejected_input_raises_a_short_lived_cue(world: PanelWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/resource_panel.feature",
    name = "Returning to the list clears the search"
)]
fn returning_to_the_list_clears_the_search(world: PanelWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/resource_panel.feature",
    name = "Creating a record refreshes the list"
)]
fn creating_a_record_refreshes_the_list(world: PanelWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/resource_panel.feature",
    name = "Updating in search mode keeps the search results current"
)]
fn updating_in_search_mode_keeps_the_search_results_current(world: PanelWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/resource_panel.feature",
    name = "Failed deletes are reported"
)]
fn failed_deletes_are_reported(world: PanelWorld) {
    drop(world);
}
