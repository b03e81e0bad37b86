//! Drive a resource panel against a running storefront server.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use serde_json::Value;
use storefront::client::{HttpResourceClient, ResourcePanel, ViewMode};
use storefront::domain::{Document, RecordId};
use tracing_subscriber::{EnvFilter, fmt};

/// `storefront-panel` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "storefront-panel",
    about = "List, search, and edit storefront collections",
    version
)]
struct CliArgs {
    /// Base URL of the storefront server.
    #[arg(long = "base-url", value_name = "url", default_value = "http://localhost:8080")]
    base_url: String,
    /// Collection to operate on: `users`, `products`, or `orders`.
    resource: String,
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Show the first page of the collection.
    List,
    /// Search the collection's string fields.
    Search { query: String },
    /// Create a record from a JSON object.
    Create { record: String },
    /// Replace a record; the JSON object must carry its `id`.
    Update { record: String },
    /// Delete the record with the given id.
    Delete { id: i64 },
}

fn parse_record(raw: &str) -> Result<Document> {
    match serde_json::from_str::<Value>(raw).wrap_err("record is not valid JSON")? {
        Value::Object(record) => Ok(record),
        _ => Err(eyre!("record must be a JSON object")),
    }
}

fn render(panel: &ResourcePanel) -> Result<()> {
    if panel.invalid_input_cue() {
        return Err(eyre!("invalid search input: {:?}", panel.input()));
    }
    if let Some(message) = panel.mutation_error() {
        eprintln!("mutation failed: {message}");
    }
    if panel.has_error() {
        return Err(eyre!("Something went wrong fetching the {:?} view", panel.view()));
    }
    if panel.records().is_empty() {
        match panel.view() {
            ViewMode::List => eprintln!("collection is empty"),
            ViewMode::Search => eprintln!("no records found"),
        }
    }
    for record in panel.records() {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let args = CliArgs::parse();
    let client = HttpResourceClient::for_collection(args.base_url.as_str(), &args.resource)
        .ok_or_else(|| eyre!("unknown resource '{}'", args.resource))?;
    let mut panel = ResourcePanel::new(Arc::new(client), Arc::new(DefaultClock))
        .wrap_err("build resource panel")?;

    match args.action.unwrap_or(Action::List) {
        Action::List => panel.mount().await,
        Action::Search { query } => {
            panel.set_input(query);
            panel.submit_search().await;
        }
        Action::Create { record } => panel.create(parse_record(&record)?).await,
        Action::Update { record } => panel.update(parse_record(&record)?).await,
        Action::Delete { id } => {
            let id = RecordId::new(id).wrap_err("invalid id")?;
            panel.delete(id).await;
        }
    }

    render(&panel)
}
