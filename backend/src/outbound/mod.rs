//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process document store for local runs and tests
//! - **persistence**: PostgreSQL-backed document store using Diesel
//!
//! Adapters translate between domain documents and storage representations.
//! They contain no business logic beyond schema enforcement.

pub mod memory;
pub mod persistence;
