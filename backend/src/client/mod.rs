//! Client side of the storefront: an HTTP resource client and the resource
//! panel state machine driven through it.
//!
//! The panel only depends on the [`ResourceApi`] port, so tests drive it with
//! mocks while the `storefront-panel` binary uses [`HttpResourceClient`].

pub mod api;
pub mod panel;
pub mod validation;

pub use api::{HttpResourceClient, ResourceApi, ResourceApiError};
pub use panel::{INVALID_CUE_DURATION, PAGE_SIZE, ResourcePanel, ViewMode};
pub use validation::{SEARCH_INPUT_PATTERN, SearchInputRule};
