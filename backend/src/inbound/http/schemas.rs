//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.
//! Response envelopes (`{"result": ...}`) get their own wrappers so each
//! endpoint documents the exact payload it returns.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Error`] as rendered on the wire.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable failure description.
    #[schema(example = "Not found")]
    error: String,
}

/// OpenAPI schema for [`crate::domain::Address`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Address)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AddressSchema {
    #[schema(example = "1 Main St")]
    street: Option<String>,
    #[schema(example = "Springfield")]
    city: Option<String>,
    state: Option<String>,
    zip: Option<i64>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Registered customer with optional balance, languages, and address.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier; ignored on writes.
    #[schema(read_only, example = 1)]
    id: Option<i64>,
    /// Display name, at most 100 characters.
    #[schema(max_length = 100, example = "Ada Lovelace")]
    name: String,
    balance: Option<f64>,
    languages: Option<Vec<String>>,
    address: Option<AddressSchema>,
}

/// OpenAPI schema for [`crate::domain::Product`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Product)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSchema {
    /// Store-assigned identifier; ignored on writes.
    #[schema(read_only, example = 7)]
    id: Option<i64>,
    #[schema(example = "Pen")]
    name: String,
    #[schema(example = 1.5)]
    price: Option<f64>,
    quantity: Option<i64>,
}

/// OpenAPI schema for [`crate::domain::ProductItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductItem)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductItemSchema {
    /// Identifier of the ordered product.
    id: Option<i64>,
    quantity: Option<i64>,
}

/// OpenAPI schema for [`crate::domain::Order`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Order)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrderSchema {
    /// Store-assigned identifier; ignored on writes.
    #[schema(read_only)]
    id: Option<i64>,
    /// Identifier of the ordering user.
    user_id: i64,
    order_total: Option<f64>,
    #[schema(rename = "productItems")]
    product_items: Option<Vec<ProductItemSchema>>,
}

macro_rules! result_envelopes {
    ($($single:ident, $list:ident => $record:ty;)+) => {
        $(
            #[doc = concat!("Envelope carrying one `", stringify!($record), "`.")]
            #[derive(ToSchema)]
            #[expect(
                dead_code,
                reason = "Used only for OpenAPI schema generation via utoipa"
            )]
            pub struct $single {
                result: $record,
            }

            #[doc = concat!("Envelope carrying a list of `", stringify!($record), "`.")]
            #[derive(ToSchema)]
            #[expect(
                dead_code,
                reason = "Used only for OpenAPI schema generation via utoipa"
            )]
            pub struct $list {
                result: Vec<$record>,
            }
        )+
    };
}

result_envelopes! {
    UserResult, UserListResult => UserSchema;
    ProductResult, ProductListResult => ProductSchema;
    OrderResult, OrderListResult => OrderSchema;
}
