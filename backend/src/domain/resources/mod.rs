//! Concrete resources served by the storefront.

mod order;
mod product;
mod user;

pub use order::{Order, ProductItem};
pub use product::Product;
pub use user::{Address, User};

use super::resource::Resource;
use super::schema::CollectionSchema;

/// Schemas for every collection the service registers at start-up.
#[must_use]
pub fn all_schemas() -> Vec<CollectionSchema> {
    vec![User::schema(), Product::schema(), Order::schema()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_match_collections() {
        let names: Vec<String> = all_schemas()
            .iter()
            .map(|schema| schema.name().to_owned())
            .collect();
        assert_eq!(names, vec!["users", "products", "orders"]);
    }
}
