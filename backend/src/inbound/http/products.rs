//! Product endpoints under `/api/products` and `/api/product/{id}`.

super::endpoints::resource_endpoints! {
    resource: Product,
    tag: "products",
    collection_path: "/api/products",
    search_path: "/api/products/search",
    schema_path: "/api/products/schema",
    item_path: "/api/product/{id}",
    single: ProductResult,
    list: ProductListResult,
}
