//! Order endpoints under `/api/orders` and `/api/order/{id}`.

super::endpoints::resource_endpoints! {
    resource: Order,
    tag: "orders",
    collection_path: "/api/orders",
    search_path: "/api/orders/search",
    schema_path: "/api/orders/schema",
    item_path: "/api/order/{id}",
    single: OrderResult,
    list: OrderListResult,
}
