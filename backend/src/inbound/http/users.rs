//! User endpoints under `/api/users` and `/api/user/{id}`.

super::endpoints::resource_endpoints! {
    resource: User,
    tag: "users",
    collection_path: "/api/users",
    search_path: "/api/users/search",
    schema_path: "/api/users/schema",
    item_path: "/api/user/{id}",
    single: UserResult,
    list: UserListResult,
}
