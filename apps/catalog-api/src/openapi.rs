//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product and category management API",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/categories", api = domain_catalog::handlers::categories::ApiDoc),
        (path = "/api/products", api = domain_catalog::handlers::products::ApiDoc)
    ),
    tags(
        (name = "Categories", description = "Category management endpoints"),
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;
