//! OpenAPI documentation configuration

use utoipa::OpenApi;
use utoipa::openapi::server::Server;

use crate::config::Config;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "1.0.0",
        description = "API for managing the product catalog",
        license(name = "MIT")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Base URL advertised in the docs: `https://PUBLIC_HOST` in production,
/// otherwise `http://localhost:PORT`
pub fn server_url(config: &Config) -> String {
    match (&config.public_host, config.environment.use_https()) {
        (Some(host), true) => format!("https://{}", host),
        _ => format!("http://localhost:{}", config.server.port),
    }
}

/// The API document with the server entry for the current environment
pub fn openapi(config: &Config) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let description = if config.environment.is_production() {
        "Production server"
    } else {
        "Local development server"
    };

    let mut server = Server::new(server_url(config));
    server.description = Some(description.to_string());
    doc.servers = Some(vec![server]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;
    use core_config::Environment;

    #[test]
    fn test_development_server_url() {
        let config = test_config();
        assert_eq!(server_url(&config), "http://localhost:5000");
    }

    #[test]
    fn test_production_server_url() {
        let mut config = test_config();
        config.environment = Environment::Production;
        config.public_host = Some("api.example.com".to_string());
        assert_eq!(server_url(&config), "https://api.example.com");
    }

    #[test]
    fn test_production_without_public_host_falls_back() {
        let mut config = test_config();
        config.environment = Environment::Production;
        assert_eq!(server_url(&config), "http://localhost:5000");
    }

    #[test]
    fn test_document_lists_product_paths() {
        let doc = openapi(&test_config());
        assert!(doc.paths.paths.contains_key("/api/products"));
        assert!(doc.paths.paths.contains_key("/api/products/{id}"));

        let servers = doc.servers.unwrap();
        assert_eq!(servers[0].url, "http://localhost:5000");
    }
}
