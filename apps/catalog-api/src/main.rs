//! Catalog API - product catalog REST server

use axum_helpers::server::{SWAGGER_UI_PATH, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{connect_from_config, resolve_database};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Used when neither `MONGODB_DATABASE` nor the connection string names one
const DEFAULT_DATABASE: &str = "catalog";

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let mongo_client = connect_from_config(&config.mongodb).await?;
    let db = resolve_database(&mongo_client, &config.mongodb, DEFAULT_DATABASE);
    info!(database = db.name(), "MongoDB connected");

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    let app = create_router(
        api::routes(&state),
        api::public_routes(&state),
        openapi::openapi(&state.config),
        &state.config.cors,
    )?;

    info!(
        policy = %config.error_policy,
        "Swagger docs available at {}{}",
        openapi::server_url(&config),
        SWAGGER_UI_PATH
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}

#[cfg(test)]
mod test_support {
    use core_config::{AppInfo, Environment, cors::CorsConfig, server::ServerConfig};
    use database::mongodb::{Client, MongoConfig};
    use domain_products::ErrorPolicy;

    use crate::config::Config;
    use crate::state::AppState;

    /// Nothing listens on port 1, so every operation fails fast
    const UNREACHABLE_URI: &str = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";

    pub fn test_config() -> Config {
        Config {
            app: AppInfo {
                name: "catalog_api",
                version: "0.0.0-test",
            },
            mongodb: MongoConfig::new(UNREACHABLE_URI),
            server: ServerConfig::default(),
            cors: CorsConfig::permissive(),
            environment: Environment::Development,
            public_host: None,
            error_policy: ErrorPolicy::default(),
        }
    }

    pub async fn unreachable_state() -> AppState {
        let mongo_client = Client::with_uri_str(UNREACHABLE_URI).await.unwrap();
        let db = mongo_client.database("catalog_test");
        AppState {
            config: test_config(),
            mongo_client,
            db,
        }
    }
}
