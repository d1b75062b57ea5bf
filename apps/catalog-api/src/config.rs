//! Configuration for the Catalog API

use core_config::{
    AppInfo, FromEnv, app_info, cors::CorsConfig, env_parse_or, server::ServerConfig,
};
use database::mongodb::MongoConfig;
use domain_products::ErrorPolicy;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
    /// Public host name used for the docs server URL in production
    pub public_host: Option<String>,
    pub error_policy: ErrorPolicy,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let cors = CorsConfig::from_env()?.require_explicit_origins(&environment)?;
        let error_policy = env_parse_or("ERROR_STATUS_POLICY", ErrorPolicy::default())?;

        let public_host = std::env::var("PUBLIC_HOST")
            .ok()
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty());

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            cors,
            environment,
            public_host,
            error_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 8] = [
        "APP_ENV",
        "MONGODB_URI",
        "MONGODB_URL",
        "MONGO_URL",
        "PORT",
        "CORS_ALLOWED_ORIGIN",
        "PUBLIC_HOST",
        "ERROR_STATUS_POLICY",
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let mut all: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|k| (*k, None)).collect();
        for &(key, value) in vars {
            all.retain(|(k, _)| *k != key);
            all.push((key, Some(value)));
        }
        temp_env::with_vars(all, f);
    }

    #[test]
    fn test_defaults() {
        with_env(&[("MONGODB_URI", "mongodb://localhost:27017/shop")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.server.port, 5000);
            assert_eq!(config.environment, Environment::Development);
            assert!(config.cors.is_permissive());
            assert_eq!(config.error_policy, ErrorPolicy::Compatible);
            assert_eq!(config.public_host, None);
            assert_eq!(config.app.name, "catalog_api");
        });
    }

    #[test]
    fn test_missing_mongodb_uri_fails() {
        with_env(&[], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_URI"));
        });
    }

    #[test]
    fn test_invalid_port_fails() {
        with_env(
            &[("MONGODB_URI", "mongodb://localhost"), ("PORT", "http")],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("PORT"));
            },
        );
    }

    #[test]
    fn test_production_requires_cors_origins() {
        with_env(
            &[
                ("MONGODB_URI", "mongodb://localhost"),
                ("APP_ENV", "production"),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
            },
        );
    }

    #[test]
    fn test_production_settings() {
        with_env(
            &[
                ("MONGODB_URI", "mongodb://localhost"),
                ("APP_ENV", "production"),
                ("CORS_ALLOWED_ORIGIN", "https://shop.example.com"),
                ("PUBLIC_HOST", " api.example.com "),
                ("ERROR_STATUS_POLICY", "normalized"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.environment.is_production());
                assert_eq!(config.cors.allowed_origins, ["https://shop.example.com"]);
                assert_eq!(config.public_host.as_deref(), Some("api.example.com"));
                assert_eq!(config.error_policy, ErrorPolicy::Normalized);
            },
        );
    }

    #[test]
    fn test_unknown_error_policy_fails() {
        with_env(
            &[
                ("MONGODB_URI", "mongodb://localhost"),
                ("ERROR_STATUS_POLICY", "strict"),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("ERROR_STATUS_POLICY"));
            },
        );
    }
}
