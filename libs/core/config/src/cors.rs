use crate::{ConfigError, Environment, FromEnv};

/// Cross-origin policy for browser clients.
///
/// An empty origin list means "allow any origin", which is only accepted in
/// development (see [`CorsConfig::require_explicit_origins`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Allow any origin
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    /// Production deployments must name their origins.
    pub fn require_explicit_origins(self, environment: &Environment) -> Result<Self, ConfigError> {
        if environment.is_production() && self.is_permissive() {
            return Err(ConfigError::MissingEnvVar("CORS_ALLOWED_ORIGIN".to_string()));
        }
        Ok(self)
    }

    fn parse(raw: &str) -> Self {
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty()),
        )
    }
}

impl FromEnv for CorsConfig {
    /// Reads the comma-separated `CORS_ALLOWED_ORIGIN` list (optional)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(std::env::var("CORS_ALLOWED_ORIGIN")
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default())
    }
}
