use axum_helpers::{AppError, JsonBodyRejection};
use strum::{Display, EnumString};
use thiserror::Error;
use validator::ValidationErrors;

/// Validation messages are reported in this field order
const VALIDATED_FIELDS: [&str; 3] = ["name", "price", "available"];

const VALIDATION_PREFIX: &str = "Product validation failed";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    /// Full client-facing message, e.g. `Product validation failed: price: El precio no puede ser negativo`
    #[error("{0}")]
    Validation(String),

    #[error("Product not found")]
    NotFound,

    /// The raw path segment that is not an ObjectId
    #[error(
        "Cast to ObjectId failed for value \"{0}\" (type string) at path \"_id\" for model \"Product\""
    )]
    InvalidId(String),

    #[error("{0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Render validator errors as `Product validation failed: field: message, ...`
pub fn validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    let parts: Vec<String> = VALIDATED_FIELDS
        .iter()
        .filter_map(|field| field_errors.get(*field).map(|errs| (field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();

    if parts.is_empty() {
        VALIDATION_PREFIX.to_string()
    } else {
        format!("{}: {}", VALIDATION_PREFIX, parts.join(", "))
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<JsonBodyRejection> for ProductError {
    fn from(rejection: JsonBodyRejection) -> Self {
        ProductError::Validation(format!("{}: {}", VALIDATION_PREFIX, rejection))
    }
}

/// The product operation that failed, used to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

/// How [`ProductError`]s are mapped onto HTTP status codes
///
/// Set with `ERROR_STATUS_POLICY=compatible|normalized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ErrorPolicy {
    /// 409 for every create failure, 404 for every other failure
    #[default]
    Compatible,
    /// Status follows the error kind: 400 / 404 / 503
    Normalized,
}

impl ErrorPolicy {
    pub fn to_app_error(self, operation: Operation, err: ProductError) -> AppError {
        let message = err.to_string();

        match self {
            ErrorPolicy::Compatible => match operation {
                Operation::Create => AppError::Conflict(message),
                _ => AppError::NotFound(message),
            },
            ErrorPolicy::Normalized => match err {
                ProductError::Validation(_) | ProductError::InvalidId(_) => {
                    AppError::BadRequest(message)
                }
                ProductError::NotFound => AppError::NotFound(message),
                ProductError::Database(_) => AppError::ServiceUnavailable(message),
            },
        }
    }
}
