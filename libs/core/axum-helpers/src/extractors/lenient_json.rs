//! JSON extractor that treats a missing body as an empty object.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// JSON body extractor that falls back to `T::default()`.
///
/// Unlike `axum::Json`, a request whose `Content-Type` is not JSON, or whose
/// body is empty, is not rejected: the body is left unparsed and the handler
/// receives `T::default()`. Field-level checks then report what is missing.
/// Only a JSON body that fails to deserialize is rejected.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::{JsonBodyRejection, LenientJson};
///
/// async fn create(payload: Result<LenientJson<CreateProduct>, JsonBodyRejection>) {
///     let LenientJson(input) = payload?;
/// }
/// ```
pub struct LenientJson<T>(pub T);

/// Why a JSON body could not be read.
#[derive(Debug, Error)]
pub enum JsonBodyRejection {
    #[error("Failed to buffer the request body: {0}")]
    Body(String),

    #[error("Failed to parse the request body as JSON: {0}")]
    Syntax(#[from] serde_json::Error),
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        AppError::BadRequest(self.to_string()).into_response()
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(T::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonBodyRejection::Body(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        Ok(Self(serde_json::from_slice(&bytes)?))
    }
}
