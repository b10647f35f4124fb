//! Strict JSON body extractor.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// Largest request body accepted, applied with `DefaultBodyLimit`.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// JSON extractor that turns every decoding failure into a 400 with a
/// client-readable message.
///
/// Unlike `axum::Json` it does not insist on a `Content-Type` header. Pair it
/// with `#[serde(deny_unknown_fields)]` to reject unexpected keys.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// #[serde(deny_unknown_fields)]
/// struct CreateItem {
///     name: String,
/// }
///
/// async fn create(JsonBody(input): JsonBody<CreateItem>) -> String {
///     input.name
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(reject_body)?;

        decode_json(&bytes).map(JsonBody)
    }
}

/// Map a failure to read the raw body into a 400.
pub fn reject_body(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::BadRequest(format!(
            "body must not be larger than {MAX_BODY_BYTES} bytes"
        ))
    } else {
        AppError::BadRequest("unable to read request body".to_string())
    }
}

/// Decode an already-buffered body with the same rules as [`JsonBody`].
///
/// Handlers that must do work before looking at the body (e.g. fetching
/// the record a patch applies to) take `Bytes` and call this afterwards.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("body must not be empty".to_string()));
    }

    serde_json::from_slice(bytes).map_err(|e| AppError::BadRequest(describe(&e)))
}

fn describe(e: &serde_json::Error) -> String {
    match e.classify() {
        Category::Syntax if e.to_string().starts_with("trailing characters") => {
            "body must only contain a single JSON value".to_string()
        }
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {}, column {})",
            e.line(),
            e.column()
        ),
        Category::Eof => "body contains badly-formed JSON".to_string(),
        Category::Data => {
            let msg = e.to_string();
            match msg.strip_prefix("unknown field ") {
                Some(rest) => {
                    let field = rest.split(',').next().unwrap_or(rest);
                    format!("body contains unknown key {field}")
                }
                None => format!("body contains incorrect JSON type: {msg}"),
            }
        }
        Category::Io => "unable to read request body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Payload {
        name: String,
        #[serde(default)]
        mode: Vec<String>,
    }

    async fn extract(body: &'static str) -> Result<Payload, AppError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        JsonBody::<Payload>::from_request(req, &())
            .await
            .map(|JsonBody(p)| p)
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::BadRequest(msg) => msg,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_decodes_valid_body_without_content_type() {
        let payload = extract(r#"{"name":"Buy milk","mode":["home"]}"#)
            .await
            .unwrap();
        assert_eq!(payload.name, "Buy milk");
        assert_eq!(payload.mode, vec!["home".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let msg = message(extract("").await.unwrap_err());
        assert_eq!(msg, "body must not be empty");

        let msg = message(extract("  \n").await.unwrap_err());
        assert_eq!(msg, "body must not be empty");
    }

    #[tokio::test]
    async fn test_unknown_key_is_rejected() {
        let msg = message(
            extract(r#"{"name":"x","priority":3}"#)
                .await
                .unwrap_err(),
        );
        assert_eq!(msg, "body contains unknown key `priority`");
    }

    #[tokio::test]
    async fn test_badly_formed_json_is_rejected() {
        let msg = message(extract(r#"{"name": }"#).await.unwrap_err());
        assert!(msg.starts_with("body contains badly-formed JSON"));

        let msg = message(extract(r#"{"name": "x""#).await.unwrap_err());
        assert_eq!(msg, "body contains badly-formed JSON");
    }

    #[tokio::test]
    async fn test_wrong_type_is_rejected() {
        let msg = message(extract(r#"{"name": 42}"#).await.unwrap_err());
        assert!(msg.starts_with("body contains incorrect JSON type"));
    }

    #[tokio::test]
    async fn test_multiple_values_are_rejected() {
        let msg = message(extract(r#"{"name":"a"}{"name":"b"}"#).await.unwrap_err());
        assert_eq!(msg, "body must only contain a single JSON value");
    }
}
