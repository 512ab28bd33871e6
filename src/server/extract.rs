//! Body extractor that tolerates a missing or `null` JSON body.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

const DESERIALIZE_FAILED: &str = "Failed to deserialize the JSON body into the target type";

/// JSON object body that may be absent.
///
/// An empty (or whitespace-only) body and a literal `null` both extract as
/// `None`. Any other body must be a JSON object; arrays and scalars are
/// rejected rather than bound to struct fields by position. Every parse or
/// type failure is a 400 carrying axum's rejection text. The
/// `Content-Type` header is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalJson<T>(pub Option<T>);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        let Json(value) = Json::<Value>::from_bytes(&bytes)
            .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()).into_response())?;

        parse_object(value)
            .map(Self)
            .map_err(IntoResponse::into_response)
    }
}

/// Bind a parsed body to `T`, accepting only `null` or an object.
fn parse_object<T: DeserializeOwned>(value: Value) -> Result<Option<T>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::InvalidBody(format!("{}: {}", DESERIALIZE_FAILED, e))),
        _ => Err(ApiError::InvalidBody(format!(
            "{}: expected a JSON object",
            DESERIALIZE_FAILED
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        value: u32,
    }

    async fn extract(body: &'static str) -> Result<OptionalJson<Probe>, Response> {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        OptionalJson::<Probe>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_empty_body_is_none() {
        assert_eq!(extract("").await.unwrap(), OptionalJson(None));
        assert_eq!(extract(" \n").await.unwrap(), OptionalJson(None));
    }

    #[tokio::test]
    async fn test_null_body_is_none() {
        assert_eq!(extract("null").await.unwrap(), OptionalJson(None));
    }

    #[tokio::test]
    async fn test_object_body_is_parsed() {
        assert_eq!(
            extract(r#"{"value": 3}"#).await.unwrap(),
            OptionalJson(Some(Probe { value: 3 }))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let rejection = extract("{not json").await.unwrap_err();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_bad_request() {
        for body in [r#"{"value": "three"}"#, r#"{"value": 5000000000}"#] {
            let rejection = extract(body).await.unwrap_err();
            assert_eq!(rejection.status(), StatusCode::BAD_REQUEST, "body: {body}");

            let text = axum::body::to_bytes(rejection.into_body(), 1024)
                .await
                .unwrap();
            assert!(String::from_utf8_lossy(&text).starts_with(DESERIALIZE_FAILED));
        }
    }

    #[tokio::test]
    async fn test_non_object_bodies_are_rejected() {
        for body in ["[3]", "[]", "3", r#""value""#, "true"] {
            let rejection = extract(body).await.unwrap_err();
            assert_eq!(rejection.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }
    }
}
