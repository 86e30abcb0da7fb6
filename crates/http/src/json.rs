//! JSON envelope codec shared by every handler.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use readinglist_kernel::settings::DecodeMode;
use serde::{de::DeserializeOwned, ser::SerializeMap, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Single-key wrapper namespacing a response body, e.g. `{"book": {...}}`.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    key: &'static str,
    value: T,
}

impl<T> Envelope<T> {
    pub fn new(key: &'static str, value: T) -> Self {
        Self { key, value }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

/// Serialize `value` as compact JSON followed by a newline.
///
/// A serialization failure surfaces as `500 Internal Server Error`; nothing
/// is written before the whole body is encoded.
pub fn write_json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Response, AppError> {
    let mut body = serde_json::to_vec(value)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("failed to encode response")))?;
    body.push(b'\n');

    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok(response)
}

/// Decode a request body into `T`.
///
/// In [`DecodeMode::Strict`] a malformed body is rejected with `400`. In
/// [`DecodeMode::Lenient`] the error is logged and decoding is salvaged: top
/// level fields that decode on their own are kept, the rest fall back to
/// `T`'s defaults. A body that is not a JSON object yields `T::default()`.
pub fn read_json<T>(body: &[u8], mode: DecodeMode) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(e) => match mode {
            DecodeMode::Strict => Err(AppError::bad_request(format!(
                "request body is not valid JSON: {e}"
            ))),
            DecodeMode::Lenient => {
                tracing::warn!(
                    error = %e,
                    decode_mode = ?mode,
                    "discarding request body decode error"
                );
                Ok(salvage_fields(body))
            }
        },
    }
}

// Keep every top-level field that `T` accepts in isolation.
fn salvage_fields<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
        return T::default();
    };

    let kept: Map<String, Value> = fields
        .into_iter()
        .filter(|(name, value)| {
            let single = Map::from_iter([(name.clone(), value.clone())]);
            let accepted = serde_json::from_value::<T>(Value::Object(single)).is_ok();
            if !accepted {
                tracing::debug!(field = %name, "dropping undecodable field");
            }
            accepted
        })
        .collect();

    serde_json::from_value(Value::Object(kept)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Input {
        title: Option<String>,
        pages: Option<i32>,
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot encode"))
        }
    }

    #[test]
    fn envelope_wraps_value_under_key() {
        let envelope = Envelope::new("book", serde_json::json!({"id": 3}));
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"book":{"id":3}}"#
        );
    }

    #[tokio::test]
    async fn write_json_appends_newline_and_sets_content_type() {
        let mut data = BTreeMap::new();
        data.insert("status", "available");
        let response = write_json(StatusCode::OK, &data).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"{\"status\":\"available\"}\n");
    }

    #[test]
    fn write_json_failure_is_internal() {
        let err = write_json(StatusCode::OK, &Unencodable).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn read_json_decodes_valid_body_in_both_modes() {
        for mode in [DecodeMode::Strict, DecodeMode::Lenient] {
            let input: Input = read_json(br#"{"title":"Dune"}"#, mode).unwrap();
            assert_eq!(input.title.as_deref(), Some("Dune"));
        }
    }

    #[test]
    fn strict_mode_rejects_malformed_body() {
        let err = read_json::<Input>(b"{not json", DecodeMode::Strict).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lenient_mode_falls_back_to_default() {
        let input: Input = read_json(b"{not json", DecodeMode::Lenient).unwrap();
        assert_eq!(input, Input::default());

        let empty: Input = read_json(b"", DecodeMode::Lenient).unwrap();
        assert_eq!(empty, Input::default());

        let list: Input = read_json(b"[1, 2]", DecodeMode::Lenient).unwrap();
        assert_eq!(list, Input::default());
    }

    #[test]
    fn lenient_mode_keeps_fields_that_decode() {
        let input: Input =
            read_json(br#"{"title":"X","pages":"abc"}"#, DecodeMode::Lenient).unwrap();
        assert_eq!(input.title.as_deref(), Some("X"));
        assert_eq!(input.pages, None);
    }

    #[test]
    fn strict_mode_rejects_mixed_body() {
        let err = read_json::<Input>(br#"{"title":"X","pages":"abc"}"#, DecodeMode::Strict)
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
