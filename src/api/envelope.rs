//! The response envelope common to every Bot API endpoint.
//!
//! Every response arrives wrapped as `{ok, result, description, error_code}`.
//! Decoding collapses the wrapper into the crate's `Result` vocabulary:
//! `ok == true` with a present `result` yields the typed payload, anything
//! else yields [`Error::Api`]; a body that does not parse yields
//! [`Error::Decode`].

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiResult, Error};

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Parses a raw response body into an envelope.
    pub(crate) fn decode(raw: &[u8]) -> ApiResult<Envelope<T>> {
        serde_json::from_slice(raw).map_err(Error::decode)
    }

    /// Unwraps the envelope into the typed payload or an API error.
    pub(crate) fn into_result(self) -> ApiResult<T> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(Error::Api {
                description: self.description,
                code: self.error_code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_with_result() {
        let raw = br#"{"ok":true,"result":[1,2,3]}"#;
        let values: Vec<i64> = Envelope::decode(raw).unwrap().into_result().unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_ok_false_yields_api_error() {
        let raw = br#"{"ok":false,"description":"Unauthorized","error_code":401}"#;
        let err = Envelope::<Vec<i64>>::decode(raw)
            .unwrap()
            .into_result()
            .unwrap_err();
        match err {
            Error::Api { description, code } => {
                assert_eq!(description.as_deref(), Some("Unauthorized"));
                assert_eq!(code, Some(401));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_true_without_result_is_api_error() {
        let raw = br#"{"ok":true}"#;
        let err = Envelope::<Vec<i64>>::decode(raw)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.as_label(), "api_error");
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        let err = Envelope::<Vec<i64>>::decode(b"<html>nope</html>").unwrap_err();
        assert_eq!(err.as_label(), "decode_error");
    }

    #[test]
    fn test_result_that_mismatches_payload_type_is_decode_error() {
        let raw = br#"{"ok":true,"result":"not-a-list"}"#;
        let err = Envelope::<Vec<i64>>::decode(raw).unwrap_err();
        assert_eq!(err.as_label(), "decode_error");
    }
}
