//! Backend response envelope handling.
//!
//! Some endpoints return the payload bare, others wrap it as
//! `{ data, message, error }`. Decoding is a two-step with an explicit
//! fallback: try the expected shape directly, then try the envelope and take
//! its `data`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::HttpError;

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    error: Option<String>,
}

/// Decode a success body, unwrapping the envelope when present.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, HttpError> {
    let direct_err = match serde_json::from_str::<T>(body) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Ok(Envelope { data: Some(data), .. }) = serde_json::from_str::<Envelope<T>>(body) {
        return Ok(data);
    }

    // Report the direct-decode error; it names the shape the caller wanted.
    Err(HttpError::Decode(direct_err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        name: String,
    }

    #[test]
    fn test_decode_bare_payload() {
        let item: Item = decode(r#"{"id": 1, "name": "deposit"}"#).unwrap();
        assert_eq!(item, Item { id: 1, name: "deposit".to_string() });
    }

    #[test]
    fn test_decode_enveloped_payload() {
        let items: Vec<Item> =
            decode(r#"{"data": [{"id": 2, "name": "release"}], "message": "ok"}"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn test_decode_envelope_without_data_fails_with_direct_error() {
        let err = decode::<Vec<Item>>(r#"{"message": "ok"}"#).unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode::<Item>("<html>").unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)));
    }

    #[test]
    fn test_message_body_decodes_directly() {
        // `{ message }` acknowledgements are the expected shape itself, not
        // an envelope to unwrap.
        #[derive(Deserialize)]
        struct Ack {
            message: String,
        }
        let ack: Ack = decode(r#"{"message": "escrow released"}"#).unwrap();
        assert_eq!(ack.message, "escrow released");
    }
}
