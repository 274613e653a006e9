//! Success envelope and response classification.

use crate::error::{Error, Result};
use crate::http::TransportResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decoded body of a successful call.
///
/// The API answers JSON nearly everywhere but falls back to plain text on
/// a few endpoints, so the envelope keeps whichever shape arrived instead
/// of guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body parsed as JSON.
    Json(Value),

    /// Raw text, kept verbatim when the body is empty or not valid JSON.
    Text(String),
}

/// Uniform success result: decoded body plus HTTP status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    body: ResponseBody,
    status_code: u16,
}

impl ApiResponse {
    /// Classify a transport response.
    ///
    /// Only 200 is success; 201/204 and friends classify as
    /// [`Error::GenericHttp`] under current policy.
    pub(crate) fn from_transport(response: TransportResponse) -> Result<Self> {
        let text = response.text();
        if response.status != 200 {
            return Err(Error::from_response(response.status, &text));
        }

        let body = if text.is_empty() {
            ResponseBody::Text(text)
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(text),
            }
        };

        Ok(Self {
            body,
            status_code: 200,
        })
    }

    /// HTTP status code of the response.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Decoded body.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// JSON body, if the payload decoded as JSON.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Raw text body, if the payload did not decode as JSON.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    /// Deserialize the body into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value.clone())?),
            ResponseBody::Text(text) => Ok(serde_json::from_str(text)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HeaderMap;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn transport_response(status: u16, body: &str) -> TransportResponse {
        TransportResponse::new(status, HeaderMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_200_json_body_decodes() {
        let envelope =
            ApiResponse::from_transport(transport_response(200, r#"{"id":"<msg@x>"}"#)).unwrap();

        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.json(), Some(&json!({"id": "<msg@x>"})));
    }

    #[test]
    fn test_200_non_json_body_stays_raw() {
        let envelope = ApiResponse::from_transport(transport_response(200, "plain text")).unwrap();

        assert_eq!(envelope.body(), &ResponseBody::Text("plain text".to_string()));
        assert_eq!(envelope.json(), None);
    }

    #[test]
    fn test_200_empty_body_is_empty_text() {
        let envelope = ApiResponse::from_transport(transport_response(200, "")).unwrap();
        assert_eq!(envelope.text(), Some(""));
    }

    #[test]
    fn test_json_round_trip_is_semantically_equivalent() {
        let original = r#"{"items": [1, 2, 3], "paging": {"next": null}}"#;
        let envelope = ApiResponse::from_transport(transport_response(200, original)).unwrap();

        let reencoded = serde_json::to_string(envelope.json().unwrap()).unwrap();
        let reparsed: Value = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(&reparsed, envelope.json().unwrap());
    }

    #[test]
    fn test_non_200_becomes_error() {
        let result = ApiResponse::from_transport(transport_response(404, "{}"));
        assert_matches!(result, Err(Error::MissingEndpoint(_)));
    }

    #[test]
    fn test_201_is_not_success() {
        let result = ApiResponse::from_transport(transport_response(201, r#"{"id":"x"}"#));
        assert_matches!(result, Err(Error::GenericHttp { status: 201, .. }));
    }

    #[test]
    fn test_parse_into_typed_value() {
        #[derive(serde::Deserialize)]
        struct Queued {
            id: String,
        }

        let envelope =
            ApiResponse::from_transport(transport_response(200, r#"{"id":"abc"}"#)).unwrap();
        let queued: Queued = envelope.parse().unwrap();
        assert_eq!(queued.id, "abc");
    }
}
