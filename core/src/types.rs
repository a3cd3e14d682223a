//! Request options and response payloads.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;
use crate::http::HttpMethod;

/// Per-call options for `RequestClient::request`.
///
/// When `json` holds a non-null value it is serialized and sent as the body;
/// `body` is then ignored even if set.
///
/// A body on `GET` or `DELETE` is not rejected: `UreqTransport` sends it
/// as-is, where a browser `fetch` would refuse a `GET` body outright.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub json: Option<Value>,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, value: impl Into<Option<Value>>) -> Self {
        self.json = value.into();
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A response payload: decoded JSON, or the raw text when it isn't JSON.
///
/// An empty response body decodes to `Json(Value::Null)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Classify response text: empty is `null`, valid JSON is `Json`,
    /// anything else is kept verbatim as `Text`.
    pub fn from_text(text: String) -> Self {
        if text.is_empty() {
            return ResponseBody::Json(Value::Null);
        }
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(t) => Some(t),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ResponseBody::Json(Value::Null))
    }

    /// Deserialize a JSON payload into `T`. Text payloads are offered to
    /// `T` as a JSON string.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, DecodeError> {
        let value = match self {
            ResponseBody::Json(v) => v,
            ResponseBody::Text(t) => Value::String(t),
        };
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(v) => write!(f, "{v}"),
            ResponseBody::Text(t) => f.write_str(t),
        }
    }
}
