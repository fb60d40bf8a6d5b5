use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{TelesocialError, TelesocialResult};

/// Raw result of a single API call: the HTTP status code plus the
/// JSON-decoded body.
///
/// The Telesocial API produces JSON by converting XML, so body shapes are
/// loosely typed; the body is kept as a [`serde_json::Value`] and typed
/// envelopes are decoded on demand with [`ApiResponse::decode`].
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code returned by the server.
    pub status: u16,

    /// Decoded JSON body, or an empty object when the body was not valid
    /// JSON.
    pub body: Value,
}

impl ApiResponse {
    pub(crate) fn new(status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str(raw_body).unwrap_or_else(|_| Value::Object(Default::default()));
        ApiResponse { status, body }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Accepts any 2xx status; anything else becomes a service error whose
    /// code is the response status and whose message is extracted from the
    /// body.
    pub fn accept_success(self) -> TelesocialResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(self.into_service_error())
    }

    /// Accepts only the listed status codes.
    ///
    /// Used by endpoints where some non-2xx codes carry meaning (the
    /// network-id status endpoint treats 401 and 404 as a successful
    /// determination, not a failure).
    pub fn accept(self, allowed: &[u16]) -> TelesocialResult<Self> {
        if allowed.contains(&self.status) {
            return Ok(self);
        }
        Err(self.into_service_error())
    }

    /// Accepts exactly 200. Used by the list endpoints.
    pub fn accept_ok(self) -> TelesocialResult<Self> {
        self.accept(&[200])
    }

    /// Error message extracted from the body, wherever the server nested it.
    pub fn message(&self) -> Option<String> {
        deep_find(&self.body, "message").map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn into_service_error(self) -> TelesocialError {
        log::warn!("service error: status {}, body {}", self.status, self.body);
        TelesocialError::Service {
            code: self.status,
            message: self.message().unwrap_or_else(|| "Unknown error".to_string()),
        }
    }

    /// Decodes the named top-level envelope of the body into `T`.
    ///
    /// A missing envelope or a shape mismatch is a service error carrying
    /// this response's status code.
    pub fn decode<T: DeserializeOwned>(&self, envelope: &str) -> TelesocialResult<T> {
        let inner = self.body.get(envelope).ok_or_else(|| {
            TelesocialError::service(self.status, format!("missing {envelope} in response body"))
        })?;
        serde_json::from_value(inner.clone()).map_err(|e| {
            TelesocialError::service(self.status, format!("malformed {envelope}: {e}"))
        })
    }
}

/// Finds the value for `key` anywhere in a nested JSON tree.
///
/// The walk is depth-first and pre-order: an object is checked for `key`
/// directly before its member values are visited (in the map's iteration
/// order), and array elements are visited in index order. The first match
/// wins. A present-but-falsy value (empty string, `null`, `0`) is still a
/// match.
pub fn deep_find<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key) {
                return Some(found);
            }
            map.values().find_map(|child| deep_find(child, key))
        }
        Value::Array(items) => items.iter().find_map(|child| deep_find(child, key)),
        _ => None,
    }
}

/// Forces a list-or-scalar-or-absent response field into a list, in place.
///
/// The API's XML-to-JSON conversion collapses single-element lists to
/// scalars and drops empty ones entirely, so `body[container][field]`
/// becomes: absent -> `[]`, scalar -> `[scalar]`, list -> unchanged. A
/// missing container object is created so callers can always index the
/// field.
pub(crate) fn normalize_list_field(body: &mut Value, container: &str, field: &str) {
    let Value::Object(map) = body else { return };
    let container = map
        .entry(container.to_string())
        .or_insert_with(|| Value::Object(Default::default()));
    let Value::Object(container) = container else { return };
    match container.get_mut(field) {
        None => {
            container.insert(field.to_string(), Value::Array(Vec::new()));
        }
        Some(Value::Array(_)) => {}
        Some(scalar) => {
            let single = scalar.take();
            *scalar = Value::Array(vec![single]);
        }
    }
}
