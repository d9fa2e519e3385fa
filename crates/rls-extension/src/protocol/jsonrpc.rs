//! JSON-RPC 2.0 message types exchanged with the host session.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Thread-safe request ID generator.
static REQUEST_ID: AtomicI64 = AtomicI64::new(1);

const JSONRPC_VERSION: &str = "2.0";

fn jsonrpc_version() -> String {
    JSONRPC_VERSION.to_owned()
}

/// Generates a unique request ID.
///
/// IDs are monotonically increasing and thread-safe.
#[must_use]
pub fn next_request_id() -> i64 {
    REQUEST_ID.fetch_add(1, Ordering::SeqCst)
}

/// Identifier carried by a server-initiated request.
///
/// JSON-RPC allows both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer identifier.
    Number(i64),
    /// String identifier.
    String(String),
}

impl RequestId {
    /// The numeric identifier, if this is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(id) => Some(*id),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::String(id) => write!(f, "{id:?}"),
        }
    }
}

/// A JSON-RPC 2.0 request message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always "2.0".
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,
    /// Unique request identifier.
    pub id: i64,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Creates a new request with an auto-generated ID.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self::with_id(next_request_id(), method, params)
    }

    /// Creates a new request with a specific ID.
    #[must_use]
    pub fn with_id(id: i64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// A request initiated by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcServerRequest {
    /// Protocol version, always "2.0".
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,
    /// Identifier chosen by the server.
    pub id: RequestId,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A JSON-RPC 2.0 notification (no response expected).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// Protocol version, always "2.0".
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,
    /// The method being signalled.
    pub method: String,
    /// Optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Creates a new notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version.
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,
    /// Request identifier this response corresponds to.
    pub id: Option<i64>,
    /// The result on success.
    #[serde(default)]
    pub result: Option<Value>,
    /// The error on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Builds a successful response.
    #[must_use]
    pub fn success(id: i64, result: Value) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response.
    #[must_use]
    pub fn failure(id: i64, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: jsonrpc_version(),
            id: Some(id),
            result: None,
            error: Some(error),
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Any message the server can push to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcMessage {
    /// Reply to a client request.
    Response(JsonRpcResponse),
    /// Request initiated by the server.
    ServerRequest(JsonRpcServerRequest),
    /// One-way notification.
    Notification(JsonRpcNotification),
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(default = "jsonrpc_version")]
    jsonrpc: String,
    #[serde(default)]
    id: Option<RequestId>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

impl JsonRpcMessage {
    /// Decodes and classifies one message body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the body is not a JSON-RPC object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<RawMessage>(bytes).map(Self::classify)
    }

    /// Classifies an already-decoded message.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the value is not a JSON-RPC object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value::<RawMessage>(value).map(Self::classify)
    }

    fn classify(raw: RawMessage) -> Self {
        match (raw.method, raw.id) {
            (Some(method), Some(id)) => Self::ServerRequest(JsonRpcServerRequest {
                jsonrpc: raw.jsonrpc,
                id,
                method,
                params: raw.params,
            }),
            (Some(method), None) => Self::Notification(JsonRpcNotification {
                jsonrpc: raw.jsonrpc,
                method,
                params: raw.params,
            }),
            // Only numeric ids are ever issued, so a string id matches nothing.
            (None, id) => Self::Response(JsonRpcResponse {
                jsonrpc: raw.jsonrpc,
                id: id.as_ref().and_then(RequestId::as_number),
                result: raw.result,
                error: raw.error,
            }),
        }
    }
}
