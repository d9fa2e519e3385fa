//! Wire-level types for the `rls` protocol extensions.
//!
//! [`jsonrpc`] models the JSON-RPC 2.0 envelopes exchanged with the host,
//! [`ext`] the non-standard `rustDocument/*` methods layered on top of LSP,
//! and [`uri`] the conversions between document URIs and local paths.

pub mod ext;
pub mod jsonrpc;
pub mod uri;

pub use ext::{
    BEGIN_BUILD_METHOD, BeginBuild, BuildBeginParams, DIAGNOSTICS_BEGIN_METHOD,
    DIAGNOSTICS_END_METHOD, DiagnosticsBegin, DiagnosticsBeginParams, DiagnosticsEnd,
    DiagnosticsEndParams, DocumentPosition, IMPLEMENTATIONS_METHOD, Implementations,
    build_implementations_request,
};
pub use jsonrpc::{
    JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    JsonRpcServerRequest, RequestId, next_request_id,
};
