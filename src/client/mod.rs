//! JSON-RPC style client for the raster tool server
//!
//! Every call is a `tools/call` request. Replies may be plain JSON or an
//! event stream; see [`response::parse_response`].

pub mod response;
pub mod transport;

use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::PlannedCall;
pub use response::{parse_response, Reply};
pub use transport::{HttpTransport, Transport};

pub const JSONRPC_VERSION: &str = "2.0";
pub const TOOL_CALL_METHOD: &str = "tools/call";

/// Why a tool call produced no result. Each kind is rendered differently.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("server reported an error: {0}")]
    Backend(Value),

    #[error("could not parse server response: {raw}")]
    Unparsable { raw: String },
}

pub struct RemoteClient<T: Transport = HttpTransport> {
    transport: T,
    request_id: u64,
}

impl<T: Transport> RemoteClient<T> {
    pub fn new(transport: T, request_id: u64) -> Self {
        Self { transport, request_id }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Run one planned call. Transport failures come back as
    /// [`CallError::Connection`], never as a panic.
    pub fn invoke(&self, call: &PlannedCall) -> Result<Value, CallError> {
        let envelope = build_envelope(call, self.request_id);
        tracing::info!(tool = call.tool_name(), "calling tool");
        tracing::debug!(%envelope, "request envelope");

        let raw = self.transport.send(&envelope).map_err(|err| {
            let detail = format!("{err:#}");
            tracing::warn!(tool = call.tool_name(), error = %detail, "tool call failed");
            CallError::Connection(detail)
        })?;

        Reply::classify(parse_response(&raw)?).into_outcome()
    }
}

/// Request body for one tool invocation.
pub fn build_envelope(call: &PlannedCall, request_id: u64) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "method": TOOL_CALL_METHOD,
        "params": {
            "name": call.tool_name(),
            "arguments": call.arguments,
        },
        "id": request_id,
    })
}
