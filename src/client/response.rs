//! Reply body decoding and outcome classification

use serde_json::Value;

use super::CallError;

const DATA_PREFIX: &str = "data:";

/// Decode a reply body that is either plain JSON or an event stream.
///
/// For event streams only the last `data:` frame counts; later frames
/// supersede earlier ones.
pub fn parse_response(raw: &str) -> Result<Value, CallError> {
    let payload = if raw.contains(DATA_PREFIX) {
        raw.lines()
            .filter_map(|line| line.strip_prefix(DATA_PREFIX))
            .last()
            .map(str::trim)
            .ok_or_else(|| CallError::Unparsable { raw: raw.to_string() })?
    } else {
        raw
    };

    serde_json::from_str(payload).map_err(|err| {
        tracing::debug!(error = %err, "reply is not valid JSON");
        CallError::Unparsable { raw: raw.to_string() }
    })
}

/// The three shapes a decoded reply can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `{"result": ...}`
    Result(Value),
    /// `{"error": ...}`
    Error(Value),
    /// Anything else, passed through as-is.
    Bare(Value),
}

impl Reply {
    pub fn classify(body: Value) -> Self {
        if let Value::Object(map) = &body {
            if let Some(result) = map.get("result") {
                return Reply::Result(result.clone());
            }
            if let Some(error) = map.get("error") {
                return Reply::Error(error.clone());
            }
        }
        Reply::Bare(body)
    }

    pub fn into_outcome(self) -> Result<Value, CallError> {
        match self {
            Reply::Result(value) | Reply::Bare(value) => Ok(value),
            Reply::Error(error) => Err(CallError::Backend(error)),
        }
    }
}
