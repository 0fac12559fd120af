//! Recording adapters that capture interactions to cassettes.

pub mod llm;
pub mod tool;

pub use llm::RecordingLlmClient;
pub use tool::RecordingTool;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;
use crate::error::Error;

/// Record a `Result<T, Error>` interaction using the Ok/Err JSON convention.
///
/// Mirror of `replaying::replay_result`. `Ok(v)` is stored as `{"Ok": v}` and
/// `Err(e)` as `{"Err": e}`, keeping the error variant intact.
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, Error>,
) where
    T: Serialize,
    I: Serialize,
{
    let input_json = to_json(input);
    let output_json = match result {
        Ok(v) => serde_json::json!({ "Ok": to_json(v) }),
        Err(e) => serde_json::json!({ "Err": to_json(e) }),
    };

    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, input_json, output_json);
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "failed to encode interaction for recording");
        Value::Null
    })
}
