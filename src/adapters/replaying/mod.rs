//! Replaying adapters that replay recorded interactions.

pub mod llm;
pub mod tool;

pub use llm::ReplayingLlmClient;
pub use tool::ReplayingTool;

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::{Error, Result};

/// Fetch the recorded output of the next `port::method` interaction.
///
/// Mirror of `recording::record_result`'s bookkeeping side.
pub(crate) fn next_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
) -> Result<Value> {
    let replayer = replayer.ok_or_else(|| {
        Error::Cassette(format!("{port} port has no cassette configured (method {method})"))
    })?;
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(guard.next_interaction(port, method)?.output.clone())
}

/// Decode a recorded `{"Ok": v}` / `{"Err": e}` output back into a `Result`.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Result<Value>) -> Result<T> {
    let mut map = match output? {
        Value::Object(map) => map,
        other => {
            return Err(Error::Cassette(format!(
                "recorded output is not an Ok/Err object: {other}"
            )))
        }
    };
    if let Some(ok) = map.remove("Ok") {
        return serde_json::from_value(ok)
            .map_err(|e| Error::Cassette(format!("recorded Ok value does not decode: {e}")));
    }
    if let Some(err) = map.remove("Err") {
        let recorded: Error = serde_json::from_value(err)
            .map_err(|e| Error::Cassette(format!("recorded Err value does not decode: {e}")))?;
        return Err(recorded);
    }
    Err(Error::Cassette("recorded output has neither Ok nor Err".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_values_decode() {
        let value: String = replay_result(Ok(json!({"Ok": "text"}))).unwrap();
        assert_eq!(value, "text");
    }

    #[test]
    fn err_values_keep_their_variant() {
        let result: Result<String> =
            replay_result(Ok(json!({"Err": {"Http": {"status": 502, "body": "bad gateway"}}})));
        assert_eq!(result.unwrap_err(), Error::Http { status: 502, body: "bad gateway".into() });
    }

    #[test]
    fn unconfigured_port_is_a_cassette_error() {
        let err = next_output(None, "llm", "complete").unwrap_err();
        assert!(err.to_string().contains("no cassette configured"));
    }

    #[test]
    fn shapeless_outputs_are_rejected() {
        let result: Result<String> = replay_result(Ok(json!("bare")));
        assert!(matches!(result, Err(Error::Cassette(_))));
        let result: Result<String> = replay_result(Ok(json!({"Maybe": 1})));
        assert!(matches!(result, Err(Error::Cassette(_))));
    }
}
