//! `asi-search handle` command.

use std::io::Read;

use serde_json::Value;
use tracing::warn;

use crate::config::ApiKeys;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::handler::{HandlerResponse, SearchHandler};

/// Execute the `handle` command: run the JSON handler and print its response.
///
/// The payload is read from stdin when not given inline. Handler failures are
/// part of the printed response, not an error of the command.
///
/// # Errors
///
/// Returns an error only if stdin cannot be read.
pub async fn run<F>(handler: &SearchHandler<F>, payload: Option<&str>) -> Result<()>
where
    F: Fn(&ApiKeys) -> Result<ServiceContext>,
{
    let text = match payload {
        Some(text) => text.to_string(),
        None => read_payload(std::io::stdin().lock())?,
    };

    let response = respond(handler, &text).await;
    println!("{}", serde_json::to_string_pretty(&response.to_json()).unwrap_or_default());
    Ok(())
}

/// Reads a whole payload from `reader`.
///
/// # Errors
///
/// Returns [`Error::Payload`] if the reader fails or yields invalid UTF-8.
pub fn read_payload(mut reader: impl Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(|e| Error::Payload(e.to_string()))?;
    Ok(buf)
}

/// Parses the payload text and runs the handler on it.
///
/// Text that is not JSON is handed over as `null`, which the handler reports
/// as a missing query.
pub async fn respond<F>(handler: &SearchHandler<F>, text: &str) -> HandlerResponse
where
    F: Fn(&ApiKeys) -> Result<ServiceContext>,
{
    let input: Value = serde_json::from_str(text).unwrap_or_else(|e| {
        warn!(error = %e, "payload is not JSON");
        Value::Null
    });
    handler.handle(&input).await
}
