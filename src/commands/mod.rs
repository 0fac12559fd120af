//! Command dispatch and handlers.

pub mod ask;
pub mod handle;

use std::cell::OnceCell;
use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::{ApiKeys, Credentials};
use crate::context::ServiceContext;
use crate::error::Result;
use crate::handler::{live_handler, SearchHandler};

/// Environment variable naming a directory to record cassettes into.
pub const RECORD_ENV: &str = "ASI_SEARCH_RECORD";

/// Dispatch a parsed command line.
///
/// `--replay` serves every port from a cassette. `--record <dir>` (or
/// `ASI_SEARCH_RECORD=<dir>`) records all port interactions to per-port
/// cassette files under that directory. Otherwise the live services are used.
///
/// # Errors
///
/// Returns an error if the selected command fails or a recording cannot be written.
pub async fn dispatch(cli: &Cli) -> Result<()> {
    let settings = cli.settings.to_settings();

    if let Some(cassette) = &cli.replay {
        // Replay needs no real secrets, only something to get past the check.
        let placeholder = Credentials {
            llm_api_key: Some("replay".into()),
            search_api_key: Some("replay".into()),
        };
        let handler =
            SearchHandler::new(placeholder, |_keys: &ApiKeys| ServiceContext::replaying(cassette));
        return run_command(&cli.command, &handler).await;
    }

    let credentials = Credentials::from_env();
    let record_root = cli.record.clone().or_else(|| env::var_os(RECORD_ENV).map(PathBuf::from));

    if let Some(root) = record_root {
        // The session directory is created on first connect, so runs rejected
        // before reaching the services leave nothing behind.
        let session: OnceCell<Result<RecordingSession>> = OnceCell::new();
        let result = {
            let handler = SearchHandler::new(credentials, |keys: &ApiKeys| {
                let started = session.get_or_init(|| RecordingSession::new(&root));
                let started = started.as_ref().map_err(|e| e.clone())?;
                ServiceContext::recording(keys, &settings, started)
            });
            run_command(&cli.command, &handler).await
        };
        return finish_recording(session.into_inner().and_then(Result::ok), result);
    }

    let handler = live_handler(credentials, settings);
    run_command(&cli.command, &handler).await
}

/// Writes a recording session, if one was started, after its command ran.
///
/// The command's own error wins over a failure to save the cassettes.
fn finish_recording(session: Option<RecordingSession>, result: Result<()>) -> Result<()> {
    let Some(session) = session else {
        info!("no service was contacted; nothing recorded");
        return result;
    };
    match (session.finish(), result) {
        (Ok(output_dir), result) => {
            info!(dir = %output_dir.display(), "recording saved");
            eprintln!("Recording saved to: {}", output_dir.display());
            result
        }
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(command_err)) => {
            warn!(error = %err, "recording could not be saved");
            Err(command_err)
        }
    }
}

/// Run one command against a handler.
async fn run_command<F>(command: &Command, handler: &SearchHandler<F>) -> Result<()>
where
    F: Fn(&ApiKeys) -> Result<ServiceContext>,
{
    match command {
        Command::Ask { query } => ask::run(handler, query).await,
        Command::Handle { payload } => handle::run(handler, payload.as_deref()).await,
    }
}
