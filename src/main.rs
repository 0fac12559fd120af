//! Binary entrypoint for the `asi-search` CLI.

use std::process::ExitCode;

use asi_search::cli::Cli;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Credentials may live in a .env file next to the binary's working directory.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    asi_search::init_tracing(cli.verbose);

    // Recording is handled in commands::dispatch via --record or ASI_SEARCH_RECORD.
    match asi_search::commands::dispatch(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
