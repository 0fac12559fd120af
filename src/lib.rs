//! Core library entry for the `asi-search` CLI.
//!
//! A hosted chat-completions model and a web-search tool, wired behind an
//! agent runtime and exposed through a JSON handler.

pub mod adapters;
pub mod agent;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod ports;
pub mod tools;

pub use error::{Error, ErrorKind, Result};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `asi_search` logs at `info`, or
/// `debug` when `verbose` is on.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "asi_search=debug" } else { "asi_search=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ =
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
