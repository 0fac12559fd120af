//! CLI argument definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{Settings, DEFAULT_LLM_URL, DEFAULT_MODEL, DEFAULT_SEARCH_URL};

/// Query used by `ask` when none is given.
pub const DEFAULT_QUERY: &str = "What is agentverse?";

/// Top-level CLI parser for `asi-search`.
#[derive(Debug, Parser)]
#[command(
    name = "asi-search",
    version,
    about = "Answer questions with web search and a hosted model"
)]
pub struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Record every model and tool interaction under this directory.
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "replay")]
    pub record: Option<PathBuf>,

    /// Serve model and tool interactions from a cassette instead of the network.
    #[arg(long, global = true, value_name = "CASSETTE")]
    pub replay: Option<PathBuf>,

    /// Model and search settings.
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer a question and print the answer text.
    Ask {
        /// The question to answer.
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,
    },
    /// Run the JSON handler on a payload such as `{"search_query": "..."}`.
    Handle {
        /// JSON payload; read from stdin when omitted.
        payload: Option<String>,
    },
}

/// Adapter settings exposed as flags.
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Chat-completions endpoint.
    #[arg(long, global = true, default_value = DEFAULT_LLM_URL)]
    pub llm_url: String,

    /// Model identifier.
    #[arg(long, global = true, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature in [0, 2].
    #[arg(long, global = true, default_value_t = 0.7)]
    pub temperature: f32,

    /// Maximum tokens to generate.
    #[arg(long, global = true, default_value_t = 1024)]
    pub max_tokens: u32,

    /// Enable the provider's fun mode.
    #[arg(long, global = true)]
    pub fun_mode: bool,

    /// Enable the provider's own web search.
    #[arg(long, global = true)]
    pub web_search: bool,

    /// Ask the provider to stream its response.
    #[arg(long, global = true)]
    pub stream: bool,

    /// Per-request timeout in seconds; no timeout when omitted.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Search endpoint.
    #[arg(long, global = true, default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Maximum search results per query.
    #[arg(long, global = true, default_value_t = 5)]
    pub max_results: u32,
}

impl SettingsArgs {
    /// Builds [`Settings`] from the parsed flags.
    #[must_use]
    pub fn to_settings(&self) -> Settings {
        let timeout = self.timeout_secs.map(Duration::from_secs);
        let mut settings = Settings::default();
        settings.llm.api_url.clone_from(&self.llm_url);
        settings.llm.model.clone_from(&self.model);
        settings.llm.temperature = self.temperature;
        settings.llm.max_tokens = self.max_tokens;
        settings.llm.fun_mode = self.fun_mode;
        settings.llm.web_search = self.web_search;
        settings.llm.stream = self.stream;
        settings.llm.request_timeout = timeout;
        settings.search.api_url.clone_from(&self.search_url);
        settings.search.max_results = self.max_results;
        settings.search.request_timeout = timeout;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DEFAULT_QUERY};
    use crate::config::Settings;
    use clap::Parser;

    #[test]
    fn ask_defaults_to_sample_query() {
        let cli = Cli::parse_from(["asi-search", "ask"]);
        assert!(matches!(cli.command, Command::Ask { ref query } if query == DEFAULT_QUERY));
        assert_eq!(cli.settings.to_settings(), Settings::default());
    }

    #[test]
    fn parses_handle_with_inline_payload() {
        let cli = Cli::parse_from(["asi-search", "handle", r#"{"search_query":"x"}"#]);
        assert!(matches!(cli.command, Command::Handle { payload: Some(_) }));
    }

    #[test]
    fn settings_flags_override_defaults() {
        let cli = Cli::parse_from([
            "asi-search",
            "ask",
            "q",
            "--temperature",
            "0.2",
            "--fun-mode",
            "--max-tokens",
            "256",
            "--timeout-secs",
            "30",
        ]);
        let settings = cli.settings.to_settings();
        assert!((settings.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert!(settings.llm.fun_mode);
        assert_eq!(settings.llm.max_tokens, 256);
        assert_eq!(settings.llm.request_timeout, Some(std::time::Duration::from_secs(30)));
        assert_eq!(settings.search.request_timeout, Some(std::time::Duration::from_secs(30)));
    }

    #[test]
    fn record_and_replay_conflict() {
        let result = Cli::try_parse_from(["asi-search", "--record", "a", "--replay", "b", "ask"]);
        assert!(result.is_err());
    }
}
