//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::replayer::CassetteReplayer;
use crate::error::Result;

/// Per-port cassette file paths. Each port can optionally have its own
/// cassette file for replay. Ports without a cassette path fail with
/// [`crate::Error::Cassette`] when called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the LLM port cassette file.
    pub llm: Option<PathBuf>,
    /// Path to the tool port cassette file.
    pub tool: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
#[derive(Debug)]
pub struct PortReplayers {
    /// Replayer for the LLM port.
    pub llm: Option<CassetteReplayer>,
    /// Replayer for the tool port.
    pub tool: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Serves every port from the same cassette file.
    #[must_use]
    pub fn monolithic(path: &Path) -> Self {
        Self { llm: Some(path.to_path_buf()), tool: Some(path.to_path_buf()) }
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers> {
        Ok(PortReplayers {
            llm: self.llm.as_deref().map(CassetteReplayer::from_file).transpose()?,
            tool: self.tool.as_deref().map(CassetteReplayer::from_file).transpose()?,
        })
    }
}
