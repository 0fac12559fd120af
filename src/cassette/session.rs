//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::{Error, Result};

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to a separate cassette file.
/// All cassettes are stored in a timestamped directory under the root.
pub struct RecordingSession {
    /// Recorder for LLM interactions.
    pub llm: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for tool interactions.
    pub tool: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing all cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session at `<root>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(root: &Path) -> Result<Self> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(Error::Cassette(format!(
                "cassette directory already exists: {}",
                output_dir.display()
            )));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| Error::Cassette(format!("failed to create cassette directory: {e}")))?;

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"))))
        };

        Ok(Self { llm: make_recorder("llm"), tool: make_recorder("tool"), output_dir })
    }

    /// Directory the cassettes will be written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// Every recording adapter holding a recorder must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<()> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| {
                    Error::Cassette(format!("recording adapter for {port} still has references"))
                })?
                .into_inner()
                .map_err(|e| Error::Cassette(format!("recorder lock for {port} poisoned: {e}")))?;
            recorder.finish()?;
            Ok(())
        }

        finish_one(self.llm, "llm")?;
        finish_one(self.tool, "tool")?;

        Ok(self.output_dir)
    }
}
