//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};
use crate::error::{Error, Result};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    /// Per port+method queue of interactions (in order).
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    /// Per port+method cursor tracking position.
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Load a cassette file and create a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Cassette(format!("failed to read cassette file {}: {e}", path.display()))
        })?;
        let cassette = Cassette::from_yaml(&content).map_err(|e| {
            Error::Cassette(format!("failed to parse cassette file {}: {e}", path.display()))
        })?;
        Ok(Self::new(&cassette))
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the cassette has no (more) interactions
    /// for the given port/method combination, naming what was requested and
    /// what remains.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(Error::Cassette(format!(
                "no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            )));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        if *cursor >= queue.len() {
            return Err(Error::Cassette(format!(
                "cassette exhausted: all {count} interactions for port={port:?} \
                 method={method:?} have been consumed. Last interaction was seq={last_seq}.",
                count = queue.len(),
                last_seq = queue.last().map_or(0, |i| i.seq),
            )));
        }

        let interaction = &queue[*cursor];
        *cursor += 1;
        Ok(interaction)
    }
}
