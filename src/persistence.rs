// Stores config alongside the raw (term, count) pairs rather than the index
// buckets themselves; the index is cheap to rebuild on load.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SpellCheckerConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedDictionary {
    pub config: SpellCheckerConfig,
    pub entries: Vec<(String, u64)>,
}

impl PersistedDictionary {
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let data = serde_json::to_string(self)?;
        fs::write(path, data)
    }

    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(io::Error::from)
    }
}
