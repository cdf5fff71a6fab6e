use crate::knowledge;
use std::path::PathBuf;

/// Settings shared by every tool call in one process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Knowledge directory used when a call omits `base_path`.
    pub knowledge_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(knowledge_dir: Option<PathBuf>) -> Self {
        Self {
            knowledge_dir: knowledge_dir.unwrap_or_else(knowledge::default_base_path),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
