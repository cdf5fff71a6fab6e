use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read one knowledge file or one of its entries. The loader never
/// surfaces these to its callers; they become a log line and an empty
/// contribution.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("knowledge file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read knowledge file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse knowledge file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("skipping invalid {section} entry {id:?} in {}: {source}", path.display())]
    InvalidEntry {
        path: PathBuf,
        section: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl KnowledgeError {
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            KnowledgeError::NotFound { path }
        } else {
            KnowledgeError::Read { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, KnowledgeError::NotFound { .. })
    }
}
