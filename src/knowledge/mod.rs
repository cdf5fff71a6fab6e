//! Knowledge files: risk patterns, completeness checklists and jurisdiction
//! records, resolved through `extends` chains with overrides.

use std::path::PathBuf;

mod error;
mod loader;
mod merge;
pub mod model;

pub use loader::{LoadOptions, available_jurisdictions, custom_knowledge_files, load_knowledge};
pub use model::LoadedKnowledge;

pub const KNOWLEDGE_VERSION: &str = "1.0.0";

/// The `knowledge/` tree shipped with the crate.
pub fn default_base_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("knowledge")
}
