use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, warn};

use super::error::KnowledgeError;
use super::model::{
    CompletenessItem, JurisdictionKnowledge, KnowledgeFile, KnowledgeMetadata, LoadedKnowledge,
    RiskPattern, RiskPatternMap, RiskPatternPatch,
};
use super::{KNOWLEDGE_VERSION, default_base_path};

const BASE_DIR: &str = "base";
const CUSTOM_DIR: &str = "custom";
const JURISDICTIONS_DIR: &str = "jurisdictions";
const RISK_PATTERNS_FILE: &str = "risk_patterns.json";
const COMPLETENESS_FILE: &str = "completeness.json";
const JSON_SUFFIX: &str = ".json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub base_path: Option<PathBuf>,
    pub custom_files: Vec<PathBuf>,
    pub jurisdiction: Option<String>,
}

/// Loads the base risk patterns, overlays each custom file in order, then
/// attaches the completeness checklist and the optional jurisdiction record.
///
/// Missing or malformed files are logged and skipped; this never fails.
pub fn load_knowledge(options: &LoadOptions) -> LoadedKnowledge {
    let base_path = options
        .base_path
        .clone()
        .unwrap_or_else(default_base_path);
    let mut loaded_files = Vec::new();

    let base_risk_path = base_path.join(BASE_DIR).join(RISK_PATTERNS_FILE);
    let mut risk_patterns = resolve_risk_patterns(&base_risk_path);
    loaded_files.push(display_path(&base_risk_path));

    for custom_file in &options.custom_files {
        let custom_path = if custom_file.is_absolute() {
            custom_file.clone()
        } else {
            base_path.join(custom_file)
        };
        risk_patterns.extend(resolve_risk_patterns(&custom_path));
        loaded_files.push(display_path(&custom_path));
    }

    let completeness_items = load_completeness_items(&base_path);

    let jurisdiction = options.jurisdiction.as_deref().and_then(|code| {
        let path = jurisdiction_path(&base_path, code);
        let record = load_json::<JurisdictionKnowledge>(&path)?;
        loaded_files.push(display_path(&path));
        Some(record)
    });

    debug!(
        patterns = risk_patterns.len(),
        completeness_items = completeness_items.len(),
        files = loaded_files.len(),
        "knowledge loaded"
    );

    LoadedKnowledge {
        risk_patterns,
        completeness_items,
        jurisdiction,
        metadata: KnowledgeMetadata {
            loaded_files,
            version: KNOWLEDGE_VERSION.to_string(),
        },
    }
}

/// Resolves the risk patterns of one file and its `extends` ancestors.
pub fn resolve_risk_patterns(path: &Path) -> RiskPatternMap {
    let mut visited = HashSet::new();
    resolve_with_visited(&normalize_path(path), &mut visited)
}

fn resolve_with_visited(path: &Path, visited: &mut HashSet<PathBuf>) -> RiskPatternMap {
    if !visited.insert(path.to_path_buf()) {
        return RiskPatternMap::new();
    }

    let Some(file) = load_json::<KnowledgeFile>(path) else {
        return RiskPatternMap::new();
    };
    debug!(
        path = %path.display(),
        version = %file.version,
        description = ?file.description,
        author = ?file.author,
        jurisdiction = ?file.jurisdiction,
        "resolving knowledge file"
    );

    let mut patterns = match file.extends.as_deref() {
        Some(parent) => {
            let parent_path = resolve_extends_path(path, parent);
            resolve_with_visited(&parent_path, visited)
        }
        None => RiskPatternMap::new(),
    };

    patterns.extend(decode_entries::<RiskPattern>(
        path,
        "risk_patterns",
        file.risk_patterns,
    ));

    let overrides = decode_entries::<RiskPatternPatch>(path, "overrides", file.overrides);
    for (id, patch) in overrides {
        if let Some(pattern) = patterns.get_mut(&id) {
            pattern.apply_patch(patch);
        }
    }

    patterns.extend(decode_entries::<RiskPattern>(
        path,
        "additional_patterns",
        file.additional_patterns,
    ));
    patterns
}

fn decode_entries<T: DeserializeOwned>(
    path: &Path,
    section: &'static str,
    entries: BTreeMap<String, Value>,
) -> BTreeMap<String, T> {
    entries
        .into_iter()
        .filter_map(|(id, value)| {
            decode_entry(path, section, id.clone(), value).map(|entry| (id, entry))
        })
        .collect()
}

fn decode_items(path: &Path, section: &'static str, items: Vec<Value>) -> Vec<CompletenessItem> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| decode_entry(path, section, index.to_string(), value))
        .collect()
}

fn decode_entry<T: DeserializeOwned>(
    path: &Path,
    section: &'static str,
    id: String,
    value: Value,
) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(source) => {
            let err = KnowledgeError::InvalidEntry {
                path: path.to_path_buf(),
                section,
                id,
                source,
            };
            warn!(path = %path.display(), "{err}");
            None
        }
    }
}

fn load_completeness_items(base_path: &Path) -> Vec<CompletenessItem> {
    let path = base_path.join(BASE_DIR).join(COMPLETENESS_FILE);
    let Some(file) = load_json::<KnowledgeFile>(&path) else {
        return Vec::new();
    };

    let mut items = decode_items(&path, "essential_elements", file.essential_elements);
    items.extend(decode_items(&path, "important_clauses", file.important_clauses));
    items.extend(decode_items(&path, "execution_elements", file.execution_elements));
    items
}

/// Stems of the `*.json` files in `base/jurisdictions`, in directory order.
pub fn available_jurisdictions(base_path: Option<&Path>) -> Vec<String> {
    let dir = resolve_base(base_path)
        .join(BASE_DIR)
        .join(JURISDICTIONS_DIR);
    json_file_names(&dir)
        .into_iter()
        .filter_map(|name| name.strip_suffix(JSON_SUFFIX).map(str::to_string))
        .collect()
}

/// `*.json` files in `custom/`, each reported as `custom/<name>`.
pub fn custom_knowledge_files(base_path: Option<&Path>) -> Vec<String> {
    let dir = resolve_base(base_path).join(CUSTOM_DIR);
    json_file_names(&dir)
        .into_iter()
        .map(|name| display_path(&Path::new(CUSTOM_DIR).join(name)))
        .collect()
}

fn resolve_base(base_path: Option<&Path>) -> PathBuf {
    base_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_base_path)
}

fn jurisdiction_path(base_path: &Path, code: &str) -> PathBuf {
    base_path
        .join(BASE_DIR)
        .join(JURISDICTIONS_DIR)
        .join(format!("{code}{JSON_SUFFIX}"))
}

fn json_file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(JSON_SUFFIX))
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, KnowledgeError> {
    let content =
        fs::read_to_string(path).map_err(|err| KnowledgeError::from_io(path.to_path_buf(), err))?;
    serde_json::from_str(&content).map_err(|source| KnowledgeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    match read_json(path) {
        Ok(value) => Some(value),
        Err(err) if err.is_not_found() => {
            warn!(path = %path.display(), "{err}");
            None
        }
        Err(err) => {
            error!(path = %path.display(), "{err}");
            None
        }
    }
}

fn resolve_extends_path(current_file: &Path, extends: &str) -> PathBuf {
    let dir = current_file.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&dir.join(extends))
}

/// Lexically folds `.` and `..` so one file reached through different
/// spellings is recognised by the visited set.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
