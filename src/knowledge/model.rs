use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::merge::deep_merge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// A named contract/document risk rule.
///
/// Fields outside the known set are kept in `extra` so that authors can attach
/// their own metadata and still have it survive overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPattern {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords_zh: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<String>,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_references: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial [`RiskPattern`] used by `overrides`. Unset fields leave the target
/// untouched; an explicit `null` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskPatternPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name_zh: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub keywords_zh: Option<Option<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description_zh: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommendation_zh: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub legal_references: Option<Option<Vec<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RiskPattern {
    /// Applies a field-level patch. Lists are replaced wholesale, nested
    /// objects in `extra` are merged key by key.
    pub fn apply_patch(&mut self, patch: RiskPatternPatch) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut self.id, patch.id);
        set(&mut self.name, patch.name);
        set(&mut self.name_zh, patch.name_zh);
        set(&mut self.severity, patch.severity);
        set(&mut self.category, patch.category);
        set(&mut self.keywords, patch.keywords);
        set(&mut self.keywords_zh, patch.keywords_zh);
        set(&mut self.description, patch.description);
        set(&mut self.description_zh, patch.description_zh);
        set(&mut self.recommendation, patch.recommendation);
        set(&mut self.recommendation_zh, patch.recommendation_zh);
        set(&mut self.legal_references, patch.legal_references);
        deep_merge(&mut self.extra, patch.extra);
    }
}

// Distinguishes a field given as `null` (`Some(None)`) from an absent one.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_for: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_for_zh: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLaw {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionKnowledge {
    pub jurisdiction: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_law: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_requirements: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_laws: Option<Vec<KeyLaw>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compete_rules: Option<Map<String, Value>>,
}

/// On-disk knowledge file. Every section is optional so a file may carry only
/// patterns, only a checklist, or only overrides on top of its parent.
///
/// Entries stay raw JSON here and are decoded one by one by the loader, so a
/// single off-schema entry does not invalidate the rest of the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeFile {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub risk_patterns: BTreeMap<String, Value>,
    #[serde(default)]
    pub overrides: BTreeMap<String, Value>,
    #[serde(default)]
    pub additional_patterns: BTreeMap<String, Value>,
    #[serde(default)]
    pub essential_elements: Vec<Value>,
    #[serde(default)]
    pub important_clauses: Vec<Value>,
    #[serde(default)]
    pub execution_elements: Vec<Value>,
    // Accepted so files carrying it stay valid; the loader does not apply it.
    #[allow(dead_code)]
    #[serde(default)]
    pub completeness_additions: Vec<Value>,
}

pub type RiskPatternMap = BTreeMap<String, RiskPattern>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeMetadata {
    pub loaded_files: Vec<String>,
    pub version: String,
}

/// Flattened result of a knowledge load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedKnowledge {
    pub risk_patterns: RiskPatternMap,
    pub completeness_items: Vec<CompletenessItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<JurisdictionKnowledge>,
    pub metadata: KnowledgeMetadata,
}
