use serde_json::json;

pub const TOOL_LOAD_KNOWLEDGE: &str = "knowledge.load";
pub const TOOL_LIST_JURISDICTIONS: &str = "knowledge.list_jurisdictions";
pub const TOOL_LIST_CUSTOM_FILES: &str = "knowledge.list_custom_files";

pub const RESOURCE_CATEGORIES: &str = "office://skills/categories";
pub const RESOURCE_JURISDICTIONS: &str = "office://knowledge/jurisdictions";

pub const PROTOCOL_VERSION: &str = "2025-11-25";

pub fn load_knowledge_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "base_path": { "type": "string", "minLength": 1 },
            "custom_files": {
                "type": "array",
                "items": { "type": "string", "minLength": 1 }
            },
            "jurisdiction": { "type": "string", "pattern": "^[A-Za-z0-9_-]+$" }
        },
        "additionalProperties": false
    })
}

pub fn list_jurisdictions_schema() -> serde_json::Value {
    base_path_only_schema()
}

pub fn list_custom_files_schema() -> serde_json::Value {
    base_path_only_schema()
}

fn base_path_only_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "base_path": { "type": "string", "minLength": 1 }
        },
        "additionalProperties": false
    })
}
