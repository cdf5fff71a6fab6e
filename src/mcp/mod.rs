use serde_json::json;

pub mod contracts;
pub mod errors;
pub mod resources;

pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": contracts::TOOL_LOAD_KNOWLEDGE,
            "description": "Load risk patterns, completeness checklist and jurisdiction knowledge, resolving extends chains and overrides.",
            "inputSchema": contracts::load_knowledge_schema()
        }),
        json!({
            "name": contracts::TOOL_LIST_JURISDICTIONS,
            "description": "List jurisdiction codes available under base/jurisdictions.",
            "inputSchema": contracts::list_jurisdictions_schema()
        }),
        json!({
            "name": contracts::TOOL_LIST_CUSTOM_FILES,
            "description": "List custom knowledge overlay files under custom/.",
            "inputSchema": contracts::list_custom_files_schema()
        }),
    ]
}

/// Tool names grouped by category, for skills that reference tools by group.
pub fn tool_categories() -> serde_json::Value {
    json!({
        "knowledge": [
            contracts::TOOL_LOAD_KNOWLEDGE,
            contracts::TOOL_LIST_JURISDICTIONS,
            contracts::TOOL_LIST_CUSTOM_FILES
        ]
    })
}
