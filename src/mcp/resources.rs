use crate::config::ServerConfig;
use crate::knowledge;
use crate::mcp::{contracts, tool_categories};
use serde_json::{Value, json};

pub fn resource_definitions() -> Vec<Value> {
    vec![
        json!({
            "uri": contracts::RESOURCE_CATEGORIES,
            "name": "Skill Categories",
            "description": "Available tool categories for skills to reference",
            "mimeType": "application/json"
        }),
        json!({
            "uri": contracts::RESOURCE_JURISDICTIONS,
            "name": "Knowledge Jurisdictions",
            "description": "Jurisdiction codes available in the configured knowledge directory",
            "mimeType": "application/json"
        }),
    ]
}

/// Contents for `resources/read`, or `None` for an unknown URI.
pub fn read_resource(uri: &str, config: &ServerConfig) -> Option<Value> {
    let body = match uri {
        contracts::RESOURCE_CATEGORIES => tool_categories(),
        contracts::RESOURCE_JURISDICTIONS => json!({
            "jurisdictions": knowledge::available_jurisdictions(Some(&config.knowledge_dir))
        }),
        _ => return None,
    };
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    Some(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "application/json",
            "text": text
        }]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn unknown_uri_is_none() {
        let config = ServerConfig::default();
        assert!(read_resource("office://nope", &config).is_none());
    }

    #[test]
    fn only_knowledge_resources_are_listed() {
        let uris: Vec<_> = resource_definitions()
            .iter()
            .filter_map(|resource| resource["uri"].as_str().map(str::to_string))
            .collect();
        assert_eq!(
            uris,
            vec![contracts::RESOURCE_CATEGORIES, contracts::RESOURCE_JURISDICTIONS]
        );
        assert!(read_resource("office://skills/recommended", &ServerConfig::default()).is_none());
    }

    #[test]
    fn jurisdictions_resource_reads_configured_dir() {
        let dir = tempdir().expect("tempdir");
        let jurisdictions = dir.path().join("base").join("jurisdictions");
        fs::create_dir_all(&jurisdictions).expect("dirs");
        fs::write(jurisdictions.join("de.json"), "{}").expect("write");

        let config = ServerConfig {
            knowledge_dir: dir.path().to_path_buf(),
        };
        let result = read_resource(contracts::RESOURCE_JURISDICTIONS, &config).expect("resource");
        let text = result["contents"][0]["text"].as_str().expect("text");
        let body: Value = serde_json::from_str(text).expect("json");
        assert_eq!(body, json!({"jurisdictions": ["de"]}));
    }
}
