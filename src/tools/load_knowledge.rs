use crate::config::ServerConfig;
use crate::input::load_options;
use crate::knowledge::{self, LoadedKnowledge};
use crate::mcp::errors;
use crate::tools::error_result;
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub fn call(args: &Value, config: &ServerConfig) -> Value {
    let mut options = match load_options(args) {
        Ok(options) => options,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    if options.base_path.is_none() {
        options.base_path = Some(config.knowledge_dir.clone());
    }

    let loaded = knowledge::load_knowledge(&options);
    let summary = summarize(&loaded);

    let structured = match serde_json::to_value(&loaded) {
        Ok(structured) => structured,
        Err(err) => {
            return error_result(
                errors::INTERNAL_ERROR,
                format!("failed to serialize knowledge: {err}"),
                None,
            );
        }
    };

    json!({
        "content": [{"type": "text", "text": summary}],
        "structuredContent": structured,
        "isError": false
    })
}

fn summarize(loaded: &LoadedKnowledge) -> String {
    let mut by_severity: BTreeMap<&str, usize> = BTreeMap::new();
    for pattern in loaded.risk_patterns.values() {
        *by_severity.entry(pattern.severity.as_str()).or_default() += 1;
    }
    let mut patterns = loaded.risk_patterns.len().to_string();
    if !by_severity.is_empty() {
        let counts = by_severity
            .iter()
            .map(|(severity, count)| format!("{severity}={count}"))
            .collect::<Vec<_>>()
            .join(", ");
        patterns.push_str(&format!(" ({counts})"));
    }

    let jurisdiction = loaded
        .jurisdiction
        .as_ref()
        .map(|record| record.jurisdiction.as_str())
        .unwrap_or("none");

    format!(
        "risk patterns: {patterns}, completeness items: {}, jurisdiction: {jurisdiction}, files: {}",
        loaded.completeness_items.len(),
        loaded.metadata.loaded_files.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn invalid_arguments_are_tool_errors() {
        let result = call(&json!({"custom_files": 3}), &ServerConfig::default());
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            json!(errors::INVALID_INPUT)
        );
    }

    #[test]
    fn configured_dir_is_used_without_base_path() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("base")).expect("dirs");
        fs::write(
            dir.path().join("base/risk_patterns.json"),
            r#"{"version": "1.0", "risk_patterns": {"p": {"id": "p", "name": "P", "severity": "high"}}}"#,
        )
        .expect("write");

        let config = ServerConfig::new(Some(dir.path().to_path_buf()));
        let result = call(&json!({}), &config);
        assert_eq!(result["isError"], json!(false));
        assert_eq!(
            result["structuredContent"]["riskPatterns"]["p"]["severity"],
            json!("high")
        );
        let text = result["content"][0]["text"].as_str().expect("text");
        assert!(text.starts_with("risk patterns: 1 (high=1)"));
        assert!(text.contains("jurisdiction: none"));
    }
}
