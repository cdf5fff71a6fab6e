use crate::config::ServerConfig;
use crate::input::base_path;
use crate::knowledge;
use crate::tools::error_result;
use serde_json::{Value, json};

pub fn call(args: &Value, config: &ServerConfig) -> Value {
    let base_path = match base_path(args) {
        Ok(path) => path.unwrap_or_else(|| config.knowledge_dir.clone()),
        Err(err) => return error_result(err.kind, err.message, None),
    };

    let files = knowledge::custom_knowledge_files(Some(&base_path));
    let text = if files.is_empty() {
        "no custom knowledge files".to_string()
    } else {
        files.join("\n")
    };

    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": {"files": files},
        "isError": false
    })
}
