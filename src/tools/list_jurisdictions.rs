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

    let jurisdictions = knowledge::available_jurisdictions(Some(&base_path));
    let text = if jurisdictions.is_empty() {
        "no jurisdictions available".to_string()
    } else {
        jurisdictions.join("\n")
    };

    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": {"jurisdictions": jurisdictions},
        "isError": false
    })
}
