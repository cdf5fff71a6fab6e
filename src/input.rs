use crate::knowledge::LoadOptions;
use crate::mcp::errors;
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InputError {
    pub kind: &'static str,
    pub message: String,
}

impl InputError {
    fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(errors::INVALID_INPUT, message)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for InputError {}

/// Arguments accepted by `knowledge.load`.
pub fn load_options(args: &Value) -> Result<LoadOptions, InputError> {
    let obj = arguments_object(args, &["base_path", "custom_files", "jurisdiction"])?;

    let custom_files = match obj.get("custom_files") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .filter(|path| !path.is_empty())
                    .map(PathBuf::from)
                    .ok_or_else(|| {
                        InputError::invalid_input("custom_files must contain non-empty strings")
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(InputError::invalid_input(
                "custom_files must be an array of strings",
            ));
        }
    };

    let jurisdiction = optional_string(obj, "jurisdiction")?;
    if let Some(code) = &jurisdiction {
        validate_jurisdiction_code(code)?;
    }

    Ok(LoadOptions {
        base_path: optional_string(obj, "base_path")?.map(PathBuf::from),
        custom_files,
        jurisdiction,
    })
}

/// Arguments accepted by the discovery tools: only an optional `base_path`.
pub fn base_path(args: &Value) -> Result<Option<PathBuf>, InputError> {
    let obj = arguments_object(args, &["base_path"])?;
    Ok(optional_string(obj, "base_path")?.map(PathBuf::from))
}

fn arguments_object<'a>(
    args: &'a Value,
    allowed: &[&str],
) -> Result<&'a Map<String, Value>, InputError> {
    let obj = args
        .as_object()
        .ok_or_else(|| InputError::invalid_input("arguments must be an object"))?;
    if let Some(key) = obj.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(InputError::invalid_input(format!(
            "unknown argument: {key}"
        )));
    }
    Ok(obj)
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, InputError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) if value.is_empty() => Err(InputError::invalid_input(
            format!("{key} must not be empty"),
        )),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(InputError::invalid_input(format!("{key} must be a string"))),
    }
}

// Codes name a file under base/jurisdictions, so they must stay a bare stem.
fn validate_jurisdiction_code(code: &str) -> Result<(), InputError> {
    let valid = code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(InputError::invalid_input(
            "jurisdiction must contain only letters, digits, '-' or '_'",
        ))
    }
}
