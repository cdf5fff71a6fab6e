use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_lists_shipped_jurisdictions() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_office-mcp"))
        .env_remove("OFFICE_MCP_KNOWLEDGE_DIR")
        .args(["list-jurisdictions", "--json"])
        .output()?;

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let jurisdictions = value["jurisdictions"].as_array().expect("array");
    assert!(jurisdictions.contains(&serde_json::json!("cn")));
    Ok(())
}

#[test]
fn cli_lists_shipped_custom_files() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_office-mcp"))
        .env_remove("OFFICE_MCP_KNOWLEDGE_DIR")
        .args(["list-custom-files"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("custom/strict_employment.json"));
    Ok(())
}

#[test]
fn cli_missing_directory_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = Command::new(env!("CARGO_BIN_EXE_office-mcp"))
        .args(["--knowledge-dir", dir.path().to_string_lossy().as_ref()])
        .args(["list-jurisdictions", "--json"])
        .output()?;

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value, serde_json::json!({"jurisdictions": []}));
    Ok(())
}
