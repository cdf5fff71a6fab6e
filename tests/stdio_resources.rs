use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

#[test]
fn resources_list_and_read() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_office-mcp"))
        .args(["serve", "--stdio"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin available");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout available"));

    let requests = [
        serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"}),
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "resources/read",
            "params": {"uri": "office://skills/categories"}
        }),
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "resources/read",
            "params": {"uri": "office://unknown"}
        }),
    ];
    for request in &requests {
        writeln!(stdin, "{}", serde_json::to_string(request)?)?;
    }
    stdin.flush()?;

    let mut responses = Vec::new();
    for _ in 0..requests.len() {
        let mut line = String::new();
        stdout.read_line(&mut line)?;
        responses.push(serde_json::from_str::<serde_json::Value>(line.trim())?);
    }

    let uris: Vec<&str> = responses[0]["result"]["resources"]
        .as_array()
        .expect("resources array")
        .iter()
        .filter_map(|resource| resource.get("uri").and_then(|v| v.as_str()))
        .collect();
    assert!(uris.contains(&"office://skills/categories"));
    assert!(uris.contains(&"office://knowledge/jurisdictions"));

    let text = responses[1]["result"]["contents"][0]["text"]
        .as_str()
        .expect("text content");
    let categories: serde_json::Value = serde_json::from_str(text)?;
    assert_eq!(
        categories["knowledge"][0],
        serde_json::json!("knowledge.load")
    );

    assert_eq!(responses[2]["error"]["code"], serde_json::json!(-32602));

    let _ = child.kill();
    Ok(())
}
