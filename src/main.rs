use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod knowledge;
mod mcp;
mod tools;

use config::ServerConfig;

#[derive(Parser)]
#[command(name = "office-mcp")]
#[command(
    version,
    about = "Office knowledge tools over MCP, with a CLI for the same operations"
)]
struct Cli {
    /// Knowledge directory used when a call gives no base path
    #[arg(long, global = true, env = "OFFICE_MCP_KNOWLEDGE_DIR")]
    knowledge_dir: Option<PathBuf>,
    /// Log filter written to stderr (e.g. warn, office_mcp=debug)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct BasePathArgs {
    /// Knowledge directory for this call
    #[arg(long)]
    base_path: Option<String>,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct LoadKnowledgeArgs {
    #[command(flatten)]
    base: BasePathArgs,
    /// Custom overlay file, absolute or relative to the base path (repeatable)
    #[arg(long = "custom-file")]
    custom_files: Vec<String>,
    /// Jurisdiction code under base/jurisdictions
    #[arg(long)]
    jurisdiction: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Load and resolve knowledge files
    LoadKnowledge(LoadKnowledgeArgs),
    /// List available jurisdiction codes
    ListJurisdictions(BasePathArgs),
    /// List custom knowledge overlay files
    ListCustomFiles(BasePathArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    let config = ServerConfig::new(cli.knowledge_dir);

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server(&config)
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::LoadKnowledge(args) => run_load_knowledge(args, &config),
        Commands::ListJurisdictions(args) => {
            let map = build_base_args(&args);
            let result = tools::list_jurisdictions::call(&Value::Object(map), &config);
            print_tool_result(result, args.json)
        }
        Commands::ListCustomFiles(args) => {
            let map = build_base_args(&args);
            let result = tools::list_custom_files::call(&Value::Object(map), &config);
            print_tool_result(result, args.json)
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn run_load_knowledge(args: LoadKnowledgeArgs, config: &ServerConfig) -> Result<()> {
    let mut map = build_base_args(&args.base);
    if !args.custom_files.is_empty() {
        map.insert("custom_files".to_string(), json!(args.custom_files));
    }
    if let Some(jurisdiction) = args.jurisdiction {
        map.insert("jurisdiction".to_string(), json!(jurisdiction));
    }
    let result = tools::load_knowledge::call(&Value::Object(map), config);
    print_tool_result(result, args.base.json)
}

fn build_base_args(args: &BasePathArgs) -> Map<String, Value> {
    let mut map = Map::new();
    if let Some(base_path) = &args.base_path {
        map.insert("base_path".to_string(), json!(base_path));
    }
    map
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    let is_error = result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    if is_error {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("{message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server(config: &ServerConfig) -> Result<()> {
    tracing::info!(
        knowledge_dir = %config.knowledge_dir.display(),
        "{} v{} running on stdio",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("skipping unparseable request: {err}");
                continue;
            }
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        tracing::debug!(method = ?method, id = ?id, "request");

        let response = match (method, id) {
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": mcp::contracts::PROTOCOL_VERSION,
                    "capabilities": {
                        "tools": {},
                        "resources": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("tools/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": mcp::tool_definitions()
                }
            })),
            (Some("tools/call"), Some(id)) => {
                let result = handle_tool_call(&request, config);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            (Some("resources/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "resources": mcp::resources::resource_definitions()
                }
            })),
            (Some("resources/read"), Some(id)) => Some(handle_resource_read(&request, id, config)),
            _ => None,
        };

        if let Some(response) = response {
            let serialized =
                serde_json::to_string(&response).context("failed to serialize response")?;
            writeln!(writer, "{serialized}").context("failed to write response")?;
            writer.flush().context("failed to flush response")?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

fn handle_tool_call(request: &serde_json::Value, config: &ServerConfig) -> serde_json::Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(mcp::errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            mcp::errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    match name {
        mcp::contracts::TOOL_LOAD_KNOWLEDGE => tools::load_knowledge::call(&args, config),
        mcp::contracts::TOOL_LIST_JURISDICTIONS => tools::list_jurisdictions::call(&args, config),
        mcp::contracts::TOOL_LIST_CUSTOM_FILES => tools::list_custom_files::call(&args, config),
        _ => tools::error_result(
            mcp::errors::INVALID_INPUT,
            format!("unknown tool: {name}"),
            Some(name),
        ),
    }
}

fn handle_resource_read(
    request: &serde_json::Value,
    id: serde_json::Value,
    config: &ServerConfig,
) -> serde_json::Value {
    let uri = request
        .get("params")
        .and_then(|value| value.get("uri"))
        .and_then(|value| value.as_str());

    let result = uri.and_then(|uri| mcp::resources::read_resource(uri, config));
    match result {
        Some(result) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result
        }),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": mcp::errors::RPC_INVALID_PARAMS,
                "message": format!("unknown resource: {}", uri.unwrap_or("<missing uri>"))
            }
        }),
    }
}
