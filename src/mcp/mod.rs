mod framing;
pub mod tools;

use crate::mcp::framing::{read_message, write_error, write_response};
use crate::mcp::tools::{languages, list_tools_schema, ToolContext};
use serde_json::json;
use std::sync::Arc;

const SERVER_NAME: &str = "insight-mcp";
const METRICS_URI: &str = "mcp://insight-mcp/metrics";
const LANGUAGES_URI: &str = "mcp://insight-mcp/languages";

pub struct StdioMcpServer {
    ctx: Arc<ToolContext>,
}

impl StdioMcpServer {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut reader = std::io::BufReader::new(stdin.lock());
        let mut writer = std::io::BufWriter::new(stdout.lock());
        tracing::info!("run loop started: waiting for MCP requests on stdin");
        loop {
            let msg = match read_message(&mut reader) {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!(error = ?e, "stdin closed or invalid frame");
                    break;
                }
            };
            let req: serde_json::Value = match serde_json::from_slice(&msg) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = ?e, "invalid JSON");
                    continue;
                }
            };

            let method = req.get("method").and_then(|m| m.as_str()).unwrap_or("");
            let params = req.get("params").cloned().unwrap_or(json!({}));
            // Notifications carry no id and get no reply.
            let Some(id) = req.get("id").filter(|v| !v.is_null()).cloned() else {
                tracing::debug!(%method, "notification");
                continue;
            };
            tracing::info!(%method, id = %id, "received request");
            match self.handle(method, params).await {
                Ok(result) => write_response(&mut writer, id, result)?,
                Err(RpcError { code, message }) => write_error(&mut writer, id, code, &message)?,
            }
        }
        Ok(())
    }

    async fn handle(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value, RpcError> {
        match method {
            "initialize" => {
                let client_proto = params
                    .get("protocolVersion")
                    .and_then(|x| x.as_str())
                    .unwrap_or("2024-11-05");
                Ok(json!({
                    "protocolVersion": client_proto,
                    "capabilities": {
                        "tools": {"list": true, "call": true},
                        "prompts": {"list": true},
                        "resources": {"list": true, "read": true, "subscribe": false}
                    },
                    "serverInfo": server_info()
                }))
            }
            "server/info" => Ok(json!({"serverInfo": server_info()})),
            "tools/list" => Ok(json!({"tools": list_tools_schema()})),
            "prompts/list" => Ok(json!({"prompts": []})),
            "resources/list" => Ok(json!({"resources": [
                {
                    "uri": METRICS_URI,
                    "name": "Server metrics snapshot",
                    "description": "Tool call and account counters",
                    "mimeType": "application/json"
                },
                {
                    "uri": LANGUAGES_URI,
                    "name": "Supported languages",
                    "description": "Languages accepted by the translate and text_to_speech tools",
                    "mimeType": "application/json"
                }
            ]})),
            "resources/read" => {
                let uri = params.get("uri").and_then(|x| x.as_str()).unwrap_or("");
                let body = match uri {
                    METRICS_URI => json!({
                        "tools": self.ctx.metrics.snapshot(),
                        "auth": self.ctx.store.metrics_snapshot(),
                    }),
                    LANGUAGES_URI => languages(),
                    _ => return Err(RpcError::new(-32602, "Unknown resource uri")),
                };
                let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".into());
                Ok(json!({"contents": [{"uri": uri, "mimeType": "application/json", "text": text}]}))
            }
            "tools/call" => {
                let name = params
                    .get("name")
                    .and_then(|x| x.as_str())
                    .unwrap_or("")
                    .to_string();
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                match self.dispatch_tool(&name, arguments).await {
                    Ok(v) => Ok(json!({"content": [{"type": "json", "json": v}], "isError": false})),
                    Err(e) => {
                        tracing::warn!(tool = %name, error = %e, "tool call failed");
                        Err(RpcError::new(-32001, &e.to_string()))
                    }
                }
            }
            _ => Err(RpcError::new(-32601, "method not found")),
        }
    }

    /// Run a tool on the blocking pool; requests are still handled one at a time.
    async fn dispatch_tool(&self, name: &str, arguments: serde_json::Value) -> anyhow::Result<serde_json::Value> {
        let ctx = self.ctx.clone();
        let tool = name.to_string();
        let result = tokio::task::spawn_blocking(move || ctx.call(&tool, arguments)).await?;
        self.ctx.metrics.record(name, result.is_ok());
        result
    }
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

fn server_info() -> serde_json::Value {
    json!({"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")})
}
