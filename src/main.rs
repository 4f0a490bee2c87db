use std::sync::Arc;

mod analysis;
mod auth;
mod config;
mod errors;
mod extract;
mod health;
mod logging;
mod mcp;
mod nlp;
mod services;
mod summarize;

use crate::auth::CredentialStore;
use crate::config::AppConfig;
use crate::mcp::tools::{ToolContext, ToolMetrics, ToolSettings};
use crate::mcp::StdioMcpServer;
use crate::nlp::NlpContext;
use crate::services::speech::GoogleSpeech;
use crate::services::translate::GoogleTranslator;
use crate::summarize::{build_summarizer, SummaryOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cfg = AppConfig::from_env_and_args();
    if let Err(e) = cfg.validate() {
        tracing::error!(config_error = %e, "invalid config");
        anyhow::bail!("invalid config: {e}");
    }

    let nlp = Arc::new(NlpContext::english());
    let summarizer = build_summarizer(&cfg.summary_backend, nlp.clone());
    let store = Arc::new(CredentialStore::open(&cfg.store_path)?);
    let timeout = cfg.http_timeout();

    let ctx = Arc::new(ToolContext {
        nlp,
        summarizer,
        translator: Arc::new(GoogleTranslator::new(cfg.translate_url.clone(), timeout)),
        speech: Arc::new(GoogleSpeech::new(cfg.speech_url.clone(), timeout)),
        store,
        settings: ToolSettings {
            summary: SummaryOptions {
                order: cfg.summary_order,
                overflow: cfg.summary_overflow,
            },
            allow_anonymous: cfg.allow_anonymous,
            max_input_chars: cfg.max_input_chars,
            speech_dir: cfg.speech_dir.clone(),
            store_path: cfg.store_path.clone(),
            translate_url: cfg.translate_url.clone(),
            speech_url: cfg.speech_url.clone(),
            http_timeout: timeout,
        },
        metrics: ToolMetrics::default(),
    });

    // Startup health checks (best-effort, logged only)
    if cfg.startup_health_check {
        let (translate_url, speech_url) = (cfg.translate_url.clone(), cfg.speech_url.clone());
        let (store_path, speech_dir) = (cfg.store_path.clone(), cfg.speech_dir.clone());
        match tokio::task::spawn_blocking(move || {
            health::check_all(&translate_url, &speech_url, timeout, &store_path, &speech_dir)
        })
        .await
        {
            Ok(report) => tracing::info!(
                translate_ok = report.translate_ok,
                speech_ok = report.speech_ok,
                store_writable = report.store_writable,
                speech_dir_writable = report.speech_dir_writable,
                "startup health check"
            ),
            Err(e) => tracing::warn!(error = %e, "startup health check did not complete"),
        }
    }
    tracing::info!(
        summary_backend = %cfg.summary_backend,
        summary_order = %cfg.summary_order,
        summary_overflow = %cfg.summary_overflow,
        store = %cfg.store_path.display(),
        allow_anonymous = cfg.allow_anonymous,
        "MCP server startup complete"
    );

    let server = StdioMcpServer::new(ctx);
    // run() holds the stdio locks, so it is polled here rather than spawned.
    tokio::select! {
        res = server.run() => {
            if let Err(e) = res {
                tracing::error!(error = ?e, "server terminated with error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received shutdown signal");
        }
    }
    Ok(())
}
