use crate::summarize::{OverflowPolicy, SentenceOrder};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "insight-mcp")]
#[command(
    about = "MCP server for text summarization, keywords, sentiment, similarity, translation and speech",
    long_about = None
)]
pub struct AppConfig {
    /// JSON file holding users and saved texts.
    #[arg(long, env = "INSIGHT_STORE_PATH", default_value = "insight-store.json")]
    pub store_path: PathBuf,

    #[arg(long, env = "SUMMARY_BACKEND", default_value = "extractive")]
    pub summary_backend: String,

    #[arg(long, env = "SUMMARY_ORDER", default_value_t = SentenceOrder::Score)]
    pub summary_order: SentenceOrder,

    #[arg(long, env = "SUMMARY_OVERFLOW", default_value_t = OverflowPolicy::Skip)]
    pub summary_overflow: OverflowPolicy,

    #[arg(long, env = "TRANSLATE_URL", default_value = crate::services::translate::DEFAULT_TRANSLATE_URL)]
    pub translate_url: String,

    #[arg(long, env = "SPEECH_URL", default_value = crate::services::speech::DEFAULT_SPEECH_URL)]
    pub speech_url: String,

    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 15)]
    pub http_timeout_secs: u64,

    #[arg(long, env = "SPEECH_DIR", default_value = ".")]
    pub speech_dir: PathBuf,

    /// Serve text tools without a login session.
    #[arg(long, env = "ALLOW_ANONYMOUS", default_value_t = false)]
    pub allow_anonymous: bool,

    #[arg(long, env = "MAX_INPUT_CHARS", default_value_t = 1_000_000)]
    pub max_input_chars: usize,

    /// Probe the remote services at startup.
    #[arg(long, env = "STARTUP_HEALTH_CHECK", default_value_t = false)]
    pub startup_health_check: bool,
}

impl AppConfig {
    pub fn from_env_and_args() -> Self {
        Self::parse()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.summary_backend.as_str(), "extractive" | "lead") {
            return Err(format!(
                "unknown summary backend: {} (expected extractive|lead)",
                self.summary_backend
            ));
        }
        url::Url::parse(&self.translate_url)
            .map_err(|_| "Invalid TRANSLATE_URL URL format".to_string())?;
        url::Url::parse(&self.speech_url)
            .map_err(|_| "Invalid SPEECH_URL URL format".to_string())?;
        if self.http_timeout_secs == 0 {
            return Err("http_timeout_secs must be > 0".into());
        }
        if self.max_input_chars == 0 {
            return Err("max_input_chars must be > 0".into());
        }
        if self.store_path.as_os_str().is_empty() {
            return Err("store_path must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("insight-mcp").chain(args.iter().copied()))
            .expect("parse args")
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--summary-backend",
            "lead",
            "--summary-order",
            "document",
            "--summary-overflow",
            "stop",
            "--allow-anonymous",
        ]);
        assert_eq!(cfg.summary_backend, "lead");
        assert_eq!(cfg.summary_order, SentenceOrder::Document);
        assert_eq!(cfg.summary_overflow, OverflowPolicy::Stop);
        assert!(cfg.allow_anonymous);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = parse(&["--summary-backend", "ollama"]);
        assert!(cfg.validate().unwrap_err().contains("unknown summary backend"));
        cfg.summary_backend = "extractive".into();
        cfg.translate_url = "not a url".into();
        assert!(cfg.validate().is_err());
        cfg.translate_url = "http://localhost:1".into();
        cfg.http_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
