use crate::analysis::{sentiment, similarity, visualize};
use crate::auth::CredentialStore;
use crate::extract;
use crate::health;
use crate::nlp::keywords::extract_keywords;
use crate::nlp::NlpContext;
use crate::services::speech::{self, SpeechSynthesizer};
use crate::services::translate::{self, Translator};
use crate::summarize::{OverflowPolicy, SentenceOrder, Summarizer, SummaryOptions};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_WORD_BUDGET: usize = 100;
const DEFAULT_KEYWORDS: usize = 15;
const FILE_KEYWORDS: usize = 20;

/// Every tool `ToolContext::call` answers to.
const TOOL_NAMES: &[&str] = &[
    "register",
    "login",
    "logout",
    "summarize",
    "extract_keywords",
    "analyze_sentiment",
    "compare_similarity",
    "word_cloud",
    "keyword_frequencies",
    "text_metrics",
    "translate",
    "text_to_speech",
    "extract_file",
    "save_text",
    "list_texts",
    "list_languages",
    "metrics",
    "health_check",
];

/// Server-wide settings taken from the configuration.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub summary: SummaryOptions,
    pub allow_anonymous: bool,
    pub max_input_chars: usize,
    pub speech_dir: PathBuf,
    pub store_path: PathBuf,
    pub translate_url: String,
    pub speech_url: String,
    pub http_timeout: Duration,
}

/// Everything a tool call can touch. Shared by `Arc` with the blocking pool.
pub struct ToolContext {
    pub nlp: Arc<NlpContext>,
    pub summarizer: Arc<dyn Summarizer>,
    pub translator: Arc<dyn Translator>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub store: Arc<CredentialStore>,
    pub settings: ToolSettings,
    pub metrics: ToolMetrics,
}

impl ToolContext {
    /// Run one tool. Blocking: network and file work happen inline.
    pub fn call(&self, name: &str, arguments: serde_json::Value) -> anyhow::Result<serde_json::Value> {
        if is_text_tool(name) {
            self.authorize(&arguments)?;
        }
        match name {
            "register" => {
                let p: RegisterArgs = serde_json::from_value(arguments)?;
                self.store.register(&p.username, &p.password, &p.confirm_password)?;
                Ok(json!({"registered": true, "username": p.username}))
            }
            "login" => {
                let p: LoginArgs = serde_json::from_value(arguments)?;
                let session = self.store.login(&p.username, &p.password)?;
                Ok(json!({
                    "session": session.token,
                    "username": session.username,
                    "created_at": session.created_at.unix_timestamp(),
                }))
            }
            "logout" => {
                let p: SessionArgs = serde_json::from_value(arguments)?;
                self.store.logout(&p.session)?;
                Ok(json!({"logged_out": true}))
            }
            "summarize" => {
                let p: SummarizeArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                let options = SummaryOptions {
                    order: p.order.unwrap_or(self.settings.summary.order),
                    overflow: p.overflow.unwrap_or(self.settings.summary.overflow),
                };
                let budget = p.word_budget.unwrap_or(DEFAULT_WORD_BUDGET);
                let res = self.summarizer.summarize(&p.text, budget, options)?;
                let mut v = serde_json::to_value(&res)?;
                v["text"] = json!(res.summary);
                Ok(v)
            }
            "extract_keywords" => {
                let p: KeywordArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                let kw = extract_keywords(&self.nlp, &p.text, p.top_n.unwrap_or(DEFAULT_KEYWORDS))?;
                Ok(json!({
                    "keywords": kw.terms(),
                    "entries": kw.entries(),
                    "text": kw.terms().join(", "),
                }))
            }
            "analyze_sentiment" => {
                let p: TextArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                Ok(serde_json::to_value(sentiment::analyze_sentiment(&p.text))?)
            }
            "compare_similarity" => {
                let p: CompareArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text_a)?;
                self.check_size(&p.text_b)?;
                let report = similarity::compare(self.nlp.stopwords(), &p.text_a, &p.text_b)?;
                Ok(serde_json::to_value(report)?)
            }
            "word_cloud" => {
                let p: CloudArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                let max = p.max_terms.unwrap_or(visualize::DEFAULT_CLOUD_TERMS);
                Ok(json!({"terms": visualize::word_cloud(&self.nlp, &p.text, max)}))
            }
            "keyword_frequencies" => {
                let p: KeywordArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                let top_n = p.top_n.unwrap_or(visualize::DEFAULT_FREQUENCY_TERMS);
                Ok(json!({"frequencies": visualize::keyword_frequencies(&self.nlp, &p.text, top_n)}))
            }
            "text_metrics" => {
                let p: TextArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                Ok(serde_json::to_value(visualize::text_metrics(&self.nlp, &p.text))?)
            }
            "translate" => {
                let p: TranslateArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                Ok(serde_json::to_value(self.translator.translate(&p.text, &p.target)?)?)
            }
            "text_to_speech" => {
                let p: SpeechArgs = serde_json::from_value(arguments)?;
                self.check_size(&p.text)?;
                let language = p.language.as_deref().unwrap_or("en");
                let audio = self.speech.synthesize(&p.text, language)?;
                let path = speech::output_path(&self.settings.speech_dir, p.output_path.as_deref());
                write_file(&path, &audio)?;
                Ok(json!({"path": path, "bytes": audio.len(), "mime_type": "audio/mpeg"}))
            }
            "extract_file" => {
                let p: FileArgs = serde_json::from_value(arguments)?;
                let text = extract::extract_text(Path::new(&p.path))?;
                self.check_size(&text)?;
                let keywords = extract_keywords(&self.nlp, &text, FILE_KEYWORDS)?;
                Ok(json!({"text": text, "keywords": keywords.terms()}))
            }
            "save_text" => {
                let p: SaveTextArgs = serde_json::from_value(arguments)?;
                let username = self.store.resolve(&p.session)?;
                let id = self.store.save_text(&username, &p.text)?;
                Ok(json!({"id": id, "username": username}))
            }
            "list_texts" => {
                let p: SessionArgs = serde_json::from_value(arguments)?;
                let username = self.store.resolve(&p.session)?;
                Ok(json!({"texts": self.store.texts_for(&username)}))
            }
            "list_languages" => Ok(languages()),
            "metrics" => Ok(json!({
                "tools": self.metrics.snapshot(),
                "auth": self.store.metrics_snapshot(),
            })),
            "health_check" => {
                let s = &self.settings;
                let report = health::check_all(
                    &s.translate_url,
                    &s.speech_url,
                    s.http_timeout,
                    &s.store_path,
                    &s.speech_dir,
                );
                Ok(json!({
                    "checks": report,
                    "server": {"name": "insight-mcp", "version": env!("CARGO_PKG_VERSION")}
                }))
            }
            _ => anyhow::bail!("unknown tool: {name}"),
        }
    }

    fn authorize(&self, arguments: &serde_json::Value) -> anyhow::Result<()> {
        if self.settings.allow_anonymous {
            return Ok(());
        }
        let token = arguments
            .get("session")
            .and_then(|s| s.as_str())
            .ok_or_else(|| anyhow::anyhow!("login required: pass a session token from the login tool"))?;
        self.store.resolve(token)?;
        Ok(())
    }

    fn check_size(&self, text: &str) -> anyhow::Result<()> {
        let limit = self.settings.max_input_chars;
        if text.chars().nth(limit).is_some() {
            anyhow::bail!("input text exceeds {limit} characters");
        }
        Ok(())
    }
}

/// Tools that process text and need a session unless anonymous access is on.
fn is_text_tool(name: &str) -> bool {
    matches!(
        name,
        "summarize"
            | "extract_keywords"
            | "analyze_sentiment"
            | "compare_similarity"
            | "word_cloud"
            | "keyword_frequencies"
            | "text_metrics"
            | "translate"
            | "text_to_speech"
            | "extract_file"
    )
}

pub fn languages() -> serde_json::Value {
    let table = |entries: &[(&str, &str)]| {
        entries
            .iter()
            .map(|(code, name)| json!({"code": code, "name": name}))
            .collect::<Vec<_>>()
    };
    json!({
        "translation": table(translate::LANGUAGES),
        "speech": table(speech::LANGUAGES),
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

#[derive(Default)]
pub struct ToolMetrics {
    pub calls: AtomicU64,
    pub failures: AtomicU64,
    per_tool: DashMap<String, u64>,
}

impl ToolMetrics {
    /// Names outside the tool list share the `unknown` counter.
    pub fn record(&self, name: &str, ok: bool) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        let key = if TOOL_NAMES.contains(&name) { name } else { "unknown" };
        *self.per_tool.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn snapshot(&self) -> ToolMetricsSnapshot {
        ToolMetricsSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            by_tool: self
                .per_tool
                .iter()
                .map(|e| (e.key().clone(), *e.value()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToolMetricsSnapshot {
    pub calls: u64,
    pub failures: u64,
    pub by_tool: BTreeMap<String, u64>,
}

pub fn list_tools_schema() -> Vec<serde_json::Value> {
    let session = json!({"type": "string", "description": "Session token from login"});
    let text = json!({"type": "string"});
    vec![
        json!({"name": "register", "description": "Create a user account", "inputSchema": {"type": "object", "required": ["username", "password", "confirm_password"], "properties": {
            "username": {"type": "string"},
            "password": {"type": "string"},
            "confirm_password": {"type": "string"}
        }}}),
        json!({"name": "login", "description": "Log in and obtain a session token", "inputSchema": {"type": "object", "required": ["username", "password"], "properties": {
            "username": {"type": "string"},
            "password": {"type": "string"}
        }}}),
        json!({"name": "logout", "description": "End a session", "inputSchema": {"type": "object", "required": ["session"], "properties": {
            "session": session
        }}}),
        json!({"name": "summarize", "description": "Extractive summary within a word budget", "inputSchema": {"type": "object", "required": ["text"], "properties": {
            "session": session,
            "text": text,
            "word_budget": {"type": "number", "minimum": 1},
            "order": {"type": "string", "enum": ["score", "document"]},
            "overflow": {"type": "string", "enum": ["skip", "stop"]}
        }}}),
        json!({"name": "extract_keywords", "description": "Most frequent nouns and verb lemmas", "inputSchema": {"type": "object", "required": ["text"], "properties": {
            "session": session,
            "text": text,
            "top_n": {"type": "number", "minimum": 1}
        }}}),
        json!({"name": "analyze_sentiment", "description": "Per-sentence and overall sentiment", "inputSchema": {"type": "object", "required": ["text"], "properties": {
            "session": session,
            "text": text
        }}}),
        json!({"name": "compare_similarity", "description": "TF-IDF cosine similarity of two texts", "inputSchema": {"type": "object", "required": ["text_a", "text_b"], "properties": {
            "session": session,
            "text_a": text,
            "text_b": text
        }}}),
        json!({"name": "word_cloud", "description": "Weighted terms for a word cloud", "inputSchema": {"type": "object", "required": ["text"], "properties": {
            "session": session,
            "text": text,
            "max_terms": {"type": "number", "minimum": 1}
        }}}),
        json!({"name": "keyword_frequencies", "description": "Frequencies of the top keywords", "inputSchema": {"type": "object", "required": ["text"], "properties": {
            "session": session,
            "text": text,
            "top_n": {"type": "number", "minimum": 1}
        }}}),
        json!({"name": "text_metrics", "description": "Length, vocabulary and readability counts", "inputSchema": {"type": "object", "required": ["text"], "properties": {
            "session": session,
            "text": text
        }}}),
        json!({"name": "translate", "description": "Translate text to a target language", "inputSchema": {"type": "object", "required": ["text", "target"], "properties": {
            "session": session,
            "text": text,
            "target": {"type": "string", "description": "Language code or English name"}
        }}}),
        json!({"name": "text_to_speech", "description": "Synthesize speech to an MP3 file", "inputSchema": {"type": "object", "required": ["text"], "properties": {
            "session": session,
            "text": text,
            "language": {"type": "string", "enum": ["en", "es", "fr", "de", "hi", "te"]},
            "output_path": {"type": "string"}
        }}}),
        json!({"name": "extract_file", "description": "Extract text and keywords from a PDF, DOCX or text file", "inputSchema": {"type": "object", "required": ["path"], "properties": {
            "session": session,
            "path": {"type": "string"}
        }}}),
        json!({"name": "save_text", "description": "Save text for the logged-in user", "inputSchema": {"type": "object", "required": ["session", "text"], "properties": {
            "session": session,
            "text": text
        }}}),
        json!({"name": "list_texts", "description": "Texts saved by the logged-in user", "inputSchema": {"type": "object", "required": ["session"], "properties": {
            "session": session
        }}}),
        json!({"name": "list_languages", "description": "Supported translation and speech languages", "inputSchema": {"type": "object", "properties": {}}}),
        json!({"name": "metrics", "description": "Tool call and account counters", "inputSchema": {"type": "object", "properties": {}}}),
        json!({"name": "health_check", "description": "Reachability of remote services and writable paths", "inputSchema": {"type": "object", "properties": {}}}),
    ]
}

#[derive(Debug, Deserialize)]
struct RegisterArgs {
    username: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Deserialize)]
struct LoginArgs {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SessionArgs {
    session: String,
}

#[derive(Debug, Deserialize)]
struct TextArgs {
    text: String,
}

#[derive(Debug, Deserialize)]
struct SummarizeArgs {
    text: String,
    word_budget: Option<usize>,
    order: Option<SentenceOrder>,
    overflow: Option<OverflowPolicy>,
}

#[derive(Debug, Deserialize)]
struct KeywordArgs {
    text: String,
    top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CompareArgs {
    text_a: String,
    text_b: String,
}

#[derive(Debug, Deserialize)]
struct CloudArgs {
    text: String,
    max_terms: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TranslateArgs {
    text: String,
    target: String,
}

#[derive(Debug, Deserialize)]
struct SpeechArgs {
    text: String,
    language: Option<String>,
    output_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileArgs {
    path: String,
}

#[derive(Debug, Deserialize)]
struct SaveTextArgs {
    session: String,
    text: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use crate::services::translate::Translation;
    use crate::summarize::ExtractiveSummarizer;
    use bytes::Bytes;

    struct EchoTranslator;
    impl Translator for EchoTranslator {
        fn translate(&self, text: &str, target: &str) -> Result<Translation, ServiceError> {
            let code = translate::resolve_language(target)?;
            Ok(Translation {
                text: format!("[{code}] {text}"),
                source: "en".into(),
                target: code.into(),
            })
        }
    }

    struct FixedSpeech;
    impl SpeechSynthesizer for FixedSpeech {
        fn synthesize(&self, _text: &str, language: &str) -> Result<Bytes, ServiceError> {
            speech::resolve_language(language)?;
            Ok(Bytes::from_static(b"ID3fake"))
        }
    }

    pub(crate) fn context(allow_anonymous: bool, speech_dir: &Path) -> ToolContext {
        let nlp = Arc::new(NlpContext::english());
        ToolContext {
            summarizer: Arc::new(ExtractiveSummarizer::new(nlp.clone())),
            nlp,
            translator: Arc::new(EchoTranslator),
            speech: Arc::new(FixedSpeech),
            store: Arc::new(CredentialStore::in_memory()),
            settings: ToolSettings {
                summary: SummaryOptions::default(),
                allow_anonymous,
                max_input_chars: 10_000,
                speech_dir: speech_dir.to_path_buf(),
                store_path: speech_dir.join("store.json"),
                translate_url: "http://127.0.0.1:9".into(),
                speech_url: "http://127.0.0.1:9".into(),
                http_timeout: Duration::from_millis(200),
            },
            metrics: ToolMetrics::default(),
        }
    }

    fn login(ctx: &ToolContext) -> String {
        ctx.call(
            "register",
            json!({"username": "alice", "password": "secret1", "confirm_password": "secret1"}),
        )
        .unwrap();
        let v = ctx
            .call("login", json!({"username": "alice", "password": "secret1"}))
            .unwrap();
        v["session"].as_str().unwrap().to_string()
    }

    const CAT_DOC: &str = "The cat sat on the mat. The cat ate a fish. Fish are food.";

    #[test]
    fn text_tools_require_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(false, dir.path());
        let err = ctx.call("summarize", json!({"text": CAT_DOC})).unwrap_err();
        assert!(err.to_string().contains("login required"));
        let err = ctx
            .call("summarize", json!({"text": CAT_DOC, "session": "bogus"}))
            .unwrap_err();
        assert!(err.to_string().contains("invalid or expired session"));

        let session = login(&ctx);
        let v = ctx
            .call("summarize", json!({"text": CAT_DOC, "session": session, "word_budget": 6}))
            .unwrap();
        assert_eq!(v["summary"], "The cat sat on the mat.");
        assert_eq!(v["word_count"], 6);
        assert_eq!(v["text"], v["summary"]);
    }

    #[test]
    fn anonymous_mode_and_chaining() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(true, dir.path());
        let summary = ctx
            .call("summarize", json!({"text": CAT_DOC, "word_budget": 5}))
            .unwrap();
        let translated = ctx
            .call("translate", json!({"text": summary["text"], "target": "Spanish"}))
            .unwrap();
        assert_eq!(translated["text"], "[es] The cat ate a fish.");

        let kw = ctx.call("extract_keywords", json!({"text": CAT_DOC, "top_n": 2})).unwrap();
        assert_eq!(kw["keywords"], json!(["cat", "fish"]));

        let err = ctx.call("translate", json!({"text": "hi", "target": "elvish"})).unwrap_err();
        assert!(err.to_string().contains("unsupported language"));
    }

    #[test]
    fn analysis_tools_return_structured_results() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(true, dir.path());
        let s = ctx
            .call("analyze_sentiment", json!({"text": "I love this product. It is great!"}))
            .unwrap();
        assert_eq!(s["label"], "positive");
        let sim = ctx
            .call("compare_similarity", json!({"text_a": CAT_DOC, "text_b": CAT_DOC}))
            .unwrap();
        assert_eq!(sim["percent"], 100.0);
        assert_eq!(sim["band"], "very_high");
        let cloud = ctx.call("word_cloud", json!({"text": CAT_DOC})).unwrap();
        assert_eq!(cloud["terms"][0]["weight"], 1.0);
        let metrics = ctx.call("text_metrics", json!({"text": "The cat sat. The dog ran."})).unwrap();
        assert_eq!(metrics["sentences"], 2);
        let freq = ctx.call("keyword_frequencies", json!({"text": CAT_DOC})).unwrap();
        assert!(freq["frequencies"].as_array().is_some_and(|a| !a.is_empty()));
    }

    #[test]
    fn speech_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(true, dir.path());
        let v = ctx
            .call("text_to_speech", json!({"text": "Hello there", "language": "fr"}))
            .unwrap();
        let path = PathBuf::from(v["path"].as_str().unwrap());
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3fake");

        let chosen = dir.path().join("out").join("custom.mp3");
        ctx.call(
            "text_to_speech",
            json!({"text": "Hello", "output_path": chosen.to_string_lossy()}),
        )
        .unwrap();
        assert!(chosen.exists());
    }

    #[test]
    fn saved_texts_round_trip_and_file_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(false, dir.path());
        let session = login(&ctx);
        let saved = ctx
            .call("save_text", json!({"session": session, "text": CAT_DOC}))
            .unwrap();
        assert_eq!(saved["id"], 1);
        let listed = ctx.call("list_texts", json!({"session": session})).unwrap();
        assert_eq!(listed["texts"][0]["text"], CAT_DOC);

        let file = dir.path().join("doc.txt");
        std::fs::write(&file, CAT_DOC).unwrap();
        let v = ctx
            .call("extract_file", json!({"session": session, "path": file.to_string_lossy()}))
            .unwrap();
        assert_eq!(v["text"], CAT_DOC);
        assert_eq!(v["keywords"][0], "cat");

        ctx.call("logout", json!({"session": session})).unwrap();
        assert!(ctx.call("list_texts", json!({"session": session})).is_err());
    }

    #[test]
    fn input_size_limit_and_unknown_tool() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(true, dir.path());
        ctx.settings.max_input_chars = 10;
        let err = ctx.call("text_metrics", json!({"text": "far more than ten chars"})).unwrap_err();
        assert!(err.to_string().contains("exceeds 10 characters"));
        assert!(ctx.call("no_such_tool", json!({})).is_err());
    }

    #[test]
    fn metrics_record_calls_and_failures() {
        let m = ToolMetrics::default();
        m.record("summarize", true);
        m.record("summarize", false);
        m.record("login", true);
        let snap = m.snapshot();
        assert_eq!(snap.calls, 3);
        assert_eq!(snap.failures, 1);
        assert_eq!(snap.by_tool["summarize"], 2);
    }

    #[test]
    fn unknown_tool_names_share_one_counter() {
        let m = ToolMetrics::default();
        for i in 0..50 {
            m.record(&format!("made_up_{i}"), false);
        }
        m.record("login", true);
        let snap = m.snapshot();
        assert_eq!(snap.calls, 51);
        assert_eq!(snap.by_tool.len(), 2);
        assert_eq!(snap.by_tool["unknown"], 50);
    }

    #[test]
    fn register_requires_matching_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(false, dir.path());
        assert!(ctx
            .call("register", json!({"username": "alice", "password": "secret1"}))
            .is_err());
        let err = ctx
            .call(
                "register",
                json!({"username": "alice", "password": "secret1", "confirm_password": "secret2"}),
            )
            .unwrap_err();
        assert!(err.to_string().contains("Passwords do not match"), "{err}");
        assert!(ctx.call("login", json!({"username": "alice", "password": "secret1"})).is_err());
    }

    #[test]
    fn schema_lists_every_tool() {
        let names: Vec<String> = list_tools_schema()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, TOOL_NAMES);
        for tool in ["summarize", "translate", "save_text", "health_check"] {
            assert!(names.iter().any(|n| n == tool), "missing {tool}");
        }
        assert_eq!(languages()["speech"].as_array().unwrap().len(), 6);
    }
}
