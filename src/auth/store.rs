use crate::auth::model::{SavedText, Session, StoreFile, UserRecord};
use crate::errors::AuthError;
use dashmap::DashMap;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use uuid::Uuid;

const MIN_USERNAME_CHARS: usize = 4;
const MAX_USERNAME_CHARS: usize = 20;
const MIN_PASSWORD_CHARS: usize = 6;
const MAX_PASSWORD_CHARS: usize = 50;

/// Users and saved texts in a JSON file, sessions in memory.
pub struct CredentialStore {
    path: Option<PathBuf>,
    state: Mutex<StoreFile>,
    sessions: DashMap<String, Session>,
    metrics: AuthMetrics,
}

impl CredentialStore {
    /// Open the store at `path`, creating parent directories. A missing
    /// file is an empty store; it is written on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        let state = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| AuthError::Storage(format!("read {}: {e}", path.display())))?;
            serde_json::from_str(&raw)
                .map_err(|e| AuthError::Storage(format!("parse {}: {e}", path.display())))?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AuthError::Storage(format!("create {}: {e}", parent.display()))
                })?;
            }
            StoreFile::default()
        };
        tracing::info!(
            path = %path.display(),
            users = state.users.len(),
            texts = state.texts.len(),
            "credential store opened"
        );
        Ok(Self {
            path: Some(path),
            state: Mutex::new(state),
            sessions: DashMap::new(),
            metrics: AuthMetrics::default(),
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(StoreFile::default()),
            sessions: DashMap::new(),
            metrics: AuthMetrics::default(),
        }
    }

    pub fn register(&self, username: &str, password: &str, confirm: &str) -> Result<(), AuthError> {
        validate_registration(username, password, confirm)?;
        let mut state = self.state.lock();
        if state.user(username).is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }
        state.users.push(UserRecord {
            username: username.to_string(),
            password_hash: hash_password(password),
            created_at: OffsetDateTime::now_utc(),
        });
        if let Err(e) = self.persist(&state) {
            state.users.pop();
            return Err(e);
        }
        drop(state);
        self.metrics.registrations.fetch_add(1, Ordering::Relaxed);
        tracing::info!(username, "user registered");
        Ok(())
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Please enter both username and password".into(),
            ));
        }
        let verified = {
            let state = self.state.lock();
            let user = state
                .user(username)
                .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;
            user.password_hash == hash_password(password)
        };
        if !verified {
            self.metrics.failed_logins.fetch_add(1, Ordering::Relaxed);
            return Err(AuthError::InvalidPassword);
        }
        let session = Session {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.sessions.insert(session.token.clone(), session.clone());
        self.metrics.logins.fetch_add(1, Ordering::Relaxed);
        tracing::info!(username, "user logged in");
        Ok(session)
    }

    pub fn logout(&self, token: &str) -> Result<(), AuthError> {
        let (_, session) = self
            .sessions
            .remove(token)
            .ok_or(AuthError::InvalidSession)?;
        tracing::info!(username = %session.username, "user logged out");
        Ok(())
    }

    /// Username owning the session `token`.
    pub fn resolve(&self, token: &str) -> Result<String, AuthError> {
        self.sessions
            .get(token)
            .map(|s| s.username.clone())
            .ok_or(AuthError::InvalidSession)
    }

    pub fn save_text(&self, username: &str, text: &str) -> Result<u64, AuthError> {
        if text.trim().is_empty() {
            return Err(AuthError::Validation("Text is required".into()));
        }
        let mut state = self.state.lock();
        if state.user(username).is_none() {
            return Err(AuthError::UnknownUser(username.to_string()));
        }
        let previous_id = state.last_text_id;
        let id = state.next_text_id();
        state.texts.push(SavedText {
            id,
            text: text.to_string(),
            username: username.to_string(),
            created_at: OffsetDateTime::now_utc(),
        });
        if let Err(e) = self.persist(&state) {
            state.texts.pop();
            state.last_text_id = previous_id;
            return Err(e);
        }
        drop(state);
        self.metrics.texts_saved.fetch_add(1, Ordering::Relaxed);
        Ok(id)
    }

    /// Saved texts of `username`, oldest first.
    pub fn texts_for(&self, username: &str) -> Vec<SavedText> {
        self.state
            .lock()
            .texts
            .iter()
            .filter(|t| t.username == username)
            .cloned()
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().users.len()
    }

    pub fn metrics_snapshot(&self) -> AuthMetricsSnapshot {
        AuthMetricsSnapshot {
            registrations: self.metrics.registrations.load(Ordering::Relaxed),
            logins: self.metrics.logins.load(Ordering::Relaxed),
            failed_logins: self.metrics.failed_logins.load(Ordering::Relaxed),
            texts_saved: self.metrics.texts_saved.load(Ordering::Relaxed),
            active_sessions: self.sessions.len() as u64,
            users: self.user_count() as u64,
        }
    }

    /// Write the whole store to a sibling temp file, then rename over the
    /// target so readers never see a partial file.
    fn persist(&self, state: &StoreFile) -> Result<(), AuthError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let body = serde_json::to_vec_pretty(state)
            .map_err(|e| AuthError::Storage(format!("serialize store: {e}")))?;
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, body)
            .map_err(|e| AuthError::Storage(format!("write {}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, path)
            .map_err(|e| AuthError::Storage(format!("rename to {}: {e}", path.display())))?;
        Ok(())
    }
}

/// Registration checks, in the order users see them.
pub fn validate_registration(username: &str, password: &str, confirm: &str) -> Result<(), AuthError> {
    let fail = |msg: &str| Err(AuthError::Validation(msg.to_string()));
    if username.is_empty() || password.is_empty() {
        return fail("Username and password are required");
    }
    let username_len = username.chars().count();
    let password_len = password.chars().count();
    if username_len < MIN_USERNAME_CHARS {
        return fail("Username must be at least 4 characters");
    }
    if password != confirm {
        return fail("Passwords do not match");
    }
    if password_len < MIN_PASSWORD_CHARS {
        return fail("Password must be at least 6 characters");
    }
    if username_len > MAX_USERNAME_CHARS {
        return fail("Username must be at most 20 characters");
    }
    if password_len > MAX_PASSWORD_CHARS {
        return fail("Password must be at most 50 characters");
    }
    Ok(())
}

/// Lowercase hex SHA-256 of the password.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[derive(Default)]
pub struct AuthMetrics {
    pub registrations: AtomicU64,
    pub logins: AtomicU64,
    pub failed_logins: AtomicU64,
    pub texts_saved: AtomicU64,
}

#[derive(Debug, serde::Serialize)]
pub struct AuthMetricsSnapshot {
    pub registrations: u64,
    pub logins: u64,
    pub failed_logins: u64,
    pub texts_saved: u64,
    pub active_sessions: u64,
    pub users: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation(msg: &str) -> Result<(), AuthError> {
        Err(AuthError::Validation(msg.to_string()))
    }

    #[test]
    fn validation_order() {
        assert_eq!(
            validate_registration("", "", "x"),
            validation("Username and password are required")
        );
        // Short username is reported before a password mismatch.
        assert_eq!(
            validate_registration("bob", "secret1", "other"),
            validation("Username must be at least 4 characters")
        );
        // Mismatch is reported before a short password.
        assert_eq!(
            validate_registration("alice", "abc", "abd"),
            validation("Passwords do not match")
        );
        assert_eq!(
            validate_registration("alice", "abc", "abc"),
            validation("Password must be at least 6 characters")
        );
        let long_name = "a".repeat(21);
        assert_eq!(
            validate_registration(&long_name, "secret1", "secret1"),
            validation("Username must be at most 20 characters")
        );
        let long_pw = "p".repeat(51);
        assert_eq!(
            validate_registration("alice", &long_pw, &long_pw),
            validation("Password must be at most 50 characters")
        );
        assert!(validate_registration("alice", "secret1", "secret1").is_ok());
    }

    #[test]
    fn hash_is_lowercase_sha256_hex() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = CredentialStore::in_memory();
        store.register("alice", "secret1", "secret1").unwrap();
        assert_eq!(
            store.register("alice", "another1", "another1"),
            Err(AuthError::UsernameTaken("alice".into()))
        );
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn login_distinguishes_unknown_user_and_bad_password() {
        let store = CredentialStore::in_memory();
        store.register("alice", "secret1", "secret1").unwrap();
        assert_eq!(
            store.login("bob", "secret1").unwrap_err(),
            AuthError::UnknownUser("bob".into())
        );
        assert_eq!(store.login("alice", "wrong!!").unwrap_err(), AuthError::InvalidPassword);
        assert!(matches!(store.login("alice", ""), Err(AuthError::Validation(_))));

        let session = store.login("alice", "secret1").unwrap();
        assert_eq!(store.resolve(&session.token).unwrap(), "alice");
        store.logout(&session.token).unwrap();
        assert_eq!(store.resolve(&session.token), Err(AuthError::InvalidSession));
        assert_eq!(store.logout(&session.token), Err(AuthError::InvalidSession));

        let snap = store.metrics_snapshot();
        assert_eq!(snap.logins, 1);
        assert_eq!(snap.failed_logins, 1);
        assert_eq!(snap.active_sessions, 0);
    }

    #[test]
    fn texts_are_numbered_and_scoped_to_user() {
        let store = CredentialStore::in_memory();
        store.register("alice", "secret1", "secret1").unwrap();
        store.register("carol", "secret2", "secret2").unwrap();
        assert_eq!(store.save_text("alice", "first").unwrap(), 1);
        assert_eq!(store.save_text("carol", "other").unwrap(), 2);
        assert_eq!(store.save_text("alice", "second").unwrap(), 3);
        assert_eq!(
            store.save_text("nobody", "x"),
            Err(AuthError::UnknownUser("nobody".into()))
        );
        let texts: Vec<String> = store.texts_for("alice").into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        {
            let store = CredentialStore::open(&path).unwrap();
            store.register("alice", "secret1", "secret1").unwrap();
            store.save_text("alice", "kept text").unwrap();
        }
        assert!(path.exists());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains(&hash_password("secret1")));

        let store = CredentialStore::open(&path).unwrap();
        assert_eq!(store.user_count(), 1);
        assert!(store.login("alice", "secret1").is_ok());
        assert_eq!(store.save_text("alice", "more").unwrap(), 2);
        assert_eq!(store.texts_for("alice").len(), 2);
    }

    #[test]
    fn failed_validation_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = CredentialStore::open(&path).unwrap();
        assert!(store.register("al", "secret1", "secret1").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            CredentialStore::open(&path),
            Err(AuthError::Storage(_))
        ));
    }
}
