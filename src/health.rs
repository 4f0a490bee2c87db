use serde::Serialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub translate_ok: bool,
    pub speech_ok: bool,
    pub store_writable: bool,
    pub speech_dir_writable: bool,
}

/// Run every check. Blocking; call from the blocking pool.
pub fn check_all(
    translate_url: &str,
    speech_url: &str,
    timeout: Duration,
    store_path: &Path,
    speech_dir: &Path,
) -> HealthReport {
    HealthReport {
        translate_ok: check_endpoint(translate_url, timeout),
        speech_ok: check_endpoint(speech_url, timeout),
        store_writable: check_writable_dir(store_path.parent().unwrap_or(Path::new("."))),
        speech_dir_writable: check_writable_dir(speech_dir),
    }
}

/// Any HTTP answer counts as reachable; only transport failures do not.
pub fn check_endpoint(base_url: &str, timeout: Duration) -> bool {
    let Ok(client) = reqwest::blocking::Client::builder().timeout(timeout).build() else {
        return false;
    };
    client.get(base_url).send().is_ok()
}

pub fn check_writable_dir(dir: &Path) -> bool {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    std::fs::metadata(dir)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false)
}
