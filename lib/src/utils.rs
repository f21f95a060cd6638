use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Data file used when neither config nor CLI names one, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data.json";

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("tiosa");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/tiosa");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("tiosa");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Timestamp-derived bookmark id
pub fn generate_id() -> String {
    now_millis().to_string()
}

/// Category id from a display name: lowercase, whitespace runs become `-`
pub fn slugify(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    re.replace_all(&name.to_lowercase(), "-").into_owned()
}
