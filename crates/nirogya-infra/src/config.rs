//! Application configuration resolved once at startup.
//!
//! Credentials and paths are read from the environment exactly once and
//! injected into the workflows; nothing reads `std::env` per request.

use std::path::PathBuf;

use secrecy::SecretString;

/// Environment-derived configuration for the server.
pub struct AppConfig {
    /// Root directory for the database and the upload store.
    pub data_dir: PathBuf,
    /// Router/aggregator credential; takes priority when present.
    pub openrouter_api_key: Option<SecretString>,
    /// Direct-provider credential.
    pub openai_api_key: Option<SecretString>,
    /// Optional model override applied to whichever provider is selected.
    pub model_override: Option<String>,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `NIROGYA_DATA_DIR` overrides the data directory; the default is
    /// `~/.nirogya`. Blank credential variables count as absent.
    pub fn from_env() -> Self {
        Self {
            data_dir: resolve_data_dir(),
            openrouter_api_key: env_secret("OPENROUTER_API_KEY"),
            openai_api_key: env_secret("OPENAI_API_KEY"),
            model_override: non_blank(std::env::var("NIROGYA_MODEL").ok()),
        }
    }

    /// SQLite URL under the data directory, creating the file if missing.
    pub fn database_url(&self) -> String {
        format!(
            "sqlite://{}?mode=rwc",
            self.data_dir.join("nirogya.db").display()
        )
    }

    /// Root of the upload object store.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}

/// Resolve the data directory from `NIROGYA_DATA_DIR`, falling back to
/// `~/.nirogya` (or `./.nirogya` when no home directory is known).
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NIROGYA_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nirogya")
}

fn env_secret(name: &str) -> Option<SecretString> {
    non_blank(std::env::var(name).ok()).map(SecretString::from)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_under_data_dir() {
        let config = AppConfig {
            data_dir: PathBuf::from("/tmp/nirogya-test"),
            openrouter_api_key: None,
            openai_api_key: None,
            model_override: None,
        };
        assert_eq!(
            config.database_url(),
            "sqlite:///tmp/nirogya-test/nirogya.db?mode=rwc"
        );
        assert_eq!(config.uploads_dir(), PathBuf::from("/tmp/nirogya-test/uploads"));
    }

    #[test]
    fn test_non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("key".to_string())), Some("key".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
