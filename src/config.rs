use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::credential::ApiCredential;

/// Application-level constants
pub const APP_NAME: &str = "Auditor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding a pre-provisioned API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_DOCUMENT_MB: u64 = 50;
const DEFAULT_ORGANIZATION: &str = "HRSJC";
const DEFAULT_REPORT_YEAR: u16 = 2025;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "auditor_lib=info,auditor=info,tower_http=warn"
}

/// Get the application data directory
/// ~/Auditor/ on all platforms. Falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Pre-provisioned secrets store.
pub fn secrets_path() -> PathBuf {
    app_data_dir().join("secrets.json")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Cannot read secrets file {path}: {source}")]
    SecretsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed secrets file {path}: {source}")]
    SecretsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk secrets store layout.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    google_api_key: Option<String>,
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AuditorConfig {
    pub bind_addr: SocketAddr,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
    pub max_document_bytes: u64,
    /// Organization tag used in the report file name.
    pub organization: String,
    pub report_year: u16,
    /// Pre-provisioned credential. `None` means the user must type one in.
    pub credential: Option<ApiCredential>,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8501))),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_MB * 1024 * 1024,
            organization: DEFAULT_ORGANIZATION.to_string(),
            report_year: DEFAULT_REPORT_YEAR,
            credential: None,
        }
    }
}

impl AuditorConfig {
    /// Load configuration from the process environment and the default
    /// secrets file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), &secrets_path())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, secrets: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("AUDITOR_BIND") {
            config.bind_addr = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "AUDITOR_BIND",
                value,
            })?;
        }
        if let Some(value) = lookup("AUDITOR_MODEL").filter(|v| !v.trim().is_empty()) {
            config.model = value.trim().to_string();
        }
        if let Some(value) = lookup("AUDITOR_API_BASE").filter(|v| !v.trim().is_empty()) {
            config.api_base = value.trim().trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup("AUDITOR_TIMEOUT_SECS") {
            config.timeout_secs = parse_positive("AUDITOR_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("AUDITOR_MAX_DOCUMENT_MB") {
            let megabytes = parse_positive("AUDITOR_MAX_DOCUMENT_MB", value.clone())?;
            config.max_document_bytes =
                megabytes.checked_mul(1024 * 1024).ok_or(ConfigError::InvalidValue {
                    name: "AUDITOR_MAX_DOCUMENT_MB",
                    value,
                })?;
        }
        if let Some(value) = lookup("AUDITOR_ORGANIZATION").filter(|v| !v.trim().is_empty()) {
            config.organization = value.trim().to_string();
        }
        if let Some(value) = lookup("AUDITOR_REPORT_YEAR") {
            config.report_year = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "AUDITOR_REPORT_YEAR",
                value,
            })?;
        }

        config.credential = match lookup(API_KEY_ENV).and_then(ApiCredential::new) {
            Some(credential) => {
                tracing::info!("API credential loaded from environment");
                Some(credential)
            }
            None => load_secrets_credential(secrets)?,
        };

        Ok(config)
    }

    /// Fixed download name for the generated report.
    pub fn report_file_name(&self) -> String {
        format!(
            "Relatorio_Anual_{}_{}.md",
            self.organization, self.report_year
        )
    }
}

fn parse_positive(name: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}

/// Read the credential from the secrets store, if one exists.
fn load_secrets_credential(path: &Path) -> Result<Option<ApiCredential>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SecretsIo {
        path: path.to_path_buf(),
        source,
    })?;
    let secrets: SecretsFile =
        serde_json::from_str(&raw).map_err(|source| ConfigError::SecretsFormat {
            path: path.to_path_buf(),
            source,
        })?;

    let credential = secrets.google_api_key.and_then(ApiCredential::new);
    if credential.is_some() {
        tracing::info!(path = %path.display(), "API credential loaded from secrets file");
    }
    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn missing_secrets() -> PathBuf {
        PathBuf::from("/nonexistent/auditor/secrets.json")
    }

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("Auditor"));
    }

    #[test]
    fn secrets_path_under_app_data() {
        let path = secrets_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("secrets.json"));
    }

    #[test]
    fn defaults_without_environment() {
        let config = AuditorConfig::from_lookup(lookup_from(&[]), &missing_secrets()).unwrap();
        assert_eq!(config.bind_addr.port(), 8501);
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.max_document_bytes, 50 * 1024 * 1024);
        assert!(config.credential.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AuditorConfig::from_lookup(
            lookup_from(&[
                ("AUDITOR_BIND", "0.0.0.0:9000"),
                ("AUDITOR_MODEL", "gemini-1.5-flash"),
                ("AUDITOR_API_BASE", "http://localhost:1234/"),
                ("AUDITOR_TIMEOUT_SECS", "30"),
                ("AUDITOR_MAX_DOCUMENT_MB", "5"),
                ("AUDITOR_ORGANIZATION", "ACME"),
                ("AUDITOR_REPORT_YEAR", "2026"),
            ]),
            &missing_secrets(),
        )
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.api_base, "http://localhost:1234");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_document_bytes, 5 * 1024 * 1024);
        assert_eq!(config.report_file_name(), "Relatorio_Anual_ACME_2026.md");
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = AuditorConfig::from_lookup(
            lookup_from(&[("AUDITOR_TIMEOUT_SECS", "0")]),
            &missing_secrets(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "AUDITOR_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn invalid_bind_is_rejected() {
        let err = AuditorConfig::from_lookup(
            lookup_from(&[("AUDITOR_BIND", "not-an-address")]),
            &missing_secrets(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("AUDITOR_BIND"));
    }

    #[test]
    fn default_report_file_name() {
        let config = AuditorConfig::default();
        assert_eq!(config.report_file_name(), "Relatorio_Anual_HRSJC_2025.md");
    }

    #[test]
    fn credential_from_environment() {
        let config = AuditorConfig::from_lookup(
            lookup_from(&[(API_KEY_ENV, "env-key")]),
            &missing_secrets(),
        )
        .unwrap();
        assert_eq!(config.credential.unwrap().expose(), "env-key");
    }

    #[test]
    fn blank_environment_credential_is_ignored() {
        let config = AuditorConfig::from_lookup(
            lookup_from(&[(API_KEY_ENV, "   ")]),
            &missing_secrets(),
        )
        .unwrap();
        assert!(config.credential.is_none());
    }

    #[test]
    fn credential_from_secrets_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        std::fs::write(&path, r#"{"google_api_key": "file-key"}"#).unwrap();

        let config = AuditorConfig::from_lookup(lookup_from(&[]), &path).unwrap();
        assert_eq!(config.credential.unwrap().expose(), "file-key");
    }

    #[test]
    fn environment_wins_over_secrets_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        std::fs::write(&path, r#"{"google_api_key": "file-key"}"#).unwrap();

        let config =
            AuditorConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "env-key")]), &path).unwrap();
        assert_eq!(config.credential.unwrap().expose(), "env-key");
    }

    #[test]
    fn malformed_secrets_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AuditorConfig::from_lookup(lookup_from(&[]), &path).unwrap_err();
        assert!(matches!(err, ConfigError::SecretsFormat { .. }));
    }

    #[test]
    fn secrets_file_without_key_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        std::fs::write(&path, "{}").unwrap();

        let config = AuditorConfig::from_lookup(lookup_from(&[]), &path).unwrap();
        assert!(config.credential.is_none());
    }

    #[test]
    fn oversized_document_limit_is_rejected_not_wrapped() {
        let err = AuditorConfig::from_lookup(
            lookup_from(&[("AUDITOR_MAX_DOCUMENT_MB", "18446744073709551615")]),
            &missing_secrets(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { name: "AUDITOR_MAX_DOCUMENT_MB", .. }
        ));

        let largest = u64::MAX / (1024 * 1024);
        let config = AuditorConfig::from_lookup(
            lookup_from(&[("AUDITOR_MAX_DOCUMENT_MB", &largest.to_string())]),
            &missing_secrets(),
        )
        .unwrap();
        assert_eq!(config.max_document_bytes, largest * 1024 * 1024);
    }
}
