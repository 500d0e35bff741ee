//! Declaration file loading
//!
//! The config directory holds three JSON files, loaded once at startup:
//!
//! - `config.json` - the upstream endpoint (URL, accept format, optional
//!   basic credentials, timeout, body mode)
//! - `policies.json` - the ordered rule declarations
//! - `prefixes.json` - the namespace map, rendered verbatim into query
//!   prefix declarations
//!
//! Any malformed file is a [`ConfigError`], fatal before the listener
//! opens. The rule set and namespace map are immutable afterwards.

use graphwarden_intent::{BasicCredentials, QueryBodyMode, UpstreamClient};
use graphwarden_policy::{normalize, NamespaceMap, RuleDecl, RuleSet};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.json";
pub const POLICIES_FILE: &str = "policies.json";
pub const PREFIXES_FILE: &str = "prefixes.json";

const DEFAULT_ACCEPT_FORMAT: &str = "application/rdf+xml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Startup configuration errors. The process does not start past these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Basic credentials section of `config.json`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub username: String,
    pub password: String,
}

/// How the filtering query is posted upstream
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BodyModeSetting {
    #[default]
    Urlencoded,
    Direct,
}

impl From<BodyModeSetting> for QueryBodyMode {
    fn from(mode: BodyModeSetting) -> Self {
        match mode {
            BodyModeSetting::Urlencoded => QueryBodyMode::UrlEncoded,
            BodyModeSetting::Direct => QueryBodyMode::Direct,
        }
    }
}

/// The `config.json` shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSettings {
    /// Upstream SPARQL endpoint URL
    pub endpoint_url: String,

    /// Accept header sent upstream; fixes the snapshot payload format
    #[serde(default = "default_accept_format")]
    pub format: String,

    /// Optional basic credentials for the upstream endpoint
    #[serde(default)]
    pub auth: Option<AuthSettings>,

    /// Bound on the upstream fetch; a stalled endpoint fails the request
    /// instead of retaining it forever
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Filtering-query POST body mode
    #[serde(default)]
    pub body_mode: BodyModeSetting,
}

fn default_accept_format() -> String {
    DEFAULT_ACCEPT_FORMAT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Everything loaded from the config directory
#[derive(Debug)]
pub struct Settings {
    pub endpoint: EndpointSettings,
    pub rules: RuleSet,
    pub namespaces: NamespaceMap,
}

impl Settings {
    /// Build the upstream client this configuration describes
    pub fn upstream_client(&self) -> UpstreamClient {
        let credentials = self.endpoint.auth.as_ref().map(|auth| BasicCredentials {
            username: auth.username.clone(),
            password: auth.password.clone(),
        });
        UpstreamClient::new(
            self.endpoint.endpoint_url.clone(),
            self.endpoint.format.clone(),
            credentials,
            self.endpoint.body_mode.into(),
            Duration::from_secs(self.endpoint.timeout_secs),
        )
    }
}

/// Load and validate the three declaration files from `dir`.
pub fn load(dir: &Path) -> Result<Settings, ConfigError> {
    let endpoint: EndpointSettings = read_json(&dir.join(CONFIG_FILE))?;
    let decls: Vec<RuleDecl> = read_json(&dir.join(POLICIES_FILE))?;
    let namespaces: NamespaceMap = read_json(&dir.join(PREFIXES_FILE))?;

    validate_endpoint(&endpoint)?;

    Ok(Settings {
        endpoint,
        rules: normalize(decls),
        namespaces,
    })
}

fn validate_endpoint(endpoint: &EndpointSettings) -> Result<(), ConfigError> {
    let uri: http::Uri = endpoint
        .endpoint_url
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("endpointUrl: {e}")))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(ConfigError::Invalid(format!(
            "endpointUrl must be absolute: {:?}",
            endpoint.endpoint_url
        )));
    }
    if endpoint.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "timeoutSecs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config_dir(
        dir: &Path,
        config: serde_json::Value,
        policies: serde_json::Value,
        prefixes: serde_json::Value,
    ) {
        fs::write(dir.join(CONFIG_FILE), config.to_string()).unwrap();
        fs::write(dir.join(POLICIES_FILE), policies.to_string()).unwrap();
        fs::write(dir.join(PREFIXES_FILE), prefixes.to_string()).unwrap();
    }

    #[test]
    fn loads_a_complete_config_directory() {
        let tmp = tempfile::tempdir().unwrap();
        write_config_dir(
            tmp.path(),
            serde_json::json!({"endpointUrl": "http://upstream:8890/sparql", "format": "text/turtle"}),
            serde_json::json!([
                {"role": null, "permission": "allow", "subject": "*", "priority": 0}
            ]),
            serde_json::json!({"ex": "<http://example.org/>"}),
        );

        let settings = load(tmp.path()).unwrap();
        assert_eq!(settings.endpoint.endpoint_url, "http://upstream:8890/sparql");
        assert_eq!(settings.endpoint.format, "text/turtle");
        assert_eq!(settings.endpoint.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(settings.rules.len(), 1);
        assert_eq!(
            settings.namespaces.get("ex").map(String::as_str),
            Some("<http://example.org/>")
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_policy_declaration_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_config_dir(
            tmp.path(),
            serde_json::json!({"endpointUrl": "http://upstream/sparql"}),
            serde_json::json!([{"permission": "grant", "priority": 0}]),
            serde_json::json!({}),
        );

        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn relative_endpoint_url_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_config_dir(
            tmp.path(),
            serde_json::json!({"endpointUrl": "/sparql"}),
            serde_json::json!([]),
            serde_json::json!({}),
        );

        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_config_dir(
            tmp.path(),
            serde_json::json!({"endpointUrl": "http://upstream/sparql", "timeoutSecs": 0}),
            serde_json::json!([]),
            serde_json::json!({}),
        );

        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
