#![forbid(unsafe_code)]

//! Client configuration.
//!
//! The page may hand `start_client` a JSON object; every key is optional and
//! falls back to [`ClientConfig::default`]. Keys are kebab-case:
//!
//! ```json
//! {"socket-path": "/game", "follow-threshold-px": 80, "log-level": "debug"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_FOLLOW_THRESHOLD_PX: f64 = 50.0;
pub const DEFAULT_DISCONNECT_NOTICE: &str =
    "* You have been disconnected.  Refresh to (hopefully) reconnect.";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Ids of the page elements the client renders into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DomIds {
    /// Scrollable container around the transcript.
    pub metabox: String,
    /// Transcript entries are appended here.
    pub stream: String,
    /// Connection status label.
    pub status: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            metabox: "stream-metabox".to_owned(),
            stream: "stream".to_owned(),
            status: "connection-status".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// WebSocket path on the page's own host.
    pub socket_path: String,
    /// Distance from the bottom (px) within which new output is followed.
    pub follow_threshold_px: f64,
    /// Plain text appended to the transcript when the socket closes.
    pub disconnect_notice: String,
    /// Console log filter: trace, debug, info, warn, error or off.
    pub log_level: String,
    pub dom: DomIds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_path: "/".to_owned(),
            follow_threshold_px: DEFAULT_FOLLOW_THRESHOLD_PX,
            disconnect_notice: DEFAULT_DISCONNECT_NOTICE.to_owned(),
            log_level: "info".to_owned(),
            dom: DomIds::default(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse when present, otherwise defaults. Blank strings count as absent.
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, ConfigError> {
        match json.map(str::trim) {
            Some(json) if !json.is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.follow_threshold_px.is_finite() || self.follow_threshold_px < 0.0 {
            return Err(ConfigError::invalid(format!(
                "follow-threshold-px must be a finite, non-negative number (got {})",
                self.follow_threshold_px
            )));
        }
        if !self.socket_path.starts_with('/') {
            return Err(ConfigError::invalid(format!(
                "socket-path must start with '/' (got {:?})",
                self.socket_path
            )));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid(format!(
                "log-level must be one of {} (got {:?})",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        for (key, id) in [
            ("dom.metabox", &self.dom.metabox),
            ("dom.stream", &self.dom.stream),
            ("dom.status", &self.dom.status),
        ] {
            if id.trim().is_empty() {
                return Err(ConfigError::invalid(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_or_blank_json_yields_defaults() {
        assert_eq!(
            ClientConfig::from_optional_json(None).expect("defaults"),
            ClientConfig::default()
        );
        assert_eq!(
            ClientConfig::from_optional_json(Some("  ")).expect("defaults"),
            ClientConfig::default()
        );
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = ClientConfig::from_json(
            r#"{"socket-path":"/game","dom":{"stream":"log"},"log-level":"DEBUG"}"#,
        )
        .expect("parse");
        assert_eq!(config.socket_path, "/game");
        assert_eq!(config.dom.stream, "log");
        assert_eq!(config.dom.metabox, "stream-metabox");
        assert_eq!(config.follow_threshold_px, DEFAULT_FOLLOW_THRESHOLD_PX);
        assert_eq!(config.disconnect_notice, DEFAULT_DISCONNECT_NOTICE);
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = ClientConfig::from_json(r#"{"follow-threshold-px":-1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_relative_socket_path() {
        let err = ClientConfig::from_json(r#"{"socket-path":"game"}"#).unwrap_err();
        assert!(err.to_string().contains("socket-path"));
    }

    #[test]
    fn rejects_unknown_log_level_and_empty_ids() {
        assert!(ClientConfig::from_json(r#"{"log-level":"loud"}"#).is_err());
        assert!(ClientConfig::from_json(r#"{"dom":{"status":""}}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ClientConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
