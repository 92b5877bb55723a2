//! fnbridge.toml configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the behavior the routing layer expects out of the box.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Inbound header the request URL host is read from.
    pub host_header: String,
    /// Inbound header the request URL scheme is read from.
    pub forwarded_proto_header: String,
    /// Scheme used when the forwarded-protocol header is absent or empty.
    pub default_scheme: String,
    /// Content-type prefixes whose bodies are returned as literal text.
    pub text_content_types: Vec<String>,
    pub metadata: MetadataConfig,
}

/// Names of the synthetic headers carrying invocation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub request_id_header: String,
    pub function_arn_header: String,
    /// When false, metadata is only reachable through request extensions.
    pub synthetic_headers: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host_header: "Host".to_string(),
            forwarded_proto_header: "X-Forwarded-Proto".to_string(),
            default_scheme: "https".to_string(),
            text_content_types: vec![
                "text".to_string(),
                "application/json".to_string(),
                "application/javascript".to_string(),
            ],
            metadata: MetadataConfig::default(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            request_id_header: "X-LambdaHttp-Aws-Request-Id".to_string(),
            function_arn_header: "X-LambdaHttp-Function-Arn".to_string(),
            synthetic_headers: true,
        }
    }
}

impl BridgeConfig {
    pub fn from_file(path: &Path) -> BridgeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> BridgeResult<Self> {
        let config: BridgeConfig =
            toml::from_str(content).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> BridgeResult<String> {
        toml::to_string_pretty(self).map_err(|e| BridgeError::Config(e.to_string()))
    }

    fn validate(&self) -> BridgeResult<()> {
        if self.host_header.is_empty() || self.forwarded_proto_header.is_empty() {
            return Err(BridgeError::Config(
                "host_header and forwarded_proto_header must not be empty".into(),
            ));
        }
        if self.default_scheme.is_empty()
            || !self
                .default_scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(BridgeError::Config(format!(
                "invalid default_scheme: {:?}",
                self.default_scheme
            )));
        }
        Ok(())
    }

    /// Whether a response with this content type is emitted as literal text.
    ///
    /// Prefix match, ASCII case-insensitive. A missing content type is never
    /// text.
    pub fn is_text_content_type(&self, content_type: &str) -> bool {
        let content_type = content_type.trim_start().as_bytes();
        self.text_content_types.iter().any(|prefix| {
            let prefix = prefix.as_bytes();
            content_type.len() >= prefix.len()
                && content_type[..prefix.len()].eq_ignore_ascii_case(prefix)
        })
    }
}
