use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `cloudguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so
/// forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CloudguardConfigV1 {
    /// Optional schema string for tooling (`cloudguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Region to scan, or `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Named credential profile recorded on audit results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Requested key-trust class: `provider` or `customer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,

    /// Default rule to execute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Log verbosity: `quiet`, `normal`, or `debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<String>,
}

pub fn parse_config_toml(text: &str) -> anyhow::Result<CloudguardConfigV1> {
    toml::from_str(text).context("parse cloudguard.toml")
}
