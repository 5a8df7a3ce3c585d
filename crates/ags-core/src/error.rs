use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an ingress or DNS configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised when a configured WAF rule document is not a JSON rule list.
#[derive(Debug, Error)]
#[error("invalid WAF rule list: {0}")]
pub struct WafRuleError(#[from] pub serde_json::Error);
