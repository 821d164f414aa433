//! Configuration for every pipeline component.
//!
//! All structs deserialize with `#[serde(default)]` so a partial TOML file
//! overrides only what it names; defaults live in the `defaults` module as
//! named constants because they encode tunable policy.

pub mod defaults;

mod confidence_config;
mod retrieval_config;
mod verification_config;

pub use confidence_config::ConfidenceConfig;
pub use retrieval_config::{DecompositionConfig, RetrievalConfig};
pub use verification_config::{AbstentionConfig, RemoteCallConfig};

use serde::{Deserialize, Serialize};

use crate::errors::{LancetError, LancetResult};

/// Aggregate configuration for one pipeline instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LancetConfig {
    pub retrieval: RetrievalConfig,
    pub decomposition: DecompositionConfig,
    pub confidence: ConfidenceConfig,
    pub abstention: AbstentionConfig,
    pub remote: RemoteCallConfig,
}

impl LancetConfig {
    /// Parse from TOML, falling back to defaults for absent sections.
    pub fn from_toml_str(raw: &str) -> LancetResult<Self> {
        toml::from_str(raw).map_err(|e| LancetError::Config {
            reason: e.to_string(),
        })
    }
}
