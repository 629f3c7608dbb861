//! Settings file for the stage binary

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shard_core::CompilerConfig;
use shard_export::ExportSettings;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    pub compiler: CompilerConfig,
    pub export: ExportSettings,
}

impl StageSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }
}
