//! Export settings

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Editor region the exporter places triggers in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerArea {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl TriggerArea {
    #[inline]
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x) as f64
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(ExportError::InvalidArea(format!(
                "({}, {})..({}, {}) is empty",
                self.min_x, self.min_y, self.max_x, self.max_y
            )));
        }
        if self.min_x < 0 || self.min_y < 0 {
            return Err(ExportError::InvalidArea("coordinates must be non-negative".into()));
        }
        Ok(())
    }
}

impl Default for TriggerArea {
    fn default() -> Self {
        Self {
            min_x: 1350,
            min_y: 1300,
            max_x: 25000,
            max_y: 3000,
        }
    }
}

/// Export stage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub area: TriggerArea,
    /// Seed for trigger placement. Same seed, same document.
    pub seed: u64,
    /// Object count the target level can hold.
    pub object_budget: usize,
    pub output: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            area: TriggerArea::default(),
            seed: 0x5eed,
            object_budget: 200_000,
            output: PathBuf::from("triggers.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_editor_region() {
        let settings = ExportSettings::default();
        assert_eq!(settings.area.min_x, 1350);
        assert_eq!(settings.area.max_y, 3000);
        assert_eq!(settings.object_budget, 200_000);
        assert!(settings.area.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: ExportSettings = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.area, TriggerArea::default());
        assert_eq!(settings.output, PathBuf::from("triggers.json"));
    }

    #[test]
    fn empty_area_rejected() {
        let area = TriggerArea {
            min_x: 100,
            max_x: 100,
            ..TriggerArea::default()
        };
        assert!(matches!(area.validate(), Err(ExportError::InvalidArea(_))));
    }
}
