//! Export errors

use shard_core::ids::GroupId;
use shard_core::HazardError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Hazard(#[from] HazardError),

    #[error("component '{component}' has no triggers to spread")]
    EmptyComponent { component: String },

    #[error("rigid chain in '{component}' is {width} wide, trigger area only fits {area}")]
    ChainTooWide {
        component: String,
        width: f64,
        area: f64,
    },

    #[error("reserved group {group} detected in '{component}'")]
    ReservedGroup { component: String, group: GroupId },

    #[error(
        "trigger at x={x} in '{component}' is within 1 unit of the previous one at x={previous}, \
         spawn order not preserved"
    )]
    SpawnOrderBroken {
        component: String,
        x: f64,
        previous: f64,
    },

    #[error("invalid trigger area: {0}")]
    InvalidArea(String),

    #[error("failed to serialize trigger document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
