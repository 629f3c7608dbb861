//! Shard Export
//!
//! Turns a compiled `CompilerContext` into the trigger document the level
//! importer reads:
//! - Spawn-limit validation
//! - Trigger placement and per-component sorting
//! - Reserved-group and spawn-order spacing checks
//! - Budget statistics
//! - Atomic JSON write

pub mod error;
pub mod layout;
pub mod rng;
pub mod settings;
pub mod stats;

pub use error::ExportError;
pub use settings::{ExportSettings, TriggerArea};
pub use stats::{Counter, ExportStats};

use rng::SimpleRng;
use serde::Serialize;
use shard_core::validate::check_spawn_limits;
use shard_core::{CompilerContext, Trigger};
use std::fs;
use std::path::{Path, PathBuf};

/// Export crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `{"triggers": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub triggers: Vec<Trigger>,
}

/// Validate, place and sort every component's records.
///
/// Nothing is written; a failure here leaves no artifact behind.
pub fn build_document(ctx: &CompilerContext, settings: &ExportSettings) -> Result<Document, ExportError> {
    settings.area.validate()?;
    check_spawn_limits(ctx)?;

    let mut rng = SimpleRng::new(settings.seed);
    let mut triggers = Vec::new();
    for component in ctx.components() {
        if component.triggers().is_empty() {
            continue;
        }
        let mut records = component.triggers().to_vec();
        layout::spread(&mut records, component, &settings.area, &mut rng)?;
        records.sort_by(|a, b| a.x().total_cmp(&b.x()));
        layout::check_records(&records, component, ctx.config())?;
        triggers.extend(records);
    }

    tracing::debug!(
        "Laid out {} triggers from {} components",
        triggers.len(),
        ctx.components().len()
    );
    Ok(Document { triggers })
}

/// Build the document, report statistics and write it to `settings.output`.
pub fn export(ctx: &CompilerContext, settings: &ExportSettings) -> Result<ExportStats, ExportError> {
    let document = build_document(ctx, settings)?;
    let stats = ExportStats::collect(ctx, settings.object_budget);
    stats.log();
    write_document(&settings.output, &document)?;
    tracing::info!(
        "Saved {} triggers to {}",
        document.triggers.len(),
        settings.output.display()
    );
    Ok(stats)
}

/// Write `document` next to `path` and rename it into place.
pub fn write_document(path: &Path, document: &Document) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(document)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|source| ExportError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn temp_file_sits_next_to_output() {
        assert_eq!(temp_path(Path::new("out/triggers.json")), PathBuf::from("out/triggers.json.tmp"));
    }

    #[test]
    fn records_sorted_within_component() {
        let mut ctx = CompilerContext::new();
        let id = ctx.component("Ordered", 40);
        ctx.edit(id)
            .unwrap()
            .assert_spawn_order(true)
            .unwrap()
            .toggle(2.0, 41, true)
            .unwrap()
            .toggle(1.0, 41, false)
            .unwrap();
        let document = build_document(&ctx, &ExportSettings::default()).unwrap();
        let xs: Vec<f64> = document.triggers.iter().map(Trigger::x).collect();
        assert_eq!(xs.len(), 2);
        assert!(xs[0] < xs[1]);
        assert!(document.triggers.iter().all(|t| t.y().is_some()));
    }

    #[test]
    fn empty_components_skipped() {
        let mut ctx = CompilerContext::new();
        ctx.component("Nothing", 40);
        let document = build_document(&ctx, &ExportSettings::default()).unwrap();
        assert!(document.triggers.is_empty());
    }
}
