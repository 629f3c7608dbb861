//! Shard stage
//!
//! Compiles the demo stage and exports its trigger document.
//!
//! Usage: `shard [settings.json]`

mod settings;
mod stage;

use anyhow::Result;
use settings::StageSettings;
use shard_core::CompilerContext;
use std::path::Path;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Shard compiler v{}", shard_core::VERSION);
    let settings = match std::env::args().nth(1) {
        Some(path) => StageSettings::load(Path::new(&path))?,
        None => StageSettings::default(),
    };

    let mut ctx = CompilerContext::with_config(settings.compiler.clone())?;
    stage::build(&mut ctx)?;

    let warnings = ctx.diagnostics().len();
    if warnings > 0 {
        tracing::info!("Stage compiled with {} warnings", warnings);
    }

    let stats = shard_export::export(&ctx, &settings.export)?;
    if stats.remaining_budget() < 0 {
        anyhow::bail!(
            "stage uses {} triggers, over the budget of {}",
            stats.total_triggers,
            stats.object_budget
        );
    }
    Ok(())
}
