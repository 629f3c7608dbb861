//! Shard Core
//!
//! Compiles declarative bullet patterns into flat trigger lists:
//! - Trigger records and the wire field schema
//! - Remap tables
//! - Components, group contexts and the fluent builder
//! - Binary multitarget compiler
//! - Pattern generators (arc, radial, line, waves)
//! - Spawn-limit validation

mod builder;
pub mod color;
pub mod component;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod easing;
pub mod error;
pub mod field;
pub mod guider;
pub mod ids;
mod keyframe;
pub mod multitarget;
pub mod patterns;
pub mod pool;
pub mod remap;
pub mod trigger;
pub mod validate;

pub use builder::{ComponentBuilder, PickupMode, PulseTiming, SpawnOptions};
pub use color::{rgb, Hsb};
pub use component::{Component, ComponentId, Target};
pub use config::CompilerConfig;
pub use context::{CompilerContext, Spell, SpellId};
pub use diagnostics::{Diagnostics, Warning};
pub use easing::{Easing, Tween};
pub use error::{BuildError, HazardError, PatternError, RemapError, StructureError, TriggerError};
pub use guider::GuiderCircle;
pub use keyframe::Scaling;
pub use patterns::{ArcParams, LineParams, RadialParams, RadialWaveParams, TimedLineParams};
pub use pool::{BulletPool, NumberCycler};
pub use remap::{Remap, RemapTable};
pub use trigger::{Trigger, Value};

/// Compiler version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
