//! Bullet pattern generators
//!
//! Patterns fire a template component once per bullet. Instant patterns
//! fire every bullet at one schedule time through the multitarget compiler;
//! timed patterns stagger them.

pub mod geometry;
mod instant;
mod timed;

pub use geometry::{ArcParams, RadialParams};
pub use instant::{InstantPatterns, LineParams};
pub use timed::{RadialWaveParams, TimedLineParams, TimedPatterns};

use crate::component::ComponentId;
use crate::context::CompilerContext;
use crate::diagnostics::Warning;
use crate::error::{BuildError, PatternError, TriggerError};
use crate::ids::GroupId;
use crate::multitarget::{self, Assignment};
use crate::pool::BulletPool;

/// Check the template's spawn order and the placeholders it targets.
pub(crate) fn enforce_template(
    ctx: &CompilerContext,
    template: ComponentId,
    pattern: &'static str,
    required: &[GroupId],
    forbidden: &[GroupId],
) -> Result<(), BuildError> {
    let component = ctx.get(template)?;
    if !component.requires_spawn_order() {
        return Err(PatternError::SpawnOrderRequired { pattern }.into());
    }

    let targeted = component.targeted_groups();
    let missing: Vec<GroupId> = required
        .iter()
        .copied()
        .filter(|g| !targeted.contains(g))
        .collect();
    if !missing.is_empty() {
        return Err(PatternError::MissingTargets { pattern, missing }.into());
    }

    let present: Vec<GroupId> = forbidden
        .iter()
        .copied()
        .filter(|g| targeted.contains(g))
        .collect();
    if !present.is_empty() {
        return Err(PatternError::ForbiddenTargets {
            pattern,
            forbidden: present,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn warn_orientation(
    ctx: &mut CompilerContext,
    template: ComponentId,
    pool: &BulletPool,
) -> Result<(), BuildError> {
    let component = ctx.get(template)?;
    if pool.is_oriented() && !component.has_aim_rotate() {
        let name = component.name().to_string();
        ctx.warn(Warning::MissingOrientation { component: name });
    }
    Ok(())
}

pub(crate) fn check_time(time: f64) -> Result<(), TriggerError> {
    if time >= 0.0 {
        Ok(())
    } else {
        Err(TriggerError::Negative { what: "time", value: time })
    }
}

/// Plan and emit one multitarget burst from `caller`.
pub(crate) fn fire(
    ctx: &mut CompilerContext,
    caller: ComponentId,
    time: f64,
    template: ComponentId,
    assignments: &[Assignment],
) -> Result<(), BuildError> {
    check_time(time)?;
    let bursts = multitarget::plan_bursts(ctx, template, assignments)?;
    tracing::debug!(
        "Firing {} instances of {} in {} bursts",
        assignments.len(),
        template,
        bursts.len()
    );
    multitarget::emit_bursts(ctx, caller, time, bursts)
}
