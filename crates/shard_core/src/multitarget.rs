//! Binary multitarget compiler
//!
//! A pattern that fires one template at N targets would normally need N
//! spawn records in its caller. Instead, a fixed set of base components with
//! capacities 1, 2, 4, ... each hold that many remapped spawns of the
//! multitarget placeholder. A burst of N decomposes into the binary digits
//! of N, so the caller only emits popcount(N) spawns.
//!
//! Each base record `k` rewrites the template placeholders onto its own
//! scratch block (`scratch_start + 4k ..= scratch_start + 4k + 3`); the
//! caller's outer remap then points the multitarget placeholder at the
//! template and every scratch group at a concrete target.

use crate::component::ComponentId;
use crate::config::SCRATCH_STRIDE;
use crate::context::CompilerContext;
use crate::diagnostics::Warning;
use crate::error::{BuildError, PatternError, RemapError};
use crate::ids::{GroupId, EMPTY_AUX, EMPTY_BULLET, EMPTY_EMITTER, EMPTY_MULTITARGET, EMPTY_TARGET_GROUP};
use crate::remap::RemapTable;

/// Scratch groups one base record maps the template placeholders onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchSlots {
    pub bullet: GroupId,
    pub target: GroupId,
    pub aux1: GroupId,
    pub aux2: GroupId,
}

impl ScratchSlots {
    /// Block for base record `index`.
    pub fn block(scratch_start: GroupId, index: usize) -> Self {
        let base = scratch_start + SCRATCH_STRIDE * index as GroupId;
        Self {
            bullet: base,
            target: base + 1,
            aux1: base + 2,
            aux2: base + 3,
        }
    }

    fn inner_remap(&self) -> Result<RemapTable, RemapError> {
        let mut table = RemapTable::new();
        table.insert(EMPTY_BULLET, self.bullet)?;
        table.insert(EMPTY_TARGET_GROUP, self.target)?;
        table.insert(EMPTY_EMITTER, self.aux1)?;
        table.insert(EMPTY_AUX, self.aux2)?;
        Ok(table)
    }
}

/// One base component of a given capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseComponent {
    pub capacity: usize,
    pub component: ComponentId,
    pub group: GroupId,
}

/// Concrete targets for one template instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub bullet: GroupId,
    pub target: GroupId,
    pub aux1: GroupId,
    pub aux2: GroupId,
}

/// Spawn the caller must emit: activate `group` with `remap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    pub group: GroupId,
    pub remap: RemapTable,
}

/// The built base components, smallest capacity first.
#[derive(Debug, Clone)]
pub struct MultitargetBases {
    tiers: Vec<BaseComponent>,
    scratch_start: GroupId,
}

impl MultitargetBases {
    pub(crate) fn build(ctx: &mut CompilerContext) -> Result<Self, BuildError> {
        let tiers = ctx.config().multitarget_tiers;
        let scratch_start = ctx.config().scratch_group_start;
        let layer = ctx.config().default_editor_layer;

        let mut bases = Vec::with_capacity(tiers as usize);
        for tier in 0..tiers {
            let capacity = 1usize << tier;
            let group = ctx.unknown_group();
            let component = ctx.component_on_layer(format!("Multitarget base {capacity}"), group, layer);
            let mut builder = ctx.edit(component)?;
            builder.assert_spawn_order(false)?;
            for index in 0..capacity {
                let remap = ScratchSlots::block(scratch_start, index).inner_remap()?;
                builder.spawn_with(
                    0.0,
                    EMPTY_MULTITARGET,
                    true,
                    crate::SpawnOptions::remap(remap.to_string()),
                )?;
            }
            bases.push(BaseComponent {
                capacity,
                component,
                group,
            });
        }

        tracing::info!(
            "Built {} multitarget base components (ceiling {})",
            bases.len(),
            ctx.config().multitarget_ceiling()
        );
        Ok(Self {
            tiers: bases,
            scratch_start,
        })
    }

    #[inline]
    pub fn tiers(&self) -> &[BaseComponent] {
        &self.tiers
    }

    /// Largest count a single burst can reach.
    pub fn ceiling(&self) -> usize {
        self.tiers.iter().map(|t| t.capacity).sum()
    }

    /// Base components whose capacities sum to `count`, largest first.
    pub fn decompose(&self, count: usize) -> Result<Vec<BaseComponent>, PatternError> {
        if count == 0 {
            return Err(PatternError::EmptyMultitarget);
        }
        let ceiling = self.ceiling();
        if count > ceiling {
            return Err(PatternError::MultitargetCapacity {
                requested: count,
                ceiling,
            });
        }

        let mut remaining = count;
        let mut picked = Vec::new();
        for base in self.tiers.iter().rev() {
            if base.capacity <= remaining {
                picked.push(*base);
                remaining -= base.capacity;
            }
        }
        Ok(picked)
    }

    /// Outer remaps firing `template` once per assignment.
    ///
    /// Builds nothing; the caller emits one spawn per returned burst.
    pub fn plan(&self, template: GroupId, assignments: &[Assignment]) -> Result<Vec<Burst>, BuildError> {
        let mut bursts = Vec::new();
        let mut rest = assignments;
        for base in self.decompose(assignments.len())? {
            let (chunk, tail) = rest.split_at(base.capacity);
            rest = tail;

            let mut remap = RemapTable::new();
            remap.insert(EMPTY_MULTITARGET, template)?;
            for (index, assignment) in chunk.iter().enumerate() {
                let slots = ScratchSlots::block(self.scratch_start, index);
                remap.insert(slots.bullet, assignment.bullet)?;
                remap.insert(slots.target, assignment.target)?;
                remap.insert(slots.aux1, assignment.aux1)?;
                remap.insert(slots.aux2, assignment.aux2)?;
            }
            bursts.push(Burst {
                group: base.group,
                remap,
            });
        }
        Ok(bursts)
    }
}

/// Plan bursts for `assignments`, splitting past the ceiling.
///
/// Warns when the template itself spawns, since nested spawns of the same
/// group at the same instant may collapse.
pub(crate) fn plan_bursts(
    ctx: &mut CompilerContext,
    template: ComponentId,
    assignments: &[Assignment],
) -> Result<Vec<Burst>, BuildError> {
    let component = ctx.get(template)?;
    let template_group = component.caller_group();
    if component.has_spawn() {
        let name = component.name().to_string();
        ctx.warn(Warning::MultitargetIntoSpawner { component: name });
    }

    let bases = ctx.multitarget()?;
    let ceiling = bases.ceiling();
    let mut bursts = Vec::new();
    for chunk in assignments.chunks(ceiling) {
        bursts.extend(bases.plan(template_group, chunk)?);
    }
    Ok(bursts)
}

/// Emit planned bursts as spawns of `caller` at `time`.
pub(crate) fn emit_bursts(
    ctx: &mut CompilerContext,
    caller: ComponentId,
    time: f64,
    bursts: Vec<Burst>,
) -> Result<(), BuildError> {
    let mut builder = ctx.edit(caller)?;
    for burst in bursts {
        builder.spawn_with(time, burst.group, false, crate::SpawnOptions::remap(burst.remap.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;

    fn bases() -> (CompilerContext, MultitargetBases) {
        let mut ctx = CompilerContext::new();
        let bases = ctx.multitarget().unwrap().clone();
        (ctx, bases)
    }

    fn capacities(picked: &[BaseComponent]) -> Vec<usize> {
        picked.iter().map(|b| b.capacity).collect()
    }

    #[test]
    fn decomposition_is_binary_largest_first() {
        let (_, bases) = bases();
        assert_eq!(capacities(&bases.decompose(18).unwrap()), vec![16, 2]);
        assert_eq!(capacities(&bases.decompose(1).unwrap()), vec![1]);
        assert_eq!(capacities(&bases.decompose(127).unwrap()), vec![64, 32, 16, 8, 4, 2, 1]);
        for n in 1..=127usize {
            let picked = bases.decompose(n).unwrap();
            assert_eq!(picked.len(), n.count_ones() as usize);
            assert_eq!(picked.iter().map(|b| b.capacity).sum::<usize>(), n);
        }
    }

    #[test]
    fn decomposition_bounds() {
        let (_, bases) = bases();
        assert_eq!(bases.decompose(0), Err(PatternError::EmptyMultitarget));
        assert_eq!(
            bases.decompose(128),
            Err(PatternError::MultitargetCapacity {
                requested: 128,
                ceiling: 127
            })
        );
    }

    #[test]
    fn base_components_hold_scratch_spawns() {
        let (ctx, bases) = bases();
        assert_eq!(bases.tiers().len(), 7);
        let four = bases.tiers()[2];
        let component = ctx.get(four.component).unwrap();
        assert_eq!(component.spawn_order(), Some(false));
        assert_eq!(component.triggers().len(), 4);
        for (k, record) in component.triggers().iter().enumerate() {
            let block = 7001 + 4 * k as GroupId;
            assert_eq!(record.target(), Some(EMPTY_MULTITARGET));
            assert!(record.requires_spawn_order());
            assert_eq!(record.x(), 0.0);
            assert_eq!(
                record.remap().unwrap(),
                format!("10.{}.20.{}.21.{}.23.{}", block, block + 1, block + 2, block + 3)
            );
        }
    }

    #[test]
    fn plan_maps_every_scratch_group() {
        let (_, bases) = bases();
        let assignments: Vec<_> = (0..3)
            .map(|i| Assignment {
                bullet: 501 + i,
                target: 5101 + i,
                aux1: 5461,
                aux2: 1001 + i,
            })
            .collect();
        let bursts = bases.plan(40, &assignments).unwrap();
        assert_eq!(bursts.len(), 2);
        assert_eq!(bursts[0].remap.get(EMPTY_MULTITARGET), Some(40));
        assert_eq!(bursts[0].remap.len(), 1 + 2 * 4);
        assert_eq!(bursts[0].remap.get(7001), Some(501));
        assert_eq!(bursts[0].remap.get(7006), Some(5102));
        assert_eq!(bursts[0].remap.get(7007), Some(5461));
        assert_eq!(bursts[1].remap.get(7001), Some(503));
        assert_eq!(bursts[1].remap.get(7004), Some(1003));
    }

    #[test]
    fn small_tier_config() {
        let config = CompilerConfig {
            multitarget_tiers: 3,
            ..Default::default()
        };
        let mut ctx = CompilerContext::with_config(config).unwrap();
        assert_eq!(ctx.multitarget().unwrap().ceiling(), 7);
    }
}
