//! Spawn-limit validation
//!
//! The runtime collapses simultaneous spawns of one group into a single
//! execution when that group itself contains a spawn record. Two shapes are
//! detected:
//!
//! - direct: a spawn-ordered component holds two or more unmapped,
//!   zero-delay spawns of the same spawn-bearing group at the same X;
//! - indirect: a remapped spawn activates a group whose zero-delay spawns
//!   end up targeting the same spawn-bearing group at the same X once the
//!   remap is applied. The multitarget fan-out is the usual case: every base
//!   record spawns 9989 at X=0, which the outer remap points at the template.

use crate::component::Component;
use crate::context::CompilerContext;
use crate::error::HazardError;
use crate::ids::GroupId;
use crate::remap::RemapTable;
use crate::trigger::Trigger;
use std::collections::{BTreeMap, HashSet};

pub fn check_spawn_limits(ctx: &CompilerContext) -> Result<(), HazardError> {
    check_components(ctx.components())
}

pub fn check_components(components: &[Component]) -> Result<(), HazardError> {
    let spawn_bearing = spawn_bearing_groups(components);
    check_direct(components, &spawn_bearing)?;
    check_indirect(components, &spawn_bearing)?;
    tracing::debug!("Spawn limits ok across {} components", components.len());
    Ok(())
}

/// Groups owning at least one spawn record.
fn spawn_bearing_groups(components: &[Component]) -> HashSet<GroupId> {
    components
        .iter()
        .flat_map(|c| c.triggers())
        .filter(|t| t.is_spawn())
        .flat_map(|t| t.groups().iter().copied())
        .collect()
}

fn is_immediate_spawn(trigger: &Trigger) -> bool {
    trigger.is_spawn() && trigger.spawn_delay() == 0.0
}

fn is_plain_spawn(trigger: &Trigger) -> bool {
    is_immediate_spawn(trigger) && trigger.remap().is_none()
}

fn check_direct(components: &[Component], spawn_bearing: &HashSet<GroupId>) -> Result<(), HazardError> {
    for component in components.iter().filter(|c| c.requires_spawn_order()) {
        let mut counts: BTreeMap<(u64, GroupId), usize> = BTreeMap::new();
        for trigger in component.triggers().iter().filter(|t| is_plain_spawn(t)) {
            if let Some(target) = trigger.target() {
                *counts.entry((trigger.x().to_bits(), target)).or_default() += 1;
            }
        }

        if let Some((&(x, group), &expected)) = counts
            .iter()
            .find(|&(&(_, group), &count)| count >= 2 && spawn_bearing.contains(&group))
        {
            return Err(HazardError::Direct {
                component: component.name().to_string(),
                group,
                x: f64::from_bits(x),
                expected,
            });
        }
    }
    Ok(())
}

fn check_indirect(components: &[Component], spawn_bearing: &HashSet<GroupId>) -> Result<(), HazardError> {
    let mut by_owner: BTreeMap<GroupId, Vec<&Trigger>> = BTreeMap::new();
    for trigger in components.iter().flat_map(|c| c.triggers()) {
        if is_immediate_spawn(trigger) {
            for &group in trigger.groups() {
                by_owner.entry(group).or_default().push(trigger);
            }
        }
    }

    for component in components {
        for spawn in component.triggers().iter().filter(|t| t.is_spawn()) {
            let (Some(activated), Some(raw)) = (spawn.target(), spawn.remap()) else {
                continue;
            };
            let Ok(remap) = RemapTable::parse(raw) else {
                continue;
            };
            let Some(candidates) = by_owner.get(&activated) else {
                continue;
            };

            let mut landed: BTreeMap<(u64, GroupId), (usize, bool)> = BTreeMap::new();
            for candidate in candidates {
                let Some(target) = candidate.target() else {
                    continue;
                };
                let resolved = remap.resolve(target);
                let entry = landed
                    .entry((candidate.x().to_bits(), resolved))
                    .or_default();
                entry.0 += 1;
                entry.1 |= resolved != target;
            }

            let hazard = landed.iter().find(|&(&(_, group), &(count, remapped))| {
                count >= 2 && remapped && spawn_bearing.contains(&group)
            });
            if let Some((&(_, group), &(expected, _))) = hazard {
                return Err(HazardError::Indirect {
                    component: component.name().to_string(),
                    activated,
                    group,
                    expected,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SpawnOptions;
    use crate::component::ComponentId;
    use crate::guider::CIRCLE_1;
    use crate::ids::{EMPTY_BULLET, EMPTY_TARGET_GROUP};
    use crate::patterns::RadialParams;
    use crate::pool::BulletPool;

    fn spawner(ctx: &mut CompilerContext, caller: GroupId, target: GroupId) {
        let id = ctx.component(format!("Spawner {caller}"), caller);
        ctx.edit(id).unwrap().spawn(0.0, target, false).unwrap();
    }

    #[test]
    fn direct_hazard_detected() {
        let mut ctx = CompilerContext::new();
        spawner(&mut ctx, 40, 41);
        let id = ctx.component("Caller", 36);
        ctx.edit(id)
            .unwrap()
            .assert_spawn_order(true)
            .unwrap()
            .spawn(1.0, 40, false)
            .unwrap()
            .spawn(1.0, 40, false)
            .unwrap();

        let err = check_spawn_limits(&ctx).unwrap_err();
        assert!(matches!(
            err,
            HazardError::Direct {
                group: 40,
                expected: 2,
                ..
            }
        ));
        assert!(err.to_string().contains("Caller"));
    }

    #[test]
    fn delay_clears_direct_hazard() {
        let mut ctx = CompilerContext::new();
        spawner(&mut ctx, 40, 41);
        let id = ctx.component("Caller", 36);
        ctx.edit(id)
            .unwrap()
            .assert_spawn_order(true)
            .unwrap()
            .spawn(1.0, 40, false)
            .unwrap()
            .spawn_with(1.0, 40, false, SpawnOptions::default().delay(0.1))
            .unwrap();
        assert!(check_spawn_limits(&ctx).is_ok());
    }

    #[test]
    fn non_spawning_target_is_safe() {
        let mut ctx = CompilerContext::new();
        let id = ctx.component("Caller", 36);
        ctx.edit(id)
            .unwrap()
            .assert_spawn_order(true)
            .unwrap()
            .spawn(1.0, 40, false)
            .unwrap()
            .spawn(1.0, 40, false)
            .unwrap();
        assert!(check_spawn_limits(&ctx).is_ok());
    }

    #[test]
    fn indirect_hazard_through_remap() {
        let mut ctx = CompilerContext::new();
        spawner(&mut ctx, 40, 41);
        let inner = ctx.component("Inner", 50);
        ctx.edit(inner)
            .unwrap()
            .spawn(0.0, 10, false)
            .unwrap()
            .spawn(0.0, 20, false)
            .unwrap();
        let outer = ctx.component("Outer", 36);
        ctx.edit(outer)
            .unwrap()
            .spawn_with(0.0, 50, false, SpawnOptions::remap("10.40.20.40"))
            .unwrap();

        let err = check_spawn_limits(&ctx).unwrap_err();
        assert_eq!(
            err,
            HazardError::Indirect {
                component: "Outer".into(),
                activated: 50,
                group: 40,
                expected: 2,
            }
        );
    }

    #[test]
    fn distinct_remap_targets_are_safe() {
        let mut ctx = CompilerContext::new();
        spawner(&mut ctx, 40, 41);
        spawner(&mut ctx, 42, 41);
        let inner = ctx.component("Inner", 50);
        ctx.edit(inner)
            .unwrap()
            .spawn(0.0, 10, false)
            .unwrap()
            .spawn(0.0, 20, false)
            .unwrap();
        let outer = ctx.component("Outer", 36);
        ctx.edit(outer)
            .unwrap()
            .spawn_with(0.0, 50, false, SpawnOptions::remap("10.40.20.42"))
            .unwrap();
        assert!(check_spawn_limits(&ctx).is_ok());
    }

    fn radial_into(ctx: &mut CompilerContext, template: ComponentId, bullets: u32) {
        let caller = ctx.component("Enemy", 40);
        let mut pool = BulletPool::new(501, 1000).unwrap();
        ctx.edit(caller)
            .unwrap()
            .instant()
            .radial(0.0, template, &CIRCLE_1, &mut pool, RadialParams::bullets(bullets))
            .unwrap();
    }

    fn bullet_template(ctx: &mut CompilerContext, spawns: bool) -> ComponentId {
        let id = ctx.component("Bullet", 36);
        let mut b = ctx.edit(id).unwrap();
        b.assert_spawn_order(true)
            .unwrap()
            .toggle(0.0, EMPTY_BULLET, true)
            .unwrap()
            .toggle(0.0, EMPTY_TARGET_GROUP, true)
            .unwrap();
        if spawns {
            b.spawn(0.1, 41, false).unwrap();
        }
        id
    }

    #[test]
    fn multitarget_into_spawning_template_is_hazard() {
        let mut ctx = CompilerContext::new();
        let template = bullet_template(&mut ctx, true);
        radial_into(&mut ctx, template, 2);

        let err = check_spawn_limits(&ctx).unwrap_err();
        assert!(matches!(
            err,
            HazardError::Indirect {
                group: 36,
                expected: 2,
                ..
            }
        ));
    }

    #[test]
    fn multitarget_into_plain_template_is_safe() {
        let mut ctx = CompilerContext::new();
        let template = bullet_template(&mut ctx, false);
        radial_into(&mut ctx, template, 12);
        assert!(check_spawn_limits(&ctx).is_ok());
    }
}
