//! Demo stage: one enemy attack plus a standalone arc.

use shard_core::guider::CIRCLE_1;
use shard_core::ids::{EMPTY_AUX, EMPTY_BULLET, EMPTY_EMITTER, EMPTY_TARGET_GROUP, OFFSCREEN_DIST, PLR, SCREEN_CENTER};
use shard_core::{
    rgb, ArcParams, BuildError, BulletPool, CompilerContext, ComponentId, Easing, LineParams, PulseTiming,
    RadialParams, RadialWaveParams, Scaling, TimedLineParams, Tween,
};

const ENEMY: u32 = 40;
const ENEMY_SPRITE: u32 = 41;
const ENEMY_EMITTER: u32 = 42;

/// Template for radial and arc bullets: start at the circle center, fly to
/// the aimed anchor, then clean up.
fn circle_bullet(ctx: &mut CompilerContext) -> Result<ComponentId, BuildError> {
    let id = ctx.component("Circle bullet", 36);
    ctx.edit(id)?
        .assert_spawn_order(true)?
        .goto_group(0.0, EMPTY_BULLET, EMPTY_EMITTER, Tween::INSTANT)?
        .toggle(0.0, EMPTY_BULLET, true)?
        .toggle(0.0, EMPTY_AUX, true)?
        .move_towards(0.05, EMPTY_BULLET, EMPTY_TARGET_GROUP, OFFSCREEN_DIST, Tween::over(4.0), false)?
        .toggle(4.1, EMPTY_BULLET, false)?;
    Ok(id)
}

/// Template for aimed line bullets.
fn line_bullet(ctx: &mut CompilerContext) -> Result<ComponentId, BuildError> {
    let id = ctx.component("Line bullet", 37);
    ctx.edit(id)?
        .assert_spawn_order(true)?
        .goto_group(0.0, EMPTY_BULLET, EMPTY_EMITTER, Tween::INSTANT)?
        .point_to_group(0.0, EMPTY_BULLET, EMPTY_TARGET_GROUP, Tween::INSTANT, false)?
        .toggle(0.0, EMPTY_BULLET, true)?
        .alpha(0.0, EMPTY_BULLET, 100.0, 0.2)?;
    Ok(id)
}

/// Build the demo stage into `ctx`.
pub fn build(ctx: &mut CompilerContext) -> Result<(), BuildError> {
    let circle = circle_bullet(ctx)?;
    let line = line_bullet(ctx)?;

    let mut round = BulletPool::new(501, 1000)?;
    let mut aimed = BulletPool::new(1501, 1700)?.oriented(true);

    let enemy = ctx.component("Enemy attack", ENEMY);
    {
        let mut b = ctx.edit(enemy)?;
        b.assert_spawn_order(true)?
            .goto_group(0.0, ENEMY_SPRITE, SCREEN_CENTER, Tween::over(1.0).eased(Easing::EaseOut, 2.0))?
            .goto_group(0.0, ENEMY_EMITTER, SCREEN_CENTER, Tween::over(1.0).eased(Easing::EaseOut, 2.0))?
            .pulse(
                1.0,
                ENEMY_SPRITE,
                rgb(255, 80, 80),
                PulseTiming {
                    fade_in: 0.1,
                    hold: 0.2,
                    fade_out: 0.3,
                },
                false,
            )?
            .scale(1.0, ENEMY_SPRITE, Scaling::by(1.5).over(Tween::over(0.3)).hold(0.2).reversed())?;

        b.instant()
            .radial(1.5, circle, &CIRCLE_1, &mut round, RadialParams::bullets(18))?;
        b.timed().radial_wave(
            3.0,
            circle,
            &CIRCLE_1,
            &mut round,
            RadialWaveParams {
                radial: RadialParams::spaced(20).centered_at(10.0),
                waves: 3,
                interval: 0.4,
            },
        )?;

        let fan = LineParams {
            num_bullets: 5,
            fastest_time: 1.0,
            slowest_time: 2.0,
            dist: OFFSCREEN_DIST,
        };
        b.instant()
            .line(5.0, line, ENEMY_EMITTER, PLR, &mut aimed, fan)?;
        b.instant().line(
            5.5,
            line,
            ENEMY_EMITTER,
            PLR,
            &mut aimed,
            LineParams {
                num_bullets: 8,
                ..fan
            },
        )?;
        b.timed().line(
            6.0,
            line,
            ENEMY_EMITTER,
            PLR,
            &mut aimed,
            TimedLineParams {
                num_bullets: 6,
                spacing: 0.15,
                duration: 1.5,
                dist: OFFSCREEN_DIST,
            },
        )?;

        b.move_by(8.0, ENEMY_SPRITE, 0.0, 200.0, Tween::over(1.0).eased(Easing::EaseIn, 2.0))?
            .move_by(8.0, ENEMY_EMITTER, 0.0, 200.0, Tween::over(1.0).eased(Easing::EaseIn, 2.0))?
            .toggle(9.0, ENEMY_SPRITE, false)?;
    }

    let arc = ctx.component("Opening arc", 38);
    ctx.edit(arc)?
        .instant()
        .arc(0.0, circle, &CIRCLE_1, &mut round, ArcParams::new(7, 15, 270.0))?;

    let spell = ctx.spell("Opening", 60);
    for id in [enemy, arc, circle, line] {
        ctx.add_to_spell(spell, id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shard_core::validate::check_spawn_limits;
    use shard_core::Warning;

    #[test]
    fn demo_stage_builds_cleanly() {
        let mut ctx = CompilerContext::new();
        build(&mut ctx).unwrap();
        assert!(check_spawn_limits(&ctx).is_ok());
        assert_eq!(ctx.spells().len(), 1);
        assert_eq!(ctx.keyframe_count(), 1);
        assert!(ctx
            .diagnostics()
            .warnings()
            .iter()
            .all(|w| !matches!(w, Warning::MissingOrientation { .. })));
    }

    #[test]
    fn demo_stage_exports() {
        let mut ctx = CompilerContext::new();
        build(&mut ctx).unwrap();
        let document = shard_export::build_document(&ctx, &shard_export::ExportSettings::default()).unwrap();
        let total: usize = ctx.components().iter().map(|c| c.triggers().len()).sum();
        assert_eq!(document.triggers.len(), total);
    }
}
