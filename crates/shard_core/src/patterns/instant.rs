use super::geometry::{arc_layout, line_durations, radial_to_arc, ArcParams, RadialParams};
use super::{check_time, enforce_template, fire, warn_orientation};
use crate::builder::ComponentBuilder;
use crate::component::ComponentId;
use crate::diagnostics::Warning;
use crate::easing::Tween;
use crate::error::BuildError;
use crate::guider::GuiderCircle;
use crate::ids::{GroupId, EMPTY_BULLET, EMPTY_MULTITARGET, EMPTY_TARGET_GROUP, TICK};
use crate::multitarget::Assignment;
use crate::pool::BulletPool;

/// Bullets fired along a line, each slower than the last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParams {
    pub num_bullets: u32,
    /// Travel time of the first bullet, seconds.
    pub fastest_time: f64,
    /// Travel time of the last bullet, seconds.
    pub slowest_time: f64,
    pub dist: f64,
}

/// Patterns that fire every bullet at one schedule time.
pub struct InstantPatterns<'b, 'a> {
    builder: &'b mut ComponentBuilder<'a>,
}

impl<'b, 'a> InstantPatterns<'b, 'a> {
    pub(crate) fn new(builder: &'b mut ComponentBuilder<'a>) -> Self {
        Self { builder }
    }

    /// Fire `template` at `num_bullets` anchors of `circle` centered on
    /// `center_at`. Bullets start at the circle center.
    pub fn arc(
        self,
        time: f64,
        template: ComponentId,
        circle: &GuiderCircle,
        pool: &mut BulletPool,
        params: ArcParams,
    ) -> Result<&'b mut ComponentBuilder<'a>, BuildError> {
        let caller = self.builder.id();
        let ctx = self.builder.ctx();
        check_time(time)?;
        enforce_template(
            ctx,
            template,
            "Arc",
            &[EMPTY_BULLET, EMPTY_TARGET_GROUP],
            &[EMPTY_MULTITARGET],
        )?;
        let layout = arc_layout(&params)?;
        ctx.validate_group(circle.center())?;

        // The caller's pool only advances once the whole burst is emitted.
        let mut draw = pool.clone();
        let mut assignments = Vec::with_capacity(layout.angles.len());
        for &angle in &layout.angles {
            let (bullet, collision) = draw.next_bullet();
            let target = circle.anchor(angle);
            for group in [bullet, collision, target] {
                ctx.validate_group(group)?;
            }
            assignments.push(Assignment {
                bullet,
                target,
                aux1: circle.center(),
                aux2: collision,
            });
        }

        if layout.closes_circle && !params.radial_bypass {
            ctx.warn(Warning::ArcClosesCircle {
                num_bullets: params.num_bullets,
                spacing: params.spacing,
            });
        }
        fire(ctx, caller, time, template, &assignments)?;
        *pool = draw;
        Ok(self.builder)
    }

    /// Full circle of evenly spaced bullets, the first at `center_at`.
    pub fn radial(
        self,
        time: f64,
        template: ComponentId,
        circle: &GuiderCircle,
        pool: &mut BulletPool,
        params: RadialParams,
    ) -> Result<&'b mut ComponentBuilder<'a>, BuildError> {
        let arc = radial_to_arc(&params)?;
        self.arc(time, template, circle, pool, arc)
    }

    /// Fire `template` from `emitter` toward `direction`, then move each
    /// bullet `dist` over a travel time interpolated between the fastest and
    /// slowest times.
    pub fn line(
        self,
        time: f64,
        template: ComponentId,
        emitter: GroupId,
        direction: GroupId,
        pool: &mut BulletPool,
        params: LineParams,
    ) -> Result<&'b mut ComponentBuilder<'a>, BuildError> {
        let caller = self.builder.id();
        let mut draw = pool.clone();
        let bullets = {
            let ctx = self.builder.ctx();
            check_time(time)?;
            enforce_template(ctx, template, "Line", &[EMPTY_BULLET], &[EMPTY_MULTITARGET])?;
            let durations = line_durations(params.fastest_time, params.slowest_time, params.num_bullets)?;
            ctx.validate_group(emitter)?;
            ctx.validate_group(direction)?;

            let mut assignments = Vec::with_capacity(durations.len());
            let mut bullets = Vec::with_capacity(durations.len());
            for duration in durations {
                let (bullet, collision) = draw.next_bullet();
                ctx.validate_group(bullet)?;
                ctx.validate_group(collision)?;
                bullets.push((bullet, duration));
                assignments.push(Assignment {
                    bullet,
                    target: direction,
                    aux1: emitter,
                    aux2: collision,
                });
            }
            warn_orientation(ctx, template, &draw)?;
            fire(ctx, caller, time, template, &assignments)?;
            bullets
        };

        for (bullet, duration) in bullets {
            self.builder
                .move_towards(time + TICK, bullet, direction, params.dist, Tween::over(duration), false)?;
        }
        *pool = draw;
        Ok(self.builder)
    }
}
