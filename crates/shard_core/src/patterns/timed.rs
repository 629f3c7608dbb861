use super::geometry::{radial_to_arc, RadialParams};
use super::{check_time, enforce_template, warn_orientation};
use crate::builder::{ComponentBuilder, SpawnOptions};
use crate::component::ComponentId;
use crate::easing::Tween;
use crate::error::{BuildError, PatternError};
use crate::guider::GuiderCircle;
use crate::ids::{GroupId, EMPTY_AUX, EMPTY_BULLET, EMPTY_EMITTER, EMPTY_MULTITARGET, EMPTY_TARGET_GROUP, TICK};
use crate::pool::BulletPool;
use crate::remap::RemapTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialWaveParams {
    pub radial: RadialParams,
    /// At least 2; a single wave is a plain radial.
    pub waves: u32,
    /// Seconds between waves.
    pub interval: f64,
}

/// Bullets fired one after another along a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedLineParams {
    pub num_bullets: u32,
    /// Seconds between bullets.
    pub spacing: f64,
    /// Travel time of each bullet.
    pub duration: f64,
    pub dist: f64,
}

/// Patterns spread over time.
pub struct TimedPatterns<'b, 'a> {
    builder: &'b mut ComponentBuilder<'a>,
}

impl<'b, 'a> TimedPatterns<'b, 'a> {
    pub(crate) fn new(builder: &'b mut ComponentBuilder<'a>) -> Self {
        Self { builder }
    }

    /// Repeat a radial `waves` times, `interval` seconds apart.
    pub fn radial_wave(
        self,
        time: f64,
        template: ComponentId,
        circle: &GuiderCircle,
        pool: &mut BulletPool,
        params: RadialWaveParams,
    ) -> Result<&'b mut ComponentBuilder<'a>, BuildError> {
        match params.waves {
            0 => return Err(PatternError::NoWaves.into()),
            1 => return Err(PatternError::SingleWave.into()),
            _ => {}
        }
        if !(params.interval >= 0.0) {
            return Err(PatternError::Negative {
                what: "interval",
                value: params.interval,
            }
            .into());
        }
        check_time(time)?;
        radial_to_arc(&params.radial)?;
        enforce_template(
            self.builder.ctx(),
            template,
            "Arc",
            &[EMPTY_BULLET, EMPTY_TARGET_GROUP],
            &[EMPTY_MULTITARGET],
        )?;

        for wave in 0..params.waves {
            let at = time + f64::from(wave) * params.interval;
            self.builder
                .instant()
                .radial(at, template, circle, pool, params.radial)?;
        }
        Ok(self.builder)
    }

    /// Fire `template` once per bullet, `spacing` seconds apart, each bullet
    /// moving `dist` toward `direction`.
    pub fn line(
        self,
        time: f64,
        template: ComponentId,
        emitter: GroupId,
        direction: GroupId,
        pool: &mut BulletPool,
        params: TimedLineParams,
    ) -> Result<&'b mut ComponentBuilder<'a>, BuildError> {
        if params.num_bullets < 2 {
            return Err(PatternError::TooFewBullets {
                min: 2,
                got: params.num_bullets,
            }
            .into());
        }
        if !(params.spacing >= 0.0) {
            return Err(PatternError::Negative {
                what: "spacing",
                value: params.spacing,
            }
            .into());
        }
        check_time(time)?;
        Tween::over(params.duration).validate()?;

        let mut draw = pool.clone();
        let mut shots = Vec::with_capacity(params.num_bullets as usize);
        {
            let ctx = self.builder.ctx();
            enforce_template(ctx, template, "Line", &[EMPTY_BULLET], &[EMPTY_MULTITARGET])?;
            ctx.validate_group(emitter)?;
            ctx.validate_group(direction)?;

            for i in 0..params.num_bullets {
                let (bullet, collision) = draw.next_bullet();
                ctx.validate_group(bullet)?;
                ctx.validate_group(collision)?;
                let mut remap = RemapTable::new();
                remap.insert(EMPTY_BULLET, bullet)?;
                remap.insert(EMPTY_TARGET_GROUP, direction)?;
                remap.insert(EMPTY_EMITTER, emitter)?;
                remap.insert(EMPTY_AUX, collision)?;
                shots.push((time + f64::from(i) * params.spacing, bullet, remap));
            }
            warn_orientation(ctx, template, &draw)?;
        }

        for (at, bullet, remap) in shots {
            self.builder
                .spawn_with(at, template, true, SpawnOptions::remap(remap.to_string()))?
                .move_towards(at + TICK, bullet, direction, params.dist, Tween::over(params.duration), false)?;
        }
        *pool = draw;
        Ok(self.builder)
    }
}
