//! Angle and timing math shared by the pattern generators

use crate::error::PatternError;

/// Bullets on a partial circle, centered on `center_at` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub num_bullets: u32,
    pub spacing: u32,
    pub center_at: f64,
    /// Skip the parity rules; set by `Radial`, which positions by start angle.
    pub radial_bypass: bool,
}

impl ArcParams {
    pub fn new(num_bullets: u32, spacing: u32, center_at: f64) -> Self {
        Self {
            num_bullets,
            spacing,
            center_at,
            radial_bypass: false,
        }
    }
}

/// Evenly spaced full circle. Give a bullet count, a spacing, or both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadialParams {
    pub num_bullets: Option<u32>,
    pub spacing: Option<u32>,
    pub center_at: f64,
}

impl RadialParams {
    pub fn bullets(num_bullets: u32) -> Self {
        Self {
            num_bullets: Some(num_bullets),
            ..Self::default()
        }
    }

    pub fn spaced(spacing: u32) -> Self {
        Self {
            spacing: Some(spacing),
            ..Self::default()
        }
    }

    pub fn centered_at(mut self, center_at: f64) -> Self {
        self.center_at = center_at;
        self
    }
}

/// Resolved arc: one whole-degree angle per bullet.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLayout {
    pub angles: Vec<u32>,
    /// Bullets cover the full circle.
    pub closes_circle: bool,
}

pub fn arc_layout(params: &ArcParams) -> Result<ArcLayout, PatternError> {
    let ArcParams {
        num_bullets: n,
        spacing: s,
        center_at: center,
        radial_bypass,
    } = *params;

    if !(1..=360).contains(&s) {
        return Err(PatternError::Spacing(s));
    }
    if !(1..=360).contains(&n) {
        return Err(PatternError::BulletCount(n));
    }
    if n * s > 360 {
        return Err(PatternError::ArcTooWide {
            num_bullets: n,
            spacing: s,
        });
    }
    if !center.is_finite() || (center * 2.0).fract() != 0.0 {
        return Err(PatternError::CenterFraction(center));
    }

    if !radial_bypass {
        let half = center.rem_euclid(1.0) != 0.0;
        match (n % 2 == 1, s % 2 == 1) {
            (true, _) if half => return Err(PatternError::OddBulletsCenter(center)),
            (false, true) if !half => return Err(PatternError::EvenBulletsOddSpacingCenter(center)),
            (false, false) if half => return Err(PatternError::EvenBulletsEvenSpacingCenter(center)),
            _ => {}
        }
    }

    let start = (center - f64::from(n - 1) * f64::from(s) / 2.0).rem_euclid(360.0);
    if start.fract() != 0.0 {
        return Err(PatternError::FractionalStart(start));
    }
    let start = start as u32;

    Ok(ArcLayout {
        angles: (0..n).map(|i| (start + i * s) % 360).collect(),
        closes_circle: n * s == 360,
    })
}

fn check_factor(value: u32, err: fn(u32) -> PatternError, range_err: fn(u32) -> PatternError) -> Result<u32, PatternError> {
    if !(1..=360).contains(&value) {
        return Err(range_err(value));
    }
    if 360 % value != 0 {
        return Err(err(value));
    }
    Ok(value)
}

/// Arc covering the full circle with its first bullet at `center_at`.
pub fn radial_to_arc(params: &RadialParams) -> Result<ArcParams, PatternError> {
    let spacing = |s| check_factor(s, PatternError::RadialSpacingFactor, PatternError::Spacing);
    let count = |n| check_factor(n, PatternError::RadialCountFactor, PatternError::BulletCount);

    let (n, s) = match (params.num_bullets, params.spacing) {
        (None, None) => return Err(PatternError::RadialUnderspecified),
        (Some(n), None) => {
            let n = count(n)?;
            (n, 360 / n)
        }
        (None, Some(s)) => {
            let s = spacing(s)?;
            (360 / s, s)
        }
        (Some(n), Some(s)) => {
            let (n, s) = (count(n)?, spacing(s)?);
            if n * s != 360 {
                return Err(PatternError::RadialMismatch {
                    spacing: s,
                    num_bullets: n,
                });
            }
            (n, s)
        }
    };

    Ok(ArcParams {
        num_bullets: n,
        spacing: s,
        center_at: params.center_at + f64::from(n - 1) * f64::from(s) / 2.0,
        radial_bypass: true,
    })
}

/// Travel times spread evenly from `fastest` to `slowest`.
pub fn line_durations(fastest: f64, slowest: f64, num_bullets: u32) -> Result<Vec<f64>, PatternError> {
    if !(fastest > 0.0) {
        return Err(PatternError::FastestTime(fastest));
    }
    if !(slowest > fastest) {
        return Err(PatternError::LineTiming { fastest, slowest });
    }
    if num_bullets < 3 {
        return Err(PatternError::TooFewBullets {
            min: 3,
            got: num_bullets,
        });
    }
    let step = (slowest - fastest) / f64::from(num_bullets - 1);
    Ok((0..num_bullets)
        .map(|i| fastest + step * f64::from(i))
        .collect())
}
