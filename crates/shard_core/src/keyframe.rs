//! Memoized scale keyframe components

use crate::component::ComponentId;
use crate::easing::Easing;
use std::collections::HashMap;

/// Scale animation parameters.
///
/// ```
/// use shard_core::{Easing, Scaling, Tween};
///
/// let pop = Scaling::by(2.0)
///     .over(Tween::over(0.5).eased(Easing::EaseOut, 2.0))
///     .hold(1.0)
///     .reversed();
/// assert!(pop.reverse);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub factor: f64,
    pub hold: f64,
    pub duration: f64,
    pub easing: Easing,
    pub rate: f64,
    /// Scale back down after `hold`.
    pub reverse: bool,
}

impl Scaling {
    pub fn by(factor: f64) -> Self {
        Self {
            factor,
            hold: 0.0,
            duration: 0.0,
            easing: Easing::None,
            rate: 1.0,
            reverse: false,
        }
    }

    pub fn over(mut self, tween: crate::Tween) -> Self {
        self.duration = tween.duration;
        self.easing = tween.easing;
        self.rate = tween.rate;
        self
    }

    pub fn hold(mut self, hold: f64) -> Self {
        self.hold = hold;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub(crate) fn tween(&self) -> crate::Tween {
        crate::Tween {
            duration: self.duration,
            easing: self.easing,
            rate: self.rate,
        }
    }
}

/// Hashable identity of a `Scaling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ScaleKey {
    factor: u64,
    hold: u64,
    duration: u64,
    easing: Easing,
    rate: u64,
    reverse: bool,
}

impl From<&Scaling> for ScaleKey {
    fn from(s: &Scaling) -> Self {
        // +0.0 folds negative zero into positive zero
        let bits = |v: f64| (v + 0.0).to_bits();
        Self {
            factor: bits(s.factor),
            hold: bits(s.hold),
            duration: bits(s.duration),
            easing: s.easing,
            rate: bits(s.rate),
            reverse: s.reverse,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct KeyframeCache {
    entries: HashMap<ScaleKey, ComponentId>,
}

impl KeyframeCache {
    pub(crate) fn get(&self, key: &ScaleKey) -> Option<ComponentId> {
        self.entries.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: ScaleKey, component: ComponentId) {
        self.entries.insert(key, component);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_parameters_share_a_key() {
        let a = Scaling::by(2.0).hold(0.5);
        let b = Scaling::by(2.0).hold(0.5);
        assert_eq!(ScaleKey::from(&a), ScaleKey::from(&b));
        assert_ne!(ScaleKey::from(&a), ScaleKey::from(&b.reversed()));
        assert_eq!(
            ScaleKey::from(&Scaling::by(2.0).hold(0.0)),
            ScaleKey::from(&Scaling::by(2.0).hold(-0.0))
        );
    }
}
