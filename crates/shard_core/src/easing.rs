//! Easing curves and tween timing

use crate::error::TriggerError;

/// Easing curve applied to animated triggers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Easing {
    #[default]
    None = 0,
    EaseInOut = 1,
    EaseIn = 2,
    EaseOut = 3,
    ElasticInOut = 4,
    ElasticIn = 5,
    ElasticOut = 6,
    BounceInOut = 7,
    BounceIn = 8,
    BounceOut = 9,
    ExponentialInOut = 10,
    ExponentialIn = 11,
    ExponentialOut = 12,
    SineInOut = 13,
    SineIn = 14,
    SineOut = 15,
    BackInOut = 16,
    BackIn = 17,
    BackOut = 18,
}

impl Easing {
    const ALL: [Easing; 19] = [
        Self::None,
        Self::EaseInOut,
        Self::EaseIn,
        Self::EaseOut,
        Self::ElasticInOut,
        Self::ElasticIn,
        Self::ElasticOut,
        Self::BounceInOut,
        Self::BounceIn,
        Self::BounceOut,
        Self::ExponentialInOut,
        Self::ExponentialIn,
        Self::ExponentialOut,
        Self::SineInOut,
        Self::SineIn,
        Self::SineOut,
        Self::BackInOut,
        Self::BackIn,
        Self::BackOut,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Easing {
    type Error = TriggerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(TriggerError::EasingType(value))
    }
}

/// Duration, easing curve and easing rate of an animated trigger.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tween {
    pub duration: f64,
    pub easing: Easing,
    pub rate: f64,
}

impl Tween {
    pub const INSTANT: Tween = Tween {
        duration: 0.0,
        easing: Easing::None,
        rate: 1.0,
    };

    /// Linear tween over `duration` seconds.
    pub fn over(duration: f64) -> Self {
        Self {
            duration,
            ..Self::INSTANT
        }
    }

    pub fn eased(mut self, easing: Easing, rate: f64) -> Self {
        self.easing = easing;
        self.rate = rate;
        self
    }

    /// Duration must be non-negative and the rate must lie in (0.10, 20].
    pub fn validate(&self) -> Result<(), TriggerError> {
        if self.duration < 0.0 || self.duration.is_nan() {
            return Err(TriggerError::Negative {
                what: "duration",
                value: self.duration,
            });
        }
        if !(self.rate > 0.10 && self.rate <= 20.0) {
            return Err(TriggerError::EasingRate(self.rate));
        }
        Ok(())
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::INSTANT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_type_bounds() {
        assert_eq!(Easing::try_from(0), Ok(Easing::None));
        assert_eq!(Easing::try_from(18), Ok(Easing::BackOut));
        assert_eq!(Easing::try_from(19), Err(TriggerError::EasingType(19)));
        assert_eq!(Easing::try_from(-1), Err(TriggerError::EasingType(-1)));
    }

    #[test]
    fn easing_rate_bounds() {
        assert!(Tween::over(1.0).eased(Easing::EaseIn, 0.10).validate().is_err());
        assert!(Tween::over(1.0).eased(Easing::EaseIn, 0.05).validate().is_err());
        assert!(Tween::over(1.0).eased(Easing::EaseIn, 20.01).validate().is_err());
        assert!(Tween::over(1.0).eased(Easing::EaseIn, 20.0).validate().is_ok());
        assert!(Tween::over(1.0).eased(Easing::EaseIn, 0.11).validate().is_ok());
    }

    #[test]
    fn negative_duration_rejected() {
        let err = Tween::over(-1.0).validate().unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }
}
