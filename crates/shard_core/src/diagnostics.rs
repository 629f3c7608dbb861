//! Non-fatal compiler warnings
//!
//! Warnings are logged through `tracing` as they are raised and kept so
//! callers (and tests) can inspect them afterwards.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Remap string contained identity pairs or non-canonical formatting.
    RedundantRemap { original: String, cleaned: String },
    /// Multitarget template itself contains spawn records.
    MultitargetIntoSpawner { component: String },
    /// Arc wraps the full circle, so the first and last bullets overlap.
    ArcClosesCircle { num_bullets: u32, spacing: u32 },
    /// Oriented pool used with a template that never aims its bullets.
    MissingOrientation { component: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::RedundantRemap { original, cleaned } => {
                write!(f, "redundant remap '{original}' cleaned to '{cleaned}'")
            }
            Warning::MultitargetIntoSpawner { component } => write!(
                f,
                "multitarget template '{component}' contains spawn triggers; \
                 nested spawns may collapse"
            ),
            Warning::ArcClosesCircle {
                num_bullets,
                spacing,
            } => write!(
                f,
                "arc of {num_bullets} bullets at {spacing} degrees closes the circle, use Radial"
            ),
            Warning::MissingOrientation { component } => write!(
                f,
                "oriented bullet pool used with template '{component}' that has no aim rotation"
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Take all collected warnings.
    pub fn drain(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
