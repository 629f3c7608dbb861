//! Guider circles: 360 pre-placed anchor groups around a center.

use crate::ids::GroupId;

/// A ring of anchors, one per whole degree.
///
/// Degree `d` in `1..=360` maps to `pointer + d - 1`; 0 and multiples of 360
/// land on the anchor for 360.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuiderCircle {
    all: GroupId,
    center: GroupId,
    pointer: GroupId,
}

/// Main guider circle of the stage.
pub const CIRCLE_1: GuiderCircle = GuiderCircle::new(5461, 5461, 5101);

impl GuiderCircle {
    pub const fn new(all: GroupId, center: GroupId, pointer: GroupId) -> Self {
        Self {
            all,
            center,
            pointer,
        }
    }

    /// Group holding the whole circle.
    #[inline]
    pub fn all(&self) -> GroupId {
        self.all
    }

    #[inline]
    pub fn center(&self) -> GroupId {
        self.center
    }

    /// Anchor at degree 1.
    #[inline]
    pub fn pointer(&self) -> GroupId {
        self.pointer
    }

    pub fn anchor(&self, degree: u32) -> GroupId {
        let degree = match degree % 360 {
            0 => 360,
            d => d,
        };
        self.pointer + degree - 1
    }

    /// `(degree, anchor)` for every degree in `1..=360`.
    pub fn anchors(&self) -> impl Iterator<Item = (u32, GroupId)> + '_ {
        (1..=360).map(move |degree| (degree, self.anchor(degree)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_follow_pointer() {
        assert_eq!(CIRCLE_1.anchor(1), 5101);
        assert_eq!(CIRCLE_1.anchor(360), 5460);
        assert_eq!(CIRCLE_1.anchor(0), 5460);
        assert_eq!(CIRCLE_1.anchor(361), 5101);
        assert_eq!(CIRCLE_1.anchors().count(), 360);
    }
}
