//! Cycling number ranges and bullet pools

use crate::error::PatternError;
use crate::ids::GroupId;
use std::ops::RangeInclusive;

/// Yields `min, min+1, ..., max, min, ...` forever.
#[derive(Debug, Clone)]
pub struct NumberCycler {
    min: u32,
    max: u32,
    current: u32,
}

impl NumberCycler {
    pub fn new(min: u32, max: u32) -> Result<Self, PatternError> {
        if min > max {
            return Err(PatternError::EmptyRange { min, max });
        }
        Ok(Self {
            min,
            max,
            current: min,
        })
    }

    pub fn next_number(&mut self) -> u32 {
        let value = self.current;
        self.current = if value >= self.max { self.min } else { value + 1 };
        value
    }
}

/// Contiguous range of bullet groups handed out round-robin.
///
/// Each bullet `b` has a paired collision group `b + size()`, so a pool of
/// `501..=1000` owns `1001..=1500` for collisions as well.
#[derive(Debug, Clone)]
pub struct BulletPool {
    range: RangeInclusive<GroupId>,
    cursor: NumberCycler,
    oriented: bool,
}

impl BulletPool {
    pub fn new(min: GroupId, max: GroupId) -> Result<Self, PatternError> {
        Ok(Self {
            range: min..=max,
            cursor: NumberCycler::new(min, max)?,
            oriented: false,
        })
    }

    /// Mark the pool as holding sprites that need an aim rotation.
    pub fn oriented(mut self, oriented: bool) -> Self {
        self.oriented = oriented;
        self
    }

    #[inline]
    pub fn is_oriented(&self) -> bool {
        self.oriented
    }

    #[inline]
    pub fn groups(&self) -> RangeInclusive<GroupId> {
        self.range.clone()
    }

    /// Number of bullets in the pool.
    pub fn size(&self) -> u32 {
        self.range.end() - self.range.start() + 1
    }

    pub fn collision_of(&self, bullet: GroupId) -> GroupId {
        bullet + self.size()
    }

    /// Next bullet and its collision group.
    pub fn next_bullet(&mut self) -> (GroupId, GroupId) {
        let bullet = self.cursor.next_number();
        (bullet, self.collision_of(bullet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycler_wraps_around() {
        let mut cycler = NumberCycler::new(1, 3).unwrap();
        let seen: Vec<_> = (0..5).map(|_| cycler.next_number()).collect();
        assert_eq!(seen, vec![1, 2, 3, 1, 2]);
    }

    #[test]
    fn cycler_rejects_inverted_range() {
        assert_eq!(
            NumberCycler::new(5, 1).unwrap_err(),
            PatternError::EmptyRange { min: 5, max: 1 }
        );
    }

    #[test]
    fn single_value_cycler_repeats() {
        let mut cycler = NumberCycler::new(7, 7).unwrap();
        assert_eq!(cycler.next_number(), 7);
        assert_eq!(cycler.next_number(), 7);
    }

    #[test]
    fn pool_pairs_bullets_with_collision_groups() {
        let mut pool = BulletPool::new(501, 1000).unwrap();
        assert_eq!(pool.size(), 500);
        assert_eq!(pool.next_bullet(), (501, 1001));
        assert_eq!(pool.next_bullet(), (502, 1002));
        assert!(!pool.is_oriented());
        assert!(pool.oriented(true).is_oriented());
    }
}
