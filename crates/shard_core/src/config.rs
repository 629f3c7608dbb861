//! Compiler configuration

use crate::error::StructureError;
use crate::ids::GroupId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Groups with known conflicts in the target game.
static DEFAULT_RESERVED_GROUPS: Lazy<BTreeSet<GroupId>> = Lazy::new(|| {
    [1, 3, 4, 5, 6, 7, 8, 9, 11, 12, 13, 14, 15, 16, 19, 22, 25, 9999]
        .into_iter()
        .collect()
});

/// Size of the scratch block each multitarget record claims.
pub const SCRATCH_STRIDE: GroupId = 4;

/// Compiler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub reserved_groups: BTreeSet<GroupId>,
    /// Highest hand-assigned group.
    pub max_group: GroupId,
    /// First group handed out by `CompilerContext::unknown_group`.
    pub unknown_group_start: GroupId,
    /// Number of multitarget base components (capacities 1, 2, 4, ...).
    pub multitarget_tiers: u32,
    pub scratch_group_start: GroupId,
    pub default_editor_layer: u8,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            reserved_groups: DEFAULT_RESERVED_GROUPS.clone(),
            max_group: 9999,
            unknown_group_start: 10000,
            multitarget_tiers: 7,
            scratch_group_start: 7001,
            default_editor_layer: 4,
        }
    }
}

impl CompilerConfig {
    #[inline]
    pub fn is_reserved(&self, group: GroupId) -> bool {
        self.reserved_groups.contains(&group)
    }

    /// Largest capacity tier.
    pub fn largest_tier(&self) -> usize {
        1 << self.multitarget_tiers.saturating_sub(1)
    }

    /// Largest target count one multitarget burst can reach.
    pub fn multitarget_ceiling(&self) -> usize {
        (1 << self.multitarget_tiers) - 1
    }

    /// Last group of the scratch area used by multitarget records.
    pub fn scratch_group_end(&self) -> GroupId {
        self.scratch_group_start + SCRATCH_STRIDE * self.largest_tier() as GroupId - 1
    }

    pub fn validate(&self) -> Result<(), StructureError> {
        if !(1..=16).contains(&self.multitarget_tiers) {
            return Err(StructureError::InvalidConfig(format!(
                "multitarget_tiers must be between 1 and 16, got {}",
                self.multitarget_tiers
            )));
        }
        if self.unknown_group_start <= self.max_group {
            return Err(StructureError::InvalidConfig(format!(
                "unknown_group_start {} must be above max_group {}",
                self.unknown_group_start, self.max_group
            )));
        }
        let scratch = self.scratch_group_start..=self.scratch_group_end();
        if *scratch.start() == 0 || *scratch.end() > self.max_group {
            return Err(StructureError::InvalidConfig(format!(
                "scratch groups {scratch:?} must lie within 1..={}",
                self.max_group
            )));
        }
        if let Some(group) = self.reserved_groups.range(scratch).next() {
            return Err(StructureError::InvalidConfig(format!(
                "scratch area overlaps reserved group {group}"
            )));
        }
        Ok(())
    }
}
