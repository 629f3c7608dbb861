//! Well-known groups, remap placeholders and timing constants
//!
//! Time is never wall-clock here: a schedule time in seconds maps to an X
//! coordinate through the player's scroll speed.

/// Concrete or placeholder group identifier.
pub type GroupId = u32;

/// One game tick in seconds.
pub const TICK: f64 = 1.0 / 240.0;

/// Player scroll speed in units per second.
pub const PLR_SPEED: f64 = 311.58;

/// Player group.
pub const PLR: GroupId = 2;
/// Center of the game window.
pub const SCREEN_CENTER: GroupId = 30;
pub const NORTH_GROUP: GroupId = 26;

// Remap placeholders. The holder object sits on the physical player, layer 0.
pub const EMPTY_BULLET: GroupId = 10;
pub const EMPTY_TARGET_GROUP: GroupId = 20;
pub const EMPTY_EMITTER: GroupId = 21;
pub const EMPTY_AUX: GroupId = 23;
pub const EMPTY_KEYFRAME: GroupId = 24;
/// Reserved for the multitarget compiler; templates must never reference it.
pub const EMPTY_MULTITARGET: GroupId = 9989;

/// Minimum travel distance that takes a bullet offscreen.
pub const OFFSCREEN_DIST: f64 = 480.0;

// Travel times over `OFFSCREEN_DIST` at common bullet speeds.
pub const SPEED_VERY_SLOW: f64 = 480.0 / 32.0;
pub const SPEED_SLOW: f64 = 480.0 / 16.0;
pub const SPEED_MEDIUM: f64 = 480.0 / 8.0;
pub const SPEED_FAST: f64 = 480.0 / 4.0;
pub const SPEED_VERY_FAST: f64 = 480.0 / 2.0;

/// Convert a schedule time in seconds to an X distance.
pub fn time_to_dist(time: f64) -> f64 {
    PLR_SPEED * time
}

/// Convert an X distance back to a schedule time in seconds.
pub fn dist_to_time(dist: f64) -> f64 {
    dist / PLR_SPEED
}

/// Trigger spacing that leaves `studs` between bullets moving at `speed`.
pub fn spacing_bullet(speed: f64, studs: f64) -> f64 {
    studs / speed * PLR_SPEED
}
