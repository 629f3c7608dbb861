//! Wire-level field schema
//!
//! Field IDs are the numeric keys the level format expects. Several
//! semantic fields share one key (71 is the follow group, the scale and
//! rotate center, and the move direction/location), so `Field` is a plain
//! key, not an enum of meanings.

use serde::Serialize;
use std::fmt;

/// Numeric field key of a trigger record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Field(u16);

impl Field {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ========== General ==========
pub const OBJ_ID: Field = Field(1);
pub const X: Field = Field(2);
pub const Y: Field = Field(3);
pub const DURATION: Field = Field(10);
pub const EDITOR_LAYER: Field = Field(20);
pub const EASING: Field = Field(30);
pub const TARGET: Field = Field(51);
pub const GROUPS: Field = Field(57);
pub const EDITOR_LAYER_2: Field = Field(61);
pub const SPAWN_TRIGGERED: Field = Field(62);
pub const EASING_RATE: Field = Field(85);
pub const MULTI_TRIGGERED: Field = Field(87);
pub const DYNAMIC: Field = Field(397);

// ========== Alpha / Follow / Stop / Toggle ==========
pub const OPACITY: Field = Field(35);
pub const FOLLOW_GROUP: Field = Field(71);
/// 0 = stop, 1 = pause, 2 = resume
pub const STOP_OPTION: Field = Field(580);
pub const STOP_USE_CONTROL_ID: Field = Field(535);
pub const ACTIVATE_GROUP: Field = Field(56);

// ========== Collision ==========
pub const BLOCK_A: Field = Field(80);
pub const BLOCK_B: Field = Field(95);

// ========== Pulse ==========
pub const PULSE_FADE_IN: Field = Field(45);
pub const PULSE_HOLD: Field = Field(46);
pub const PULSE_FADE_OUT: Field = Field(47);
pub const PULSE_HSV: Field = Field(48);
/// `a`-separated string: `HaSaBa0a0`
pub const PULSE_HSV_STRING: Field = Field(49);
/// false = color channel, true = group
pub const PULSE_TARGET_TYPE: Field = Field(52);
pub const PULSE_EXCLUSIVE: Field = Field(86);

// ========== Scale ==========
pub const SCALE_X: Field = Field(150);
pub const SCALE_Y: Field = Field(151);
pub const SCALE_CENTER: Field = Field(71);
pub const SCALE_DIV_BY_X: Field = Field(153);
pub const SCALE_DIV_BY_Y: Field = Field(154);

// ========== Rotate ==========
/// Degrees, clockwise is positive.
pub const ROTATE_ANGLE: Field = Field(68);
pub const ROTATE_CENTER: Field = Field(71);
pub const ROTATE_TARGET: Field = Field(401);
pub const ROTATE_AIM_MODE: Field = Field(100);

// ========== Spawn ==========
/// Dot separated pairs: `1.2.3.4` remaps 1 -> 2 and 3 -> 4.
pub const REMAP_STRING: Field = Field(442);
pub const RESET_REMAP: Field = Field(581);
pub const SPAWN_ORDERED: Field = Field(441);
pub const SPAWN_DELAY: Field = Field(63);

// ========== Move ==========
pub const MOVE_X: Field = Field(28);
pub const MOVE_Y: Field = Field(29);
pub const MOVE_SMALL_STEP: Field = Field(393);
pub const MOVE_TARGET_CENTER: Field = Field(395);
pub const MOVE_TARGET_DIR: Field = Field(71);
pub const MOVE_TARGET_LOCATION: Field = Field(71);
pub const MOVE_TARGET_MODE: Field = Field(100);
pub const MOVE_DIRECTION_MODE: Field = Field(394);
pub const MOVE_DIRECTION_MODE_DISTANCE: Field = Field(396);
pub const MOVE_SILENT: Field = Field(544);

// ========== Count / Pickup ==========
pub const ITEM_ID: Field = Field(80);
pub const COUNT: Field = Field(77);
pub const PICKUP_COUNT: Field = Field(77);
pub const PICKUP_OVERRIDE: Field = Field(139);
/// 1 = multiply, 2 = divide
pub const PICKUP_MULTIPLY_DIVIDE: Field = Field(88);
pub const PICKUP_MODIFIER: Field = Field(449);

/// Fields whose value is a group reference.
pub const TARGET_FIELDS: [Field; 4] = [TARGET, FOLLOW_GROUP, ROTATE_TARGET, MOVE_TARGET_CENTER];

/// Trigger object kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ObjectKind {
    Toggle = 1049,
    Spawn = 1268,
    Pulse = 1006,
    Scale = 2067,
    Move = 901,
    Rotate = 1346,
    Collision = 1815,
    Stop = 1616,
    Count = 1611,
    Follow = 1347,
    Alpha = 1007,
    InstantCount = 1811,
    Pickup = 1817,
}

impl ObjectKind {
    const ALL: [ObjectKind; 13] = [
        Self::Toggle,
        Self::Spawn,
        Self::Pulse,
        Self::Scale,
        Self::Move,
        Self::Rotate,
        Self::Collision,
        Self::Stop,
        Self::Count,
        Self::Follow,
        Self::Alpha,
        Self::InstantCount,
        Self::Pickup,
    ];

    #[inline]
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Look up a kind by its object ID. Unknown IDs yield `None`.
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}
