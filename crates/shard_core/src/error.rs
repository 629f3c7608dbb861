use crate::component::ComponentId;
use crate::ids::GroupId;
use thiserror::Error;

/// Invalid argument to a trigger builder operation.
#[derive(Debug, Error, PartialEq)]
pub enum TriggerError {
    #[error("{what} must be non-negative, got {value:?}")]
    Negative { what: &'static str, value: f64 },

    #[error("easing type must be an integer between 0 and 18, got {0}")]
    EasingType(i64),

    #[error("easing rate must be greater than 0.10 and at most 20, got {0:?}")]
    EasingRate(f64),

    #[error("group {0} is out of valid range")]
    GroupOutOfRange(GroupId),

    #[error("group {0} is restricted due to known conflicts")]
    RestrictedGroup(GroupId),

    #[error("opacity must be between 0 and 100, got {0:?}")]
    Opacity(f64),

    #[error("scale factor must be positive, got {0:?}")]
    ScaleFactor(f64),

    #[error("scale factor of 1 has no effect")]
    ScaleIdentity,

    #[error("item id must be a positive integer up to 9999, got {0}")]
    ItemId(u32),

    #[error("pickup count of 0 makes no change")]
    PickupNoChange,

    #[error("pickup factor of 1 has no effect")]
    ModifierIdentity,

    #[error("pickup factor must be positive, got {0:?}")]
    ModifierFactor(f64),

    #[error("dynamic point-to-group ignores easing, remove the easing {what}")]
    DynamicEasing { what: &'static str },
}

/// Malformed remap string or remap builder misuse.
#[derive(Debug, Error, PartialEq)]
pub enum RemapError {
    #[error("remap string is empty")]
    Empty,

    #[error("remap string must contain an even number of parts: '{0}'")]
    OddParts(String),

    #[error("remap token '{0}' is not a group id")]
    InvalidToken(String),

    #[error("Duplicate source {0} in remap: one group cannot map to several targets")]
    DuplicateSource(GroupId),

    #[error("duplicate target {0} in remap builder")]
    DuplicateTarget(GroupId),

    #[error("remap '{0}' is empty after removing redundant mappings")]
    EmptyAfterCleaning(String),
}

/// Invalid pattern parameters or a template that breaks the pattern contract.
#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("{pattern}: template component must require spawn order")]
    SpawnOrderRequired { pattern: &'static str },

    #[error("{pattern}: template component must target groups {missing:?}")]
    MissingTargets {
        pattern: &'static str,
        missing: Vec<GroupId>,
    },

    #[error("{pattern}: template component must not target groups {forbidden:?}")]
    ForbiddenTargets {
        pattern: &'static str,
        forbidden: Vec<GroupId>,
    },

    #[error("spacing must be between 1 and 360, got {0}")]
    Spacing(u32),

    #[error("numBullets must be between 1 and 360, got {0}")]
    BulletCount(u32),

    #[error("arc of {num_bullets} bullets at {spacing} degree spacing exceeds 360 degrees")]
    ArcTooWide { num_bullets: u32, spacing: u32 },

    #[error("centerAt must be an integer or integer.5, got {0:?}")]
    CenterFraction(f64),

    #[error("odd bullets requires integer centerAt, got {0:?}")]
    OddBulletsCenter(f64),

    #[error("even bullets with odd spacing requires centerAt ending in .5, got {0:?}")]
    EvenBulletsOddSpacingCenter(f64),

    #[error("even bullets with even spacing requires integer centerAt, got {0:?}")]
    EvenBulletsEvenSpacingCenter(f64),

    #[error("arc starts at {0:?} degrees, which is not a whole degree")]
    FractionalStart(f64),

    #[error("radial must provide spacing or numBullets")]
    RadialUnderspecified,

    #[error("radial spacing {spacing} and numBullets {num_bullets} don't match")]
    RadialMismatch { spacing: u32, num_bullets: u32 },

    #[error("radial spacing must be a factor of 360, got {0}")]
    RadialSpacingFactor(u32),

    #[error("radial numBullets must be a factor of 360, got {0}")]
    RadialCountFactor(u32),

    #[error("fastestTime must be positive, got {0:?}")]
    FastestTime(f64),

    #[error("slowestTime must be greater than fastestTime, got {slowest:?} and {fastest:?}")]
    LineTiming { fastest: f64, slowest: f64 },

    #[error("numBullets must be at least {min}, got {got}")]
    TooFewBullets { min: u32, got: u32 },

    #[error("waves must be at least 1")]
    NoWaves,

    #[error("a single wave is a plain radial, use Radial instead")]
    SingleWave,

    #[error("{what} must be non-negative, got {value:?}")]
    Negative { what: &'static str, value: f64 },

    #[error("multitarget count must be at least 1")]
    EmptyMultitarget,

    #[error("multitarget count {requested} exceeds capacity {ceiling}")]
    MultitargetCapacity { requested: usize, ceiling: usize },

    #[error("number range {min}..={max} is empty")]
    EmptyRange { min: GroupId, max: GroupId },
}

/// Misuse of components, group contexts and registries.
#[derive(Debug, Error, PartialEq)]
pub enum StructureError {
    #[error("component '{0}' already has an active group context")]
    NestedGroupContext(String),

    #[error("component '{0}' has no active group context")]
    NoGroupContext(String),

    #[error("component '{0}' has no triggers")]
    NoTriggers(String),

    #[error("duplicate group {0}")]
    DuplicateGroup(GroupId),

    #[error("at least one group is required")]
    EmptyGroups,

    #[error("{0} is already initialized")]
    AlreadyInitialized(&'static str),

    #[error("component handle {0} is not registered")]
    UnknownComponent(ComponentId),

    #[error("spell handle {0} is not registered")]
    UnknownSpell(usize),

    #[error("invalid compiler config: {0}")]
    InvalidConfig(String),
}

/// Simultaneous spawns that the runtime would collapse into one execution.
#[derive(Debug, Error, PartialEq)]
pub enum HazardError {
    #[error(
        "component '{component}': {expected} simultaneous spawns of group {group} at x={x} \
         collapse into one (expected {expected} executions, actual 1)"
    )]
    Direct {
        component: String,
        group: GroupId,
        x: f64,
        expected: usize,
    },

    #[error(
        "component '{component}': remapped spawn of group {activated} sends {expected} \
         simultaneous spawns into group {group} (expected {expected} executions, actual 1)"
    )]
    Indirect {
        component: String,
        activated: GroupId,
        group: GroupId,
        expected: usize,
    },
}

/// Any failure raised while building components.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error(transparent)]
    Trigger(#[from] TriggerError),

    #[error(transparent)]
    Remap(#[from] RemapError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Structure(#[from] StructureError),
}
