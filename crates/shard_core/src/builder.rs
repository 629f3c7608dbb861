//! Fluent trigger builder
//!
//! Every operation validates its arguments before anything is appended, so a
//! failed call leaves the component untouched.

use crate::color::Hsb;
use crate::component::{Component, ComponentId, Target};
use crate::context::CompilerContext;
use crate::diagnostics::Warning;
use crate::easing::{Easing, Tween};
use crate::error::{BuildError, StructureError, TriggerError};
use crate::field::{self, ObjectKind};
use crate::ids::{time_to_dist, GroupId, EMPTY_KEYFRAME};
use crate::keyframe::{ScaleKey, Scaling};
use crate::patterns::{InstantPatterns, TimedPatterns};
use crate::remap::clean_remap;
use crate::trigger::Trigger;

/// Optional spawn parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnOptions {
    pub remap: Option<String>,
    /// Seconds.
    pub delay: f64,
}

impl SpawnOptions {
    pub fn remap(remap: impl Into<String>) -> Self {
        Self {
            remap: Some(remap.into()),
            delay: 0.0,
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Fade timing of a pulse, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PulseTiming {
    pub fade_in: f64,
    pub hold: f64,
    pub fade_out: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum StopMode {
    Stop = 0,
    Pause = 1,
    Resume = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PickupMode {
    Multiply = 1,
    Divide = 2,
}

const MAX_ITEM_ID: u32 = 9999;

fn non_negative(what: &'static str, value: f64) -> Result<(), TriggerError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TriggerError::Negative { what, value })
    }
}

fn check_item(item_id: u32) -> Result<(), TriggerError> {
    if (1..=MAX_ITEM_ID).contains(&item_id) {
        Ok(())
    } else {
        Err(TriggerError::ItemId(item_id))
    }
}

fn set_tween(trigger: &mut Trigger, tween: &Tween) {
    trigger.set(field::DURATION, tween.duration);
    trigger.set(field::EASING, i64::from(tween.easing.id()));
    trigger.set(field::EASING_RATE, tween.rate);
}

/// Appends trigger records to one component.
///
/// ```
/// use shard_core::{CompilerContext, Tween};
///
/// let mut ctx = CompilerContext::new();
/// let bullet = ctx.component("Bullet", 36);
/// ctx.edit(bullet)
///     .unwrap()
///     .toggle(0.0, 501, true)
///     .unwrap()
///     .move_by(0.0, 501, 30.0, 0.0, Tween::over(1.0))
///     .unwrap();
/// assert_eq!(ctx.get(bullet).unwrap().triggers().len(), 2);
/// ```
#[derive(Debug)]
pub struct ComponentBuilder<'a> {
    ctx: &'a mut CompilerContext,
    id: ComponentId,
}

impl<'a> ComponentBuilder<'a> {
    pub(crate) fn new(ctx: &'a mut CompilerContext, id: ComponentId) -> Self {
        Self { ctx, id }
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn component(&self) -> Result<&Component, StructureError> {
        self.ctx.get(self.id)
    }

    pub(crate) fn ctx(&mut self) -> &mut CompilerContext {
        &mut *self.ctx
    }

    pub fn instant(&mut self) -> InstantPatterns<'_, 'a> {
        InstantPatterns::new(self)
    }

    pub fn timed(&mut self) -> TimedPatterns<'_, 'a> {
        TimedPatterns::new(self)
    }

    /// Record with the component defaults and no target.
    fn bare_record(&self, kind: ObjectKind, time: f64) -> Result<Trigger, BuildError> {
        non_negative("time", time)?;
        let component = self.ctx.get(self.id)?;
        let groups = component.record_groups();
        for &group in &groups {
            self.ctx.validate_group(group)?;
        }

        let mut trigger = Trigger::new(kind, time_to_dist(time));
        trigger.set(field::GROUPS, groups);
        trigger.set(field::EDITOR_LAYER, i64::from(component.editor_layer()));
        trigger.set(field::SPAWN_TRIGGERED, true);
        trigger.set(field::MULTI_TRIGGERED, true);
        Ok(trigger)
    }

    fn record(&self, kind: ObjectKind, time: f64, target: GroupId) -> Result<Trigger, BuildError> {
        self.ctx.validate_group(target)?;
        let mut trigger = self.bare_record(kind, time)?;
        trigger.set(field::TARGET, target);
        Ok(trigger)
    }

    fn commit(&mut self, trigger: Trigger) -> Result<&mut Self, BuildError> {
        self.ctx.get_mut(self.id)?.push(trigger);
        Ok(self)
    }

    // ========================================================================
    // Structure
    // ========================================================================

    pub fn assert_spawn_order(&mut self, required: bool) -> Result<&mut Self, BuildError> {
        self.ctx.get_mut(self.id)?.set_spawn_order(required);
        Ok(self)
    }

    /// Add `groups` to every record appended until `end_group_context`.
    pub fn start_group_context(&mut self, groups: &[GroupId]) -> Result<&mut Self, BuildError> {
        for &group in groups {
            self.ctx.validate_group(group)?;
        }
        self.ctx.get_mut(self.id)?.start_context(groups)?;
        Ok(self)
    }

    pub fn end_group_context(&mut self) -> Result<&mut Self, BuildError> {
        self.ctx.get_mut(self.id)?.end_context()?;
        Ok(self)
    }

    /// Add `groups` to the most recent record only.
    pub fn group_last_trigger(&mut self, groups: &[GroupId]) -> Result<&mut Self, BuildError> {
        for &group in groups {
            self.ctx.validate_group(group)?;
        }
        self.ctx.get_mut(self.id)?.group_last(groups)?;
        Ok(self)
    }

    // ========================================================================
    // Triggers
    // ========================================================================

    pub fn spawn(
        &mut self,
        time: f64,
        target: impl Into<Target>,
        spawn_ordered: bool,
    ) -> Result<&mut Self, BuildError> {
        self.spawn_with(time, target, spawn_ordered, SpawnOptions::default())
    }

    /// Spawn a group, optionally remapping its groups and delaying it.
    pub fn spawn_with(
        &mut self,
        time: f64,
        target: impl Into<Target>,
        spawn_ordered: bool,
        options: SpawnOptions,
    ) -> Result<&mut Self, BuildError> {
        let target = self.ctx.resolve(target.into())?;
        non_negative("spawn delay", options.delay)?;
        let remap = options
            .remap
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(clean_remap)
            .transpose()?;

        let mut trigger = self.record(ObjectKind::Spawn, time, target)?;
        trigger.set(field::SPAWN_ORDERED, spawn_ordered);
        if options.delay > 0.0 {
            trigger.set(field::SPAWN_DELAY, options.delay);
        }
        if let Some(remap) = remap {
            if remap.changed {
                self.ctx.warn(Warning::RedundantRemap {
                    original: options.remap.unwrap_or_default(),
                    cleaned: remap.wire.clone(),
                });
            }
            trigger.set(field::REMAP_STRING, remap.wire);
        }
        self.commit(trigger)
    }

    pub fn toggle(
        &mut self,
        time: f64,
        target: impl Into<Target>,
        activate: bool,
    ) -> Result<&mut Self, BuildError> {
        let target = self.ctx.resolve(target.into())?;
        let mut trigger = self.record(ObjectKind::Toggle, time, target)?;
        trigger.set(field::ACTIVATE_GROUP, activate);
        self.commit(trigger)
    }

    /// Move `target` a set distance toward `direction`.
    pub fn move_towards(
        &mut self,
        time: f64,
        target: GroupId,
        direction: GroupId,
        dist: f64,
        tween: Tween,
        dynamic: bool,
    ) -> Result<&mut Self, BuildError> {
        tween.validate()?;
        self.ctx.validate_group(direction)?;

        let mut trigger = self.record(ObjectKind::Move, time, target)?;
        set_tween(&mut trigger, &tween);
        trigger.set(field::MOVE_DIRECTION_MODE, true);
        trigger.set(field::MOVE_SMALL_STEP, true);
        trigger.set(field::MOVE_TARGET_DIR, direction);
        trigger.set(field::MOVE_TARGET_CENTER, target);
        trigger.set(field::MOVE_DIRECTION_MODE_DISTANCE, dist);
        trigger.set(field::MOVE_SILENT, tween.duration == 0.0);
        if dynamic {
            trigger.set(field::DYNAMIC, true);
        }
        self.commit(trigger)
    }

    pub fn move_by(
        &mut self,
        time: f64,
        target: GroupId,
        dx: f64,
        dy: f64,
        tween: Tween,
    ) -> Result<&mut Self, BuildError> {
        tween.validate()?;
        let mut trigger = self.record(ObjectKind::Move, time, target)?;
        set_tween(&mut trigger, &tween);
        trigger.set(field::MOVE_X, dx);
        trigger.set(field::MOVE_Y, dy);
        trigger.set(field::MOVE_SMALL_STEP, true);
        trigger.set(field::MOVE_SILENT, tween.duration == 0.0);
        self.commit(trigger)
    }

    /// Move `target` onto the position of `location`.
    pub fn goto_group(
        &mut self,
        time: f64,
        target: GroupId,
        location: GroupId,
        tween: Tween,
    ) -> Result<&mut Self, BuildError> {
        tween.validate()?;
        self.ctx.validate_group(location)?;

        let mut trigger = self.record(ObjectKind::Move, time, target)?;
        set_tween(&mut trigger, &tween);
        trigger.set(field::MOVE_TARGET_CENTER, target);
        trigger.set(field::MOVE_TARGET_LOCATION, location);
        trigger.set(field::MOVE_TARGET_MODE, true);
        trigger.set(field::MOVE_SILENT, tween.duration == 0.0);
        self.commit(trigger)
    }

    /// Rotate by `angle` degrees (clockwise positive) around `center`, or
    /// around the target itself.
    pub fn rotate(
        &mut self,
        time: f64,
        target: GroupId,
        angle: f64,
        center: Option<GroupId>,
        tween: Tween,
    ) -> Result<&mut Self, BuildError> {
        tween.validate()?;
        let center = match center {
            Some(center) => {
                self.ctx.validate_group(center)?;
                center
            }
            None => target,
        };

        let mut trigger = self.record(ObjectKind::Rotate, time, target)?;
        set_tween(&mut trigger, &tween);
        trigger.set(field::ROTATE_CENTER, center);
        trigger.set(field::ROTATE_ANGLE, angle);
        self.commit(trigger)
    }

    /// Aim `target` at `direction`.
    pub fn point_to_group(
        &mut self,
        time: f64,
        target: GroupId,
        direction: GroupId,
        tween: Tween,
        dynamic: bool,
    ) -> Result<&mut Self, BuildError> {
        tween.validate()?;
        if dynamic && tween.easing != Easing::None {
            return Err(TriggerError::DynamicEasing { what: "type" }.into());
        }
        if dynamic && tween.rate != 1.0 {
            return Err(TriggerError::DynamicEasing { what: "rate" }.into());
        }
        self.ctx.validate_group(direction)?;

        let mut trigger = self.record(ObjectKind::Rotate, time, target)?;
        set_tween(&mut trigger, &tween);
        trigger.set(field::ROTATE_TARGET, direction);
        trigger.set(field::ROTATE_CENTER, target);
        trigger.set(field::ROTATE_AIM_MODE, true);
        trigger.set(field::DYNAMIC, dynamic);
        self.commit(trigger)
    }

    pub(crate) fn scale_record(
        &mut self,
        time: f64,
        target: GroupId,
        factor: f64,
        divide: bool,
        tween: &Tween,
    ) -> Result<&mut Self, BuildError> {
        let mut trigger = self.record(ObjectKind::Scale, time, target)?;
        set_tween(&mut trigger, tween);
        trigger.set(field::SCALE_CENTER, target);
        trigger.set(field::SCALE_X, factor);
        trigger.set(field::SCALE_Y, factor);
        trigger.set(field::SCALE_DIV_BY_X, divide);
        trigger.set(field::SCALE_DIV_BY_Y, divide);
        self.commit(trigger)
    }

    /// Scale `target` through a shared keyframe component.
    ///
    /// Identical scalings reuse one keyframe; the emitted record is a spawn
    /// remapping the keyframe placeholder onto `target`.
    pub fn scale(&mut self, time: f64, target: GroupId, scaling: Scaling) -> Result<&mut Self, BuildError> {
        if !(scaling.factor > 0.0) {
            return Err(TriggerError::ScaleFactor(scaling.factor).into());
        }
        if scaling.factor == 1.0 {
            return Err(TriggerError::ScaleIdentity.into());
        }
        non_negative("hold", scaling.hold)?;
        scaling.tween().validate()?;
        non_negative("time", time)?;
        self.ctx.validate_group(target)?;

        let keyframe = self.keyframe(&scaling)?;
        let options = if target == EMPTY_KEYFRAME {
            SpawnOptions::default()
        } else {
            SpawnOptions::remap(format!("{EMPTY_KEYFRAME}.{target}"))
        };
        self.spawn_with(time, keyframe, true, options)
    }

    fn keyframe(&mut self, scaling: &Scaling) -> Result<ComponentId, BuildError> {
        let key = ScaleKey::from(scaling);
        if let Some(existing) = self.ctx.keyframes.get(&key) {
            return Ok(existing);
        }

        let caller = self.ctx.unknown_group();
        let name = format!("Scale keyframe {}", self.ctx.keyframe_count() + 1);
        let id = self.ctx.component(name, caller);
        let tween = scaling.tween();
        {
            let mut keyframe = ComponentBuilder::new(&mut *self.ctx, id);
            keyframe
                .assert_spawn_order(true)?
                .scale_record(0.0, EMPTY_KEYFRAME, scaling.factor, false, &tween)?;
            if scaling.reverse {
                let back = tween.duration + scaling.hold;
                keyframe.scale_record(back, EMPTY_KEYFRAME, scaling.factor, true, &tween)?;
            }
        }
        self.ctx.keyframes.insert(key, id);
        tracing::debug!("Built scale keyframe on group {} (factor {})", caller, scaling.factor);
        Ok(id)
    }

    pub fn pulse(
        &mut self,
        time: f64,
        target: GroupId,
        hsb: Hsb,
        timing: PulseTiming,
        exclusive: bool,
    ) -> Result<&mut Self, BuildError> {
        non_negative("fade in", timing.fade_in)?;
        non_negative("hold", timing.hold)?;
        non_negative("fade out", timing.fade_out)?;

        let mut trigger = self.record(ObjectKind::Pulse, time, target)?;
        trigger.set(field::PULSE_HSV, true);
        trigger.set(field::PULSE_TARGET_TYPE, true);
        trigger.set(field::PULSE_HSV_STRING, hsb.to_string());
        trigger.set(field::PULSE_FADE_IN, timing.fade_in);
        trigger.set(field::PULSE_HOLD, timing.hold);
        trigger.set(field::PULSE_FADE_OUT, timing.fade_out);
        if exclusive {
            trigger.set(field::PULSE_EXCLUSIVE, true);
        }
        self.commit(trigger)
    }

    /// Fade `target` to `opacity` percent.
    pub fn alpha(
        &mut self,
        time: f64,
        target: GroupId,
        opacity: f64,
        duration: f64,
    ) -> Result<&mut Self, BuildError> {
        if !(0.0..=100.0).contains(&opacity) {
            return Err(TriggerError::Opacity(opacity).into());
        }
        non_negative("duration", duration)?;

        let mut trigger = self.record(ObjectKind::Alpha, time, target)?;
        trigger.set(field::OPACITY, opacity / 100.0);
        trigger.set(field::DURATION, duration);
        self.commit(trigger)
    }

    /// Make `target` copy the movement of `leader`.
    pub fn follow(
        &mut self,
        time: f64,
        target: GroupId,
        leader: GroupId,
        duration: f64,
    ) -> Result<&mut Self, BuildError> {
        non_negative("duration", duration)?;
        self.ctx.validate_group(leader)?;

        let mut trigger = self.record(ObjectKind::Follow, time, target)?;
        trigger.set(field::FOLLOW_GROUP, leader);
        trigger.set(field::DURATION, duration);
        self.commit(trigger)
    }

    fn stop_record(
        &mut self,
        time: f64,
        target: GroupId,
        mode: StopMode,
        use_control_id: bool,
    ) -> Result<&mut Self, BuildError> {
        let mut trigger = self.record(ObjectKind::Stop, time, target)?;
        trigger.set(field::STOP_OPTION, i64::from(mode as u8));
        trigger.set(field::STOP_USE_CONTROL_ID, use_control_id);
        self.commit(trigger)
    }

    /// Stop the target's running animations and spawns.
    pub fn stop(&mut self, time: f64, target: GroupId, use_control_id: bool) -> Result<&mut Self, BuildError> {
        self.stop_record(time, target, StopMode::Stop, use_control_id)
    }

    pub fn pause(&mut self, time: f64, target: GroupId, use_control_id: bool) -> Result<&mut Self, BuildError> {
        self.stop_record(time, target, StopMode::Pause, use_control_id)
    }

    pub fn resume(&mut self, time: f64, target: GroupId, use_control_id: bool) -> Result<&mut Self, BuildError> {
        self.stop_record(time, target, StopMode::Resume, use_control_id)
    }

    /// Toggle `target` when collision blocks `block_a` and `block_b` touch.
    pub fn collision(
        &mut self,
        time: f64,
        target: GroupId,
        block_a: u32,
        block_b: u32,
        activate: bool,
    ) -> Result<&mut Self, BuildError> {
        let mut trigger = self.record(ObjectKind::Collision, time, target)?;
        trigger.set(field::BLOCK_A, block_a);
        trigger.set(field::BLOCK_B, block_b);
        trigger.set(field::ACTIVATE_GROUP, activate);
        self.commit(trigger)
    }

    /// Toggle `target` if item `item_id` equals `count` right now.
    pub fn count(
        &mut self,
        time: f64,
        target: GroupId,
        item_id: u32,
        count: i64,
        activate: bool,
    ) -> Result<&mut Self, BuildError> {
        check_item(item_id)?;
        let mut trigger = self.record(ObjectKind::InstantCount, time, target)?;
        trigger.set(field::ITEM_ID, item_id);
        trigger.set(field::COUNT, count);
        trigger.set(field::ACTIVATE_GROUP, activate);
        self.commit(trigger)
    }

    /// Add `count` to item `item_id`, or set it when `overwrite` is on.
    pub fn pickup(
        &mut self,
        time: f64,
        item_id: u32,
        count: i64,
        overwrite: bool,
    ) -> Result<&mut Self, BuildError> {
        check_item(item_id)?;
        if count == 0 {
            return Err(TriggerError::PickupNoChange.into());
        }
        let mut trigger = self.bare_record(ObjectKind::Pickup, time)?;
        trigger.set(field::ITEM_ID, item_id);
        trigger.set(field::PICKUP_COUNT, count);
        trigger.set(field::PICKUP_OVERRIDE, overwrite);
        self.commit(trigger)
    }

    /// Multiply or divide item `item_id` by `factor`.
    pub fn pickup_modify(
        &mut self,
        time: f64,
        item_id: u32,
        factor: f64,
        mode: PickupMode,
    ) -> Result<&mut Self, BuildError> {
        check_item(item_id)?;
        if factor == 1.0 {
            return Err(TriggerError::ModifierIdentity.into());
        }
        if !(factor > 0.0) {
            return Err(TriggerError::ModifierFactor(factor).into());
        }
        let mut trigger = self.bare_record(ObjectKind::Pickup, time)?;
        trigger.set(field::ITEM_ID, item_id);
        trigger.set(field::PICKUP_MULTIPLY_DIVIDE, i64::from(mode as u8));
        trigger.set(field::PICKUP_MODIFIER, factor);
        self.commit(trigger)
    }
}
