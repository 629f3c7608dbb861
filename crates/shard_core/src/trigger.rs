//! Trigger records
//!
//! A trigger is an ordered map from field key to value. Records are built by
//! `ComponentBuilder` and are read-only afterwards, except for the position
//! assigned at export time.

use crate::field::{self, Field, ObjectKind};
use crate::ids::GroupId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field value as written to the level file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Groups(Vec<GroupId>),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(v as f64),
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<GroupId> {
        match *self {
            Value::Int(v) => GroupId::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<GroupId>> for Value {
    fn from(v: Vec<GroupId>) -> Self {
        Value::Groups(v)
    }
}

/// One emitted game object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trigger {
    fields: BTreeMap<Field, Value>,
}

impl Trigger {
    pub(crate) fn new(kind: ObjectKind, x: f64) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field::OBJ_ID, Value::Int(kind.id().into()));
        fields.insert(field::X, Value::Float(x));
        Self { fields }
    }

    #[inline]
    pub fn get(&self, key: Field) -> Option<&Value> {
        self.fields.get(&key)
    }

    #[inline]
    pub fn contains(&self, key: Field) -> bool {
        self.fields.contains_key(&key)
    }

    pub(crate) fn set(&mut self, key: Field, value: impl Into<Value>) {
        self.fields.insert(key, value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &Value)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn kind(&self) -> Option<ObjectKind> {
        self.get(field::OBJ_ID)
            .and_then(Value::as_group)
            .and_then(|id| u16::try_from(id).ok())
            .and_then(ObjectKind::from_id)
    }

    #[inline]
    pub fn is_spawn(&self) -> bool {
        self.kind() == Some(ObjectKind::Spawn)
    }

    pub fn x(&self) -> f64 {
        self.get(field::X).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn y(&self) -> Option<f64> {
        self.get(field::Y).and_then(Value::as_f64)
    }

    /// Place the record in the editor. Used by the exporter only.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.set(field::X, x);
        self.set(field::Y, y);
    }

    pub fn target(&self) -> Option<GroupId> {
        self.get(field::TARGET).and_then(Value::as_group)
    }

    /// Owning groups plus any context groups, caller first.
    pub fn groups(&self) -> &[GroupId] {
        match self.get(field::GROUPS) {
            Some(Value::Groups(groups)) => groups,
            _ => &[],
        }
    }

    pub(crate) fn groups_mut(&mut self) -> Option<&mut Vec<GroupId>> {
        match self.fields.get_mut(&field::GROUPS) {
            Some(Value::Groups(groups)) => Some(groups),
            _ => None,
        }
    }

    pub fn remap(&self) -> Option<&str> {
        self.get(field::REMAP_STRING).and_then(Value::as_str)
    }

    pub fn spawn_delay(&self) -> f64 {
        self.get(field::SPAWN_DELAY)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    pub fn requires_spawn_order(&self) -> bool {
        self.get(field::SPAWN_ORDERED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Every group referenced through a group-valued field.
    pub fn group_refs(&self) -> impl Iterator<Item = GroupId> + '_ {
        field::TARGET_FIELDS
            .into_iter()
            .filter_map(|key| self.get(key).and_then(Value::as_group))
    }

    /// Aim-mode rotate: orients the target toward another group.
    pub fn is_aim_rotate(&self) -> bool {
        self.kind() == Some(ObjectKind::Rotate)
            && self.get(field::ROTATE_AIM_MODE).and_then(Value::as_bool) == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_id_and_x() {
        let trigger = Trigger::new(ObjectKind::Spawn, 12.5);
        assert_eq!(trigger.kind(), Some(ObjectKind::Spawn));
        assert!(trigger.is_spawn());
        assert_eq!(trigger.x(), 12.5);
        assert_eq!(trigger.groups(), &[] as &[GroupId]);
    }

    #[test]
    fn serializes_as_numeric_keyed_object() {
        let mut trigger = Trigger::new(ObjectKind::Toggle, 0.0);
        trigger.set(field::TARGET, 501u32);
        trigger.set(field::GROUPS, vec![36u32]);
        trigger.set(field::ACTIVATE_GROUP, true);

        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["1"], 1049);
        assert_eq!(json["51"], 501);
        assert_eq!(json["57"], serde_json::json!([36]));
        assert_eq!(json["56"], true);
    }

    #[test]
    fn group_refs_cover_all_group_fields() {
        let mut trigger = Trigger::new(ObjectKind::Move, 0.0);
        trigger.set(field::TARGET, 501u32);
        trigger.set(field::MOVE_TARGET_DIR, 30u32);
        let refs: Vec<_> = trigger.group_refs().collect();
        assert_eq!(refs, vec![501, 30]);
    }
}
