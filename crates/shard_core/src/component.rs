//! Components: named, group-owned lists of trigger records

use crate::error::StructureError;
use crate::ids::GroupId;
use crate::trigger::Trigger;
use std::collections::BTreeSet;
use std::fmt;

/// Handle to a component registered in a `CompilerContext`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Trigger target: a raw group, or a component standing for its caller group.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    Group(GroupId),
    Component(ComponentId),
}

impl From<GroupId> for Target {
    fn from(group: GroupId) -> Self {
        Target::Group(group)
    }
}

impl From<ComponentId> for Target {
    fn from(id: ComponentId) -> Self {
        Target::Component(id)
    }
}

#[derive(Debug, Clone)]
pub struct Component {
    id: ComponentId,
    name: String,
    caller: GroupId,
    context: Option<Vec<GroupId>>,
    editor_layer: u8,
    spawn_order: Option<bool>,
    triggers: Vec<Trigger>,
}

impl Component {
    pub(crate) fn new(id: ComponentId, name: String, caller: GroupId, editor_layer: u8) -> Self {
        Self {
            id,
            name,
            caller,
            context: None,
            editor_layer,
            spawn_order: None,
            triggers: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical group that activates this component.
    #[inline]
    pub fn caller_group(&self) -> GroupId {
        self.caller
    }

    #[inline]
    pub fn editor_layer(&self) -> u8 {
        self.editor_layer
    }

    /// `None` until `assert_spawn_order` is called.
    #[inline]
    pub fn spawn_order(&self) -> Option<bool> {
        self.spawn_order
    }

    #[inline]
    pub fn requires_spawn_order(&self) -> bool {
        self.spawn_order == Some(true)
    }

    pub(crate) fn set_spawn_order(&mut self, required: bool) {
        self.spawn_order = Some(required);
    }

    #[inline]
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    #[inline]
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub fn has_spawn(&self) -> bool {
        self.triggers.iter().any(Trigger::is_spawn)
    }

    pub fn has_aim_rotate(&self) -> bool {
        self.triggers.iter().any(Trigger::is_aim_rotate)
    }

    /// Groups referenced by any record's group-valued fields.
    pub fn targeted_groups(&self) -> BTreeSet<GroupId> {
        self.triggers.iter().flat_map(Trigger::group_refs).collect()
    }

    /// GROUPS value for the next record.
    pub(crate) fn record_groups(&self) -> Vec<GroupId> {
        let mut groups = vec![self.caller];
        if let Some(context) = &self.context {
            groups.extend(context.iter().copied());
        }
        groups
    }

    pub(crate) fn push(&mut self, trigger: Trigger) {
        self.triggers.push(trigger);
    }

    pub(crate) fn start_context(&mut self, groups: &[GroupId]) -> Result<(), StructureError> {
        if self.context.is_some() {
            return Err(StructureError::NestedGroupContext(self.name.clone()));
        }
        self.context = Some(flatten_groups(groups)?);
        Ok(())
    }

    pub(crate) fn end_context(&mut self) -> Result<(), StructureError> {
        self.context
            .take()
            .map(|_| ())
            .ok_or_else(|| StructureError::NoGroupContext(self.name.clone()))
    }

    /// Append extra groups to the most recent record.
    pub(crate) fn group_last(&mut self, groups: &[GroupId]) -> Result<(), StructureError> {
        let extra = flatten_groups(groups)?;
        let name = &self.name;
        let last = self
            .triggers
            .last_mut()
            .ok_or_else(|| StructureError::NoTriggers(name.clone()))?;
        let current = last
            .groups_mut()
            .ok_or_else(|| StructureError::NoTriggers(name.clone()))?;
        for group in extra {
            if current.contains(&group) {
                return Err(StructureError::DuplicateGroup(group));
            }
            current.push(group);
        }
        Ok(())
    }
}

/// Reject empty lists and repeated groups.
pub(crate) fn flatten_groups(groups: &[GroupId]) -> Result<Vec<GroupId>, StructureError> {
    if groups.is_empty() {
        return Err(StructureError::EmptyGroups);
    }
    let mut out = Vec::with_capacity(groups.len());
    for &group in groups {
        if out.contains(&group) {
            return Err(StructureError::DuplicateGroup(group));
        }
        out.push(group);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{self, ObjectKind};

    fn component() -> Component {
        Component::new(ComponentId(0), "Test".into(), 36, 4)
    }

    #[test]
    fn context_adds_groups_to_records() {
        let mut comp = component();
        assert_eq!(comp.record_groups(), vec![36]);
        comp.start_context(&[100, 200]).unwrap();
        assert_eq!(comp.record_groups(), vec![36, 100, 200]);
        comp.end_context().unwrap();
        assert_eq!(comp.record_groups(), vec![36]);
    }

    #[test]
    fn nested_context_rejected() {
        let mut comp = component();
        comp.start_context(&[100]).unwrap();
        let err = comp.start_context(&[200]).unwrap_err();
        assert!(err.to_string().contains("already has an active group context"));
    }

    #[test]
    fn ending_without_context_rejected() {
        let err = component().end_context().unwrap_err();
        assert!(err.to_string().contains("no active group context"));
    }

    #[test]
    fn empty_and_duplicate_groups_rejected() {
        assert!(flatten_groups(&[])
            .unwrap_err()
            .to_string()
            .contains("at least one group"));
        assert!(flatten_groups(&[5, 5])
            .unwrap_err()
            .to_string()
            .contains("duplicate"));
    }

    #[test]
    fn group_last_requires_a_record() {
        let mut comp = component();
        assert_eq!(
            comp.group_last(&[100]).unwrap_err(),
            StructureError::NoTriggers("Test".into())
        );

        let mut trigger = Trigger::new(ObjectKind::Toggle, 0.0);
        trigger.set(field::GROUPS, comp.record_groups());
        comp.push(trigger);
        comp.group_last(&[100]).unwrap();
        assert_eq!(comp.triggers()[0].groups(), &[36, 100]);
    }
}
