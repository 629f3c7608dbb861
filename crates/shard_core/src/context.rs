//! Compiler context: owns every component, spell and shared registry.

use crate::builder::ComponentBuilder;
use crate::component::{Component, ComponentId, Target};
use crate::config::CompilerConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{BuildError, StructureError, TriggerError};
use crate::ids::GroupId;
use crate::keyframe::KeyframeCache;
use crate::multitarget::MultitargetBases;

/// Handle to a spell registered in a `CompilerContext`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SpellId(usize);

/// Named collection of components started from one caller group.
#[derive(Debug, Clone)]
pub struct Spell {
    name: String,
    caller_group: GroupId,
    components: Vec<ComponentId>,
}

impl Spell {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn caller_group(&self) -> GroupId {
        self.caller_group
    }

    #[inline]
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }
}

/// Registry and shared state of one compilation.
///
/// Components are kept in creation order, which is also export order.
#[derive(Debug)]
pub struct CompilerContext {
    config: CompilerConfig,
    components: Vec<Component>,
    spells: Vec<Spell>,
    next_unknown: GroupId,
    pub(crate) multitarget: Option<MultitargetBases>,
    pub(crate) keyframes: KeyframeCache,
    diagnostics: Diagnostics,
}

impl CompilerContext {
    /// Context with the default configuration.
    pub fn new() -> Self {
        Self::build(CompilerConfig::default())
    }

    pub fn with_config(config: CompilerConfig) -> Result<Self, StructureError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CompilerConfig) -> Self {
        Self {
            next_unknown: config.unknown_group_start,
            config,
            components: Vec::new(),
            spells: Vec::new(),
            multitarget: None,
            keyframes: KeyframeCache::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Fresh group above every hand-assigned one.
    pub fn unknown_group(&mut self) -> GroupId {
        let group = self.next_unknown;
        self.next_unknown += 1;
        group
    }

    /// Highest unknown group issued so far.
    pub fn last_unknown_group(&self) -> Option<GroupId> {
        (self.next_unknown > self.config.unknown_group_start).then(|| self.next_unknown - 1)
    }

    /// Register a component on the default editor layer.
    pub fn component(&mut self, name: impl Into<String>, caller: GroupId) -> ComponentId {
        let layer = self.config.default_editor_layer;
        self.component_on_layer(name, caller, layer)
    }

    pub fn component_on_layer(
        &mut self,
        name: impl Into<String>,
        caller: GroupId,
        editor_layer: u8,
    ) -> ComponentId {
        let id = ComponentId(self.components.len() as u32);
        let name = name.into();
        tracing::debug!("Registered component '{}' on group {}", name, caller);
        self.components
            .push(Component::new(id, name, caller, editor_layer));
        id
    }

    pub fn get(&self, id: ComponentId) -> Result<&Component, StructureError> {
        self.components
            .get(id.index())
            .ok_or(StructureError::UnknownComponent(id))
    }

    pub(crate) fn get_mut(&mut self, id: ComponentId) -> Result<&mut Component, StructureError> {
        self.components
            .get_mut(id.index())
            .ok_or(StructureError::UnknownComponent(id))
    }

    /// Builder appending records to `id`.
    pub fn edit(&mut self, id: ComponentId) -> Result<ComponentBuilder<'_>, StructureError> {
        self.get(id)?;
        Ok(ComponentBuilder::new(self, id))
    }

    #[inline]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Caller group of a component target, or the raw group.
    pub fn resolve(&self, target: Target) -> Result<GroupId, StructureError> {
        match target {
            Target::Group(group) => Ok(group),
            Target::Component(id) => Ok(self.get(id)?.caller_group()),
        }
    }

    /// Groups must not be reserved and must be hand-assigned or already issued.
    pub fn validate_group(&self, group: GroupId) -> Result<(), TriggerError> {
        if self.config.is_reserved(group) {
            return Err(TriggerError::RestrictedGroup(group));
        }
        let hand_assigned = (1..=self.config.max_group).contains(&group);
        let issued = self
            .last_unknown_group()
            .is_some_and(|last| (self.config.unknown_group_start..=last).contains(&group));
        if hand_assigned || issued {
            Ok(())
        } else {
            Err(TriggerError::GroupOutOfRange(group))
        }
    }

    pub fn spell(&mut self, name: impl Into<String>, caller_group: GroupId) -> SpellId {
        self.spells.push(Spell {
            name: name.into(),
            caller_group,
            components: Vec::new(),
        });
        SpellId(self.spells.len() - 1)
    }

    pub fn add_to_spell(&mut self, spell: SpellId, component: ComponentId) -> Result<(), StructureError> {
        self.get(component)?;
        let spell = self
            .spells
            .get_mut(spell.0)
            .ok_or(StructureError::UnknownSpell(spell.0))?;
        if !spell.components.contains(&component) {
            spell.components.push(component);
        }
        Ok(())
    }

    #[inline]
    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[inline]
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        self.diagnostics.warn(warning);
    }

    /// Number of distinct scale keyframe components built so far.
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Build the multitarget base components now.
    ///
    /// They are otherwise built on first use. Fails when already built.
    pub fn init_multitarget(&mut self) -> Result<(), BuildError> {
        if self.multitarget.is_some() {
            return Err(StructureError::AlreadyInitialized("multitarget registry").into());
        }
        let bases = MultitargetBases::build(self)?;
        self.multitarget = Some(bases);
        Ok(())
    }

    /// Multitarget base components, built on first use.
    pub fn multitarget(&mut self) -> Result<&MultitargetBases, BuildError> {
        let bases = match self.multitarget.take() {
            Some(bases) => bases,
            None => MultitargetBases::build(self)?,
        };
        Ok(self.multitarget.insert(bases))
    }
}

impl Default for CompilerContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_groups_are_sequential() {
        let mut ctx = CompilerContext::new();
        assert_eq!(ctx.last_unknown_group(), None);
        assert_eq!(ctx.unknown_group(), 10000);
        assert_eq!(ctx.unknown_group(), 10001);
        assert_eq!(ctx.last_unknown_group(), Some(10001));
    }

    #[test]
    fn group_validation() {
        let mut ctx = CompilerContext::new();
        assert!(ctx.validate_group(36).is_ok());
        assert!(ctx
            .validate_group(0)
            .unwrap_err()
            .to_string()
            .contains("out of valid range"));
        assert!(ctx
            .validate_group(10000)
            .unwrap_err()
            .to_string()
            .contains("out of valid range"));
        assert!(ctx
            .validate_group(3)
            .unwrap_err()
            .to_string()
            .contains("restricted"));

        ctx.unknown_group();
        assert!(ctx.validate_group(10000).is_ok());
        assert!(ctx.validate_group(10001).is_err());
    }

    #[test]
    fn component_targets_resolve_to_caller() {
        let mut ctx = CompilerContext::new();
        let id = ctx.component("Bullet", 36);
        assert_eq!(ctx.resolve(Target::Component(id)), Ok(36));
        assert_eq!(ctx.resolve(Target::Group(40)), Ok(40));
        assert_eq!(ctx.get(id).unwrap().editor_layer(), 4);
        assert_eq!(ctx.components().len(), 1);
    }

    #[test]
    fn spells_collect_components_once() {
        let mut ctx = CompilerContext::new();
        let comp = ctx.component("Bullet", 36);
        let spell = ctx.spell("Opening", 37);
        ctx.add_to_spell(spell, comp).unwrap();
        ctx.add_to_spell(spell, comp).unwrap();
        assert_eq!(ctx.spells()[0].components(), &[comp]);
        assert_eq!(ctx.spells()[0].caller_group(), 37);
    }

    #[test]
    fn foreign_spell_handle_rejected() {
        let mut other = CompilerContext::new();
        other.spell("Elsewhere", 40);
        let foreign = other.spell("Elsewhere too", 41);

        let mut ctx = CompilerContext::new();
        let comp = ctx.component("Bullet", 36);
        assert_eq!(
            ctx.add_to_spell(foreign, comp),
            Err(StructureError::UnknownSpell(1))
        );
    }

    #[test]
    fn invalid_config_rejected() {
        let config = CompilerConfig {
            multitarget_tiers: 0,
            ..Default::default()
        };
        assert!(CompilerContext::with_config(config).is_err());
    }

    #[test]
    fn multitarget_initializes_once() {
        let mut ctx = CompilerContext::new();
        ctx.init_multitarget().unwrap();
        let err = ctx.init_multitarget().unwrap_err();
        assert!(err.to_string().contains("already initialized"));
        assert_eq!(ctx.multitarget().unwrap().ceiling(), 127);
    }
}
