//! Trigger budget statistics

use shard_core::{CompilerContext, ComponentId};
use std::collections::HashMap;

/// Named trigger counts, kept in insertion order for reporting.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    order: Vec<String>,
    counters: HashMap<String, usize>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &str, value: usize) {
        if !self.counters.contains_key(name) {
            self.order.push(name.to_string());
        }
        *self.counters.entry(name.to_string()).or_insert(0) += value;
    }

    pub fn get(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.get(name)))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Usage report for one export.
#[derive(Debug, Clone)]
pub struct ExportStats {
    pub total_triggers: usize,
    pub object_budget: usize,
    pub components: Counter,
    /// Per spell, leaving out components shared between spells.
    pub spells: Counter,
    /// Triggers in components used by more than one spell.
    pub shared_triggers: usize,
}

impl ExportStats {
    pub fn collect(ctx: &CompilerContext, object_budget: usize) -> Self {
        let mut usage: HashMap<ComponentId, usize> = HashMap::new();
        for spell in ctx.spells() {
            for &id in spell.components() {
                *usage.entry(id).or_insert(0) += 1;
            }
        }
        let is_shared = |id: ComponentId| usage.get(&id).is_some_and(|&n| n > 1);
        let count_of = |id: ComponentId| ctx.get(id).map(|c| c.triggers().len()).unwrap_or(0);

        let mut spells = Counter::new();
        for spell in ctx.spells() {
            let own = spell
                .components()
                .iter()
                .filter(|&&id| !is_shared(id))
                .map(|&id| count_of(id))
                .sum();
            spells.increment(spell.name(), own);
        }
        let shared_triggers = usage
            .keys()
            .filter(|&&id| is_shared(id))
            .map(|&id| count_of(id))
            .sum();

        let mut components = Counter::new();
        let mut total_triggers = 0;
        for component in ctx.components() {
            components.increment(component.name(), component.triggers().len());
            total_triggers += component.triggers().len();
        }

        Self {
            total_triggers,
            object_budget,
            components,
            spells,
            shared_triggers,
        }
    }

    pub fn usage_percent(&self) -> f64 {
        if self.object_budget == 0 {
            return 0.0;
        }
        self.total_triggers as f64 / self.object_budget as f64 * 100.0
    }

    /// Negative when over budget.
    pub fn remaining_budget(&self) -> i64 {
        self.object_budget as i64 - self.total_triggers as i64
    }

    pub fn log(&self) {
        tracing::info!(
            "Total triggers: {} ({:.3}% of budget), {} remaining",
            self.total_triggers,
            self.usage_percent(),
            self.remaining_budget()
        );
        for (name, count) in self.spells.iter() {
            tracing::info!("  spell {}: {} triggers", name, count);
        }
        for (name, count) in self.components.iter() {
            tracing::info!("  component {}: {} triggers", name, count);
        }
        if self.shared_triggers > 0 {
            tracing::info!("  shared components: {} triggers", self.shared_triggers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_accumulates_in_order() {
        let mut counter = Counter::new();
        counter.increment("b", 2);
        counter.increment("a", 1);
        counter.increment("b", 3);
        let seen: Vec<_> = counter.iter().collect();
        assert_eq!(seen, vec![("b", 5), ("a", 1)]);
        assert_eq!(counter.get("missing"), 0);
    }

    #[test]
    fn shared_components_counted_separately() {
        let mut ctx = CompilerContext::new();
        let own = ctx.component("Own", 40);
        ctx.edit(own)
            .unwrap()
            .toggle(0.0, 41, true)
            .unwrap()
            .toggle(1.0, 41, false)
            .unwrap();
        let shared = ctx.component("Shared", 42);
        ctx.edit(shared).unwrap().toggle(0.0, 43, true).unwrap();

        let first = ctx.spell("First", 50);
        let second = ctx.spell("Second", 51);
        ctx.add_to_spell(first, own).unwrap();
        ctx.add_to_spell(first, shared).unwrap();
        ctx.add_to_spell(second, shared).unwrap();

        let stats = ExportStats::collect(&ctx, 10);
        assert_eq!(stats.total_triggers, 3);
        assert_eq!(stats.spells.get("First"), 2);
        assert_eq!(stats.spells.get("Second"), 0);
        assert_eq!(stats.shared_triggers, 1);
        assert_eq!(stats.components.get("Shared"), 1);
        assert!((stats.usage_percent() - 30.0).abs() < 1e-9);
        assert_eq!(stats.remaining_budget(), 7);
    }
}
