//! Trigger placement
//!
//! The compiler only fixes each record's X as a schedule coordinate. Before
//! export every component's records are spread over the trigger area:
//!
//! - a single record lands anywhere;
//! - simultaneous records of an unordered component scatter on even X;
//! - a spawn-ordered component keeps its exact spacing and is shifted as a
//!   whole (rigid chain);
//! - anything else is laid out from `min_x` with small random gaps (elastic
//!   chain).

use crate::error::ExportError;
use crate::rng::SimpleRng;
use crate::settings::TriggerArea;
use shard_core::{CompilerConfig, Component, Trigger};

/// Place `records` of `component` inside `area`.
pub fn spread(
    records: &mut [Trigger],
    component: &Component,
    area: &TriggerArea,
    rng: &mut SimpleRng,
) -> Result<(), ExportError> {
    let Some(first) = records.first() else {
        return Err(ExportError::EmptyComponent {
            component: component.name().to_string(),
        });
    };

    let first_x = first.x();
    let same_x = records.iter().all(|t| t.x() == first_x);
    let xs: Vec<f64> = if records.len() == 1 {
        vec![rng.range_inclusive(area.min_x, area.max_x) as f64]
    } else if same_x && !component.requires_spawn_order() {
        records
            .iter()
            .map(|_| (rng.range_inclusive(area.min_x / 2, area.max_x / 2) * 2) as f64)
            .collect()
    } else if component.requires_spawn_order() {
        rigid_chain(records, component, area, rng)?
    } else {
        let mut x = area.min_x as f64;
        records
            .iter()
            .enumerate()
            .map(|(i, _)| {
                if i > 0 {
                    x += rng.range_inclusive(1, 10) as f64;
                }
                x
            })
            .collect()
    };

    for (trigger, x) in records.iter_mut().zip(xs) {
        let y = rng.range_inclusive(area.min_y, area.max_y) as f64;
        trigger.set_position(x, y);
    }
    Ok(())
}

fn rigid_chain(
    records: &[Trigger],
    component: &Component,
    area: &TriggerArea,
    rng: &mut SimpleRng,
) -> Result<Vec<f64>, ExportError> {
    let min_x = records.iter().map(Trigger::x).fold(f64::INFINITY, f64::min);
    let max_x = records.iter().map(Trigger::x).fold(f64::NEG_INFINITY, f64::max);
    let width = max_x - min_x;
    if width > area.width() {
        return Err(ExportError::ChainTooWide {
            component: component.name().to_string(),
            width,
            area: area.width(),
        });
    }

    let landing = rng.range_inclusive(area.min_x, (area.max_x as f64 - width) as i64);
    let shift = landing as f64 - min_x;
    Ok(records.iter().map(|t| t.x() + shift).collect())
}

/// Checks on a component's sorted records.
pub fn check_records(
    records: &[Trigger],
    component: &Component,
    config: &CompilerConfig,
) -> Result<(), ExportError> {
    let mut previous = f64::NEG_INFINITY;
    for trigger in records {
        if let Some(&group) = trigger.groups().iter().find(|&&g| config.is_reserved(g)) {
            return Err(ExportError::ReservedGroup {
                component: component.name().to_string(),
                group,
            });
        }

        let x = trigger.x();
        let dx = x - previous;
        if component.requires_spawn_order() && dx > 0.0 && dx < 1.0 {
            return Err(ExportError::SpawnOrderBroken {
                component: component.name().to_string(),
                x,
                previous,
            });
        }
        previous = x;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shard_core::{CompilerContext, ComponentId};

    fn spread_of(ctx: &CompilerContext, id: ComponentId, seed: u64) -> Result<Vec<Trigger>, ExportError> {
        let component = ctx.get(id).unwrap();
        let mut records = component.triggers().to_vec();
        spread(&mut records, component, &TriggerArea::default(), &mut SimpleRng::new(seed))?;
        Ok(records)
    }

    fn toggles(ctx: &mut CompilerContext, ordered: Option<bool>, times: &[f64]) -> ComponentId {
        let id = ctx.component("Toggles", 40);
        let mut b = ctx.edit(id).unwrap();
        if let Some(ordered) = ordered {
            b.assert_spawn_order(ordered).unwrap();
        }
        for &t in times {
            b.toggle(t, 41, true).unwrap();
        }
        id
    }

    fn in_area(t: &Trigger) -> bool {
        let area = TriggerArea::default();
        let y = t.y().unwrap();
        (area.min_y as f64..=area.max_y as f64).contains(&y)
    }

    #[test]
    fn single_record_lands_in_area() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, None, &[3.0]);
        let records = spread_of(&ctx, id, 1).unwrap();
        assert!((1350.0..=25000.0).contains(&records[0].x()));
        assert!(in_area(&records[0]));
    }

    #[test]
    fn simultaneous_unordered_records_use_even_x() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, Some(false), &[1.0; 6]);
        for t in spread_of(&ctx, id, 2).unwrap() {
            assert_eq!(t.x() % 2.0, 0.0);
            assert!(in_area(&t));
        }
    }

    #[test]
    fn rigid_chain_keeps_spacing() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, Some(true), &[0.0, 0.5, 2.0]);
        let before: Vec<f64> = ctx.get(id).unwrap().triggers().iter().map(Trigger::x).collect();
        let after: Vec<f64> = spread_of(&ctx, id, 3).unwrap().iter().map(Trigger::x).collect();
        let shift = after[0] - before[0];
        assert!(after[0] >= 1350.0);
        for (a, b) in after.iter().zip(&before) {
            assert!((a - b - shift).abs() < 1e-9);
        }
    }

    #[test]
    fn rigid_chain_too_wide() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, Some(true), &[0.0, 100.0]);
        let err = spread_of(&ctx, id, 4).unwrap_err();
        assert!(matches!(err, ExportError::ChainTooWide { .. }));
    }

    #[test]
    fn elastic_chain_uses_small_gaps() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, None, &[0.0, 1.0, 2.0, 3.0]);
        let xs: Vec<f64> = spread_of(&ctx, id, 5).unwrap().iter().map(Trigger::x).collect();
        assert_eq!(xs[0], 1350.0);
        for pair in xs.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((1.0..=10.0).contains(&gap));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, Some(false), &[1.0; 4]);
        assert_eq!(spread_of(&ctx, id, 9).unwrap(), spread_of(&ctx, id, 9).unwrap());
    }

    #[test]
    fn close_ordered_records_rejected() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, Some(true), &[0.0, 0.001]);
        let component = ctx.get(id).unwrap();
        let err = check_records(component.triggers(), component, ctx.config()).unwrap_err();
        assert!(matches!(err, ExportError::SpawnOrderBroken { .. }));
    }

    #[test]
    fn close_unordered_records_allowed() {
        let mut ctx = CompilerContext::new();
        let id = toggles(&mut ctx, Some(false), &[0.0, 0.001]);
        let component = ctx.get(id).unwrap();
        assert!(check_records(component.triggers(), component, ctx.config()).is_ok());
    }
}
