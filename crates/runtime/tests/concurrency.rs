//! Readers racing reloads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use forge_content::{Catalog, ModuleEntrySpec, ModuleSpec, hook_registry};
use forge_core::{StatOperation, StatValue};
use forge_runtime::{DefinitionRegistry, ItemState, RuntimeConfig, StatsService};

fn service() -> StatsService {
    let registry = DefinitionRegistry::new(hook_registry().unwrap(), RuntimeConfig::default());
    StatsService::new(registry, Arc::new(Catalog::sample().materials))
}

/// The sample catalog with the sword's blade bonus set to `bonus`.
fn catalog_with_bonus(bonus: f32) -> Catalog {
    let mut catalog = Catalog::sample();
    for spec in &mut catalog.definitions {
        if spec.id.as_str() == "sword" {
            spec.modules.push(
                ModuleEntrySpec::new(ModuleSpec::StatBoost {
                    stat: "attack_damage".to_string(),
                    operation: StatOperation::Add,
                    value: bonus,
                    condition: Default::default(),
                })
                .with_hooks(["forge:tool_stats"]),
            );
        }
    }
    catalog
}

#[test]
fn readers_see_whole_generations() {
    let service = service();
    service.reload(&catalog_with_bonus(0.0)).unwrap();

    let item = ItemState::new("sword").with_materials(["iron", "wood"]);
    // iron head 2 plus the stock blade bonus 3
    let base = 5.0;
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    let stats = service.stats(&item).unwrap();
                    let Some(StatValue::Float(damage)) = stats.raw("attack_damage") else {
                        panic!("sword lost its damage: {stats:?}");
                    };
                    // Any bonus from a complete reload, never a mix.
                    let bonus = damage - base;
                    assert!(bonus == bonus.round() && (0.0..=20.0).contains(&bonus));
                }
            });
        }

        for bonus in 1..=20 {
            service.reload(&catalog_with_bonus(bonus as f32)).unwrap();
        }
        done.store(true, Ordering::Release);
    });

    // Whatever the readers cached, the last reload wins.
    let stats = service.stats(&item).unwrap();
    assert_eq!(stats.raw("attack_damage"), Some(StatValue::Float(25.0)));
    assert_eq!(service.snapshot().generation(), 21);
}

#[test]
fn stale_results_never_outlive_a_reload() {
    let service = service();
    service.reload(&catalog_with_bonus(0.0)).unwrap();
    let item = ItemState::new("sword").with_materials(["diamond", "iron"]);

    thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| (0..50).for_each(|_| drop(service.stats(&item)))))
            .collect();
        service.reload(&catalog_with_bonus(10.0)).unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    });

    // diamond 3 + stock 3 + 10
    let stats = service.stats(&item).unwrap();
    assert_eq!(stats.raw("attack_damage"), Some(StatValue::Float(16.0)));
}
