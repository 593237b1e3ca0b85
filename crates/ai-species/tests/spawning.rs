mod common;

use ai_agent::{Rarity, Species, StatOverrides, Vec2};
use ai_species::{Spawner, SpawnerConfig};

fn roster(spawner: &mut Spawner) -> Vec<(u64, Species, Rarity, f32)> {
    let mut out = Vec::new();
    for (i, species) in Species::ALL.iter().cycle().take(24).enumerate() {
        let agent = spawner.spawn(*species, Vec2::new(i as f32, 0.0));
        out.push((agent.id(), agent.species(), agent.rarity(), agent.stats().max_health()));
    }
    out
}

#[test]
fn same_seed_same_creatures() {
    let config = SpawnerConfig {
        seed: 7,
        elite_chance: 0.3,
        ..SpawnerConfig::default()
    };
    let a = roster(&mut Spawner::new(config.clone()));
    let b = roster(&mut Spawner::new(config));
    assert_eq!(a, b);
    assert!(a.iter().any(|(_, _, r, _)| *r == Rarity::Elite));
}

#[test]
fn bosses_are_never_elite() {
    let mut spawner = Spawner::new(SpawnerConfig {
        elite_chance: 1.0,
        ..SpawnerConfig::default()
    });
    let wolf = spawner.spawn(Species::Wolf, Vec2::ZERO);
    let boss = spawner.spawn(Species::Behemoth, Vec2::ZERO);
    assert_eq!(wolf.rarity(), Rarity::Elite);
    assert!((wolf.stats().max_health() - 90.0).abs() < 1e-3);
    assert_eq!(boss.rarity(), Rarity::Common);
    assert!((boss.stats().max_health() - 2000.0).abs() < 1e-3);
}

#[test]
fn overrides_replace_base_stats() {
    let mut config = SpawnerConfig {
        elite_chance: 0.0,
        ..SpawnerConfig::default()
    };
    config.overrides.insert(
        Species::Boar,
        StatOverrides {
            max_health: Some(40.0),
            damage: Some(3.0),
            ..StatOverrides::default()
        },
    );
    let mut spawner = Spawner::new(config);
    let boar = spawner.spawn(Species::Boar, Vec2::ZERO);
    let bear = spawner.spawn(Species::Bear, Vec2::ZERO);
    assert!((boar.stats().max_health() - 40.0).abs() < 1e-3);
    assert!((boar.health() - 40.0).abs() < 1e-3);
    assert!((boar.stats().live.damage - 3.0).abs() < 1e-3);
    assert!((bear.stats().max_health() - 220.0).abs() < 1e-3);
}

#[test]
fn every_spawn_gets_a_tree_and_a_fresh_id() {
    let mut spawner = common::spawner();
    let first = spawner.peek_id();
    let agents: Vec<_> = Species::ALL
        .iter()
        .map(|s| spawner.spawn(*s, Vec2::ZERO))
        .collect();
    for (i, agent) in agents.iter().enumerate() {
        assert!(agent.tree_enabled(), "{} has no tree", agent.species());
        assert_eq!(agent.id(), first + i as u64);
    }
}

#[test]
fn non_social_species_spawn_without_a_group() {
    let mut spawner = common::spawner();
    let (group, bears) = spawner.spawn_group(Species::Bear, Vec2::ZERO, 3);
    assert!(group.is_none());
    assert_eq!(bears.len(), 3);
    assert!(bears.iter().all(|b| b.group().is_none()));
}
