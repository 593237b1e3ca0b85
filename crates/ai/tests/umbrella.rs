#![cfg(feature = "species")]

use ai::agent::SandboxWorld;
use ai::prelude::*;

#[test]
fn prelude_is_enough_to_run_a_creature() {
    let mut spawner = Spawner::new(SpawnerConfig {
        seed: 9,
        elite_chance: 0.0,
        ..SpawnerConfig::default()
    });
    let mut world = SandboxWorld::open_field();
    world.upsert(EntityInfo::new(EntityId::Player(1), Vec2::new(1.5, 0.0)));
    let mut bear = spawner.spawn(Species::Bear, Vec2::ZERO);

    bear.update(&TickContext::new(0, 0.1, 0.0, 9), &mut world);

    assert_eq!(bear.state(), AgentState::Attack);
    assert_eq!(world.damage_log().len(), 1);
    assert_eq!(world.damage_log()[0].kind, DamageKind::Area);
}

#[cfg(feature = "serde")]
#[test]
fn snapshots_serialize() {
    let mut spawner = Spawner::new(SpawnerConfig::default());
    let wolf = spawner.spawn_with_rarity(Species::Wolf, Vec2::new(3.0, 4.0), ai::agent::Rarity::Common);
    let json = serde_json::to_value(wolf.serialize()).expect("snapshot serializes");
    assert_eq!(json["species"], "wolf");
    assert_eq!(json["position"]["x"], 3.0);
    assert_eq!(json["alive"], true);
}
