mod common;

use ai_agent::{AgentState, DamageKind, Notification, SandboxWorld, Species, Vec2};
use ai_boss::{phase, PhaseProfile};
use ai_species::{Spawner, SpawnerConfig};
use common::{player, run, spawner, step};

#[test]
fn phase_two_enrages_then_hits_harder() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    player(&mut world, 1, Vec2::new(3.0, 0.0), -Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Behemoth, Vec2::ZERO)];

    agents[0].take_damage(0.0, &mut world, 800.0, None);
    step(&mut agents, &mut world, 0);

    assert_eq!(phase::current_phase(&agents[0]), 2);
    assert_eq!(agents[0].state(), AgentState::Enraged);
    let shockwave = world.damage_log()[0];
    assert_eq!(shockwave.kind, DamageKind::Area);
    assert!((shockwave.amount - 40.0 * 1.3 * 0.5).abs() < 1e-3);

    run(&mut agents, &mut world, 1..15);
    assert_eq!(agents[0].state(), AgentState::Enraged);
    assert_eq!(world.damage_log().len(), 1);

    step(&mut agents, &mut world, 15);
    let log = world.damage_log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].kind, DamageKind::Melee);
    assert!((log[1].amount - 40.0 * 1.3).abs() < 1e-3);

    let phase_changes = world
        .notifications()
        .iter()
        .filter(|n| matches!(n, Notification::PhaseChanged { .. }))
        .count();
    assert_eq!(phase_changes, 1);
}

#[test]
fn shallow_damage_keeps_phase_one() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    let mut agents = vec![spawner.spawn(Species::Behemoth, Vec2::ZERO)];

    agents[0].take_damage(0.0, &mut world, 300.0, None);
    run(&mut agents, &mut world, 0..5);

    assert_eq!(phase::current_phase(&agents[0]), 1);
    assert_ne!(agents[0].state(), AgentState::Enraged);
}

#[test]
fn phase_tuning_comes_from_the_spawner() {
    let mut world = SandboxWorld::open_field();
    let mut early = Spawner::new(SpawnerConfig {
        seed: 42,
        elite_chance: 0.0,
        boss_phases: PhaseProfile {
            thresholds: vec![0.9, 0.5],
            ..PhaseProfile::default()
        },
        ..SpawnerConfig::default()
    });
    let mut stock = spawner();
    let mut agents = vec![
        early.spawn(Species::Behemoth, Vec2::ZERO),
        stock.spawn(Species::Behemoth, Vec2::new(200.0, 0.0)),
    ];

    for agent in agents.iter_mut() {
        agent.take_damage(0.0, &mut world, 300.0, None);
    }
    step(&mut agents, &mut world, 0);

    assert_eq!(phase::current_phase(&agents[0]), 2);
    assert_eq!(phase::profile_of(&agents[0]).thresholds, vec![0.9, 0.5]);
    assert_eq!(phase::current_phase(&agents[1]), 1);
}
