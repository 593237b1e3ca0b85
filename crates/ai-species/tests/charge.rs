mod common;

use ai_agent::{AgentState, DamageKind, SandboxWorld, Species, Vec2};
use ai_species::boar;
use common::{player, run, spawner, step};

#[test]
fn charge_connects_once_then_recovers() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    let p = player(&mut world, 1, Vec2::new(8.0, 0.0), -Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Boar, Vec2::ZERO)];

    step(&mut agents, &mut world, 0);
    assert_eq!(agents[0].state(), AgentState::Charge);
    assert!(boar::charge_state(&agents[0]).active.is_some());

    run(&mut agents, &mut world, 1..9);
    let hits: Vec<_> = world
        .damage_log()
        .iter()
        .filter(|r| r.kind == DamageKind::Charge)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, p);
    assert!((hits[0].amount - 24.0).abs() < 1e-3);
    assert!(hits[0].effects.knockback.is_some());
    assert_eq!(agents[0].state(), AgentState::Recover);

    // recovery, then plain melee until the cooldown is back
    run(&mut agents, &mut world, 9..40);
    let charges = world
        .damage_log()
        .iter()
        .filter(|r| r.kind == DamageKind::Charge)
        .count();
    assert_eq!(charges, 1);
    assert!(world.damage_log().iter().any(|r| r.kind == DamageKind::Melee));
}

#[test]
fn charge_keeps_its_heading_when_the_target_sidesteps() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    let p = player(&mut world, 1, Vec2::new(8.0, 0.0), -Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Boar, Vec2::ZERO)];

    run(&mut agents, &mut world, 0..3);
    if let Some(info) = world.get_mut(p) {
        info.position = Vec2::new(8.0, 3.0);
    }
    run(&mut agents, &mut world, 3..14);

    let boar = &agents[0];
    assert!(boar.position().y.abs() < 1e-4);
    assert!(boar.position().x > 8.0);
    assert!(world.damage_log().is_empty());

    // times out after 1.5 s and recovers
    run(&mut agents, &mut world, 14..17);
    assert_eq!(agents[0].state(), AgentState::Recover);
    assert!(boar::charge_state(&agents[0]).active.is_none());
}

#[test]
fn too_close_to_charge_falls_back_to_melee() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    player(&mut world, 1, Vec2::new(1.0, 0.0), -Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Boar, Vec2::ZERO)];

    step(&mut agents, &mut world, 0);
    assert!(boar::charge_state(&agents[0]).active.is_none());
    assert_eq!(agents[0].state(), AgentState::Attack);
    assert_eq!(world.damage_log().len(), 1);
    assert_eq!(world.damage_log()[0].kind, DamageKind::Melee);
}
