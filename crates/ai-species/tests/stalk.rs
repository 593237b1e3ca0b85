mod common;

use ai_agent::{AgentState, DamageKind, SandboxWorld, Species, Vec2};
use ai_species::tiger;
use common::{player, run, spawner, step};

#[test]
fn stalks_at_walking_pace_until_spotted() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    // facing away from the tiger
    let prey = player(&mut world, 1, Vec2::new(12.0, 0.0), Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Tiger, Vec2::ZERO)];

    run(&mut agents, &mut world, 0..5);
    assert_eq!(agents[0].state(), AgentState::Stalk);
    assert_eq!(tiger::stalk(&agents[0]).map(|s| s.detected), Some(false));
    let walked = agents[0].position().x;
    assert!(walked > 0.5 && walked < 1.5, "walked {walked}");

    if let Some(p) = world.get_mut(prey) {
        p.facing = -Vec2::X;
    }
    let before = agents[0].position().x;
    step(&mut agents, &mut world, 5);
    assert_eq!(agents[0].state(), AgentState::Chase);
    assert_eq!(tiger::stalk(&agents[0]).map(|s| s.detected), Some(true));
    assert!(agents[0].position().x - before > 0.6);

    // turning away again does not restore the stalk
    if let Some(p) = world.get_mut(prey) {
        p.facing = Vec2::X;
    }
    step(&mut agents, &mut world, 6);
    assert_eq!(agents[0].state(), AgentState::Chase);
}

#[test]
fn first_strike_from_hiding_is_an_ambush() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    player(&mut world, 1, Vec2::new(1.5, 0.0), Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Tiger, Vec2::ZERO)];

    run(&mut agents, &mut world, 0..15);

    let hits = world.damage_log();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].kind, DamageKind::Ambush);
    assert!((hits[0].amount - 27.0).abs() < 1e-3);
    assert_eq!(hits[1].kind, DamageKind::Melee);
    assert!((hits[1].amount - 18.0).abs() < 1e-3);
}

#[test]
fn prey_watching_the_tiger_is_never_ambushed() {
    let mut world = SandboxWorld::open_field();
    let mut spawner = spawner();
    player(&mut world, 1, Vec2::new(1.5, 0.0), -Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Tiger, Vec2::ZERO)];

    step(&mut agents, &mut world, 0);

    assert_eq!(world.damage_log().len(), 1);
    assert_eq!(world.damage_log()[0].kind, DamageKind::Melee);
    assert!((world.damage_log()[0].amount - 18.0).abs() < 1e-3);
}
