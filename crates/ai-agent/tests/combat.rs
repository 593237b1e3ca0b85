mod common;

use ai_agent::{
    AgentState, EntityId, Notification, SandboxWorld, Strike, Vec2, DamageKind,
};
use ai_group::{shared, GroupKind, GroupState, GroupTuning};
use common::{agent_at, player};

#[test]
fn attacks_within_cooldown_apply_damage_once() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    let p = player(&mut world, 1, Vec2::new(1.0, 0.0));

    assert!(agent.attack(10.0, &mut world, p));
    assert!(!agent.attack(10.5, &mut world, p));
    assert_eq!(world.damage_log().len(), 1);
    assert_eq!(world.damage_log()[0].amount, 10.0);

    // cooldown is 1s
    assert!(agent.attack(11.0, &mut world, p));
    assert_eq!(world.damage_log().len(), 2);
}

#[test]
fn out_of_range_attack_is_rejected_without_consuming_cooldown() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    let p = player(&mut world, 1, Vec2::new(5.0, 0.0));

    assert!(!agent.attack(0.0, &mut world, p));
    assert!(agent.attack_ready(0.0));
    assert!(world.damage_log().is_empty());
}

#[test]
fn attack_emits_notification_and_faces_target() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    let p = player(&mut world, 1, Vec2::new(0.0, 1.5));

    assert!(agent.attack_with(0.0, &mut world, p, Strike::new(DamageKind::Melee, 2.0)));
    assert_eq!(agent.facing(), Vec2::new(0.0, 1.0));
    assert!(matches!(
        world.notifications().last(),
        Some(Notification::Attack { damage, .. }) if (*damage - 20.0).abs() < 1e-4
    ));
}

#[test]
fn damage_clamps_at_zero_and_kills() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);

    agent.take_damage(0.0, &mut world, 250.0, None);
    assert_eq!(agent.health(), 0.0);
    assert!(!agent.is_alive());
    assert_eq!(agent.state(), AgentState::Dead);
}

#[test]
fn damage_from_live_source_sets_target() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    let p = player(&mut world, 1, Vec2::new(8.0, 0.0));

    agent.take_damage(0.0, &mut world, 5.0, Some(p));
    assert_eq!(agent.context().target, Some(p));
    assert_eq!(agent.context().threat, Some(p));
    assert_eq!(agent.health(), 95.0);
}

#[test]
fn damage_from_dead_source_does_not_aggro() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    let p = player(&mut world, 1, Vec2::new(8.0, 0.0));
    world.get_mut(p).expect("player").alive = false;

    agent.take_damage(0.0, &mut world, 5.0, Some(p));
    assert_eq!(agent.context().target, None);
}

#[test]
fn death_is_idempotent() {
    let mut world = SandboxWorld::open_field();
    let group = shared(GroupState::new(1, GroupKind::Pack, 0, GroupTuning::default()));
    let mut agent = agent_at(1, Vec2::ZERO);
    let mut buddy = agent_at(2, Vec2::ZERO);
    agent.join_group(group.clone());
    buddy.join_group(group.clone());

    assert!(agent.die(1.0, &mut world, None));
    assert!(!agent.die(2.0, &mut world, None));

    let deaths = world
        .notifications()
        .iter()
        .filter(|n| matches!(n, Notification::Died { agent: 1, .. }))
        .count();
    assert_eq!(deaths, 1);
    assert_eq!(group.borrow().departures(), 1);
    assert_eq!(group.borrow().leader(), Some(2));
    assert_eq!(agent.died_at(), Some(1.0));
}

#[test]
fn corpse_is_removable_after_delay() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    let delay = agent.tuning().removal_delay;

    agent.die(10.0, &mut world, Some(EntityId::Player(1)));
    assert!(!agent.is_removable(10.0 + delay - 0.1));
    assert!(agent.is_removable(10.0 + delay));
}

#[test]
fn dead_agents_ignore_damage_and_attacks() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    let p = player(&mut world, 1, Vec2::new(1.0, 0.0));
    agent.die(0.0, &mut world, None);
    let before = world.notifications().len();

    agent.take_damage(1.0, &mut world, 10.0, Some(p));
    assert!(!agent.attack(5.0, &mut world, p));
    assert_eq!(world.notifications().len(), before);
}

#[test]
fn force_despawn_is_immediate() {
    let mut world = SandboxWorld::open_field();
    let mut agent = agent_at(1, Vec2::ZERO);
    agent.force_despawn(&mut world);
    agent.force_despawn(&mut world);

    assert!(agent.is_removable(0.0));
    let despawns = world
        .notifications()
        .iter()
        .filter(|n| matches!(n, Notification::Despawned { .. }))
        .count();
    assert_eq!(despawns, 1);
}
