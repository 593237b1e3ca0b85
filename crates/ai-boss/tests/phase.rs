use ai_agent::{
    Agent, AgentState, AgentTuning, BaseStats, EntityId, EntityInfo, Notification, SandboxWorld,
    Species, Vec2,
};
use ai_boss::phase::{current_phase, is_enraged, track_phase};
use ai_boss::PhaseProfile;

fn behemoth() -> Agent {
    let stats = BaseStats {
        max_health: 1000.0,
        damage: 40.0,
        attack_cooldown: 2.0,
        run_speed: 4.0,
        ..BaseStats::default()
    };
    Agent::new(1, Species::Behemoth, Vec2::ZERO, stats, AgentTuning::default(), 3)
}

#[test]
fn crossing_a_threshold_scales_stats_and_enrages() {
    let profile = PhaseProfile::default();
    let mut world = SandboxWorld::open_field();
    let mut boss = behemoth();
    let near = EntityId::Player(1);
    let far = EntityId::Player(2);
    world.upsert(EntityInfo::new(near, Vec2::new(3.0, 0.0)));
    world.upsert(EntityInfo::new(far, Vec2::new(30.0, 0.0)));

    boss.take_damage(1.0, &mut world, 300.0, None);
    assert_eq!(track_phase(&mut boss, 1.0, &mut world, &profile), None);
    assert_eq!(current_phase(&boss), 1);

    boss.take_damage(2.0, &mut world, 100.0, None);
    assert_eq!(track_phase(&mut boss, 2.0, &mut world, &profile), Some(2));
    assert_eq!(current_phase(&boss), 2);

    let live = boss.stats().live;
    assert!((live.damage - 52.0).abs() < 1e-3);
    assert!((live.run_speed - 4.6).abs() < 1e-3);
    assert!((live.attack_cooldown - 1.6).abs() < 1e-3);
    assert_eq!(boss.stats().base().damage, 40.0);

    assert_eq!(boss.state(), AgentState::Enraged);
    assert!(is_enraged(&boss, 3.4));
    assert!(!is_enraged(&boss, 3.5));

    let hits: Vec<_> = world.damage_log().iter().map(|r| r.target).collect();
    assert_eq!(hits, vec![near]);
    assert!(world.damage_log()[0].effects.knockback.is_some());

    assert!(world
        .notifications()
        .iter()
        .any(|n| matches!(n, Notification::PhaseChanged { phase: 2, .. })));
}

#[test]
fn healing_never_reverts_a_phase() {
    let profile = PhaseProfile::default();
    let mut world = SandboxWorld::open_field();
    let mut boss = behemoth();

    boss.take_damage(1.0, &mut world, 400.0, None);
    track_phase(&mut boss, 1.0, &mut world, &profile);
    boss.heal(1000.0);
    assert_eq!(track_phase(&mut boss, 2.0, &mut world, &profile), None);
    assert_eq!(current_phase(&boss), 2);
    assert!((boss.stats().live.damage - 52.0).abs() < 1e-3);
}

#[test]
fn big_hit_lands_on_the_last_phase_once() {
    let profile = PhaseProfile::default();
    let mut world = SandboxWorld::open_field();
    let mut boss = behemoth();

    boss.take_damage(1.0, &mut world, 900.0, None);
    assert_eq!(track_phase(&mut boss, 1.0, &mut world, &profile), Some(3));
    let changes = world
        .notifications()
        .iter()
        .filter(|n| matches!(n, Notification::PhaseChanged { .. }))
        .count();
    assert_eq!(changes, 1);
    assert!((boss.stats().live.damage - 68.0).abs() < 1e-3);
}
