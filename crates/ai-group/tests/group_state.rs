use ai_core::EntityId;
use ai_group::{shared, GroupKind, GroupRole, GroupState, GroupTuning};
use ai_nav::Vec2;

fn pack(n: u64) -> GroupState {
    let mut g = GroupState::new(1, GroupKind::Pack, 42, GroupTuning::default());
    for id in 1..=n {
        g.add_member(id, Vec2::new(id as f32, 0.0));
    }
    g
}

#[test]
fn first_member_leads_and_followers_alternate_roles() {
    let g = pack(5);
    let roles: Vec<GroupRole> = g.members().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            GroupRole::Alpha,
            GroupRole::Beta,
            GroupRole::Scout,
            GroupRole::Beta,
            GroupRole::Scout
        ]
    );
    assert_eq!(g.leader(), Some(1));

    // The two flankers take opposite sides.
    let sides: Vec<f32> = g
        .members()
        .iter()
        .filter(|m| m.role == GroupRole::Beta)
        .map(|m| m.flank_side)
        .collect();
    assert_eq!(sides.len(), 2);
    assert_eq!(sides[0], -sides[1]);
}

#[test]
fn herd_followers_are_all_flankers() {
    let mut g = GroupState::new(2, GroupKind::Herd, 1, GroupTuning::default());
    for id in 10..14 {
        g.add_member(id, Vec2::ZERO);
    }
    assert_eq!(g.role_of(10), Some(GroupRole::Alpha));
    assert!((11..14).all(|id| g.role_of(id) == Some(GroupRole::Beta)));
}

#[test]
fn removal_is_idempotent_and_promotes_next_leader() {
    let mut g = pack(3);
    assert!(g.remove_member(1));
    assert!(!g.remove_member(1));
    assert_eq!(g.departures(), 1);
    assert_eq!(g.leader(), Some(2));
    assert_eq!(g.role_of(2), Some(GroupRole::Alpha));
    assert_eq!(g.member_count(), 2);
}

#[test]
fn centroid_tracks_member_positions() {
    let mut g = pack(2);
    g.update_member(1, Vec2::new(0.0, 0.0), Vec2::X);
    g.update_member(2, Vec2::new(4.0, 2.0), Vec2::X);
    assert_eq!(g.update_centroid(), Vec2::new(2.0, 1.0));
}

#[test]
fn broadcast_is_cooldown_gated_and_alert_decays() {
    let mut g = pack(2);
    let cooldown = g.tuning().alert_broadcast_cooldown;

    assert!(g.broadcast_alert(0.0));
    assert!(!g.broadcast_alert(cooldown - 0.5));
    assert!(g.broadcast_alert(cooldown));

    let level = g.alert_level(cooldown);
    assert!(level > 0.0);
    assert!(g.alert_level(cooldown + 2.0) < level);
    assert_eq!(g.alert_level(cooldown + 1000.0), 0.0);
}

#[test]
fn damage_to_member_sets_shared_target_and_escalates() {
    let mut g = pack(3);
    let attacker = EntityId::Player(7);
    g.member_attacked(attacker, Vec2::new(5.0, 5.0), 10.0);

    assert_eq!(g.shared_target(), Some(attacker));
    assert_eq!(g.shared_target_position(), Some(Vec2::new(5.0, 5.0)));
    assert!(g.alert_level(10.0) >= g.tuning().alert_on_damage);
}

#[test]
fn scout_sighting_broadcasts_only_once_per_target() {
    let mut g = pack(3);
    let prey = EntityId::Player(2);
    assert!(g.report_sighting(prey, Vec2::ZERO, 1.0));
    assert!(!g.report_sighting(prey, Vec2::ZERO, 2.0));
    assert_eq!(g.shared_target(), Some(prey));
}

#[test]
fn sightings_are_forgotten_when_the_hunt_ends() {
    let mut g = pack(3);
    let prey = EntityId::Player(2);
    assert!(g.report_sighting(prey, Vec2::ZERO, 1.0));
    assert!(g.report_sighting(EntityId::Player(3), Vec2::ZERO, 1.5));

    g.clear_shared_target();
    assert_eq!(g.shared_target(), None);
    assert!(g.report_sighting(prey, Vec2::new(4.0, 0.0), 30.0));
    assert_eq!(g.shared_target(), Some(prey));
}

#[test]
fn retreat_expires_on_its_own() {
    let mut g = pack(2);
    g.set_shared_target(EntityId::Player(1), Vec2::ZERO);
    g.trigger_retreat(5.0);

    assert!(g.is_retreating(5.0));
    assert_eq!(g.shared_target(), None);
    let end = 5.0 + g.tuning().retreat_duration;
    assert!(g.is_retreating(end - 0.01));
    assert!(!g.is_retreating(end));
}

#[test]
fn stampede_direction_locks_until_expiry() {
    let mut g = GroupState::new(3, GroupKind::Herd, 9, GroupTuning::default());
    g.add_member(1, Vec2::ZERO);
    g.add_member(2, Vec2::ZERO);

    assert!(g.trigger_stampede(0.0, Vec2::new(0.0, 3.0), None));
    assert!(!g.trigger_stampede(1.0, Vec2::new(1.0, 0.0), None));

    let s = g.stampede(1.0).expect("active");
    assert_eq!(s.direction, Vec2::new(0.0, 1.0));

    let end = g.tuning().stampede_duration;
    assert!(g.stampede(end).is_none());
    assert!(g.trigger_stampede(end, Vec2::new(1.0, 0.0), None));
}

#[test]
fn zero_stampede_direction_is_randomized_deterministically() {
    let dir = |seed| {
        let mut g = GroupState::new(3, GroupKind::Herd, seed, GroupTuning::default());
        g.add_member(1, Vec2::ZERO);
        g.trigger_stampede(0.0, Vec2::ZERO, None);
        g.stampede(0.0).map(|s| s.direction)
    };
    let a = dir(5).expect("stampede");
    assert!((a.length() - 1.0).abs() < 1e-4);
    assert_eq!(dir(5), Some(a));
}

#[test]
fn threat_accumulates_to_threshold() {
    let mut g = GroupState::new(4, GroupKind::Herd, 0, GroupTuning::default());
    g.add_member(1, Vec2::ZERO);
    let threshold = g.tuning().stampede_threat_threshold;

    assert!(!g.record_threat(1, threshold * 0.5));
    assert!(g.record_threat(1, threshold * 0.5));
    assert!(!g.record_threat(99, 1000.0));
}

#[test]
fn flank_positions_sit_either_side_of_target() {
    let mut g = pack(4);
    g.update_member(1, Vec2::ZERO, Vec2::X);
    let target = Vec2::new(10.0, 0.0);

    let a = g.flank_position_for(2, target).expect("flanker");
    let b = g.flank_position_for(4, target).expect("flanker");
    assert!((a.x - 10.0).abs() < 1e-4 && (b.x - 10.0).abs() < 1e-4);
    assert!(a.y * b.y < 0.0);
}

#[test]
fn scouts_range_ahead_of_leader() {
    let mut g = pack(3);
    g.update_member(1, Vec2::ZERO, Vec2::Y);
    let p = g.scout_position_for(3).expect("scout");
    assert!(p.y >= g.tuning().scout_lead - 1e-4);
}

#[test]
fn handle_is_shared_between_members() {
    let handle = shared(pack(2));
    let other = handle.clone();
    handle.borrow_mut().trigger_retreat(0.0);
    assert!(other.borrow().is_retreating(1.0));
}
