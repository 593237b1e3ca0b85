//! Pure geometry for group positioning.

use ai_nav::Vec2;

/// Lateral approach point beside `target`.
///
/// The offset is perpendicular to the leader's facing so flankers converge
/// from the sides while the leader comes head-on. `side` is `+1` or `-1`.
/// Falls back to the approach direction `target - from` when the leader
/// facing is degenerate.
pub fn flank_position(
    target: Vec2,
    from: Vec2,
    leader_facing: Vec2,
    side: f32,
    distance: f32,
) -> Vec2 {
    let mut axis = leader_facing.normalize_or_zero();
    if axis == Vec2::ZERO {
        axis = (target - from).normalize_or_zero();
    }
    if axis == Vec2::ZERO {
        axis = Vec2::X;
    }
    target + axis.perp() * (side.signum() * distance)
}

/// Point ahead of the leader along its heading, fanned out by `slot`.
pub fn scout_position(leader: Vec2, leader_facing: Vec2, lead: f32, slot: usize) -> Vec2 {
    let heading = match leader_facing.normalize_or_zero() {
        v if v == Vec2::ZERO => Vec2::X,
        v => v,
    };
    // Alternate left/right of the heading: 0, +1, -1, +2, -2, ...
    let fan = ((slot + 1) / 2) as f32 * if slot % 2 == 1 { 1.0 } else { -1.0 };
    leader + heading * lead + heading.perp() * (fan * lead * 0.25)
}

/// Trailing slot `index` (1-based, the leader is 0) in a loose wedge behind the leader.
pub fn formation_slot(leader: Vec2, leader_facing: Vec2, index: usize, spacing: f32) -> Vec2 {
    if index == 0 {
        return leader;
    }
    let heading = match leader_facing.normalize_or_zero() {
        v if v == Vec2::ZERO => Vec2::X,
        v => v,
    };
    let row = ((index + 1) / 2) as f32;
    let side = if index % 2 == 1 { 1.0 } else { -1.0 };
    leader - heading * (row * spacing) + heading.perp() * (side * row * spacing * 0.5)
}
