//! Bears pick their attack from the angle they are approached at.
//!
//! A target in front gets the maul, a cone hit that lands on every player
//! inside it. A target on the flank gets a weaker single swipe. A target
//! behind makes the bear turn around first.

use ai_agent::leaves::{
    acquire_target, chase_target, flee_when_hurt, has_target, investigate, return_home, wander,
};
use ai_agent::nodes::{action, selector, sequence, CreatureNode};
use ai_agent::{AgentState, DamageKind, SpeciesHooks, SpeedTier, Strike, Vec2};
use ai_bt::BtStatus;

/// Cosine of the half-angle of the front arc.
pub const FRONT_DOT: f32 = 0.5;
/// Cosine below which a target counts as behind.
pub const FLANK_DOT: f32 = -0.3;
pub const MAUL_MULTIPLIER: f32 = 1.0;
pub const SWIPE_MULTIPLIER: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    Front,
    Flank,
    Behind,
}

/// Classifies `target` relative to a creature at `position` facing `facing`.
pub fn classify(position: Vec2, facing: Vec2, target: Vec2) -> Approach {
    let to = (target - position).normalize_or_zero();
    if to == Vec2::ZERO {
        return Approach::Front;
    }
    let dot = facing.normalize_or_zero().dot(to);
    if dot >= FRONT_DOT {
        Approach::Front
    } else if dot >= FLANK_DOT {
        Approach::Flank
    } else {
        Approach::Behind
    }
}

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks::none()
}

/// Maul, swipe or turn, depending on where the target stands.
fn strike_by_angle() -> CreatureNode {
    action(|ctx, agent, world| {
        let Some(target) = agent.target_info() else {
            return Ok(BtStatus::Failure);
        };
        let range = agent.stats().live.attack_range;
        if !agent.in_reach(target.position, range) {
            return Ok(BtStatus::Failure);
        }
        agent.hold(world);
        agent.set_state(AgentState::Attack);

        let now = ctx.now_seconds;
        match classify(agent.position(), agent.facing(), target.position) {
            Approach::Behind => {
                agent.face_towards(target.position);
                Ok(BtStatus::Running)
            }
            Approach::Flank => {
                let swipe = Strike::new(DamageKind::Melee, SWIPE_MULTIPLIER);
                if agent.attack_with(now, world, target.id, swipe) {
                    Ok(BtStatus::Success)
                } else {
                    Ok(BtStatus::Running)
                }
            }
            Approach::Front => {
                if !agent.attack_ready(now) {
                    return Ok(BtStatus::Running);
                }
                let (origin, facing) = (agent.position(), agent.facing());
                let others: Vec<_> = world
                    .query_nearby(origin, range)
                    .into_iter()
                    .filter(|e| e.alive && e.id.is_player() && e.id != target.id)
                    .filter(|e| classify(origin, facing, e.position) == Approach::Front)
                    .collect();

                let maul = Strike::new(DamageKind::Area, MAUL_MULTIPLIER);
                if !agent.attack_with(now, world, target.id, maul) {
                    return Ok(BtStatus::Running);
                }
                for info in &others {
                    agent.strike(world, info, maul);
                }
                tracing::trace!(agent = agent.id(), hits = others.len() + 1, "maul");
                Ok(BtStatus::Success)
            }
        }
    })
}

pub fn tree() -> CreatureNode {
    selector(vec![
        flee_when_hurt(SpeedTier::Run),
        sequence(vec![
            acquire_target(),
            has_target(),
            selector(vec![strike_by_angle(), chase_target(SpeedTier::Run)]),
        ]),
        investigate(),
        return_home(),
        wander(),
    ])
}
