//! Bison graze in herds and stampede when threatened.
//!
//! Any member that is hit, or whose alert climbs past the herd threshold,
//! starts a stampede for the whole herd. The flee direction is picked once
//! and locked; members sprint along it and trample every player they touch,
//! once per player per stampede.

use ai_agent::leaves::{engage, idle, return_home, wander};
use ai_agent::nodes::{
    action, condition, random, repeat, selector, sequence, until_fail, wait, CreatureNode,
};
use ai_agent::{
    Agent, AgentState, DamageEffects, DamageKind, EntityId, Notification, SpeciesHooks, SpeedTier,
    Strike, Vec2, World,
};
use ai_bt::{BtStatus, RepeatMode};
use ai_core::{BbKey, TickContext};

const TRAMPLED: BbKey<Trampled> = BbKey::new(0x3101);

pub const CONTACT_RADIUS: f32 = 1.5;
pub const TRAMPLE_MULTIPLIER: f32 = 1.0;
pub const TRAMPLE_KNOCKBACK: f32 = 3.0;
/// How far ahead stampede movement aims each tick.
const STAMPEDE_LOOKAHEAD: f32 = 10.0;

/// Players already hit during the stampede that ends at `until`.
#[derive(Debug, Clone, Default)]
struct Trampled {
    until: f64,
    hit: Vec<EntityId>,
}

pub fn hooks() -> SpeciesHooks {
    SpeciesHooks {
        on_update: Some(on_update),
        on_damaged: Some(on_damaged),
        ..SpeciesHooks::none()
    }
}

fn on_update(agent: &mut Agent, ctx: &TickContext, world: &mut dyn World) {
    let Some(group) = agent.group().cloned() else {
        return;
    };
    let now = ctx.now_seconds;

    let threshold = group.borrow().tuning().stampede_alert_threshold;
    if agent.context().alert >= threshold && !group.borrow().is_stampeding(now) {
        let away = agent
            .context()
            .perceived
            .map(|p| agent.position() - p.position)
            .unwrap_or(Vec2::ZERO);
        let source = agent.context().perceived.map(|p| p.id);
        start_stampede(agent, now, away, source, world);
    }

    let active = group.borrow().stampede(now);
    let seen = agent.context().species.get(TRAMPLED).map(|t| t.until);
    if let Some(stampede) = active {
        if seen != Some(stampede.until) {
            agent.context_mut().species.set(
                TRAMPLED,
                Trampled {
                    until: stampede.until,
                    hit: Vec::new(),
                },
            );
            agent.clear_target();
        }
    } else {
        group.borrow_mut().expire(now);
    }
}

fn on_damaged(
    agent: &mut Agent,
    now: f64,
    amount: f32,
    source: Option<EntityId>,
    world: &mut dyn World,
) {
    let Some(group) = agent.group().cloned() else {
        return;
    };
    let crossed = group.borrow_mut().record_threat(agent.id(), amount);
    if !crossed && source.is_none() {
        return;
    }
    let away = source
        .and_then(|s| world.entity(s))
        .map(|info| agent.position() - info.position)
        .unwrap_or(Vec2::ZERO);
    start_stampede(agent, now, away, source, world);
}

fn start_stampede(
    agent: &Agent,
    now: f64,
    direction: Vec2,
    source: Option<EntityId>,
    world: &mut dyn World,
) {
    let Some(group) = agent.group() else {
        return;
    };
    let mut g = group.borrow_mut();
    if g.trigger_stampede(now, direction, source) {
        if let Some(s) = g.stampede(now) {
            tracing::info!(group = g.id(), by = agent.id(), until = s.until, "stampede");
            world.notify(Notification::Stampede {
                group: g.id(),
                direction: s.direction,
                until: s.until,
            });
        }
    }
}

pub fn is_stampeding(agent: &Agent, now: f64) -> bool {
    agent
        .group()
        .is_some_and(|g| g.borrow().is_stampeding(now))
}

fn stampeding() -> CreatureNode {
    condition(|ctx, agent, _world| is_stampeding(agent, ctx.now_seconds))
}

/// One tick of stampede: sprint along the locked heading, trample contacts.
fn stampede_step() -> CreatureNode {
    action(|ctx, agent, world| {
        let now = ctx.now_seconds;
        let Some(stampede) = agent.group().and_then(|g| g.borrow().stampede(now)) else {
            return Ok(BtStatus::Failure);
        };

        let dest = agent.position() + stampede.direction * STAMPEDE_LOOKAHEAD;
        let speed = agent.speed(SpeedTier::Sprint);
        agent.move_direct(world, dest, speed);
        agent.face_direction(stampede.direction);
        agent.set_state(AgentState::Stampede);

        let contacts: Vec<_> = world
            .query_nearby(agent.position(), CONTACT_RADIUS)
            .into_iter()
            .filter(|e| e.alive && e.id.is_player())
            .collect();
        for info in contacts {
            let fresh = match agent.context_mut().species.get_mut(TRAMPLED) {
                Some(t) if !t.hit.contains(&info.id) => {
                    t.hit.push(info.id);
                    true
                }
                _ => false,
            };
            if fresh {
                let push = DamageEffects::knockback(stampede.direction, TRAMPLE_KNOCKBACK);
                let strike = Strike::new(DamageKind::Trample, TRAMPLE_MULTIPLIER).with_effects(push);
                agent.strike(world, &info, strike);
            }
        }
        Ok(BtStatus::Success)
    })
}

/// Keeps near the herd's centroid.
fn stay_with_herd() -> CreatureNode {
    action(|_ctx, agent, world| {
        let Some(center) = agent.group().map(|g| g.borrow().centroid()) else {
            return Ok(BtStatus::Failure);
        };
        let spacing = agent
            .group()
            .map_or(2.5, |g| g.borrow().tuning().formation_spacing);
        let members = agent.group().map_or(1, |g| g.borrow().member_count());
        let loose = spacing * (members as f32).sqrt() * 2.0;
        if agent.distance_to(center) <= loose {
            return Ok(BtStatus::Failure);
        }
        agent.move_to(world, center, SpeedTier::Walk);
        agent.set_state(AgentState::Patrol);
        Ok(BtStatus::Success)
    })
}

pub fn tree(seed: u64) -> CreatureNode {
    selector(vec![
        sequence(vec![
            stampeding(),
            until_fail(sequence(vec![stampeding(), stampede_step()])),
        ]),
        // a lone bull fights back
        sequence(vec![
            condition(|_ctx, agent, _world| agent.group().is_none()),
            engage(SpeedTier::Run),
        ]),
        return_home(),
        stay_with_herd(),
        random(
            seed,
            vec![
                repeat(RepeatMode::Times(2), sequence(vec![idle(), wait(1.0)])),
                wander(),
            ],
        ),
    ])
}
