use std::panic::{self, AssertUnwindSafe};

use ai_bt::BtFault;
use ai_core::{derive_seed, DeterministicRng, EntityId, SplitMix64, TickContext};
use ai_group::{GroupHandle, GroupKind, GroupRole};
use ai_nav::Vec2;

use crate::combat::{DamageStack, Strike};
use crate::config::AgentTuning;
use crate::context::DecisionContext;
use crate::events::Notification;
use crate::hooks::SpeciesHooks;
use crate::nodes::CreatureTree;
use crate::snapshot::AgentSnapshot;
use crate::species::Species;
use crate::state::AgentState;
use crate::stats::{AgentStats, BaseStats, Rarity, SpeedTier};
use crate::world::{EntityInfo, World};

const WANDER_STREAM: u64 = 0x57a4_0001;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DirectMove {
    destination: Vec2,
    speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Wander {
    destination: Option<Vec2>,
    next_pick_at: f64,
}

/// A single creature.
pub struct Agent {
    id: u64,
    species: Species,
    rarity: Rarity,
    stats: AgentStats,
    state: AgentState,
    reported_state: AgentState,

    position: Vec2,
    facing: Vec2,
    home: Vec2,

    alive: bool,
    despawned: bool,
    died_at: Option<f64>,
    killer: Option<EntityId>,
    removal_at: Option<f64>,
    last_attack_at: Option<f64>,
    now: f64,

    group: Option<GroupHandle>,
    tree: Option<CreatureTree>,
    tree_faulted: bool,
    hooks: SpeciesHooks,
    tuning: AgentTuning,

    context: DecisionContext,
    rng: SplitMix64,
    wander: Wander,
    direct: Option<DirectMove>,
    movement_claimed: bool,
}

impl Agent {
    pub fn new(
        id: u64,
        species: Species,
        position: Vec2,
        base: BaseStats,
        tuning: AgentTuning,
        seed: u64,
    ) -> Self {
        Self {
            id,
            species,
            rarity: Rarity::Common,
            stats: AgentStats::new(base),
            state: AgentState::Idle,
            reported_state: AgentState::Idle,
            position,
            facing: Vec2::X,
            home: position,
            alive: true,
            despawned: false,
            died_at: None,
            killer: None,
            removal_at: None,
            last_attack_at: None,
            now: 0.0,
            group: None,
            tree: None,
            tree_faulted: false,
            hooks: SpeciesHooks::none(),
            tuning,
            context: DecisionContext::new(),
            rng: SplitMix64::new(derive_seed(seed, id, WANDER_STREAM)),
            wander: Wander {
                destination: None,
                next_pick_at: 0.0,
            },
            direct: None,
            movement_claimed: false,
        }
    }

    pub fn with_hooks(mut self, hooks: SpeciesHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.stats
            .scale_max_health(rarity.health_multiplier() / self.rarity.health_multiplier());
        self.rarity = rarity;
        self
    }

    pub fn with_facing(mut self, facing: Vec2) -> Self {
        self.face_direction(facing);
        self
    }

    /// Joins a pack or herd and returns the assigned role.
    pub fn join_group(&mut self, group: GroupHandle) -> GroupRole {
        let role = group.borrow_mut().add_member(self.id, self.position);
        self.group = Some(group);
        role
    }

    /// Attaches a decision tree. Refused once a tree has faulted.
    pub fn attach_tree(&mut self, tree: CreatureTree) -> bool {
        if self.tree_faulted {
            return false;
        }
        self.tree = Some(tree);
        true
    }

    pub fn detach_tree(&mut self) -> Option<CreatureTree> {
        self.tree.take()
    }

    // --- accessors --------------------------------------------------------

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn entity_id(&self) -> EntityId {
        EntityId::Creature(self.id)
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut AgentStats {
        &mut self.stats
    }

    pub fn health(&self) -> f32 {
        self.stats.health
    }

    pub fn health_fraction(&self) -> f32 {
        self.stats.health_fraction()
    }

    /// Restores health up to the maximum. Dead agents stay dead.
    pub fn heal(&mut self, amount: f32) {
        if self.alive && amount > 0.0 {
            self.stats.health = (self.stats.health + amount).min(self.stats.max_health());
        }
    }

    pub fn is_low_health(&self) -> bool {
        self.stats.health_fraction() <= self.stats.live.flee_health_fraction
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn set_state(&mut self, state: AgentState) {
        if self.alive {
            self.state = state;
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Host-side displacement (knockback, teleport). Does not touch facing.
    pub fn set_position(&mut self, position: Vec2) {
        if position.is_finite() {
            self.position = position;
        }
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn face_towards(&mut self, point: Vec2) {
        self.face_direction(point - self.position);
    }

    pub fn face_direction(&mut self, direction: Vec2) {
        let dir = direction.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.facing = dir;
        }
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn set_home(&mut self, home: Vec2) {
        self.home = home;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn died_at(&self) -> Option<f64> {
        self.died_at
    }

    /// Who landed the killing blow, if anyone.
    pub fn killer(&self) -> Option<EntityId> {
        self.killer
    }

    pub fn last_attack_at(&self) -> Option<f64> {
        self.last_attack_at
    }

    /// Simulation time of the latest update or damage event.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn hooks(&self) -> &SpeciesHooks {
        &self.hooks
    }

    pub fn tuning(&self) -> &AgentTuning {
        &self.tuning
    }

    pub fn context(&self) -> &DecisionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut DecisionContext {
        &mut self.context
    }

    pub fn rng(&mut self) -> &mut SplitMix64 {
        &mut self.rng
    }

    pub fn group(&self) -> Option<&GroupHandle> {
        self.group.as_ref()
    }

    pub fn group_kind(&self) -> Option<GroupKind> {
        self.group.as_ref().map(|g| g.borrow().kind())
    }

    pub fn group_role(&self) -> Option<GroupRole> {
        self.group.as_ref().and_then(|g| g.borrow().role_of(self.id))
    }

    pub fn tree_enabled(&self) -> bool {
        self.tree.is_some()
    }

    pub fn tree_faulted(&self) -> bool {
        self.tree_faulted
    }

    pub fn info(&self) -> EntityInfo {
        EntityInfo {
            id: self.entity_id(),
            position: self.position,
            facing: self.facing,
            alive: self.alive,
            noise_radius: self.stats.live.walk_speed * 2.0,
        }
    }

    pub fn speed(&self, tier: SpeedTier) -> f32 {
        let factor = self.hooks.speed_multiplier.map_or(1.0, |h| h(self));
        self.stats.live.speed(tier) * factor
    }

    // --- tick -------------------------------------------------------------

    /// One simulation step.
    ///
    /// Order: group sync, perception refresh, species hook, tree, built-in
    /// patrol, movement, group publish, state notification.
    pub fn update(&mut self, ctx: &TickContext, world: &mut (dyn World + 'static)) {
        if !self.alive {
            return;
        }
        self.now = ctx.now_seconds;
        self.context.dt = ctx.dt_seconds;
        self.movement_claimed = false;

        self.sync_from_group();
        self.refresh_perception(&*world);

        if let Some(hook) = self.hooks.on_update {
            hook(self, ctx, world);
        }

        if self.alive {
            self.run_tree(ctx, world);
        }
        if self.alive {
            self.fallback_patrol(world);
            self.advance_movement(ctx.dt_seconds, world);
            self.publish_to_group();
        }
        self.report_state(world);
    }

    fn sync_from_group(&mut self) {
        let Some(group) = self.group.clone() else {
            return;
        };
        let g = group.borrow();

        let level = g.alert_level(self.now);
        if level > self.context.alert {
            self.context.alert = level;
        }

        if g.kind() == GroupKind::Pack
            && self.context.target.is_none()
            && !g.is_retreating(self.now)
        {
            if let Some(target) = g.shared_target() {
                self.context.target = Some(target);
                self.context.last_known_target_position = g.shared_target_position();
            }
        }
    }

    fn refresh_perception(&mut self, world: &dyn World) {
        if let Some(target) = self.context.target {
            match world.entity(target).filter(|i| i.alive) {
                Some(info) => {
                    self.context.target_info = Some(info);
                    self.context.last_known_target_position = Some(info.position);
                }
                None => {
                    tracing::debug!(agent = self.id, %target, "target vanished");
                    if let Some(group) = &self.group {
                        let mut g = group.borrow_mut();
                        if g.shared_target() == Some(target) {
                            g.clear_shared_target();
                        }
                    }
                    self.clear_target();
                }
            }
        } else {
            self.context.target_info = None;
        }

        if let Some(threat) = self.context.threat {
            match world.entity(threat).filter(|i| i.alive) {
                Some(info) => self.context.threat_position = Some(info.position),
                None => {
                    self.context.threat = None;
                    self.context.threat_position = None;
                }
            }
        }

        let radius = self.stats.live.detection_radius();
        let mut nearest: Option<(f32, EntityInfo)> = None;
        for info in world.query_nearby(self.position, radius) {
            if !info.alive || !info.id.is_player() {
                continue;
            }
            let d2 = self.position.distance_squared(info.position);
            if nearest.as_ref().is_some_and(|(best, _)| *best <= d2) {
                continue;
            }
            if self.can_see_info(world, &info) || self.can_hear(info.position, info.noise_radius) {
                nearest = Some((d2, info));
            }
        }
        self.context.perceived = nearest.map(|(_, info)| info);

        let dt = self.context.dt.max(0.0);
        if self.context.perceived.is_some() {
            self.context.raise_alert(self.tuning.alert_gain_per_second * dt);
        } else if self.context.target.is_none() {
            self.context.decay_alert(self.tuning.alert_decay_per_second * dt);
        }
        if self.context.alert <= 0.0 && self.context.target.is_none() {
            self.context.threat = None;
            self.context.threat_position = None;
        }
    }

    fn run_tree(&mut self, ctx: &TickContext, world: &mut (dyn World + 'static)) {
        let Some(mut tree) = self.tree.take() else {
            return;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| tree.tick(ctx, self, world)));
        let fault = match outcome {
            Ok(Ok(_)) => {
                if self.tree.is_none() && !self.tree_faulted {
                    self.tree = Some(tree);
                }
                return;
            }
            Ok(Err(fault)) => fault,
            Err(payload) => BtFault::Panicked(panic_message(payload.as_ref())),
        };
        self.disable_tree(fault, world);
    }

    /// Permanently drops the tree; the agent keeps moving on built-in patrol.
    fn disable_tree(&mut self, fault: BtFault, world: &mut dyn World) {
        self.tree = None;
        self.tree_faulted = true;

        let reason = fault.to_string();
        tracing::warn!(agent = self.id, species = %self.species, %reason, "behavior tree disabled");
        world.notify(Notification::TreeFaulted {
            agent: self.id,
            reason,
        });

        self.context.target = None;
        self.context.target_info = None;
        self.context.last_known_target_position = None;
        self.stop(world);
        self.set_state(AgentState::Patrol);
        self.wander.next_pick_at = self.now;
    }

    fn fallback_patrol(&mut self, world: &mut dyn World) {
        if self.movement_claimed {
            return;
        }

        if self.tree.is_some() {
            let engaged = self.context.target.is_some() || self.context.threat.is_some();
            if engaged || !self.state.is_peaceful() {
                return;
            }
        } else {
            if self.is_low_health() {
                if let Some(threat) = self.context.threat_position {
                    let away = (self.position - threat).normalize_or_zero();
                    if away != Vec2::ZERO {
                        let dest = self.position + away * self.tuning.wander_radius;
                        self.move_to(world, dest, SpeedTier::Run);
                        self.set_state(AgentState::Flee);
                        return;
                    }
                }
            }
            if !self.state.is_peaceful() {
                self.set_state(AgentState::Patrol);
            }
        }

        self.wander(world);
    }

    fn advance_movement(&mut self, dt: f32, world: &mut dyn World) {
        let before = self.position;

        if let Some(next) = world.movement().advance(self.id, self.position, dt) {
            self.position = next;
        } else if let Some(order) = self.direct {
            let step = order.speed.max(0.0) * dt.max(0.0);
            self.position = self.position.move_towards(order.destination, step);
            if self.position.distance(order.destination) <= self.tuning.arrival_distance {
                self.direct = None;
            }
        }

        let delta = self.position - before;
        if delta.length_squared() > 1e-8 {
            self.facing = delta.normalize_or_zero();
        }
    }

    fn publish_to_group(&mut self) {
        let Some(group) = &self.group else {
            return;
        };
        let mut g = group.borrow_mut();
        g.update_member(self.id, self.position, self.facing);
        g.update_centroid();
        if let (Some(target), Some(info)) = (self.context.target, self.context.target_info) {
            g.update_shared_target_position(target, info.position);
        }
    }

    fn report_state(&mut self, world: &mut dyn World) {
        if self.state == self.reported_state {
            return;
        }
        tracing::debug!(
            agent = self.id,
            species = %self.species,
            from = %self.reported_state,
            to = %self.state,
            "state change"
        );
        world.notify(Notification::StateChanged {
            agent: self.id,
            from: self.reported_state,
            to: self.state,
        });
        self.reported_state = self.state;
    }

    // --- targeting --------------------------------------------------------

    pub fn set_target(&mut self, target: EntityId, position: Option<Vec2>) {
        self.context.target = Some(target);
        if position.is_some() {
            self.context.last_known_target_position = position;
        }
    }

    /// Universal cancel for chase and attack branches.
    pub fn clear_target(&mut self) {
        self.context.target = None;
        self.context.target_info = None;
        self.context.last_known_target_position = None;
        self.reset_tree();
    }

    /// Drops the tree's resumption memory so it re-evaluates from the root.
    ///
    /// No-op while the tree itself is being ticked.
    pub fn reset_tree(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            tree.reset();
        }
    }

    /// Fresh info for the current target, if it is still valid.
    pub fn target_info(&self) -> Option<EntityInfo> {
        self.context.target_info
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }

    /// Whether `point` lies outside the leash around home.
    pub fn beyond_leash(&self, point: Vec2) -> bool {
        let leash = self.stats.live.territory_radius * self.tuning.leash_factor;
        self.home.distance(point) > leash
    }

    // --- perception -------------------------------------------------------

    pub fn can_see(&self, world: &dyn World, target: EntityId) -> bool {
        world
            .entity(target)
            .filter(|i| i.alive)
            .is_some_and(|info| self.can_see_info(world, &info))
    }

    /// Range, then vision cone, then occlusion.
    pub fn can_see_info(&self, world: &dyn World, info: &EntityInfo) -> bool {
        let to = info.position - self.position;
        let dist = to.length();
        if dist > self.stats.live.vision_range {
            return false;
        }
        if dist > f32::EPSILON {
            let half_angle = (self.stats.live.vision_angle * 0.5).to_radians();
            let forward = self.facing.normalize_or_zero();
            if forward.dot(to * (1.0 / dist)) < half_angle.cos() {
                return false;
            }
        }
        !world.line_of_sight_blocked(self.position, info.position, Some(info.id))
    }

    pub fn can_hear(&self, position: Vec2, sound_range: f32) -> bool {
        self.position.distance(position) <= self.stats.live.hearing_range.min(sound_range)
    }

    pub fn is_in_attack_range(&self, world: &dyn World, target: EntityId) -> bool {
        world
            .entity(target)
            .filter(|i| i.alive)
            .is_some_and(|info| self.in_reach(info.position, self.stats.live.attack_range))
    }

    pub fn in_reach(&self, point: Vec2, reach: f32) -> bool {
        self.position.distance(point) <= reach
    }

    // --- movement ---------------------------------------------------------

    /// Requests movement toward `destination`. Returns `true` while still
    /// progressing, `false` once arrived.
    ///
    /// Falls back to straight-line movement when the executor has no route.
    pub fn move_to(&mut self, world: &mut dyn World, destination: Vec2, tier: SpeedTier) -> bool {
        let speed = self.speed(tier);
        self.move_at(world, destination, speed)
    }

    pub fn move_at(&mut self, world: &mut dyn World, destination: Vec2, speed: f32) -> bool {
        self.movement_claimed = true;
        if self.position.distance(destination) <= self.tuning.arrival_distance {
            self.stop(world);
            return false;
        }

        if world
            .movement()
            .request_move(self.id, self.position, destination, speed)
        {
            self.direct = None;
        } else {
            self.direct = Some(DirectMove { destination, speed });
        }
        true
    }

    /// Straight-line movement that bypasses the executor (charges, stampedes).
    pub fn move_direct(&mut self, world: &mut dyn World, destination: Vec2, speed: f32) {
        self.movement_claimed = true;
        world.movement().stop(self.id);
        self.direct = Some(DirectMove { destination, speed });
    }

    pub fn stop(&mut self, world: &mut dyn World) {
        world.movement().stop(self.id);
        self.direct = None;
    }

    /// Stands still this tick and keeps the built-in patrol from moving.
    pub fn hold(&mut self, world: &mut dyn World) {
        self.movement_claimed = true;
        self.stop(world);
    }

    pub fn is_moving(&self, world: &dyn World) -> bool {
        self.direct.is_some() || world.movement_ref().is_moving(self.id)
    }

    pub fn movement_claimed(&self) -> bool {
        self.movement_claimed
    }

    /// Random stroll around home on a randomized interval.
    ///
    /// Returns `true` while walking toward a wander point.
    pub fn wander(&mut self, world: &mut dyn World) -> bool {
        self.movement_claimed = true;

        if self.now >= self.wander.next_pick_at {
            let point = self.pick_wander_point(&*world);
            self.wander.destination = Some(point);
            let (min, max) = (
                self.tuning.wander_interval_min,
                self.tuning.wander_interval_max,
            );
            self.wander.next_pick_at = self.now + self.rng.next_range_f64(min, max);
        }

        let Some(dest) = self.wander.destination else {
            return false;
        };
        if self.move_to(world, dest, SpeedTier::Walk) {
            if self.state.is_peaceful() {
                self.set_state(AgentState::Patrol);
            }
            true
        } else {
            self.wander.destination = None;
            if self.state == AgentState::Patrol {
                self.set_state(AgentState::Idle);
            }
            false
        }
    }

    fn pick_wander_point(&mut self, world: &dyn World) -> Vec2 {
        let angle = self.rng.next_range_f32(0.0, core::f32::consts::TAU);
        let radius = self.rng.next_range_f32(0.0, self.tuning.wander_radius);
        let point = self.home + Vec2::from_angle(angle) * radius;
        match self.hooks.patrol_bias {
            Some(bias) => bias(self, world, point),
            None => point,
        }
    }

    // --- combat -----------------------------------------------------------

    pub fn attack_ready(&self, now: f64) -> bool {
        self.last_attack_at
            .map_or(true, |t| now - t >= self.stats.live.attack_cooldown as f64)
    }

    /// Rate-limited melee attack. Returns `true` if damage was applied.
    pub fn attack(&mut self, now: f64, world: &mut dyn World, target: EntityId) -> bool {
        self.attack_with(now, world, target, Strike::melee())
    }

    pub fn attack_with(
        &mut self,
        now: f64,
        world: &mut dyn World,
        target: EntityId,
        strike: Strike,
    ) -> bool {
        if !self.alive || !self.attack_ready(now) {
            return false;
        }
        let Some(info) = world.entity(target).filter(|i| i.alive) else {
            return false;
        };
        let reach = strike.reach.unwrap_or(self.stats.live.attack_range);
        if !self.in_reach(info.position, reach) {
            return false;
        }

        self.last_attack_at = Some(now);
        self.strike(world, &info, strike);
        true
    }

    /// Applies one hit without cooldown or range gating (area and contact
    /// damage). Returns the damage dealt.
    pub fn strike(&mut self, world: &mut dyn World, target: &EntityInfo, strike: Strike) -> f32 {
        let amount = self.resolve_damage(target, &strike);
        self.face_towards(target.position);
        world.apply_damage(self.entity_id(), target.id, amount, strike.kind, strike.effects);
        world.notify(Notification::Attack {
            agent: self.id,
            target: target.id,
            damage: amount,
            kind: strike.kind,
        });
        amount
    }

    pub fn resolve_damage(&self, target: &EntityInfo, strike: &Strike) -> f32 {
        let environment = self.hooks.environment_bonus.map_or(1.0, |h| h(self));
        let target_state = self.hooks.target_bonus.map_or(1.0, |h| h(self, target));
        DamageStack::new(self.stats.live.damage)
            .environment(environment)
            .target_state(strike.multiplier * target_state)
            .rarity(self.rarity.damage_multiplier())
            .resolve()
    }

    pub fn take_damage(
        &mut self,
        now: f64,
        world: &mut dyn World,
        amount: f32,
        source: Option<EntityId>,
    ) {
        if !self.alive || amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.now = self.now.max(now);
        self.stats.health = (self.stats.health - amount).max(0.0);
        world.notify(Notification::Damaged {
            agent: self.id,
            source,
            amount,
            health: self.stats.health,
        });

        if let Some(src) = source.filter(|s| *s != self.entity_id()) {
            if let Some(info) = world.entity(src).filter(|i| i.alive) {
                self.context.threat = Some(src);
                self.context.threat_position = Some(info.position);
                self.context.target = Some(src);
                self.context.target_info = Some(info);
                self.context.last_known_target_position = Some(info.position);
                if let Some(group) = &self.group {
                    group.borrow_mut().member_attacked(src, info.position, now);
                }
            }
        }
        self.context.raise_alert(self.tuning.alert_on_hit);

        if let Some(hook) = self.hooks.on_damaged {
            hook(self, now, amount, source, world);
        }

        if self.stats.health <= 0.0 {
            self.die(now, world, source);
        }
    }

    /// Marks the agent dead and schedules its removal. Idempotent: returns
    /// `false` if it was already dead.
    pub fn die(&mut self, now: f64, world: &mut dyn World, killer: Option<EntityId>) -> bool {
        if !self.alive {
            return false;
        }

        if let Some(hook) = self.hooks.on_death {
            hook(self, now, world);
        }

        self.alive = false;
        self.stats.health = 0.0;
        self.died_at = Some(now);
        self.killer = killer;
        self.removal_at = Some(now + self.tuning.removal_delay);
        self.leave_group();
        self.stop(world);
        self.context.target = None;
        self.context.target_info = None;

        let from = self.reported_state;
        self.state = AgentState::Dead;
        self.reported_state = AgentState::Dead;
        world.notify(Notification::StateChanged {
            agent: self.id,
            from,
            to: AgentState::Dead,
        });
        world.notify(Notification::Died {
            agent: self.id,
            killer,
        });
        tracing::debug!(agent = self.id, species = %self.species, ?killer, "creature died");
        true
    }

    /// Immediate removal without death handling for rewards.
    pub fn force_despawn(&mut self, world: &mut dyn World) {
        if self.despawned {
            return;
        }
        self.alive = false;
        self.despawned = true;
        self.leave_group();
        self.stop(world);
        world.notify(Notification::Despawned { agent: self.id });
    }

    pub fn is_removable(&self, now: f64) -> bool {
        self.despawned || self.removal_at.is_some_and(|t| now >= t)
    }

    fn leave_group(&mut self) {
        if let Some(group) = self.group.take() {
            group.borrow_mut().remove_member(self.id);
        }
    }

    pub fn serialize(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            species: self.species,
            health: self.stats.health,
            max_health: self.stats.max_health(),
            position: self.position,
            facing: self.facing,
            state: self.state,
            alive: self.alive,
        }
    }

    pub fn run_spawn_hook(&mut self) {
        if let Some(hook) = self.hooks.on_spawn {
            hook(self);
        }
    }
}

impl core::fmt::Debug for Agent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("species", &self.species)
            .field("state", &self.state)
            .field("health", &self.stats.health)
            .field("position", &self.position)
            .field("alive", &self.alive)
            .field("tree_enabled", &self.tree.is_some())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
