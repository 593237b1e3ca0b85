//! Reference scheduler.
//!
//! One [`Simulation::step`] is one tick:
//!
//! 1. scripted players move and queue their attacks,
//! 2. queued creature damage lands,
//! 3. every agent updates, in id order,
//! 4. damage the agents dealt lands on players; hits on creatures are queued
//!    for the next step,
//! 5. the boss event advances,
//! 6. corpses past their removal delay are dropped.

use std::collections::BTreeMap;

use ai_agent::{
    Agent, AgentSnapshot, Circle, EntityId, Notification, NotificationSink, Rarity, SandboxWorld,
    Species, Vec2, World,
};
use ai_boss::{BossOrchestrator, BossReward};
use ai_core::TickContext;
use ai_nav::{MovementExecutor, NavExecutor, NavGrid, OpenField};
use ai_species::{profile, Spawner, SpawnerConfig};
use anyhow::Result;
use serde::Serialize;

use crate::config::{ArenaConfig, PlayerSpec, SimConfig};
use crate::player::Player;
use crate::rewards::RewardLedger;

#[derive(Debug, Clone, Copy)]
struct PendingHit {
    target: u64,
    amount: f32,
    source: Option<EntityId>,
}

/// Serializable end-of-run summary.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub tick: u64,
    pub time: f64,
    pub agents: Vec<AgentSnapshot>,
    pub players: Vec<Player>,
    pub rewards: Vec<BossReward>,
    pub boss_events: u32,
    pub bosses_defeated: u32,
}

pub struct Simulation {
    config: SimConfig,
    spawner: Spawner,
    world: SandboxWorld,
    agents: BTreeMap<u64, Agent>,
    players: BTreeMap<u64, Player>,
    orchestrator: BossOrchestrator,
    rewards: RewardLedger,
    pending: Vec<PendingHit>,
    notifications: Vec<Notification>,
    boss_scheduled: bool,
    tick: u64,
    now: f64,
}

impl Simulation {
    /// Builds the arena and places the scenario's players and creatures.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let spawner = Spawner::new(SpawnerConfig {
            seed: config.seed,
            ..config.spawner.clone()
        });
        let orchestrator = BossOrchestrator::new(config.boss.rules.clone());
        let mut sim = Self {
            world: build_world(&config.arena),
            spawner,
            agents: BTreeMap::new(),
            players: BTreeMap::new(),
            orchestrator,
            rewards: RewardLedger::new(),
            pending: Vec::new(),
            notifications: Vec::new(),
            boss_scheduled: false,
            tick: 0,
            now: 0.0,
            config,
        };

        for spec in sim.config.players.clone() {
            sim.add_player(&spec);
        }
        for spec in sim.config.spawns.clone() {
            let social = profile(spec.species).group.is_some();
            match spec.rarity {
                Some(rarity) if !social && spec.count <= 1 => {
                    sim.spawn_with_rarity(spec.species, spec.position, rarity);
                }
                _ if social || spec.count > 1 => {
                    sim.spawn_group(spec.species, spec.position, spec.count);
                }
                _ => {
                    sim.spawn(spec.species, spec.position);
                }
            }
        }

        tracing::info!(
            seed = sim.config.seed,
            agents = sim.agents.len(),
            players = sim.players.len(),
            "simulation ready"
        );
        Ok(sim)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }

    /// Host-side access for scripted effects. Damage written here is routed
    /// like damage dealt by agents.
    pub fn world_mut(&mut self) -> &mut SandboxWorld {
        &mut self.world
    }

    // --- population -------------------------------------------------------

    pub fn spawn(&mut self, species: Species, position: Vec2) -> u64 {
        let agent = self.spawner.spawn(species, position);
        self.insert(agent)
    }

    pub fn spawn_with_rarity(&mut self, species: Species, position: Vec2, rarity: Rarity) -> u64 {
        let agent = self.spawner.spawn_with_rarity(species, position, rarity);
        self.insert(agent)
    }

    /// Spawns a pack, herd, or loose cluster. Returns the new ids in order.
    pub fn spawn_group(&mut self, species: Species, center: Vec2, count: usize) -> Vec<u64> {
        let (_group, agents) = self.spawner.spawn_group(species, center, count);
        agents.into_iter().map(|a| self.insert(a)).collect()
    }

    fn insert(&mut self, agent: Agent) -> u64 {
        let id = agent.id();
        self.world.upsert(agent.info());
        self.world.notify(Notification::Spawned {
            agent: id,
            species: agent.species(),
            position: agent.position(),
        });
        self.agents.insert(id, agent);
        id
    }

    pub fn agent(&self, id: u64) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: u64) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn live_agents(&self) -> usize {
        self.agents.values().filter(|a| a.is_alive()).count()
    }

    pub fn add_player(&mut self, spec: &PlayerSpec) {
        let player = Player::from_spec(spec);
        self.world.upsert(player.info());
        self.players.insert(player.id, player);
    }

    /// The player logs off; creatures lose track of it next tick.
    pub fn remove_player(&mut self, id: u64) -> Option<Player> {
        self.world.remove(EntityId::Player(id));
        self.players.remove(&id)
    }

    pub fn player(&self, id: u64) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn move_player(&mut self, id: u64, position: Vec2) {
        if let Some(p) = self.players.get_mut(&id) {
            p.position = position;
            self.world.upsert(p.info());
        }
    }

    pub fn set_player_velocity(&mut self, id: u64, velocity: Vec2) {
        if let Some(p) = self.players.get_mut(&id) {
            p.velocity = velocity;
        }
    }

    /// Queues damage against a creature; it lands at the start of the next
    /// step.
    pub fn damage_creature(&mut self, target: u64, amount: f32, source: Option<EntityId>) {
        self.pending.push(PendingHit {
            target,
            amount,
            source,
        });
    }

    // --- boss -------------------------------------------------------------

    /// Explicit boss trigger at the configured position. `None` when an
    /// event is already running or the gate has not reopened.
    pub fn trigger_boss(&mut self) -> Option<u64> {
        let (species, position) = (self.config.boss.species, self.config.boss.position);
        let spawner = &mut self.spawner;
        let boss = self
            .orchestrator
            .trigger(self.now, position, &mut self.world, |p| spawner.spawn(species, p))?;
        Some(self.insert(boss))
    }

    pub fn orchestrator(&self) -> &BossOrchestrator {
        &self.orchestrator
    }

    pub fn rewards(&self) -> &RewardLedger {
        &self.rewards
    }

    // --- stepping ---------------------------------------------------------

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn step(&mut self) {
        let dt = self.config.dt();
        let now = self.now;
        let ctx = TickContext::new(self.tick, dt, now, self.config.seed);

        self.move_players(now, dt);
        self.queue_player_attacks(dt);
        self.apply_pending(now);
        self.fire_scheduled_boss(now);

        for agent in self.agents.values_mut() {
            agent.update(&ctx, &mut self.world);
            self.world.upsert(agent.info());
        }

        self.route_damage(now);
        self.tick_boss(now);
        self.remove_expired(now);

        self.notifications.extend(self.world.take_notifications());
        self.tick += 1;
        self.now = self.tick as f64 * dt as f64;
        tracing::trace!(tick = self.tick, agents = self.agents.len(), "step");
    }

    fn move_players(&mut self, now: f64, dt: f32) {
        for p in self.players.values_mut() {
            p.advance(now, dt);
            self.world.upsert(p.info());
        }
    }

    fn queue_player_attacks(&mut self, dt: f32) {
        for p in self.players.values() {
            if !p.is_alive() || p.dps <= 0.0 || p.is_stunned(self.now) {
                continue;
            }
            let nearest = self
                .agents
                .values()
                .filter(|a| a.is_alive())
                .map(|a| (a.position().distance(p.position), a.id()))
                .filter(|(d, _)| *d <= p.attack_range)
                .min_by(|a, b| a.0.total_cmp(&b.0));
            if let Some((_, target)) = nearest {
                self.pending.push(PendingHit {
                    target,
                    amount: p.dps * dt,
                    source: Some(p.entity_id()),
                });
            }
        }
    }

    fn apply_pending(&mut self, now: f64) {
        for hit in std::mem::take(&mut self.pending) {
            if let Some(agent) = self.agents.get_mut(&hit.target) {
                agent.take_damage(now, &mut self.world, hit.amount, hit.source);
                self.world.upsert(agent.info());
            }
        }
    }

    fn route_damage(&mut self, now: f64) {
        for record in self.world.take_damage_log() {
            match record.target {
                EntityId::Player(id) => {
                    let Some(p) = self.players.get_mut(&id) else {
                        continue;
                    };
                    if p.absorb(now, record.amount, record.effects) {
                        tracing::debug!(player = id, by = %record.source, "player down");
                    }
                    self.world.upsert(p.info());
                }
                EntityId::Creature(id) => self.pending.push(PendingHit {
                    target: id,
                    amount: record.amount,
                    source: Some(record.source),
                }),
            }
        }
    }

    fn fire_scheduled_boss(&mut self, now: f64) {
        match self.config.boss.trigger_at {
            Some(at) if !self.boss_scheduled && now >= at => {
                self.boss_scheduled = true;
                self.trigger_boss();
            }
            _ => {}
        }
    }

    fn tick_boss(&mut self, now: f64) {
        let Some(id) = self.orchestrator.active_boss() else {
            let live = self.players.values().filter(|p| p.is_alive()).count();
            let (species, position) = (self.config.boss.species, self.config.boss.position);
            let spawner = &mut self.spawner;
            let spawned = self.orchestrator.observe_population(
                now,
                live,
                position,
                &mut self.world,
                |p| spawner.spawn(species, p),
            );
            if let Some(boss) = spawned {
                self.insert(boss);
            }
            return;
        };

        let Some(boss) = self.agents.get_mut(&id) else {
            self.orchestrator.abandon(now);
            return;
        };
        let outcome = self
            .orchestrator
            .tick(now, boss, &mut self.world, &mut self.rewards);

        let minion = self.config.boss.summon_species;
        for point in outcome.summons {
            self.spawn(minion, point);
        }
    }

    fn remove_expired(&mut self, now: f64) {
        let expired: Vec<u64> = self
            .agents
            .values()
            .filter(|a| a.is_removable(now))
            .map(Agent::id)
            .collect();
        for id in expired {
            let Some(agent) = self.agents.remove(&id) else {
                continue;
            };
            self.world.remove(agent.entity_id());
            self.world.movement().stop(id);
            if self.orchestrator.active_boss() == Some(id) {
                self.orchestrator.abandon(now);
            }
            tracing::debug!(agent = id, species = %agent.species(), "agent removed");
        }
    }

    // --- output -----------------------------------------------------------

    /// Notifications gathered since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents.values().map(Agent::serialize).collect()
    }

    pub fn report(&self) -> SimReport {
        SimReport {
            tick: self.tick,
            time: self.now,
            agents: self.snapshots(),
            players: self.players.values().cloned().collect(),
            rewards: self.rewards.rewards().to_vec(),
            boss_events: self.orchestrator.started(),
            bosses_defeated: self.orchestrator.defeated(),
        }
    }
}

fn build_world(arena: &ArenaConfig) -> SandboxWorld {
    let movement: Box<dyn MovementExecutor> = match (arena.half_extent, arena.grid_cell) {
        (Some(extent), Some(cell)) => {
            let mut grid = NavGrid::centered(extent, cell);
            for rock in &arena.rocks {
                grid.block_circle(rock.center, rock.radius);
            }
            Box::new(NavExecutor::new(grid))
        }
        (Some(extent), None) => Box::new(NavExecutor::new(OpenField::bounded(extent))),
        _ => Box::new(NavExecutor::new(OpenField::unbounded())),
    };

    let mut world = SandboxWorld::new(movement);
    for rock in &arena.rocks {
        world.add_occluder(Circle::new(rock.center, rock.radius));
    }
    for pond in &arena.water {
        world.add_water(Circle::new(pond.center, pond.radius));
    }
    world
}
