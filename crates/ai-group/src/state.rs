use std::collections::BTreeMap;

use ai_core::{DeterministicRng, EntityId, SplitMix64};
use ai_nav::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::formation;
use crate::GroupTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupKind {
    Pack,
    Herd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupRole {
    /// Leader. Engages the shared target head-on and broadcasts alerts.
    Alpha,
    /// Flanker.
    Beta,
    /// Ranges ahead of the leader and reports first sightings.
    Scout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMember {
    pub id: u64,
    pub role: GroupRole,
    /// `+1.0` or `-1.0`; which side of the target a flanker takes.
    pub flank_side: f32,
    pub position: Vec2,
    pub facing: Vec2,
    pub threat: f32,
}

/// Locked flee order shared by a herd.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stampede {
    pub direction: Vec2,
    pub until: f64,
    pub source: Option<EntityId>,
}

#[derive(Debug)]
pub struct GroupState {
    id: u64,
    kind: GroupKind,
    tuning: GroupTuning,
    rng: SplitMix64,
    members: Vec<GroupMember>,
    next_flank_side: Option<f32>,
    centroid: Vec2,

    shared_target: Option<EntityId>,
    shared_target_position: Option<Vec2>,

    alert_peak: f32,
    alert_raised_at: f64,
    last_broadcast: Option<f64>,
    sightings: Vec<EntityId>,

    retreat_until: Option<f64>,
    stampede: Option<Stampede>,

    departures: u32,
}

impl GroupState {
    pub fn new(id: u64, kind: GroupKind, seed: u64, tuning: GroupTuning) -> Self {
        Self {
            id,
            kind,
            tuning,
            rng: SplitMix64::new(seed),
            members: Vec::new(),
            next_flank_side: None,
            centroid: Vec2::ZERO,
            shared_target: None,
            shared_target_position: None,
            alert_peak: 0.0,
            alert_raised_at: 0.0,
            last_broadcast: None,
            sightings: Vec::new(),
            retreat_until: None,
            stampede: None,
            departures: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn tuning(&self) -> &GroupTuning {
        &self.tuning
    }

    // --- membership -------------------------------------------------------

    /// Adds a member and assigns its role. Re-adding an existing id is a no-op.
    pub fn add_member(&mut self, id: u64, position: Vec2) -> GroupRole {
        if let Some(m) = self.member(id) {
            return m.role;
        }

        let role = if self.members.is_empty() {
            GroupRole::Alpha
        } else {
            match self.kind {
                GroupKind::Herd => GroupRole::Beta,
                GroupKind::Pack => {
                    // Followers alternate flank, scout, flank, scout...
                    if self.members.len() % 2 == 1 {
                        GroupRole::Beta
                    } else {
                        GroupRole::Scout
                    }
                }
            }
        };

        let flank_side = if role == GroupRole::Beta {
            self.take_flank_side()
        } else {
            0.0
        };

        self.members.push(GroupMember {
            id,
            role,
            flank_side,
            position,
            facing: Vec2::X,
            threat: 0.0,
        });
        self.update_centroid();
        role
    }

    fn take_flank_side(&mut self) -> f32 {
        let side = match self.next_flank_side {
            Some(s) => s,
            None => {
                if self.rng.next_bool() {
                    1.0
                } else {
                    -1.0
                }
            }
        };
        self.next_flank_side = Some(-side);
        side
    }

    /// Removes a member. Returns `false` if it was not a member.
    ///
    /// When the leader leaves, the next member in join order becomes Alpha.
    pub fn remove_member(&mut self, id: u64) -> bool {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            return false;
        };
        let removed = self.members.remove(index);
        self.departures += 1;

        if removed.role == GroupRole::Alpha {
            if let Some(next) = self.members.first_mut() {
                next.role = GroupRole::Alpha;
                next.flank_side = 0.0;
                tracing::debug!(group = self.id, leader = next.id, "group leader promoted");
            }
        }
        self.update_centroid();
        true
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn member(&self, id: u64) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total successful removals over the group's lifetime.
    pub fn departures(&self) -> u32 {
        self.departures
    }

    pub fn leader(&self) -> Option<u64> {
        self.members.first().map(|m| m.id)
    }

    pub fn leader_member(&self) -> Option<&GroupMember> {
        self.members.first()
    }

    pub fn role_of(&self, id: u64) -> Option<GroupRole> {
        self.member(id).map(|m| m.role)
    }

    /// Index of `id` among members with the same role, in join order.
    pub fn role_slot(&self, id: u64) -> Option<usize> {
        let role = self.role_of(id)?;
        self.members
            .iter()
            .filter(|m| m.role == role)
            .position(|m| m.id == id)
    }

    pub fn member_index(&self, id: u64) -> Option<usize> {
        self.members.iter().position(|m| m.id == id)
    }

    // --- geometry ---------------------------------------------------------

    pub fn update_member(&mut self, id: u64, position: Vec2, facing: Vec2) {
        if let Some(m) = self.members.iter_mut().find(|m| m.id == id) {
            m.position = position;
            if facing != Vec2::ZERO {
                m.facing = facing;
            }
        }
    }

    pub fn update_centroid(&mut self) -> Vec2 {
        if self.members.is_empty() {
            return self.centroid;
        }
        let sum = self
            .members
            .iter()
            .fold(Vec2::ZERO, |acc, m| acc + m.position);
        self.centroid = sum * (1.0 / self.members.len() as f32);
        self.centroid
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Where flanker `id` should stand to hit `target` from the side.
    pub fn flank_position_for(&self, id: u64, target: Vec2) -> Option<Vec2> {
        let member = self.member(id)?;
        let leader = self.leader_member()?;
        let side = if member.flank_side == 0.0 { 1.0 } else { member.flank_side };
        Some(formation::flank_position(
            target,
            leader.position,
            leader.facing,
            side,
            self.tuning.flank_distance,
        ))
    }

    /// Patrol point for scout `id`, ahead of the leader.
    pub fn scout_position_for(&self, id: u64) -> Option<Vec2> {
        let slot = self.role_slot(id)?;
        let leader = self.leader_member()?;
        Some(formation::scout_position(
            leader.position,
            leader.facing,
            self.tuning.scout_lead,
            slot,
        ))
    }

    /// Trailing slot for a non-leader member.
    pub fn formation_position_for(&self, id: u64) -> Option<Vec2> {
        let index = self.member_index(id)?;
        let leader = self.leader_member()?;
        Some(formation::formation_slot(
            leader.position,
            leader.facing,
            index,
            self.tuning.formation_spacing,
        ))
    }

    // --- shared target ----------------------------------------------------

    pub fn set_shared_target(&mut self, target: EntityId, position: Vec2) {
        if self.shared_target != Some(target) {
            tracing::debug!(group = self.id, %target, "group target set");
        }
        self.shared_target = Some(target);
        self.shared_target_position = Some(position);
    }

    pub fn update_shared_target_position(&mut self, target: EntityId, position: Vec2) {
        if self.shared_target == Some(target) {
            self.shared_target_position = Some(position);
        }
    }

    /// Ends the current hunt. Sightings are forgotten with it, so a later
    /// hunt broadcasts afresh.
    pub fn clear_shared_target(&mut self) {
        self.shared_target = None;
        self.shared_target_position = None;
        self.sightings.clear();
    }

    pub fn shared_target(&self) -> Option<EntityId> {
        self.shared_target
    }

    pub fn shared_target_position(&self) -> Option<Vec2> {
        self.shared_target_position
    }

    // --- alert ------------------------------------------------------------

    /// Group alert at `now`, decayed linearly since it was last raised.
    pub fn alert_level(&self, now: f64) -> f32 {
        let elapsed = (now - self.alert_raised_at).max(0.0) as f32;
        (self.alert_peak - elapsed * self.tuning.alert_decay_per_second).clamp(0.0, 100.0)
    }

    pub fn raise_alert(&mut self, amount: f32, now: f64) -> f32 {
        let level = (self.alert_level(now) + amount.max(0.0)).min(100.0);
        self.alert_peak = level;
        self.alert_raised_at = now;
        level
    }

    /// Cool-down gated broadcast. Returns `true` if the broadcast went out.
    pub fn broadcast_alert(&mut self, now: f64) -> bool {
        if let Some(last) = self.last_broadcast {
            if now - last < self.tuning.alert_broadcast_cooldown {
                return false;
            }
        }
        self.last_broadcast = Some(now);
        self.raise_alert(self.tuning.alert_broadcast_boost, now);
        true
    }

    /// Scout sighting. Sets the shared target if none is set and broadcasts
    /// the first time a given entity is reported during the current hunt.
    pub fn report_sighting(&mut self, target: EntityId, position: Vec2, now: f64) -> bool {
        if self.shared_target.is_none() {
            self.set_shared_target(target, position);
        }
        if self.sightings.contains(&target) {
            return false;
        }
        self.sightings.push(target);
        self.last_broadcast = Some(now);
        self.raise_alert(self.tuning.alert_broadcast_boost, now);
        true
    }

    /// A member was hit by an identifiable source: the whole group turns on it.
    pub fn member_attacked(&mut self, source: EntityId, source_position: Vec2, now: f64) {
        self.set_shared_target(source, source_position);
        self.raise_alert(self.tuning.alert_on_damage, now);
    }

    // --- retreat ----------------------------------------------------------

    pub fn trigger_retreat(&mut self, now: f64) {
        let until = now + self.tuning.retreat_duration;
        if self.retreat_until.map_or(true, |u| u < until) {
            tracing::debug!(group = self.id, until, "group retreat");
            self.retreat_until = Some(until);
        }
        self.clear_shared_target();
    }

    pub fn is_retreating(&self, now: f64) -> bool {
        self.retreat_until.map_or(false, |until| now < until)
    }

    pub fn cancel_retreat(&mut self) {
        self.retreat_until = None;
    }

    // --- stampede ---------------------------------------------------------

    /// Accumulates threat against member `id`; `true` once it crosses the
    /// stampede threshold.
    pub fn record_threat(&mut self, id: u64, amount: f32) -> bool {
        let threshold = self.tuning.stampede_threat_threshold;
        match self.members.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.threat += amount.max(0.0);
                m.threat >= threshold
            }
            None => false,
        }
    }

    /// Starts a stampede unless one is already running.
    ///
    /// `direction` is normalized; a zero direction is replaced by a random
    /// heading from the group's RNG. Returns `true` if this call started it.
    pub fn trigger_stampede(&mut self, now: f64, direction: Vec2, source: Option<EntityId>) -> bool {
        if self.is_stampeding(now) {
            return false;
        }
        let mut direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            let angle = self.rng.next_range_f32(0.0, core::f32::consts::TAU);
            direction = Vec2::from_angle(angle);
        }
        let until = now + self.tuning.stampede_duration;
        tracing::debug!(group = self.id, until, "herd stampede");
        self.stampede = Some(Stampede {
            direction,
            until,
            source,
        });
        true
    }

    /// Active stampede at `now`; expires on its own at `until`.
    pub fn stampede(&self, now: f64) -> Option<Stampede> {
        self.stampede.filter(|s| now < s.until)
    }

    pub fn is_stampeding(&self, now: f64) -> bool {
        self.stampede(now).is_some()
    }

    /// External cancellation.
    pub fn clear_stampede(&mut self) {
        self.stampede = None;
        for m in self.members.iter_mut() {
            m.threat = 0.0;
        }
    }

    /// Drops expired timed flags and per-member threat after a stampede ended.
    pub fn expire(&mut self, now: f64) {
        if let Some(s) = self.stampede {
            if now >= s.until {
                self.clear_stampede();
            }
        }
        if let Some(until) = self.retreat_until {
            if now >= until {
                self.retreat_until = None;
            }
        }
    }
}
