use ai_agent::{BaseStats, Species};

/// Base stat table.
pub fn base_stats(species: Species) -> BaseStats {
    match species {
        Species::Wolf => BaseStats {
            max_health: 60.0,
            damage: 8.0,
            attack_range: 1.8,
            attack_cooldown: 1.2,
            walk_speed: 2.5,
            run_speed: 5.5,
            sprint_speed: 7.5,
            vision_range: 22.0,
            vision_angle: 140.0,
            hearing_range: 14.0,
            aggro_range: 14.0,
            territory_radius: 30.0,
            flee_health_fraction: 0.25,
            xp_reward: 15,
            loot_tier: 1,
        },
        Species::Bison => BaseStats {
            max_health: 160.0,
            damage: 14.0,
            attack_range: 2.2,
            attack_cooldown: 2.0,
            walk_speed: 1.8,
            run_speed: 4.5,
            sprint_speed: 7.0,
            vision_range: 18.0,
            vision_angle: 200.0,
            hearing_range: 12.0,
            aggro_range: 6.0,
            territory_radius: 30.0,
            flee_health_fraction: 0.0,
            xp_reward: 20,
            loot_tier: 2,
        },
        Species::Boar => BaseStats {
            max_health: 90.0,
            damage: 12.0,
            attack_range: 1.6,
            attack_cooldown: 1.5,
            walk_speed: 2.0,
            run_speed: 4.5,
            sprint_speed: 9.0,
            vision_range: 16.0,
            vision_angle: 120.0,
            hearing_range: 10.0,
            aggro_range: 14.0,
            territory_radius: 20.0,
            flee_health_fraction: 0.15,
            xp_reward: 18,
            loot_tier: 1,
        },
        Species::Bear => BaseStats {
            max_health: 220.0,
            damage: 20.0,
            attack_range: 2.5,
            attack_cooldown: 2.2,
            walk_speed: 1.8,
            run_speed: 4.8,
            sprint_speed: 6.0,
            vision_range: 18.0,
            vision_angle: 120.0,
            hearing_range: 12.0,
            aggro_range: 10.0,
            territory_radius: 25.0,
            flee_health_fraction: 0.1,
            xp_reward: 40,
            loot_tier: 3,
        },
        Species::Walrus => BaseStats {
            max_health: 180.0,
            damage: 16.0,
            attack_range: 2.2,
            attack_cooldown: 2.0,
            walk_speed: 1.2,
            run_speed: 3.0,
            sprint_speed: 3.5,
            vision_range: 14.0,
            vision_angle: 160.0,
            hearing_range: 10.0,
            aggro_range: 8.0,
            territory_radius: 8.0,
            flee_health_fraction: 0.0,
            xp_reward: 25,
            loot_tier: 2,
        },
        Species::Tiger => BaseStats {
            max_health: 120.0,
            damage: 18.0,
            attack_range: 2.0,
            attack_cooldown: 1.4,
            walk_speed: 2.2,
            run_speed: 5.0,
            sprint_speed: 8.5,
            vision_range: 26.0,
            vision_angle: 120.0,
            hearing_range: 16.0,
            aggro_range: 20.0,
            territory_radius: 40.0,
            flee_health_fraction: 0.2,
            xp_reward: 35,
            loot_tier: 2,
        },
        Species::Crocodile => BaseStats {
            max_health: 150.0,
            damage: 22.0,
            attack_range: 2.2,
            attack_cooldown: 2.5,
            walk_speed: 1.5,
            run_speed: 3.5,
            sprint_speed: 5.0,
            vision_range: 14.0,
            vision_angle: 100.0,
            hearing_range: 10.0,
            aggro_range: 8.0,
            territory_radius: 15.0,
            flee_health_fraction: 0.15,
            xp_reward: 30,
            loot_tier: 2,
        },
        Species::Behemoth => BaseStats {
            max_health: 2000.0,
            damage: 40.0,
            attack_range: 4.0,
            attack_cooldown: 2.5,
            walk_speed: 2.0,
            run_speed: 4.0,
            sprint_speed: 5.5,
            vision_range: 30.0,
            vision_angle: 180.0,
            hearing_range: 25.0,
            aggro_range: 25.0,
            territory_radius: 60.0,
            flee_health_fraction: 0.0,
            xp_reward: 500,
            loot_tier: 5,
        },
    }
}
