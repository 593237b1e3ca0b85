use std::io::Write;

use ai_agent::{Rarity, Species};
use ai_boss::BossTrigger;
use ai_sim::{SimConfig, Simulation};

const SCENARIO: &str = r#"
version: "1"
seed: 7
tick_rate: 20.0
ticks: 100
spawner:
  elite_chance: 0.0
  overrides:
    wolf:
      max_health: 80.0
arena:
  half_extent: 50.0
  grid_cell: 1.0
  rocks:
    - center: { x: 5.0, y: 5.0 }
      radius: 2.0
  water:
    - center: { x: -10.0, y: 0.0 }
      radius: 4.0
spawns:
  - species: wolf
    position: { x: 10.0, y: 0.0 }
    count: 3
  - species: bear
    position: { x: 0.0, y: 20.0 }
    rarity: Elite
players:
  - id: 1
    position: { x: 0.0, y: 0.0 }
    dps: 10.0
boss:
  trigger:
    population:
      min_players: 2
  despawn_radius: 80.0
  position: { x: 30.0, y: 30.0 }
  trigger_at: 5.0
"#;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write scenario");
    file
}

#[test]
fn loads_a_full_scenario() {
    let file = write_temp(SCENARIO);
    let config = SimConfig::load(file.path()).expect("scenario loads");

    assert_eq!(config.version.as_deref(), Some("1"));
    assert_eq!(config.seed, 7);
    assert!((config.dt() - 0.05).abs() < 1e-6);
    assert_eq!(config.ticks, 100);
    assert_eq!(
        config.spawner.overrides.get(&Species::Wolf).and_then(|o| o.max_health),
        Some(80.0)
    );
    assert_eq!(config.arena.rocks.len(), 1);
    assert_eq!(config.arena.water.len(), 1);
    assert_eq!(config.spawns.len(), 2);
    assert_eq!(config.spawns[0].count, 3);
    assert_eq!(config.spawns[1].rarity, Some(Rarity::Elite));
    assert_eq!(config.players[0].health, 100.0);
    assert_eq!(config.boss.rules.trigger, BossTrigger::Population { min_players: 2 });
    assert_eq!(config.boss.rules.despawn_radius, 80.0);
    assert_eq!(config.boss.rules.abilities.len(), 3);
    assert_eq!(config.boss.species, Species::Behemoth);
    assert_eq!(config.boss.summon_species, Species::Wolf);
    assert_eq!(config.boss.trigger_at, Some(5.0));
}

#[test]
fn loaded_scenario_builds_a_simulation() {
    let config = SimConfig::from_yaml(SCENARIO).expect("scenario parses");
    let sim = Simulation::new(config).expect("simulation builds");

    assert_eq!(sim.live_agents(), 4);
    let wolves: Vec<_> = sim.agents().filter(|a| a.species() == Species::Wolf).collect();
    assert_eq!(wolves.len(), 3);
    assert!(wolves.iter().all(|w| (w.stats().max_health() - 80.0).abs() < 1e-3));
    assert!(wolves.iter().all(|w| w.group().is_some()));
    let bear = sim.agents().find(|a| a.species() == Species::Bear);
    assert_eq!(bear.map(|b| b.rarity()), Some(Rarity::Elite));
    assert!(sim.player(1).is_some());
}

#[test]
fn empty_document_uses_defaults() {
    let config = SimConfig::from_yaml("{}").expect("defaults");
    assert_eq!(config.seed, 42);
    assert_eq!(config.tick_rate, 10.0);
    assert_eq!(config.ticks, 600);
    assert!(config.spawns.is_empty());
    assert_eq!(config.boss.rules.trigger, BossTrigger::Explicit);
    assert!(config.boss.trigger_at.is_none());
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.yaml");
    let err = SimConfig::load(&path).expect_err("missing file");
    let message = format!("{err:#}");
    assert!(message.contains("Failed to read scenario"), "{message}");
    assert!(message.contains("nope.yaml"), "{message}");
}

#[test]
fn invalid_values_are_rejected() {
    let err = SimConfig::from_yaml("tick_rate: 0.0").expect_err("zero tick rate");
    assert!(format!("{err:#}").contains("tick_rate"));

    let err = SimConfig::from_yaml("arena: { grid_cell: 1.0 }").expect_err("grid without extent");
    assert!(format!("{err:#}").contains("half_extent"));

    let err = SimConfig::from_yaml("boss: { summon_species: behemoth }").expect_err("boss minion");
    assert!(format!("{err:#}").contains("summon_species"));

    let dupes = r#"
players:
  - { id: 3, position: { x: 0.0, y: 0.0 } }
  - { id: 3, position: { x: 1.0, y: 0.0 } }
"#;
    assert!(SimConfig::from_yaml(dupes).is_err());
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let file = write_temp("spawns: [ { species: dragon, position: {x: 0, y: 0} } ]");
    let err = SimConfig::load(file.path()).expect_err("unknown species");
    assert!(format!("{err:#}").contains("Failed to parse scenario"));
}
