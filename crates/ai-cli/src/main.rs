//! creature-sim: headless creature AI runner.
//!
//! - `creature-sim run` - run a YAML scenario and print the final report
//! - `creature-sim species` - print the base stats table
//! - `creature-sim init` - write an example scenario

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ai_agent::Species;
use ai_sim::{SimConfig, Simulation};
use ai_species::base_stats;

#[derive(Parser)]
#[command(name = "creature-sim")]
#[command(about = "Headless creature AI simulator", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario
    Run {
        /// Scenario file; an empty arena when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the scenario's tick count
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the scenario's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print every notification as a JSON line while running
        #[arg(long)]
        events: bool,
    },

    /// Show base stats per species
    Species {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write an example scenario
    Init {
        #[arg(default_value = "scenario.yaml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            seed,
            events,
        } => run_scenario(config.as_deref(), ticks, seed, events),
        Commands::Species { json } => show_species(json),
        Commands::Init { path } => init_scenario(&path),
    }
}

fn run_scenario(
    path: Option<&Path>,
    ticks: Option<u64>,
    seed: Option<u64>,
    events: bool,
) -> Result<()> {
    let mut config = match path {
        Some(p) => SimConfig::load(p)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let ticks = ticks.unwrap_or(config.ticks);

    tracing::info!(
        scenario = %path.map_or_else(|| "<default>".to_string(), |p| p.display().to_string()),
        seed = config.seed,
        ticks,
        "Starting simulation"
    );

    let mut sim = Simulation::new(config)?;
    for _ in 0..ticks {
        sim.step();
        let drained = sim.drain_notifications();
        if events {
            for event in &drained {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }

    let report = sim.report();
    tracing::info!(
        tick = report.tick,
        agents = report.agents.len(),
        alive = sim.live_agents(),
        boss_events = report.boss_events,
        bosses_defeated = report.bosses_defeated,
        "Simulation finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn show_species(json: bool) -> Result<()> {
    if json {
        let table: Vec<_> = Species::ALL
            .iter()
            .map(|s| serde_json::json!({ "species": s, "stats": base_stats(*s) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!(
        "{:<10} {:>7} {:>6} {:>6} {:>5} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "species", "health", "damage", "range", "cd", "walk", "run", "sprint", "vision", "aggro"
    );
    for species in Species::ALL {
        let s = base_stats(species);
        println!(
            "{:<10} {:>7.0} {:>6.0} {:>6.1} {:>5.1} {:>6.1} {:>6.1} {:>6.1} {:>6.0} {:>6.0}",
            species.name(),
            s.max_health,
            s.damage,
            s.attack_range,
            s.attack_cooldown,
            s.walk_speed,
            s.run_speed,
            s.sprint_speed,
            s.vision_range,
            s.aggro_range,
        );
    }
    Ok(())
}

fn init_scenario(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    let scenario = r#"# creature-sim scenario

seed: 42
tick_rate: 10.0
ticks: 600

spawner:
  elite_chance: 0.05

arena:
  half_extent: 80.0
  rocks:
    - center: { x: 10.0, y: 10.0 }
      radius: 3.0
  water:
    - center: { x: -25.0, y: 0.0 }
      radius: 6.0

spawns:
  - species: wolf
    position: { x: 30.0, y: 0.0 }
    count: 4
  - species: bison
    position: { x: -10.0, y: 25.0 }
    count: 6
  - species: crocodile
    position: { x: -25.0, y: 0.0 }
  - species: walrus
    position: { x: 0.0, y: -30.0 }

players:
  - id: 1
    position: { x: 0.0, y: 0.0 }
    velocity: { x: 1.0, y: 0.2 }
    dps: 12.0

boss:
  trigger: explicit
  position: { x: 0.0, y: 40.0 }
  trigger_at: 30.0
"#;
    std::fs::write(path, scenario)
        .with_context(|| format!("Failed to write scenario to {}", path.display()))?;

    println!("Wrote example scenario to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  creature-sim run --config {}", path.display());

    Ok(())
}
