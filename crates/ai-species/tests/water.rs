mod common;

use ai_agent::{Circle, DamageKind, SandboxWorld, Species, SpeedTier, Vec2};
use ai_species::crocodile::{self, SWIM_SPEED_MULTIPLIER};
use common::{player, run, spawner, step};

#[test]
fn water_is_sampled_on_an_interval() {
    let mut world = SandboxWorld::open_field();
    world.add_water(Circle::new(Vec2::new(9.0, 0.0), 3.0));
    let mut spawner = spawner();
    let mut agents = vec![spawner.spawn(Species::Crocodile, Vec2::new(9.0, 0.0))];

    step(&mut agents, &mut world, 0);
    assert!(crocodile::in_water(&agents[0]));
    let swim = agents[0].speed(SpeedTier::Run);
    assert!((swim - 3.5 * SWIM_SPEED_MULTIPLIER).abs() < 1e-4);

    agents[0].set_position(Vec2::new(40.0, 0.0));
    run(&mut agents, &mut world, 1..5);
    assert!(crocodile::in_water(&agents[0]), "resampled too early");

    step(&mut agents, &mut world, 5);
    assert!(!crocodile::in_water(&agents[0]));
    assert!((agents[0].speed(SpeedTier::Run) - 3.5).abs() < 1e-4);
}

#[test]
fn bites_harder_from_the_water() {
    let mut world = SandboxWorld::open_field();
    world.add_water(Circle::new(Vec2::new(9.0, 0.0), 3.0));
    let mut spawner = spawner();
    player(&mut world, 1, Vec2::new(10.5, 0.0), -Vec2::X);
    let mut agents = vec![spawner.spawn(Species::Crocodile, Vec2::new(9.0, 0.0))];

    step(&mut agents, &mut world, 0);

    assert_eq!(world.damage_log().len(), 1);
    let bite = world.damage_log()[0];
    assert_eq!(bite.kind, DamageKind::Melee);
    assert!((bite.amount - 22.0 * 1.25).abs() < 1e-3);
}

#[test]
fn wandering_is_pulled_toward_water() {
    let mut world = SandboxWorld::open_field();
    let pond = Vec2::new(12.0, 0.0);
    world.add_water(Circle::new(pond, 4.0));
    let mut spawner = spawner();
    let mut agents = vec![spawner.spawn(Species::Crocodile, Vec2::ZERO)];

    run(&mut agents, &mut world, 0..400);

    assert!(
        agents[0].position().distance(pond) < 4.0,
        "croc at {:?}",
        agents[0].position()
    );
    assert!(crocodile::in_water(&agents[0]));
}
