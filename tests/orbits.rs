use glam::DVec2;
use orrery::prelude::*;

const SUN_MASS: f64 = 1.98892e30;
const EARTH_MASS: f64 = 5.9742e24;
const EARTH_SPEED: f64 = 29_783.0;

fn sun_and_earth(parameters: Parameters) -> Simulation {
    let sun = Body::new("Sun", DVec2::ZERO, SUN_MASS, 30.0, Color::YELLOW)
        .unwrap()
        .anchor();
    let earth = Body::new("Earth", DVec2::new(-AU, 0.0), EARTH_MASS, 16.0, Color::BLUE)
        .unwrap()
        .with_velocity(DVec2::new(0.0, EARTH_SPEED))
        .unwrap();

    Simulation::with_bodies(parameters, [sun, earth]).unwrap()
}

fn assert_relative_eq(computed: DVec2, expected: DVec2) {
    let error = (computed - expected).length() / expected.length();
    assert!(error < 1e-12, "{computed} != {expected}");
}

#[test]
fn first_tick_is_a_semi_implicit_euler_step() {
    let mut simulation = sun_and_earth(Parameters::default());
    simulation.tick().unwrap();

    let acceleration = G * SUN_MASS / (AU * AU);
    let velocity = DVec2::new(acceleration * DAY, EARTH_SPEED);
    let position = DVec2::new(-AU, 0.0) + velocity * DAY;

    let earth = &simulation.bodies()[1];
    assert_relative_eq(earth.velocity(), velocity);
    assert_relative_eq(earth.position(), position);

    let sun = &simulation.bodies()[0];
    let sun_velocity = DVec2::new(-G * EARTH_MASS / (AU * AU) * DAY, 0.0);
    assert_relative_eq(sun.velocity(), sun_velocity);
    assert_relative_eq(sun.position(), sun_velocity * DAY);

    assert_eq!(earth.distance_to_anchor(), Some(AU));
    assert_eq!(simulation.ticks(), 1);
    assert_eq!(simulation.elapsed(), DAY);
}

#[test]
fn earth_returns_after_a_year() {
    let mut simulation = sun_and_earth(Parameters::default());
    simulation.run(365).unwrap();

    let earth = &simulation.bodies()[1];
    let offset = earth.position().distance(DVec2::new(-AU, 0.0));
    assert!(offset < 0.05 * AU, "earth is {} AU away from its start", offset / AU);

    let distance = earth.distance_to_anchor().unwrap();
    assert!((distance - AU).abs() < 0.05 * AU);
}

#[test]
fn runs_are_bit_identical() {
    let run = || {
        let mut simulation = config::inner_solar_system().build().unwrap();
        simulation.run(200).unwrap();
        simulation
            .bodies()
            .iter()
            .map(|body| (body.position(), body.velocity(), body.distance_to_anchor()))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn inner_planets_stay_bound() {
    let mut simulation = config::inner_solar_system().build().unwrap();
    let initial_energy = simulation.total_energy();
    let initial_distances: Vec<_> = simulation
        .bodies()
        .iter()
        .map(|body| body.position().length())
        .collect();

    simulation.run(365).unwrap();

    let drift = ((simulation.total_energy() - initial_energy) / initial_energy).abs();
    assert!(drift < 5e-2, "relative energy drift {drift}");

    for (body, initial) in simulation.bodies().iter().zip(initial_distances).skip(1) {
        let distance = body.distance_to_anchor().unwrap();
        assert!(
            (distance - initial).abs() < 0.2 * initial,
            "{} drifted to {} AU",
            body.name(),
            distance / AU
        );
    }
}

#[test]
fn trajectory_lengths() {
    let mut unbounded = config::inner_solar_system().build().unwrap();
    unbounded.run(100).unwrap();
    assert!(unbounded
        .bodies()
        .iter()
        .all(|body| body.trajectory().len() == 100));

    for cap in [0, 1, 50, 100, 150] {
        let mut scenario = config::inner_solar_system();
        scenario.simulation.history = Some(cap);

        let mut bounded = scenario.build().unwrap();
        bounded.run(100).unwrap();

        for body in bounded.bodies() {
            assert_eq!(body.trajectory().len(), cap.min(100));
            if cap > 0 {
                assert_eq!(body.trajectory().last(), Some(body.position()));
            }
        }
    }
}

#[test]
fn sequential_order_stays_close_to_two_phase() {
    let mut two_phase = sun_and_earth(Parameters::default());
    let mut sequential = sun_and_earth(Parameters {
        update_order: UpdateOrder::Sequential,
        ..Default::default()
    });

    two_phase.run(365).unwrap();
    sequential.run(365).unwrap();

    let gap = two_phase.bodies()[1]
        .position()
        .distance(sequential.bodies()[1].position());
    assert!(gap < 1e-3 * AU);
}

#[test]
fn drawables_follow_body_order() {
    let mut simulation = config::inner_solar_system().build().unwrap();
    simulation.run(3).unwrap();

    let drawables: Vec<_> = simulation.drawables().collect();
    assert_eq!(drawables.len(), 5);
    assert!(drawables[0].is_anchor && drawables[0].label().is_none());
    assert!(drawables.iter().all(Drawable::path_visible));
    assert!(drawables[1..].iter().all(|d| d.label().is_some()));
}
