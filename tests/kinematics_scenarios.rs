use std::io::Write;

use approx::assert_relative_eq;
use orrery::simulation::{
    BodyRegistry, ClockSource, FrameDriver, ManualClock, RotationMode, SystemConfig,
};
use orrery::ConfigError;

const SHIPPED_CONFIG: &str = include_str!("../configs/solar_system.json");

fn driver_at(t: f64) -> FrameDriver<ManualClock> {
    let registry = BodyRegistry::solar_system().unwrap();
    FrameDriver::new(ManualClock::new(t), registry)
}

#[test]
fn earth_starts_on_the_positive_x_axis() {
    let mut driver = driver_at(0.0);
    driver.tick();

    let earth = driver.registry().get("earth").unwrap();
    assert_relative_eq!(earth.current_position.x, 2915.0);
    assert_relative_eq!(earth.current_position.z, 0.0);
}

#[test]
fn earth_covers_one_radian_in_twenty_seconds() {
    let mut driver = driver_at(20_000.0);
    driver.tick();

    let earth = driver.registry().get("earth").unwrap();
    assert_relative_eq!(earth.current_position.x, 1574.98, epsilon = 0.01);
    assert_relative_eq!(earth.current_position.z, 2452.89, epsilon = 0.01);
}

#[test]
fn saturn_rings_follow_saturn_exactly() {
    let mut driver = driver_at(1_700_000_000_000.0);
    for _ in 0..5 {
        driver.tick();
        driver.clock_mut().advance(16.0);

        let saturn = driver.registry().get("saturn").unwrap();
        let rings = driver.registry().get("saturn_rings").unwrap();
        assert_eq!(rings.current_position, saturn.current_position);
    }
}

#[test]
fn missing_orbital_angular_rate_is_rejected() {
    let config = SystemConfig::from_json_str(
        r#"{ "bodies": { "earth": { "orbitalRadius": 2915, "rotationRate": 0.01 } } }"#,
    )
    .unwrap();

    match BodyRegistry::from_config(&config) {
        Err(ConfigError::MissingParameter { body, parameter }) => {
            assert_eq!(body, "earth");
            assert_eq!(parameter, "orbitalAngularRate");
        }
        other => panic!("expected a missing parameter error, got {other:?}"),
    }
}

#[test]
fn repeated_body_id_is_rejected() {
    let result = SystemConfig::from_json_str(
        r#"{ "bodies": {
            "earth": { "orbitalRadius": 2915, "rotationRate": 0.01, "orbitalAngularRate": 0.00005 },
            "mars": { "orbitalRadius": 3710, "rotationRate": 0.01, "orbitalAngularRate": 0.00003 },
            "earth": { "orbitalRadius": 99, "rotationRate": 0.01, "orbitalAngularRate": 0.00005 }
        } }"#,
    );

    match result {
        Err(ConfigError::DuplicateBody { body }) => assert_eq!(body, "earth"),
        other => panic!("expected a duplicate body error, got {other:?}"),
    }
}

#[test]
fn shipped_config_matches_built_in_table() {
    let shipped = SystemConfig::from_json_str(SHIPPED_CONFIG).unwrap();
    assert_eq!(shipped, SystemConfig::solar_system());
    assert_eq!(
        BodyRegistry::from_config(&shipped).unwrap(),
        BodyRegistry::solar_system().unwrap()
    );
}

#[test]
fn config_loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SHIPPED_CONFIG.as_bytes()).unwrap();

    let config = SystemConfig::load(file.path()).unwrap();
    let registry = BodyRegistry::from_config(&config).unwrap();
    assert_eq!(registry.len(), 10);
    assert_eq!(registry.all_bodies()[0].id.as_str(), "sun");
}

#[test]
fn planets_stay_on_their_circles_over_a_long_run() {
    let mut driver = driver_at(1_700_000_000_000.0);
    for _ in 0..600 {
        driver.clock_mut().advance(16.7);
        driver.tick();
    }

    for body in driver.registry().all_bodies() {
        let r = body.orbit.orbital_radius;
        assert_relative_eq!(
            body.current_position.distance_from_origin(),
            r,
            max_relative = 1e-9,
            epsilon = 1e-9
        );
    }
    let sun = driver.registry().get("sun").unwrap();
    assert_eq!(sun.current_position.distance_from_origin(), 0.0);
}

#[test]
fn rotation_advances_once_per_tick_by_default() {
    let mut driver = driver_at(0.0);
    for _ in 0..100 {
        driver.clock_mut().advance(5.0);
        driver.tick();
    }

    let jupiter = driver.registry().get("jupiter").unwrap();
    assert_relative_eq!(jupiter.current_rotation, 100.0 * 0.03, max_relative = 1e-12);
    assert_eq!(driver.frame(), 100);
}

#[test]
fn elapsed_rotation_ignores_frame_rate() {
    let run = |frame_ms: f64, frames: u32| {
        let mut driver = driver_at(0.0).with_rotation_mode(RotationMode::elapsed());
        driver.tick();
        for _ in 0..frames {
            driver.clock_mut().advance(frame_ms);
            driver.tick();
        }
        driver.registry().get("earth").unwrap().current_rotation
    };

    // One second at 30 Hz and at 120 Hz.
    let slow = run(1000.0 / 30.0, 30);
    let fast = run(1000.0 / 120.0, 120);
    assert_relative_eq!(slow, fast, max_relative = 1e-9);
}

#[test]
fn positions_depend_only_on_the_clock() {
    let mut every_frame = driver_at(0.0);
    let mut skipping = driver_at(0.0);

    for step in 1..=50 {
        every_frame.clock_mut().advance(100.0);
        every_frame.tick();
        skipping.clock_mut().advance(100.0);
        if step % 7 == 0 || step == 50 {
            skipping.tick();
        }
    }

    assert_eq!(every_frame.clock_mut().now(), skipping.clock_mut().now());
    for (a, b) in every_frame
        .registry()
        .all_bodies()
        .iter()
        .zip(skipping.registry().all_bodies())
    {
        assert_eq!(a.current_position, b.current_position, "{}", a.id);
    }
}
