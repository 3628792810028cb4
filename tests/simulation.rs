use approx::assert_relative_eq;
use rand::rngs::StdRng;
use space_brick::prelude::*;
use std::time::Duration;

const DT: f64 = 1.0 / 60.0;

fn simulation(config: SimConfig) -> Simulation<StdRng, ManualTime> {
    Simulation::with_time_source(config, ManualTime::default()).unwrap()
}

fn noise_free() -> SimConfig {
    SimConfig {
        body_mass: 10.0,
        thruster_power: 10.0,
        sensor_coupling: SensorCoupling::IDEAL,
        seed: Some(1),
        ..Default::default()
    }
}

/// Thrust pattern cycling through all four directions with coasting phases.
fn zigzag(tick: usize) -> HeldThrusters {
    match (tick / 50) % 6 {
        0 => HeldThrusters::right(),
        1 => HeldThrusters::down(),
        2 => HeldThrusters::NONE,
        3 => HeldThrusters::left(),
        4 => HeldThrusters::up(),
        _ => HeldThrusters::NONE,
    }
}

fn fly_zigzag(sim: &mut Simulation<StdRng, ManualTime>, ticks: usize) {
    for tick in 0..ticks {
        let control = sim.control_for(&zigzag(tick));
        sim.step(&control, DT);
    }
}

#[test]
fn thrust_right_for_one_second_is_estimated_exactly() {
    let mut sim = simulation(noise_free());
    let control = sim.control_for(&HeldThrusters::right());
    assert_eq!(control.thrust_x, 1.0);

    let mut prev_belief = *sim.belief();
    let mut prev_truth = *sim.true_state();
    for _ in 0..60 {
        sim.step(&control, DT);
        let belief = *sim.belief();
        let truth = *sim.true_state();
        assert!(belief.dx() >= prev_belief.dx());
        assert!(belief.x() >= prev_belief.x());
        assert!(truth.x() >= prev_truth.x());
        assert_eq!(sim.score().score(), 0.0);
        prev_belief = belief;
        prev_truth = truth;
    }
    assert!(sim.belief().dx() > 0.0);
    assert!(sim.belief().x() > 50.0);
    assert_eq!(sim.belief().y(), 50.0);
    assert_eq!(sim.score().cumulative_error(), 0.0);
    assert!(sim.score().cumulative_distance() > 0.0);
    // acceleration is thrust over mass, the thrust itself being power over mass
    assert_relative_eq!(sim.true_state().ddx(), 0.1);
    assert_relative_eq!(sim.true_state().dx(), 59.0 * 0.1 * DT, epsilon = 1e-12);
}

#[test]
fn default_sensor_coupling_yields_small_bias() {
    let mut sim = simulation(SimConfig {
        sensor_coupling: SensorCoupling::default(),
        ..noise_free()
    });
    let control = sim.control_for(&HeldThrusters::right());
    for _ in 0..60 {
        sim.step(&control, DT);
    }
    let score = sim.score();
    assert!(score.cumulative_error() > 0.0);
    // acceleration damping costs 0.1 * dt * ddx per tick on x, crosstalk leaks
    // 0.001 * dt * dx onto y, with dx = (k - 1) * 0.1 * dt on tick k
    let damping = 60.0 * 0.1 * DT * 0.1;
    let crosstalk = 0.001 * DT * 0.1 * DT * (0..60).sum::<u32>() as f64;
    assert_relative_eq!(
        score.cumulative_error(),
        damping + crosstalk,
        epsilon = 1e-9
    );
}

#[test]
fn noisy_run_stays_bounded() {
    let mut sim = simulation(SimConfig {
        process_noise: 0.02,
        sensor_noise: 0.1,
        hard_noise: 0.0,
        sensor_coupling: SensorCoupling::default(),
        seed: Some(2024),
        ..Default::default()
    });
    fly_zigzag(&mut sim, 1000);
    let score = sim.score();
    assert!(score.cumulative_error().is_finite());
    assert!(score.cumulative_distance().is_finite());
    assert!(score.cumulative_error() > 0.0);
    assert!(score.cumulative_distance() > 0.0);
    assert!((0.0..1.0).contains(&score.score()));
    assert_eq!(sim.sensor().glitches(), 0);
    assert!(sim.true_state().x().is_finite());
    assert!(sim.belief().x().is_finite());
}

#[test]
fn gaussian_noise_run_stays_bounded() {
    let mut sim = simulation(SimConfig {
        process_noise: 0.01,
        sensor_noise: 0.05,
        noise_shape: NoiseShape::Gaussian,
        seed: Some(9),
        ..Default::default()
    });
    fly_zigzag(&mut sim, 1000);
    assert!(sim.score().score().is_finite());
    assert!(sim.score().score() >= 0.0);
}

#[test]
fn hard_noise_increases_error() {
    let run = |hard_noise: f64| {
        let mut sim = simulation(SimConfig {
            process_noise: 0.02,
            sensor_noise: 0.05,
            hard_noise,
            seed: Some(77),
            ..Default::default()
        });
        fly_zigzag(&mut sim, 600);
        *sim.score()
    };
    let soft = run(0.0);
    let hard = run(1.0);
    assert!(hard.cumulative_error() > soft.cumulative_error());
    // the true trajectory does not depend on the sensor
    assert_eq!(hard.cumulative_distance(), soft.cumulative_distance());
}

#[test]
fn hard_noise_on_an_ideal_sensor() {
    let run = |hard_noise: f64| {
        let mut sim = simulation(SimConfig {
            hard_noise,
            ..noise_free()
        });
        fly_zigzag(&mut sim, 300);
        (*sim.score(), sim.sensor().glitches())
    };
    let (soft, soft_glitches) = run(0.0);
    let (hard, hard_glitches) = run(1.0);
    assert_eq!(soft.cumulative_error(), 0.0);
    assert!(hard.cumulative_error() > 0.0);
    assert_eq!(soft_glitches, 0);
    assert_eq!(hard_glitches, 300);
}

#[test]
fn same_seed_same_run() {
    let config = SimConfig {
        process_noise: 0.05,
        sensor_noise: 0.05,
        hard_noise: 0.1,
        seed: Some(5),
        ..Default::default()
    };
    let mut a = simulation(config.clone());
    let mut b = simulation(config);
    fly_zigzag(&mut a, 500);
    fly_zigzag(&mut b, 500);
    assert_eq!(a.true_state(), b.true_state());
    assert_eq!(a.belief(), b.belief());
    assert_eq!(a.score(), b.score());
}

#[test]
fn resume_does_not_skip_time() {
    struct Hold(Vec<InputEvent>);
    impl InputSource for Hold {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            std::mem::take(&mut self.0)
        }
        fn held_thrusters(&self) -> HeldThrusters {
            HeldThrusters::right()
        }
    }
    struct Nothing;
    impl Renderer for Nothing {
        fn draw(&mut self, _frame: &Frame) {}
    }

    let time = ManualTime::default();
    let mut sim = Simulation::with_time_source(noise_free(), time.clone()).unwrap();
    let mut input = Hold(vec![]);
    for _ in 0..30 {
        sim.frame(&mut input, &mut Nothing);
    }
    assert_eq!(sim.ticks(), 30);

    input.0 = vec![InputEvent::TogglePause];
    sim.frame(&mut input, &mut Nothing);
    let paused_at = *sim.true_state();
    time.advance(Duration::from_secs(10));
    sim.frame(&mut input, &mut Nothing);
    assert!(sim.is_paused());
    assert_eq!(sim.ticks(), 30);
    assert_eq!(*sim.true_state(), paused_at);

    let belief_at_pause = *sim.belief();
    input.0 = vec![InputEvent::TogglePause];
    sim.frame(&mut input, &mut Nothing);
    assert!(!sim.is_paused());
    // the resume frame itself carries no elapsed time
    assert_eq!(sim.ticks(), 30);
    assert_eq!(*sim.belief(), belief_at_pause);
    assert!(sim.belief().dx() > 0.0);

    sim.frame(&mut input, &mut Nothing);
    assert_eq!(sim.ticks(), 31);
    // the sensor reading is velocity times the last dt, which must be a single frame
    let dt = sim.belief().dx() / sim.true_state().dx();
    assert!(dt > 0.0 && dt < 0.02, "dt = {}", dt);
}

#[test]
fn autopilot_run_reports_summary() {
    let mut sim = simulation(noise_free());
    let mut pilot = Autopilot::new([
        Leg::new(30, HeldThrusters::down()),
        Leg::coast(30),
        Leg::new(30, HeldThrusters::up()),
    ])
    .with_event(0, InputEvent::ToggleScore);
    let mut printer = PrinterRenderer::new("test".to_owned(), 1000);
    let summary = sim.run(&mut pilot, &mut printer);
    assert_eq!(sim.ticks(), 90);
    assert!(!sim.is_running());
    assert_eq!(summary.score(), 0.0);
    assert!(summary.cumulative_distance() > 0.0);
    assert!(summary.to_string().ends_with("Final score = 0.000"));
    assert_eq!(sim.render_frame().overlays.len(), 1);
}

#[test]
fn invalid_configuration_refuses_to_start() {
    for config in [
        SimConfig {
            body_mass: -1.0,
            ..Default::default()
        },
        SimConfig {
            thruster_power: 0.0,
            ..Default::default()
        },
        SimConfig {
            hard_noise: 2.0,
            ..Default::default()
        },
        SimConfig {
            process_noise: -0.5,
            ..Default::default()
        },
    ] {
        assert!(Simulation::with_time_source(config, ManualTime::default()).is_err());
    }
}
