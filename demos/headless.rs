use clap::Parser;
use space_brick::compute::InputEvent;
use space_brick::compute::Simulation;
use space_brick::core::HeldThrusters;
use space_brick::frontends::quit_on_ctrl_c;
use space_brick::frontends::Autopilot;
use space_brick::frontends::Leg;
use space_brick::frontends::PrinterRenderer;

#[path = "args.rs"]
mod args;

/// A square flight path: one second of thrust per side, coasting in between.
fn square_flight(fps: u32) -> Vec<Leg> {
    let mut legs = vec![];
    for held in [
        HeldThrusters::right(),
        HeldThrusters::down(),
        HeldThrusters::left(),
        HeldThrusters::up(),
    ] {
        legs.push(Leg::new(fps, held));
        legs.push(Leg::coast(2 * fps));
    }
    legs
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = args::SimArgs::parse();
    let config = args.config();
    let fps = config.max_tick_rate;

    let mut sim = Simulation::new(config)?;
    let mut pilot = Autopilot::new(square_flight(fps))
        .with_event(0, InputEvent::ToggleScore)
        .with_quit_flag(quit_on_ctrl_c()?);
    let mut printer = PrinterRenderer::new("brick".to_owned(), u64::from(fps));

    let summary = sim.run(&mut pilot, &mut printer);
    println!("{}", summary);
    Ok(())
}
