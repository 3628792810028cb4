use clap::Parser;
use space_brick::compute::Simulation;
use space_brick::frontends::BrailleRenderer;
use space_brick::frontends::TerminalInput;
use space_brick::frontends::TerminalSession;

#[path = "args.rs"]
mod args;

// Keys: arrows thrust, q quit, p pause, i state info, s sensor info, g score.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout belongs to the braille canvas
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = args::SimArgs::parse();

    let mut sim = Simulation::new(args.config())?;
    let summary = {
        let _session = TerminalSession::enter()?;
        sim.run(&mut TerminalInput::default(), &mut BrailleRenderer::default())
    };
    println!("{}", summary);
    Ok(())
}
