use clap::Parser;
use space_brick::frontends::egui::run_window;

#[path = "args.rs"]
mod args;

// Keys: arrows thrust, q quit, p pause, i state info, s sensor info, g score.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::SimArgs::parse();
    run_window(args.config())?;
    Ok(())
}
