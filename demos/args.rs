use clap::Parser;
use space_brick::compute::SimConfig;
use space_brick::core::NoiseShape;

/// Command line flags shared by the demos.
#[derive(Parser, Debug)]
#[command(about = "A brick in space, its sensor and an estimator")]
pub struct SimArgs {
    #[arg(short = 'w', long, default_value_t = 400)]
    pub screen_width: u32,
    #[arg(short = 'l', long, default_value_t = 300)]
    pub screen_height: u32,
    #[arg(short = 'f', long, default_value_t = 60)]
    pub max_fps: u32,
    #[arg(short = 'm', long, default_value_t = 10.0)]
    pub brick_mass: f64,
    #[arg(short = 't', long, default_value_t = 10.0)]
    pub thruster_power: f64,
    #[arg(short = 'n', long, default_value_t = 0.0)]
    pub model_noise: f64,
    #[arg(short = 's', long, default_value_t = 0.0)]
    pub sensor_noise: f64,
    #[arg(short = 'p', long, default_value_t = 0.0)]
    pub hard_noise: f64,
    /// Draw noise from a normal instead of a uniform distribution.
    #[arg(long)]
    pub gaussian: bool,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SimArgs {
    pub fn config(&self) -> SimConfig {
        SimConfig {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            max_tick_rate: self.max_fps,
            body_mass: self.brick_mass,
            thruster_power: self.thruster_power,
            process_noise: self.model_noise,
            sensor_noise: self.sensor_noise,
            hard_noise: self.hard_noise,
            noise_shape: if self.gaussian {
                NoiseShape::Gaussian
            } else {
                NoiseShape::Uniform
            },
            seed: self.seed,
            ..Default::default()
        }
    }
}
