use std::path::PathBuf;

use clap::Parser;
use log::error;

use chip8_core::CLOCK_SPEED;

mod keymap;
mod pacer;
mod run;

#[derive(Parser)]
#[command(name = "chip8")]
#[command(about = "Runs a CHIP-8 ROM")]
#[command(version)]
pub struct Args {
    /// ROM file (.ch8)
    rom: PathBuf,

    /// CPU speed in Hz
    #[arg(
        short,
        long,
        default_value_t = CLOCK_SPEED,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    clock_hz: u32,

    /// Size multiplier for each pixel
    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=40)
    )]
    scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run::run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
