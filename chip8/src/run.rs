use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use chip8_core::{Chip8, TIMER_SPEED};
use display::Display;

use crate::keymap;
use crate::pacer::Pacer;
use crate::Args;

/// How long to sleep between frames when there is nothing else to do
const IDLE: Duration = Duration::from_millis(1);

pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let size = chip8
        .load_rom_file(&args.rom)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;
    info!("loaded {} byte ROM from {}", size, args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, "CHIP-8", args.scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let mut pacer = Pacer::new(args.clock_hz, TIMER_SPEED);
    let mut last_frame = Instant::now();
    info!("running at {}Hz", args.clock_hz);

    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'event,
                _ => continue,
            }
        }

        let now = Instant::now();
        let slice = pacer.advance(now - last_frame);
        last_frame = now;

        // New key presses become visible once per timer tick
        if slice.ticks > 0 {
            chip8.update_keypad(keymap::snapshot(&events.keyboard_state()));
        }

        for _ in 0..slice.cycles {
            chip8.run_cycle().context("program halted")?;
        }

        for _ in 0..slice.ticks {
            chip8.tick_timers();
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(|e| anyhow!(e))?;
        }

        std::thread::sleep(IDLE);
    }

    info!("exiting");
    Ok(())
}
