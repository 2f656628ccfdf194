use anyhow::Context;
use clap::Parser;
use dmg_core::{Cartridge, GameBoy, NoRenderer};
use std::fs;

#[derive(Parser)]
struct Cli {
    /// Path to a Game Boy ROM image
    #[arg(short = 'f', long = "rom-path")]
    rom_path: String,
    /// Number of frames to emulate before exiting
    #[arg(short = 'n', long = "frames", default_value_t = 60)]
    frames: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();

    let rom = fs::read(&args.rom_path)
        .with_context(|| format!("error reading ROM from '{}'", args.rom_path))?;

    let mut game_boy = GameBoy::new(Cartridge::new(rom));

    let mut total_cycles = 0;
    for frame in 0..args.frames {
        let frame_cycles = game_boy
            .run_frame(&mut NoRenderer)
            .with_context(|| format!("emulation halted during frame {frame}"))?;
        total_cycles += frame_cycles;

        log::debug!("Frame {frame} complete after {frame_cycles} cycles");
    }

    log::info!("Emulated {} frames in {total_cycles} cycles", args.frames);
    println!(
        "{} frames, {total_cycles} cycles, PC={:04X}",
        args.frames,
        game_boy.cpu_registers().pc
    );

    Ok(())
}
