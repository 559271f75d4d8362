use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dotboy::RunOptions;
use dotboy_gb::PpuTiming;

const USAGE: &str = "Usage: dotboy <rom_path> [frames] [--dump <out_rgb24_path>] [--realtime]";
const DEFAULT_FRAMES: u64 = 600;

fn parse_args() -> Result<RunOptions> {
    let mut args = std::env::args().skip(1);
    let mut rom_path = None;
    let mut frames = None;
    let mut dump_path = None;
    let mut realtime = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dump" => {
                let path = args.next().context("--dump needs a path")?;
                dump_path = Some(PathBuf::from(path));
            }
            "--realtime" => realtime = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ if rom_path.is_none() => rom_path = Some(PathBuf::from(arg)),
            _ if frames.is_none() => {
                frames = Some(
                    arg.parse()
                        .with_context(|| format!("Invalid frame count '{}'", arg))?,
                );
            }
            other => bail!("Unexpected argument '{}'\n{}", other, USAGE),
        }
    }

    let ppu_timing = match std::env::var("DOTBOY_PPU_TIMING") {
        Ok(name) => PpuTiming::from_name(&name)
            .with_context(|| format!("Unknown DOTBOY_PPU_TIMING '{}'", name))?,
        Err(_) => PpuTiming::default(),
    };

    Ok(RunOptions {
        rom_path: rom_path.context(USAGE)?,
        frames: frames.unwrap_or(DEFAULT_FRAMES),
        dump_path,
        realtime,
        ppu_timing,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args()?;
    log::info!("Playing ROM path: '{}'", options.rom_path.display());
    dotboy::run(options)
}
