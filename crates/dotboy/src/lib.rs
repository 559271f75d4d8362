use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use dotboy_gb::{FramePacer, GameBoy, GameBoyConfig, PpuTiming, RomSource};

/// Serial markers printed by the common CPU test ROMs when they finish.
const PASS_MARKER: &str = "Passed";
const FAIL_MARKER: &str = "Failed";

/// Reads a ROM from disk and keeps battery RAM in a `.sav` file next to it.
pub struct FileRomSource {
    rom_path: PathBuf,
    save_path: PathBuf,
}

impl FileRomSource {
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        let rom_path = rom_path.into();
        let save_path = rom_path.with_extension("sav");
        Self {
            rom_path,
            save_path,
        }
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }
}

impl RomSource for FileRomSource {
    fn load_rom(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.rom_path)
    }

    fn load_save(&mut self) -> Option<Vec<u8>> {
        match fs::read(&self.save_path) {
            Ok(data) if !data.is_empty() => {
                log::info!("Loaded save RAM from '{}'", self.save_path.display());
                Some(data)
            }
            Ok(_) => None,
            Err(err) => {
                log::debug!("No save RAM at '{}': {}", self.save_path.display(), err);
                None
            }
        }
    }

    fn store_save(&mut self, ram: &[u8]) -> io::Result<()> {
        fs::write(&self.save_path, ram)
    }
}

/// Sleeps so that frames are handed out at the DMG refresh rate.
pub struct SleepPacer {
    target_frame: Duration,
    last_frame: Instant,
}

impl Default for SleepPacer {
    fn default() -> Self {
        Self {
            // 4194304 Hz / 70224 dots per frame, about 59.73 frames per second.
            target_frame: Duration::from_nanos(16_742_706),
            last_frame: Instant::now(),
        }
    }
}

impl FramePacer for SleepPacer {
    fn frame_completed(&mut self, _frame_number: u64) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.target_frame {
            thread::sleep(self.target_frame - elapsed);
        }
        self.last_frame = Instant::now();
    }
}

pub struct RunOptions {
    pub rom_path: PathBuf,
    pub frames: u64,
    pub dump_path: Option<PathBuf>,
    pub realtime: bool,
    pub ppu_timing: PpuTiming,
}

/// Run a ROM headless for up to `frames` frames, echoing serial output.
///
/// Stops early once the serial stream contains a test ROM verdict.
pub fn run(options: RunOptions) -> Result<()> {
    let mut source = FileRomSource::new(&options.rom_path);
    let config = GameBoyConfig::builder()
        .ppu_timing(options.ppu_timing)
        .build();
    let mut gb = GameBoy::from_source(&mut source, config)
        .with_context(|| format!("Failed to start '{}'", options.rom_path.display()))?;
    if options.realtime {
        gb.set_pacer(SleepPacer::default());
    }

    let mut serial = String::new();
    for _ in 0..options.frames {
        gb.run_frame().context("Emulation stopped")?;

        let bytes = gb.take_serial_output();
        if !bytes.is_empty() {
            let text = String::from_utf8_lossy(&bytes);
            print!("{}", text);
            serial.push_str(&text);
        }
        if serial.contains(PASS_MARKER) || serial.contains(FAIL_MARKER) {
            log::info!("Test ROM finished after {} frames", gb.frame_count());
            break;
        }
    }
    println!();

    if let Some(path) = &options.dump_path {
        let frame = gb.last_frame().cloned().unwrap_or_default();
        let buffer = frame.to_rgb24();
        fs::write(path, &buffer)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        log::info!(
            "Wrote {} bytes ({}x{} rgb24) to '{}'",
            buffer.len(),
            dotboy_gb::SCREEN_WIDTH,
            dotboy_gb::SCREEN_HEIGHT,
            path.display()
        );
    }

    if gb
        .shutdown(&mut source)
        .with_context(|| format!("Failed to write '{}'", source.save_path().display()))?
    {
        log::info!("Saved battery RAM to '{}'", source.save_path().display());
    }
    Ok(())
}
