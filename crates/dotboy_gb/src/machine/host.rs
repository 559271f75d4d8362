//! Collaborators supplied by the host application.

use std::io;

/// Where cartridge ROM and battery-backed save RAM come from and go to.
pub trait RomSource {
    fn load_rom(&mut self) -> io::Result<Vec<u8>>;

    /// Previously stored save RAM. A missing or empty save is `None`, not
    /// an error.
    fn load_save(&mut self) -> Option<Vec<u8>>;

    fn store_save(&mut self, ram: &[u8]) -> io::Result<()>;
}

/// Consulted after every completed frame, e.g. to sleep until the next
/// frame is due.
pub trait FramePacer {
    fn frame_completed(&mut self, frame_number: u64);
}
