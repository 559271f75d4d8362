use dotboy_common::Color;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// A finished picture: 144 rows of 160 shades (0 = lightest, 3 = darkest)
/// already resolved through the palette registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<[u8; SCREEN_WIDTH]>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            rows: vec![[0; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }
}

impl Frame {
    /// Lines the PPU never reached (LCD switched on mid-frame) stay at
    /// shade 0.
    pub(crate) fn from_rows(mut rows: Vec<[u8; SCREEN_WIDTH]>) -> Self {
        rows.resize(SCREEN_HEIGHT, [0; SCREEN_WIDTH]);
        Self { rows }
    }

    pub fn rows(&self) -> &[[u8; SCREEN_WIDTH]] {
        &self.rows
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.rows[y][x]
    }

    /// Row-major shades.
    pub fn shades(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Convert to packed RGB24 with the DMG grayscale ramp.
    pub fn to_rgb24(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT * 3);
        for shade in self.shades() {
            let (r, g, b) = Color::from_dmg_shade(shade).rgb();
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}
