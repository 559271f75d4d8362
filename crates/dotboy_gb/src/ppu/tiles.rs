//! Tile addressing shared by the background fetcher and the sprite fetch.

use crate::registers::Lcdc;

pub(crate) const TILE_MAP_LOW: u16 = 0x9800;
pub(crate) const TILE_MAP_HIGH: u16 = 0x9C00;

/// Bytes per tile: 8 rows of two bit-planes.
const TILE_BYTES: u16 = 16;

/// Address of the low bit-plane of `row` in a background/window tile.
///
/// LCDC bit 4 picks between unsigned indexing from 0x8000 and signed
/// indexing around 0x9000.
#[inline]
pub(crate) fn bg_tile_row_address(lcdc: Lcdc, tile: u8, row: u8) -> u16 {
    let row_offset = (row as u16 & 0x07) * 2;
    if lcdc.contains(Lcdc::TILE_DATA_UNSIGNED) {
        0x8000 + tile as u16 * TILE_BYTES + row_offset
    } else {
        let offset = (tile as i8 as i16 * TILE_BYTES as i16) as u16;
        0x9000u16.wrapping_add(offset) + row_offset
    }
}

/// Objects always use unsigned indexing. `row` may run to 15 for 8x16
/// objects, which continues into the next tile.
#[inline]
pub(crate) fn object_tile_row_address(tile: u8, row: u8) -> u16 {
    0x8000 + tile as u16 * TILE_BYTES + (row as u16 & 0x0F) * 2
}

/// Tile map address for a tile column/row in the 32x32 map at `base`.
#[inline]
pub(crate) fn tile_map_address(base: u16, column: u8, row: u8) -> u16 {
    base + (row as u16 & 0x1F) * 32 + (column as u16 & 0x1F)
}

/// Combine two bit-planes into eight colour indices, leftmost pixel
/// first (bit 7).
#[inline]
pub(crate) fn decode_row(low: u8, high: u8) -> [u8; 8] {
    let mut colors = [0u8; 8];
    for (i, color) in colors.iter_mut().enumerate() {
        let bit = 7 - i;
        *color = ((high >> bit) & 1) << 1 | ((low >> bit) & 1);
    }
    colors
}
