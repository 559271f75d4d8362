use std::collections::VecDeque;

use crate::registers::{BGP, OBP0, OBP1};

/// Palette register a pixel resolves through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Palette {
    #[default]
    Background,
    Object0,
    Object1,
}

impl Palette {
    pub(crate) fn register(self) -> u16 {
        match self {
            Palette::Background => BGP,
            Palette::Object0 => OBP0,
            Palette::Object1 => OBP1,
        }
    }
}

/// One pixel waiting in a queue. `color` is the 2-bit index from tile
/// data; the displayed shade is only looked up when the pixel leaves the
/// queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pixel {
    pub color: u8,
    pub palette: Palette,
    /// Object is drawn behind background colours 1-3.
    pub bg_priority: bool,
}

impl Pixel {
    pub(crate) const TRANSPARENT: Pixel = Pixel {
        color: 0,
        palette: Palette::Object0,
        bg_priority: false,
    };

    pub(crate) fn background(color: u8) -> Self {
        Pixel {
            color,
            palette: Palette::Background,
            bg_priority: false,
        }
    }

    /// Shade after mapping the colour index through `palette_value`.
    #[inline]
    pub(crate) fn shade(self, palette_value: u8) -> u8 {
        (palette_value >> (self.color * 2)) & 0x03
    }
}

/// FIFO of pixels, appended at the tail and popped from the head.
#[derive(Clone, Debug, Default)]
pub(crate) struct PixelQueue {
    pixels: VecDeque<Pixel>,
}

impl PixelQueue {
    pub(crate) fn new() -> Self {
        Self {
            pixels: VecDeque::with_capacity(16),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.pixels.clear();
    }

    #[inline]
    pub(crate) fn push(&mut self, pixel: Pixel) {
        self.pixels.push_back(pixel);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<Pixel> {
        self.pixels.pop_front()
    }

    /// Overlay `pixels` starting at the head of the queue. An occupied
    /// slot keeps its pixel unless that pixel is transparent, so objects
    /// merged earlier stay on top.
    pub(crate) fn merge_objects(&mut self, pixels: impl IntoIterator<Item = Pixel>) {
        for (slot, pixel) in pixels.into_iter().enumerate() {
            match self.pixels.get_mut(slot) {
                Some(existing) if existing.color == 0 => *existing = pixel,
                Some(_) => {}
                None => self.pixels.push_back(pixel),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(color: u8) -> Pixel {
        Pixel {
            color,
            palette: Palette::Object1,
            bg_priority: false,
        }
    }

    #[test]
    fn merge_keeps_earlier_opaque_pixels() {
        let mut queue = PixelQueue::new();
        queue.merge_objects([object(1), Pixel::TRANSPARENT, object(2)]);
        queue.merge_objects([object(3), object(3), object(3), object(3)]);

        let colors: Vec<u8> = std::iter::from_fn(|| queue.pop()).map(|p| p.color).collect();
        assert_eq!(colors, vec![1, 3, 2, 3]);
    }

    #[test]
    fn shade_uses_two_bits_per_colour() {
        // 0b11_10_01_00: identity mapping.
        assert_eq!(object(2).shade(0xE4), 2);
        assert_eq!(Pixel::background(0).shade(0xFC), 0);
        assert_eq!(Pixel::background(3).shade(0x3F), 0);
    }
}
