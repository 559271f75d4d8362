pub mod key;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::new_rgb(0xAA, 0xAA, 0xAA);
    pub const DARK_GRAY: Color = Color::new_rgb(0x55, 0x55, 0x55);

    /// Grayscale ramp for the four DMG shades, indexed by the value a
    /// palette register resolves a colour index to (0 = lightest).
    pub const DMG_SHADES: [Color; 4] = [
        Color::WHITE,
        Color::LIGHT_GRAY,
        Color::DARK_GRAY,
        Color::BLACK,
    ];

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    /// Map a resolved DMG shade (only the low two bits are used).
    #[inline]
    pub const fn from_dmg_shade(shade: u8) -> Color {
        Color::DMG_SHADES[(shade & 0x03) as usize]
    }

    #[inline]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn dmg_shades_go_from_light_to_dark() {
        assert_eq!(Color::from_dmg_shade(0), Color::WHITE);
        assert_eq!(Color::from_dmg_shade(3), Color::BLACK);
        // Upper bits are ignored.
        assert_eq!(Color::from_dmg_shade(0x05), Color::LIGHT_GRAY);
    }
}
