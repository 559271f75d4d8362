/// The eight logical buttons of the DMG.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
}

impl Button {
    /// Line within its group (bit 0-3 of P1) and whether the button
    /// belongs to the direction group.
    fn line(self) -> (u8, bool) {
        match self {
            Button::A => (0, false),
            Button::B => (1, false),
            Button::Select => (2, false),
            Button::Start => (3, false),
            Button::Right => (0, true),
            Button::Left => (1, true),
            Button::Up => (2, true),
            Button::Down => (3, true),
        }
    }
}

/// Joypad state behind P1 (0xFF00).
///
/// The button masks use bit=1 to mean "pressed":
/// - `actions`:    bit0=A, bit1=B, bit2=Select, bit3=Start
/// - `directions`: bit0=Right, bit1=Left, bit2=Up, bit3=Down
#[derive(Default, Clone, Debug)]
pub(crate) struct Joypad {
    actions: u8,
    directions: u8,
}

impl Joypad {
    /// Record a button change. Returns `true` when a released button
    /// became pressed, which is what raises the joypad interrupt.
    pub(crate) fn set_button(&mut self, button: Button, pressed: bool) -> bool {
        let (bit, direction) = button.line();
        let mask = 1u8 << bit;
        let group = if direction {
            &mut self.directions
        } else {
            &mut self.actions
        };
        let was_pressed = (*group & mask) != 0;
        if pressed {
            *group |= mask;
        } else {
            *group &= !mask;
        }
        pressed && !was_pressed
    }

    pub(crate) fn is_pressed(&self, button: Button) -> bool {
        let (bit, direction) = button.line();
        let group = if direction {
            self.directions
        } else {
            self.actions
        };
        (group & (1 << bit)) != 0
    }

    /// Synthesize the P1 value for the selection bits last written by
    /// the program (bit 5 low selects actions, bit 4 low selects
    /// directions). Probing neither group reads as "no keys pressed".
    pub(crate) fn register(&self, select: u8) -> u8 {
        let select = select & 0x30;
        if select == 0x30 {
            return 0xFF;
        }

        // A pressed button is observed as 0.
        let mut low = 0x0F;
        if (select & 0x10) == 0 {
            low &= !self.directions & 0x0F;
        }
        if (select & 0x20) == 0 {
            low &= !self.actions & 0x0F;
        }
        0xC0 | select | low
    }
}
