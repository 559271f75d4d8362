/// Logical keys a front end can forward to an emulator core.
///
/// Keyboard-style names are used so that hosts can map physical keys
/// directly; each core decides which of these it listens to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Z,
    X,
    A,
    S,
    Enter,
    Backspace,
    Escape,
}
