/// Windows-style virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vk(pub u8);

impl Vk {
    pub const CANCEL: Vk = Vk(0x03);
    pub const BACK: Vk = Vk(0x08);
    pub const TAB: Vk = Vk(0x09);
    pub const RETURN: Vk = Vk(0x0D);
    pub const ESCAPE: Vk = Vk(0x1B);
    pub const SPACE: Vk = Vk(0x20);
    pub const NUMPAD0: Vk = Vk(0x60);
    pub const NUMPAD9: Vk = Vk(0x69);
    pub const MULTIPLY: Vk = Vk(0x6A);
    pub const ADD: Vk = Vk(0x6B);
    pub const SEPARATOR: Vk = Vk(0x6C);
    pub const SUBTRACT: Vk = Vk(0x6D);
    pub const DECIMAL: Vk = Vk(0x6E);
    pub const DIVIDE: Vk = Vk(0x6F);

    /// Whether this key may ever be emitted as a renderable row. Editing
    /// controls and the numeric-keypad block are probed (they matter as
    /// composition candidates and as the flush key) but never emitted.
    pub fn is_renderable(self) -> bool {
        match self.0 {
            0x03 | 0x08 | 0x09 | 0x0D | 0x1B => false,
            0x60..=0x6F => false,
            _ => true,
        }
    }
}

/// Identity of one physical key: virtual-key code plus scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId {
    pub vk: Vk,
    pub sc: u8,
}

impl KeyId {
    pub fn new(vk: Vk, sc: u8) -> Self {
        Self { vk, sc }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypad_and_control_keys_are_not_renderable() {
        assert!(!Vk::BACK.is_renderable());
        assert!(!Vk::RETURN.is_renderable());
        assert!(!Vk::CANCEL.is_renderable());
        assert!(!Vk::DECIMAL.is_renderable());
        assert!(!Vk::NUMPAD0.is_renderable());
        assert!(!Vk::DIVIDE.is_renderable());
        assert!(Vk::SPACE.is_renderable());
        assert!(Vk(0x41).is_renderable());
        assert!(Vk(0xDB).is_renderable());
    }
}
