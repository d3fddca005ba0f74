/// Modifier state of a key press, a bitmask over Shift, left Ctrl, Menu
/// (right Alt) and right Ctrl.
///
/// `Menu` and `ShiftMenu` carry no character data on any modeled layout and
/// are never enumerated; AltGr is always `Menu | LCtrl`. The `RCtrl` pair is
/// only meaningful on layouts that define a distinct right-control key.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShiftState {
    Base = 0,
    Shift = 1,
    LCtrl = 2,
    ShiftLCtrl = 3,
    Menu = 4,
    ShiftMenu = 5,
    AltGr = 6,
    ShiftAltGr = 7,
    RCtrl = 8,
    ShiftRCtrl = 9,
}

/// Number of shift-state slots a row carries, including the two unused
/// Menu-only slots.
pub const NUM_SHIFT_STATES: usize = 10;

const STATES_BASE: [ShiftState; 6] = [
    ShiftState::Base,
    ShiftState::Shift,
    ShiftState::LCtrl,
    ShiftState::ShiftLCtrl,
    ShiftState::AltGr,
    ShiftState::ShiftAltGr,
];

const STATES_RCTRL: [ShiftState; 8] = [
    ShiftState::Base,
    ShiftState::Shift,
    ShiftState::LCtrl,
    ShiftState::ShiftLCtrl,
    ShiftState::AltGr,
    ShiftState::ShiftAltGr,
    ShiftState::RCtrl,
    ShiftState::ShiftRCtrl,
];

/// Valid modifier states in enumeration order. Layouts without a distinct
/// right-control key enumerate 6 states, full layouts 8. `Menu` and
/// `ShiftMenu` are never returned.
pub fn valid_states(has_right_ctrl: bool) -> &'static [ShiftState] {
    if has_right_ctrl {
        &STATES_RCTRL
    } else {
        &STATES_BASE
    }
}

impl ShiftState {
    pub const SHIFT_BIT: u8 = 1;
    pub const LCTRL_BIT: u8 = 2;
    pub const MENU_BIT: u8 = 4;
    pub const RCTRL_BIT: u8 = 8;

    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(ShiftState::Base),
            1 => Some(ShiftState::Shift),
            2 => Some(ShiftState::LCtrl),
            3 => Some(ShiftState::ShiftLCtrl),
            4 => Some(ShiftState::Menu),
            5 => Some(ShiftState::ShiftMenu),
            6 => Some(ShiftState::AltGr),
            7 => Some(ShiftState::ShiftAltGr),
            8 => Some(ShiftState::RCtrl),
            9 => Some(ShiftState::ShiftRCtrl),
            _ => None,
        }
    }

    pub fn has_shift(self) -> bool {
        self.bits() & Self::SHIFT_BIT != 0
    }

    pub fn has_lctrl(self) -> bool {
        self.bits() & Self::LCTRL_BIT != 0
    }

    pub fn has_menu(self) -> bool {
        self.bits() & Self::MENU_BIT != 0
    }

    pub fn has_rctrl(self) -> bool {
        self.bits() & Self::RCTRL_BIT != 0
    }

    /// LCtrl without Menu: the two states where the platform resolver
    /// synthesizes control characters for letter keys.
    pub fn is_lctrl_class(self) -> bool {
        matches!(self, ShiftState::LCtrl | ShiftState::ShiftLCtrl)
    }
}

/// Packed (scancode, state, caps) association key used by the multi-sequence
/// and dead-key tables: `sc << 8 | state << 4 | caps`.
pub fn pack_scss(sc: u8, state: ShiftState, caps: bool) -> u16 {
    ((sc as u16) << 8) | ((state as u16) << 4) | (caps as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_only_states_are_never_enumerated() {
        for &hrc in &[false, true] {
            let states = valid_states(hrc);
            assert!(!states.contains(&ShiftState::Menu));
            assert!(!states.contains(&ShiftState::ShiftMenu));
        }
    }

    #[test]
    fn enumeration_order_and_width() {
        let base = valid_states(false);
        assert_eq!(base.len(), 6);
        assert_eq!(base[0], ShiftState::Base);
        assert_eq!(base[5], ShiftState::ShiftAltGr);

        let full = valid_states(true);
        assert_eq!(full.len(), 8);
        assert_eq!(&full[..6], base);
        assert_eq!(full[6], ShiftState::RCtrl);
        assert_eq!(full[7], ShiftState::ShiftRCtrl);
    }

    #[test]
    fn scss_packing() {
        assert_eq!(pack_scss(0x1E, ShiftState::Base, false), 0x1E00);
        assert_eq!(pack_scss(0x1E, ShiftState::Shift, true), 0x1E11);
        assert_eq!(pack_scss(0x02, ShiftState::ShiftRCtrl, false), 0x0290);
    }
}
