use super::cell::CellResult;
use super::keys::KeyId;
use super::modifiers::{pack_scss, valid_states, ShiftState, NUM_SHIFT_STATES};

/// One interned entry of the shared character table: the four (state, caps)
/// slots of a state pair.
pub type CharQuad = [u16; 4];

/// The four state pairs that make up a row, in emission order. Each pair
/// expands to one quad: (s0, caps=0), (s0, caps=1), (s1, caps=0), (s1, caps=1).
const QUAD_GROUPS: [[ShiftState; 2]; 4] = [
    [ShiftState::Base, ShiftState::Shift],
    [ShiftState::LCtrl, ShiftState::ShiftLCtrl],
    [ShiftState::AltGr, ShiftState::ShiftAltGr],
    [ShiftState::RCtrl, ShiftState::ShiftRCtrl],
];

/// Packed per-row metadata.
///
/// The encoded integer is part of the compatibility contract with the
/// renderer: scan code in the top byte, equivalence-flag nibble below it,
/// dead-key bitmap in the low 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHeader {
    pub sc: u8,
    pub equiv_flags: u8,
    pub dead_keys: u16,
}

impl RowHeader {
    /// Caps behaves like Shift over the Base/Shift pair.
    pub const CAPS_EQ_SHIFT: u8 = 1;
    /// Caps produces a genuinely third glyph (SGCAPS).
    pub const SGCAPS: u8 = 2;
    /// Caps behaves like Shift over the AltGr pair.
    pub const ALTGR_CAPS_EQ_SHIFT: u8 = 4;
    /// Caps behaves like Shift over the RCtrl pair.
    pub const RCTRL_CAPS_EQ_SHIFT: u8 = 8;

    pub fn encode(self) -> u32 {
        ((self.sc as u32) << 24) | ((self.equiv_flags as u32) << 16) | self.dead_keys as u32
    }

    pub fn decode(raw: u32) -> Self {
        Self {
            sc: (raw >> 24) as u8,
            equiv_flags: ((raw >> 16) & 0xFF) as u8,
            dead_keys: raw as u16,
        }
    }
}

/// Per-key aggregate: the resolved cell for every (state, caps) slot.
///
/// Cells are classified once, at resolution time; every derived value below
/// is a pure function of the stored cells.
#[derive(Debug, Clone)]
pub struct KeyRow {
    key: KeyId,
    cells: [[CellResult; 2]; NUM_SHIFT_STATES],
}

impl KeyRow {
    pub fn new(key: KeyId) -> Self {
        Self {
            key,
            cells: std::array::from_fn(|_| [CellResult::Empty, CellResult::Empty]),
        }
    }

    pub fn key(&self) -> KeyId {
        self.key
    }

    pub fn cell(&self, state: ShiftState, caps: bool) -> &CellResult {
        &self.cells[state as usize][caps as usize]
    }

    pub fn set_cell(&mut self, state: ShiftState, caps: bool, cell: CellResult) {
        self.cells[state as usize][caps as usize] = cell;
    }

    /// A row with no content in any valid slot is dropped, never emitted.
    pub fn is_empty(&self, has_right_ctrl: bool) -> bool {
        valid_states(has_right_ctrl)
            .iter()
            .all(|&s| self.cell(s, false).is_empty() && self.cell(s, true).is_empty())
    }

    fn caps_like_shift(&self, pair: [ShiftState; 2]) -> bool {
        let base = self.cell(pair[0], false);
        let shift = self.cell(pair[1], false);
        let caps = self.cell(pair[0], true);
        !base.is_empty()
            && !shift.is_empty()
            && base.units() != shift.units()
            && shift.units() == caps.units()
    }

    fn is_sgcaps(&self) -> bool {
        let base = self.cell(ShiftState::Base, false);
        let shift = self.cell(ShiftState::Shift, false);
        let caps = self.cell(ShiftState::Base, true);
        let shift_caps = self.cell(ShiftState::Shift, true);
        (!caps.is_empty() && caps.units() != base.units() && caps.units() != shift.units())
            || (!shift_caps.is_empty()
                && shift_caps.units() != base.units()
                && shift_caps.units() != shift.units())
    }

    /// The 4-bit equivalence nibble of the row header.
    pub fn equiv_flags(&self, has_right_ctrl: bool) -> u8 {
        let mut flags = 0;
        if self.caps_like_shift(QUAD_GROUPS[0]) {
            flags |= RowHeader::CAPS_EQ_SHIFT;
        }
        if self.is_sgcaps() {
            flags |= RowHeader::SGCAPS;
        }
        if self.caps_like_shift(QUAD_GROUPS[2]) {
            flags |= RowHeader::ALTGR_CAPS_EQ_SHIFT;
        }
        if has_right_ctrl && self.caps_like_shift(QUAD_GROUPS[3]) {
            flags |= RowHeader::RCTRL_CAPS_EQ_SHIFT;
        }
        flags
    }

    /// Dead-key bitmap: slot i of the valid (state, caps) enumeration
    /// (caps inner) contributes bit 2^i when the cell is a dead-key marker.
    /// Always 16 bits wide; 6-state layouts leave the top 4 bits zero.
    pub fn dead_key_bitmap(&self, has_right_ctrl: bool) -> u16 {
        let mut bitmap = 0u16;
        for (i, &state) in valid_states(has_right_ctrl).iter().enumerate() {
            if self.cell(state, false).is_dead() {
                bitmap |= 1 << (2 * i);
            }
            if self.cell(state, true).is_dead() {
                bitmap |= 1 << (2 * i + 1);
            }
        }
        bitmap
    }

    pub fn header(&self, has_right_ctrl: bool) -> RowHeader {
        RowHeader {
            sc: self.key.sc,
            equiv_flags: self.equiv_flags(has_right_ctrl),
            dead_keys: self.dead_key_bitmap(has_right_ctrl),
        }
    }

    /// The four character quads of the row. The RCtrl quad is all zero on
    /// layouts without a right-control key.
    pub fn quads(&self, has_right_ctrl: bool) -> [CharQuad; 4] {
        let mut quads = [[0u16; 4]; 4];
        for (g, pair) in QUAD_GROUPS.iter().enumerate() {
            if g == 3 && !has_right_ctrl {
                continue;
            }
            quads[g] = [
                self.cell(pair[0], false).quad_unit(),
                self.cell(pair[0], true).quad_unit(),
                self.cell(pair[1], false).quad_unit(),
                self.cell(pair[1], true).quad_unit(),
            ];
        }
        quads
    }

    /// Multi-sequence cells in slot enumeration order, keyed by packed scss.
    pub fn sequences(&self, has_right_ctrl: bool) -> Vec<(u16, &[u16])> {
        let mut out = Vec::new();
        for &state in valid_states(has_right_ctrl) {
            for caps in [false, true] {
                if let CellResult::Sequence(units) = self.cell(state, caps) {
                    out.push((pack_scss(self.key.sc, state, caps), units.as_slice()));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keys::Vk;

    fn row_with(cells: &[(ShiftState, bool, CellResult)]) -> KeyRow {
        let mut row = KeyRow::new(KeyId::new(Vk(0x41), 0x1E));
        for (state, caps, cell) in cells {
            row.set_cell(*state, *caps, cell.clone());
        }
        row
    }

    #[test]
    fn caps_eq_shift_requires_base_differs_from_shift() {
        // Base != Shift and Shift == caps-Base: bit fires.
        let row = row_with(&[
            (ShiftState::Base, false, CellResult::Char('a' as u16)),
            (ShiftState::Shift, false, CellResult::Char('A' as u16)),
            (ShiftState::Base, true, CellResult::Char('A' as u16)),
        ]);
        assert_eq!(row.equiv_flags(false) & RowHeader::CAPS_EQ_SHIFT, 1);

        // Base == Shift == caps-Base: no meaningful relationship.
        let row = row_with(&[
            (ShiftState::Base, false, CellResult::Char('X' as u16)),
            (ShiftState::Shift, false, CellResult::Char('X' as u16)),
            (ShiftState::Base, true, CellResult::Char('X' as u16)),
            (ShiftState::Shift, true, CellResult::Char('X' as u16)),
        ]);
        assert_eq!(row.equiv_flags(false), 0);
    }

    #[test]
    fn sgcaps_fires_on_a_third_glyph() {
        let row = row_with(&[
            (ShiftState::Base, false, CellResult::Char('a' as u16)),
            (ShiftState::Shift, false, CellResult::Char('A' as u16)),
            (ShiftState::Base, true, CellResult::Char(0x00E5)),
        ]);
        assert_ne!(row.equiv_flags(false) & RowHeader::SGCAPS, 0);
    }

    #[test]
    fn rctrl_equivalence_needs_a_right_ctrl_layout() {
        let row = row_with(&[
            (ShiftState::RCtrl, false, CellResult::Char('g' as u16)),
            (ShiftState::ShiftRCtrl, false, CellResult::Char('G' as u16)),
            (ShiftState::RCtrl, true, CellResult::Char('G' as u16)),
        ]);
        assert_eq!(row.equiv_flags(true), RowHeader::RCTRL_CAPS_EQ_SHIFT);
        assert_eq!(row.equiv_flags(false), 0);
    }

    #[test]
    fn nul_only_row_is_not_empty() {
        let row = row_with(&[(ShiftState::Base, false, CellResult::Char(0))]);
        assert!(!row.is_empty(false));
    }

    #[test]
    fn dead_key_bitmap_slot_weights() {
        // Dead at (Base, caps=0) -> bit 0; dead at (Shift, caps=1) -> bit 3.
        let row = row_with(&[
            (ShiftState::Base, false, CellResult::DeadKey(0x00B4)),
            (ShiftState::Shift, true, CellResult::DeadKey(0x00B4)),
        ]);
        assert_eq!(row.dead_key_bitmap(false), 0b1001);
        // Width is independent of the right-ctrl dimension.
        assert_eq!(row.dead_key_bitmap(true), 0b1001);
    }

    #[test]
    fn header_round_trips_through_encode() {
        let header = RowHeader {
            sc: 0x1E,
            equiv_flags: 0x5,
            dead_keys: 0x0041,
        };
        assert_eq!(header.encode(), 0x1E05_0041);
        assert_eq!(RowHeader::decode(header.encode()), header);
    }
}
