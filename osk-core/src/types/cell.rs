/// Non-breaking space, normalized to an ordinary space before encoding.
pub const NBSP: u16 = 160;
/// Ordinary space.
pub const SPACE_CP: u16 = 32;
/// Zero-width and direction formatting marks (ZWSP..RLM), never encoded.
pub const FORMAT_MARK_FIRST: u16 = 8203;
pub const FORMAT_MARK_LAST: u16 = 8207;

/// What one key produces under one (state, caps) slot.
///
/// `Char(0)` is an intentional literal NUL assignment and is distinct from
/// `Empty`: a row whose only content is a NUL is still emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellResult {
    Empty,
    Char(u16),
    /// 2-4 code units, stored in the per-length multi tables.
    Sequence(Vec<u16>),
    /// Dead key; the payload is the accent code point.
    DeadKey(u16),
}

impl CellResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellResult::Empty)
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, CellResult::DeadKey(_))
    }

    /// Code units the cell produces, as compared by the row equivalence
    /// flags. A dead-key cell compares as its accent character.
    pub fn units(&self) -> &[u16] {
        match self {
            CellResult::Empty => &[],
            CellResult::Char(c) => std::slice::from_ref(c),
            CellResult::Sequence(s) => s,
            CellResult::DeadKey(a) => std::slice::from_ref(a),
        }
    }

    /// Value stored in the row's 4-character quad slot: the code point for
    /// single characters and accents, a negative-length sentinel for
    /// multi-sequences, zero for empty cells.
    pub fn quad_unit(&self) -> u16 {
        match self {
            CellResult::Empty => 0,
            CellResult::Char(c) => *c,
            CellResult::DeadKey(a) => *a,
            CellResult::Sequence(s) => (-(s.len() as i16)) as u16,
        }
    }
}
