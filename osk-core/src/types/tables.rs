use std::fmt;

use super::intern::InternTable;
use super::row::{CharQuad, RowHeader};

/// Keyboard layout identifier (KLID), e.g. `00000409`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Klid(pub u32);

impl fmt::Display for Klid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Length class of a multi-code-unit sequence, selecting which of the three
/// per-length intern tables holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiClass {
    Seq2,
    Seq3,
    Seq4,
}

impl MultiClass {
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            2 => Some(MultiClass::Seq2),
            3 => Some(MultiClass::Seq3),
            4 => Some(MultiClass::Seq4),
            _ => None,
        }
    }

    pub fn len(self) -> usize {
        match self {
            MultiClass::Seq2 => 2,
            MultiClass::Seq3 => 3,
            MultiClass::Seq4 => 4,
        }
    }

    pub const ALL: [MultiClass; 3] = [MultiClass::Seq2, MultiClass::Seq3, MultiClass::Seq4];
}

/// The five shared intern tables of a compiler run. They persist across all
/// layouts so equal values deduplicate globally.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSet {
    pub chars: InternTable<CharQuad>,
    pub seq2: InternTable<[u16; 2]>,
    pub seq3: InternTable<[u16; 3]>,
    pub seq4: InternTable<[u16; 4]>,
    pub accents: InternTable<u16>,
}

impl TableSet {
    pub fn new() -> Self {
        Self {
            chars: InternTable::with_reserved([0; 4]),
            seq2: InternTable::with_reserved([0; 2]),
            seq3: InternTable::with_reserved([0; 3]),
            seq4: InternTable::with_reserved([0; 4]),
            accents: InternTable::with_reserved(0),
        }
    }

    /// Intern a 2-4 unit sequence into the table for its length class.
    /// Returns `None` for lengths outside 2..=4.
    pub fn intern_multi(&mut self, units: &[u16]) -> Option<(MultiClass, usize)> {
        let class = MultiClass::from_len(units.len())?;
        let index = match class {
            MultiClass::Seq2 => self.seq2.intern([units[0], units[1]]),
            MultiClass::Seq3 => self.seq3.intern([units[0], units[1], units[2]]),
            MultiClass::Seq4 => self.seq4.intern([units[0], units[1], units[2], units[3]]),
        };
        Some((class, index))
    }
}

impl Default for TableSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Composition table of one accent: packed scss of the base key -> composed
/// code point. Restricted to Base/Shift with caps off; insertion-ordered,
/// re-inserting a key replaces its value. Sealed (read-only) after
/// discovery; an accent with no compositions still owns an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadKeyTable {
    accent: u16,
    entries: Vec<(u16, u16)>,
}

impl DeadKeyTable {
    pub fn new(accent: u16) -> Self {
        Self {
            accent,
            entries: Vec::new(),
        }
    }

    pub fn accent(&self) -> u16 {
        self.accent
    }

    pub fn insert(&mut self, scss: u16, composed: u16) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == scss) {
            entry.1 = composed;
        } else {
            self.entries.push((scss, composed));
        }
    }

    pub fn get(&self, scss: u16) -> Option<u16> {
        self.entries
            .iter()
            .find(|(k, _)| *k == scss)
            .map(|(_, v)| *v)
    }

    pub fn entries(&self) -> &[(u16, u16)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One emitted row: packed header plus the indices of its four quads in the
/// shared character table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledRow {
    pub header: RowHeader,
    pub chars: [u16; 4],
}

/// Association of a (scancode, state, caps) slot with an entry of one of the
/// shared multi-sequence tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiRef {
    pub scss: u16,
    pub index: u16,
}

/// A dead key of one layout: index of its accent in the shared accent table
/// plus its sealed composition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDeadKey {
    pub accent_index: u16,
    pub table: DeadKeyTable,
}

/// Everything emitted for one layout. Indices refer to the shared tables of
/// the run's `TableSet`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledLayout {
    pub klid: Klid,
    pub name: String,
    pub rows: Vec<CompiledRow>,
    pub seq2_refs: Vec<MultiRef>,
    pub seq3_refs: Vec<MultiRef>,
    pub seq4_refs: Vec<MultiRef>,
    pub dead_keys: Vec<CompiledDeadKey>,
}

impl CompiledLayout {
    pub fn new(klid: Klid, name: String) -> Self {
        Self {
            klid,
            name,
            rows: Vec::new(),
            seq2_refs: Vec::new(),
            seq3_refs: Vec::new(),
            seq4_refs: Vec::new(),
            dead_keys: Vec::new(),
        }
    }

    pub fn multi_refs(&self, class: MultiClass) -> &[MultiRef] {
        match class {
            MultiClass::Seq2 => &self.seq2_refs,
            MultiClass::Seq3 => &self.seq3_refs,
            MultiClass::Seq4 => &self.seq4_refs,
        }
    }

    pub fn push_multi_ref(&mut self, class: MultiClass, mref: MultiRef) {
        match class {
            MultiClass::Seq2 => self.seq2_refs.push(mref),
            MultiClass::Seq3 => self.seq3_refs.push(mref),
            MultiClass::Seq4 => self.seq4_refs.push(mref),
        }
    }
}

/// The full output of a compiler run: shared tables plus per-layout data.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSet {
    pub tables: TableSet,
    pub layouts: Vec<CompiledLayout>,
}

impl CompiledSet {
    pub fn new() -> Self {
        Self {
            tables: TableSet::new(),
            layouts: Vec::new(),
        }
    }

    pub fn max_rows(&self) -> usize {
        self.layouts.iter().map(|l| l.rows.len()).max().unwrap_or(0)
    }
}

impl Default for CompiledSet {
    fn default() -> Self {
        Self::new()
    }
}
