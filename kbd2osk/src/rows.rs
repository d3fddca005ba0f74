use osk_core::{
    valid_states, CellResult, KeyId, KeyRow, ShiftState, Vk, FORMAT_MARK_FIRST, FORMAT_MARK_LAST,
    NBSP, SPACE_CP,
};

use crate::compiler::CompileError;
use crate::resolver::{flush_buffer, CharacterResolver, LayoutDesc, Resolved};

/// A dead key sighted while building rows, carrying the slot it was found
/// at so discovery can replay it. Deduplicated by accent within a layout.
#[derive(Debug, Clone, Copy)]
pub struct PendingDeadKey {
    pub accent: u16,
    pub key: KeyId,
    pub state: ShiftState,
    pub caps: bool,
}

/// Output of the row-resolution phase: one row per key (in input order),
/// plus the accents queued for composition discovery.
pub struct ResolvedRows {
    pub rows: Vec<KeyRow>,
    pub pending_accents: Vec<PendingDeadKey>,
}

/// Resolve every key of the layout across all valid (state, caps) slots.
/// The composition buffer is flushed before each probe so no stale state
/// leaks between slots.
pub fn build_rows<R: CharacterResolver + ?Sized>(
    desc: &LayoutDesc,
    resolver: &mut R,
) -> Result<ResolvedRows, CompileError> {
    let states = valid_states(desc.has_right_ctrl);
    let mut rows = Vec::with_capacity(desc.keys.len());
    let mut pending: Vec<PendingDeadKey> = Vec::new();

    for &key in &desc.keys {
        let mut row = KeyRow::new(key);
        for &state in states {
            for caps in [false, true] {
                flush_buffer(resolver, desc.flush_key)?;
                let cell = match resolver.resolve(key, state, caps) {
                    Resolved::None => CellResult::Empty,
                    Resolved::Dead(accent) => {
                        // Flush immediately so the accent does not leak
                        // into the next probe.
                        flush_buffer(resolver, desc.flush_key)?;
                        if !pending.iter().any(|p| p.accent == accent) {
                            pending.push(PendingDeadKey {
                                accent,
                                key,
                                state,
                                caps,
                            });
                        }
                        CellResult::DeadKey(accent)
                    }
                    Resolved::Text(units) => classify_text(key, state, units),
                };
                row.set_cell(state, caps, cell);
            }
        }
        rows.push(row);
    }

    Ok(ResolvedRows {
        rows,
        pending_accents: pending,
    })
}

fn classify_text(key: KeyId, state: ShiftState, units: Vec<u16>) -> CellResult {
    match units.len() {
        // Someone assigned a literal NUL to the key; keep it.
        0 => CellResult::Char(0),
        1 => {
            let mut c = units[0];
            if c == NBSP {
                c = SPACE_CP;
            }
            let ctrl_char = state.is_lctrl_class() && c < 0x20;
            let format_mark = (FORMAT_MARK_FIRST..=FORMAT_MARK_LAST).contains(&c);
            let space_extended = key.vk == Vk::SPACE && state > ShiftState::Shift;
            if ctrl_char || format_mark || space_extended {
                CellResult::Empty
            } else {
                CellResult::Char(c)
            }
        }
        2..=4 => CellResult::Sequence(units),
        n => {
            log::debug!(
                "ignoring malformed {}-unit output for vk {:#04x} under {:?}",
                n,
                key.vk.0,
                state
            );
            CellResult::Empty
        }
    }
}
