use osk_core::{pack_scss, valid_states, DeadKeyTable, ShiftState};

use crate::compiler::CompileError;
use crate::resolver::{flush_buffer, prime_dead_key, CharacterResolver, LayoutDesc, Resolved};
use crate::rows::PendingDeadKey;

/// Drop compositions where the base character maps to a control character
/// under a LCtrl-class state. The platform resolver synthesizes control
/// characters for letter keys and loses dead-key state for some of these
/// combinations, so they are resolver artifacts rather than compositions.
/// Policy constant: revisit per target resolver platform.
pub const CTRL_ELISION: bool = true;

/// Discover the composition table of one accent.
///
/// For every key of the layout and every valid (state, caps) slot: prime
/// the accent, probe the key, and interpret the outcome. Only Base/Shift
/// slots with caps off are recorded, although all slots are probed. The
/// returned table is sealed by the caller and may be empty.
pub fn discover<R: CharacterResolver + ?Sized>(
    resolver: &mut R,
    desc: &LayoutDesc,
    pending: &PendingDeadKey,
) -> Result<DeadKeyTable, CompileError> {
    let mut table = DeadKeyTable::new(pending.accent);
    let states = valid_states(desc.has_right_ctrl);

    for &key in &desc.keys {
        for &state in states {
            for caps in [false, true] {
                prime_dead_key(resolver, pending.key, pending.state, pending.caps)?;
                match resolver.resolve(key, state, caps) {
                    Resolved::Text(units) if units.len() == 1 => {
                        let composed = units[0];
                        if composed == pending.accent {
                            // Composition echoed the accent; nothing was
                            // composed. Release the buffer and move on.
                            flush_buffer(resolver, desc.flush_key)?;
                            continue;
                        }
                        // The buffer is consumed now, so the same probe
                        // yields the plain base mapping.
                        let base = match resolver.resolve(key, state, caps) {
                            Resolved::Text(u) if u.len() == 1 => u[0],
                            _ => continue,
                        };
                        if (CTRL_ELISION && state.is_lctrl_class() && base < 0x20)
                            || base == composed
                        {
                            continue;
                        }
                        if !caps && (state == ShiftState::Base || state == ShiftState::Shift) {
                            table.insert(pack_scss(key.sc, state, caps), composed);
                        }
                    }
                    // Length 0 or 2+: not a legal composition.
                    Resolved::Text(_) => {}
                    // Nested dead key: flush and move on.
                    Resolved::Dead(_) => {
                        flush_buffer(resolver, desc.flush_key)?;
                    }
                    Resolved::None => {}
                }
            }
        }
    }

    Ok(table)
}
