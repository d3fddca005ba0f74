use osk_core::{KeyId, Klid, ShiftState};

use crate::compiler::CompileError;

/// Result of one character-resolution probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The key produces nothing under this state.
    None,
    /// Produced code units. An empty vector means the layout assigns a
    /// literal NUL to the key, which is distinct from `None`.
    Text(Vec<u16>),
    /// Dead key: the accent code point is now pending in the resolver's
    /// composition buffer.
    Dead(u16),
}

/// The platform character-resolution service.
///
/// Implementations carry a single global composition buffer (a simulation of
/// the physical typing buffer), which is why layouts are compiled strictly
/// one at a time. The buffer is manipulated only through [`flush_buffer`]
/// and [`prime_dead_key`].
pub trait CharacterResolver {
    fn resolve(&mut self, key: KeyId, state: ShiftState, caps: bool) -> Resolved;
}

/// Bound on the flush and prime loops. The hosting platform guarantees both
/// terminate; exceeding the bound is a resolver contract violation, fatal
/// for the current layout.
pub const MAX_FLUSH_ATTEMPTS: usize = 16;

/// Drain the composition buffer: press the flush key (keypad decimal) under
/// the neutral state until the resolver no longer reports a dead key.
pub fn flush_buffer<R: CharacterResolver + ?Sized>(
    resolver: &mut R,
    flush_key: KeyId,
) -> Result<(), CompileError> {
    for _ in 0..MAX_FLUSH_ATTEMPTS {
        match resolver.resolve(flush_key, ShiftState::Base, false) {
            Resolved::Dead(_) => continue,
            _ => return Ok(()),
        }
    }
    Err(CompileError::ResolverProtocol(MAX_FLUSH_ATTEMPTS))
}

/// Replay a known dead key until the resolver signals dead again, leaving
/// the accent primed deterministically in the composition buffer. A probe
/// that produced output instead means the buffer held stale state, which the
/// replay consumes.
pub fn prime_dead_key<R: CharacterResolver + ?Sized>(
    resolver: &mut R,
    key: KeyId,
    state: ShiftState,
    caps: bool,
) -> Result<(), CompileError> {
    for _ in 0..MAX_FLUSH_ATTEMPTS {
        if matches!(resolver.resolve(key, state, caps), Resolved::Dead(_)) {
            return Ok(());
        }
    }
    Err(CompileError::ResolverProtocol(MAX_FLUSH_ATTEMPTS))
}

/// One layout to compile: identity plus the probe-relevant key set.
/// Enumeration of installed layouts and right-control discovery happen
/// upstream; the compiler only consumes the result.
#[derive(Debug, Clone)]
pub struct LayoutDesc {
    pub klid: Klid,
    pub name: String,
    /// Whether the layout defines a distinct right-control key.
    pub has_right_ctrl: bool,
    /// Every key of the layout in ascending key order, renderable or not.
    pub keys: Vec<KeyId>,
    /// Key used to drain the composition buffer (keypad decimal).
    pub flush_key: KeyId,
}
