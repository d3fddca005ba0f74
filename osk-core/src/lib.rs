pub mod types;
pub mod osk;

pub use types::*;

// Re-export commonly used types
pub use types::cell::CellResult;
pub use types::intern::InternTable;
pub use types::keys::{KeyId, Vk};
pub use types::modifiers::{pack_scss, valid_states, ShiftState};
pub use types::row::{CharQuad, KeyRow, RowHeader};
pub use types::tables::{
    CompiledDeadKey, CompiledLayout, CompiledRow, CompiledSet, DeadKeyTable, Klid, MultiClass,
    MultiRef, TableSet,
};
pub use osk::{OskError, OskLoader};
