pub mod cell;
pub mod intern;
pub mod keys;
pub mod modifiers;
pub mod row;
pub mod tables;

pub use cell::*;
pub use intern::*;
pub use keys::*;
pub use modifiers::*;
pub use row::*;
pub use tables::*;
