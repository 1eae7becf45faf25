pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Attempted to lock a piece into a cell that already holds a block.
///
/// The board controller collision-checks every placement before locking, so
/// seeing this error means a check was skipped upstream.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("cell {cell} is already locked")]
pub struct CellOccupiedError {
    pub cell: Cell,
}
