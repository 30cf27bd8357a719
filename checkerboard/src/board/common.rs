//! Small value types shared by the grid, the history and the selection state.

pub use self::{cell::Cell, moves::Move};

mod cell;
mod moves;
