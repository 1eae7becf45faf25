//! Game control logic on top of the core data structures.
//!
//! - [`Game`] - the board controller: owns the grid and the current/next
//!   piece, routes commands, runs gravity, locks pieces, clears lines, and
//!   keeps score.
//! - [`PieceFactory`] - the stream of upcoming pieces.
//! - [`GameEvent`] - notifications (lock, clear, rotate, ...) for audio and
//!   render collaborators.
//!
//! # Game flow
//!
//! 1. [`Game::reset`] clears the board and spawns the first two pieces.
//! 2. The shell maps input to [`Command`]s and feeds them to [`Game::apply`].
//! 3. The shell calls [`Game::tick`] once per frame with the elapsed time;
//!    gravity moves the falling piece and eventually locks it.
//! 4. Locking clears complete rows, updates score and level, and promotes
//!    the next piece - or ends the game when the stack breaches the top.
//!
//! The controller never reads a clock and performs no I/O, so a game can run
//! headlessly: drive it with synthetic ticks and ignore the events.

pub use self::{factory::*, game::*};

mod factory;
mod game;
