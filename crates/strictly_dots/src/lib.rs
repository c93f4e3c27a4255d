//! Strictly Dots - rules engine for the two-player dot game.
//!
//! Players alternately claim unoccupied dots on a square board; a claim
//! can score by completing lines in four directions or by clustering
//! around the placed dot. First to the board's winning score wins; a full
//! board with nobody there is a draw.
//!
//! # Architecture
//!
//! - **Board**: levels, letter/number addressing, immutable dot placement
//! - **Scoring**: line and cluster detection over a board snapshot
//! - **Game**: the aggregate — commands in, events out, pure folds back
//! - **Invariants**: checkable system guarantees, asserted in debug builds
//!
//! The engine is deliberately inert: it never touches storage, transport,
//! or a clock. Callers hand it commands with a timestamp and persist the
//! events it returns.
//!
//! # Example
//!
//! ```
//! use strictly_dots::{Command, GameState, Level, Player};
//!
//! let state = GameState::empty();
//! let command = Command::CreateGame {
//!     game_id: "game-1".to_string(),
//!     player1: Player::human("alice", "Alice"),
//!     player2: Player::agent("bob", "Bob", "some-model"),
//!     level: Level::One,
//! };
//!
//! let events = state.handle(&command, chrono::Utc::now());
//! let state = state.fold(&events);
//! assert_eq!(state.board().dots().len(), 25);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod command;
mod event;
mod game;
mod invariants;
mod player;
mod scoring;

// Crate-level exports - Board model
pub use board::{Board, Dot, Level};

// Crate-level exports - Command/event contract
pub use command::Command;
pub use event::Event;

// Crate-level exports - Game aggregate
pub use game::{GameState, Move, Status};

// Crate-level exports - Invariants
pub use invariants::{
    CurrentPlayerInvariant, DotGameInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, WinnerConsistentInvariant,
};

// Crate-level exports - Players
pub use player::{Player, PlayerStatus, PlayerType};

// Crate-level exports - Scoring
pub use scoring::{ScoringMove, ScoringMoveKind};
