//! Events emitted by the game aggregate.
//!
//! Events are the aggregate's only output and are replayable: folding them
//! over [`GameState::empty`](crate::GameState::empty) reconstructs the
//! state they were emitted from. The serialized form tags each event with
//! a kebab-case `type` name, which is the event-log contract external
//! collaborators consume.

use crate::board::{Board, Level};
use crate::game::{Move, Status};
use crate::player::PlayerStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded state change for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    /// A game was created on a fresh board.
    GameCreated {
        /// Id of the new game.
        game_id: String,
        /// When the game was created.
        created_at: DateTime<Utc>,
        /// The generated board, all dots unowned.
        board: Board,
        /// Always in progress on creation.
        status: Status,
        /// Zeroed status for player 1.
        player1_status: PlayerStatus,
        /// Zeroed status for player 2.
        player2_status: PlayerStatus,
        /// Player 1, who moves first.
        current_player: Option<PlayerStatus>,
        /// Board size selector the game was created with.
        level: Level,
        /// Empty on creation.
        move_history: Vec<Move>,
        /// Absent on creation.
        finished_at: Option<DateTime<Utc>>,
    },
    /// A dot was claimed; scores, turn order, and possibly the game's
    /// status changed with it.
    MoveMade {
        /// Target game.
        game_id: String,
        /// Board after the placement.
        board: Board,
        /// Status after the placement.
        status: Status,
        /// Player 1 bookkeeping after the placement.
        player1_status: PlayerStatus,
        /// Player 2 bookkeeping after the placement.
        player2_status: PlayerStatus,
        /// Next player to move; absent when the move ended the game.
        current_player: Option<PlayerStatus>,
        /// Full history including this move.
        move_history: Vec<Move>,
        /// When the move was handled.
        timestamp: DateTime<Utc>,
    },
    /// The game was terminated without a winner.
    GameCanceled {
        /// Target game.
        game_id: String,
        /// The terminal canceled status.
        status: Status,
        /// Player 1 bookkeeping at cancellation.
        player1_status: PlayerStatus,
        /// Player 2 bookkeeping at cancellation.
        player2_status: PlayerStatus,
        /// Why the game was canceled.
        reason: String,
        /// When the cancellation was handled.
        timestamp: DateTime<Utc>,
    },
    /// A turn was forfeited, either voluntarily or as the penalty for an
    /// illegal move; play passes to the other player.
    MoveForfeited {
        /// Target game.
        game_id: String,
        /// Status at the time of the forfeit (unchanged by it).
        status: Status,
        /// The player whose turn it now is.
        current_player: Option<PlayerStatus>,
        /// What went wrong, or the forfeiting player's message.
        message: String,
        /// When the forfeit was handled.
        timestamp: DateTime<Utc>,
    },
    /// Completion timestamp for a game that just ended. Co-emitted with
    /// the [`Event::MoveMade`] that ended the game.
    GameFinished {
        /// Target game.
        game_id: String,
        /// When the game ended.
        finished_at: Option<DateTime<Utc>>,
    },
    /// Final standings. Co-emitted with the [`Event::MoveMade`] that ended
    /// the game; application is a no-op, the payload is for read-side
    /// consumers.
    GameResults {
        /// Target game.
        game_id: String,
        /// Terminal status.
        status: Status,
        /// Final player 1 bookkeeping, winner flag settled.
        player1_status: PlayerStatus,
        /// Final player 2 bookkeeping, winner flag settled.
        player2_status: PlayerStatus,
        /// When the game ended.
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    /// The id of the game this event belongs to.
    pub fn game_id(&self) -> &str {
        match self {
            Event::GameCreated { game_id, .. }
            | Event::MoveMade { game_id, .. }
            | Event::GameCanceled { game_id, .. }
            | Event::MoveForfeited { game_id, .. }
            | Event::GameFinished { game_id, .. }
            | Event::GameResults { game_id, .. } => game_id,
        }
    }
}
