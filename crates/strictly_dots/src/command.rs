//! Commands accepted by the game aggregate.
//!
//! Commands are first-class domain values: they carry a player's intent,
//! serialize for transport, and are safe to redeliver — a stale or
//! out-of-turn command folds to zero events instead of corrupting state.

use crate::board::Level;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// A request to change one game's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    /// Starts a game on a fresh board.
    CreateGame {
        /// Id the new game will carry.
        game_id: String,
        /// First player slot; moves first.
        player1: Player,
        /// Second player slot.
        player2: Player,
        /// Board size selector.
        level: Level,
    },
    /// Claims a dot for the sending player.
    MakeMove {
        /// Target game.
        game_id: String,
        /// Player claiming the dot.
        player_id: String,
        /// Address of the dot to claim.
        dot_id: String,
    },
    /// Voluntarily passes the sender's turn.
    ForfeitMove {
        /// Target game.
        game_id: String,
        /// Player passing the turn.
        player_id: String,
        /// Reason recorded with the forfeit.
        message: String,
    },
    /// Terminates an in-progress game without a winner.
    CancelGame {
        /// Target game.
        game_id: String,
        /// Why the game was canceled.
        reason: String,
    },
}
