//! Players and per-game player bookkeeping.

use crate::scoring::ScoringMove;
use serde::{Deserialize, Serialize};

/// Kind of participant controlling a player slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// Human player.
    #[display("human")]
    Human,
    /// Automated agent player.
    #[display("agent")]
    Agent,
}

/// A player identity. Created outside the engine; the engine only ever
/// matches on the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player id.
    pub id: String,
    /// Kind of participant.
    pub player_type: PlayerType,
    /// Display name.
    pub name: String,
    /// Model tag, present for agent players.
    pub model: Option<String>,
}

impl Player {
    /// Creates a human player.
    pub fn human(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            player_type: PlayerType::Human,
            name: name.into(),
            model: None,
        }
    }

    /// Creates an agent player backed by the given model.
    pub fn agent(id: impl Into<String>, name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            player_type: PlayerType::Agent,
            name: name.into(),
            model: Some(model.into()),
        }
    }

    /// Placeholder identity for the slots of a game that has not been
    /// created yet.
    pub(crate) fn unassigned() -> Self {
        Self {
            id: String::new(),
            player_type: PlayerType::Human,
            name: String::new(),
            model: None,
        }
    }

    /// True for agent players.
    pub fn is_agent(&self) -> bool {
        self.player_type == PlayerType::Agent
    }

    /// True for human players.
    pub fn is_human(&self) -> bool {
        self.player_type == PlayerType::Human
    }
}

/// Per-game bookkeeping for one player slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// The player this status tracks.
    pub player: Player,
    /// Moves made so far.
    pub moves: u32,
    /// Cumulative score.
    pub score: u32,
    /// Set when the game ends with this player as the winner.
    pub is_winner: bool,
    /// Patterns this player has scored, in the order they were earned.
    pub scoring_moves: Vec<ScoringMove>,
}

impl PlayerStatus {
    /// Fresh status for a player entering a game.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            moves: 0,
            score: 0,
            is_winner: false,
            scoring_moves: Vec::new(),
        }
    }

    /// Counts one more move.
    pub(crate) fn with_move(mut self) -> Self {
        self.moves += 1;
        self
    }

    /// Adds points to the cumulative score.
    pub(crate) fn with_points(mut self, points: u32) -> Self {
        self.score += points;
        self
    }

    /// Appends the patterns a placement scored.
    pub(crate) fn with_scoring_moves(mut self, mut scoring_moves: Vec<ScoringMove>) -> Self {
        self.scoring_moves.append(&mut scoring_moves);
        self
    }

    /// Marks this player the winner.
    pub(crate) fn as_winner(mut self) -> Self {
        self.is_winner = true;
        self
    }

    /// Clears the winner flag.
    pub(crate) fn as_loser(mut self) -> Self {
        self.is_winner = false;
        self
    }
}
