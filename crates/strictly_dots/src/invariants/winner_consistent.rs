//! Winner invariant: winner flags agree with the game status.

use super::Invariant;
use crate::game::{GameState, Status};
use tracing::warn;

/// Invariant: exactly one winner flag is set when a player has won, and
/// none in any other status (draws and cancellations crown nobody).
pub struct WinnerConsistentInvariant;

impl Invariant<GameState> for WinnerConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let winners = usize::from(state.player1_status().is_winner)
            + usize::from(state.player2_status().is_winner);

        let valid = match state.status() {
            Status::WonByPlayer => winners == 1,
            _ => winners == 0,
        };
        if !valid {
            warn!(status = %state.status(), winners, "winner consistency violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Exactly one winner when won, none otherwise"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Level;
    use crate::command::Command;
    use crate::game::GameState;
    use crate::player::Player;
    use chrono::{TimeZone, Utc};

    fn created() -> GameState {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let state = GameState::empty();
        let events = state.handle(
            &Command::CreateGame {
                game_id: "game-1".to_string(),
                player1: Player::human("player1", "Alice"),
                player2: Player::human("player2", "Bob"),
                level: Level::One,
            },
            now,
        );
        state.fold(&events)
    }

    #[test]
    fn test_holds_for_fresh_game() {
        assert!(WinnerConsistentInvariant::holds(&created()));
    }

    #[test]
    fn test_premature_winner_violates() {
        let mut state = created();
        state.player2_status.is_winner = true;
        assert!(!WinnerConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_won_game_without_winner_violates() {
        let mut state = created();
        state.status = Status::WonByPlayer;
        state.current_player = None;
        assert!(!WinnerConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_two_winners_violate() {
        let mut state = created();
        state.status = Status::WonByPlayer;
        state.current_player = None;
        state.player1_status.is_winner = true;
        state.player2_status.is_winner = true;
        assert!(!WinnerConsistentInvariant::holds(&state));
    }
}
