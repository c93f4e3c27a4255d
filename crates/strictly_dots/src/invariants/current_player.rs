//! Current-player invariant: the turn pointer exists exactly when the
//! game is in progress, and always names one of the two players.

use super::Invariant;
use crate::game::{GameState, Status};
use tracing::warn;

/// Invariant: an in-progress game has exactly one current player, drawn
/// from the game's two player slots; any other status has none.
pub struct CurrentPlayerInvariant;

impl Invariant<GameState> for CurrentPlayerInvariant {
    fn holds(state: &GameState) -> bool {
        let valid = match state.status() {
            Status::InProgress => state.current_player().is_some_and(|current| {
                current.player.id == state.player1_status().player.id
                    || current.player.id == state.player2_status().player.id
            }),
            _ => state.current_player().is_none(),
        };
        if !valid {
            warn!(status = %state.status(), "current player consistency violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Exactly one known player is current while in progress, none otherwise"
    }
}
