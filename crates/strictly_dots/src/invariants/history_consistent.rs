//! History consistency invariant: the move history, the board, and the
//! per-player move counters all agree.

use super::Invariant;
use crate::game::GameState;
use tracing::warn;

/// Invariant: history length equals occupied dots equals total moves.
///
/// Every history entry placed exactly one dot, and every move was counted
/// against exactly one player. Forfeits touch none of the three.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let history_len = state.move_history().len();
        let occupied = state
            .board()
            .dots()
            .iter()
            .filter(|dot| dot.is_occupied())
            .count();
        let total_moves = (state.player1_status().moves + state.player2_status().moves) as usize;

        let valid = history_len == occupied && history_len == total_moves;
        if !valid {
            warn!(history_len, occupied, total_moves, "history consistency violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Move history matches occupied dots and per-player move counts"
    }
}
