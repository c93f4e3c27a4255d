//! Scoring engine: evaluates a just-placed dot against a board snapshot.
//!
//! Scoring is a pure function of the final board state and the placed
//! address. It never looks at move order, so any historical snapshot can
//! re-explain why a move earned its points.

use crate::board::{Board, Coordinates, Direction};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Pattern family a scoring move belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMoveKind {
    /// Line along the letter axis, column fixed (A3, B3, C3).
    #[display("horizontal")]
    Horizontal,
    /// Line along the number axis, row letter fixed (C1, C2, C3).
    #[display("vertical")]
    Vertical,
    /// Line along either diagonal.
    #[display("diagonal")]
    Diagonal,
    /// Moore-neighborhood cluster around the placed dot.
    #[display("adjacent")]
    Adjacent,
}

/// One scored pattern produced by a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringMove {
    /// Address of the placed dot that triggered the pattern.
    pub dot_id: String,
    /// Pattern family.
    pub kind: ScoringMoveKind,
    /// Points the pattern contributes.
    pub score: u32,
    /// Addresses participating in the pattern.
    pub dots: Vec<String>,
}

/// The four line directions, in detection order.
const LINE_DIRECTIONS: [(Direction, ScoringMoveKind); 4] = [
    (Direction::HORIZONTAL, ScoringMoveKind::Horizontal),
    (Direction::VERTICAL, ScoringMoveKind::Vertical),
    (Direction::DIAGONAL_DOWN_RIGHT, ScoringMoveKind::Diagonal),
    (Direction::DIAGONAL_UP_RIGHT, ScoringMoveKind::Diagonal),
];

impl Board {
    /// Points earned by the dot at `id` on this snapshot. Zero for an
    /// unowned or nonexistent dot.
    #[instrument(skip(self))]
    pub fn score_dot_at(&self, id: &str) -> u32 {
        self.scoring_moves_at(id).iter().map(|mv| mv.score).sum()
    }

    /// Detects every scoring pattern the dot at `id` participates in.
    ///
    /// Patterns come out in a fixed order: horizontal, vertical, the two
    /// diagonals, then the adjacency cluster. Each qualifying line earns
    /// one point regardless of how far it extends past the required
    /// length; the cluster earns one point at 5 same-owner neighbors and
    /// a second at 8.
    #[instrument(skip(self))]
    pub fn scoring_moves_at(&self, id: &str) -> Vec<ScoringMove> {
        let Some(dot) = self.dot_at(id) else {
            return Vec::new();
        };
        let Some(player) = dot.player.clone() else {
            return Vec::new();
        };
        let dot_id = dot.id.clone();
        let Some(coords) = Coordinates::parse(&dot_id) else {
            return Vec::new();
        };

        let required = self.level().required_line_length();
        let mut moves = Vec::new();

        for (direction, kind) in LINE_DIRECTIONS {
            let run = self.run_through(coords, direction, &player);
            if run.len() >= required {
                moves.push(ScoringMove {
                    dot_id: dot_id.clone(),
                    kind,
                    score: 1,
                    dots: run,
                });
            }
        }

        let neighbors = self.adjacent_player_dots(coords, &player);
        let cluster_score = u32::from(neighbors.len() >= 5) + u32::from(neighbors.len() >= 8);
        if cluster_score > 0 {
            moves.push(ScoringMove {
                dot_id,
                kind: ScoringMoveKind::Adjacent,
                score: cluster_score,
                dots: neighbors,
            });
        }

        moves
    }

    /// The consecutive same-owner run through `coords` along `direction`,
    /// negative end first.
    fn run_through(&self, coords: Coordinates, direction: Direction, player: &Player) -> Vec<String> {
        let mut run = self.consecutive_dots(coords, direction.negate(), player);
        run.reverse();
        run.push(coords.id());
        run.extend(self.consecutive_dots(coords, direction, player));
        run
    }

    /// Same-owner dots strictly beyond `start` in `direction`, nearest
    /// first, stopping at the first gap, opponent dot, or board edge.
    fn consecutive_dots(
        &self,
        start: Coordinates,
        direction: Direction,
        player: &Player,
    ) -> Vec<String> {
        let mut dots = Vec::new();
        let mut current = start.step(direction);
        while let Some(owner) = self.owner_at(current) {
            if owner.id != player.id {
                break;
            }
            dots.push(current.id());
            current = current.step(direction);
        }
        dots
    }

    /// Same-owner dots among the 8 Moore neighbors of `coords`, in
    /// row-major board order.
    fn adjacent_player_dots(&self, coords: Coordinates, player: &Player) -> Vec<String> {
        let mut dots = Vec::new();
        for row_delta in -1..=1 {
            for col_delta in -1..=1 {
                if row_delta == 0 && col_delta == 0 {
                    continue;
                }
                let neighbor = coords.step(Direction {
                    row_delta,
                    col_delta,
                });
                if let Some(owner) = self.owner_at(neighbor)
                    && owner.id == player.id
                {
                    dots.push(neighbor.id());
                }
            }
        }
        dots
    }
}
