//! Board model: levels, addresses, and dot storage.
//!
//! A board is a square grid of dots addressed by row letter and 1-based
//! column number ("C3"). Boards have value semantics: placing a dot returns
//! a new board and leaves the old snapshot intact, so any historical board
//! can still be scored.

use crate::player::Player;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Board size selector. Nine levels map to odd side lengths 5 through 21.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// 5x5 board.
    #[display("one")]
    One,
    /// 7x7 board.
    #[display("two")]
    Two,
    /// 9x9 board.
    #[display("three")]
    Three,
    /// 11x11 board.
    #[display("four")]
    Four,
    /// 13x13 board.
    #[display("five")]
    Five,
    /// 15x15 board.
    #[display("six")]
    Six,
    /// 17x17 board.
    #[display("seven")]
    Seven,
    /// 19x19 board.
    #[display("eight")]
    Eight,
    /// 21x21 board.
    #[display("nine")]
    Nine,
}

impl Level {
    /// Side length of the board for this level.
    pub fn size(self) -> usize {
        match self {
            Level::One => 5,
            Level::Two => 7,
            Level::Three => 9,
            Level::Four => 11,
            Level::Five => 13,
            Level::Six => 15,
            Level::Seven => 17,
            Level::Eight => 19,
            Level::Nine => 21,
        }
    }

    /// Score a player must reach to win: `size / 2 + 1`.
    pub fn winning_score(self) -> u32 {
        (self.size() / 2 + 1) as u32
    }

    /// Consecutive same-owner dots a line needs to score, capped at 5.
    pub fn required_line_length(self) -> usize {
        (self.size() / 2 + 1).min(5)
    }
}

/// A step on the grid: row delta along the letter axis, column delta along
/// the number axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Direction {
    pub(crate) row_delta: i32,
    pub(crate) col_delta: i32,
}

impl Direction {
    /// Along the letter axis, column fixed (A3 -> B3 -> C3).
    pub(crate) const HORIZONTAL: Direction = Direction {
        row_delta: 1,
        col_delta: 0,
    };

    /// Along the number axis, row letter fixed (C1 -> C2 -> C3).
    pub(crate) const VERTICAL: Direction = Direction {
        row_delta: 0,
        col_delta: 1,
    };

    /// Both axes increasing (A1 -> B2 -> C3).
    pub(crate) const DIAGONAL_DOWN_RIGHT: Direction = Direction {
        row_delta: 1,
        col_delta: 1,
    };

    /// Letter axis decreasing while the number axis increases (E1 -> D2 -> C3).
    pub(crate) const DIAGONAL_UP_RIGHT: Direction = Direction {
        row_delta: -1,
        col_delta: 1,
    };

    /// The opposite sense of the same axis.
    pub(crate) fn negate(self) -> Direction {
        Direction {
            row_delta: -self.row_delta,
            col_delta: -self.col_delta,
        }
    }
}

/// Zero-based grid coordinates behind an address like "C3".
///
/// Coordinates may lie outside any particular board; range checking is the
/// board's concern, which is how out-of-range addresses become "no such
/// cell" rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Coordinates {
    pub(crate) row: i32,
    pub(crate) col: i32,
}

impl Coordinates {
    /// Parses an address of the shape letter-then-number. Returns `None`
    /// when the shape does not hold (too short, unparseable number).
    pub(crate) fn parse(id: &str) -> Option<Coordinates> {
        let mut chars = id.chars();
        let row_char = chars.next()?;
        let col: i32 = chars.as_str().parse().ok()?;
        Some(Coordinates {
            row: row_char as i32 - 'A' as i32,
            col: col - 1,
        })
    }

    /// Formats the address for these coordinates. Only meaningful for
    /// coordinates already validated against a board.
    pub(crate) fn id(self) -> String {
        let row_char = (b'A' + self.row as u8) as char;
        format!("{row_char}{}", self.col + 1)
    }

    /// The coordinates one step away in `direction`.
    pub(crate) fn step(self, direction: Direction) -> Coordinates {
        Coordinates {
            row: self.row + direction.row_delta,
            col: self.col + direction.col_delta,
        }
    }
}

/// A dot on the board: an address and an optional owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot {
    /// Address of the dot: row letter plus 1-based column number.
    pub id: String,
    /// Owner. Set at most once over the life of a game, never cleared.
    pub player: Option<Player>,
}

impl Dot {
    /// Creates an unowned dot.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            player: None,
        }
    }

    /// True when a player owns this dot.
    pub fn is_occupied(&self) -> bool {
        self.player.is_some()
    }

    /// True when no player owns this dot.
    pub fn is_empty(&self) -> bool {
        self.player.is_none()
    }
}

/// Square grid of dots for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    level: Level,
    dots: Vec<Dot>,
}

impl Board {
    /// Placeholder board for a game that has not been created yet.
    pub fn empty() -> Self {
        Self {
            level: Level::One,
            dots: Vec::new(),
        }
    }

    /// Generates the full board for a level: row-major, all dots unowned.
    #[instrument]
    pub fn of(level: Level) -> Self {
        let size = level.size();
        let mut dots = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let row_char = (b'A' + row as u8) as char;
                dots.push(Dot::new(format!("{row_char}{}", col + 1)));
            }
        }
        Self { level, dots }
    }

    /// The board's level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.level.size()
    }

    /// All dots in row-major order.
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Resolves an address to its dot. `None` means "no such cell": an
    /// unparseable address, an out-of-range address, or a board that has
    /// not been generated yet.
    pub fn dot_at(&self, id: &str) -> Option<&Dot> {
        let coords = Coordinates::parse(id)?;
        self.dots.get(self.index_of(coords)?)
    }

    /// Returns a new board with the dot at `id` owned by `player`; every
    /// other dot is unchanged. An unresolvable address yields an identical
    /// copy.
    pub fn with_dot(&self, id: &str, player: Player) -> Board {
        let mut board = self.clone();
        if let Some(index) = Coordinates::parse(id).and_then(|coords| self.index_of(coords)) {
            board.dots[index].player = Some(player);
        }
        board
    }

    /// True when every dot is owned.
    pub fn is_full(&self) -> bool {
        self.dots.iter().all(Dot::is_occupied)
    }

    /// The owner of the dot at `coords`, if the coordinates are on the
    /// board and the dot is occupied.
    pub(crate) fn owner_at(&self, coords: Coordinates) -> Option<&Player> {
        self.index_of(coords)
            .and_then(|index| self.dots.get(index))
            .and_then(|dot| dot.player.as_ref())
    }

    fn index_of(&self, coords: Coordinates) -> Option<usize> {
        let size = self.level.size() as i32;
        if coords.row < 0 || coords.row >= size || coords.col < 0 || coords.col >= size {
            return None;
        }
        Some((coords.row * size + coords.col) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_sizes() {
        assert_eq!(Level::One.size(), 5);
        assert_eq!(Level::Two.size(), 7);
        assert_eq!(Level::Three.size(), 9);
        assert_eq!(Level::Nine.size(), 21);
    }

    #[test]
    fn test_winning_scores() {
        assert_eq!(Level::One.winning_score(), 3);
        assert_eq!(Level::Two.winning_score(), 4);
        assert_eq!(Level::Three.winning_score(), 5);
        assert_eq!(Level::Four.winning_score(), 6);
        assert_eq!(Level::Nine.winning_score(), 11);
    }

    #[test]
    fn test_required_line_lengths_cap_at_five() {
        assert_eq!(Level::One.required_line_length(), 3);
        assert_eq!(Level::Two.required_line_length(), 4);
        assert_eq!(Level::Three.required_line_length(), 5);
        assert_eq!(Level::Four.required_line_length(), 5);
        assert_eq!(Level::Nine.required_line_length(), 5);
    }

    #[test]
    fn test_parse_round_trip() {
        let coords = Coordinates::parse("C3").unwrap();
        assert_eq!(coords, Coordinates { row: 2, col: 2 });
        assert_eq!(coords.id(), "C3");
    }

    #[test]
    fn test_parse_multi_digit_column() {
        let coords = Coordinates::parse("K11").unwrap();
        assert_eq!(coords, Coordinates { row: 10, col: 10 });
        assert_eq!(coords.id(), "K11");
    }

    #[test]
    fn test_parse_rejects_malformed_addresses() {
        assert!(Coordinates::parse("").is_none());
        assert!(Coordinates::parse("C").is_none());
        assert!(Coordinates::parse("CX").is_none());
        assert!(Coordinates::parse("C3X").is_none());
    }

    #[test]
    fn test_board_generation_is_row_major() {
        let board = Board::of(Level::One);
        assert_eq!(board.dots().len(), 25);
        assert_eq!(board.dots()[0].id, "A1");
        assert_eq!(board.dots()[4].id, "A5");
        assert_eq!(board.dots()[5].id, "B1");
        assert_eq!(board.dots()[24].id, "E5");
        assert!(board.dots().iter().all(Dot::is_empty));
    }

    #[test]
    fn test_dot_at_resolves_in_range_addresses() {
        let board = Board::of(Level::One);
        assert_eq!(board.dot_at("A1").unwrap().id, "A1");
        assert_eq!(board.dot_at("E5").unwrap().id, "E5");
        assert_eq!(board.dot_at("C3").unwrap().id, "C3");
    }

    #[test]
    fn test_dot_at_treats_out_of_range_as_no_cell() {
        let board = Board::of(Level::One);
        assert!(board.dot_at("Z9").is_none());
        assert!(board.dot_at("A0").is_none());
        assert!(board.dot_at("A6").is_none());
        assert!(board.dot_at("F1").is_none());
        assert!(board.dot_at("C99").is_none());
    }

    #[test]
    fn test_empty_board_has_no_cells() {
        let board = Board::empty();
        assert!(board.dots().is_empty());
        assert!(board.dot_at("A1").is_none());
    }

    #[test]
    fn test_with_dot_leaves_original_unchanged() {
        let board = Board::of(Level::One);
        let placed = board.with_dot("C3", Player::human("p1", "Alice"));

        assert!(board.dot_at("C3").unwrap().is_empty());
        assert!(placed.dot_at("C3").unwrap().is_occupied());
        assert_eq!(
            placed.dot_at("C3").unwrap().player.as_ref().unwrap().id,
            "p1"
        );

        // Every other dot is untouched.
        let changed = placed
            .dots()
            .iter()
            .filter(|dot| dot.is_occupied())
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_with_dot_ignores_unresolvable_address() {
        let board = Board::of(Level::One);
        let placed = board.with_dot("Z9", Player::human("p1", "Alice"));
        assert_eq!(board, placed);
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::of(Level::One);
        assert!(!board.is_full());
        let player = Player::human("p1", "Alice");
        let ids: Vec<String> = board.dots().iter().map(|dot| dot.id.clone()).collect();
        for id in &ids {
            board = board.with_dot(id, player.clone());
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_all_levels_generate_square_boards() {
        use strum::IntoEnumIterator;

        for level in Level::iter() {
            let board = Board::of(level);
            let size = level.size();
            assert_eq!(board.dots().len(), size * size);
            assert!(board.dots().iter().all(Dot::is_empty));

            let last = format!("{}{}", (b'A' + (size - 1) as u8) as char, size);
            assert_eq!(board.dots().last().unwrap().id, last);
        }
    }
}
