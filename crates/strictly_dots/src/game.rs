//! The game aggregate: command validation, turn order, and lifecycle.
//!
//! Every command is a pure function from `(state, command, now)` to a list
//! of events, and every event application is a pure function from
//! `(state, event)` to the next state. The machine is total: invalid input
//! produces zero events or a forfeiture event, never an error.

use crate::board::{Board, Level};
use crate::command::Command;
use crate::event::Event;
use crate::invariants::{DotGameInvariants, InvariantSet};
use crate::player::{Player, PlayerStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Lifecycle status of a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No game has been created yet.
    #[display("empty")]
    Empty,
    /// The game accepts moves.
    #[display("in_progress")]
    InProgress,
    /// A player reached the winning score.
    #[display("won_by_player")]
    WonByPlayer,
    /// The board filled with neither player at the winning score.
    #[display("draw")]
    Draw,
    /// The game was terminated by an explicit cancellation.
    #[display("canceled")]
    Canceled,
}

impl Status {
    /// True for the statuses a game can never leave.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::WonByPlayer | Status::Draw | Status::Canceled)
    }
}

/// One entry in a game's move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Address that was claimed.
    pub dot_id: String,
    /// Player who claimed it.
    pub player_id: String,
    /// Milliseconds that elapsed between the previous move and this one.
    pub think_ms: i64,
}

/// Aggregate state for one game, rebuilt by folding events.
///
/// The state is never mutated in place: [`GameState::handle`] decides what
/// a command does and [`GameState::apply`] folds one event into a new
/// state value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) game_id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) status: Status,
    pub(crate) board: Board,
    pub(crate) player1_status: PlayerStatus,
    pub(crate) player2_status: PlayerStatus,
    pub(crate) current_player: Option<PlayerStatus>,
    pub(crate) move_history: Vec<Move>,
    pub(crate) finished_at: Option<DateTime<Utc>>,
}

impl GameState {
    /// The pre-creation state every game starts from.
    pub fn empty() -> Self {
        Self {
            game_id: String::new(),
            created_at: DateTime::UNIX_EPOCH,
            status: Status::Empty,
            board: Board::empty(),
            player1_status: PlayerStatus::new(Player::unassigned()),
            player2_status: PlayerStatus::new(Player::unassigned()),
            current_player: None,
            move_history: Vec::new(),
            finished_at: None,
        }
    }

    /// The game's id; empty until the game is created.
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// When the game was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current lifecycle status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Bookkeeping for player 1.
    pub fn player1_status(&self) -> &PlayerStatus {
        &self.player1_status
    }

    /// Bookkeeping for player 2.
    pub fn player2_status(&self) -> &PlayerStatus {
        &self.player2_status
    }

    /// The player whose command will be accepted next; absent once the
    /// game is terminal (and before it is created).
    pub fn current_player(&self) -> Option<&PlayerStatus> {
        self.current_player.as_ref()
    }

    /// The full move history, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    /// When the game ended, for won and drawn games.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    // ─────────────────────────────────────────────────────────────
    //  Command handling
    // ─────────────────────────────────────────────────────────────

    /// Decides what a command does to this state.
    ///
    /// Pure: the only inputs are the state, the command, and the
    /// caller-supplied clock reading. The caller is responsible for
    /// serializing commands per game id; the machine assumes it never
    /// sees two commands decided against the same snapshot.
    #[instrument(skip(self, command), fields(game_id = %self.game_id, status = %self.status))]
    pub fn handle(&self, command: &Command, now: DateTime<Utc>) -> Vec<Event> {
        match command {
            Command::CreateGame {
                game_id,
                player1,
                player2,
                level,
            } => self.on_create_game(game_id, player1, player2, *level, now),
            Command::MakeMove {
                player_id, dot_id, ..
            } => self.on_make_move(player_id, dot_id, now),
            Command::ForfeitMove {
                player_id, message, ..
            } => self.on_forfeit_move(player_id, message, now),
            Command::CancelGame { reason, .. } => self.on_cancel_game(reason, now),
        }
    }

    fn on_create_game(
        &self,
        game_id: &str,
        player1: &Player,
        player2: &Player,
        level: Level,
        now: DateTime<Utc>,
    ) -> Vec<Event> {
        if self.status != Status::Empty {
            debug!("ignoring create for a game that already exists");
            return Vec::new();
        }

        info!(%level, "creating game");
        let player1_status = PlayerStatus::new(player1.clone());
        vec![Event::GameCreated {
            game_id: game_id.to_string(),
            created_at: now,
            board: Board::of(level),
            status: Status::InProgress,
            player1_status: player1_status.clone(),
            player2_status: PlayerStatus::new(player2.clone()),
            current_player: Some(player1_status),
            level,
            move_history: Vec::new(),
            finished_at: None,
        }]
    }

    fn on_make_move(&self, player_id: &str, dot_id: &str, now: DateTime<Utc>) -> Vec<Event> {
        if self.status != Status::InProgress {
            debug!(dot_id, "ignoring move for a game not in progress");
            return Vec::new();
        }

        // Bad cell references forfeit the turn: penalize bad input, keep
        // the game moving.
        let Some(dot) = self.board.dot_at(dot_id) else {
            return self.forfeit_events(format!("Invalid board position: {dot_id}"), now);
        };
        if dot.is_occupied() {
            return self.forfeit_events(format!("Dot {dot_id} is already occupied"), now);
        }

        // A valid move from the wrong player is a duplicate or stale
        // delivery; fold it to nothing.
        let Some(current) = &self.current_player else {
            return Vec::new();
        };
        if current.player.id != player_id {
            debug!(player_id, "ignoring move from a player out of turn");
            return Vec::new();
        }

        let board = self.board.with_dot(dot_id, current.player.clone());
        let scoring_moves = board.scoring_moves_at(dot_id);
        let points: u32 = scoring_moves.iter().map(|mv| mv.score).sum();

        let mover_is_player1 = self.is_player1_turn();
        let mut player1_status = self.player1_status.clone();
        let mut player2_status = self.player2_status.clone();
        if mover_is_player1 {
            player1_status = player1_status
                .with_move()
                .with_points(points)
                .with_scoring_moves(scoring_moves);
        } else {
            player2_status = player2_status
                .with_move()
                .with_points(points)
                .with_scoring_moves(scoring_moves);
        }

        let status = Self::status_of(&board, &player1_status, &player2_status);
        if status == Status::WonByPlayer {
            player1_status = if mover_is_player1 {
                player1_status.as_winner()
            } else {
                player1_status.as_loser()
            };
            player2_status = if mover_is_player1 {
                player2_status.as_loser()
            } else {
                player2_status.as_winner()
            };
        }

        let mut move_history = self.move_history.clone();
        move_history.push(Move {
            dot_id: dot_id.to_string(),
            player_id: player_id.to_string(),
            think_ms: self.think_ms(now),
        });

        let current_player = (status == Status::InProgress).then(|| self.next_player().clone());

        if points > 0 {
            info!(dot_id, points, "scoring move");
        }

        let move_made = Event::MoveMade {
            game_id: self.game_id.clone(),
            board,
            status,
            player1_status: player1_status.clone(),
            player2_status: player2_status.clone(),
            current_player,
            move_history,
            timestamp: now,
        };

        if status == Status::InProgress {
            return vec![move_made];
        }

        info!(%status, "game over");
        vec![
            move_made,
            Event::GameFinished {
                game_id: self.game_id.clone(),
                finished_at: Some(now),
            },
            Event::GameResults {
                game_id: self.game_id.clone(),
                status,
                player1_status,
                player2_status,
                timestamp: now,
            },
        ]
    }

    fn on_forfeit_move(&self, player_id: &str, message: &str, now: DateTime<Utc>) -> Vec<Event> {
        if self.status != Status::InProgress {
            return Vec::new();
        }
        let Some(current) = &self.current_player else {
            return Vec::new();
        };
        if current.player.id != player_id {
            debug!(player_id, "ignoring forfeit from a player out of turn");
            return Vec::new();
        }
        self.forfeit_events(message.to_string(), now)
    }

    fn on_cancel_game(&self, reason: &str, now: DateTime<Utc>) -> Vec<Event> {
        if self.status != Status::InProgress {
            return Vec::new();
        }
        info!(reason, "canceling game");
        vec![Event::GameCanceled {
            game_id: self.game_id.clone(),
            status: Status::Canceled,
            player1_status: self.player1_status.clone(),
            player2_status: self.player2_status.clone(),
            reason: reason.to_string(),
            timestamp: now,
        }]
    }

    fn forfeit_events(&self, message: String, now: DateTime<Utc>) -> Vec<Event> {
        info!(%message, "forfeiting turn");
        vec![Event::MoveForfeited {
            game_id: self.game_id.clone(),
            status: self.status,
            current_player: Some(self.next_player().clone()),
            message,
            timestamp: now,
        }]
    }

    // ─────────────────────────────────────────────────────────────
    //  Event application
    // ─────────────────────────────────────────────────────────────

    /// Folds one event into the state, producing the next state. Total
    /// and exhaustive over the event enum.
    #[instrument(skip(self, event), fields(game_id = %self.game_id))]
    pub fn apply(&self, event: &Event) -> GameState {
        let next = match event {
            Event::GameCreated {
                game_id,
                created_at,
                board,
                status,
                player1_status,
                player2_status,
                current_player,
                move_history,
                finished_at,
                ..
            } => GameState {
                game_id: game_id.clone(),
                created_at: *created_at,
                status: *status,
                board: board.clone(),
                player1_status: player1_status.clone(),
                player2_status: player2_status.clone(),
                current_player: current_player.clone(),
                move_history: move_history.clone(),
                finished_at: *finished_at,
            },
            Event::MoveMade {
                board,
                status,
                player1_status,
                player2_status,
                current_player,
                move_history,
                ..
            } => GameState {
                status: *status,
                board: board.clone(),
                player1_status: player1_status.clone(),
                player2_status: player2_status.clone(),
                current_player: current_player.clone(),
                move_history: move_history.clone(),
                ..self.clone()
            },
            Event::MoveForfeited { current_player, .. } => GameState {
                current_player: current_player.clone(),
                ..self.clone()
            },
            Event::GameCanceled {
                status,
                player1_status,
                player2_status,
                ..
            } => GameState {
                status: *status,
                player1_status: player1_status.clone(),
                player2_status: player2_status.clone(),
                current_player: None,
                ..self.clone()
            },
            Event::GameFinished { finished_at, .. } => GameState {
                finished_at: *finished_at,
                current_player: None,
                ..self.clone()
            },
            Event::GameResults { .. } => self.clone(),
        };

        debug_assert!(
            DotGameInvariants::check_all(&next).is_ok(),
            "invariants violated after applying event"
        );
        next
    }

    /// Applies every event in order, returning the folded state. Replaying
    /// a full event log over [`GameState::empty`] reconstructs the game.
    pub fn fold(&self, events: &[Event]) -> GameState {
        events
            .iter()
            .fold(self.clone(), |state, event| state.apply(event))
    }

    // ─────────────────────────────────────────────────────────────
    //  Turn and status helpers
    // ─────────────────────────────────────────────────────────────

    fn status_of(board: &Board, player1_status: &PlayerStatus, player2_status: &PlayerStatus) -> Status {
        let winning_score = board.level().winning_score();
        if player1_status.score >= winning_score || player2_status.score >= winning_score {
            return Status::WonByPlayer;
        }
        if board.is_full() {
            return Status::Draw;
        }
        Status::InProgress
    }

    /// True when player 1 moves next; also the seed case before the first
    /// move of a game.
    fn is_player1_turn(&self) -> bool {
        self.current_player
            .as_ref()
            .is_none_or(|current| current.player.id == self.player1_status.player.id)
    }

    /// The player who moves after the current one.
    fn next_player(&self) -> &PlayerStatus {
        match &self.current_player {
            None => &self.player1_status,
            Some(current) if current.player.id == self.player1_status.player.id => {
                &self.player2_status
            }
            Some(_) => &self.player1_status,
        }
    }

    /// Milliseconds since the previous move, derived from the creation
    /// time plus every earlier move's think time.
    fn think_ms(&self, now: DateTime<Utc>) -> i64 {
        let last_move_at = self
            .move_history
            .iter()
            .fold(self.created_at, |at, entry| {
                at + Duration::milliseconds(entry.think_ms)
            });
        (now - last_move_at).num_milliseconds()
    }
}
