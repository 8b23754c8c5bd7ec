//! Turn and game-flow controller.
//!
//! [`GameState`] is an owned value. Every transition borrows the current
//! state and returns a fresh one, so earlier states stay valid snapshots.

use crate::action::{Move, MoveError};
use crate::rules::{self, Outcome};
use crate::types::{Board, BoardError, Coord, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who sits on each side of the board.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    #[display("human vs human")]
    HumanVsHuman,
    /// A human plays Black against an automated agent playing White.
    #[display("human vs agent")]
    HumanVsAgent,
}

/// What happened to the turn after a successful move.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Turn passed normally to the opponent.
    #[display("{} to move", next)]
    Continued {
        /// Player now to move.
        next: Player,
    },
    /// Opponent had no legal move; the mover goes again.
    #[display("{} has no legal move and passes", skipped)]
    Passed {
        /// Player whose turn was skipped.
        skipped: Player,
    },
    /// Neither side can move; the game is decided.
    #[display("Game over: {}", _0)]
    Finished(Outcome),
}

/// Result of a successful move: the new state and how the turn advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the move.
    pub state: GameState,
    /// Turn advancement.
    pub event: TurnEvent,
    /// Discs captured by the move.
    pub flipped: Vec<Coord>,
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current: Player,
    mode: GameMode,
    outcome: Option<Outcome>,
    last_move: Option<Coord>,
    history: Vec<Move>,
    opening_discs: usize,
    agent_thinking: bool,
}

impl GameState {
    /// Creates a standard 8×8 game with Black to move.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        Self::opening(Board::standard(), mode)
    }

    /// Creates a game on an N×N board. N must be even.
    #[instrument]
    pub fn with_size(mode: GameMode, size: usize) -> Result<Self, BoardError> {
        Ok(Self::opening(Board::initial(size)?, mode))
    }

    /// Starts from an arbitrary position.
    ///
    /// The position is settled immediately: if `to_move` has no legal move
    /// the turn goes to the opponent, and a board where neither side can
    /// move is terminal from the start.
    #[instrument(skip(board), fields(size = board.size()))]
    pub fn from_position(board: Board, to_move: Player, mode: GameMode) -> Self {
        let opening_discs = board.disc_count();
        let outcome = rules::outcome(&board);
        let current = if outcome.is_none() && rules::valid_moves(&board, to_move).is_empty() {
            debug!(skipped = %to_move, "Side to move has no legal move");
            to_move.opponent()
        } else {
            to_move
        };
        Self {
            board,
            current,
            mode,
            outcome,
            last_move: None,
            history: Vec::new(),
            opening_discs,
            agent_thinking: false,
        }
    }

    fn opening(board: Board, mode: GameMode) -> Self {
        Self {
            opening_discs: board.disc_count(),
            board,
            current: Player::Black,
            mode,
            outcome: None,
            last_move: None,
            history: Vec::new(),
            agent_thinking: false,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is (the last mover once the game is over).
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Returns the player to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        self.outcome.is_none().then_some(self.current)
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Checks whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the most recent placement.
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Returns the moves played since the game started.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Disc count of the position the game started from.
    pub fn opening_discs(&self) -> usize {
        self.opening_discs
    }

    /// Disc counts as `(black, white)`.
    pub fn score(&self) -> (usize, usize) {
        rules::score(&self.board)
    }

    /// Legal moves for the player to move, row-major. Empty once over.
    #[instrument(skip(self))]
    pub fn legal_moves(&self) -> Vec<Coord> {
        if self.is_over() {
            return Vec::new();
        }
        rules::valid_moves(&self.board, self.current)
    }

    /// Checks whether the player to move may play at `coord`.
    pub fn is_legal(&self, coord: Coord) -> bool {
        !self.is_over() && rules::can_play(&self.board, self.current, coord)
    }

    /// Advisory flag set while an automated agent is deciding. Ignored by the rules.
    pub fn agent_thinking(&self) -> bool {
        self.agent_thinking
    }

    /// Sets the advisory agent-thinking flag.
    pub fn set_agent_thinking(&mut self, thinking: bool) {
        self.agent_thinking = thinking;
    }

    /// Changes the mode without touching the position.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// A fresh opening position on the same board size, in `mode`.
    #[instrument(skip(self))]
    pub fn reset(&self, mode: GameMode) -> Self {
        info!(%mode, "Resetting game");
        let board = Board::initial(self.board.size()).unwrap_or_else(|_| Board::standard());
        Self::opening(board, mode)
    }

    /// Plays `coord` for the player to move.
    ///
    /// Rejected attempts leave `self` untouched and say why; on success the
    /// returned [`Transition`] carries the new state.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] after the game has ended,
    /// [`MoveError::OutOfBounds`] for off-board coordinates and
    /// [`MoveError::Illegal`] when the move captures nothing.
    #[instrument(skip(self), fields(coord = %coord, player = %self.current))]
    pub fn play(&self, coord: Coord) -> Result<Transition, MoveError> {
        if self.is_over() {
            warn!("Move attempted after game over");
            return Err(MoveError::GameOver);
        }
        if !self.board.contains(coord) {
            warn!("Move attempted off the board");
            return Err(MoveError::OutOfBounds(coord));
        }

        let mover = self.current;
        let flipped = rules::flips_for(&self.board, mover, coord);
        if flipped.is_empty() {
            warn!("Illegal move rejected");
            return Err(MoveError::Illegal(mover, coord));
        }

        let mut next = self.clone();
        next.board = rules::apply_move(&self.board, mover, coord);
        next.history.push(Move::new(mover, coord));
        next.last_move = Some(coord);

        let event = if let Some(outcome) = rules::outcome(&next.board) {
            next.outcome = Some(outcome);
            info!(%outcome, "Game finished");
            TurnEvent::Finished(outcome)
        } else {
            let opponent = mover.opponent();
            if rules::valid_moves(&next.board, opponent).is_empty() {
                info!(skipped = %opponent, "Forced pass");
                TurnEvent::Passed { skipped: opponent }
            } else {
                next.current = opponent;
                debug!(next = %opponent, "Turn advanced");
                TurnEvent::Continued { next: opponent }
            }
        };

        #[cfg(debug_assertions)]
        crate::invariants::verify(&next)?;

        Ok(Transition {
            state: next,
            event,
            flipped,
        })
    }

    /// Replays `moves` from the standard opening.
    ///
    /// # Errors
    ///
    /// Fails at the first move that is not legal in sequence.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(mode: GameMode, moves: &[Coord]) -> Result<Self, MoveError> {
        moves
            .iter()
            .try_fold(Self::new(mode), |state, &coord| {
                state.play(coord).map(|transition| transition.state)
            })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}
