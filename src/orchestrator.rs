//! Game orchestration between participants.

use crate::players::{Participant, Provenance};
use anyhow::Result;
use std::collections::VecDeque;
use strictly_othello::{Coord, GameMode, GameState, Outcome, Player, TurnEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Entries kept in the move log.
pub const LOG_CAPACITY: usize = 100;

/// Consecutive rejected moves tolerated from one participant.
const MAX_REJECTIONS: usize = 3;

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Game state updated.
    StateChanged(GameState),
    /// Agent is deciding for `player`.
    AgentThinking(Player),
    /// Move was made.
    MoveMade {
        /// Participant name.
        by: String,
        /// Side that moved.
        player: Player,
        /// Placed disc.
        coord: Coord,
        /// Discs captured.
        flipped: usize,
        /// How the move was chosen.
        provenance: Provenance,
    },
    /// `skipped` had no legal move; the same side moves again.
    Passed {
        /// Side whose turn was skipped.
        skipped: Player,
    },
    /// The rules refused a participant's move.
    MoveRejected {
        /// Participant name.
        by: String,
        /// Refused coordinate.
        coord: Coord,
        /// Why it was refused.
        reason: String,
    },
    /// Game ended.
    GameOver {
        /// Final result.
        outcome: Outcome,
        /// Summary line for display.
        message: String,
    },
}

/// Bounded log of recent moves, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    entries: VecDeque<String>,
}

impl MoveLog {
    /// Records an entry, dropping the oldest beyond [`LOG_CAPACITY`].
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        self.entries.truncate(LOG_CAPACITY);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Result line for a finished game.
///
/// Against an agent the human plays Black, so the text is personal.
pub fn outcome_text(outcome: Outcome, mode: GameMode) -> &'static str {
    match (outcome.winner(), mode) {
        (None, _) => "Draw!",
        (Some(Player::Black), GameMode::HumanVsHuman) => "Black wins!",
        (Some(Player::White), GameMode::HumanVsHuman) => "White wins!",
        (Some(Player::Black), GameMode::HumanVsAgent) => "You win!",
        (Some(Player::White), GameMode::HumanVsAgent) => "AI wins!",
    }
}

/// Orchestrates gameplay between two participants.
pub struct Orchestrator {
    game: GameState,
    black: Box<dyn Participant>,
    white: Box<dyn Participant>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    log: MoveLog,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        game: GameState,
        black: Box<dyn Participant>,
        white: Box<dyn Participant>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game,
            black,
            white,
            event_tx,
            log: MoveLog::default(),
        }
    }

    /// Current game state.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Move log, newest first.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// Runs the game loop until the game is decided.
    #[instrument(skip(self), fields(mode = %self.game.mode(), black = %self.black.name(), white = %self.white.name()))]
    pub async fn run(&mut self) -> Result<Outcome> {
        info!("Starting game orchestration");
        self.event_tx.send(GameEvent::StateChanged(self.game.clone()))?;
        let mut rejections = 0;

        loop {
            let Some(player) = self.game.to_move() else {
                return self.finish();
            };

            let participant = match player {
                Player::Black => &mut self.black,
                Player::White => &mut self.white,
            };
            let name = participant.name().to_string();

            if participant.is_agent() {
                self.game.set_agent_thinking(true);
                self.event_tx.send(GameEvent::AgentThinking(player))?;
            }

            debug!(participant = %name, %player, "Waiting for move");
            let choice = participant.choose_move(&self.game).await;
            self.game.set_agent_thinking(false);
            let choice = choice?;

            match self.game.play(choice.coord) {
                Ok(transition) => {
                    rejections = 0;
                    self.game = transition.state;
                    self.log
                        .push(format!("{}{} -> {}", name, choice.provenance, choice.coord));
                    self.event_tx.send(GameEvent::MoveMade {
                        by: name,
                        player,
                        coord: choice.coord,
                        flipped: transition.flipped.len(),
                        provenance: choice.provenance,
                    })?;

                    if let TurnEvent::Passed { skipped } = transition.event {
                        self.log.push(format!("{} passes", skipped));
                        self.event_tx.send(GameEvent::Passed { skipped })?;
                    }
                    self.event_tx
                        .send(GameEvent::StateChanged(self.game.clone()))?;
                }
                Err(e) => {
                    rejections += 1;
                    warn!(participant = %name, coord = %choice.coord, error = %e, rejections, "Move rejected");
                    self.log
                        .push(format!("{} invalid move: {}", name, choice.coord));
                    self.event_tx.send(GameEvent::MoveRejected {
                        by: name.clone(),
                        coord: choice.coord,
                        reason: e.to_string(),
                    })?;
                    if rejections >= MAX_REJECTIONS {
                        anyhow::bail!("{} made {} rejected moves in a row", name, rejections);
                    }
                }
            }
        }
    }

    /// Starts over from the opening position, keeping participants.
    #[instrument(skip(self))]
    pub fn restart(&mut self, mode: GameMode) {
        self.game = self.game.reset(mode);
        self.log.clear();
    }

    fn finish(&mut self) -> Result<Outcome> {
        let Some(outcome) = self.game.outcome() else {
            anyhow::bail!("Game has no outcome");
        };
        let (black, white) = self.game.score();
        let message = format!(
            "{} (Black {} - White {})",
            outcome_text(outcome, self.game.mode()),
            black,
            white
        );
        info!(%outcome, black, white, "Game over");
        self.log.push(message.clone());
        self.event_tx.send(GameEvent::GameOver { outcome, message })?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded_newest_first() {
        let mut log = MoveLog::default();
        for i in 0..(LOG_CAPACITY + 5) {
            log.push(format!("entry {}", i));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.entries().next(), Some("entry 104"));
        assert_eq!(log.entries().last(), Some("entry 5"));
    }

    #[test]
    fn test_outcome_text() {
        let draw = Outcome::Draw;
        assert_eq!(outcome_text(draw, GameMode::HumanVsAgent), "Draw!");
        let white = Outcome::Winner(Player::White);
        assert_eq!(outcome_text(white, GameMode::HumanVsHuman), "White wins!");
        assert_eq!(outcome_text(white, GameMode::HumanVsAgent), "AI wins!");
        let black = Outcome::Winner(Player::Black);
        assert_eq!(outcome_text(black, GameMode::HumanVsAgent), "You win!");
    }
}
