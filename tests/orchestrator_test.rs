//! Tests for the orchestrated game loop.

use anyhow::Result;
use othello_challenge::{
    Choice, GameEvent, HumanPlayer, Orchestrator, Participant, Provenance, RandomPlayer,
};
use strictly_othello::{Coord, GameMode, GameState, Player, TurnEvent};
use tokio::sync::mpsc;

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_random_game_runs_to_completion() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        GameState::new(GameMode::HumanVsHuman),
        Box::new(RandomPlayer::seeded("Black", 1)),
        Box::new(RandomPlayer::seeded("White", 2)),
        tx,
    );

    let outcome = orchestrator.run().await.unwrap();
    let game = orchestrator.game();
    assert!(game.is_over());
    assert_eq!(game.outcome(), Some(outcome));
    assert!(!game.agent_thinking());

    let events = drain(&mut rx);
    let moves = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MoveMade { .. }))
        .count();
    assert_eq!(moves, game.history().len());
    assert!(events.iter().any(|e| matches!(e, GameEvent::AgentThinking(_))));
    assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    assert!(orchestrator.log().len() <= othello_challenge::orchestrator::LOG_CAPACITY);
}

#[tokio::test]
async fn test_small_board_game() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        GameState::with_size(GameMode::HumanVsHuman, 4).unwrap(),
        Box::new(RandomPlayer::seeded("Black", 11)),
        Box::new(RandomPlayer::seeded("White", 12)),
        tx,
    );

    orchestrator.run().await.unwrap();
    let (black, white) = orchestrator.game().score();
    assert!(black + white <= 16);

    orchestrator.restart(GameMode::HumanVsHuman);
    assert_eq!(orchestrator.game().score(), (2, 2));
    assert!(orchestrator.log().is_empty());
}

/// Always answers with the same coordinate.
struct Stubborn(Coord);

#[async_trait::async_trait]
impl Participant for Stubborn {
    async fn choose_move(&mut self, _game: &GameState) -> Result<Choice> {
        Ok(Choice::new(self.0, Provenance::Direct))
    }

    fn name(&self) -> &str {
        "Stubborn"
    }
}

#[tokio::test]
async fn test_illegal_moves_are_rejected_then_abort() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let start = GameState::new(GameMode::HumanVsHuman);
    let mut orchestrator = Orchestrator::new(
        start.clone(),
        Box::new(Stubborn(Coord::new(0, 0))),
        Box::new(RandomPlayer::seeded("White", 3)),
        tx,
    );

    assert!(orchestrator.run().await.is_err());
    assert_eq!(orchestrator.game(), &start);

    let rejected = drain(&mut rx)
        .into_iter()
        .filter(|e| matches!(e, GameEvent::MoveRejected { .. }))
        .count();
    assert_eq!(rejected, 3);
    assert_eq!(
        orchestrator.log().entries().next(),
        Some("Stubborn invalid move: A1")
    );
}

#[tokio::test]
async fn test_forced_pass_is_reported() {
    // After Black takes C1 White has no disc that can capture.
    let board = strictly_othello::Board::from_rows(&["BW..", "BW..", "....", "...."]).unwrap();
    let game = GameState::from_position(board, Player::Black, GameMode::HumanVsHuman);
    assert_eq!(
        game.play(Coord::new(0, 2)).unwrap().event,
        TurnEvent::Passed { skipped: Player::White }
    );

    let input: &[u8] = b"c1\n";
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        game,
        Box::new(HumanPlayer::new("Alice", Box::new(input), Box::new(tokio::io::sink()))),
        Box::new(RandomPlayer::seeded("White", 4)),
        tx,
    );

    // Alice's input runs out on her second turn.
    assert!(orchestrator.run().await.is_err());
    let events = drain(&mut rx);
    assert!(events.contains(&GameEvent::Passed { skipped: Player::White }));
    assert_eq!(orchestrator.game().to_move(), Some(Player::Black));
    assert_eq!(orchestrator.log().entries().nth(1), Some("Alice -> C1"));
}
