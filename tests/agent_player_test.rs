//! Tests for the agent move policy using scripted proposers.

use othello_challenge::{
    AgentPlayer, MoveProposer, Participant, ProposalError, ProposalRequest, Provenance,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use strictly_othello::{Coord, GameMode, GameState};

/// Replies from a fixed script and records every request.
struct ScriptedProposer {
    replies: Mutex<VecDeque<Result<String, ProposalError>>>,
    requests: Arc<Mutex<Vec<ProposalRequest>>>,
}

impl ScriptedProposer {
    fn new(replies: Vec<Result<String, ProposalError>>) -> (Self, Arc<Mutex<Vec<ProposalRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let proposer = Self {
            replies: Mutex::new(replies.into()),
            requests: Arc::clone(&requests),
        };
        (proposer, requests)
    }
}

#[async_trait::async_trait]
impl MoveProposer for ScriptedProposer {
    async fn propose(&self, request: &ProposalRequest) -> Result<String, ProposalError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("PASS".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn agent(replies: Vec<Result<String, ProposalError>>) -> (AgentPlayer, Arc<Mutex<Vec<ProposalRequest>>>) {
    let (proposer, requests) = ScriptedProposer::new(replies);
    let agent = AgentPlayer::with_rng("AI", Box::new(proposer), StdRng::seed_from_u64(7));
    (agent, requests)
}

#[tokio::test]
async fn test_first_proposal_accepted() {
    let (mut agent, requests) = agent(vec![Ok("I'll take d3".to_string())]);
    let game = GameState::new(GameMode::HumanVsAgent);

    let choice = agent.choose_move(&game).await.unwrap();
    assert_eq!(choice.coord, Coord::new(2, 3));
    assert_eq!(choice.provenance, Provenance::Direct);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].is_retry());
}

#[tokio::test]
async fn test_retry_lists_legal_moves() {
    let (mut agent, requests) = agent(vec![Ok("A1".to_string()), Ok("F5".to_string())]);
    let game = GameState::new(GameMode::HumanVsAgent);

    let choice = agent.choose_move(&game).await.unwrap();
    assert_eq!(choice.coord, Coord::new(4, 5));
    assert_eq!(choice.provenance, Provenance::Retry);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].legal_moves, Some(game.legal_moves()));
}

#[tokio::test]
async fn test_two_failures_fall_back_to_legal_move() {
    let (mut agent, requests) = agent(vec![Ok("PASS".to_string()), Ok("no idea".to_string())]);
    let game = GameState::new(GameMode::HumanVsAgent);

    let choice = agent.choose_move(&game).await.unwrap();
    assert_eq!(choice.provenance, Provenance::Fallback);
    assert!(game.is_legal(choice.coord));
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_proposer_errors_fall_back() {
    let (mut agent, _) = agent(vec![
        Err(ProposalError::new("timeout")),
        Err(ProposalError::new("timeout")),
    ]);
    let game = GameState::new(GameMode::HumanVsAgent)
        .play(Coord::new(2, 3))
        .unwrap()
        .state;

    let choice = agent.choose_move(&game).await.unwrap();
    assert_eq!(choice.provenance, Provenance::Fallback);
    assert!(game.is_legal(choice.coord));
}
