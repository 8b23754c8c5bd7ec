//! Prompt construction for move proposals.

use crate::agent_config::Difficulty;
use strictly_othello::{Board, Coord, LETTERS, Player};
use tracing::instrument;

/// System prompt: persona, output format and retry discipline.
#[instrument]
pub fn system_prompt(difficulty: Difficulty, board_size: usize, is_retry: bool) -> String {
    let persona = match difficulty {
        Difficulty::Easy => "You are a beginner Othello (Reversi) player.",
        Difficulty::Medium => "You are an intermediate Othello (Reversi) player.",
        Difficulty::Hard => "You are a world-class Othello (Reversi) player.",
    };
    let last_letter = board_size
        .checked_sub(1)
        .and_then(|i| LETTERS.chars().nth(i))
        .unwrap_or('A');
    let discipline = if is_retry {
        "ONLY select a value from the provided list of legal moves."
    } else {
        "Never respond with \"PASS\" unless *no legal moves* exist. Do not explain or comment."
    };

    format!(
        "{persona}\nReply with exactly ONE legal move in algebraic notation \
         (a letter A-{last_letter} followed by a number 1-{board_size}), e.g. D3.\n{discipline}"
    )
}

/// User prompt: the board, whose turn it is, and on retry the legal moves.
#[instrument(skip(board, legal_moves), fields(size = board.size(), player = %player))]
pub fn user_prompt(board: &Board, player: Player, legal_moves: Option<&[Coord]>) -> String {
    let size = board.size();
    let instruction = match legal_moves {
        Some(moves) => {
            let list = moves
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("List of Legal Moves: {list}")
        }
        None => "If you cannot find a legal move, return \"PASS\".".to_string(),
    };

    format!(
        "Board ({size}x{size}), '.' = empty, B=Black, W=White.\n\
         Return a single legal move for {symbol}.\n\
         {instruction}\n\n\
         {board}",
        symbol = player.symbol(),
        board = board.render(player),
    )
}
