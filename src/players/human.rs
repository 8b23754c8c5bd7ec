//! Human participant reading moves as text lines.

use super::{Choice, Participant, Provenance};
use anyhow::Result;
use strictly_othello::{Coord, GameState, parse_algebraic};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

/// Human participant typing coordinates such as `d3`.
///
/// The board and a prompt are written before each read. Unreadable or
/// illegal input is reported and the prompt repeats.
pub struct HumanPlayer {
    name: String,
    input: Box<dyn AsyncBufRead + Unpin + Send>,
    output: Box<dyn AsyncWrite + Unpin + Send>,
}

impl HumanPlayer {
    /// Creates a new human participant.
    pub fn new(
        name: impl Into<String>,
        input: Box<dyn AsyncBufRead + Unpin + Send>,
        output: Box<dyn AsyncWrite + Unpin + Send>,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Human on the process's stdin and stdout.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(
            name,
            Box::new(tokio::io::BufReader::new(tokio::io::stdin())),
            Box::new(tokio::io::stdout()),
        )
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

fn move_list(moves: &[Coord]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait::async_trait]
impl Participant for HumanPlayer {
    #[instrument(skip(self, game), fields(human = %self.name))]
    async fn choose_move(&mut self, game: &GameState) -> Result<Choice> {
        let player = game.current_player();
        let legal = game.legal_moves();
        let header = format!(
            "\n{}\n{} ({}) to move. Legal: {}\n",
            game.board().render(player),
            self.name,
            player,
            move_list(&legal)
        );
        self.say(&header).await?;

        loop {
            self.say("> ").await?;
            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                anyhow::bail!("Input closed");
            }
            let text = line.trim();
            if text.eq_ignore_ascii_case("quit") {
                anyhow::bail!("{} quit", self.name);
            }

            match parse_algebraic(text, game.board().size()) {
                Some(coord) if legal.contains(&coord) => {
                    debug!(%coord, "Human chose move");
                    return Ok(Choice::new(coord, Provenance::Direct));
                }
                Some(coord) => {
                    self.say(&format!("{} is not a legal move.\n", coord)).await?;
                }
                None => {
                    self.say(&format!("Could not read '{}'. Try a move like D3.\n", text))
                        .await?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_othello::GameMode;

    #[tokio::test]
    async fn test_reprompts_until_legal() {
        let input: &[u8] = b"banana\na1\n d3 \n";
        let mut human = HumanPlayer::new("Alice", Box::new(input), Box::new(tokio::io::sink()));
        let game = GameState::new(GameMode::HumanVsHuman);

        let choice = human.choose_move(&game).await.unwrap();
        assert_eq!(choice.coord, Coord::new(2, 3));
        assert_eq!(choice.provenance, Provenance::Direct);
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let input: &[u8] = b"zz\n";
        let mut human = HumanPlayer::new("Alice", Box::new(input), Box::new(tokio::io::sink()));
        let game = GameState::new(GameMode::HumanVsHuman);
        assert!(human.choose_move(&game).await.is_err());
    }
}
