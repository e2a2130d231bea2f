use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::ai::search::{SearchResult, Searcher};
use crate::board::Board;
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::protocol::{ClientMessage, MessageReader, ServerMessage, send, turn_timeout};
use crate::types::{Color, Decision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub color: Color,
    pub moves_sent: u32,
    pub passes_sent: u32,
    /// `false` when the server hung up without a `game_over`.
    pub game_over: bool,
}

/// One game against the server: register, wait for the start, then answer
/// every `your_turn` until `game_over`.
pub struct Session<R, W> {
    reader: MessageReader<R>,
    writer: W,
    username: String,
    config: SearchConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, username: impl Into<String>, config: SearchConfig) -> Self {
        Self {
            reader: MessageReader::new(reader),
            writer,
            username: username.into(),
            config,
        }
    }

    pub fn run(&mut self) -> Result<SessionSummary> {
        self.register()?;
        let color = self.await_game_start()?;
        let mut summary = SessionSummary {
            color,
            moves_sent: 0,
            passes_sent: 0,
            game_over: false,
        };

        loop {
            let Some(message) = self.reader.recv()? else {
                warn!("server closed the connection");
                break;
            };

            match message {
                ServerMessage::YourTurn { board, timeout } => {
                    let board = match Board::from_rows(&board) {
                        Ok(board) => board,
                        Err(err) => {
                            warn!("ignoring your_turn with invalid board: {err}");
                            continue;
                        }
                    };
                    let result = self.think(&board, color, timeout);
                    match result.decision {
                        Decision::Move(_) => summary.moves_sent += 1,
                        Decision::Pass => summary.passes_sent += 1,
                    }
                    send(
                        &mut self.writer,
                        &ClientMessage::for_decision(&self.username, result.decision),
                    )?;
                }
                ServerMessage::GameOver => {
                    info!("game over");
                    summary.game_over = true;
                    break;
                }
                other => debug!("ignoring {} message", other.kind()),
            }
        }

        Ok(summary)
    }

    fn register(&mut self) -> Result<()> {
        send(&mut self.writer, &ClientMessage::register(&self.username))?;
        match self.reader.recv()? {
            Some(ServerMessage::RegisterAck) => {
                info!("registered as {}", self.username);
                Ok(())
            }
            Some(other) => Err(Error::UnexpectedMessage {
                expected: "register_ack",
                actual: other.kind().to_string(),
            }),
            None => Err(Error::ConnectionClosed),
        }
    }

    fn await_game_start(&mut self) -> Result<Color> {
        loop {
            match self.reader.recv()? {
                Some(ServerMessage::GameStart { first_player }) => {
                    let color = if first_player == self.username {
                        Color::Red
                    } else {
                        Color::Blue
                    };
                    info!("game started, playing {color} (first player: {first_player})");
                    return Ok(color);
                }
                Some(other) => debug!("waiting for game_start, ignoring {}", other.kind()),
                None => return Err(Error::ConnectionClosed),
            }
        }
    }

    fn think(&self, board: &Board, color: Color, timeout: f64) -> SearchResult {
        debug!("position for {color}:\n{board}");
        let config = self.config.within(turn_timeout(timeout));
        let result = Searcher::new(config).search(board, color);
        match result.decision {
            Decision::Move(mv) => info!(
                "playing {mv} (depth {}, score {:?}, {} nodes, {} ms)",
                result.depth, result.score, result.nodes, result.elapsed_ms
            ),
            Decision::Pass => info!("passing after {} ms", result.elapsed_ms),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use super::*;
    use crate::types::Position;

    const START_ROWS: &str = r#"["R.......","........","........","........","........","........","........",".......B"]"#;

    fn fast_config() -> SearchConfig {
        SearchConfig::compact().with_time_budget(Duration::from_secs(30))
    }

    fn run_script(username: &str, script: &str) -> (Result<SessionSummary>, Vec<serde_json::Value>) {
        let mut out = Vec::new();
        let result = Session::new(
            Cursor::new(script.as_bytes().to_vec()),
            &mut out,
            username,
            fast_config(),
        )
        .run();
        let sent = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (result, sent)
    }

    #[test]
    fn plays_a_legal_move_for_first_player() {
        let turn = format!(r#"{{"type":"your_turn","board":{START_ROWS},"timeout":60}}"#);
        let script = format!(
            "{}\n\nbroken\n{}\n{}\n{}\n{}\n",
            r#"{"type":"register_ack"}"#,
            r#"{"type":"game_start","first_player":"alice"}"#,
            r#"{"type":"chat","text":"hello"}"#,
            turn,
            r#"{"type":"game_over"}"#,
        );

        let (result, sent) = run_script("alice", &script);
        let summary = result.unwrap();

        assert_eq!(summary.color, Color::Red);
        assert_eq!(summary.moves_sent, 1);
        assert!(summary.game_over);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0]["type"], "register");
        assert_eq!(sent[1]["type"], "move");
        assert_eq!(sent[1]["username"], "alice");
        // Red's only piece sits at 1-based (1,1).
        assert_eq!((sent[1]["sx"].as_u64(), sent[1]["sy"].as_u64()), (Some(1), Some(1)));

        let board = Board::from_rows(&serde_json::from_str::<Vec<String>>(START_ROWS).unwrap()).unwrap();
        let to = Position::new(
            sent[1]["tx"].as_u64().unwrap() as u8 - 1,
            sent[1]["ty"].as_u64().unwrap() as u8 - 1,
        );
        assert!(board.legal_moves(Color::Red).iter().any(|mv| mv.to == to));
    }

    #[test]
    fn second_player_passes_when_immobilized() {
        let rows = r#"["BRR.....","RR......","R.R.....","........","........","........","........","........"]"#;
        let turn = format!(r#"{{"type":"your_turn","board":{rows},"timeout":60}}"#);
        let script = format!(
            "{}\n{}\n{}\n",
            r#"{"type":"register_ack"}"#,
            r#"{"type":"game_start","first_player":"alice"}"#,
            turn,
        );

        let (result, sent) = run_script("bob", &script);
        let summary = result.unwrap();

        assert_eq!(summary.color, Color::Blue);
        assert_eq!(summary.passes_sent, 1);
        assert!(!summary.game_over);
        assert_eq!(
            sent[1],
            serde_json::json!({"type": "move", "username": "bob", "sx": 0, "sy": 0, "tx": 0, "ty": 0})
        );
    }

    #[test]
    fn invalid_board_is_skipped() {
        let script = format!(
            "{}\n{}\n{}\n{}\n",
            r#"{"type":"register_ack"}"#,
            r#"{"type":"game_start","first_player":"bob"}"#,
            r#"{"type":"your_turn","board":["RB"],"timeout":1}"#,
            r#"{"type":"game_over"}"#,
        );

        let (result, sent) = run_script("bob", &script);

        assert_eq!(result.unwrap().moves_sent, 0);
        assert_eq!(sent.len(), 1);
    }

    #[test]
    fn rejected_registration_is_an_error() {
        let (result, _) = run_script("bob", "{\"type\":\"game_over\"}\n");

        assert!(matches!(
            result,
            Err(Error::UnexpectedMessage { expected: "register_ack", ref actual }) if actual == "game_over"
        ));
    }

    #[test]
    fn closed_connection_before_start_is_an_error() {
        let (result, _) = run_script("bob", "");
        assert!(matches!(result, Err(Error::ConnectionClosed)));

        let (result, _) = run_script("bob", "{\"type\":\"register_ack\"}\n");
        assert!(matches!(result, Err(Error::ConnectionClosed)));
    }
}
