//! Line-delimited JSON messages exchanged with the game server.
//!
//! Every message is one JSON object with a `"type"` field followed by `\n`.
//! Coordinates on the wire are 1-based; a pass is sent as all zeros.

use std::io::{BufRead, Write};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Decision;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Register {
        username: String,
    },
    Move {
        username: String,
        sx: u8,
        sy: u8,
        tx: u8,
        ty: u8,
    },
}

impl ClientMessage {
    pub fn register(username: &str) -> Self {
        Self::Register {
            username: username.to_string(),
        }
    }

    pub fn for_decision(username: &str, decision: Decision) -> Self {
        let (sx, sy, tx, ty) = match decision {
            Decision::Move(mv) => (mv.from.row + 1, mv.from.col + 1, mv.to.row + 1, mv.to.col + 1),
            Decision::Pass => (0, 0, 0, 0),
        };
        Self::Move {
            username: username.to_string(),
            sx,
            sy,
            tx,
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    RegisterAck,
    GameStart {
        first_player: String,
    },
    YourTurn {
        board: Vec<String>,
        /// Seconds allowed for this turn.
        timeout: f64,
    },
    GameOver,
    #[serde(other)]
    Other,
}

impl ServerMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RegisterAck => "register_ack",
            Self::GameStart { .. } => "game_start",
            Self::YourTurn { .. } => "your_turn",
            Self::GameOver => "game_over",
            Self::Other => "other",
        }
    }
}

/// Converts a `your_turn` timeout to a duration; negative values become zero.
pub fn turn_timeout(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}

/// Reads one message per line, skipping blank and unparseable lines.
pub struct MessageReader<R> {
    inner: R,
    line: Vec<u8>,
}

impl<R: BufRead> MessageReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::new(),
        }
    }

    /// Next well-formed message, `None` once the stream is closed.
    pub fn recv(&mut self) -> Result<Option<ServerMessage>> {
        loop {
            self.line.clear();
            if self.inner.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }

            let bytes = self.line.trim_ascii();
            if bytes.is_empty() {
                continue;
            }
            match serde_json::from_slice(bytes) {
                Ok(message) => return Ok(Some(message)),
                Err(err) => warn!(
                    "ignoring malformed message {:?}: {err}",
                    String::from_utf8_lossy(bytes)
                ),
            }
        }
    }
}

pub fn send<W: Write>(writer: &mut W, message: &ClientMessage) -> Result<()> {
    serde_json::to_writer(&mut *writer, message)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
