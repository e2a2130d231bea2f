use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod types;

pub use ai::search::{SearchResult, Searcher};
pub use board::Board;
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use types::{Cell, Color, Decision, Move, MoveKind, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Chooses a move for `color` (`"R"` or `"B"`) on a board given as eight row
/// strings. `config` may be `undefined` to use the default profile.
#[wasm_bindgen(js_name = selectMove)]
pub fn select_move(rows: JsValue, color: &str, config: JsValue) -> std::result::Result<JsValue, JsError> {
    let rows: Vec<String> = serde_wasm_bindgen::from_value(rows)?;
    let board = Board::from_rows(&rows)?;
    let color: Color = color.parse()?;
    let config = serde_wasm_bindgen::from_value::<Option<SearchConfig>>(config)?
        .unwrap_or_default()
        .normalized();

    let result = Searcher::new(config).search(&board, color);
    Ok(serde_wasm_bindgen::to_value(&result)?)
}
