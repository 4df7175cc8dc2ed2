//! JavaScript binding for the web front-end
//!
//! The page owns rendering and pointer input; it forwards each clicked
//! cell here and asks whether the board is solved.

use wasm_bindgen::prelude::*;

use super::entropy_seed;
use crate::Settings;
use crate::sim::{Coord, GameEvent, GameState};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Lights Out ready");
}

/// One game session as seen from JavaScript
#[wasm_bindgen]
pub struct LightsOut {
    state: GameState,
}

#[wasm_bindgen]
impl LightsOut {
    /// Deal a new board with the given parameters
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize, lit_probability: f64) -> Result<LightsOut, JsError> {
        let settings = Settings {
            rows,
            cols,
            lit_probability,
        };
        Ok(Self {
            state: GameState::new(settings, entropy_seed())?,
        })
    }

    /// Deal a 3x3 board at even odds
    #[wasm_bindgen(js_name = withDefaults)]
    pub fn with_defaults() -> Result<LightsOut, JsError> {
        Ok(Self {
            state: GameState::new(Settings::default(), entropy_seed())?,
        })
    }

    /// Deal a board from a JSON settings object
    #[wasm_bindgen(js_name = fromSettingsJson)]
    pub fn from_settings_json(json: &str) -> Result<LightsOut, JsError> {
        let settings = Settings::from_json(json)?;
        Ok(Self {
            state: GameState::new(settings, entropy_seed())?,
        })
    }

    /// Forward a click. Returns true when the board is solved afterwards.
    pub fn toggle(&mut self, row: i32, col: i32) -> bool {
        if self.state.click(Coord::new(row, col)) == GameEvent::Ignored {
            log::debug!("Click at ({}, {}) ignored", row, col);
        }
        self.state.is_won()
    }

    #[wasm_bindgen(js_name = hasWon)]
    pub fn has_won(&self) -> bool {
        self.state.is_won()
    }

    #[wasm_bindgen(js_name = isLit)]
    pub fn is_lit(&self, row: i32, col: i32) -> bool {
        self.state.grid().is_lit(Coord::new(row, col)).unwrap_or(false)
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> usize {
        self.state.grid().rows()
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> usize {
        self.state.grid().cols()
    }

    #[wasm_bindgen(getter)]
    pub fn moves(&self) -> u32 {
        self.state.moves()
    }

    /// Board as an array of rows of booleans
    #[wasm_bindgen(js_name = boardJson)]
    pub fn board_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.state.grid())?)
    }

    /// Start over with a fresh board of the same size
    pub fn restart(&mut self) -> Result<(), JsError> {
        let seed = entropy_seed();
        self.state.restart(seed)?;
        log::info!("Restarted with seed: {}", seed);
        Ok(())
    }
}
