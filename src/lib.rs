//! Lights Out - the flip-the-plus puzzle
//!
//! Core modules:
//! - `sim`: Board engine (random fill, toggle rule, win check) and sessions
//! - `settings`: Board parameters loaded from JSON
//! - `platform`: Browser/native differences and the JavaScript binding
//! - `error`: Construction and configuration errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{GridError, SettingsError};
pub use settings::Settings;
pub use sim::{Coord, GameEvent, GamePhase, GameState, Grid, create_grid, has_won, toggle};

/// Game configuration constants
pub mod consts {
    /// Default board height
    pub const DEFAULT_ROWS: usize = 3;
    /// Default board width
    pub const DEFAULT_COLS: usize = 3;
    /// Default chance that a cell starts lit
    pub const DEFAULT_LIT_PROBABILITY: f64 = 0.5;
}
