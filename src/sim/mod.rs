//! Deterministic game logic
//!
//! All gameplay lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Copy-on-write toggles unless the caller owns the grid mutably
//! - No rendering or platform dependencies

pub mod grid;
pub mod state;

pub use grid::{Coord, Grid, create_grid, has_won, toggle};
pub use state::{GameEvent, GamePhase, GameState};
