//! Session state
//!
//! One board from creation until it is won or restarted. The win check on
//! the grid is the only thing that decides the phase.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Coord, Grid, create_grid, has_won};
use crate::error::GridError;
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting clicks
    Playing,
    /// Every cell is lit; terminal
    Won,
}

/// Outcome of a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Cells flipped, board not yet solved
    Toggled,
    /// This click lit the last cells
    Won,
    /// Nothing changed (session already won, or click off the board)
    Ignored,
}

/// Complete session state (deterministic, serializable)
///
/// The phase is never read back from saved data; loading recomputes it
/// from the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SavedGame")]
pub struct GameState {
    /// Seed the board was generated from
    pub seed: u64,
    /// Board parameters, reused on restart
    pub settings: Settings,
    /// Current phase
    phase: GamePhase,
    /// Clicks that changed the board
    moves: u32,
    grid: Grid,
}

/// Fields trusted when loading a session
#[derive(Deserialize)]
struct SavedGame {
    seed: u64,
    settings: Settings,
    moves: u32,
    grid: Grid,
}

impl TryFrom<SavedGame> for GameState {
    type Error = GridError;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        let SavedGame {
            seed,
            settings,
            moves,
            grid,
        } = saved;
        settings.validate()?;
        if (grid.rows(), grid.cols()) != (settings.rows, settings.cols) {
            return Err(GridError::DimensionMismatch {
                rows: grid.rows(),
                cols: grid.cols(),
                expected_rows: settings.rows,
                expected_cols: settings.cols,
            });
        }
        Ok(Self {
            seed,
            settings,
            phase: phase_of(&grid),
            moves,
            grid,
        })
    }
}

fn phase_of(grid: &Grid) -> GamePhase {
    if has_won(grid) {
        GamePhase::Won
    } else {
        GamePhase::Playing
    }
}

impl GameState {
    /// Start a session with a board generated from `seed`
    pub fn new(settings: Settings, seed: u64) -> Result<Self, GridError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = create_grid(
            settings.rows,
            settings.cols,
            settings.lit_probability,
            &mut rng,
        )?;
        Ok(Self::from_grid(settings, seed, grid))
    }

    /// Start a session on a prepared board. The board's dimensions replace
    /// those in `settings`.
    pub fn from_grid(mut settings: Settings, seed: u64, grid: Grid) -> Self {
        settings.rows = grid.rows();
        settings.cols = grid.cols();
        log::info!(
            "New {}x{} board (seed {}, {} lit)",
            grid.rows(),
            grid.cols(),
            seed,
            grid.lit_count()
        );
        Self {
            seed,
            settings,
            // A random fill can come out fully lit
            phase: phase_of(&grid),
            moves: 0,
            grid,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Clicks that changed the board, saturating at `u32::MAX`
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Handle a click on `coord`
    pub fn click(&mut self, coord: Coord) -> GameEvent {
        if self.phase == GamePhase::Won {
            log::trace!("Ignoring click at {:?}: already won", coord);
            return GameEvent::Ignored;
        }
        if !self.grid.in_bounds(coord) {
            log::trace!("Ignoring click at {:?}: off the board", coord);
            return GameEvent::Ignored;
        }

        self.grid.toggle_in_place(coord);
        self.moves = self.moves.saturating_add(1);
        log::debug!("Move {}: toggled ({}, {})", self.moves, coord.row, coord.col);

        if has_won(&self.grid) {
            self.phase = GamePhase::Won;
            log::info!("Board solved in {} moves", self.moves);
            GameEvent::Won
        } else {
            GameEvent::Toggled
        }
    }

    /// Throw the board away and deal a new one with the same settings
    pub fn restart(&mut self, seed: u64) -> Result<(), GridError> {
        *self = Self::new(self.settings.clone(), seed)?;
        Ok(())
    }
}
