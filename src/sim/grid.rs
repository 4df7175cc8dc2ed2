//! Board state engine
//!
//! A fixed `rows x cols` grid of lit/unlit cells, the plus-shaped flip rule
//! and the win check. Nothing here touches I/O or keeps global state.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Character used for a lit cell in the text form
pub const LIT_CHAR: char = 'O';
/// Character used for an unlit cell in the text form
pub const UNLIT_CHAR: char = '.';

/// Offsets of the cells a toggle flips: center, up, down, left, right
const FLIP_PATTERN: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

/// A (row, col) address. Any integer is allowed; out-of-range values
/// simply address nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift by a (row, col) delta, saturating at the integer limits
    fn offset(self, (dr, dc): (i32, i32)) -> Self {
        Self::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// The puzzle board
///
/// Cells are stored row-major. Dimensions are fixed at construction and
/// are always positive. Serialized as an array of rows of booleans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-unlit grid
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; len],
        })
    }

    /// Build a grid from explicit rows. All rows must have the same,
    /// non-zero length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        let len = check_dimensions(rows.len(), expected)?;

        let mut cells = Vec::with_capacity(len);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(GridError::RaggedRows {
                    row,
                    len: values.len(),
                    expected,
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols: expected,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `coord` addresses a cell of this grid
    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Cell state, or `None` when `coord` is off the board
    pub fn is_lit(&self, coord: Coord) -> Option<bool> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Number of lit cells
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }

    /// Iterate over rows as slices, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.cols)
    }

    /// Flip a single cell if it is on the board
    fn flip(&mut self, coord: Coord) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = !self.cells[i];
        }
    }

    /// Apply the toggle rule to this grid, mutating it.
    ///
    /// Flips `coord` and its four orthogonal neighbors; positions off the
    /// board are skipped. Callers that need the previous state must use
    /// [`toggle`] instead.
    pub fn toggle_in_place(&mut self, coord: Coord) {
        for delta in FLIP_PATTERN {
            self.flip(coord.offset(delta));
        }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let row = usize::try_from(coord.row).ok()?;
        let col = usize::try_from(coord.col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

/// Largest side length a [`Coord`] can still address
pub const MAX_SIDE: usize = i32::MAX as usize;

/// Validate board dimensions and return the cell count.
///
/// Both sides must be positive and addressable by a [`Coord`], and their
/// product must be a length a `Vec` can hold.
pub(crate) fn check_dimensions(rows: usize, cols: usize) -> Result<usize, GridError> {
    let invalid = GridError::InvalidDimensions { rows, cols };
    if rows == 0 || cols == 0 || rows > MAX_SIDE || cols > MAX_SIDE {
        return Err(invalid);
    }
    rows.checked_mul(cols)
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(invalid)
}

/// Create a randomly filled grid.
///
/// Each cell is lit independently when a uniform draw in `[0, 1)` falls
/// below `lit_probability`, so `0.0` never lights a cell and `1.0` always
/// does. Cells are drawn in row-major order, which makes the result a pure
/// function of the generator's state.
pub fn create_grid<R: Rng>(
    rows: usize,
    cols: usize,
    lit_probability: f64,
    rng: &mut R,
) -> Result<Grid, GridError> {
    check_probability(lit_probability)?;
    let mut grid = Grid::new(rows, cols)?;
    for cell in &mut grid.cells {
        *cell = rng.random::<f64>() < lit_probability;
    }
    Ok(grid)
}

pub(crate) fn check_probability(p: f64) -> Result<(), GridError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GridError::InvalidProbability(p));
    }
    Ok(())
}

/// Toggle `coord` and return the resulting grid. `grid` is left untouched.
pub fn toggle(grid: &Grid, coord: Coord) -> Grid {
    let mut next = grid.clone();
    next.toggle_in_place(coord);
    next
}

/// True iff every cell is lit
pub fn has_won(grid: &Grid) -> bool {
    grid.cells.iter().all(|&lit| lit)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &lit in row {
                write!(f, "{}", if lit { LIT_CHAR } else { UNLIT_CHAR })?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse the text form: one line per row, `O` lit and `.` unlit.
    /// Surrounding whitespace on each line is ignored, blank lines skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        LIT_CHAR => Ok(true),
                        UNLIT_CHAR => Ok(false),
                        _ => Err(GridError::BadCell { ch, row, col }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<bool>> {
    fn from(grid: Grid) -> Self {
        grid.iter_rows().map(<[bool]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    fn lit_cells(grid: &Grid) -> Vec<(i32, i32)> {
        let mut lit = Vec::new();
        for row in 0..grid.rows() as i32 {
            for col in 0..grid.cols() as i32 {
                if grid.is_lit(Coord::new(row, col)) == Some(true) {
                    lit.push((row, col));
                }
            }
        }
        lit
    }

    fn changed_cells(a: &Grid, b: &Grid) -> usize {
        a.cells.iter().zip(&b.cells).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_toggle_center_makes_plus() {
        let before = Grid::new(3, 3).unwrap();
        let after = toggle(&before, Coord::new(1, 1));
        assert_eq!(lit_cells(&after), vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]);
        assert!(!has_won(&after));
        // Original is untouched
        assert_eq!(before.lit_count(), 0);
    }

    #[test]
    fn test_toggle_corner() {
        let after = toggle(&Grid::new(3, 3).unwrap(), Coord::new(0, 0));
        assert_eq!(lit_cells(&after), vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_toggle_neighbor_counts() {
        let g = Grid::new(4, 5).unwrap();
        assert_eq!(changed_cells(&g, &toggle(&g, Coord::new(3, 4))), 3);
        assert_eq!(changed_cells(&g, &toggle(&g, Coord::new(0, 2))), 4);
        assert_eq!(changed_cells(&g, &toggle(&g, Coord::new(2, 0))), 4);
        assert_eq!(changed_cells(&g, &toggle(&g, Coord::new(2, 2))), 5);
    }

    #[test]
    fn test_toggle_off_board_no_wraparound() {
        let g = Grid::new(3, 3).unwrap();
        // Center off board, one neighbor on it
        let after = toggle(&g, Coord::new(-1, 0));
        assert_eq!(lit_cells(&after), vec![(0, 0)]);

        let after = toggle(&g, Coord::new(3, 3));
        assert_eq!(after, g);

        let after = toggle(&g, Coord::new(i32::MIN, i32::MAX));
        assert_eq!(after, g);
    }

    #[test]
    fn test_single_cell_grid() {
        let g = Grid::new(1, 1).unwrap();
        let after = toggle(&g, Coord::new(0, 0));
        assert!(has_won(&after));
        assert_eq!(changed_cells(&g, &after), 1);
    }

    #[test]
    fn test_has_won() {
        assert!(has_won(&grid("OOO\nOOO")));
        assert!(!has_won(&grid("OOO\nO.O")));
        assert!(!has_won(&Grid::new(2, 2).unwrap()));
    }

    #[test]
    fn test_toggle_in_place_matches_toggle() {
        let g = grid("O..\n.O.\n..O");
        let mut h = g.clone();
        h.toggle_in_place(Coord::new(1, 2));
        assert_eq!(h, toggle(&g, Coord::new(1, 2)));
        assert_ne!(h, g);
    }

    #[test]
    fn test_create_grid_extremes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let dark = create_grid(4, 6, 0.0, &mut rng).unwrap();
        assert_eq!((dark.rows(), dark.cols()), (4, 6));
        assert_eq!(dark.lit_count(), 0);

        let lit = create_grid(5, 2, 1.0, &mut rng).unwrap();
        assert_eq!((lit.rows(), lit.cols()), (5, 2));
        assert!(has_won(&lit));
    }

    #[test]
    fn test_create_grid_seeded_is_deterministic() {
        let a = create_grid(8, 8, 0.5, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = create_grid(8, 8, 0.5, &mut Pcg32::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        // 64 fair coin flips are neither all heads nor all tails
        assert!(a.lit_count() > 0 && a.lit_count() < 64);
    }

    #[test]
    fn test_create_grid_rejects_bad_input() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            create_grid(0, 3, 0.5, &mut rng),
            Err(GridError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            create_grid(3, 0, 0.5, &mut rng),
            Err(GridError::InvalidDimensions { rows: 3, cols: 0 })
        );
        assert_eq!(
            create_grid(3, 3, 1.5, &mut rng),
            Err(GridError::InvalidProbability(1.5))
        );
        assert!(create_grid(3, 3, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(GridError::InvalidDimensions {
                rows: usize::MAX,
                cols: 2
            })
        );
        // Sides a Coord cannot reach
        assert!(Grid::new(MAX_SIDE + 1, 1).is_err());
        assert!(Grid::new(1, MAX_SIDE + 1).is_err());

        let mut rng = Pcg32::seed_from_u64(3);
        assert!(matches!(
            create_grid(usize::MAX, usize::MAX, 0.5, &mut rng),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_from_rows_errors() {
        assert!(matches!(
            Grid::from_rows(vec![]),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert_eq!(
            Grid::from_rows(vec![vec![true, false], vec![true]]),
            Err(GridError::RaggedRows {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            "O.\n.x".parse::<Grid>(),
            Err(GridError::BadCell {
                ch: 'x',
                row: 1,
                col: 1
            })
        );
    }

    #[test]
    fn test_text_form() {
        let g = grid(
            "
            ...
            OO.
            ...
            ",
        );
        assert_eq!(g.to_string(), "...\nOO.\n...");
        assert_eq!(g.to_string().parse::<Grid>().unwrap(), g);
    }

    #[test]
    fn test_json_form() {
        let g = grid("...\nOO.");
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[false,false,false],[true,true,false]]");
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), g);
        assert!(serde_json::from_str::<Grid>("[[true],[true,false]]").is_err());
        assert!(serde_json::from_str::<Grid>("[]").is_err());
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| Grid {
                rows,
                cols,
                cells,
            })
        })
    }

    fn arb_grid_and_coord() -> impl Strategy<Value = (Grid, Coord)> {
        arb_grid().prop_flat_map(|g| {
            let (rows, cols) = (g.rows() as i32, g.cols() as i32);
            (Just(g), -2..rows + 2, -2..cols + 2)
                .prop_map(|(g, row, col)| (g, Coord::new(row, col)))
        })
    }

    proptest! {
        #[test]
        fn prop_toggle_twice_restores((g, c) in arb_grid_and_coord()) {
            prop_assert_eq!(toggle(&toggle(&g, c), c), g);
        }

        #[test]
        fn prop_toggle_flips_only_in_bounds_plus((g, c) in arb_grid_and_coord()) {
            let after = toggle(&g, c);
            prop_assert_eq!((after.rows(), after.cols()), (g.rows(), g.cols()));
            let expected = FLIP_PATTERN
                .iter()
                .filter(|&&d| g.in_bounds(c.offset(d)))
                .count();
            prop_assert_eq!(changed_cells(&g, &after), expected);
            for d in FLIP_PATTERN {
                let n = c.offset(d);
                if let Some(lit) = g.is_lit(n) {
                    prop_assert_eq!(after.is_lit(n), Some(!lit));
                }
            }
        }

        #[test]
        fn prop_has_won_iff_all_lit(g in arb_grid()) {
            prop_assert_eq!(has_won(&g), g.lit_count() == g.rows() * g.cols());
        }

        #[test]
        fn prop_unlighting_any_cell_loses(rows in 1usize..8, cols in 1usize..8, pick in any::<prop::sample::Index>()) {
            let mut g = Grid::from_rows(vec![vec![true; cols]; rows]).unwrap();
            prop_assert!(has_won(&g));
            let i = pick.index(rows * cols);
            g.cells[i] = false;
            prop_assert!(!has_won(&g));
        }
    }
}
