// grid.rs - Grid engine for Conway's Game of Life

use rand::Rng;

use crate::patterns::Pattern;

/// A cell coordinate as `(x, y)`, i.e. `(column, row)`.
pub type CellCoord = (usize, usize);

type TRow = Vec<bool>;

// Moore neighborhood offsets as (dx, dy)
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Fixed-size board of alive/dead cells, stored as rows of columns.
///
/// Every operation that changes the board returns a new `Grid`; the
/// receiver is never mutated, so the previous generation stays readable
/// while the next one is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<TRow>,
}

impl Grid {
    pub fn empty(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![false; cols]; rows],
        }
    }

    /// Each cell is alive with probability 0.5, drawn from `rng`.
    pub fn random<R: Rng>(cols: usize, rows: usize, rng: &mut R) -> Self {
        let cells = (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_bool(0.5)).collect())
            .collect();
        Self { cols, rows, cells }
    }

    /// Empty board with `pattern` centered on it. Cells that fall off the
    /// board are clipped.
    pub fn with_pattern(cols: usize, rows: usize, pattern: &Pattern) -> Self {
        let mut grid = Self::empty(cols, rows);
        let (pw, ph) = pattern.extent();
        let left = cols.saturating_sub(pw) / 2;
        let top = rows.saturating_sub(ph) / 2;

        for &(dx, dy) in pattern.cells {
            let (x, y) = (left + dx, top + dy);
            if x < cols && y < rows {
                grid.cells[y][x] = true;
            }
        }
        grid
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    fn is_alive(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize).unwrap_or(false)
    }

    /// Live cells among the 8 neighbors of `(x, y)`. The board does not
    /// wrap: anything past an edge counts as dead.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        NEIGHBORS
            .iter()
            .filter(|&&(dx, dy)| self.is_alive(x + dx, y + dy))
            .count() as u8
    }

    /// Next generation under the B3/S23 rule.
    pub fn step(&self) -> Self {
        let cells = (0..self.rows)
            .map(|y| {
                (0..self.cols)
                    .map(|x| {
                        let count = self.count_live_neighbors(x, y);
                        match (self.cells[y][x], count) {
                            (true, 2) | (true, 3) => true, // Survival
                            (false, 3)            => true, // Birth
                            _                     => false, // Death or stays dead
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            cols: self.cols,
            rows: self.rows,
            cells,
        }
    }

    /// Coordinates of live cells, ordered by row then column.
    pub fn live_cells(&self) -> Vec<CellCoord> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &alive)| alive)
                    .map(move |(x, _)| (x, y))
            })
            .collect()
    }

    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .sum()
    }

    /// Copy with `(x, y)` flipped. Out-of-bounds coordinates return an
    /// unchanged copy.
    pub fn toggled(&self, x: usize, y: usize) -> Self {
        let mut next = self.clone();
        if x < self.cols && y < self.rows {
            next.cells[y][x] = !next.cells[y][x];
        }
        next
    }

    pub(crate) fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid_with(cols: usize, rows: usize, live: &[CellCoord]) -> Grid {
        live.iter()
            .fold(Grid::empty(cols, rows), |grid, &(x, y)| grid.toggled(x, y))
    }

    #[test]
    fn empty_grid_stays_empty() {
        let grid = Grid::empty(8, 6);
        assert_eq!(grid.step().step(), grid);
        assert!(grid.step().live_cells().is_empty());
    }

    #[test]
    fn lone_cell_dies() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        assert_eq!(grid.step().population(), 0);
    }

    #[test]
    fn crowded_cell_dies() {
        // plus sign: the centre has 4 neighbours
        let grid = grid_with(5, 5, &[(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)]);
        assert_eq!(grid.count_live_neighbors(2, 2), 4);
        assert_eq!(grid.step().get(2, 2), Some(false));
    }

    #[test]
    fn cell_with_two_or_three_neighbours_survives() {
        let two = grid_with(5, 5, &[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(two.count_live_neighbors(2, 2), 2);
        assert_eq!(two.step().get(2, 2), Some(true));

        let three = grid_with(5, 5, &[(1, 1), (2, 2), (3, 3), (1, 3)]);
        assert_eq!(three.count_live_neighbors(2, 2), 3);
        assert_eq!(three.step().get(2, 2), Some(true));
    }

    #[test]
    fn dead_cell_with_three_neighbours_is_born() {
        let grid = grid_with(5, 5, &[(1, 1), (3, 1), (2, 3)]);
        assert_eq!(grid.get(2, 2), Some(false));
        assert_eq!(grid.step().get(2, 2), Some(true));
    }

    #[test]
    fn neighbours_past_the_edge_are_dead() {
        let full = (0..3)
            .flat_map(|y| (0..3).map(move |x| (x, y)))
            .fold(Grid::empty(3, 3), |g, (x, y)| g.toggled(x, y));

        assert_eq!(full.count_live_neighbors(0, 0), 3);
        assert_eq!(full.count_live_neighbors(1, 0), 5);
        assert_eq!(full.count_live_neighbors(1, 1), 8);
        assert_eq!(full.count_live_neighbors(2, 2), 3);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = grid_with(5, 5, &[(1, 0), (1, 1), (1, 2)]);
        let vertical = horizontal.step();
        assert_eq!(vertical.live_cells(), vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(vertical.step(), horizontal);
    }

    #[test]
    fn step_does_not_touch_input() {
        let grid = grid_with(5, 5, &[(1, 0), (1, 1), (1, 2)]);
        let before = grid.clone();
        let _ = grid.step();
        assert_eq!(grid, before);
    }

    #[test]
    fn live_cells_are_row_major() {
        let grid = grid_with(4, 3, &[(3, 0), (0, 2), (1, 0), (2, 1)]);
        assert_eq!(grid.live_cells(), vec![(1, 0), (3, 0), (2, 1), (0, 2)]);
    }

    #[test]
    fn stepped_live_cells_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = Grid::random(13, 9, &mut rng);
        for _ in 0..20 {
            grid = grid.step();
            assert!(grid.live_cells().iter().all(|&(x, y)| x < 13 && y < 9));
        }
    }

    #[test]
    fn toggle_twice_restores() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = Grid::random(6, 4, &mut rng);
        assert_ne!(grid.toggled(5, 3), grid);
        assert_eq!(grid.toggled(5, 3).toggled(5, 3), grid);
    }

    #[test]
    fn toggle_out_of_bounds_is_ignored() {
        let grid = grid_with(4, 3, &[(0, 0)]);
        assert_eq!(grid.toggled(4, 0), grid);
        assert_eq!(grid.toggled(0, 3), grid);
        assert_eq!(grid.toggled(100, 100), grid);
    }

    #[test]
    fn random_is_about_half_alive() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = Grid::random(200, 200, &mut rng);
        let fraction = grid.population() as f64 / 40_000.0;
        assert!((fraction - 0.5).abs() < 0.02, "live fraction {fraction}");
    }

    #[test]
    fn pattern_is_centered_and_clipped() {
        let blinker = Pattern {
            name: "Blinker",
            cells: &[(0, 0), (1, 0), (2, 0)],
        };
        let grid = Grid::with_pattern(7, 5, &blinker);
        assert_eq!(grid.live_cells(), vec![(2, 2), (3, 2), (4, 2)]);

        let tiny = Grid::with_pattern(2, 1, &blinker);
        assert_eq!(tiny.live_cells(), vec![(0, 0), (1, 0)]);
    }
}
