use crate::grid::Grid;
use crate::rules::RuleSet;
use crate::rules::B3S23;

// goes: top left, top, top right, left, right, bottom left, bottom, bottom right
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count the alive neighbors of `(r, c)`.
///
/// The grid does not wrap: neighbors falling outside of `[0, rows) x [0, cols)` are dead.
pub fn count_neighbors(grid: &Grid, r: usize, c: usize) -> u8 {
    let mut n = 0;

    for (dr, dc) in OFFSETS {
        let (Some(r), Some(c)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
            continue;
        };

        if grid.is_alive(r, c) {
            n += 1;
        }
    }

    n
}

/// Compute the next generation of `grid` under Conway's rules.
pub fn step(grid: &Grid) -> Grid {
    step_with(grid, B3S23)
}

/// Compute the next generation of `grid` under `rules`.
///
/// Every cell of the result is derived from `grid` alone, which is borrowed immutably for the
/// whole computation.
pub fn step_with(grid: &Grid, rules: RuleSet) -> Grid {
    Grid::from_fn(grid.rows(), grid.cols(), |r, c| {
        rules.next(grid.is_alive(r, c), count_neighbors(grid, r, c))
    })
}

#[cfg(test)]
mod test {
    use super::count_neighbors;
    use super::step;
    use super::step_with;
    use crate::grid::Grid;
    use crate::rules::RuleSet;

    fn blinker() -> Grid {
        Grid::with_alive(5, 5, &[(1, 1), (1, 2), (1, 3)])
    }

    #[test]
    fn corner_never_wraps() {
        let full = Grid::new(6, 7).invert();

        assert_eq!(count_neighbors(&full, 0, 0), 3);
        assert_eq!(count_neighbors(&full, 5, 6), 3);
        assert_eq!(count_neighbors(&full, 0, 3), 5);
        assert_eq!(count_neighbors(&full, 2, 3), 8);
    }

    #[test]
    fn opposite_edge_is_not_a_neighbor() {
        let grid = Grid::with_alive(5, 5, &[(4, 4), (0, 4), (4, 0)]);

        assert_eq!(count_neighbors(&grid, 0, 0), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let g0 = blinker();
        let g1 = step(&g0);

        assert_eq!(g1, Grid::with_alive(5, 5, &[(0, 2), (1, 2), (2, 2)]));
        assert_eq!(step(&g1), g0);
    }

    #[test]
    fn block_is_still() {
        let block = Grid::with_alive(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);

        assert_eq!(step(&block), block);
    }

    #[test]
    fn block_in_corner_is_still() {
        let block = Grid::with_alive(3, 3, &[(0, 0), (0, 1), (1, 0), (1, 1)]);

        assert_eq!(step(&block), block);
    }

    #[test]
    fn glider_dies_at_wall() {
        // a glider heading into the bottom right corner collapses into a block instead of
        // reappearing on the other side
        let mut grid = Grid::with_alive(6, 6, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);

        for _ in 0..20 {
            grid = step(&grid);
        }

        assert_eq!(grid, Grid::with_alive(6, 6, &[(4, 4), (4, 5), (5, 4), (5, 5)]));
    }

    #[test]
    fn lone_cell_dies() {
        let grid = Grid::with_alive(3, 3, &[(1, 1)]);

        assert!(step(&grid).is_empty());
    }

    #[test]
    fn custom_rule() {
        // under B1/S, a lone cell becomes a ring of eight
        let grid = Grid::with_alive(3, 3, &[(1, 1)]);
        let next = step_with(&grid, RuleSet::new(0b10, 0));

        assert_eq!(next, Grid::with_alive(3, 3, &[(1, 1)]).invert());
    }
}
