use digit_life::digits::render_digits;
use digit_life::digits::DIGIT_ROWS;
use digit_life::grid::Grid;
use digit_life::resize::resize;
use digit_life::rules::B3S23;
use digit_life::step::count_neighbors;
use digit_life::step::step;
use digit_life::Error;
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1..16usize, 1..16usize).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| {
            let rows: Vec<Vec<bool>> = cells.chunks(cols).map(|row| row.to_vec()).collect();
            Grid::from_rows(&rows)
        })
    })
}

/// The next generation, computed bottom-right to top-left into a separate buffer
fn step_backwards(grid: &Grid) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut next = vec![vec![false; cols]; rows];

    for r in (0..rows).rev() {
        for c in (0..cols).rev() {
            next[r][c] = B3S23.next(grid.is_alive(r, c), count_neighbors(grid, r, c));
        }
    }

    Grid::from_rows(&next)
}

proptest! {
    #[test]
    fn step_only_reads_the_snapshot(grid in grid_strategy()) {
        prop_assert_eq!(step(&grid), step_backwards(&grid));
    }

    #[test]
    fn step_keeps_dimensions(grid in grid_strategy()) {
        let next = step(&grid);

        prop_assert_eq!(next.rows(), grid.rows());
        prop_assert_eq!(next.cols(), grid.cols());
    }

    #[test]
    fn corners_have_at_most_three_neighbors(grid in grid_strategy()) {
        let (r, c) = (grid.rows() - 1, grid.cols() - 1);

        prop_assert!(count_neighbors(&grid, 0, 0) <= 3);
        prop_assert!(count_neighbors(&grid, 0, c) <= 3);
        prop_assert!(count_neighbors(&grid, r, 0) <= 3);
        prop_assert!(count_neighbors(&grid, r, c) <= 3);
    }

    #[test]
    fn empty_stays_empty(rows in 1..30usize, cols in 1..30usize, n in 0..10usize) {
        let mut grid = Grid::new(rows, cols);

        for _ in 0..n {
            grid = step(&grid);
        }

        prop_assert!(grid.is_empty());
    }

    #[test]
    fn resize_matches_requested_size(grid in grid_strategy(), rows in 1..40usize, cols in 1..40usize) {
        let resized = resize(&grid, rows, cols);

        prop_assert_eq!(resized.rows(), rows);
        prop_assert_eq!(resized.cols(), cols);

        let back = resize(&resized, grid.rows(), grid.cols());
        prop_assert_eq!(back.rows(), grid.rows());
        prop_assert_eq!(back.cols(), grid.cols());
    }

    #[test]
    fn upscaling_by_whole_factors_round_trips(grid in grid_strategy(), k in 1..4usize) {
        // unlike arbitrary resizes, integer upscaling loses nothing
        let big = resize(&grid, grid.rows() * k, grid.cols() * k);

        prop_assert_eq!(big.population(), grid.population() * k * k);
        prop_assert_eq!(resize(&big, grid.rows(), grid.cols()), grid);
    }

    #[test]
    fn toggle_twice_is_identity(grid in grid_strategy(), r in 0..16usize, c in 0..16usize) {
        match grid.toggle(r, c) {
            Ok(once) => {
                prop_assert_ne!(&once, &grid);
                prop_assert_eq!(once.toggle(r, c).unwrap(), grid);
            }
            Err(e) => {
                let out_of_range = matches!(e, Error::OutOfRange { .. });
                prop_assert!(out_of_range);
                prop_assert!(r >= grid.rows() || c >= grid.cols());
            }
        }
    }

    #[test]
    fn invert_twice_is_identity(grid in grid_strategy()) {
        let inverted = grid.invert();

        prop_assert_eq!(inverted.population(), grid.rows() * grid.cols() - grid.population());
        prop_assert_eq!(inverted.invert(), grid);
    }

    #[test]
    fn valid_numbers_render(number in "[0-9]{1,8}", cols in 10..200usize) {
        let grid = render_digits(&number, cols).unwrap();

        prop_assert_eq!(grid.rows(), DIGIT_ROWS);
        prop_assert_eq!(grid.cols(), cols);
        prop_assert!(!grid.is_empty());
    }

    #[test]
    fn non_digits_are_rejected(number in "[0-9]{0,3}[^0-9][0-9]{0,3}") {
        let rejected = matches!(
            render_digits(&number, 100),
            Err(Error::InvalidDigitInput { .. })
        );

        prop_assert!(rejected);
    }

    #[test]
    fn long_numbers_are_rejected(number in "[0-9]{9,12}") {
        prop_assert!(render_digits(&number, 100).is_err());
    }
}
