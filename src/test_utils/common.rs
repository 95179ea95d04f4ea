use crate::Grid;

/// One-dimensional grid holding 5, 6 and 7 at -10, 0 and 10.
pub(crate) fn line_grid() -> Grid<i32> {
    let grid = Grid::new();
    grid.set(-10, 5);
    grid.set(0, 6);
    grid.set(10, 7);
    grid
}

/// Ragged two-dimensional grid rendering as `[[3],[4],[5,6]]`.
pub(crate) fn ragged_grid() -> Grid<i32> {
    let grid = Grid::new();
    for (row, column, value) in [(1, 2, 3), (2, 2, 4), (3, 1, 5), (3, 2, 6)] {
        grid.at(row).unwrap().set(column, value);
    }
    grid
}

/// Square grid covering `-radius..=radius` on both axes; every cell holds
/// its Manhattan distance from the origin.
pub(crate) fn square_grid(radius: i64) -> Grid<i64> {
    let grid = Grid::new();
    for x in -radius..=radius {
        let row = grid.at(x).unwrap();
        for y in -radius..=radius {
            row.set(y, x.abs() + y.abs());
        }
    }
    grid
}
