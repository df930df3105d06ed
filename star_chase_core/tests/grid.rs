use star_chase_core::{
    GridCoord,
    config::GameConfig,
    map::{Grid, GridError, GridModel},
};

#[test]
fn default_field_is_18_by_10() {
    let grid = GameConfig::default().grid();
    assert_eq!(grid.cols(), 18);
    assert_eq!(grid.rows(), 10);
    assert_eq!(grid.cell_size(), 50);
}

#[test]
fn partial_cells_are_dropped() {
    let grid = GridModel::new(125, 99, 25);
    assert_eq!(grid.cols(), 5);
    assert_eq!(grid.rows(), 3);
}

#[test]
fn to_grid_floors() {
    let grid = GridModel::new(900, 500, 50);
    assert_eq!(grid.to_grid(0, 0), GridCoord::new(0, 0));
    assert_eq!(grid.to_grid(49, 49), GridCoord::new(0, 0));
    assert_eq!(grid.to_grid(50, 99), GridCoord::new(1, 1));
    assert_eq!(grid.to_grid(700, 300), GridCoord::new(14, 6));
    assert_eq!(grid.to_grid(100, 300), GridCoord::new(2, 6));
    assert_eq!(grid.to_grid(-1, -50), GridCoord::new(-1, -1));
}

#[test]
fn to_world_is_cell_corner() {
    let grid = GridModel::new(900, 500, 50);
    assert_eq!(grid.to_world(GridCoord::new(13, 6)), (650, 300));
    assert_eq!(grid.to_grid(650, 300), GridCoord::new(13, 6));
}

#[test]
fn contains_matches_bounds() {
    let grid = GridModel::new(900, 500, 50);
    assert!(grid.contains(GridCoord::new(0, 0)));
    assert!(grid.contains(GridCoord::new(17, 9)));
    assert!(!grid.contains(GridCoord::new(18, 9)));
    assert!(!grid.contains(GridCoord::new(17, 10)));
    assert!(!grid.contains(GridCoord::new(-1, 0)));
}

#[test]
fn dense_grid_get_and_set() {
    let model = GridModel::new(40, 30, 10);
    let mut grid: Grid<u8> = Grid::new(&model);
    let cell = GridCoord::new(3, 2);

    assert_eq!(grid.get(cell), Some(&0));
    grid.set(cell, 7).unwrap();
    assert_eq!(grid[cell], 7);
    *grid.get_mut(cell).unwrap() += 1;
    assert_eq!(grid[cell], 8);
    assert_eq!(grid.get(GridCoord::new(4, 0)), None);
}

#[test]
fn dense_grid_set_out_of_bounds_errors() {
    let model = GridModel::new(40, 30, 10);
    let mut grid: Grid<bool> = Grid::new(&model);
    let err = grid.set(GridCoord::new(4, 1), true).unwrap_err();
    assert_eq!(
        err,
        GridError::OutOfBounds {
            col: 4,
            row: 1,
            cols: 4,
            rows: 3,
        }
    );
    assert_eq!(
        err.to_string(),
        "Cell (4, 1) is out of bounds for grid size (4, 3)"
    );
}

#[test]
#[should_panic(expected = "out of bounds")]
fn dense_grid_index_out_of_bounds_panics() {
    let model = GridModel::new(40, 30, 10);
    let grid: Grid<bool> = Grid::new(&model);
    let _value: bool = grid[GridCoord::new(0, -1)];
}
