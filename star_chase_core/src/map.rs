use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::GridCoord;

/// Represents errors that can occur within the grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Cell ({col}, {row}) is out of bounds for grid size ({cols}, {rows})")]
    OutOfBounds {
        col: i32,
        row: i32,
        cols: i32,
        rows: i32,
    },
}

/// The discretization of the continuous playfield into square cells.
///
/// `cols` and `rows` are the number of whole cells that fit in the field;
/// a partial strip along the right or bottom edge belongs to no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    cell_size: i32,
    cols: i32,
    rows: i32,
}

impl GridModel {
    /// Builds the grid for a `field_width` x `field_height` playfield.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not positive. `GameConfig::validate` rejects
    /// such configurations before a grid is ever built from them.
    pub fn new(field_width: i32, field_height: i32, cell_size: i32) -> Self {
        assert!(cell_size > 0, "cell size must be positive");
        GridModel {
            cell_size,
            cols: field_width.div_euclid(cell_size),
            rows: field_height.div_euclid(cell_size),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Converts a world position to the cell containing it (floor division).
    pub fn to_grid(&self, x: i32, y: i32) -> GridCoord {
        GridCoord {
            col: x.div_euclid(self.cell_size),
            row: y.div_euclid(self.cell_size),
        }
    }

    /// Returns the world position of a cell's top-left corner.
    pub fn to_world(&self, cell: GridCoord) -> (i32, i32) {
        (cell.col * self.cell_size, cell.row * self.cell_size)
    }

    /// Checks if the cell is part of the grid graph.
    #[inline]
    pub fn contains(&self, cell: GridCoord) -> bool {
        (0..self.cols).contains(&cell.col) && (0..self.rows).contains(&cell.row)
    }
}

/// A dense per-cell store for a `GridModel`.
///
/// Stores elements of type `T` in a flat vector using row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cols: i32,
    rows: i32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a grid covering every cell of `model`, filled with default values.
    pub fn new(model: &GridModel) -> Self
    where
        T: Default + Clone,
    {
        let size = (model.cols().max(0) as usize) * (model.rows().max(0) as usize);
        Grid {
            cols: model.cols(),
            rows: model.rows(),
            cells: vec![T::default(); size],
        }
    }

    /// Converts a cell to a flat vector index.
    ///
    /// Returns `None` if the cell is out of bounds.
    #[inline]
    fn index_of(&self, cell: GridCoord) -> Option<usize> {
        if (0..self.cols).contains(&cell.col) && (0..self.rows).contains(&cell.row) {
            Some((cell.row * self.cols + cell.col) as usize)
        } else {
            None
        }
    }

    /// Gets an immutable reference to the value at `cell`.
    pub fn get(&self, cell: GridCoord) -> Option<&T> {
        self.cells.get(self.index_of(cell)?)
    }

    /// Gets a mutable reference to the value at `cell`.
    pub fn get_mut(&mut self, cell: GridCoord) -> Option<&mut T> {
        let index = self.index_of(cell)?;
        self.cells.get_mut(index)
    }

    /// Sets the value at `cell`.
    ///
    /// Returns `Err(GridError::OutOfBounds)` if the cell is not in the grid.
    pub fn set(&mut self, cell: GridCoord, value: T) -> Result<(), GridError> {
        let index = self.index_of(cell).ok_or(GridError::OutOfBounds {
            col: cell.col,
            row: cell.row,
            cols: self.cols,
            rows: self.rows,
        })?;
        self.cells[index] = value;
        Ok(())
    }
}

impl<T> Index<GridCoord> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, cell: GridCoord) -> &Self::Output {
        match self.index_of(cell) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size ({}, {})",
                cell.col, cell.row, self.cols, self.rows
            ),
        }
    }
}

impl<T> IndexMut<GridCoord> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, cell: GridCoord) -> &mut Self::Output {
        let (cols, rows) = (self.cols, self.rows);
        match self.index_of(cell) {
            Some(idx) => &mut self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size ({}, {})",
                cell.col, cell.row, cols, rows
            ),
        }
    }
}
