//! Matrix capability and a dense grid implementation

use serde::{Deserialize, Serialize};

use super::Cell;

/// A rectangular grid of entries. `(0, 0)` is the top left.
///
/// Callers keep `row < rows()` and `col < columns()`.
pub trait Matrix {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> Cell;
    fn set(&mut self, row: usize, col: usize, cell: Cell);

    /// Number of entries
    fn size(&self) -> usize {
        self.rows() * self.columns()
    }
}

/// Row-major grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Grid of empty entries
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        }
    }

    /// Grid from integer rows; all rows must have the same length
    pub fn from_rows(rows: &[&[i64]]) -> Self {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut grid = Self::new(rows.len(), columns);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), columns, "ragged rows");
            for (j, value) in row.iter().enumerate() {
                grid.set(i, j, Cell::Value(*value));
            }
        }
        grid
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.columns,
            "entry ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.columns
        );
        row * self.columns + col
    }
}

impl Matrix for Grid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)].clone()
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let i = self.index(row, col);
        self.cells[i] = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let grid = Grid::new(2, 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.size(), 6);
        assert!(grid.get(1, 2).is_empty());
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let grid = Grid::from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(grid.get(0, 2), Cell::Value(3));
        assert_eq!(grid.get(1, 0), Cell::Value(4));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        Grid::new(1, 1).get(1, 0);
    }
}
