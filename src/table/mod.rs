//! Matrix storage seen by the game logic
//!
//! The logic never touches widgets. A UI exposes its three matrices and the
//! answer vector through `MultiplicationTable`, and the logic reads and writes
//! entries through the `Matrix` capability only.

pub mod cell;
pub mod matrix;
pub mod worksheet;

pub use cell::Cell;
pub use matrix::{Grid, Matrix};
pub use worksheet::Worksheet;

use crate::error::{Error, Result};

/// The matrices of `A * B = C` plus a `1 x n` vector of answer alternatives.
///
/// A is `rows_left x columns_left`, B is `columns_left x columns_right`,
/// C is `rows_left x columns_right`.
pub trait MultiplicationTable {
    /// A
    fn left(&self) -> &dyn Matrix;
    fn left_mut(&mut self) -> &mut dyn Matrix;
    /// B
    fn right(&self) -> &dyn Matrix;
    fn right_mut(&mut self) -> &mut dyn Matrix;
    /// C
    fn product(&self) -> &dyn Matrix;
    fn product_mut(&mut self) -> &mut dyn Matrix;
    /// Answer alternatives, one row
    fn answers(&self) -> &dyn Matrix;
    fn answers_mut(&mut self) -> &mut dyn Matrix;

    /// Show or hide one answer slot (wrong picks get hidden)
    fn set_answer_visible(&mut self, slot: usize, visible: bool);

    /// Whether answer slot `slot` can be picked; `false` out of range
    fn is_answer_visible(&self, slot: usize) -> bool;

    /// The product entry the player is asked for
    fn set_highlight(&mut self, row: usize, col: usize);

    fn rows_left(&self) -> usize {
        self.left().rows()
    }

    fn columns_left(&self) -> usize {
        self.left().columns()
    }

    fn rows_right(&self) -> usize {
        self.right().rows()
    }

    fn columns_right(&self) -> usize {
        self.right().columns()
    }

    fn answer_alternatives(&self) -> usize {
        self.answers().columns()
    }

    /// Copy every entry of every matrix from a table of the same shape
    fn copy_entries(&mut self, from: &dyn MultiplicationTable) -> Result<()> {
        if self.rows_left() != from.rows_left()
            || self.columns_left() != from.columns_left()
            || self.columns_right() != from.columns_right()
            || self.answer_alternatives() != from.answer_alternatives()
        {
            return Err(Error::invalid(format!(
                "cannot copy {}x{}x{} ({} answers) into {}x{}x{} ({} answers)",
                from.rows_left(),
                from.columns_left(),
                from.columns_right(),
                from.answer_alternatives(),
                self.rows_left(),
                self.columns_left(),
                self.columns_right(),
                self.answer_alternatives()
            )));
        }

        copy_matrix(from.left(), self.left_mut());
        copy_matrix(from.right(), self.right_mut());
        copy_matrix(from.product(), self.product_mut());
        copy_matrix(from.answers(), self.answers_mut());
        Ok(())
    }
}

fn copy_matrix(from: &dyn Matrix, to: &mut dyn Matrix) {
    for row in 0..from.rows() {
        for col in 0..from.columns() {
            to.set(row, col, from.get(row, col));
        }
    }
}
