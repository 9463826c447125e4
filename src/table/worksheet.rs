//! Headless multiplication table
//!
//! Used by the text driver and by tests in place of an on-screen table.

use serde::{Deserialize, Serialize};

use super::{Grid, Matrix, MultiplicationTable};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    left: Grid,
    right: Grid,
    product: Grid,
    answers: Grid,
    answer_visible: Vec<bool>,
    highlight: Option<(usize, usize)>,
}

impl Worksheet {
    /// Empty worksheet for `A (rows_left x columns_left) * B (columns_left x columns_right)`
    pub fn new(
        rows_left: usize,
        columns_left: usize,
        columns_right: usize,
        answer_alternatives: usize,
    ) -> Self {
        Self {
            left: Grid::new(rows_left, columns_left),
            right: Grid::new(columns_left, columns_right),
            product: Grid::new(rows_left, columns_right),
            answers: Grid::new(1, answer_alternatives),
            answer_visible: vec![true; answer_alternatives],
            highlight: None,
        }
    }

    /// Worksheet with given A and B and an empty product
    pub fn from_matrices(left: Grid, right: Grid, answer_alternatives: usize) -> Result<Self> {
        if left.columns() != right.rows() {
            return Err(Error::invalid(format!(
                "A has {} columns but B has {} rows",
                left.columns(),
                right.rows()
            )));
        }
        let product = Grid::new(left.rows(), right.columns());
        Ok(Self {
            left,
            right,
            product,
            answers: Grid::new(1, answer_alternatives),
            answer_visible: vec![true; answer_alternatives],
            highlight: None,
        })
    }

    /// Last highlight published by the logic
    pub fn highlight(&self) -> Option<(usize, usize)> {
        self.highlight
    }
}

impl MultiplicationTable for Worksheet {
    fn left(&self) -> &dyn Matrix {
        &self.left
    }

    fn left_mut(&mut self) -> &mut dyn Matrix {
        &mut self.left
    }

    fn right(&self) -> &dyn Matrix {
        &self.right
    }

    fn right_mut(&mut self) -> &mut dyn Matrix {
        &mut self.right
    }

    fn product(&self) -> &dyn Matrix {
        &self.product
    }

    fn product_mut(&mut self) -> &mut dyn Matrix {
        &mut self.product
    }

    fn answers(&self) -> &dyn Matrix {
        &self.answers
    }

    fn answers_mut(&mut self) -> &mut dyn Matrix {
        &mut self.answers
    }

    fn set_answer_visible(&mut self, slot: usize, visible: bool) {
        if let Some(v) = self.answer_visible.get_mut(slot) {
            *v = visible;
        }
    }

    fn is_answer_visible(&self, slot: usize) -> bool {
        self.answer_visible.get(slot).copied().unwrap_or(false)
    }

    fn set_highlight(&mut self, row: usize, col: usize) {
        self.highlight = Some((row, col));
    }
}
