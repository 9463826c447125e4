//! Rules of the game
//!
//! A round iterates over the entries of the product matrix C in column-major
//! order. For each entry the player picks a value; right answers fill in the
//! entry and move on, wrong answers cost points.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::answers::generate_alternatives;
use super::scoring::score_weight;
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::table::{Cell, Matrix, MultiplicationTable};

/// Where a round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No table attached (before `init`, or right after `new_game`)
    Uninitialized,
    /// Table attached, entries left to answer
    AwaitingAnswer,
    /// Every product entry answered
    Complete,
}

/// Dimensions for `GameLogic::new_game_with`; `None` draws from the settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewGame {
    pub rows_left: Option<usize>,
    pub columns_left: Option<usize>,
    pub columns_right: Option<usize>,
    pub answer_alternatives: Option<usize>,
}

/// State machine for one player.
///
/// Sequence per round: `new_game`, `init`, then `advance` until complete.
#[derive(Debug)]
pub struct GameLogic<T> {
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    table: Option<T>,

    rows_left: usize,
    columns_left: usize,
    columns_right: usize,
    answer_alternatives: usize,

    /// Product entries answered this round
    progress: usize,
    /// Total across rounds
    score: i64,
    /// Net points of the current round, half of which carries over on completion
    score_this_round: i64,
    completed: bool,
}

impl<T: MultiplicationTable> GameLogic<T> {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            table: None,
            rows_left: 0,
            columns_left: 0,
            columns_right: 0,
            answer_alternatives: 0,
            progress: 0,
            score: 0,
            score_this_round: 0,
            completed: false,
        }
    }

    /// Start a round with dimensions drawn from the settings
    pub fn new_game(&mut self) -> Result<()> {
        self.new_game_with(NewGame::default())
    }

    /// Start a round. Must be called before each `init`.
    ///
    /// Fails without changing anything if a dimension resolves below one.
    pub fn new_game_with(&mut self, dims: NewGame) -> Result<()> {
        let rows_left = resolve("rows_left", dims.rows_left, || self.random_rows_left())?;
        let columns_left =
            resolve("columns_left", dims.columns_left, || self.random_columns_left())?;
        let columns_right =
            resolve("columns_right", dims.columns_right, || self.random_columns_right())?;
        let answer_alternatives = resolve("answer_alternatives", dims.answer_alternatives, || {
            Ok(self.settings.answer_alternatives())
        })?;

        self.rows_left = rows_left;
        self.columns_left = columns_left;
        self.columns_right = columns_right;
        self.answer_alternatives = answer_alternatives;
        self.progress = 0;
        self.table = None;
        if !self.completed {
            // Abandoned rounds carry nothing over
            self.score_this_round = 0;
        }

        log::info!(
            "New game: {}x{} * {}x{} with {} alternatives",
            rows_left,
            columns_left,
            columns_left,
            columns_right,
            answer_alternatives
        );
        Ok(())
    }

    pub fn random_rows_left(&mut self) -> Result<i32> {
        let (min, max) = (self.settings.min_rows_left(), self.settings.max_rows_left());
        self.random_in("rows_left", min, max)
    }

    pub fn random_columns_left(&mut self) -> Result<i32> {
        let (min, max) = (
            self.settings.min_columns_left(),
            self.settings.max_columns_left(),
        );
        self.random_in("columns_left", min, max)
    }

    pub fn random_columns_right(&mut self) -> Result<i32> {
        let (min, max) = (
            self.settings.min_columns_right(),
            self.settings.max_columns_right(),
        );
        self.random_in("columns_right", min, max)
    }

    fn random_in(&mut self, name: &str, min: i32, max: i32) -> Result<i32> {
        if min > max {
            return Err(Error::invalid(format!(
                "{} range {}..={} is empty",
                name, min, max
            )));
        }
        Ok(self.rng.random_range(min..=max))
    }

    /// Attach a table whose shape matches the last `new_game`.
    ///
    /// Publishes the highlighted entry. The first `init` after a `new_game`
    /// grants half of the previous round's net score if that round was
    /// completed; re-attaching a table mid-round grants nothing.
    pub fn init(&mut self, mut table: T) -> Result<()> {
        if self.rows_left == 0 || self.columns_left == 0 || self.columns_right == 0 {
            return Err(Error::invalid("init called before new_game"));
        }
        let expected = (
            self.rows_left,
            self.columns_left,
            self.columns_right,
            self.answer_alternatives,
        );
        let actual = (
            table.rows_left(),
            table.columns_left(),
            table.columns_right(),
            table.answer_alternatives(),
        );
        if actual != expected {
            return Err(Error::invalid(format!(
                "table is {:?} (rows left, columns left, columns right, answers), expected {:?}",
                actual, expected
            )));
        }
        if table.rows_right() != self.columns_left
            || table.product().rows() != self.rows_left
            || table.product().columns() != self.columns_right
        {
            return Err(Error::invalid("table matrices are not conformable"));
        }

        if let Some((row, col)) = self.highlight() {
            table.set_highlight(row, col);
        }
        self.table = Some(table);

        if self.completed && self.progress == 0 {
            let bonus = (self.score_this_round / 2).max(0);
            self.score += bonus;
            self.completed = false;
            self.score_this_round = 0;
            log::info!("Round bonus {}, score {}", bonus, self.score);
        }
        Ok(())
    }

    /// Take the table back, leaving the logic uninitialized
    pub fn detach(&mut self) -> Option<T> {
        self.table.take()
    }

    /// Answer the highlighted entry. Returns whether `answer` was correct.
    ///
    /// A correct answer is written into the product and advances the round;
    /// either way the score moves by `score_weight` of the correct value.
    pub fn advance(&mut self, answer: i64) -> Result<bool> {
        match self.phase() {
            GamePhase::AwaitingAnswer => {}
            GamePhase::Uninitialized => return Err(Error::illegal("advance called before init")),
            GamePhase::Complete => return Err(Error::illegal("round is already complete")),
        }

        let correct = self.correct_answer()?;
        let weight = self.score_weight(correct);

        if answer != correct {
            self.score -= weight;
            self.score_this_round -= weight;
            log::debug!("Wrong answer {} (expected {}), -{}", answer, correct, weight);
            return Ok(false);
        }

        let (row, col) = self.current_highlight()?;
        let table = self.attached_mut()?;
        table.product_mut().set(row, col, Cell::Value(correct));

        self.progress = (self.progress + 1).min(self.max_progress());
        self.score += weight;
        self.score_this_round += weight;
        log::debug!("Correct answer {} at ({}, {}), +{}", correct, row, col, weight);

        if self.progress >= self.max_progress() {
            self.completed = true;
            log::info!("Round complete, score {}", self.score);
        } else {
            self.publish_highlight();
        }
        Ok(true)
    }

    /// Correct value of the highlighted entry
    pub fn correct_answer(&self) -> Result<i64> {
        let (row, col) = self.current_highlight()?;
        self.correct_answer_at(row, col)
    }

    /// Dot product of row `row` of A and column `col` of B
    pub fn correct_answer_at(&self, row: usize, col: usize) -> Result<i64> {
        let table = self.attached()?;
        if row >= self.rows_left || col >= self.columns_right {
            return Err(Error::invalid(format!(
                "entry ({}, {}) outside {}x{} product",
                row, col, self.rows_left, self.columns_right
            )));
        }
        convolve(table, row, col)
    }

    /// Recompute every filled-in product entry after A or B changed.
    ///
    /// Nothing is written unless every filled-in entry can be computed.
    pub fn update_answers(&mut self) -> Result<()> {
        let (rows, columns) = (self.rows_left, self.columns_right);
        let table = self.attached_mut()?;

        let mut updates = Vec::new();
        for row in 0..rows {
            for col in 0..columns {
                if table.product().get(row, col).is_empty() {
                    continue;
                }
                updates.push((row, col, convolve(&*table, row, col)?));
            }
        }
        for (row, col, value) in updates {
            table.product_mut().set(row, col, Cell::Value(value));
        }
        Ok(())
    }

    /// Fresh alternatives for the highlighted entry
    pub fn answer_alternatives(&mut self) -> Result<Vec<i64>> {
        self.attached()?;
        if self.progress >= self.max_progress() {
            return Err(Error::illegal("no entry left to answer"));
        }
        let correct = self.correct_answer()?;
        Ok(generate_alternatives(
            &mut self.rng,
            correct,
            self.answer_alternatives,
            self.settings.answer_max_error(),
        ))
    }

    /// Write fresh alternatives into the answer vector and show every slot
    pub fn update_answer_alternatives(&mut self) -> Result<()> {
        let alternatives = self.answer_alternatives()?;
        let table = self.attached_mut()?;
        for (slot, value) in alternatives.into_iter().enumerate() {
            table.answers_mut().set(0, slot, Cell::Value(value));
            table.set_answer_visible(slot, true);
        }
        Ok(())
    }

    /// Fill A and B with random values from the settings range and clear C
    pub fn randomize_entries(&mut self) -> Result<()> {
        let (min, max) = (self.settings.min_value(), self.settings.max_value());
        if min > max {
            return Err(Error::invalid(format!("value range {}..={} is empty", min, max)));
        }
        let table = self
            .table
            .as_mut()
            .ok_or_else(|| Error::illegal("randomize_entries called before init"))?;

        fill_random(table.left_mut(), &mut self.rng, min, max);
        fill_random(table.right_mut(), &mut self.rng, min, max);
        let product = table.product_mut();
        for row in 0..product.rows() {
            for col in 0..product.columns() {
                product.set(row, col, Cell::Empty);
            }
        }
        Ok(())
    }

    /// The sum behind the highlighted entry, e.g. `1*5+2*(-7)`
    pub fn help_text(&self) -> Result<String> {
        let (row, col) = self.current_highlight()?;
        let table = self.attached()?;
        let mut terms = Vec::with_capacity(self.columns_left);
        for k in 0..self.columns_left {
            let a = entry(table.left(), row, k)?;
            let b = entry(table.right(), k, col)?;
            terms.push(format!("{}*{}", parenthesize(a), parenthesize(b)));
        }
        Ok(terms.join("+"))
    }

    pub fn max_progress(&self) -> usize {
        self.rows_left.saturating_mul(self.columns_right)
    }

    pub fn is_complete(&self) -> Result<bool> {
        self.attached()?;
        Ok(self.progress >= self.max_progress())
    }

    pub fn phase(&self) -> GamePhase {
        match self.table {
            None => GamePhase::Uninitialized,
            Some(_) if self.progress >= self.max_progress() => GamePhase::Complete,
            Some(_) => GamePhase::AwaitingAnswer,
        }
    }

    /// Points at stake for an entry whose correct value is `answer`
    pub fn score_weight(&self, answer: i64) -> i64 {
        score_weight(
            answer,
            self.columns_left,
            self.settings.min_value(),
            self.settings.max_value(),
        )
    }

    /// Highlighted `(row, col)` of the product; column-major over `progress`.
    ///
    /// Stays on the last entry once the round is complete. `None` before the
    /// first `new_game`.
    pub fn highlight(&self) -> Option<(usize, usize)> {
        let max = self.max_progress();
        if max == 0 {
            return None;
        }
        let p = self.progress.min(max - 1);
        Some((p % self.rows_left, p / self.rows_left))
    }

    fn current_highlight(&self) -> Result<(usize, usize)> {
        self.highlight()
            .ok_or_else(|| Error::illegal("no round started"))
    }

    fn publish_highlight(&mut self) {
        if let (Some((row, col)), Some(table)) = (self.highlight(), self.table.as_mut()) {
            table.set_highlight(row, col);
        }
    }

    fn attached(&self) -> Result<&T> {
        self.table
            .as_ref()
            .ok_or_else(|| Error::illegal("no table attached, call init first"))
    }

    fn attached_mut(&mut self) -> Result<&mut T> {
        self.table
            .as_mut()
            .ok_or_else(|| Error::illegal("no table attached, call init first"))
    }

    pub fn table(&self) -> Option<&T> {
        self.table.as_ref()
    }

    pub fn table_mut(&mut self) -> Option<&mut T> {
        self.table.as_mut()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Edits apply from the next `new_game`
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn rows_left(&self) -> usize {
        self.rows_left
    }

    pub fn columns_left(&self) -> usize {
        self.columns_left
    }

    pub fn columns_right(&self) -> usize {
        self.columns_right
    }

    pub fn answer_alternatives_count(&self) -> usize {
        self.answer_alternatives
    }
}

fn resolve(
    name: &str,
    explicit: Option<usize>,
    draw: impl FnOnce() -> Result<i32>,
) -> Result<usize> {
    let value = match explicit {
        Some(v) => v,
        None => {
            let drawn = draw()?;
            usize::try_from(drawn).map_err(|_| {
                Error::invalid(format!("{} must be at least 1, got {}", name, drawn))
            })?
        }
    };
    if value < 1 {
        return Err(Error::invalid(format!("{} must be at least 1, got {}", name, value)));
    }
    Ok(value)
}

/// Integer value of an operand, or `Error::Format` if it is being edited
fn entry(matrix: &dyn Matrix, row: usize, col: usize) -> Result<i64> {
    match matrix.get(row, col) {
        Cell::Value(v) => Ok(v),
        other => Err(Error::Format {
            row,
            col,
            text: other.to_string(),
        }),
    }
}

fn convolve<T: MultiplicationTable + ?Sized>(table: &T, row: usize, col: usize) -> Result<i64> {
    let (left, right) = (table.left(), table.right());
    (0..left.columns()).try_fold(0i64, |sum, k| {
        let term = entry(left, row, k)?.saturating_mul(entry(right, k, col)?);
        Ok(sum.saturating_add(term))
    })
}

fn fill_random(matrix: &mut dyn Matrix, rng: &mut Pcg32, min: i32, max: i32) {
    for row in 0..matrix.rows() {
        for col in 0..matrix.columns() {
            let value = rng.random_range(min..=max);
            matrix.set(row, col, Cell::Value(i64::from(value)));
        }
    }
}

fn parenthesize(value: i64) -> String {
    if value >= 0 {
        value.to_string()
    } else {
        format!("({})", value)
    }
}
