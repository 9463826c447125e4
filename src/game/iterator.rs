//! Drives rounds on behalf of a UI
//!
//! Wraps `GameLogic` with the steps a front end performs around each call:
//! filling a fresh table, republishing answer alternatives, hiding wrong
//! picks, letting the player edit A and B. Instead of calling back into the
//! UI, it queues `GameEvent`s which the caller drains after each call.
//!
//! Call order:
//! 1. `new_game`
//! 2. `init`
//! 3. `progress` / `choose`, repeatedly
//! 4. on `GameEvent::RoundComplete`, back to 1

use super::logic::{GameLogic, NewGame};
use crate::error::{Error, Result};
use crate::table::{Cell, Matrix, MultiplicationTable};

/// Notifications for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Total score moved to this value
    ScoreChanged(i64),
    /// Entries, highlight or answers changed; redraw the table
    TableChanged,
    /// Every entry answered; offer a new game
    RoundComplete,
}

/// Outcome of picking an answer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Correct,
    Wrong,
    /// An operand is being edited; nothing happened
    Unavailable,
}

/// Which operand matrix an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug)]
pub struct GameIterator<T> {
    logic: GameLogic<T>,
    events: Vec<GameEvent>,
    last_score: i64,
    /// A or B changed since alternatives were last published
    edited: bool,
}

impl<T: MultiplicationTable> GameIterator<T> {
    pub fn new(logic: GameLogic<T>) -> Self {
        let last_score = logic.score();
        Self {
            logic,
            events: Vec::new(),
            last_score,
            edited: false,
        }
    }

    pub fn logic(&self) -> &GameLogic<T> {
        &self.logic
    }

    pub fn logic_mut(&mut self) -> &mut GameLogic<T> {
        &mut self.logic
    }

    /// Pick dimensions for the next round. Must precede each `init`.
    pub fn new_game(&mut self, dims: NewGame) -> Result<()> {
        self.edited = false;
        self.logic.new_game_with(dims)
    }

    /// Attach a table.
    ///
    /// With `new_game` the table gets random entries and fresh alternatives.
    /// Without, entries are copied over from the current table (a resized or
    /// rebuilt view of the same round).
    pub fn init(&mut self, mut table: T, new_game: bool) -> Result<()> {
        if new_game {
            self.logic.init(table)?;
            self.logic.randomize_entries()?;
            self.logic.update_answer_alternatives()?;
        } else {
            let old = self
                .logic
                .detach()
                .ok_or_else(|| Error::illegal("no table to copy entries from"))?;
            if let Err(e) = table.copy_entries(&old) {
                self.logic.init(old)?;
                return Err(e);
            }
            self.logic.init(table)?;
        }

        // A new view always starts from the current score
        self.last_score = self.logic.score();
        self.events.push(GameEvent::ScoreChanged(self.last_score));
        self.events.push(GameEvent::TableChanged);
        if self.logic.is_complete()? {
            self.events.push(GameEvent::RoundComplete);
        }
        Ok(())
    }

    /// Answer the highlighted entry. Returns whether `answer` was correct.
    pub fn progress(&mut self, answer: i64) -> Result<bool> {
        let correct = self.logic.advance(answer)?;

        if correct {
            if self.logic.is_complete()? {
                self.events.push(GameEvent::RoundComplete);
            } else if let Err(e) = self.logic.update_answer_alternatives() {
                // The next entry may depend on an operand mid-edit
                if !e.is_format() {
                    return Err(e);
                }
                log::warn!("Alternatives unavailable: {}", e);
            }
            self.events.push(GameEvent::TableChanged);
        }
        self.push_score();
        Ok(correct)
    }

    /// Answer with the value shown in answer slot `slot`.
    ///
    /// A wrong pick hides the slot. Hidden slots, and operands that are not
    /// numbers yet, make the pick `Unavailable` instead of an error.
    pub fn choose(&mut self, slot: usize) -> Result<Choice> {
        let table = self.attached()?;
        if slot >= table.answer_alternatives() {
            return Err(Error::invalid(format!(
                "answer slot {} of {}",
                slot,
                table.answer_alternatives()
            )));
        }
        if !table.is_answer_visible(slot) {
            log::debug!("Answer slot {} is hidden", slot);
            return Ok(Choice::Unavailable);
        }
        let answer = match table.answers().get(0, slot) {
            Cell::Value(v) => v,
            other => {
                log::warn!("Answer slot {} holds {:?}", slot, other);
                return Ok(Choice::Unavailable);
            }
        };

        match self.progress(answer) {
            Ok(true) => Ok(Choice::Correct),
            Ok(false) => {
                if let Some(table) = self.logic.table_mut() {
                    table.set_answer_visible(slot, false);
                }
                self.events.push(GameEvent::TableChanged);
                Ok(Choice::Wrong)
            }
            Err(e) if e.is_format() => {
                log::warn!("Trouble when answering: {}", e);
                Ok(Choice::Unavailable)
            }
            Err(e) => Err(e),
        }
    }

    /// The player typed `text` into an entry of A or B.
    ///
    /// Numeric text updates the filled-in product entries right away.
    pub fn edit_entry(&mut self, side: Side, row: usize, col: usize, text: &str) -> Result<()> {
        if self.logic.is_complete()? {
            return Err(Error::illegal("round is complete"));
        }

        let cell = Cell::parse(text);
        let numeric = cell.value().is_some();

        let table = self
            .logic
            .table_mut()
            .ok_or_else(|| Error::illegal("no table attached"))?;
        let matrix = match side {
            Side::Left => table.left_mut(),
            Side::Right => table.right_mut(),
        };
        if row >= matrix.rows() || col >= matrix.columns() {
            return Err(Error::invalid(format!(
                "entry ({}, {}) outside {}x{} matrix",
                row,
                col,
                matrix.rows(),
                matrix.columns()
            )));
        }
        matrix.set(row, col, cell);
        self.edited = true;

        if numeric {
            match self.logic.update_answers() {
                Err(e) if e.is_format() => log::debug!("Product not updated: {}", e),
                other => other?,
            }
        }
        self.events.push(GameEvent::TableChanged);
        Ok(())
    }

    /// Close editing. Refused (returns `false`) while an entry of A or B is
    /// not a number.
    pub fn finish_editing(&mut self) -> Result<bool> {
        let table = self.attached()?;
        if has_non_numeric(table.left()) || has_non_numeric(table.right()) {
            return Ok(false);
        }

        if self.edited && !self.logic.is_complete()? {
            self.logic.update_answer_alternatives()?;
            self.events.push(GameEvent::TableChanged);
        }
        self.edited = false;
        Ok(true)
    }

    /// The sum behind the highlighted entry, or `None` once complete
    pub fn help(&self) -> Result<Option<String>> {
        if self.logic.is_complete()? {
            return Ok(None);
        }
        self.logic.help_text().map(Some)
    }

    /// Events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn attached(&self) -> Result<&T> {
        self.logic
            .table()
            .ok_or_else(|| Error::illegal("no table attached, call init first"))
    }

    fn push_score(&mut self) {
        let score = self.logic.score();
        if score != self.last_score {
            self.last_score = score;
            self.events.push(GameEvent::ScoreChanged(score));
        }
    }
}

fn has_non_numeric(matrix: &dyn Matrix) -> bool {
    (0..matrix.rows()).any(|row| (0..matrix.columns()).any(|col| matrix.get(row, col).value().is_none()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::table::Worksheet;

    fn two_by_two() -> NewGame {
        NewGame {
            rows_left: Some(2),
            columns_left: Some(2),
            columns_right: Some(2),
            answer_alternatives: Some(3),
        }
    }

    fn started(seed: u64) -> GameIterator<Worksheet> {
        let mut it = GameIterator::new(GameLogic::new(Settings::default(), seed));
        it.new_game(two_by_two()).unwrap();
        it.init(Worksheet::new(2, 2, 2, 3), true).unwrap();
        it
    }

    fn answers(it: &GameIterator<Worksheet>) -> Vec<i64> {
        let sheet = it.logic().table().unwrap();
        (0..sheet.answer_alternatives())
            .map(|i| sheet.answers().get(0, i).value().unwrap())
            .collect()
    }

    fn correct_slot(it: &GameIterator<Worksheet>) -> usize {
        let correct = it.logic().correct_answer().unwrap();
        answers(it).iter().position(|a| *a == correct).unwrap()
    }

    /// Overwrite A and B with [[1,2],[3,4]] and [[5,6],[7,8]]
    fn set_known_entries(it: &mut GameIterator<Worksheet>) {
        for (side, values) in [(Side::Left, [1, 2, 3, 4]), (Side::Right, [5, 6, 7, 8])] {
            for (i, value) in values.iter().enumerate() {
                it.edit_entry(side, i / 2, i % 2, &value.to_string()).unwrap();
            }
        }
        assert!(it.finish_editing().unwrap());
    }

    #[test]
    fn test_init_publishes_alternatives() {
        let mut it = started(1);
        let events = it.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::ScoreChanged(0), GameEvent::TableChanged]
        );

        let correct = it.logic().correct_answer().unwrap();
        assert_eq!(answers(&it).iter().filter(|a| **a == correct).count(), 1);
    }

    #[test]
    fn test_round_through_choose() {
        let mut it = started(2);
        it.drain_events();

        for step in 0..4 {
            let slot = correct_slot(&it);
            assert_eq!(it.choose(slot).unwrap(), Choice::Correct);

            let events = it.drain_events();
            assert!(events.contains(&GameEvent::TableChanged));
            assert_eq!(events.contains(&GameEvent::RoundComplete), step == 3);
        }
        assert!(it.logic().is_complete().unwrap());
        assert!(matches!(it.choose(0), Err(Error::IllegalState(_))));
    }

    #[test]
    fn test_wrong_choice_hides_slot() {
        let mut it = started(3);
        it.drain_events();

        let correct = it.logic().correct_answer().unwrap();
        let wrong = answers(&it).iter().position(|a| *a != correct).unwrap();
        assert_eq!(it.choose(wrong).unwrap(), Choice::Wrong);

        let sheet = it.logic().table().unwrap();
        assert!(!sheet.is_answer_visible(wrong));
        assert_eq!(it.logic().progress(), 0);

        let score = it.logic().score();
        assert!(score < 0);
        let events = it.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(score)));

        // A hidden slot cannot be picked again
        assert_eq!(it.choose(wrong).unwrap(), Choice::Unavailable);
        assert_eq!(it.logic().score(), score);
        assert!(it.drain_events().is_empty());

        // Next correct answer shows every slot again
        let slot = correct_slot(&it);
        it.choose(slot).unwrap();
        let sheet = it.logic().table().unwrap();
        assert!((0..3).all(|i| sheet.is_answer_visible(i)));
    }

    #[test]
    fn test_choose_out_of_range() {
        let mut it = started(4);
        assert!(matches!(it.choose(3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_rounds_restart_from_events() {
        let mut it = started(5);
        let mut rounds = 0;

        while rounds < 3 {
            let slot = correct_slot(&it);
            it.choose(slot).unwrap();

            for event in it.drain_events() {
                if event == GameEvent::RoundComplete {
                    rounds += 1;
                    it.new_game(two_by_two()).unwrap();
                    it.init(Worksheet::new(2, 2, 2, 3), true).unwrap();
                }
            }
        }

        assert_eq!(it.logic().progress(), 0);
        assert!(it.logic().score() > 0);
    }

    #[test]
    fn test_reinit_copies_entries() {
        let mut it = started(6);
        let slot = correct_slot(&it);
        it.choose(slot).unwrap();
        let before = it.logic().table().unwrap().clone();

        it.init(Worksheet::new(2, 2, 2, 3), false).unwrap();

        let after = it.logic().table().unwrap();
        assert_eq!(after, &before);
        assert_eq!(after.highlight(), Some((1, 0)));
        assert_eq!(it.logic().progress(), 1);
    }

    #[test]
    fn test_reinit_rejects_other_shape() {
        let mut it = started(7);
        assert!(matches!(
            it.init(Worksheet::new(3, 2, 2, 3), false),
            Err(Error::InvalidArgument(_))
        ));
        // Old table still attached
        assert!(it.logic().table().is_some());
        assert_eq!(it.logic().table().unwrap().rows_left(), 2);
    }

    #[test]
    fn test_reinit_without_table() {
        let mut it: GameIterator<Worksheet> =
            GameIterator::new(GameLogic::new(Settings::default(), 8));
        it.new_game(two_by_two()).unwrap();
        assert!(matches!(
            it.init(Worksheet::new(2, 2, 2, 3), false),
            Err(Error::IllegalState(_))
        ));
    }

    #[test]
    fn test_reinit_complete_round_signals() {
        let mut it = started(9);
        for _ in 0..4 {
            let slot = correct_slot(&it);
            it.choose(slot).unwrap();
        }
        it.drain_events();
        let score = it.logic().score();

        it.init(Worksheet::new(2, 2, 2, 3), false).unwrap();
        assert!(it.drain_events().contains(&GameEvent::RoundComplete));
        // Same round, so no bonus yet
        assert_eq!(it.logic().score(), score);

        it.new_game(two_by_two()).unwrap();
        it.init(Worksheet::new(2, 2, 2, 3), true).unwrap();
        assert_eq!(it.logic().score(), score + score / 2);
    }

    #[test]
    fn test_editing_entries() {
        let mut it = started(10);
        set_known_entries(&mut it);
        assert_eq!(it.logic().correct_answer().unwrap(), 19);
        assert!(answers(&it).contains(&19));

        // Answer (0,0), then change an operand it depends on
        let slot = correct_slot(&it);
        it.choose(slot).unwrap();
        it.edit_entry(Side::Left, 0, 0, "2").unwrap();
        let product = it.logic().table().unwrap().product();
        assert_eq!(product.get(0, 0), Cell::Value(24));
    }

    #[test]
    fn test_mid_edit_entries_block_answers() {
        let mut it = started(11);
        set_known_entries(&mut it);

        // (0,0) needs A[0][1], which now shows a lone minus sign
        it.edit_entry(Side::Left, 0, 1, "-").unwrap();
        assert!(!it.finish_editing().unwrap());
        assert_eq!(it.choose(0).unwrap(), Choice::Unavailable);
        assert_eq!(it.logic().score(), 0);

        it.edit_entry(Side::Left, 0, 1, "-2").unwrap();
        assert!(it.finish_editing().unwrap());
        assert_eq!(it.logic().correct_answer().unwrap(), -9);
        assert!(answers(&it).contains(&-9));
    }

    #[test]
    fn test_edit_rejects_bad_entry() {
        let mut it = started(12);
        assert!(matches!(
            it.edit_entry(Side::Right, 2, 0, "1"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_help() {
        let mut it = started(13);
        set_known_entries(&mut it);
        assert_eq!(it.help().unwrap().as_deref(), Some("1*5+2*7"));

        for _ in 0..4 {
            let slot = correct_slot(&it);
            it.choose(slot).unwrap();
        }
        assert_eq!(it.help().unwrap(), None);
        assert!(matches!(
            it.edit_entry(Side::Left, 0, 0, "1"),
            Err(Error::IllegalState(_))
        ));
    }
}
