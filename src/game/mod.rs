//! Game rules and round orchestration
//!
//! - `logic`: round state machine (highlight, scoring, alternatives)
//! - `iterator`: drives rounds for a UI and queues events
//! - `answers`: answer alternative generation
//! - `scoring`: score weight of an entry

pub mod answers;
pub mod iterator;
pub mod logic;
pub mod scoring;

pub use answers::generate_alternatives;
pub use iterator::{Choice, GameEvent, GameIterator, Side};
pub use logic::{GameLogic, GamePhase, NewGame};
pub use scoring::score_weight;
