pub mod evaluator;
pub mod sequencer;
pub mod state;

pub use sequencer::{DraftStep, Sequencer, Side, StepKind, Target, DRAFT_ORDER};
pub use state::DraftBoard;
