//! Game rules: legal-move masks, move application, win detection.
//!
//! All operations act on a single `GameState` and touch nothing else, which
//! is what lets the batch driver run them on many states at once.

pub mod apply;
pub mod engine;
pub mod mask;
pub mod win;

pub use apply::apply_move;
pub use engine::{RulesEngine, StandardRules};
pub use mask::{action_mask, ActionMask};
pub use win::{detect_winner, update_winner};
