//! Pathfinding and game logic over the job graph
//!
//! Pure functions over a `JobGraph`; the service layer owns locking and
//! node resolution.

pub mod choices;
pub mod pathfinding;

pub use choices::{hop_choices, validate_choice, ChoiceOutcome, HopChoices};
pub use pathfinding::{shortest_path, PathResult};
