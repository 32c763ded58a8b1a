//! Error types for the comparison engine.
use thiserror::Error;

/// Errors a comparison session can surface to its caller.
///
/// Bad menu input never shows up here: it is handled by re-prompting.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Fewer than two items were handed to the engine.
    #[error("need at least two items to compare, got {count}")]
    TooFewItems { count: usize },

    /// `apply()` got a pair that is not the one `next_pair()` last handed out.
    #[error("pair ({first}, {second}) is not awaiting a decision")]
    PairNotPresented { first: usize, second: usize },

    /// Reading from or writing to the console failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A line of input that is not one of the menu choices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized choice \"{0}\"")]
pub struct InvalidChoice(pub String);
