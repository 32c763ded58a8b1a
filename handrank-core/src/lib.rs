//! handrank-core: interactive pairwise preference ranking.
//!
//! Every unordered pair of items is asked about once, in shuffled order. Each
//! answer either awards a win to one side or removes items from the session.
//! The final ranking orders surviving items by win count. No filesystem, no
//! stdin: the caller supplies the RNG and a `Console` to talk through.
//!
//! # Quick start
//!
//! ```rust
//! use handrank_core::{run_session, ScriptedConsole};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let items = vec!["Tea".to_string(), "Coffee".to_string(), "Cocoa".to_string()];
//!
//! // Always pick the first option shown.
//! let mut console = ScriptedConsole::new(["1", "1", "1"]);
//! let result = run_session(items, &mut StdRng::seed_from_u64(1), &mut console).unwrap();
//!
//! assert_eq!(result.summary.preferences, 3);
//! for r in &result.rankings {
//!     println!("{}. {} (Score: {})", r.rank, r.name, r.score);
//! }
//! ```

pub mod console;
pub mod constants;
pub mod engine;
pub mod error;
pub mod pairing;
pub mod prompt;
pub mod scoring;
pub mod types;

// Re-export primary public API at crate root.
pub use console::{Console, ScriptedConsole};
pub use constants::{EXIT_COMMAND, MIN_ITEMS};
pub use engine::{run_session, ComparisonEngine};
pub use error::{EngineError, InvalidChoice};
pub use pairing::{all_pairs, pair_count, shuffled_pairs};
pub use scoring::{rank_items, ScoreMap};
pub use types::{Decision, Pair, RankedItem, SessionResult, SessionSummary};
