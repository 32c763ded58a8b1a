use std::str::FromStr;

use crate::constants::EXIT_COMMAND;
use crate::error::InvalidChoice;

/// A pairing: two item indices into the session's item list, first < second.
pub type Pair = (usize, usize);

/// What the user decided about one presented pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    PreferFirst,
    PreferSecond,
    RemoveFirst,
    RemoveSecond,
    RemoveBoth,
    /// Abandon every remaining pair.
    Exit,
}

impl Decision {
    /// True for the two choices that award a win.
    pub fn is_preference(self) -> bool {
        matches!(self, Decision::PreferFirst | Decision::PreferSecond)
    }
}

impl FromStr for Decision {
    type Err = InvalidChoice;

    /// Parse a menu answer: `1`..`5`, or `exit` in any case. Surrounding
    /// whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim();
        match choice {
            "1" => Ok(Decision::PreferFirst),
            "2" => Ok(Decision::PreferSecond),
            "3" => Ok(Decision::RemoveFirst),
            "4" => Ok(Decision::RemoveSecond),
            "5" => Ok(Decision::RemoveBoth),
            _ if choice.eq_ignore_ascii_case(EXIT_COMMAND) => Ok(Decision::Exit),
            _ => Err(InvalidChoice(choice.to_string())),
        }
    }
}

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedItem {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub name: String,
    /// Number of pairs this item (or an item sharing its name) won.
    pub score: u32,
}

/// Counters describing how a session went.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    /// Pairs shown to the user.
    pub presented: usize,
    /// Prefer-first / prefer-second decisions. Equals the total of all scores.
    pub preferences: usize,
    /// Items excluded by remove decisions.
    pub removed: usize,
    /// Pending pairs dropped because they referenced a removed item.
    pub discarded: usize,
    /// The user typed `exit` (or input ran out) before the queue drained.
    pub exited_early: bool,
}

/// Result of `run_session()`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionResult {
    /// Ranked items, sorted by score descending, ties in original item order.
    pub rankings: Vec<RankedItem>,
    pub summary: SessionSummary,
}
