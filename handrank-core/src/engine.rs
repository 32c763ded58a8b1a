//! Comparison engine: owns the pending pairs, removals and scores of one session.
//!
//! The engine does no I/O of its own. `run()` drives the interactive loop
//! through a `Console`. Callers that want to drive decisions themselves can use
//! `next_pair()` and `apply()` directly.
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::console::Console;
use crate::constants::MIN_ITEMS;
use crate::error::EngineError;
use crate::pairing::shuffled_pairs;
use crate::prompt::{build_menu, decision_notice, CHOICE_PROMPT, INTRO, INVALID_CHOICE};
use crate::scoring::{rank_items, ScoreMap};
use crate::types::{Decision, Pair, RankedItem, SessionResult, SessionSummary};

pub struct ComparisonEngine {
    items: Vec<String>,
    /// Pairs not yet resolved, front first.
    pending: VecDeque<Pair>,
    /// `removed[i]` is set once item `i` has been excluded. Never cleared.
    removed: Vec<bool>,
    scores: ScoreMap,
    summary: SessionSummary,
    /// Pair handed out by `next_pair()` and not yet decided.
    in_flight: Option<Pair>,
}

impl ComparisonEngine {
    /// Start a session over `items`, with pair order drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(items: Vec<String>, rng: &mut R) -> Result<Self, EngineError> {
        let pairs = shuffled_pairs(items.len(), rng);
        Self::with_queue(items, pairs)
    }

    /// Start a session whose pair order is fixed by `seed`.
    pub fn with_seed(items: Vec<String>, seed: u64) -> Result<Self, EngineError> {
        Self::new(items, &mut StdRng::seed_from_u64(seed))
    }

    pub(crate) fn with_queue(items: Vec<String>, pairs: Vec<Pair>) -> Result<Self, EngineError> {
        let num_items = items.len();
        if num_items < MIN_ITEMS {
            return Err(EngineError::TooFewItems { count: num_items });
        }
        debug!(items = num_items, pairs = pairs.len(), "starting comparison session");

        let scores = ScoreMap::new(&items);
        Ok(ComparisonEngine {
            items,
            pending: pairs.into(),
            removed: vec![false; num_items],
            scores,
            summary: SessionSummary::default(),
            in_flight: None,
        })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of pairs still waiting to be presented.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// True if item `idx` was removed. Out-of-range indices were never in the session.
    pub fn is_removed(&self, idx: usize) -> bool {
        self.removed.get(idx).copied().unwrap_or(false)
    }

    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// True once there is nothing left to ask.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the next pair that is safe to present.
    ///
    /// Pairs touching a removed item are dropped without being returned. A pair
    /// still awaiting `apply()` is abandoned.
    pub fn next_pair(&mut self) -> Option<Pair> {
        self.in_flight = None;
        while let Some((a, b)) = self.pending.pop_front() {
            if self.removed[a] || self.removed[b] {
                trace!(first = a, second = b, "skipping pair with removed item");
                self.summary.discarded += 1;
                continue;
            }
            self.summary.presented += 1;
            self.in_flight = Some((a, b));
            return Some((a, b));
        }
        None
    }

    /// Apply the user's decision for `pair`.
    ///
    /// `pair` must be the one last returned by `next_pair()`, and each pair takes
    /// exactly one decision. Anything else is `EngineError::PairNotPresented`
    /// and leaves the session untouched.
    pub fn apply(&mut self, pair: Pair, decision: Decision) -> Result<(), EngineError> {
        if self.in_flight != Some(pair) {
            return Err(EngineError::PairNotPresented { first: pair.0, second: pair.1 });
        }
        self.in_flight = None;

        let (first, second) = pair;
        debug!(first = %self.items[first], second = %self.items[second], ?decision, "decision");

        match decision {
            Decision::PreferFirst => self.record_win(first),
            Decision::PreferSecond => self.record_win(second),
            Decision::RemoveFirst => self.remove(first),
            Decision::RemoveSecond => self.remove(second),
            Decision::RemoveBoth => {
                self.remove(first);
                self.remove(second);
            }
            Decision::Exit => {
                debug!(abandoned = self.pending.len(), "exiting early");
                self.pending.clear();
                self.summary.exited_early = true;
                return Ok(());
            }
        }

        self.purge_removed();
        Ok(())
    }

    /// Run the interactive loop until the queue drains or the user exits.
    ///
    /// End of input counts as `exit`.
    pub fn run<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<(), EngineError> {
        console.emit(INTRO)?;

        while let Some(pair) = self.next_pair() {
            let decision = self.ask(console, pair)?;

            let (first, second) = (&self.items[pair.0], &self.items[pair.1]);
            if let Some(notice) = decision_notice(decision, first, second) {
                console.emit(&notice)?;
            }

            self.apply(pair, decision)?;
            if decision == Decision::Exit {
                break;
            }
        }

        Ok(())
    }

    /// Final ranking from the current state.
    pub fn rankings(&self) -> Vec<RankedItem> {
        rank_items(&self.items, &self.removed, &self.scores)
    }

    /// Consume the engine into its ranking and summary.
    pub fn finish(self) -> SessionResult {
        SessionResult {
            rankings: self.rankings(),
            summary: self.summary,
        }
    }

    /// Show the menu for `pair` until a valid answer comes back.
    fn ask<C: Console + ?Sized>(&self, console: &mut C, pair: Pair) -> Result<Decision, EngineError> {
        let menu = build_menu(&self.items[pair.0], &self.items[pair.1]);
        loop {
            console.emit(&menu)?;
            let Some(line) = console.prompt(CHOICE_PROMPT)? else {
                warn!("input closed, ending comparisons early");
                return Ok(Decision::Exit);
            };
            match line.parse::<Decision>() {
                Ok(decision) => return Ok(decision),
                Err(e) => {
                    debug!(%e, "re-prompting");
                    console.emit(INVALID_CHOICE)?;
                }
            }
        }
    }

    fn record_win(&mut self, idx: usize) {
        self.scores.record_win(&self.items[idx]);
        self.summary.preferences += 1;
    }

    fn remove(&mut self, idx: usize) {
        if !self.removed[idx] {
            self.removed[idx] = true;
            self.summary.removed += 1;
        }
    }

    /// Full pass over the queue dropping every pair that touches a removed item.
    fn purge_removed(&mut self) {
        let before = self.pending.len();
        let removed = &self.removed;
        self.pending.retain(|&(a, b)| !removed[a] && !removed[b]);
        let dropped = before - self.pending.len();
        if dropped > 0 {
            trace!(dropped, "purged pairs referencing removed items");
            self.summary.discarded += dropped;
        }
    }
}

/// Run a complete interactive session: shuffle pairs with `rng`, ask through
/// `console`, and return the final ranking.
pub fn run_session<R, C>(items: Vec<String>, rng: &mut R, console: &mut C) -> Result<SessionResult, EngineError>
where
    R: Rng + ?Sized,
    C: Console + ?Sized,
{
    let mut engine = ComparisonEngine::new(items, rng)?;
    engine.run(console)?;
    Ok(engine.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::prompt::EXIT_NOTICE;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn ranking_of(result: &SessionResult) -> Vec<(&str, u32)> {
        result.rankings.iter().map(|r| (r.name.as_str(), r.score)).collect()
    }

    /// Every menu in the transcript, as (first, second) names.
    fn presented_menus(console: &ScriptedConsole) -> Vec<(String, String)> {
        console
            .transcript
            .iter()
            .filter(|m| m.contains("Which item do you prefer?"))
            .map(|m| {
                let mut lines = m.lines().skip(2);
                let first = lines.next().unwrap().trim_start_matches("1: ").to_string();
                let second = lines.next().unwrap().trim_start_matches("2: ").to_string();
                (first, second)
            })
            .collect()
    }

    #[test]
    fn test_engine_requires_two_items() {
        let err = ComparisonEngine::with_seed(names(&["only"]), 1).err().unwrap();
        assert!(matches!(err, EngineError::TooFewItems { count: 1 }));

        let err = ComparisonEngine::with_seed(Vec::new(), 1).err().unwrap();
        assert!(matches!(err, EngineError::TooFewItems { count: 0 }));
    }

    #[test]
    fn test_engine_queues_every_pair() {
        let engine = ComparisonEngine::with_seed(names(&["A", "B", "C", "D", "E"]), 3).unwrap();
        assert_eq!(engine.pending_count(), 10);
        assert!(!engine.is_finished());
        assert_eq!(engine.scores().total(), 0);
    }

    #[test]
    fn test_always_prefer_first() {
        let items = names(&["A", "B", "C"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(0, 1), (0, 2), (1, 2)]).unwrap();
        let mut console = ScriptedConsole::new(["1", "1", "1"]);

        engine.run(&mut console).unwrap();
        let result = engine.finish();

        assert_eq!(ranking_of(&result), vec![("A", 2), ("B", 1)]);
        assert_eq!(result.summary.presented, 3);
        assert_eq!(result.summary.preferences, 3);
        assert!(!result.summary.exited_early);
        assert_eq!(
            presented_menus(&console),
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_tied_ranks_in_original_order() {
        let items = names(&["A", "B", "C"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let mut console = ScriptedConsole::new(["1", "1", "2"]);

        engine.run(&mut console).unwrap();
        let result = engine.finish();

        assert_eq!(ranking_of(&result), vec![("A", 1), ("B", 1), ("C", 1)]);
        let ranks: Vec<usize> = result.rankings.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_input_reprompts_same_pair() {
        let items = names(&["A", "B"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(0, 1)]).unwrap();
        let mut console = ScriptedConsole::new(["7", "maybe", "2"]);

        engine.run(&mut console).unwrap();

        assert_eq!(console.prompts, 3);
        assert_eq!(engine.summary().presented, 1);
        assert_eq!(presented_menus(&console).len(), 3);
        let invalid = console.transcript.iter().filter(|m| *m == INVALID_CHOICE).count();
        assert_eq!(invalid, 2);
        assert_eq!(engine.scores().get("B"), 1);
    }

    #[test]
    fn test_exit_on_first_prompt_ranks_nothing() {
        let mut engine = ComparisonEngine::with_seed(names(&["A", "B", "C", "D"]), 11).unwrap();
        let mut console = ScriptedConsole::new(["EXIT", "1", "1"]);

        engine.run(&mut console).unwrap();

        assert_eq!(console.prompts, 1);
        assert_eq!(console.remaining(), 2);
        assert!(engine.is_finished());
        assert!(console.transcript.iter().any(|m| m == EXIT_NOTICE));

        let result = engine.finish();
        assert!(result.rankings.is_empty());
        assert!(result.summary.exited_early);
    }

    #[test]
    fn test_exit_keeps_scores_so_far() {
        let items = names(&["A", "B", "C"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(1, 2), (0, 1), (0, 2)]).unwrap();
        let mut console = ScriptedConsole::new(["2", "exit"]);

        engine.run(&mut console).unwrap();
        let result = engine.finish();

        assert_eq!(ranking_of(&result), vec![("C", 1)]);
        assert_eq!(result.summary.presented, 2);
        assert_eq!(result.summary.preferences, 1);
    }

    #[test]
    fn test_end_of_input_acts_like_exit() {
        let items = names(&["A", "B", "C"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(0, 1), (0, 2), (1, 2)]).unwrap();
        let mut console = ScriptedConsole::new(["1"]);

        engine.run(&mut console).unwrap();

        assert_eq!(console.prompts, 2);
        assert!(engine.is_finished());
        assert!(engine.summary().exited_early);
        assert_eq!(engine.rankings().len(), 1);
    }

    #[test]
    fn test_remove_first_purges_its_pairs() {
        let items = names(&["A", "B", "C"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(0, 1), (0, 2), (1, 2)]).unwrap();
        let mut console = ScriptedConsole::new(["3", "1"]);

        engine.run(&mut console).unwrap();

        assert!(console.transcript.iter().any(|m| m == "Removed A"));
        assert_eq!(
            presented_menus(&console),
            vec![("A".to_string(), "B".to_string()), ("B".to_string(), "C".to_string())]
        );
        let result = engine.finish();
        assert_eq!(result.summary.removed, 1);
        assert_eq!(result.summary.discarded, 1);
        assert_eq!(ranking_of(&result), vec![("B", 1)]);
    }

    #[test]
    fn test_remove_both() {
        let items = names(&["A", "B", "C", "D"]);
        let pairs = vec![(1, 2), (0, 1), (0, 3), (2, 3), (0, 2), (1, 3)];
        let mut engine = ComparisonEngine::with_queue(items, pairs).unwrap();
        let mut console = ScriptedConsole::new(["5", "2"]);

        engine.run(&mut console).unwrap();

        assert!(console.transcript.iter().any(|m| m == "Removed B and C"));
        // Only (A, D) survives the purge.
        assert_eq!(
            presented_menus(&console),
            vec![("B".to_string(), "C".to_string()), ("A".to_string(), "D".to_string())]
        );
        assert!(engine.is_removed(1) && engine.is_removed(2));
        let result = engine.finish();
        assert_eq!(ranking_of(&result), vec![("D", 1)]);
        assert_eq!(result.summary.removed, 2);
        assert_eq!(result.summary.discarded, 4);
    }

    #[test]
    fn test_removed_item_never_presented_again() {
        let items = names(&["A", "B", "C", "D", "E"]);
        for seed in 0..25u64 {
            let mut engine = ComparisonEngine::with_seed(items.clone(), seed).unwrap();
            let mut b_removed = false;

            while let Some((a, b)) = engine.next_pair() {
                if b_removed {
                    assert!(a != 1 && b != 1, "seed {seed}: B presented after removal");
                }
                let decision = if a == 1 {
                    b_removed = true;
                    Decision::RemoveFirst
                } else if b == 1 {
                    b_removed = true;
                    Decision::RemoveSecond
                } else {
                    Decision::PreferFirst
                };
                engine.apply((a, b), decision).unwrap();
            }

            assert!(b_removed);
            assert!(engine.rankings().iter().all(|r| r.name != "B"));
        }
    }

    #[test]
    fn test_random_sessions_hold_invariants() {
        let items = names(&["A", "B", "C", "D", "E", "F", "G"]);
        let choices = [
            Decision::PreferFirst,
            Decision::PreferSecond,
            Decision::PreferFirst,
            Decision::PreferSecond,
            Decision::RemoveFirst,
            Decision::RemoveSecond,
            Decision::RemoveBoth,
        ];

        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut engine = ComparisonEngine::new(items.clone(), &mut rng).unwrap();
            let mut seen: HashSet<Pair> = HashSet::new();
            let mut preferences = 0;

            while let Some(pair) = engine.next_pair() {
                assert!(seen.insert(pair), "seed {seed}: pair {pair:?} presented twice");
                assert!(!engine.is_removed(pair.0) && !engine.is_removed(pair.1));

                let decision = choices[rng.random_range(0..choices.len())];
                if decision.is_preference() {
                    preferences += 1;
                }
                engine.apply(pair, decision).unwrap();
            }

            assert_eq!(engine.scores().total() as usize, preferences);
            assert_eq!(engine.summary().preferences, preferences);

            let rankings = engine.rankings();
            for w in rankings.windows(2) {
                assert!(w[0].score >= w[1].score);
                if w[0].score == w[1].score {
                    let pos = |name: &str| items.iter().position(|n| n == name).unwrap();
                    assert!(pos(w[0].name.as_str()) < pos(w[1].name.as_str()));
                }
            }
            for r in &rankings {
                let idx = items.iter().position(|n| *n == r.name).unwrap();
                assert!(!engine.is_removed(idx));
                assert!(r.score > 0);
            }
        }
    }

    #[test]
    fn test_apply_rejects_pair_not_presented() {
        let items = names(&["A", "B", "C"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(0, 1), (0, 2), (1, 2)]).unwrap();

        // Nothing handed out yet.
        let err = engine.apply((0, 1), Decision::PreferFirst).unwrap_err();
        assert!(matches!(err, EngineError::PairNotPresented { first: 0, second: 1 }));

        let pair = engine.next_pair().unwrap();
        assert_eq!(pair, (0, 1));

        // A different pair, or one out of range, is refused.
        assert!(engine.apply((1, 2), Decision::PreferFirst).is_err());
        assert!(engine.apply((0, 9), Decision::PreferFirst).is_err());

        engine.apply(pair, Decision::PreferFirst).unwrap();
        // Same pair twice.
        assert!(engine.apply(pair, Decision::PreferFirst).is_err());

        assert_eq!(engine.scores().total(), 1);
        assert_eq!(engine.summary().preferences, 1);
        assert_eq!(engine.pending_count(), 2);
    }

    #[test]
    fn test_apply_rejects_pair_with_removed_item() {
        let items = names(&["A", "B", "C"]);
        let mut engine = ComparisonEngine::with_queue(items, vec![(0, 1), (1, 2), (0, 2)]).unwrap();

        let pair = engine.next_pair().unwrap();
        engine.apply(pair, Decision::RemoveSecond).unwrap();

        let err = engine.apply((1, 2), Decision::PreferFirst).unwrap_err();
        assert!(matches!(err, EngineError::PairNotPresented { first: 1, second: 2 }));
        assert_eq!(engine.scores().get("B"), 0);
        assert_eq!(engine.next_pair(), Some((0, 2)));
    }

    #[test]
    fn test_is_removed_out_of_range() {
        let engine = ComparisonEngine::with_seed(names(&["A", "B"]), 1).unwrap();
        assert!(!engine.is_removed(0));
        assert!(!engine.is_removed(99));
    }

    #[test]
    fn test_run_session_seeded_is_reproducible() {
        let items = names(&["A", "B", "C", "D"]);
        let answers = ["1", "2", "1", "2", "1", "2"];

        let mut first_console = ScriptedConsole::new(answers);
        let first = run_session(items.clone(), &mut StdRng::seed_from_u64(5), &mut first_console).unwrap();
        let mut second_console = ScriptedConsole::new(answers);
        let second = run_session(items, &mut StdRng::seed_from_u64(5), &mut second_console).unwrap();

        assert_eq!(first.rankings, second.rankings);
        assert_eq!(first_console.transcript, second_console.transcript);
        assert_eq!(first.summary.preferences, 6);
        assert_eq!(first.rankings.iter().map(|r| r.score).sum::<u32>(), 6);
    }
}
