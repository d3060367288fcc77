//! Depth-limited game-tree search.
//!
//! Agents take turns in index order: the controlled agent
//! ([`CONTROLLED_AGENT`](crate::game_interface::CONTROLLED_AGENT)) maximizes, then
//! every other agent replies, one after the other. A full pass through all agents is a *round*,
//! and the depth budget goes down by one only when the last agent has moved and control returns
//! to the controlled agent.
//!
//! A node is a leaf when the depth budget is exhausted or the game is over; leaves are valued by
//! the [`Evaluation`]. Interior values are combined according to the [`Algorithm`]:
//!
//! - [`Algorithm::Minimax`]: adversaries minimize.
//! - [`Algorithm::AlphaBeta`]: same values as minimax, skipping subtrees that cannot change the
//!   decision.
//! - [`Algorithm::Expectimax`]: adversaries pick uniformly at random; their nodes take the mean.
//!
//! Ties always go to the earliest action in [`GameState::legal_actions`] order.

use std::{fmt, str::FromStr};

use tracing::debug;

use crate::error::SearchError;
use crate::evaluation::Evaluation;
use crate::game_interface::GameState;

mod alpha_beta;
mod expectimax;
mod minimax;

/// Value of a node and the action leading to it.
///
/// `action` is `None` at leaves and at expectation nodes; only the root's action is a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// Backed-up value.
    pub value: f64,
    /// Chosen action, if any.
    pub action: Option<A>,
}

impl<A> SearchResult<A> {
    pub(crate) fn leaf(value: f64) -> Self {
        Self {
            value,
            action: None,
        }
    }

    pub(crate) fn new(value: f64, action: A) -> Self {
        Self {
            value,
            action: Some(action),
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes whose legal actions were enumerated.
    pub expanded: usize,
    /// Leaves handed to the evaluation.
    pub evaluated: usize,
    /// Nodes where a pruning bound was crossed.
    pub cutoffs: usize,
    /// Deepest ply reached, counting one ply per agent move.
    pub max_ply: usize,
}

impl SearchStats {
    /// Nodes visited, leaves included.
    pub fn nodes(&self) -> usize {
        self.expanded + self.evaluated
    }
}

/// Root result of a search along with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport<A> {
    /// Value and action at the root.
    pub result: SearchResult<A>,
    /// What it took to get there.
    pub stats: SearchStats,
}

/// Opponent model used to back values up the tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Adversaries play their best reply.
    #[default]
    Minimax,
    /// Minimax with alpha-beta pruning.
    AlphaBeta,
    /// Adversaries play uniformly at random.
    Expectimax,
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Algorithm::AlphaBeta),
            "expectimax" => Ok(Algorithm::Expectimax),
            _ => Err(SearchError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::Expectimax => "expectimax",
        };
        f.write_str(name)
    }
}

/// Runs `algorithm` from `state` with `depth` rounds of look-ahead.
///
/// A `depth` of zero, or a terminal `state`, returns the evaluation of `state` and no action.
///
/// # Errors
/// Whatever the game raises while generating successors, and
/// [`SearchError::NoLegalActions`] if a non-terminal state leaves an agent without a move.
pub fn run<S: GameState>(
    algorithm: Algorithm,
    evaluation: &dyn Evaluation<S>,
    state: &S,
    depth: u32,
) -> Result<SearchReport<S::Action>, SearchError> {
    let mut searcher = Searcher::new(evaluation);
    let result = match algorithm {
        Algorithm::Minimax => minimax::search(&mut searcher, state, depth)?,
        Algorithm::AlphaBeta => alpha_beta::search(&mut searcher, state, depth)?,
        Algorithm::Expectimax => expectimax::search(&mut searcher, state, depth)?,
    };
    debug!(
        %algorithm,
        depth,
        value = result.value,
        action = ?result.action,
        stats = ?searcher.stats,
        "search done"
    );
    Ok(SearchReport {
        result,
        stats: searcher.stats,
    })
}

/// Who moves after `agent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Turn {
    /// Another adversary in the same round.
    Adversary(usize),
    /// The round is over; the controlled agent moves with one less unit of depth.
    NextRound,
}

pub(crate) fn next_turn(agent: usize, num_agents: usize) -> Turn {
    if agent + 1 < num_agents {
        Turn::Adversary(agent + 1)
    } else {
        Turn::NextRound
    }
}

/// Per-search state shared by the three algorithms.
pub(crate) struct Searcher<'a, S> {
    evaluation: &'a dyn Evaluation<S>,
    stats: SearchStats,
    ply: usize,
}

impl<'a, S: GameState> Searcher<'a, S> {
    pub(crate) fn new(evaluation: &'a dyn Evaluation<S>) -> Self {
        Self {
            evaluation,
            stats: SearchStats::default(),
            ply: 0,
        }
    }

    /// Evaluates `state` if it is a leaf for the remaining `depth`.
    pub(crate) fn leaf(&mut self, state: &S, depth: u32) -> Option<SearchResult<S::Action>> {
        if depth == 0 || state.is_terminal() {
            self.stats.evaluated += 1;
            Some(SearchResult::leaf(self.evaluation.evaluate(state)))
        } else {
            None
        }
    }

    /// Legal actions of `agent`, which must have at least one.
    pub(crate) fn expand(
        &mut self,
        state: &S,
        agent: usize,
    ) -> Result<Vec<S::Action>, SearchError> {
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions { agent });
        }
        self.stats.expanded += 1;
        Ok(actions)
    }

    /// Runs `f` one ply deeper.
    pub(crate) fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.ply += 1;
        self.stats.max_ply = self.stats.max_ply.max(self.ply);
        let out = f(self);
        self.ply -= 1;
        out
    }

    pub(crate) fn record_cutoff(&mut self) {
        self.stats.cutoffs += 1;
    }

    #[cfg(test)]
    pub(crate) fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Whether `value` should replace `best` at a maximizing node. The first child always does.
pub(crate) fn raises<A>(best: &SearchResult<A>, value: f64) -> bool {
    best.action.is_none() || value > best.value
}

/// Whether `value` should replace `best` at a minimizing node. The first child always does.
pub(crate) fn lowers<A>(best: &SearchResult<A>, value: f64) -> bool {
    best.action.is_none() || value < best.value
}

#[cfg(test)]
pub(crate) mod test_tree;
