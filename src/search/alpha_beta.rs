//! Minimax with alpha-beta pruning.
//!
//! `alpha` is the value the controlled agent is already guaranteed higher up the current path,
//! `beta` the value the adversaries are already guaranteed. Both travel down by value, so each
//! path has its own bounds. A node stops enumerating its children as soon as its provisional value
//! strictly leaves the window: equal values are still explored, which keeps the root value and
//! the tie-breaking identical to plain minimax.

use tracing::trace;

use super::{lowers, next_turn, raises, SearchResult, Searcher, Turn};
use crate::error::SearchError;
use crate::game_interface::{GameState, CONTROLLED_AGENT};

pub(crate) fn search<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    state: &S,
    depth: u32,
) -> Result<SearchResult<S::Action>, SearchError> {
    maximize(searcher, state, depth, f64::NEG_INFINITY, f64::INFINITY)
}

fn maximize<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    state: &S,
    depth: u32,
    mut alpha: f64,
    beta: f64,
) -> Result<SearchResult<S::Action>, SearchError> {
    if let Some(leaf) = searcher.leaf(state, depth) {
        return Ok(leaf);
    }

    let mut best = SearchResult::leaf(f64::NEG_INFINITY);
    for action in searcher.expand(state, CONTROLLED_AGENT)? {
        let child = state.successor(CONTROLLED_AGENT, &action)?;
        let value = reply(
            searcher,
            &child,
            depth,
            CONTROLLED_AGENT,
            state.num_agents(),
            alpha,
            beta,
        )?;
        if raises(&best, value) {
            best = SearchResult::new(value, action);
        }
        alpha = alpha.max(best.value);

        if best.value > beta {
            trace!(depth, value = best.value, beta, "fail-high cutoff");
            searcher.record_cutoff();
            return Ok(best);
        }
    }
    Ok(best)
}

fn minimize<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    state: &S,
    depth: u32,
    agent: usize,
    alpha: f64,
    mut beta: f64,
) -> Result<SearchResult<S::Action>, SearchError> {
    if let Some(leaf) = searcher.leaf(state, depth) {
        return Ok(leaf);
    }

    let mut best = SearchResult::leaf(f64::INFINITY);
    for action in searcher.expand(state, agent)? {
        let child = state.successor(agent, &action)?;
        let value = reply(searcher, &child, depth, agent, state.num_agents(), alpha, beta)?;
        if lowers(&best, value) {
            best = SearchResult::new(value, action);
        }
        beta = beta.min(best.value);

        if best.value < alpha {
            trace!(depth, agent, value = best.value, alpha, "fail-low cutoff");
            searcher.record_cutoff();
            return Ok(best);
        }
    }
    Ok(best)
}

fn reply<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    child: &S,
    depth: u32,
    mover: usize,
    num_agents: usize,
    alpha: f64,
    beta: f64,
) -> Result<f64, SearchError> {
    let result = searcher.descend(|searcher| match next_turn(mover, num_agents) {
        Turn::Adversary(next) => minimize(searcher, child, depth, next, alpha, beta),
        Turn::NextRound => maximize(searcher, child, depth - 1, alpha, beta),
    })?;
    Ok(result.value)
}
