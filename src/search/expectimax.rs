//! Expectimax: adversaries choose uniformly at random among their legal actions.
//!
//! The controlled agent still maximizes. An adversary node is worth the mean of its children, so
//! every child has to be visited and nothing can be pruned. Its action is meaningless and left
//! empty.

use super::{next_turn, raises, SearchResult, Searcher, Turn};
use crate::error::SearchError;
use crate::game_interface::{GameState, CONTROLLED_AGENT};

pub(crate) fn search<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    state: &S,
    depth: u32,
) -> Result<SearchResult<S::Action>, SearchError> {
    maximize(searcher, state, depth)
}

fn maximize<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    state: &S,
    depth: u32,
) -> Result<SearchResult<S::Action>, SearchError> {
    if let Some(leaf) = searcher.leaf(state, depth) {
        return Ok(leaf);
    }

    let mut best = SearchResult::leaf(f64::NEG_INFINITY);
    for action in searcher.expand(state, CONTROLLED_AGENT)? {
        let child = state.successor(CONTROLLED_AGENT, &action)?;
        let value = reply(searcher, &child, depth, CONTROLLED_AGENT, state.num_agents())?;
        if raises(&best, value) {
            best = SearchResult::new(value, action);
        }
    }
    Ok(best)
}

fn expect<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    state: &S,
    depth: u32,
    agent: usize,
) -> Result<SearchResult<S::Action>, SearchError> {
    if let Some(leaf) = searcher.leaf(state, depth) {
        return Ok(leaf);
    }

    let actions = searcher.expand(state, agent)?;
    let probability = 1.0 / actions.len() as f64;
    let mut expected = 0.0;
    for action in &actions {
        let child = state.successor(agent, action)?;
        expected += probability * reply(searcher, &child, depth, agent, state.num_agents())?;
    }
    Ok(SearchResult::leaf(expected))
}

fn reply<S: GameState>(
    searcher: &mut Searcher<'_, S>,
    child: &S,
    depth: u32,
    mover: usize,
    num_agents: usize,
) -> Result<f64, SearchError> {
    let result = searcher.descend(|searcher| match next_turn(mover, num_agents) {
        Turn::Adversary(next) => expect(searcher, child, depth, next),
        Turn::NextRound => maximize(searcher, child, depth - 1),
    })?;
    Ok(result.value)
}
