//! Errors raised while configuring an agent or walking the game tree.

use thiserror::Error;

/// Everything that can go wrong in this crate.
///
/// A search is a deterministic computation, so none of these are transient: they point at a
/// game model that broke its own contract or at a bad configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A successor was requested for an action that is not currently legal for `agent`.
    #[error("action {action} is not legal for agent {agent}")]
    InvalidAction {
        /// Agent asked to move.
        agent: usize,
        /// Debug rendering of the rejected action.
        action: String,
    },

    /// A non-terminal state offered no legal action to `agent`.
    #[error("agent {agent} has no legal action in a non-terminal state")]
    NoLegalActions {
        /// Agent whose turn it was.
        agent: usize,
    },

    /// The search depth must be at least one round.
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(i64),

    /// No evaluation function is registered under that name.
    #[error("unknown evaluation function '{0}'")]
    UnknownEvaluation(String),

    /// No search algorithm goes by that name.
    #[error("unknown search algorithm '{0}' (expected minimax, alphabeta or expectimax)")]
    UnknownAlgorithm(String),
}

impl SearchError {
    /// Build an [`SearchError::InvalidAction`] from any debuggable action.
    pub fn invalid_action(agent: usize, action: &impl std::fmt::Debug) -> Self {
        SearchError::InvalidAction {
            agent,
            action: format!("{action:?}"),
        }
    }

    /// True for errors raised at configuration time, before any search runs.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SearchError::InvalidDepth(_)
                | SearchError::UnknownEvaluation(_)
                | SearchError::UnknownAlgorithm(_)
        )
    }
}
