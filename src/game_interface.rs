//! Module defining the trait a game must implement to be searched

use std::fmt::Debug;

use crate::error::SearchError;

/// Index of the agent whose move the search returns. Adversaries use `1..num_agents()`.
pub const CONTROLLED_AGENT: usize = 0;

/// What the game should implement.
///
/// A state is never mutated by the search: every move produces a fresh state through
/// [`successor`](GameState::successor), and states are dropped as soon as their subtree has been
/// valued.
pub trait GameState: Sized {
    /// What an agent plays to make the game progress.
    type Action: Clone + Debug;

    /// Legal actions of `agent` in this state.
    ///
    /// Order matters: ties are broken in favour of the earliest action, and alpha-beta prunes
    /// later siblings first. The list should only be empty in a terminal state.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// The state reached after `agent` plays `action`.
    ///
    /// # Error
    /// [`SearchError::InvalidAction`] when `action` is not in `legal_actions(agent)`.
    fn successor(&self, agent: usize, action: &Self::Action) -> Result<Self, SearchError>;

    /// Number of agents taking turns, controlled agent included. At least one.
    fn num_agents(&self) -> usize;

    /// True if the controlled agent has won.
    fn is_win(&self) -> bool;

    /// True if the controlled agent has lost.
    fn is_lose(&self) -> bool;

    /// Current game score, from the controlled agent's point of view.
    fn score(&self) -> f64;

    /// True if the game is over, whatever the outcome.
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}
