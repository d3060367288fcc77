//! # Adversarial Search
//!
//! Depth-limited game-tree search for turn-based games where one controlled agent plays against
//! one or more adversaries.
//!
//! It provides:
//! - The [`GameState`](crate::game_interface::GameState) trait a game implements to be searched
//! - Three opponent models ([`Algorithm`](crate::search::Algorithm)): minimax, minimax with
//!   alpha-beta pruning, and expectimax (adversaries play uniformly at random)
//! - Pluggable [`Evaluation`](crate::evaluation::Evaluation)s, from the bare game score to a
//!   positional heuristic
//! - A [`SearchAgent`](crate::agent::SearchAgent) answering "which action now?"
//!
//! Agents move in index order. Agent 0 is the controlled agent and maximizes; agents `1..n` are
//! adversaries. One full pass through all agents is a round, and the configured depth counts
//! rounds, not individual moves.
//!
//! # Documentation Overview
//!
//! - For the turn protocol and how values are backed up, see the [`search`] module.
//! - For configuring an agent from code or from the environment, see
//!   [`Configuration`](crate::configuration::Configuration).
//! - For writing your own heuristic, see the [`evaluation`] module.
//!
//! # Usage Example
//!
//! ```
//! use adversarial_search::prelude::*;
//!
//! /// Two piles; each turn an agent takes one stone from either pile.
//! /// Agent 0 wants the final difference between the piles to be large.
//! #[derive(Clone)]
//! struct Piles {
//!     piles: [u32; 2],
//!     turns_left: u32,
//! }
//!
//! impl GameState for Piles {
//!     type Action = usize;
//!
//!     fn legal_actions(&self, _agent: usize) -> Vec<usize> {
//!         (0..2).filter(|&i| self.piles[i] > 0).collect()
//!     }
//!
//!     fn successor(&self, agent: usize, action: &usize) -> Result<Self, SearchError> {
//!         if !self.legal_actions(agent).contains(action) {
//!             return Err(SearchError::invalid_action(agent, action));
//!         }
//!         let mut next = self.clone();
//!         next.piles[*action] -= 1;
//!         next.turns_left -= 1;
//!         Ok(next)
//!     }
//!
//!     fn num_agents(&self) -> usize { 2 }
//!     fn is_win(&self) -> bool { false }
//!     fn is_lose(&self) -> bool { self.turns_left == 0 }
//!     fn score(&self) -> f64 { (self.piles[0] as f64 - self.piles[1] as f64).abs() }
//! }
//!
//! fn main() -> adversarial_search::anyhow::Result<()> {
//!     let state = Piles { piles: [3, 3], turns_left: 4 };
//!
//!     let agent = SearchAgent::new(ScoreEvaluation, 2, Algorithm::AlphaBeta)?;
//!     let action = agent.choose_action(&state)?;
//!     assert!(action.is_some());
//!
//!     // Or from the environment, with the evaluation picked by name.
//!     let config = Configuration::from_env().with_depth(1);
//!     let agent = SearchAgent::from_config(&config, &EvaluationRegistry::new())?;
//!     println!("{:?}", agent.search(&state)?);
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub mod agent;
pub mod configuration;
pub mod error;
pub mod evaluation;
pub mod game_interface;
mod logger;
pub mod search;

pub use anyhow;

/// Commonly used types and traits for quick access.
///
/// Import this prelude to get started easily:
/// ```rust
/// use adversarial_search::prelude::*;
/// ```
///
/// Includes:
/// - [`SearchAgent`](crate::agent::SearchAgent)
/// - [`Configuration`](crate::configuration::Configuration)
/// - [`GameState`](crate::game_interface::GameState) and the controlled agent index
/// - the evaluations and their registry
/// - [`Algorithm`](crate::search::Algorithm) and the search results
pub mod prelude {
    pub use crate::agent::SearchAgent;
    pub use crate::configuration::Configuration;
    pub use crate::error::SearchError;
    pub use crate::evaluation::{
        Evaluation, EvaluationRegistry, PositionalEvaluation, PositionalFeatures,
        PositionalWeights, ScoreEvaluation, Threat,
    };
    pub use crate::game_interface::{GameState, CONTROLLED_AGENT};
    pub use crate::search::{Algorithm, SearchReport, SearchResult, SearchStats};
}
