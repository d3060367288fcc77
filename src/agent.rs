//! The agent the rest of an application talks to.
//!
//! A [`SearchAgent`] holds an evaluation, a depth and an [`Algorithm`], and answers one question:
//! which action should the controlled agent play from this state? Nothing is kept between calls,
//! so one agent can be asked about any number of unrelated states.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::configuration::Configuration;
use crate::error::SearchError;
use crate::evaluation::{Evaluation, EvaluationRegistry, SharedEvaluation};
use crate::game_interface::GameState;
use crate::logger::init_logger;
use crate::search::{self, Algorithm, SearchReport};

/// Chooses actions for the controlled agent by depth-limited search.
pub struct SearchAgent<S> {
    evaluation: SharedEvaluation<S>,
    depth: u32,
    algorithm: Algorithm,
}

impl<S: GameState> SearchAgent<S> {
    /// Create an agent searching `depth` rounds ahead with `algorithm`.
    ///
    /// # Errors
    /// [`SearchError::InvalidDepth`] if `depth` is 0.
    pub fn new<E>(evaluation: E, depth: u32, algorithm: Algorithm) -> Result<Self, SearchError>
    where
        E: Evaluation<S> + Send + Sync + 'static,
    {
        Self::with_shared(Arc::new(evaluation), depth, algorithm)
    }

    /// Same as [`new`](Self::new), for an evaluation that is already shared.
    pub fn with_shared(
        evaluation: SharedEvaluation<S>,
        depth: u32,
        algorithm: Algorithm,
    ) -> Result<Self, SearchError> {
        if depth == 0 {
            return Err(SearchError::InvalidDepth(0));
        }
        Ok(Self {
            evaluation,
            depth,
            algorithm,
        })
    }

    /// Create an agent from a [`Configuration`], resolving the evaluation name in `registry`.
    ///
    /// Starts the file logger if the configuration asks for it, once everything else is valid.
    ///
    /// # Errors
    /// A [`SearchError`] configuration error (depth below 1, unknown algorithm, unknown
    /// evaluation), or a failure to set up logging.
    #[instrument(skip_all)]
    pub fn from_config(
        config: &Configuration,
        registry: &EvaluationRegistry<S>,
    ) -> anyhow::Result<Self> {
        let depth = u32::try_from(config.depth)
            .ok()
            .filter(|depth| *depth >= 1)
            .ok_or(SearchError::InvalidDepth(config.depth))?;
        let algorithm = config.algorithm.parse::<Algorithm>()?;
        let evaluation = registry.resolve(&config.evaluation)?;
        let agent = Self::with_shared(evaluation, depth, algorithm)?;

        if config.log {
            init_logger()?;
        }

        info!(depth, %algorithm, evaluation = %config.evaluation, "search agent configured");
        Ok(agent)
    }

    /// The action the configured search recommends for the controlled agent.
    ///
    /// Returns `None` when `state` is already over: a finished game has no move to play.
    ///
    /// # Errors
    /// Any [`SearchError`] raised by the game while the tree is explored.
    pub fn choose_action(&self, state: &S) -> Result<Option<S::Action>, SearchError> {
        Ok(self.search(state)?.result.action)
    }

    /// Runs the configured search from `state` and returns the root value, action and statistics.
    #[instrument(skip_all, fields(algorithm = %self.algorithm, depth = self.depth))]
    pub fn search(&self, state: &S) -> Result<SearchReport<S::Action>, SearchError> {
        if state.is_terminal() {
            debug!("root state is terminal, no action to choose");
        }
        search::run(self.algorithm, &*self.evaluation, state, self.depth)
    }

    /// Rounds searched ahead.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Opponent model in use.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl<S> Clone for SearchAgent<S> {
    fn clone(&self) -> Self {
        Self {
            evaluation: self.evaluation.clone(),
            depth: self.depth,
            algorithm: self.algorithm,
        }
    }
}

impl<S> std::fmt::Debug for SearchAgent<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAgent")
            .field("depth", &self.depth)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
