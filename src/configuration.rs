//! Config for the search agent
//!
//! This module provides the options used to build a [`SearchAgent`](crate::agent::SearchAgent).
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`]. Nothing is validated here: the depth,
//! algorithm and evaluation name are checked when the agent is built, before any search runs.
//!
//! # Environment Variables
//!
//! All values are optional.
//!
//! - `SEARCH_DEPTH`: Number of rounds to look ahead (default: `2`)
//! - `SEARCH_ALGORITHM`: `minimax`, `alphabeta` or `expectimax`, case-insensitive (default: `minimax`)
//! - `SEARCH_EVALUATION`: Name of the evaluation function in the registry (default: `score`)
//! - `SEARCH_LOG`: Set to `"true"` to log every search to a file (default: `false`)

use crate::search::Algorithm;

/// Configuration for a search agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) depth: i64,
    pub(crate) algorithm: String,
    pub(crate) evaluation: String,
    pub(crate) log: bool,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The agent looks two rounds ahead.
    /// - Adversaries are modeled by plain minimax.
    /// - States are valued by the game score (`score`).
    /// - Logging to file is disabled.
    pub fn new() -> Self {
        Self {
            depth: 2,
            algorithm: Algorithm::Minimax.to_string(),
            evaluation: "score".to_owned(),
            log: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// The following environment variables are recognized:
    /// - `SEARCH_DEPTH`: search depth, in rounds (default: `2`)
    /// - `SEARCH_ALGORITHM`: algorithm name (default: `minimax`)
    /// - `SEARCH_EVALUATION`: evaluation function name (default: `score`)
    /// - `SEARCH_LOG`: if set to `"true"`, enables logging to file (default: `false`)
    ///
    /// An unset or unparsable depth falls back to the default. The algorithm name is kept as is
    /// and checked when the agent is built.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        let defaults = Self::new();
        let depth = std::env::var("SEARCH_DEPTH")
            .ok()
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(defaults.depth);
        let algorithm = std::env::var("SEARCH_ALGORITHM").unwrap_or(defaults.algorithm);
        let evaluation = std::env::var("SEARCH_EVALUATION").unwrap_or(defaults.evaluation);

        Self {
            depth,
            algorithm,
            evaluation,
            log: get_env_flag("SEARCH_LOG", defaults.log),
        }
    }

    /// Set the search depth, in rounds. Must be at least 1 when the agent is built.
    pub fn with_depth(mut self, depth: i64) -> Self {
        self.depth = depth;
        self
    }

    /// Set the opponent model.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm.to_string();
        self
    }

    /// Set the opponent model by name. Unknown names are reported when the agent is built.
    pub fn with_algorithm_name(mut self, name: impl Into<String>) -> Self {
        self.algorithm = name.into();
        self
    }

    /// Set the name of the evaluation function, looked up in the registry.
    pub fn with_evaluation(mut self, name: impl Into<String>) -> Self {
        self.evaluation = name.into();
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Configured depth.
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Configured algorithm name.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Configured evaluation name.
    pub fn evaluation(&self) -> &str {
        &self.evaluation
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
