//! Static evaluation of game states.
//!
//! An evaluation maps a state to a desirability score for the controlled agent. The search calls
//! it on every leaf: when the depth budget is spent or when the game is over.
//!
//! Two evaluations are provided:
//! - [`ScoreEvaluation`]: the game score, nothing else.
//! - [`PositionalEvaluation`]: score plus positional features (goals, power-ups, threats) for games
//!   that implement [`PositionalFeatures`].
//!
//! Any `Fn(&S) -> f64` is an evaluation too. Agents built from a
//! [`Configuration`](crate::configuration::Configuration) pick their evaluation by name from an
//! [`EvaluationRegistry`].

use std::sync::Arc;

use crate::error::SearchError;
use crate::game_interface::GameState;

/// Scores a state for the controlled agent. Must be total and side-effect free.
pub trait Evaluation<S> {
    /// Desirability of `state`; higher is better for the controlled agent.
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluation<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Returns the game score of the state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreEvaluation;

impl<S: GameState> Evaluation<S> for ScoreEvaluation {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}

/// Something that can hunt or be hunted by the controlled agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    /// Distance from the controlled agent.
    pub distance: f64,
    /// Turns left during which touching this threat is harmless (0 when dangerous).
    pub harmless_turns: u32,
}

impl Threat {
    /// Harmless long enough to be caught before it turns dangerous again.
    pub fn is_catchable(&self) -> bool {
        self.harmless_turns as f64 > self.distance
    }
}

/// Positional features a game exposes to [`PositionalEvaluation`].
pub trait PositionalFeatures: GameState {
    /// Distance from the controlled agent to every goal it still has to collect.
    fn goal_distances(&self) -> Vec<f64>;

    /// Power-ups still on the board.
    fn power_ups_remaining(&self) -> usize {
        0
    }

    /// Every adversary, with its distance and how long it stays harmless.
    fn threats(&self) -> Vec<Threat>;
}

/// Weights of the features combined by [`PositionalEvaluation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionalWeights {
    /// Multiplies the game score.
    pub score: f64,
    /// Reward `nearest_goal / (d + 1)` for the closest goal at distance `d`.
    pub nearest_goal: f64,
    /// Per goal left.
    pub goals_left: f64,
    /// Per power-up left.
    pub power_ups_left: f64,
    /// Penalty `threat / (d + 1)` for each dangerous threat at distance `d`.
    pub threat: f64,
    /// Flat penalty when a dangerous threat is within `danger_radius`.
    pub danger: f64,
    /// Radius under which a dangerous threat triggers `danger`.
    pub danger_radius: f64,
    /// Reward `hunt / (d + 1)` for each catchable threat at distance `d`.
    pub hunt: f64,
    /// Added on a won state, subtracted on a lost one.
    pub outcome: f64,
}

impl Default for PositionalWeights {
    fn default() -> Self {
        Self {
            score: 1.0,
            nearest_goal: 10.0,
            goals_left: -4.0,
            power_ups_left: -20.0,
            threat: -10.0,
            danger: -200.0,
            danger_radius: 1.0,
            hunt: 50.0,
            outcome: 10_000.0,
        }
    }
}

/// Extended heuristic: game score combined with goal, power-up and threat features.
///
/// Won and lost states are pushed far above and below anything a running game can reach, so the
/// search always prefers a certain win and avoids a certain loss.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalEvaluation {
    weights: PositionalWeights,
}

impl PositionalEvaluation {
    /// Evaluation with [`PositionalWeights::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluation with custom weights.
    pub fn with_weights(weights: PositionalWeights) -> Self {
        Self { weights }
    }

    /// Weights in use.
    pub fn weights(&self) -> &PositionalWeights {
        &self.weights
    }
}

impl<S: PositionalFeatures> Evaluation<S> for PositionalEvaluation {
    fn evaluate(&self, state: &S) -> f64 {
        let w = &self.weights;
        let mut value = w.score * state.score();

        if state.is_win() {
            return value + w.outcome;
        }
        if state.is_lose() {
            return value - w.outcome;
        }

        let goals = state.goal_distances();
        if let Some(nearest) = goals.iter().copied().reduce(f64::min) {
            value += w.nearest_goal / (nearest + 1.0);
        }
        value += w.goals_left * goals.len() as f64;
        value += w.power_ups_left * state.power_ups_remaining() as f64;

        for threat in state.threats() {
            if threat.is_catchable() {
                value += w.hunt / (threat.distance + 1.0);
            } else {
                value += w.threat / (threat.distance + 1.0);
                if threat.distance <= w.danger_radius {
                    value += w.danger;
                }
            }
        }
        value
    }
}

/// Shared handle to an evaluation, as held by agents and registries.
pub type SharedEvaluation<S> = Arc<dyn Evaluation<S> + Send + Sync>;

/// Evaluations selectable by name at configuration time.
///
/// Names are matched ignoring ASCII case; a later registration shadows an earlier one with the
/// same name.
pub struct EvaluationRegistry<S> {
    entries: Vec<(String, SharedEvaluation<S>)>,
}

impl<S: GameState> EvaluationRegistry<S> {
    /// Registry holding [`ScoreEvaluation`] as `score` (alias `scoreEvaluationFunction`).
    pub fn new() -> Self {
        let score: SharedEvaluation<S> = Arc::new(ScoreEvaluation);
        Self {
            entries: vec![
                ("score".to_owned(), score.clone()),
                ("scoreEvaluationFunction".to_owned(), score),
            ],
        }
    }

    /// Adds `evaluation` under `name`.
    #[must_use]
    pub fn register<E>(mut self, name: impl Into<String>, evaluation: E) -> Self
    where
        E: Evaluation<S> + Send + Sync + 'static,
    {
        self.entries.push((name.into(), Arc::new(evaluation)));
        self
    }

    /// Looks `name` up.
    ///
    /// # Errors
    /// [`SearchError::UnknownEvaluation`] if nothing is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<SharedEvaluation<S>, SearchError> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, evaluation)| evaluation.clone())
            .ok_or_else(|| SearchError::UnknownEvaluation(name.to_owned()))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<S: PositionalFeatures> EvaluationRegistry<S> {
    /// Also registers [`PositionalEvaluation`] as `better` (alias `positional`).
    #[must_use]
    pub fn with_positional(self) -> Self {
        self.register("better", PositionalEvaluation::new())
            .register("positional", PositionalEvaluation::new())
    }
}

impl<S: GameState> Default for EvaluationRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
