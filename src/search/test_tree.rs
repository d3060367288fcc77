//! Explicit game trees for exercising the search.

use std::rc::Rc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::SearchError;
use crate::game_interface::GameState;

/// A node of a hand-written game tree; the same children are offered to whichever agent moves.
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    value: f64,
    win: bool,
    lose: bool,
    agents: usize,
    children: Rc<Vec<(&'static str, Tree)>>,
}

impl Tree {
    pub(crate) fn leaf(value: f64) -> Self {
        Tree {
            value,
            win: false,
            lose: false,
            agents: 2,
            children: Rc::new(vec![]),
        }
    }

    pub(crate) fn win(value: f64) -> Self {
        Tree {
            win: true,
            ..Tree::leaf(value)
        }
    }

    pub(crate) fn lose(value: f64) -> Self {
        Tree {
            lose: true,
            ..Tree::leaf(value)
        }
    }

    /// Interior node for a game of `agents` agents, valued 0 if evaluated early.
    pub(crate) fn branch(agents: usize, children: Vec<(&'static str, Tree)>) -> Self {
        Tree {
            agents,
            children: Rc::new(children),
            ..Tree::leaf(0.0)
        }
    }

    /// Same node, valued `value` when the search stops on it.
    pub(crate) fn valued(self, value: f64) -> Self {
        Tree { value, ..self }
    }

    /// A terminal node that still offers moves, to check the search does not look past it.
    pub(crate) fn into_terminal(self, win: bool) -> Self {
        Tree {
            win,
            lose: !win,
            ..self
        }
    }

    /// Random tree of `agents` agents, `plies` moves deep and `branching` wide.
    ///
    /// Values are small integers so that ties happen; about one interior node in ten is terminal.
    pub(crate) fn random(agents: usize, plies: usize, branching: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random_node(&mut rng, agents, plies, branching)
    }

    fn random_node(rng: &mut StdRng, agents: usize, plies: usize, branching: usize) -> Self {
        const LABELS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];
        let value = f64::from(rng.random_range(-10i32..=10));
        if plies == 0 {
            return Tree::leaf(value);
        }
        if rng.random_bool(0.1) {
            return if rng.random_bool(0.5) {
                Tree::win(value + 100.0)
            } else {
                Tree::lose(value - 100.0)
            };
        }
        let width = rng.random_range(1..=branching.min(LABELS.len()));
        let children = LABELS[..width]
            .iter()
            .map(|label| (*label, Self::random_node(rng, agents, plies - 1, branching)))
            .collect();
        Tree::branch(agents, children).valued(value)
    }
}

impl GameState for Tree {
    type Action = &'static str;

    fn legal_actions(&self, _agent: usize) -> Vec<&'static str> {
        self.children.iter().map(|(label, _)| *label).collect()
    }

    fn successor(&self, agent: usize, action: &&'static str) -> Result<Self, SearchError> {
        self.children
            .iter()
            .find(|(label, _)| label == action)
            .map(|(_, child)| child.clone())
            .ok_or_else(|| SearchError::invalid_action(agent, action))
    }

    fn num_agents(&self) -> usize {
        self.agents
    }

    fn is_win(&self) -> bool {
        self.win
    }

    fn is_lose(&self) -> bool {
        self.lose
    }

    fn score(&self) -> f64 {
        self.value
    }
}

/// One controlled agent, one adversary: `A` leads to `[3, 5]`, `B` to `[1, 9]`.
pub(crate) fn sample_tree() -> Tree {
    Tree::branch(
        2,
        vec![
            (
                "A",
                Tree::branch(2, vec![("l", Tree::leaf(3.0)), ("r", Tree::leaf(5.0))]),
            ),
            (
                "B",
                Tree::branch(2, vec![("l", Tree::leaf(1.0)), ("r", Tree::leaf(9.0))]),
            ),
        ],
    )
}
