//! A small pursuit game on a grid: the runner (agent 0) collects pellets while chasers try to
//! catch it. Eating a power pellet makes the chasers harmless for a while.

use std::collections::BTreeSet;
use std::rc::Rc;

use adversarial_search::prelude::*;

const SCARED_TURNS: u32 = 40;
const STEP_COST: f64 = 1.0;
const PELLET_REWARD: f64 = 10.0;
const CATCH_REWARD: f64 = 200.0;
const CLEAR_REWARD: f64 = 500.0;
const CAUGHT_PENALTY: f64 = 500.0;

type Pos = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    fn apply(self, (x, y): Pos) -> Pos {
        match self {
            Direction::North => (x, y - 1),
            Direction::South => (x, y + 1),
            Direction::East => (x + 1, y),
            Direction::West => (x - 1, y),
            Direction::Stop => (x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Chaser {
    pos: Pos,
    start: Pos,
    scared: u32,
}

#[derive(Debug, Clone)]
pub struct Pursuit {
    walls: Rc<BTreeSet<Pos>>,
    runner: Pos,
    chasers: Vec<Chaser>,
    pellets: BTreeSet<Pos>,
    power: BTreeSet<Pos>,
    score: f64,
    win: bool,
    lose: bool,
}

impl Pursuit {
    /// `%` wall, `R` runner, `G` chaser, `.` pellet, `o` power pellet.
    pub fn parse(layout: &[&str]) -> Self {
        let mut walls = BTreeSet::new();
        let mut runner = None;
        let mut chasers = vec![];
        let mut pellets = BTreeSet::new();
        let mut power = BTreeSet::new();
        for (y, row) in layout.iter().enumerate() {
            for (x, cell) in row.chars().enumerate() {
                let pos = (x as i32, y as i32);
                match cell {
                    '%' => {
                        walls.insert(pos);
                    }
                    'R' => runner = Some(pos),
                    'G' => chasers.push(Chaser {
                        pos,
                        start: pos,
                        scared: 0,
                    }),
                    '.' => {
                        pellets.insert(pos);
                    }
                    'o' => {
                        power.insert(pos);
                    }
                    _ => {}
                }
            }
        }
        Pursuit {
            walls: Rc::new(walls),
            runner: runner.expect("layout has no runner"),
            chasers,
            pellets,
            power,
            score: 0.0,
            win: false,
            lose: false,
        }
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets.len()
    }

    pub fn chaser_scared(&self, index: usize) -> u32 {
        self.chasers[index].scared
    }

    fn open(&self, pos: Pos) -> bool {
        !self.walls.contains(&pos)
    }

    fn position(&self, agent: usize) -> Pos {
        if agent == CONTROLLED_AGENT {
            self.runner
        } else {
            self.chasers[agent - 1].pos
        }
    }

    fn resolve_contacts(&mut self) {
        for chaser in self.chasers.iter_mut() {
            if chaser.pos != self.runner {
                continue;
            }
            if chaser.scared > 0 {
                self.score += CATCH_REWARD;
                chaser.pos = chaser.start;
                chaser.scared = 0;
            } else {
                self.score -= CAUGHT_PENALTY;
                self.lose = true;
                return;
            }
        }
    }
}

fn manhattan(a: Pos, b: Pos) -> f64 {
    ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
}

impl GameState for Pursuit {
    type Action = Direction;

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.is_terminal() {
            return vec![];
        }
        let from = self.position(agent);
        let mut actions: Vec<Direction> = Direction::MOVES
            .into_iter()
            .filter(|dir| self.open(dir.apply(from)))
            .collect();
        if agent == CONTROLLED_AGENT || actions.is_empty() {
            actions.push(Direction::Stop);
        }
        actions
    }

    fn successor(&self, agent: usize, action: &Direction) -> Result<Self, SearchError> {
        if agent >= self.num_agents() || !self.legal_actions(agent).contains(action) {
            return Err(SearchError::invalid_action(agent, action));
        }
        let mut next = self.clone();
        if agent == CONTROLLED_AGENT {
            next.runner = action.apply(self.runner);
            next.score -= STEP_COST;
            if next.pellets.remove(&next.runner) {
                next.score += PELLET_REWARD;
            }
            if next.power.remove(&next.runner) {
                for chaser in next.chasers.iter_mut() {
                    chaser.scared = SCARED_TURNS;
                }
            }
        } else {
            let chaser = &mut next.chasers[agent - 1];
            chaser.pos = action.apply(chaser.pos);
            chaser.scared = chaser.scared.saturating_sub(1);
        }
        next.resolve_contacts();
        if !next.lose && next.pellets.is_empty() {
            next.score += CLEAR_REWARD;
            next.win = true;
        }
        Ok(next)
    }

    fn num_agents(&self) -> usize {
        1 + self.chasers.len()
    }

    fn is_win(&self) -> bool {
        self.win
    }

    fn is_lose(&self) -> bool {
        self.lose
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl PositionalFeatures for Pursuit {
    fn goal_distances(&self) -> Vec<f64> {
        self.pellets
            .iter()
            .map(|pellet| manhattan(self.runner, *pellet))
            .collect()
    }

    fn power_ups_remaining(&self) -> usize {
        self.power.len()
    }

    fn threats(&self) -> Vec<Threat> {
        self.chasers
            .iter()
            .map(|chaser| Threat {
                distance: manhattan(self.runner, chaser.pos),
                harmless_turns: chaser.scared,
            })
            .collect()
    }
}

/// Plays `state` to the end: the runner follows `agent`, chasers take their first legal move.
///
/// Returns the final state and the number of rounds played, or `None` if `max_rounds` ran out.
pub fn play_out(
    agent: &SearchAgent<Pursuit>,
    mut state: Pursuit,
    max_rounds: usize,
) -> Result<Option<(Pursuit, usize)>, SearchError> {
    for round in 1..=max_rounds {
        let action = agent
            .choose_action(&state)?
            .expect("running game must have an action");
        state = state.successor(CONTROLLED_AGENT, &action)?;
        for chaser in 1..state.num_agents() {
            if state.is_terminal() {
                break;
            }
            let reply = state.legal_actions(chaser)[0];
            state = state.successor(chaser, &reply)?;
        }
        if state.is_terminal() {
            return Ok(Some((state, round)));
        }
    }
    Ok(None)
}

/// Runner one step east of a lone pellet, chaser far away.
pub const LAST_PELLET: &[&str] = &[
    "%%%%%%%%",
    "%.R    %",
    "%      %",
    "%     G%",
    "%%%%%%%%",
];

/// Corridor with a chaser right behind the runner.
pub const CORNERED: &[&str] = &[
    "%%%%%%%",
    "%.  RG%",
    "%%%%%%%",
];

/// Pellet four steps west, out of reach of a one-round search.
pub const DISTANT_PELLET: &[&str] = &[
    "%%%%%%%%%%",
    "%.   R   %",
    "%%%%%%%% %",
    "%G       %",
    "%%%%%%%%%%",
];

/// Open room with two chasers far from the runner.
pub const OPEN_ROOM: &[&str] = &[
    "%%%%%%%%%%%",
    "%R   .    %",
    "%  .   .  %",
    "%         %",
    "%  .     G%",
    "%        G%",
    "%%%%%%%%%%%",
];

/// Room full of pellets, the only chaser locked in a pocket below.
pub const LOCKED_CHASER: &[&str] = &[
    "%%%%%%%%%",
    "%.. . ..%",
    "%. R   .%",
    "%.. . ..%",
    "%%%%%%%%%",
    "%G %%%%%%",
    "%%%%%%%%%",
];

/// Power pellet one step west of the runner, a chaser in the corridor below.
pub const POWER_PELLET: &[&str] = &[
    "%%%%%%%%",
    "%  oR  %",
    "%%% %%%%",
    "%G    .%",
    "%%%%%%%%",
];
