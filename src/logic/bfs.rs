use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::tree::SearchTree;
use super::{Board, Direction, State};
use crate::solver::{Algorithm, Metrics, Outcome, SearchLimits, SearchStats, Solver};

const PROGRESS_INTERVAL: u64 = 100_000;

/// States are marked visited when queued, so each is enqueued at most once.
#[derive(Debug, Default)]
pub struct BreadthFirstSolver {
    limits: SearchLimits,
    stats: SearchStats,
}

impl BreadthFirstSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    fn search(&mut self, start: State, n: usize) -> Option<Vec<Direction>> {
        let goal = State::goal(n);
        if start == goal {
            self.stats.states_discovered = 1;
            self.stats.path_cost = Some(0);
            self.stats.outcome = Some(Outcome::Solved);
            return Some(Vec::new());
        }

        let (mut tree, root) = SearchTree::new(start);
        let mut queue = VecDeque::from([root]);

        while let Some(id) = queue.pop_front() {
            if self.limits.reached(self.stats.nodes_explored) {
                warn!(
                    event = "node_limit",
                    algorithm = "BFS",
                    nodes_explored = self.stats.nodes_explored,
                );
                self.stats.states_discovered = tree.len();
                self.stats.outcome = Some(Outcome::NodeLimit);
                return None;
            }

            self.stats.nodes_explored += 1;
            if self.stats.nodes_explored % PROGRESS_INTERVAL == 0 {
                debug!(
                    event = "progress",
                    algorithm = "BFS",
                    nodes_explored = self.stats.nodes_explored,
                    depth = tree.g(id),
                    frontier = queue.len(),
                );
            }

            if tree.state(id) == &goal {
                let path = tree.path_to(id);
                self.stats.states_discovered = tree.len();
                self.stats.path_cost = Some(path.len());
                self.stats.outcome = Some(Outcome::Solved);
                return Some(path);
            }

            let depth = tree.g(id) + 1;
            let current = tree.state(id).clone();
            for successor in current.successors(n) {
                if tree.lookup(&successor.state).is_none() {
                    let child = tree.insert(successor.state, id, successor.direction, depth);
                    queue.push_back(child);
                }
            }
            self.stats.observe_frontier(queue.len());
        }

        self.stats.states_discovered = tree.len();
        self.stats.outcome = Some(Outcome::Exhausted);
        None
    }
}

impl Solver for BreadthFirstSolver {
    fn solve(&mut self, board: &Board) -> Option<Vec<Direction>> {
        self.stats = SearchStats::default();
        let n = board.dimension();
        info!(event = "solve_start", algorithm = "BFS", dimension = n);

        let started = Instant::now();
        let result = self.search(board.state(), n);
        self.stats.elapsed = started.elapsed();

        info!(
            event = "solve_end",
            algorithm = "BFS",
            outcome = %self.stats.outcome.unwrap_or(Outcome::Exhausted),
            nodes_explored = self.stats.nodes_explored,
            path_cost = ?self.stats.path_cost,
            duration_ms = self.stats.elapsed.as_millis() as u64,
        );
        result
    }

    fn decision_basis(&self) -> String {
        "Explores all states at depth d before any state at depth d+1".to_string()
    }

    fn metrics(&self) -> Metrics {
        self.stats.metrics(Algorithm::Bfs)
    }
}
