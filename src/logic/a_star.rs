use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::heuristic::{Heuristic, HeuristicKind};
use super::tree::{NodeId, SearchTree};
use super::{Board, Direction, State};
use crate::solver::{Algorithm, Metrics, Outcome, SearchLimits, SearchStats, Solver};

const PROGRESS_INTERVAL: u64 = 100_000;

// f = g + h

#[derive(Clone, Debug)]
struct FrontierEntry {
    f: u32,
    g: u32,
    h: u32,
    state: State,
    id: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // BinaryHeap is a max-heap; reversed so the smallest (f, g, state) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.state.cmp(&self.state))
    }
}

/// Best-first search on `f = g + h`.
///
/// Returns a shortest path whenever `H` is admissible and consistent, which
/// holds for every [`HeuristicKind`].
#[derive(Debug)]
pub struct AStarSolver<H: Heuristic = HeuristicKind> {
    heuristic: H,
    limits: SearchLimits,
    stats: SearchStats,
    initial_estimate: Option<u32>,
}

impl<H: Heuristic + Default> Default for AStarSolver<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H: Heuristic> AStarSolver<H> {
    pub fn new(heuristic: H) -> Self {
        AStarSolver {
            heuristic,
            limits: SearchLimits::default(),
            stats: SearchStats::default(),
            initial_estimate: None,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    fn search(&mut self, start: State, n: usize) -> Option<Vec<Direction>> {
        let goal = State::goal(n);
        let h = self.heuristic.estimate(start.tiles(), n);
        self.initial_estimate = Some(h);

        if start == goal {
            self.stats.states_discovered = 1;
            self.stats.path_cost = Some(0);
            self.stats.outcome = Some(Outcome::Solved);
            return Some(Vec::new());
        }

        let (mut tree, root) = SearchTree::new(start.clone());
        let mut open_set = BinaryHeap::new();
        open_set.push(FrontierEntry {
            f: h,
            g: 0,
            h,
            state: start,
            id: root,
        });

        while let Some(current) = open_set.pop() {
            // Stale duplicate of a state that was already finalized.
            if tree.is_closed(current.id) {
                continue;
            }

            if self.limits.reached(self.stats.nodes_explored) {
                warn!(
                    event = "node_limit",
                    algorithm = "A*",
                    nodes_explored = self.stats.nodes_explored,
                );
                self.stats.states_discovered = tree.len();
                self.stats.outcome = Some(Outcome::NodeLimit);
                return None;
            }

            tree.close(current.id);
            self.stats.nodes_explored += 1;
            if self.stats.nodes_explored % PROGRESS_INTERVAL == 0 {
                debug!(
                    event = "progress",
                    algorithm = "A*",
                    nodes_explored = self.stats.nodes_explored,
                    f = current.f,
                    frontier = open_set.len(),
                );
            }

            if current.state == goal {
                let path = tree.path_to(current.id);
                self.stats.states_discovered = tree.len();
                self.stats.path_cost = Some(path.len());
                self.stats.outcome = Some(Outcome::Solved);
                return Some(path);
            }

            let g = current.g + 1;
            for successor in current.state.successors(n) {
                let id = match tree.lookup(&successor.state) {
                    Some(id) if tree.is_closed(id) || g >= tree.g(id) => continue,
                    Some(id) => {
                        tree.relax(id, current.id, successor.direction, g);
                        id
                    }
                    None => tree.insert(successor.state.clone(), current.id, successor.direction, g),
                };

                let h = self.heuristic.estimate_successor(
                    current.h,
                    successor.state.tiles(),
                    n,
                    successor.tile,
                    successor.from,
                    successor.to,
                );
                open_set.push(FrontierEntry {
                    f: g + h,
                    g,
                    h,
                    state: successor.state,
                    id,
                });
            }
            self.stats.observe_frontier(open_set.len());
        }

        self.stats.states_discovered = tree.len();
        self.stats.outcome = Some(Outcome::Exhausted);
        None
    }
}

impl<H: Heuristic> Solver for AStarSolver<H> {
    fn solve(&mut self, board: &Board) -> Option<Vec<Direction>> {
        self.stats = SearchStats::default();
        self.initial_estimate = None;
        let n = board.dimension();
        info!(
            event = "solve_start",
            algorithm = "A*",
            heuristic = self.heuristic.name(),
            dimension = n,
        );

        let started = Instant::now();
        let result = self.search(board.state(), n);
        self.stats.elapsed = started.elapsed();

        info!(
            event = "solve_end",
            algorithm = "A*",
            outcome = %self.stats.outcome.unwrap_or(Outcome::Exhausted),
            nodes_explored = self.stats.nodes_explored,
            path_cost = ?self.stats.path_cost,
            duration_ms = self.stats.elapsed.as_millis() as u64,
        );
        result
    }

    fn decision_basis(&self) -> String {
        format!(
            "Always expands the frontier member minimizing f(n) = g(n) + h(n), h = {}",
            self.heuristic.name()
        )
    }

    fn metrics(&self) -> Metrics {
        let mut metrics = self.stats.metrics(Algorithm::AStar);
        metrics.insert("heuristic", self.heuristic.name());
        if let Some(h) = self.initial_estimate {
            metrics.insert("initial_estimate", h);
        }
        metrics
    }
}
