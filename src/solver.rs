//! The capability every search strategy exposes, plus the diagnostics it reports.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logic::{AStarSolver, Board, BreadthFirstSolver, Direction, HeuristicKind};

pub trait Solver {
    /// Searches from `board` to the solved configuration. `None` means the
    /// frontier ran dry or the node budget was spent. The board is only read.
    fn solve(&mut self, board: &Board) -> Option<Vec<Direction>>;

    fn decision_basis(&self) -> String;

    /// Diagnostics for the most recent `solve` call.
    fn metrics(&self) -> Metrics;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bfs,
    #[default]
    AStar,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::AStar => "A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the requested strategy. `heuristic` is ignored by BFS.
pub fn build_solver(
    algorithm: Algorithm,
    heuristic: HeuristicKind,
    limits: SearchLimits,
) -> Box<dyn Solver> {
    match algorithm {
        Algorithm::Bfs => Box::new(BreadthFirstSolver::new().with_limits(limits)),
        Algorithm::AStar => Box::new(AStarSolver::new(heuristic).with_limits(limits)),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of expanded states; `None` searches until the frontier is empty.
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn max_nodes(max_nodes: u64) -> Self {
        SearchLimits {
            max_nodes: Some(max_nodes),
        }
    }

    pub(crate) fn reached(&self, explored: u64) -> bool {
        self.max_nodes.is_some_and(|max| explored >= max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Solved,
    Exhausted,
    NodeLimit,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Solved => "solved",
            Outcome::Exhausted => "exhausted",
            Outcome::NodeLimit => "node_limit",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub outcome: Option<Outcome>,
    pub nodes_explored: u64,
    pub states_discovered: usize,
    pub max_frontier: usize,
    pub path_cost: Option<usize>,
    pub elapsed: Duration,
}

impl SearchStats {
    pub(crate) fn observe_frontier(&mut self, len: usize) {
        self.max_frontier = self.max_frontier.max(len);
    }

    pub fn metrics(&self, algorithm: Algorithm) -> Metrics {
        let mut metrics = Metrics::new();
        metrics.insert("algorithm", algorithm.name());
        if let Some(outcome) = self.outcome {
            metrics.insert("outcome", outcome.as_str());
        }
        metrics.insert("nodes_explored", self.nodes_explored);
        if let Some(cost) = self.path_cost {
            metrics.insert("path_cost", cost as u64);
        }
        metrics.insert("states_discovered", self.states_discovered as u64);
        metrics.insert("max_frontier", self.max_frontier as u64);
        metrics.insert("elapsed_ms", self.elapsed.as_millis() as u64);
        metrics
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Text(String),
}

impl MetricValue {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            MetricValue::Count(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            MetricValue::Count(_) => None,
        }
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        MetricValue::Count(value)
    }
}

impl From<u32> for MetricValue {
    fn from(value: u32) -> Self {
        MetricValue::Count(value.into())
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Diagnostic name to value, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<&'static str, MetricValue>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<MetricValue>) {
        self.0.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.0.get(name)
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(MetricValue::as_count)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(MetricValue::as_text)
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.0.keys().map(|k| k.len()).max().unwrap_or(0);
        for (name, value) in &self.0 {
            writeln!(f, "{name:<width$}  {value}")?;
        }
        Ok(())
    }
}
