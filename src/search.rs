//! Breadth-first, depth-first and A* search over puzzle states.
//!
//! Every algorithm follows the same pop discipline: count the pop, test for the
//! goal, drop states already closed, then close the state and push its unclosed
//! successors. Search nodes live in an arena and point back to their parent by
//! index, so a solved node's path is recovered by walking those indices.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet, VecDeque},
    fmt,
    ops::Index,
    str::FromStr,
    time::{Duration, Instant},
};

use tracing::{debug, info, trace};

use crate::error::{Result, SolverError};
use crate::heuristic::Heuristic;
use crate::moves::{expand, Move};
use crate::solvability::is_solvable;
use crate::state::{Fingerprint, PuzzleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// FIFO frontier; shortest paths.
    Bfs,
    /// LIFO frontier; any path.
    Dfs,
    /// Frontier ordered by depth plus heuristic; closed states are never reopened.
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Algorithm> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(SolverError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Moves of the blank, from the initial state to the goal.
    pub path: Vec<Move>,
    /// Live nodes taken off the frontier, including the goal node.
    pub nodes_explored: usize,
    /// Nodes whose successors were generated.
    pub nodes_expanded: usize,
    pub time_taken: Duration,
    /// Deepest node taken off the frontier, on the returned path or not.
    pub max_depth: usize,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} moves ({} explored, {} expanded, max depth {}, {:?})",
            self.path.len(),
            self.nodes_explored,
            self.nodes_expanded,
            self.max_depth,
            self.time_taken
        )
    }
}

type NodeId = usize;

#[derive(Debug)]
struct SearchNode {
    state: PuzzleState,
    action: Option<Move>,
    parent: Option<NodeId>,
    depth: usize,
    /// Heuristic value when the node was created.
    cost: f64,
}

impl SearchNode {
    fn root(state: PuzzleState, heuristic: Heuristic) -> SearchNode {
        let cost = heuristic.evaluate(&state);
        SearchNode {
            state,
            action: None,
            parent: None,
            depth: 0,
            cost,
        }
    }

    fn f_score(&self) -> f64 {
        self.depth as f64 + self.cost
    }
}

/// Owns every node generated by one search.
#[derive(Debug, Default)]
struct Arena {
    nodes: Vec<SearchNode>,
}

impl Arena {
    fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Moves leading from the root to `goal`. Empty when `goal` is the root.
    fn reconstruct(&self, goal: NodeId) -> Vec<Move> {
        let mut path: Vec<Move> = std::iter::successors(Some(goal), |&id| self[id].parent)
            .filter_map(|id| self[id].action)
            .collect();
        path.reverse();
        path
    }
}

impl Index<NodeId> for Arena {
    type Output = SearchNode;
    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}

#[derive(Debug, Default)]
struct Stats {
    explored: usize,
    expanded: usize,
    max_depth: usize,
}

impl Stats {
    fn record_pop(&mut self, node: &SearchNode) {
        self.explored += 1;
        self.max_depth = self.max_depth.max(node.depth);
        trace!(depth = node.depth, cost = node.cost, "popped node");
    }
}

/// A* frontier entry.
#[derive(Debug)]
struct Candidate {
    f: f64,
    g: usize,
    seq: usize,
    node: NodeId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap order: lowest f first, then deepest, then oldest.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Clone, Copy, Debug)]
enum Order {
    Fifo,
    Lifo,
}

/// Solves puzzles of one board dimension.
#[derive(Clone, Debug)]
pub struct Solver {
    size: usize,
    goal: PuzzleState,
}

impl Solver {
    pub fn new(size: usize) -> Result<Solver> {
        Ok(Solver {
            size,
            goal: PuzzleState::goal(size)?,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn goal(&self) -> &PuzzleState {
        &self.goal
    }

    pub fn is_goal(&self, state: &PuzzleState) -> bool {
        state == &self.goal
    }

    /// False for states of another dimension as well as parity-unsolvable ones.
    pub fn is_solvable(&self, state: &PuzzleState) -> bool {
        state.size() == self.size && is_solvable(state)
    }

    /// Searches from `initial` to the goal.
    ///
    /// Unsolvable input is refused before any search starts.
    pub fn solve(
        &self,
        initial: &PuzzleState,
        algorithm: Algorithm,
        heuristic: Heuristic,
    ) -> Result<Solution> {
        if initial.size() != self.size {
            return Err(SolverError::DimensionMismatch {
                expected: self.size,
                found: initial.size(),
            });
        }

        if !is_solvable(initial) {
            debug!(state = %initial, "refusing unsolvable state");
            return Err(SolverError::Unsolvable);
        }

        self.search(initial, algorithm, heuristic)
    }

    pub(crate) fn search(
        &self,
        initial: &PuzzleState,
        algorithm: Algorithm,
        heuristic: Heuristic,
    ) -> Result<Solution> {
        info!(
            event = "solve_start",
            algorithm = %algorithm,
            heuristic = %heuristic,
            size = self.size,
        );

        let started = Instant::now();
        let (path, stats) = match algorithm {
            Algorithm::Bfs => self.uninformed(initial, heuristic, Order::Fifo),
            Algorithm::Dfs => self.uninformed(initial, heuristic, Order::Lifo),
            Algorithm::AStar => self.astar(initial, heuristic),
        }
        .inspect_err(|err| debug!(event = "solve_failed", error = %err))?;

        let solution = Solution {
            path,
            nodes_explored: stats.explored,
            nodes_expanded: stats.expanded,
            time_taken: started.elapsed(),
            max_depth: stats.max_depth,
        };

        info!(
            event = "solve_end",
            moves = solution.path.len(),
            explored = solution.nodes_explored,
            expanded = solution.nodes_expanded,
            max_depth = solution.max_depth,
            elapsed = ?solution.time_taken,
        );
        Ok(solution)
    }

    fn uninformed(
        &self,
        initial: &PuzzleState,
        heuristic: Heuristic,
        order: Order,
    ) -> Result<(Vec<Move>, Stats)> {
        let mut arena = Arena::default();
        let mut stats = Stats::default();
        let mut visited: HashSet<Fingerprint> = HashSet::new();
        let mut frontier = VecDeque::new();
        frontier.push_back(arena.push(SearchNode::root(initial.clone(), heuristic)));

        loop {
            let next = match order {
                Order::Fifo => frontier.pop_front(),
                Order::Lifo => frontier.pop_back(),
            };
            let Some(id) = next else {
                return Err(SolverError::NoSolutionFound);
            };

            let node = &arena[id];
            stats.record_pop(node);
            if self.is_goal(&node.state) {
                return Ok((arena.reconstruct(id), stats));
            }
            if !visited.insert(node.state.fingerprint()) {
                continue;
            }

            stats.expanded += 1;
            let depth = node.depth + 1;
            for (state, action) in expand(&node.state)? {
                if visited.contains(&state.fingerprint()) {
                    continue;
                }
                let cost = heuristic.evaluate(&state);
                frontier.push_back(arena.push(SearchNode {
                    state,
                    action: Some(action),
                    parent: Some(id),
                    depth,
                    cost,
                }));
            }
        }
    }

    fn astar(&self, initial: &PuzzleState, heuristic: Heuristic) -> Result<(Vec<Move>, Stats)> {
        let mut arena = Arena::default();
        let mut stats = Stats::default();
        let mut closed: HashSet<Fingerprint> = HashSet::new();
        // live frontier entry per state; heap entries not listed here were superseded
        let mut open: HashMap<Fingerprint, NodeId> = HashMap::new();
        let mut frontier = BinaryHeap::new();

        let root = arena.push(SearchNode::root(initial.clone(), heuristic));
        open.insert(initial.fingerprint(), root);
        frontier.push(Candidate {
            f: arena[root].f_score(),
            g: 0,
            seq: 0,
            node: root,
        });
        let mut seq = 1;

        while let Some(Candidate { node: id, .. }) = frontier.pop() {
            let node = &arena[id];
            let fingerprint = node.state.fingerprint();
            if open.get(&fingerprint) != Some(&id) {
                continue;
            }
            open.remove(&fingerprint);

            stats.record_pop(node);
            if self.is_goal(&node.state) {
                return Ok((arena.reconstruct(id), stats));
            }
            if !closed.insert(fingerprint) {
                continue;
            }

            stats.expanded += 1;
            let depth = node.depth + 1;
            for (state, action) in expand(&node.state)? {
                let fingerprint = state.fingerprint();
                if closed.contains(&fingerprint) {
                    continue;
                }

                let cost = heuristic.evaluate(&state);
                let f = depth as f64 + cost;
                if let Some(&existing) = open.get(&fingerprint) {
                    if arena[existing].f_score() <= f {
                        continue;
                    }
                }

                let child = arena.push(SearchNode {
                    state,
                    action: Some(action),
                    parent: Some(id),
                    depth,
                    cost,
                });
                open.insert(fingerprint, child);
                frontier.push(Candidate {
                    f,
                    g: depth,
                    seq,
                    node: child,
                });
                seq += 1;
            }
        }

        Err(SolverError::NoSolutionFound)
    }
}
