//! Monte Carlo Tree Search (MCTS) over game states.
//!
//! Each search builds a fresh tree rooted at the given state and runs a fixed
//! number of iterations of:
//! - selection: descend by UCB1 while the node is non-terminal and fully expanded
//! - expansion: add one child per move whose resulting state is not yet a child
//! - rollout choice: a uniformly random child (or the node itself if it has none)
//! - simulation: random playout(s) from that node, see [`crate::playout`]
//! - backpropagation: add one visit and the reward to every node on the path
//!
//! Children are owned by their parent. The parent chain of a node is the path
//! of child indices recorded during selection, which backpropagation walks.

use fastrand::Rng;
use log::{debug, info};
use rayon::prelude::*;

use crate::constants::{EXPLORATION_WEIGHT, N_SIMS, REPORT_PERIOD};
use crate::movegen::Move;
use crate::playout::mcplayout;
use crate::position::GameState;

/// Search parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Weight of the UCB1 exploration term.
    pub exploration_weight: f64,
    /// Number of search iterations.
    pub simulations: usize,
    /// Seed for the engine's random source. `None` picks a random seed.
    pub seed: Option<u64>,
    /// Optional cap on playout length; `None` plays until the game ends.
    pub max_rollout_plies: Option<usize>,
    /// Playouts per iteration. Values above 1 run in parallel.
    pub rollouts_per_leaf: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_weight: EXPLORATION_WEIGHT,
            simulations: N_SIMS,
            seed: None,
            max_rollout_plies: None,
            rollouts_per_leaf: 1,
        }
    }
}

/// A node in the MCTS search tree.
pub struct TreeNode {
    /// The game state at this node
    pub state: GameState,
    /// Move that led here from the parent (`None` for the root)
    pub mv: Option<Move>,
    /// Number of visits
    pub visits: u32,
    /// Sum of playout rewards
    pub value: f64,
    /// Child nodes, at most one per distinct resulting state
    pub children: Vec<TreeNode>,
    /// Number of moves available to the side to move
    n_moves: usize,
}

impl TreeNode {
    /// Create a root node for the given state.
    pub fn new(state: GameState) -> Self {
        Self::with_move(state, None)
    }

    fn with_move(state: GameState, mv: Option<Move>) -> Self {
        let n_moves = state.legal_moves().len();
        Self {
            state,
            mv,
            visits: 0,
            value: 0.0,
            children: Vec::new(),
            n_moves,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_game_over()
    }

    /// True once there is a child for every available move.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.n_moves
    }

    /// Average reward, 0 for unvisited nodes.
    pub fn mean_value(&self) -> f64 {
        if self.visits > 0 {
            self.value / self.visits as f64
        } else {
            0.0
        }
    }

    /// UCB1 score of this node as a child of a node with `parent_visits` visits.
    #[inline]
    pub fn ucb1(&self, parent_visits: u32, exploration_weight: f64) -> f64 {
        let n = self.visits as f64 + 1.0;
        self.value / n + exploration_weight * (2.0 * (parent_visits as f64).sqrt() / n)
    }

    /// Index of the child with the highest UCB1 score. Ties go to the first child.
    pub fn best_child_index(&self, exploration_weight: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, child) in self.children.iter().enumerate() {
            let score = child.ucb1(self.visits, exploration_weight);
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn best_child(&self, exploration_weight: f64) -> Option<&TreeNode> {
        self.best_child_index(exploration_weight)
            .map(|i| &self.children[i])
    }
}

/// Expand a node by adding a child for every move whose resulting state is
/// not already represented. Returns the number of children added.
pub fn expand(node: &mut TreeNode) -> usize {
    let before = node.children.len();
    for mv in node.state.legal_moves() {
        let child_state = node.state.apply(mv);
        if node.children.iter().any(|c| c.state == child_state) {
            continue;
        }
        node.children.push(TreeNode::with_move(child_state, Some(mv)));
    }
    node.children.len() - before
}

/// Descend from the root while nodes are non-terminal and fully expanded.
///
/// Returns the path of child indices from the root to the selected node.
fn tree_descend(root: &TreeNode, exploration_weight: f64) -> Vec<usize> {
    let mut path = Vec::new();
    let mut node = root;
    while !node.is_terminal() && node.is_fully_expanded() {
        let Some(idx) = node.best_child_index(exploration_weight) else {
            break;
        };
        path.push(idx);
        node = &node.children[idx];
    }
    path
}

fn node_at<'a>(root: &'a TreeNode, path: &[usize]) -> &'a TreeNode {
    path.iter().fold(root, |node, &idx| &node.children[idx])
}

fn node_at_mut<'a>(root: &'a mut TreeNode, path: &[usize]) -> &'a mut TreeNode {
    let mut node = root;
    for &idx in path {
        node = &mut node.children[idx];
    }
    node
}

/// Add one visit and `reward` to the root and every node along `path`.
///
/// The reward is not negated between plies.
fn tree_update(root: &mut TreeNode, path: &[usize], reward: f64) {
    let mut node = root;
    node.visits += 1;
    node.value += reward;
    for &idx in path {
        node = &mut node.children[idx];
        node.visits += 1;
        node.value += reward;
    }
}

/// Outcome of a search: the recommended child of the root.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Resulting state after the recommended move (the root state if none)
    pub state: GameState,
    /// Recommended move, `None` if the root had no children
    pub mv: Option<Move>,
    /// Visits of the chosen node
    pub visits: u32,
    /// Accumulated reward of the chosen node
    pub value: f64,
}

/// MCTS engine with its own seedable random source.
pub struct Mcts {
    config: SearchConfig,
    rng: Rng,
}

impl Mcts {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: SearchConfig, rng: Rng) -> Self {
        Self { config, rng }
    }

    /// Search from `state` and return the best child of a fresh root.
    pub fn search(&mut self, state: &GameState) -> SearchResult {
        let mut root = TreeNode::new(state.clone());
        self.run(&mut root);
        best_result(&root)
    }

    /// Run the configured number of iterations on an existing tree.
    ///
    /// A non-terminal root still without children afterwards (zero
    /// iterations) is expanded, so its children are available for selection.
    pub fn run(&mut self, root: &mut TreeNode) {
        let sims = self.config.simulations;
        for i in 0..sims {
            self.iterate(root);

            if (i + 1) % REPORT_PERIOD == 0 {
                debug!(
                    "iteration {}/{}: root visits={} value={:.1} children={}",
                    i + 1,
                    sims,
                    root.visits,
                    root.value,
                    root.children.len()
                );
            }
        }
        if !root.is_terminal() && root.children.is_empty() {
            expand(root);
        }

        dump_children(root);
        match root.best_child(0.0).and_then(|c| c.mv) {
            Some(mv) => info!("search finished after {sims} iterations, best move {mv}"),
            None => info!("search finished after {sims} iterations, no move available"),
        }
    }

    /// One select / expand / simulate / backpropagate cycle.
    fn iterate(&mut self, root: &mut TreeNode) {
        let mut path = tree_descend(root, self.config.exploration_weight);

        let leaf = node_at_mut(root, &path);
        if !leaf.is_terminal() {
            expand(leaf);
        }
        if !leaf.children.is_empty() {
            path.push(self.rng.usize(..leaf.children.len()));
        }

        let state = &node_at(root, &path).state;
        for reward in self.rollouts(state) {
            tree_update(root, &path, reward);
        }
    }

    /// Play the configured number of playouts from `state`.
    ///
    /// Multiple playouts run on the rayon pool, each with a generator seeded
    /// from the engine's own, so results only depend on the engine seed.
    fn rollouts(&mut self, state: &GameState) -> Vec<f64> {
        let cap = self.config.max_rollout_plies;
        let n = self.config.rollouts_per_leaf.max(1);
        if n == 1 {
            return vec![mcplayout(state, &mut self.rng, cap)];
        }
        let seeds: Vec<u64> = (0..n).map(|_| self.rng.u64(..)).collect();
        seeds
            .into_par_iter()
            .map(|seed| mcplayout(state, &mut Rng::with_seed(seed), cap))
            .collect()
    }
}

/// Pick the root child with the best average value (UCB1 with no exploration).
pub fn best_result(root: &TreeNode) -> SearchResult {
    match root.best_child(0.0) {
        Some(child) => SearchResult {
            state: child.state.clone(),
            mv: child.mv,
            visits: child.visits,
            value: child.value,
        },
        None => SearchResult {
            state: root.state.clone(),
            mv: None,
            visits: root.visits,
            value: root.value,
        },
    }
}

/// Log statistics for the root's children.
pub fn dump_children(root: &TreeNode) {
    for child in &root.children {
        if let Some(mv) = child.mv {
            debug!(
                "move {mv} v={} value={:.1} mean={:.3}",
                child.visits,
                child.value,
                child.mean_value()
            );
        }
    }
}
