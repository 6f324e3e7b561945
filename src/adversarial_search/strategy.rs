//! Node combination policies for minimax, alpha-beta, and expectimax.
//!
//! All three strategies share one recursion (see `search.rs`). They differ only in how a
//! node folds its children's values into its own, and whether it may stop early. Each
//! strategy is a unit struct implementing [`NodePolicy`].

use super::traits::{AgentIndex, PROTAGONIST};

/// Value and action produced by a search node.
///
/// `action` is `None` only for nodes that never enumerated actions: terminal states,
/// depth-exhausted states, and states where the agent to move had nothing to play.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<A> {
    pub value: f64,
    pub action: Option<A>,
}

impl<A> SearchResult<A> {
    pub fn leaf(value: f64) -> Self {
        Self {
            value,
            action: None,
        }
    }

    pub fn new(value: f64, action: A) -> Self {
        Self {
            value,
            action: Some(action),
        }
    }
}

/// Role a node plays when combining its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Max,
    Min,
    Chance,
}

/// The `[alpha, beta]` bounds along the current root-to-node path.
///
/// Passed by value: each child receives a copy of its parent's current window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub alpha: f64,
    pub beta: f64,
}

impl Window {
    pub fn unbounded() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// How a strategy combines the children of a node.
pub trait NodePolicy {
    /// Returns the role the node for `agent` plays under this strategy.
    fn node_kind(&self, agent: AgentIndex) -> NodeKind {
        if agent == PROTAGONIST {
            NodeKind::Max
        } else {
            NodeKind::Min
        }
    }

    /// Folds one child into the node's running result. `running` is `None` for the
    /// first child. `branching` is the number of legal actions at this node.
    fn fold<A: Clone>(
        &self,
        kind: NodeKind,
        running: Option<SearchResult<A>>,
        child_value: f64,
        action: &A,
        branching: usize,
    ) -> SearchResult<A>;

    /// Called after each fold with the node's running value. Returns true if the
    /// remaining siblings cannot affect the decision and should be skipped.
    fn cutoff(&self, _kind: NodeKind, _running_value: f64, _window: &mut Window) -> bool {
        false
    }
}

/// Keeps the strictly better child. The first child seeds the result and ties keep
/// the earlier action.
fn fold_extremum<A: Clone>(
    maximizing: bool,
    running: Option<SearchResult<A>>,
    child_value: f64,
    action: &A,
) -> SearchResult<A> {
    match running {
        None => SearchResult::new(child_value, action.clone()),
        Some(best) => {
            let is_better = if maximizing {
                child_value > best.value
            } else {
                child_value < best.value
            };

            if is_better {
                SearchResult::new(child_value, action.clone())
            } else {
                best
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Minimax;

impl NodePolicy for Minimax {
    fn fold<A: Clone>(
        &self,
        kind: NodeKind,
        running: Option<SearchResult<A>>,
        child_value: f64,
        action: &A,
        _branching: usize,
    ) -> SearchResult<A> {
        fold_extremum(kind == NodeKind::Max, running, child_value, action)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaBeta;

impl NodePolicy for AlphaBeta {
    fn fold<A: Clone>(
        &self,
        kind: NodeKind,
        running: Option<SearchResult<A>>,
        child_value: f64,
        action: &A,
        _branching: usize,
    ) -> SearchResult<A> {
        fold_extremum(kind == NodeKind::Max, running, child_value, action)
    }

    fn cutoff(&self, kind: NodeKind, running_value: f64, window: &mut Window) -> bool {
        match kind {
            NodeKind::Max => {
                window.alpha = window.alpha.max(running_value);
                running_value >= window.beta
            }
            NodeKind::Min => {
                window.beta = window.beta.min(running_value);
                running_value <= window.alpha
            }
            NodeKind::Chance => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Expectimax;

impl NodePolicy for Expectimax {
    fn node_kind(&self, agent: AgentIndex) -> NodeKind {
        if agent == PROTAGONIST {
            NodeKind::Max
        } else {
            NodeKind::Chance
        }
    }

    fn fold<A: Clone>(
        &self,
        kind: NodeKind,
        running: Option<SearchResult<A>>,
        child_value: f64,
        action: &A,
        branching: usize,
    ) -> SearchResult<A> {
        if kind != NodeKind::Chance {
            return fold_extremum(kind == NodeKind::Max, running, child_value, action);
        }

        // Uniform weight. The action carries no meaning at a chance node; the last one folded is kept.
        let weighted = child_value / branching as f64;
        let value = running.map_or(0.0, |expected| expected.value) + weighted;
        SearchResult::new(value, action.clone())
    }
}
