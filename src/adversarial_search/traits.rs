//! Core traits for generic multi-agent adversarial search.

use std::fmt::Debug;

/// Index of an agent in the fixed round-robin turn order.
pub type AgentIndex = usize;

/// The agent whose utility the search maximizes. Every other index is an adversary.
pub const PROTAGONIST: AgentIndex = 0;

/// Represents a fully observable, turn-based game with one protagonist and one or
/// more adversaries.
///
/// States are treated as immutable values: the searcher only ever asks for
/// successors and never expects `self` to change.
pub trait GameState: Sized {
    type Action: Clone + Debug + PartialEq;

    /// Returns the number of agents taking turns, protagonist included. Must be at least 1.
    fn num_agents(&self) -> usize;

    /// Returns the legal actions for `agent`, in the order they should be tried.
    /// Ties between equally scored actions resolve to the earliest one in this list.
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// Returns the state reached when `agent` plays `action`.
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    /// Returns true if the game is over. No search happens below a terminal state.
    #[inline]
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Scores a game state from the protagonist's point of view. Higher is better.
pub trait Evaluator<S: GameState> {
    /// Evaluates the given state. Must be defined for every reachable state,
    /// including states reached partway through a round.
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    S: GameState,
    F: Fn(&S) -> f64,
{
    #[inline]
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}
