//! Search configuration: depth, strategy, and the evaluation function.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Depth used when a builder is not given one explicitly.
pub const DEFAULT_SEARCH_DEPTH: u8 = 2;

/// Upper bound on `max_depth * num_agents`, which is also the deepest the
/// recursion can go. Searches beyond this are rejected before they start.
pub const MAX_SEARCH_PLIES: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("depth must be at least 1, got {depth}")]
    DepthTooLow { depth: u8 },
    #[error("no evaluation function configured")]
    MissingEvaluator,
    #[error("unknown strategy `{0}`; options are: minimax, alpha-beta, expectimax")]
    UnknownStrategy(String),
}

/// How adversary nodes are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Adversaries minimize the protagonist's utility.
    Minimax,
    /// Minimax with alpha-beta pruning. Same decisions, fewer nodes.
    AlphaBeta,
    /// Adversaries pick uniformly at random among their legal actions.
    Expectimax,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];

    pub fn tag(self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha-beta",
            Strategy::Expectimax => "expectimax",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Minimax
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alpha-beta" | "alphabeta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Immutable parameters for a single decision.
#[derive(Clone, Debug)]
pub struct SearchConfig<E> {
    max_depth: u8,
    evaluator: E,
    strategy: Strategy,
}

impl<E> SearchConfig<E> {
    /// Creates a validated configuration. `max_depth` counts full rounds, not
    /// individual agent moves.
    pub fn new(max_depth: u8, evaluator: E, strategy: Strategy) -> Result<Self, ConfigError> {
        if max_depth < 1 {
            return Err(ConfigError::DepthTooLow { depth: max_depth });
        }

        Ok(Self {
            max_depth,
            evaluator,
            strategy,
        })
    }

    pub fn builder() -> SearchConfigBuilder<E> {
        SearchConfigBuilder::default()
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the same configuration with a different strategy.
    pub fn with_strategy(self, strategy: Strategy) -> Self {
        Self { strategy, ..self }
    }
}

/// Incrementally assembles a [`SearchConfig`]. Validation happens in [`build`](Self::build).
pub struct SearchConfigBuilder<E> {
    depth: Option<u8>,
    evaluator: Option<E>,
    strategy: Strategy,
}

impl<E> Default for SearchConfigBuilder<E> {
    fn default() -> Self {
        Self {
            depth: None,
            evaluator: None,
            strategy: Strategy::default(),
        }
    }
}

impl<E> SearchConfigBuilder<E> {
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn evaluator(mut self, evaluator: E) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn build(self) -> Result<SearchConfig<E>, ConfigError> {
        let evaluator = self.evaluator.ok_or(ConfigError::MissingEvaluator)?;
        SearchConfig::new(
            self.depth.unwrap_or(DEFAULT_SEARCH_DEPTH),
            evaluator,
            self.strategy,
        )
    }
}
