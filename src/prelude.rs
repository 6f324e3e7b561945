//! Common types re-exported for convenience.

pub use crate::adversarial_search::{
    decide, AgentIndex, Evaluator, GameState, SearchConfig, SearchContext, SearchError,
    SearchResult, Strategy, PROTAGONIST,
};
pub use crate::evaluate::{ScoreEvaluator, Scored};
