//! Generic depth-limited search over turn-based games with one protagonist and any
//! number of adversaries.
//!
//! Games plug in by implementing [`GameState`]; scoring plugs in through [`Evaluator`].

mod config;
mod search;
mod strategy;
mod traits;


pub use config::{
    ConfigError, SearchConfig, SearchConfigBuilder, Strategy, DEFAULT_SEARCH_DEPTH,
    MAX_SEARCH_PLIES,
};
pub use search::{decide, SearchContext, SearchError};
pub use strategy::{AlphaBeta, Expectimax, Minimax, NodeKind, NodePolicy, SearchResult, Window};
pub use traits::{AgentIndex, Evaluator, GameState, PROTAGONIST};
