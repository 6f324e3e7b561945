//! Depth-limited multi-agent game-tree search.
//!
//! # Core Algorithm
//!
//! The search alternates through the agents in index order. Agent 0 (the protagonist)
//! maximizes; every other agent is an adversary whose node is combined according to the
//! configured [`Strategy`]. Depth counts full rounds: it advances only when the last
//! adversary hands the turn back to the protagonist.
//!
//! A node stops and evaluates its state when the state is a win or a loss, when the depth
//! limit is reached, or when the agent to move has no legal actions. Otherwise it expands
//! every legal action in the order the game returns them and folds the children with the
//! strategy's [`NodePolicy`].
//!
//! ## Alpha-Beta Pruning
//!
//! Alpha-beta threads a `[alpha, beta]` window down each root-to-leaf path. Once a max
//! node reaches `beta`, or a min node falls to `alpha`, its remaining children cannot
//! change the parent's choice and are skipped. It returns the same value and action as
//! plain minimax.
//!
//! ## Expectimax
//!
//! Adversary nodes become chance nodes whose value is the uniform average of their
//! children. Useful against adversaries that move randomly rather than optimally.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::config::{ConfigError, SearchConfig, Strategy, MAX_SEARCH_PLIES};
use super::strategy::{AlphaBeta, Expectimax, Minimax, NodePolicy, SearchResult, Window};
use super::traits::{AgentIndex, Evaluator, GameState, PROTAGONIST};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("game reports zero agents")]
    NoAgents,
    #[error("agent {agent} has no legal actions in a non-terminal state")]
    NoLegalActions { agent: AgentIndex },
    #[error("evaluation returned {value} for agent {agent} at depth {depth}")]
    NonFiniteEvaluation {
        value: f64,
        agent: AgentIndex,
        depth: u8,
    },
    #[error("search would recurse {plies} plies deep; the limit is {limit}")]
    SearchTooDeep { plies: usize, limit: usize },
}

/// Statistics collected during search.
#[derive(Debug, Default)]
struct SearchStats {
    node_count: usize,
    leaf_evaluations: usize,
    cutoffs: usize,
    last_value: Option<f64>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_result(&mut self, value: f64, duration: Duration) {
        self.last_value = Some(value);
        self.last_duration = Some(duration);
    }
}

/// Owns a search configuration and the statistics of the most recent decision.
///
/// Nothing learned during one decision is carried into the next; statistics are reset at
/// the start of every search.
pub struct SearchContext<E> {
    config: SearchConfig<E>,
    stats: SearchStats,
}

impl<E> SearchContext<E> {
    pub fn new(config: SearchConfig<E>) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig<E> {
        &self.config
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Number of nodes entered, leaves included.
    pub fn searched_node_count(&self) -> usize {
        self.stats.node_count
    }

    /// Number of times the evaluation function was called.
    pub fn leaf_evaluation_count(&self) -> usize {
        self.stats.leaf_evaluations
    }

    /// Number of nodes that stopped expanding early because of a pruning cutoff.
    pub fn cutoff_count(&self) -> usize {
        self.stats.cutoffs
    }

    pub fn last_value(&self) -> Option<f64> {
        self.stats.last_value
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    /// Chooses the protagonist's next action.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(action))` - The chosen action
    /// - `Ok(None)` - The state is already won or lost, so there is nothing to choose
    /// - `Err(SearchError::NoLegalActions)` - The protagonist has no actions in a live state
    /// - `Err(SearchError::NonFiniteEvaluation)` - The evaluator returned NaN or an infinity
    #[must_use = "decide returns the chosen action"]
    pub fn decide<S>(&mut self, state: &S) -> Result<Option<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.search_root(state).map(|result| result.action)
    }

    /// Like [`decide`](Self::decide), but also returns the root value.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn search_root<S>(&mut self, state: &S) -> Result<SearchResult<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.reset();
        let start = Instant::now();

        let result = run_search(&self.config, &mut self.stats, state)?;

        self.stats.record_result(result.value, start.elapsed());
        debug!(
            "{} search finished: value {}, {} nodes, {} leaves, {} cutoffs",
            self.config.strategy(),
            result.value,
            self.stats.node_count,
            self.stats.leaf_evaluations,
            self.stats.cutoffs
        );

        Ok(result)
    }
}

/// Chooses the protagonist's next action for `state` under `config`.
///
/// Equivalent to [`SearchContext::decide`] without keeping statistics around.
///
/// # Examples
///
/// ```ignore
/// let config = SearchConfig::new(2, ScoreEvaluator, Strategy::AlphaBeta)?;
/// let action = decide(&state, &config)?;
/// ```
#[must_use = "decide returns the chosen action"]
pub fn decide<S, E>(state: &S, config: &SearchConfig<E>) -> Result<Option<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    let mut stats = SearchStats::default();
    run_search(config, &mut stats, state).map(|result| result.action)
}

/// Validates the root and dispatches to the configured strategy.
fn run_search<S, E>(
    config: &SearchConfig<E>,
    stats: &mut SearchStats,
    state: &S,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    let num_agents = state.num_agents();
    if num_agents == 0 {
        return Err(SearchError::NoAgents);
    }

    let plies = config.max_depth() as usize * num_agents;
    if plies > MAX_SEARCH_PLIES {
        return Err(SearchError::SearchTooDeep {
            plies,
            limit: MAX_SEARCH_PLIES,
        });
    }

    if !state.is_terminal() && state.legal_actions(PROTAGONIST).is_empty() {
        return Err(SearchError::NoLegalActions { agent: PROTAGONIST });
    }

    debug!(
        "{} search depth: {}, agents: {}",
        config.strategy(),
        config.max_depth(),
        num_agents
    );

    match config.strategy() {
        Strategy::Minimax => Traversal::new(config, stats, Minimax).start(state),
        Strategy::AlphaBeta => Traversal::new(config, stats, AlphaBeta).start(state),
        Strategy::Expectimax => Traversal::new(config, stats, Expectimax).start(state),
    }
}

/// One traversal of the game tree under a single node policy.
struct Traversal<'a, E, P> {
    config: &'a SearchConfig<E>,
    stats: &'a mut SearchStats,
    policy: P,
}

impl<'a, E, P: NodePolicy> Traversal<'a, E, P> {
    fn new(config: &'a SearchConfig<E>, stats: &'a mut SearchStats, policy: P) -> Self {
        Self {
            config,
            stats,
            policy,
        }
    }

    fn start<S>(&mut self, state: &S) -> Result<SearchResult<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.search(state, PROTAGONIST, 0, Window::unbounded())
    }

    /// Searches the subtree rooted at `state` with `agent` to move.
    ///
    /// `window` is this node's copy of the path bounds. Updates made here are visible to
    /// later children of this node only.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn search<S>(
        &mut self,
        state: &S,
        agent: AgentIndex,
        depth: u8,
        mut window: Window,
    ) -> Result<SearchResult<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.node_count += 1;

        if state.is_terminal() || depth >= self.config.max_depth() {
            return self.evaluate(state, agent, depth);
        }

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            warn!(
                "agent {} has no legal actions in a non-terminal state at depth {}; evaluating",
                agent, depth
            );
            return self.evaluate(state, agent, depth);
        }

        let (next_agent, next_depth) = if agent + 1 >= state.num_agents() {
            (PROTAGONIST, depth + 1)
        } else {
            (agent + 1, depth)
        };

        let kind = self.policy.node_kind(agent);
        let branching = actions.len();
        let mut running: Option<SearchResult<S::Action>> = None;

        for action in actions.iter() {
            let successor = state.successor(agent, action);
            let child = self.search(&successor, next_agent, next_depth, window)?;

            let folded = self
                .policy
                .fold(kind, running, child.value, action, branching);
            let running_value = folded.value;
            running = Some(folded);

            if self.policy.cutoff(kind, running_value, &mut window) {
                self.stats.cutoffs += 1;
                trace!(
                    "cutoff at agent {} depth {}: value {} outside [{}, {}]",
                    agent,
                    depth,
                    running_value,
                    window.alpha,
                    window.beta
                );
                break;
            }
        }

        running.ok_or(SearchError::NoLegalActions { agent })
    }

    fn evaluate<S>(
        &mut self,
        state: &S,
        agent: AgentIndex,
        depth: u8,
    ) -> Result<SearchResult<S::Action>, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.leaf_evaluations += 1;

        let value = self.config.evaluator().evaluate(state);
        if !value.is_finite() {
            return Err(SearchError::NonFiniteEvaluation {
                value,
                agent,
                depth,
            });
        }

        trace!("leaf at agent {} depth {}: {}", agent, depth, value);
        Ok(SearchResult::leaf(value))
    }
}
