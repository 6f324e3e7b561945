//! Ready-made evaluation functions.

use crate::adversarial_search::{Evaluator, GameState};

/// A game state that keeps its own running score.
pub trait Scored {
    fn score(&self) -> f64;
}

/// Evaluates a state as the game's own score, with no lookahead heuristics.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreEvaluator;

impl<S> Evaluator<S> for ScoreEvaluator
where
    S: GameState + Scored,
{
    #[inline]
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}
