// benches/strategy_benchmark.rs
//
// Compares minimax, alpha-beta, and expectimax on a small pursuit game: one runner
// and a pack of chasers on a ring. Every agent steps left, right, or waits each turn;
// the runner loses when a chaser lands on its cell.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use multiagent_search::prelude::*;

const RING_SIZE: i32 = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Left,
    Right,
    Wait,
}

#[derive(Clone, Debug)]
struct Pursuit {
    positions: Vec<i32>,
    turns: u32,
}

impl Pursuit {
    fn new(chasers: usize) -> Self {
        let spacing = RING_SIZE / (chasers as i32 + 1);
        let positions = (0..=chasers as i32).map(|i| i * spacing).collect();
        Self {
            positions,
            turns: 0,
        }
    }

    fn distance(a: i32, b: i32) -> i32 {
        let d = (a - b).rem_euclid(RING_SIZE);
        d.min(RING_SIZE - d)
    }

    fn nearest_chaser(&self) -> i32 {
        let runner = self.positions[0];
        self.positions[1..]
            .iter()
            .map(|&chaser| Self::distance(runner, chaser))
            .min()
            .unwrap_or(RING_SIZE)
    }
}

impl GameState for Pursuit {
    type Action = Step;

    fn num_agents(&self) -> usize {
        self.positions.len()
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<Step> {
        vec![Step::Left, Step::Right, Step::Wait]
    }

    fn successor(&self, agent: AgentIndex, action: &Step) -> Self {
        let mut next = self.clone();
        let delta = match action {
            Step::Left => -1,
            Step::Right => 1,
            Step::Wait => 0,
        };
        next.positions[agent] = (next.positions[agent] + delta).rem_euclid(RING_SIZE);
        next.turns += 1;
        next
    }

    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        self.nearest_chaser() == 0
    }
}

impl Scored for Pursuit {
    fn score(&self) -> f64 {
        if self.is_lose() {
            -100.0
        } else {
            self.turns as f64 + self.nearest_chaser() as f64
        }
    }
}

fn strategy_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Strategies");

    for chasers in [1, 2] {
        for depth in [2, 3] {
            for strategy in Strategy::ALL {
                let bench_name = format!("{}_{}_chasers", strategy, chasers);
                let state = Pursuit::new(chasers);

                group.bench_with_input(BenchmarkId::new(&bench_name, depth), &depth, |b, &depth| {
                    b.iter_batched(
                        || {
                            let config = SearchConfig::new(depth, ScoreEvaluator, strategy)
                                .expect("benchmark depth is valid");
                            SearchContext::new(config)
                        },
                        |mut context| {
                            let result = context.search_root(&state);

                            if let Ok(found) = &result {
                                eprintln!(
                                    "[{} {} chasers] depth={} action={:?} value={} nodes={} leaves={}",
                                    strategy,
                                    chasers,
                                    depth,
                                    found.action,
                                    found.value,
                                    context.searched_node_count(),
                                    context.leaf_evaluation_count()
                                );
                            }

                            black_box(result.unwrap())
                        },
                        criterion::BatchSize::SmallInput,
                    )
                });
            }
        }
    }

    group.finish();
}

criterion_group!(benches, strategy_benchmark);
criterion_main!(benches);
