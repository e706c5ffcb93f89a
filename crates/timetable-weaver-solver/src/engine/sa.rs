// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    engine::{
        acceptor::{Acceptor, ConflictBoundAcceptor},
        greedy_opening::GreedyOpening,
        operator::Operator,
        oplib::{ConflictRepair, RandomSwap},
    },
    eval::Evaluator,
    model::SolverModel,
    state::{fitness::Fitness, solver_state::SolverState},
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use timetable_weaver_model::solution::Schedule;

/// Iteration budget of the closing conflict-elimination pass.
const CONFLICT_PASS_ITERS: usize = 2000;
/// Improvement-free iterations between perturbation bursts in that pass.
const CONFLICT_PASS_KICK_EVERY: usize = 500;
/// Mutations applied per perturbation burst.
const PERTURBATION_KICK: usize = 5;
/// Mutations applied when restarting from the incumbent.
const RESTART_KICK: usize = 10;

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub schedule: Schedule,
    pub fitness: Fitness,
    pub iterations: usize,
}

/// Simulated annealing over schedules with:
/// - conflict-targeted repair preferred while conflicts remain
/// - an inner-gap guard that drops any candidate a buggy mutation gapped
/// - adaptive restart from the incumbent with a perturbation kick and reheat
/// - a closing pass that only ever reduces conflicts
///
/// The incumbent is monotone under the lexicographic `(conflicts, energy)`
/// order for the whole run.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    max_iters: usize,
    max_stagnant: usize,
    init_temperature: f64,
    min_temperature: f64,
    cooling: f64,
    opening: GreedyOpening,
    repair: ConflictRepair,
    swap: RandomSwap,
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedAnnealing {
    pub fn new() -> Self {
        Self {
            max_iters: 5000,
            max_stagnant: 300,
            init_temperature: 1.0,
            min_temperature: 1e-4,
            cooling: 0.998,
            opening: GreedyOpening::new(),
            repair: ConflictRepair::new(),
            swap: RandomSwap::new(),
        }
    }

    pub fn with_max_iters(mut self, iters: usize) -> Self {
        self.max_iters = iters;
        self
    }

    pub fn with_max_stagnant(mut self, stagnant: usize) -> Self {
        self.max_stagnant = stagnant.max(1);
        self
    }

    pub fn with_init_temperature(mut self, t0: f64) -> Self {
        self.init_temperature = t0.max(1e-9);
        self
    }

    pub fn with_min_temperature(mut self, t_min: f64) -> Self {
        self.min_temperature = t_min.max(0.0);
        self
    }

    pub fn with_cooling(mut self, factor: f64) -> Self {
        self.cooling = factor.clamp(0.0, 1.0);
        self
    }

    /// Repair while conflicts remain, otherwise a random swap move.
    fn mutate(
        &self,
        model: &SolverModel<'_>,
        state: &SolverState,
        rng: &mut ChaCha8Rng,
    ) -> Option<Schedule> {
        if !state.fitness().is_conflict_free()
            && let Some(repaired) = self.repair.propose(model, state.schedule(), rng)
        {
            return Some(repaired);
        }
        self.swap.propose(model, state.schedule(), rng)
    }

    /// Applies up to `kicks` mutations unconditionally, keeping only
    /// gap-free results.
    fn perturb(
        &self,
        model: &SolverModel<'_>,
        state: &mut SolverState,
        kicks: usize,
        rng: &mut ChaCha8Rng,
    ) {
        for _ in 0..kicks {
            if let Some(next) = self.mutate(model, state, rng) {
                let next = SolverState::new(model, next);
                if next.fitness().inner_gaps == 0 {
                    *state = next;
                }
            }
        }
    }

    #[tracing::instrument(level = "debug", name = "SA Search", skip_all)]
    pub fn run(&self, model: &SolverModel<'_>, rng: &mut ChaCha8Rng) -> SearchOutcome {
        let mut current = SolverState::new(model, self.opening.build(model, rng));
        let mut best = current.clone();
        tracing::debug!("opening: {}", best.fitness());

        let mut temperature = self.init_temperature;
        let mut stagnant = 0usize;
        let mut iterations = 0usize;

        while iterations < self.max_iters && !best.fitness().is_perfect() {
            iterations += 1;

            if let Some(candidate) = self.mutate(model, &current, rng) {
                let candidate = SolverState::new(model, candidate);
                if candidate.fitness().inner_gaps > 0 {
                    // A mutation must never leave gaps behind; dropping the
                    // candidate keeps the walker valid.
                    debug_assert!(false, "mutation produced a gapped schedule");
                    tracing::warn!("dropping gapped candidate from {}", candidate.fitness());
                    continue;
                }

                let delta = (candidate.energy() - current.energy()) as f64;
                if delta < 0.0 {
                    current = candidate;
                    stagnant = 0;
                    if current.fitness() < best.fitness() {
                        best = current.clone();
                        tracing::debug!("incumbent: {}", best.fitness());
                    }
                } else {
                    if rng.random::<f64>() < (-delta / temperature).exp() {
                        current = candidate;
                    }
                    stagnant += 1;
                }
            } else {
                stagnant += 1;
            }

            if best.fitness().is_perfect() {
                break;
            }

            if stagnant > self.max_stagnant / 2 && !best.fitness().is_perfect() {
                current = best.clone();
                self.perturb(model, &mut current, RESTART_KICK, rng);
                temperature = (temperature * 2.0).min(0.5);
                stagnant = 0;
                tracing::debug!(
                    "restart: reheated to T={temperature:.4}, walker {}",
                    current.fitness()
                );
            }
            if stagnant >= self.max_stagnant {
                break;
            }
            temperature = (temperature * self.cooling).max(self.min_temperature);
        }

        if !best.fitness().is_conflict_free() {
            self.eliminate_conflicts(model, &mut best, &mut iterations, rng);
        }

        let mut schedule = best.into_schedule();
        schedule.compact();
        let fitness = Evaluator::evaluate(model.problem(), &schedule);
        tracing::debug!("done after {iterations} iterations: {fitness}");
        SearchOutcome {
            schedule,
            fitness,
            iterations,
        }
    }

    /// Closing pass: walk under an acceptor that never admits extra
    /// conflicts, with periodic perturbation bursts to leave plateaus.
    fn eliminate_conflicts(
        &self,
        model: &SolverModel<'_>,
        best: &mut SolverState,
        iterations: &mut usize,
        rng: &mut ChaCha8Rng,
    ) {
        let acceptor = ConflictBoundAcceptor;
        let mut current = best.clone();
        let mut since_improvement = 0usize;

        for _ in 0..CONFLICT_PASS_ITERS {
            if best.fitness().is_conflict_free() {
                break;
            }
            *iterations += 1;

            let mut improved = false;
            if let Some(candidate) = self.mutate(model, &current, rng) {
                let candidate = SolverState::new(model, candidate);
                if acceptor.accept(current.fitness(), candidate.fitness()) {
                    current = candidate;
                    if current.fitness() < best.fitness() {
                        *best = current.clone();
                        tracing::debug!("conflict pass incumbent: {}", best.fitness());
                        improved = true;
                    }
                }
            }

            if improved {
                since_improvement = 0;
            } else {
                since_improvement += 1;
                if since_improvement.is_multiple_of(CONFLICT_PASS_KICK_EVERY) {
                    self.perturb(model, &mut current, PERTURBATION_KICK, rng);
                }
            }
        }
    }
}
