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

use crate::{eval::Evaluator, model::SolverModel};
use timetable_weaver_model::solution::Schedule;

use super::fitness::Fitness;

/// A schedule paired with its evaluated fitness. The walker and incumbent of
/// the search are both `SolverState`s; fitness is computed exactly once per
/// schedule.
#[derive(Debug, Clone)]
pub struct SolverState {
    schedule: Schedule,
    fitness: Fitness,
}

impl SolverState {
    pub fn new(model: &SolverModel<'_>, schedule: Schedule) -> Self {
        let fitness = Evaluator::evaluate(model.problem(), &schedule);
        Self { schedule, fitness }
    }

    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[inline]
    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    #[inline]
    pub fn energy(&self) -> i64 {
        self.fitness.energy()
    }

    #[inline]
    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }
}
