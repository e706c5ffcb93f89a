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
    engine::{greedy_opening::GreedyOpening, operator::Operator},
    eval::Evaluator,
    model::SolverModel,
};
use rand::Rng;
use timetable_weaver_model::solution::Schedule;

/// Conflict-targeted repair: picks a random cell that participates in an
/// availability violation or double-booking and relocates its lesson to the
/// first clean cell of the same class, scanning row-major. When no clean
/// cell exists the whole class is cleared and reseeded by the constructive
/// opening.
#[derive(Debug, Clone, Default)]
pub struct ConflictRepair {
    opening: GreedyOpening,
}

impl ConflictRepair {
    pub fn new() -> Self {
        Self {
            opening: GreedyOpening::new(),
        }
    }
}

impl Operator for ConflictRepair {
    fn name(&self) -> &'static str {
        "ConflictRepair"
    }

    fn propose(
        &self,
        model: &SolverModel<'_>,
        schedule: &Schedule,
        rng: &mut rand_chacha::ChaCha8Rng,
    ) -> Option<Schedule> {
        let problem = model.problem();
        let cells = Evaluator::conflict_cells(problem, schedule);
        if cells.is_empty() {
            return None;
        }
        let (class, slot) = cells[rng.random_range(0..cells.len())];

        let mut next = schedule.clone();
        let lesson = next.get(class, slot.day(), slot.period())?;
        let teacher = problem.lesson(lesson).teacher();

        for day in 0..next.days() {
            for period in 0..next.periods_per_day() {
                if model.placement_ok(&next, class, teacher, day, period) {
                    next.take(class, slot.day(), slot.period());
                    next.set(class, day, period, Some(lesson));
                    next.compact();
                    return Some(next);
                }
            }
        }

        // No clean cell for this lesson anywhere: reseed the class.
        self.opening.rebuild_class(model, &mut next, class, rng);
        Some(next)
    }
}
