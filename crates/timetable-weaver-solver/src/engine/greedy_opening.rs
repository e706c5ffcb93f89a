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

use crate::model::SolverModel;
use rand::Rng;
use rand::seq::SliceRandom;
use timetable_weaver_core::prelude::Slot;
use timetable_weaver_model::{problem::ClassIdentifier, solution::Schedule};

/// Constructive opening: builds a gap-free starting schedule one class at a
/// time, placing the periods of tightly-constrained teachers before the
/// flexible ones.
///
/// Per placement request the teacher's available slots are shuffled under
/// the engine RNG and the first slot that is empty, class-available and free
/// of the teacher elsewhere is taken. Requests that find no such slot are
/// deferred; a second pass drops them into any still-empty cell, accepting
/// conflicts the search will have to repair. A final compaction re-prefixes
/// every row, so the result never has gaps.
#[derive(Debug, Clone, Default)]
pub struct GreedyOpening;

impl GreedyOpening {
    pub fn new() -> Self {
        Self
    }

    pub fn build<R: Rng>(&self, model: &SolverModel<'_>, rng: &mut R) -> Schedule {
        let mut schedule = Schedule::empty(model.problem());
        for (class_id, _) in model.problem().classes() {
            self.populate_class(model, &mut schedule, class_id, rng);
        }
        schedule.compact();
        schedule
    }

    /// Clears one class and reseeds it from scratch, leaving all other
    /// classes untouched. Compacts before returning.
    pub fn rebuild_class<R: Rng>(
        &self,
        model: &SolverModel<'_>,
        schedule: &mut Schedule,
        class: ClassIdentifier,
        rng: &mut R,
    ) {
        for day in 0..schedule.days() {
            for period in 0..schedule.periods_per_day() {
                schedule.take(class, day, period);
            }
        }
        self.populate_class(model, schedule, class, rng);
        schedule.compact();
    }

    fn populate_class<R: Rng>(
        &self,
        model: &SolverModel<'_>,
        schedule: &mut Schedule,
        class: ClassIdentifier,
        rng: &mut R,
    ) {
        let mut slot_buf: Vec<Slot> = Vec::new();
        let mut deferred = Vec::new();

        for &lesson_id in model.class_requests(class) {
            let teacher = model.problem().lesson(lesson_id).teacher();
            slot_buf.clear();
            slot_buf.extend_from_slice(model.teacher_slots(teacher));
            slot_buf.shuffle(rng);

            let placed = slot_buf.iter().find(|slot| {
                model.placement_ok(schedule, class, teacher, slot.day(), slot.period())
            });
            match placed {
                Some(slot) => schedule.set(class, slot.day(), slot.period(), Some(lesson_id)),
                None => deferred.push(lesson_id),
            }
        }

        // Fallback: park leftovers in any empty cell, conflicts and all.
        'requests: for lesson_id in deferred {
            for day in 0..schedule.days() {
                for period in 0..schedule.periods_per_day() {
                    if schedule.get(class, day, period).is_none() {
                        schedule.set(class, day, period, Some(lesson_id));
                        continue 'requests;
                    }
                }
            }
            // Grid full: the request stays unscheduled.
        }
    }
}
