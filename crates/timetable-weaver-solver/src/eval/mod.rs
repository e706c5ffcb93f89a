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

//! Full-schedule quality evaluation.
//!
//! The evaluator recomputes every counter from scratch; a schedule is small
//! (`classes × days × periods` cells) and the search clones it per step
//! anyway, so incremental bookkeeping would buy little.

use crate::state::fitness::Fitness;
use std::collections::HashSet;
use timetable_weaver_core::prelude::Slot;
use timetable_weaver_model::{problem::ClassIdentifier, problem::Problem, solution::Schedule};

#[derive(Debug, Clone)]
pub struct Evaluator;

impl Evaluator {
    /// Computes the counters of `schedule` against `problem`.
    ///
    /// An occupied cell contributes one availability violation per
    /// unavailable party (teacher, class). Double-bookings count
    /// `uses − 1` per teacher per cell across all classes.
    pub fn evaluate(problem: &Problem, schedule: &Schedule) -> Fitness {
        let periods = problem.periods_per_day();
        let slot_count = problem.slots_per_week();

        let mut availability_violations = 0usize;
        let mut teacher_use = vec![0u32; problem.teacher_count() * slot_count];

        for (class_id, slot, lesson_id) in schedule.iter_occupied() {
            let lesson = problem.lesson(lesson_id);
            if !problem
                .teacher(lesson.teacher())
                .is_available_at(slot.day(), slot.period())
            {
                availability_violations += 1;
            }
            if !problem
                .class(class_id)
                .is_available_at(slot.day(), slot.period())
            {
                availability_violations += 1;
            }
            teacher_use[lesson.teacher().get() * slot_count + slot.day() * periods + slot.period()] +=
                1;
        }

        let double_bookings = teacher_use
            .iter()
            .map(|&uses| (uses as usize).saturating_sub(1))
            .sum();

        let mut unscheduled = 0usize;
        let mut inner_gaps = 0usize;
        let mut free_first_periods = 0usize;
        let mut adjacency_pairs = 0usize;

        for (class_id, _) in problem.classes() {
            unscheduled += problem
                .total_periods(class_id)
                .saturating_sub(schedule.occupied_count(class_id));

            for day in 0..problem.days() {
                let row = schedule.row(class_id, day);
                if row[0].is_none() {
                    free_first_periods += 1;
                }
                if let (Some(first), Some(last)) = (
                    schedule.first_occupied(class_id, day),
                    schedule.last_occupied(class_id, day),
                ) {
                    inner_gaps += row[first..=last].iter().filter(|c| c.is_none()).count();
                }
                for pair in row.windows(2) {
                    if let (Some(a), Some(b)) = (pair[0], pair[1])
                        && problem.lesson(a).subject() == problem.lesson(b).subject()
                    {
                        adjacency_pairs += 1;
                    }
                }
            }
        }

        Fitness {
            availability_violations,
            double_bookings,
            unscheduled,
            inner_gaps,
            free_first_periods,
            adjacency_pairs,
        }
    }

    /// Cells participating in at least one conflict, availability violations
    /// first, then members of double-booked teacher groups. Deduplicated,
    /// deterministic order.
    pub fn conflict_cells(
        problem: &Problem,
        schedule: &Schedule,
    ) -> Vec<(ClassIdentifier, Slot)> {
        let periods = problem.periods_per_day();
        let slot_count = problem.slots_per_week();

        let mut teacher_use = vec![0u32; problem.teacher_count() * slot_count];
        for (_, slot, lesson_id) in schedule.iter_occupied() {
            let lesson = problem.lesson(lesson_id);
            teacher_use
                [lesson.teacher().get() * slot_count + slot.day() * periods + slot.period()] += 1;
        }

        let mut cells = Vec::new();
        let mut seen: HashSet<(usize, usize, usize)> = HashSet::new();
        let mut push = |cells: &mut Vec<(ClassIdentifier, Slot)>, class: ClassIdentifier, slot: Slot| {
            if seen.insert((class.get(), slot.day(), slot.period())) {
                cells.push((class, slot));
            }
        };

        for (class_id, slot, lesson_id) in schedule.iter_occupied() {
            let lesson = problem.lesson(lesson_id);
            let teacher_unavailable = !problem
                .teacher(lesson.teacher())
                .is_available_at(slot.day(), slot.period());
            let class_unavailable = !problem
                .class(class_id)
                .is_available_at(slot.day(), slot.period());
            if teacher_unavailable || class_unavailable {
                push(&mut cells, class_id, slot);
            }
        }
        for (class_id, slot, lesson_id) in schedule.iter_occupied() {
            let lesson = problem.lesson(lesson_id);
            let uses = teacher_use
                [lesson.teacher().get() * slot_count + slot.day() * periods + slot.period()];
            if uses > 1 {
                push(&mut cells, class_id, slot);
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_weaver_core::prelude::SlotSet;
    use timetable_weaver_model::problem::{ClassSpec, LessonSpec, ProblemBuilder, Teacher};

    #[inline]
    fn cid(n: usize) -> ClassIdentifier {
        ClassIdentifier::new(n)
    }

    /// Two classes sharing one narrow teacher plus a wide one.
    fn fixture() -> Problem {
        let mut narrow = SlotSet::empty(2, 3);
        narrow.set(0, 0, true);
        narrow.set(0, 1, true);
        ProblemBuilder::new(2, 3)
            .with_teachers([
                Teacher::new("N", narrow),
                Teacher::new("W", SlotSet::full(2, 3)),
            ])
            .with_classes([
                ClassSpec::new("1a")
                    .with_lesson(LessonSpec::new("Math", "N", 2))
                    .with_lesson(LessonSpec::new("Art", "W", 2)),
                ClassSpec::new("1b").with_lesson(LessonSpec::new("Math", "N", 1)),
            ])
            .build()
            .unwrap()
    }

    fn lesson_of(problem: &Problem, class: usize, subject: &str) -> timetable_weaver_model::problem::LessonIdentifier {
        problem
            .lessons()
            .find(|(_, l)| l.class() == cid(class) && l.subject() == subject)
            .map(|(id, _)| id)
            .unwrap()
    }

    #[test]
    fn test_empty_schedule_counts_unscheduled_and_free_firsts() {
        let p = fixture();
        let s = Schedule::empty(&p);
        let f = Evaluator::evaluate(&p, &s);
        assert_eq!(f.conflicts(), 0);
        assert_eq!(f.unscheduled, 5);
        assert_eq!(f.inner_gaps, 0);
        // Both classes, both days.
        assert_eq!(f.free_first_periods, 4);
        assert_eq!(f.adjacency_pairs, 0);
    }

    #[test]
    fn test_availability_violation_counted() {
        let p = fixture();
        let math_a = lesson_of(&p, 0, "Math");
        let mut s = Schedule::empty(&p);
        // N is not available on day 1.
        s.set(cid(0), 1, 0, Some(math_a));
        let f = Evaluator::evaluate(&p, &s);
        assert_eq!(f.availability_violations, 1);
        assert_eq!(f.double_bookings, 0);
        assert_eq!(Evaluator::conflict_cells(&p, &s), vec![(cid(0), Slot::new(1, 0))]);
    }

    #[test]
    fn test_double_booking_counted_once_per_extra_use() {
        let p = fixture();
        let math_a = lesson_of(&p, 0, "Math");
        let math_b = lesson_of(&p, 1, "Math");
        let mut s = Schedule::empty(&p);
        // N teaches both classes at (0, 0).
        s.set(cid(0), 0, 0, Some(math_a));
        s.set(cid(1), 0, 0, Some(math_b));
        let f = Evaluator::evaluate(&p, &s);
        assert_eq!(f.availability_violations, 0);
        assert_eq!(f.double_bookings, 1);

        // Both participating cells are reported.
        let cells = Evaluator::conflict_cells(&p, &s);
        assert_eq!(
            cells,
            vec![(cid(0), Slot::new(0, 0)), (cid(1), Slot::new(0, 0))]
        );
    }

    #[test]
    fn test_class_availability_violation_counted() {
        let mut closed_friday = SlotSet::full(2, 3);
        closed_friday.set_day(1, false);
        let p = ProblemBuilder::new(2, 3)
            .with_teachers([Teacher::new("W", SlotSet::full(2, 3))])
            .with_classes([ClassSpec::new("1a")
                .with_availability(closed_friday)
                .with_lesson(LessonSpec::new("Art", "W", 1))])
            .build()
            .unwrap();
        let (art_id, art) = p.lessons().next().unwrap();
        assert_eq!(art.subject(), "Art");

        let mut s = Schedule::empty(&p);
        s.set(cid(0), 1, 0, Some(art_id));
        let f = Evaluator::evaluate(&p, &s);
        assert_eq!(f.availability_violations, 1);
        assert_eq!(Evaluator::conflict_cells(&p, &s).len(), 1);
    }

    #[test]
    fn test_inner_gaps_and_free_first() {
        let p = fixture();
        let art = lesson_of(&p, 0, "Art");
        let mut s = Schedule::empty(&p);
        // Row 0 of class 0: Art, _, Art -> one inner gap, first period taken.
        s.set(cid(0), 0, 0, Some(art));
        s.set(cid(0), 0, 2, Some(art));
        let f = Evaluator::evaluate(&p, &s);
        assert_eq!(f.inner_gaps, 1);
        assert_eq!(f.empty_space_penalty(), 1000);
        assert_eq!(f.free_first_periods, 3);

        // Compaction clears the gap.
        let mut c = s.clone();
        c.compact();
        let fc = Evaluator::evaluate(&p, &c);
        assert_eq!(fc.inner_gaps, 0);
        assert_eq!(fc.adjacency_pairs, 1);
    }

    #[test]
    fn test_adjacency_same_subject_only() {
        let p = fixture();
        let math = lesson_of(&p, 0, "Math");
        let art = lesson_of(&p, 0, "Art");
        let mut s = Schedule::empty(&p);
        s.set(cid(0), 0, 0, Some(math));
        s.set(cid(0), 0, 1, Some(art));
        assert_eq!(Evaluator::evaluate(&p, &s).adjacency_pairs, 0);

        s.set(cid(0), 0, 1, Some(math));
        let f = Evaluator::evaluate(&p, &s);
        assert_eq!(f.adjacency_pairs, 1);
        assert_eq!(f.adjacency_penalty(), 0.5);
    }
}
