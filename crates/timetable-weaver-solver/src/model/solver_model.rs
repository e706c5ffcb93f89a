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

use timetable_weaver_core::prelude::Slot;
use timetable_weaver_model::{
    problem::{ClassIdentifier, LessonIdentifier, Problem, TeacherIdentifier},
    solution::Schedule,
};

/// Derived index structures over a borrowed [`Problem`], built once per
/// generation call and shared by the opening and every operator.
///
/// Holds, per teacher, the materialised list of available slots (in
/// `(day, period)` order), and per class the expanded placement requests:
/// one entry per period instance of each lesson, sorted
/// most-constrained-teacher-first so tight teachers are placed before
/// flexible ones. Ties break by subject name, then lesson identifier, which
/// keeps the order fully deterministic.
#[derive(Debug, Clone)]
pub struct SolverModel<'p> {
    problem: &'p Problem,
    teacher_slots: Vec<Vec<Slot>>,
    class_requests: Vec<Vec<LessonIdentifier>>,
}

impl<'p> SolverModel<'p> {
    pub fn from_problem(problem: &'p Problem) -> Self {
        let teacher_slots: Vec<Vec<Slot>> = problem
            .teachers()
            .map(|(_, t)| t.available_slots().collect())
            .collect();

        let class_requests = problem
            .classes()
            .map(|(class_id, _)| {
                let mut requests: Vec<LessonIdentifier> = problem
                    .class_lessons(class_id)
                    .flat_map(|(lid, lesson)| {
                        std::iter::repeat_n(lid, lesson.periods_per_week())
                    })
                    .collect();
                requests.sort_by(|&a, &b| {
                    let la = problem.lesson(a);
                    let lb = problem.lesson(b);
                    teacher_slots[la.teacher().get()]
                        .len()
                        .cmp(&teacher_slots[lb.teacher().get()].len())
                        .then_with(|| la.subject().cmp(lb.subject()))
                        .then_with(|| a.cmp(&b))
                });
                requests
            })
            .collect();

        Self {
            problem,
            teacher_slots,
            class_requests,
        }
    }

    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    /// Available slots of one teacher, `(day, period)` ordered.
    ///
    /// # Panics
    ///
    /// Panics if `teacher` does not belong to the underlying problem.
    #[inline]
    pub fn teacher_slots(&self, teacher: TeacherIdentifier) -> &[Slot] {
        &self.teacher_slots[teacher.get()]
    }

    /// Expanded placement requests of one class, most-constrained first.
    ///
    /// # Panics
    ///
    /// Panics if `class` does not belong to the underlying problem.
    #[inline]
    pub fn class_requests(&self, class: ClassIdentifier) -> &[LessonIdentifier] {
        &self.class_requests[class.get()]
    }

    /// True iff `teacher` already teaches some other class at this cell.
    pub fn teacher_busy_elsewhere(
        &self,
        schedule: &Schedule,
        teacher: TeacherIdentifier,
        day: usize,
        period: usize,
        exclude: ClassIdentifier,
    ) -> bool {
        self.problem.classes().any(|(class_id, _)| {
            class_id != exclude
                && schedule
                    .get(class_id, day, period)
                    .is_some_and(|lid| self.problem.lesson(lid).teacher() == teacher)
        })
    }

    /// True iff the cell is empty, the class and the teacher are both
    /// available there, and the teacher is free of every other class.
    pub fn placement_ok(
        &self,
        schedule: &Schedule,
        class: ClassIdentifier,
        teacher: TeacherIdentifier,
        day: usize,
        period: usize,
    ) -> bool {
        schedule.get(class, day, period).is_none()
            && self.problem.class(class).is_available_at(day, period)
            && self.problem.teacher(teacher).is_available_at(day, period)
            && !self.teacher_busy_elsewhere(schedule, teacher, day, period, class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_weaver_model::problem::{ClassSpec, LessonSpec, ProblemBuilder, Teacher};
    use timetable_weaver_core::prelude::SlotSet;

    fn constrained_problem() -> Problem {
        let mut narrow = SlotSet::empty(2, 3);
        narrow.set(1, 1, true);
        ProblemBuilder::new(2, 3)
            .with_teachers([
                Teacher::new("Wide", SlotSet::full(2, 3)),
                Teacher::new("Narrow", narrow),
            ])
            .with_classes([ClassSpec::new("1a")
                .with_lesson(LessonSpec::new("Art", "Wide", 2))
                .with_lesson(LessonSpec::new("Math", "Narrow", 1))])
            .build()
            .unwrap()
    }

    #[test]
    fn test_requests_sorted_most_constrained_first() {
        let p = constrained_problem();
        let model = SolverModel::from_problem(&p);
        let (class_id, _) = p.classes().next().unwrap();

        let requests = model.class_requests(class_id);
        assert_eq!(requests.len(), 3);
        // Narrow's single Math period is first despite being declared last.
        assert_eq!(p.lesson(requests[0]).subject(), "Math");
        assert_eq!(p.lesson(requests[1]).subject(), "Art");
        assert_eq!(p.lesson(requests[2]).subject(), "Art");
        // The two Art instances are the same lesson.
        assert_eq!(requests[1], requests[2]);
    }

    #[test]
    fn test_teacher_slots_materialised_in_order() {
        let p = constrained_problem();
        let model = SolverModel::from_problem(&p);
        let narrow = p.teacher_index("Narrow").unwrap();
        assert_eq!(model.teacher_slots(narrow), &[Slot::new(1, 1)]);

        let wide = p.teacher_index("Wide").unwrap();
        assert_eq!(model.teacher_slots(wide).len(), 6);
    }

    #[test]
    fn test_placement_checks() {
        let p = constrained_problem();
        let model = SolverModel::from_problem(&p);
        let (class_id, _) = p.classes().next().unwrap();
        let narrow = p.teacher_index("Narrow").unwrap();
        let (math_id, _) = p
            .lessons()
            .find(|(_, l)| l.subject() == "Math")
            .unwrap();

        let mut schedule = Schedule::empty(&p);
        // Narrow is only available at (1, 1).
        assert!(!model.placement_ok(&schedule, class_id, narrow, 0, 0));
        assert!(model.placement_ok(&schedule, class_id, narrow, 1, 1));

        schedule.set(class_id, 1, 1, Some(math_id));
        // Cell now occupied.
        assert!(!model.placement_ok(&schedule, class_id, narrow, 1, 1));
        // Same class never counts as "busy elsewhere".
        assert!(!model.teacher_busy_elsewhere(&schedule, narrow, 1, 1, class_id));
    }
}
