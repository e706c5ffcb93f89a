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

use crate::{engine::operator::Operator, model::SolverModel};
use rand::Rng;
use timetable_weaver_model::{problem::ClassIdentifier, solution::Schedule};

/// Random compactness-preserving move. Half the time two occupied periods
/// of one class-day are exchanged; otherwise two distinct days of one class
/// are drawn and either their lessons are swapped (both days occupied,
/// guarded so neither teacher ends up unavailable or double-booked) or, when
/// the second day is still empty, one lesson is relocated onto its first
/// period under the same guard. Whichever branch is drawn first, the other
/// serves as fallback so a proposal is produced whenever any move exists.
#[derive(Debug, Clone, Default)]
pub struct RandomSwap;

impl RandomSwap {
    pub fn new() -> Self {
        Self
    }

    fn within_day(
        &self,
        model: &SolverModel<'_>,
        schedule: &Schedule,
        rng: &mut rand_chacha::ChaCha8Rng,
    ) -> Option<Schedule> {
        // Rows with at least two occupied periods; occupied cells always
        // form the prefix here, so the count doubles as the prefix length.
        let mut rows: Vec<(ClassIdentifier, usize, usize)> = Vec::new();
        for (class_id, _) in model.problem().classes() {
            for day in 0..schedule.days() {
                let occupied = schedule.row(class_id, day).iter().filter(|c| c.is_some()).count();
                if occupied >= 2 {
                    rows.push((class_id, day, occupied));
                }
            }
        }
        if rows.is_empty() {
            return None;
        }
        let (class, day, occupied) = rows[rng.random_range(0..rows.len())];
        let a = rng.random_range(0..occupied);
        let mut b = rng.random_range(0..occupied - 1);
        if b >= a {
            b += 1;
        }

        let mut next = schedule.clone();
        let la = next.get(class, day, a);
        let lb = next.get(class, day, b);
        next.set(class, day, a, lb);
        next.set(class, day, b, la);
        Some(next)
    }

    fn across_days(
        &self,
        model: &SolverModel<'_>,
        schedule: &Schedule,
        rng: &mut rand_chacha::ChaCha8Rng,
    ) -> Option<Schedule> {
        let problem = model.problem();
        if problem.class_count() == 0 || schedule.days() < 2 {
            return None;
        }
        let class = ClassIdentifier::new(rng.random_range(0..problem.class_count()));
        let d1 = rng.random_range(0..schedule.days());
        let mut d2 = rng.random_range(0..schedule.days() - 1);
        if d2 >= d1 {
            d2 += 1;
        }

        let k1 = schedule.row(class, d1).iter().filter(|c| c.is_some()).count();
        let k2 = schedule.row(class, d2).iter().filter(|c| c.is_some()).count();

        if k1 > 0 && k2 > 0 {
            let p1 = rng.random_range(0..k1);
            let p2 = rng.random_range(0..k2);
            let la = schedule.get(class, d1, p1)?;
            let lb = schedule.get(class, d2, p2)?;
            let ta = problem.lesson(la).teacher();
            let tb = problem.lesson(lb).teacher();

            // Both moved lessons must stay clean at their destinations.
            let clean = problem.teacher(ta).is_available_at(d2, p2)
                && !model.teacher_busy_elsewhere(schedule, ta, d2, p2, class)
                && problem.teacher(tb).is_available_at(d1, p1)
                && !model.teacher_busy_elsewhere(schedule, tb, d1, p1, class);
            if !clean {
                return None;
            }

            let mut next = schedule.clone();
            next.set(class, d1, p1, Some(lb));
            next.set(class, d2, p2, Some(la));
            return Some(next);
        }

        // One of the days is empty: relocate a lesson onto its first period.
        let (src_day, src_len, dst_day) = if k1 > 0 { (d1, k1, d2) } else if k2 > 0 { (d2, k2, d1) } else {
            return None;
        };
        let src_period = rng.random_range(0..src_len);
        let lesson = schedule.get(class, src_day, src_period)?;
        let teacher = problem.lesson(lesson).teacher();
        if !model.placement_ok(schedule, class, teacher, dst_day, 0) {
            return None;
        }

        let mut next = schedule.clone();
        next.take(class, src_day, src_period);
        next.set(class, dst_day, 0, Some(lesson));
        next.compact();
        Some(next)
    }
}

impl Operator for RandomSwap {
    fn name(&self) -> &'static str {
        "RandomSwap"
    }

    fn propose(
        &self,
        model: &SolverModel<'_>,
        schedule: &Schedule,
        rng: &mut rand_chacha::ChaCha8Rng,
    ) -> Option<Schedule> {
        if rng.random_bool(0.5) {
            self.within_day(model, schedule, rng)
                .or_else(|| self.across_days(model, schedule, rng))
        } else {
            self.across_days(model, schedule, rng)
                .or_else(|| self.within_day(model, schedule, rng))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Evaluator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use timetable_weaver_core::prelude::SlotSet;
    use timetable_weaver_model::problem::{
        ClassSpec, LessonSpec, Problem, ProblemBuilder, Teacher,
    };

    #[inline]
    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[inline]
    fn cid(n: usize) -> ClassIdentifier {
        ClassIdentifier::new(n)
    }

    fn problem() -> Problem {
        ProblemBuilder::new(2, 3)
            .with_teachers([Teacher::new("T", SlotSet::full(2, 3))])
            .with_classes([ClassSpec::new("1a")
                .with_lesson(LessonSpec::new("Math", "T", 2))
                .with_lesson(LessonSpec::new("Eng", "T", 1))])
            .build()
            .unwrap()
    }

    fn lesson(p: &Problem, subject: &str) -> timetable_weaver_model::problem::LessonIdentifier {
        p.lessons().find(|(_, l)| l.subject() == subject).unwrap().0
    }

    #[test]
    fn test_empty_schedule_has_no_move() {
        let p = problem();
        let model = SolverModel::from_problem(&p);
        let s = Schedule::empty(&p);
        for seed in 0..10 {
            assert!(RandomSwap::new().propose(&model, &s, &mut rng(seed)).is_none());
        }
    }

    #[test]
    fn test_moves_preserve_counts_and_compactness() {
        let p = problem();
        let model = SolverModel::from_problem(&p);
        let math = lesson(&p, "Math");
        let eng = lesson(&p, "Eng");
        let mut s = Schedule::empty(&p);
        s.set(cid(0), 0, 0, Some(math));
        s.set(cid(0), 0, 1, Some(math));
        s.set(cid(0), 1, 0, Some(eng));

        let op = RandomSwap::new();
        let mut r = rng(17);
        for _ in 0..200 {
            if let Some(next) = op.propose(&model, &s, &mut r) {
                assert!(next.validate_no_gaps());
                assert_eq!(next.occupied_count(cid(0)), 3);
                s = next;
            }
        }
    }

    #[test]
    fn test_across_day_swap_guard_blocks_unavailable_destination() {
        // U can only teach day 0; V only day 1. Swapping their lessons
        // across days would strand both, so no across-day swap may ever be
        // proposed, and within-day swaps need two occupied periods on one
        // day, of which there are none.
        let mut day0 = SlotSet::empty(2, 1);
        day0.set(0, 0, true);
        let mut day1 = SlotSet::empty(2, 1);
        day1.set(1, 0, true);
        let p = ProblemBuilder::new(2, 1)
            .with_teachers([Teacher::new("U", day0), Teacher::new("V", day1)])
            .with_classes([ClassSpec::new("1a")
                .with_lesson(LessonSpec::new("A", "U", 1))
                .with_lesson(LessonSpec::new("B", "V", 1))])
            .build()
            .unwrap();
        let model = SolverModel::from_problem(&p);
        let mut s = Schedule::empty(&p);
        s.set(cid(0), 0, 0, Some(lesson(&p, "A")));
        s.set(cid(0), 1, 0, Some(lesson(&p, "B")));

        for seed in 0..50 {
            assert!(RandomSwap::new().propose(&model, &s, &mut rng(seed)).is_none());
        }
    }

    #[test]
    fn test_relocation_can_fill_an_empty_day() {
        // Both lessons crowd day 0; the across-day branch can move one onto
        // the empty day 1, killing the free first period there.
        let p = problem();
        let model = SolverModel::from_problem(&p);
        let math = lesson(&p, "Math");
        let eng = lesson(&p, "Eng");
        let mut s = Schedule::empty(&p);
        s.set(cid(0), 0, 0, Some(math));
        s.set(cid(0), 0, 1, Some(eng));

        let op = RandomSwap::new();
        let mut r = rng(23);
        let mut spread = false;
        for _ in 0..100 {
            if let Some(next) = op.propose(&model, &s, &mut r)
                && next.first_occupied(cid(0), 1) == Some(0)
            {
                assert!(next.validate_no_gaps());
                assert_eq!(next.occupied_count(cid(0)), 2);
                assert_eq!(Evaluator::evaluate(&p, &next).free_first_periods, 0);
                spread = true;
                break;
            }
        }
        assert!(spread, "relocation onto the empty day was never proposed");
    }
}
