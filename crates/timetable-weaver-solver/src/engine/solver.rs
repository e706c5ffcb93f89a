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

use crate::{engine::sa::SimulatedAnnealing, model::SolverModel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use timetable_weaver_model::{
    problem::Problem, solution::Schedule, validation::ConfigValidator,
    validation::err::ValidationError,
};

/// Search knobs of one generation call. Every field has the default the
/// engine was tuned with; set a seed for reproducible output.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub seed: Option<u64>,
    pub max_iters: u32,
    pub max_stagnant: u32,
    pub t0: f64,
    pub t_min: f64,
    pub cooling: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_iters: 5000,
            max_stagnant: 300,
            t0: 1.0,
            t_min: 1e-4,
            cooling: 0.998,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_iters(mut self, max_iters: u32) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_max_stagnant(mut self, max_stagnant: u32) -> Self {
        self.max_stagnant = max_stagnant;
        self
    }

    pub fn with_t0(mut self, t0: f64) -> Self {
        self.t0 = t0;
        self
    }

    pub fn with_t_min(mut self, t_min: f64) -> Self {
        self.t_min = t_min;
        self
    }

    pub fn with_cooling(mut self, cooling: f64) -> Self {
        self.cooling = cooling;
        self
    }
}

/// Quality of the returned schedule, as reported to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMetrics {
    pub teacher_conflicts: usize,
    pub unscheduled_periods: usize,
    pub adjacency_penalty: f64,
    pub free_first_periods: usize,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub schedule: Schedule,
    pub metrics: ScheduleMetrics,
    pub iterations_run: usize,
    pub seed_used: u64,
}

#[derive(Debug)]
pub enum GenerationError {
    /// The configuration fails a pre-search check; nothing was searched.
    InvalidConfig(ValidationError),
    /// The search ran out of iterations with conflicts left. Carries the
    /// best schedule found so callers can still display it.
    NoFeasibleSolution(Box<GenerationResult>),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::InvalidConfig(e) => write!(f, "invalid configuration: {e}"),
            GenerationError::NoFeasibleSolution(result) => write!(
                f,
                "no conflict-free timetable found ({} conflict(s) remain)",
                result.metrics.teacher_conflicts
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<ValidationError> for GenerationError {
    fn from(err: ValidationError) -> Self {
        GenerationError::InvalidConfig(err)
    }
}

/// Builds a weekly timetable for `problem`.
///
/// Validates the configuration, seeds a gap-free schedule, runs simulated
/// annealing with conflict repair and returns the best schedule with its
/// metrics. The call is synchronous, performs no I/O and is a pure function
/// of `(problem, options)` once a seed is fixed.
///
/// Unscheduled periods are reported, not fatal; remaining teacher conflicts
/// surface as [`GenerationError::NoFeasibleSolution`] wrapping the partial
/// result.
pub fn generate(
    problem: &Problem,
    options: &GenerateOptions,
) -> Result<GenerationResult, GenerationError> {
    ConfigValidator::validate_all(problem)?;

    let seed = options.seed.unwrap_or_else(rand::random::<u64>);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::debug!(
        "generating: {} classes, {} teachers, {} lessons, seed {seed}",
        problem.class_count(),
        problem.teacher_count(),
        problem.lesson_count()
    );

    let model = SolverModel::from_problem(problem);
    let search = SimulatedAnnealing::new()
        .with_max_iters(options.max_iters as usize)
        .with_max_stagnant(options.max_stagnant as usize)
        .with_init_temperature(options.t0)
        .with_min_temperature(options.t_min)
        .with_cooling(options.cooling);
    let outcome = search.run(&model, &mut rng);

    let metrics = ScheduleMetrics {
        teacher_conflicts: outcome.fitness.conflicts(),
        unscheduled_periods: outcome.fitness.unscheduled,
        adjacency_penalty: outcome.fitness.adjacency_penalty(),
        free_first_periods: outcome.fitness.free_first_periods,
    };
    let result = GenerationResult {
        schedule: outcome.schedule,
        metrics,
        iterations_run: outcome.iterations,
        seed_used: seed,
    };

    if result.metrics.teacher_conflicts > 0 {
        return Err(GenerationError::NoFeasibleSolution(Box::new(result)));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_weaver_core::prelude::SlotSet;
    use timetable_weaver_model::problem::{
        ClassIdentifier, ClassSpec, LessonSpec, ProblemBuilder, Teacher,
    };

    #[inline]
    fn cid(n: usize) -> ClassIdentifier {
        ClassIdentifier::new(n)
    }

    #[inline]
    fn opts(seed: u64) -> GenerateOptions {
        GenerateOptions::new().with_seed(seed)
    }

    fn subjects_at(
        problem: &Problem,
        schedule: &Schedule,
        class: usize,
    ) -> Vec<(usize, usize, String)> {
        schedule
            .iter_occupied()
            .filter(|(c, _, _)| *c == cid(class))
            .map(|(_, slot, l)| (slot.day(), slot.period(), problem.lesson(l).subject().to_string()))
            .collect()
    }

    #[test]
    fn test_trivial_feasible_schedules_every_period() {
        // One teacher, one class, three Math periods on a roomy grid.
        let p = ProblemBuilder::new(5, 6)
            .with_teachers([Teacher::new("Alice", SlotSet::full(5, 6))])
            .with_classes([ClassSpec::new("C1").with_lesson(LessonSpec::new("Math", "Alice", 3))])
            .build()
            .unwrap();
        let r = generate(&p, &opts(1)).unwrap();

        assert_eq!(r.schedule.days(), 5);
        assert_eq!(r.schedule.periods_per_day(), 6);
        assert!(r.schedule.validate_no_gaps());
        assert_eq!(r.metrics.teacher_conflicts, 0);
        assert_eq!(r.metrics.unscheduled_periods, 0);

        let cells = subjects_at(&p, &r.schedule, 0);
        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|(_, _, s)| s == "Math"));
        // Gap-free rows put every occupied day's first lesson at period 0.
        for day in 0..5 {
            if r.schedule.last_occupied(cid(0), day).is_some() {
                assert_eq!(r.schedule.first_occupied(cid(0), day), Some(0));
            }
        }
    }

    #[test]
    fn test_tight_capacity_fills_the_grid() {
        let p = ProblemBuilder::new(1, 2)
            .with_teachers([Teacher::new("T1", SlotSet::full(1, 2))])
            .with_classes([ClassSpec::new("C1")
                .with_lesson(LessonSpec::new("A", "T1", 1))
                .with_lesson(LessonSpec::new("B", "T1", 1))])
            .build()
            .unwrap();
        let r = generate(&p, &opts(2)).unwrap();

        assert_eq!(r.metrics.teacher_conflicts, 0);
        let mut subjects: Vec<String> =
            subjects_at(&p, &r.schedule, 0).into_iter().map(|(_, _, s)| s).collect();
        subjects.sort();
        assert_eq!(subjects, vec!["A", "B"]);
        assert!(r.schedule.get(cid(0), 0, 0).is_some());
        assert!(r.schedule.get(cid(0), 0, 1).is_some());
    }

    #[test]
    fn test_forced_double_booking_reports_no_feasible_solution() {
        let p = ProblemBuilder::new(1, 1)
            .with_teachers([Teacher::new("T1", SlotSet::full(1, 1))])
            .with_classes([
                ClassSpec::new("C1").with_lesson(LessonSpec::new("X", "T1", 1)),
                ClassSpec::new("C2").with_lesson(LessonSpec::new("X", "T1", 1)),
            ])
            .build()
            .unwrap();

        match generate(&p, &opts(3)) {
            Err(GenerationError::NoFeasibleSolution(result)) => {
                assert_eq!(result.metrics.teacher_conflicts, 1);
                assert!(result.schedule.validate_no_gaps());
                assert_eq!(result.schedule.occupied_count(cid(0)), 1);
                assert_eq!(result.schedule.occupied_count(cid(1)), 1);
            }
            other => panic!("expected NoFeasibleSolution, got {other:?}"),
        }
    }

    #[test]
    fn test_constrained_teacher_takes_priority() {
        // Alice can only teach (0, 0); her lesson must sit exactly there.
        let mut only_first = SlotSet::empty(5, 6);
        only_first.set(0, 0, true);
        let p = ProblemBuilder::new(5, 6)
            .with_teachers([
                Teacher::new("Alice", only_first),
                Teacher::new("Bob", SlotSet::full(5, 6)),
            ])
            .with_classes([ClassSpec::new("C1")
                .with_lesson(LessonSpec::new("Math", "Alice", 1))
                .with_lesson(LessonSpec::new("Eng", "Bob", 1))])
            .build()
            .unwrap();
        let r = generate(&p, &opts(4)).unwrap();

        assert_eq!(r.metrics.teacher_conflicts, 0);
        assert_eq!(r.metrics.unscheduled_periods, 0);
        let math = r.schedule.get(cid(0), 0, 0).map(|l| p.lesson(l).subject().to_string());
        assert_eq!(math.as_deref(), Some("Math"));

        // Eng sits right after Math or opens another day; gap-freeness
        // allows nothing else.
        let eng: Vec<_> = subjects_at(&p, &r.schedule, 0)
            .into_iter()
            .filter(|(_, _, s)| s == "Eng")
            .collect();
        assert_eq!(eng.len(), 1);
        let (day, period, _) = eng[0];
        assert!(period == 0 || (day == 0 && period == 1));
    }

    #[test]
    fn test_adjacent_same_subject_periods_are_separated() {
        let p = ProblemBuilder::new(1, 3)
            .with_teachers([Teacher::new("T1", SlotSet::full(1, 3))])
            .with_classes([ClassSpec::new("C1")
                .with_lesson(LessonSpec::new("Math", "T1", 2))
                .with_lesson(LessonSpec::new("Eng", "T1", 1))])
            .build()
            .unwrap();
        let r = generate(&p, &opts(5)).unwrap();

        assert_eq!(r.metrics.adjacency_penalty, 0.0);
        let cells = subjects_at(&p, &r.schedule, 0);
        let order: Vec<_> = cells.iter().map(|(_, _, s)| s.as_str()).collect();
        assert_eq!(order, vec!["Math", "Eng", "Math"]);
    }

    #[test]
    fn test_first_periods_are_filled_before_days_stay_free() {
        // Two single-period lessons on a two-day grid: the optimum opens
        // both days at period 0.
        let p = ProblemBuilder::new(2, 3)
            .with_teachers([Teacher::new("T", SlotSet::full(2, 3))])
            .with_classes([ClassSpec::new("C1")
                .with_lesson(LessonSpec::new("Math", "T", 1))
                .with_lesson(LessonSpec::new("Eng", "T", 1))])
            .build()
            .unwrap();
        let r = generate(&p, &opts(6)).unwrap();

        assert_eq!(r.metrics.free_first_periods, 0);
        assert!(r.schedule.get(cid(0), 0, 0).is_some());
        assert!(r.schedule.get(cid(0), 1, 0).is_some());
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let p = ProblemBuilder::new(3, 4)
            .with_teachers([
                Teacher::new("A", SlotSet::full(3, 4)),
                Teacher::new("B", SlotSet::full(3, 4)),
            ])
            .with_classes([
                ClassSpec::new("C1")
                    .with_lesson(LessonSpec::new("Math", "A", 3))
                    .with_lesson(LessonSpec::new("Eng", "B", 2)),
                ClassSpec::new("C2")
                    .with_lesson(LessonSpec::new("Math", "A", 2))
                    .with_lesson(LessonSpec::new("Art", "B", 1)),
            ])
            .build()
            .unwrap();

        let a = generate(&p, &opts(77)).unwrap();
        let b = generate(&p, &opts(77)).unwrap();
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.seed_used, 77);
        assert_eq!(a.iterations_run, b.iterations_run);

        // A different seed still yields a valid schedule.
        let c = generate(&p, &opts(78)).unwrap();
        assert!(c.schedule.validate_no_gaps());
    }

    #[test]
    fn test_zero_availability_teacher_fails_before_search() {
        let p = ProblemBuilder::new(5, 6)
            .with_teachers([Teacher::new("Ghost", SlotSet::empty(5, 6))])
            .with_classes([ClassSpec::new("C1").with_lesson(LessonSpec::new("Math", "Ghost", 1))])
            .build()
            .unwrap();

        match generate(&p, &opts(8)) {
            Err(GenerationError::InvalidConfig(ValidationError::InfeasibleByConstruction(e))) => {
                assert_eq!(e.name(), "teacher Ghost");
            }
            other => panic!("expected InfeasibleByConstruction, got {other:?}"),
        }
    }

    #[test]
    fn test_capacity_and_empty_input_rejected() {
        let p = ProblemBuilder::new(1, 1)
            .with_teachers([Teacher::new("T", SlotSet::full(1, 1))])
            .with_classes([ClassSpec::new("C1").with_lesson(LessonSpec::new("X", "T", 2))])
            .build()
            .unwrap();
        assert!(matches!(
            generate(&p, &opts(9)),
            Err(GenerationError::InvalidConfig(ValidationError::CapacityExceeded(_)))
        ));

        let p = ProblemBuilder::new(1, 1).build().unwrap();
        assert!(matches!(
            generate(&p, &opts(10)),
            Err(GenerationError::InvalidConfig(ValidationError::EmptyInput(_)))
        ));
    }

    #[test]
    fn test_class_availability_is_respected() {
        // The class is closed on day 0; its single lesson must land on
        // day 1 even though the teacher is free all week.
        let mut closed_monday = SlotSet::full(2, 2);
        closed_monday.set_day(0, false);
        let p = ProblemBuilder::new(2, 2)
            .with_teachers([Teacher::new("T", SlotSet::full(2, 2))])
            .with_classes([ClassSpec::new("C1")
                .with_availability(closed_monday)
                .with_lesson(LessonSpec::new("Math", "T", 1))])
            .build()
            .unwrap();
        let r = generate(&p, &opts(11)).unwrap();

        assert_eq!(r.metrics.teacher_conflicts, 0);
        assert_eq!(r.schedule.occupied_count(cid(0)), 1);
        assert!(r.schedule.get(cid(0), 1, 0).is_some());
    }
}
