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

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use timetable_weaver_core::prelude::SlotSet;
use timetable_weaver_model::problem::{ClassSpec, LessonSpec, Problem, ProblemBuilder, Teacher};
use timetable_weaver_solver::{
    engine::greedy_opening::GreedyOpening, eval::Evaluator, model::SolverModel,
};

/// Ten classes, eight teachers, a realistically loaded 5x8 week.
fn benchmark_problem() -> Problem {
    let subjects = ["Math", "Eng", "Bio", "Art", "Hist", "Phys", "Chem", "Sport"];
    let teachers: Vec<Teacher> = (0..8)
        .map(|i| Teacher::new(format!("t{i}"), SlotSet::full(5, 8)))
        .collect();
    let classes = (0..10).map(|c| {
        let mut spec = ClassSpec::new(format!("c{c}"));
        for (i, subject) in subjects.iter().enumerate() {
            spec = spec.with_lesson(LessonSpec::new(*subject, format!("t{i}"), 3));
        }
        spec
    });
    ProblemBuilder::new(5, 8)
        .with_teachers(teachers)
        .with_classes(classes)
        .build()
        .unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let problem = benchmark_problem();
    let model = SolverModel::from_problem(&problem);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let schedule = GreedyOpening::new().build(&model, &mut rng);

    c.bench_function("evaluate_full_schedule", |b| {
        b.iter(|| Evaluator::evaluate(black_box(&problem), black_box(&schedule)))
    });
}

fn bench_compact(c: &mut Criterion) {
    let problem = benchmark_problem();
    let model = SolverModel::from_problem(&problem);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let schedule = GreedyOpening::new().build(&model, &mut rng);

    c.bench_function("clone_and_compact", |b| {
        b.iter(|| {
            let mut s = black_box(&schedule).clone();
            s.compact();
            s
        })
    });
}

fn bench_opening(c: &mut Criterion) {
    let problem = benchmark_problem();
    let model = SolverModel::from_problem(&problem);

    c.bench_function("greedy_opening", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        b.iter(|| GreedyOpening::new().build(black_box(&model), &mut rng))
    });
}

criterion_group!(benches, bench_evaluate, bench_compact, bench_opening);
criterion_main!(benches);
