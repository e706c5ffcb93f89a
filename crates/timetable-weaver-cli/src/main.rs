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

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use timetable_weaver_model::problem::loader::ProblemLoader;
use timetable_weaver_solver::prelude::{GenerateOptions, GenerationError, GenerationResult};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("instances");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

fn instances() -> impl Iterator<Item = (timetable_weaver_model::problem::Problem, String)> {
    let inst_dir = find_instances_dir()
        .expect("Could not find an `instances/` directory in any ancestor of CARGO_MANIFEST_DIR");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&inst_dir)
        .expect("read_dir(instances) failed")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                && e.path().extension().map(|x| x == "json").unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();

    files.sort();
    files.into_iter().filter_map(|f| {
        let loader = ProblemLoader::default();
        match loader.from_path(&f) {
            Ok(problem) => {
                let name = f
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| f.to_string_lossy().into_owned());
                Some((problem, name))
            }
            Err(e) => {
                tracing::error!("Skipping {}: {}", f.display(), e);
                None
            }
        }
    })
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    iteration: usize, // 1-based
    filename: String,
    start_ts: DateTime<Utc>, // RFC3339 via chrono (serde)
    end_ts: DateTime<Utc>,   // RFC3339 via chrono (serde)
    runtime_ms: u128,
    seed: u64,
    search_iterations: usize,
    teacher_conflicts: Option<usize>, // None if validation failed
    unscheduled_periods: Option<usize>,
    feasible: bool,
}

fn record_of(result: &GenerationResult, feasible: bool) -> (u64, usize, Option<usize>, Option<usize>, bool) {
    (
        result.seed_used,
        result.iterations_run,
        Some(result.metrics.teacher_conflicts),
        Some(result.metrics.unscheduled_periods),
        feasible,
    )
}

fn main() {
    enable_tracing();

    let options = GenerateOptions::new().with_seed(0xBA5E);
    let mut results: Vec<RunRecord> = Vec::new();

    for (iter, (problem, file)) in instances().enumerate() {
        let iteration = iter + 1;

        tracing::info!(
            "Solving [{}] {} with {} teachers, {} classes and {} lessons",
            iteration,
            file,
            problem.teacher_count(),
            problem.class_count(),
            problem.lesson_count()
        );

        let start_ts = Utc::now();
        let t0 = Instant::now();

        let outcome = timetable_weaver_solver::prelude::generate(&problem, &options);

        let runtime = t0.elapsed();
        let end_ts = Utc::now();

        let (seed, search_iterations, conflicts, unscheduled, feasible) = match &outcome {
            Ok(result) => {
                tracing::info!(
                    "Finished [{}] {}: conflicts=0, unscheduled={}, runtime={:?}",
                    iteration,
                    file,
                    result.metrics.unscheduled_periods,
                    runtime
                );
                record_of(result, true)
            }
            Err(GenerationError::NoFeasibleSolution(result)) => {
                tracing::warn!(
                    "Finished [{}] {} without feasibility: conflicts={}, runtime={:?}",
                    iteration,
                    file,
                    result.metrics.teacher_conflicts,
                    runtime
                );
                record_of(result, false)
            }
            Err(GenerationError::InvalidConfig(e)) => {
                tracing::error!("Rejected [{}] {}: {}", iteration, file, e);
                (0, 0, None, None, false)
            }
        };

        results.push(RunRecord {
            iteration,
            filename: file,
            start_ts,
            end_ts,
            runtime_ms: runtime.as_millis(),
            seed,
            search_iterations,
            teacher_conflicts: conflicts,
            unscheduled_periods: unscheduled,
            feasible,
        });
    }

    // Persist as pretty JSON
    let out_path = PathBuf::from("solver_results.json");
    match File::create(&out_path).and_then(|mut f| {
        let json = serde_json::to_string_pretty(&results).expect("serialize results");
        f.write_all(json.as_bytes())
    }) {
        Ok(()) => {
            tracing::info!(
                "Wrote {} run record(s) to {}",
                results.len(),
                out_path.display()
            );
        }
        Err(e) => {
            tracing::error!("Failed to write results to {}: {}", out_path.display(), e);
        }
    }
}
