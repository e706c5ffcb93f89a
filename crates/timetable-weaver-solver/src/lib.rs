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

//! Timetable search engine: constructive opening plus simulated annealing
//! with conflict-targeted repair.
//!
//! The entry point is [`engine::solver::generate`]: it validates a
//! [`Problem`](timetable_weaver_model::problem::Problem), seeds a gap-free
//! schedule, anneals it and returns the best schedule found together with its
//! quality metrics. The whole run is a pure function of `(problem, seed,
//! options)`.

pub mod engine;
pub mod eval;
pub mod model;
pub mod state;

pub mod prelude {
    pub use crate::engine::solver::{
        GenerateOptions, GenerationError, GenerationResult, ScheduleMetrics, generate,
    };
    pub use crate::state::fitness::Fitness;
}
