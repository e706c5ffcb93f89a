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

pub mod err;

use crate::problem::Problem;
use crate::validation::err::{
    CapacityExceededError, EmptyInputError, InfeasibleByConstructionError, ValidationError,
};

/// Pre-search checks over a built [`Problem`]. Anything caught here would
/// either overflow the grid or make the search pointless, so the engine
/// refuses to start on a failing configuration.
#[derive(Debug, Clone)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Every class must fit its weekly demand into the grid.
    pub fn validate_capacity(problem: &Problem) -> Result<(), CapacityExceededError> {
        let capacity = problem.slots_per_week();
        for (id, class) in problem.classes() {
            let total = problem.total_periods(id);
            if total > capacity {
                return Err(CapacityExceededError::new(class.name(), total, capacity));
            }
        }
        Ok(())
    }

    /// A teacher with zero available slots must not be demanded by any
    /// lesson, and a class with zero available slots must not have lessons.
    pub fn validate_feasibility(problem: &Problem) -> Result<(), InfeasibleByConstructionError> {
        for (_, lesson) in problem.lessons() {
            let teacher = problem.teacher(lesson.teacher());
            if teacher.available_slot_count() == 0 {
                return Err(InfeasibleByConstructionError::new(
                    format!("teacher {}", teacher.name()),
                    lesson.periods_per_week(),
                ));
            }
        }
        for (id, class) in problem.classes() {
            let total = problem.total_periods(id);
            if total > 0 && class.availability().is_empty() {
                return Err(InfeasibleByConstructionError::new(
                    format!("class {}", class.name()),
                    total,
                ));
            }
        }
        Ok(())
    }

    /// There must be something to schedule.
    pub fn validate_non_empty(problem: &Problem) -> Result<(), EmptyInputError> {
        if problem.class_count() == 0 {
            return Err(EmptyInputError::no_classes());
        }
        for (_, class) in problem.classes() {
            if class.lessons().is_empty() {
                return Err(EmptyInputError::empty_class(class.name()));
            }
        }
        Ok(())
    }

    /// Runs every check; the first failure wins.
    pub fn validate_all(problem: &Problem) -> Result<(), ValidationError> {
        Self::validate_capacity(problem)?;
        Self::validate_feasibility(problem)?;
        Self::validate_non_empty(problem)?;
        Ok(())
    }
}
