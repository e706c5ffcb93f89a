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

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapacityExceededError {
    class: String,
    total_periods: usize,
    capacity: usize,
}

impl CapacityExceededError {
    pub fn new(class: impl Into<String>, total_periods: usize, capacity: usize) -> Self {
        Self {
            class: class.into(),
            total_periods,
            capacity,
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn total_periods(&self) -> usize {
        self.total_periods
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Display for CapacityExceededError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "class {} demands {} periods per week but the grid only has {} cells",
            self.class, self.total_periods, self.capacity
        )
    }
}

impl std::error::Error for CapacityExceededError {}

/// An entity (teacher or class) has zero available slots while lessons
/// depend on it, so no schedule can ever place those lessons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InfeasibleByConstructionError {
    name: String,
    required_periods: usize,
}

impl InfeasibleByConstructionError {
    pub fn new(name: impl Into<String>, required_periods: usize) -> Self {
        Self {
            name: name.into(),
            required_periods,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required_periods(&self) -> usize {
        self.required_periods
    }
}

impl std::fmt::Display for InfeasibleByConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has no available slots but {} period(s) must be scheduled with them",
            self.name, self.required_periods
        )
    }
}

impl std::error::Error for InfeasibleByConstructionError {}

/// No classes at all, or a class without lessons. Advisory: callers may
/// prefer to treat this as an empty but successful run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmptyInputError {
    class: Option<String>,
}

impl EmptyInputError {
    pub fn no_classes() -> Self {
        Self { class: None }
    }

    pub fn empty_class(name: impl Into<String>) -> Self {
        Self {
            class: Some(name.into()),
        }
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

impl std::fmt::Display for EmptyInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.class {
            Some(name) => write!(f, "class {name} has no lessons"),
            None => write!(f, "the configuration contains no classes"),
        }
    }
}

impl std::error::Error for EmptyInputError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationError {
    CapacityExceeded(CapacityExceededError),
    InfeasibleByConstruction(InfeasibleByConstructionError),
    EmptyInput(EmptyInputError),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::CapacityExceeded(e) => write!(f, "{}", e),
            ValidationError::InfeasibleByConstruction(e) => write!(f, "{}", e),
            ValidationError::EmptyInput(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<CapacityExceededError> for ValidationError {
    fn from(err: CapacityExceededError) -> Self {
        ValidationError::CapacityExceeded(err)
    }
}

impl From<InfeasibleByConstructionError> for ValidationError {
    fn from(err: InfeasibleByConstructionError) -> Self {
        ValidationError::InfeasibleByConstruction(err)
    }
}

impl From<EmptyInputError> for ValidationError {
    fn from(err: EmptyInputError) -> Self {
        ValidationError::EmptyInput(err)
    }
}
