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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutOfRangeDimensionError {
    days: usize,
    periods_per_day: usize,
}

impl OutOfRangeDimensionError {
    pub fn new(days: usize, periods_per_day: usize) -> Self {
        Self { days, periods_per_day }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn periods_per_day(&self) -> usize {
        self.periods_per_day
    }
}

impl std::fmt::Display for OutOfRangeDimensionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "grid dimensions out of range: {} days, {} periods per day (expected 1..=7 and 1..=32)",
            self.days, self.periods_per_day
        )
    }
}

impl std::error::Error for OutOfRangeDimensionError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownTeacherError {
    class: String,
    subject: String,
    teacher_name: String,
}

impl UnknownTeacherError {
    pub fn new(
        class: impl Into<String>,
        subject: impl Into<String>,
        teacher_name: impl Into<String>,
    ) -> Self {
        Self {
            class: class.into(),
            subject: subject.into(),
            teacher_name: teacher_name.into(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn teacher_name(&self) -> &str {
        &self.teacher_name
    }
}

impl std::fmt::Display for UnknownTeacherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lesson {} of class {} references unknown teacher {}",
            self.subject, self.class, self.teacher_name
        )
    }
}

impl std::error::Error for UnknownTeacherError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateTeacherNameError {
    name: String,
}

impl DuplicateTeacherNameError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for DuplicateTeacherNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "teacher name {} is not unique", self.name)
    }
}

impl std::error::Error for DuplicateTeacherNameError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateClassNameError {
    name: String,
}

impl DuplicateClassNameError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for DuplicateClassNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class name {} is not unique", self.name)
    }
}

impl std::error::Error for DuplicateClassNameError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZeroPeriodLessonError {
    class: String,
    subject: String,
}

impl ZeroPeriodLessonError {
    pub fn new(class: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            subject: subject.into(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl std::fmt::Display for ZeroPeriodLessonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lesson {} of class {} requests zero periods per week",
            self.subject, self.class
        )
    }
}

impl std::error::Error for ZeroPeriodLessonError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityShapeMismatchError {
    entity: String,
    expected: (usize, usize),
    found: (usize, usize),
}

impl AvailabilityShapeMismatchError {
    pub fn new(entity: impl Into<String>, expected: (usize, usize), found: (usize, usize)) -> Self {
        Self {
            entity: entity.into(),
            expected,
            found,
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn expected(&self) -> (usize, usize) {
        self.expected
    }

    pub fn found(&self) -> (usize, usize) {
        self.found
    }
}

impl std::fmt::Display for AvailabilityShapeMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "availability of {} spans {}x{} but the problem grid is {}x{}",
            self.entity, self.found.0, self.found.1, self.expected.0, self.expected.1
        )
    }
}

impl std::error::Error for AvailabilityShapeMismatchError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProblemError {
    OutOfRangeDimension(OutOfRangeDimensionError),
    UnknownTeacher(UnknownTeacherError),
    DuplicateTeacherName(DuplicateTeacherNameError),
    DuplicateClassName(DuplicateClassNameError),
    ZeroPeriodLesson(ZeroPeriodLessonError),
    AvailabilityShapeMismatch(AvailabilityShapeMismatchError),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::OutOfRangeDimension(e) => write!(f, "{}", e),
            ProblemError::UnknownTeacher(e) => write!(f, "{}", e),
            ProblemError::DuplicateTeacherName(e) => write!(f, "{}", e),
            ProblemError::DuplicateClassName(e) => write!(f, "{}", e),
            ProblemError::ZeroPeriodLesson(e) => write!(f, "{}", e),
            ProblemError::AvailabilityShapeMismatch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<OutOfRangeDimensionError> for ProblemError {
    fn from(err: OutOfRangeDimensionError) -> Self {
        ProblemError::OutOfRangeDimension(err)
    }
}

impl From<UnknownTeacherError> for ProblemError {
    fn from(err: UnknownTeacherError) -> Self {
        ProblemError::UnknownTeacher(err)
    }
}

impl From<DuplicateTeacherNameError> for ProblemError {
    fn from(err: DuplicateTeacherNameError) -> Self {
        ProblemError::DuplicateTeacherName(err)
    }
}

impl From<DuplicateClassNameError> for ProblemError {
    fn from(err: DuplicateClassNameError) -> Self {
        ProblemError::DuplicateClassName(err)
    }
}

impl From<ZeroPeriodLessonError> for ProblemError {
    fn from(err: ZeroPeriodLessonError) -> Self {
        ProblemError::ZeroPeriodLesson(err)
    }
}

impl From<AvailabilityShapeMismatchError> for ProblemError {
    fn from(err: AvailabilityShapeMismatchError) -> Self {
        ProblemError::AvailabilityShapeMismatch(err)
    }
}
