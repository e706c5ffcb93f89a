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

use crate::common::{Identifier, IdentifierMarkerName};
use crate::problem::teacher::TeacherIdentifier;
use timetable_weaver_core::prelude::SlotSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassIdentifierMarker;

impl IdentifierMarkerName for ClassIdentifierMarker {
    const NAME: &'static str = "ClassId";
}

pub type ClassIdentifier = Identifier<usize, ClassIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LessonIdentifierMarker;

impl IdentifierMarkerName for LessonIdentifierMarker {
    const NAME: &'static str = "LessonId";
}

pub type LessonIdentifier = Identifier<usize, LessonIdentifierMarker>;

/// One subject taught by one teacher to one class, a fixed number of
/// periods per week. Immutable once the problem is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    subject: String,
    teacher: TeacherIdentifier,
    class: ClassIdentifier,
    periods_per_week: usize,
}

impl Lesson {
    /// # Panics
    ///
    /// Panics if `periods_per_week` is zero; the builder rejects such input
    /// before lessons are constructed.
    #[inline]
    pub fn new(
        subject: impl Into<String>,
        teacher: TeacherIdentifier,
        class: ClassIdentifier,
        periods_per_week: usize,
    ) -> Self {
        assert!(periods_per_week >= 1, "a lesson must occupy at least one period per week");
        Self {
            subject: subject.into(),
            teacher,
            class,
            periods_per_week,
        }
    }

    #[inline]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[inline]
    pub fn teacher(&self) -> TeacherIdentifier {
        self.teacher
    }

    #[inline]
    pub fn class(&self) -> ClassIdentifier {
        self.class
    }

    #[inline]
    pub fn periods_per_week(&self) -> usize {
        self.periods_per_week
    }
}

/// A class: a name, the slots the class may be taught in, and the lessons it
/// must receive each week. Lesson bodies live in the problem's arena; the
/// class holds their identifiers in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    name: String,
    availability: SlotSet,
    lessons: Vec<LessonIdentifier>,
}

impl Class {
    #[inline]
    pub fn new(name: impl Into<String>, availability: SlotSet) -> Self {
        Self {
            name: name.into(),
            availability,
            lessons: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn availability(&self) -> &SlotSet {
        &self.availability
    }

    /// # Panics
    ///
    /// Panics if `day` or `period` is outside the availability grid.
    #[inline]
    pub fn is_available_at(&self, day: usize, period: usize) -> bool {
        self.availability.get(day, period)
    }

    #[inline]
    pub fn lessons(&self) -> &[LessonIdentifier] {
        &self.lessons
    }

    #[inline]
    pub(crate) fn push_lesson(&mut self, lesson: LessonIdentifier) {
        self.lessons.push(lesson);
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Class({}, {} lessons)", self.name, self.lessons.len())
    }
}
