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

use crate::problem::{
    class::{Class, ClassIdentifier, Lesson, LessonIdentifier},
    teacher::{Teacher, TeacherIdentifier},
};

/// An immutable timetabling configuration: the grid dimensions plus the
/// teacher, class and lesson arenas. All cross-references are arena indices,
/// so schedules can refer to lessons by a plain identifier and cloning a
/// schedule never touches entity data.
///
/// Construction goes through [`ProblemBuilder`](crate::problem::ProblemBuilder),
/// which resolves teacher names and checks the structural invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    days: usize,
    periods_per_day: usize,
    teachers: Vec<Teacher>,
    classes: Vec<Class>,
    lessons: Vec<Lesson>,
}

impl Problem {
    pub(crate) fn from_parts(
        days: usize,
        periods_per_day: usize,
        teachers: Vec<Teacher>,
        classes: Vec<Class>,
        lessons: Vec<Lesson>,
    ) -> Self {
        Self {
            days,
            periods_per_day,
            teachers,
            classes,
            lessons,
        }
    }

    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    #[inline]
    pub fn periods_per_day(&self) -> usize {
        self.periods_per_day
    }

    /// Number of cells available to each class per week.
    #[inline]
    pub fn slots_per_week(&self) -> usize {
        self.days * self.periods_per_day
    }

    #[inline]
    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }

    #[inline]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this problem.
    #[inline]
    pub fn teacher(&self, id: TeacherIdentifier) -> &Teacher {
        &self.teachers[id.get()]
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this problem.
    #[inline]
    pub fn class(&self, id: ClassIdentifier) -> &Class {
        &self.classes[id.get()]
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this problem.
    #[inline]
    pub fn lesson(&self, id: LessonIdentifier) -> &Lesson {
        &self.lessons[id.get()]
    }

    #[inline]
    pub fn teachers(&self) -> impl Iterator<Item = (TeacherIdentifier, &Teacher)> {
        self.teachers
            .iter()
            .enumerate()
            .map(|(i, t)| (TeacherIdentifier::new(i), t))
    }

    #[inline]
    pub fn classes(&self) -> impl Iterator<Item = (ClassIdentifier, &Class)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassIdentifier::new(i), c))
    }

    #[inline]
    pub fn lessons(&self) -> impl Iterator<Item = (LessonIdentifier, &Lesson)> {
        self.lessons
            .iter()
            .enumerate()
            .map(|(i, l)| (LessonIdentifier::new(i), l))
    }

    /// Lessons of one class, in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this problem.
    pub fn class_lessons(
        &self,
        id: ClassIdentifier,
    ) -> impl Iterator<Item = (LessonIdentifier, &Lesson)> {
        self.classes[id.get()]
            .lessons()
            .iter()
            .map(|&lid| (lid, &self.lessons[lid.get()]))
    }

    /// Total periods per week demanded by one class.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this problem.
    pub fn total_periods(&self, id: ClassIdentifier) -> usize {
        self.class_lessons(id).map(|(_, l)| l.periods_per_week()).sum()
    }

    /// Resolves a teacher name to its arena identifier.
    pub fn teacher_index(&self, name: &str) -> Option<TeacherIdentifier> {
        self.teachers
            .iter()
            .position(|t| t.name() == name)
            .map(TeacherIdentifier::new)
    }
}
