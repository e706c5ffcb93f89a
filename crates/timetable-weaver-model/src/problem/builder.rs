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
    err::{
        AvailabilityShapeMismatchError, DuplicateClassNameError, DuplicateTeacherNameError,
        OutOfRangeDimensionError, ProblemError, UnknownTeacherError, ZeroPeriodLessonError,
    },
    prob::Problem,
    teacher::{Teacher, TeacherIdentifier},
};
use std::collections::{HashMap, HashSet};
use timetable_weaver_core::prelude::{MAX_DAYS, MAX_PERIODS, SlotSet};

/// Declares one lesson of a class before teacher names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSpec {
    subject: String,
    teacher_name: String,
    periods_per_week: usize,
}

impl LessonSpec {
    #[inline]
    pub fn new(
        subject: impl Into<String>,
        teacher_name: impl Into<String>,
        periods_per_week: usize,
    ) -> Self {
        Self {
            subject: subject.into(),
            teacher_name: teacher_name.into(),
            periods_per_week,
        }
    }

    #[inline]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[inline]
    pub fn teacher_name(&self) -> &str {
        &self.teacher_name
    }

    #[inline]
    pub fn periods_per_week(&self) -> usize {
        self.periods_per_week
    }
}

/// Declares one class before the problem is assembled. Availability defaults
/// to fully available when not set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    name: String,
    availability: Option<SlotSet>,
    lessons: Vec<LessonSpec>,
}

impl ClassSpec {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            availability: None,
            lessons: Vec::new(),
        }
    }

    #[inline]
    pub fn with_availability(mut self, availability: SlotSet) -> Self {
        self.availability = Some(availability);
        self
    }

    #[inline]
    pub fn with_lesson(mut self, lesson: LessonSpec) -> Self {
        self.lessons.push(lesson);
        self
    }

    #[inline]
    pub fn with_lessons<I>(mut self, lessons: I) -> Self
    where
        I: IntoIterator<Item = LessonSpec>,
    {
        self.lessons.clear();
        self.lessons.extend(lessons);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    days: usize,
    periods_per_day: usize,
    teachers: Vec<Teacher>,
    classes: Vec<ClassSpec>,
}

impl ProblemBuilder {
    #[inline]
    pub fn new(days: usize, periods_per_day: usize) -> Self {
        Self {
            days,
            periods_per_day,
            teachers: Vec::new(),
            classes: Vec::new(),
        }
    }

    #[inline]
    pub fn with_teachers<I>(mut self, teachers: I) -> Self
    where
        I: IntoIterator<Item = Teacher>,
    {
        self.teachers.clear();
        self.teachers.extend(teachers);
        self
    }

    #[inline]
    pub fn add_teacher(&mut self, teacher: Teacher) -> &mut Self {
        self.teachers.push(teacher);
        self
    }

    #[inline]
    pub fn with_classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = ClassSpec>,
    {
        self.classes.clear();
        self.classes.extend(classes);
        self
    }

    #[inline]
    pub fn add_class(&mut self, class: ClassSpec) -> &mut Self {
        self.classes.push(class);
        self
    }

    /// Resolves teacher names, checks the structural invariants and
    /// assembles the immutable [`Problem`].
    pub fn build(self) -> Result<Problem, ProblemError> {
        if !(1..=MAX_DAYS).contains(&self.days)
            || !(1..=MAX_PERIODS).contains(&self.periods_per_day)
        {
            return Err(OutOfRangeDimensionError::new(self.days, self.periods_per_day).into());
        }

        let shape = (self.days, self.periods_per_day);
        let mut teacher_index: HashMap<String, TeacherIdentifier> =
            HashMap::with_capacity(self.teachers.len());
        for (i, teacher) in self.teachers.iter().enumerate() {
            let av = teacher.availability();
            if (av.days(), av.periods_per_day()) != shape {
                return Err(AvailabilityShapeMismatchError::new(
                    teacher.name(),
                    shape,
                    (av.days(), av.periods_per_day()),
                )
                .into());
            }
            if teacher_index
                .insert(teacher.name().to_string(), TeacherIdentifier::new(i))
                .is_some()
            {
                return Err(DuplicateTeacherNameError::new(teacher.name()).into());
            }
        }

        let mut classes: Vec<Class> = Vec::with_capacity(self.classes.len());
        let mut lessons: Vec<Lesson> = Vec::new();
        let mut seen_class_names: HashSet<String> = HashSet::with_capacity(self.classes.len());

        for (ci, spec) in self.classes.into_iter().enumerate() {
            if !seen_class_names.insert(spec.name.clone()) {
                return Err(DuplicateClassNameError::new(spec.name).into());
            }

            let availability = match spec.availability {
                Some(av) => {
                    if (av.days(), av.periods_per_day()) != shape {
                        return Err(AvailabilityShapeMismatchError::new(
                            &spec.name,
                            shape,
                            (av.days(), av.periods_per_day()),
                        )
                        .into());
                    }
                    av
                }
                None => SlotSet::full(self.days, self.periods_per_day),
            };

            let class_id = ClassIdentifier::new(ci);
            let mut class = Class::new(spec.name, availability);
            for lesson_spec in spec.lessons {
                if lesson_spec.periods_per_week == 0 {
                    return Err(
                        ZeroPeriodLessonError::new(class.name(), lesson_spec.subject).into()
                    );
                }
                let Some(&teacher_id) = teacher_index.get(lesson_spec.teacher_name.as_str())
                else {
                    return Err(UnknownTeacherError::new(
                        class.name(),
                        lesson_spec.subject,
                        lesson_spec.teacher_name,
                    )
                    .into());
                };
                let lesson_id = LessonIdentifier::new(lessons.len());
                lessons.push(Lesson::new(
                    lesson_spec.subject,
                    teacher_id,
                    class_id,
                    lesson_spec.periods_per_week,
                ));
                class.push_lesson(lesson_id);
            }
            classes.push(class);
        }

        Ok(Problem::from_parts(
            self.days,
            self.periods_per_day,
            self.teachers,
            classes,
            lessons,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn full(d: usize, p: usize) -> SlotSet {
        SlotSet::full(d, p)
    }

    #[test]
    fn test_build_resolves_teacher_names() {
        let p = ProblemBuilder::new(5, 6)
            .with_teachers([
                Teacher::new("Alice", full(5, 6)),
                Teacher::new("Bob", full(5, 6)),
            ])
            .with_classes([ClassSpec::new("1a")
                .with_lesson(LessonSpec::new("Math", "Bob", 2))])
            .build()
            .unwrap();

        let (_, lesson) = p.lessons().next().unwrap();
        assert_eq!(p.teacher(lesson.teacher()).name(), "Bob");
        assert_eq!(lesson.periods_per_week(), 2);
    }

    #[test]
    fn test_build_rejects_unknown_teacher() {
        let err = ProblemBuilder::new(5, 6)
            .with_teachers([Teacher::new("Alice", full(5, 6))])
            .with_classes([ClassSpec::new("1a")
                .with_lesson(LessonSpec::new("Math", "Mallory", 1))])
            .build()
            .unwrap_err();
        assert!(matches!(err, ProblemError::UnknownTeacher(_)), "{err}");
    }

    #[test]
    fn test_build_rejects_out_of_range_dimensions() {
        let err = ProblemBuilder::new(8, 6).build().unwrap_err();
        assert!(matches!(err, ProblemError::OutOfRangeDimension(_)), "{err}");

        let err = ProblemBuilder::new(5, 0).build().unwrap_err();
        assert!(matches!(err, ProblemError::OutOfRangeDimension(_)), "{err}");
    }

    #[test]
    fn test_build_rejects_duplicate_names() {
        let err = ProblemBuilder::new(5, 6)
            .with_teachers([
                Teacher::new("Alice", full(5, 6)),
                Teacher::new("Alice", full(5, 6)),
            ])
            .build()
            .unwrap_err();
        assert!(matches!(err, ProblemError::DuplicateTeacherName(_)), "{err}");

        let err = ProblemBuilder::new(5, 6)
            .with_classes([ClassSpec::new("1a"), ClassSpec::new("1a")])
            .build()
            .unwrap_err();
        assert!(matches!(err, ProblemError::DuplicateClassName(_)), "{err}");
    }

    #[test]
    fn test_build_rejects_zero_period_lesson() {
        let err = ProblemBuilder::new(5, 6)
            .with_teachers([Teacher::new("Alice", full(5, 6))])
            .with_classes([ClassSpec::new("1a")
                .with_lesson(LessonSpec::new("Math", "Alice", 0))])
            .build()
            .unwrap_err();
        assert!(matches!(err, ProblemError::ZeroPeriodLesson(_)), "{err}");
    }

    #[test]
    fn test_build_rejects_mismatched_availability_shape() {
        let err = ProblemBuilder::new(5, 6)
            .with_teachers([Teacher::new("Alice", full(4, 6))])
            .build()
            .unwrap_err();
        assert!(matches!(err, ProblemError::AvailabilityShapeMismatch(_)), "{err}");

        let err = ProblemBuilder::new(5, 6)
            .with_teachers([Teacher::new("Alice", full(5, 6))])
            .with_classes([ClassSpec::new("1a").with_availability(full(5, 5))])
            .build()
            .unwrap_err();
        assert!(matches!(err, ProblemError::AvailabilityShapeMismatch(_)), "{err}");
    }

    #[test]
    fn test_class_availability_defaults_to_full() {
        let p = ProblemBuilder::new(2, 3)
            .with_classes([ClassSpec::new("1a")])
            .build()
            .unwrap();
        let (_, class) = p.classes().next().unwrap();
        assert_eq!(class.availability().count(), 6);
    }
}
