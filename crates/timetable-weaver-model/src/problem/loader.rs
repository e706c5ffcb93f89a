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

//! Reads persisted timetable configurations.
//!
//! The on-disk layout is JSON:
//!
//! ```json
//! {
//!   "days": 5,
//!   "periods_per_day": 6,
//!   "teachers": [
//!     {"name": "Alice", "availability": {"days": 5, "periods_per_day": 6, "buffer": [63, 63, 63, 63, 63]}}
//!   ],
//!   "classes": [
//!     {"name": "1a", "lessons": [{"name": "Math", "teacher_name": "Alice", "periods_per_week": 3}]}
//!   ]
//! }
//! ```
//!
//! The optional class-level `availability` defaults to fully available.
//! Malformed availability buffers are rejected during deserialisation.

use crate::problem::{
    builder::{ClassSpec, LessonSpec, ProblemBuilder},
    err::ProblemError,
    prob::Problem,
    teacher::Teacher,
};
use serde::Deserialize;
use std::{io::Read, path::Path};
use timetable_weaver_core::prelude::SlotSet;

#[derive(Debug, Deserialize)]
struct TeacherRecord {
    name: String,
    availability: SlotSet,
}

#[derive(Debug, Deserialize)]
struct LessonRecord {
    name: String,
    teacher_name: String,
    periods_per_week: usize,
}

#[derive(Debug, Deserialize)]
struct ClassRecord {
    name: String,
    #[serde(default)]
    availability: Option<SlotSet>,
    lessons: Vec<LessonRecord>,
}

#[derive(Debug, Deserialize)]
struct ConfigRecord {
    days: usize,
    periods_per_day: usize,
    teachers: Vec<TeacherRecord>,
    classes: Vec<ClassRecord>,
}

#[derive(Debug)]
pub enum ProblemLoaderError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Problem(ProblemError),
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ProblemLoaderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ProblemLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Json(e) => write!(f, "JSON error: {e}"),
            Problem(e) => write!(f, "problem error: {e}"),
        }
    }
}

impl std::error::Error for ProblemLoaderError {}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemLoader;

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_str(&self, json: &str) -> Result<Problem, ProblemLoaderError> {
        let record: ConfigRecord = serde_json::from_str(json)?;
        Ok(Self::assemble(record)?)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Problem, ProblemLoaderError> {
        let record: ConfigRecord = serde_json::from_reader(reader)?;
        Ok(Self::assemble(record)?)
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Problem, ProblemLoaderError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(std::io::BufReader::new(file))
    }

    fn assemble(record: ConfigRecord) -> Result<Problem, ProblemError> {
        ProblemBuilder::new(record.days, record.periods_per_day)
            .with_teachers(
                record
                    .teachers
                    .into_iter()
                    .map(|t| Teacher::new(t.name, t.availability)),
            )
            .with_classes(record.classes.into_iter().map(|c| {
                let mut spec = ClassSpec::new(c.name).with_lessons(
                    c.lessons
                        .into_iter()
                        .map(|l| LessonSpec::new(l.name, l.teacher_name, l.periods_per_week)),
                );
                if let Some(av) = c.availability {
                    spec = spec.with_availability(av);
                }
                spec
            }))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"{
        "days": 2,
        "periods_per_day": 3,
        "teachers": [
            {"name": "Alice", "availability": {"days": 2, "periods_per_day": 3, "buffer": [7, 7]}},
            {"name": "Bob", "availability": {"days": 2, "periods_per_day": 3, "buffer": [1, 0]}}
        ],
        "classes": [
            {"name": "1a", "lessons": [
                {"name": "Math", "teacher_name": "Alice", "periods_per_week": 2},
                {"name": "English", "teacher_name": "Bob", "periods_per_week": 1}
            ]}
        ]
    }"#;

    #[test]
    fn test_loads_documented_layout() {
        let p = ProblemLoader::new().from_str(DEMO).unwrap();
        assert_eq!(p.days(), 2);
        assert_eq!(p.periods_per_day(), 3);
        assert_eq!(p.teacher_count(), 2);
        assert_eq!(p.class_count(), 1);
        assert_eq!(p.lesson_count(), 2);

        let bob = p.teacher_index("Bob").unwrap();
        assert_eq!(p.teacher(bob).available_slot_count(), 1);
        assert!(p.teacher(bob).is_available_at(0, 0));

        let (c0, class) = p.classes().next().unwrap();
        assert_eq!(p.total_periods(c0), 3);
        // No class availability given: defaults to fully available.
        assert_eq!(class.availability().count(), 6);
    }

    #[test]
    fn test_class_availability_is_honoured() {
        let json = r#"{
            "days": 1, "periods_per_day": 2,
            "teachers": [{"name": "T", "availability": {"days": 1, "periods_per_day": 2, "buffer": [3]}}],
            "classes": [{"name": "1a",
                "availability": {"days": 1, "periods_per_day": 2, "buffer": [1]},
                "lessons": [{"name": "X", "teacher_name": "T", "periods_per_week": 1}]}]
        }"#;
        let p = ProblemLoader::new().from_str(json).unwrap();
        let (_, class) = p.classes().next().unwrap();
        assert!(class.is_available_at(0, 0));
        assert!(!class.is_available_at(0, 1));
    }

    #[test]
    fn test_rejects_malformed_availability() {
        // Bit 3 is outside periods_per_day = 2.
        let json = r#"{
            "days": 1, "periods_per_day": 2,
            "teachers": [{"name": "T", "availability": {"days": 1, "periods_per_day": 2, "buffer": [8]}}],
            "classes": []
        }"#;
        let err = ProblemLoader::new().from_str(json).unwrap_err();
        assert!(matches!(err, ProblemLoaderError::Json(_)), "{err}");
    }

    #[test]
    fn test_surfaces_builder_errors() {
        let json = r#"{
            "days": 1, "periods_per_day": 2,
            "teachers": [],
            "classes": [{"name": "1a", "lessons": [{"name": "X", "teacher_name": "Ghost", "periods_per_week": 1}]}]
        }"#;
        let err = ProblemLoader::new().from_str(json).unwrap_err();
        assert!(matches!(
            err,
            ProblemLoaderError::Problem(ProblemError::UnknownTeacher(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ProblemLoader::new()
            .from_path("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::Io(_)));
    }
}
