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

use crate::problem::{ClassIdentifier, LessonIdentifier, Problem};
use timetable_weaver_core::prelude::Slot;

/// A candidate timetable: one `days × periods_per_day` grid of optional
/// lesson references per class.
///
/// Cells hold arena identifiers only, so cloning a schedule is a flat copy
/// of `class_count * days * periods_per_day` words, cheap enough to do once
/// per search step.
///
/// The search keeps every schedule it evaluates *gap-free*: within each
/// `(class, day)` row the occupied cells form a prefix. [`Schedule::compact`]
/// restores that form after any mutation that may have violated it and
/// [`Schedule::validate_no_gaps`] checks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    days: usize,
    periods_per_day: usize,
    grids: Vec<Vec<Option<LessonIdentifier>>>,
}

impl Schedule {
    /// An all-empty schedule shaped after `problem`.
    #[must_use]
    pub fn empty(problem: &Problem) -> Self {
        Self {
            days: problem.days(),
            periods_per_day: problem.periods_per_day(),
            grids: vec![
                vec![None; problem.days() * problem.periods_per_day()];
                problem.class_count()
            ],
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

    #[inline]
    pub fn class_count(&self) -> usize {
        self.grids.len()
    }

    #[inline]
    fn cell_index(&self, day: usize, period: usize) -> usize {
        debug_assert!(day < self.days && period < self.periods_per_day);
        day * self.periods_per_day + period
    }

    /// # Panics
    ///
    /// Panics if `class`, `day` or `period` is out of range.
    #[inline]
    pub fn get(&self, class: ClassIdentifier, day: usize, period: usize) -> Option<LessonIdentifier> {
        self.grids[class.get()][self.cell_index(day, period)]
    }

    /// # Panics
    ///
    /// Panics if `class`, `day` or `period` is out of range.
    #[inline]
    pub fn set(
        &mut self,
        class: ClassIdentifier,
        day: usize,
        period: usize,
        lesson: Option<LessonIdentifier>,
    ) {
        let idx = self.cell_index(day, period);
        self.grids[class.get()][idx] = lesson;
    }

    /// Clears a cell and returns what it held.
    ///
    /// # Panics
    ///
    /// Panics if `class`, `day` or `period` is out of range.
    #[inline]
    pub fn take(&mut self, class: ClassIdentifier, day: usize, period: usize) -> Option<LessonIdentifier> {
        let idx = self.cell_index(day, period);
        self.grids[class.get()][idx].take()
    }

    /// One `(class, day)` row as a slice of `periods_per_day` cells.
    ///
    /// # Panics
    ///
    /// Panics if `class` or `day` is out of range.
    #[inline]
    pub fn row(&self, class: ClassIdentifier, day: usize) -> &[Option<LessonIdentifier>] {
        let start = self.cell_index(day, 0);
        &self.grids[class.get()][start..start + self.periods_per_day]
    }

    /// Number of occupied cells of one class.
    pub fn occupied_count(&self, class: ClassIdentifier) -> usize {
        self.grids[class.get()].iter().filter(|c| c.is_some()).count()
    }

    /// Index of the first occupied period in a row, if any.
    pub fn first_occupied(&self, class: ClassIdentifier, day: usize) -> Option<usize> {
        self.row(class, day).iter().position(|c| c.is_some())
    }

    /// Index of the last occupied period in a row, if any.
    pub fn last_occupied(&self, class: ClassIdentifier, day: usize) -> Option<usize> {
        self.row(class, day).iter().rposition(|c| c.is_some())
    }

    /// All occupied cells in `(class, day, period)` order.
    pub fn iter_occupied(
        &self,
    ) -> impl Iterator<Item = (ClassIdentifier, Slot, LessonIdentifier)> + '_ {
        self.grids.iter().enumerate().flat_map(move |(ci, grid)| {
            let class = ClassIdentifier::new(ci);
            grid.iter().enumerate().filter_map(move |(idx, cell)| {
                cell.map(|lesson| {
                    (
                        class,
                        Slot::new(idx / self.periods_per_day, idx % self.periods_per_day),
                        lesson,
                    )
                })
            })
        })
    }

    /// Slides the occupied cells of every row onto its prefix, keeping their
    /// within-day order. Lessons never move across days; the multiset of
    /// lessons per row is preserved. Idempotent.
    pub fn compact(&mut self) {
        for grid in &mut self.grids {
            for day in 0..self.days {
                let start = day * self.periods_per_day;
                let row = &mut grid[start..start + self.periods_per_day];
                let mut write = 0;
                for read in 0..row.len() {
                    if row[read].is_some() {
                        row.swap(read, write);
                        write += 1;
                    }
                }
            }
        }
    }

    /// True iff every `(class, day)` row has its occupied cells in a prefix.
    #[must_use]
    pub fn validate_no_gaps(&self) -> bool {
        for ci in 0..self.grids.len() {
            for day in 0..self.days {
                let mut seen_empty = false;
                for cell in self.row(ClassIdentifier::new(ci), day) {
                    match cell {
                        Some(_) if seen_empty => return false,
                        Some(_) => {}
                        None => seen_empty = true,
                    }
                }
            }
        }
        true
    }
}
