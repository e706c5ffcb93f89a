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

/// Weight of one conflict (availability violation or double-booking).
pub const CONFLICT_WEIGHT: i64 = 100;
/// Weight of one unscheduled period.
pub const UNSCHEDULED_WEIGHT: i64 = 4;
/// Weight of one empty cell strictly between occupied cells of a row.
pub const INNER_GAP_WEIGHT: i64 = 2000;
/// Weight of one class-day whose first period is free.
pub const FREE_FIRST_PERIOD_WEIGHT: i64 = 10;
/// Weight of one same-subject adjacency.
pub const ADJACENCY_WEIGHT: i64 = 1;

/// Quality counters of one schedule, plus the scalar energy the annealer
/// minimises.
///
/// Conflicts dominate the energy by two orders of magnitude, so the search
/// is feasibility-first; the remaining terms shape the soft objectives.
/// Ordering is lexicographic `(conflicts, energy)`: a schedule with fewer
/// conflicts always compares better, whatever its soft penalties.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fitness {
    pub availability_violations: usize,
    pub double_bookings: usize,
    pub unscheduled: usize,
    pub inner_gaps: usize,
    pub free_first_periods: usize,
    pub adjacency_pairs: usize,
}

impl Fitness {
    #[inline]
    pub const fn zero() -> Self {
        Self {
            availability_violations: 0,
            double_bookings: 0,
            unscheduled: 0,
            inner_gaps: 0,
            free_first_periods: 0,
            adjacency_pairs: 0,
        }
    }

    /// Availability violations plus double-bookings.
    #[inline]
    pub fn conflicts(&self) -> usize {
        self.availability_violations + self.double_bookings
    }

    #[inline]
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts() == 0
    }

    /// The scalar objective, lower is better.
    #[inline]
    pub fn energy(&self) -> i64 {
        CONFLICT_WEIGHT * self.conflicts() as i64
            + UNSCHEDULED_WEIGHT * self.unscheduled as i64
            + INNER_GAP_WEIGHT * self.inner_gaps as i64
            + FREE_FIRST_PERIOD_WEIGHT * self.free_first_periods as i64
            + ADJACENCY_WEIGHT * self.adjacency_pairs as i64
    }

    /// Nothing left to improve; the search may stop.
    #[inline]
    pub fn is_perfect(&self) -> bool {
        self.energy() == 0
    }

    /// Same-subject adjacencies cost half a point each in reports.
    #[inline]
    pub fn adjacency_penalty(&self) -> f64 {
        self.adjacency_pairs as f64 * 0.5
    }

    /// Reported penalty for empty cells enclosed by occupied ones. Always
    /// zero for a compact schedule.
    #[inline]
    pub fn empty_space_penalty(&self) -> i64 {
        1000 * self.inner_gaps as i64
    }
}

impl std::fmt::Display for Fitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fitness(conflicts: {}, unscheduled: {}, energy: {})",
            self.conflicts(),
            self.unscheduled,
            self.energy()
        )
    }
}

impl Ord for Fitness {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.conflicts().cmp(&other.conflicts()) {
            std::cmp::Ordering::Equal => self.energy().cmp(&other.energy()),
            ord => ord,
        }
    }
}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
