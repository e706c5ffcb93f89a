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

use crate::primitives::slot::Slot;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upper bound on the number of days in a week grid.
pub const MAX_DAYS: usize = 7;
/// Upper bound on the number of periods per day (one bit per period in a `u32`).
pub const MAX_PERIODS: usize = 32;

/// A bit-packed set of `(day, period)` slots over a fixed `days × periods_per_day`
/// grid, one `u32` word per day and one bit per period.
///
/// The representation is load-bearing: membership tests are a single mask
/// operation and iterating a day is a walk over one word. Bits at or above
/// `periods_per_day` in any word are always zero; every mutating operation
/// maintains this, and deserialisation rejects inputs that violate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotSet {
    days: usize,
    periods_per_day: usize,
    buffer: Vec<u32>,
}

impl SlotSet {
    /// Creates a set with no available slots.
    ///
    /// # Panics
    ///
    /// Panics if `days` is not in `1..=7` or `periods_per_day` is not in `1..=32`.
    #[must_use]
    pub fn empty(days: usize, periods_per_day: usize) -> Self {
        assert!(
            (1..=MAX_DAYS).contains(&days),
            "days must be in 1..={MAX_DAYS}, got {days}"
        );
        assert!(
            (1..=MAX_PERIODS).contains(&periods_per_day),
            "periods_per_day must be in 1..={MAX_PERIODS}, got {periods_per_day}"
        );
        Self {
            days,
            periods_per_day,
            buffer: vec![0; days],
        }
    }

    /// Creates a set with every slot available.
    ///
    /// # Panics
    ///
    /// Panics under the same dimension bounds as [`SlotSet::empty`].
    #[must_use]
    pub fn full(days: usize, periods_per_day: usize) -> Self {
        let mut s = Self::empty(days, periods_per_day);
        for d in 0..days {
            s.set_day(d, true);
        }
        s
    }

    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    #[inline]
    pub fn periods_per_day(&self) -> usize {
        self.periods_per_day
    }

    /// Mask covering the low `periods_per_day` bits of a day word.
    #[inline]
    fn day_mask(&self) -> u32 {
        if self.periods_per_day == MAX_PERIODS {
            u32::MAX
        } else {
            (1u32 << self.periods_per_day) - 1
        }
    }

    #[inline]
    fn check_day(&self, day: usize) {
        assert!(day < self.days, "day index {day} out of range ({} days)", self.days);
    }

    #[inline]
    fn check_slot(&self, day: usize, period: usize) {
        self.check_day(day);
        assert!(
            period < self.periods_per_day,
            "period index {period} out of range ({} periods per day)",
            self.periods_per_day
        );
    }

    /// # Panics
    ///
    /// Panics if `day` or `period` is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, day: usize, period: usize) -> bool {
        self.check_slot(day, period);
        self.buffer[day] & (1 << period) != 0
    }

    /// # Panics
    ///
    /// Panics if `day` or `period` is out of range.
    #[inline]
    pub fn set(&mut self, day: usize, period: usize, value: bool) {
        self.check_slot(day, period);
        let mask = 1u32 << period;
        if value {
            self.buffer[day] |= mask;
        } else {
            self.buffer[day] &= !mask;
        }
    }

    /// # Panics
    ///
    /// Panics if `day` or `period` is out of range.
    #[inline]
    pub fn toggle(&mut self, day: usize, period: usize) {
        self.check_slot(day, period);
        self.buffer[day] ^= 1 << period;
    }

    /// Sets or clears every period of one day.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range.
    #[inline]
    pub fn set_day(&mut self, day: usize, value: bool) {
        self.check_day(day);
        self.buffer[day] = if value { self.day_mask() } else { 0 };
    }

    /// Inverts every period of one day.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range.
    #[inline]
    pub fn toggle_day(&mut self, day: usize) {
        self.check_day(day);
        self.buffer[day] ^= self.day_mask();
    }

    /// Raw word for one day; bit `p` is period `p`.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range.
    #[inline]
    #[must_use]
    pub fn day_word(&self, day: usize) -> u32 {
        self.check_day(day);
        self.buffer[day]
    }

    /// Total number of available slots.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.buffer.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.iter().all(|&w| w == 0)
    }

    /// Iterates the available slots in `(day, period)` order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.days).flat_map(move |d| {
            let word = self.buffer[d];
            (0..self.periods_per_day)
                .filter(move |p| word & (1 << p) != 0)
                .map(move |p| Slot::new(d, p))
        })
    }
}

impl std::fmt::Display for SlotSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for day in 0..self.days {
            write!(f, "Day {day}:")?;
            for period in 0..self.periods_per_day {
                write!(f, " {}", u8::from(self.get(day, period)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Persisted wire shape of a [`SlotSet`]: `{days, periods_per_day, buffer}`.
#[derive(Debug, Serialize, Deserialize)]
struct SlotSetLayout {
    days: usize,
    periods_per_day: usize,
    buffer: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotSetLayoutError {
    OutOfRangeDimensions { days: usize, periods_per_day: usize },
    BufferLengthMismatch { expected: usize, found: usize },
    StrayBits { day: usize, word: u32 },
}

impl std::fmt::Display for SlotSetLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotSetLayoutError::OutOfRangeDimensions { days, periods_per_day } => write!(
                f,
                "slot set dimensions out of range: {days} days, {periods_per_day} periods per day"
            ),
            SlotSetLayoutError::BufferLengthMismatch { expected, found } => write!(
                f,
                "slot set buffer holds {found} words but {expected} days were declared"
            ),
            SlotSetLayoutError::StrayBits { day, word } => write!(
                f,
                "slot set word {word:#010x} for day {day} has bits set beyond the declared period range"
            ),
        }
    }
}

impl std::error::Error for SlotSetLayoutError {}

impl TryFrom<SlotSetLayout> for SlotSet {
    type Error = SlotSetLayoutError;

    fn try_from(layout: SlotSetLayout) -> Result<Self, Self::Error> {
        if !(1..=MAX_DAYS).contains(&layout.days)
            || !(1..=MAX_PERIODS).contains(&layout.periods_per_day)
        {
            return Err(SlotSetLayoutError::OutOfRangeDimensions {
                days: layout.days,
                periods_per_day: layout.periods_per_day,
            });
        }
        if layout.buffer.len() != layout.days {
            return Err(SlotSetLayoutError::BufferLengthMismatch {
                expected: layout.days,
                found: layout.buffer.len(),
            });
        }
        let mask = if layout.periods_per_day == MAX_PERIODS {
            u32::MAX
        } else {
            (1u32 << layout.periods_per_day) - 1
        };
        for (day, &word) in layout.buffer.iter().enumerate() {
            if word & !mask != 0 {
                return Err(SlotSetLayoutError::StrayBits { day, word });
            }
        }
        Ok(Self {
            days: layout.days,
            periods_per_day: layout.periods_per_day,
            buffer: layout.buffer,
        })
    }
}

impl Serialize for SlotSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SlotSetLayout {
            days: self.days,
            periods_per_day: self.periods_per_day,
            buffer: self.buffer.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SlotSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let layout = SlotSetLayout::deserialize(deserializer)?;
        SlotSet::try_from(layout).map_err(serde::de::Error::custom)
    }
}
