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
use timetable_weaver_core::prelude::{Slot, SlotSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeacherIdentifierMarker;

impl IdentifierMarkerName for TeacherIdentifierMarker {
    const NAME: &'static str = "TeacherId";
}

pub type TeacherIdentifier = Identifier<usize, TeacherIdentifierMarker>;

/// A teacher: an immutable name plus the set of slots they can teach in.
///
/// Within one [`Problem`](crate::problem::Problem) teachers are identified by
/// their arena index; names are unique and only used at the configuration
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    name: String,
    availability: SlotSet,
}

impl Teacher {
    #[inline]
    pub fn new(name: impl Into<String>, availability: SlotSet) -> Self {
        Self {
            name: name.into(),
            availability,
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
    pub fn available_slot_count(&self) -> usize {
        self.availability.count()
    }

    #[inline]
    pub fn available_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.availability.slots()
    }
}

impl std::fmt::Display for Teacher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Teacher({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_queries() {
        let mut av = SlotSet::empty(5, 6);
        av.set(0, 0, true);
        av.set(3, 5, true);

        let t = Teacher::new("Alice", av);
        assert_eq!(t.name(), "Alice");
        assert!(t.is_available_at(0, 0));
        assert!(!t.is_available_at(0, 1));
        assert_eq!(t.available_slot_count(), 2);
        assert_eq!(
            t.available_slots().collect::<Vec<_>>(),
            vec![Slot::new(0, 0), Slot::new(3, 5)]
        );
        assert_eq!(t.to_string(), "Teacher(Alice)");
    }
}
