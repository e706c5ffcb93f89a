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

use crate::state::fitness::Fitness;

pub trait Acceptor {
    fn name(&self) -> &str;
    fn accept(&self, current: &Fitness, candidate: &Fitness) -> bool;
}

impl std::fmt::Display for dyn Acceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Strict lexicographic improvement: fewer conflicts, or equal conflicts and
/// lower energy. Used to promote the incumbent.
#[derive(Debug, Default, Clone)]
pub struct LexStrictAcceptor;
impl Acceptor for LexStrictAcceptor {
    fn name(&self) -> &str {
        "LexStrictAcceptor"
    }
    #[inline]
    fn accept(&self, current: &Fitness, candidate: &Fitness) -> bool {
        candidate < current
    }
}

/// Acceptance rule of the closing conflict-elimination pass: a candidate may
/// never add conflicts and must be free of inner gaps. Plateau moves are
/// allowed so the walker can drift out of shallow basins.
#[derive(Debug, Default, Clone)]
pub struct ConflictBoundAcceptor;
impl Acceptor for ConflictBoundAcceptor {
    fn name(&self) -> &str {
        "ConflictBoundAcceptor"
    }
    #[inline]
    fn accept(&self, current: &Fitness, candidate: &Fitness) -> bool {
        candidate.inner_gaps == 0 && candidate.conflicts() <= current.conflicts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_strict_acceptor() {
        let a = LexStrictAcceptor;
        let calm = Fitness::zero();
        let busy = Fitness {
            free_first_periods: 2,
            ..Fitness::zero()
        };
        let conflicted = Fitness {
            double_bookings: 1,
            ..Fitness::zero()
        };
        assert!(a.accept(&busy, &calm));
        assert!(!a.accept(&calm, &busy));
        assert!(!a.accept(&calm, &calm));
        assert!(a.accept(&conflicted, &busy));
    }

    #[test]
    fn test_conflict_bound_acceptor() {
        let a = ConflictBoundAcceptor;
        let one = Fitness {
            double_bookings: 1,
            ..Fitness::zero()
        };
        let two = Fitness {
            double_bookings: 2,
            ..Fitness::zero()
        };
        let gapped = Fitness {
            inner_gaps: 1,
            ..Fitness::zero()
        };
        // Plateau and improvement pass, regression and gaps fail.
        assert!(a.accept(&one, &one));
        assert!(a.accept(&two, &one));
        assert!(!a.accept(&one, &two));
        assert!(!a.accept(&two, &gapped));
    }
}
