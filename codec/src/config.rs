//! Types for use as [crate::Read::Cfg].

use core::ops::{Bound, RangeBounds};

/// Bounds accepted for a length prefix read from untrusted input.
///
/// Strings, byte blocks and collections reject a decoded length outside the range before
/// allocating anything.
///
/// # Examples
///
/// ```
/// use tessera_codec::RangeCfg;
///
/// let cfg = RangeCfg::new(0..=1024);
/// assert!(cfg.contains(&500));
/// assert!(!cfg.contains(&2000));
///
/// let unbounded = RangeCfg::<usize>::default();
/// assert!(unbounded.contains(&usize::MAX));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg<T: Copy + PartialOrd> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Copy + PartialOrd> RangeCfg<T> {
    /// Creates a `RangeCfg` from any type implementing `RangeBounds<T>`.
    pub fn new(r: impl RangeBounds<T>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Accepts only `value`.
    pub fn exact(value: T) -> Self {
        Self {
            start: Bound::Included(value),
            end: Bound::Included(value),
        }
    }

    /// Accepts anything up to and including `max`.
    pub fn at_most(max: T) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Included(max),
        }
    }

    /// Returns true if the value is within this range.
    pub fn contains(&self, value: &T) -> bool {
        let above_start = match &self.start {
            Bound::Included(s) => value >= s,
            Bound::Excluded(s) => value > s,
            Bound::Unbounded => true,
        };
        let below_end = match &self.end {
            Bound::Included(e) => value <= e,
            Bound::Excluded(e) => value < e,
            Bound::Unbounded => true,
        };
        above_start && below_end
    }
}

impl<T: Copy + PartialOrd> Default for RangeCfg<T> {
    fn default() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl<T: Copy + PartialOrd> From<$range> for RangeCfg<T> {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<T>,
    core::ops::RangeInclusive<T>,
    core::ops::RangeFrom<T>,
    core::ops::RangeTo<T>,
    core::ops::RangeToInclusive<T>
);

impl<T: Copy + PartialOrd> From<core::ops::RangeFull> for RangeCfg<T> {
    fn from(_: core::ops::RangeFull) -> Self {
        Self::default()
    }
}

impl<T: Copy + PartialOrd> RangeBounds<T> for RangeCfg<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.end.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RangeCfg::from(..), 0 => true; "unbounded low")]
    #[test_case(RangeCfg::from(..), usize::MAX => true; "unbounded high")]
    #[test_case(RangeCfg::from(5..), 4 => false; "below inclusive start")]
    #[test_case(RangeCfg::from(5..), 5 => true; "at inclusive start")]
    #[test_case(RangeCfg::from(..10), 10 => false; "at exclusive end")]
    #[test_case(RangeCfg::from(..=10), 10 => true; "at inclusive end")]
    #[test_case(RangeCfg::from(5..5), 5 => false; "empty")]
    #[test_case(RangeCfg::exact(3), 3 => true; "exact hit")]
    #[test_case(RangeCfg::exact(3), 4 => false; "exact miss")]
    #[test_case(RangeCfg::at_most(64), 65 => false; "over max")]
    fn test_contains(cfg: RangeCfg<usize>, value: usize) -> bool {
        cfg.contains(&value)
    }

    #[test]
    fn test_excluded_start() {
        let cfg = RangeCfg::new((Bound::Excluded(5u32), Bound::Included(10u32)));
        assert!(!cfg.contains(&5));
        assert!(cfg.contains(&6));
        assert!(cfg.contains(&10));
        assert_eq!(cfg.start_bound(), Bound::Excluded(&5));
    }

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(RangeCfg::<u8>::default(), RangeCfg::from(..));
    }
}
