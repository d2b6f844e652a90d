//! Edge weights usable by the shortest-path engine.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Add;

/// A non-negative, totally ordered edge weight.
pub trait Weight: Copy + Debug + Add<Output = Self> {
    const ZERO: Self;

    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! weight_impl_float {
    ($T:ident) => {
        impl Weight for $T {
            const ZERO: Self = 0.0;

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                $T::total_cmp(self, other)
            }
        }
    };
}

macro_rules! weight_impl_int {
    ($T:ident) => {
        impl Weight for $T {
            const ZERO: Self = 0;

            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    };
}

weight_impl_float!(f64);
weight_impl_int!(u32);
weight_impl_int!(u64);
