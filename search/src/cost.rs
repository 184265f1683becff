//! Path cost arithmetic.

use std::fmt::Debug;
use std::ops::{Add, Sub};

/// A totally ordered additive cost.
///
/// Relaxation computes `step + parent` and priority deltas `new - old`; both
/// must round-trip exactly, so only signed integers implement this trait.
/// Floats are excluded (no total order, inexact arithmetic) and so are
/// unsigned integers (`new - old` underflows when a cost improves).
pub trait Cost: Copy + Ord + Debug + Add<Output = Self> + Sub<Output = Self> {
    /// Additive identity: the cost of the source node.
    fn zero() -> Self;
}

macro_rules! impl_cost {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cost for $t {
                fn zero() -> Self {
                    0
                }
            }
        )*
    };
}

impl_cost!(i8, i16, i32, i64, i128, isize);
