//! `proptest` strategies for atomic values.
//!
//! Enabled by the `proptest` feature.

use proptest::prelude::*;

use crate::atomic::{Atomic, AtomicBase};
use crate::integer::Integer;

/// Generates an [`AtomicBase`] holding any value of `T`.
pub fn any_atomic_base<T>() -> impl Strategy<Value = AtomicBase<T>>
where
    T: Integer + Arbitrary,
{
    any::<T>().prop_map(AtomicBase::new)
}

/// Generates an [`Atomic`] holding any value of `T`.
pub fn any_atomic<T>() -> impl Strategy<Value = Atomic<T>>
where
    T: Integer + Arbitrary,
{
    any::<T>().prop_map(Atomic::new)
}

/// Generates values of `T` near the wraparound boundaries, where fetch operations
/// are most likely to go wrong.
pub fn near_boundary<T>() -> impl Strategy<Value = T>
where
    T: Integer + Arbitrary,
{
    let edges = [T::min_value(), T::max_value(), T::zero(), T::one()];
    prop_oneof![
        proptest::sample::select(edges.to_vec()),
        any::<T>(),
    ]
}
