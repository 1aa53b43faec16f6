//! Atomic integer values.
//!
//! [`AtomicBase`] is the generic value type: one inline cell, every operation routed
//! through [`crate::backend`]. [`Atomic`] is the restricted view instantiated once
//! per C integer type, with the aliases below.
//!
//! Neither type is `Clone` or `Copy`. Copying would either duplicate the current
//! value or alias the cell, and both are easy to do by accident. To start a new
//! atomic from an existing one's value, load it explicitly:
//!
//! ```rust
//! use dual_atomic::AtomicInt;
//!
//! let a = AtomicInt::new(3);
//! let b = AtomicInt::new(a.load());
//! b.post_increment();
//! assert_eq!((a.load(), b.load()), (3, 4));
//! ```

/// The generic atomic value.
pub mod base;
/// Per-integer named atomics.
pub mod named;

pub use base::AtomicBase;
pub use named::{
    Atomic, AtomicInt, AtomicLlong, AtomicLong, AtomicSizeT, AtomicUint, AtomicUllong,
    AtomicUlong,
};
