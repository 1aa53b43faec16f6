use core::{cell::UnsafeCell, fmt};

use num_traits::{WrappingAdd, WrappingSub};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backend;
use crate::integer::{Integer, Word};

/// One integer, updated atomically with sequential consistency.
///
/// The cell is stored inline and aligned like the native atomic of the same width,
/// so `size_of::<AtomicBase<T>>() == size_of::<T>()`.
///
/// Every method takes `&self`. The cell sits in an [`UnsafeCell`], so the compiler
/// already assumes it may change through other aliases; the same methods therefore
/// serve exclusive owners and any number of concurrent sharers.
///
/// Atomics are never duplicated. Neither cloning:
///
/// ```compile_fail
/// use dual_atomic::AtomicBase;
///
/// let a = AtomicBase::new(1i32);
/// let b: AtomicBase<i32> = a.clone();
/// ```
///
/// nor copying compiles:
///
/// ```compile_fail
/// use dual_atomic::AtomicBase;
///
/// let a = AtomicBase::new(1u64);
/// let b = a;
/// assert_eq!(a.load(), b.load());
/// ```
#[repr(C)]
pub struct AtomicBase<T: Integer> {
    _align: [<T::Word as Word>::Atomic; 0],
    cell: UnsafeCell<T>,
}

// SAFETY: all shared access to `cell` goes through the backend's atomic primitives.
unsafe impl<T: Integer> Sync for AtomicBase<T> {}

impl<T: Integer> AtomicBase<T> {
    /// Creates a new atomic holding `value`.
    ///
    /// This is a plain write: nothing else can observe the value yet.
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            _align: [],
            cell: UnsafeCell::new(value),
        }
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self) -> T {
        // SAFETY: `cell` is aligned for `T::Word`, live for `&self`, and only shared atomically.
        unsafe { backend::load(self.cell.get()) }
    }

    /// Stores `value`.
    #[inline(always)]
    pub fn store(&self, value: T) {
        // SAFETY: see `load`.
        unsafe { backend::store(self.cell.get(), value) }
    }

    /// Adds `value` (wrapping), returning the previous value.
    #[inline(always)]
    pub fn fetch_add(&self, value: T) -> T {
        // SAFETY: see `load`.
        unsafe { backend::fetch_add(self.cell.get(), value) }
    }

    /// Subtracts `value` (wrapping), returning the previous value.
    #[inline(always)]
    pub fn fetch_sub(&self, value: T) -> T {
        // SAFETY: see `load`.
        unsafe { backend::fetch_sub(self.cell.get(), value) }
    }

    /// Stores `value` and returns it.
    ///
    /// The result is the argument itself, not a re-read of the cell.
    #[inline]
    pub fn assign(&self, value: T) -> T {
        self.store(value);
        value
    }

    /// Increments by one, returning the value before the increment.
    #[inline]
    pub fn post_increment(&self) -> T {
        self.fetch_add(T::one())
    }

    /// Decrements by one, returning the value before the decrement.
    #[inline]
    pub fn post_decrement(&self) -> T {
        self.fetch_sub(T::one())
    }

    /// Increments by one, returning the incremented value.
    ///
    /// The increment is atomic, but the result is computed locally as
    /// `post_increment() + 1`. Another context may have changed the cell again by
    /// the time this returns, so the result is not necessarily the cell's current
    /// value; it is the value this increment produced.
    #[inline]
    pub fn pre_increment(&self) -> T {
        WrappingAdd::wrapping_add(&self.post_increment(), &T::one())
    }

    /// Decrements by one, returning the decremented value.
    ///
    /// Computed as `post_decrement() - 1`; see [`pre_increment`](Self::pre_increment).
    #[inline]
    pub fn pre_decrement(&self) -> T {
        WrappingSub::wrapping_sub(&self.post_decrement(), &T::one())
    }

    /// Returns a mutable reference to the value.
    ///
    /// `&mut self` proves no other context can access the cell, so no atomic is needed.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.cell.get_mut()
    }

    /// Consumes the atomic and returns the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.cell.into_inner()
    }

    /// Raw address of the cell.
    ///
    /// The address is stable for as long as `self` is borrowed. Any access through it
    /// while shared must use [`crate::backend`].
    #[inline]
    pub const fn as_ptr(&self) -> *mut T {
        self.cell.get()
    }
}

impl<T: Integer> Default for AtomicBase<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<T: Integer> From<T> for AtomicBase<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Integer> fmt::Debug for AtomicBase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.load(), f)
    }
}

impl<T: Integer + Serialize> Serialize for AtomicBase<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.load().serialize(serializer)
    }
}

impl<'de, T: Integer + Deserialize<'de>> Deserialize<'de> for AtomicBase<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}

macro_rules! impl_into_plain {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<&AtomicBase<$t>> for $t {
                #[inline]
                fn from(atomic: &AtomicBase<$t>) -> $t {
                    atomic.load()
                }
            }
        )*
    };
}

impl_into_plain!(i32, u32, i64, u64, isize, usize);
