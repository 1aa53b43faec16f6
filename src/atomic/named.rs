use core::ffi::{c_int, c_long, c_longlong, c_uint, c_ulong, c_ulonglong};
use core::{fmt, ops::Deref};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AtomicBase;
use crate::integer::Integer;

/// A named atomic integer.
///
/// Adds nothing to [`AtomicBase`] beyond construction and plain-value conversion;
/// the rest of the surface (`load`, `store`, `fetch_add`, `fetch_sub`, increments,
/// decrements) is reached through `Deref` and is identical for every `T`.
///
/// Like the base it is neither `Clone` nor `Copy`:
///
/// ```compile_fail
/// use dual_atomic::AtomicInt;
///
/// let a = AtomicInt::new(1);
/// let b: AtomicInt = a.clone();
/// ```
///
/// ```compile_fail
/// use dual_atomic::AtomicSizeT;
///
/// let a = AtomicSizeT::new(1);
/// let b = a;
/// assert_eq!(a.load(), b.load());
/// ```
#[repr(transparent)]
pub struct Atomic<T: Integer> {
    base: AtomicBase<T>,
}

impl<T: Integer> Atomic<T> {
    /// Creates a new atomic holding `value`.
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            base: AtomicBase::new(value),
        }
    }

    /// Stores `value` and returns it.
    #[inline]
    pub fn assign(&self, value: T) -> T {
        self.base.assign(value)
    }

    /// Consumes the atomic and returns the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.base.into_inner()
    }

    /// Returns a mutable reference to the value.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.base.get_mut()
    }
}

impl<T: Integer> Deref for Atomic<T> {
    type Target = AtomicBase<T>;

    #[inline(always)]
    fn deref(&self) -> &AtomicBase<T> {
        &self.base
    }
}

impl<T: Integer> Default for Atomic<T> {
    #[inline]
    fn default() -> Self {
        Self {
            base: AtomicBase::default(),
        }
    }
}

impl<T: Integer> From<T> for Atomic<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Integer> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.base, f)
    }
}

impl<T: Integer + Serialize> Serialize for Atomic<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.base.serialize(serializer)
    }
}

impl<'de, T: Integer + Deserialize<'de>> Deserialize<'de> for Atomic<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AtomicBase::deserialize(deserializer).map(|base| Self { base })
    }
}

macro_rules! impl_into_plain {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<&Atomic<$t>> for $t {
                #[inline]
                fn from(atomic: &Atomic<$t>) -> $t {
                    atomic.load()
                }
            }
        )*
    };
}

impl_into_plain!(i32, u32, i64, u64, isize, usize);

/// Atomic C `int`.
pub type AtomicInt = Atomic<c_int>;
/// Atomic C `unsigned int`.
pub type AtomicUint = Atomic<c_uint>;
/// Atomic C `long` (4 bytes on Windows, 8 on LP64 targets).
pub type AtomicLong = Atomic<c_long>;
/// Atomic C `unsigned long`.
pub type AtomicUlong = Atomic<c_ulong>;
/// Atomic C `long long`.
pub type AtomicLlong = Atomic<c_longlong>;
/// Atomic C `unsigned long long`.
pub type AtomicUllong = Atomic<c_ulonglong>;
/// Atomic `size_t`.
pub type AtomicSizeT = Atomic<usize>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_and_conversion() {
        let a = AtomicInt::default();
        assert_eq!(a.assign(7), 7);
        let v: c_int = (&a).into();
        assert_eq!(v, 7);
        a.post_increment();
        assert_eq!(c_int::from(&a), 8);
    }

    #[test]
    fn fresh_instance_from_value() {
        let a = AtomicUllong::new(41);
        let b = AtomicUllong::from(c_ulonglong::from(&a));
        b.pre_increment();
        assert_eq!(a.load(), 41);
        assert_eq!(b.into_inner(), 42);
    }

    #[test]
    fn debug_shows_value() {
        let a = AtomicSizeT::new(3);
        assert_eq!(format!("{a:?}"), "3");
    }
}
