//! Integer types accepted by the atomic wrappers and the machine words behind them.
//!
//! Every supported integer maps onto a 4- or 8-byte unsigned word purely by its
//! byte size. The word is what the backend primitives operate on; the integer is
//! reinterpreted bit for bit, so signed arithmetic wraps exactly like the native
//! two's-complement type.

use core::fmt::Debug;
use core::mem::size_of;
use core::sync::atomic::{AtomicU32, AtomicU64};

use num_traits::{PrimInt, WrappingAdd, WrappingSub};

use crate::backend;

mod sealed {
    pub trait SealedWord {}
    pub trait SealedInteger {}
}

/// A 4- or 8-byte machine word the active backend can operate on atomically.
///
/// Implemented for `u32` and `u64` only.
pub trait Word: Copy + Eq + Debug + Send + Sync + sealed::SealedWord + 'static {
    /// Native atomic of the same width. Only its alignment is used: atomic cells
    /// embed a zero-length array of it so their address is always suitably aligned.
    type Atomic: Send + Sync;

    /// Atomically stores `val` into `*dst`.
    ///
    /// # Safety
    /// `dst` must be non-null, aligned to `align_of::<Self::Atomic>()`, valid for
    /// reads and writes, and only accessed atomically while shared.
    unsafe fn store(dst: *mut Self, val: Self);

    /// Atomically loads `*src`.
    ///
    /// # Safety
    /// Same contract as [`Word::store`]. The pointer must be writable: the device
    /// backend implements loads as a read-modify-write.
    unsafe fn load(src: *const Self) -> Self;

    /// Atomically adds `val` to `*dst` (wrapping), returning the previous value.
    ///
    /// # Safety
    /// Same contract as [`Word::store`].
    unsafe fn fetch_add(dst: *mut Self, val: Self) -> Self;

    /// Atomically subtracts `val` from `*dst` (wrapping), returning the previous value.
    ///
    /// # Safety
    /// Same contract as [`Word::store`].
    unsafe fn fetch_sub(dst: *mut Self, val: Self) -> Self;
}

impl sealed::SealedWord for u32 {}
impl sealed::SealedWord for u64 {}

impl Word for u32 {
    type Atomic = AtomicU32;

    #[inline(always)]
    unsafe fn store(dst: *mut Self, val: Self) {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::store_4(dst, val) }
    }

    #[inline(always)]
    unsafe fn load(src: *const Self) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::load_4(src) }
    }

    #[inline(always)]
    unsafe fn fetch_add(dst: *mut Self, val: Self) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::fetch_add_4(dst, val) }
    }

    #[inline(always)]
    unsafe fn fetch_sub(dst: *mut Self, val: Self) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::fetch_sub_4(dst, val) }
    }
}

impl Word for u64 {
    type Atomic = AtomicU64;

    #[inline(always)]
    unsafe fn store(dst: *mut Self, val: Self) {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::store_8(dst, val) }
    }

    #[inline(always)]
    unsafe fn load(src: *const Self) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::load_8(src) }
    }

    #[inline(always)]
    unsafe fn fetch_add(dst: *mut Self, val: Self) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::fetch_add_8(dst, val) }
    }

    #[inline(always)]
    unsafe fn fetch_sub(dst: *mut Self, val: Self) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { backend::imp::fetch_sub_8(dst, val) }
    }
}

/// Type-level byte count, used to pick a [`Word`] from `size_of::<T>()`.
pub struct Bytes<const N: usize>;

/// Maps a byte count onto the machine word of that width.
///
/// Only `Bytes<4>` and `Bytes<8>` implement this, which is what rejects every
/// other integer width at compile time.
pub trait WordOf {
    /// The word of this width.
    type Word: Word;
}

impl WordOf for Bytes<4> {
    type Word = u32;
}

impl WordOf for Bytes<8> {
    type Word = u64;
}

/// An integer type that can live in an atomic cell.
///
/// Implemented for `i32`, `u32`, `i64`, `u64`, `isize` and `usize`, which covers
/// every C integer alias (`c_int`, `c_long`, `c_ulonglong`, ...) on the supported
/// targets.
pub trait Integer:
    PrimInt + WrappingAdd + WrappingSub + Default + Debug + Send + Sync + sealed::SealedInteger + 'static
{
    /// Machine word of the same byte size.
    type Word: Word;

    /// Reinterprets the integer's bits as its word.
    fn into_word(self) -> Self::Word;

    /// Reinterprets a word's bits as the integer.
    fn from_word(word: Self::Word) -> Self;
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::SealedInteger for $t {}

            impl Integer for $t {
                type Word = <Bytes<{ size_of::<$t>() }> as WordOf>::Word;

                #[inline(always)]
                fn into_word(self) -> Self::Word {
                    zerocopy::transmute!(self)
                }

                #[inline(always)]
                fn from_word(word: Self::Word) -> Self {
                    zerocopy::transmute!(word)
                }
            }
        )*
    };
}

impl_integer!(i32, u32, i64, u64, isize, usize);

/// Byte width of `T`'s word, either 4 or 8.
#[inline(always)]
pub const fn width_of<T: Integer>() -> usize {
    size_of::<T::Word>()
}
