//! GNU-style compiler built-ins.
//!
//! Whole-word atomic built-ins, every call requesting sequential consistency
//! explicitly. These lower to the same instructions as `__atomic_*_n(.., SEQ_CST)`.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering::SeqCst};

use super::Backend;

pub(crate) const BACKEND: Backend = Backend::Builtin;

macro_rules! builtin {
    ($atomic:ident, $word:ty, $store:ident, $load:ident, $add:ident, $sub:ident) => {
        #[inline(always)]
        pub(crate) unsafe fn $store(dst: *mut $word, val: $word) {
            // SAFETY: caller guarantees an aligned, live, atomically-accessed cell.
            unsafe { $atomic::from_ptr(dst) }.store(val, SeqCst);
        }

        #[inline(always)]
        pub(crate) unsafe fn $load(src: *const $word) -> $word {
            // SAFETY: as above; a native load never writes through the pointer.
            unsafe { $atomic::from_ptr(src.cast_mut()) }.load(SeqCst)
        }

        #[inline(always)]
        pub(crate) unsafe fn $add(dst: *mut $word, val: $word) -> $word {
            // SAFETY: as above.
            unsafe { $atomic::from_ptr(dst) }.fetch_add(val, SeqCst)
        }

        #[inline(always)]
        pub(crate) unsafe fn $sub(dst: *mut $word, val: $word) -> $word {
            // SAFETY: as above.
            unsafe { $atomic::from_ptr(dst) }.fetch_sub(val, SeqCst)
        }
    };
}

builtin!(AtomicU32, u32, store_4, load_4, fetch_add_4, fetch_sub_4);
builtin!(AtomicU64, u64, store_8, load_8, fetch_add_8, fetch_sub_8);
