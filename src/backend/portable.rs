//! Standard atomics for targets without a more specific backend (wasm, uefi, ...).
//!
//! Mirrors the C11 `atomic_store`/`atomic_load`/`atomic_fetch_*` family, whose
//! default ordering is sequential consistency.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering::SeqCst};

use super::Backend;

pub(crate) const BACKEND: Backend = Backend::Portable;

macro_rules! portable {
    ($atomic:ident, $word:ty, $store:ident, $load:ident, $add:ident, $sub:ident) => {
        #[inline(always)]
        pub(crate) unsafe fn $store(dst: *mut $word, val: $word) {
            // SAFETY: caller guarantees an aligned, live, atomically-accessed cell.
            unsafe { $atomic::from_ptr(dst) }.store(val, SeqCst);
        }

        #[inline(always)]
        pub(crate) unsafe fn $load(src: *const $word) -> $word {
            // SAFETY: as above.
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

portable!(AtomicU32, u32, store_4, load_4, fetch_add_4, fetch_sub_4);
portable!(AtomicU64, u64, store_8, load_8, fetch_add_8, fetch_sub_8);
