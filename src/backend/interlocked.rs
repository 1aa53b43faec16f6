//! Microsoft interlocked family.
//!
//! Only `InterlockedExchange` and `InterlockedExchangeAdd` (and their 64-bit forms)
//! are assumed. Every other operation is expressed through those two:
//!
//! - store is an exchange whose previous value is discarded,
//! - load is an exchange-add of zero,
//! - fetch-sub is an exchange-add of the two's-complement negation.
//!
//! Interlocked operations are full barriers, i.e. sequentially consistent.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering::SeqCst};

use super::Backend;

pub(crate) const BACKEND: Backend = Backend::Interlocked;

macro_rules! interlocked {
    ($atomic:ident, $word:ty, $exchange:ident, $exchange_add:ident,
     $store:ident, $load:ident, $add:ident, $sub:ident) => {
        #[inline(always)]
        unsafe fn $exchange(dst: *mut $word, val: $word) -> $word {
            // SAFETY: caller guarantees an aligned, live, atomically-accessed cell.
            unsafe { $atomic::from_ptr(dst) }.swap(val, SeqCst)
        }

        #[inline(always)]
        unsafe fn $exchange_add(dst: *mut $word, val: $word) -> $word {
            // SAFETY: as above.
            unsafe { $atomic::from_ptr(dst) }.fetch_add(val, SeqCst)
        }

        #[inline(always)]
        pub(crate) unsafe fn $store(dst: *mut $word, val: $word) {
            // SAFETY: forwarded caller contract.
            unsafe { $exchange(dst, val) };
        }

        #[inline(always)]
        pub(crate) unsafe fn $load(src: *const $word) -> $word {
            // SAFETY: forwarded caller contract; adding zero leaves the cell unchanged.
            unsafe { $exchange_add(src.cast_mut(), 0) }
        }

        #[inline(always)]
        pub(crate) unsafe fn $add(dst: *mut $word, val: $word) -> $word {
            // SAFETY: forwarded caller contract.
            unsafe { $exchange_add(dst, val) }
        }

        #[inline(always)]
        pub(crate) unsafe fn $sub(dst: *mut $word, val: $word) -> $word {
            // SAFETY: forwarded caller contract.
            unsafe { $exchange_add(dst, val.wrapping_neg()) }
        }
    };
}

interlocked!(
    AtomicU32,
    u32,
    interlocked_exchange,
    interlocked_exchange_add,
    store_4,
    load_4,
    fetch_add_4,
    fetch_sub_4
);
interlocked!(
    AtomicU64,
    u64,
    interlocked_exchange64,
    interlocked_exchange_add64,
    store_8,
    load_8,
    fetch_add_8,
    fetch_sub_8
);
