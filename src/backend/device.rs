//! Accelerator-kernel intrinsics (`nvptx64`).
//!
//! PTX offers `atom.exch`, `atom.add` and a subtract that the toolchain lowers to an
//! add of the negated operand, but no atomic load. A load is therefore emulated as
//! a fetch-add of zero: it writes the unchanged value back, which is unobservable
//! but means the cell must be writable even for reads.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering::SeqCst};

use super::Backend;

pub(crate) const BACKEND: Backend = Backend::Device;

macro_rules! device {
    ($atomic:ident, $word:ty, $store:ident, $load:ident, $add:ident, $sub:ident) => {
        #[inline(always)]
        pub(crate) unsafe fn $store(dst: *mut $word, val: $word) {
            // SAFETY: caller guarantees an aligned cell in global or shared memory.
            unsafe { $atomic::from_ptr(dst) }.swap(val, SeqCst);
        }

        #[inline(always)]
        pub(crate) unsafe fn $load(src: *const $word) -> $word {
            // SAFETY: as above; the cell is writable (see module docs).
            unsafe { $atomic::from_ptr(src.cast_mut()) }.fetch_add(0, SeqCst)
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

device!(AtomicU32, u32, store_4, load_4, fetch_add_4, fetch_sub_4);
device!(AtomicU64, u64, store_8, load_8, fetch_add_8, fetch_sub_8);
