//! # `dual-atomic` - Host/Device Portable Atomic Integers
//!
//! Fixed-width atomic integers whose `load`, `store`, increment, decrement and
//! fetch-and-add/subtract behave the same whether the calling code runs on a CPU
//! thread or inside an accelerator kernel.
//!
//! ## Guarantees
//!
//! - **Sequential consistency**: every operation is `SeqCst`; there are no weaker
//!   ordering variants.
//! - **No fallback**: the atomic primitive family is picked at compile time from the
//!   target. A target without a supported backend fails to build instead of silently
//!   getting a non-atomic implementation.
//! - **Zero overhead**: an `Atomic<T>` is exactly one inline `T`, holds no lock and
//!   never allocates, blocks or yields.
//!
//! ## Architecture
//!
//! 1. [`integer`] maps each supported integer onto a 4- or 8-byte word by its size.
//! 2. [`backend`] holds the compile-time selected primitives (device, GNU-style
//!    built-ins, Microsoft interlocked, or portable standard atomics) and the generic
//!    `store`/`load`/`fetch_add`/`fetch_sub` dispatch functions.
//! 3. [`atomic`] builds [`AtomicBase`] on the dispatch layer, and the restricted
//!    [`Atomic`] per C integer type on top of it.
//! 4. `workload` (host builds only) drives counters from many concurrent contexts.
//!
//! Kernel builds (`nvptx64`) are `no_std` and contain only the first three layers.
//!
//! ## Example
//!
//! ```rust
//! use dual_atomic::AtomicInt;
//!
//! let hits = AtomicInt::new(0);
//! std::thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..256 {
//!                 hits.post_increment();
//!             }
//!         });
//!     }
//! });
//! assert_eq!(hits.load(), 1024);
//! ```

#![cfg_attr(target_arch = "nvptx64", no_std)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod atomic;
pub mod backend;
pub mod integer;
#[cfg(not(target_arch = "nvptx64"))]
pub mod workload;

#[cfg(all(feature = "proptest", not(target_arch = "nvptx64")))]
pub mod strategy;

pub use atomic::{
    Atomic, AtomicBase, AtomicInt, AtomicLlong, AtomicLong, AtomicSizeT, AtomicUint,
    AtomicUllong, AtomicUlong,
};
pub use backend::Backend;
pub use integer::Integer;
#[cfg(not(target_arch = "nvptx64"))]
pub use workload::{Counter, RacyCounter, Tally, Workload};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;
    use core::sync::atomic::{AtomicU32, AtomicU64};

    // Cells are stored inline, with no padding.
    assert!(mem::size_of::<AtomicInt>() == mem::size_of::<core::ffi::c_int>());
    assert!(mem::size_of::<AtomicUllong>() == mem::size_of::<core::ffi::c_ulonglong>());
    assert!(mem::size_of::<AtomicSizeT>() == mem::size_of::<usize>());
    assert!(mem::size_of::<AtomicLong>() == mem::size_of::<core::ffi::c_long>());

    // Backend primitives reinterpret the cell as a native atomic word.
    assert!(mem::align_of::<AtomicBase<i32>>() == mem::align_of::<AtomicU32>());
    assert!(mem::align_of::<AtomicBase<i64>>() == mem::align_of::<AtomicU64>());
    assert!(mem::align_of::<Atomic<u64>>() == mem::align_of::<AtomicU64>());
};
