//! Compile-time backend dispatch.
//!
//! Exactly one backend is compiled into any build; which one depends only on the
//! compilation target:
//!
//! | Target                                   | Backend        |
//! |------------------------------------------|----------------|
//! | `nvptx64` kernels                        | [`Backend::Device`]      |
//! | MSVC toolchains                          | [`Backend::Interlocked`] |
//! | GNU-style toolchains (unix, `*-gnu`)     | [`Backend::Builtin`]     |
//! | any other target with 32/64-bit atomics  | [`Backend::Portable`]    |
//!
//! A target matching none of these fails to compile. There is deliberately no
//! lock-based or non-atomic fallback.
//!
//! Each backend module exposes the same eight primitives (`store_4`, `load_4`,
//! `fetch_add_4`, `fetch_sub_4` and their `_8` twins) over raw word pointers. The
//! generic functions in this module pick the width from the integer's byte size.

use core::fmt;

use serde::Serialize;

use crate::integer::{Integer, Word};

#[cfg(target_arch = "nvptx64")]
pub(crate) mod device;
#[cfg(target_arch = "nvptx64")]
pub(crate) use device as imp;

#[cfg(all(not(target_arch = "nvptx64"), target_env = "msvc"))]
pub(crate) mod interlocked;
#[cfg(all(not(target_arch = "nvptx64"), target_env = "msvc"))]
pub(crate) use interlocked as imp;

#[cfg(all(
    not(target_arch = "nvptx64"),
    not(target_env = "msvc"),
    any(target_family = "unix", target_env = "gnu"),
    target_has_atomic = "32",
    target_has_atomic = "64",
))]
pub(crate) mod builtin;
#[cfg(all(
    not(target_arch = "nvptx64"),
    not(target_env = "msvc"),
    any(target_family = "unix", target_env = "gnu"),
    target_has_atomic = "32",
    target_has_atomic = "64",
))]
pub(crate) use builtin as imp;

#[cfg(all(
    not(target_arch = "nvptx64"),
    not(target_env = "msvc"),
    not(any(target_family = "unix", target_env = "gnu")),
    target_has_atomic = "32",
    target_has_atomic = "64",
))]
pub(crate) mod portable;
#[cfg(all(
    not(target_arch = "nvptx64"),
    not(target_env = "msvc"),
    not(any(target_family = "unix", target_env = "gnu")),
    target_has_atomic = "32",
    target_has_atomic = "64",
))]
pub(crate) use portable as imp;

#[cfg(not(any(
    target_arch = "nvptx64",
    target_env = "msvc",
    all(target_has_atomic = "32", target_has_atomic = "64"),
)))]
compile_error!(
    "dual-atomic: no atomic backend for this target; it needs nvptx64, an MSVC toolchain, \
     or native 32-bit and 64-bit atomics"
);

// Under test every family is compiled on the host alongside `imp`.
#[cfg(test)]
#[path = "device.rs"]
mod device_family;
#[cfg(test)]
#[path = "interlocked.rs"]
mod interlocked_family;
#[cfg(test)]
#[path = "builtin.rs"]
mod builtin_family;
#[cfg(test)]
#[path = "portable.rs"]
mod portable_family;

/// The family of atomic primitives compiled into this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Accelerator kernel intrinsics (`nvptx64`). Loads are fetch-add of zero.
    Device,
    /// GNU-style whole-word compiler built-ins with explicit sequential consistency.
    Builtin,
    /// Microsoft interlocked exchange / exchange-add family.
    Interlocked,
    /// Standard atomic load/store/fetch primitives for any other atomic-capable target.
    Portable,
}

impl Backend {
    /// Short lowercase name, e.g. `"builtin"`.
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Device => "device",
            Backend::Builtin => "builtin",
            Backend::Interlocked => "interlocked",
            Backend::Portable => "portable",
        }
    }

    /// Whether this backend runs inside accelerator kernels.
    pub const fn is_device(self) -> bool {
        matches!(self, Backend::Device)
    }

    /// Whether a plain atomic load is free of hardware-level side effects.
    ///
    /// `false` for backends that emulate loads as a fetch-add of zero, which writes
    /// the unchanged value back.
    pub const fn has_native_load(self) -> bool {
        matches!(self, Backend::Builtin | Backend::Portable)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The backend selected for the current compilation target.
pub const ACTIVE: Backend = imp::BACKEND;

/// Returns [`ACTIVE`].
#[inline]
pub const fn active() -> Backend {
    ACTIVE
}

/// Atomically stores `val` into `*dst` with sequential consistency.
///
/// # Safety
/// `dst` must be non-null, aligned to the native atomic word of `T`'s width,
/// valid for reads and writes, and every concurrent access to it must go through
/// the functions in this module.
#[inline(always)]
pub unsafe fn store<T: Integer>(dst: *mut T, val: T) {
    // SAFETY: `T::Word` has the same size as `T`; caller upholds the rest.
    unsafe { T::Word::store(dst.cast(), val.into_word()) }
}

/// Atomically loads `*src` with sequential consistency.
///
/// On [`Backend::Device`] and [`Backend::Interlocked`] this is a fetch-add of zero,
/// so `src` must point to writable memory even though the value is unchanged.
///
/// # Safety
/// Same contract as [`store`].
#[inline(always)]
pub unsafe fn load<T: Integer>(src: *const T) -> T {
    // SAFETY: `T::Word` has the same size as `T`; caller upholds the rest.
    T::from_word(unsafe { T::Word::load(src.cast()) })
}

/// Atomically adds `val` to `*dst`, wrapping on overflow, and returns the value
/// immediately before the addition.
///
/// # Safety
/// Same contract as [`store`].
#[inline(always)]
pub unsafe fn fetch_add<T: Integer>(dst: *mut T, val: T) -> T {
    // SAFETY: `T::Word` has the same size as `T`; caller upholds the rest.
    T::from_word(unsafe { T::Word::fetch_add(dst.cast(), val.into_word()) })
}

/// Atomically subtracts `val` from `*dst`, wrapping on overflow, and returns the
/// value immediately before the subtraction.
///
/// # Safety
/// Same contract as [`store`].
#[inline(always)]
pub unsafe fn fetch_sub<T: Integer>(dst: *mut T, val: T) -> T {
    // SAFETY: `T::Word` has the same size as `T`; caller upholds the rest.
    T::from_word(unsafe { T::Word::fetch_sub(dst.cast(), val.into_word()) })
}
