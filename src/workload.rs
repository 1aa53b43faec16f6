//! Concurrent counter workloads.
//!
//! Drives a counter through many increments and decrements spread over several
//! concurrent contexts, the way a parallel `for` loop would. With the `parallel`
//! feature the contexts are rayon workers; otherwise they are scoped threads.
//!
//! [`RacyCounter`] is the control group: its read-modify-write is split into a
//! separate load and store, so concurrent updates get lost.

use core::fmt::Debug;
use core::sync::atomic::{AtomicI64, Ordering};

use serde::Serialize;

use crate::atomic::{Atomic, AtomicBase};
use crate::integer::Integer;

/// Something that can be counted up and down from many contexts at once.
pub trait Counter: Sync {
    /// Value type reported by [`Counter::value`].
    type Value: Copy + Debug + Serialize;

    /// Adds one.
    fn increment(&self);

    /// Subtracts one.
    fn decrement(&self);

    /// Current value.
    fn value(&self) -> Self::Value;
}

impl<T: Integer + Serialize> Counter for AtomicBase<T> {
    type Value = T;

    #[inline]
    fn increment(&self) {
        self.post_increment();
    }

    #[inline]
    fn decrement(&self) {
        self.post_decrement();
    }

    #[inline]
    fn value(&self) -> T {
        self.load()
    }
}

impl<T: Integer + Serialize> Counter for Atomic<T> {
    type Value = T;

    #[inline]
    fn increment(&self) {
        self.post_increment();
    }

    #[inline]
    fn decrement(&self) {
        self.post_decrement();
    }

    #[inline]
    fn value(&self) -> T {
        self.load()
    }
}

/// A counter whose updates are *not* atomic as a whole.
///
/// Each access is individually well defined (relaxed loads and stores, no data
/// race in the language sense), but `increment` reads, adds and writes back in
/// three steps, so two contexts can both write the same successor.
#[derive(Debug, Default)]
pub struct RacyCounter {
    value: AtomicI64,
}

impl RacyCounter {
    /// Creates a counter starting at `value`.
    pub const fn new(value: i64) -> Self {
        Self {
            value: AtomicI64::new(value),
        }
    }
}

impl Counter for RacyCounter {
    type Value = i64;

    #[inline]
    fn increment(&self) {
        let v = self.value.load(Ordering::Relaxed);
        self.value.store(v.wrapping_add(1), Ordering::Relaxed);
    }

    #[inline]
    fn decrement(&self) {
        let v = self.value.load(Ordering::Relaxed);
        self.value.store(v.wrapping_sub(1), Ordering::Relaxed);
    }

    fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Counter values observed after each phase of [`Workload::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Tally<V> {
    /// Value once every increment has finished.
    pub after_increment: V,
    /// Value once every decrement has finished.
    pub after_decrement: V,
}

/// How many operations to run, and over how many concurrent contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workload {
    /// Total operations per phase.
    pub iterations: usize,
    /// Concurrent contexts sharing those operations. `0` is treated as `1`.
    pub contexts: usize,
}

impl Default for Workload {
    /// 1024 iterations over every available hardware thread.
    fn default() -> Self {
        Self {
            iterations: 1024,
            contexts: std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Workload {
    /// Creates a workload of `iterations` operations over `contexts` contexts.
    pub const fn new(iterations: usize, contexts: usize) -> Self {
        Self {
            iterations,
            contexts,
        }
    }

    /// Effective number of contexts.
    #[inline]
    pub fn contexts(&self) -> usize {
        self.contexts.max(1)
    }

    /// Number of operations context `ctx` performs.
    ///
    /// The remainder of `iterations / contexts` goes to the lowest-numbered contexts.
    pub fn share(&self, ctx: usize) -> usize {
        let contexts = self.contexts();
        self.iterations / contexts + usize::from(ctx < self.iterations % contexts)
    }

    /// Increments `counter` `iterations` times.
    pub fn increment_all<C: Counter + ?Sized>(&self, counter: &C) {
        #[cfg(feature = "tracing")]
        tracing::debug!(iterations = self.iterations, contexts = self.contexts(), "increment phase");
        self.spread(|| counter.increment());
    }

    /// Decrements `counter` `iterations` times.
    pub fn decrement_all<C: Counter + ?Sized>(&self, counter: &C) {
        #[cfg(feature = "tracing")]
        tracing::debug!(iterations = self.iterations, contexts = self.contexts(), "decrement phase");
        self.spread(|| counter.decrement());
    }

    /// Runs the increment phase, then the decrement phase, recording the value after each.
    pub fn run<C: Counter + ?Sized>(&self, counter: &C) -> Tally<C::Value> {
        self.increment_all(counter);
        let after_increment = counter.value();
        self.decrement_all(counter);
        let after_decrement = counter.value();

        #[cfg(feature = "tracing")]
        tracing::debug!(?after_increment, ?after_decrement, "workload finished");

        Tally {
            after_increment,
            after_decrement,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn spread<F: Fn() + Sync>(&self, op: F) {
        let op = &op;
        let result = crossbeam_utils::thread::scope(|s| {
            for ctx in 0..self.contexts() {
                let n = self.share(ctx);
                s.spawn(move |_| {
                    for _ in 0..n {
                        op();
                    }
                });
            }
        });
        if let Err(panic) = result {
            std::panic::resume_unwind(panic);
        }
    }

    #[cfg(feature = "parallel")]
    fn spread<F: Fn() + Sync>(&self, op: F) {
        use rayon::prelude::*;

        let body = || {
            (0..self.contexts()).into_par_iter().for_each(|ctx| {
                for _ in 0..self.share(ctx) {
                    op();
                }
            });
        };

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.contexts())
            .build()
        {
            Ok(pool) => pool.install(body),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "falling back to the global rayon pool");
                body();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_cover_all_iterations() {
        let w = Workload::new(1030, 8);
        let total: usize = (0..8).map(|ctx| w.share(ctx)).sum();
        assert_eq!(total, 1030);
        assert_eq!(w.share(0), 129);
        assert_eq!(w.share(7), 128);
    }

    #[test]
    fn zero_contexts_means_one() {
        let w = Workload::new(10, 0);
        assert_eq!(w.contexts(), 1);
        assert_eq!(w.share(0), 10);
    }

    #[test]
    fn single_context_racy_counter_is_exact() {
        let c = RacyCounter::default();
        let tally = Workload::new(100, 1).run(&c);
        assert_eq!(tally, Tally { after_increment: 100, after_decrement: 0 });
    }

    #[test]
    fn atomic_counter_is_exact() {
        let c = AtomicBase::<u32>::default();
        let tally = Workload::new(1024, 4).run(&c);
        assert_eq!(tally.after_increment, 1024);
        assert_eq!(tally.after_decrement, 0);
    }
}
