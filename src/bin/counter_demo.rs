//! Counts up and down from every hardware thread, with and without atomics.

use anyhow::{ensure, Context, Result};
use core::ffi::c_int;
use serde::Serialize;

use dual_atomic::{backend, AtomicInt, Backend, Counter, RacyCounter, Workload};

#[derive(Serialize)]
struct DemoReport {
    backend: Backend,
    contexts: usize,
    iterations: usize,
    after_increment: c_int,
    after_decrement: c_int,
    racy_after_increment: i64,
}

fn main() -> Result<()> {
    let workload = Workload::default();

    let a = AtomicInt::new(0);

    workload.increment_all(&a);
    let after_increment = c_int::from(&a);
    println!("result after increment: {after_increment}");

    workload.decrement_all(&a);
    let after_decrement = c_int::from(&a);
    println!("result after decrement: {after_decrement}");

    let racy = RacyCounter::new(0);
    workload.increment_all(&racy);
    let racy_after_increment = racy.value();
    println!("racy result after increment: {racy_after_increment}");

    let report = DemoReport {
        backend: backend::ACTIVE,
        contexts: workload.contexts(),
        iterations: workload.iterations,
        after_increment,
        after_decrement,
        racy_after_increment,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to encode demo report")?;
    println!("{json}");

    let expected = c_int::try_from(workload.iterations).context("iteration count exceeds c_int")?;
    ensure!(
        after_increment == expected,
        "lost increments: expected {expected}, got {after_increment}"
    );
    ensure!(after_decrement == 0, "lost decrements: ended at {after_decrement}");
    Ok(())
}
