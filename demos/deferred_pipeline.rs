//! Deferred Pipeline
//!
//! This example runs a consumer over Stillwater's lazy effects. Each element
//! is validated against limits read from an environment, and a failure is
//! recovered by switching to a fallback consumer.
//!
//! Key concepts:
//! - Effectful folds with fold_m
//! - Reading configuration through the effect environment
//! - Recovering from failures with handle_error_with
//! - Async driving with drive_deferred
//!
//! Run with: cargo run --example deferred_pipeline

use stillwater::effect::{Effect as _, EffectExt};
use tributary::prelude::*;

#[derive(Clone)]
struct Limits {
    max_reading: i64,
}

type Fx = Deferred<String, Limits>;

fn checked_total() -> Consumer<Fx, i64, i64> {
    fold_m(0, |total, reading: i64| {
        stillwater::from_fn(move |limits: &Limits| {
            if reading > limits.max_reading {
                Err(format!("reading {} exceeds {}", reading, limits.max_reading))
            } else {
                Ok(total + reading)
            }
        })
        .boxed()
    })
}

#[tokio::main]
async fn main() {
    println!("=== Deferred Pipeline ===\n");

    let limits = Limits { max_reading: 50 };
    let driver = Driver::builder().chunk_size(3).build().unwrap();

    let readings = vec![10, 20, 30, 40];
    let (step, report) = driver
        .drive_deferred(checked_total(), &mut readings.into_iter(), &limits)
        .await
        .unwrap();
    if let Step::Continue(k) = step {
        println!("Total of valid readings: {:?}", k.on_end().run(&limits).await);
    }
    println!("Batches fed: {}\n", report.batches_fed);

    let noisy = vec![10, 99, 30];
    let guarded = checked_total().handle_error_with(|error| {
        println!("Recovering: {}", error);
        Consumer::done(-1)
    });
    let (step, _) = driver
        .drive_deferred(guarded, &mut noisy.into_iter(), &limits)
        .await
        .unwrap();
    println!("Result after recovery: {:?}", step.value());

    println!("\n=== Example Complete ===");
}
