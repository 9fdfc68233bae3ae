//! Feeding consumers from an input source.
//!
//! A [`Driver`] pulls elements from an iterator, groups them into non-empty
//! batches of at most `chunk_size`, and delivers them in an explicit loop.
//! It stops as soon as the consumer is finished, so unread input stays in
//! the caller's iterator.
//!
//! - [`Driver::drive`] works with any carrier that can [`Inspect`] its steps
//!   synchronously (`Id`, `Attempt`).
//! - [`Driver::drive_deferred`] executes each step of a [`Deferred`] consumer
//!   before feeding the next batch.
//!
//! # Example
//!
//! ```rust
//! use tributary::core::Consumer;
//! use tributary::drive::DriverBuilder;
//! use tributary::effect::Id;
//! use tributary::primitives::take;
//!
//! let driver = DriverBuilder::new().chunk_size(2).build().unwrap();
//! let mut input = 1..=10;
//!
//! let first: Consumer<Id, i32, Vec<i32>> = take(3);
//! let (consumer, report) = driver.drive(first, &mut input);
//!
//! assert!(report.finished);
//! assert_eq!(report.batches_fed, 2);
//! assert_eq!(consumer.run(), vec![1, 2, 3]);
//! assert_eq!(input.next(), Some(5));
//! ```

mod builder;
mod config;
mod error;
mod report;

pub use builder::DriverBuilder;
pub use config::{DriveConfig, DEFAULT_CHUNK_SIZE};
pub use error::ConfigError;
pub use report::DriveReport;

use crate::core::{Batch, Consumer, Step};
use crate::effect::{Deferred, Inspect};
use stillwater::effect::Effect as _;
use tracing::{debug, info_span, trace, Instrument};

/// Delivers input to consumers according to a [`DriveConfig`].
#[derive(Clone, Debug, Default)]
pub struct Driver {
    config: DriveConfig,
}

impl Driver {
    /// Create a driver from a validated config.
    pub fn new(config: DriveConfig) -> Result<Self, ConfigError> {
        DriverBuilder::new().config(config).build()
    }

    /// Start building a driver.
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// The settings this driver runs with.
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Feed `input` to `consumer` until it finishes, fails, or input runs out.
    ///
    /// Returns the consumer in whatever state it reached; call
    /// [`Consumer::run`] to obtain a result.
    pub fn drive<M, E, A, I>(
        &self,
        consumer: Consumer<M, E, A>,
        input: &mut I,
    ) -> (Consumer<M, E, A>, DriveReport)
    where
        M: Inspect,
        E: Send + 'static,
        A: Send + 'static,
        I: Iterator<Item = E>,
    {
        let mut report = DriveReport::start();
        let span = info_span!("drive", run_id = %report.run_id);
        let _guard = span.enter();

        let mut consumer = consumer.settle();
        let finished = loop {
            match consumer.inspect() {
                Some(step) if step.is_done() => break true,
                Some(_) => {}
                None => {
                    debug!("consumer step failed, stopping");
                    break false;
                }
            }

            if self.limit_reached(&report) {
                break false;
            }

            let Some(batch) = self.next_batch(input) else {
                break false;
            };

            report.record_batch(batch.len());
            trace!(batch = report.batches_fed, size = batch.len(), "feeding batch");
            consumer = consumer.feed(batch);
        };

        let report = report.complete(finished);
        debug!(
            batches = report.batches_fed,
            elements = report.elements_fed,
            finished,
            "drive complete"
        );
        (consumer, report)
    }

    /// Execute a deferred consumer against `env`, feeding `input` between
    /// steps.
    ///
    /// Each step is run to completion before the next batch is delivered.
    /// The first failure is returned as the effect's own error.
    pub async fn drive_deferred<Err, Env, E, A, I>(
        &self,
        consumer: Consumer<Deferred<Err, Env>, E, A>,
        input: &mut I,
        env: &Env,
    ) -> Result<(Step<Deferred<Err, Env>, E, A>, DriveReport), Err>
    where
        Err: Send + 'static,
        Env: Clone + Send + Sync + 'static,
        E: Send + 'static,
        A: Send + 'static,
        I: Iterator<Item = E>,
    {
        let mut report = DriveReport::start();
        let span = info_span!("drive", run_id = %report.run_id);

        async move {
            let mut step = consumer.into_step().run(env).await?;

            loop {
                let k = match step {
                    Step::Continue(k) => k,
                    done => {
                        step = done;
                        break;
                    }
                };

                if self.limit_reached(&report) {
                    step = Step::Continue(k);
                    break;
                }

                let Some(batch) = self.next_batch(input) else {
                    step = Step::Continue(k);
                    break;
                };

                report.record_batch(batch.len());
                trace!(batch = report.batches_fed, size = batch.len(), "feeding batch");
                step = k.on_input(batch).into_step().run(env).await?;
            }

            let report = report.complete(step.is_done());
            debug!(
                batches = report.batches_fed,
                elements = report.elements_fed,
                finished = report.finished,
                "drive complete"
            );
            Ok((step, report))
        }
        .instrument(span)
        .await
    }

    fn limit_reached(&self, report: &DriveReport) -> bool {
        self.config
            .max_batches
            .is_some_and(|limit| report.batches_fed >= limit)
    }

    fn next_batch<E, I>(&self, input: &mut I) -> Option<Batch<E>>
    where
        I: Iterator<Item = E>,
    {
        Batch::from_vec(input.by_ref().take(self.config.chunk_size).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Attempt, Id};
    use crate::primitives::{consume, drop_while, fold_m, head, length, sum};
    use stillwater::effect::{Effect as _, EffectExt};

    type Fallible = Attempt<String>;

    #[derive(Clone)]
    struct Env {
        limit: i32,
    }

    type Fx = Deferred<String, Env>;

    fn driver(chunk_size: usize) -> Driver {
        DriverBuilder::new().chunk_size(chunk_size).build().unwrap()
    }

    #[test]
    fn drives_to_end_of_input() {
        let consumer: Consumer<Id, i32, i32> = sum();
        let mut input = 1..=10;

        let (consumer, report) = driver(3).drive(consumer, &mut input);

        assert!(!report.finished);
        assert_eq!(report.batches_fed, 4);
        assert_eq!(report.elements_fed, 10);
        assert_eq!(consumer.run(), 55);
    }

    #[test]
    fn stops_pulling_once_done() {
        let consumer: Consumer<Id, i32, Option<i32>> = head();
        let mut input = vec![7, 8, 9, 10, 11].into_iter();

        let (consumer, report) = driver(2).drive(consumer, &mut input);

        assert!(report.finished);
        assert_eq!(report.batches_fed, 1);
        let (value, leftovers) = consumer.into_step().into_done().unwrap();
        assert_eq!(value, Some(7));
        assert_eq!(leftovers, vec![8]);
        assert_eq!(input.collect::<Vec<_>>(), vec![9, 10, 11]);
    }

    #[test]
    fn already_done_consumer_reads_nothing() {
        let consumer: Consumer<Id, i32, &str> = Consumer::done("ready");
        let mut input = 1..=3;

        let (_, report) = driver(1).drive(consumer, &mut input);

        assert!(report.finished);
        assert_eq!(report.batches_fed, 0);
        assert_eq!(input.next(), Some(1));
    }

    #[test]
    fn owed_leftovers_are_delivered_before_reading() {
        let consumer: Consumer<Id, i32, Option<i32>> =
            Consumer::done_with((), vec![5, 6]).flat_map(|()| head());
        let mut input = 1..=3;

        let (consumer, report) = driver(1).drive(consumer, &mut input);

        assert!(report.finished);
        assert_eq!(report.batches_fed, 0);
        assert_eq!(consumer.into_step().into_done(), Some((Some(5), vec![6])));
    }

    #[test]
    fn respects_batch_limit() {
        let consumer: Consumer<Id, i32, usize> = length();
        let mut input = 0..100;

        let driver = DriverBuilder::new().chunk_size(10).max_batches(2).build().unwrap();
        let (consumer, report) = driver.drive(consumer, &mut input);

        assert_eq!(report.batches_fed, 2);
        assert_eq!(consumer.run(), 20);
        assert_eq!(input.next(), Some(20));
    }

    #[test]
    fn stops_on_failure() {
        let consumer: Consumer<Fallible, i32, i32> = fold_m(0, |acc, x: i32| {
            if x == 3 {
                Err("three".to_string())
            } else {
                Ok(acc + x)
            }
        });
        let mut input = 1..=10;

        let (consumer, report) = driver(2).drive(consumer, &mut input);

        assert_eq!(report.batches_fed, 2);
        assert!(!report.finished);
        assert_eq!(consumer.run(), Err("three".to_string()));
        assert_eq!(input.next(), Some(5));
    }

    #[test]
    fn chaining_continues_where_previous_stopped() {
        let consumer: Consumer<Id, i32, Vec<i32>> =
            drop_while(|x: &i32| *x < 4).flat_map(|()| consume());
        let mut input = 1..=6;

        let (consumer, report) = driver(4).drive(consumer, &mut input);

        assert_eq!(report.elements_fed, 6);
        assert_eq!(consumer.run(), vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn drive_deferred_runs_each_step() {
        let consumer: Consumer<Fx, i32, i32> = fold_m(0, |acc, x: i32| {
            stillwater::from_fn(move |env: &Env| {
                if acc + x > env.limit {
                    Err(format!("limit exceeded at {}", x))
                } else {
                    Ok(acc + x)
                }
            })
            .boxed()
        });
        let mut input = 1..=4;

        let (step, report) = driver(2)
            .drive_deferred(consumer, &mut input, &Env { limit: 100 })
            .await
            .unwrap();

        assert_eq!(report.batches_fed, 2);
        assert!(!report.finished);
        let Step::Continue(k) = step else {
            panic!("Expected Continue");
        };
        assert_eq!(k.on_end().run(&Env { limit: 100 }).await, Ok(10));
    }

    #[tokio::test]
    async fn drive_deferred_returns_native_error() {
        let consumer: Consumer<Fx, i32, i32> = fold_m(0, |acc, x: i32| {
            stillwater::from_fn(move |env: &Env| {
                if acc + x > env.limit {
                    Err(format!("limit exceeded at {}", x))
                } else {
                    Ok(acc + x)
                }
            })
            .boxed()
        });
        let mut input = 1..=10;

        let result = driver(1)
            .drive_deferred(consumer, &mut input, &Env { limit: 5 })
            .await;

        assert_eq!(result.err(), Some("limit exceeded at 3".to_string()));
        assert_eq!(input.next(), Some(4));
    }

    #[tokio::test]
    async fn drive_deferred_stops_once_done() {
        let consumer: Consumer<Fx, char, Option<char>> = head();
        let mut input = "abc".chars();

        let (step, report) = driver(1)
            .drive_deferred(consumer, &mut input, &Env { limit: 0 })
            .await
            .unwrap();

        assert!(report.finished);
        assert_eq!(step.into_done(), Some((Some('a'), vec![])));
        assert_eq!(input.as_str(), "bc");
    }
}
