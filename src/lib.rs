//! Tributary: composable, effect-parametric stream consumers
//!
//! Tributary models incremental input processing as iteratees: a consumer is
//! a pure description of how to react to the next batch of input or to the
//! end of input. Consumers never read from a source themselves. A driver
//! feeds them, and every transition is sequenced through an effect carrier
//! chosen by the caller.
//!
//! # Core Concepts
//!
//! - **Step**: a consumer either needs more input (`Continue`) or has
//!   finished with a value and the input it did not use (`Done`)
//! - **Consumer**: an effectful value yielding a step, with `map`,
//!   `flat_map`, `contramap` and error recovery combinators
//! - **Effect**: the capability set (`pure`, `bind`, optionally errors) a
//!   consumer is parametric over: [`Id`], [`Attempt`], or Stillwater's lazy
//!   [`Deferred`] effects
//! - **Driver**: chunks an iterator into batches and feeds them until the
//!   consumer is finished
//!
//! # Example
//!
//! ```rust
//! use tributary::prelude::*;
//!
//! // Skip a header line, then count the rest.
//! let lines: Consumer<Id, &str, usize> =
//!     drop(1).flat_map(|()| length());
//!
//! let driver = Driver::builder().chunk_size(2).build().unwrap();
//! let mut input = vec!["id,name", "1,a", "2,b", "3,c"].into_iter();
//! let (consumer, report) = driver.drive(lines, &mut input);
//!
//! assert_eq!(consumer.run(), 3);
//! assert_eq!(report.elements_fed, 4);
//! ```

pub mod core;
pub mod drive;
pub mod effect;
pub mod macros;
pub mod prelude;
pub mod primitives;

// Re-export commonly used types
pub use crate::core::{Batch, Consumer, Continuation, Step};
pub use drive::{ConfigError, DriveConfig, DriveReport, Driver, DriverBuilder};
pub use effect::{Attempt, Deferred, Effect, ErrorEffect, Id, Inspect};
