//! Common imports for building and driving consumers.
//!
//! ```rust
//! use tributary::prelude::*;
//!
//! let total: Consumer<Id, i32, i32> = take(2).map(|xs: Vec<i32>| xs.iter().sum());
//! assert_eq!(total.feed(batch![4, 5, 6]).run(), 9);
//! ```

pub use crate::batch;
pub use crate::core::{Batch, Consumer, Continuation, Step};
pub use crate::drive::{DriveConfig, DriveReport, Driver, DriverBuilder};
pub use crate::effect::{Attempt, Deferred, Effect, ErrorEffect, Id, Inspect};
pub use crate::primitives::*;
