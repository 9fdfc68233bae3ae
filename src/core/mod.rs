//! Core consumer types and combinator algebra.
//!
//! This module contains the consumer state machine:
//! - [`Batch`]: a non-empty run of input elements delivered together
//! - [`Step`]: the two-case state of a consumer at a point in time
//! - [`Continuation`]: what a waiting consumer does with more input or with end of input
//! - [`Consumer`]: an effectful value yielding a step, plus its combinators
//!
//! Nothing in this module runs an effect. Every transition is sequenced
//! through the [`Effect`](crate::effect::Effect) capability of the consumer.

mod batch;
mod consumer;
mod step;

pub use batch::Batch;
pub use consumer::Consumer;
pub use step::{Continuation, Step};
