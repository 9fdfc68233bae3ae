//! Ready-made consumers built from the step algebra.
//!
//! - **Folding** ([`fold`], [`fold_m`], [`consume`], [`sum`], ...) reads the
//!   whole stream and never leaves leftovers.
//! - **Splitting** ([`head`], [`take`], [`drop_while`], ...) stops part way
//!   through a batch and reports the rest as leftovers.
//! - **Lifting** ([`identity`], [`lift_m`], [`fail`]) wraps a value or an
//!   effect without reading input.
//!
//! Every constructor is generic over the effect carrier; pick it with a type
//! annotation:
//!
//! ```rust
//! use tributary::core::Consumer;
//! use tributary::effect::Id;
//! use tributary::primitives::sum;
//!
//! let total: Consumer<Id, i64, i64> = sum();
//! assert_eq!(total.feed_vec(vec![1, 2, 3]).run(), 6);
//! ```

mod fold;
mod lift;
mod split;

pub use fold::{
    consume, consume_in, discard, fold, fold_m, fold_map, foreach, foreach_m, last, length,
    reverse, sum,
};
pub use lift::{fail, identity, lift_m};
pub use split::{drop, drop_while, head, is_end, peek, take, take_while};
