//! Consumers that finish without reading input.

use crate::core::{Consumer, Step};
use crate::effect::{Effect, ErrorEffect};

/// Finished immediately with `()`; every delivered batch is left over.
pub fn identity<M, E>() -> Consumer<M, E, ()>
where
    M: Effect,
    E: Send + 'static,
{
    Consumer::done(())
}

/// Run an effect and finish with its value, leaving all input.
///
/// ```rust
/// use tributary::core::Consumer;
/// use tributary::effect::Attempt;
/// use tributary::primitives::{consume, lift_m};
///
/// let offset: Consumer<Attempt<String>, i32, i32> = lift_m(Ok(10));
/// let consumer = offset.flat_map(|offset: i32| {
///     consume().map(move |xs: Vec<i32>| xs.into_iter().map(|x| x + offset).collect::<Vec<i32>>())
/// });
///
/// assert_eq!(consumer.feed_vec(vec![1, 2]).run(), Ok(vec![11, 12]));
/// ```
pub fn lift_m<M, E, A>(effect: M::F<A>) -> Consumer<M, E, A>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    Consumer::new(M::map(effect, Step::done))
}

/// A consumer whose step is a failure in the effect's error channel.
pub fn fail<M, E, A>(error: M::Error) -> Consumer<M, E, A>
where
    M: ErrorEffect,
    E: Send + 'static,
    A: Send + 'static,
{
    Consumer::new(M::raise_error(error))
}
