//! The two-case state of a consumer.

use super::{Batch, Consumer};
use crate::effect::Effect;
use std::collections::VecDeque;
use std::fmt;

/// What a waiting consumer does next.
///
/// A continuation is consumed by exactly one of its two methods: either more
/// input arrives ([`on_input`](Continuation::on_input)) or the stream ends
/// ([`on_end`](Continuation::on_end)). Both must agree on what "no more input,
/// ever" means: ending now is equivalent in spirit to feeding an empty stream
/// forever.
///
/// Because only one method runs, accumulated state has a single owner and
/// needs no `Clone`.
///
/// # Example
///
/// ```rust
/// use tributary::core::{Batch, Consumer, Continuation, Step};
/// use tributary::effect::{Effect, Id};
///
/// // Counts batches until the stream ends.
/// struct CountBatches(usize);
///
/// impl Continuation<Id, char, usize> for CountBatches {
///     fn on_input(self: Box<Self>, _batch: Batch<char>) -> Consumer<Id, char, usize> {
///         Consumer::from_step(Step::Continue(Box::new(CountBatches(self.0 + 1))))
///     }
///
///     fn on_end(self: Box<Self>) -> usize {
///         Id::pure(self.0)
///     }
/// }
///
/// let consumer: Consumer<Id, char, usize> =
///     Consumer::from_step(Step::Continue(Box::new(CountBatches(0))));
/// let consumer = consumer
///     .feed_vec(vec!['a', 'b'])
///     .feed_vec(vec!['c']);
/// assert_eq!(consumer.run(), 2);
/// ```
pub trait Continuation<M, E, A>: Send
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// Accept a non-empty batch of input and produce the next consumer.
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, A>;

    /// Produce the result because input has ended.
    fn on_end(self: Box<Self>) -> M::F<A>;
}

/// State of a consumer after one pull cycle.
///
/// A closed union of exactly two cases: the consumer needs more input, or it
/// has finished with a value and the input it saw but did not consume.
pub enum Step<M, E, A>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// Needs more input
    Continue(Box<dyn Continuation<M, E, A>>),

    /// Finished. `remainder` holds unconsumed input in arrival order.
    Done { value: A, remainder: VecDeque<E> },
}

impl<M, E, A> Step<M, E, A>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// Build a waiting step from an input function and an end-of-input value.
    ///
    /// `on_input` is only ever called with non-empty batches.
    pub fn cont<K>(on_input: K, on_end: M::F<A>) -> Self
    where
        K: FnOnce(Batch<E>) -> Consumer<M, E, A> + Send + 'static,
    {
        Step::Continue(Box::new(FnContinuation { on_input, on_end }))
    }

    /// A finished step with no leftovers.
    pub fn done(value: A) -> Self {
        Step::Done {
            value,
            remainder: VecDeque::new(),
        }
    }

    /// A finished step with leftovers.
    pub fn done_with(value: A, remainder: impl Into<VecDeque<E>>) -> Self {
        Step::Done {
            value,
            remainder: remainder.into(),
        }
    }

    /// Returns `true` if the step is `Done`.
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done { .. })
    }

    /// The finished value, if any.
    pub fn value(&self) -> Option<&A> {
        match self {
            Step::Done { value, .. } => Some(value),
            Step::Continue(_) => None,
        }
    }

    /// Unconsumed input of a finished step.
    pub fn remainder(&self) -> Option<&VecDeque<E>> {
        match self {
            Step::Done { remainder, .. } => Some(remainder),
            Step::Continue(_) => None,
        }
    }

    /// Converts a finished step into its value and leftovers.
    pub fn into_done(self) -> Option<(A, Vec<E>)> {
        match self {
            Step::Done { value, remainder } => Some((value, remainder.into())),
            Step::Continue(_) => None,
        }
    }

    /// Transform the finished value, now if `Done` or once the step finishes.
    pub fn map<B, F>(self, f: F) -> Step<M, E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        match self {
            Step::Continue(inner) => Step::Continue(Box::new(MapCont { inner, f })),
            Step::Done { value, remainder } => Step::Done {
                value: f(value),
                remainder,
            },
        }
    }
}

impl<M, E, A> fmt::Debug for Step<M, E, A>
where
    M: Effect,
    E: Send + fmt::Debug + 'static,
    A: Send + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Continue(_) => f.debug_tuple("Continue").field(&"<continuation>").finish(),
            Step::Done { value, remainder } => f
                .debug_struct("Done")
                .field("value", value)
                .field("remainder", remainder)
                .finish(),
        }
    }
}

/// Applies `f` to whatever the wrapped continuation eventually yields.
struct MapCont<M, E, A, F>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    inner: Box<dyn Continuation<M, E, A>>,
    f: F,
}

impl<M, E, A, B, F> Continuation<M, E, B> for MapCont<M, E, A, F>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    F: FnOnce(A) -> B + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, B> {
        let this = *self;
        this.inner.on_input(batch).map(this.f)
    }

    fn on_end(self: Box<Self>) -> M::F<B> {
        let this = *self;
        M::map(this.inner.on_end(), this.f)
    }
}

/// Continuation assembled from a closure and a precomputed end value.
struct FnContinuation<M, A, K>
where
    M: Effect,
    A: Send + 'static,
{
    on_input: K,
    on_end: M::F<A>,
}

impl<M, E, A, K> Continuation<M, E, A> for FnContinuation<M, A, K>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
    K: FnOnce(Batch<E>) -> Consumer<M, E, A> + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, A> {
        (self.on_input)(batch)
    }

    fn on_end(self: Box<Self>) -> M::F<A> {
        self.on_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Id;

    #[test]
    fn done_reports_value_and_remainder() {
        let step: Step<Id, i32, &str> = Step::done_with("ok", vec![4, 5]);

        assert!(step.is_done());
        assert_eq!(step.value(), Some(&"ok"));
        assert_eq!(step.remainder(), Some(&VecDeque::from(vec![4, 5])));
        assert_eq!(step.into_done(), Some(("ok", vec![4, 5])));
    }

    #[test]
    fn cont_is_not_done() {
        let step: Step<Id, i32, i32> = Step::cont(|batch| Consumer::done(*batch.head()), 0);

        assert!(!step.is_done());
        assert_eq!(step.value(), None);
        assert!(step.remainder().is_none());
    }

    #[test]
    fn cont_dispatches_to_input_function() {
        let step: Step<Id, i32, i32> = Step::cont(|batch| Consumer::done(batch.len() as i32), -1);

        let Step::Continue(k) = step else {
            panic!("Expected Continue");
        };
        let next = k.on_input(crate::batch![1, 2, 3]).into_step();
        assert_eq!(next.into_done(), Some((3, vec![])));
    }

    #[test]
    fn cont_dispatches_to_end_value() {
        let step: Step<Id, i32, i32> = Step::cont(|_| Consumer::done(1), -1);

        let Step::Continue(k) = step else {
            panic!("Expected Continue");
        };
        assert_eq!(k.on_end(), -1);
    }

    #[test]
    fn map_transforms_done_value() {
        let step: Step<Id, i32, i32> = Step::done_with(2, vec![7]);
        assert_eq!(step.map(|x| x * 3).into_done(), Some((6, vec![7])));
    }

    #[test]
    fn map_waits_for_continuation() {
        let step: Step<Id, i32, usize> = Step::cont(|batch| Consumer::done(batch.len()), 0);
        let Step::Continue(k) = step.map(|n| n + 1) else {
            panic!("Expected Continue");
        };

        assert_eq!(k.on_input(crate::batch![1, 2]).into_step().into_done(), Some((3, vec![])));
    }

    #[test]
    fn debug_hides_continuation() {
        let step: Step<Id, i32, i32> = Step::cont(|_| Consumer::done(1), 0);
        assert_eq!(format!("{:?}", step), "Continue(\"<continuation>\")");

        let done: Step<Id, i32, i32> = Step::done_with(1, vec![2]);
        assert_eq!(format!("{:?}", done), "Done { value: 1, remainder: [2] }");
    }
}
