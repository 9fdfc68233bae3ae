//! Consumers and their combinator algebra.

use super::{Batch, Continuation, Step};
use crate::effect::{Effect, ErrorEffect, Inspect};
use std::collections::VecDeque;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::warn;

/// An effectful, pull-based stream processor.
///
/// A consumer owns exactly one effectful value yielding its current [`Step`].
/// It has no state of its own and every combinator returns a new consumer.
/// Consumers are moved by value, so a single run always follows one linear
/// history of feeds; build a fresh consumer (e.g. from a factory closure) to
/// drive the same logic again.
///
/// # Example
///
/// ```rust
/// use tributary::core::Consumer;
/// use tributary::effect::Id;
/// use tributary::primitives::{consume, drop_while};
///
/// let consumer: Consumer<Id, i32, Vec<i32>> =
///     drop_while(|x: &i32| *x < 3).flat_map(|()| consume());
///
/// let result = consumer.feed_vec(vec![1, 2, 3, 4]).run();
/// assert_eq!(result, vec![3, 4]);
/// ```
pub struct Consumer<M, E, A>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    state: M::F<Pending<M, E, A>>,
}

/// A step, or leftovers still owed to the continuation that follows.
///
/// `Redeliver` lets `flat_map` hand leftovers on without calling into the
/// next stage, so [`Consumer::into_step`] can deliver them in a loop.
enum Pending<M, E, A>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    Ready(Step<M, E, A>),
    Redeliver(Box<dyn Continuation<M, E, A>>, Batch<E>),
}

impl<M, E, A> Consumer<M, E, A>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// Wrap an effectful step.
    pub fn new(step: M::F<Step<M, E, A>>) -> Self {
        Self::pending(M::map(step, Pending::Ready))
    }

    fn pending(state: M::F<Pending<M, E, A>>) -> Self {
        Self { state }
    }

    /// Wrap an already computed step.
    pub fn from_step(step: Step<M, E, A>) -> Self {
        Self::pending(M::pure(Pending::Ready(step)))
    }

    /// A consumer waiting for input.
    pub fn cont<K>(on_input: K, on_end: M::F<A>) -> Self
    where
        K: FnOnce(Batch<E>) -> Self + Send + 'static,
    {
        Self::from_step(Step::cont(on_input, on_end))
    }

    /// A finished consumer with no leftovers.
    pub fn done(value: A) -> Self {
        Self::from_step(Step::done(value))
    }

    /// A finished consumer with leftovers.
    pub fn done_with(value: A, remainder: impl Into<VecDeque<E>>) -> Self {
        Self::from_step(Step::done_with(value, remainder))
    }

    /// The effectful step this consumer wraps.
    ///
    /// Leftovers that `flat_map` still owes to a following stage are
    /// delivered first, one stage per loop iteration of
    /// [`Effect::tail_rec_m`], so long chains of stages use constant stack.
    pub fn into_step(self) -> M::F<Step<M, E, A>> {
        M::tail_rec_m::<_, Step<M, E, A>, _>(self.state, |state| {
            M::map(state, |pending| match pending {
                Pending::Ready(step) => ControlFlow::Break(step),
                Pending::Redeliver(k, batch) => ControlFlow::Continue(k.on_input(batch).state),
            })
        })
    }

    /// Deliver any leftovers still owed to a following stage.
    ///
    /// [`feed`](Self::feed) settles before returning, and stepping or running
    /// a consumer always settles first. Call this before
    /// [`inspect`](Self::inspect) on a consumer returned by `flat_map` or by
    /// [`Continuation::on_input`].
    pub fn settle(self) -> Self {
        Self::new(self.into_step())
    }

    /// Deliver one non-empty batch.
    ///
    /// A waiting consumer hands the batch to its continuation. A finished
    /// consumer keeps its value and appends the batch to its leftovers.
    pub fn feed(self, batch: Batch<E>) -> Self {
        Self::pending(M::bind(self.into_step(), move |step| match step {
            Step::Continue(k) => k.on_input(batch).state,
            Step::Done {
                value,
                mut remainder,
            } => {
                remainder.extend(batch);
                M::pure(Pending::Ready(Step::Done { value, remainder }))
            }
        }))
        .settle()
    }

    /// Deliver `input` as one batch; an empty `input` is not delivered.
    pub fn feed_vec(self, input: Vec<E>) -> Self {
        match Batch::from_vec(input) {
            Some(batch) => self.feed(batch),
            None => self,
        }
    }

    /// Deliver every batch in order.
    pub fn feed_all<I>(self, batches: I) -> Self
    where
        I: IntoIterator<Item = Batch<E>>,
    {
        batches.into_iter().fold(self, Self::feed)
    }

    /// The final result assuming no more input will ever arrive.
    ///
    /// Leftovers of a finished consumer are discarded.
    pub fn run(self) -> M::F<A> {
        M::bind(self.into_step(), |step| match step {
            Step::Continue(k) => k.on_end(),
            Step::Done { value, .. } => M::pure(value),
        })
    }

    /// Transform the eventual result without changing what is consumed.
    pub fn map<B, F>(self, f: F) -> Consumer<M, E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        Consumer::new(M::map(self.into_step(), move |step| step.map(f)))
    }

    /// Transform the eventual result with an effectful function.
    pub fn map_m<B, F>(self, f: F) -> Consumer<M, E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> M::F<B> + Send + 'static,
    {
        Consumer::new(M::bind(self.into_step(), move |step| match step {
            Step::Continue(inner) => M::pure(Step::Continue(Box::new(MapMCont { inner, f }))),
            Step::Done { value, remainder } => {
                M::map(f(value), move |value| Step::Done { value, remainder })
            }
        }))
    }

    /// Sequence a second consumer over the same input stream.
    ///
    /// When this consumer finishes with leftovers, they are delivered to the
    /// consumer built by `f` before any new input. If that consumer is
    /// already finished the leftovers are appended to its own.
    ///
    /// Delivery is lazy: a stage that keeps finishing part way through a
    /// batch and sequencing the next one runs in a loop, not by recursion.
    pub fn flat_map<B, F>(self, f: F) -> Consumer<M, E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Consumer<M, E, B> + Send + 'static,
    {
        Consumer::pending(M::bind(self.into_step(), move |step| match step {
            Step::Continue(inner) => M::pure(Pending::Ready(Step::Continue(Box::new(
                FlatMapCont { inner, f },
            )))),
            Step::Done { value, remainder } => f(value).owe(remainder),
        }))
    }

    /// This consumer with `leftovers` queued ahead of any later input.
    fn owe(self, leftovers: VecDeque<E>) -> M::F<Pending<M, E, A>> {
        let Some(batch) = Batch::from_deque(leftovers) else {
            return self.state;
        };
        M::map(self.into_step(), move |step| match step {
            Step::Continue(k) => Pending::Redeliver(k, batch),
            Step::Done {
                value,
                mut remainder,
            } => {
                remainder.extend(batch);
                Pending::Ready(Step::Done { value, remainder })
            }
        })
    }

    /// Accept elements of type `E2` by converting each one before delivery.
    ///
    /// Leftovers are reported as the suffix of the most recent `E2` batch
    /// with the same length as the inner leftovers. This is exact when the
    /// inner leftovers are an unconsumed tail of that batch, which holds for
    /// every primitive and for `flat_map` into stages that read input.
    ///
    /// Any other leftovers are an unsupported composition: there is no `E2`
    /// element to report for them. That covers leftovers that existed before
    /// adaptation, and leftovers of a `flat_map` into a stage that was
    /// already finished with leftovers of its own. Those are never converted
    /// back; the same-length suffix is reported instead, and any excess over
    /// the batch length is dropped with a warning.
    pub fn contramap<E2, G>(self, g: G) -> Consumer<M, E2, A>
    where
        E2: Send + 'static,
        G: Fn(&E2) -> E + Send + 'static,
    {
        self.contramap_after(g, VecDeque::new())
    }

    fn contramap_after<E2, G>(self, g: G, source: VecDeque<E2>) -> Consumer<M, E2, A>
    where
        E2: Send + 'static,
        G: Fn(&E2) -> E + Send + 'static,
    {
        Consumer::new(M::map(self.into_step(), move |step| match step {
            Step::Continue(inner) => Step::Continue(Box::new(ContramapCont { inner, g })),
            Step::Done { value, remainder } => Step::Done {
                value,
                remainder: source_suffix(source, remainder.len()),
            },
        }))
    }
}

impl<M, E, A> Consumer<M, E, A>
where
    M: ErrorEffect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// Substitute `recover(error)` when producing a step fails.
    ///
    /// Applies to this step and every later one, including end of input.
    /// Consumers returned by `recover` are not guarded themselves.
    pub fn handle_error_with<H>(self, recover: H) -> Self
    where
        H: Fn(M::Error) -> Self + Send + Sync + 'static,
    {
        self.recover_with(Arc::new(recover))
    }

    fn recover_with<H>(self, recover: Arc<H>) -> Self
    where
        H: Fn(M::Error) -> Self + Send + Sync + 'static,
    {
        let on_failure = Arc::clone(&recover);
        let guarded = M::map(self.into_step(), move |step| match step {
            Step::Continue(inner) => {
                Pending::Ready(Step::Continue(Box::new(RecoverCont { inner, recover })))
            }
            done => Pending::Ready(done),
        });

        Self::pending(M::handle_error_with(guarded, move |error| {
            on_failure(error).state
        }))
    }
}

impl<M, E, A> Consumer<M, E, A>
where
    M: Inspect,
    E: Send + 'static,
    A: Send + 'static,
{
    /// The current step, if it is already computed and did not fail.
    ///
    /// Also `None` while leftovers are still owed to a following stage; see
    /// [`settle`](Self::settle).
    pub fn inspect(&self) -> Option<&Step<M, E, A>> {
        match M::inspect(&self.state)? {
            Pending::Ready(step) => Some(step),
            Pending::Redeliver(..) => None,
        }
    }

    /// Returns `true` if the current step is computed and `Done`.
    pub fn is_done(&self) -> bool {
        self.inspect().is_some_and(Step::is_done)
    }
}

/// Last `count` elements of `source`, in order.
fn source_suffix<T>(mut source: VecDeque<T>, count: usize) -> VecDeque<T> {
    if count > source.len() {
        warn!(
            leftovers = count,
            recoverable = source.len(),
            "contramap dropped leftovers with no source element"
        );
    }
    let start = source.len().saturating_sub(count);
    source.split_off(start)
}

struct MapMCont<M, E, A, F>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    inner: Box<dyn Continuation<M, E, A>>,
    f: F,
}

impl<M, E, A, B, F> Continuation<M, E, B> for MapMCont<M, E, A, F>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    F: FnOnce(A) -> M::F<B> + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, B> {
        let this = *self;
        this.inner.on_input(batch).map_m(this.f)
    }

    fn on_end(self: Box<Self>) -> M::F<B> {
        let this = *self;
        M::bind(this.inner.on_end(), this.f)
    }
}

struct FlatMapCont<M, E, A, F>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    inner: Box<dyn Continuation<M, E, A>>,
    f: F,
}

impl<M, E, A, B, F> Continuation<M, E, B> for FlatMapCont<M, E, A, F>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    F: FnOnce(A) -> Consumer<M, E, B> + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, B> {
        let this = *self;
        this.inner.on_input(batch).flat_map(this.f)
    }

    fn on_end(self: Box<Self>) -> M::F<B> {
        let this = *self;
        let f = this.f;
        M::bind(this.inner.on_end(), move |value| f(value).run())
    }
}

struct ContramapCont<M, E, A, G>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    inner: Box<dyn Continuation<M, E, A>>,
    g: G,
}

impl<M, E, E2, A, G> Continuation<M, E2, A> for ContramapCont<M, E, A, G>
where
    M: Effect,
    E: Send + 'static,
    E2: Send + 'static,
    A: Send + 'static,
    G: Fn(&E2) -> E + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E2>) -> Consumer<M, E2, A> {
        let this = *self;
        let mapped = Batch::new(
            (this.g)(batch.head()),
            batch.iter().skip(1).map(&this.g).collect(),
        );
        this.inner
            .on_input(mapped)
            .contramap_after(this.g, batch.into_deque())
    }

    fn on_end(self: Box<Self>) -> M::F<A> {
        let this = *self;
        this.inner.on_end()
    }
}

struct RecoverCont<M, E, A, H>
where
    M: Effect,
    E: Send + 'static,
    A: Send + 'static,
{
    inner: Box<dyn Continuation<M, E, A>>,
    recover: Arc<H>,
}

impl<M, E, A, H> Continuation<M, E, A> for RecoverCont<M, E, A, H>
where
    M: ErrorEffect,
    E: Send + 'static,
    A: Send + 'static,
    H: Fn(M::Error) -> Consumer<M, E, A> + Send + Sync + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, A> {
        let this = *self;
        this.inner.on_input(batch).recover_with(this.recover)
    }

    fn on_end(self: Box<Self>) -> M::F<A> {
        let this = *self;
        let recover = this.recover;
        M::handle_error_with(this.inner.on_end(), move |error| recover(error).run())
    }
}
