//! Consumers that may stop part way through a batch.
//!
//! Whatever a consumer here does not read is reported as leftovers, in
//! arrival order, so a following stage sees it first.

use crate::core::{Batch, Consumer, Continuation, Step};
use crate::effect::Effect;

struct Head;

impl<M, E> Continuation<M, E, Option<E>> for Head
where
    M: Effect,
    E: Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, Option<E>> {
        let (first, rest) = batch.split_first();
        Consumer::done_with(Some(first), rest)
    }

    fn on_end(self: Box<Self>) -> M::F<Option<E>> {
        M::pure(None)
    }
}

struct Peek;

impl<M, E> Continuation<M, E, Option<E>> for Peek
where
    M: Effect,
    E: Clone + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, Option<E>> {
        let first = batch.head().clone();
        Consumer::done_with(Some(first), batch.into_deque())
    }

    fn on_end(self: Box<Self>) -> M::F<Option<E>> {
        M::pure(None)
    }
}

struct IsEnd;

impl<M, E> Continuation<M, E, bool> for IsEnd
where
    M: Effect,
    E: Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, bool> {
        Consumer::done_with(false, batch.into_deque())
    }

    fn on_end(self: Box<Self>) -> M::F<bool> {
        M::pure(true)
    }
}

struct Take<E> {
    acc: Vec<E>,
    remaining: usize,
}

impl<M, E> Continuation<M, E, Vec<E>> for Take<E>
where
    M: Effect,
    E: Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, Vec<E>> {
        let Take { mut acc, remaining } = *self;

        if batch.len() < remaining {
            let remaining = remaining - batch.len();
            acc.extend(batch);
            return Consumer::from_step(Step::Continue(Box::new(Take { acc, remaining })));
        }

        let mut items = batch.into_deque();
        acc.extend(items.drain(..remaining));
        Consumer::done_with(acc, items)
    }

    fn on_end(self: Box<Self>) -> M::F<Vec<E>> {
        M::pure(self.acc)
    }
}

struct TakeWhile<E, P> {
    acc: Vec<E>,
    predicate: P,
}

impl<M, E, P> Continuation<M, E, Vec<E>> for TakeWhile<E, P>
where
    M: Effect,
    E: Send + 'static,
    P: Fn(&E) -> bool + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, Vec<E>> {
        let TakeWhile { mut acc, predicate } = *self;

        match batch.iter().position(|e| !predicate(e)) {
            Some(split) => {
                let mut items = batch.into_deque();
                acc.extend(items.drain(..split));
                Consumer::done_with(acc, items)
            }
            None => {
                acc.extend(batch);
                Consumer::from_step(Step::Continue(Box::new(TakeWhile { acc, predicate })))
            }
        }
    }

    fn on_end(self: Box<Self>) -> M::F<Vec<E>> {
        M::pure(self.acc)
    }
}

struct Skip {
    remaining: usize,
}

impl<M, E> Continuation<M, E, ()> for Skip
where
    M: Effect,
    E: Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, ()> {
        if batch.len() < self.remaining {
            let remaining = self.remaining - batch.len();
            return Consumer::from_step(Step::Continue(Box::new(Skip { remaining })));
        }

        let mut items = batch.into_deque();
        items.drain(..self.remaining);
        Consumer::done_with((), items)
    }

    fn on_end(self: Box<Self>) -> M::F<()> {
        M::pure(())
    }
}

struct SkipWhile<P> {
    predicate: P,
}

impl<M, E, P> Continuation<M, E, ()> for SkipWhile<P>
where
    M: Effect,
    E: Send + 'static,
    P: Fn(&E) -> bool + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, ()> {
        match batch.iter().position(|e| !(self.predicate)(e)) {
            Some(split) => {
                let mut items = batch.into_deque();
                items.drain(..split);
                Consumer::done_with((), items)
            }
            None => Consumer::from_step(Step::Continue(self)),
        }
    }

    fn on_end(self: Box<Self>) -> M::F<()> {
        M::pure(())
    }
}

/// The first element; the rest of its batch is left over.
///
/// Ends with `None` if the stream is empty.
pub fn head<M, E>() -> Consumer<M, E, Option<E>>
where
    M: Effect,
    E: Send + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(Head)))
}

/// The first element, without consuming it.
pub fn peek<M, E>() -> Consumer<M, E, Option<E>>
where
    M: Effect,
    E: Clone + Send + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(Peek)))
}

/// Whether the stream has ended. Never consumes input.
pub fn is_end<M, E>() -> Consumer<M, E, bool>
where
    M: Effect,
    E: Send + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(IsEnd)))
}

/// Up to `n` elements.
///
/// Once `n` are collected, the rest of the triggering batch is left over.
/// `take(0)` is finished before reading anything.
///
/// ```rust
/// use tributary::core::{Consumer, Step};
/// use tributary::effect::Id;
/// use tributary::primitives::take;
///
/// let first_two: Consumer<Id, i32, Vec<i32>> = take(2);
/// let step = first_two.feed_vec(vec![1, 2, 3]).into_step();
///
/// assert_eq!(step.into_done(), Some((vec![1, 2], vec![3])));
/// ```
pub fn take<M, E>(n: usize) -> Consumer<M, E, Vec<E>>
where
    M: Effect,
    E: Send + 'static,
{
    if n == 0 {
        return Consumer::done(Vec::new());
    }

    Consumer::from_step(Step::Continue(Box::new(Take {
        acc: Vec::new(),
        remaining: n,
    })))
}

/// Elements up to the first one failing `predicate`, which is left over.
pub fn take_while<M, E, P>(predicate: P) -> Consumer<M, E, Vec<E>>
where
    M: Effect,
    E: Send + 'static,
    P: Fn(&E) -> bool + Send + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(TakeWhile {
        acc: Vec::new(),
        predicate,
    })))
}

/// Skip `n` elements; the rest of the batch that reaches `n` is left over.
pub fn drop<M, E>(n: usize) -> Consumer<M, E, ()>
where
    M: Effect,
    E: Send + 'static,
{
    if n == 0 {
        return Consumer::done(());
    }

    Consumer::from_step(Step::Continue(Box::new(Skip { remaining: n })))
}

/// Skip elements while `predicate` holds; the first failing one is left over.
pub fn drop_while<M, E, P>(predicate: P) -> Consumer<M, E, ()>
where
    M: Effect,
    E: Send + 'static,
    P: Fn(&E) -> bool + Send + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(SkipWhile { predicate })))
}
