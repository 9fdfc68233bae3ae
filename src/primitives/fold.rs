//! Consumers that read the entire stream.

use crate::core::{Batch, Consumer, Continuation, Step};
use crate::effect::Effect;
use std::ops::{Add, ControlFlow};
use std::sync::Arc;
use stillwater::{Monoid, Semigroup};

struct Fold<B, F> {
    acc: B,
    f: F,
}

impl<M, E, B, F> Continuation<M, E, B> for Fold<B, F>
where
    M: Effect,
    E: Send + 'static,
    B: Send + 'static,
    F: Fn(B, E) -> B + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, B> {
        let Fold { acc, f } = *self;
        let acc = batch.into_iter().fold(acc, &f);
        Consumer::from_step(Step::Continue(Box::new(Fold { acc, f })))
    }

    fn on_end(self: Box<Self>) -> M::F<B> {
        M::pure(self.acc)
    }
}

struct FoldM<B, F> {
    acc: B,
    f: Arc<F>,
}

impl<M, E, B, F> Continuation<M, E, B> for FoldM<B, F>
where
    M: Effect,
    E: Send + 'static,
    B: Send + 'static,
    F: Fn(B, E) -> M::F<B> + Send + Sync + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, B> {
        let FoldM { acc, f } = *self;
        let step = Arc::clone(&f);
        let folded = M::tail_rec_m::<_, B, _>((acc, batch.into_iter()), move |(acc, mut items)| {
            match items.next() {
                Some(element) => M::map(step(acc, element), move |acc| {
                    ControlFlow::Continue((acc, items))
                }),
                None => M::pure(ControlFlow::Break(acc)),
            }
        });
        Consumer::new(M::map(folded, move |acc| {
            Step::Continue(Box::new(FoldM { acc, f }))
        }))
    }

    fn on_end(self: Box<Self>) -> M::F<B> {
        M::pure(self.acc)
    }
}

struct Collect<C> {
    acc: C,
}

impl<M, E, C> Continuation<M, E, C> for Collect<C>
where
    M: Effect,
    E: Send + 'static,
    C: Extend<E> + Send + 'static,
{
    fn on_input(self: Box<Self>, batch: Batch<E>) -> Consumer<M, E, C> {
        let mut acc = self.acc;
        acc.extend(batch);
        Consumer::from_step(Step::Continue(Box::new(Collect { acc })))
    }

    fn on_end(self: Box<Self>) -> M::F<C> {
        M::pure(self.acc)
    }
}

/// Thread an accumulator through every element in arrival order.
pub fn fold<M, E, B, F>(init: B, f: F) -> Consumer<M, E, B>
where
    M: Effect,
    E: Send + 'static,
    B: Send + 'static,
    F: Fn(B, E) -> B + Send + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(Fold { acc: init, f })))
}

/// Like [`fold`], with an effectful step function.
///
/// Each element's effect runs after the previous one, in arrival order.
///
/// ```rust
/// use tributary::core::Consumer;
/// use tributary::effect::Attempt;
/// use tributary::primitives::fold_m;
///
/// let checked: Consumer<Attempt<String>, u32, u32> = fold_m(0, |acc, x: u32| {
///     acc.checked_add(x).ok_or_else(|| "overflow".to_string())
/// });
///
/// assert_eq!(checked.feed_vec(vec![u32::MAX, 1]).run(), Err("overflow".to_string()));
/// ```
pub fn fold_m<M, E, B, F>(init: B, f: F) -> Consumer<M, E, B>
where
    M: Effect,
    E: Send + 'static,
    B: Send + 'static,
    F: Fn(B, E) -> M::F<B> + Send + Sync + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(FoldM {
        acc: init,
        f: Arc::new(f),
    })))
}

/// Collect every element into a `Vec`, in arrival order.
pub fn consume<M, E>() -> Consumer<M, E, Vec<E>>
where
    M: Effect,
    E: Send + 'static,
{
    consume_in()
}

/// Collect every element into any extendable container, in arrival order.
pub fn consume_in<M, E, C>() -> Consumer<M, E, C>
where
    M: Effect,
    E: Send + 'static,
    C: Default + Extend<E> + Send + 'static,
{
    Consumer::from_step(Step::Continue(Box::new(Collect { acc: C::default() })))
}

/// Map every element into a monoid and combine the results.
pub fn fold_map<M, E, B, F>(f: F) -> Consumer<M, E, B>
where
    M: Effect,
    E: Send + 'static,
    B: Monoid + Send + 'static,
    F: Fn(E) -> B + Send + 'static,
{
    fold(B::empty(), move |acc: B, element| acc.combine(f(element)))
}

/// Add up every element.
pub fn sum<M, E>() -> Consumer<M, E, E>
where
    M: Effect,
    E: Add<Output = E> + Default + Send + 'static,
{
    fold(E::default(), |total, element| total + element)
}

/// Count every element.
pub fn length<M, E>() -> Consumer<M, E, usize>
where
    M: Effect,
    E: Send + 'static,
{
    fold(0, |count, _| count + 1)
}

/// Collect every element in reverse arrival order.
pub fn reverse<M, E>() -> Consumer<M, E, Vec<E>>
where
    M: Effect,
    E: Send + 'static,
{
    consume().map(|mut items: Vec<E>| {
        items.reverse();
        items
    })
}

/// The final element of the stream, if any.
pub fn last<M, E>() -> Consumer<M, E, Option<E>>
where
    M: Effect,
    E: Send + 'static,
{
    fold(None, |_, element| Some(element))
}

/// Read and ignore the entire stream.
pub fn discard<M, E>() -> Consumer<M, E, ()>
where
    M: Effect,
    E: Send + 'static,
{
    fold((), |(), _| ())
}

/// Run `f` once per delivered element, in delivery order.
pub fn foreach<M, E, F>(f: F) -> Consumer<M, E, ()>
where
    M: Effect,
    E: Send + 'static,
    F: Fn(E) + Send + 'static,
{
    fold((), move |(), element| f(element))
}

/// Run the effect `f` builds once per delivered element, in delivery order.
pub fn foreach_m<M, E, F>(f: F) -> Consumer<M, E, ()>
where
    M: Effect,
    E: Send + 'static,
    F: Fn(E) -> M::F<()> + Send + Sync + 'static,
{
    fold_m((), move |(), element| f(element))
}
