//! Synchronous identity carrier.

use super::{Effect, Inspect};
use std::ops::ControlFlow;

/// The identity effect: `F<T> = T`.
///
/// Every bind runs immediately. Useful for pure consumers and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Id;

impl Effect for Id {
    type F<T: Send + 'static> = T;

    fn pure<T: Send + 'static>(value: T) -> T {
        value
    }

    fn bind<A, B, K>(fa: A, k: K) -> B
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> B + Send + 'static,
    {
        k(fa)
    }

    fn map<A, B, K>(fa: A, f: K) -> B
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> B + Send + 'static,
    {
        f(fa)
    }

    fn tail_rec_m<S, A, K>(init: S, mut step: K) -> A
    where
        S: Send + 'static,
        A: Send + 'static,
        K: FnMut(S) -> ControlFlow<A, S> + Send + 'static,
    {
        let mut state = init;
        loop {
            match step(state) {
                ControlFlow::Continue(next) => state = next,
                ControlFlow::Break(done) => return done,
            }
        }
    }
}

impl Inspect for Id {
    fn inspect<T: Send + 'static>(fa: &T) -> Option<&T> {
        Some(fa)
    }
}
