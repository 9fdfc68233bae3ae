//! Synchronous fallible carrier over `Result`.

use super::{Effect, ErrorEffect, Inspect};
use std::fmt;
use std::marker::PhantomData;
use std::ops::ControlFlow;

/// Effect whose values are `Result<T, Err>`.
///
/// Binds run immediately and short-circuit on the first `Err`.
pub struct Attempt<Err>(PhantomData<fn() -> Err>);

impl<Err> fmt::Debug for Attempt<Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Attempt")
    }
}

impl<Err: Send + 'static> Effect for Attempt<Err> {
    type F<T: Send + 'static> = Result<T, Err>;

    fn pure<T: Send + 'static>(value: T) -> Result<T, Err> {
        Ok(value)
    }

    fn bind<A, B, K>(fa: Result<A, Err>, k: K) -> Result<B, Err>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> Result<B, Err> + Send + 'static,
    {
        fa.and_then(k)
    }

    fn map<A, B, K>(fa: Result<A, Err>, f: K) -> Result<B, Err>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> B + Send + 'static,
    {
        fa.map(f)
    }

    fn tail_rec_m<S, A, K>(init: S, mut step: K) -> Result<A, Err>
    where
        S: Send + 'static,
        A: Send + 'static,
        K: FnMut(S) -> Result<ControlFlow<A, S>, Err> + Send + 'static,
    {
        let mut state = init;
        loop {
            match step(state)? {
                ControlFlow::Continue(next) => state = next,
                ControlFlow::Break(done) => return Ok(done),
            }
        }
    }
}

impl<Err: Send + 'static> ErrorEffect for Attempt<Err> {
    type Error = Err;

    fn raise_error<T: Send + 'static>(error: Err) -> Result<T, Err> {
        Err(error)
    }

    fn handle_error_with<T, H>(fa: Result<T, Err>, recover: H) -> Result<T, Err>
    where
        T: Send + 'static,
        H: FnOnce(Err) -> Result<T, Err> + Send + 'static,
    {
        fa.or_else(recover)
    }
}

impl<Err: Send + 'static> Inspect for Attempt<Err> {
    fn inspect<T: Send + 'static>(fa: &Result<T, Err>) -> Option<&T> {
        fa.as_ref().ok()
    }
}
