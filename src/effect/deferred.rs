//! Lazy asynchronous carrier over Stillwater's `BoxedEffect`.
//!
//! Values of this carrier describe work; nothing runs until the caller
//! executes the effect with Stillwater's `Effect::run(&env).await`.
//! Errors travel on Stillwater's error channel (`fail`, `or_else`).

use super::{Effect, ErrorEffect};
use std::fmt;
use std::marker::PhantomData;
use std::ops::ControlFlow;
use stillwater::effect::{BoxedEffect, Effect as _, EffectExt};

/// Effect whose values are `BoxedEffect<T, Err, Env>`.
///
/// Following Stillwater 0.11 conventions each combinator is boxed once so
/// consumers can store continuations of a single nameable type.
pub struct Deferred<Err, Env>(PhantomData<fn() -> (Err, Env)>);

impl<Err, Env> fmt::Debug for Deferred<Err, Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

impl<Err, Env> Effect for Deferred<Err, Env>
where
    Err: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    type F<T: Send + 'static> = BoxedEffect<T, Err, Env>;

    fn pure<T: Send + 'static>(value: T) -> BoxedEffect<T, Err, Env> {
        stillwater::pure::<T, Err, Env>(value).boxed()
    }

    fn bind<A, B, K>(fa: BoxedEffect<A, Err, Env>, k: K) -> BoxedEffect<B, Err, Env>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> BoxedEffect<B, Err, Env> + Send + 'static,
    {
        fa.and_then(k).boxed()
    }

    fn map<A, B, K>(fa: BoxedEffect<A, Err, Env>, f: K) -> BoxedEffect<B, Err, Env>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> B + Send + 'static,
    {
        EffectExt::map(fa, f).boxed()
    }

    fn tail_rec_m<S, A, K>(init: S, mut step: K) -> BoxedEffect<A, Err, Env>
    where
        S: Send + 'static,
        A: Send + 'static,
        K: FnMut(S) -> BoxedEffect<ControlFlow<A, S>, Err, Env> + Send + 'static,
    {
        // Each iteration is awaited before the next is built.
        stillwater::from_async(move |env: &Env| {
            let env = env.clone();
            async move {
                let mut state = init;
                loop {
                    match step(state).run(&env).await {
                        Ok(ControlFlow::Continue(next)) => state = next,
                        Ok(ControlFlow::Break(done)) => return Ok(done),
                        Err(error) => return Err(error),
                    }
                }
            }
        })
        .boxed()
    }
}

impl<Err, Env> ErrorEffect for Deferred<Err, Env>
where
    Err: Send + 'static,
    Env: Clone + Send + Sync + 'static,
{
    type Error = Err;

    fn raise_error<T: Send + 'static>(error: Err) -> BoxedEffect<T, Err, Env> {
        stillwater::fail::<T, Err, Env>(error).boxed()
    }

    fn handle_error_with<T, H>(fa: BoxedEffect<T, Err, Env>, recover: H) -> BoxedEffect<T, Err, Env>
    where
        T: Send + 'static,
        H: FnOnce(Err) -> BoxedEffect<T, Err, Env> + Send + 'static,
    {
        fa.or_else(recover).boxed()
    }
}
