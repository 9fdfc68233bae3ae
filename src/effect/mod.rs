//! Effect capabilities required by consumers.
//!
//! A [`Consumer`](crate::core::Consumer) never runs anything itself. Every
//! transition from one step to the next is sequenced through the capability
//! set defined here, so the same consumer algebra works over a synchronous
//! identity, a `Result`, or a lazy asynchronous Stillwater effect.
//!
//! # Capabilities
//!
//! - [`Effect`]: `pure`, `bind` (sequencing) and `tail_rec_m` (looping in
//!   constant stack). Required by every combinator.
//! - [`ErrorEffect`]: `raise_error` and `handle_error_with`. Required only by
//!   error-aware combinators such as [`Consumer::handle_error_with`](crate::core::Consumer::handle_error_with).
//! - [`Inspect`]: synchronous access to an already computed value. Used by
//!   [`Driver::drive`](crate::drive::Driver::drive) to stop pulling input early.
//!
//! # Carriers
//!
//! | Carrier | `F<T>` | Errors | Inspect |
//! |---------|--------|--------|---------|
//! | [`Id`] | `T` | no | yes |
//! | [`Attempt<Err>`] | `Result<T, Err>` | yes | yes |
//! | [`Deferred<Err, Env>`] | `BoxedEffect<T, Err, Env>` | yes | no |

mod attempt;
mod deferred;
mod id;

pub use attempt::Attempt;
pub use deferred::Deferred;
pub use id::Id;

use std::ops::ControlFlow;

/// Sequencing capability over a higher-kinded effect type `F<T>`.
///
/// Implementors are zero-sized markers; the values flowing through a consumer
/// have type [`Effect::F`].
pub trait Effect: Sized + 'static {
    /// The effectful value carrying a `T`.
    type F<T: Send + 'static>: Send + 'static;

    /// Embed a value with no effect.
    fn pure<T: Send + 'static>(value: T) -> Self::F<T>;

    /// Sequence `fa` with a function producing the next effectful value.
    fn bind<A, B, K>(fa: Self::F<A>, k: K) -> Self::F<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> Self::F<B> + Send + 'static;

    /// Transform the carried value.
    ///
    /// Carriers with a native map should override this.
    fn map<A, B, K>(fa: Self::F<A>, f: K) -> Self::F<B>
    where
        A: Send + 'static,
        B: Send + 'static,
        K: FnOnce(A) -> B + Send + 'static,
    {
        Self::bind(fa, move |a| Self::pure(f(a)))
    }

    /// Run `step` on `init`, then on each state it continues with, until it
    /// breaks with a result.
    ///
    /// Implementations loop instead of nesting binds, so the number of
    /// iterations never grows the stack.
    fn tail_rec_m<S, A, K>(init: S, step: K) -> Self::F<A>
    where
        S: Send + 'static,
        A: Send + 'static,
        K: FnMut(S) -> Self::F<ControlFlow<A, S>> + Send + 'static;
}

/// Typed error capability: raise and recover.
pub trait ErrorEffect: Effect {
    /// Error type carried by the effect's own error channel.
    type Error: Send + 'static;

    /// An effectful value that fails with `error`.
    fn raise_error<T: Send + 'static>(error: Self::Error) -> Self::F<T>;

    /// Recover from a failure of `fa` with `recover`.
    ///
    /// Failures raised by the value `recover` returns are not intercepted.
    fn handle_error_with<T, H>(fa: Self::F<T>, recover: H) -> Self::F<T>
    where
        T: Send + 'static,
        H: FnOnce(Self::Error) -> Self::F<T> + Send + 'static;
}

/// Synchronous access to an effectful value that is already computed.
///
/// Returns `None` when the value is a failure.
pub trait Inspect: Effect {
    /// The computed value, or `None` if `fa` is a failure.
    fn inspect<T: Send + 'static>(fa: &Self::F<T>) -> Option<&T>;
}
