//! Macros for building input batches.

/// Build a non-empty [`Batch`](crate::core::Batch) from one or more elements.
///
/// An empty invocation does not compile.
///
/// # Example
///
/// ```
/// use tributary::batch;
/// use tributary::core::Consumer;
/// use tributary::effect::Id;
/// use tributary::primitives::consume;
///
/// let consumer: Consumer<Id, &str, Vec<&str>> = consume();
/// let consumer = consumer.feed(batch!["a", "b"]).feed(batch!["c"]);
///
/// assert_eq!(consumer.run(), vec!["a", "b", "c"]);
/// ```
#[macro_export]
macro_rules! batch {
    ($head:expr $(, $tail:expr)* $(,)?) => {
        $crate::core::Batch::new($head, vec![$($tail),*])
    };
}
