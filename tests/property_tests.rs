//! Property-based tests for consumers.
//!
//! These tests use proptest to verify that results do not depend on how the
//! input happens to be split into batches, and that the combinator laws hold
//! across many randomly generated inputs.

use proptest::prelude::*;
use tributary::core::{Consumer, Step};
use tributary::drive::DriverBuilder;
use tributary::effect::{Attempt, Id};
use tributary::primitives::{consume, drop_while, head, length, sum, take, take_while};

/// Final value plus every delivered element the consumer did not use.
fn outcome<A>(consumer: Consumer<Id, i32, A>) -> (A, Vec<i32>)
where
    A: Send + 'static,
{
    match consumer.into_step() {
        Step::Done { value, remainder } => (value, remainder.into()),
        Step::Continue(k) => (k.on_end(), Vec::new()),
    }
}

fn feed_batches<A>(consumer: Consumer<Id, i32, A>, batches: &[Vec<i32>]) -> Consumer<Id, i32, A>
where
    A: Send + 'static,
{
    batches
        .iter()
        .fold(consumer, |consumer, batch| consumer.feed_vec(batch.clone()))
}

/// Sums consecutive pairs by finishing after each pair and starting over.
fn pair_sums(acc: Vec<i32>) -> Consumer<Id, i32, Vec<i32>> {
    take(2).flat_map(move |pair: Vec<i32>| {
        if pair.len() < 2 {
            return Consumer::done(acc);
        }
        let mut acc = acc;
        acc.push(pair.iter().sum());
        pair_sums(acc)
    })
}

fn flatten(batches: &[Vec<i32>]) -> Vec<i32> {
    batches.iter().flatten().copied().collect()
}

prop_compose! {
    fn arbitrary_batches()(
        data in prop::collection::vec(-50i32..50, 0..60),
        cuts in prop::collection::vec(1usize..8, 1..60),
    ) -> Vec<Vec<i32>> {
        let mut batches = Vec::new();
        let mut rest = data.as_slice();
        let mut sizes = cuts.iter().cycle();
        while !rest.is_empty() {
            let size = sizes.next().copied().unwrap_or(1).min(rest.len());
            let (batch, tail) = rest.split_at(size);
            batches.push(batch.to_vec());
            rest = tail;
        }
        batches
    }
}

proptest! {
    #[test]
    fn consume_ignores_batching(batches in arbitrary_batches()) {
        let split = outcome(feed_batches(consume(), &batches));
        let whole = outcome(consume().feed_vec(flatten(&batches)));

        prop_assert_eq!(&split.0, &flatten(&batches));
        prop_assert_eq!(split, whole);
    }

    #[test]
    fn sum_and_length_ignore_batching(batches in arbitrary_batches()) {
        let expected: i32 = flatten(&batches).iter().sum();

        prop_assert_eq!(feed_batches(sum(), &batches).run(), expected);
        prop_assert_eq!(feed_batches(length(), &batches).run(), flatten(&batches).len());
    }

    #[test]
    fn take_ignores_batching(batches in arbitrary_batches(), n in 0usize..20) {
        let data = flatten(&batches);
        let (taken, leftovers) = outcome(feed_batches(take(n), &batches));

        let split = n.min(data.len());
        prop_assert_eq!(taken, data[..split].to_vec());
        if n <= data.len() && !data.is_empty() {
            prop_assert_eq!(leftovers, data[split..].to_vec());
        }
    }

    #[test]
    fn take_while_ignores_batching(batches in arbitrary_batches(), bound in -50i32..50) {
        let data = flatten(&batches);
        let (taken, leftovers) = outcome(feed_batches(take_while(move |x: &i32| *x < bound), &batches));

        let split = data.iter().position(|x| *x >= bound).unwrap_or(data.len());
        prop_assert_eq!(taken, data[..split].to_vec());
        prop_assert_eq!(leftovers, data[split..].to_vec());
    }

    #[test]
    fn flat_map_redelivers_leftovers(
        batches in arbitrary_batches(),
        first in 1usize..10,
        second in 1usize..10,
    ) {
        let data = flatten(&batches);
        let pair: Consumer<Id, i32, (Vec<i32>, Vec<i32>)> =
            take(first).flat_map(move |a| take(second).map(move |b| (a, b)));

        let ((a, b), _) = outcome(feed_batches(pair, &batches));

        let first_end = first.min(data.len());
        let second_end = (first + second).min(data.len());
        prop_assert_eq!(a, data[..first_end].to_vec());
        prop_assert_eq!(b, data[first_end..second_end].to_vec());
    }

    #[test]
    fn self_sequencing_ignores_batching(batches in arbitrary_batches()) {
        let data = flatten(&batches);
        let expected: Vec<i32> = data.chunks_exact(2).map(|pair| pair[0] + pair[1]).collect();

        prop_assert_eq!(feed_batches(pair_sums(Vec::new()), &batches).run(), expected.clone());
        prop_assert_eq!(pair_sums(Vec::new()).feed_vec(data).run(), expected);
    }

    #[test]
    fn drop_while_then_consume_keeps_suffix(batches in arbitrary_batches(), bound in -50i32..50) {
        let data = flatten(&batches);
        let rest: Consumer<Id, i32, Vec<i32>> =
            drop_while(move |x: &i32| *x < bound).flat_map(|()| consume());

        let start = data.iter().position(|x| *x >= bound).unwrap_or(data.len());
        prop_assert_eq!(feed_batches(rest, &batches).run(), data[start..].to_vec());
    }

    #[test]
    fn map_identity_law(batches in arbitrary_batches()) {
        let plain = outcome(feed_batches(take(5), &batches));
        let mapped = outcome(feed_batches(take(5).map(|xs: Vec<i32>| xs), &batches));

        prop_assert_eq!(plain, mapped);
    }

    #[test]
    fn map_composition_law(batches in arbitrary_batches()) {
        let f = |xs: Vec<i32>| xs.len();
        let g = |n: usize| n * 2 + 1;

        let chained = outcome(feed_batches(take(4).map(f).map(g), &batches));
        let composed = outcome(feed_batches(take(4).map(move |xs| g(f(xs))), &batches));

        prop_assert_eq!(chained, composed);
    }

    #[test]
    fn done_only_accumulates_leftovers(
        remainder in prop::collection::vec(-50i32..50, 0..10),
        batches in arbitrary_batches(),
    ) {
        let finished: Consumer<Id, i32, &str> = Consumer::done_with("fixed", remainder.clone());
        let (value, leftovers) = outcome(feed_batches(finished, &batches));

        let mut expected = remainder;
        expected.extend(flatten(&batches));
        prop_assert_eq!(value, "fixed");
        prop_assert_eq!(leftovers, expected);
    }

    #[test]
    fn head_sees_first_element(batches in arbitrary_batches()) {
        let data = flatten(&batches);
        let (first, leftovers) = outcome(feed_batches(head(), &batches));

        prop_assert_eq!(first, data.first().copied());
        prop_assert_eq!(leftovers, data.iter().skip(1).copied().collect::<Vec<_>>());
    }

    #[test]
    fn driver_chunk_size_does_not_change_result(
        data in prop::collection::vec(-50i32..50, 0..80),
        chunk_size in 1usize..16,
    ) {
        let driver = DriverBuilder::new().chunk_size(chunk_size).build().unwrap();
        let mut input = data.clone().into_iter();

        let collect: Consumer<Id, i32, Vec<i32>> = consume();
        let (consumer, report) = driver.drive(collect, &mut input);

        prop_assert_eq!(report.elements_fed, data.len());
        prop_assert_eq!(consumer.run(), data);
    }

    #[test]
    fn driver_leaves_unread_input(
        data in prop::collection::vec(-50i32..50, 0..80),
        chunk_size in 1usize..16,
        n in 0usize..40,
    ) {
        let driver = DriverBuilder::new().chunk_size(chunk_size).build().unwrap();
        let mut input = data.clone().into_iter();

        let first: Consumer<Id, i32, Vec<i32>> = take(n);
        let (consumer, report) = driver.drive(first, &mut input);
        let (taken, leftovers) = outcome(consumer);

        let mut reassembled = taken;
        reassembled.extend(leftovers);
        reassembled.extend(input);
        prop_assert_eq!(reassembled, data.clone());
        prop_assert!(report.elements_fed <= data.len());
    }

    #[test]
    fn attempt_failure_is_batching_independent(batches in arbitrary_batches(), bad in -50i32..50) {
        let checked = || -> Consumer<Attempt<String>, i32, i32> {
            tributary::primitives::fold_m(0, move |acc, x: i32| {
                if x == bad { Err(format!("rejected {}", x)) } else { Ok(acc + x) }
            })
        };

        let data = flatten(&batches);
        let split = batches
            .iter()
            .fold(checked(), |consumer, batch| consumer.feed_vec(batch.clone()))
            .run();
        let whole = checked().feed_vec(data.clone()).run();

        prop_assert_eq!(split.clone(), whole);
        if data.contains(&bad) {
            prop_assert_eq!(split, Err(format!("rejected {}", bad)));
        } else {
            prop_assert_eq!(split, Ok(data.iter().sum::<i32>()));
        }
    }
}
