//! Non-empty input batches.

use std::collections::{vec_deque, VecDeque};
use std::iter;

/// A non-empty, ordered batch of input elements.
///
/// The first element is held apart from the rest, and the rest live in a
/// `VecDeque`. Splitting off a prefix and handing the others on as leftovers
/// therefore never shifts the elements that remain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch<E> {
    head: E,
    tail: VecDeque<E>,
}

impl<E> Batch<E> {
    /// A batch of `head` followed by `tail`.
    pub fn new(head: E, tail: Vec<E>) -> Self {
        Self {
            head,
            tail: tail.into(),
        }
    }

    /// A batch of exactly one element.
    pub fn singleton(head: E) -> Self {
        Self {
            head,
            tail: VecDeque::new(),
        }
    }

    /// `None` if `items` is empty.
    pub fn from_vec(items: Vec<E>) -> Option<Self> {
        Self::from_deque(items.into())
    }

    /// `None` if `items` is empty.
    pub fn from_deque(mut items: VecDeque<E>) -> Option<Self> {
        let head = items.pop_front()?;
        Some(Self { head, tail: items })
    }

    /// The first element.
    pub fn head(&self) -> &E {
        &self.head
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> iter::Chain<iter::Once<&E>, vec_deque::Iter<'_, E>> {
        iter::once(&self.head).chain(self.tail.iter())
    }

    /// The first element and everything after it.
    pub fn split_first(self) -> (E, VecDeque<E>) {
        (self.head, self.tail)
    }

    pub fn into_deque(self) -> VecDeque<E> {
        let mut items = self.tail;
        items.push_front(self.head);
        items
    }

    pub fn into_vec(self) -> Vec<E> {
        self.into_deque().into()
    }
}

impl<E> IntoIterator for Batch<E> {
    type Item = E;
    type IntoIter = iter::Chain<iter::Once<E>, vec_deque::IntoIter<E>>;

    fn into_iter(self) -> Self::IntoIter {
        iter::once(self.head).chain(self.tail)
    }
}
