//! Element access and iteration over wrapped collections.

use std::sync::Arc;

use super::Validatable;
use crate::constraint::Metadata;
use crate::path::Path;
use crate::registry::SharedRegistry;

/// Values that expose a slice of elements borrowed for `'v`.
///
/// Implemented for borrowed slices, arrays and vectors, and for `Option` of
/// any of them so that absent collections behave like empty ones.
pub trait Elements<'v> {
    /// The element type.
    type Item: 'v;

    /// The elements, or `None` when the collection itself is absent.
    fn elements(&self) -> Option<&'v [Self::Item]>;
}

impl<'v, E> Elements<'v> for &'v [E] {
    type Item = E;

    fn elements(&self) -> Option<&'v [E]> {
        Some(*self)
    }
}

impl<'v, E, const N: usize> Elements<'v> for &'v [E; N] {
    type Item = E;

    fn elements(&self) -> Option<&'v [E]> {
        Some(self.as_slice())
    }
}

impl<'v, E> Elements<'v> for &'v Vec<E> {
    type Item = E;

    fn elements(&self) -> Option<&'v [E]> {
        Some(self.as_slice())
    }
}

impl<'v, S: Elements<'v>> Elements<'v> for Option<S> {
    type Item = S::Item;

    fn elements(&self) -> Option<&'v [S::Item]> {
        self.as_ref().and_then(|inner| inner.elements())
    }
}

impl<'v, T, M> Validatable<T, M>
where
    T: Elements<'v>,
{
    /// Wraps the element at `index`, or `None` when it is out of range.
    ///
    /// The stringified index is used as path segment either way.
    pub fn get(&self, index: usize) -> Validatable<Option<&'v T::Item>, M> {
        let element = self.value().elements().and_then(|items| items.get(index));
        self.child(index.to_string(), element)
    }

    /// Wraps the first element, or `None` for an empty collection.
    pub fn first(&self) -> Validatable<Option<&'v T::Item>, M> {
        self.get(0)
    }

    /// Wraps the last element, or `None` for an empty collection.
    pub fn last(&self) -> Validatable<Option<&'v T::Item>, M> {
        let index = self
            .value()
            .elements()
            .map_or(0, |items| items.len().saturating_sub(1));
        self.get(index)
    }

    /// Number of elements; zero for an absent collection.
    pub fn count(&self) -> usize {
        self.value().elements().map_or(0, <[T::Item]>::len)
    }

    /// Lazily wraps every element, using its index as path segment.
    ///
    /// Each call starts a new pass. Absent or empty collections yield
    /// nothing, and the sequence ends early once fail-fast stops the run.
    pub fn iter(&self) -> ElementsIter<'v, T::Item, M> {
        ElementsIter {
            items: self.value().elements().unwrap_or(&[]),
            index: 0,
            path: self.path().clone(),
            registry: Arc::clone(self.registry()),
            metadata: Arc::clone(&self.metadata),
        }
    }

    /// Runs `block` for every element wrapper, see [`iter`](Self::iter).
    pub fn each(&self, block: impl FnMut(Validatable<&'v T::Item, M>)) {
        self.iter().for_each(block);
    }
}

/// Iterator returned by [`Validatable::iter`].
pub struct ElementsIter<'v, E, M = Metadata> {
    items: &'v [E],
    index: usize,
    path: Path,
    registry: SharedRegistry<M>,
    metadata: Arc<M>,
}

impl<'v, E, M> Iterator for ElementsIter<'v, E, M> {
    type Item = Validatable<&'v E, M>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.items.get(self.index)?;
        if self.registry.lock().check_fail_fast().is_err() {
            self.index = self.items.len();
            return None;
        }

        let index = self.index;
        self.index += 1;
        Some(Validatable {
            value: element,
            path: self.path.push(index.to_string()),
            parent: Some(self.path.clone()),
            registry: Arc::clone(&self.registry),
            metadata: Arc::clone(&self.metadata),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.items.len() - self.index))
    }
}
