//! Append-only storage handing out typed indices.
//!
//! The session keeps every compiled equation in an [`Arena`] and resolves
//! names to the [`ID`] of the first equation that bound them. Entries are
//! never removed, so an [`ID`] stays valid for as long as its arena lives.

use std::{fmt::Debug, marker::PhantomData, ops::Index};

/// A position in an [`Arena`] of `T`.
pub struct ID<T: ?Sized> {
    index: usize,

    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> ID<T> {
    /// Wraps a raw position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index, _marker: PhantomData }
    }

    /// The raw position, which is also the insertion order.
    #[must_use]
    pub const fn index(&self) -> usize { self.index }
}

// manual impls: `T` itself needs none of these traits
impl<T: ?Sized> Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.index)
    }
}

impl<T: ?Sized> Clone for ID<T> {
    fn clone(&self) -> Self { *self }
}

impl<T: ?Sized> Copy for ID<T> {}

impl<T: ?Sized> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T: ?Sized> Eq for ID<T> {}

/// Items of type `T` in insertion order, addressed by [`ID`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena<T> {
    entries: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self { Self::new() }
}

impl<T> Arena<T> {
    /// An arena with no entries.
    #[must_use]
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether nothing has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Appends `item` and returns where it landed.
    pub fn insert(&mut self, item: T) -> ID<T> {
        self.entries.push(item);
        ID::new(self.entries.len() - 1)
    }

    /// Looks up an entry, `None` if `id` came from a larger arena.
    #[must_use]
    pub fn get(&self, id: ID<T>) -> Option<&T> { self.entries.get(id.index) }

    /// Every entry paired with its [`ID`], oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ID<T>, &T)> {
        self.entries.iter().enumerate().map(|(index, item)| (ID::new(index), item))
    }

    /// Every entry, oldest first.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Index<ID<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: ID<T>) -> &Self::Output { &self.entries[id.index] }
}

#[cfg(test)]
mod test;
