//! Process-local identity for editor list entries
//!
//! Rows in the editor are rebuilt from the model on every render, so open
//! editors and drag state are keyed by an [`EntryId`] rather than by list
//! position. The identity lives in the [`Tracked`] wrapper next to the entry,
//! never inside the serializable entry itself, and is assigned lazily the
//! first time anyone asks for it.

use once_cell::sync::OnceCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

/// Next identity to hand out
static NEXT_UID: AtomicU64 = AtomicU64::new(1);

/// Identity of an editor entry, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    fn next() -> Self {
        EntryId(NEXT_UID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entry plus its lazily assigned identity.
///
/// Equality only looks at the entry. Cloning produces a distinct entry with
/// no identity yet.
pub struct Tracked<T> {
    uid: OnceCell<EntryId>,
    entry: T,
}

impl<T> Tracked<T> {
    /// Wrap an entry without assigning an identity
    pub fn new(entry: T) -> Self {
        Self {
            uid: OnceCell::new(),
            entry,
        }
    }

    /// Wrap an entry and assign its identity immediately
    pub fn identified(entry: T) -> Self {
        let tracked = Self::new(entry);
        tracked.ensure_uid();
        tracked
    }

    /// Identity of this entry, assigning the next one on first call
    #[inline]
    pub fn ensure_uid(&self) -> EntryId {
        *self.uid.get_or_init(EntryId::next)
    }

    /// Identity if one was assigned already
    #[inline]
    pub fn uid(&self) -> Option<EntryId> {
        self.uid.get().copied()
    }

    #[inline]
    pub fn entry(&self) -> &T {
        &self.entry
    }

    #[inline]
    pub fn entry_mut(&mut self) -> &mut T {
        &mut self.entry
    }

    pub fn into_inner(self) -> T {
        self.entry
    }
}

/// Assign an identity to `entry` unless it already has one
#[inline]
pub fn ensure_uid<T>(entry: &Tracked<T>) -> EntryId {
    entry.ensure_uid()
}

/// Current position of the entry with identity `uid`
pub fn position_of<T>(list: &[Tracked<T>], uid: EntryId) -> Option<usize> {
    list.iter().position(|item| item.uid() == Some(uid))
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entry
    }
}

impl<T> DerefMut for Tracked<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.entry
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        Self::new(self.entry.clone())
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry
    }
}

impl<T: Default> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("uid", &self.uid())
            .field("entry", &self.entry)
            .finish()
    }
}

impl<T> From<T> for Tracked<T> {
    fn from(entry: T) -> Self {
        Self::new(entry)
    }
}
