//! Iterator Module
//!
//! Ordered traversal over a store's key space.
//!
//! ## State Machine
//! ```text
//!                 seek_to_first / seek_to_last / seek
//!   Unpositioned ─────────────────────────────────────┐
//!        │ advance / retreat (implicit seek)           │
//!        ▼                                             ▼
//!   Positioned{pending} ── advance/retreat ──► Positioned{yielded}
//!        │                 (returns entry,          │
//!        │                  does not move)          │ advance/retreat
//!        │                                          │ (moves, then reads)
//!        └──────── nothing at cursor ────────► Exhausted ◄┘
//! ```
//!
//! A seek leaves the entry it lands on *pending*: the next `advance` (or
//! `retreat`) returns that entry without moving. After that, every call moves
//! first and returns the entry it moved to. So `seek_to_first` followed by
//! `advance` calls walks every entry from the smallest key, and the same is
//! true of a fresh iterator, because `advance` on an unpositioned iterator
//! implies `seek_to_first` (and `retreat` implies `seek_to_last`).
//!
//! Exhausted is terminal in both directions: once a call runs off either end,
//! `advance` and `retreat` keep returning `None` until one of the seeks
//! repositions the cursor.
//!
//! Order is the engine's key order (byte-lexicographic). What the iterator
//! sees of writes made after it was created is up to the engine.

use std::marker::PhantomData;

use crate::native::IteratorHandle;
use crate::store::Store;
use crate::{Key, Value};

/// Where an iterator currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// No positioning call has been made yet
    Unpositioned,
    /// On an entry; `pending` until that entry has been returned
    Positioned { pending: bool },
    /// Ran off either end, or a seek found nothing; only a seek leaves it
    Exhausted,
}

/// Cursor over a store, borrowed from it
///
/// Not `Send`: the cursor is private mutable state owned by one caller.
pub struct StoreIterator<'s> {
    handle: IteratorHandle,
    state: IteratorState,
    _store: PhantomData<&'s Store>,
}

impl<'s> StoreIterator<'s> {
    pub(crate) fn new(_store: &'s Store, handle: IteratorHandle) -> Self {
        Self {
            handle,
            state: IteratorState::Unpositioned,
            _store: PhantomData,
        }
    }

    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Whether the cursor is on an entry
    pub fn valid(&self) -> bool {
        matches!(self.state, IteratorState::Positioned { .. }) && self.handle.valid()
    }

    // =========================================================================
    // Positioning
    // =========================================================================

    /// Move to the smallest key
    pub fn seek_to_first(&mut self) {
        self.handle.seek_to_first();
        self.settle();
    }

    /// Move to the largest key
    pub fn seek_to_last(&mut self) {
        self.handle.seek_to_last();
        self.settle();
    }

    /// Move to the smallest key >= `key`
    pub fn seek(&mut self, key: &[u8]) {
        self.handle.seek(key);
        self.settle();
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Step forward and return the entry reached, or `None` at the end
    pub fn advance(&mut self) -> Option<(Key, Value)> {
        match self.state {
            IteratorState::Unpositioned => {
                self.seek_to_first();
                self.take_pending()
            }
            IteratorState::Positioned { pending: true } => self.take_pending(),
            IteratorState::Positioned { pending: false } => {
                let moved = self.handle.next();
                self.read_after_move(moved)
            }
            IteratorState::Exhausted => None,
        }
    }

    /// Step backward and return the entry reached, or `None` at the start
    pub fn retreat(&mut self) -> Option<(Key, Value)> {
        match self.state {
            IteratorState::Unpositioned => {
                self.seek_to_last();
                self.take_pending()
            }
            IteratorState::Positioned { pending: true } => self.take_pending(),
            IteratorState::Positioned { pending: false } => {
                let moved = self.handle.prev();
                self.read_after_move(moved)
            }
            IteratorState::Exhausted => None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Entry under the cursor, without moving
    pub fn current(&self) -> Option<(Key, Value)> {
        if self.valid() {
            self.handle.entry()
        } else {
            None
        }
    }

    pub fn key(&self) -> Option<Key> {
        self.current().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<Value> {
        self.current().map(|(_, v)| v)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn settle(&mut self) {
        self.state = if self.handle.valid() {
            IteratorState::Positioned { pending: true }
        } else {
            IteratorState::Exhausted
        };
    }

    fn take_pending(&mut self) -> Option<(Key, Value)> {
        if let IteratorState::Positioned { pending: true } = self.state {
            self.state = IteratorState::Positioned { pending: false };
            self.handle.entry()
        } else {
            None
        }
    }

    fn read_after_move(&mut self, moved: bool) -> Option<(Key, Value)> {
        let entry = if moved { self.handle.entry() } else { None };
        if entry.is_none() {
            self.state = IteratorState::Exhausted;
        }
        entry
    }
}

impl Iterator for StoreIterator<'_> {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl std::fmt::Debug for StoreIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreIterator")
            .field("state", &self.state)
            .finish()
    }
}
