//! Engine iterator handle

use rusty_leveldb::{DBIterator, LdbIterator};

use super::handles::{HandleKind, Live};

/// Cursor over the engine's key space, in the engine's key order
///
/// A fresh handle is unpositioned (`valid() == false`).
pub(crate) struct IteratorHandle {
    inner: DBIterator,
    _live: Live,
}

impl IteratorHandle {
    pub(super) fn new(inner: DBIterator) -> Self {
        Self {
            inner,
            _live: Live::acquire(HandleKind::Iterator),
        }
    }

    pub(crate) fn valid(&self) -> bool {
        self.inner.valid()
    }

    pub(crate) fn seek_to_first(&mut self) {
        self.inner.reset();
        self.inner.advance();
    }

    /// The engine cannot step back from the unpositioned state, so this walks
    /// forward to the end and seeks back to the last key seen. O(n).
    pub(crate) fn seek_to_last(&mut self) {
        self.seek_to_last_before(None);
    }

    /// Position at the first key >= `key`
    pub(crate) fn seek(&mut self, key: &[u8]) {
        self.inner.seek(key);
    }

    pub(crate) fn next(&mut self) -> bool {
        self.inner.advance()
    }

    /// Step to the largest key below the current one
    ///
    /// The engine's own backward step can surface the older version of a
    /// deleted key, so this rescans forward from the start, where deletions
    /// are always honoured. O(n) per step.
    pub(crate) fn prev(&mut self) -> bool {
        match self.entry() {
            Some((current, _)) => self.seek_to_last_before(Some(&current)),
            None => false,
        }
    }

    /// Land on the largest live key strictly below `bound` (or the largest key
    /// overall), leaving the cursor unpositioned when there is none
    fn seek_to_last_before(&mut self, bound: Option<&[u8]>) -> bool {
        self.inner.reset();
        let mut last: Option<Vec<u8>> = None;
        let (mut key, mut value) = (Vec::new(), Vec::new());
        while self.inner.advance() {
            if !self.inner.current(&mut key, &mut value) {
                break;
            }
            if bound.is_some_and(|bound| key.as_slice() >= bound) {
                break;
            }
            last = Some(std::mem::take(&mut key));
        }
        match last {
            Some(key) => {
                self.inner.seek(&key);
                self.inner.valid()
            }
            None => {
                self.inner.reset();
                false
            }
        }
    }

    /// Key and value at the cursor, or `None` when not valid
    pub(crate) fn entry(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        if !self.inner.valid() {
            return None;
        }
        let (mut key, mut value) = (Vec::new(), Vec::new());
        if self.inner.current(&mut key, &mut value) {
            Some((key, value))
        } else {
            None
        }
    }
}
