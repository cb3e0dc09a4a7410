//! Live handle accounting
//!
//! Each handle owns a [`Live`] guard: creating the handle bumps a per-kind
//! counter and dropping it brings the counter back down. Handles never leave
//! the thread that created them, so the counters are thread-local and exact
//! for the calling thread.

use std::cell::Cell;
use std::marker::PhantomData;

/// The kinds of engine object the access layer creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Database,
    OpenOptions,
    ReadOptions,
    WriteOptions,
    WriteBatch,
    Iterator,
}

impl HandleKind {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot of live handles on the current thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleCounts {
    pub database: usize,
    pub open_options: usize,
    pub read_options: usize,
    pub write_options: usize,
    pub write_batch: usize,
    pub iterator: usize,
}

impl HandleCounts {
    pub fn get(&self, kind: HandleKind) -> usize {
        match kind {
            HandleKind::Database => self.database,
            HandleKind::OpenOptions => self.open_options,
            HandleKind::ReadOptions => self.read_options,
            HandleKind::WriteOptions => self.write_options,
            HandleKind::WriteBatch => self.write_batch,
            HandleKind::Iterator => self.iterator,
        }
    }

    pub fn total(&self) -> usize {
        self.database
            + self.open_options
            + self.read_options
            + self.write_options
            + self.write_batch
            + self.iterator
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

thread_local! {
    static LIVE: Cell<[usize; HandleKind::COUNT]> = const { Cell::new([0; HandleKind::COUNT]) };
}

/// Count of live handles created on this thread and not yet dropped
pub fn live_handles() -> HandleCounts {
    let live = LIVE.with(Cell::get);
    HandleCounts {
        database: live[HandleKind::Database.index()],
        open_options: live[HandleKind::OpenOptions.index()],
        read_options: live[HandleKind::ReadOptions.index()],
        write_options: live[HandleKind::WriteOptions.index()],
        write_batch: live[HandleKind::WriteBatch.index()],
        iterator: live[HandleKind::Iterator.index()],
    }
}

/// Guard tying one live-count unit to the handle that owns it
#[derive(Debug)]
pub(crate) struct Live {
    kind: HandleKind,
    // keeps the guard (and so every handle) on its creating thread
    _not_send: PhantomData<*const ()>,
}

impl Live {
    pub(crate) fn acquire(kind: HandleKind) -> Self {
        LIVE.with(|cell| {
            let mut live = cell.get();
            live[kind.index()] += 1;
            cell.set(live);
        });
        Self {
            kind,
            _not_send: PhantomData,
        }
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        // try_with: a handle may be dropped while the thread is tearing down
        let _ = LIVE.try_with(|cell| {
            let mut live = cell.get();
            live[self.kind.index()] = live[self.kind.index()].saturating_sub(1);
            cell.set(live);
        });
    }
}
