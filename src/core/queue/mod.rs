use crate::core::error::{ClosedError, PushOp};
use crate::core::state::Snapshot;
use crate::core::store::Store;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Unbounded, closable FIFO queue shared by any number of producers and consumers.
///
/// One mutex guards the item sequence and the closed flag; one condition
/// variable is broadcast whenever an item is appended or the queue is closed.
/// Closing does not discard anything: consumers keep draining until the queue
/// is both closed and empty, which is the only state in which the blocking
/// operations report that nothing is left.
///
/// Predicates handed to [`Queue::has`] and [`Queue::push_unique`] run while the
/// lock is held. They are called one at a time and must not call back into the
/// same queue, which would deadlock.
pub struct Queue<T> {
    store: Mutex<Store<T>>,
    changed: Condvar,
}

/// Handle shared between producer and consumer threads
pub type SharedQueue<T> = Arc<Queue<T>>;

impl<T> Queue<T> {
    /// Create an empty, open queue
    pub fn new() -> Self {
        Self { store: Mutex::new(Store::new()), changed: Condvar::new() }
    }

    // A panicking predicate poisons the mutex without touching the store.
    fn lock(&self) -> MutexGuard<'_, Store<T>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Park until there is an item to take or nothing will ever arrive.
    fn wait_ready<'a>(&self, guard: MutexGuard<'a, Store<T>>) -> MutexGuard<'a, Store<T>> {
        self.changed
            .wait_while(guard, |store| store.is_empty() && !store.is_closed())
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `item` at the tail and wake every waiter.
    ///
    /// Fails once the queue is closed, handing the item back inside the error.
    pub fn push(&self, item: T) -> Result<(), ClosedError<T>> {
        let mut store = self.lock();
        if store.is_closed() {
            drop(store);
            debug!(op = %PushOp::Push, "rejected push into closed queue");
            return Err(ClosedError::new(item, PushOp::Push));
        }
        store.enqueue(item);
        let len = store.len();
        drop(store);

        self.changed.notify_all();
        trace!(len, "pushed item");
        Ok(())
    }

    /// Append `item` unless a stored item already satisfies `exists`.
    ///
    /// The closed check, the scan and the append happen under one lock
    /// acquisition. Returns `Ok(true)` when the item was added and `Ok(false)`
    /// (dropping `item`) when a match was found.
    pub fn push_unique<F>(&self, item: T, exists: F) -> Result<bool, ClosedError<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut store = self.lock();
        if store.is_closed() {
            drop(store);
            debug!(op = %PushOp::PushUnique, "rejected push into closed queue");
            return Err(ClosedError::new(item, PushOp::PushUnique));
        }
        if store.any(exists) {
            drop(store);
            trace!("skipped duplicate item");
            return Ok(false);
        }
        store.enqueue(item);
        let len = store.len();
        drop(store);

        self.changed.notify_all();
        trace!(len, "pushed unique item");
        Ok(true)
    }

    /// Remove and return the head item, or `None` right away if the queue is empty.
    pub fn pop(&self) -> Option<T> {
        let item = self.lock().dequeue();
        trace!(hit = item.is_some(), "pop");
        item
    }

    /// Block until an item is available or the queue is closed and drained.
    ///
    /// Returns `false` only when the queue is closed and empty. `next` and a
    /// following [`Queue::pop`] are not atomic: with several consumers the item
    /// seen here may be gone by the time `pop` runs, in which case `pop`
    /// returns `None`. Use [`Queue::pop_blocking`] to wait and take in one step.
    pub fn next(&self) -> bool {
        let store = self.wait_ready(self.lock());
        !store.is_empty()
    }

    /// Block until an item can be taken, then remove and return it.
    ///
    /// Returns `None` once the queue is closed and every remaining item has
    /// been delivered.
    pub fn pop_blocking(&self) -> Option<T> {
        let mut store = self.wait_ready(self.lock());
        let item = store.dequeue();
        drop(store);

        match &item {
            Some(_) => trace!("pop_blocking took item"),
            None => debug!("pop_blocking found queue closed and drained"),
        }
        item
    }

    /// Current number of items. Stale as soon as it returns.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue holds no items right now
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Reads the closed flag under the lock
    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    /// Whether some stored item satisfies `matches`, scanned under the lock.
    pub fn has<F>(&self, matches: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.lock().any(matches)
    }

    /// Drop every stored item. Leaves the closed flag alone and wakes nobody.
    pub fn clear(&self) {
        let mut store = self.lock();
        let dropped = store.len();
        store.clear();
        drop(store);
        debug!(dropped, "cleared queue");
    }

    /// Close the queue and wake every waiter. Idempotent.
    ///
    /// Items already queued stay available to consumers.
    pub fn close(&self) {
        let mut store = self.lock();
        let first = store.close();
        let remaining = store.len();
        drop(store);

        self.changed.notify_all();
        if first {
            debug!(remaining, "closed queue");
        }
    }

    /// Length and closed flag from a single lock acquisition
    pub fn snapshot(&self) -> Snapshot {
        let store = self.lock();
        Snapshot { len: store.len(), closed: store.is_closed() }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for Queue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Snapshot { len, closed } = self.snapshot();
        f.debug_struct("Queue").field("len", &len).field("closed", &closed).finish()
    }
}
