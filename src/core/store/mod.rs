use std::collections::VecDeque;

/// Unsynchronized storage behind a `Queue`: the item sequence and the closed flag.
/// Callers hold the queue mutex for every access.
pub(crate) struct Store<T> {
    items: VecDeque<T>,
    closed: bool,
}

impl<T> Store<T> {
    /// Create a new, empty, open store
    pub(crate) fn new() -> Self {
        Self { items: VecDeque::new(), closed: false }
    }

    /// Append an item at the tail
    pub(crate) fn enqueue(&mut self, item: T) {
        // --pre op assertion: nothing is added once closed
        assert!(!self.closed, "Store must be open to enqueue");
        let len_before = self.items.len();
        self.items.push_back(item);
        assert_eq!(self.items.len(), len_before + 1, "Store length should grow by 1");
    }

    /// Remove the head item
    pub(crate) fn dequeue(&mut self) -> Option<T> {
        let len_before = self.items.len();
        let result = self.items.pop_front();
        // -- post op assertion: store size decreases if dequeue succeeded
        match result {
            Some(_) => assert_eq!(self.items.len(), len_before - 1, "Store length should decrease by 1"),
            None => assert_eq!(len_before, 0, "Dequeue only misses on an empty store"),
        }
        result
    }

    /// Scan head-to-tail, stopping at the first match
    pub(crate) fn any(&self, matches: impl FnMut(&T) -> bool) -> bool {
        self.items.iter().any(matches)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Flip the closed flag. Reports whether this call did the closing.
    pub(crate) fn close(&mut self) -> bool {
        !std::mem::replace(&mut self.closed, true)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Store;

    #[test]
    fn dequeues_in_enqueue_order() {
        let mut store = Store::new();
        for i in 0..5 {
            store.enqueue(i);
        }
        let drained: Vec<_> = std::iter::from_fn(|| store.dequeue()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert!(store.is_empty());
    }

    #[test]
    fn close_is_monotonic_and_reports_first_call() {
        let mut store: Store<u8> = Store::new();
        assert!(store.close());
        assert!(!store.close());
        assert!(store.is_closed());
    }

    #[test]
    fn closed_store_still_drains() {
        let mut store = Store::new();
        store.enqueue("a");
        store.close();
        assert_eq!(store.len(), 1);
        assert_eq!(store.dequeue(), Some("a"));
        assert!(store.is_empty() && store.is_closed());
    }

    #[test]
    fn scan_stops_at_first_match() {
        let mut store = Store::new();
        for i in 0..10 {
            store.enqueue(i);
        }
        let mut visited = 0;
        assert!(store.any(|&i| {
            visited += 1;
            i == 3
        }));
        assert_eq!(visited, 4);
    }

    #[test]
    #[should_panic(expected = "Store must be open to enqueue")]
    fn enqueue_after_close_panics() {
        let mut store = Store::new();
        store.close();
        store.enqueue(1);
    }
}
