use std::fmt::{self, Debug, Display, Formatter};
use thiserror::Error;

/// Which push operation was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOp {
    Push,
    PushUnique,
}

impl Display for PushOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PushOp::Push => f.write_str("pushing item"),
            PushOp::PushUnique => f.write_str("pushing unique item"),
        }
    }
}

/// Returned by `Queue::push` and `Queue::push_unique` once the queue is closed.
///
/// The rejected item travels back to the caller; the queue is left unchanged.
#[derive(Error)]
#[error("queue::Queue: {op} into a closed queue")]
pub struct ClosedError<T> {
    pub item: T,
    pub op: PushOp,
}

impl<T> ClosedError<T> {
    pub(crate) fn new(item: T, op: PushOp) -> Self {
        Self { item, op }
    }

    /// Take back the item that could not be enqueued
    pub fn into_inner(self) -> T {
        self.item
    }
}

// Items need not be Debug for the error to be.
impl<T> Debug for ClosedError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosedError").field("op", &self.op).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClosedError, PushOp};

    struct Opaque;

    #[test]
    fn message_names_queue_and_action() {
        let err = ClosedError::new(Opaque, PushOp::Push);
        assert_eq!(err.to_string(), "queue::Queue: pushing item into a closed queue");

        let err = ClosedError::new(Opaque, PushOp::PushUnique);
        assert_eq!(err.to_string(), "queue::Queue: pushing unique item into a closed queue");
    }

    #[test]
    fn debug_does_not_need_debug_items() {
        let err = ClosedError::new(Opaque, PushOp::Push);
        assert_eq!(format!("{err:?}"), "ClosedError { op: Push, .. }");
    }

    #[test]
    fn hands_back_the_item() {
        let err = ClosedError::new(String::from("late"), PushOp::Push);
        let boxed: Box<dyn std::error::Error> = Box::new(ClosedError::new(1u8, PushOp::Push));
        assert!(boxed.source().is_none());
        assert_eq!(err.into_inner(), "late");
    }
}
