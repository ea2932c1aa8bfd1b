pub mod core;

pub use crate::core::error::{ClosedError, PushOp};
pub use crate::core::queue::{Queue, SharedQueue};
pub use crate::core::state::{Phase, Snapshot};
