pub mod error;
pub mod queue;
pub mod report;
pub mod state;
pub(crate) mod store;
