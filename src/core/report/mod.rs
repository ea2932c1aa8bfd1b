use crate::core::state::Snapshot;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// What one consumer took off a queue before it saw the queue closed and drained
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReport<T> {
    pub consumer: String,
    pub delivered: Vec<T>, // in the order this consumer received them
    pub final_state: Snapshot,
}

impl<T> DeliveryReport<T> {
    pub fn new(consumer: impl Into<String>, delivered: Vec<T>, final_state: Snapshot) -> Self {
        Self { consumer: consumer.into(), delivered, final_state }
    }
}

/// Append reports to `path` as NDJSON, one object per line
pub fn append_reports<T: Serialize>(reports: &[DeliveryReport<T>], path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;

    for report in reports {
        let json = serde_json::to_string(report).map_err(io::Error::other)?;
        writeln!(file, "{}", json)?;
    }
    Ok(())
}
