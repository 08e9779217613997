//! Result sinks consuming scan records

pub mod jsonl;

pub use jsonl::JsonlSink;

use crate::error::Result;
use crate::models::ScanRecord;
use async_trait::async_trait;

/// Consumer for scan records. Implementations must tolerate concurrent
/// emits from multiple workers without interleaving records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Writes one record to the sink
    async fn emit(&self, record: &ScanRecord) -> Result<()>;
}

/// In-memory sink that collects records, for tests
#[derive(Default)]
pub struct MemorySink {
    records: tokio::sync::Mutex<Vec<ScanRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records collected so far
    pub async fn records(&self) -> Vec<ScanRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn emit(&self, record: &ScanRecord) -> Result<()> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
