//! JSONL record sink - one JSON object per line

use crate::error::Result;
use crate::models::ScanRecord;
use crate::report::RecordSink;
use async_trait::async_trait;
use std::io::Write;
use tokio::sync::Mutex;

/// Writes each record as a single line of JSON, flushed as it arrives.
/// The writer is locked per record so parallel workers never interleave
/// partial lines.
pub struct JsonlSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl JsonlSink<std::io::Stdout> {
    /// Sink writing to standard output, the production default
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> RecordSink for JsonlSink<W> {
    async fn emit(&self, record: &ScanRecord) -> Result<()> {
        // Serialize before taking the lock: a failure here drops the
        // record without touching the stream.
        let line = serde_json::to_string(record)?;

        let mut writer = self.writer.lock().await;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}
