//! Hostname sources feeding the scan queue

use crate::error::{NarcissusError, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tracing::warn;

/// A finite stream of hostnames, drawn from site files in order or from
/// an in-memory list
pub enum HostSource {
    Files(Vec<(PathBuf, BufReader<File>)>),
    Hosts(Vec<String>),
}

impl HostSource {
    /// Opens every site file up front, so a missing or unreadable file
    /// aborts the run before any probe is sent
    pub async fn open(paths: &[PathBuf]) -> Result<Self> {
        let mut readers = Vec::with_capacity(paths.len());
        for path in paths {
            let file = File::open(path).await.map_err(|e| {
                NarcissusError::SourceError(format!("could not open {}: {e}", path.display()))
            })?;
            readers.push((path.clone(), BufReader::new(file)));
        }
        Ok(Self::Files(readers))
    }

    /// Source backed by an in-memory host list
    pub fn from_hosts(hosts: Vec<String>) -> Self {
        Self::Hosts(hosts)
    }

    /// Feeds every hostname into `tx`, in file-list order then line
    /// order. Lines pass through verbatim; blank lines and comments are
    /// not interpreted. Dropping `tx` on return closes the queue.
    pub(crate) async fn feed(self, tx: Sender<String>) {
        match self {
            Self::Files(readers) => {
                for (path, reader) in readers {
                    feed_lines(&path, reader, &tx).await;
                }
            }
            Self::Hosts(hosts) => {
                for host in hosts {
                    if tx.send(host).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

async fn feed_lines(path: &Path, reader: BufReader<File>, tx: &Sender<String>) {
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    return;
                }
            }
            Ok(None) => return,
            Err(e) => {
                // The open was validated at startup; a read error this
                // late only ends this file's contribution.
                warn!("Read error on {}: {e}", path.display());
                return;
            }
        }
    }
}
