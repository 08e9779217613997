//! Scan coordination: a bounded worker pool draining the hostname queue

pub mod cors;
pub mod probe;

use crate::error::Result;
use crate::http::ProbeClient;
use crate::models::{RunSummary, ScanConfig, REQUEST_TIMEOUT};
use crate::report::RecordSink;
use crate::source::HostSource;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use probe::SiteProber;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Bounded pool of workers that drains a hostname stream, probing every
/// host over both schemes and emitting one record per host.
///
/// The queue capacity equals the worker count, so the producer backs off
/// once every worker is busy and the buffer is full. Probe failures stay
/// inside their worker; the pool always drains to completion.
pub struct ScanPool {
    prober: SiteProber,
    workers: usize,
    sink: Arc<dyn RecordSink>,
}

/// Per-worker counters, summed into the run summary on join
#[derive(Default)]
struct WorkerTally {
    scanned: u64,
    vulnerable: u64,
}

impl ScanPool {
    /// Builds a pool from the scan configuration and an injected sink
    pub fn new(config: &ScanConfig, sink: Arc<dyn RecordSink>) -> Result<Self> {
        let client = ProbeClient::new(REQUEST_TIMEOUT, &config.user_agent)?;

        Ok(Self {
            prober: SiteProber::new(client),
            workers: config.workers,
            sink,
        })
    }

    /// Drains `source` to completion and returns the run statistics
    pub async fn run(&self, source: HostSource) -> Result<RunSummary> {
        let started_at = Local::now();

        let (tx, rx) = mpsc::channel::<String>(self.workers);
        let rx = Arc::new(Mutex::new(rx));

        // Single producer; dropping tx on return closes the queue.
        let producer = tokio::spawn(source.feed(tx));

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {pos} hosts scanned {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        info!("Starting {} workers", self.workers);

        let mut set = JoinSet::new();
        for worker in 0..self.workers {
            let rx = Arc::clone(&rx);
            let prober = self.prober.clone();
            let sink = Arc::clone(&self.sink);
            let pb = pb.clone();

            set.spawn(async move {
                let mut tally = WorkerTally::default();
                loop {
                    // Hold the lock only while popping, so other workers
                    // can pull the next host during this scan.
                    let host = { rx.lock().await.recv().await };
                    let Some(host) = host else { break };

                    let record = prober.scan_host(&host).await;
                    tally.scanned += 1;
                    if record.vulnerable {
                        tally.vulnerable += 1;
                        info!("Vulnerable: {host}");
                    }

                    if let Err(e) = sink.emit(&record).await {
                        warn!("Dropping record for {host}: {e}");
                    }
                    pb.set_message(host);
                    pb.inc(1);
                }
                debug!("Worker {worker} finished");
                tally
            });
        }

        let mut hosts_scanned = 0;
        let mut vulnerable = 0;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(tally) => {
                    hosts_scanned += tally.scanned;
                    vulnerable += tally.vulnerable;
                }
                Err(e) => error!("Worker task panicked: {e}"),
            }
        }

        // Workers only exit once the queue is closed, so the producer is
        // done by now; join it to surface panics.
        if let Err(e) = producer.await {
            error!("Producer task panicked: {e}");
        }

        pb.finish_and_clear();
        info!("Scan complete: {hosts_scanned} hosts, {vulnerable} vulnerable");

        Ok(RunSummary {
            started_at,
            finished_at: Local::now(),
            hosts_scanned,
            vulnerable,
        })
    }
}
