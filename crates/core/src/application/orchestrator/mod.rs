//! Orchestrator - runs discovery and scripts on background workers
//!
//! Every operation (`scan_network`, `run_one`, `run_all`) spawns one tokio
//! task and returns immediately. Workers never share mutable state with the
//! caller: they only push immutable [`WorkbenchEvent`]s onto an unbounded
//! channel that a single foreground observer drains at its own pace.
//!
//! Ordering:
//! - one script's transcript is always contiguous and in order
//! - `run_all` runs its snapshot strictly sequentially
//! - separate operations may interleave with each other

pub mod constants;
mod events;

use constants::*;
pub use events::{event_channel, EventReceiver, EventSender, WorkbenchEvent};

use crate::application::config::WorkbenchConfig;
use crate::application::discovery::{GatewayResolver, NeighborTableReader};
use crate::application::panic_guard::join_failure_message;
use crate::application::scripts::{ScriptCommandBuilder, ScriptExecutor};
use crate::domain::{DomainError, ExecutionResult, PlatformFamily, ScanReport, ScriptQueue};
use crate::error::Result;
use crate::port::CommandRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Owns the script queue and the producer side of the event channel
pub struct Orchestrator {
    gateway_resolver: Arc<GatewayResolver>,
    neighbor_reader: Arc<NeighborTableReader>,
    executor: Arc<ScriptExecutor>,
    queue: ScriptQueue,
    events: EventSender,
}

impl Orchestrator {
    /// Wire every service onto one command runner
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        platform: PlatformFamily,
        config: &WorkbenchConfig,
    ) -> (Self, EventReceiver) {
        let gateway_resolver = GatewayResolver::new(Arc::clone(&runner), platform);
        let neighbor_reader = NeighborTableReader::new(Arc::clone(&runner), platform);
        let builder = ScriptCommandBuilder::new(platform, config.python_interpreter.clone());
        let executor = ScriptExecutor::new(builder, runner);

        Self::from_parts(gateway_resolver, neighbor_reader, executor)
    }

    pub fn from_parts(
        gateway_resolver: GatewayResolver,
        neighbor_reader: NeighborTableReader,
        executor: ScriptExecutor,
    ) -> (Self, EventReceiver) {
        let (events, receiver) = event_channel();
        let orchestrator = Self {
            gateway_resolver: Arc::new(gateway_resolver),
            neighbor_reader: Arc::new(neighbor_reader),
            executor: Arc::new(executor),
            queue: ScriptQueue::new(),
            events,
        };
        (orchestrator, receiver)
    }

    pub fn queue(&self) -> &ScriptQueue {
        &self.queue
    }

    /// Queue a script (no-op if already queued)
    pub fn add_script(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        let added = self.queue.add(path.clone());
        info!(path = %path.display(), added, queue_len = self.queue.len(), "Queue add");
        added
    }

    pub fn remove_script(&mut self, index: usize) -> Result<PathBuf> {
        let removed = self.queue.remove_at(index)?;
        info!(path = %removed.display(), queue_len = self.queue.len(), "Queue remove");
        Ok(removed)
    }

    /// Resolve the gateway and read the neighbor table in the background
    ///
    /// Delivers exactly one `ScanCompleted` (or `ScanFailed` if the scan task
    /// panicked).
    pub fn scan_network(&self) -> JoinHandle<()> {
        let gateway_resolver = Arc::clone(&self.gateway_resolver);
        let neighbor_reader = Arc::clone(&self.neighbor_reader);
        let events = self.events.clone();

        tokio::spawn(async move {
            info!("Network scan started");
            let scan = tokio::spawn(async move {
                let gateway = gateway_resolver.resolve().await;
                let devices = neighbor_reader.read().await;
                (gateway, devices)
            });

            match scan.await {
                Ok((gateway, devices)) => {
                    let report = ScanReport::new(gateway, devices);
                    info!(
                        gateway = %report.gateway,
                        devices = report.devices.len(),
                        "Network scan completed"
                    );
                    events.send(WorkbenchEvent::ScanCompleted(report));
                }
                Err(join_err) => {
                    let reason = join_failure_message(join_err);
                    events.send(WorkbenchEvent::ScanFailed(reason));
                }
            }
        })
    }

    /// Run a single script in the background
    pub fn run_one(&self, path: impl Into<PathBuf>) -> JoinHandle<()> {
        let path = path.into();
        let executor = Arc::clone(&self.executor);
        let events = self.events.clone();

        tokio::spawn(async move {
            run_script(&executor, &events, &path).await;
        })
    }

    /// Run the queue entry at `index`
    pub fn run_selected(&self, index: usize) -> Result<JoinHandle<()>> {
        let path = self
            .queue
            .get(index)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.queue.len(),
            })?
            .to_path_buf();
        Ok(self.run_one(path))
    }

    /// Run a snapshot of the queue, one script at a time, in queue order
    pub fn run_all(&self) -> JoinHandle<()> {
        let snapshot = self.queue.all().to_vec();
        let executor = Arc::clone(&self.executor);
        let events = self.events.clone();

        tokio::spawn(async move {
            if snapshot.is_empty() {
                warn!("run_all requested on an empty queue");
                events.log(EMPTY_QUEUE_MESSAGE);
                return;
            }

            info!(scripts = snapshot.len(), "Running script queue");
            for path in &snapshot {
                run_script(&executor, &events, path).await;
            }
            info!(scripts = snapshot.len(), "Script queue finished");
        })
    }
}

/// Execute one script and emit its full transcript
async fn run_script(executor: &ScriptExecutor, events: &EventSender, path: &Path) {
    events.log(format!("{}{}", RUN_START_PREFIX, path.display()));
    let result = executor.execute(path).await;
    for line in result_lines(&result) {
        events.log(line);
    }
}

/// Transcript lines following the start marker
pub fn result_lines(result: &ExecutionResult) -> Vec<String> {
    if let Some(error) = &result.error {
        return vec![format!("{}{}", ERROR_PREFIX, error)];
    }

    let mut lines = Vec::new();
    let stdout = result.stdout.trim();
    if !stdout.is_empty() {
        lines.push(stdout.to_string());
    }
    let stderr = result.stderr.trim();
    if !stderr.is_empty() {
        lines.push(format!("{}{}", STDERR_PREFIX, stderr));
    }
    let code = result
        .exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    lines.push(format!("{}{}", EXIT_CODE_PREFIX, code));
    lines
}
