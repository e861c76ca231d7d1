// Orchestrator event channel (workers -> foreground observer)

use crate::domain::ScanReport;
use tokio::sync::mpsc;
use tracing::debug;

/// Values produced by background workers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbenchEvent {
    /// One transcript line
    Log(String),
    /// A scan finished (exactly once per scan_network call unless it failed)
    ScanCompleted(ScanReport),
    /// The scan task died before producing a report
    ScanFailed(String),
}

/// Producer half, cloned into every worker
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<WorkbenchEvent>,
}

impl EventSender {
    /// Enqueue an event; never blocks
    pub fn send(&self, event: WorkbenchEvent) {
        if self.tx.send(event).is_err() {
            debug!("Event receiver dropped, discarding event");
        }
    }

    pub fn log(&self, line: impl Into<String>) {
        self.send(WorkbenchEvent::Log(line.into()));
    }
}

/// Consumer half, owned by the single foreground observer
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<WorkbenchEvent>,
}

impl EventReceiver {
    /// Take everything queued right now without waiting
    pub fn drain(&mut self) -> Vec<WorkbenchEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Create an unbounded event channel
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}
