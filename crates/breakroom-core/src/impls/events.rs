//! EventSink implementations.

use std::sync::{Arc, Mutex};

use crate::domain::{EventLevel, SchedulerEvent};
use crate::ports::EventSink;

/// Emits every event through `tracing` at the event's level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &SchedulerEvent) {
        match event {
            SchedulerEvent::Skipped { date, reason } => {
                tracing::info!(%date, ?reason, "round skipped");
            }
            SchedulerEvent::DirectoryUnavailable { error } => {
                tracing::error!(%error, "directory unavailable");
            }
            SchedulerEvent::HistoryUnavailable { error } => {
                tracing::warn!(%error, "history unavailable, treating everyone as overdue");
            }
            SchedulerEvent::SelectionMade {
                date,
                pool,
                overdue,
                quota,
                selected,
            } => {
                tracing::info!(%date, pool, overdue, quota, selected, "participants selected");
            }
            SchedulerEvent::ArrangementFound { attempts, pairs } => {
                tracing::info!(attempts, pairs, "pairs generated");
            }
            SchedulerEvent::ArrangementFailed { attempts } => {
                tracing::error!(attempts, "no arrangement without repeated pairs");
            }
            SchedulerEvent::PairAnnounced { pair } => {
                tracing::info!(%pair, "pair announced");
            }
            SchedulerEvent::AnnouncementFailed { pair, error } => {
                tracing::warn!(%pair, %error, "announcement failed, pair will not be recorded");
            }
            SchedulerEvent::RoundPersisted { round, records } => {
                tracing::info!(%round, records, "round persisted");
            }
            SchedulerEvent::RoundNotPersisted {
                round,
                records,
                error,
            } => {
                tracing::error!(%round, records, %error, "round announced but not persisted");
            }
        }
    }
}

/// Keeps emitted events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<SchedulerEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SchedulerEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn at_least(&self, level: EventLevel) -> Vec<SchedulerEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level() >= level)
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &SchedulerEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
