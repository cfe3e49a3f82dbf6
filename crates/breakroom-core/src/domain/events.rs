//! Events - スケジューラ実行中に発生するイベント
//!
//! グローバルなロガーを直接呼ぶ代わりに、各段階はこのイベントを
//! 注入された `EventSink` に渡します。
//! 通常のスキップ（休日・人数不足）と失敗はバリアントとレベルで区別できます。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::RoundId;
use super::pair::CanonicalPair;

/// Why an invocation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The calendar marks the run date as a blackout day.
    Blackout,
    /// Fewer than two participants, or the quota came out as zero.
    NotEnoughParticipants,
}

/// Severity an event should be logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    Skipped {
        date: NaiveDate,
        reason: SkipReason,
    },
    DirectoryUnavailable {
        error: String,
    },
    /// History could not be read; the run continues as if it were empty.
    HistoryUnavailable {
        error: String,
    },
    SelectionMade {
        date: NaiveDate,
        pool: usize,
        overdue: usize,
        quota: usize,
        selected: usize,
    },
    ArrangementFound {
        attempts: u32,
        pairs: usize,
    },
    ArrangementFailed {
        attempts: u32,
    },
    PairAnnounced {
        pair: CanonicalPair,
    },
    AnnouncementFailed {
        pair: CanonicalPair,
        error: String,
    },
    RoundPersisted {
        round: RoundId,
        records: usize,
    },
    /// Notifications already went out but the round was not written.
    RoundNotPersisted {
        round: RoundId,
        records: usize,
        error: String,
    },
}

impl SchedulerEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            SchedulerEvent::Skipped { .. }
            | SchedulerEvent::SelectionMade { .. }
            | SchedulerEvent::ArrangementFound { .. }
            | SchedulerEvent::PairAnnounced { .. }
            | SchedulerEvent::RoundPersisted { .. } => EventLevel::Info,
            SchedulerEvent::HistoryUnavailable { .. }
            | SchedulerEvent::AnnouncementFailed { .. } => EventLevel::Warn,
            SchedulerEvent::DirectoryUnavailable { .. }
            | SchedulerEvent::ArrangementFailed { .. }
            | SchedulerEvent::RoundNotPersisted { .. } => EventLevel::Error,
        }
    }
}
