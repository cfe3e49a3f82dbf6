//! SchedulerBuilder - 協調者のワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - ストレージなどの実装は継承ではなく組み立て時に選ぶ

use std::sync::Arc;

use super::config::SchedulerConfig;
use super::runner::Scheduler;
use crate::impls::TracingEventSink;
use crate::ports::{
    Clock, Directory, EventSink, HistoryStore, HolidayCalendar, NoBlackout, Notifier, SystemClock,
};

/// SchedulerBuilder は Scheduler を構築
///
/// # 使用例
/// ```ignore
/// let scheduler = SchedulerBuilder::new(config)
///     .directory(StaticDirectory::new(profiles, SystemClock))
///     .history(JsonDirHistoryStore::new("runs"))
///     .notifier(ConsoleNotifier)
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - directory / history / notifier は必須
/// - build() 時に不足をまとめて BuildError で返す
/// - max_attempts = 0 はペアリングが必ず失敗するので build() で拒否
/// - calendar / clock / events は省略時にデフォルトを使う
pub struct SchedulerBuilder {
    config: SchedulerConfig,
    directory: Option<Arc<dyn Directory>>,
    history: Option<Arc<dyn HistoryStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    calendar: Arc<dyn HolidayCalendar>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

/// BuildError は Scheduler 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing collaborators: {0:?}. These must be provided before build().")]
    MissingCollaborators(Vec<&'static str>),

    #[error("max_attempts must be at least 1")]
    ZeroMaxAttempts,
}

impl SchedulerBuilder {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            directory: None,
            history: None,
            notifier: None,
            calendar: Arc::new(NoBlackout),
            clock: Arc::new(SystemClock),
            events: Arc::new(TracingEventSink),
        }
    }

    pub fn directory(mut self, directory: impl Directory + 'static) -> Self {
        self.directory = Some(Arc::new(directory));
        self
    }

    pub fn history(mut self, history: impl HistoryStore + 'static) -> Self {
        self.history = Some(Arc::new(history));
        self
    }

    /// Use an already shared history store (e.g. one that a test inspects).
    pub fn shared_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn calendar(mut self, calendar: impl HolidayCalendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn events(mut self, events: impl EventSink + 'static) -> Self {
        self.events = Arc::new(events);
        self
    }

    pub fn build(self) -> Result<Scheduler, BuildError> {
        if self.config.max_attempts == 0 {
            return Err(BuildError::ZeroMaxAttempts);
        }

        let mut missing = Vec::new();
        if self.directory.is_none() {
            missing.push("directory");
        }
        if self.history.is_none() {
            missing.push("history");
        }
        if self.notifier.is_none() {
            missing.push("notifier");
        }

        match (self.directory, self.history, self.notifier) {
            (Some(directory), Some(history), Some(notifier)) => Ok(Scheduler {
                config: self.config,
                directory,
                history,
                notifier,
                calendar: self.calendar,
                clock: self.clock,
                events: self.events,
            }),
            _ => Err(BuildError::MissingCollaborators(missing)),
        }
    }
}
