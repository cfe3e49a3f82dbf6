//! breakroom-core
//!
//! Fairness-constrained pairing for recurring coffee breaks.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Participant, CanonicalPair, PairingRecord, Round, events, errors）
//! - **scheduler**: 純粋な計算（Analyzer → Balancer → Generator）
//! - **ports**: 抽象化レイヤー（Directory, HistoryStore, Notifier, HolidayCalendar, Clock, EventSink）
//! - **impls**: ports の実装（StaticDirectory, JsonDirHistoryStore, InMemoryHistoryStore など）
//! - **app**: 組み立てと 1 回の実行（SchedulerBuilder, Scheduler）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod scheduler;

pub use app::{RunOutcome, RunReport, Scheduler, SchedulerBuilder, SchedulerConfig};
pub use domain::{CanonicalPair, Participant, PairingRecord, Round, SchedulerError};
