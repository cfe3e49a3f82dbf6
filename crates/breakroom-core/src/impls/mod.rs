//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **StaticDirectory** + **AbsencePolicy**: 固定プロフィールのディレクトリ
//! - **InMemoryHistoryStore**: 開発・テスト用の履歴
//! - **JsonDirHistoryStore**: ディレクトリ上の JSON バッチ
//! - **ConsoleNotifier** / **RecordingNotifier**
//! - **FixedHolidays**
//! - **TracingEventSink** / **RecordingEventSink**

pub mod absence;
pub mod events;
pub mod holidays;
pub mod inmem_history;
pub mod json_dir_history;
pub mod notifiers;
pub mod static_directory;

// 主要な型を再エクスポート
pub use self::absence::{AbsencePolicy, ParticipantProfile};
pub use self::events::{RecordingEventSink, TracingEventSink};
pub use self::holidays::FixedHolidays;
pub use self::inmem_history::InMemoryHistoryStore;
pub use self::json_dir_history::JsonDirHistoryStore;
pub use self::notifiers::{ConsoleNotifier, RecordingNotifier, SentMessage};
pub use self::static_directory::StaticDirectory;
