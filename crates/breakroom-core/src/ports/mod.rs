//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! スケジューラ本体は純粋な計算だけを行い、ディレクトリ・履歴・通知・
//! カレンダー・時刻・ログはすべてここの trait 越しに注入されます。

pub mod calendar;
pub mod clock;
pub mod directory;
pub mod event_sink;
pub mod history_store;
pub mod notifier;

// 主要な trait を再エクスポート
pub use self::calendar::{HolidayCalendar, NoBlackout};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::directory::Directory;
pub use self::event_sink::{EventSink, NoopEventSink};
pub use self::history_store::HistoryStore;
pub use self::notifier::{ChannelHandle, Notifier};
