//! EventSink port - イベント記録の抽象化
//!
//! - **TracingEventSink**: tracing へ出力（本番用、`impls::events`）
//! - **RecordingEventSink**: メモリに溜める（テスト用）
//! - **NoopEventSink**: 何もしない

use crate::domain::SchedulerEvent;

/// EventSink はスケジューラのイベントを記録
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &SchedulerEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &SchedulerEvent) {}
}
