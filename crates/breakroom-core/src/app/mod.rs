//! App - アプリケーション層
//!
//! ports を組み合わせて 1 回の実行を組み立てます。
//!
//! # 主要コンポーネント
//! - **SchedulerConfig**: 設定値
//! - **SchedulerBuilder**: 協調者のワイヤリングと起動時検証
//! - **Scheduler**: run_once（休日判定 → 選抜 → ペア生成 → 通知 → 記録）

pub mod builder;
pub mod config;
pub mod runner;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, SchedulerBuilder};
pub use self::config::SchedulerConfig;
pub use self::runner::{RunOutcome, RunReport, Scheduler};
