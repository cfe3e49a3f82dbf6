//! HistoryStore port - 過去のラウンドの永続化
//!
//! ローカルファイルとオブジェクトストレージのどちらでも、この 2 メソッドだけを
//! 実装します。どの実装を使うかは組み立て時（`SchedulerBuilder`）に決めます。

use async_trait::async_trait;

use crate::domain::{CollaboratorError, PairingRecord, Round};

/// HistoryStore は追記専用の履歴
///
/// # 設計原則
/// - `read_all` の順序は保証しない（Analyzer が日付で比較する）
/// - `append_round` は既存レコードを編集・削除しない
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn read_all(&self) -> Result<Vec<PairingRecord>, CollaboratorError>;

    async fn append_round(&self, round: &Round) -> Result<(), CollaboratorError>;
}
