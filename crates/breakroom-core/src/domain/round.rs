//! Round - 1 回の実行で確定したペアの集合

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::ids::RoundId;
use super::pair::{CanonicalPair, PairingRecord};

/// Round は同じ実行日を持つ PairingRecord の並び
///
/// 成功した実行の最後に HistoryStore へ丸ごと追記されます。
/// 追記後に編集・削除されることはありません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub date: NaiveDate,
    pub records: Vec<PairingRecord>,
}

impl Round {
    pub fn new(date: NaiveDate, pairs: impl IntoIterator<Item = CanonicalPair>) -> Self {
        Self::with_id(RoundId::from(Ulid::new()), date, pairs)
    }

    pub fn with_id(
        id: RoundId,
        date: NaiveDate,
        pairs: impl IntoIterator<Item = CanonicalPair>,
    ) -> Self {
        let records = pairs
            .into_iter()
            .map(|pair| PairingRecord::new(date, pair))
            .collect();
        Self { id, date, records }
    }

    pub fn pairs(&self) -> impl Iterator<Item = &CanonicalPair> {
        self.records.iter().map(|r| &r.pair)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
