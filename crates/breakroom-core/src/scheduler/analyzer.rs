//! History Analyzer - 過去のペアリング履歴の集計
//!
//! 純粋関数のみ（乱数・I/O なし）。

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::{CanonicalPair, Participant, PairingRecord};

/// 履歴から導いた、今回の選抜に必要な情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryAnalysis {
    /// プールの各参加者が最後にペアになった日（一度もなければ None）
    pub last_paired: BTreeMap<Participant, Option<NaiveDate>>,
    /// 履歴中で最も新しい日付に作られたペア
    pub last_round_pairs: BTreeSet<CanonicalPair>,
}

/// Summarize `history` for the participants in `pool`.
///
/// History is read in arrival order and may contain several batches, so
/// nothing here relies on it being sorted by date. Records about people who
/// left the pool still count when finding the most recent round.
pub fn analyze(pool: &BTreeSet<Participant>, history: &[PairingRecord]) -> HistoryAnalysis {
    let mut last_paired: BTreeMap<Participant, Option<NaiveDate>> =
        pool.iter().map(|p| (p.clone(), None)).collect();

    for record in history {
        for member in record.pair.members() {
            if let Some(last) = last_paired.get_mut(member)
                && last.is_none_or(|seen| seen < record.date)
            {
                *last = Some(record.date);
            }
        }
    }

    let latest = history.iter().map(|r| r.date).max();
    let last_round_pairs = match latest {
        Some(latest) => history
            .iter()
            .filter(|r| r.date == latest)
            .map(|r| r.pair.clone())
            .collect(),
        None => BTreeSet::new(),
    };

    HistoryAnalysis {
        last_paired,
        last_round_pairs,
    }
}
