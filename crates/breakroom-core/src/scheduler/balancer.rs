//! Selection Balancer - 今回のラウンドに参加する人を決める
//!
//! # 手順
//! 1. lookback window を超えて（または一度も）ペアになっていない人を必須にする
//! 2. 必須の人をシャッフル（同じくらい待っている人同士に序列はない）
//! 3. quota より多ければ切り詰め、少なければ残りから一様ランダムに補充
//!
//! 入力のプールや履歴は一切変更せず、新しい Vec を返します。

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

use super::quota::QuotaPolicy;
use crate::domain::Participant;

/// Selection の結果（ログ用の内訳付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// lookback window の規則で必須になった人数
    pub overdue: usize,
    pub quota: usize,
    /// 今回選ばれた参加者（この時点の順序に意味はない）
    pub chosen: Vec<Participant>,
}

/// Participants whose last pairing is missing or strictly older than
/// `today - lookback_days`, in pool order.
pub fn overdue_participants(
    pool: &BTreeSet<Participant>,
    last_paired: &BTreeMap<Participant, Option<NaiveDate>>,
    today: NaiveDate,
    lookback_days: u32,
) -> Vec<Participant> {
    let cutoff = today.checked_sub_days(Days::new(u64::from(lookback_days)));
    pool.iter()
        .filter(|p| match (last_paired.get(*p).copied().flatten(), cutoff) {
            (None, _) => true,
            (Some(last), Some(cutoff)) => last < cutoff,
            (Some(_), None) => false,
        })
        .cloned()
        .collect()
}

/// Choose this round's participants.
pub fn select<R: Rng + ?Sized>(
    pool: &BTreeSet<Participant>,
    last_paired: &BTreeMap<Participant, Option<NaiveDate>>,
    today: NaiveDate,
    lookback_days: u32,
    quota_policy: QuotaPolicy,
    rng: &mut R,
) -> Selection {
    let quota = quota_policy.quota_for(pool.len());
    if quota == 0 {
        return Selection {
            overdue: 0,
            quota,
            chosen: Vec::new(),
        };
    }

    let mut chosen = overdue_participants(pool, last_paired, today, lookback_days);
    let overdue = chosen.len();
    chosen.shuffle(rng);

    if chosen.len() > quota {
        chosen.truncate(quota);
    } else if chosen.len() < quota {
        let required = quota - chosen.len();
        let already: BTreeSet<&Participant> = chosen.iter().collect();
        let eligible: Vec<&Participant> = pool.iter().filter(|p| !already.contains(p)).collect();

        // eligible が空でも quota は pool サイズで頭打ちなので、ここで不足は起きない。
        // プール全体からの追加抽選は重複を生むだけなので行わない。
        let extra: Vec<Participant> = eligible
            .choose_multiple(rng, required.min(eligible.len()))
            .map(|p| (*p).clone())
            .collect();
        chosen.extend(extra);
    }

    Selection {
        overdue,
        quota,
        chosen,
    }
}
