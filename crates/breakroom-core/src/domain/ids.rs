//! Domain identifiers.
//!
//! # 型
//! - **Participant**: ディレクトリが発行する不透明な ID（文字列）
//! - **RoundId**: 1 回の実行で作られる Round の ID（ULID）
//!
//! Participant は `Ord` を実装しているので、プールを `BTreeSet` に入れると
//! シャッフル前の並び順が常に決定的になります。

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Participant はペアリング対象の参加者
///
/// 中身は外部ディレクトリ（Slack のユーザー ID など）の識別子で、
/// このクレートは意味を解釈しません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Participant {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Participant {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a Round (one successful scheduler invocation).
///
/// ULID なので生成順にソートでき、履歴バッチのファイル名にそのまま使えます。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundId(Ulid);

impl RoundId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// 時刻部分は `now`、乱数部分は `rng` から作る。
    /// FixedClock と固定シードなら同じ ID になります。
    pub fn generate<R: RngCore + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let timestamp_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let random = (u128::from(rng.next_u64()) << 64) | u128::from(rng.next_u64());
        Self(Ulid::from_parts(timestamp_ms, random))
    }
}

impl From<Ulid> for RoundId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round-{}", self.0)
    }
}
