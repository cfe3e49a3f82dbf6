//! Quota policy: how many participants take part in a round.

use serde::{Deserialize, Serialize};

/// Target number of participants per round, derived from the pool size.
///
/// The result is always clipped to the pool size, and pools smaller than two
/// produce a quota of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaPolicy {
    /// Roughly half the pool, rounded up to a whole pair: `ceil(n / 4) * 2`.
    ///
    /// n=2 → 2, n=4 → 2, n=9 → 6, n=20 → 10.
    #[default]
    Half,
    /// A fixed number of participants.
    Fixed { participants: usize },
}

impl QuotaPolicy {
    pub fn quota_for(&self, pool_size: usize) -> usize {
        if pool_size < 2 {
            return 0;
        }
        let target = match self {
            QuotaPolicy::Half => pool_size.div_ceil(4) * 2,
            QuotaPolicy::Fixed { participants } => *participants,
        };
        target.min(pool_size)
    }
}
