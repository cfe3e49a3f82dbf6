//! SchedulerConfig - 実行ごとに変わらない設定値

use serde::{Deserialize, Serialize};

use crate::domain::Language;
use crate::scheduler::{PairingPolicy, QuotaPolicy, RoundRules};

/// Tunables of the scheduler. Every field has a default, so an empty
/// `[scheduler]` table is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Days a participant may go unpaired before they must be included.
    pub lookback_days: u32,
    pub quota: QuotaPolicy,
    /// Shuffles tried before giving up on avoiding last round's pairs.
    pub max_attempts: u32,
    pub language: Language,
    /// Fixed random seed. `None` draws fresh entropy per run.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            quota: QuotaPolicy::Half,
            max_attempts: PairingPolicy::DEFAULT_MAX_ATTEMPTS,
            language: Language::En,
            seed: None,
        }
    }
}

impl SchedulerConfig {
    pub fn rules(&self) -> RoundRules {
        RoundRules {
            lookback_days: self.lookback_days,
            quota: self.quota,
            pairing: PairingPolicy::new(self.max_attempts),
        }
    }
}
