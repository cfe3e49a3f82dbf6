//! Absence policy - 誰を今回のプールに入れるか
//!
//! # 規則
//! - 削除済みのアカウントは除外
//! - ステータスが不在マーカー（休暇・病欠）でなければ参加
//! - 不在マーカーでも、有効期限が設定されていて lookahead 以内に切れるなら参加
//! - それ以外（期限なしの不在、期限が先の不在）は除外

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Participant;

/// A directory entry as the chat workspace reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: Participant,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    /// Status emoji, e.g. `:palm_tree:`. Empty when no status is set.
    #[serde(default)]
    pub status_marker: String,
    /// Unix seconds at which the status clears; 0 means it never does.
    #[serde(default)]
    pub status_expiration: i64,
}

impl ParticipantProfile {
    pub fn new(id: impl Into<Participant>) -> Self {
        Self {
            id: id.into(),
            real_name: None,
            deleted: false,
            status_marker: String::new(),
            status_expiration: 0,
        }
    }

    pub fn with_real_name(mut self, real_name: impl Into<String>) -> Self {
        self.real_name = Some(real_name.into());
        self
    }

    pub fn with_status(mut self, marker: impl Into<String>, expiration: i64) -> Self {
        self.status_marker = marker.into();
        self.status_expiration = expiration;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// First word of the real name, or the id when no name is known.
    pub fn display_name(&self) -> String {
        self.real_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsencePolicy {
    pub absence_markers: Vec<String>,
    /// An absence that clears within this window does not exclude anyone.
    pub lookahead: Duration,
}

impl Default for AbsencePolicy {
    fn default() -> Self {
        Self {
            absence_markers: vec![
                ":palm_tree:".to_string(),
                ":face_with_thermometer:".to_string(),
            ],
            lookahead: Duration::days(1),
        }
    }
}

impl AbsencePolicy {
    pub fn is_included(&self, profile: &ParticipantProfile, now: DateTime<Utc>) -> bool {
        if profile.deleted {
            return false;
        }
        if !self.absence_markers.contains(&profile.status_marker) {
            return true;
        }
        let horizon = (now + self.lookahead).timestamp();
        profile.status_expiration != 0 && profile.status_expiration < horizon
    }
}
