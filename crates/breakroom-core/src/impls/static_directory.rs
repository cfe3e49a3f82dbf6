//! StaticDirectory - 設定ファイルなどから与えられた固定のディレクトリ

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use super::absence::{AbsencePolicy, ParticipantProfile};
use crate::domain::{CollaboratorError, Participant};
use crate::ports::{Clock, Directory};

/// Directory over a fixed list of profiles, filtered by an `AbsencePolicy`
/// evaluated against the injected clock on every call.
pub struct StaticDirectory<C> {
    profiles: BTreeMap<Participant, ParticipantProfile>,
    policy: AbsencePolicy,
    clock: C,
}

impl<C: Clock> StaticDirectory<C> {
    pub fn new(profiles: impl IntoIterator<Item = ParticipantProfile>, clock: C) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.id.clone(), p)).collect(),
            policy: AbsencePolicy::default(),
            clock,
        }
    }

    pub fn with_policy(mut self, policy: AbsencePolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<C: Clock> Directory for StaticDirectory<C> {
    async fn list_eligible(&self) -> Result<BTreeSet<Participant>, CollaboratorError> {
        let now = self.clock.now();
        Ok(self
            .profiles
            .values()
            .filter(|profile| self.policy.is_included(profile, now))
            .map(|profile| profile.id.clone())
            .collect())
    }

    async fn display_name(&self, participant: &Participant) -> Result<String, CollaboratorError> {
        self.profiles
            .get(participant)
            .map(ParticipantProfile::display_name)
            .ok_or_else(|| CollaboratorError::Unavailable(format!("unknown participant {participant}")))
    }
}
