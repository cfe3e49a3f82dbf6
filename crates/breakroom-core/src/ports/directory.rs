//! Directory port - 参加者ディレクトリ（Slack workspace など）
//!
//! 返すプールは削除済み・不在の人を除外済みであること。
//! 除外の規則は `impls::absence::AbsencePolicy` を参照。

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{CollaboratorError, Participant};

#[async_trait]
pub trait Directory: Send + Sync {
    /// Participants eligible for this round.
    async fn list_eligible(&self) -> Result<BTreeSet<Participant>, CollaboratorError>;

    /// Human-readable name used in the invitation text.
    async fn display_name(&self, participant: &Participant) -> Result<String, CollaboratorError>;
}
