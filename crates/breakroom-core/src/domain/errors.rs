//! Errors - エラー型と分類
//!
//! # 分類
//! - **DomainError**: 不正なドメイン値（自分自身とのペアなど）
//! - **CollaboratorError**: ports の実装が返す I/O 系のエラー
//! - **SchedulerError**: 1 回の実行を失敗させるエラー
//!
//! プールが小さすぎる・休日といった「何もしない」ケースはエラーではなく
//! `RunOutcome::Skipped` で表現します。

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::ids::Participant;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("participant {0} cannot be paired with itself")]
    SelfPair(Participant),
}

/// CollaboratorError は外部協調者（directory / history / notifier）の失敗
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode history batch: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// どの協調者が落ちたか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Directory,
    HistoryStore,
    Notifier,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::Directory => "directory",
            Collaborator::HistoryStore => "history store",
            Collaborator::Notifier => "notifier",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Every shuffle within the retry bound repeated a pair from the last round.
    #[error("no arrangement without a repeated pair found after {attempts} attempts")]
    NoValidArrangement { attempts: u32 },

    #[error("{collaborator} unavailable: {source}")]
    CollaboratorUnavailable {
        collaborator: Collaborator,
        #[source]
        source: CollaboratorError,
    },
}

impl SchedulerError {
    pub fn unavailable(collaborator: Collaborator, source: CollaboratorError) -> Self {
        Self::CollaboratorUnavailable {
            collaborator,
            source,
        }
    }
}
