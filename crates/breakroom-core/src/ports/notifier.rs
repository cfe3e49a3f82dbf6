//! Notifier port - ペアへの通知（会話を開いてメッセージを投稿）

use async_trait::async_trait;

use crate::domain::{CanonicalPair, CollaboratorError};

/// Opaque handle of a conversation opened for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelHandle(pub String);

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn open_channel(&self, pair: &CanonicalPair) -> Result<ChannelHandle, CollaboratorError>;

    async fn post_message(&self, channel: &ChannelHandle, text: &str) -> Result<(), CollaboratorError>;
}
