//! Notifier implementations.
//!
//! - **ConsoleNotifier**: 標準出力に書くだけ（チャット API は対象外）
//! - **RecordingNotifier**: 送信内容を記録するテスト用。特定のペアで失敗させられる

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{CanonicalPair, CollaboratorError};
use crate::ports::{ChannelHandle, Notifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn open_channel(&self, pair: &CanonicalPair) -> Result<ChannelHandle, CollaboratorError> {
        Ok(ChannelHandle(format!("{}+{}", pair.first(), pair.second())))
    }

    async fn post_message(&self, channel: &ChannelHandle, text: &str) -> Result<(), CollaboratorError> {
        println!("--- {} ---\n{text}\n", channel.0);
        Ok(())
    }
}

/// A message the RecordingNotifier accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: ChannelHandle,
    pub text: String,
}

#[derive(Debug, Default)]
struct RecordingState {
    opened: Vec<CanonicalPair>,
    sent: Vec<SentMessage>,
}

/// Notifier that keeps everything in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<Mutex<RecordingState>>,
    failing: Arc<BTreeSet<CanonicalPair>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening a channel for any of `pairs` fails.
    pub fn failing_for(pairs: impl IntoIterator<Item = CanonicalPair>) -> Self {
        Self {
            state: Arc::default(),
            failing: Arc::new(pairs.into_iter().collect()),
        }
    }

    pub fn opened(&self) -> Vec<CanonicalPair> {
        self.state.lock().map(|s| s.opened.clone()).unwrap_or_default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.state.lock().map(|s| s.sent.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, RecordingState>, CollaboratorError> {
        self.state
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("recording notifier poisoned".to_string()))
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn open_channel(&self, pair: &CanonicalPair) -> Result<ChannelHandle, CollaboratorError> {
        if self.failing.contains(pair) {
            return Err(CollaboratorError::Unavailable(format!("cannot open channel for {pair}")));
        }
        self.lock()?.opened.push(pair.clone());
        Ok(ChannelHandle(format!("D-{}-{}", pair.first(), pair.second())))
    }

    async fn post_message(&self, channel: &ChannelHandle, text: &str) -> Result<(), CollaboratorError> {
        self.lock()?.sent.push(SentMessage {
            channel: channel.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}
