//! InMemoryHistoryStore - 開発・テスト用の履歴

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CollaboratorError, PairingRecord, Round};
use crate::ports::HistoryStore;

/// HistoryStore backed by a shared `Vec`. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    records: Arc<Mutex<Vec<PairingRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PairingRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn read_all(&self) -> Result<Vec<PairingRecord>, CollaboratorError> {
        Ok(self.records.lock().await.clone())
    }

    async fn append_round(&self, round: &Round) -> Result<(), CollaboratorError> {
        self.records.lock().await.extend(round.records.iter().cloned());
        Ok(())
    }
}
