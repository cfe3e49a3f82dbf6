//! JsonDirHistoryStore - ディレクトリ上の JSON バッチとして履歴を保存
//!
//! # レイアウト
//! ```text
//! <dir>/round-01HV....json   ← 1 ラウンド = 1 ファイル（PairingRecord の JSON 配列）
//! <dir>/round-01HW....json
//! ```
//! オブジェクトストレージの `prefix/<batch>.json` と同じ形なので、
//! バケットから同期したディレクトリをそのまま読めます。
//! 既存ファイルは書き換えず、追記は常に新しいファイルを作ります。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::{CollaboratorError, PairingRecord, Round};
use crate::ports::HistoryStore;

#[derive(Debug, Clone)]
pub struct JsonDirHistoryStore {
    dir: PathBuf,
}

impl JsonDirHistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Batch files in name order (ULID names sort by creation time).
    async fn batch_paths(&self) -> Result<Vec<PathBuf>, CollaboratorError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") && entry.file_type().await?.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl HistoryStore for JsonDirHistoryStore {
    async fn read_all(&self) -> Result<Vec<PairingRecord>, CollaboratorError> {
        let mut records = Vec::new();
        for path in self.batch_paths().await? {
            let bytes = fs::read(&path).await?;
            let batch: Vec<PairingRecord> = serde_json::from_slice(&bytes)
                .map_err(|source| CollaboratorError::Decode { path: path.clone(), source })?;
            records.extend(batch);
        }
        Ok(records)
    }

    async fn append_round(&self, round: &Round) -> Result<(), CollaboratorError> {
        fs::create_dir_all(&self.dir).await?;

        let bytes = serde_json::to_vec_pretty(&round.records).map_err(CollaboratorError::Encode)?;
        let target = self.dir.join(format!("{}.json", round.id));
        // 途中で落ちても壊れたバッチが read_all に拾われないよう、別名で書いてから rename
        let staging = self.dir.join(format!(".{}.json.tmp", round.id));

        fs::write(&staging, bytes).await?;
        fs::rename(&staging, &target).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanonicalPair, Participant};
    use chrono::NaiveDate;

    fn pair(a: &str, b: &str) -> CanonicalPair {
        CanonicalPair::new(Participant::from(a), Participant::from(b)).unwrap()
    }

    #[tokio::test]
    async fn missing_directory_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonDirHistoryStore::new(tmp.path().join("runs"));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_existing_batches() {
        let tmp = tempfile::tempdir().unwrap();
        let batch = r#"[
            {"date": "2023-07-02", "pair": ["user5", "user6"]},
            {"date": "2023-07-02", "pair": ["user7", "user8"]},
            {"date": "2023-07-02", "pair": ["user9", "user1"]}
        ]"#;
        std::fs::write(tmp.path().join("test.json"), batch).unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let records = JsonDirHistoryStore::new(tmp.path()).read_all().await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].pair, pair("user1", "user9"));
        assert!(records.iter().all(|r| r.date == NaiveDate::from_ymd_opt(2023, 7, 2).unwrap()));
    }

    #[tokio::test]
    async fn appended_rounds_accumulate_as_separate_batches() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonDirHistoryStore::new(tmp.path().join("runs"));
        let first = Round::new(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(), vec![pair("a", "b"), pair("c", "d")]);
        let second = Round::new(NaiveDate::from_ymd_opt(2024, 5, 13).unwrap(), vec![pair("a", "c")]);

        store.append_round(&first).await.unwrap();
        store.append_round(&second).await.unwrap();

        let records = store.read_all().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(std::fs::read_dir(store.dir()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn corrupt_batch_is_a_decode_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("broken.json"), "{not json").unwrap();

        let err = JsonDirHistoryStore::new(tmp.path()).read_all().await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Decode { .. }));
    }
}
