//! Scheduler - 1 回の実行（run_once）
//!
//! # フロー
//! 1. Calendar で休日判定（休日なら何もしない）
//! 2. Directory からプール取得（失敗したら中断）
//! 3. HistoryStore から履歴取得（失敗したら空の履歴で続行）
//! 4. plan_round（Analyzer → Balancer → Generator）
//! 5. ペアごとに Notifier で通知
//! 6. 通知できたペアだけを Round として HistoryStore に追記
//!
//! # 記録ポリシー
//! 通知に失敗したペアは履歴に残しません。
//! 通知後に追記が失敗した場合は、送信済みのまま `CollaboratorUnavailable` を返します。

use std::sync::Arc;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::config::SchedulerConfig;
use crate::domain::{
    CanonicalPair, Collaborator, CollaboratorError, Round, RoundId, SchedulerError, SchedulerEvent,
    SkipReason, render_invitation,
};
use crate::ports::{Clock, Directory, EventSink, HistoryStore, HolidayCalendar, Notifier};
use crate::scheduler::plan_round;

/// What one invocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing was selected, announced or written.
    Skipped { date: NaiveDate, reason: SkipReason },
    Completed(RunReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// The round that was appended to history (announced pairs only).
    pub round: Round,
    /// Pairs generated but not announced; they are not in history.
    pub undelivered: Vec<CanonicalPair>,
    /// Shuffles the generator needed.
    pub attempts: u32,
}

/// Scheduler は協調者を束ねて 1 ラウンドを実行する
///
/// 同じ履歴に対する同時実行は想定しません（呼び出し側で直列化すること）。
pub struct Scheduler {
    pub(crate) config: SchedulerConfig,
    pub(crate) directory: Arc<dyn Directory>,
    pub(crate) history: Arc<dyn HistoryStore>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) calendar: Arc<dyn HolidayCalendar>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) events: Arc<dyn EventSink>,
}

impl Scheduler {
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run one invocation with randomness from `config.seed`, or fresh
    /// entropy when no seed is configured.
    pub async fn run_once(&self) -> Result<RunOutcome, SchedulerError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(&mut rng).await
    }

    pub async fn run_with_rng<R: Rng + Send>(&self, rng: &mut R) -> Result<RunOutcome, SchedulerError> {
        let today = self.clock.today();
        if self.calendar.is_blackout_day(today) {
            return Ok(self.skip(today, SkipReason::Blackout));
        }

        let pool = match self.directory.list_eligible().await {
            Ok(pool) => pool,
            Err(e) => {
                self.events.emit(&SchedulerEvent::DirectoryUnavailable {
                    error: e.to_string(),
                });
                return Err(SchedulerError::unavailable(Collaborator::Directory, e));
            }
        };

        let history = match self.history.read_all().await {
            Ok(history) => history,
            Err(e) => {
                self.events.emit(&SchedulerEvent::HistoryUnavailable {
                    error: e.to_string(),
                });
                Vec::new()
            }
        };

        let plan = match plan_round(&pool, &history, today, &self.config.rules(), rng) {
            Ok(plan) => plan,
            Err(e) => {
                if let SchedulerError::NoValidArrangement { attempts } = e {
                    self.events.emit(&SchedulerEvent::ArrangementFailed { attempts });
                }
                return Err(e);
            }
        };

        if plan.arrangement.pairs.is_empty() {
            return Ok(self.skip(today, SkipReason::NotEnoughParticipants));
        }

        self.events.emit(&SchedulerEvent::SelectionMade {
            date: today,
            pool: pool.len(),
            overdue: plan.selection.overdue,
            quota: plan.selection.quota,
            selected: plan.selection.chosen.len(),
        });
        self.events.emit(&SchedulerEvent::ArrangementFound {
            attempts: plan.arrangement.attempts,
            pairs: plan.arrangement.pairs.len(),
        });

        let mut delivered = Vec::new();
        let mut undelivered = Vec::new();
        for pair in plan.arrangement.pairs {
            match self.announce(&pair).await {
                Ok(()) => {
                    self.events.emit(&SchedulerEvent::PairAnnounced { pair: pair.clone() });
                    delivered.push(pair);
                }
                Err(e) => {
                    self.events.emit(&SchedulerEvent::AnnouncementFailed {
                        pair: pair.clone(),
                        error: e.to_string(),
                    });
                    undelivered.push(pair);
                }
            }
        }

        let id = RoundId::generate(self.clock.now(), rng);
        let round = Round::with_id(id, today, delivered);
        if !round.is_empty() {
            if let Err(e) = self.history.append_round(&round).await {
                self.events.emit(&SchedulerEvent::RoundNotPersisted {
                    round: round.id,
                    records: round.len(),
                    error: e.to_string(),
                });
                return Err(SchedulerError::unavailable(Collaborator::HistoryStore, e));
            }
            self.events.emit(&SchedulerEvent::RoundPersisted {
                round: round.id,
                records: round.len(),
            });
        }

        Ok(RunOutcome::Completed(RunReport {
            round,
            undelivered,
            attempts: plan.arrangement.attempts,
        }))
    }

    async fn announce(&self, pair: &CanonicalPair) -> Result<(), CollaboratorError> {
        let first = self.directory.display_name(pair.first()).await?;
        let second = self.directory.display_name(pair.second()).await?;
        let channel = self.notifier.open_channel(pair).await?;
        let text = render_invitation(self.config.language, &first, &second);
        self.notifier.post_message(&channel, &text).await
    }

    fn skip(&self, date: NaiveDate, reason: SkipReason) -> RunOutcome {
        self.events.emit(&SchedulerEvent::Skipped { date, reason });
        RunOutcome::Skipped { date, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use crate::app::SchedulerBuilder;
    use crate::domain::{EventLevel, Language, PairingRecord, Participant};
    use crate::impls::{
        FixedHolidays, InMemoryHistoryStore, ParticipantProfile, RecordingEventSink,
        RecordingNotifier, StaticDirectory,
    };
    use crate::ports::FixedClock;

    fn clock_on(days_after_start: i64) -> FixedClock {
        let start = Utc.with_ymd_and_hms(2021, 1, 4, 9, 0, 0).unwrap();
        FixedClock::new(start + Duration::days(days_after_start))
    }

    fn directory(ids: &[&str]) -> StaticDirectory<FixedClock> {
        let profiles = ids
            .iter()
            .map(|id| ParticipantProfile::new(*id).with_real_name(format!("Name{id} Surname")));
        StaticDirectory::new(profiles, clock_on(0))
    }

    fn nine() -> Vec<&'static str> {
        vec!["U1", "U2", "U3", "U4", "U5", "U6", "U7", "U8", "U9"]
    }

    fn pair(a: &str, b: &str) -> CanonicalPair {
        CanonicalPair::new(Participant::from(a), Participant::from(b)).unwrap()
    }

    fn config(seed: u64) -> SchedulerConfig {
        SchedulerConfig {
            seed: Some(seed),
            ..SchedulerConfig::default()
        }
    }

    /// History store whose reads and/or writes fail.
    #[derive(Clone, Default)]
    struct FlakyHistory {
        inner: InMemoryHistoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    #[async_trait]
    impl HistoryStore for FlakyHistory {
        async fn read_all(&self) -> Result<Vec<PairingRecord>, CollaboratorError> {
            if self.fail_reads {
                return Err(CollaboratorError::Unavailable("read timeout".to_string()));
            }
            self.inner.read_all().await
        }

        async fn append_round(&self, round: &Round) -> Result<(), CollaboratorError> {
            if self.fail_writes {
                return Err(CollaboratorError::Unavailable("write timeout".to_string()));
            }
            self.inner.append_round(round).await
        }
    }

    #[tokio::test]
    async fn nine_participants_produce_three_announced_pairs() {
        let history = InMemoryHistoryStore::new();
        let notifier = RecordingNotifier::new();
        let events = RecordingEventSink::new();
        let scheduler = SchedulerBuilder::new(config(1))
            .directory(directory(&nine()))
            .history(history.clone())
            .notifier(notifier.clone())
            .clock(clock_on(0))
            .events(events.clone())
            .build()
            .unwrap();

        let outcome = scheduler.run_once().await.unwrap();

        let report = match outcome {
            RunOutcome::Completed(report) => report,
            other => panic!("expected a completed run, got {other:?}"),
        };
        assert_eq!(report.round.len(), 3);
        assert!(report.undelivered.is_empty());
        assert_eq!(notifier.sent().len(), 3);
        assert_eq!(history.len().await, 3);
        assert!(events.at_least(EventLevel::Warn).is_empty());
    }

    #[tokio::test]
    async fn invitation_uses_first_names_and_language() {
        let notifier = RecordingNotifier::new();
        let scheduler = SchedulerBuilder::new(SchedulerConfig {
            language: Language::De,
            ..config(0)
        })
        .directory(directory(&["U1", "U2"]))
        .history(InMemoryHistoryStore::new())
        .notifier(notifier.clone())
        .clock(clock_on(0))
        .events(RecordingEventSink::new())
        .build()
        .unwrap();

        scheduler.run_once().await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text.starts_with("NameU1 und NameU2, ihr wurdet"));
    }

    #[tokio::test]
    async fn blackout_day_is_a_no_op() {
        let history = InMemoryHistoryStore::new();
        let notifier = RecordingNotifier::new();
        let events = RecordingEventSink::new();
        let today = clock_on(0).today();
        let scheduler = SchedulerBuilder::new(config(0))
            .directory(directory(&nine()))
            .history(history.clone())
            .notifier(notifier.clone())
            .calendar(FixedHolidays::new([today]))
            .clock(clock_on(0))
            .events(events.clone())
            .build()
            .unwrap();

        let outcome = scheduler.run_once().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Skipped {
                date: today,
                reason: SkipReason::Blackout
            }
        );
        assert!(notifier.opened().is_empty());
        assert!(history.is_empty().await);
        assert_eq!(
            events.events(),
            vec![SchedulerEvent::Skipped {
                date: today,
                reason: SkipReason::Blackout
            }]
        );
    }

    #[tokio::test]
    async fn single_participant_is_skipped_not_failed() {
        let history = InMemoryHistoryStore::new();
        let scheduler = SchedulerBuilder::new(config(0))
            .directory(directory(&["U1"]))
            .history(history.clone())
            .notifier(RecordingNotifier::new())
            .clock(clock_on(0))
            .events(RecordingEventSink::new())
            .build()
            .unwrap();

        let outcome = scheduler.run_once().await.unwrap();

        assert!(matches!(
            outcome,
            RunOutcome::Skipped {
                reason: SkipReason::NotEnoughParticipants,
                ..
            }
        ));
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn repeated_only_pair_fails_without_side_effects() {
        let yesterday = clock_on(-1).today();
        let history = InMemoryHistoryStore::with_records(vec![PairingRecord::new(yesterday, pair("U1", "U2"))]);
        let notifier = RecordingNotifier::new();
        let events = RecordingEventSink::new();
        let scheduler = SchedulerBuilder::new(config(0))
            .directory(directory(&["U1", "U2"]))
            .history(history.clone())
            .notifier(notifier.clone())
            .clock(clock_on(0))
            .events(events.clone())
            .build()
            .unwrap();

        let err = scheduler.run_once().await.unwrap_err();

        assert!(matches!(err, SchedulerError::NoValidArrangement { attempts: 1000 }));
        assert!(notifier.opened().is_empty());
        assert_eq!(history.len().await, 1);
        assert_eq!(
            events.at_least(EventLevel::Error),
            vec![SchedulerEvent::ArrangementFailed { attempts: 1000 }]
        );
    }

    #[tokio::test]
    async fn unreadable_history_degrades_to_empty() {
        let history = FlakyHistory {
            fail_reads: true,
            ..FlakyHistory::default()
        };
        let events = RecordingEventSink::new();
        let scheduler = SchedulerBuilder::new(config(3))
            .directory(directory(&nine()))
            .history(history.clone())
            .notifier(RecordingNotifier::new())
            .clock(clock_on(0))
            .events(events.clone())
            .build()
            .unwrap();

        let outcome = scheduler.run_once().await.unwrap();

        assert!(matches!(outcome, RunOutcome::Completed(ref r) if r.round.len() == 3));
        assert_eq!(history.inner.len().await, 3);
        assert!(matches!(
            events.at_least(EventLevel::Warn).as_slice(),
            [SchedulerEvent::HistoryUnavailable { .. }]
        ));
    }

    #[tokio::test]
    async fn failed_write_is_reported_after_announcing() {
        let history = FlakyHistory {
            fail_writes: true,
            ..FlakyHistory::default()
        };
        let notifier = RecordingNotifier::new();
        let events = RecordingEventSink::new();
        let scheduler = SchedulerBuilder::new(config(3))
            .directory(directory(&nine()))
            .history(history)
            .notifier(notifier.clone())
            .clock(clock_on(0))
            .events(events.clone())
            .build()
            .unwrap();

        let err = scheduler.run_once().await.unwrap_err();

        assert!(matches!(
            err,
            SchedulerError::CollaboratorUnavailable {
                collaborator: Collaborator::HistoryStore,
                ..
            }
        ));
        assert_eq!(notifier.sent().len(), 3);
        assert!(matches!(
            events.at_least(EventLevel::Error).as_slice(),
            [SchedulerEvent::RoundNotPersisted { records: 3, .. }]
        ));
    }

    #[tokio::test]
    async fn unannounced_pair_is_not_recorded() {
        let history = InMemoryHistoryStore::new();
        let notifier = RecordingNotifier::failing_for([pair("U1", "U2")]);
        let scheduler = SchedulerBuilder::new(config(0))
            .directory(directory(&["U1", "U2"]))
            .history(history.clone())
            .notifier(notifier)
            .clock(clock_on(0))
            .events(RecordingEventSink::new())
            .build()
            .unwrap();

        let outcome = scheduler.run_once().await.unwrap();

        let report = match outcome {
            RunOutcome::Completed(report) => report,
            other => panic!("expected a completed run, got {other:?}"),
        };
        assert!(report.round.is_empty());
        assert_eq!(report.undelivered, vec![pair("U1", "U2")]);
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn unavailable_directory_is_surfaced() {
        struct DownDirectory;

        #[async_trait]
        impl Directory for DownDirectory {
            async fn list_eligible(&self) -> Result<BTreeSet<Participant>, CollaboratorError> {
                Err(CollaboratorError::Unavailable("users.list failed".to_string()))
            }

            async fn display_name(&self, participant: &Participant) -> Result<String, CollaboratorError> {
                Ok(participant.to_string())
            }
        }

        let scheduler = SchedulerBuilder::new(config(0))
            .directory(DownDirectory)
            .history(InMemoryHistoryStore::new())
            .notifier(RecordingNotifier::new())
            .events(RecordingEventSink::new())
            .build()
            .unwrap();

        let err = scheduler.run_once().await.unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::CollaboratorUnavailable {
                collaborator: Collaborator::Directory,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn history_grows_by_one_round_per_run() {
        let ids: Vec<String> = (1..=10).map(|i| format!("U{i}")).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let history = InMemoryHistoryStore::new();
        let mut expected_len = 0;
        let mut previous: Vec<PairingRecord> = Vec::new();
        let mut last_round: BTreeSet<CanonicalPair> = BTreeSet::new();

        for week in 0..6 {
            let scheduler = SchedulerBuilder::new(config(week))
                .directory(directory(&ids))
                .history(history.clone())
                .notifier(RecordingNotifier::new())
                .clock(clock_on(week as i64 * 7))
                .events(RecordingEventSink::new())
                .build()
                .unwrap();

            let RunOutcome::Completed(report) = scheduler.run_once().await.unwrap() else {
                panic!("week {week} did not complete");
            };
            expected_len += report.round.len();

            let records = history.read_all().await.unwrap();
            assert_eq!(records.len(), expected_len);
            assert_eq!(&records[..previous.len()], previous.as_slice(), "earlier records changed");
            assert!(report.round.pairs().all(|p| !last_round.contains(p)), "week {week} repeated a pair");

            last_round = report.round.pairs().cloned().collect();
            previous = records;
        }
        assert_eq!(expected_len, 6 * 3);
    }

    #[tokio::test]
    async fn same_seed_same_round() {
        let run = || async {
            let scheduler = SchedulerBuilder::new(config(0))
                .directory(directory(&nine()))
                .history(InMemoryHistoryStore::new())
                .notifier(RecordingNotifier::new())
                .clock(clock_on(0))
                .events(RecordingEventSink::new())
                .build()
                .unwrap();
            match scheduler.run_once().await.unwrap() {
                RunOutcome::Completed(report) => report.round.pairs().cloned().collect::<Vec<_>>(),
                other => panic!("unexpected {other:?}"),
            }
        };

        assert_eq!(run().await, run().await);
    }

    #[tokio::test]
    async fn round_id_is_stamped_with_the_run_clock() {
        let run = || async {
            let scheduler = SchedulerBuilder::new(config(5))
                .directory(directory(&nine()))
                .history(InMemoryHistoryStore::new())
                .notifier(RecordingNotifier::new())
                .clock(clock_on(0))
                .events(RecordingEventSink::new())
                .build()
                .unwrap();
            match scheduler.run_once().await.unwrap() {
                RunOutcome::Completed(report) => report.round.id,
                other => panic!("unexpected {other:?}"),
            }
        };

        let id = run().await;
        assert_eq!(id.as_ulid().timestamp_ms(), clock_on(0).now().timestamp_millis() as u64);
        assert_eq!(id, run().await);
    }
}
