//! Pair model: canonical pairs and the records persisted per pairing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::ids::Participant;

/// An unordered pair of two distinct participants.
///
/// Always stored sorted (`low < high`), so `{a, b}` and `{b, a}` compare,
/// hash and serialize identically. On the wire it is a two-element array,
/// which is also what older history batches contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[Participant; 2]", into = "[Participant; 2]")]
pub struct CanonicalPair {
    low: Participant,
    high: Participant,
}

impl CanonicalPair {
    pub fn new(a: Participant, b: Participant) -> Result<Self, DomainError> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Ok(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => Err(DomainError::SelfPair(a)),
        }
    }

    pub fn first(&self) -> &Participant {
        &self.low
    }

    pub fn second(&self) -> &Participant {
        &self.high
    }

    pub fn contains(&self, participant: &Participant) -> bool {
        &self.low == participant || &self.high == participant
    }

    pub fn members(&self) -> [&Participant; 2] {
        [&self.low, &self.high]
    }
}

impl TryFrom<[Participant; 2]> for CanonicalPair {
    type Error = DomainError;

    fn try_from([a, b]: [Participant; 2]) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

impl From<CanonicalPair> for [Participant; 2] {
    fn from(pair: CanonicalPair) -> Self {
        [pair.low, pair.high]
    }
}

impl std::fmt::Display for CanonicalPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// One pairing that happened on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRecord {
    pub date: NaiveDate,
    pub pair: CanonicalPair,
}

impl PairingRecord {
    pub fn new(date: NaiveDate, pair: CanonicalPair) -> Self {
        Self { date, pair }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str) -> Participant {
        Participant::from(id)
    }

    #[test]
    fn pair_is_order_independent() {
        let ab = CanonicalPair::new(p("a"), p("b")).unwrap();
        let ba = CanonicalPair::new(p("b"), p("a")).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.first(), &p("a"));
        assert_eq!(ab.second(), &p("b"));
    }

    #[test]
    fn self_pair_is_rejected() {
        let err = CanonicalPair::new(p("a"), p("a")).unwrap_err();
        assert!(matches!(err, DomainError::SelfPair(ref who) if who == &p("a")));
    }

    #[test]
    fn record_matches_history_batch_format() {
        let json = r#"{"date":"2023-07-02","pair":["user9","user1"]}"#;
        let record: PairingRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 7, 2).unwrap());
        assert!(record.pair.contains(&p("user1")));
        assert!(record.pair.contains(&p("user9")));
        // 書き戻すときは正規化された順序になる
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"date":"2023-07-02","pair":["user1","user9"]}"#
        );
    }

    #[test]
    fn record_with_duplicate_member_fails_to_decode() {
        let json = r#"{"date":"2023-07-02","pair":["user1","user1"]}"#;
        assert!(serde_json::from_str::<PairingRecord>(json).is_err());
    }
}
