//! Pair Generator - 選ばれた参加者をペアに分ける
//!
//! # 手順
//! 1. シャッフルして隣同士をペアにする（奇数なら最後の 1 人は今回お休み）
//! 2. 前回ラウンドと同じペアが 1 つでもあればやり直し
//! 3. `max_attempts` 回連続で衝突したら `NoValidArrangement`
//!
//! 候補が 2 人しかおらず、その 2 人が前回ペアだった場合などは
//! どれだけシャッフルしても解がないので、上限で必ず止まります。

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::domain::{CanonicalPair, Participant, SchedulerError};

/// Retry bound for the shuffle-and-check loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingPolicy {
    /// Number of shuffles to try before giving up. `SchedulerBuilder`
    /// refuses 0, which would fail every selection of two or more.
    pub max_attempts: u32,
}

impl PairingPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

impl Default for PairingPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

/// A collision-free arrangement and how many shuffles it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    pub pairs: Vec<CanonicalPair>,
    pub attempts: u32,
}

/// Group `sequence` as `(s[0], s[1]), (s[2], s[3]), ...`, dropping an odd
/// trailing element, and canonicalize each group.
///
/// Identical neighbours (which a well-formed selection never contains) are
/// skipped rather than turned into a self-pair.
pub fn adjacent_pairs(sequence: &[Participant]) -> Vec<CanonicalPair> {
    sequence
        .chunks_exact(2)
        .filter_map(|chunk| CanonicalPair::new(chunk[0].clone(), chunk[1].clone()).ok())
        .collect()
}

/// Shuffle `selected` until no adjacent pair repeats one of `last_round_pairs`.
pub fn generate<R: Rng + ?Sized>(
    selected: &[Participant],
    last_round_pairs: &BTreeSet<CanonicalPair>,
    policy: PairingPolicy,
    rng: &mut R,
) -> Result<Arrangement, SchedulerError> {
    if selected.len() < 2 {
        return Ok(Arrangement {
            pairs: Vec::new(),
            attempts: 0,
        });
    }

    let mut order = selected.to_vec();
    for attempt in 1..=policy.max_attempts {
        order.shuffle(rng);
        let pairs = adjacent_pairs(&order);
        if pairs.iter().all(|pair| !last_round_pairs.contains(pair)) {
            return Ok(Arrangement {
                pairs,
                attempts: attempt,
            });
        }
    }

    Err(SchedulerError::NoValidArrangement {
        attempts: policy.max_attempts,
    })
}
