//! Scheduler: the fairness-constrained pairing pipeline.
//!
//! Data flows strictly Analyzer → Balancer → Generator. Every stage is a
//! synchronous function over in-memory values; randomness comes in through
//! an explicit `Rng` so a fixed seed reproduces a run exactly.

mod analyzer;
mod balancer;
mod generator;
mod plan;
mod quota;

pub use analyzer::{HistoryAnalysis, analyze};
pub use balancer::{Selection, overdue_participants, select};
pub use generator::{Arrangement, PairingPolicy, adjacent_pairs, generate};
pub use plan::{RoundPlan, RoundRules, plan_round};
pub use quota::QuotaPolicy;
