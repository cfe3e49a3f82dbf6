//! Domain model (participants, pairs, rounds, events, errors).

pub mod errors;
pub mod events;
pub mod ids;
pub mod message;
pub mod pair;
pub mod round;

pub use self::errors::{Collaborator, CollaboratorError, DomainError, SchedulerError};
pub use self::events::{EventLevel, SchedulerEvent, SkipReason};
pub use self::ids::{Participant, RoundId};
pub use self::message::{Language, render_invitation};
pub use self::pair::{CanonicalPair, PairingRecord};
pub use self::round::Round;
