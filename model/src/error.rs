use thiserror::Error;

use crate::actor::{ActorField, ActorId};
use crate::pool::RollKind;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidRollReason {
    /// The attribute, skill and bonus values relevant to the roll kind do not add up to any dice.
    NoDice,

    /// Advanced skills cannot be rolled without at least one level in the skill.
    UntrainedAdvancedSkill,
}

/// A roll request failed its validity precondition. Nothing was rolled.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("invalid {kind} roll: {reason:?}")]
pub struct InvalidRollError {
    pub kind: RollKind,
    pub reason: InvalidRollReason,
}

/// A roll can be pushed at most once.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("roll has already been pushed")]
pub struct AlreadyPushedError;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    #[error("unknown actor '{0}'")]
    UnknownActor(ActorId),

    #[error("actor '{actor}' has no field {field:?}")]
    MissingField { actor: ActorId, field: ActorField },

    #[error("field {field:?} of actor '{actor}' has the wrong type")]
    FieldType { actor: ActorId, field: ActorField },
}

/// Failures of actor-facing resolutions, which both roll and persist.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidRoll(#[from] InvalidRollError),

    #[error(transparent)]
    AlreadyPushed(#[from] AlreadyPushedError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
