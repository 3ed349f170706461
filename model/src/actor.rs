//! Seam to the host that owns actor documents. Resolutions read stats and armor through an
//! [ActorStore] and persist hit point, stress and action changes through it.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::damage::ArmorItem;
use crate::error::StoreError;

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {

    pub fn new(id: impl Into<String>) -> ActorId {
        ActorId(id.into())
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted actor fields touched by combat resolution.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorField {
    HitPoints,
    Stress,
    Suppressed,
    PinnedDown,
    FastActionUsed,
    SlowActionUsed,

    /// 0 for no cover, 1 for light and 2 for heavy cover.
    Cover,
}

impl ActorField {

    /// Flags that are cleared at the start of every combat round.
    pub const ROUND_FLAGS: [ActorField; 4] = [
        ActorField::FastActionUsed,
        ActorField::SlowActionUsed,
        ActorField::Suppressed,
        ActorField::PinnedDown,
    ];
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i32),
    Flag(bool),
}

pub trait ActorStore {

    fn field(&self, actor: &ActorId, field: ActorField) -> Result<FieldValue, StoreError>;

    fn set_field(&mut self, actor: &ActorId, field: ActorField, value: FieldValue)
        -> Result<(), StoreError>;

    fn armor(&self, actor: &ActorId) -> Result<Vec<ArmorItem>, StoreError>;

    fn int_field(&self, actor: &ActorId, field: ActorField) -> Result<i32, StoreError> {
        match self.field(actor, field)? {
            FieldValue::Int(value) => Ok(value),
            FieldValue::Flag(_) => Err(StoreError::FieldType {
                actor: actor.clone(),
                field,
            }),
        }
    }

    fn flag_field(&self, actor: &ActorId, field: ActorField) -> Result<bool, StoreError> {
        match self.field(actor, field)? {
            FieldValue::Flag(value) => Ok(value),
            FieldValue::Int(_) => Err(StoreError::FieldType {
                actor: actor.clone(),
                field,
            }),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActorRecord {
    pub fields: HashMap<ActorField, FieldValue>,

    #[serde(default)]
    pub armor: Vec<ArmorItem>,
}

impl ActorRecord {

    /// A fresh, unstressed actor out of cover with both actions available.
    pub fn new(hit_points: i32) -> ActorRecord {
        let fields = [
            (ActorField::HitPoints, FieldValue::Int(hit_points)),
            (ActorField::Stress, FieldValue::Int(0)),
            (ActorField::Suppressed, FieldValue::Flag(false)),
            (ActorField::PinnedDown, FieldValue::Flag(false)),
            (ActorField::FastActionUsed, FieldValue::Flag(false)),
            (ActorField::SlowActionUsed, FieldValue::Flag(false)),
            (ActorField::Cover, FieldValue::Int(0)),
        ];

        ActorRecord {
            fields: fields.into_iter().collect(),
            armor: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: ActorField, value: FieldValue) -> ActorRecord {
        self.fields.insert(field, value);
        self
    }

    pub fn with_armor(mut self, item: ArmorItem) -> ActorRecord {
        self.armor.push(item);
        self
    }
}

/// Actor store kept entirely in memory.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MemoryActorStore {
    actors: HashMap<ActorId, ActorRecord>,
}

impl MemoryActorStore {

    pub fn new() -> MemoryActorStore {
        MemoryActorStore::default()
    }

    pub fn insert(&mut self, actor: ActorId, record: ActorRecord) {
        self.actors.insert(actor, record);
    }

    /// Ids of all stored actors, in no particular order.
    pub fn actor_ids(&self) -> impl Iterator<Item = &ActorId> + use<'_> {
        self.actors.keys()
    }

    fn record_or_err(&self, actor: &ActorId) -> Result<&ActorRecord, StoreError> {
        self.actors.get(actor).ok_or_else(|| StoreError::UnknownActor(actor.clone()))
    }
}

impl ActorStore for MemoryActorStore {
    fn field(&self, actor: &ActorId, field: ActorField) -> Result<FieldValue, StoreError> {
        self.record_or_err(actor)?
            .fields
            .get(&field)
            .copied()
            .ok_or_else(|| StoreError::MissingField {
                actor: actor.clone(),
                field,
            })
    }

    fn set_field(&mut self, actor: &ActorId, field: ActorField, value: FieldValue)
            -> Result<(), StoreError> {
        let record = self.actors.get_mut(actor)
            .ok_or_else(|| StoreError::UnknownActor(actor.clone()))?;

        tracing::debug!(%actor, ?field, ?value, "actor field updated");
        record.fields.insert(field, value);

        Ok(())
    }

    fn armor(&self, actor: &ActorId) -> Result<Vec<ArmorItem>, StoreError> {
        Ok(self.record_or_err(actor)?.armor.clone())
    }
}
