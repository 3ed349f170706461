use model::actor::{ActorId, ActorRecord, MemoryActorStore};
use model::config::RulesConfig;
use model::pool::{RollKind, RollRequest};
use model::resolver::CombatResolver;
use model::test_util::ScriptedDieRoller;

mod automatic_fire;
mod checks;
mod combat;

pub fn resolver(faces: impl IntoIterator<Item = u8>) -> CombatResolver<ScriptedDieRoller> {
    CombatResolver::new(RulesConfig::default(), ScriptedDieRoller::new(faces))
}

pub fn request(kind: RollKind, attribute: i32, skill: i32, bonus: i32) -> RollRequest {
    RollRequest {
        kind,
        attribute,
        skill,
        bonus,
        ..RollRequest::default()
    }
}

pub fn store_with(actors: impl IntoIterator<Item = (&'static str, ActorRecord)>)
        -> MemoryActorStore {
    let mut store = MemoryActorStore::new();

    for (id, record) in actors {
        store.insert(ActorId::new(id), record);
    }

    store
}
