use serde::{Deserialize, Serialize};

use crate::pool::ActorKind;

/// Change of the shared fortune (darkness point) counter caused by a push.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FortuneEvent {
    /// A player-aligned character pushed: the game master gains a point.
    Increment,

    /// An adversary pushed: the game master pays a point.
    Decrement,
}

impl FortuneEvent {

    pub fn for_push_by(actor_kind: ActorKind) -> FortuneEvent {
        match actor_kind {
            ActorKind::Player => FortuneEvent::Increment,
            ActorKind::Adversary => FortuneEvent::Decrement,
        }
    }
}

/// Handle to the counter owned by the host. Every push must be applied exactly once.
pub trait FortuneCounter {

    fn apply(&mut self, event: FortuneEvent);
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DarknessPoints {
    points: u32,
}

impl DarknessPoints {

    pub fn new(points: u32) -> DarknessPoints {
        DarknessPoints { points }
    }

    pub fn points(self) -> u32 {
        self.points
    }
}

impl FortuneCounter for DarknessPoints {
    fn apply(&mut self, event: FortuneEvent) {
        self.points = match event {
            FortuneEvent::Increment => self.points.saturating_add(1),
            FortuneEvent::Decrement => self.points.saturating_sub(1),
        };

        tracing::debug!(?event, points = self.points, "darkness points changed");
    }
}
