use serde::Serialize;

use crate::auto_fire::AttackSeries;
use crate::check::RolledCheck;
use crate::damage::{DamageComputation, DamageReductionBreakdown};
use crate::suppression::SuppressionCheck;

/// A result handed to the host for display.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum Presentation<'a> {
    Check(&'a RolledCheck),
    FullAuto(&'a AttackSeries),
    Damage(&'a DamageComputation),
    SeriesDamage(&'a [DamageComputation]),
    DamageReduction(&'a DamageReductionBreakdown),
    Suppression(&'a SuppressionCheck),
}

impl Presentation<'_> {

    pub fn title(&self) -> &'static str {
        match self {
            Presentation::Check(_) => "Roll",
            Presentation::FullAuto(_) => "Full-Auto",
            Presentation::Damage(_) => "Damage",
            Presentation::SeriesDamage(_) => "Full-Auto Damage",
            Presentation::DamageReduction(_) => "Damage Reduction",
            Presentation::Suppression(_) => "Suppression Check",
        }
    }
}

pub trait Presenter {

    fn present(&mut self, presentation: Presentation<'_>);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, presentation: Presentation<'_>) {
        (**self).present(presentation)
    }
}
