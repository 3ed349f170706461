use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ModifierId(String);

impl ModifierId {

    pub fn new(id: impl Into<String>) -> ModifierId {
        ModifierId(id.into())
    }
}

/// A situational modifier granted by gear or talents, e.g. a scope adding one die. Only checked
/// modifiers count towards a roll.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ItemModifier {
    pub name: String,
    pub value: i32,
    pub checked: bool,
}

impl ItemModifier {

    pub fn checked(name: impl Into<String>, value: i32) -> ItemModifier {
        ItemModifier {
            name: name.into(),
            value,
            checked: true,
        }
    }

    pub fn unchecked(name: impl Into<String>, value: i32) -> ItemModifier {
        ItemModifier {
            checked: false,
            ..ItemModifier::checked(name, value)
        }
    }
}

impl Display for ItemModifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.value > 0 {
            write!(f, "{} (+{})", self.name, self.value)
        }
        else {
            write!(f, "{} ({})", self.name, self.value)
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ItemModifiers {
    modifiers: BTreeMap<ModifierId, ItemModifier>,
}

impl ItemModifiers {

    pub fn from_modifiers(
        modifiers: impl IntoIterator<Item = (ModifierId, ItemModifier)>
    ) -> ItemModifiers {
        ItemModifiers {
            modifiers: modifiers.into_iter().collect(),
        }
    }

    /// Checks or unchecks the modifier with the given id. Returns `false` if there is no such
    /// modifier.
    pub fn set_checked(&mut self, id: &ModifierId, checked: bool) -> bool {
        match self.modifiers.get_mut(id) {
            Some(modifier) => {
                modifier.checked = checked;
                true
            },
            None => false,
        }
    }

    pub fn checked(&self) -> impl Iterator<Item = &ItemModifier> + use<'_> {
        self.modifiers.values().filter(|modifier| modifier.checked)
    }

    /// Sum of the signed values of all checked modifiers.
    pub fn bonus(&self) -> i32 {
        self.checked().map(|modifier| modifier.value).sum()
    }

    /// One line per checked modifier, e.g. `Scope (+1)`.
    pub fn checked_summary(&self) -> String {
        self.checked()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
