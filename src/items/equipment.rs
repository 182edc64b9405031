use serde::{Deserialize, Serialize};

use super::types::{EquipmentSlot, Item, StatBonuses};

/// Worn equipment: at most one item per slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
        }
    }

    /// Puts `item` in its slot, handing back the previous occupant.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.replace(item),
            EquipmentSlot::Armor => self.armor.replace(item),
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    /// Sum of all equipped stat bonuses.
    pub fn bonus_total(&self) -> StatBonuses {
        let mut total = StatBonuses::none();
        for item in self.iter_equipped() {
            total.add(&item.bonuses);
        }
        total
    }
}
