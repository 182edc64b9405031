use crate::core::constants::*;
use crate::items::equipment::Equipment;
use serde::{Deserialize, Serialize};

use super::attributes::AttributeKind;
use super::base::CharacterBase;

/// Total combat stats after folding attributes and equipment into the base
/// values. Pure function of its inputs, so an equip/unequip round trip
/// restores the totals exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub max_mana: u32,
}

impl DerivedStats {
    pub fn calculate(base: &CharacterBase, base_max_mana: u32, equipment: &Equipment) -> Self {
        let bonuses = equipment.bonus_total();
        let strength = base.attributes.get(AttributeKind::Strength) + bonuses.strength;
        let agility = base.attributes.get(AttributeKind::Agility) + bonuses.agility;
        let intelligence = base.attributes.get(AttributeKind::Intelligence) + bonuses.intelligence;

        Self {
            attack: base.attack + strength / STRENGTH_PER_ATTACK_POINT + bonuses.attack,
            defense: base.defense + agility / AGILITY_PER_DEFENSE_POINT + bonuses.defense,
            max_health: base.max_health + bonuses.health,
            max_mana: base_max_mana + intelligence * MANA_PER_INTELLIGENCE + bonuses.mana,
        }
    }
}
