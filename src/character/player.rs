use std::collections::BTreeSet;

use crate::core::constants::*;
use crate::error::ActionError;
use crate::items::equipment::Equipment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::base::{CharacterBase, Combatant};
use super::derived_stats::DerivedStats;

/// A transient attack bonus from a potion, counted down per fight turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub attack_bonus: u32,
    pub remaining_turns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub base: CharacterBase,
    pub gold: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub equipment: Equipment,
    pub skills: BTreeSet<String>,
    pub skill_points: u32,
    pub buffs: Vec<Buff>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            base: CharacterBase::new(
                name.to_string(),
                1,
                PLAYER_BASE_HEALTH,
                PLAYER_BASE_ATTACK,
                PLAYER_BASE_DEFENSE,
            ),
            gold: PLAYER_STARTING_GOLD,
            mana: PLAYER_BASE_MANA,
            max_mana: PLAYER_BASE_MANA,
            equipment: Equipment::new(),
            skills: BTreeSet::new(),
            skill_points: 0,
            buffs: Vec::new(),
        }
    }

    pub fn derived(&self) -> DerivedStats {
        DerivedStats::calculate(&self.base, self.max_mana, &self.equipment)
    }

    /// Re-clamps vitals after an equipment or level change. Maxima may
    /// shrink when gear comes off; current values never drop below 1 here
    /// (only damage does that).
    pub fn recompute_derived(&mut self) {
        let derived = self.derived();
        if self.base.health > derived.max_health {
            self.base.health = derived.max_health;
        }
        if self.mana > derived.max_mana {
            self.mana = derived.max_mana;
        }
    }

    /// Grants experience. On top of the shared level-up gains, each player
    /// level adds max mana and skill points, then refills vitals to the new
    /// derived maxima.
    pub fn gain_experience(&mut self, exp: u32) -> u32 {
        let levels = self.base.gain_experience(exp);
        if levels > 0 {
            self.max_mana += LEVEL_UP_MAX_MANA_GAIN * levels;
            self.skill_points += LEVEL_UP_SKILL_POINTS * levels;
            let derived = self.derived();
            self.base.health = derived.max_health;
            self.mana = derived.max_mana;
        }
        levels
    }

    pub fn gain_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> Result<(), ActionError> {
        if self.gold < amount {
            return Err(ActionError::NotEnoughGold);
        }
        self.gold -= amount;
        Ok(())
    }

    pub fn spend_mana(&mut self, amount: u32) -> Result<(), ActionError> {
        if self.mana < amount {
            return Err(ActionError::NotEnoughMana);
        }
        self.mana -= amount;
        Ok(())
    }

    pub fn restore_mana(&mut self, amount: u32) {
        let cap = self.derived().max_mana;
        self.mana = self.mana.saturating_add(amount).min(cap);
    }

    pub fn knows_skill(&self, name: &str) -> bool {
        self.skills.contains(name)
    }

    /// Spends one skill point to learn `name`. The caller validates the
    /// name against the skill catalog.
    pub fn learn_skill(&mut self, name: &str) -> Result<(), ActionError> {
        if self.knows_skill(name) {
            return Err(ActionError::SkillAlreadyKnown(name.to_string()));
        }
        if self.skill_points == 0 {
            return Err(ActionError::NoSkillPoints);
        }
        self.skill_points -= 1;
        self.skills.insert(name.to_string());
        Ok(())
    }

    pub fn add_buff(&mut self, buff: Buff) {
        if buff.remaining_turns > 0 {
            self.buffs.push(buff);
        }
    }

    fn buff_attack_total(&self) -> u32 {
        self.buffs.iter().map(|b| b.attack_bonus).sum()
    }

    /// Counts down buff durations at the end of a fight turn.
    pub fn tick_buffs(&mut self) {
        for buff in &mut self.buffs {
            buff.remaining_turns -= 1;
        }
        self.buffs.retain(|b| b.remaining_turns > 0);
    }
}

impl Combatant for Player {
    fn base(&self) -> &CharacterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CharacterBase {
        &mut self.base
    }

    fn attack_power(&self) -> u32 {
        self.derived().attack + self.buff_attack_total()
    }

    fn defense_power(&self) -> u32 {
        self.derived().defense
    }

    fn heal(&mut self, amount: u32) {
        let cap = self.derived().max_health;
        self.base.health = self.base.health.saturating_add(amount).min(cap);
    }
}
