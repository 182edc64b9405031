use crate::core::constants::*;
use serde::{Deserialize, Serialize};

use super::attributes::Attributes;

/// Vitals and progression shared by every combat-capable entity.
///
/// All mutators clamp: health stays in `0..=max_health` by construction, so
/// callers never observe a violated vitals invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterBase {
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub attributes: Attributes,
}

impl CharacterBase {
    pub fn new(name: String, level: u32, max_health: u32, attack: u32, defense: u32) -> Self {
        Self {
            name,
            level: level.max(1),
            health: max_health,
            max_health,
            attack,
            defense,
            experience: 0,
            experience_to_next_level: BASE_EXPERIENCE_TO_LEVEL,
            attributes: Attributes::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage and returns the effective amount dealt. A landed hit
    /// always deals at least 1; full avoidance is a dodge, resolved upstream.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let effective = amount.max(1);
        self.health = self.health.saturating_sub(effective);
        effective
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Grants experience, looping through as many level-ups as the grant
    /// covers. Returns the number of levels gained.
    pub fn gain_experience(&mut self, exp: u32) -> u32 {
        self.experience = self.experience.saturating_add(exp);
        let mut gained = 0;
        while self.experience >= self.experience_to_next_level {
            self.experience -= self.experience_to_next_level;
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.experience_to_next_level =
            (self.experience_to_next_level as f64 * EXPERIENCE_CURVE_FACTOR).floor() as u32;
        self.max_health += LEVEL_UP_MAX_HEALTH_GAIN;
        self.health = self.max_health;
        self.attack += LEVEL_UP_ATTACK_GAIN;
        self.defense += LEVEL_UP_DEFENSE_GAIN;
        self.attributes.raise_all(LEVEL_UP_ATTRIBUTE_GAIN);
    }
}

/// Capability view the combat resolver works against, shared by [`Player`]
/// and [`Enemy`].
///
/// [`Player`]: super::player::Player
/// [`Enemy`]: super::enemy::Enemy
pub trait Combatant {
    fn base(&self) -> &CharacterBase;
    fn base_mut(&mut self) -> &mut CharacterBase;

    /// Effective attack used in combat. Players fold in equipment,
    /// attributes, and active buffs; enemies use their base stat.
    fn attack_power(&self) -> u32 {
        self.base().attack
    }

    /// Effective defense used in combat.
    fn defense_power(&self) -> u32 {
        self.base().defense
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    fn is_alive(&self) -> bool {
        self.base().is_alive()
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.base_mut().take_damage(amount)
    }

    fn heal(&mut self, amount: u32) {
        self.base_mut().heal(amount)
    }
}
