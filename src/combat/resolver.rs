//! Exchange and fight-turn resolution.
//!
//! One canonical formula set, applied on every path: dodge roll, then
//! `max(1, floor((attack - defense * 0.5) * U[variance]))`, then the crit
//! roll. The resolver holds no state; it is called once per player action
//! and runs to completion.

use crate::character::base::Combatant;
use crate::character::enemy::Enemy;
use crate::character::player::Player;
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Probability knobs for exchange resolution. [`Default`] carries the
/// canonical numbers; tests pin degenerate values for exact arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatTuning {
    pub dodge_chance: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub variance_min: f64,
    pub variance_max: f64,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            dodge_chance: DODGE_CHANCE,
            crit_chance: CRIT_CHANCE,
            crit_multiplier: CRIT_MULTIPLIER,
            variance_min: DAMAGE_VARIANCE_MIN,
            variance_max: DAMAGE_VARIANCE_MAX,
        }
    }
}

impl CombatTuning {
    /// No dodge, no crit, unit variance. Exchanges become pure arithmetic.
    pub fn deterministic() -> Self {
        Self {
            dodge_chance: 0.0,
            crit_chance: 0.0,
            crit_multiplier: CRIT_MULTIPLIER,
            variance_min: 1.0,
            variance_max: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeOutcome {
    pub damage_dealt: u32,
    pub was_critical: bool,
    pub was_dodged: bool,
    pub defender_defeated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub message: String,
    pub is_crit: bool,
    pub is_player_action: bool,
}

/// One full fight turn, resolved before control returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub player_exchange: ExchangeOutcome,
    pub enemy_exchange: Option<ExchangeOutcome>,
    pub log: Vec<CombatLogEntry>,
    pub enemy_defeated: bool,
    pub player_defeated: bool,
    pub gold_gained: u32,
    pub exp_gained: u32,
    pub levels_gained: u32,
    /// Catalog template keys for the orchestrator to bank.
    pub loot: Vec<String>,
}

/// Resolves one attacker-vs-defender exchange and applies the damage.
pub fn resolve_exchange(
    attacker: &impl Combatant,
    defender: &mut impl Combatant,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
) -> ExchangeOutcome {
    if rng.gen_bool(tuning.dodge_chance) {
        return ExchangeOutcome {
            damage_dealt: 0,
            was_critical: false,
            was_dodged: true,
            defender_defeated: !defender.is_alive(),
        };
    }

    let attack = attacker.attack_power() as f64;
    let mitigated = defender.defense_power() as f64 * DEFENSE_MITIGATION;
    let factor = if tuning.variance_max > tuning.variance_min {
        rng.gen_range(tuning.variance_min..tuning.variance_max)
    } else {
        tuning.variance_min
    };

    let base = ((attack - mitigated) * factor).floor().max(1.0) as u32;
    let was_critical = rng.gen_bool(tuning.crit_chance);
    let damage = if was_critical {
        (base as f64 * tuning.crit_multiplier).floor() as u32
    } else {
        base
    };

    let damage_dealt = defender.take_damage(damage);
    ExchangeOutcome {
        damage_dealt,
        was_critical,
        was_dodged: false,
        defender_defeated: !defender.is_alive(),
    }
}

/// The player strikes; a surviving enemy strikes back; a defeated enemy
/// pays out gold and experience on the spot. Loot template keys are
/// returned for the caller to bank through the inventory.
pub fn fight_turn(
    player: &mut Player,
    enemy: &mut Enemy,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
) -> TurnOutcome {
    let mut log = Vec::new();

    let player_exchange = resolve_exchange(player, enemy, tuning, rng);
    log.push(exchange_log(player, enemy, &player_exchange, true));

    let mut outcome = TurnOutcome {
        player_exchange,
        enemy_exchange: None,
        log,
        enemy_defeated: player_exchange.defender_defeated,
        player_defeated: false,
        gold_gained: 0,
        exp_gained: 0,
        levels_gained: 0,
        loot: Vec::new(),
    };

    if outcome.enemy_defeated {
        outcome.gold_gained = enemy.rewards.gold;
        outcome.exp_gained = enemy.rewards.exp;
        outcome.loot = enemy.rewards.loot.clone();
        player.gain_gold(enemy.rewards.gold);
        outcome.levels_gained = player.gain_experience(enemy.rewards.exp);
        outcome.log.push(CombatLogEntry {
            message: format!(
                "{} falls! +{} gold, +{} exp.",
                enemy.name(),
                enemy.rewards.gold,
                enemy.rewards.exp
            ),
            is_crit: false,
            is_player_action: true,
        });
    } else {
        let enemy_exchange = resolve_exchange(enemy, player, tuning, rng);
        outcome.log.push(exchange_log(enemy, player, &enemy_exchange, false));
        outcome.player_defeated = enemy_exchange.defender_defeated;
        outcome.enemy_exchange = Some(enemy_exchange);
    }

    player.tick_buffs();
    outcome
}

fn exchange_log(
    attacker: &impl Combatant,
    defender: &impl Combatant,
    exchange: &ExchangeOutcome,
    is_player_action: bool,
) -> CombatLogEntry {
    let message = if exchange.was_dodged {
        format!("{} dodges {}'s attack!", defender.name(), attacker.name())
    } else if exchange.was_critical {
        format!(
            "{} crits {} for {} damage!",
            attacker.name(),
            defender.name(),
            exchange.damage_dealt
        )
    } else {
        format!(
            "{} hits {} for {} damage.",
            attacker.name(),
            defender.name(),
            exchange.damage_dealt
        )
    };
    CombatLogEntry {
        message,
        is_crit: exchange.was_critical,
        is_player_action,
    }
}
