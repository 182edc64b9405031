//! The run orchestrator: phase machine, action dispatch, roster management,
//! and event fan-out to the quest and achievement trackers.
//!
//! A run is the single writer of all simulation state. Every dispatched
//! action resolves synchronously and returns a fresh read-only snapshot for
//! the embedding renderer. The grind is endless: an exhausted roster
//! respawns at a higher wave instead of ending the run.

use std::collections::VecDeque;

use crate::achievements::AchievementTracker;
use crate::character::base::Combatant;
use crate::character::enemy::{Enemy, EnemyTier};
use crate::character::player::Player;
use crate::combat::resolver::{self, CombatLogEntry, CombatTuning};
use crate::core::constants::*;
use crate::core::context::RunContext;
use crate::error::ActionError;
use crate::events::ProgressEvent;
use crate::inventory::{Inventory, UseOutcome};
use crate::items::catalog as item_catalog;
use crate::items::types::{Item, ItemKind, Rarity, ScrollEffect};
use crate::quests::QuestTracker;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shop::SHOP_STOCK;
use super::skills;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Idle,
    Exploring,
    InCombat,
    GameOver,
}

/// The closed action set an embedding frontend can issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    Flee,
    Rest,
    UseItem(String),
    EquipItem(String),
    SellItem(String),
    BuyItem(usize),
    LearnSkill(String),
    CastSkill(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    ctx: RunContext,
    pub player: Player,
    pub inventory: Inventory,
    roster: Vec<Enemy>,
    engaged: Option<usize>,
    phase: RunPhase,
    wave: u32,
    tuning: CombatTuning,
    pub quests: QuestTracker,
    pub achievements: AchievementTracker,
    combat_log: VecDeque<CombatLogEntry>,
    message: String,
}

impl Run {
    pub fn new(player_name: &str, seed: u64) -> Self {
        let player = Player::new(player_name);
        let quests = QuestTracker::new(player.base.level);
        Self {
            ctx: RunContext::new(seed),
            player,
            inventory: Inventory::new(),
            roster: Vec::new(),
            engaged: None,
            phase: RunPhase::Idle,
            wave: 0,
            tuning: CombatTuning::default(),
            quests,
            achievements: AchievementTracker::new(),
            combat_log: VecDeque::with_capacity(COMBAT_LOG_CAPACITY),
            message: String::new(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn roster(&self) -> &[Enemy] {
        &self.roster
    }

    pub fn engaged_enemy(&self) -> Option<&Enemy> {
        self.engaged.map(|i| &self.roster[i])
    }

    /// Replaces the combat tuning. Exposed for deterministic embedding
    /// (simulators, tests).
    pub fn set_tuning(&mut self, tuning: CombatTuning) {
        self.tuning = tuning;
    }

    /// Re-arms the random source after deserialization. Rolls replay from
    /// the run's seed; the pre-save draw position is not recovered.
    pub fn reseed_rng(&mut self) {
        self.ctx.reseed();
    }

    /// Spawns the initial roster and leaves idle.
    pub fn start(&mut self) {
        if self.phase != RunPhase::Idle {
            return;
        }
        self.spawn_roster();
        self.phase = RunPhase::Exploring;
        self.message = "Your descent begins.".to_string();
    }

    /// Dispatches one action, fully resolving it before returning the
    /// post-action snapshot. Rejections become the snapshot's message.
    pub fn dispatch(&mut self, action: PlayerAction) -> RunSnapshot {
        self.message.clear();
        if let Err(err) = self.apply(action) {
            self.message = err.to_string();
        }
        self.snapshot()
    }

    fn apply(&mut self, action: PlayerAction) -> Result<(), ActionError> {
        if matches!(self.phase, RunPhase::Idle | RunPhase::GameOver) {
            return Err(ActionError::InvalidPhase);
        }
        match action {
            PlayerAction::Attack => self.attack(),
            PlayerAction::Flee => self.flee(),
            PlayerAction::Rest => self.rest(),
            PlayerAction::UseItem(id) | PlayerAction::EquipItem(id) => self.use_item(&id),
            PlayerAction::SellItem(id) => self.sell_item(&id),
            PlayerAction::BuyItem(index) => self.buy_item(index),
            PlayerAction::LearnSkill(name) => self.learn_skill(&name),
            PlayerAction::CastSkill(name) => self.cast_skill(&name),
        }
    }

    // === Combat actions ===

    fn attack(&mut self) -> Result<(), ActionError> {
        let idx = match self.engaged {
            Some(idx) => idx,
            None => {
                if self.roster.is_empty() {
                    // No-op by design, not an error.
                    self.message = "There is nothing here to fight.".to_string();
                    return Ok(());
                }
                let idx = self.ctx.rng().gen_range(0..self.roster.len());
                self.engaged = Some(idx);
                self.phase = RunPhase::InCombat;
                idx
            }
        };

        let outcome = resolver::fight_turn(
            &mut self.player,
            &mut self.roster[idx],
            &self.tuning,
            self.ctx.rng(),
        );
        for entry in &outcome.log {
            self.push_log(entry.clone());
        }

        if outcome.enemy_defeated {
            self.after_kill(idx, outcome.gold_gained, outcome.levels_gained, outcome.loot);
        } else if outcome.player_defeated {
            self.game_over();
        }
        Ok(())
    }

    fn flee(&mut self) -> Result<(), ActionError> {
        let idx = self.engaged.ok_or(ActionError::InvalidPhase)?;
        if self.ctx.rng().gen_bool(FLEE_CHANCE) {
            // The enemy stays in the roster and can be re-encountered.
            self.engaged = None;
            self.phase = RunPhase::Exploring;
            self.message = "You slip away into the dark.".to_string();
            return Ok(());
        }

        let exchange = resolver::resolve_exchange(
            &self.roster[idx],
            &mut self.player,
            &self.tuning,
            self.ctx.rng(),
        );
        let enemy_name = self.roster[idx].base.name.clone();
        let message = if exchange.was_dodged {
            format!("You twist away from {enemy_name} but find no opening to run.")
        } else {
            format!(
                "{} catches you fleeing for {} damage!",
                enemy_name, exchange.damage_dealt
            )
        };
        self.push_log(CombatLogEntry {
            message,
            is_crit: exchange.was_critical,
            is_player_action: false,
        });
        if exchange.defender_defeated {
            self.game_over();
        } else {
            self.message = "You fail to escape!".to_string();
        }
        Ok(())
    }

    fn cast_skill(&mut self, name: &str) -> Result<(), ActionError> {
        let idx = self.engaged.ok_or(ActionError::NoTarget)?;
        let def =
            skills::skill(name).ok_or_else(|| ActionError::UnknownSkill(name.to_string()))?;
        if !self.player.knows_skill(name) {
            return Err(ActionError::SkillNotLearned(name.to_string()));
        }
        self.player.spend_mana(def.mana_cost)?;

        let attack = self.player.attack_power() as f64 * def.power;
        let mitigated = self.roster[idx].defense_power() as f64 * DEFENSE_MITIGATION;
        let damage = ((attack - mitigated).floor().max(1.0)) as u32;
        let dealt = self.roster[idx].take_damage(damage);
        let enemy_name = self.roster[idx].base.name.clone();
        self.push_log(CombatLogEntry {
            message: format!("{} unleashes {} for {} damage!", self.player.base.name, def.name, dealt),
            is_crit: false,
            is_player_action: true,
        });

        if !self.roster[idx].is_alive() {
            let rewards = self.roster[idx].rewards.clone();
            self.player.gain_gold(rewards.gold);
            let levels = self.player.gain_experience(rewards.exp);
            self.push_log(CombatLogEntry {
                message: format!(
                    "{} falls! +{} gold, +{} exp.",
                    enemy_name, rewards.gold, rewards.exp
                ),
                is_crit: false,
                is_player_action: true,
            });
            self.after_kill(idx, rewards.gold, levels, rewards.loot);
        } else {
            let exchange = resolver::resolve_exchange(
                &self.roster[idx],
                &mut self.player,
                &self.tuning,
                self.ctx.rng(),
            );
            self.push_log(CombatLogEntry {
                message: format!(
                    "{} answers for {} damage.",
                    enemy_name, exchange.damage_dealt
                ),
                is_crit: exchange.was_critical,
                is_player_action: false,
            });
            if exchange.defender_defeated {
                self.game_over();
            }
        }
        self.player.tick_buffs();
        Ok(())
    }

    // === Exploration actions ===

    fn rest(&mut self) -> Result<(), ActionError> {
        if self.phase != RunPhase::Exploring {
            return Err(ActionError::InvalidPhase);
        }
        let derived = self.player.derived();
        let health_gain = (derived.max_health as f64 * REST_RECOVERY_FRACTION) as u32;
        let mana_gain = (derived.max_mana as f64 * REST_RECOVERY_FRACTION) as u32;
        self.player.heal(health_gain);
        self.player.restore_mana(mana_gain);
        self.message = "You rest by the fire and recover.".to_string();
        Ok(())
    }

    fn use_item(&mut self, item_id: &str) -> Result<(), ActionError> {
        let stack = self
            .inventory
            .find(item_id)
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
        let item_name = stack.item.name.clone();

        // A damage scroll needs a target; validate before any mutation.
        if let ItemKind::Scroll {
            effect: ScrollEffect::Damage(_),
            ..
        } = stack.item.kind
        {
            if self.engaged.is_none() {
                return Err(ActionError::NoTarget);
            }
        }

        let outcome = self.inventory.use_item(item_id, &mut self.player)?;
        match outcome {
            UseOutcome::Potion(_) => {
                self.message = format!("You use {item_name}.");
            }
            UseOutcome::Scroll(ScrollEffect::Damage(amount)) => {
                if let Some(idx) = self.engaged {
                    let dealt = self.roster[idx].take_damage(amount);
                    let enemy_name = self.roster[idx].base.name.clone();
                    self.push_log(CombatLogEntry {
                        message: format!("{item_name} sears {enemy_name} for {dealt} damage!"),
                        is_crit: false,
                        is_player_action: true,
                    });
                    if !self.roster[idx].is_alive() {
                        let rewards = self.roster[idx].rewards.clone();
                        self.player.gain_gold(rewards.gold);
                        let levels = self.player.gain_experience(rewards.exp);
                        self.after_kill(idx, rewards.gold, levels, rewards.loot);
                    }
                }
            }
            UseOutcome::Scroll(ScrollEffect::RestoreHealth(_)) => {
                self.message = format!("You read {item_name} and feel restored.");
            }
            UseOutcome::Equipped { slot, replaced } => {
                self.message = match replaced {
                    Some(old) => format!("You equip {item_name}, stowing {old}."),
                    None => format!("You equip {item_name} ({}).", slot.name()),
                };
            }
        }
        Ok(())
    }

    fn sell_item(&mut self, item_id: &str) -> Result<(), ActionError> {
        if self.phase != RunPhase::Exploring {
            return Err(ActionError::InvalidPhase);
        }
        let price = self.inventory.sell_item(item_id, &mut self.player)?;
        self.track(&ProgressEvent::gold_earned(price));
        self.process_completions();
        self.message = format!("Sold for {price} gold.");
        Ok(())
    }

    fn buy_item(&mut self, index: usize) -> Result<(), ActionError> {
        if self.phase != RunPhase::Exploring {
            return Err(ActionError::InvalidPhase);
        }
        let entry = SHOP_STOCK
            .get(index)
            .ok_or(ActionError::UnknownShopIndex(index))?;
        let template = item_catalog::template(entry.template)
            .ok_or_else(|| ActionError::UnknownItem(entry.template.to_string()))?;

        // Validate everything before mutating: gold first, then bag space.
        if self.player.gold < entry.price {
            return Err(ActionError::NotEnoughGold);
        }
        let merges = template.kind.stackable() && self.inventory.find(template.key).is_some();
        if !merges && self.inventory.is_full() {
            return Err(ActionError::InventoryFull);
        }

        self.player.spend_gold(entry.price)?;
        if let Some(item) = item_catalog::create(entry.template, &mut self.ctx) {
            let name = item.name.clone();
            self.inventory.add_item(item)?;
            self.track(&ProgressEvent::item_collected(entry.template, 1));
            self.process_completions();
            self.message = format!("Bought {name} for {} gold.", entry.price);
        }
        Ok(())
    }

    fn learn_skill(&mut self, name: &str) -> Result<(), ActionError> {
        let def =
            skills::skill(name).ok_or_else(|| ActionError::UnknownSkill(name.to_string()))?;
        self.player.learn_skill(def.name)?;
        self.message = format!("You learn {}.", def.name);
        Ok(())
    }

    // === Internals ===

    fn spawn_roster(&mut self) {
        let count = self
            .ctx
            .rng()
            .gen_range(ROSTER_BATCH_MIN..=ROSTER_BATCH_MAX);
        let base_level = self.player.base.level + self.wave * ENEMY_LEVEL_PER_WAVE;
        for _ in 0..count {
            let roll: f64 = self.ctx.rng().gen();
            let tier = if roll < SPAWN_ELITE_THRESHOLD {
                EnemyTier::Normal
            } else if roll < SPAWN_RARE_THRESHOLD {
                EnemyTier::Elite
            } else if roll < SPAWN_BOSS_THRESHOLD {
                EnemyTier::Rare
            } else {
                EnemyTier::Boss
            };
            let level = base_level + self.ctx.rng().gen_range(0..=1);
            let enemy = Enemy::spawn(level, tier, &mut self.ctx);
            self.roster.push(enemy);
        }
    }

    /// Post-kill bookkeeping shared by every way of killing an enemy. The
    /// payout itself has already been applied to the player.
    fn after_kill(&mut self, idx: usize, gold_gained: u32, levels_gained: u32, loot: Vec<String>) {
        let enemy = self.roster.remove(idx);
        self.engaged = None;
        self.phase = RunPhase::Exploring;
        self.message = format!("You defeated {}!", enemy.base.name);

        self.track(&ProgressEvent::enemy_killed(enemy.tier.slug()));
        if gold_gained > 0 {
            self.track(&ProgressEvent::gold_earned(gold_gained));
        }
        if levels_gained > 0 {
            self.on_level_up();
        }
        self.bank_loot(&loot);
        self.process_completions();

        if self.roster.is_empty() {
            self.wave += 1;
            self.spawn_roster();
            self.push_log(CombatLogEntry {
                message: "A fresh wave of enemies approaches.".to_string(),
                is_crit: false,
                is_player_action: false,
            });
        }
    }

    fn on_level_up(&mut self) {
        let level = self.player.base.level;
        self.quests.refresh_available(level);
        self.track(&ProgressEvent::level_reached(level));
        self.push_log(CombatLogEntry {
            message: format!("{} reaches level {level}!", self.player.base.name),
            is_crit: false,
            is_player_action: true,
        });
    }

    fn bank_loot(&mut self, loot: &[String]) {
        for key in loot {
            let Some(item) = item_catalog::create(key, &mut self.ctx) else {
                continue;
            };
            self.bank_item(item);
        }
    }

    /// Puts an already-built item into the bag, or logs that it was lost.
    fn bank_item(&mut self, item: Item) {
        let name = item.name.clone();
        let key = template_key(&item.id);
        match self.inventory.add_item(item) {
            Ok(()) => {
                self.track(&ProgressEvent::item_collected(&key, 1));
                self.push_log(CombatLogEntry {
                    message: format!("You pick up {name}."),
                    is_crit: false,
                    is_player_action: true,
                });
            }
            Err(_) => {
                self.push_log(CombatLogEntry {
                    message: format!("Your bag is full; {name} is left behind."),
                    is_crit: false,
                    is_player_action: true,
                });
            }
        }
    }

    fn track(&mut self, event: &ProgressEvent) {
        self.quests.update_progress(event);
        self.achievements.update_progress(event);
    }

    /// Claims every newly completed quest and achievement. Claim rewards can
    /// themselves complete more entries (gold, levels, items), so this loops
    /// until a pass finds nothing new; completion being one-way over finite
    /// sets bounds the loop.
    fn process_completions(&mut self) {
        loop {
            let quests = self.quests.take_completed();
            let achievements = self.achievements.take_completed();
            if quests.is_empty() && achievements.is_empty() {
                break;
            }

            for quest in quests {
                self.push_log(CombatLogEntry {
                    message: format!("Quest complete: {}", quest.description),
                    is_crit: false,
                    is_player_action: true,
                });
                let gold = quest.reward.gold;
                let level_before = self.player.base.level;
                let items = self.quests.claim(quest, &mut self.player, &mut self.ctx);
                if gold > 0 {
                    self.track(&ProgressEvent::gold_earned(gold));
                }
                if self.player.base.level > level_before {
                    self.on_level_up();
                }
                for item in items {
                    self.bank_item(item);
                }
            }

            for achievement in achievements {
                self.push_log(CombatLogEntry {
                    message: format!("Achievement unlocked: {}", achievement.name),
                    is_crit: false,
                    is_player_action: true,
                });
                let gold = achievement.reward.gold;
                let level_before = self.player.base.level;
                let items = self
                    .achievements
                    .claim(achievement, &mut self.player, &mut self.ctx);
                if gold > 0 {
                    self.track(&ProgressEvent::gold_earned(gold));
                }
                if self.player.base.level > level_before {
                    self.on_level_up();
                }
                for item in items {
                    self.bank_item(item);
                }
            }
        }
    }

    fn game_over(&mut self) {
        self.engaged = None;
        self.phase = RunPhase::GameOver;
        self.message = format!("{} has fallen. The grind ends here.", self.player.base.name);
        self.push_log(CombatLogEntry {
            message: "You have been defeated.".to_string(),
            is_crit: false,
            is_player_action: false,
        });
    }

    fn push_log(&mut self, entry: CombatLogEntry) {
        if self.combat_log.len() >= COMBAT_LOG_CAPACITY {
            self.combat_log.pop_front();
        }
        self.combat_log.push_back(entry);
    }

    // === Snapshot ===

    pub fn snapshot(&self) -> RunSnapshot {
        let derived = self.player.derived();
        RunSnapshot {
            phase: self.phase,
            player: PlayerView {
                name: self.player.base.name.clone(),
                level: self.player.base.level,
                health: self.player.base.health,
                max_health: derived.max_health,
                mana: self.player.mana,
                max_mana: derived.max_mana,
                attack: self.player.attack_power(),
                defense: self.player.defense_power(),
                gold: self.player.gold,
                experience: self.player.base.experience,
                experience_to_next_level: self.player.base.experience_to_next_level,
                skill_points: self.player.skill_points,
                skills: self.player.skills.iter().cloned().collect(),
            },
            enemy: self.engaged_enemy().map(|enemy| EnemyView {
                name: enemy.base.name.clone(),
                tier: enemy.tier.name().to_string(),
                level: enemy.base.level,
                health: enemy.base.health,
                max_health: enemy.base.max_health,
            }),
            combat_log: self.combat_log.iter().cloned().collect(),
            inventory: self
                .inventory
                .stacks()
                .iter()
                .map(|stack| StackView {
                    id: stack.item.id.clone(),
                    name: stack.item.name.clone(),
                    rarity: stack.item.rarity,
                    quantity: stack.quantity,
                })
                .collect(),
            active_quests: self
                .quests
                .active()
                .iter()
                .map(|quest| QuestView {
                    id: quest.id.clone(),
                    description: quest.description.clone(),
                    current_amount: quest.current_amount,
                    target_amount: quest.target_amount,
                })
                .collect(),
            achievements: self
                .achievements
                .active()
                .iter()
                .map(|a| AchievementView {
                    key: a.key.clone(),
                    name: a.name.clone(),
                    current_amount: a.current_amount,
                    target_amount: a.target_amount,
                })
                .collect(),
            achievement_completion: self.achievements.completion_rate(),
            message: self.message.clone(),
        }
    }
}

/// Strips an instance suffix ("iron-sword#7") back to its template key.
fn template_key(item_id: &str) -> String {
    match item_id.split_once('#') {
        Some((key, _)) => key.to_string(),
        None => item_id.to_string(),
    }
}

// === Read-only views ===

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub skill_points: u32,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub name: String,
    pub tier: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StackView {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestView {
    pub id: String,
    pub description: String,
    pub current_amount: u32,
    pub target_amount: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementView {
    pub key: String,
    pub name: String,
    pub current_amount: u32,
    pub target_amount: u32,
}

/// Everything a renderer needs after one action. Pure data, no I/O.
#[derive(Debug, Clone, Serialize)]
pub struct RunSnapshot {
    pub phase: RunPhase,
    pub player: PlayerView,
    pub enemy: Option<EnemyView>,
    pub combat_log: Vec<CombatLogEntry>,
    pub inventory: Vec<StackView>,
    pub active_quests: Vec<QuestView>,
    pub achievements: Vec<AchievementView>,
    pub achievement_completion: f64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_run(seed: u64) -> Run {
        let mut run = Run::new("Aria", seed);
        run.start();
        run
    }

    #[test]
    fn test_new_run_is_idle_and_rejects_actions() {
        let mut run = Run::new("Aria", 1);
        assert_eq!(run.phase(), RunPhase::Idle);
        let snapshot = run.dispatch(PlayerAction::Attack);
        assert_eq!(snapshot.phase, RunPhase::Idle);
        assert_eq!(snapshot.message, ActionError::InvalidPhase.to_string());
    }

    #[test]
    fn test_start_spawns_roster_and_explores() {
        let run = started_run(1);
        assert_eq!(run.phase(), RunPhase::Exploring);
        assert!(run.roster().len() >= ROSTER_BATCH_MIN);
        assert!(run.roster().len() <= ROSTER_BATCH_MAX);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut run = started_run(1);
        let count = run.roster().len();
        run.start();
        assert_eq!(run.roster().len(), count);
    }

    #[test]
    fn test_attack_engages_an_enemy() {
        let mut run = started_run(2);
        let snapshot = run.dispatch(PlayerAction::Attack);
        // Either the fight is on, or the opener one-shot the enemy.
        assert!(matches!(
            snapshot.phase,
            RunPhase::InCombat | RunPhase::Exploring
        ));
        assert!(!snapshot.combat_log.is_empty());
    }

    #[test]
    fn test_rest_rejected_in_combat() {
        let mut run = started_run(3);
        run.dispatch(PlayerAction::Attack);
        if run.phase() == RunPhase::InCombat {
            let snapshot = run.dispatch(PlayerAction::Rest);
            assert_eq!(snapshot.message, ActionError::InvalidPhase.to_string());
        }
    }

    #[test]
    fn test_rest_recovers_vitals() {
        let mut run = started_run(4);
        run.player.base.health = 10;
        run.player.mana = 0;
        let snapshot = run.dispatch(PlayerAction::Rest);
        assert!(snapshot.player.health > 10);
        assert!(snapshot.player.mana > 0);
    }

    #[test]
    fn test_buy_rejects_poor_player_without_mutation() {
        let mut run = started_run(5);
        run.player.gold = 0;
        let bag_before = run.inventory.len();
        let snapshot = run.dispatch(PlayerAction::BuyItem(0));
        assert_eq!(snapshot.message, ActionError::NotEnoughGold.to_string());
        assert_eq!(run.player.gold, 0);
        assert_eq!(run.inventory.len(), bag_before);
    }

    #[test]
    fn test_buy_unknown_slot_rejected() {
        let mut run = started_run(5);
        let snapshot = run.dispatch(PlayerAction::BuyItem(999));
        assert_eq!(
            snapshot.message,
            ActionError::UnknownShopIndex(999).to_string()
        );
    }

    #[test]
    fn test_buy_moves_gold_into_bag() {
        let mut run = started_run(6);
        run.player.gold = 100;
        let snapshot = run.dispatch(PlayerAction::BuyItem(0));
        assert_eq!(snapshot.player.gold, 90);
        assert_eq!(run.inventory.find("minor-health-potion").unwrap().quantity, 1);
    }

    #[test]
    fn test_learn_and_cast_skill_flow() {
        let mut run = started_run(7);
        run.player.skill_points = 1;
        run.dispatch(PlayerAction::LearnSkill("Power Strike".to_string()));
        assert!(run.player.knows_skill("Power Strike"));

        // Casting outside combat has no target.
        let snapshot = run.dispatch(PlayerAction::CastSkill("Power Strike".to_string()));
        assert_eq!(snapshot.message, ActionError::NoTarget.to_string());
    }

    #[test]
    fn test_learn_unknown_skill_rejected() {
        let mut run = started_run(7);
        run.player.skill_points = 1;
        let snapshot = run.dispatch(PlayerAction::LearnSkill("Meteor".to_string()));
        assert_eq!(
            snapshot.message,
            ActionError::UnknownSkill("Meteor".to_string()).to_string()
        );
        assert_eq!(run.player.skill_points, 1);
    }

    #[test]
    fn test_game_over_freezes_the_run() {
        let mut run = started_run(8);
        run.player.base.health = 0;
        run.game_over();
        assert_eq!(run.phase(), RunPhase::GameOver);
        let snapshot = run.dispatch(PlayerAction::Rest);
        assert_eq!(snapshot.message, ActionError::InvalidPhase.to_string());
        assert_eq!(snapshot.phase, RunPhase::GameOver);
    }

    #[test]
    fn test_snapshot_reflects_engaged_enemy_only() {
        let mut run = started_run(9);
        assert!(run.snapshot().enemy.is_none());
        run.dispatch(PlayerAction::Attack);
        if run.phase() == RunPhase::InCombat {
            assert!(run.snapshot().enemy.is_some());
        }
    }

    #[test]
    fn test_template_key_strips_instance_suffix() {
        assert_eq!(template_key("iron-sword#12"), "iron-sword");
        assert_eq!(template_key("health-potion"), "health-potion");
    }

    #[test]
    fn test_combat_log_is_bounded() {
        let mut run = started_run(10);
        for i in 0..50 {
            run.push_log(CombatLogEntry {
                message: format!("line {i}"),
                is_crit: false,
                is_player_action: false,
            });
        }
        assert_eq!(run.snapshot().combat_log.len(), COMBAT_LOG_CAPACITY);
        assert_eq!(run.snapshot().combat_log[0].message, "line 40");
    }
}
