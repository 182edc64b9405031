use crate::core::constants::*;
use crate::core::context::RunContext;
use crate::items::catalog::LOOT_POOL;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::base::{CharacterBase, Combatant};

/// Reward tier. Multiplies payout and stats over the level baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTier {
    Normal,
    Elite,
    Rare,
    Boss,
}

impl EnemyTier {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyTier::Normal => "Normal",
            EnemyTier::Elite => "Elite",
            EnemyTier::Rare => "Rare",
            EnemyTier::Boss => "Boss",
        }
    }

    /// Stable key used in progress events and quest targets.
    pub fn slug(&self) -> &'static str {
        match self {
            EnemyTier::Normal => "normal",
            EnemyTier::Elite => "elite",
            EnemyTier::Rare => "rare",
            EnemyTier::Boss => "boss",
        }
    }

    pub fn reward_multiplier(&self) -> f64 {
        match self {
            EnemyTier::Normal => 1.0,
            EnemyTier::Elite => 2.0,
            EnemyTier::Rare => 3.0,
            EnemyTier::Boss => 5.0,
        }
    }

    fn stat_multiplier(&self) -> (f64, f64, f64) {
        match self {
            EnemyTier::Normal => (1.0, 1.0, 1.0),
            EnemyTier::Elite => (1.6, 1.3, 1.2),
            EnemyTier::Rare => (2.2, 1.5, 1.4),
            EnemyTier::Boss => (3.5, 1.8, 1.6),
        }
    }

    fn loot_chance(&self) -> f64 {
        match self {
            EnemyTier::Normal => 0.20,
            EnemyTier::Elite => 0.35,
            EnemyTier::Rare => 0.50,
            EnemyTier::Boss => 1.0,
        }
    }
}

/// Payout fixed at spawn; never regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRewards {
    pub gold: u32,
    pub exp: u32,
    /// Catalog template keys rolled at spawn.
    pub loot: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub base: CharacterBase,
    pub tier: EnemyTier,
    pub rewards: EnemyRewards,
}

impl Enemy {
    /// Spawns an enemy scaled to `level` and `tier`, with stat variance and
    /// the reward payout computed once, here.
    pub fn spawn(level: u32, tier: EnemyTier, ctx: &mut RunContext) -> Self {
        let level = level.max(1);
        let steps = level - 1;
        let (hp_mult, atk_mult, def_mult) = tier.stat_multiplier();

        let raw_health = ENEMY_BASE_HEALTH + steps * ENEMY_HEALTH_PER_LEVEL;
        let raw_attack = ENEMY_BASE_ATTACK + steps * ENEMY_ATTACK_PER_LEVEL;
        let raw_defense = ENEMY_BASE_DEFENSE + steps * ENEMY_DEFENSE_PER_LEVEL;

        let rng = ctx.rng();
        let hp_var = rng.gen_range(ENEMY_STAT_VARIANCE_MIN..ENEMY_STAT_VARIANCE_MAX);
        let atk_var = rng.gen_range(ENEMY_STAT_VARIANCE_MIN..ENEMY_STAT_VARIANCE_MAX);

        let max_health = ((raw_health as f64 * hp_mult * hp_var).floor() as u32).max(1);
        let attack = ((raw_attack as f64 * atk_mult * atk_var).floor() as u32).max(1);
        let defense = (raw_defense as f64 * def_mult).floor() as u32;

        let name = generate_name(tier, ctx);
        let rewards = roll_rewards(level, tier, ctx);

        Self {
            base: CharacterBase::new(name, level, max_health, attack, defense),
            tier,
            rewards,
        }
    }
}

impl Combatant for Enemy {
    fn base(&self) -> &CharacterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CharacterBase {
        &mut self.base
    }
}

fn generate_name(tier: EnemyTier, ctx: &mut RunContext) -> String {
    let prefixes = [
        "Grizzled", "Savage", "Dark", "Blood", "Bone", "Shadow", "Dire", "Wild", "Grim", "Feral",
    ];
    let kinds = [
        "Orc", "Troll", "Drake", "Wolf", "Spider", "Wraith", "Golem", "Harpy", "Fiend", "Serpent",
    ];

    let rng = ctx.rng();
    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let kind = kinds[rng.gen_range(0..kinds.len())];

    match tier {
        EnemyTier::Normal => format!("{prefix} {kind}"),
        EnemyTier::Elite => format!("Elite {prefix} {kind}"),
        EnemyTier::Rare => format!("Rare {prefix} {kind}"),
        EnemyTier::Boss => format!("{prefix} {kind} King"),
    }
}

fn roll_rewards(level: u32, tier: EnemyTier, ctx: &mut RunContext) -> EnemyRewards {
    let mult = tier.reward_multiplier();
    let gold = ((ENEMY_BASE_GOLD + ENEMY_GOLD_PER_LEVEL * level) as f64 * mult) as u32;
    let exp = ((ENEMY_BASE_EXP + ENEMY_EXP_PER_LEVEL * level) as f64 * mult) as u32;

    let mut loot = Vec::new();
    let rng = ctx.rng();
    if rng.gen_bool(tier.loot_chance()) {
        let key = LOOT_POOL[rng.gen_range(0..LOOT_POOL.len())];
        loot.push(key.to_string());
    }

    EnemyRewards { gold, exp, loot }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_starts_at_full_health() {
        let mut ctx = RunContext::new(11);
        let enemy = Enemy::spawn(1, EnemyTier::Normal, &mut ctx);
        assert_eq!(enemy.base.health, enemy.base.max_health);
        assert!(enemy.is_alive());
        assert!(!enemy.base.name.is_empty());
    }

    #[test]
    fn test_spawn_level_floor() {
        let mut ctx = RunContext::new(11);
        let enemy = Enemy::spawn(0, EnemyTier::Normal, &mut ctx);
        assert_eq!(enemy.base.level, 1);
    }

    #[test]
    fn test_stats_scale_with_level() {
        let mut ctx = RunContext::new(11);
        let weak = Enemy::spawn(1, EnemyTier::Normal, &mut ctx);
        let strong = Enemy::spawn(10, EnemyTier::Normal, &mut ctx);
        assert!(strong.base.max_health > weak.base.max_health);
        assert!(strong.base.attack > weak.base.attack);
        assert!(strong.base.defense > weak.base.defense);
    }

    #[test]
    fn test_boss_outclasses_normal_at_same_level() {
        let mut ctx = RunContext::new(11);
        let normal = Enemy::spawn(5, EnemyTier::Normal, &mut ctx);
        let boss = Enemy::spawn(5, EnemyTier::Boss, &mut ctx);
        // Variance is at most 1.1x vs the boss's 3.5x health multiplier.
        assert!(boss.base.max_health > normal.base.max_health);
        assert!(boss.base.name.ends_with("King"));
    }

    #[test]
    fn test_rewards_fixed_at_spawn_and_tier_scaled() {
        let mut ctx = RunContext::new(11);
        let normal = Enemy::spawn(3, EnemyTier::Normal, &mut ctx);
        let boss = Enemy::spawn(3, EnemyTier::Boss, &mut ctx);
        assert_eq!(normal.rewards.gold, 25);
        assert_eq!(normal.rewards.exp, 50);
        assert_eq!(boss.rewards.gold, 125);
        assert_eq!(boss.rewards.exp, 250);
    }

    #[test]
    fn test_boss_always_rolls_loot() {
        let mut ctx = RunContext::new(11);
        for _ in 0..20 {
            let boss = Enemy::spawn(4, EnemyTier::Boss, &mut ctx);
            assert_eq!(boss.rewards.loot.len(), 1);
            assert!(LOOT_POOL.contains(&boss.rewards.loot[0].as_str()));
        }
    }

    #[test]
    fn test_same_seed_spawns_identical_enemies() {
        let mut a = RunContext::new(77);
        let mut b = RunContext::new(77);
        let from_a = Enemy::spawn(6, EnemyTier::Elite, &mut a);
        let from_b = Enemy::spawn(6, EnemyTier::Elite, &mut b);
        assert_eq!(from_a, from_b);
    }
}
