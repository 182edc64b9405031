// Leveling
pub const BASE_EXPERIENCE_TO_LEVEL: u32 = 100;
pub const EXPERIENCE_CURVE_FACTOR: f64 = 1.2;
pub const LEVEL_UP_MAX_HEALTH_GAIN: u32 = 10;
pub const LEVEL_UP_ATTACK_GAIN: u32 = 2;
pub const LEVEL_UP_DEFENSE_GAIN: u32 = 1;
pub const LEVEL_UP_ATTRIBUTE_GAIN: u32 = 1;
pub const LEVEL_UP_MAX_MANA_GAIN: u32 = 10;
pub const LEVEL_UP_SKILL_POINTS: u32 = 2;

// Player starting stats
pub const PLAYER_BASE_HEALTH: u32 = 100;
pub const PLAYER_BASE_MANA: u32 = 50;
pub const PLAYER_BASE_ATTACK: u32 = 10;
pub const PLAYER_BASE_DEFENSE: u32 = 5;
pub const PLAYER_STARTING_GOLD: u32 = 50;
pub const BASE_ATTRIBUTE_VALUE: u32 = 5;
pub const NUM_ATTRIBUTES: usize = 3;

// Derived stat formulas
pub const STRENGTH_PER_ATTACK_POINT: u32 = 2;
pub const AGILITY_PER_DEFENSE_POINT: u32 = 2;
pub const MANA_PER_INTELLIGENCE: u32 = 2;

// Combat tuning (canonical set, applied on every path)
pub const DODGE_CHANCE: f64 = 0.06;
pub const CRIT_CHANCE: f64 = 0.12;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.8;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.2;
pub const DEFENSE_MITIGATION: f64 = 0.5;
pub const FLEE_CHANCE: f64 = 0.5;

// Enemy scaling: stat(level) = base + step * (level - 1), then tier multipliers
pub const ENEMY_BASE_HEALTH: u32 = 30;
pub const ENEMY_HEALTH_PER_LEVEL: u32 = 12;
pub const ENEMY_BASE_ATTACK: u32 = 8;
pub const ENEMY_ATTACK_PER_LEVEL: u32 = 3;
pub const ENEMY_BASE_DEFENSE: u32 = 3;
pub const ENEMY_DEFENSE_PER_LEVEL: u32 = 2;
pub const ENEMY_STAT_VARIANCE_MIN: f64 = 0.9;
pub const ENEMY_STAT_VARIANCE_MAX: f64 = 1.1;

// Enemy rewards, computed once at spawn
pub const ENEMY_BASE_GOLD: u32 = 10;
pub const ENEMY_GOLD_PER_LEVEL: u32 = 5;
pub const ENEMY_BASE_EXP: u32 = 20;
pub const ENEMY_EXP_PER_LEVEL: u32 = 10;

// Roster
pub const ROSTER_BATCH_MIN: usize = 3;
pub const ROSTER_BATCH_MAX: usize = 5;
pub const ENEMY_LEVEL_PER_WAVE: u32 = 1;

// Spawn tier distribution thresholds on a single 0..1 roll
pub const SPAWN_ELITE_THRESHOLD: f64 = 0.70;
pub const SPAWN_RARE_THRESHOLD: f64 = 0.88;
pub const SPAWN_BOSS_THRESHOLD: f64 = 0.96;

// Inventory
pub const INVENTORY_CAPACITY: usize = 20;

// Rest
pub const REST_RECOVERY_FRACTION: f64 = 0.3;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 10;
