//! Gameplay events fanned out to the quest and achievement trackers.

use serde::{Deserialize, Serialize};

/// What a progress counter listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    KillTarget,
    CollectItem,
    ReachLevel,
    EarnGold,
}

/// One observed gameplay event. `target` narrows the event ("boss",
/// "health-potion"); counters registered with an empty target match any
/// event of their trigger kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub trigger: TriggerKind,
    pub target: String,
    pub amount: u32,
}

impl ProgressEvent {
    pub fn enemy_killed(tier: &str) -> Self {
        Self {
            trigger: TriggerKind::KillTarget,
            target: tier.to_string(),
            amount: 1,
        }
    }

    pub fn item_collected(template_key: &str, amount: u32) -> Self {
        Self {
            trigger: TriggerKind::CollectItem,
            target: template_key.to_string(),
            amount,
        }
    }

    /// `amount` carries the level itself; reach-level counters track the
    /// high-water mark rather than a running sum.
    pub fn level_reached(level: u32) -> Self {
        Self {
            trigger: TriggerKind::ReachLevel,
            target: String::new(),
            amount: level,
        }
    }

    pub fn gold_earned(amount: u32) -> Self {
        Self {
            trigger: TriggerKind::EarnGold,
            target: String::new(),
            amount,
        }
    }
}

/// Counter-side matching rule shared by quests and achievements.
pub fn matches(counter_trigger: TriggerKind, counter_target: &str, event: &ProgressEvent) -> bool {
    counter_trigger == event.trigger
        && (counter_target.is_empty() || counter_target == event.target)
}
