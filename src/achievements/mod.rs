//! Achievement tracking. Parallel in shape to the quest tracker, but the
//! whole set is seeded up front, progress is keyed by (trigger, target)
//! rather than per-quest id, and claims accumulate in an append-only
//! history with unlock timestamps.

pub mod data;

use crate::character::player::Player;
use crate::core::context::RunContext;
use crate::events::{self, ProgressEvent, TriggerKind};
use crate::items::catalog as item_catalog;
use crate::items::types::Item;
use serde::{Deserialize, Serialize};

use self::data::{AchievementDef, ALL_ACHIEVEMENTS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementReward {
    pub gold: u32,
    pub exp: u32,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub key: String,
    pub name: String,
    pub description: String,
    pub trigger: TriggerKind,
    pub target: String,
    pub target_amount: u32,
    pub current_amount: u32,
    pub reward: AchievementReward,
    pub completed: bool,
}

impl Achievement {
    fn from_def(def: &AchievementDef) -> Self {
        Self {
            key: def.key.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            trigger: def.trigger,
            target: def.target.to_string(),
            target_amount: def.target_amount,
            current_amount: 0,
            reward: AchievementReward {
                gold: def.reward_gold,
                exp: def.reward_exp,
                items: def.reward_items.iter().map(|s| s.to_string()).collect(),
            },
            completed: false,
        }
    }

    fn advance(&mut self, event: &ProgressEvent) {
        if self.completed || !events::matches(self.trigger, &self.target, event) {
            return;
        }
        self.current_amount = match self.trigger {
            TriggerKind::ReachLevel => self.current_amount.max(event.amount),
            _ => self.current_amount.saturating_add(event.amount),
        };
        if self.current_amount >= self.target_amount {
            self.completed = true;
        }
    }
}

/// A claimed achievement, with the moment it was unlocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimedAchievement {
    pub achievement: Achievement,
    pub unlocked_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementTracker {
    active: Vec<Achievement>,
    /// Append-only claim history.
    claimed: Vec<ClaimedAchievement>,
}

impl Default for AchievementTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementTracker {
    /// Seeds the full achievement set; nothing is level-gated.
    pub fn new() -> Self {
        Self {
            active: ALL_ACHIEVEMENTS.iter().map(Achievement::from_def).collect(),
            claimed: Vec::new(),
        }
    }

    pub fn active(&self) -> &[Achievement] {
        &self.active
    }

    pub fn claimed(&self) -> &[ClaimedAchievement] {
        &self.claimed
    }

    /// One event advances every active achievement sharing its
    /// (trigger, target) key, whatever their thresholds.
    pub fn update_progress(&mut self, event: &ProgressEvent) {
        for achievement in &mut self.active {
            achievement.advance(event);
        }
    }

    /// Moves newly completed achievements out and returns them by value,
    /// exactly once each.
    pub fn take_completed(&mut self) -> Vec<Achievement> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].completed {
                taken.push(self.active.remove(i));
            } else {
                i += 1;
            }
        }
        taken
    }

    /// Grants the reward and appends to the claim history.
    pub fn claim(
        &mut self,
        achievement: Achievement,
        player: &mut Player,
        ctx: &mut RunContext,
    ) -> Vec<Item> {
        player.gain_gold(achievement.reward.gold);
        player.gain_experience(achievement.reward.exp);
        let items = achievement
            .reward
            .items
            .iter()
            .filter_map(|key| item_catalog::create(key, ctx))
            .collect();
        self.claimed.push(ClaimedAchievement {
            achievement,
            unlocked_at: chrono::Utc::now().timestamp(),
        });
        items
    }

    /// Claimed / total, in `0.0..=1.0`.
    pub fn completion_rate(&self) -> f64 {
        if ALL_ACHIEVEMENTS.is_empty() {
            return 0.0;
        }
        self.claimed.len() as f64 / ALL_ACHIEVEMENTS.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_seeds_full_set() {
        let tracker = AchievementTracker::new();
        assert_eq!(tracker.active().len(), ALL_ACHIEVEMENTS.len());
        assert!(tracker.claimed().is_empty());
        assert_eq!(tracker.completion_rate(), 0.0);
    }

    #[test]
    fn test_one_event_advances_all_shared_key_achievements() {
        let mut tracker = AchievementTracker::new();
        tracker.update_progress(&ProgressEvent::enemy_killed("normal"));

        for key in ["slayer-i", "slayer-ii", "slayer-iii"] {
            let a = tracker.active().iter().find(|a| a.key == key).unwrap();
            assert_eq!(a.current_amount, 1, "{key} should have advanced");
        }
        // Targeted boss achievements did not move.
        let boss = tracker
            .active()
            .iter()
            .find(|a| a.key == "boss-hunter")
            .unwrap();
        assert_eq!(boss.current_amount, 0);
    }

    #[test]
    fn test_thresholds_complete_independently() {
        let mut tracker = AchievementTracker::new();
        for _ in 0..10 {
            tracker.update_progress(&ProgressEvent::enemy_killed("normal"));
        }
        let batch = tracker.take_completed();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].key, "slayer-i");

        // slayer-ii keeps counting on the same key.
        for _ in 0..40 {
            tracker.update_progress(&ProgressEvent::enemy_killed("normal"));
        }
        let batch = tracker.take_completed();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].key, "slayer-ii");
    }

    #[test]
    fn test_take_completed_is_one_shot() {
        let mut tracker = AchievementTracker::new();
        for _ in 0..10 {
            tracker.update_progress(&ProgressEvent::enemy_killed("normal"));
        }
        assert_eq!(tracker.take_completed().len(), 1);
        assert!(tracker.take_completed().is_empty());
    }

    #[test]
    fn test_claim_appends_history_and_pays_out() {
        let mut ctx = RunContext::new(13);
        let mut player = Player::new("Aria");
        let mut tracker = AchievementTracker::new();
        for _ in 0..10 {
            tracker.update_progress(&ProgressEvent::enemy_killed("normal"));
        }

        let achievement = tracker.take_completed().remove(0);
        let gold_before = player.gold;
        let items = tracker.claim(achievement, &mut player, &mut ctx);

        assert!(items.is_empty());
        assert_eq!(player.gold, gold_before + 50);
        assert_eq!(tracker.claimed().len(), 1);
        assert_eq!(tracker.claimed()[0].achievement.key, "slayer-i");
        assert!(tracker.claimed()[0].unlocked_at > 0);
        let expected = 1.0 / ALL_ACHIEVEMENTS.len() as f64;
        assert!((tracker.completion_rate() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_completed_counter_is_frozen() {
        let mut tracker = AchievementTracker::new();
        tracker.update_progress(&ProgressEvent::enemy_killed("boss"));
        // boss-hunter completed at 1; the follow-up kill must not move it.
        tracker.update_progress(&ProgressEvent::enemy_killed("boss"));
        let a = tracker
            .active()
            .iter()
            .find(|a| a.key == "boss-hunter")
            .unwrap();
        assert_eq!(a.current_amount, 1);
    }

    #[test]
    fn test_level_milestones_use_high_water_mark() {
        let mut tracker = AchievementTracker::new();
        tracker.update_progress(&ProgressEvent::level_reached(10));
        let batch = tracker.take_completed();
        let keys: Vec<&str> = batch.iter().map(|a| a.key.as_str()).collect();
        assert!(keys.contains(&"adept"));
        assert!(keys.contains(&"veteran"));
    }
}
