//! Quest tracking: level-gated templates, per-run counters, and
//! move-semantics completion batches so a reward can only be claimed once.

pub mod catalog;

use std::collections::BTreeSet;

use crate::character::player::Player;
use crate::core::context::RunContext;
use crate::events::{self, ProgressEvent, TriggerKind};
use crate::items::catalog as item_catalog;
use crate::items::types::Item;
use serde::{Deserialize, Serialize};

use self::catalog::{QuestTemplate, QUEST_TEMPLATES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestReward {
    pub gold: u32,
    pub exp: u32,
    /// Item catalog template keys.
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub description: String,
    pub trigger: TriggerKind,
    pub target: String,
    pub target_amount: u32,
    pub current_amount: u32,
    pub reward: QuestReward,
    pub completed: bool,
}

impl Quest {
    fn from_template(template: &QuestTemplate) -> Self {
        Self {
            id: template.key.to_string(),
            description: template.description.to_string(),
            trigger: template.trigger,
            target: template.target.to_string(),
            target_amount: template.target_amount,
            current_amount: 0,
            reward: QuestReward {
                gold: template.reward_gold,
                exp: template.reward_exp,
                items: template.reward_items.iter().map(|s| s.to_string()).collect(),
            },
            completed: false,
        }
    }

    /// Advances the counter for a matching event. Completion is one-way and
    /// freezes the counter; reach-level counters track the high-water mark.
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestTracker {
    active: Vec<Quest>,
    completed: Vec<Quest>,
    /// Keys ever activated, so a quest is offered at most once per run.
    activated: BTreeSet<String>,
}

impl QuestTracker {
    pub fn new(player_level: u32) -> Self {
        let mut tracker = Self::default();
        tracker.refresh_available(player_level);
        tracker
    }

    pub fn active(&self) -> &[Quest] {
        &self.active
    }

    pub fn completed(&self) -> &[Quest] {
        &self.completed
    }

    /// Activates templates the player's level has unlocked.
    pub fn refresh_available(&mut self, player_level: u32) {
        for template in QUEST_TEMPLATES {
            if template.min_level <= player_level && !self.activated.contains(template.key) {
                self.activated.insert(template.key.to_string());
                self.active.push(Quest::from_template(template));
            }
        }
    }

    /// Advances every active quest matching the event.
    pub fn update_progress(&mut self, event: &ProgressEvent) {
        for quest in &mut self.active {
            quest.advance(event);
        }
    }

    /// Moves newly completed quests out of the tracker and returns them by
    /// value. Each completed quest is handed out exactly once; claiming
    /// consumes it.
    pub fn take_completed(&mut self) -> Vec<Quest> {
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

    /// Grants the quest's reward and archives it. Bonus items are built
    /// through the item catalog and returned for the caller to bank.
    pub fn claim(&mut self, quest: Quest, player: &mut Player, ctx: &mut RunContext) -> Vec<Item> {
        player.gain_gold(quest.reward.gold);
        player.gain_experience(quest.reward.exp);
        let items = quest
            .reward
            .items
            .iter()
            .filter_map(|key| item_catalog::create(key, ctx))
            .collect();
        self.completed.push(quest);
        items
    }
}
