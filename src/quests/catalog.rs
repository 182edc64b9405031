//! Quest templates, gated by a minimum player level.

use crate::events::TriggerKind;

pub struct QuestTemplate {
    pub key: &'static str,
    pub description: &'static str,
    pub trigger: TriggerKind,
    /// Empty target matches any event of the trigger kind.
    pub target: &'static str,
    pub target_amount: u32,
    pub min_level: u32,
    pub reward_gold: u32,
    pub reward_exp: u32,
    /// Item catalog template keys granted on claim.
    pub reward_items: &'static [&'static str],
}

pub const QUEST_TEMPLATES: &[QuestTemplate] = &[
    QuestTemplate {
        key: "first-blood",
        description: "Slay 3 enemies of any kind.",
        trigger: TriggerKind::KillTarget,
        target: "",
        target_amount: 3,
        min_level: 1,
        reward_gold: 30,
        reward_exp: 50,
        reward_items: &["minor-health-potion"],
    },
    QuestTemplate {
        key: "pest-control",
        description: "Slay 10 enemies of any kind.",
        trigger: TriggerKind::KillTarget,
        target: "",
        target_amount: 10,
        min_level: 2,
        reward_gold: 80,
        reward_exp: 150,
        reward_items: &["iron-sword"],
    },
    QuestTemplate {
        key: "giant-slayer",
        description: "Bring down a boss.",
        trigger: TriggerKind::KillTarget,
        target: "boss",
        target_amount: 1,
        min_level: 3,
        reward_gold: 150,
        reward_exp: 300,
        reward_items: &["chainmail"],
    },
    QuestTemplate {
        key: "seasoned-adventurer",
        description: "Reach level 5.",
        trigger: TriggerKind::ReachLevel,
        target: "",
        target_amount: 5,
        min_level: 1,
        reward_gold: 100,
        reward_exp: 0,
        reward_items: &[],
    },
    QuestTemplate {
        key: "fortune-seeker",
        description: "Earn 500 gold.",
        trigger: TriggerKind::EarnGold,
        target: "",
        target_amount: 500,
        min_level: 2,
        reward_gold: 0,
        reward_exp: 200,
        reward_items: &["scroll-of-flame"],
    },
    QuestTemplate {
        key: "packrat",
        description: "Collect 5 items.",
        trigger: TriggerKind::CollectItem,
        target: "",
        target_amount: 5,
        min_level: 1,
        reward_gold: 50,
        reward_exp: 80,
        reward_items: &["mana-potion"],
    },
    QuestTemplate {
        key: "elite-hunter",
        description: "Slay 5 elite enemies.",
        trigger: TriggerKind::KillTarget,
        target: "elite",
        target_amount: 5,
        min_level: 5,
        reward_gold: 200,
        reward_exp: 400,
        reward_items: &["steel-greatsword"],
    },
];

pub fn template(key: &str) -> Option<&'static QuestTemplate> {
    QUEST_TEMPLATES.iter().find(|t| t.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog as item_catalog;

    #[test]
    fn test_template_keys_are_unique() {
        for (i, a) in QUEST_TEMPLATES.iter().enumerate() {
            for b in &QUEST_TEMPLATES[i + 1..] {
                assert_ne!(a.key, b.key, "duplicate quest key {}", a.key);
            }
        }
    }

    #[test]
    fn test_reward_items_resolve_in_item_catalog() {
        for quest in QUEST_TEMPLATES {
            for key in quest.reward_items {
                assert!(
                    item_catalog::template(key).is_some(),
                    "quest {} rewards unknown item {key}",
                    quest.key
                );
            }
        }
    }
}
