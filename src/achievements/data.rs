//! The seeded achievement set. All achievements are visible from the start;
//! several share a (trigger, target) key at different thresholds.

use crate::events::TriggerKind;

pub struct AchievementDef {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub trigger: TriggerKind,
    /// Empty target matches any event of the trigger kind.
    pub target: &'static str,
    pub target_amount: u32,
    pub reward_gold: u32,
    pub reward_exp: u32,
    /// Item catalog template keys granted on claim.
    pub reward_items: &'static [&'static str],
}

pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        key: "slayer-i",
        name: "Slayer I",
        description: "Defeat 10 enemies.",
        trigger: TriggerKind::KillTarget,
        target: "",
        target_amount: 10,
        reward_gold: 50,
        reward_exp: 100,
        reward_items: &[],
    },
    AchievementDef {
        key: "slayer-ii",
        name: "Slayer II",
        description: "Defeat 50 enemies.",
        trigger: TriggerKind::KillTarget,
        target: "",
        target_amount: 50,
        reward_gold: 200,
        reward_exp: 400,
        reward_items: &["health-potion"],
    },
    AchievementDef {
        key: "slayer-iii",
        name: "Slayer III",
        description: "Defeat 200 enemies.",
        trigger: TriggerKind::KillTarget,
        target: "",
        target_amount: 200,
        reward_gold: 500,
        reward_exp: 1000,
        reward_items: &["runed-blade"],
    },
    AchievementDef {
        key: "boss-hunter",
        name: "Boss Hunter",
        description: "Defeat your first boss.",
        trigger: TriggerKind::KillTarget,
        target: "boss",
        target_amount: 1,
        reward_gold: 100,
        reward_exp: 200,
        reward_items: &[],
    },
    AchievementDef {
        key: "boss-hunter-ii",
        name: "Boss Hunter II",
        description: "Defeat 10 bosses.",
        trigger: TriggerKind::KillTarget,
        target: "boss",
        target_amount: 10,
        reward_gold: 400,
        reward_exp: 800,
        reward_items: &["wardens-aegis"],
    },
    AchievementDef {
        key: "adept",
        name: "Adept",
        description: "Reach level 5.",
        trigger: TriggerKind::ReachLevel,
        target: "",
        target_amount: 5,
        reward_gold: 100,
        reward_exp: 0,
        reward_items: &[],
    },
    AchievementDef {
        key: "veteran",
        name: "Veteran",
        description: "Reach level 10.",
        trigger: TriggerKind::ReachLevel,
        target: "",
        target_amount: 10,
        reward_gold: 300,
        reward_exp: 0,
        reward_items: &["elixir-of-strength"],
    },
    AchievementDef {
        key: "gold-hoarder",
        name: "Gold Hoarder",
        description: "Earn 500 gold in one run.",
        trigger: TriggerKind::EarnGold,
        target: "",
        target_amount: 500,
        reward_gold: 0,
        reward_exp: 300,
        reward_items: &[],
    },
    AchievementDef {
        key: "dragon-rich",
        name: "Dragon Rich",
        description: "Earn 2000 gold in one run.",
        trigger: TriggerKind::EarnGold,
        target: "",
        target_amount: 2000,
        reward_gold: 0,
        reward_exp: 800,
        reward_items: &["dragon-slayer"],
    },
    AchievementDef {
        key: "collector",
        name: "Collector",
        description: "Collect 10 items.",
        trigger: TriggerKind::CollectItem,
        target: "",
        target_amount: 10,
        reward_gold: 150,
        reward_exp: 250,
        reward_items: &[],
    },
];

pub fn definition(key: &str) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.key == key)
}
