//! The item catalog: a pure, template-driven factory.
//!
//! Templates are addressed by a stable key. Stackable items reuse the key as
//! their id so identical consumables merge in the inventory; equipment gets a
//! unique instance id from the run context.

use crate::core::context::RunContext;

use super::types::{Item, ItemKind, PotionEffect, Rarity, ScrollEffect, StatBonuses};

pub struct ItemTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub level: u32,
    pub bonuses: StatBonuses,
    pub base_value: u32,
}

pub const TEMPLATES: &[ItemTemplate] = &[
    // Weapons
    ItemTemplate {
        key: "rusty-sword",
        name: "Rusty Sword",
        description: "It has seen better centuries.",
        kind: ItemKind::Weapon,
        rarity: Rarity::Common,
        level: 1,
        bonuses: StatBonuses {
            attack: 3,
            ..StatBonuses::none()
        },
        base_value: 10,
    },
    ItemTemplate {
        key: "iron-sword",
        name: "Iron Sword",
        description: "A dependable soldier's blade.",
        kind: ItemKind::Weapon,
        rarity: Rarity::Uncommon,
        level: 3,
        bonuses: StatBonuses {
            attack: 6,
            strength: 1,
            ..StatBonuses::none()
        },
        base_value: 25,
    },
    ItemTemplate {
        key: "steel-greatsword",
        name: "Steel Greatsword",
        description: "Two hands, no mercy.",
        kind: ItemKind::Weapon,
        rarity: Rarity::Rare,
        level: 6,
        bonuses: StatBonuses {
            attack: 11,
            strength: 2,
            ..StatBonuses::none()
        },
        base_value: 40,
    },
    ItemTemplate {
        key: "runed-blade",
        name: "Runed Blade",
        description: "The runes hum when enemies are near.",
        kind: ItemKind::Weapon,
        rarity: Rarity::Epic,
        level: 10,
        bonuses: StatBonuses {
            attack: 16,
            strength: 3,
            intelligence: 2,
            ..StatBonuses::none()
        },
        base_value: 60,
    },
    ItemTemplate {
        key: "dragon-slayer",
        name: "Dragon Slayer",
        description: "Forged in a fire that fought back.",
        kind: ItemKind::Weapon,
        rarity: Rarity::Legendary,
        level: 15,
        bonuses: StatBonuses {
            attack: 25,
            strength: 5,
            ..StatBonuses::none()
        },
        base_value: 80,
    },
    // Armor
    ItemTemplate {
        key: "leather-vest",
        name: "Leather Vest",
        description: "Better than a shirt. Barely.",
        kind: ItemKind::Armor,
        rarity: Rarity::Common,
        level: 1,
        bonuses: StatBonuses {
            defense: 3,
            health: 10,
            ..StatBonuses::none()
        },
        base_value: 10,
    },
    ItemTemplate {
        key: "chainmail",
        name: "Chainmail",
        description: "A thousand rings against one blade.",
        kind: ItemKind::Armor,
        rarity: Rarity::Uncommon,
        level: 4,
        bonuses: StatBonuses {
            defense: 6,
            health: 20,
            ..StatBonuses::none()
        },
        base_value: 25,
    },
    ItemTemplate {
        key: "plate-armor",
        name: "Plate Armor",
        description: "Walking fortress, slight squeak.",
        kind: ItemKind::Armor,
        rarity: Rarity::Rare,
        level: 8,
        bonuses: StatBonuses {
            defense: 10,
            health: 35,
            agility: 1,
            ..StatBonuses::none()
        },
        base_value: 40,
    },
    ItemTemplate {
        key: "wardens-aegis",
        name: "Warden's Aegis",
        description: "Worn by the last warden of the deep gate.",
        kind: ItemKind::Armor,
        rarity: Rarity::Epic,
        level: 12,
        bonuses: StatBonuses {
            defense: 15,
            health: 50,
            mana: 20,
            ..StatBonuses::none()
        },
        base_value: 60,
    },
    // Potions
    ItemTemplate {
        key: "minor-health-potion",
        name: "Minor Health Potion",
        description: "Tastes of copper and hope.",
        kind: ItemKind::Potion(PotionEffect::RestoreHealth(30)),
        rarity: Rarity::Common,
        level: 1,
        bonuses: StatBonuses::none(),
        base_value: 8,
    },
    ItemTemplate {
        key: "health-potion",
        name: "Health Potion",
        description: "The adventurer's breakfast.",
        kind: ItemKind::Potion(PotionEffect::RestoreHealth(75)),
        rarity: Rarity::Uncommon,
        level: 5,
        bonuses: StatBonuses::none(),
        base_value: 15,
    },
    ItemTemplate {
        key: "mana-potion",
        name: "Mana Potion",
        description: "Cold, blue, and faintly staring back.",
        kind: ItemKind::Potion(PotionEffect::RestoreMana(40)),
        rarity: Rarity::Uncommon,
        level: 3,
        bonuses: StatBonuses::none(),
        base_value: 15,
    },
    ItemTemplate {
        key: "elixir-of-strength",
        name: "Elixir of Strength",
        description: "Three turns of borrowed fury.",
        kind: ItemKind::Potion(PotionEffect::Fortify {
            attack: 8,
            turns: 3,
        }),
        rarity: Rarity::Rare,
        level: 6,
        bonuses: StatBonuses::none(),
        base_value: 25,
    },
    // Scrolls
    ItemTemplate {
        key: "scroll-of-flame",
        name: "Scroll of Flame",
        description: "Reads itself aloud, loudly.",
        kind: ItemKind::Scroll {
            effect: ScrollEffect::Damage(40),
            mana_cost: 15,
        },
        rarity: Rarity::Rare,
        level: 5,
        bonuses: StatBonuses::none(),
        base_value: 20,
    },
    ItemTemplate {
        key: "scroll-of-mending",
        name: "Scroll of Mending",
        description: "Stitches wounds with written words.",
        kind: ItemKind::Scroll {
            effect: ScrollEffect::RestoreHealth(60),
            mana_cost: 10,
        },
        rarity: Rarity::Uncommon,
        level: 4,
        bonuses: StatBonuses::none(),
        base_value: 18,
    },
];

/// Template keys eligible as random enemy loot.
pub const LOOT_POOL: &[&str] = &[
    "rusty-sword",
    "iron-sword",
    "steel-greatsword",
    "runed-blade",
    "leather-vest",
    "chainmail",
    "plate-armor",
    "minor-health-potion",
    "health-potion",
    "mana-potion",
    "scroll-of-flame",
];

pub fn template(key: &str) -> Option<&'static ItemTemplate> {
    TEMPLATES.iter().find(|t| t.key == key)
}

/// Builds an item from a template. Returns `None` for unknown keys.
pub fn create(key: &str, ctx: &mut RunContext) -> Option<Item> {
    let t = template(key)?;
    let id = if t.kind.stackable() {
        t.key.to_string()
    } else {
        format!("{}#{}", t.key, ctx.next_item_id())
    };
    Some(Item {
        id,
        name: t.name.to_string(),
        description: t.description.to_string(),
        kind: t.kind,
        rarity: t.rarity,
        level: t.level,
        bonuses: t.bonuses,
        base_value: t.base_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_keys_are_unique() {
        for (i, a) in TEMPLATES.iter().enumerate() {
            for b in &TEMPLATES[i + 1..] {
                assert_ne!(a.key, b.key, "duplicate template key {}", a.key);
            }
        }
    }

    #[test]
    fn test_loot_pool_entries_resolve() {
        for key in LOOT_POOL {
            assert!(template(key).is_some(), "loot pool key {key} not in catalog");
        }
    }

    #[test]
    fn test_create_unknown_key() {
        let mut ctx = RunContext::new(0);
        assert!(create("no-such-item", &mut ctx).is_none());
    }

    #[test]
    fn test_stackable_items_share_template_id() {
        let mut ctx = RunContext::new(0);
        let a = create("health-potion", &mut ctx).unwrap();
        let b = create("health-potion", &mut ctx).unwrap();
        assert_eq!(a.id, "health-potion");
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_equipment_gets_unique_instance_ids() {
        let mut ctx = RunContext::new(0);
        let a = create("iron-sword", &mut ctx).unwrap();
        let b = create("iron-sword", &mut ctx).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("iron-sword#"));
    }

    #[test]
    fn test_created_item_carries_template_data() {
        let mut ctx = RunContext::new(0);
        let item = create("dragon-slayer", &mut ctx).unwrap();
        assert_eq!(item.name, "Dragon Slayer");
        assert_eq!(item.rarity, Rarity::Legendary);
        assert_eq!(item.bonuses.attack, 25);
        assert_eq!(item.market_value(), 80 * 25);
    }

    #[test]
    fn test_independent_contexts_mint_independently() {
        let mut a = RunContext::new(1);
        let mut b = RunContext::new(2);
        let from_a = create("rusty-sword", &mut a).unwrap();
        let from_b = create("rusty-sword", &mut b).unwrap();
        assert_eq!(from_a.id, from_b.id); // both start their own counter at 1
    }
}
