use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Market value scaling per tier.
    pub fn value_multiplier(&self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 5,
            Rarity::Epic => 10,
            Rarity::Legendary => 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
        }
    }
}

/// What drinking a potion does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PotionEffect {
    RestoreHealth(u32),
    RestoreMana(u32),
    /// Temporary attack bonus lasting a number of fight turns.
    Fortify { attack: u32, turns: u32 },
}

/// What a scroll unleashes once its mana cost is paid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrollEffect {
    /// Direct damage to the engaged enemy.
    Damage(u32),
    RestoreHealth(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion(PotionEffect),
    Scroll { effect: ScrollEffect, mana_cost: u32 },
}

impl ItemKind {
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self {
            ItemKind::Weapon => Some(EquipmentSlot::Weapon),
            ItemKind::Armor => Some(EquipmentSlot::Armor),
            _ => None,
        }
    }

    /// Consumables stack; equipment is one item per slot entry.
    pub fn stackable(&self) -> bool {
        matches!(self, ItemKind::Potion(_) | ItemKind::Scroll { .. })
    }
}

/// Partial stat bonus map. Zero means "no bonus for that stat".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBonuses {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
    pub mana: u32,
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
}

impl StatBonuses {
    pub const fn none() -> Self {
        Self {
            attack: 0,
            defense: 0,
            health: 0,
            mana: 0,
            strength: 0,
            agility: 0,
            intelligence: 0,
        }
    }

    pub fn add(&mut self, other: &StatBonuses) {
        self.attack += other.attack;
        self.defense += other.defense;
        self.health += other.health;
        self.mana += other.mana;
        self.strength += other.strength;
        self.agility += other.agility;
        self.intelligence += other.intelligence;
    }

    pub fn total(&self) -> u32 {
        self.attack
            + self.defense
            + self.health
            + self.mana
            + self.strength
            + self.agility
            + self.intelligence
    }
}

/// An immutable item value. Stackable items share their template key as id;
/// equipment carries a unique per-run instance id minted by the run context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub level: u32,
    pub bonuses: StatBonuses,
    pub base_value: u32,
}

impl Item {
    /// Effective market value: base value scaled by rarity.
    pub fn market_value(&self) -> u32 {
        self.base_value * self.rarity.value_multiplier()
    }

    pub fn stackable(&self) -> bool {
        self.kind.stackable()
    }

    pub fn slot(&self) -> Option<EquipmentSlot> {
        self.kind.slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_rarity_value_multipliers() {
        assert_eq!(Rarity::Common.value_multiplier(), 1);
        assert_eq!(Rarity::Uncommon.value_multiplier(), 2);
        assert_eq!(Rarity::Rare.value_multiplier(), 5);
        assert_eq!(Rarity::Epic.value_multiplier(), 10);
        assert_eq!(Rarity::Legendary.value_multiplier(), 25);
    }

    #[test]
    fn test_market_value_scales_with_rarity() {
        let mut item = Item {
            id: "test".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            kind: ItemKind::Weapon,
            rarity: Rarity::Common,
            level: 1,
            bonuses: StatBonuses::none(),
            base_value: 40,
        };
        assert_eq!(item.market_value(), 40);
        item.rarity = Rarity::Legendary;
        assert_eq!(item.market_value(), 1000);
    }

    #[test]
    fn test_only_consumables_stack() {
        assert!(!ItemKind::Weapon.stackable());
        assert!(!ItemKind::Armor.stackable());
        assert!(ItemKind::Potion(PotionEffect::RestoreHealth(10)).stackable());
        assert!(ItemKind::Scroll {
            effect: ScrollEffect::Damage(10),
            mana_cost: 5
        }
        .stackable());
    }

    #[test]
    fn test_slot_mapping() {
        assert_eq!(ItemKind::Weapon.slot(), Some(EquipmentSlot::Weapon));
        assert_eq!(ItemKind::Armor.slot(), Some(EquipmentSlot::Armor));
        assert_eq!(ItemKind::Potion(PotionEffect::RestoreMana(5)).slot(), None);
    }

    #[test]
    fn test_stat_bonuses_add_and_total() {
        let mut a = StatBonuses {
            attack: 3,
            health: 20,
            ..StatBonuses::none()
        };
        let b = StatBonuses {
            attack: 2,
            defense: 4,
            ..StatBonuses::none()
        };
        a.add(&b);
        assert_eq!(a.attack, 5);
        assert_eq!(a.defense, 4);
        assert_eq!(a.total(), 29);
    }
}
