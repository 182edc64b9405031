//! Bounded bag of item stacks, plus use/equip/sell dispatch.

use crate::character::base::Combatant;
use crate::character::player::{Buff, Player};
use crate::core::constants::INVENTORY_CAPACITY;
use crate::error::ActionError;
use crate::items::types::{EquipmentSlot, Item, ItemKind, PotionEffect, ScrollEffect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Item,
    pub quantity: u32,
}

/// What using an item did. Scroll damage is returned rather than applied,
/// because the target enemy lives in the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UseOutcome {
    Potion(PotionEffect),
    Scroll(ScrollEffect),
    Equipped {
        slot: EquipmentSlot,
        replaced: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stacks: Vec::new(),
            capacity,
        }
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stacks.len() >= self.capacity
    }

    pub fn find(&self, item_id: &str) -> Option<&ItemStack> {
        self.stacks.iter().find(|s| s.item.id == item_id)
    }

    /// Whether an add would succeed: a merge into an existing stack, or a
    /// free slot for a new one.
    pub fn can_accept(&self, item: &Item) -> bool {
        (item.stackable() && self.find(&item.id).is_some()) || !self.is_full()
    }

    /// Adds an item, merging stackables with the same id. Fails at capacity
    /// when no merge is possible, leaving the bag untouched.
    pub fn add_item(&mut self, item: Item) -> Result<(), ActionError> {
        if item.stackable() {
            if let Some(stack) = self.stacks.iter_mut().find(|s| s.item.id == item.id) {
                stack.quantity += 1;
                return Ok(());
            }
        }
        if self.is_full() {
            return Err(ActionError::InventoryFull);
        }
        self.stacks.push(ItemStack { item, quantity: 1 });
        Ok(())
    }

    /// Removes `qty` units, dropping the stack when it empties. Rejected
    /// without mutation when the item is absent or the stack is short.
    pub fn remove_item(&mut self, item_id: &str, qty: u32) -> Result<(), ActionError> {
        let index = self
            .stacks
            .iter()
            .position(|s| s.item.id == item_id)
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
        if self.stacks[index].quantity < qty {
            return Err(ActionError::UnknownItem(item_id.to_string()));
        }
        self.stacks[index].quantity -= qty;
        if self.stacks[index].quantity == 0 {
            self.stacks.remove(index);
        }
        Ok(())
    }

    /// Removes one unit of `item_id` and hands it back; the stack disappears
    /// when its quantity reaches zero.
    pub fn take_one(&mut self, item_id: &str) -> Result<Item, ActionError> {
        let index = self
            .stacks
            .iter()
            .position(|s| s.item.id == item_id)
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
        let stack = &mut self.stacks[index];
        if stack.quantity > 1 {
            stack.quantity -= 1;
            Ok(stack.item.clone())
        } else {
            Ok(self.stacks.remove(index).item)
        }
    }

    /// Uses an item on `player`, dispatching by kind. Potions apply and are
    /// consumed; scrolls charge mana first, then return their effect for the
    /// caller to apply; equipment routes through [`Inventory::equip`].
    /// Rejections leave the bag, vitals, and gold untouched.
    pub fn use_item(&mut self, item_id: &str, player: &mut Player) -> Result<UseOutcome, ActionError> {
        let stack = self
            .find(item_id)
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;

        match stack.item.kind {
            ItemKind::Potion(effect) => {
                match effect {
                    PotionEffect::RestoreHealth(amount) => player.heal(amount),
                    PotionEffect::RestoreMana(amount) => player.restore_mana(amount),
                    PotionEffect::Fortify { attack, turns } => player.add_buff(Buff {
                        attack_bonus: attack,
                        remaining_turns: turns,
                    }),
                }
                self.take_one(item_id)?;
                Ok(UseOutcome::Potion(effect))
            }
            ItemKind::Scroll { effect, mana_cost } => {
                player.spend_mana(mana_cost)?;
                self.take_one(item_id)?;
                if let ScrollEffect::RestoreHealth(amount) = effect {
                    player.heal(amount);
                }
                Ok(UseOutcome::Scroll(effect))
            }
            ItemKind::Weapon | ItemKind::Armor => self.equip(item_id, player),
        }
    }

    /// Moves an item from the bag into its equipment slot. A displaced
    /// occupant returns to the bag, never silently discarded; the removal
    /// just freed its slot, so the swap cannot overflow.
    pub fn equip(&mut self, item_id: &str, player: &mut Player) -> Result<UseOutcome, ActionError> {
        let stack = self
            .find(item_id)
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
        let slot = stack.item.slot().ok_or(ActionError::WrongItemKind)?;

        let item = self.take_one(item_id)?;
        let replaced = player.equipment.replace(slot, item);
        let replaced_name = replaced.as_ref().map(|i| i.name.clone());
        if let Some(previous) = replaced {
            self.add_item(previous)?;
        }
        player.recompute_derived();
        Ok(UseOutcome::Equipped {
            slot,
            replaced: replaced_name,
        })
    }

    /// Sells one unit at the item's rarity-scaled market value.
    pub fn sell_item(&mut self, item_id: &str, player: &mut Player) -> Result<u32, ActionError> {
        let item = self.take_one(item_id)?;
        let price = item.market_value();
        player.gain_gold(price);
        Ok(price)
    }
}
