use thiserror::Error;

/// A rejected player action. Rejections are synchronous and never mutate
/// state; the orchestrator turns them into the snapshot's user-facing
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("not enough gold")]
    NotEnoughGold,
    #[error("not enough mana")]
    NotEnoughMana,
    #[error("your bag is full")]
    InventoryFull,
    #[error("no such item: {0}")]
    UnknownItem(String),
    #[error("that item cannot be used this way")]
    WrongItemKind,
    #[error("no such skill: {0}")]
    UnknownSkill(String),
    #[error("skill already learned: {0}")]
    SkillAlreadyKnown(String),
    #[error("no skill points left")]
    NoSkillPoints,
    #[error("skill not learned: {0}")]
    SkillNotLearned(String),
    #[error("there is nothing to fight")]
    NoTarget,
    #[error("nothing in the shop at slot {0}")]
    UnknownShopIndex(usize),
    #[error("that can't be done right now")]
    InvalidPhase,
}
