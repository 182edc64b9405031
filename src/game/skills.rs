//! The learnable skill catalog.
//!
//! Skill strikes are deterministic: `max(1, floor(attack * power - defense * 0.5))`.
//! The variance, crit, and dodge rolls belong to the basic exchange only.

pub struct SkillDef {
    pub name: &'static str,
    pub description: &'static str,
    pub mana_cost: u32,
    /// Attack multiplier applied before mitigation.
    pub power: f64,
}

pub const SKILLS: &[SkillDef] = &[
    SkillDef {
        name: "Power Strike",
        description: "A heavy, committed blow.",
        mana_cost: 10,
        power: 1.5,
    },
    SkillDef {
        name: "Fireball",
        description: "Classic. Loud. Effective.",
        mana_cost: 18,
        power: 2.0,
    },
    SkillDef {
        name: "Whirlwind",
        description: "Everything nearby regrets it.",
        mana_cost: 30,
        power: 2.8,
    },
];

pub fn skill(name: &str) -> Option<&'static SkillDef> {
    SKILLS.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        assert!(skill("Fireball").is_some());
        assert!(skill("fireball").is_none());
        assert!(skill("Meteor").is_none());
    }

    #[test]
    fn test_stronger_skills_cost_more() {
        let costs: Vec<u32> = SKILLS.iter().map(|s| s.mana_cost).collect();
        let mut sorted = costs.clone();
        sorted.sort_unstable();
        assert_eq!(costs, sorted);
    }
}
