//! Multi-attack tracking and attack-count progression
//!
//! The tracker is an immutable per-turn pool: consuming an attack returns
//! an updated copy, and an exhausted pool returns itself unchanged rather
//! than going negative. Class and subclass identifiers are closed enums
//! with case-insensitive parsing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::ids::EntityId;

/// Per-turn attack pool for one entity
///
/// Created at the top of the turn, consumed by attack calls, discarded at
/// end of turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackTracker {
    pub entity_id: EntityId,
    pub max_attacks: u32,
    pub attacks_used: u32,
    pub bonus_attacks: u32,
    pub bonus_attacks_used: u32,
}

impl AttackTracker {
    /// Create a fresh tracker; `max_attacks` clamps to at least 1
    pub fn new(entity_id: EntityId, max_attacks: u32, bonus_attacks: u32) -> Self {
        Self {
            entity_id,
            max_attacks: max_attacks.max(1),
            attacks_used: 0,
            bonus_attacks,
            bonus_attacks_used: 0,
        }
    }

    /// True when the entity gets more than one attack per Attack action
    pub fn is_multiattack(&self) -> bool {
        self.max_attacks > 1
    }

    pub fn attacks_remaining(&self) -> u32 {
        self.max_attacks - self.attacks_used
    }

    pub fn bonus_attacks_remaining(&self) -> u32 {
        self.bonus_attacks - self.bonus_attacks_used
    }

    /// Consume one attack; a no-op on an exhausted pool
    pub fn use_attack(self) -> Self {
        if self.attacks_used >= self.max_attacks {
            return self;
        }
        Self {
            attacks_used: self.attacks_used + 1,
            ..self
        }
    }

    /// Consume one bonus-action attack; a no-op on an exhausted pool
    pub fn use_bonus_attack(self) -> Self {
        if self.bonus_attacks_used >= self.bonus_attacks {
            return self;
        }
        Self {
            bonus_attacks_used: self.bonus_attacks_used + 1,
            ..self
        }
    }
}

/// The closed set of character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassName {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl FromStr for ClassName {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "barbarian" => Ok(Self::Barbarian),
            "bard" => Ok(Self::Bard),
            "cleric" => Ok(Self::Cleric),
            "druid" => Ok(Self::Druid),
            "fighter" => Ok(Self::Fighter),
            "monk" => Ok(Self::Monk),
            "paladin" => Ok(Self::Paladin),
            "ranger" => Ok(Self::Ranger),
            "rogue" => Ok(Self::Rogue),
            "sorcerer" => Ok(Self::Sorcerer),
            "warlock" => Ok(Self::Warlock),
            "wizard" => Ok(Self::Wizard),
            other => Err(RulesError::parse(format!("Unknown class: {}", other))),
        }
    }
}

/// Subclasses that change the attack progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MartialSubclass {
    /// Wizard: Extra Attack at level 6
    Bladesinger,
    /// Bard: Extra Attack at level 6
    CollegeOfSwords,
    /// Bard: Extra Attack at level 6
    CollegeOfValor,
}

impl FromStr for MartialSubclass {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bladesinger" => Ok(Self::Bladesinger),
            "college of swords" | "swords" => Ok(Self::CollegeOfSwords),
            "college of valor" | "valor" => Ok(Self::CollegeOfValor),
            other => Err(RulesError::parse(format!("Unknown subclass: {}", other))),
        }
    }
}

/// Attacks granted by one Attack action for a class at a level
///
/// Martial classes cap at 2 from level 5; the Fighter escalates to 3 at 11
/// and 4 at 20; the Monk stays at 2. Bladesinger Wizards and Swords/Valor
/// Bards pick up a second attack at level 6.
pub fn extra_attack_count(class: ClassName, level: u8, subclass: Option<MartialSubclass>) -> u32 {
    match class {
        ClassName::Fighter => match level {
            20.. => 4,
            11..=19 => 3,
            5..=10 => 2,
            _ => 1,
        },
        ClassName::Barbarian | ClassName::Paladin | ClassName::Ranger | ClassName::Monk => {
            if level >= 5 {
                2
            } else {
                1
            }
        }
        ClassName::Wizard if subclass == Some(MartialSubclass::Bladesinger) => {
            if level >= 6 {
                2
            } else {
                1
            }
        }
        ClassName::Bard
            if matches!(
                subclass,
                Some(MartialSubclass::CollegeOfSwords) | Some(MartialSubclass::CollegeOfValor)
            ) =>
        {
            if level >= 6 {
                2
            } else {
                1
            }
        }
        _ => 1,
    }
}

/// Feats that grant bonus-action attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feat {
    /// Two-weapon fighting with any pair of one-handed weapons
    DualWielder,
    /// Bonus butt-end attack with a qualifying polearm
    PolearmMaster,
}

/// A wielded weapon, as the bonus-attack rules see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponProfile {
    pub name: String,
    pub light: bool,
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>, light: bool) -> Self {
        Self {
            name: name.into(),
            light,
        }
    }

    /// True for the weapons Polearm Master applies to
    pub fn is_polearm(&self) -> bool {
        matches!(
            self.name.trim().to_lowercase().as_str(),
            "glaive" | "halberd" | "quarterstaff" | "spear"
        )
    }
}

/// Bonus-action attacks granted by the current loadout
///
/// Two-weapon fighting (two light weapons, or any two with Dual Wielder)
/// grants one; otherwise Polearm Master with a qualifying polearm grants
/// one. The sources never stack, and two-weapon fighting wins when both
/// would apply.
pub fn bonus_attack_count(feats: &[Feat], weapons: &[WeaponProfile]) -> u32 {
    let dual_wielder = feats.contains(&Feat::DualWielder);
    let light_count = weapons.iter().filter(|w| w.light).count();
    if weapons.len() >= 2 && (light_count >= 2 || dual_wielder) {
        return 1;
    }
    if feats.contains(&Feat::PolearmMaster) && weapons.iter().any(WeaponProfile::is_polearm) {
        return 1;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_clamps_max_attacks() {
        let tracker = AttackTracker::new(EntityId::new(), 0, 0);
        assert_eq!(tracker.max_attacks, 1);
        assert!(!tracker.is_multiattack());
    }

    #[test]
    fn test_use_attack_returns_updated_copy() {
        let tracker = AttackTracker::new(EntityId::new(), 2, 0);
        let after = tracker.use_attack();
        assert_eq!(after.attacks_used, 1);
        assert_eq!(after.attacks_remaining(), 1);
        // Original tally untouched
        assert_eq!(tracker.attacks_used, 0);
    }

    #[test]
    fn test_exhausted_pool_is_a_noop() {
        let tracker = AttackTracker::new(EntityId::new(), 1, 0).use_attack();
        let again = tracker.use_attack();
        assert_eq!(again, tracker);
        assert_eq!(again.attacks_used, 1);
    }

    #[test]
    fn test_bonus_attacks_tracked_separately() {
        let tracker = AttackTracker::new(EntityId::new(), 2, 1);
        let after = tracker.use_bonus_attack().use_bonus_attack();
        assert_eq!(after.bonus_attacks_used, 1);
        assert_eq!(after.attacks_used, 0);
    }

    #[test]
    fn test_fighter_progression() {
        assert_eq!(extra_attack_count(ClassName::Fighter, 1, None), 1);
        assert_eq!(extra_attack_count(ClassName::Fighter, 5, None), 2);
        assert_eq!(extra_attack_count(ClassName::Fighter, 11, None), 3);
        assert_eq!(extra_attack_count(ClassName::Fighter, 20, None), 4);
        // Out-of-range levels stay monotone rather than collapsing to 1
        assert_eq!(extra_attack_count(ClassName::Fighter, 25, None), 4);
    }

    #[test]
    fn test_monk_caps_at_two() {
        assert_eq!(extra_attack_count(ClassName::Monk, 20, None), 2);
    }

    #[test]
    fn test_martial_classes_cap_at_two() {
        for class in [ClassName::Barbarian, ClassName::Paladin, ClassName::Ranger] {
            assert_eq!(extra_attack_count(class, 4, None), 1);
            assert_eq!(extra_attack_count(class, 20, None), 2);
        }
    }

    #[test]
    fn test_bladesinger_unlocks_at_six() {
        let sub = Some(MartialSubclass::Bladesinger);
        assert_eq!(extra_attack_count(ClassName::Wizard, 6, sub), 2);
        assert_eq!(extra_attack_count(ClassName::Wizard, 5, sub), 1);
        assert_eq!(extra_attack_count(ClassName::Wizard, 20, None), 1);
    }

    #[test]
    fn test_bard_colleges_unlock_at_six() {
        for sub in [MartialSubclass::CollegeOfSwords, MartialSubclass::CollegeOfValor] {
            assert_eq!(extra_attack_count(ClassName::Bard, 6, Some(sub)), 2);
        }
        assert_eq!(extra_attack_count(ClassName::Bard, 20, None), 1);
    }

    #[test]
    fn test_class_parsing_is_case_insensitive() {
        assert_eq!("FIGHTER".parse::<ClassName>().unwrap(), ClassName::Fighter);
        assert_eq!("monk".parse::<ClassName>().unwrap(), ClassName::Monk);
        assert_eq!(
            "Bladesinger".parse::<MartialSubclass>().unwrap(),
            MartialSubclass::Bladesinger
        );
        assert_eq!(
            "college of swords".parse::<MartialSubclass>().unwrap(),
            MartialSubclass::CollegeOfSwords
        );
        assert!("artificer".parse::<ClassName>().is_err());
    }

    #[test]
    fn test_two_light_weapons_grant_bonus_attack() {
        let weapons = vec![
            WeaponProfile::new("Shortsword", true),
            WeaponProfile::new("Dagger", true),
        ];
        assert_eq!(bonus_attack_count(&[], &weapons), 1);
    }

    #[test]
    fn test_heavy_pair_needs_dual_wielder() {
        let weapons = vec![
            WeaponProfile::new("Longsword", false),
            WeaponProfile::new("Warhammer", false),
        ];
        assert_eq!(bonus_attack_count(&[], &weapons), 0);
        assert_eq!(bonus_attack_count(&[Feat::DualWielder], &weapons), 1);
    }

    #[test]
    fn test_polearm_master_grants_bonus_attack() {
        let weapons = vec![WeaponProfile::new("Glaive", false)];
        assert_eq!(bonus_attack_count(&[Feat::PolearmMaster], &weapons), 1);
        // Qualifying polearm names are matched case-insensitively
        let weapons = vec![WeaponProfile::new("HALBERD", false)];
        assert_eq!(bonus_attack_count(&[Feat::PolearmMaster], &weapons), 1);
        // Without the feat the polearm grants nothing
        assert_eq!(bonus_attack_count(&[], &weapons), 0);
    }

    #[test]
    fn test_sources_do_not_stack() {
        // Quarterstaff + dagger with both feats: two-weapon fighting wins,
        // still a single bonus attack
        let weapons = vec![
            WeaponProfile::new("Quarterstaff", false),
            WeaponProfile::new("Dagger", true),
        ];
        let feats = [Feat::DualWielder, Feat::PolearmMaster];
        assert_eq!(bonus_attack_count(&feats, &weapons), 1);
    }
}
