//! Level-up perks
//!
//! Perks are plain data: an [`PerkEffect`] descriptor applied through
//! [`PerkEffect::apply`], which maps one stat profile to the next.

use serde::{Deserialize, Serialize};

use super::stats::{StatsProfile, WeaponType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// What a perk does to the stat profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PerkEffect {
    /// Switch weapon with a fixed loadout
    EquipWeapon {
        weapon: WeaponType,
        damage: f32,
        fire_rate: f32,
        spread: Option<f32>,
    },
    ScaleDamage(f32),
    /// Raise max HP (the player is healed to the new max)
    AddMaxHp(f32),
    /// Multiply the fire interval, never below `floor` frames
    ScaleFireRate { factor: f32, floor: f32 },
    GrantShield,
    AddLifesteal(f32),
    AddCritChance(f32),
    EnableHoming,
    EnableLowHpBoost,
}

impl PerkEffect {
    pub fn apply(&self, stats: &StatsProfile) -> StatsProfile {
        let mut next = stats.clone();
        match *self {
            PerkEffect::EquipWeapon {
                weapon,
                damage,
                fire_rate,
                spread,
            } => {
                next.weapon = weapon;
                next.damage = damage;
                next.fire_rate = fire_rate;
                if let Some(spread) = spread {
                    next.spread = spread;
                }
            }
            PerkEffect::ScaleDamage(factor) => next.damage *= factor,
            PerkEffect::AddMaxHp(amount) => next.max_hp += amount,
            PerkEffect::ScaleFireRate { factor, floor } => {
                next.fire_rate = (next.fire_rate * factor).max(floor);
            }
            PerkEffect::GrantShield => next.has_shield = true,
            PerkEffect::AddLifesteal(amount) => next.lifesteal += amount,
            PerkEffect::AddCritChance(amount) => next.crit_chance += amount,
            PerkEffect::EnableHoming => next.homing = true,
            PerkEffect::EnableLowHpBoost => next.low_hp_damage_boost = true,
        }
        next
    }

    /// Whether applying this effect should refill the player's hp
    pub fn heals_to_full(&self) -> bool {
        matches!(self, PerkEffect::AddMaxHp(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Perk {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub effect: PerkEffect,
}

/// Every perk that can be offered on level-up
pub const PERKS: &[Perk] = &[
    Perk {
        id: "plasma_cannon",
        name: "Plasma Cannon",
        description: "Fires massive energy balls.",
        rarity: Rarity::Legendary,
        effect: PerkEffect::EquipWeapon {
            weapon: WeaponType::PlasmaCannon,
            damage: 60.0,
            fire_rate: 18.0,
            spread: None,
        },
    },
    Perk {
        id: "railgun",
        name: "Railgun Prototype",
        description: "Piercing high-velocity rounds.",
        rarity: Rarity::Legendary,
        effect: PerkEffect::EquipWeapon {
            weapon: WeaponType::Railgun,
            damage: 45.0,
            fire_rate: 25.0,
            spread: None,
        },
    },
    Perk {
        id: "grenade_launcher",
        name: "Grenade Module",
        description: "Lob explosive rounds.",
        rarity: Rarity::Legendary,
        effect: PerkEffect::EquipWeapon {
            weapon: WeaponType::GrenadeLauncher,
            damage: 80.0,
            fire_rate: 35.0,
            spread: None,
        },
    },
    Perk {
        id: "damage_up",
        name: "High-Voltage Amp",
        description: "Increase damage by 30%.",
        rarity: Rarity::Common,
        effect: PerkEffect::ScaleDamage(1.3),
    },
    Perk {
        id: "cyber_heart",
        name: "Titanium Skeleton",
        description: "Increase Max HP by 50 and full heal.",
        rarity: Rarity::Rare,
        effect: PerkEffect::AddMaxHp(50.0),
    },
    Perk {
        id: "scatter_shot",
        name: "Flak Module",
        description: "Unlock spread fire shotgun mode.",
        rarity: Rarity::Rare,
        effect: PerkEffect::EquipWeapon {
            weapon: WeaponType::Shotgun,
            damage: 25.0,
            fire_rate: 25.0,
            spread: Some(0.35),
        },
    },
    Perk {
        id: "rapid_fire",
        name: "Overclocked CPU",
        description: "Fire rate increased by 40%.",
        rarity: Rarity::Rare,
        effect: PerkEffect::ScaleFireRate {
            factor: 0.6,
            floor: 3.0,
        },
    },
    Perk {
        id: "shield_generator",
        name: "Energy Barrier",
        description: "Absorb one hit.",
        rarity: Rarity::Common,
        effect: PerkEffect::GrantShield,
    },
    Perk {
        id: "vampirism",
        name: "Vampiric Nanobots",
        description: "Heal 2 HP for every enemy killed.",
        rarity: Rarity::Legendary,
        effect: PerkEffect::AddLifesteal(2.0),
    },
    Perk {
        id: "crit_lens",
        name: "Critical Lens",
        description: "20% chance to deal Double Damage.",
        rarity: Rarity::Rare,
        effect: PerkEffect::AddCritChance(0.2),
    },
    Perk {
        id: "homing_tech",
        name: "Smart Targeting",
        description: "Projectiles slightly home in on enemies.",
        rarity: Rarity::Legendary,
        effect: PerkEffect::EnableHoming,
    },
    Perk {
        id: "adrenaline",
        name: "Adrenaline Pump",
        description: "Deal more damage when health is low.",
        rarity: Rarity::Rare,
        effect: PerkEffect::EnableLowHpBoost,
    },
];

/// Look up a perk by id
pub fn find_perk(id: &str) -> Option<&'static Perk> {
    PERKS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in PERKS.iter().enumerate() {
            for b in &PERKS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        assert_eq!(PERKS.len(), 12);
    }

    #[test]
    fn test_apply_is_pure() {
        let stats = StatsProfile::default();
        let perk = find_perk("damage_up").unwrap();
        let next = perk.effect.apply(&stats);
        assert_eq!(stats.damage, 25.0);
        assert!((next.damage - 32.5).abs() < 1e-4);
        // Same input, same output
        assert_eq!(perk.effect.apply(&stats), next);
    }

    #[test]
    fn test_rapid_fire_floor() {
        let mut stats = StatsProfile::default();
        stats.fire_rate = 4.0;
        let next = find_perk("rapid_fire").unwrap().effect.apply(&stats);
        assert_eq!(next.fire_rate, 3.0);
    }

    #[test]
    fn test_scatter_shot_sets_spread() {
        let next = find_perk("scatter_shot").unwrap().effect.apply(&StatsProfile::default());
        assert_eq!(next.weapon, WeaponType::Shotgun);
        assert_eq!(next.spread, 0.35);
        assert_eq!(next.fire_rate, 25.0);
    }

    #[test]
    fn test_effect_serializes() {
        let json = serde_json::to_string(&PerkEffect::AddCritChance(0.2)).unwrap();
        let back: PerkEffect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PerkEffect::AddCritChance(0.2));
    }
}
