//! Between-level shop: stock generation and purchases

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::catalog::{Tier, WeaponKind};
use super::events::GameEvent;
use super::player::InventoryError;
use super::state::{GamePhase, World};
use super::weapon::Weapon;

pub const HEALTH_POTION_PRICE: u32 = 50;
pub const SHIELD_BOOST_PRICE: u32 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "camelCase")]
pub enum ShopItem {
    Weapon {
        kind: WeaponKind,
        tier: Tier,
        price: u32,
    },
    /// Restores one health
    HealthPotion,
    /// Refills the shield
    ShieldBoost,
}

impl ShopItem {
    pub fn price(&self) -> u32 {
        match self {
            ShopItem::Weapon { price, .. } => *price,
            ShopItem::HealthPotion => HEALTH_POTION_PRICE,
            ShopItem::ShieldBoost => SHIELD_BOOST_PRICE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopError {
    /// The shop is closed
    PhaseMismatch,
    NoSuchItem(usize),
    InsufficientGold { price: u32, gold: u32 },
    Inventory(InventoryError),
    NoSuchPlayer(usize),
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::PhaseMismatch => write!(f, "shop is not open"),
            ShopError::NoSuchItem(index) => write!(f, "no shop item at {index}"),
            ShopError::InsufficientGold { price, gold } => {
                write!(f, "costs {price} gold, only {gold} available")
            }
            ShopError::Inventory(err) => write!(f, "{err}"),
            ShopError::NoSuchPlayer(index) => write!(f, "no player {index}"),
        }
    }
}

impl std::error::Error for ShopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShopError::Inventory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InventoryError> for ShopError {
    fn from(err: InventoryError) -> Self {
        ShopError::Inventory(err)
    }
}

/// Number of weapon archetypes stocked at `level`
pub fn weapon_count(level: u32) -> usize {
    (3 + level as usize / 3).min(WeaponKind::ALL.len())
}

pub fn unlocked_tiers(level: u32) -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|tier| tier.unlock_level() <= level)
        .collect()
}

/// Stock for one shop visit, shuffled
pub fn stock(level: u32, rng: &mut impl Rng) -> Vec<ShopItem> {
    let tiers = unlocked_tiers(level);
    let mut items: Vec<ShopItem> = WeaponKind::ALL[..weapon_count(level)]
        .iter()
        .map(|&kind| {
            let tier = tiers
                .get(rng.random_range(0..tiers.len().max(1)))
                .copied()
                .unwrap_or(Tier::Common);
            let price = (kind.archetype().price as f32 * tier.multiplier()).round() as u32;
            ShopItem::Weapon { kind, tier, price }
        })
        .collect();
    items.push(ShopItem::HealthPotion);
    items.push(ShopItem::ShieldBoost);
    items.shuffle(rng);
    items
}

/// Buy item `index` for player `player`
///
/// Gold is only spent when the item was actually delivered. Items stay in
/// stock after a purchase.
pub fn buy(world: &mut World, player: usize, index: usize) -> Result<ShopItem, ShopError> {
    if world.phase != GamePhase::Shop {
        return Err(ShopError::PhaseMismatch);
    }
    let item = *world
        .shop_stock
        .get(index)
        .ok_or(ShopError::NoSuchItem(index))?;
    let gold = world.ledger.gold;
    let price = item.price();
    if gold < price {
        return Err(ShopError::InsufficientGold { price, gold });
    }
    let buyer = world
        .players
        .get_mut(player)
        .ok_or(ShopError::NoSuchPlayer(player))?;

    match item {
        ShopItem::Weapon { kind, tier, .. } => {
            let merged = buyer.add_weapon(Weapon::new(kind, tier))?;
            for weapon in merged {
                log::info!("Player {player}: merged into {} {:?}", weapon.tier.name(), weapon.kind);
                world.events.push(GameEvent::WeaponMerged {
                    player,
                    weapon: weapon.kind,
                    tier: weapon.tier,
                });
            }
        }
        ShopItem::HealthPotion => buyer.add_health(1.0),
        ShopItem::ShieldBoost => {
            let max = buyer.max_shield;
            buyer.add_shield(max);
        }
    }
    world.ledger.gold -= price;
    log::info!("Player {player} bought {item:?} for {price} gold");
    Ok(item)
}
