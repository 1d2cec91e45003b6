use crate::config::GameConfig;
use crate::model::player::PlayerLedger;
use core::fmt;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Draftable modifier cards revealed on regular rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeCard {
    /// Trade level +1.
    TradePost,
    /// Hunt level +1.
    HuntContract,
    /// Pray level +1.
    PrayerCircle,
    /// One-shot +3 gold.
    GoldCache,
    /// One-shot +2 grace.
    GraceBoon,
    /// Persistent: each recruit hires two workers.
    DoubleHire,
    /// Persistent: wage -1 on rounds the seat recruited.
    WageCharm,
}

/// One-round-only pool variant with persistent passive effects, revealed
/// at the configured witch round. A seat holds at most one copy of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WitchCard {
    /// +1 gold at every wage settlement.
    Blackroad,
    /// Hunt yield +1.
    Bloodhunt,
    /// +1 grace at every round end.
    Herd,
    /// Unlocks the RITUAL action.
    Ritualist,
    /// Unlocks the DONATE action.
    Inspector,
    /// Wage total -1 every round.
    Barrier,
}

impl WitchCard {
    pub const ALL: [WitchCard; 6] = [
        WitchCard::Blackroad,
        WitchCard::Bloodhunt,
        WitchCard::Herd,
        WitchCard::Ritualist,
        WitchCard::Inspector,
        WitchCard::Barrier,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolItem {
    Upgrade(UpgradeCard),
    Witch(WitchCard),
}

impl fmt::Display for UpgradeCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpgradeCard::TradePost => "Trade Post",
            UpgradeCard::HuntContract => "Hunt Contract",
            UpgradeCard::PrayerCircle => "Prayer Circle",
            UpgradeCard::GoldCache => "Gold Cache",
            UpgradeCard::GraceBoon => "Grace Boon",
            UpgradeCard::DoubleHire => "Double Hire",
            UpgradeCard::WageCharm => "Wage Charm",
        };
        f.write_str(name)
    }
}

impl fmt::Display for WitchCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WitchCard::Blackroad => "Witch of the Black Road",
            WitchCard::Bloodhunt => "Witch of the Blood Hunt",
            WitchCard::Herd => "Witch of the Herd",
            WitchCard::Ritualist => "Ritualist",
            WitchCard::Inspector => "Inspector",
            WitchCard::Barrier => "Barrier Weaver",
        };
        f.write_str(name)
    }
}

impl fmt::Display for PoolItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolItem::Upgrade(card) => card.fmt(f),
            PoolItem::Witch(card) => card.fmt(f),
        }
    }
}

/// Weighted bag for regular-round reveals. Level-ups dominate, utility
/// attachments stay scarce.
const UPGRADE_BAG: [(UpgradeCard, u8); 7] = [
    (UpgradeCard::TradePost, 6),
    (UpgradeCard::HuntContract, 6),
    (UpgradeCard::PrayerCircle, 4),
    (UpgradeCard::GoldCache, 3),
    (UpgradeCard::GraceBoon, 3),
    (UpgradeCard::DoubleHire, 2),
    (UpgradeCard::WageCharm, 2),
];

/// Reveal the round's pool. Regular rounds sample the weighted bag with
/// replacement; the witch round deals distinct witches instead.
pub fn reveal_pool(config: &GameConfig, round_no: u32, rng: &mut StdRng) -> Vec<PoolItem> {
    if round_no == config.witch_round {
        let mut witches = WitchCard::ALL.to_vec();
        witches.shuffle(rng);
        witches
            .into_iter()
            .take(config.pool_size.min(WitchCard::ALL.len()))
            .map(PoolItem::Witch)
            .collect()
    } else {
        let total: u32 = UPGRADE_BAG.iter().map(|&(_, w)| w as u32).sum();
        (0..config.pool_size)
            .map(|_| {
                let mut pick = rng.gen_range(0..total);
                for &(card, weight) in UPGRADE_BAG.iter() {
                    if pick < weight as u32 {
                        return PoolItem::Upgrade(card);
                    }
                    pick -= weight as u32;
                }
                unreachable!("weighted bag covers the sampled range")
            })
            .collect()
    }
}

/// Whether `player` may draft `item`. Level cards cap out; witches are
/// held at most once.
pub fn can_take(player: &PlayerLedger, item: PoolItem, config: &GameConfig) -> bool {
    match item {
        PoolItem::Upgrade(UpgradeCard::TradePost) => player.trade_level < config.max_action_level,
        PoolItem::Upgrade(UpgradeCard::HuntContract) => player.hunt_level < config.max_action_level,
        PoolItem::Upgrade(UpgradeCard::PrayerCircle) => player.pray_level < config.max_action_level,
        PoolItem::Upgrade(_) => true,
        PoolItem::Witch(witch) => !player.holds_witch(witch),
    }
}

/// Apply a drafted item. Exhaustive over the closed effect set: each
/// effect mutates the ledger exactly once and persists to game end.
pub fn apply(player: &mut PlayerLedger, item: PoolItem, config: &GameConfig) {
    match item {
        PoolItem::Upgrade(UpgradeCard::TradePost) => {
            player.trade_level = (player.trade_level + 1).min(config.max_action_level);
        }
        PoolItem::Upgrade(UpgradeCard::HuntContract) => {
            player.hunt_level = (player.hunt_level + 1).min(config.max_action_level);
        }
        PoolItem::Upgrade(UpgradeCard::PrayerCircle) => {
            player.pray_level = (player.pray_level + 1).min(config.max_action_level);
        }
        PoolItem::Upgrade(UpgradeCard::GoldCache) => {
            player.gold += 3;
        }
        PoolItem::Upgrade(UpgradeCard::GraceBoon) => {
            player.grace += 2;
        }
        PoolItem::Upgrade(UpgradeCard::DoubleHire) => {
            player.double_hire = true;
        }
        PoolItem::Upgrade(UpgradeCard::WageCharm) => {
            player.wage_charm = true;
        }
        PoolItem::Witch(witch) => {
            player.witches.push(witch);
            match witch {
                WitchCard::Ritualist => player.ritual_unlocked = true,
                WitchCard::Inspector => player.donate_unlocked = true,
                WitchCard::Blackroad
                | WitchCard::Bloodhunt
                | WitchCard::Herd
                | WitchCard::Barrier => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PoolItem, UpgradeCard, WitchCard, apply, can_take, reveal_pool};
    use crate::config::GameConfig;
    use crate::model::player::PlayerLedger;
    use crate::model::seat::Seat;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn regular_reveal_is_deterministic_for_a_seed() {
        let config = GameConfig::default();
        let a = reveal_pool(&config, 0, &mut StdRng::seed_from_u64(9));
        let b = reveal_pool(&config, 0, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.len(), config.pool_size);
        assert!(a.iter().all(|item| matches!(item, PoolItem::Upgrade(_))));
    }

    #[test]
    fn witch_round_reveals_distinct_witches() {
        let config = GameConfig::default();
        let pool = reveal_pool(&config, config.witch_round, &mut StdRng::seed_from_u64(3));
        assert_eq!(pool.len(), config.pool_size);
        for (i, item) in pool.iter().enumerate() {
            assert!(matches!(item, PoolItem::Witch(_)));
            assert!(!pool[..i].contains(item));
        }
    }

    #[test]
    fn level_cards_cap_at_max_level() {
        let config = GameConfig::default();
        let mut player = PlayerLedger::new(Seat::North, &config);
        let item = PoolItem::Upgrade(UpgradeCard::TradePost);
        assert!(can_take(&player, item, &config));
        apply(&mut player, item, &config);
        apply(&mut player, item, &config);
        assert_eq!(player.trade_level, 2);
        assert!(!can_take(&player, item, &config));
    }

    #[test]
    fn witches_are_held_once_and_set_unlock_flags() {
        let config = GameConfig::default();
        let mut player = PlayerLedger::new(Seat::East, &config);
        let item = PoolItem::Witch(WitchCard::Ritualist);
        apply(&mut player, item, &config);
        assert!(player.ritual_unlocked);
        assert!(!can_take(&player, item, &config));

        apply(&mut player, PoolItem::Witch(WitchCard::Inspector), &config);
        assert!(player.donate_unlocked);
    }

    #[test]
    fn one_shot_cards_pay_out_immediately() {
        let config = GameConfig::default();
        let mut player = PlayerLedger::new(Seat::South, &config);
        apply(&mut player, PoolItem::Upgrade(UpgradeCard::GoldCache), &config);
        apply(&mut player, PoolItem::Upgrade(UpgradeCard::GraceBoon), &config);
        assert_eq!(player.gold, config.start_gold + 3);
        assert_eq!(player.grace, 2);
    }
}
