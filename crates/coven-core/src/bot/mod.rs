use crate::engine::pending::{PendingInput, PendingKind, ReliefChoice, Response, UpgradeChoice};
use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::pool::{PoolItem, UpgradeCard, WitchCard};
use crate::worker::ActionToken;
use core::fmt;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Who answers a seat's pending inputs. A closed set: a human caller
/// via `submit`, or one of the built-in policies resolved in-engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatDriver {
    Human,
    Bot(BotPolicy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotPolicy {
    Balanced,
    Greedy,
    Cautious,
}

impl BotPolicy {
    pub const ALL: [BotPolicy; 3] = [BotPolicy::Balanced, BotPolicy::Greedy, BotPolicy::Cautious];
}

impl fmt::Display for BotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BotPolicy::Balanced => "balanced",
            BotPolicy::Greedy => "greedy",
            BotPolicy::Cautious => "cautious",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError(pub String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bot policy '{}'", self.0)
    }
}

impl std::error::Error for ParsePolicyError {}

impl std::str::FromStr for BotPolicy {
    type Err = ParsePolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(BotPolicy::Balanced),
            "greedy" => Ok(BotPolicy::Greedy),
            "cautious" => Ok(BotPolicy::Cautious),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// The slice of engine state a policy is allowed to see when deciding.
#[derive(Debug, Clone, Copy)]
pub struct BotView {
    pub seat: Seat,
    pub gold: i32,
    pub grace: u32,
    pub declared: Option<u8>,
    pub tricks_won: u8,
    pub active_workers: u8,
    /// Wage bill due at this round's settlement, before discounts.
    pub expected_wage: i32,
    pub recruit_cost: i32,
    pub recruited: bool,
    pub trade_yield: i32,
    pub hunt_yield: i32,
    pub pray_yield: u32,
}

impl BotPolicy {
    /// Produce a legal response for `pending`. Policies only choose from
    /// the context's legal sets; anything else halts the game as an
    /// engine-side contract violation.
    pub fn respond(
        &self,
        pending: &PendingInput,
        view: &BotView,
        rng: &mut StdRng,
    ) -> Response {
        let response = match &pending.kind {
            PendingKind::Declaration { hand, max } => {
                Response::Declaration(self.declare(hand, *max))
            }
            PendingKind::GraceHandSwap {
                hand,
                draw_available,
                ..
            } => Response::HandSwap(self.swap_picks(hand, *draw_available)),
            PendingKind::Seal { hand, count } => Response::Seal(seal_picks(hand, *count)),
            PendingKind::ChooseCard { legal, .. } => {
                Response::PlayCard(self.choose_card(legal, view, rng))
            }
            PendingKind::Upgrade { pool, takeable, .. } => {
                Response::Upgrade(self.pick_upgrade(pool, takeable, view))
            }
            PendingKind::FourthPlaceBonus { .. } => {
                Response::FourthPlaceBonus(self.relief_choice(view))
            }
            PendingKind::WorkerActions {
                workers,
                available,
                can_recruit,
                ..
            } => Response::WorkerActions(self.allocate_workers(
                *workers,
                available,
                *can_recruit,
                view,
            )),
        };
        log_decision(self, pending, &response);
        response
    }

    /// Declared target from hand strength: trumps plus high ranks.
    fn declare(&self, hand: &[Card], max: u8) -> u8 {
        let strength = hand
            .iter()
            .filter(|card| {
                card.is_trump() || card.rank().map(|rank| rank.value() >= 11).unwrap_or(false)
            })
            .count() as u8;
        let target = match self {
            BotPolicy::Balanced => strength,
            BotPolicy::Greedy => strength.saturating_add(1),
            BotPolicy::Cautious => strength.saturating_sub(1),
        };
        target.min(max)
    }

    /// Only the cautious policy spends grace on a swap, and only to
    /// shed rank-3-or-lower cards.
    fn swap_picks(&self, hand: &[Card], draw_available: usize) -> Vec<Card> {
        match self {
            BotPolicy::Cautious => hand
                .iter()
                .copied()
                .filter(|card| card.rank().map(|rank| rank.value() <= 3).unwrap_or(false))
                .take(draw_available.min(2))
                .collect(),
            BotPolicy::Balanced | BotPolicy::Greedy => Vec::new(),
        }
    }

    fn choose_card(&self, legal: &[Card], view: &BotView, rng: &mut StdRng) -> Card {
        let gap = view.declared.unwrap_or(0) as i32 - view.tricks_won as i32;
        let chasing = match self {
            BotPolicy::Greedy => true,
            BotPolicy::Balanced | BotPolicy::Cautious => gap > 0,
        };
        let choice = if chasing {
            if matches!(self, BotPolicy::Cautious) {
                // Chase with suited strength first; trumps are a last
                // resort the cautious policy saves.
                strongest(legal.iter().copied().filter(|card| !card.is_trump()))
                    .or_else(|| strongest(legal.iter().copied()))
            } else {
                strongest(legal.iter().copied())
            }
        } else {
            weakest_random(legal, rng)
        };
        // The engine never offers an empty legal set.
        choice.unwrap_or(Card::Trump)
    }

    fn pick_upgrade(&self, pool: &[PoolItem], takeable: &[usize], view: &BotView) -> UpgradeChoice {
        if view.gold < view.expected_wage {
            return UpgradeChoice::DeclineForGold;
        }
        takeable
            .iter()
            .copied()
            .filter(|&index| index < pool.len())
            .min_by_key(|&index| self.preference(pool[index]))
            .map(UpgradeChoice::Take)
            .unwrap_or(UpgradeChoice::DeclineForGold)
    }

    /// Draft preference: lower is better.
    fn preference(&self, item: PoolItem) -> usize {
        let order: &[PoolItem] = match self {
            BotPolicy::Balanced => &[
                PoolItem::Upgrade(UpgradeCard::TradePost),
                PoolItem::Upgrade(UpgradeCard::HuntContract),
                PoolItem::Upgrade(UpgradeCard::PrayerCircle),
                PoolItem::Upgrade(UpgradeCard::GoldCache),
                PoolItem::Upgrade(UpgradeCard::WageCharm),
                PoolItem::Upgrade(UpgradeCard::DoubleHire),
                PoolItem::Upgrade(UpgradeCard::GraceBoon),
                PoolItem::Witch(WitchCard::Blackroad),
                PoolItem::Witch(WitchCard::Bloodhunt),
                PoolItem::Witch(WitchCard::Herd),
                PoolItem::Witch(WitchCard::Barrier),
                PoolItem::Witch(WitchCard::Inspector),
                PoolItem::Witch(WitchCard::Ritualist),
            ],
            BotPolicy::Greedy => &[
                PoolItem::Upgrade(UpgradeCard::HuntContract),
                PoolItem::Upgrade(UpgradeCard::TradePost),
                PoolItem::Upgrade(UpgradeCard::DoubleHire),
                PoolItem::Upgrade(UpgradeCard::GoldCache),
                PoolItem::Upgrade(UpgradeCard::PrayerCircle),
                PoolItem::Upgrade(UpgradeCard::WageCharm),
                PoolItem::Upgrade(UpgradeCard::GraceBoon),
                PoolItem::Witch(WitchCard::Bloodhunt),
                PoolItem::Witch(WitchCard::Blackroad),
                PoolItem::Witch(WitchCard::Barrier),
                PoolItem::Witch(WitchCard::Herd),
                PoolItem::Witch(WitchCard::Ritualist),
                PoolItem::Witch(WitchCard::Inspector),
            ],
            BotPolicy::Cautious => &[
                PoolItem::Upgrade(UpgradeCard::TradePost),
                PoolItem::Upgrade(UpgradeCard::PrayerCircle),
                PoolItem::Upgrade(UpgradeCard::GoldCache),
                PoolItem::Upgrade(UpgradeCard::GraceBoon),
                PoolItem::Upgrade(UpgradeCard::WageCharm),
                PoolItem::Upgrade(UpgradeCard::HuntContract),
                PoolItem::Upgrade(UpgradeCard::DoubleHire),
                PoolItem::Witch(WitchCard::Barrier),
                PoolItem::Witch(WitchCard::Herd),
                PoolItem::Witch(WitchCard::Blackroad),
                PoolItem::Witch(WitchCard::Inspector),
                PoolItem::Witch(WitchCard::Ritualist),
                PoolItem::Witch(WitchCard::Bloodhunt),
            ],
        };
        order
            .iter()
            .position(|&candidate| candidate == item)
            .unwrap_or(order.len())
    }

    fn relief_choice(&self, view: &BotView) -> ReliefChoice {
        if view.gold < view.expected_wage {
            return ReliefChoice::Gold;
        }
        match self {
            BotPolicy::Greedy => ReliefChoice::Gold,
            BotPolicy::Cautious => ReliefChoice::Grace,
            // Chase the first grace threshold, then bank gold.
            BotPolicy::Balanced => {
                if view.grace < 4 {
                    ReliefChoice::Grace
                } else {
                    ReliefChoice::Gold
                }
            }
        }
    }

    /// Ordered token list: trade out of a wage shortfall first, recruit
    /// when the surplus allows, then score by temperament.
    fn allocate_workers(
        &self,
        workers: u8,
        available: &[ActionToken],
        can_recruit: bool,
        view: &BotView,
    ) -> Vec<ActionToken> {
        let mut tokens = Vec::with_capacity(workers as usize);
        let mut projected = view.gold;
        let mut recruited = view.recruited;
        let mut ritual_used = false;
        for slot in 0..workers {
            if projected < view.expected_wage {
                tokens.push(ActionToken::Trade);
                projected += view.trade_yield;
            } else if can_recruit
                && !recruited
                && !matches!(self, BotPolicy::Cautious)
                && projected >= view.recruit_cost + view.expected_wage
            {
                tokens.push(ActionToken::Recruit);
                projected -= view.recruit_cost;
                recruited = true;
            } else if !ritual_used
                && available.contains(&ActionToken::Ritual)
                && !matches!(self, BotPolicy::Cautious)
            {
                tokens.push(ActionToken::Ritual);
                ritual_used = true;
            } else {
                let token = match self {
                    BotPolicy::Greedy => ActionToken::Hunt,
                    BotPolicy::Balanced => {
                        if slot % 2 == 0 {
                            ActionToken::Hunt
                        } else {
                            ActionToken::Pray
                        }
                    }
                    BotPolicy::Cautious => {
                        if slot % 2 == 0 {
                            ActionToken::Pray
                        } else {
                            ActionToken::Hunt
                        }
                    }
                };
                tokens.push(token);
            }
        }
        tokens
    }
}

fn card_strength(card: Card) -> (u8, u8) {
    (
        card.is_trump() as u8,
        card.rank().map(|rank| rank.value()).unwrap_or(0),
    )
}

fn strongest(cards: impl Iterator<Item = Card>) -> Option<Card> {
    cards.max_by_key(|&card| card_strength(card))
}

/// Weakest card, breaking ties through the dedicated bot RNG stream so
/// identical seeds keep identical trajectories.
fn weakest_random(legal: &[Card], rng: &mut StdRng) -> Option<Card> {
    let min = legal.iter().copied().map(card_strength).min()?;
    let ties: Vec<Card> = legal
        .iter()
        .copied()
        .filter(|&card| card_strength(card) == min)
        .collect();
    let index = rng.gen_range(0..ties.len());
    ties.get(index).copied()
}

fn seal_picks(hand: &[Card], count: usize) -> Vec<Card> {
    let mut cards = hand.to_vec();
    // Seal the lowest suited ranks; give up trumps only when forced.
    cards.sort_by_key(|&card| card_strength(card));
    cards.truncate(count);
    cards
}

fn log_decision(policy: &BotPolicy, pending: &PendingInput, response: &Response) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "coven_bot::policy",
        Level::DEBUG,
        seat = %pending.seat,
        policy = %policy,
        kind = pending.kind.label(),
        response = ?response
    );
}
