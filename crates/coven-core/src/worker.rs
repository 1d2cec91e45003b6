use crate::config::GameConfig;
use crate::model::player::PlayerLedger;
use crate::pool::WitchCard;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Action tokens a worker can be placed on. DONATE and RITUAL stay
/// locked until the matching witch is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionToken {
    Trade,
    Hunt,
    Recruit,
    Pray,
    Donate,
    Ritual,
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionToken::Trade => "TRADE",
            ActionToken::Hunt => "HUNT",
            ActionToken::Recruit => "RECRUIT",
            ActionToken::Pray => "PRAY",
            ActionToken::Donate => "DONATE",
            ActionToken::Ritual => "RITUAL",
        };
        f.write_str(name)
    }
}

/// Why a submitted allocation was rejected. Checked by simulating the
/// token list in order, so affordability accounts for earlier tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    TooManyTokens { submitted: usize, available: u8 },
    RecruitLimit,
    CannotAfford(ActionToken),
    Locked(ActionToken),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::TooManyTokens {
                submitted,
                available,
            } => write!(f, "{submitted} tokens submitted but only {available} workers"),
            AllocationError::RecruitLimit => write!(f, "RECRUIT is limited to once per round"),
            AllocationError::CannotAfford(token) => write!(f, "cannot afford {token}"),
            AllocationError::Locked(token) => write!(f, "{token} is not unlocked"),
        }
    }
}

impl std::error::Error for AllocationError {}

/// Tokens this seat could place right now, for the pending-input context.
pub fn available_actions(player: &PlayerLedger, config: &GameConfig) -> Vec<ActionToken> {
    let mut actions = vec![ActionToken::Trade, ActionToken::Hunt, ActionToken::Pray];
    if player.gold >= config.recruit_cost && !player.round.recruited {
        actions.push(ActionToken::Recruit);
    }
    if player.donate_unlocked && player.grace >= config.donate_grace_cost {
        actions.push(ActionToken::Donate);
    }
    if player.ritual_unlocked && player.grace >= config.ritual_grace_cost {
        actions.push(ActionToken::Ritual);
    }
    actions
}

pub fn validate_allocation(
    player: &PlayerLedger,
    tokens: &[ActionToken],
    config: &GameConfig,
) -> Result<(), AllocationError> {
    let available = player.active_workers();
    if tokens.len() > available as usize {
        return Err(AllocationError::TooManyTokens {
            submitted: tokens.len(),
            available,
        });
    }

    let mut gold = player.gold;
    let mut grace = player.grace;
    let mut recruited = player.round.recruited;
    for &token in tokens {
        match token {
            ActionToken::Trade => gold += player.trade_yield(config),
            ActionToken::Hunt => {}
            ActionToken::Pray => grace += player.pray_yield(config),
            ActionToken::Recruit => {
                if recruited {
                    return Err(AllocationError::RecruitLimit);
                }
                if gold < config.recruit_cost {
                    return Err(AllocationError::CannotAfford(token));
                }
                gold -= config.recruit_cost;
                recruited = true;
            }
            ActionToken::Donate => {
                if !player.donate_unlocked {
                    return Err(AllocationError::Locked(token));
                }
                if grace < config.donate_grace_cost {
                    return Err(AllocationError::CannotAfford(token));
                }
                grace -= config.donate_grace_cost;
                gold += config.donate_gold_gain;
            }
            ActionToken::Ritual => {
                if !player.ritual_unlocked {
                    return Err(AllocationError::Locked(token));
                }
                if grace < config.ritual_grace_cost {
                    return Err(AllocationError::CannotAfford(token));
                }
                grace -= config.ritual_grace_cost;
            }
        }
    }
    Ok(())
}

/// Resolve a validated allocation in order. Returns one log line per
/// token so every mutation stays attributed.
pub fn resolve_allocation(
    player: &mut PlayerLedger,
    tokens: &[ActionToken],
    config: &GameConfig,
) -> Vec<String> {
    let seat = player.seat;
    let mut events = Vec::with_capacity(tokens.len());
    for &token in tokens {
        match token {
            ActionToken::Trade => {
                let gain = player.trade_yield(config);
                player.gold += gain;
                events.push(format!("{seat} trades for {gain} gold"));
            }
            ActionToken::Hunt => {
                let gain = player.hunt_yield(config);
                player.vp += gain;
                events.push(format!("{seat} hunts for {gain} VP"));
            }
            ActionToken::Pray => {
                let gain = player.pray_yield(config);
                player.grace += gain;
                events.push(format!("{seat} prays for {gain} grace"));
            }
            ActionToken::Recruit => {
                let hires = if player.double_hire { 2 } else { 1 };
                player.gold -= config.recruit_cost;
                player.pending_hires += hires;
                player.round.recruited = true;
                events.push(format!(
                    "{seat} pays {} gold to recruit {hires} worker(s)",
                    config.recruit_cost
                ));
            }
            ActionToken::Donate => {
                player.grace -= config.donate_grace_cost;
                player.gold += config.donate_gold_gain;
                events.push(format!(
                    "{seat} donates {} grace for {} gold",
                    config.donate_grace_cost, config.donate_gold_gain
                ));
            }
            ActionToken::Ritual => {
                player.grace -= config.ritual_grace_cost;
                player.vp += config.ritual_vp_gain;
                events.push(format!(
                    "{seat} performs a ritual: {} grace for {} VP",
                    config.ritual_grace_cost, config.ritual_vp_gain
                ));
            }
        }
    }
    events
}

/// Result of one seat's wage settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WageOutcome {
    pub income: i32,
    pub wage_net: i32,
    pub debt_penalty: i32,
}

/// Charge wages for basic workers (hired workers are wage-free), apply
/// witch income and discounts, and convert any resulting debt into a VP
/// penalty. Gold stays negative; the debt carries into the next round.
pub fn settle_wages(player: &mut PlayerLedger, round_no: u32, config: &GameConfig) -> WageOutcome {
    let mut income = 0;
    if player.holds_witch(WitchCard::Blackroad) {
        income += 1;
    }
    player.gold += income;

    let rate = config.wage_curve[round_no as usize];
    let gross = rate * player.basic_workers as i32;
    let mut discount = 0;
    if player.holds_witch(WitchCard::Barrier) {
        discount += 1;
    }
    if player.wage_charm && player.round.recruited {
        discount += 1;
    }
    let wage_net = (gross - discount).max(0);
    player.gold -= wage_net;

    let mut debt_penalty = 0;
    if player.gold < 0 {
        debt_penalty = config.debt_vp_per_gold * -player.gold;
        if let Some(cap) = config.debt_vp_cap {
            debt_penalty = debt_penalty.min(cap);
        }
        player.vp -= debt_penalty;
    }

    WageOutcome {
        income,
        wage_net,
        debt_penalty,
    }
}
