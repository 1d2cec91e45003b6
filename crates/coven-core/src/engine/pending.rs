use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::pool::PoolItem;
use crate::worker::ActionToken;
use serde::{Deserialize, Serialize};

/// The one outstanding decision. Every variant carries enough context
/// to enumerate the legal responses without querying the engine again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingInput {
    pub seat: Seat,
    pub kind: PendingKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingKind {
    Declaration {
        hand: Vec<Card>,
        max: u8,
    },
    GraceHandSwap {
        hand: Vec<Card>,
        draw_available: usize,
        grace_cost: u32,
    },
    Seal {
        hand: Vec<Card>,
        count: usize,
    },
    ChooseCard {
        hand: Vec<Card>,
        legal: Vec<Card>,
    },
    Upgrade {
        pool: Vec<PoolItem>,
        /// Pool indices this seat may take right now.
        takeable: Vec<usize>,
        /// Items earlier pickers removed from this round's pool.
        taken: Vec<PoolItem>,
        decline_gold: i32,
    },
    FourthPlaceBonus {
        gold: i32,
        grace: u32,
    },
    WorkerActions {
        workers: u8,
        available: Vec<ActionToken>,
        recruit_cost: i32,
        can_recruit: bool,
    },
}

impl PendingKind {
    pub const fn label(&self) -> &'static str {
        match self {
            PendingKind::Declaration { .. } => "declaration",
            PendingKind::GraceHandSwap { .. } => "grace_hand_swap",
            PendingKind::Seal { .. } => "seal",
            PendingKind::ChooseCard { .. } => "choose_card",
            PendingKind::Upgrade { .. } => "upgrade",
            PendingKind::FourthPlaceBonus { .. } => "fourth_place_bonus",
            PendingKind::WorkerActions { .. } => "worker_actions",
        }
    }
}

/// One typed answer to a pending input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Response {
    Declaration(u8),
    /// Cards to discard and redraw; empty list declines at no cost.
    HandSwap(Vec<Card>),
    Seal(Vec<Card>),
    PlayCard(Card),
    Upgrade(UpgradeChoice),
    FourthPlaceBonus(ReliefChoice),
    WorkerActions(Vec<ActionToken>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeChoice {
    Take(usize),
    DeclineForGold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefChoice {
    Gold,
    Grace,
}
