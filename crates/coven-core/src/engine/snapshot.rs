use crate::engine::pending::PendingInput;
use crate::model::card::Card;
use crate::model::player::PlayerLedger;
use crate::model::seat::Seat;
use crate::model::trick::Play;
use crate::pool::{PoolItem, WitchCard};
use serde::Serialize;

/// Immutable, serializable view of one game instance. Everything a
/// front-end renders comes from here; nothing in it aliases engine
/// state.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub round_no: u32,
    pub phase: &'static str,
    pub players: [PlayerView; 4],
    pub pool: Vec<PoolItem>,
    pub trick_history: Vec<TrickRecord>,
    pub current_plays: Vec<Play>,
    pub log: Vec<String>,
    pub pending_input: Option<PendingInput>,
    pub game_over: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub seat: Seat,
    pub gold: i32,
    pub vp: i32,
    pub grace: u32,
    pub basic_workers: u8,
    pub hired_workers: u8,
    pub trade_level: u8,
    pub hunt_level: u8,
    pub pray_level: u8,
    pub declared: Option<u8>,
    pub tricks_won: u8,
    pub hand: Vec<Card>,
    pub witches: Vec<WitchCard>,
}

impl GameSnapshot {
    /// Wire form for front-ends and transports.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl PlayerView {
    pub(crate) fn of(player: &PlayerLedger) -> Self {
        Self {
            seat: player.seat,
            gold: player.gold,
            vp: player.vp,
            grace: player.grace,
            basic_workers: player.basic_workers,
            hired_workers: player.hired_workers,
            trade_level: player.trade_level,
            hunt_level: player.hunt_level,
            pray_level: player.pray_level,
            declared: player.round.declared,
            tricks_won: player.round.tricks_won,
            hand: player.round.hand.cards().to_vec(),
            witches: player.witches.clone(),
        }
    }
}

/// A finished trick, archived per round.
#[derive(Debug, Clone, Serialize)]
pub struct TrickRecord {
    pub trick_no: usize,
    pub plays: Vec<Play>,
    pub winner: Seat,
}
