use crate::config::GameConfig;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use crate::pool::WitchCard;

/// Per-seat ledger. Resources persist for the whole game; the round
/// block is cleared at every round start.
#[derive(Debug, Clone)]
pub struct PlayerLedger {
    pub seat: Seat,
    pub gold: i32,
    pub vp: i32,
    pub grace: u32,
    pub basic_workers: u8,
    pub hired_workers: u8,
    /// Recruits gained this round; they start working at round end.
    pub pending_hires: u8,
    pub trade_level: u8,
    pub hunt_level: u8,
    pub pray_level: u8,
    pub donate_unlocked: bool,
    pub ritual_unlocked: bool,
    pub double_hire: bool,
    pub wage_charm: bool,
    pub witches: Vec<WitchCard>,
    pub round: RoundLedger,
}

/// Transient per-round fields.
#[derive(Debug, Clone, Default)]
pub struct RoundLedger {
    pub hand: Hand,
    pub sealed: Vec<Card>,
    pub declared: Option<u8>,
    pub tricks_won: u8,
    pub recruited: bool,
    pub swapped: bool,
}

impl PlayerLedger {
    pub fn new(seat: Seat, config: &GameConfig) -> Self {
        Self {
            seat,
            gold: config.start_gold,
            vp: 0,
            grace: 0,
            basic_workers: config.start_workers,
            hired_workers: 0,
            pending_hires: 0,
            trade_level: 0,
            hunt_level: 0,
            pray_level: 0,
            donate_unlocked: false,
            ritual_unlocked: false,
            double_hire: false,
            wage_charm: false,
            witches: Vec::new(),
            round: RoundLedger::default(),
        }
    }

    /// Workers that may act this round. Pending hires sit out until the
    /// round ends.
    pub fn active_workers(&self) -> u8 {
        self.basic_workers + self.hired_workers
    }

    pub fn holds_witch(&self, witch: WitchCard) -> bool {
        self.witches.contains(&witch)
    }

    pub fn trade_yield(&self, config: &GameConfig) -> i32 {
        config.trade_base + self.trade_level as i32
    }

    pub fn hunt_yield(&self, config: &GameConfig) -> i32 {
        let witch_bonus = if self.holds_witch(WitchCard::Bloodhunt) {
            1
        } else {
            0
        };
        config.hunt_base + self.hunt_level as i32 + witch_bonus
    }

    pub fn pray_yield(&self, config: &GameConfig) -> u32 {
        config.pray_base + self.pray_level as u32
    }

    pub fn reset_round(&mut self) {
        self.round = RoundLedger::default();
    }

    /// Activate this round's recruits; called after wage settlement.
    pub fn activate_hires(&mut self) -> u8 {
        let activated = self.pending_hires;
        self.hired_workers += activated;
        self.pending_hires = 0;
        activated
    }
}
