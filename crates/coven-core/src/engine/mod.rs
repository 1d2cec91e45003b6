pub mod error;
pub mod pending;
pub mod snapshot;

use crate::bot::{BotView, SeatDriver};
use crate::config::GameConfig;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::PlayerLedger;
use crate::model::seat::Seat;
use crate::model::trick::Trick;
use crate::pool::{self, PoolItem, WitchCard};
use crate::worker;
use error::{EngineError, InputError, InvariantViolation};
use pending::{PendingInput, PendingKind, ReliefChoice, Response, UpgradeChoice};
use rand::SeedableRng;
use rand::rngs::StdRng;
use snapshot::{GameSnapshot, PlayerView, TrickRecord};
use std::cmp::Reverse;

/// Per-round seed derivation so every round reshuffles from scratch
/// while the whole game stays a pure function of one seed.
const ROUND_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;
/// Separate stream for bot decisions so rule randomness and policy
/// randomness never interleave.
const BOT_STREAM_SALT: u64 = 0xB07_5EED;

/// The single active phase. Cursors index the seat (or trick) the
/// machine is currently sweeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    RoundStart,
    Declaration { next: usize },
    HandSwap { next: usize },
    Seal { next: usize },
    Trick { trick_no: usize },
    UpgradePick { next: usize },
    ReliefBonus,
    WorkerPlacement { next: usize },
    WagePayment,
    GameEnd,
}

impl Phase {
    const fn label(self) -> &'static str {
        match self {
            Phase::RoundStart => "round_start",
            Phase::Declaration { .. } => "declaration",
            Phase::HandSwap { .. } => "hand_swap",
            Phase::Seal { .. } => "seal",
            Phase::Trick { .. } => "trick",
            Phase::UpgradePick { .. } => "upgrade_pick",
            Phase::ReliefBonus => "relief_bonus",
            Phase::WorkerPlacement { .. } => "worker_placement",
            Phase::WagePayment => "wage_payment",
            Phase::GameEnd => "game_end",
        }
    }
}

/// Deterministic state machine for one game instance. Pull-based: read
/// `snapshot`, answer the pending input via `submit`. Bot seats are
/// resolved internally, so callers only ever see human-facing decisions.
pub struct GameEngine {
    config: GameConfig,
    seed: u64,
    drivers: [SeatDriver; 4],
    players: [PlayerLedger; 4],
    round_no: u32,
    phase: Phase,
    /// First leader of the current round; fixed for sweep ordering.
    round_leader: Seat,
    /// Leader of the current trick (previous winner).
    leader: Seat,
    pool: Vec<PoolItem>,
    /// Items drafted out of this round's pool, in pick order.
    taken_pool: Vec<PoolItem>,
    pick_order: [Seat; 4],
    current_trick: Option<Trick>,
    trick_history: Vec<TrickRecord>,
    draw_pile: Deck,
    /// Per-seat dealt multiset, adjusted for hand swaps. Audited against
    /// sealed + played at every round end.
    dealt: [Vec<Card>; 4],
    played: [Vec<Card>; 4],
    log: Vec<String>,
    pending: Option<PendingInput>,
    bot_rng: StdRng,
    game_over: bool,
    halted: bool,
}

impl GameEngine {
    /// Validates the config, then advances until the first human-facing
    /// decision (or, with four bot seats, straight to game end).
    pub fn new(
        config: GameConfig,
        seed: u64,
        drivers: [SeatDriver; 4],
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let players = [
            PlayerLedger::new(Seat::North, &config),
            PlayerLedger::new(Seat::East, &config),
            PlayerLedger::new(Seat::South, &config),
            PlayerLedger::new(Seat::West, &config),
        ];
        let mut engine = Self {
            config,
            seed,
            drivers,
            players,
            round_no: 0,
            phase: Phase::RoundStart,
            round_leader: Seat::North,
            leader: Seat::North,
            pool: Vec::new(),
            taken_pool: Vec::new(),
            pick_order: Seat::LOOP,
            current_trick: None,
            trick_history: Vec::new(),
            draw_pile: Deck::build(0, 0),
            dealt: Default::default(),
            played: Default::default(),
            log: Vec::new(),
            pending: None,
            bot_rng: StdRng::seed_from_u64(seed ^ BOT_STREAM_SALT),
            game_over: false,
            halted: false,
        };
        engine.advance()?;
        Ok(engine)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            round_no: self.round_no,
            phase: self.phase.label(),
            players: [
                PlayerView::of(&self.players[0]),
                PlayerView::of(&self.players[1]),
                PlayerView::of(&self.players[2]),
                PlayerView::of(&self.players[3]),
            ],
            pool: self.pool.clone(),
            trick_history: self.trick_history.clone(),
            current_plays: self
                .current_trick
                .as_ref()
                .map(|trick| trick.plays().to_vec())
                .unwrap_or_default(),
            log: self.log.clone(),
            pending_input: self.pending.clone(),
            game_over: self.game_over,
        }
    }

    pub fn pending_input(&self) -> Option<&PendingInput> {
        self.pending.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn event_log(&self) -> &[String] {
        &self.log
    }

    pub fn players(&self) -> &[PlayerLedger; 4] {
        &self.players
    }

    /// Apply one response. Constraint violations return `InvalidInput`
    /// and leave state untouched; success advances through every
    /// non-interactive phase and bot decision before returning.
    pub fn submit(&mut self, seat: Seat, response: Response) -> Result<(), EngineError> {
        if self.halted {
            return Err(InvariantViolation::Halted.into());
        }
        let pending = self
            .pending
            .clone()
            .ok_or(InputError::NoPendingInput)?;
        if pending.seat != seat {
            return Err(InputError::WrongSeat {
                expected: pending.seat,
                actual: seat,
            }
            .into());
        }
        self.apply_response(&pending, response)
            .map_err(EngineError::from)?;
        self.pending = None;
        self.advance()
    }

    /// Run the machine until it parks on a human decision, finishes, or
    /// halts. Bot seats answer from the injected policy; a bot response
    /// failing validation is an invariant violation, not bad input.
    fn advance(&mut self) -> Result<(), EngineError> {
        while !self.game_over && !self.halted {
            match self.pending.take() {
                Some(pending) => match self.drivers[pending.seat.index()] {
                    SeatDriver::Human => {
                        self.pending = Some(pending);
                        return Ok(());
                    }
                    SeatDriver::Bot(policy) => {
                        let view = self.bot_view(pending.seat);
                        let response = policy.respond(&pending, &view, &mut self.bot_rng);
                        if let Err(error) = self.apply_response(&pending, response) {
                            self.halted = true;
                            let violation = InvariantViolation::BotContract {
                                seat: pending.seat,
                                error,
                            };
                            self.log.push(format!("HALT: {violation}"));
                            return Err(violation.into());
                        }
                    }
                },
                None => self.step()?,
            }
        }
        Ok(())
    }

    /// One non-interactive transition: either prompt the next seat or
    /// perform the phase's automatic work.
    fn step(&mut self) -> Result<(), EngineError> {
        match self.phase {
            Phase::RoundStart => {
                self.start_round();
                Ok(())
            }
            Phase::Declaration { next } => {
                if next == 4 {
                    self.phase = Phase::HandSwap { next: 0 };
                    return Ok(());
                }
                let seat = self.round_order()[next];
                let hand = self.players[seat.index()].round.hand.cards().to_vec();
                self.pending = Some(PendingInput {
                    seat,
                    kind: PendingKind::Declaration {
                        hand,
                        max: self.config.tricks_per_round as u8,
                    },
                });
                Ok(())
            }
            Phase::HandSwap { next } => {
                if next == 4 {
                    self.phase = Phase::Seal { next: 0 };
                    return Ok(());
                }
                let seat = self.round_order()[next];
                let player = &self.players[seat.index()];
                // Seats that cannot pay, or with nothing left to draw,
                // are skipped rather than prompted.
                if player.grace < self.config.hand_swap_cost || self.draw_pile.is_empty() {
                    self.phase = Phase::HandSwap { next: next + 1 };
                    return Ok(());
                }
                self.pending = Some(PendingInput {
                    seat,
                    kind: PendingKind::GraceHandSwap {
                        hand: player.round.hand.cards().to_vec(),
                        draw_available: self.draw_pile.len(),
                        grace_cost: self.config.hand_swap_cost,
                    },
                });
                Ok(())
            }
            Phase::Seal { next } => {
                if next == 4 {
                    self.phase = Phase::Trick { trick_no: 0 };
                    self.leader = self.round_leader;
                    return Ok(());
                }
                let seat = self.round_order()[next];
                let hand = self.players[seat.index()].round.hand.cards().to_vec();
                self.pending = Some(PendingInput {
                    seat,
                    kind: PendingKind::Seal {
                        hand,
                        count: self.config.seal_count(),
                    },
                });
                Ok(())
            }
            Phase::Trick { trick_no } => {
                if trick_no == self.config.tricks_per_round {
                    self.score_round();
                    self.phase = Phase::UpgradePick { next: 0 };
                    return Ok(());
                }
                if self.current_trick.is_none() {
                    self.current_trick = Some(Trick::new(self.leader));
                }
                let seat = self
                    .current_trick
                    .as_ref()
                    .map(|trick| trick.expected_seat())
                    .unwrap_or(self.leader);
                let legal = self.legal_cards(seat);
                let hand = self.players[seat.index()].round.hand.cards().to_vec();
                self.pending = Some(PendingInput {
                    seat,
                    kind: PendingKind::ChooseCard { hand, legal },
                });
                Ok(())
            }
            Phase::UpgradePick { next } => {
                if next == 4 {
                    self.phase = Phase::ReliefBonus;
                    return Ok(());
                }
                let seat = self.pick_order[next];
                if self.pool.is_empty() {
                    // No item to choose: the decline payout is forced.
                    self.players[seat.index()].gold += self.config.decline_gold;
                    self.log.push(format!(
                        "{seat} finds the pool empty and takes {} gold",
                        self.config.decline_gold
                    ));
                    self.phase = Phase::UpgradePick { next: next + 1 };
                    return Ok(());
                }
                let player = &self.players[seat.index()];
                let takeable = self
                    .pool
                    .iter()
                    .enumerate()
                    .filter(|&(_, &item)| pool::can_take(player, item, &self.config))
                    .map(|(index, _)| index)
                    .collect();
                self.pending = Some(PendingInput {
                    seat,
                    kind: PendingKind::Upgrade {
                        pool: self.pool.clone(),
                        takeable,
                        taken: self.taken_pool.clone(),
                        decline_gold: self.config.decline_gold,
                    },
                });
                Ok(())
            }
            Phase::ReliefBonus => {
                let seat = self.pick_order[3];
                self.pending = Some(PendingInput {
                    seat,
                    kind: PendingKind::FourthPlaceBonus {
                        gold: self.config.relief_gold,
                        grace: self.config.relief_grace,
                    },
                });
                Ok(())
            }
            Phase::WorkerPlacement { next } => {
                if next == 4 {
                    self.phase = Phase::WagePayment;
                    return Ok(());
                }
                let seat = self.round_order()[next];
                let player = &self.players[seat.index()];
                let workers = player.active_workers();
                if workers == 0 {
                    self.phase = Phase::WorkerPlacement { next: next + 1 };
                    return Ok(());
                }
                self.pending = Some(PendingInput {
                    seat,
                    kind: PendingKind::WorkerActions {
                        workers,
                        available: worker::available_actions(player, &self.config),
                        recruit_cost: self.config.recruit_cost,
                        can_recruit: player.gold >= self.config.recruit_cost
                            && !player.round.recruited,
                    },
                });
                Ok(())
            }
            Phase::WagePayment => {
                self.settle_round_end()?;
                Ok(())
            }
            Phase::GameEnd => {
                self.finish_game();
                Ok(())
            }
        }
    }

    fn start_round(&mut self) {
        let round_seed = self
            .seed
            .wrapping_add((self.round_no as u64 + 1).wrapping_mul(ROUND_SEED_STRIDE));
        let mut deck = Deck::shuffled_with_seed(
            self.config.deck_copies,
            self.config.trump_count,
            round_seed,
        );
        let hands = deck.deal(self.config.hand_size);
        self.draw_pile = deck;
        for (index, cards) in hands.into_iter().enumerate() {
            self.players[index].reset_round();
            self.dealt[index] = cards.clone();
            self.played[index].clear();
            self.players[index].round.hand = Hand::with_cards(cards);
        }
        self.round_leader = Seat::LOOP[(self.round_no % 4) as usize];
        self.leader = self.round_leader;
        self.current_trick = None;
        self.trick_history.clear();

        let mut pool_rng = StdRng::seed_from_u64(round_seed.wrapping_add(1));
        self.pool = pool::reveal_pool(&self.config, self.round_no, &mut pool_rng);
        self.taken_pool.clear();

        self.log.push(format!(
            "Round {} begins; {} leads",
            self.round_no + 1,
            self.round_leader
        ));
        let revealed = self
            .pool
            .iter()
            .map(PoolItem::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.log.push(format!("Pool revealed: {revealed}"));
        self.phase = Phase::Declaration { next: 0 };
    }

    /// Trick-phase scoring plus the pick order for the upgrade draft:
    /// tricks won desc, held witches desc, then seat order from the
    /// round's first leader.
    fn score_round(&mut self) {
        for seat in Seat::LOOP {
            let player = &mut self.players[seat.index()];
            let declared = player.round.declared.unwrap_or(0);
            let won = player.round.tricks_won;
            if won == declared {
                player.vp += self.config.declaration_bonus_vp;
                self.log.push(format!(
                    "{seat} matches the declaration of {declared} for {} VP",
                    self.config.declaration_bonus_vp
                ));
            }
            if won == 0 {
                let mut grace = self.config.zero_tricks_grace;
                if declared == 0 {
                    grace += self.config.zero_declaration_grace;
                }
                let player = &mut self.players[seat.index()];
                player.grace += grace;
                self.log
                    .push(format!("{seat} wins no tricks and gains {grace} grace"));
            }
        }
        let mut order = self.round_order();
        order.sort_by_key(|seat| {
            let player = &self.players[seat.index()];
            (
                Reverse(player.round.tricks_won),
                Reverse(player.witches.len()),
            )
        });
        self.pick_order = order;
        let listed = order
            .iter()
            .map(Seat::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.log.push(format!("Pick order: {listed}"));
    }

    /// Wage settlement, round-end passives, hire activation, and the
    /// card-conservation audit; then the next round or game end.
    fn settle_round_end(&mut self) -> Result<(), EngineError> {
        for seat in Seat::LOOP {
            let player = &mut self.players[seat.index()];
            let outcome = worker::settle_wages(player, self.round_no, &self.config);
            if outcome.income > 0 {
                self.log
                    .push(format!("{seat} collects {} gold in passives", outcome.income));
            }
            self.log
                .push(format!("{seat} pays {} gold in wages", outcome.wage_net));
            if outcome.debt_penalty > 0 {
                self.log.push(format!(
                    "{seat} is {} gold in debt and loses {} VP",
                    -self.players[seat.index()].gold,
                    outcome.debt_penalty
                ));
            }
            let player = &mut self.players[seat.index()];
            if player.holds_witch(WitchCard::Herd) {
                player.grace += 1;
                self.log.push(format!("{seat} gains 1 grace from the Herd"));
            }
            let activated = self.players[seat.index()].activate_hires();
            if activated > 0 {
                self.log
                    .push(format!("{seat} puts {activated} new worker(s) to work"));
            }
        }
        self.audit_conservation()?;
        self.round_no += 1;
        self.phase = if self.round_no == self.config.rounds {
            Phase::GameEnd
        } else {
            Phase::RoundStart
        };
        Ok(())
    }

    fn finish_game(&mut self) {
        for seat in Seat::LOOP {
            let player = &mut self.players[seat.index()];
            let bonus = self
                .config
                .grace_thresholds
                .iter()
                .rev()
                .find(|&&(threshold, _)| player.grace >= threshold)
                .map(|&(_, bonus)| bonus);
            if let Some(bonus) = bonus {
                player.vp += bonus;
                self.log.push(format!(
                    "{seat} reaches {} grace for {bonus} bonus VP",
                    player.grace
                ));
            }
        }
        let mut standings = Seat::LOOP;
        standings.sort_by_key(|seat| {
            let player = &self.players[seat.index()];
            (Reverse(player.vp), Reverse(player.gold))
        });
        for (place, seat) in standings.iter().enumerate() {
            let player = &self.players[seat.index()];
            self.log.push(format!(
                "{}. {seat} finishes with {} VP and {} gold",
                place + 1,
                player.vp,
                player.gold
            ));
        }
        self.game_over = true;
    }

    /// Validate-then-apply for one response. Any error here leaves the
    /// engine exactly as it was.
    fn apply_response(
        &mut self,
        pending: &PendingInput,
        response: Response,
    ) -> Result<(), InputError> {
        let seat = pending.seat;
        match (&pending.kind, response) {
            (PendingKind::Declaration { max, .. }, Response::Declaration(count)) => {
                if count > *max {
                    return Err(InputError::DeclarationOutOfRange {
                        max: *max,
                        got: count,
                    });
                }
                self.players[seat.index()].round.declared = Some(count);
                self.log.push(format!("{seat} declares {count}"));
                self.advance_cursor();
                Ok(())
            }
            (
                PendingKind::GraceHandSwap {
                    draw_available,
                    grace_cost,
                    ..
                },
                Response::HandSwap(cards),
            ) => {
                if cards.is_empty() {
                    self.log.push(format!("{seat} keeps the dealt hand"));
                    self.advance_cursor();
                    return Ok(());
                }
                if cards.len() > *draw_available {
                    return Err(InputError::SwapExceedsDrawPile {
                        available: *draw_available,
                        got: cards.len(),
                    });
                }
                self.check_held(seat, &cards)?;
                let cost = *grace_cost;
                let player = &mut self.players[seat.index()];
                player.grace -= cost;
                for &card in &cards {
                    player.round.hand.remove(card);
                    remove_one(&mut self.dealt[seat.index()], card);
                }
                let mut drawn = 0;
                for _ in 0..cards.len() {
                    if let Some(card) = self.draw_pile.draw() {
                        player.round.hand.add(card);
                        self.dealt[seat.index()].push(card);
                        drawn += 1;
                    }
                }
                player.round.swapped = true;
                self.log.push(format!(
                    "{seat} pays {cost} grace to swap {drawn} card(s)"
                ));
                self.advance_cursor();
                Ok(())
            }
            (PendingKind::Seal { count, .. }, Response::Seal(cards)) => {
                if cards.len() != *count {
                    return Err(InputError::WrongSealCount {
                        expected: *count,
                        got: cards.len(),
                    });
                }
                self.check_held(seat, &cards)?;
                let player = &mut self.players[seat.index()];
                for &card in &cards {
                    player.round.hand.remove(card);
                    player.round.sealed.push(card);
                }
                self.log
                    .push(format!("{seat} seals {} card(s) face down", cards.len()));
                self.advance_cursor();
                Ok(())
            }
            (PendingKind::ChooseCard { legal, .. }, Response::PlayCard(card)) => {
                if !self.players[seat.index()].round.hand.contains(card) {
                    return Err(InputError::CardNotHeld(card));
                }
                if !legal.contains(&card) {
                    return Err(InputError::IllegalCard(card));
                }
                if let Some(trick) = self.current_trick.as_mut() {
                    trick.play(seat, card)?;
                } else {
                    return Err(InputError::NoPendingInput);
                }
                self.players[seat.index()].round.hand.remove(card);
                self.played[seat.index()].push(card);
                self.log.push(format!("{seat} plays {card}"));

                let complete = self
                    .current_trick
                    .as_ref()
                    .is_some_and(|trick| trick.is_complete());
                if complete {
                    if let (Some(trick), Phase::Trick { trick_no }) =
                        (self.current_trick.take(), self.phase)
                    {
                        if let Some(winner) = trick.winner() {
                            self.players[winner.index()].round.tricks_won += 1;
                            self.log
                                .push(format!("{winner} wins trick {}", trick_no + 1));
                            self.trick_history.push(TrickRecord {
                                trick_no,
                                plays: trick.plays().to_vec(),
                                winner,
                            });
                            self.leader = winner;
                        }
                        self.phase = Phase::Trick {
                            trick_no: trick_no + 1,
                        };
                    }
                }
                Ok(())
            }
            (
                PendingKind::Upgrade {
                    takeable,
                    decline_gold,
                    ..
                },
                Response::Upgrade(choice),
            ) => {
                match choice {
                    UpgradeChoice::Take(index) => {
                        if index >= self.pool.len() {
                            return Err(InputError::PoolIndexOutOfRange(index));
                        }
                        let item = self.pool[index];
                        if !takeable.contains(&index) {
                            return Err(InputError::ItemNotTakeable(item));
                        }
                        self.pool.remove(index);
                        self.taken_pool.push(item);
                        pool::apply(&mut self.players[seat.index()], item, &self.config);
                        self.log.push(format!("{seat} takes {item}"));
                    }
                    UpgradeChoice::DeclineForGold => {
                        self.players[seat.index()].gold += *decline_gold;
                        self.log.push(format!(
                            "{seat} declines the pool for {decline_gold} gold"
                        ));
                    }
                }
                self.advance_cursor();
                Ok(())
            }
            (
                PendingKind::FourthPlaceBonus { gold, grace },
                Response::FourthPlaceBonus(choice),
            ) => {
                let player = &mut self.players[seat.index()];
                match choice {
                    ReliefChoice::Gold => {
                        player.gold += *gold;
                        self.log
                            .push(format!("{seat} takes the relief bonus of {gold} gold"));
                    }
                    ReliefChoice::Grace => {
                        player.grace += *grace;
                        self.log
                            .push(format!("{seat} takes the relief bonus of {grace} grace"));
                    }
                }
                self.advance_cursor();
                Ok(())
            }
            (PendingKind::WorkerActions { .. }, Response::WorkerActions(tokens)) => {
                worker::validate_allocation(&self.players[seat.index()], &tokens, &self.config)?;
                if tokens.is_empty() {
                    self.log.push(format!("{seat} places no workers"));
                } else {
                    let events = worker::resolve_allocation(
                        &mut self.players[seat.index()],
                        &tokens,
                        &self.config,
                    );
                    self.log.extend(events);
                }
                self.advance_cursor();
                Ok(())
            }
            _ => Err(InputError::ResponseKindMismatch),
        }
    }

    /// Move the sweep cursor past the seat that just answered.
    fn advance_cursor(&mut self) {
        self.phase = match self.phase {
            Phase::Declaration { next } => Phase::Declaration { next: next + 1 },
            Phase::HandSwap { next } => Phase::HandSwap { next: next + 1 },
            Phase::Seal { next } => Phase::Seal { next: next + 1 },
            Phase::UpgradePick { next } => Phase::UpgradePick { next: next + 1 },
            Phase::ReliefBonus => Phase::WorkerPlacement { next: 0 },
            Phase::WorkerPlacement { next } => Phase::WorkerPlacement { next: next + 1 },
            other => other,
        };
    }

    fn round_order(&self) -> [Seat; 4] {
        self.round_leader.order_from()
    }

    /// Followers holding the lead suit may play that suit or trump;
    /// otherwise (including a trump lead) the whole hand is legal.
    fn legal_cards(&self, seat: Seat) -> Vec<Card> {
        let hand = &self.players[seat.index()].round.hand;
        let lead = self
            .current_trick
            .as_ref()
            .and_then(|trick| trick.lead_suit());
        match lead {
            Some(suit) if hand.iter().any(|card| card.suit() == Some(suit)) => hand
                .iter()
                .copied()
                .filter(|card| card.is_trump() || card.suit() == Some(suit))
                .collect(),
            _ => hand.cards().to_vec(),
        }
    }

    /// Multiset-aware membership check for multi-card picks; the deck
    /// carries duplicate cards.
    fn check_held(&self, seat: Seat, cards: &[Card]) -> Result<(), InputError> {
        let hand = &self.players[seat.index()].round.hand;
        for &card in cards {
            let wanted = cards.iter().filter(|&&c| c == card).count();
            if hand.count(card) < wanted {
                return Err(InputError::CardNotHeld(card));
            }
        }
        Ok(())
    }

    /// Every dealt card (adjusted for swaps) must be accounted for as
    /// sealed or played by round end.
    fn audit_conservation(&mut self) -> Result<(), EngineError> {
        for seat in Seat::LOOP {
            let player = &self.players[seat.index()];
            let mut expected = self.dealt[seat.index()].clone();
            expected.sort_by_key(|card| card.sort_key());
            let mut seen: Vec<Card> = player
                .round
                .sealed
                .iter()
                .copied()
                .chain(self.played[seat.index()].iter().copied())
                .chain(player.round.hand.iter().copied())
                .collect();
            seen.sort_by_key(|card| card.sort_key());
            if expected != seen {
                self.halted = true;
                let violation = InvariantViolation::CardConservation { seat };
                self.log.push(format!("HALT: {violation}"));
                return Err(violation.into());
            }
        }
        Ok(())
    }

    fn bot_view(&self, seat: Seat) -> BotView {
        let player = &self.players[seat.index()];
        BotView {
            seat,
            gold: player.gold,
            grace: player.grace,
            declared: player.round.declared,
            tricks_won: player.round.tricks_won,
            active_workers: player.active_workers(),
            expected_wage: self.config.wage_curve[self.round_no as usize]
                * player.basic_workers as i32,
            recruit_cost: self.config.recruit_cost,
            recruited: player.round.recruited,
            trade_yield: player.trade_yield(&self.config),
            hunt_yield: player.hunt_yield(&self.config),
            pray_yield: player.pray_yield(&self.config),
        }
    }
}

fn remove_one(cards: &mut Vec<Card>, card: Card) {
    if let Some(index) = cards.iter().position(|&c| c == card) {
        cards.remove(index);
    }
}
