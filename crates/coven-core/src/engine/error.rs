use crate::config::ConfigError;
use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::trick::TrickError;
use crate::pool::PoolItem;
use crate::worker::AllocationError;
use core::fmt;

/// A response that violates the current pending input's constraints.
/// Never mutates state; the caller may re-prompt and resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    NoPendingInput,
    WrongSeat { expected: Seat, actual: Seat },
    ResponseKindMismatch,
    DeclarationOutOfRange { max: u8, got: u8 },
    CardNotHeld(Card),
    IllegalCard(Card),
    WrongSealCount { expected: usize, got: usize },
    SwapExceedsDrawPile { available: usize, got: usize },
    PoolIndexOutOfRange(usize),
    ItemNotTakeable(PoolItem),
    Allocation(AllocationError),
    Trick(TrickError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoPendingInput => write!(f, "no decision is pending"),
            InputError::WrongSeat { expected, actual } => {
                write!(f, "pending decision belongs to {expected}, not {actual}")
            }
            InputError::ResponseKindMismatch => {
                write!(f, "response kind does not match the pending decision")
            }
            InputError::DeclarationOutOfRange { max, got } => {
                write!(f, "declaration {got} outside 0..={max}")
            }
            InputError::CardNotHeld(card) => write!(f, "card {card} is not in hand"),
            InputError::IllegalCard(card) => write!(f, "card {card} is not legal here"),
            InputError::WrongSealCount { expected, got } => {
                write!(f, "seal requires exactly {expected} cards, got {got}")
            }
            InputError::SwapExceedsDrawPile { available, got } => {
                write!(f, "swap of {got} cards exceeds {available} in the draw pile")
            }
            InputError::PoolIndexOutOfRange(index) => {
                write!(f, "pool index {index} out of range")
            }
            InputError::ItemNotTakeable(item) => write!(f, "cannot take {item}"),
            InputError::Allocation(err) => err.fmt(f),
            InputError::Trick(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for InputError {}

impl From<AllocationError> for InputError {
    fn from(err: AllocationError) -> Self {
        InputError::Allocation(err)
    }
}

impl From<TrickError> for InputError {
    fn from(err: TrickError) -> Self {
        InputError::Trick(err)
    }
}

/// Internal inconsistency. Fatal: the instance halts and accepts no
/// further input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    CardConservation { seat: Seat },
    BotContract { seat: Seat, error: InputError },
    Halted,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::CardConservation { seat } => {
                write!(f, "card conservation broken for {seat}")
            }
            InvariantViolation::BotContract { seat, error } => {
                write!(f, "bot at {seat} produced an out-of-contract response: {error}")
            }
            InvariantViolation::Halted => write!(f, "game instance is halted"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    InvalidInput(InputError),
    Invariant(InvariantViolation),
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput(err) => write!(f, "invalid input: {err}"),
            EngineError::Invariant(err) => write!(f, "invariant violation: {err}"),
            EngineError::Config(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidInput(err) => Some(err),
            EngineError::Invariant(err) => Some(err),
            EngineError::Config(err) => Some(err),
        }
    }
}

impl From<InputError> for EngineError {
    fn from(err: InputError) -> Self {
        EngineError::InvalidInput(err)
    }
}

impl From<InvariantViolation> for EngineError {
    fn from(err: InvariantViolation) -> Self {
        EngineError::Invariant(err)
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}
