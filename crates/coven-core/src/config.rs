use serde::{Deserialize, Serialize};
use std::fmt;

/// All tunable rules of a game. `validate` runs at engine construction
/// and rejects configurations the state machine cannot sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rounds: u32,
    pub tricks_per_round: usize,
    pub hand_size: usize,
    pub deck_copies: u8,
    pub trump_count: u8,
    pub start_gold: i32,
    pub start_workers: u8,
    pub wage_curve: Vec<i32>,
    pub debt_vp_per_gold: i32,
    pub debt_vp_cap: Option<i32>,
    pub declaration_bonus_vp: i32,
    pub zero_tricks_grace: u32,
    pub zero_declaration_grace: u32,
    pub pool_size: usize,
    pub decline_gold: i32,
    pub relief_gold: i32,
    pub relief_grace: u32,
    pub recruit_cost: i32,
    pub witch_round: u32,
    pub hand_swap_cost: u32,
    pub max_action_level: u8,
    pub trade_base: i32,
    pub hunt_base: i32,
    pub pray_base: u32,
    pub donate_grace_cost: u32,
    pub donate_gold_gain: i32,
    pub ritual_grace_cost: u32,
    pub ritual_vp_gain: i32,
    /// Ascending (threshold, VP bonus) rows; only the highest satisfied
    /// row applies at game end.
    pub grace_thresholds: Vec<(u32, i32)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 4,
            tricks_per_round: 4,
            hand_size: 6,
            deck_copies: 2,
            trump_count: 4,
            start_gold: 5,
            start_workers: 2,
            wage_curve: vec![1, 1, 2, 3],
            debt_vp_per_gold: 1,
            debt_vp_cap: None,
            declaration_bonus_vp: 1,
            zero_tricks_grace: 1,
            zero_declaration_grace: 1,
            pool_size: 5,
            decline_gold: 2,
            relief_gold: 2,
            relief_grace: 2,
            recruit_cost: 2,
            witch_round: 2,
            hand_swap_cost: 1,
            max_action_level: 2,
            trade_base: 2,
            hunt_base: 1,
            pray_base: 1,
            donate_grace_cost: 1,
            donate_gold_gain: 3,
            ritual_grace_cost: 2,
            ritual_vp_gain: 2,
            grace_thresholds: vec![(4, 1), (7, 2), (10, 4)],
        }
    }
}

impl GameConfig {
    pub const fn seal_count(&self) -> usize {
        self.hand_size - self.tricks_per_round
    }

    pub fn deck_size(&self) -> usize {
        self.deck_copies as usize * 4 * 13 + self.trump_count as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::invalid("rounds", "must be at least 1"));
        }
        if self.tricks_per_round == 0 {
            return Err(ConfigError::invalid(
                "tricks_per_round",
                "must be at least 1",
            ));
        }
        if self.hand_size < self.tricks_per_round {
            return Err(ConfigError::invalid(
                "hand_size",
                "must be at least tricks_per_round",
            ));
        }
        if self.deck_size() < 4 * self.hand_size {
            return Err(ConfigError::invalid(
                "deck_copies",
                "deck too small to deal four hands",
            ));
        }
        if (self.wage_curve.len() as u32) < self.rounds {
            return Err(ConfigError::invalid(
                "wage_curve",
                "must cover every round",
            ));
        }
        if self.wage_curve.iter().any(|&w| w < 0) {
            return Err(ConfigError::invalid("wage_curve", "rates must be >= 0"));
        }
        if self.start_workers == 0 {
            return Err(ConfigError::invalid(
                "start_workers",
                "each seat needs at least one worker",
            ));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::invalid("pool_size", "must be at least 1"));
        }
        if self.witch_round >= self.rounds {
            return Err(ConfigError::invalid(
                "witch_round",
                "must index an actual round",
            ));
        }
        if self.debt_vp_per_gold < 0 {
            return Err(ConfigError::invalid("debt_vp_per_gold", "must be >= 0"));
        }
        if self.recruit_cost < 0 {
            return Err(ConfigError::invalid("recruit_cost", "must be >= 0"));
        }
        if !self
            .grace_thresholds
            .windows(2)
            .all(|w| w[0].0 < w[1].0)
        {
            return Err(ConfigError::invalid(
                "grace_thresholds",
                "thresholds must be strictly ascending",
            ));
        }
        Ok(())
    }
}

/// Malformed construction parameters, rejected before any round starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ConfigError {
    const fn invalid(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid config {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::GameConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert_eq!(GameConfig::default().seal_count(), 2);
    }

    #[test]
    fn rejects_short_wage_curve() {
        let mut config = GameConfig::default();
        config.wage_curve = vec![1, 1];
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "wage_curve");
    }

    #[test]
    fn rejects_hand_smaller_than_tricks() {
        let mut config = GameConfig::default();
        config.hand_size = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_witch_round_out_of_range() {
        let mut config = GameConfig::default();
        config.witch_round = 4;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "witch_round");
    }

    #[test]
    fn rejects_unsorted_grace_thresholds() {
        let mut config = GameConfig::default();
        config.grace_thresholds = vec![(7, 2), (4, 1)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_workers() {
        let mut config = GameConfig::default();
        config.start_workers = 0;
        assert!(config.validate().is_err());
    }
}
