use anyhow::{Context, Result, bail};
use coven_core::bot::SeatDriver;
use coven_core::config::GameConfig;
use coven_core::engine::GameEngine;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::info;

use crate::config::SimConfig;

/// Runs the configured batch of all-bot games on sequential seeds and
/// aggregates per-policy results.
pub struct SimRunner {
    config: SimConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyStats {
    pub seats_played: usize,
    pub wins: usize,
    pub total_vp: i64,
    pub total_gold: i64,
    /// Seats that ended the game still in gold debt.
    pub debt_finishes: usize,
}

#[derive(Debug, Clone)]
pub struct SimSummary {
    pub games: usize,
    pub per_policy: BTreeMap<String, PolicyStats>,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<SimSummary> {
        let drivers = self.config.seats.map(SeatDriver::Bot);
        let mut per_policy: BTreeMap<String, PolicyStats> = BTreeMap::new();

        for offset in 0..self.config.games {
            let seed = self.config.seed.wrapping_add(offset as u64);
            let engine = GameEngine::new(GameConfig::default(), seed, drivers)
                .with_context(|| format!("game with seed {seed} failed"))?;
            if !engine.is_game_over() || engine.is_halted() {
                bail!("game with seed {seed} did not finish cleanly");
            }

            let players = engine.players();
            let winner = players
                .iter()
                .max_by_key(|player| (player.vp, player.gold))
                .map(|player| player.seat);
            for (index, policy) in self.config.seats.iter().enumerate() {
                let player = &players[index];
                let stats = per_policy.entry(policy.to_string()).or_default();
                stats.seats_played += 1;
                stats.total_vp += player.vp as i64;
                stats.total_gold += player.gold as i64;
                if player.gold < 0 {
                    stats.debt_finishes += 1;
                }
                if winner == Some(player.seat) {
                    stats.wins += 1;
                }
            }
            info!(target: "coven_sim", seed, "game complete");
        }

        Ok(SimSummary {
            games: self.config.games,
            per_policy,
        })
    }
}

impl SimSummary {
    /// Plain-text aggregate table, one row per policy.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:>6} {:>6} {:>9} {:>10} {:>6}",
            "policy", "seats", "wins", "mean_vp", "mean_gold", "debt"
        );
        for (policy, stats) in &self.per_policy {
            let seats = stats.seats_played.max(1) as f64;
            let _ = writeln!(
                out,
                "{:<10} {:>6} {:>6} {:>9.2} {:>10.2} {:>6}",
                policy,
                stats.seats_played,
                stats.wins,
                stats.total_vp as f64 / seats,
                stats.total_gold as f64 / seats,
                stats.debt_finishes
            );
        }
        let _ = writeln!(out, "{} game(s) simulated", self.games);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::SimRunner;
    use crate::config::SimConfig;
    use coven_core::bot::BotPolicy;

    #[test]
    fn batch_aggregates_every_seat() {
        let mut config = SimConfig::default();
        config.games = 3;
        config.seed = 40;
        let summary = SimRunner::new(config).run().unwrap();
        assert_eq!(summary.games, 3);
        let seats: usize = summary
            .per_policy
            .values()
            .map(|stats| stats.seats_played)
            .sum();
        assert_eq!(seats, 12);
        let wins: usize = summary.per_policy.values().map(|stats| stats.wins).sum();
        assert_eq!(wins, 3);
    }

    #[test]
    fn same_batch_is_reproducible() {
        let mut config = SimConfig::default();
        config.games = 2;
        config.seats = [
            BotPolicy::Greedy,
            BotPolicy::Greedy,
            BotPolicy::Cautious,
            BotPolicy::Cautious,
        ];
        let a = SimRunner::new(config.clone()).run().unwrap();
        let b = SimRunner::new(config).run().unwrap();
        assert_eq!(a.render_table(), b.render_table());
    }

    #[test]
    fn table_lists_each_policy_once() {
        let mut config = SimConfig::default();
        config.games = 1;
        let summary = SimRunner::new(config).run().unwrap();
        assert_eq!(summary.per_policy.len(), 3);
        let table = summary.render_table();
        assert!(table.contains("balanced"));
        assert!(table.contains("greedy"));
        assert!(table.contains("cautious"));
    }
}
