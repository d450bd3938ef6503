//! Statistics tracking for the simulation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::critter::Kind;

/// Cumulative counters for one critter kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    /// Critters of this kind currently alive.
    pub alive: usize,
    /// Battles won, lifetime.
    pub wins: usize,
    /// Food units eaten, lifetime.
    pub eaten: usize,
}

impl KindStats {
    /// Derived score: alive + wins + eaten.
    pub fn total(&self) -> usize {
        self.alive + self.wins + self.eaten
    }
}

/// Per-kind scoreboard.
///
/// `wins` and `eaten` survive the critters that earned them; only `alive`
/// is ever decremented, at burial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: HashMap<Kind, KindStats>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for `kind`, zeroed if nothing was recorded yet.
    pub fn get(&self, kind: Kind) -> KindStats {
        self.entries.get(&kind).copied().unwrap_or_default()
    }

    pub fn record_birth(&mut self, kind: Kind) {
        self.entries.entry(kind).or_default().alive += 1;
    }

    pub fn record_death(&mut self, kind: Kind) {
        let stats = self.entries.entry(kind).or_default();
        stats.alive = stats.alive.saturating_sub(1);
    }

    pub fn record_win(&mut self, kind: Kind) {
        self.entries.entry(kind).or_default().wins += 1;
    }

    pub fn record_meal(&mut self, kind: Kind) {
        self.entries.entry(kind).or_default().eaten += 1;
    }

    /// Total living critters across all kinds.
    pub fn total_alive(&self) -> usize {
        self.entries.values().map(|s| s.alive).sum()
    }

    /// Format the scoreboard as a one-line summary.
    pub fn summary(&self) -> String {
        Kind::ALL
            .iter()
            .map(|&kind| {
                let stats = self.get(kind);
                format!(
                    "{} A:{} W:{} E:{}",
                    kind.name(),
                    stats.alive,
                    stats.wins,
                    stats.eaten
                )
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Save the scoreboard to a JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

/// One recorded point of the scoreboard history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnStats {
    pub turn: u64,
    pub scores: Scoreboard,
}

/// Historical scoreboard tracker.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded snapshots.
    pub snapshots: Vec<TurnStats>,
    /// Recording interval, in turns.
    pub interval: u64,
}

impl StatsHistory {
    /// Create a new history with the given recording interval.
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a scoreboard snapshot.
    pub fn record(&mut self, turn: u64, scores: Scoreboard) {
        self.snapshots.push(TurnStats { turn, scores });
    }

    /// Alive count over time for one kind.
    pub fn alive_series(&self, kind: Kind) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.turn, s.scores.get(kind).alive))
            .collect()
    }

    /// Derived total score over time for one kind.
    pub fn total_series(&self, kind: Kind) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.turn, s.scores.get(kind).total()))
            .collect()
    }

    /// Save the history to a JSON file.
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_counters() {
        let mut scores = Scoreboard::new();
        scores.record_birth(Kind::Grazer);
        scores.record_birth(Kind::Grazer);
        scores.record_win(Kind::Grazer);
        scores.record_meal(Kind::Grazer);
        scores.record_meal(Kind::Grazer);
        scores.record_meal(Kind::Grazer);

        let stats = scores.get(Kind::Grazer);
        assert_eq!(stats.alive, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.eaten, 3);
        assert_eq!(stats.total(), 6);

        assert_eq!(scores.get(Kind::Sloth), KindStats::default());
    }

    #[test]
    fn test_death_keeps_earned_counters() {
        let mut scores = Scoreboard::new();
        scores.record_birth(Kind::Howler);
        scores.record_win(Kind::Howler);
        scores.record_meal(Kind::Howler);
        scores.record_death(Kind::Howler);

        let stats = scores.get(Kind::Howler);
        assert_eq!(stats.alive, 0);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.eaten, 1);
    }

    #[test]
    fn test_summary_lists_every_kind() {
        let scores = Scoreboard::new();
        let summary = scores.summary();
        for kind in Kind::ALL {
            assert!(summary.contains(kind.name()));
        }
    }

    #[test]
    fn test_history_series() {
        let mut history = StatsHistory::new(10);

        for i in 0..5u64 {
            let mut scores = Scoreboard::new();
            for _ in 0..=i {
                scores.record_birth(Kind::Prowler);
            }
            history.record(i * 10, scores);
        }

        let series = history.alive_series(Kind::Prowler);
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], (0, 1));
        assert_eq!(series[4], (40, 5));
    }
}
