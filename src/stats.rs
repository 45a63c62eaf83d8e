//! Per-profile win statistics derived from the flat history log.

use crate::store::history::WinEntry;

/// Wins of one label within a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct WinCount {
    pub winner: String,
    pub count: usize,
    /// Share of the profile's spins, `0.0..=100.0`.
    pub percent: f64,
}

/// History entries of one profile plus per-winner tallies.
#[derive(Debug)]
pub struct ProfileStats<'a> {
    /// Matching entries, newest first.
    pub entries: Vec<&'a WinEntry>,
    /// Tallies in order of first appearance (most recent winner first).
    pub counts: Vec<WinCount>,
}

impl<'a> ProfileStats<'a> {
    pub fn compute(history: &'a [WinEntry], profile: &str) -> Self {
        let entries: Vec<&WinEntry> = history.iter().filter(|e| e.profile == profile).collect();

        let mut counts: Vec<WinCount> = Vec::new();
        for entry in &entries {
            match counts.iter_mut().find(|c| c.winner == entry.winner) {
                Some(c) => c.count += 1,
                None => counts.push(WinCount {
                    winner: entry.winner.clone(),
                    count: 1,
                    percent: 0.0,
                }),
            }
        }

        let total = entries.len();
        for c in &mut counts {
            c.percent = c.count as f64 / total as f64 * 100.0;
        }

        Self { entries, counts }
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One decimal, as shown next to each tally.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}", percent)
}
