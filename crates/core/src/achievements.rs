//! Achievement counters
//!
//! Every [`Achievement`] kind is seeded to zero up front, so a lookup can never
//! miss. Counts are never negative.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::types::Achievement;

/// Non-negative count per achievement kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Achievements {
    counts: [u32; Achievement::COUNT],
}

impl Achievements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(kind, count)` pairs; later pairs add to earlier ones
    pub fn from_pairs(pairs: &[(Achievement, u32)]) -> Self {
        let mut achievements = Self::new();
        for &(kind, count) in pairs {
            achievements.add(kind, count);
        }
        achievements
    }

    pub fn get(&self, kind: Achievement) -> u32 {
        self.counts[kind.index()]
    }

    /// Assign a count; the absolute value is stored
    pub fn set(&mut self, kind: Achievement, value: i64) {
        self.counts[kind.index()] = u32::try_from(value.unsigned_abs()).unwrap_or(u32::MAX);
    }

    pub fn add(&mut self, kind: Achievement, count: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(count);
    }

    pub fn increment(&mut self, kind: Achievement) {
        self.add(kind, 1);
    }

    /// Sum of the counts for `kinds`
    pub fn sum(&self, kinds: &[Achievement]) -> u32 {
        kinds
            .iter()
            .fold(0u32, |acc, kind| acc.saturating_add(self.get(*kind)))
    }

    /// Pointwise add `other` into `self`
    pub fn merge(&mut self, other: &Achievements) {
        for kind in Achievement::ALL {
            self.add(kind, other.get(kind));
        }
    }

    pub fn merged(mut self, other: &Achievements) -> Achievements {
        self.merge(other);
        self
    }

    /// Total rows removed, weighting each row-clear bucket by its multiplicity
    pub fn rows_removed(&self) -> u32 {
        Achievement::ROWS
            .iter()
            .fold(0u32, |acc, kind| {
                acc.saturating_add(self.get(*kind).saturating_mul(kind.row_count()))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn reset(&mut self) {
        self.counts = [0; Achievement::COUNT];
    }

    /// Non-zero entries
    pub fn iter(&self) -> impl Iterator<Item = (Achievement, u32)> + '_ {
        Achievement::ALL
            .iter()
            .map(move |kind| (*kind, self.get(*kind)))
            .filter(|(_, count)| *count > 0)
    }
}

impl AddAssign<&Achievements> for Achievements {
    fn add_assign(&mut self, rhs: &Achievements) {
        self.merge(rhs);
    }
}
