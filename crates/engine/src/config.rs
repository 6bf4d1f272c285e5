//! Game configuration

use std::env;

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_COLUMNS, DEFAULT_LEVELS, DEFAULT_MINIMUM_MATCH_COUNT, DEFAULT_ROWS};

/// Board size, level count, match size and seed for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub levels: usize,
    pub minimum_match_count: usize,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            levels: DEFAULT_LEVELS,
            minimum_match_count: DEFAULT_MINIMUM_MATCH_COUNT,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// `BLOCKFALL_ROWS`, `BLOCKFALL_COLUMNS`, `BLOCKFALL_LEVELS`,
    /// `BLOCKFALL_MIN_MATCH` and `BLOCKFALL_SEED`; missing or unparseable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let size = |key: &str, default: usize| {
            lookup(key)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(default)
        };

        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            rows: size("BLOCKFALL_ROWS", defaults.rows),
            columns: size("BLOCKFALL_COLUMNS", defaults.columns),
            levels: size("BLOCKFALL_LEVELS", defaults.levels),
            minimum_match_count: size("BLOCKFALL_MIN_MATCH", defaults.minimum_match_count),
            seed,
        }
    }

    pub fn with_size(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_minimum_match_count(mut self, minimum_match_count: usize) -> Self {
        self.minimum_match_count = minimum_match_count;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // only checks that reading the real environment does not panic
        let _config = GameConfig::from_env();
    }

    #[test]
    fn test_lookup_overrides_and_fallbacks() {
        let config = GameConfig::from_lookup(|key| match key {
            "BLOCKFALL_ROWS" => Some("12".to_string()),
            "BLOCKFALL_COLUMNS" => Some("0".to_string()),
            "BLOCKFALL_MIN_MATCH" => Some("four".to_string()),
            "BLOCKFALL_SEED" => Some(" 42 ".to_string()),
            _ => None,
        });
        assert_eq!(config.rows, 12);
        assert_eq!(config.columns, DEFAULT_COLUMNS);
        assert_eq!(config.minimum_match_count, DEFAULT_MINIMUM_MATCH_COUNT);
        assert_eq!(config.levels, DEFAULT_LEVELS);
        assert_eq!(config.seed, 42);
    }
}
