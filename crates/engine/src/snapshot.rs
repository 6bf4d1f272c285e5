//! Game snapshot - plain data for save and restore

use serde::{Deserialize, Serialize};

use crate::core::{Achievements, GridSnapshot};
use crate::types::GameVariant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub variant: GameVariant,
    /// 1-based, for display; `level_index` is authoritative
    pub level_number: u32,
    pub level_index: usize,
    pub score: u64,
    pub level_achievements: Achievements,
    pub total_achievements: Achievements,
    pub game_over: bool,
    pub grid: GridSnapshot,
}
