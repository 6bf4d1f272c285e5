//! Scoring module - achievements to points
//!
//! Pure functions shared by the level rules. `number` is always the 1-based
//! level number.
//!
//! | Rule | Points |
//! |------|--------|
//! | Row clear | `ROW_POINTS[k] * number` per k-row clear |
//! | Jewel row clear | `100 * T(k) * number` per k-row clear, T = 1, 3, 6, 10 |
//! | Exploded block | 10 each, doubled on a hard drop |
//! | Colour match | 300 per whole minimum, 100 per block left over |
//! | Jewel bonus | `max(0, 1000 - 100 * avg)` per jewel, avg = rows per jewel |

use crate::core::Achievements;
use crate::types::{
    Achievement, COLOUR_MATCH_OVERFLOW_POINTS, COLOUR_MATCH_POINTS, DROP_INTERVALS,
    DROP_INTERVAL_FLOOR_MS, EXPLODED_BLOCK_POINTS, JEWEL_BONUS_BASE, JEWEL_BONUS_DECAY,
    JEWEL_ROW_UNIT, ROW_POINTS,
};

/// Triangular number of `rows`: 1, 3, 6, 10
pub fn triangular(rows: u32) -> u32 {
    rows * (rows + 1) / 2
}

/// Classic row table scaled by level number
pub fn row_points(achievements: &Achievements, number: u32) -> u64 {
    Achievement::ROWS
        .iter()
        .map(|kind| {
            let rows = kind.row_count() as usize;
            u64::from(achievements.get(*kind)) * u64::from(ROW_POINTS[rows]) * u64::from(number)
        })
        .sum()
}

/// Escalating row table used by jewel levels
pub fn jewel_row_points(achievements: &Achievements, number: u32) -> u64 {
    Achievement::ROWS
        .iter()
        .map(|kind| {
            u64::from(achievements.get(*kind))
                * u64::from(JEWEL_ROW_UNIT)
                * u64::from(triangular(kind.row_count()))
                * u64::from(number)
        })
        .sum()
}

pub fn exploded_block_points(achievements: &Achievements, hard_drop: bool) -> u64 {
    let per_block = if hard_drop {
        EXPLODED_BLOCK_POINTS * 2
    } else {
        EXPLODED_BLOCK_POINTS
    };
    u64::from(achievements.get(Achievement::ExplodedBlock)) * u64::from(per_block)
}

/// Flat points for each whole minimum matched plus a bonus per extra block
///
/// # Examples
///
/// ```
/// use blockfall_engine::scoring::colour_match_points;
///
/// assert_eq!(colour_match_points(20, 15), 800);
/// assert_eq!(colour_match_points(18, 9), 600);
/// ```
pub fn colour_match_points(colour_match: u32, minimum_match_count: usize) -> u64 {
    let minimum = minimum_match_count.max(1) as u64;
    let matched = u64::from(colour_match);
    let whole = matched / minimum;
    whole * u64::from(COLOUR_MATCH_POINTS)
        + (matched - whole * minimum) * u64::from(COLOUR_MATCH_OVERFLOW_POINTS)
}

/// Bonus for the jewels collected this move
///
/// The fewer rows it took per jewel over the level so far (`level` merged with
/// `this_move`), the bigger the bonus.
pub fn jewel_bonus(this_move: &Achievements, level: Option<&Achievements>) -> u64 {
    let collected = this_move.get(Achievement::Jewel);
    if collected == 0 {
        return 0;
    }
    let so_far = match level {
        Some(level) => level.merged(this_move),
        None => *this_move,
    };
    let jewels = so_far.get(Achievement::Jewel).max(1);
    let average = so_far.rows_removed() / jewels;
    let per_jewel = JEWEL_BONUS_BASE.saturating_sub(JEWEL_BONUS_DECAY.saturating_mul(average));
    u64::from(collected) * u64::from(per_jewel)
}

/// Milliseconds between automatic drops at level `number`
pub fn drop_interval_ms(number: u32) -> u32 {
    let index = number.saturating_sub(1) as usize;
    DROP_INTERVALS
        .get(index)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}
