//! Level and daily income tables.
//!
//! Level `n` (1-based) covers experience in `[bounds[n-1], bounds[n])`.
//! Experience past the last bin clamps to the top level. Experience 0 lies
//! below the first bin and is rejected rather than mapped to the top level.

use std::ops::Range;

use gwt_core::constants::MAX_LEVEL;
use gwt_core::error::ScoreError;
use serde::{Deserialize, Serialize};
use tracing::warn;

const LEVEL_COUNT: usize = MAX_LEVEL as usize;

/// Ordered experience bin edges; `LEVEL_COUNT + 1` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTable {
    bounds: [u64; LEVEL_COUNT + 1],
}

pub const LEVEL_TABLE: LevelTable = LevelTable {
    bounds: [
        1, 5, 16, 25, 34, 40, 65, 95, 155, 275, 515, 800, 1500, 2500, 4000, 6000, 10000, 15000,
        20000, 30000, 50000,
    ],
};

impl LevelTable {
    /// Level whose bin contains `exp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gwt_score::LEVEL_TABLE;
    /// assert_eq!(LEVEL_TABLE.level_for_exp(9).unwrap(), 2);
    /// assert_eq!(LEVEL_TABLE.level_for_exp(1_000_000).unwrap(), 20);
    /// ```
    pub fn level_for_exp(&self, exp: u64) -> Result<u32, ScoreError> {
        let reached = self.bounds.partition_point(|&edge| edge <= exp);
        if reached == 0 {
            return Err(ScoreError::ExperienceBelowTable(exp));
        }
        if reached > LEVEL_COUNT {
            warn!(exp, top = MAX_LEVEL, "experience above level table, clamping");
            return Ok(MAX_LEVEL);
        }
        Ok(reached as u32)
    }

    /// Experience range of `level`, or `None` outside `1..=MAX_LEVEL`.
    pub fn range(&self, level: u32) -> Option<Range<u64>> {
        let idx = level as usize;
        if idx == 0 || idx > LEVEL_COUNT {
            return None;
        }
        Some(self.bounds[idx - 1]..self.bounds[idx])
    }
}

/// Daily income per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeTable {
    income: [u64; LEVEL_COUNT],
}

pub const INCOME_TABLE: IncomeTable = IncomeTable {
    income: [
        500, 1000, 1500, 2000, 2500, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000, 15000,
        20000, 30000, 40000, 50000, 100000, 200000,
    ],
};

impl IncomeTable {
    /// Daily income at `level`. Level 0 earns nothing; levels past the table
    /// earn the top entry.
    pub fn income_for_level(&self, level: u32) -> u64 {
        match level as usize {
            0 => 0,
            idx if idx <= LEVEL_COUNT => self.income[idx - 1],
            _ => self.income[LEVEL_COUNT - 1],
        }
    }
}

/// Daily income for an item with `exp` experience.
pub fn daily_income_for_exp(exp: u64) -> Result<u64, ScoreError> {
    let level = LEVEL_TABLE.level_for_exp(exp)?;
    Ok(INCOME_TABLE.income_for_level(level))
}

/// One row of the combined level/income table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LevelRow {
    pub level: u32,
    pub min_exp: u64,
    pub max_exp: u64,
    pub daily_income: u64,
}

/// The full level table joined with income, level 1 first.
pub fn level_rows() -> Vec<LevelRow> {
    (1..=MAX_LEVEL)
        .filter_map(|level| {
            LEVEL_TABLE.range(level).map(|r| LevelRow {
                level,
                min_exp: r.start,
                max_exp: r.end,
                daily_income: INCOME_TABLE.income_for_level(level),
            })
        })
        .collect()
}
