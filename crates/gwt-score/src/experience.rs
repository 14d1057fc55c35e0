//! Experience of a stored data item.
//!
//! A fresh item has 1 exp; each point earned by showing it on a chain adds 8.
//! Points from several chains are combined with per-chain weights, so a chain
//! weighted 0.1 needs ten shows to earn what one ETH show earns.

use std::collections::HashMap;

use gwt_core::constants::{BASE_EXP, EXP_PER_POINT};
use gwt_core::error::{DomainError, ScoreError};
use gwt_core::traits::PointSource;
use gwt_core::types::MixHash;
use tracing::debug;

/// Experience for `points` unweighted points.
///
/// # Examples
///
/// ```
/// use gwt_score::experience_from_points;
/// assert_eq!(experience_from_points(0), 1);
/// assert_eq!(experience_from_points(1), 9);
/// ```
pub fn experience_from_points(points: u64) -> u64 {
    BASE_EXP.saturating_add(EXP_PER_POINT.saturating_mul(points))
}

struct WeightedSource {
    source: Box<dyn PointSource>,
    weight: f64,
}

/// Combines weighted per-chain point sources into experience.
#[derive(Default)]
pub struct ExperienceCalculator {
    sources: Vec<WeightedSource>,
}

impl ExperienceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator reading a single chain at full weight.
    pub fn single(source: impl PointSource + 'static) -> Self {
        Self {
            sources: vec![WeightedSource {
                source: Box::new(source),
                weight: 1.0,
            }],
        }
    }

    /// Add a chain whose points count `weight` times an ETH point.
    pub fn with_source(
        mut self,
        source: impl PointSource + 'static,
        weight: f64,
    ) -> Result<Self, ScoreError> {
        DomainError::check_non_negative("weight", weight)?;
        self.sources.push(WeightedSource {
            source: Box::new(source),
            weight,
        });
        Ok(self)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Experience of `mix_hash` across all configured chains.
    ///
    /// Full-weight points are summed as integers; only fractionally weighted
    /// points go through `f64` before the floor.
    pub fn experience(&self, mix_hash: &MixHash) -> Result<u64, ScoreError> {
        let mut weighted = 0.0f64;
        let mut exact: u64 = 0;
        for ws in &self.sources {
            let points = ws.source.points(mix_hash)?;
            debug!(chain = ws.source.name(), points, weight = ws.weight, "points");
            if ws.weight == 1.0 {
                exact = exact.saturating_add(points);
            } else {
                weighted += points as f64 * ws.weight;
            }
        }
        let bonus = (EXP_PER_POINT as f64 * weighted).floor() as u64;
        Ok(experience_from_points(exact).saturating_add(bonus))
    }
}

/// In-memory point counts for one chain. Unknown items have zero points.
#[derive(Debug, Clone, Default)]
pub struct FixedPoints {
    name: String,
    points: HashMap<MixHash, u64>,
}

impl FixedPoints {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: HashMap::new(),
        }
    }

    pub fn with(mut self, mix_hash: MixHash, points: u64) -> Self {
        self.points.insert(mix_hash, points);
        self
    }

    pub fn set(&mut self, mix_hash: MixHash, points: u64) {
        self.points.insert(mix_hash, points);
    }
}

impl PointSource for FixedPoints {
    fn name(&self) -> &str {
        &self.name
    }

    fn points(&self, mix_hash: &MixHash) -> Result<u64, ScoreError> {
        Ok(self.points.get(mix_hash).copied().unwrap_or(0))
    }
}
