//! Aggregates over population snapshots for the statistics panel.

use crate::creature::CreatureType;
use crate::environment::{CreatureRecord, PopulationSnapshot};

/// Equal-width histogram over a set of trait values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f32,
    pub max: f32,
    pub bin_width: f32,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `ceil(sqrt(n))` buckets spanning their range.
    ///
    /// A value lands in the highest bucket whose lower edge it reaches, so the
    /// maximum shares the last bucket. Returns `None` for no values.
    pub fn from_values(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let bins = number_of_bins(values.len());
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let bin_width = (max - min) / bins as f32;

        let mut counts = vec![0; bins];
        for &value in values {
            let mut bin = 0;
            for candidate in 1..bins {
                if value >= min + candidate as f32 * bin_width {
                    bin = candidate;
                } else {
                    break;
                }
            }
            counts[bin] += 1;
        }

        Some(Self {
            min,
            max,
            bin_width,
            counts,
        })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn tallest(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Lower edge of bucket `index`.
    pub fn lower_bound(&self, index: usize) -> f32 {
        self.min + index as f32 * self.bin_width
    }
}

pub fn number_of_bins(samples: usize) -> usize {
    (samples as f64).sqrt().ceil() as usize
}

/// Mean of `values`, or `None` when there is nothing to average.
pub fn average(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

pub fn speeds_of(records: &[CreatureRecord], kind: CreatureType) -> Vec<f32> {
    records
        .iter()
        .filter(|record| record.kind == kind)
        .map(|record| record.max_velocity)
        .collect()
}

pub fn visions_of(records: &[CreatureRecord], kind: CreatureType) -> Vec<f32> {
    records
        .iter()
        .filter(|record| record.kind == kind)
        .map(|record| record.vision_radius)
        .collect()
}

/// `(max_velocity, vision_radius)` pairs for every hybrid creature.
pub fn hybrid_scatter(records: &[CreatureRecord]) -> Vec<(f32, f32)> {
    records
        .iter()
        .filter(|record| record.kind == CreatureType::Both)
        .map(|record| (record.max_velocity, record.vision_radius))
        .collect()
}

/// Head count per archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeciesCounts {
    pub speed: usize,
    pub intelligence: usize,
    pub both: usize,
}

impl SpeciesCounts {
    pub fn from_snapshot(snapshot: &PopulationSnapshot) -> Self {
        Self {
            speed: snapshot.count_of(CreatureType::Speed),
            intelligence: snapshot.count_of(CreatureType::Intelligence),
            both: snapshot.count_of(CreatureType::Both),
        }
    }

    pub fn get(&self, kind: CreatureType) -> usize {
        match kind {
            CreatureType::Speed => self.speed,
            CreatureType::Intelligence => self.intelligence,
            CreatureType::Both => self.both,
        }
    }

    pub fn total(&self) -> usize {
        self.speed + self.intelligence + self.both
    }
}

/// Per-generation counts in history order.
pub fn population_series(history: &[PopulationSnapshot]) -> Vec<SpeciesCounts> {
    history.iter().map(SpeciesCounts::from_snapshot).collect()
}

/// Largest total population seen, or 0 for an empty history.
pub fn highest_population(history: &[PopulationSnapshot]) -> usize {
    history.iter().map(PopulationSnapshot::total).max().unwrap_or(0)
}
