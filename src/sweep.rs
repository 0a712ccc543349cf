//! Sequential parameter sweeps over polymer length and catalysis probability.
//!
//! For every maximum length in the sweep, one [`Scenario`] is built and then
//! catalyzed `runs` times at each probability on the grid. Each row records
//! how often a non-empty RAF appeared and the mean RAF size. Rows are written
//! as a flat CSV stream with the header
//! `M_Polymer,P_Catalysis,P_Closure,Mean_Reactions`.

use std::{io::Write, ops::RangeInclusive};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::{
    alphabet::Alphabet,
    catalysis::Uniform,
    error::RafError,
    graph::ClosureMode,
    scenario::Scenario,
};

pub const CSV_HEADER: [&str; 4] = ["M_Polymer", "P_Catalysis", "P_Closure", "Mean_Reactions"];

/// Parameters of a sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub alphabet: Alphabet,
    /// Maximum polymer lengths to sweep.
    pub lengths: RangeInclusive<usize>,
    /// First catalysis probability.
    pub p_start: f64,
    /// Last catalysis probability (inclusive, up to rounding).
    pub p_end: f64,
    pub p_step: f64,
    /// Trials per (length, probability) cell.
    pub runs: usize,
    /// Every polymer no longer than this is food.
    pub food_length: usize,
    pub seed: u64,
    pub mode: ClosureMode,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::binary(),
            lengths: 2..=6,
            p_start: 0.00001,
            p_end: 0.15,
            p_step: 0.001,
            runs: 1000,
            food_length: 2,
            seed: 0,
            mode: ClosureMode::Worklist,
        }
    }
}

impl SweepConfig {
    /// Check the grid is non-empty and finite.
    pub fn validate(&self) -> Result<(), RafError> {
        if self.lengths.is_empty() || *self.lengths.start() == 0 {
            return Err(RafError::InvalidSweep(format!(
                "length range {:?} must be non-empty and start above 0",
                self.lengths
            )));
        }
        if !(self.p_step > 0.0) || !self.p_start.is_finite() || !self.p_end.is_finite() {
            return Err(RafError::InvalidSweep(
                "probability grid needs a positive step and finite bounds".to_string(),
            ));
        }
        if self.p_start > self.p_end {
            return Err(RafError::InvalidSweep(format!(
                "p_start {} is above p_end {}",
                self.p_start, self.p_end
            )));
        }
        if self.runs == 0 {
            return Err(RafError::InvalidSweep("runs must be positive".to_string()));
        }
        Ok(())
    }

    /// Return the probability grid `p_start + i * p_step <= p_end`.
    pub fn probabilities(&self) -> Vec<f64> {
        // Tolerate accumulated rounding at the upper end.
        let slack = self.p_step * 1e-9;
        (0..)
            .map(|i| self.p_start + i as f64 * self.p_step)
            .take_while(|p| *p <= self.p_end + slack)
            .collect()
    }
}

/// One cell of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRecord {
    pub max_length: usize,
    pub probability: f64,
    /// Fraction of trials with a non-empty RAF.
    pub closure_frequency: f64,
    /// Mean number of reactions in the RAF, empty RAFs included.
    pub mean_reactions: f64,
}

impl SweepRecord {
    fn to_csv_record(self) -> [String; 4] {
        [
            self.max_length.to_string(),
            self.probability.to_string(),
            self.closure_frequency.to_string(),
            self.mean_reactions.to_string(),
        ]
    }
}

/// Run `runs` trials of `scenario` at catalysis probability `probability`.
pub fn run_cell<R: Rng>(
    scenario: &Scenario,
    food: &[&str],
    probability: f64,
    runs: usize,
    mode: ClosureMode,
    rng: &mut R,
) -> Result<SweepRecord, RafError> {
    if runs == 0 {
        return Err(RafError::InvalidSweep("runs must be positive".to_string()));
    }
    let mut closures = 0usize;
    let mut total_reactions = 0usize;
    for _ in 0..runs {
        // One generator per trial, seeded from the sweep's generator.
        let mut trial_rng = ChaCha8Rng::seed_from_u64(rng.gen());
        let graph = scenario.catalyze(&Uniform(probability), food, &mut trial_rng)?;
        let raf = graph.raf_with(mode);
        if !raf.is_empty() {
            closures += 1;
        }
        total_reactions += raf.len();
    }

    Ok(SweepRecord {
        max_length: scenario.max_length(),
        probability,
        closure_frequency: closures as f64 / runs as f64,
        mean_reactions: total_reactions as f64 / runs as f64,
    })
}

/// Run the sweep, handing each record to `sink` as soon as it is computed.
pub fn run_sweep<F>(config: &SweepConfig, mut sink: F) -> anyhow::Result<()>
where
    F: FnMut(SweepRecord) -> anyhow::Result<()>,
{
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let probabilities = config.probabilities();

    for max_length in config.lengths.clone() {
        info!(max_length, cells = probabilities.len(), "sweeping polymer length");
        let scenario = Scenario::build(config.alphabet.clone(), max_length)?;

        // The food set is taken from the scenario, so it always fits.
        let food_ids = scenario.polymers().up_to_length(config.food_length);
        let food: Vec<&str> = food_ids
            .iter()
            .map(|id| scenario.polymers()[id].as_str())
            .collect();

        for &p in &probabilities {
            let record = run_cell(&scenario, &food, p, config.runs, config.mode, &mut rng)?;
            info!(
                max_length,
                p,
                closure = record.closure_frequency,
                mean = record.mean_reactions,
                "sweep cell"
            );
            sink(record)?;
        }
    }
    Ok(())
}

/// Run the sweep and write every record as CSV to `out`.
pub fn write_sweep<W: Write>(config: &SweepConfig, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    run_sweep(config, |record| {
        writer.write_record(record.to_csv_record())?;
        writer.flush()?;
        Ok(())
    })?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SweepConfig {
        SweepConfig {
            lengths: 2..=3,
            p_start: 0.0,
            p_end: 1.0,
            p_step: 0.5,
            runs: 4,
            ..SweepConfig::default()
        }
    }

    #[test]
    fn default_sweeps_binary_alphabet() {
        let config = SweepConfig::default();
        assert_eq!(config.alphabet.to_string(), "AB");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn grid_includes_end() {
        let config = SweepConfig {
            p_start: 0.0,
            p_end: 0.3,
            p_step: 0.1,
            ..SweepConfig::default()
        };
        assert_eq!(config.probabilities().len(), 4);
    }

    #[test]
    fn extremes_of_probability() {
        let mut records = Vec::new();
        run_sweep(&small(), |r| {
            records.push(r);
            Ok(())
        })
        .unwrap();
        assert_eq!(records.len(), 6);

        for r in records.iter().filter(|r| r.probability == 0.0) {
            assert_eq!(r.closure_frequency, 0.0);
            assert_eq!(r.mean_reactions, 0.0);
        }
        // Food up to length 2 with every pair catalyzed keeps every reaction.
        let full = records
            .iter()
            .find(|r| r.max_length == 2 && r.probability == 1.0)
            .unwrap();
        assert_eq!(full.closure_frequency, 1.0);
        assert_eq!(full.mean_reactions, 8.0);
    }

    #[test]
    fn csv_stream_is_reproducible() {
        let run = || {
            let mut out = Vec::new();
            let config = SweepConfig {
                p_start: 0.1,
                p_end: 0.2,
                p_step: 0.1,
                ..small()
            };
            write_sweep(&config, &mut out).unwrap();
            String::from_utf8(out).unwrap()
        };
        let text = run();
        assert!(text.starts_with("M_Polymer,P_Catalysis,P_Closure,Mean_Reactions\n"));
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text, run());
    }

    #[test]
    fn invalid_grids_rejected() {
        let backwards = SweepConfig {
            p_start: 0.5,
            p_end: 0.1,
            ..small()
        };
        assert!(backwards.validate().is_err());

        let no_runs = SweepConfig { runs: 0, ..small() };
        assert!(no_runs.validate().is_err());

        let zero_length = SweepConfig {
            lengths: 0..=2,
            ..small()
        };
        assert!(zero_length.validate().is_err());
    }
}
