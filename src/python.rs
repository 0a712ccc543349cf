use pyo3::{exceptions::PyValueError, prelude::*};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    alphabet::Alphabet, catalysis::Uniform, error::RafError, graph::ClosureMode,
    scenario::Scenario, sweep::run_cell,
};

impl From<RafError> for PyErr {
    fn from(err: RafError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Size of the maximal RAF of one random catalysis.
#[pyfunction]
#[pyo3(signature = (alphabet, max_length, probability, food, seed=0))]
fn raf_size(
    alphabet: &str,
    max_length: usize,
    probability: f64,
    food: Vec<String>,
    seed: u64,
) -> PyResult<usize> {
    let scenario = Scenario::build(alphabet.parse::<Alphabet>()?, max_length)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let raf = scenario.generate(&Uniform(probability), &food, &mut rng)?;
    Ok(raf.len())
}

/// Fraction of `runs` random catalyses with a non-empty RAF, and their mean
/// RAF size.
#[pyfunction]
#[pyo3(signature = (alphabet, max_length, probability, food, runs, seed=0))]
fn closure_frequency(
    alphabet: &str,
    max_length: usize,
    probability: f64,
    food: Vec<String>,
    runs: usize,
    seed: u64,
) -> PyResult<(f64, f64)> {
    let scenario = Scenario::build(alphabet.parse::<Alphabet>()?, max_length)?;
    let food: Vec<&str> = food.iter().map(String::as_str).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let record = run_cell(
        &scenario,
        &food,
        probability,
        runs,
        ClosureMode::Worklist,
        &mut rng,
    )?;
    Ok((record.closure_frequency, record.mean_reactions))
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn raf_theory(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(raf_size, m)?)?;
    m.add_function(wrap_pyfunction!(closure_frequency, m)?)?;
    Ok(())
}
