//! Random catalytic polymer chemistries and their RAF sets.
//!
//! Enumerate every polymer over an alphabet up to a maximum length, every
//! splice reaction between those polymers, assign catalysts at random, and
//! compute the maximal reflexively autocatalytic, food-generated (RAF) subset
//! of the reactions.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use raf_theory::{catalysis::Uniform, scenario::Scenario};
//!
//! let scenario = Scenario::build("AB".parse().unwrap(), 3).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let raf = scenario
//!     .generate(&Uniform(0.05), ["A", "B", "AA", "AB", "BA", "BB"], &mut rng)
//!     .unwrap();
//! println!("RAF with {} reactions", raf.len());
//! ```

// Monomer alphabets
pub mod alphabet;

// Polymer definition and enumeration
pub mod polymer;

// Splice reactions
pub mod reaction;

// Random catalyst assignment
pub mod catalysis;

// The hard bit: compute the maximal RAF
pub mod graph;

// Bipartite export for inspection
pub mod network;

// Entry points: build a chemistry, then catalyze it
pub mod scenario;

// Length/probability sweeps and their CSV stream
pub mod sweep;

pub mod error;

// Python library
#[cfg(feature = "python")]
pub mod python;
