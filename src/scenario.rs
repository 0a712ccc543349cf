//! Build a chemistry once, then catalyze it and compute RAFs many times.
//!
//! A [`Scenario`] holds the polymer and reaction sets for one alphabet and
//! maximum length. Each call to [`Scenario::catalyze`] draws a fresh
//! catalysis into a new [`CatalyzedReactionGraph`] borrowing those sets, so
//! repeated Monte Carlo trials never reuse or reset catalyst assignments.

use bit_set::BitSet;
use rand::Rng;
use tracing::debug;

use crate::{
    alphabet::Alphabet,
    catalysis::{sample_catalysis, CatalysisProbability},
    error::RafError,
    graph::{CatalyzedReactionGraph, Raf},
    polymer::PolymerSet,
    reaction::ReactionSet,
};

#[derive(Debug, Clone)]
pub struct Scenario {
    alphabet: Alphabet,
    polymers: PolymerSet,
    reactions: ReactionSet,
}

impl Scenario {
    /// Enumerate every polymer over `alphabet` up to `max_length` and every
    /// splice reaction between them.
    pub fn build(alphabet: Alphabet, max_length: usize) -> Result<Self, RafError> {
        let polymers = PolymerSet::enumerate(&alphabet, max_length)?;
        let reactions = ReactionSet::enumerate(&polymers)?;
        debug!(
            %alphabet,
            max_length,
            polymers = polymers.len(),
            reactions = reactions.len(),
            "built scenario"
        );
        Ok(Self {
            alphabet,
            polymers,
            reactions,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn max_length(&self) -> usize {
        self.polymers.max_length()
    }

    pub fn polymers(&self) -> &PolymerSet {
        &self.polymers
    }

    pub fn reactions(&self) -> &ReactionSet {
        &self.reactions
    }

    /// Resolve polymer names to ids, failing on the first name not in the
    /// polymer set.
    pub fn food_set<S: AsRef<str>>(
        &self,
        food: impl IntoIterator<Item = S>,
    ) -> Result<BitSet, RafError> {
        food.into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.polymers
                    .id_of(name)
                    .ok_or_else(|| RafError::FoodNotInPolymerSet(name.to_string()))
            })
            .collect()
    }

    /// Validate `food`, then draw a catalysis from `probability` and `rng`.
    /// No random values are drawn if `food` is invalid.
    pub fn catalyze<P, R, S>(
        &self,
        probability: &P,
        food: impl IntoIterator<Item = S>,
        rng: &mut R,
    ) -> Result<CatalyzedReactionGraph<'_>, RafError>
    where
        P: CatalysisProbability + ?Sized,
        R: Rng,
        S: AsRef<str>,
    {
        let food = self.food_set(food)?;
        let catalysis = sample_catalysis(&self.polymers, &self.reactions, probability, rng);
        CatalyzedReactionGraph::new(&self.polymers, &self.reactions, food, catalysis)
    }

    /// Catalyze this scenario and return its maximal RAF.
    pub fn generate<P, R, S>(
        &self,
        probability: &P,
        food: impl IntoIterator<Item = S>,
        rng: &mut R,
    ) -> Result<Raf, RafError>
    where
        P: CatalysisProbability + ?Sized,
        R: Rng,
        S: AsRef<str>,
    {
        Ok(self.catalyze(probability, food, rng)?.raf())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::catalysis::Uniform;

    #[test]
    fn full_catalysis_keeps_everything() {
        let scenario = Scenario::build("AB".parse().unwrap(), 2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let raf = scenario
            .generate(&Uniform(1.0), ["A", "B"], &mut rng)
            .unwrap();
        assert_eq!(raf.len(), scenario.reactions().len());
        assert_eq!(raf.len(), 8);
    }

    #[test]
    fn bad_food_draws_nothing() {
        let scenario = Scenario::build("AB".parse().unwrap(), 2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = scenario
            .generate(&Uniform(1.0), ["A", "C"], &mut rng)
            .unwrap_err();
        assert_eq!(err, RafError::FoodNotInPolymerSet("C".to_string()));

        // The generator was left untouched.
        let mut fresh = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn build_rejects_zero_length() {
        let err = Scenario::build("AB".parse().unwrap(), 0).unwrap_err();
        assert_eq!(err, RafError::InvalidMaxLength(0));
    }
}
