//! Random assignment of catalysts to reactions.
//!
//! For every (polymer, reaction) pair the sampler draws one uniform value in
//! `[0, 1)` and makes the polymer a catalyst of the reaction iff the value is
//! below the caller's probability for that pair. Exactly `|P| * |R|` values
//! are drawn, reactions outer and polymers inner, so a seeded generator
//! reproduces the same assignment.

use bit_set::BitSet;
use rand::Rng;
use tracing::debug;

use crate::{
    error::RafError,
    polymer::{Polymer, PolymerId, PolymerSet},
    reaction::{Reaction, ReactionId, ReactionSet},
};

/// Probability that a polymer catalyzes a reaction.
///
/// Treated as a pure oracle: it is asked exactly once per pair and never
/// mutated. Values at or above 1 always catalyze; values at or below 0 (and
/// NaN) never do.
pub trait CatalysisProbability {
    fn probability(&self, catalyst: &Polymer, reaction: &Reaction) -> f64;
}

impl<F> CatalysisProbability for F
where
    F: Fn(&Polymer, &Reaction) -> f64,
{
    fn probability(&self, catalyst: &Polymer, reaction: &Reaction) -> f64 {
        self(catalyst, reaction)
    }
}

/// The same catalysis probability for every pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Uniform(pub f64);

impl CatalysisProbability for Uniform {
    fn probability(&self, _: &Polymer, _: &Reaction) -> f64 {
        self.0
    }
}

/// The catalysts of each reaction, indexed by [`ReactionId`]. Built once and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalysis {
    catalysts: Vec<BitSet>,
}

impl Catalysis {
    /// A catalysis in which no reaction is catalyzed.
    pub fn none(num_reactions: usize) -> Self {
        Self {
            catalysts: vec![BitSet::new(); num_reactions],
        }
    }

    /// Build a catalysis from explicit `(reaction, catalyst)` assignments.
    /// Catalyst ids are checked against a polymer set when the catalysis is
    /// put into a graph.
    pub fn from_assignments(
        num_reactions: usize,
        assignments: impl IntoIterator<Item = (ReactionId, PolymerId)>,
    ) -> Result<Self, RafError> {
        let mut catalysts = vec![BitSet::new(); num_reactions];
        for (reaction, catalyst) in assignments {
            let set = catalysts
                .get_mut(reaction)
                .ok_or(RafError::UnknownReaction {
                    reaction,
                    reactions: num_reactions,
                })?;
            set.insert(catalyst);
        }
        Ok(Self { catalysts })
    }

    /// Return the number of reactions covered.
    pub fn len(&self) -> usize {
        self.catalysts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalysts.is_empty()
    }

    /// Return the ids of the polymers catalyzing `reaction`.
    pub fn catalysts_of(&self, reaction: ReactionId) -> &BitSet {
        &self.catalysts[reaction]
    }

    /// Return the total number of (catalyst, reaction) pairs.
    pub fn num_pairs(&self) -> usize {
        self.catalysts.iter().map(BitSet::len).sum()
    }

    /// Return the number of reactions with at least one catalyst.
    pub fn num_catalyzed(&self) -> usize {
        self.catalysts.iter().filter(|c| !c.is_empty()).count()
    }
}

/// Draw a [`Catalysis`] for `reactions` over `polymers`.
pub fn sample_catalysis<P, R>(
    polymers: &PolymerSet,
    reactions: &ReactionSet,
    probability: &P,
    rng: &mut R,
) -> Catalysis
where
    P: CatalysisProbability + ?Sized,
    R: Rng,
{
    let mut catalysts = Vec::with_capacity(reactions.len());
    for (_, reaction) in reactions.iter() {
        let mut set = BitSet::with_capacity(polymers.len());
        for (id, polymer) in polymers.iter() {
            let chance: f64 = rng.gen();
            if chance < probability.probability(polymer, reaction) {
                set.insert(id);
            }
        }
        catalysts.push(set);
    }

    let catalysis = Catalysis { catalysts };
    debug!(
        pairs = catalysis.num_pairs(),
        catalyzed = catalysis.num_catalyzed(),
        reactions = reactions.len(),
        "sampled catalysis"
    );
    catalysis
}

/// Check that `catalysis` was built for `reactions` and only names polymers
/// in `polymers`.
pub(crate) fn check_fits(
    catalysis: &Catalysis,
    polymers: &PolymerSet,
    reactions: &ReactionSet,
) -> Result<(), RafError> {
    if catalysis.len() != reactions.len() {
        return Err(RafError::CatalysisSizeMismatch {
            catalysis: catalysis.len(),
            reactions: reactions.len(),
        });
    }
    for (reaction, catalysts) in catalysis.catalysts.iter().enumerate() {
        if let Some(catalyst) = catalysts.iter().find(|&id| id >= polymers.len()) {
            return Err(RafError::CatalystNotInPolymerSet { reaction, catalyst });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{alphabet::Alphabet, reaction::ReactionKind};

    fn chemistry() -> (PolymerSet, ReactionSet) {
        let alphabet: Alphabet = "AB".parse().unwrap();
        let polymers = PolymerSet::enumerate(&alphabet, 3).unwrap();
        let reactions = ReactionSet::enumerate(&polymers).unwrap();
        (polymers, reactions)
    }

    #[test]
    fn same_seed_same_assignment() {
        let (polymers, reactions) = chemistry();
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            sample_catalysis(&polymers, &reactions, &Uniform(0.2), &mut rng)
        };
        assert_eq!(draw(7), draw(7));
        assert_ne!(draw(7), draw(8));
    }

    #[test]
    fn probability_bounds() {
        let (polymers, reactions) = chemistry();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let all = sample_catalysis(&polymers, &reactions, &Uniform(1.0), &mut rng);
        assert_eq!(all.num_pairs(), polymers.len() * reactions.len());

        let none = sample_catalysis(&polymers, &reactions, &Uniform(0.0), &mut rng);
        assert_eq!(none, Catalysis::none(reactions.len()));

        let nan = sample_catalysis(&polymers, &reactions, &Uniform(f64::NAN), &mut rng);
        assert_eq!(nan.num_pairs(), 0);
    }

    #[test]
    fn oracle_sees_each_pair() {
        let (polymers, reactions) = chemistry();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        // Only monomers catalyze, and only compositions.
        let oracle = |catalyst: &Polymer, reaction: &Reaction| {
            if catalyst.is_monomer() && reaction.kind() == ReactionKind::Composition {
                1.0
            } else {
                0.0
            }
        };
        let catalysis = sample_catalysis(&polymers, &reactions, &oracle, &mut rng);

        for (id, reaction) in reactions.iter() {
            let expected = match reaction.kind() {
                ReactionKind::Composition => 2,
                ReactionKind::Decomposition => 0,
            };
            assert_eq!(catalysis.catalysts_of(id).len(), expected);
        }
    }

    #[test]
    fn explicit_assignments() {
        let catalysis = Catalysis::from_assignments(3, [(0, 4), (0, 5), (2, 1)]).unwrap();
        assert_eq!(catalysis.num_pairs(), 3);
        assert_eq!(catalysis.num_catalyzed(), 2);
        assert!(catalysis.catalysts_of(1).is_empty());
    }

    #[test]
    fn assignment_past_last_reaction_rejected() {
        let err = Catalysis::from_assignments(2, [(0, 0), (5, 0)]).unwrap_err();
        assert_eq!(
            err,
            RafError::UnknownReaction {
                reaction: 5,
                reactions: 2
            }
        );
    }
}
