//! Catalyzed reaction graphs and their maximal RAF subsets.
//!
//! A set of reactions `R'` is a RAF (reflexively autocatalytic and
//! food-generated) set when every reaction in `R'` has all of its reactants
//! and at least one of its catalysts in the closure of the food set under
//! `R'`. The closure of the food set under `R'` is the smallest set of
//! polymers containing the food and every product of a reaction in `R'`
//! whose reactants are all in it.
//!
//! The maximal RAF is found by iterative pruning:
//! 1. Start with every reaction in the working set.
//! 2. Compute the closure of the food set under the working set.
//! 3. Drop each reaction missing a reactant or a catalyst in that closure.
//! 4. Repeat from 2 until a pass drops nothing.
//!
//! The working set only ever shrinks, so this takes at most `|R| + 1`
//! passes. Every reaction dropped belongs to no RAF contained in the working
//! set, so the union of all RAFs (itself a RAF) survives every pass and the
//! result is that union. Neither the result nor the pass count depends on
//! the order reactions are visited within a pass.

use bit_set::BitSet;
use clap::ValueEnum;
use tracing::{debug, trace};

use crate::{
    catalysis::{check_fits, Catalysis},
    error::RafError,
    polymer::{PolymerId, PolymerSet},
    reaction::{ReactionId, ReactionSet},
};

/// Strategy for computing the closure of the food set within each pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum ClosureMode {
    /// Rescan every working reaction until a scan makes nothing new
    /// available. Quadratic in the worst case.
    Sweep,
    /// Track the number of unavailable reactants of each working reaction and
    /// fire reactions from a queue as their count reaches zero. Linear in the
    /// total number of reactants.
    #[default]
    Worklist,
}

/// A set of polymers, a food set, and a set of reactions with catalysts.
///
/// The polymer and reaction sets are borrowed from the scenario that
/// enumerated them; the food set and catalysis belong to this graph alone.
#[derive(Debug, Clone)]
pub struct CatalyzedReactionGraph<'a> {
    polymers: &'a PolymerSet,
    reactions: &'a ReactionSet,
    food: BitSet,
    catalysis: Catalysis,
    // Reactant ids of each reaction with repeats removed.
    distinct_reactants: Vec<Vec<PolymerId>>,
    // For each polymer, the reactions consuming it (once per reaction).
    consumers: Vec<Vec<ReactionId>>,
}

impl<'a> CatalyzedReactionGraph<'a> {
    /// Assemble a graph, checking that `food` and every catalyst only name
    /// polymers in `polymers` and that `catalysis` covers exactly
    /// `reactions`.
    pub fn new(
        polymers: &'a PolymerSet,
        reactions: &'a ReactionSet,
        food: BitSet,
        catalysis: Catalysis,
    ) -> Result<Self, RafError> {
        if let Some(stray) = food.iter().find(|&id| id >= polymers.len()) {
            return Err(RafError::FoodNotInPolymerSet(format!("#{stray}")));
        }
        check_fits(&catalysis, polymers, reactions)?;

        let mut distinct_reactants = Vec::with_capacity(reactions.len());
        let mut consumers = vec![Vec::new(); polymers.len()];
        for (id, reaction) in reactions.iter() {
            let mut reactants = reaction.reactants().to_vec();
            reactants.sort_unstable();
            reactants.dedup();
            for &p in &reactants {
                consumers[p].push(id);
            }
            distinct_reactants.push(reactants);
        }

        Ok(Self {
            polymers,
            reactions,
            food,
            catalysis,
            distinct_reactants,
            consumers,
        })
    }

    pub fn polymers(&self) -> &'a PolymerSet {
        self.polymers
    }

    pub fn reactions(&self) -> &'a ReactionSet {
        self.reactions
    }

    pub fn food(&self) -> &BitSet {
        &self.food
    }

    pub fn catalysis(&self) -> &Catalysis {
        &self.catalysis
    }

    /// Return the maximal RAF subset of all reactions.
    pub fn raf(&self) -> Raf {
        self.raf_with(ClosureMode::default())
    }

    /// Like [`CatalyzedReactionGraph::raf`], with an explicit closure
    /// strategy.
    pub fn raf_with(&self, mode: ClosureMode) -> Raf {
        let all = BitSet::from_iter(0..self.reactions.len());
        self.max_raf_within(&all, mode)
    }

    /// Return the maximal RAF contained in `candidates`. Ids outside the
    /// reaction set are ignored.
    pub fn max_raf_within(&self, candidates: &BitSet, mode: ClosureMode) -> Raf {
        let mut working: BitSet = candidates
            .iter()
            .filter(|&id| id < self.reactions.len())
            .collect();

        let mut passes = 0;
        loop {
            passes += 1;
            let available = self.closure(&working, mode);

            let before = working.len();
            working = working
                .iter()
                .filter(|&id| self.is_supported(id, &available))
                .collect();
            trace!(
                pass = passes,
                retained = working.len(),
                dropped = before - working.len(),
                available = available.len(),
                "closure pass"
            );

            if working.len() == before {
                debug!(size = working.len(), passes, ?mode, "computed maximal RAF");
                return Raf {
                    reactions: working,
                    available,
                    passes,
                };
            }
        }
    }

    /// Return `true` iff `subset` is a RAF: every reaction in it has all of
    /// its reactants and some catalyst in the closure of the food set under
    /// `subset`. The empty set is trivially a RAF.
    pub fn is_raf(&self, subset: &BitSet) -> bool {
        if subset.iter().any(|id| id >= self.reactions.len()) {
            return false;
        }
        let available = self.closure(subset, ClosureMode::Worklist);
        subset.iter().all(|id| self.is_supported(id, &available))
    }

    /// Return the closure of the food set under the reactions in `working`.
    pub fn closure(&self, working: &BitSet, mode: ClosureMode) -> BitSet {
        match mode {
            ClosureMode::Sweep => self.sweep_closure(working),
            ClosureMode::Worklist => self.worklist_closure(working),
        }
    }

    fn sweep_closure(&self, working: &BitSet) -> BitSet {
        let mut available = self.food.clone();
        loop {
            let mut grew = false;
            for id in working.iter() {
                if self.distinct_reactants[id]
                    .iter()
                    .all(|&p| available.contains(p))
                {
                    for &p in self.reactions[id].products() {
                        grew |= available.insert(p);
                    }
                }
            }
            if !grew {
                return available;
            }
        }
    }

    fn worklist_closure(&self, working: &BitSet) -> BitSet {
        let mut available = self.food.clone();
        let mut missing = vec![0usize; self.reactions.len()];
        let mut ready = Vec::new();

        for id in working.iter() {
            missing[id] = self.distinct_reactants[id]
                .iter()
                .filter(|&&p| !available.contains(p))
                .count();
            if missing[id] == 0 {
                ready.push(id);
            }
        }

        while let Some(id) = ready.pop() {
            for &p in self.reactions[id].products() {
                if !available.insert(p) {
                    continue;
                }
                // `p` was unavailable until now, so it is counted in the
                // missing total of every working reaction consuming it.
                for &consumer in &self.consumers[p] {
                    if working.contains(consumer) {
                        missing[consumer] -= 1;
                        if missing[consumer] == 0 {
                            ready.push(consumer);
                        }
                    }
                }
            }
        }

        available
    }

    /// Materially and catalytically supported by `available`.
    fn is_supported(&self, id: ReactionId, available: &BitSet) -> bool {
        self.distinct_reactants[id]
            .iter()
            .all(|&p| available.contains(p))
            && !self.catalysis.catalysts_of(id).is_disjoint(available)
    }
}

/// The maximal RAF of a [`CatalyzedReactionGraph`], possibly empty.
///
/// Independent of the graph it was computed from; computing it again yields
/// an equal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raf {
    reactions: BitSet,
    available: BitSet,
    passes: usize,
}

impl Raf {
    /// Return the number of reactions in the RAF.
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    /// Return `true` iff no RAF exists.
    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn contains(&self, reaction: ReactionId) -> bool {
        self.reactions.contains(reaction)
    }

    /// Return the ids of the reactions in the RAF in increasing order.
    pub fn reactions(&self) -> impl Iterator<Item = ReactionId> + '_ {
        self.reactions.iter()
    }

    pub fn reaction_set(&self) -> &BitSet {
        &self.reactions
    }

    pub fn into_reaction_set(self) -> BitSet {
        self.reactions
    }

    /// Return the closure of the food set under the RAF's reactions.
    pub fn available(&self) -> &BitSet {
        &self.available
    }

    /// Return the number of pruning passes, including the final pass that
    /// dropped nothing.
    pub fn passes(&self) -> usize {
        self.passes
    }
}
