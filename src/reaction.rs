//! Splice reactions between polymers.
//!
//! Every polymer of length `n >= 2` can be cut at each of its `n - 1`
//! internal boundaries. Each cut yields a decomposition reaction (whole ->
//! left + right) and its mirror composition reaction (left + right -> whole).
//! Monomers are atomic and never take part as the "whole" side.
//!
//! Enumeration only produces reactions; whether their reactants can ever be
//! made from a food set is decided later by the closure computation.

use std::fmt::Display;

use crate::{
    error::RafError,
    polymer::{PolymerId, PolymerSet},
};

/// Index of a reaction in its [`ReactionSet`].
pub type ReactionId = usize;

/// Direction of a splice reaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReactionKind {
    /// One polymer splits into a left and a right part.
    Decomposition,
    /// A left and a right part join into one polymer.
    Composition,
}

/// An immutable reaction over polymer ids. Reactants and products are
/// multisets, so `A + A -> AA` lists `A` twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reaction {
    reactants: Vec<PolymerId>,
    products: Vec<PolymerId>,
    kind: ReactionKind,
    splice: usize,
}

impl Reaction {
    pub fn reactants(&self) -> &[PolymerId] {
        &self.reactants
    }

    pub fn products(&self) -> &[PolymerId] {
        &self.products
    }

    pub fn kind(&self) -> ReactionKind {
        self.kind
    }

    /// Return the number of monomers in the left part.
    pub fn splice(&self) -> usize {
        self.splice
    }

    /// Return the id of the unspliced polymer.
    pub fn whole(&self) -> PolymerId {
        match self.kind {
            ReactionKind::Decomposition => self.reactants[0],
            ReactionKind::Composition => self.products[0],
        }
    }

    /// Return `(left, right)` ids of the spliced parts.
    pub fn parts(&self) -> (PolymerId, PolymerId) {
        let parts = match self.kind {
            ReactionKind::Decomposition => &self.products,
            ReactionKind::Composition => &self.reactants,
        };
        (parts[0], parts[1])
    }

    /// Return `true` iff `other` swaps this reaction's reactants and products.
    pub fn is_reverse_of(&self, other: &Reaction) -> bool {
        self.reactants == other.products && self.products == other.reactants
    }

    /// Return a printable form such as `AB -> A + B`.
    pub fn describe(&self, polymers: &PolymerSet) -> String {
        let side = |ids: &[PolymerId]| {
            ids.iter()
                .map(|&id| polymers[id].as_str())
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("{} -> {}", side(&self.reactants), side(&self.products))
    }
}

impl Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionKind::Decomposition => write!(f, "decomposition"),
            ReactionKind::Composition => write!(f, "composition"),
        }
    }
}

/// Every splice reaction over a [`PolymerSet`].
///
/// Decompositions sit at even ids and their mirror compositions directly
/// after them, so `reverse_of(id) == id ^ 1`.
#[derive(Debug, Clone)]
pub struct ReactionSet {
    reactions: Vec<Reaction>,
}

impl ReactionSet {
    /// Enumerate reactions by decreasing polymer length, then polymer order,
    /// then splice index.
    pub fn enumerate(polymers: &PolymerSet) -> Result<Self, RafError> {
        if polymers.is_empty() {
            return Err(RafError::EmptyPolymerSet);
        }

        let mut reactions = Vec::new();
        for length in (2..=polymers.max_length()).rev() {
            for whole in polymers.of_length(length) {
                let s = polymers[whole].as_str();
                for (splice, (cut, _)) in s.char_indices().skip(1).enumerate() {
                    // Parts of a polymer in the set are in the set as long as
                    // the set is closed under substrings, which enumeration
                    // guarantees; hand-built sets may skip some cuts.
                    let (Some(left), Some(right)) =
                        (polymers.id_of(&s[..cut]), polymers.id_of(&s[cut..]))
                    else {
                        continue;
                    };

                    let splice = splice + 1;
                    reactions.push(Reaction {
                        reactants: vec![whole],
                        products: vec![left, right],
                        kind: ReactionKind::Decomposition,
                        splice,
                    });
                    reactions.push(Reaction {
                        reactants: vec![left, right],
                        products: vec![whole],
                        kind: ReactionKind::Composition,
                        splice,
                    });
                }
            }
        }

        Ok(Self { reactions })
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn get(&self, id: ReactionId) -> Option<&Reaction> {
        self.reactions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReactionId, &Reaction)> + '_ {
        self.reactions.iter().enumerate()
    }

    /// Return the id of the exact reverse of reaction `id`.
    pub fn reverse_of(&self, id: ReactionId) -> ReactionId {
        id ^ 1
    }
}

impl std::ops::Index<ReactionId> for ReactionSet {
    type Output = Reaction;
    fn index(&self, id: ReactionId) -> &Reaction {
        &self.reactions[id]
    }
}
