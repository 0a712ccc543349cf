//! Errors raised while building scenarios and catalyzed reaction graphs.
//!
//! Every variant is a precondition violation detected before any expensive
//! work starts: nothing is enumerated, sampled, or mutated once one of these
//! is returned.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RafError {
    /// The alphabet has no letters.
    #[error("the alphabet must contain at least one monomer")]
    EmptyAlphabet,

    /// Polymers must be allowed at least one monomer.
    #[error("the maximum polymer length must be greater than 0 (got {0})")]
    InvalidMaxLength(usize),

    /// `k + k^2 + ... + k^L` does not fit in memory addressing.
    #[error("{letters} monomers up to length {max_length} yield too many polymers to enumerate")]
    PolymerSetTooLarge { letters: usize, max_length: usize },

    /// Reactions can only be enumerated over a non-empty polymer set.
    #[error("the polymer set cannot be empty")]
    EmptyPolymerSet,

    /// A food polymer was not generated from the alphabet.
    #[error("food polymer {0:?} is not in the polymer set")]
    FoodNotInPolymerSet(String),

    /// A catalyst id does not name a polymer in the polymer set.
    #[error("catalyst #{catalyst} of reaction #{reaction} is not in the polymer set")]
    CatalystNotInPolymerSet { reaction: usize, catalyst: usize },

    /// A catalysis assignment names a reaction id past the reaction set.
    #[error("reaction #{reaction} is out of range for {reactions} reactions")]
    UnknownReaction { reaction: usize, reactions: usize },

    /// A catalysis mapping was built for a different reaction set.
    #[error("catalysis covers {catalysis} reactions but the reaction set has {reactions}")]
    CatalysisSizeMismatch { catalysis: usize, reactions: usize },

    /// A sweep was configured with an empty or malformed grid.
    #[error("invalid sweep configuration: {0}")]
    InvalidSweep(String),
}
