//! Polymers and exhaustive polymer enumeration.
//!
//! For an alphabet of `k` monomers and a maximum length `L`, enumerate every
//! string of length 1 through `L`: exactly `k + k^2 + ... + k^L` polymers.
//! Strings of a fixed length are produced by "odometer" counting in base `k`,
//! so they come out in lexicographic order under the alphabet's declared
//! ordering. Lengths are produced shortest first.

use std::{
    collections::HashMap,
    fmt::Display,
    ops::{Deref, Range},
};

use bit_set::BitSet;

use crate::{alphabet::Alphabet, error::RafError};

/// Index of a polymer in its [`PolymerSet`].
pub type PolymerId = usize;

/// An immutable string of monomers. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Polymer(Box<str>);

impl Polymer {
    pub fn new(s: &str) -> Self {
        Self(s.into())
    }

    /// Return the number of monomers in this polymer.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return `true` iff this polymer is a single monomer, which never
    /// decomposes.
    pub fn is_monomer(&self) -> bool {
        self.len() == 1
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Polymer {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Polymer {
    fn from(s: &str) -> Self {
        Polymer::new(s)
    }
}

impl From<String> for Polymer {
    fn from(s: String) -> Self {
        Self(s.into_boxed_str())
    }
}

impl Display for Polymer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every polymer over an alphabet up to a maximum length, stored once and
/// shared read-only by reactions, catalysis, and closure computations.
#[derive(Debug, Clone)]
pub struct PolymerSet {
    polymers: Vec<Polymer>,
    index: HashMap<Polymer, PolymerId>,
    // `offsets[n]` is the id of the first polymer of length `n + 1`;
    // `offsets[max_length]` is the total number of polymers.
    offsets: Vec<PolymerId>,
}

impl PolymerSet {
    /// Enumerate all polymers over `alphabet` with length in
    /// `1..=max_length`.
    pub fn enumerate(alphabet: &Alphabet, max_length: usize) -> Result<Self, RafError> {
        if max_length == 0 {
            return Err(RafError::InvalidMaxLength(max_length));
        }
        let too_large = RafError::PolymerSetTooLarge {
            letters: alphabet.len(),
            max_length,
        };
        let total = polymer_count(alphabet.len(), max_length).ok_or_else(|| too_large.clone())?;
        let bytes = total.checked_mul(std::mem::size_of::<Polymer>());
        if !matches!(bytes, Some(b) if b <= isize::MAX as usize) {
            return Err(too_large);
        }

        let mut polymers: Vec<Polymer> = Vec::new();
        polymers.try_reserve_exact(total).map_err(|_| too_large)?;
        let mut offsets = Vec::with_capacity(max_length + 1);
        for length in 1..=max_length {
            offsets.push(polymers.len());
            polymers.extend(polymers_of_length(alphabet.letters(), length));
        }
        offsets.push(polymers.len());

        Ok(Self::from_parts(polymers, offsets))
    }

    /// Build a set from arbitrary polymers, regrouping them by length. Used
    /// for hand-built chemistries; repeated polymers are kept once.
    pub fn from_polymers<P: Into<Polymer>>(
        polymers: impl IntoIterator<Item = P>,
    ) -> Result<Self, RafError> {
        let mut polymers: Vec<Polymer> = polymers.into_iter().map(Into::into).collect();
        polymers.retain(|p| !p.is_empty());
        if polymers.is_empty() {
            return Err(RafError::EmptyPolymerSet);
        }

        // Stable sort keeps the caller's order within each length.
        polymers.sort_by_key(|p| p.len());
        let mut seen = std::collections::HashSet::new();
        polymers.retain(|p| seen.insert(p.clone()));

        let max_length = polymers.last().map_or(0, |p| p.len());
        let offsets = (1..=max_length + 1)
            .map(|length| polymers.partition_point(|p| p.len() < length))
            .collect();

        Ok(Self::from_parts(polymers, offsets))
    }

    fn from_parts(polymers: Vec<Polymer>, offsets: Vec<PolymerId>) -> Self {
        let index = polymers
            .iter()
            .enumerate()
            .map(|(id, p)| (p.clone(), id))
            .collect();
        Self {
            polymers,
            index,
            offsets,
        }
    }

    pub fn len(&self) -> usize {
        self.polymers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polymers.is_empty()
    }

    /// Return the length of the longest polymer.
    pub fn max_length(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn get(&self, id: PolymerId) -> Option<&Polymer> {
        self.polymers.get(id)
    }

    /// Look a polymer up by value.
    pub fn id_of(&self, polymer: &str) -> Option<PolymerId> {
        self.index.get(&Polymer::new(polymer)).copied()
    }

    pub fn contains(&self, polymer: &str) -> bool {
        self.id_of(polymer).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PolymerId, &Polymer)> + '_ {
        self.polymers.iter().enumerate()
    }

    /// Return the contiguous range of ids holding polymers of `length`.
    pub fn of_length(&self, length: usize) -> Range<PolymerId> {
        if length == 0 || length > self.max_length() {
            return 0..0;
        }
        self.offsets[length - 1]..self.offsets[length]
    }

    /// Return the ids of every polymer no longer than `length`.
    pub fn up_to_length(&self, length: usize) -> BitSet {
        let end = self.offsets[length.min(self.max_length())];
        BitSet::from_iter(0..end)
    }
}

impl std::ops::Index<PolymerId> for PolymerSet {
    type Output = Polymer;
    fn index(&self, id: PolymerId) -> &Polymer {
        &self.polymers[id]
    }
}

/// Return `k + k^2 + ... + k^max_length`, or `None` on overflow.
pub fn polymer_count(letters: usize, max_length: usize) -> Option<usize> {
    let mut total: usize = 0;
    let mut power: usize = 1;
    for _ in 0..max_length {
        power = power.checked_mul(letters)?;
        total = total.checked_add(power)?;
    }
    Some(total)
}

/// Return every string of exactly `length` letters in odometer order. An
/// empty letter slice yields nothing.
pub fn polymers_of_length(letters: &[char], length: usize) -> Vec<Polymer> {
    if letters.is_empty() || length == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    // Digits index into `letters`; start from the all-first-letter string.
    let mut digits = vec![0usize; length];
    loop {
        out.push(Polymer::from(
            digits.iter().map(|&d| letters[d]).collect::<String>(),
        ));

        // Increment the rightmost digit, carrying left on wraparound. The
        // count is exhausted once the leftmost digit would wrap.
        let mut pos = length;
        loop {
            if pos == 0 {
                return out;
            }
            pos -= 1;
            digits[pos] += 1;
            if digits[pos] < letters.len() {
                break;
            }
            digits[pos] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ab() -> Alphabet {
        Alphabet::new(['A', 'B']).unwrap()
    }

    #[test]
    fn odometer_order_follows_alphabet() {
        let ba = ['B', 'A'];
        let strings: Vec<String> = polymers_of_length(&ba, 2)
            .into_iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(strings, ["BB", "BA", "AB", "AA"]);
    }

    #[test]
    fn carries_ripple_across_positions() {
        let strings: Vec<String> = polymers_of_length(&['A', 'B'], 3)
            .into_iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            strings,
            ["AAA", "AAB", "ABA", "ABB", "BAA", "BAB", "BBA", "BBB"]
        );
    }

    #[test]
    fn empty_letters_yield_nothing() {
        assert!(polymers_of_length(&[], 3).is_empty());
    }

    #[test]
    fn counts_match_geometric_sum() {
        for (letters, max_length) in [(1, 5), (2, 4), (3, 3), (4, 2)] {
            let alphabet = Alphabet::new("ABCD".chars().take(letters)).unwrap();
            let set = PolymerSet::enumerate(&alphabet, max_length).unwrap();
            let expected: usize = (1..=max_length as u32).map(|n| letters.pow(n)).sum();
            assert_eq!(set.len(), expected);

            let uniq: HashSet<&str> = set.iter().map(|(_, p)| p.as_str()).collect();
            assert_eq!(uniq.len(), expected);
            assert!(set.iter().all(|(_, p)| (1..=max_length).contains(&p.len())));
        }
    }

    #[test]
    fn grouped_by_length() {
        let set = PolymerSet::enumerate(&ab(), 3).unwrap();
        assert_eq!(set.of_length(1), 0..2);
        assert_eq!(set.of_length(2), 2..6);
        assert_eq!(set.of_length(3), 6..14);
        assert_eq!(set.of_length(4), 0..0);
        assert_eq!(set.max_length(), 3);
        assert_eq!(set.up_to_length(2).len(), 6);
        assert_eq!(set.id_of("AB"), Some(3));
        assert_eq!(set[3].as_str(), "AB");
        assert!(!set.contains("C"));
    }

    #[test]
    fn zero_length_fails() {
        assert_eq!(
            PolymerSet::enumerate(&ab(), 0).unwrap_err(),
            RafError::InvalidMaxLength(0)
        );
    }

    #[test]
    fn overflow_is_reported() {
        let err = PolymerSet::enumerate(&ab(), 200).unwrap_err();
        assert!(matches!(err, RafError::PolymerSetTooLarge { .. }));
    }

    #[test]
    fn unallocatable_sets_are_reported() {
        // 2^63 - 2 polymers fit in a usize count but not in memory.
        assert!(polymer_count(2, 62).is_some());
        let err = PolymerSet::enumerate(&ab(), 62).unwrap_err();
        assert_eq!(
            err,
            RafError::PolymerSetTooLarge {
                letters: 2,
                max_length: 62
            }
        );
    }

    #[test]
    fn hand_built_sets_regroup() {
        let set = PolymerSet::from_polymers(["AB", "A", "B", "A"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.of_length(1), 0..2);
        assert_eq!(set.of_length(2), 2..3);
        assert!(PolymerSet::from_polymers(Vec::<&str>::new()).is_err());
    }
}
