//! Ordered, de-duplicated sets of monomer symbols.

use std::{fmt::Display, str::FromStr};

use crate::error::RafError;

/// The monomers polymers are drawn from, in their declared order.
///
/// The declared order fixes the enumeration order of polymers: the first
/// letter plays the role of the digit 0 in the odometer count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Construct an [`Alphabet`] from `letters`, dropping repeats but keeping
    /// the order of first occurrence.
    pub fn new(letters: impl IntoIterator<Item = char>) -> Result<Self, RafError> {
        let mut uniq: Vec<char> = Vec::new();
        for letter in letters {
            if !uniq.contains(&letter) {
                uniq.push(letter);
            }
        }

        if uniq.is_empty() {
            return Err(RafError::EmptyAlphabet);
        }
        Ok(Self { letters: uniq })
    }

    /// The two-letter alphabet `AB` used by default sweeps.
    pub(crate) fn binary() -> Self {
        Self {
            letters: vec!['A', 'B'],
        }
    }

    /// Return the letters in declared order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Return the number of distinct monomers.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always `false`; an [`Alphabet`] cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Return the position of `letter` in the declared order.
    pub fn position(&self, letter: char) -> Option<usize> {
        self.letters.iter().position(|&c| c == letter)
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: String = self.letters.iter().collect();
        write!(f, "{s}")
    }
}

/// Parses either a bare run of letters (`"AB"`) or a comma and/or whitespace
/// separated list (`"A, B"`). Separators are never monomers.
impl FromStr for Alphabet {
    type Err = RafError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::new(s.chars().filter(|c| *c != ',' && !c.is_whitespace()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let alphabet = Alphabet::new("BAB".chars()).unwrap();
        assert_eq!(alphabet.letters(), &['B', 'A']);
        assert_eq!(alphabet.position('A'), Some(1));
    }

    #[test]
    fn empty_alphabet_fails() {
        assert_eq!(Alphabet::new(std::iter::empty::<char>()), Err(RafError::EmptyAlphabet));
        assert_eq!("  , ".parse::<Alphabet>(), Err(RafError::EmptyAlphabet));
    }

    #[test]
    fn parse_lists_and_runs() {
        let run: Alphabet = "AB".parse().unwrap();
        let list: Alphabet = "A, B".parse().unwrap();
        assert_eq!(run, list);
        assert_eq!(run.to_string(), "AB");
        assert!(!run.contains(','));
    }

    #[test]
    fn binary_matches_parsed_ab() {
        assert_eq!(Alphabet::binary(), "AB".parse().unwrap());
    }
}
