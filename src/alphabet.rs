use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::prelude::*;

/// A symbol of an alphabet, which is also the type of the symbols in a word.
/// This is trivially implemented for everything that behaves like a small,
/// copyable and orderable token, in particular for `char`.
pub trait Symbol: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash + Show {}
impl<S: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash + Show> Symbol for S {}

/// An alphabet abstracts a finite collection of [`Symbol`]s. Words are slices
/// of symbols, and automata over an alphabet key their transitions by the
/// position a symbol takes in it.
pub trait Alphabet: Clone + Debug {
    /// The type of symbols in this alphabet.
    type Symbol: Symbol;

    /// Type for an iterator over all symbols in the alphabet.
    type Universe<'this>: Iterator<Item = Self::Symbol>
    where
        Self: 'this;

    /// Returns an iterator over all symbols in the alphabet.
    fn universe(&self) -> Self::Universe<'_>;

    /// Returns the number of symbols in the alphabet.
    fn size(&self) -> usize;

    /// Returns true if the given symbol is present in the alphabet.
    fn contains(&self, symbol: Self::Symbol) -> bool;

    /// Returns the position that `symbol` takes in the alphabet, which dense
    /// transition tables use as column index.
    fn position(&self, symbol: Self::Symbol) -> Option<usize>;

    /// Returns true if the alphabet has no symbols at all.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Represents an alphabet where a [`Symbol`] is just a single `char`.
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct CharAlphabet(pub(crate) Vec<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] of the given size. The symbols are just
    /// the first `size` letters of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size < 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// Creates a new [`CharAlphabet`] from an iterator over the symbols.
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self(symbols.into_iter().collect())
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        Self(value)
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().unique().sorted().collect())
    }
}

impl Alphabet for CharAlphabet {
    type Symbol = char;

    type Universe<'this> = std::iter::Cloned<std::slice::Iter<'this, char>>
        where
            Self: 'this;

    fn universe(&self) -> Self::Universe<'_> {
        self.0.iter().cloned()
    }

    fn size(&self) -> usize {
        self.0.len()
    }

    fn contains(&self, symbol: Self::Symbol) -> bool {
        self.0.contains(&symbol)
    }

    fn position(&self, symbol: Self::Symbol) -> Option<usize> {
        self.0.iter().position(|sym| *sym == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_alphabet() {
        let alphabet = CharAlphabet::of_size(3);
        assert_eq!(alphabet.size(), 3);
        assert!(alphabet.contains('c'));
        assert!(!alphabet.contains('d'));
        for (position, symbol) in alphabet.universe().enumerate() {
            assert_eq!(alphabet.position(symbol), Some(position));
            assert_eq!(alphabet[position], symbol);
        }
    }

    #[test]
    fn collecting_deduplicates_and_sorts() {
        let alphabet: CharAlphabet = ['b', 'a', 'b', 'c', 'a'].into_iter().collect();
        assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!['a', 'b', 'c']);
    }
}
