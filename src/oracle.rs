use std::cell::RefCell;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::prelude::*;

/// A teacher that can be asked membership queries, the only interface a
/// learner needs to the target language. Outputs are usually `bool`, but any
/// comparable domain works.
pub trait MembershipOracle {
    /// The symbol type of queried words.
    type Symbol: Symbol;
    /// The output domain of the target.
    type Output: Clone + Eq + Debug;

    /// The output of the target on `word`.
    fn query(&self, word: &[Self::Symbol]) -> Self::Output;

    /// The output of the target on the concatenation of `prefix` and
    /// `suffix`. Counterexample analysis asks almost all of its queries in
    /// this split form, so realizations may want to avoid the intermediate
    /// allocation.
    fn query_parts(&self, prefix: &[Self::Symbol], suffix: &[Self::Symbol]) -> Self::Output {
        let mut word = Vec::with_capacity(prefix.len() + suffix.len());
        word.extend_from_slice(prefix);
        word.extend_from_slice(suffix);
        self.query(&word)
    }
}

impl<O: MembershipOracle> MembershipOracle for &O {
    type Symbol = O::Symbol;
    type Output = O::Output;

    fn query(&self, word: &[Self::Symbol]) -> Self::Output {
        O::query(self, word)
    }

    fn query_parts(&self, prefix: &[Self::Symbol], suffix: &[Self::Symbol]) -> Self::Output {
        O::query_parts(self, prefix, suffix)
    }
}

/// Answers membership queries from a known [`DFA`], which must be complete.
/// Useful for testing learners against a ground truth.
#[derive(Clone, Debug)]
pub struct DFAOracle<A: Alphabet = CharAlphabet> {
    automaton: DFA<A>,
}

impl<A: Alphabet> DFAOracle<A> {
    /// Wraps the given automaton.
    pub fn new(automaton: DFA<A>) -> Self {
        Self { automaton }
    }

    /// The automaton whose language is queried.
    pub fn automaton(&self) -> &DFA<A> {
        &self.automaton
    }
}

impl<A: Alphabet> MembershipOracle for DFAOracle<A> {
    type Symbol = A::Symbol;
    type Output = bool;

    fn query(&self, word: &[A::Symbol]) -> bool {
        self.automaton.accepts(word)
    }
}

/// Wraps an oracle and memoizes its answers, so each distinct word is only
/// ever queried once. Split queries are concatenated before the cache lookup.
pub struct CachingOracle<O: MembershipOracle> {
    inner: O,
    cache: RefCell<math::Map<Vec<O::Symbol>, O::Output>>,
}

impl<O: MembershipOracle> CachingOracle<O> {
    /// Puts a fresh cache in front of `inner`.
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: RefCell::new(math::Map::default()),
        }
    }

    /// Number of distinct words that were queried so far.
    pub fn distinct_queries(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<O: MembershipOracle> MembershipOracle for CachingOracle<O> {
    type Symbol = O::Symbol;
    type Output = O::Output;

    fn query(&self, word: &[Self::Symbol]) -> Self::Output {
        if let Some(output) = self.cache.borrow().get(word) {
            return output.clone();
        }
        let output = self.inner.query(word);
        self.cache
            .borrow_mut()
            .insert(word.to_vec(), output.clone());
        output
    }
}

/// Wraps an oracle and counts how often it is consulted. Since split queries
/// fall back to [`MembershipOracle::query`], each of them counts once.
pub struct CountingOracle<O> {
    inner: O,
    queries: AtomicUsize,
}

impl<O: MembershipOracle> CountingOracle<O> {
    /// Puts a query counter in front of `inner`.
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of queries answered so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl<O: MembershipOracle> MembershipOracle for CountingOracle<O> {
    type Symbol = O::Symbol;
    type Output = O::Output;

    fn query(&self, word: &[Self::Symbol]) -> Self::Output {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.inner.query(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even_as() -> DFA {
        DfaBuilder::default()
            .with_accepting([true, false])
            .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
            .into_dfa(0)
    }

    #[test]
    fn queries_and_parts() {
        let oracle = DFAOracle::new(even_as());
        assert!(oracle.automaton().equivalent(&even_as()));
        assert!(oracle.query(&[]));
        assert!(!oracle.query(&['a', 'b']));
        assert!(oracle.query_parts(&['a', 'b'], &['a']));
        assert_eq!(
            oracle.query_parts(&['a'], &['b', 'a']),
            oracle.query(&['a', 'b', 'a'])
        );
    }

    #[test]
    fn counting_and_caching() {
        let counting = CountingOracle::new(DFAOracle::new(even_as()));
        let caching = CachingOracle::new(&counting);

        assert!(caching.query(&['a', 'a']));
        assert!(caching.query(&['a', 'a']));
        assert!(!caching.query_parts(&['a'], &['b']));
        assert!(!caching.query(&['a', 'b']));

        assert_eq!(counting.queries(), 2);
        assert_eq!(caching.distinct_queries(), 2);
    }
}
