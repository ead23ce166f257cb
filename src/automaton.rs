use std::collections::VecDeque;
use std::fmt::Debug;

use fixedbitset::FixedBitSet;
use tabled::builder::Builder;

use crate::prelude::*;

/// Index type for states of a [`DFA`]. States are numbered contiguously in
/// the order of their creation.
pub type StateId = usize;

/// A deterministic finite automaton over the symbols of `A`, stored as a
/// dense transition table. States are never removed and their acceptance is
/// fixed on creation, while transitions may be inserted and redirected freely.
/// This is exactly the shape of hypothesis an incremental learner grows.
#[derive(Clone)]
pub struct DFA<A: Alphabet = CharAlphabet> {
    alphabet: A,
    accepting: Vec<bool>,
    table: Vec<Option<StateId>>,
    initial: Option<StateId>,
}

impl<A: Alphabet> DFA<A> {
    /// Creates an automaton without any states.
    pub fn for_alphabet(alphabet: A) -> Self {
        Self {
            alphabet,
            accepting: vec![],
            table: vec![],
            initial: None,
        }
    }

    /// The alphabet this automaton operates on.
    pub fn alphabet(&self) -> &A {
        &self.alphabet
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.accepting.len()
    }

    /// True if the automaton has no states at all.
    pub fn is_empty(&self) -> bool {
        self.accepting.is_empty()
    }

    /// An iterator over all state indices.
    pub fn state_indices(&self) -> std::ops::Range<StateId> {
        0..self.size()
    }

    /// The initial state, if one was added.
    pub fn initial(&self) -> Option<StateId> {
        self.initial
    }

    /// Adds a fresh state with the given acceptance and returns its index.
    pub fn add_state(&mut self, accepting: bool) -> StateId {
        let id = self.size();
        self.accepting.push(accepting);
        self.table
            .extend(std::iter::repeat(None).take(self.alphabet.size()));
        id
    }

    /// Adds the initial state. Panics if one is already present.
    pub fn add_initial_state(&mut self, accepting: bool) -> StateId {
        assert!(self.initial.is_none(), "initial state already present");
        let id = self.add_state(accepting);
        self.initial = Some(id);
        id
    }

    fn entry(&self, state: StateId, symbol: A::Symbol) -> usize {
        let position = self
            .alphabet
            .position(symbol)
            .expect("symbol does not exist");
        state * self.alphabet.size() + position
    }

    /// Sets or redirects the transition for `symbol` out of `source`.
    pub fn set_transition(&mut self, source: StateId, symbol: A::Symbol, target: StateId) {
        assert!(source < self.size() && target < self.size(), "no such state");
        let entry = self.entry(source, symbol);
        self.table[entry] = Some(target);
    }

    /// The `symbol`-successor of `state`, if the transition exists.
    pub fn successor(&self, state: StateId, symbol: A::Symbol) -> Option<StateId> {
        self.table[self.entry(state, symbol)]
    }

    /// Runs `word` from `state`. Returns `None` if a transition is missing
    /// along the way.
    pub fn reached_from(&self, state: StateId, word: &[A::Symbol]) -> Option<StateId> {
        word.iter()
            .try_fold(state, |current, &symbol| self.successor(current, symbol))
    }

    /// Runs `word` from the initial state.
    pub fn reached_state_index(&self, word: &[A::Symbol]) -> Option<StateId> {
        self.reached_from(self.initial?, word)
    }

    /// Whether `state` is accepting.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting[state]
    }

    /// Whether the automaton accepts `word`. Panics if there is no initial
    /// state or the run gets stuck, the hypothesis must be complete.
    pub fn accepts(&self, word: &[A::Symbol]) -> bool {
        let reached = self
            .reached_state_index(word)
            .expect("hypothesis must be complete");
        self.is_accepting(reached)
    }

    /// Searches a shortest word on which `self` and `other` differ, by a
    /// breadth-first exploration of the product of the two automata. Both
    /// must be complete and over the same alphabet.
    pub fn separating_word(&self, other: &DFA<A>) -> Option<Vec<A::Symbol>> {
        assert_eq!(
            self.alphabet.size(),
            other.alphabet.size(),
            "the two automata must use the same alphabet"
        );
        let left = self.initial.expect("hypothesis must be complete");
        let right = other.initial.expect("hypothesis must be complete");

        let mut visited = FixedBitSet::with_capacity(self.size() * other.size());
        let mut queue = VecDeque::new();
        visited.insert(left * other.size() + right);
        queue.push_back((left, right, vec![]));

        while let Some((p, q, word)) = queue.pop_front() {
            if self.is_accepting(p) != other.is_accepting(q) {
                return Some(word);
            }
            for symbol in self.alphabet.universe() {
                let pp = self
                    .successor(p, symbol)
                    .expect("hypothesis must be complete");
                let qq = other
                    .successor(q, symbol)
                    .expect("hypothesis must be complete");
                if !visited.put(pp * other.size() + qq) {
                    let mut extended = word.clone();
                    extended.push(symbol);
                    queue.push_back((pp, qq, extended));
                }
            }
        }
        None
    }

    /// True if both automata accept the same language.
    pub fn equivalent(&self, other: &DFA<A>) -> bool {
        self.separating_word(other).is_none()
    }
}

impl<A: Alphabet> SuffixOutput<A::Symbol> for DFA<A> {
    type Output = bool;

    fn suffix_output(&self, prefix: &[A::Symbol], suffix: &[A::Symbol]) -> bool {
        let split = self
            .reached_state_index(prefix)
            .expect("hypothesis must be complete");
        let reached = self
            .reached_from(split, suffix)
            .expect("hypothesis must be complete");
        self.is_accepting(reached)
    }
}

impl<A: Alphabet> Debug for DFA<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(
            std::iter::once(String::new()).chain(self.alphabet.universe().map(|sym| sym.show())),
        );
        for state in self.state_indices() {
            let marker = if self.initial == Some(state) { "→" } else { "" };
            builder.push_record(
                std::iter::once(format!("{marker}q{state}{}", self.accepting[state].show()))
                    .chain(self.alphabet.universe().map(|sym| {
                        self.successor(state, sym)
                            .map_or("·".to_string(), |target| format!("q{target}"))
                    })),
            );
        }
        write!(f, "{}", builder.build())
    }
}

/// Compact construction of a [`DFA`] over a [`CharAlphabet`], mainly for
/// tests and examples: collect acceptance and edges, then pick the initial
/// state. The alphabet consists of all mentioned symbols.
///
/// # Example
/// ```
/// use acex::prelude::*;
///
/// // accepts words with an even number of 'a's
/// let dfa = DfaBuilder::default()
///     .with_accepting([true, false])
///     .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
///     .into_dfa(0);
/// assert!(dfa.accepts(&['a', 'b', 'a']));
/// assert!(!dfa.accepts(&['a']));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    accepting: Vec<bool>,
    edges: Vec<(StateId, char, StateId)>,
    symbols: Vec<char>,
}

impl DfaBuilder {
    /// Sets the acceptance of states `0..n` in order.
    pub fn with_accepting<I: IntoIterator<Item = bool>>(mut self, accepting: I) -> Self {
        self.accepting.extend(accepting);
        self
    }

    /// Makes the given symbols part of the alphabet even if no edge uses them.
    pub fn with_alphabet_symbols<I: IntoIterator<Item = char>>(mut self, symbols: I) -> Self {
        self.symbols.extend(symbols);
        self
    }

    /// Adds the given `(source, symbol, target)` edges.
    pub fn with_edges<I: IntoIterator<Item = (StateId, char, StateId)>>(
        mut self,
        edges: I,
    ) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Builds the automaton with `initial` as initial state. Panics if an
    /// edge or the initial state refers to a state without acceptance
    /// information.
    pub fn into_dfa(self, initial: StateId) -> DFA {
        assert!(
            initial < self.accepting.len(),
            "initial state {initial} has no acceptance"
        );
        let alphabet: CharAlphabet = self
            .symbols
            .iter()
            .copied()
            .chain(self.edges.iter().map(|(_, symbol, _)| *symbol))
            .collect();
        let mut dfa = DFA::for_alphabet(alphabet);
        for &accepting in &self.accepting {
            dfa.add_state(accepting);
        }
        dfa.initial = Some(initial);
        for (source, symbol, target) in self.edges {
            dfa.set_transition(source, symbol, target);
        }
        dfa
    }
}
