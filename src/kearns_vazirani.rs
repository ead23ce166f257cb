use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::prelude::*;

/// Errors surfaced by [`KearnsVazirani`] when it is driven incorrectly.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LearnerError {
    /// An operation which needs a hypothesis was called before
    /// [`KearnsVazirani::start`].
    #[error("the learner has not been started yet")]
    NotStarted,
    /// [`KearnsVazirani::start`] was called a second time.
    #[error("the learner has already been started")]
    AlreadyStarted,
    /// The offered counterexample is too short to analyze. Hypotheses agree
    /// with the target on all words of length at most one, so honest
    /// counterexamples have at least two symbols.
    #[error("counterexample of length {length} is too short to analyze")]
    CounterexampleTooShort {
        /// length of the offered word
        length: usize,
    },
    /// The hypothesis already produces the claimed output, so the offered
    /// word disproves nothing.
    #[error("{word} labelled {output} is no counterexample to the hypothesis")]
    NotACounterexample {
        /// the offered word
        word: String,
        /// the claimed output
        output: String,
    },
}

/// Bookkeeping the learner maintains per hypothesis state.
struct StateInfo<S: Symbol> {
    /// canonical word reaching this state
    access_sequence: Vec<S>,
    /// the leaf of the discrimination tree holding this state
    node: NodeId,
    /// transitions currently pointing at this state, used to redirect them
    /// when the state is split
    incoming: Vec<(StateId, S)>,
}

/// An incremental learner for deterministic finite automata in the style of
/// Kearns and Vazirani.
///
/// The learner keeps a [`DiscriminationTree`] whose leaves are the states of
/// the current hypothesis: each state is known by an access sequence, and two
/// states are told apart by the discriminator at their lowest common ancestor.
/// [`KearnsVazirani::start`] builds the initial hypothesis from the empty
/// word alone, and each [`KearnsVazirani::refine`] consumes one
/// counterexample by locating, with the configured [`Analyzer`], an index at
/// which the hypothesis takes a wrong transition, then splitting the leaf of
/// the offending state. Transitions into a split state are re-sifted below
/// the new inner node, and sifting into the one empty leaf of the tree
/// discovers the first state of the opposite acceptance.
///
/// # Example
/// ```
/// use acex::prelude::*;
///
/// // the target accepts exactly the words ending in "ab"
/// let target = DfaBuilder::default()
///     .with_accepting([false, false, true])
///     .with_edges([
///         (0, 'a', 1), (0, 'b', 0),
///         (1, 'a', 1), (1, 'b', 2),
///         (2, 'a', 1), (2, 'b', 0),
///     ])
///     .into_dfa(0);
///
/// let mut learner = KearnsVazirani::new(
///     target.alphabet().clone(),
///     DFAOracle::new(target.clone()),
///     Analyzer::RivestSchapire,
///     true,
/// );
/// learner.start().unwrap();
/// while let Some(word) = target.separating_word(learner.hypothesis().unwrap()) {
///     learner.refine(&word, target.accepts(&word)).unwrap();
/// }
/// assert!(learner.hypothesis().unwrap().equivalent(&target));
/// ```
pub struct KearnsVazirani<A: Alphabet, M> {
    alphabet: A,
    oracle: M,
    analyzer: Analyzer,
    repeated_evaluation: bool,
    hypothesis: DFA<A>,
    tree: DiscriminationTree<A::Symbol, StateId>,
    states: Vec<StateInfo<A::Symbol>>,
    analysis_queries: AtomicU64,
    prefix_lengths: AtomicU64,
    counterexamples: AtomicU64,
}

impl<A, M> KearnsVazirani<A, M>
where
    A: Alphabet,
    M: MembershipOracle<Symbol = A::Symbol, Output = bool>,
{
    /// Creates a learner for the language of `oracle` over `alphabet`.
    /// Counterexamples handed to [`KearnsVazirani::refine`] are analyzed with
    /// `analyzer`; with `repeated_evaluation` each of them is re-evaluated
    /// until the hypothesis gets it right, otherwise a single refinement step
    /// is taken.
    pub fn new(alphabet: A, oracle: M, analyzer: Analyzer, repeated_evaluation: bool) -> Self {
        let hypothesis = DFA::for_alphabet(alphabet.clone());
        Self {
            alphabet,
            oracle,
            analyzer,
            repeated_evaluation,
            hypothesis,
            tree: DiscriminationTree::new(),
            states: vec![],
            analysis_queries: AtomicU64::new(0),
            prefix_lengths: AtomicU64::new(0),
            counterexamples: AtomicU64::new(0),
        }
    }

    /// Builds the initial hypothesis: a single state for the empty word,
    /// accepting if the target accepts the empty word, with the root of the
    /// discrimination tree split on the empty discriminator. Initializing the
    /// outgoing transitions may already discover a state of the opposite
    /// acceptance.
    pub fn start(&mut self) -> Result<(), LearnerError> {
        if !self.hypothesis.is_empty() {
            return Err(LearnerError::AlreadyStarted);
        }
        let accepting = self.oracle.query(&[]);
        let initial = self.hypothesis.add_initial_state(accepting);
        self.states.push(StateInfo {
            access_sequence: vec![],
            node: self.tree.root(),
            incoming: vec![],
        });

        self.tree.set_state(self.tree.root(), initial);
        let split = self
            .tree
            .split(self.tree.root(), vec![], accepting, !accepting, None);
        self.states[initial].node = split.old_leaf;

        debug!(
            "started with {} initial state, tree is {:?}",
            accepting.show(),
            self.tree
        );
        self.init_transitions(initial);
        Ok(())
    }

    /// The current hypothesis, which is always complete.
    pub fn hypothesis(&self) -> Result<&DFA<A>, LearnerError> {
        if self.hypothesis.is_empty() {
            return Err(LearnerError::NotStarted);
        }
        Ok(&self.hypothesis)
    }

    /// The alphabet the learner operates on.
    pub fn alphabet(&self) -> &A {
        &self.alphabet
    }

    /// The suffix location strategy used for counterexample analysis.
    pub fn analyzer(&self) -> Analyzer {
        self.analyzer
    }

    /// The access sequence of the given hypothesis state.
    pub fn access_sequence(&self, state: StateId) -> &[A::Symbol] {
        &self.states[state].access_sequence
    }

    /// Total number of membership queries asked during counterexample
    /// analysis. Queries asked while sifting are not included.
    pub fn total_analysis_queries(&self) -> u64 {
        self.analysis_queries.load(Ordering::Relaxed)
    }

    /// Number of counterexamples analyzed so far. With repeated evaluation a
    /// single [`KearnsVazirani::refine`] may account for several.
    pub fn counterexamples(&self) -> u64 {
        self.counterexamples.load(Ordering::Relaxed)
    }

    /// The average prefix length located by counterexample analysis, `NaN`
    /// before the first counterexample was analyzed.
    pub fn average_prefix_length(&self) -> f64 {
        self.prefix_lengths.load(Ordering::Relaxed) as f64
            / self.counterexamples.load(Ordering::Relaxed) as f64
    }

    /// Refines the hypothesis with a counterexample: a word on which the
    /// target produces `output` while the hypothesis does not. Returns the
    /// number of states added, which is at least one. With repeated
    /// evaluation enabled, the counterexample is re-analyzed until the
    /// hypothesis reproduces `output`.
    pub fn refine(&mut self, input: &[A::Symbol], output: bool) -> Result<usize, LearnerError> {
        if self.hypothesis.is_empty() {
            return Err(LearnerError::NotStarted);
        }
        if input.len() < 2 {
            return Err(LearnerError::CounterexampleTooShort {
                length: input.len(),
            });
        }
        if self.hypothesis.accepts(input) == output {
            return Err(LearnerError::NotACounterexample {
                word: input.show(),
                output: output.show(),
            });
        }

        debug!(
            "refining with counterexample {} labelled {}",
            input.show(),
            output.show()
        );
        let before = self.hypothesis.size();
        while self.refine_single(input, output) {
            if !self.repeated_evaluation {
                break;
            }
        }
        debug_assert!(self.hypothesis.size() > before);
        Ok(self.hypothesis.size() - before)
    }

    /// Performs one refinement step and reports whether the word still was a
    /// counterexample. Locates an index at which the tree walk for the next
    /// prefix diverges from the leaf of the hypothesis state, then splits
    /// that state.
    fn refine_single(&mut self, input: &[A::Symbol], output: bool) -> bool {
        if input.len() < 2 || self.hypothesis.accepts(input) == output {
            return false;
        }

        let (index, lca) = {
            let mut acex = KvAcex::new(&*self, input, output);
            let index = self
                .analyzer
                .analyze(&mut acex)
                .expect("effect analysis stays within the counterexample");
            (index, acex.lca(index + 1))
        };
        self.counterexamples.fetch_add(1, Ordering::Relaxed);
        self.prefix_lengths.fetch_add(index as u64, Ordering::Relaxed);

        let prefix = input[..index].to_vec();
        let symbol = input[index];
        let source = self
            .hypothesis
            .reached_state_index(&prefix)
            .expect("hypothesis must be complete");
        debug!(
            "splitting q{source} with new access sequence {} at symbol {}",
            prefix.show(),
            symbol.show()
        );
        self.split_state(source, prefix, symbol, lca);
        true
    }

    /// Splits `state` into itself and a fresh state with access sequence
    /// `prefix`. The two are separated by `symbol` prepended to the
    /// discriminator of the lowest common ancestor at which the tree walk
    /// diverged; the labels recorded there decide which of the two leaves
    /// keeps the old state.
    fn split_state(
        &mut self,
        state: StateId,
        prefix: Vec<A::Symbol>,
        symbol: A::Symbol,
        lca: LcaInfo,
    ) {
        let incoming = mem::take(&mut self.states[state].incoming);
        let accepting = self.hypothesis.is_accepting(state);
        let new_state = self.create_state(prefix, accepting);

        let mut discriminator = vec![symbol];
        discriminator.extend_from_slice(self.tree.discriminator(lca.node));
        let split = self.tree.split(
            self.states[state].node,
            discriminator,
            lca.label_a,
            lca.label_b,
            Some(new_state),
        );
        self.states[state].node = split.old_leaf;
        self.states[new_state].node = split.new_leaf;
        trace!("after splitting, the tree is {:?}", self.tree);

        self.init_transitions(new_state);
        self.redirect(incoming, split.inner);
    }

    /// Adds a state to the hypothesis and the bookkeeping. The caller places
    /// it into its leaf.
    fn create_state(&mut self, access_sequence: Vec<A::Symbol>, accepting: bool) -> StateId {
        let state = self.hypothesis.add_state(accepting);
        debug_assert_eq!(state, self.states.len());
        trace!(
            "created {} state q{state} with access sequence {}",
            accepting.show(),
            access_sequence.show()
        );
        self.states.push(StateInfo {
            access_sequence,
            node: self.tree.root(),
            incoming: vec![],
        });
        state
    }

    /// Sets all outgoing transitions of `state` by sifting its access
    /// sequence extended by each symbol through the tree.
    fn init_transitions(&mut self, state: StateId) {
        let symbols: Vec<_> = self.alphabet.universe().collect();
        for symbol in symbols {
            let mut word = self.states[state].access_sequence.clone();
            word.push(symbol);
            let target = self.sift(self.tree.root(), &word);
            self.connect(state, symbol, target);
        }
    }

    /// Re-sifts the given transitions below the inner node that replaced the
    /// leaf of a split state, distributing them over the two halves.
    fn redirect(&mut self, incoming: Vec<(StateId, A::Symbol)>, from: NodeId) {
        for (source, symbol) in incoming {
            let mut word = self.states[source].access_sequence.clone();
            word.push(symbol);
            let target = self.sift(from, &word);
            self.connect(source, symbol, target);
        }
    }

    fn connect(&mut self, source: StateId, symbol: A::Symbol, target: StateId) {
        self.states[target].incoming.push((source, symbol));
        self.hypothesis.set_transition(source, symbol, target);
    }

    /// Sifts `word` into the tree starting at `start` and returns the state
    /// in the reached leaf. An empty leaf means `word` is the first seen word
    /// whose acceptance differs from the initial state, the one situation in
    /// which sifting itself discovers a state.
    fn sift(&mut self, start: NodeId, word: &[A::Symbol]) -> StateId {
        let leaf = self.tree.sift(start, |discriminator| {
            self.oracle.query_parts(word, discriminator)
        });
        if let Some(&state) = self.tree.state(leaf) {
            return state;
        }

        let initial_accepting = self.hypothesis.is_accepting(
            self.hypothesis
                .initial()
                .expect("the learner has been started"),
        );
        let state = self.create_state(word.to_vec(), !initial_accepting);
        self.tree.set_state(leaf, state);
        self.states[state].node = leaf;
        debug!("sifting discovered q{state}, tree is now {:?}", self.tree);
        self.init_transitions(state);
        state
    }
}

impl<A, M> AccessSequenceTransformer<A::Symbol> for KearnsVazirani<A, M>
where
    A: Alphabet,
    M: MembershipOracle<Symbol = A::Symbol, Output = bool>,
{
    fn transform_access_sequence(&self, word: &[A::Symbol]) -> Vec<A::Symbol> {
        let state = self
            .hypothesis
            .reached_state_index(word)
            .expect("hypothesis must be complete");
        self.states[state].access_sequence.clone()
    }
}

/// The effect sequence driving a refinement step.
///
/// The effect at index `i` walks the discrimination tree with membership
/// queries for the length-`i` prefix of the counterexample and turns `true`
/// once that walk diverges from the path to the leaf of the hypothesis state
/// reached by the prefix. The divergence point is kept as an [`LcaInfo`]: the
/// label the oracle chose leads towards the prefix, the opposite label
/// towards the state the hypothesis claims. Index `0` never diverges since
/// the initial state is correctly classified, and index `m` always diverges
/// at the root because acceptance itself separates hypothesis from target,
/// so both endpoints conform to the pinning of [`EffectCache`].
struct KvAcex<'a, S: Symbol, M> {
    cache: EffectCache,
    word: &'a [S],
    oracle: &'a M,
    tree: &'a DiscriminationTree<S, StateId>,
    states: &'a [StateInfo<S>],
    /// hypothesis states reached by each prefix of the word
    path: Vec<StateId>,
    lcas: Vec<Option<LcaInfo>>,
    queries: &'a AtomicU64,
}

impl<'a, S, M> KvAcex<'a, S, M>
where
    S: Symbol,
    M: MembershipOracle<Symbol = S, Output = bool>,
{
    fn new<A: Alphabet<Symbol = S>>(
        learner: &'a KearnsVazirani<A, M>,
        word: &'a [S],
        output: bool,
    ) -> Self {
        let hypothesis = &learner.hypothesis;
        let mut path = Vec::with_capacity(word.len() + 1);
        let mut current = hypothesis.initial().expect("hypothesis must be complete");
        path.push(current);
        for &symbol in word {
            current = hypothesis
                .successor(current, symbol)
                .expect("hypothesis must be complete");
            path.push(current);
        }

        let mut lcas = vec![None; word.len() + 1];
        lcas[word.len()] = Some(LcaInfo {
            node: learner.tree.root(),
            label_a: !output,
            label_b: output,
        });

        Self {
            cache: EffectCache::new(word.len()),
            word,
            oracle: &learner.oracle,
            tree: &learner.tree,
            states: &learner.states,
            path,
            lcas,
            queries: &learner.analysis_queries,
        }
    }

    /// Walks the tree for the length-`index` prefix and records the
    /// divergence from the expected leaf, if any.
    fn walk(&mut self, index: usize) -> bool {
        let prefix = &self.word[..index];
        let expected = self.tree.path_from_root(self.states[self.path[index]].node);
        for step in expected.windows(2) {
            let out = self
                .oracle
                .query_parts(prefix, self.tree.discriminator(step[0]));
            self.queries.fetch_add(1, Ordering::Relaxed);
            if self.tree.child(step[0], out) != step[1] {
                self.lcas[index] = Some(LcaInfo {
                    node: step[0],
                    label_a: !out,
                    label_b: out,
                });
                return true;
            }
        }
        false
    }

    /// The divergence recorded at `index`. Analysis evaluates the effect
    /// right of the located flip, so the divergence there is always known.
    fn lca(&self, index: usize) -> LcaInfo {
        self.lcas[index].unwrap_or_else(|| {
            panic!(
                "no divergence at index {index} of counterexample {}",
                self.word.show().blue()
            )
        })
    }
}

impl<'a, S, M> AbstractCounterexample for KvAcex<'a, S, M>
where
    S: Symbol,
    M: MembershipOracle<Symbol = S, Output = bool>,
{
    fn cache(&self) -> &EffectCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut EffectCache {
        &mut self.cache
    }

    fn compute_effect(&mut self, index: usize) -> Result<bool, AcexError> {
        Ok(self.walk(index))
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

    fn ends_with_ab() -> DFA {
        DfaBuilder::default()
            .with_accepting([false, false, true])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 1),
                (1, 'b', 2),
                (2, 'a', 1),
                (2, 'b', 0),
            ])
            .into_dfa(0)
    }

    fn ends_with_abb() -> DFA {
        DfaBuilder::default()
            .with_accepting([false, false, false, true])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 1),
                (1, 'b', 2),
                (2, 'a', 1),
                (2, 'b', 3),
                (3, 'a', 1),
                (3, 'b', 0),
            ])
            .into_dfa(0)
    }

    // number of 'a's divisible by three
    fn mod3_as() -> DFA {
        DfaBuilder::default()
            .with_accepting([true, false, false])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 2),
                (1, 'b', 1),
                (2, 'a', 0),
                (2, 'b', 2),
            ])
            .into_dfa(0)
    }

    fn new_learner(
        target: &DFA,
        analyzer: Analyzer,
        repeated: bool,
    ) -> KearnsVazirani<CharAlphabet, DFAOracle> {
        KearnsVazirani::new(
            target.alphabet().clone(),
            DFAOracle::new(target.clone()),
            analyzer,
            repeated,
        )
    }

    fn learn(target: &DFA, analyzer: Analyzer) -> KearnsVazirani<CharAlphabet, DFAOracle> {
        let mut learner = new_learner(target, analyzer, true);
        learner.start().unwrap();
        let mut submitted: Vec<Vec<char>> = vec![];
        loop {
            let hypothesis = learner.hypothesis().unwrap();
            let Some(word) = target.separating_word(hypothesis) else {
                return learner;
            };
            let added = learner.refine(&word, target.accepts(&word)).unwrap();
            assert!(added > 0);
            submitted.push(word);
            // repeated evaluation drains the current counterexample, and no
            // refinement may un-learn one handled earlier
            for word in &submitted {
                assert_eq!(
                    learner.hypothesis().unwrap().accepts(word),
                    target.accepts(word)
                );
            }
        }
    }

    #[test]
    fn start_builds_the_initial_hypothesis() {
        let target = ends_with_ab();
        let mut learner = new_learner(&target, Analyzer::RivestSchapire, true);
        assert_eq!(learner.hypothesis().err(), Some(LearnerError::NotStarted));
        assert_eq!(learner.analyzer(), Analyzer::RivestSchapire);
        assert_eq!(learner.alphabet().size(), 2);

        learner.start().unwrap();
        assert_eq!(learner.start(), Err(LearnerError::AlreadyStarted));

        // no word of length at most one ends in "ab"
        let hypothesis = learner.hypothesis().unwrap();
        assert_eq!(hypothesis.size(), 1);
        assert!(!hypothesis.accepts(&[]));
        assert!(!hypothesis.accepts(&['a', 'b']));
    }

    #[test]
    fn sifting_discovers_states_during_start() {
        let target = even_as();
        let mut learner = new_learner(&target, Analyzer::RivestSchapire, true);
        learner.start().unwrap();

        // 'a' already separates from the empty word, so initializing the
        // transitions of the initial state discovers the second state
        let hypothesis = learner.hypothesis().unwrap();
        assert_eq!(hypothesis.size(), 2);
        assert!(hypothesis.equivalent(&target));
    }

    #[test]
    fn refine_errors_leave_the_learner_untouched() {
        let target = ends_with_ab();
        let mut learner = new_learner(&target, Analyzer::RivestSchapire, true);
        assert_eq!(
            learner.refine(&['a', 'b'], true),
            Err(LearnerError::NotStarted)
        );

        learner.start().unwrap();
        assert_eq!(
            learner.refine(&['a'], true),
            Err(LearnerError::CounterexampleTooShort { length: 1 })
        );
        assert_eq!(
            learner.refine(&['a', 'a'], false),
            Err(LearnerError::NotACounterexample {
                word: "\"aa\"".to_string(),
                output: "-".to_string(),
            })
        );
        assert_eq!(learner.hypothesis().unwrap().size(), 1);
    }

    #[test_log::test]
    fn aab_counterexample_triggers_a_split() {
        let target = ends_with_ab();
        let mut learner = new_learner(&target, Analyzer::RivestSchapire, true);
        learner.start().unwrap();

        // the split adds one state, re-initializing transitions discovers another
        assert_eq!(learner.refine(&['a', 'a', 'b'], true), Ok(2));
        let hypothesis = learner.hypothesis().unwrap();
        assert_eq!(hypothesis.size(), 3);
        assert!(hypothesis.accepts(&['a', 'a', 'b']));
        assert!(hypothesis.equivalent(&target));
    }

    #[test_log::test]
    fn repeated_evaluation_drains_one_counterexample() {
        let target = ends_with_abb();
        let counterexample = ['a', 'b', 'b'];

        let mut learner = new_learner(&target, Analyzer::RivestSchapire, true);
        learner.start().unwrap();
        assert_eq!(learner.refine(&counterexample, true), Ok(3));
        assert!(learner.hypothesis().unwrap().equivalent(&target));

        // without repeated evaluation the same counterexample is needed twice
        let mut learner = new_learner(&target, Analyzer::RivestSchapire, false);
        learner.start().unwrap();
        assert_eq!(learner.refine(&counterexample, true), Ok(2));
        assert!(!learner.hypothesis().unwrap().accepts(&counterexample));
        assert_eq!(learner.refine(&counterexample, true), Ok(1));
        assert!(learner.hypothesis().unwrap().equivalent(&target));
    }

    #[test_log::test]
    fn round_trips_converge() {
        for target in [even_as(), ends_with_ab(), ends_with_abb(), mod3_as()] {
            for analyzer in Analyzer::ALL {
                let learner = learn(&target, analyzer);
                let hypothesis = learner.hypothesis().unwrap();
                assert!(
                    hypothesis.equivalent(&target),
                    "{analyzer} learned a wrong hypothesis {hypothesis:?}"
                );
                assert!(hypothesis.size() <= target.size());
            }
        }
    }

    #[test]
    fn single_evaluation_still_converges() {
        let target = mod3_as();
        let mut learner = new_learner(&target, Analyzer::Exponential, false);
        learner.start().unwrap();
        loop {
            let Some(word) = target.separating_word(learner.hypothesis().unwrap()) else {
                break;
            };
            learner.refine(&word, target.accepts(&word)).unwrap();
        }
        assert!(learner.hypothesis().unwrap().equivalent(&target));
    }

    #[test]
    fn access_sequences_are_canonical() {
        let learner = learn(&ends_with_ab(), Analyzer::Partition);
        let words: [&[char]; 6] = [
            &[],
            &['a'],
            &['b'],
            &['a', 'b'],
            &['b', 'a'],
            &['a', 'b', 'a', 'b'],
        ];

        let mut classes = math::Set::default();
        for word in words {
            let access = learner.transform_access_sequence(word);
            assert!(learner.is_access_sequence(&access));
            classes.insert(access);
        }
        assert_eq!(classes.len(), 3);

        // every state is reached by its own access sequence
        let hypothesis = learner.hypothesis().unwrap();
        for state in hypothesis.state_indices() {
            let access = learner.access_sequence(state);
            assert_eq!(hypothesis.reached_state_index(access), Some(state));
        }
    }

    #[test]
    fn generic_analysis_locates_transition_flaws() {
        let target = ends_with_ab();
        let oracle = DFAOracle::new(target.clone());
        let mut learner = new_learner(&target, Analyzer::RivestSchapire, true);
        learner.start().unwrap();

        // against the one-state hypothesis, every analysis of "aab" finds the
        // flip where the dropped prefix stops changing the oracle's verdict
        let word = vec!['a', 'a', 'b'];
        for analyzer in Analyzer::ALL {
            let mut acex =
                PrefixTransformAcex::new(&word, &oracle, &learner, learner.hypothesis().unwrap());
            assert_eq!(analyzer.analyze(&mut acex), Ok(1));
        }
    }

    #[test]
    fn statistics_accumulate() {
        let target = mod3_as();
        let mut learner = new_learner(&target, Analyzer::LinearDescending, true);
        learner.start().unwrap();
        assert_eq!(learner.counterexamples(), 0);
        assert!(learner.average_prefix_length().is_nan());

        learner.refine(&['a', 'a', 'a'], true).unwrap();
        assert_eq!(learner.counterexamples(), 1);
        assert_eq!(learner.average_prefix_length(), 2.0);
        assert_eq!(learner.total_analysis_queries(), 1);
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn random_round_trips() {
        fastrand::seed(0xa13);
        for _ in 0..20 {
            let target = crate::random::random_dfa(2, 8);
            for analyzer in Analyzer::ALL {
                let learner = learn(&target, analyzer);
                let hypothesis = learner.hypothesis().unwrap();
                assert!(
                    hypothesis.equivalent(&target),
                    "{analyzer} learned a wrong hypothesis for {target:?}"
                );
                assert!(hypothesis.size() <= target.size());
            }
        }
    }
}
