//! Active learning of deterministic finite automata from membership queries.
//!
//! The learner implemented in [`kearns_vazirani`] keeps its knowledge in a binary
//! [discrimination tree](discrimination_tree::DiscriminationTree): leaves correspond to the
//! states of the current hypothesis, identified by access sequences, and inner nodes carry
//! discriminator words witnessing that the states below their two children behave
//! differently. Handing a counterexample to
//! [`refine`](kearns_vazirani::KearnsVazirani::refine) splits a single leaf and leaves all
//! other classifications untouched, so learning is fully incremental and never forgets
//! what it has already established.
//!
//! Which leaf gets split is determined by counterexample analysis, implemented in [`acex`]
//! in terms of effect sequences: a counterexample of length `m` gives rise to `m + 1`
//! boolean effects whose first entry is pinned to `false` and whose last entry is pinned
//! to `true`, and any index at which the sequence flips yields a valid refinement. The
//! strategies for locating such a flip live in [`analyzers`]; they range from linear scans
//! over the binary search of Rivest and Schapire to exponential and partition search, and
//! all of them operate against the memoizing [`acex::EffectCache`], so no effect is ever
//! computed twice. The same machinery applies to any learner that can replace prefixes by
//! access sequences through [`acex::PrefixTransformAcex`].
//!
//! Membership queries are abstracted by [`oracle::MembershipOracle`]. Oracles backed by a
//! known automaton as well as query counting and caching wrappers are provided, which
//! makes it straightforward to pit the analysis strategies against each other. With the
//! `random` feature enabled, random complete automata can be generated as targets for
//! randomized testing.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use acex::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        acex::{
            AbstractCounterexample, AccessSequenceTransformer, AcexError, EffectCache,
            FunctionAcex, PrefixTransformAcex, ShiftedAcex, SuffixOutput,
        },
        alphabet,
        alphabet::{Alphabet, CharAlphabet, Symbol},
        analyzers::{
            binary_search, binary_search_eager, exponential_search, linear_search_ascending,
            linear_search_descending, partition_search, Analyzer,
        },
        automaton::{DfaBuilder, StateId, DFA},
        discrimination_tree::{DiscriminationTree, LcaInfo, NodeId, Split},
        kearns_vazirani::{KearnsVazirani, LearnerError},
        math,
        oracle::{CachingOracle, CountingOracle, DFAOracle, MembershipOracle},
        show::Show,
    };

    #[cfg(feature = "random")]
    pub use super::random::random_dfa;
}

/// This module contains some definitions of mathematical objects which are used throughout
/// the crate and do not really fit to the top level.
pub mod math;

/// Helpers for displaying words, outputs and states in a human readable way.
pub mod show;
pub use show::Show;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// Abstract counterexamples: effect sequences with pinned endpoints, memoization and the
/// prefix transformation view on counterexamples.
pub mod acex;

/// Strategies for locating a flip in an effect sequence.
pub mod analyzers;

/// Defines deterministic finite automata as dense transition tables.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;

/// The binary tree classifying hypothesis states by discriminator words.
pub mod discrimination_tree;

/// The incremental learner in the style of Kearns and Vazirani.
pub mod kearns_vazirani;

/// Membership oracles answering queries about the target language.
#[allow(clippy::upper_case_acronyms)]
pub mod oracle;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;
