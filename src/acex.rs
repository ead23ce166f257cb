use either::Either;
use thiserror::Error;
use tracing::trace;

use crate::prelude::*;

/// Errors which may arise when accessing an effect sequence with an invalid
/// index.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum AcexError {
    /// The requested index lies outside the valid range.
    #[error("index {index} exceeds maximum valid effect index {max}")]
    IndexOutOfRange {
        /// the offending index
        index: usize,
        /// the largest admissible index for the attempted operation
        max: usize,
    },
}

/// Memoization backing for an effect sequence over a word of length `m`. It
/// holds `m + 1` slots, one per effect index, with the endpoints pinned: index
/// `0` always evaluates to `false` and index `m` to `true`. Unknown entries
/// are kept explicit, so no effect value is ever computed twice.
#[derive(Clone, Debug)]
pub struct EffectCache {
    values: Vec<Option<bool>>,
    queries: usize,
}

impl EffectCache {
    /// Creates a cache for an effect sequence over a word of length `length`.
    /// Panics for `length == 0`, a degenerate counterexample has no index at
    /// which the effect could flip.
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "effect sequence needs positive length");
        let mut values = vec![None; length + 1];
        values[0] = Some(false);
        values[length] = Some(true);
        Self { values, queries: 0 }
    }

    /// The length `m` of the underlying word. The cache itself has `m + 1`
    /// slots.
    pub fn length(&self) -> usize {
        self.values.len() - 1
    }

    /// Looks up the effect at `index` if it was computed (or pinned) before.
    pub fn lookup(&self, index: usize) -> Option<bool> {
        self.values.get(index).copied().flatten()
    }

    /// Stores a freshly computed effect value and bumps the computation
    /// counter. Panics when overwriting, a memoized value must never be
    /// computed again.
    pub fn store(&mut self, index: usize, value: bool) {
        assert!(
            self.values[index].is_none(),
            "effect at index {index} computed twice"
        );
        self.values[index] = Some(value);
        self.queries += 1;
    }

    /// Number of effect values that were actually computed, the pinned
    /// endpoints excluded.
    pub fn queries(&self) -> usize {
        self.queries
    }
}

/// An abstract counterexample of length `m` presents a counterexample to some
/// hypothesis as a sequence of `m + 1` boolean effects: index `0` is pinned to
/// `false`, index `m` is pinned to `true`, and somewhere in between the value
/// flips. Locating such a flip is the job of the [`Analyzer`] strategies;
/// realizations only provide [`AbstractCounterexample::compute_effect`]
/// together with access to their [`EffectCache`], everything else comes for
/// free.
pub trait AbstractCounterexample {
    /// Read access to the memoization cache.
    fn cache(&self) -> &EffectCache;

    /// Mutable access to the memoization cache.
    fn cache_mut(&mut self) -> &mut EffectCache;

    /// Computes the raw effect at `index`. This is called at most once per
    /// index and never for the pinned endpoints.
    fn compute_effect(&mut self, index: usize) -> Result<bool, AcexError>;

    /// The length of the underlying counterexample.
    fn length(&self) -> usize {
        self.cache().length()
    }

    /// Number of effect computations so far.
    fn queries(&self) -> usize {
        self.cache().queries()
    }

    /// Returns the effect at `index`, computing and memoizing it on first
    /// access. Valid indices are `0..=length()`.
    fn effect(&mut self, index: usize) -> Result<bool, AcexError> {
        let length = self.length();
        if index > length {
            return Err(AcexError::IndexOutOfRange { index, max: length });
        }
        if let Some(value) = self.cache().lookup(index) {
            return Ok(value);
        }
        let value = self.compute_effect(index)?;
        self.cache_mut().store(index, value);
        Ok(value)
    }

    /// Returns `effect(index) + effect(index + 1)` as a value in `0..=2`.
    /// Valid indices are `0..length()`. A combined effect of exactly `1`
    /// pinpoints a flip without a second probe.
    fn combined_effect(&mut self, index: usize) -> Result<u8, AcexError> {
        let length = self.length();
        if index >= length {
            return Err(AcexError::IndexOutOfRange {
                index,
                max: length - 1,
            });
        }
        Ok(self.effect(index)? as u8 + self.effect(index + 1)? as u8)
    }
}

impl<L: AbstractCounterexample, R: AbstractCounterexample> AbstractCounterexample for Either<L, R> {
    fn cache(&self) -> &EffectCache {
        either::for_both!(self, acex => acex.cache())
    }

    fn cache_mut(&mut self) -> &mut EffectCache {
        either::for_both!(self, acex => acex.cache_mut())
    }

    fn compute_effect(&mut self, index: usize) -> Result<bool, AcexError> {
        either::for_both!(self, acex => acex.compute_effect(index))
    }
}

/// An effect sequence evaluated by an arbitrary function. Mainly useful for
/// exercising and benchmarking the analysis strategies in isolation.
///
/// # Example
/// ```
/// use acex::prelude::*;
///
/// // the effect flips between index 3 and 4
/// let mut acex = FunctionAcex::new(7, |index| index > 3);
/// assert_eq!(Analyzer::RivestSchapire.analyze(&mut acex), Ok(3));
/// ```
pub struct FunctionAcex<F> {
    cache: EffectCache,
    effect: F,
}

impl<F: FnMut(usize) -> bool> FunctionAcex<F> {
    /// Wraps `effect` into an abstract counterexample of the given length.
    pub fn new(length: usize, effect: F) -> Self {
        Self {
            cache: EffectCache::new(length),
            effect,
        }
    }
}

impl<F: FnMut(usize) -> bool> AbstractCounterexample for FunctionAcex<F> {
    fn cache(&self) -> &EffectCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut EffectCache {
        &mut self.cache
    }

    fn compute_effect(&mut self, index: usize) -> Result<bool, AcexError> {
        Ok((self.effect)(index))
    }
}

/// Maps words to access sequences, i.e. canonical words reaching the same
/// hypothesis state. Implemented by learners whose states carry access
/// sequences.
pub trait AccessSequenceTransformer<S: Symbol> {
    /// Returns the access sequence of the state that `word` reaches.
    fn transform_access_sequence(&self, word: &[S]) -> Vec<S>;

    /// Whether `word` already is an access sequence, that is, transforming it
    /// changes nothing.
    fn is_access_sequence(&self, word: &[S]) -> bool {
        self.transform_access_sequence(word) == word
    }
}

impl<S: Symbol, T: AccessSequenceTransformer<S>> AccessSequenceTransformer<S> for &T {
    fn transform_access_sequence(&self, word: &[S]) -> Vec<S> {
        T::transform_access_sequence(self, word)
    }

    fn is_access_sequence(&self, word: &[S]) -> bool {
        T::is_access_sequence(self, word)
    }
}

/// Computes the output of a hypothesis on a word that is split into a prefix
/// and a suffix, without concatenating the two parts.
pub trait SuffixOutput<S: Symbol> {
    /// The output domain. Must coincide with that of the oracle the hypothesis
    /// is compared against.
    type Output;

    /// Runs `prefix` from the initial state and continues with `suffix`.
    fn suffix_output(&self, prefix: &[S], suffix: &[S]) -> Self::Output;
}

impl<S: Symbol, H: SuffixOutput<S>> SuffixOutput<S> for &H {
    type Output = H::Output;

    fn suffix_output(&self, prefix: &[S], suffix: &[S]) -> Self::Output {
        H::suffix_output(self, prefix, suffix)
    }
}

/// The generic prefix-transformation effect sequence.
///
/// For a counterexample `w` of length `m`, the effect at index `i` replaces
/// the length-`i` prefix of `w` by its access sequence and compares what
/// hypothesis and oracle say about the resulting word: `false` while the two
/// disagree, `true` once they agree. Index `0` leaves `w` untouched, where
/// disagreement is exactly what makes `w` a counterexample; index `m` turns
/// all of `w` into an access sequence, on which hypothesis and oracle agree by
/// construction. A flip located by an [`Analyzer`] is therefore a position
/// where the target language tells apart two access sequences extended by the
/// same symbol.
pub struct PrefixTransformAcex<'w, S: Symbol, M, T, H> {
    cache: EffectCache,
    counterexample: &'w [S],
    oracle: M,
    transformer: T,
    hypothesis: H,
}

impl<'w, S, M, T, H> PrefixTransformAcex<'w, S, M, T, H>
where
    S: Symbol,
    M: MembershipOracle<Symbol = S>,
    T: AccessSequenceTransformer<S>,
    H: SuffixOutput<S, Output = M::Output>,
{
    /// Creates the effect sequence for the given counterexample. Panics if the
    /// counterexample is empty.
    pub fn new(counterexample: &'w [S], oracle: M, transformer: T, hypothesis: H) -> Self {
        Self {
            cache: EffectCache::new(counterexample.len()),
            counterexample,
            oracle,
            transformer,
            hypothesis,
        }
    }

    /// Strips the longest proper prefix of the counterexample that already is
    /// an access sequence: effects below the resulting shift compare the
    /// untransformed counterexample with itself and are `false` anyway, so no
    /// strategy needs to search them. Returns the sequence unchanged when not
    /// even the first symbol forms an access sequence.
    pub fn reduce(self) -> Either<Self, ShiftedAcex<Self>> {
        let length = self.length();
        let mut shift = 0;
        while shift + 1 < length {
            if !self.transformer.is_access_sequence(&self.counterexample[..=shift]) {
                break;
            }
            shift += 1;
        }
        if shift == 0 {
            Either::Left(self)
        } else {
            trace!("dropping access sequence prefix of length {shift} from the effect sequence");
            Either::Right(ShiftedAcex::new(self, shift))
        }
    }
}

impl<'w, S, M, T, H> AbstractCounterexample for PrefixTransformAcex<'w, S, M, T, H>
where
    S: Symbol,
    M: MembershipOracle<Symbol = S>,
    T: AccessSequenceTransformer<S>,
    H: SuffixOutput<S, Output = M::Output>,
{
    fn cache(&self) -> &EffectCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut EffectCache {
        &mut self.cache
    }

    fn compute_effect(&mut self, index: usize) -> Result<bool, AcexError> {
        let (prefix, suffix) = self.counterexample.split_at(index);
        let transformed = self.transformer.transform_access_sequence(prefix);
        let claimed = self.hypothesis.suffix_output(&transformed, suffix);
        let actual = self.oracle.query_parts(&transformed, suffix);
        Ok(claimed == actual)
    }
}

/// A view on another abstract counterexample with the first `shift` indices
/// cut off. Effect computations are forwarded (and memoized) at the shifted
/// position, while the endpoints of the view are pinned independently.
pub struct ShiftedAcex<A> {
    cache: EffectCache,
    inner: A,
    shift: usize,
}

impl<A: AbstractCounterexample> ShiftedAcex<A> {
    /// Shifts `inner` to the left by `shift` positions. Panics unless
    /// `shift < inner.length()`.
    pub fn new(inner: A, shift: usize) -> Self {
        assert!(
            shift < inner.length(),
            "cannot shift an effect sequence away entirely"
        );
        Self {
            cache: EffectCache::new(inner.length() - shift),
            inner,
            shift,
        }
    }

    /// The number of positions this view is shifted by.
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Translates an index of this view back into one of the underlying
    /// sequence.
    pub fn unshift(&self, index: usize) -> usize {
        index + self.shift
    }

    /// Consumes the view, returning the underlying effect sequence.
    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: AbstractCounterexample> AbstractCounterexample for ShiftedAcex<A> {
    fn cache(&self) -> &EffectCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut EffectCache {
        &mut self.cache
    }

    fn compute_effect(&mut self, index: usize) -> Result<bool, AcexError> {
        self.inner.effect(index + self.shift)
    }
}
