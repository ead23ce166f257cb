use tracing::trace;

use crate::prelude::*;

/// Scans `low + 1..high` upwards and stops at the first index whose effect is
/// already `true`. Worst case linear, but cheap when the flip sits close to
/// the front.
pub fn linear_search_ascending(
    acex: &mut impl AbstractCounterexample,
    low: usize,
    high: usize,
) -> Result<usize, AcexError> {
    let mut current = low + 1;
    while current < high {
        if acex.effect(current)? {
            break;
        }
        current += 1;
    }
    Ok(current - 1)
}

/// Scans `high - 1..low` downwards and stops at the first index whose effect
/// is still `false`. Worst case linear, but cheap when the flip sits close to
/// the back.
pub fn linear_search_descending(
    acex: &mut impl AbstractCounterexample,
    low: usize,
    high: usize,
) -> Result<usize, AcexError> {
    let mut current = high - 1;
    while current > low {
        if !acex.effect(current)? {
            break;
        }
        current -= 1;
    }
    Ok(current)
}

/// Classic binary search, keeping the invariant that the effect at `low` is
/// `false` and the effect at `high` is `true`. Logarithmic in the span.
pub fn binary_search(
    acex: &mut impl AbstractCounterexample,
    low: usize,
    high: usize,
) -> Result<usize, AcexError> {
    let (mut low, mut high) = (low, high);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if acex.effect(mid)? {
            high = mid;
        } else {
            low = mid;
        }
    }
    Ok(low)
}

/// Binary search over combined effects. A combined effect of `1` is a direct
/// hit on a flip and ends the search immediately; `0` and `2` shrink the range
/// from the respective side.
pub fn binary_search_eager(
    acex: &mut impl AbstractCounterexample,
    low: usize,
    high: usize,
) -> Result<usize, AcexError> {
    let (mut low, mut high) = (low, high - 1);
    while high > low {
        let mid = low + (high - low) / 2;
        match acex.combined_effect(mid)? {
            1 => return Ok(mid),
            0 => low = mid + 1,
            _ => high = mid - 1,
        }
    }
    Ok(low)
}

/// Probes backwards from `high` with doubling offsets until an effect of
/// `false` brackets the flip, then finishes with [`binary_search`] on the
/// bracketed range. Logarithmic in the distance of the flip from `high`.
pub fn exponential_search(
    acex: &mut impl AbstractCounterexample,
    low: usize,
    high: usize,
) -> Result<usize, AcexError> {
    let (mut low, mut high) = (low, high);
    let mut offset = 1;
    while offset < high - low {
        if !acex.effect(high - offset)? {
            low = high - offset;
            break;
        }
        high -= offset;
        offset *= 2;
    }
    binary_search(acex, low, high)
}

/// Probes backwards from `high` in fixed strides of span divided by its
/// logarithm, then finishes with [`binary_search`] on the bracketed range.
pub fn partition_search(
    acex: &mut impl AbstractCounterexample,
    low: usize,
    high: usize,
) -> Result<usize, AcexError> {
    let (mut low, mut high) = (low, high);
    let span = high - low + 1;
    let step = (span as f64 / (span as f64).log2()) as usize;
    while step < high - low {
        if !acex.effect(high - step)? {
            low = high - step;
            break;
        }
        high -= step;
    }
    binary_search(acex, low, high)
}

/// The strategies available for locating an effect flip. The set is closed,
/// every variant is a pure search over the [`AbstractCounterexample`]
/// interface and the variants only differ in how many effects they evaluate
/// for which flip positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analyzer {
    /// Scan upwards from the front.
    LinearAscending,
    /// Scan downwards from the back.
    LinearDescending,
    /// Binary search over single effects.
    RivestSchapire,
    /// Binary search over combined effects, stopping early on a direct hit.
    RivestSchapireEager,
    /// Doubling back-off from the rear, then binary search.
    Exponential,
    /// Fixed-stride back-off from the rear, then binary search.
    Partition,
}

impl Analyzer {
    /// All available strategies, useful for comparisons and parameter sweeps.
    pub const ALL: [Self; 6] = [
        Self::LinearAscending,
        Self::LinearDescending,
        Self::RivestSchapire,
        Self::RivestSchapireEager,
        Self::Exponential,
        Self::Partition,
    ];

    /// A short name identifying the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LinearAscending => "linear-asc",
            Self::LinearDescending => "linear-desc",
            Self::RivestSchapire => "rivest-schapire",
            Self::RivestSchapireEager => "rivest-schapire-eager",
            Self::Exponential => "exponential",
            Self::Partition => "partition",
        }
    }

    /// Runs the strategy over the full effect sequence.
    pub fn analyze(self, acex: &mut impl AbstractCounterexample) -> Result<usize, AcexError> {
        let length = acex.length();
        self.analyze_range(acex, 0, length)
    }

    /// Runs the strategy over `low..=high`, which must satisfy `low < high`,
    /// `effect(low) == false` and `effect(high) == true`. Returns an index
    /// `idx` in `low..high` with `effect(idx) != effect(idx + 1)`.
    pub fn analyze_range(
        self,
        acex: &mut impl AbstractCounterexample,
        low: usize,
        high: usize,
    ) -> Result<usize, AcexError> {
        assert!(low < high, "search range must contain a flip");
        let index = match self {
            Self::LinearAscending => linear_search_ascending(acex, low, high),
            Self::LinearDescending => linear_search_descending(acex, low, high),
            Self::RivestSchapire => binary_search(acex, low, high),
            Self::RivestSchapireEager => binary_search_eager(acex, low, high),
            Self::Exponential => exponential_search(acex, low, high),
            Self::Partition => partition_search(acex, low, high),
        }?;
        trace!(
            "{} located a flip at index {index} with {} effect computations",
            self.name(),
            acex.queries()
        );
        Ok(index)
    }
}

impl std::fmt::Display for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_acex(length: usize, flip: usize) -> FunctionAcex<impl FnMut(usize) -> bool> {
        FunctionAcex::new(length, move |index| index > flip)
    }

    #[test]
    fn all_strategies_locate_every_flip() {
        for length in 1..=40 {
            for flip in 0..length {
                for analyzer in Analyzer::ALL {
                    let mut acex = step_acex(length, flip);
                    assert_eq!(
                        analyzer.analyze(&mut acex),
                        Ok(flip),
                        "{analyzer} missed the flip at {flip} in a sequence of length {length}"
                    );
                }
            }
        }
    }

    #[test]
    fn degenerate_sequences_need_no_computation() {
        for analyzer in Analyzer::ALL {
            let mut acex = FunctionAcex::new(1, |_| unreachable!("both endpoints are pinned"));
            assert_eq!(analyzer.analyze(&mut acex), Ok(0));
            assert_eq!(acex.queries(), 0);
        }
    }

    #[test]
    fn eager_binary_hits_the_midpoint_flip_directly() {
        let mut acex = step_acex(64, 31);
        assert_eq!(Analyzer::RivestSchapireEager.analyze(&mut acex), Ok(31));
        assert_eq!(acex.queries(), 2);
    }

    #[test]
    fn binary_search_stays_logarithmic() {
        let mut acex = step_acex(1024, 700);
        assert_eq!(Analyzer::RivestSchapire.analyze(&mut acex), Ok(700));
        assert_eq!(acex.queries(), 10);
    }

    #[test]
    fn exponential_search_favors_flips_near_the_back() {
        let mut acex = step_acex(1024, 1020);
        assert_eq!(Analyzer::Exponential.analyze(&mut acex), Ok(1020));
        assert!(acex.queries() <= 6, "took {} computations", acex.queries());
    }

    #[test]
    fn strategy_names_are_unique() {
        let names: math::Set<&str> = Analyzer::ALL.iter().map(|analyzer| analyzer.name()).collect();
        assert_eq!(names.len(), Analyzer::ALL.len());
    }
}
