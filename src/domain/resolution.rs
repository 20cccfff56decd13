//! Override resolution for value-returning hooks.
//!
//! When several subscribers answer the same query, their answers are
//! folded against the host's baseline value with a first-divergence
//! policy:
//!
//! - the result starts as the baseline;
//! - the first candidate that differs from the baseline is captured;
//! - every later candidate is still consumed but ignored;
//! - if nothing differs, the baseline is the result.
//!
//! This is neither "last writer wins" nor a vote. A mod that answers
//! with the baseline value does not block a later mod from overriding.

/// Fold state for the first-divergence policy.
///
/// Feed candidates in registration order with [`offer`](Self::offer)
/// and read the outcome with [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct FirstDivergence<R> {
    baseline: R,
    captured: Option<R>,
}

impl<R: PartialEq> FirstDivergence<R> {
    /// Starts a fold over the given baseline.
    #[must_use]
    pub const fn new(baseline: R) -> Self {
        Self {
            baseline,
            captured: None,
        }
    }

    /// Offers one candidate. Captured only if nothing was captured yet
    /// and it differs from the baseline.
    pub fn offer(&mut self, candidate: R) {
        if self.captured.is_none() && candidate != self.baseline {
            self.captured = Some(candidate);
        }
    }

    /// Returns `true` once a divergent candidate has been captured.
    #[must_use]
    pub const fn is_overridden(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns the baseline this fold started from.
    #[must_use]
    pub const fn baseline(&self) -> &R {
        &self.baseline
    }

    /// Ends the fold, returning the captured override or the baseline.
    #[must_use]
    pub fn finish(self) -> R {
        self.captured.unwrap_or(self.baseline)
    }
}

/// Resolves `candidates` against `baseline`, consuming every candidate.
///
/// The iterator is always drained, so lazy candidate producers run to
/// completion even after an override has been captured.
pub fn first_divergence<R, I>(baseline: R, candidates: I) -> R
where
    R: PartialEq,
    I: IntoIterator<Item = R>,
{
    let mut fold = FirstDivergence::new(baseline);
    for candidate in candidates {
        fold.offer(candidate);
    }
    fold.finish()
}
