//! What a finished run reports back.

/// The final result of a run together with how it was reached.
///
/// Exhausting the retry budget is not an error: the last result comes back
/// either way, and `satisfied` tells the two cases apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<R> {
    /// The last result produced.
    pub value: R,
    /// How many times the producer was invoked (at least 1).
    pub invocations: u64,
    /// Whether the predicate accepted `value`.
    pub satisfied: bool,
}

impl<R> Outcome<R> {
    /// Number of invocations after the first one.
    pub fn retries_used(&self) -> u64 {
        self.invocations.saturating_sub(1)
    }

    /// `true` when the run ended because the budget ran out.
    pub fn is_exhausted(&self) -> bool {
        !self.satisfied
    }

    /// Discard the bookkeeping and keep the value.
    pub fn into_value(self) -> R {
        self.value
    }

    /// `Ok(value)` if the predicate accepted it, otherwise `Err(value)`.
    pub fn into_result(self) -> Result<R, R> {
        if self.satisfied {
            Ok(self.value)
        } else {
            Err(self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_outcome() {
        let outcome = Outcome {
            value: "x",
            invocations: 3,
            satisfied: false,
        };

        assert!(outcome.is_exhausted());
        assert_eq!(outcome.retries_used(), 2);
        assert_eq!(outcome.into_result(), Err("x"));
    }

    #[test]
    fn test_satisfied_outcome() {
        let outcome = Outcome {
            value: 7,
            invocations: 1,
            satisfied: true,
        };

        assert_eq!(outcome.retries_used(), 0);
        assert_eq!(outcome.clone().into_value(), 7);
        assert_eq!(outcome.into_result(), Ok(7));
    }
}
