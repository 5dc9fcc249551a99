//! Tri-state severity classification and aggregation.

use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, TimeBounds};
use crate::dataset::MetricDirection;

/// Ordered severity of a contrast outcome.
///
/// The order is total, `Match < Warn < Suspicious`, and aggregation
/// always picks the maximum (worst) state among children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContrastState {
    /// Measurement within the 95% confidence band of the reference.
    Match,
    /// Measurement outside the match band but within the 99% band.
    Warn,
    /// Measurement outside both bands, or data missing where the
    /// reference expects it.
    Suspicious,
}

impl ContrastState {
    /// Display label for the reporting boundary.
    pub fn label(self) -> &'static str {
        match self {
            ContrastState::Match => "MATCH",
            ContrastState::Warn => "WARN",
            ContrastState::Suspicious => "SUSPICIOUS",
        }
    }
}

impl std::fmt::Display for ContrastState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify one profile measurement against reference bounds.
///
/// Comparisons are strict: a value exactly equal to a bound is never
/// `Match` at that bound. For [`MetricDirection::LowerIsBetter`] the
/// value must fall below a bound; for
/// [`MetricDirection::HigherIsBetter`] above it.
pub fn classify_measurement(
    value: f64,
    bounds: &Bounds,
    direction: MetricDirection,
) -> ContrastState {
    match direction {
        MetricDirection::LowerIsBetter => {
            if value < bounds.match_bound {
                ContrastState::Match
            } else if value < bounds.warn_bound {
                ContrastState::Warn
            } else {
                ContrastState::Suspicious
            }
        }
        MetricDirection::HigherIsBetter => {
            if value > bounds.match_bound {
                ContrastState::Match
            } else if value > bounds.warn_bound {
                ContrastState::Warn
            } else {
                ContrastState::Suspicious
            }
        }
    }
}

/// Classify one profile execution time against the reference intervals.
///
/// `Match` iff the time falls strictly inside the match interval, else
/// `Warn` iff strictly inside the warn interval, else `Suspicious`.
pub fn classify_exec_time(time: f64, bounds: &TimeBounds) -> ContrastState {
    if time > bounds.match_low && time < bounds.match_high {
        ContrastState::Match
    } else if time > bounds.warn_low && time < bounds.warn_high {
        ContrastState::Warn
    } else {
        ContrastState::Suspicious
    }
}

/// Aggregate child states into the worst observed state.
///
/// Order-independent (the maximum under the severity order). Returns
/// `None` for an empty sequence; callers surface that as an
/// [`EmptyAggregation`](crate::ContrastError::EmptyAggregation) error
/// rather than defaulting.
pub fn aggregate<I>(states: I) -> Option<ContrastState>
where
    I: IntoIterator<Item = ContrastState>,
{
    states.into_iter().max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ContrastState::{Match, Suspicious, Warn};

    const BOUNDS: Bounds = Bounds {
        match_bound: 1.253,
        warn_bound: 1.346,
    };

    #[test]
    fn severity_order_is_total() {
        assert!(Match < Warn);
        assert!(Warn < Suspicious);
    }

    #[test]
    fn labels() {
        assert_eq!(Match.label(), "MATCH");
        assert_eq!(Warn.to_string(), "WARN");
        assert_eq!(Suspicious.to_string(), "SUSPICIOUS");
    }

    #[test]
    fn classify_lower_is_better() {
        let d = MetricDirection::LowerIsBetter;
        assert_eq!(classify_measurement(1.20, &BOUNDS, d), Match);
        assert_eq!(classify_measurement(1.30, &BOUNDS, d), Warn);
        assert_eq!(classify_measurement(1.50, &BOUNDS, d), Suspicious);
    }

    #[test]
    fn classify_higher_is_better_inverts() {
        let bounds = Bounds {
            match_bound: 0.90,
            warn_bound: 0.85,
        };
        let d = MetricDirection::HigherIsBetter;
        assert_eq!(classify_measurement(0.95, &bounds, d), Match);
        assert_eq!(classify_measurement(0.88, &bounds, d), Warn);
        assert_eq!(classify_measurement(0.80, &bounds, d), Suspicious);
    }

    #[test]
    fn value_on_a_bound_is_never_match_at_that_bound() {
        let d = MetricDirection::LowerIsBetter;
        assert_eq!(classify_measurement(BOUNDS.match_bound, &BOUNDS, d), Warn);
        assert_eq!(
            classify_measurement(BOUNDS.warn_bound, &BOUNDS, d),
            Suspicious
        );

        let bounds = Bounds {
            match_bound: 0.90,
            warn_bound: 0.85,
        };
        let d = MetricDirection::HigherIsBetter;
        assert_eq!(classify_measurement(0.90, &bounds, d), Warn);
        assert_eq!(classify_measurement(0.85, &bounds, d), Suspicious);
    }

    #[test]
    fn classify_exec_time_uses_strict_intervals() {
        let bounds = TimeBounds {
            match_low: 9.0,
            match_high: 11.0,
            warn_low: 8.0,
            warn_high: 12.0,
        };
        assert_eq!(classify_exec_time(10.0, &bounds), Match);
        assert_eq!(classify_exec_time(11.5, &bounds), Warn);
        assert_eq!(classify_exec_time(8.5, &bounds), Warn);
        assert_eq!(classify_exec_time(12.5, &bounds), Suspicious);
        // Boundary values are not inside.
        assert_eq!(classify_exec_time(11.0, &bounds), Warn);
        assert_eq!(classify_exec_time(12.0, &bounds), Suspicious);
    }

    #[test]
    fn aggregate_takes_worst_state() {
        assert_eq!(aggregate([Match, Warn, Match]), Some(Warn));
        assert_eq!(aggregate([Match, Suspicious, Warn]), Some(Suspicious));
        assert_eq!(aggregate([Match]), Some(Match));
    }

    #[test]
    fn aggregate_is_order_independent() {
        assert_eq!(
            aggregate([Warn, Match, Suspicious]),
            aggregate([Suspicious, Warn, Match])
        );
    }

    #[test]
    fn aggregate_of_nothing_is_none() {
        assert_eq!(aggregate([]), None);
    }
}
