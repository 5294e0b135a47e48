use crate::formatting::round_to;

/// Step-over-step loss between two consecutive funnel stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOff {
    /// `100 - later / earlier * 100`, rounded to two decimals. Negative when
    /// the later stage has more users than the earlier one.
    Percent(f64),
    /// The earlier stage has no users, so the ratio does not exist.
    Undefined,
}

impl DropOff {
    /// Compute the drop-off from `earlier` to `later` unique-user counts.
    ///
    /// Returns [`DropOff::Undefined`] instead of dividing by zero.
    pub fn between(earlier: usize, later: usize) -> Self {
        if earlier == 0 {
            return DropOff::Undefined;
        }
        let retained = later as f64 / earlier as f64 * 100.0;
        DropOff::Percent(round_to(100.0 - retained, 2))
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            DropOff::Percent(p) => Some(*p),
            DropOff::Undefined => None,
        }
    }
}

/// Share of `part` in `whole` as a percentage, unrounded.
///
/// Yields `0.0` for an empty `whole` so that conversion rates of empty
/// groups read as zero rather than NaN.
pub fn conversion_rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
