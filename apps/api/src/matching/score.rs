/// Similarity held as a fraction in `[0, 1]`.
/// Both matchers produce it and both remark tiers compare against it; only the
/// response boundary turns it into a percentage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct MatchScore(f64);

impl MatchScore {
    /// Clamps into `[0, 1]`; NaN becomes 0.
    pub fn from_fraction(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    /// Percentage rounded to two decimals, e.g. `0.83456` → `83.46`.
    pub fn percent(self) -> f64 {
        (self.0 * 10_000.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(MatchScore::from_fraction(0.83456).percent(), 83.46);
        assert_eq!(MatchScore::from_fraction(0.5).percent(), 50.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(MatchScore::from_fraction(-0.2).fraction(), 0.0);
        assert_eq!(MatchScore::from_fraction(1.0000001).fraction(), 1.0);
        assert_eq!(MatchScore::from_fraction(f64::NAN).fraction(), 0.0);
    }
}
