//! Grade-point arithmetic for the 10-point academic scale.
//!
//! Every function here is pure and total over its stated domain; invalid
//! input is signaled through `Option`, never through a panic or an error
//! value.

/// A grade point on the closed interval [0, 10].
///
/// Construction goes through [`GradePoint::new`] or [`GradePoint::parse`],
/// so every value in circulation is finite and in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradePoint(f32);

impl GradePoint {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Option<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Some(GradePoint(value))
        } else {
            None
        }
    }

    /// Parses raw field text. Empty or unparseable text yields `None`; the
    /// caller decides whether that means "absent" or "out of range".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f32>().ok().and_then(Self::new)
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Percentage equivalent of a grade point: `(g - 0.75) * 10`.
///
/// The output is deliberately unclamped; a grade point of 10 maps to 92.5
/// and a grade point of 0 maps to -7.5.
pub fn grade_to_percentage(g: GradePoint) -> f32 {
    (g.value() - 0.75) * 10.0
}

/// Arithmetic mean of the odd-term and even-term grade points.
pub fn yearly_grade_point(odd: GradePoint, even: GradePoint) -> GradePoint {
    // The mean of two in-range values is itself in range.
    GradePoint((odd.value() + even.value()) / 2.0)
}

/// True iff the raw text parses as a finite number in [0, 10].
pub fn is_valid_grade_point(raw: &str) -> bool {
    GradePoint::parse(raw).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_to_percentage() {
        let g = |v: f32| GradePoint::new(v).unwrap();
        assert_eq!(grade_to_percentage(g(10.0)), 92.5);
        assert_eq!(grade_to_percentage(g(0.0)), -7.5);
        assert_eq!(grade_to_percentage(g(7.5)), 67.5);
        assert_eq!(grade_to_percentage(g(8.5)), 77.5);
    }

    #[test]
    fn test_yearly_grade_point() {
        let g = |v: f32| GradePoint::new(v).unwrap();
        assert_eq!(yearly_grade_point(g(8.0), g(9.0)).value(), 8.5);
        // Commutative.
        assert_eq!(
            yearly_grade_point(g(3.25), g(7.75)),
            yearly_grade_point(g(7.75), g(3.25)),
        );
        assert_eq!(grade_to_percentage(yearly_grade_point(g(8.0), g(9.0))), 77.5);
    }

    #[test]
    fn test_is_valid_grade_point() {
        assert!(is_valid_grade_point("10"));
        assert!(is_valid_grade_point("0"));
        assert!(is_valid_grade_point(" 7.5 "));

        assert!(!is_valid_grade_point(""));
        assert!(!is_valid_grade_point("   "));
        assert!(!is_valid_grade_point("10.01"));
        assert!(!is_valid_grade_point("-0.1"));
        assert!(!is_valid_grade_point("abc"));
        assert!(!is_valid_grade_point("inf"));
        assert!(!is_valid_grade_point("NaN"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        for raw in ["8.5", "", "abc", "10.01"] {
            assert_eq!(GradePoint::parse(raw), GradePoint::parse(raw));
        }
    }
}
