//! Attendance rating bands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::ThemeColor;

/// Letter grade for the share of the attendance budget that was met.
///
/// Bands are half-open with inclusive lower bounds, checked highest first:
///
/// | rate            | rating |
/// |-----------------|--------|
/// | >= 0.90         | A      |
/// | [0.75, 0.90)    | B      |
/// | [0.60, 0.75)    | C      |
/// | [0.40, 0.60)    | D      |
/// | < 0.40          | E/F    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttendanceRating {
    #[serde(rename = "E/F")]
    EOrF,
    D,
    C,
    B,
    A,
}

impl AttendanceRating {
    /// Band a completion rate. Rates above 1.0 still grade as `A`; NaN grades
    /// as `E/F`.
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 0.90 {
            AttendanceRating::A
        } else if rate >= 0.75 {
            AttendanceRating::B
        } else if rate >= 0.60 {
            AttendanceRating::C
        } else if rate >= 0.40 {
            AttendanceRating::D
        } else {
            AttendanceRating::EOrF
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceRating::A => "A",
            AttendanceRating::B => "B",
            AttendanceRating::C => "C",
            AttendanceRating::D => "D",
            AttendanceRating::EOrF => "E/F",
        }
    }

    /// Badge colour.
    pub fn color(&self) -> ThemeColor {
        match self {
            AttendanceRating::A => ThemeColor::Green,
            AttendanceRating::B => ThemeColor::Blue,
            AttendanceRating::C => ThemeColor::Orange,
            AttendanceRating::D => ThemeColor::Red,
            AttendanceRating::EOrF => ThemeColor::Gray,
        }
    }
}

impl fmt::Display for AttendanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(AttendanceRating::from_rate(0.90), AttendanceRating::A);
        assert_eq!(AttendanceRating::from_rate(0.8999), AttendanceRating::B);
        assert_eq!(AttendanceRating::from_rate(0.75), AttendanceRating::B);
        assert_eq!(AttendanceRating::from_rate(0.7499), AttendanceRating::C);
        assert_eq!(AttendanceRating::from_rate(0.60), AttendanceRating::C);
        assert_eq!(AttendanceRating::from_rate(0.5999), AttendanceRating::D);
        assert_eq!(AttendanceRating::from_rate(0.40), AttendanceRating::D);
        assert_eq!(AttendanceRating::from_rate(0.39), AttendanceRating::EOrF);
        assert_eq!(AttendanceRating::from_rate(0.0), AttendanceRating::EOrF);
    }

    #[test]
    fn over_achievement_is_a() {
        assert_eq!(AttendanceRating::from_rate(2.5), AttendanceRating::A);
    }

    #[test]
    fn nan_is_lowest_band() {
        assert_eq!(AttendanceRating::from_rate(f64::NAN), AttendanceRating::EOrF);
    }

    #[test]
    fn letters_and_colors() {
        assert_eq!(AttendanceRating::EOrF.to_string(), "E/F");
        assert_eq!(AttendanceRating::A.color(), ThemeColor::Green);
        assert_eq!(AttendanceRating::D.color(), ThemeColor::Red);
        assert_eq!(serde_json::to_string(&AttendanceRating::EOrF).unwrap(), "\"E/F\"");
    }

    #[test]
    fn ordering_follows_grade() {
        assert!(AttendanceRating::A > AttendanceRating::B);
        assert!(AttendanceRating::D > AttendanceRating::EOrF);
    }
}
