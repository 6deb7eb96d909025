//! Letter grades and grade averages

use serde::{Serialize, Serializer};
use std::fmt;

/// A gradeable letter. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    /// 1.0
    A,
    /// 2.0
    B,
    /// 3.0
    C,
    /// 4.0
    D,
    /// 5.0
    F,
}

impl Grade {
    /// Every gradeable letter, best first.
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Score on the 1.0 (best) to 5.0 (worst) scale.
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::A => 1.0,
            Self::B => 2.0,
            Self::C => 3.0,
            Self::D => 4.0,
            Self::F => 5.0,
        }
    }

    /// Canonical single-letter label.
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Resolve a stored grade label. Only the exact letters `A`-`D` and `F`
    /// resolve; anything else (e.g. `Incomplete`) is unmapped.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|grade| grade.letter() == label)
    }

    /// Normalize user input before storing it: surrounding whitespace is
    /// dropped, letters are upper-cased, blank input means "no grade".
    /// Labels outside the letter set are kept as typed.
    #[must_use]
    pub fn normalize_label(input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let upper = trimmed.to_ascii_uppercase();
        Some(Self::from_label(&upper).map_or_else(|| trimmed.to_string(), |g| g.letter().to_string()))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Mean grade score over a set of enrollments, or "not applicable" when
/// none of them carry a mapped grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeAverage {
    /// Mean score rounded to two decimal places
    Score(f64),
    /// No gradeable enrollments
    NotApplicable,
}

/// Serialized as a number, or the string `"N/A"`.
impl Serialize for GradeAverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Score(v) => serializer.serialize_f64(*v),
            Self::NotApplicable => serializer.serialize_str(Self::NOT_APPLICABLE),
        }
    }
}

impl GradeAverage {
    /// Rendering of [`GradeAverage::NotApplicable`].
    pub const NOT_APPLICABLE: &'static str = "N/A";

    /// Average the given grade labels. Missing and unmapped labels are left
    /// out of both the sum and the count.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        Self::from_grades(
            labels
                .into_iter()
                .filter_map(|label| label.and_then(Grade::from_label)),
        )
    }

    /// Average already-resolved grades.
    pub fn from_grades<I>(grades: I) -> Self
    where
        I: IntoIterator<Item = Grade>,
    {
        let (sum, count) = grades
            .into_iter()
            .fold((0.0_f64, 0_u32), |(sum, count), grade| {
                (sum + grade.score(), count + 1)
            });

        if count == 0 {
            Self::NotApplicable
        } else {
            Self::Score(round2(sum / f64::from(count)))
        }
    }
}

impl fmt::Display for GradeAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(v) => write!(f, "{v:.2}"),
            Self::NotApplicable => f.write_str(Self::NOT_APPLICABLE),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
