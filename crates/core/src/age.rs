//! Volunteer age computation and the fixed age buckets of the age
//! distribution report.
//!
//! The bucket boundaries are defined once, in [`AgeBucket::bounds`]. The
//! database layer renders its SQL rank expression from the same table, so
//! the grouping and the ordering of the report cannot disagree.

use chrono::Datelike;
use serde::Serialize;

use crate::types::Date;

/// One of the five ordered age ranges volunteers are grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBucket {
    #[serde(rename = "Menor de 18")]
    Under18,
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-50")]
    From36To50,
    #[serde(rename = "Mayor de 50")]
    Over50,
}

impl AgeBucket {
    /// All buckets in report order.
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Under18,
        AgeBucket::From18To25,
        AgeBucket::From26To35,
        AgeBucket::From36To50,
        AgeBucket::Over50,
    ];

    /// Inclusive `(min, max)` ages covered by the bucket. `None` is open-ended.
    pub const fn bounds(self) -> (Option<i32>, Option<i32>) {
        match self {
            AgeBucket::Under18 => (None, Some(17)),
            AgeBucket::From18To25 => (Some(18), Some(25)),
            AgeBucket::From26To35 => (Some(26), Some(35)),
            AgeBucket::From36To50 => (Some(36), Some(50)),
            AgeBucket::Over50 => (Some(51), None),
        }
    }

    /// Position in the report, starting at 1.
    pub const fn rank(self) -> i32 {
        match self {
            AgeBucket::Under18 => 1,
            AgeBucket::From18To25 => 2,
            AgeBucket::From26To35 => 3,
            AgeBucket::From36To50 => 4,
            AgeBucket::Over50 => 5,
        }
    }

    /// Stable `grupo_edad` label.
    pub const fn label(self) -> &'static str {
        match self {
            AgeBucket::Under18 => "Menor de 18",
            AgeBucket::From18To25 => "18-25",
            AgeBucket::From26To35 => "26-35",
            AgeBucket::From36To50 => "36-50",
            AgeBucket::Over50 => "Mayor de 50",
        }
    }

    pub fn from_rank(rank: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.rank() == rank)
    }

    /// Whether `age` lies inside this bucket's inclusive bounds.
    pub fn contains(self, age: i32) -> bool {
        let (min, max) = self.bounds();
        min.map_or(true, |m| age >= m) && max.map_or(true, |m| age <= m)
    }

    /// The bucket an age falls into. Every age maps to exactly one bucket.
    pub fn for_age(age: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.contains(age))
            .unwrap_or(AgeBucket::Over50)
    }
}

impl std::fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Completed years between `birth_date` and `reference`.
///
/// Matches the year component of PostgreSQL `AGE(reference, birth_date)`:
/// the age increments on the birthday itself, and a 29 February birthday
/// is reached on 1 March in non-leap years.
pub fn age_in_years(birth_date: Date, reference: Date) -> i32 {
    let mut years = reference.year() - birth_date.year();
    if (reference.month(), reference.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_age_maps_to_exactly_one_bucket() {
        for age in -5..=130 {
            let matching: Vec<_> = AgeBucket::ALL
                .into_iter()
                .filter(|b| b.contains(age))
                .collect();
            assert_eq!(matching.len(), 1, "age {age} matched {matching:?}");
            assert_eq!(AgeBucket::for_age(age), matching[0]);
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(AgeBucket::for_age(17), AgeBucket::Under18);
        assert_eq!(AgeBucket::for_age(18), AgeBucket::From18To25);
        assert_eq!(AgeBucket::for_age(25), AgeBucket::From18To25);
        assert_eq!(AgeBucket::for_age(26), AgeBucket::From26To35);
        assert_eq!(AgeBucket::for_age(35), AgeBucket::From26To35);
        assert_eq!(AgeBucket::for_age(36), AgeBucket::From36To50);
        assert_eq!(AgeBucket::for_age(50), AgeBucket::From36To50);
        assert_eq!(AgeBucket::for_age(51), AgeBucket::Over50);
    }

    #[test]
    fn ranks_follow_report_order() {
        let ranks: Vec<i32> = AgeBucket::ALL.iter().map(|b| b.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        for bucket in AgeBucket::ALL {
            assert_eq!(AgeBucket::from_rank(bucket.rank()), Some(bucket));
        }
        assert_eq!(AgeBucket::from_rank(0), None);
        assert_eq!(AgeBucket::from_rank(6), None);
    }

    #[test]
    fn labels_serialize_as_grupo_edad_values() {
        let json = serde_json::to_string(&AgeBucket::ALL).unwrap();
        assert_eq!(
            json,
            r#"["Menor de 18","18-25","26-35","36-50","Mayor de 50"]"#
        );
        assert_eq!(AgeBucket::From36To50.to_string(), "36-50");
    }

    #[test]
    fn exactly_eighteen_on_birthday() {
        let reference = date(2024, 6, 15);
        let age = age_in_years(date(2006, 6, 15), reference);
        assert_eq!(age, 18);
        assert_eq!(AgeBucket::for_age(age), AgeBucket::From18To25);
    }

    #[test]
    fn day_before_birthday_is_still_younger() {
        assert_eq!(age_in_years(date(2006, 6, 16), date(2024, 6, 15)), 17);
    }

    #[test]
    fn leap_day_birthday() {
        assert_eq!(age_in_years(date(2004, 2, 29), date(2022, 2, 28)), 17);
        assert_eq!(age_in_years(date(2004, 2, 29), date(2022, 3, 1)), 18);
        assert_eq!(age_in_years(date(2004, 2, 29), date(2024, 2, 29)), 20);
    }

    #[test]
    fn birth_after_reference_is_negative() {
        assert_eq!(age_in_years(date(2025, 1, 1), date(2024, 1, 1)), -1);
        assert_eq!(AgeBucket::for_age(-1), AgeBucket::Under18);
    }
}
