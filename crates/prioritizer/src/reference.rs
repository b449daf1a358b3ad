//! Reference data consumed around the scoring path: project categories and
//! release windows. Kept as plain values; the API seeds them at startup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Portfolio category a project is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// Delivery release window. Projects are attached to the release whose
/// window contains their target go-live date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: u32,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Release {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Pick the release whose window contains `date`. When windows overlap the
/// latest-starting release wins, matching how go-live dates are assigned to
/// the most specific window.
pub fn release_for_date(releases: &[Release], date: NaiveDate) -> Option<&Release> {
    releases
        .iter()
        .filter(|release| release.contains(date))
        .max_by_key(|release| release.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn releases() -> Vec<Release> {
        vec![
            Release {
                id: 1,
                name: "R1".to_string(),
                start: date(2025, 1, 1),
                end: date(2025, 6, 30),
            },
            Release {
                id: 2,
                name: "R2".to_string(),
                start: date(2025, 4, 1),
                end: date(2025, 12, 31),
            },
        ]
    }

    #[test]
    fn picks_the_containing_window() {
        let releases = releases();
        assert_eq!(
            release_for_date(&releases, date(2025, 2, 10)).map(|r| r.id),
            Some(1)
        );
        assert_eq!(
            release_for_date(&releases, date(2025, 8, 1)).map(|r| r.id),
            Some(2)
        );
        assert_eq!(release_for_date(&releases, date(2026, 1, 1)), None);
    }

    #[test]
    fn overlapping_windows_prefer_the_latest_start() {
        let releases = releases();
        assert_eq!(
            release_for_date(&releases, date(2025, 5, 15)).map(|r| r.id),
            Some(2)
        );
    }
}
