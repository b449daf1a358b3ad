//! Weekly capacity planning ("CAF"): available person-days per profile
//! against the load required by planned projects.
//!
//! The planning grid is 52 week slots labeled S1..S52, anchored on the
//! first Monday of the year; each slot carries the month its Monday falls
//! in so views can filter by month.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Working days per collaborator per week.
pub const DAYS_PER_WEEK: u32 = 5;

const WEEKS_PER_YEAR: u32 = 52;

/// One planning week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekSlot {
    /// Label S1..S52.
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Month name of the week's Monday, e.g. "January".
    pub month: String,
}

/// The year's planning grid.
#[derive(Debug, Clone)]
pub struct WeekGrid {
    year: i32,
    slots: Vec<WeekSlot>,
}

impl WeekGrid {
    pub fn for_year(year: i32) -> Self {
        let mut monday = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
        while monday.weekday() != Weekday::Mon {
            monday += Duration::days(1);
        }

        let slots = (1..=WEEKS_PER_YEAR)
            .map(|index| {
                let start = monday + Duration::weeks(i64::from(index) - 1);
                WeekSlot {
                    label: format!("S{index}"),
                    start,
                    end: start + Duration::days(6),
                    month: start.format("%B").to_string(),
                }
            })
            .collect();

        Self { year, slots }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn slots(&self) -> &[WeekSlot] {
        &self.slots
    }

    pub fn labels(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.label.clone()).collect()
    }

    /// Week labels whose Monday falls in the given month name.
    pub fn weeks_in_month(&self, month: &str) -> Vec<String> {
        self.slots
            .iter()
            .filter(|slot| slot.month.eq_ignore_ascii_case(month))
            .map(|slot| slot.label.clone())
            .collect()
    }
}

/// Staffing headcount for one profile (e.g. developer, business analyst).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHeadcount {
    pub profile: String,
    pub collaborators: u32,
}

/// Available capacity per profile: headcount times five days, identical
/// for every week of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityRow {
    pub profile: String,
    pub collaborators: u32,
    pub weekly_days: u32,
}

pub fn available_capacity(profiles: &[ProfileHeadcount]) -> Vec<AvailabilityRow> {
    profiles
        .iter()
        .map(|headcount| AvailabilityRow {
            profile: headcount.profile.clone(),
            collaborators: headcount.collaborators,
            weekly_days: headcount.collaborators * DAYS_PER_WEEK,
        })
        .collect()
}

/// Share of a phase assigned to one profile, in percent (0..100).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhaseAllocation {
    pub profile: String,
    pub percentage: f64,
}

/// Scheduled window of a project phase with its profile allocations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlannedPhase {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub allocations: Vec<PhaseAllocation>,
}

/// A project weighing on the plan: its effort estimate and phase windows.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlannedProject {
    pub title: String,
    pub effort_days: u32,
    pub phases: Vec<PlannedPhase>,
}

/// Required person-days per profile, keyed by week label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadRow {
    pub profile: String,
    pub by_week: BTreeMap<String, f64>,
}

/// Spread each phase's share of the effort evenly over the weeks its
/// window overlaps. Windows outside the grid or with a reversed range
/// overlap nothing and contribute 0, mirroring the tolerant scoring path:
/// planning never fails on malformed rows.
pub fn required_load(grid: &WeekGrid, projects: &[PlannedProject]) -> Vec<LoadRow> {
    let mut per_profile: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for project in projects {
        for phase in &project.phases {
            let overlapping: Vec<&WeekSlot> = grid
                .slots()
                .iter()
                .filter(|slot| phase.start <= slot.end && phase.end >= slot.start)
                .collect();
            if overlapping.is_empty() {
                continue;
            }

            for allocation in &phase.allocations {
                let charge = f64::from(project.effort_days) * allocation.percentage / 100.0;
                if charge <= 0.0 {
                    continue;
                }
                let per_week = charge / overlapping.len() as f64;
                let row = per_profile.entry(allocation.profile.clone()).or_default();
                for slot in &overlapping {
                    *row.entry(slot.label.clone()).or_insert(0.0) += per_week;
                }
            }
        }
    }

    per_profile
        .into_iter()
        .map(|(profile, by_week)| LoadRow {
            profile,
            by_week: by_week
                .into_iter()
                .map(|(label, days)| (label, round2(days)))
                .collect(),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn grid_anchors_on_the_first_monday() {
        let grid = WeekGrid::for_year(2025);
        assert_eq!(grid.slots().len(), 52);

        let first = &grid.slots()[0];
        assert_eq!(first.label, "S1");
        assert_eq!(first.start, date(2025, 1, 6));
        assert_eq!(first.end, date(2025, 1, 12));
        assert_eq!(first.month, "January");
    }

    #[test]
    fn weeks_filter_by_month_label() {
        let grid = WeekGrid::for_year(2025);
        let january = grid.weeks_in_month("January");
        assert_eq!(january, vec!["S1", "S2", "S3", "S4"]);
        assert!(grid.weeks_in_month("Brumaire").is_empty());
    }

    #[test]
    fn availability_is_headcount_times_five() {
        let rows = available_capacity(&[
            ProfileHeadcount {
                profile: "developer".to_string(),
                collaborators: 3,
            },
            ProfileHeadcount {
                profile: "analyst".to_string(),
                collaborators: 1,
            },
        ]);
        assert_eq!(rows[0].weekly_days, 15);
        assert_eq!(rows[1].weekly_days, 5);
    }

    #[test]
    fn load_spreads_evenly_over_the_phase_window() {
        let grid = WeekGrid::for_year(2025);
        // Two full weeks: S1 and S2.
        let projects = vec![PlannedProject {
            title: "alpha".to_string(),
            effort_days: 40,
            phases: vec![PlannedPhase {
                start: date(2025, 1, 6),
                end: date(2025, 1, 19),
                allocations: vec![PhaseAllocation {
                    profile: "developer".to_string(),
                    percentage: 50.0,
                }],
            }],
        }];

        let rows = required_load(&grid, &projects);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].profile, "developer");
        assert_eq!(rows[0].by_week.get("S1"), Some(&10.0));
        assert_eq!(rows[0].by_week.get("S2"), Some(&10.0));
        assert_eq!(rows[0].by_week.get("S3"), None);
    }

    #[test]
    fn partial_week_overlap_still_counts_the_week() {
        let grid = WeekGrid::for_year(2025);
        let projects = vec![PlannedProject {
            title: "beta".to_string(),
            effort_days: 20,
            phases: vec![PlannedPhase {
                // Wednesday to Wednesday, touching S1 and S2.
                start: date(2025, 1, 8),
                end: date(2025, 1, 15),
                allocations: vec![PhaseAllocation {
                    profile: "analyst".to_string(),
                    percentage: 100.0,
                }],
            }],
        }];

        let rows = required_load(&grid, &projects);
        assert_eq!(rows[0].by_week.get("S1"), Some(&10.0));
        assert_eq!(rows[0].by_week.get("S2"), Some(&10.0));
    }

    #[test]
    fn reversed_or_out_of_grid_windows_contribute_nothing() {
        let grid = WeekGrid::for_year(2025);
        let projects = vec![PlannedProject {
            title: "gamma".to_string(),
            effort_days: 30,
            phases: vec![
                PlannedPhase {
                    start: date(2025, 3, 10),
                    end: date(2025, 3, 1),
                    allocations: vec![PhaseAllocation {
                        profile: "developer".to_string(),
                        percentage: 100.0,
                    }],
                },
                PlannedPhase {
                    start: date(2027, 1, 1),
                    end: date(2027, 2, 1),
                    allocations: vec![PhaseAllocation {
                        profile: "developer".to_string(),
                        percentage: 100.0,
                    }],
                },
            ],
        }];

        assert!(required_load(&grid, &projects).is_empty());
    }

    #[test]
    fn allocations_accumulate_across_projects() {
        let grid = WeekGrid::for_year(2025);
        let phase = PlannedPhase {
            start: date(2025, 1, 6),
            end: date(2025, 1, 12),
            allocations: vec![PhaseAllocation {
                profile: "developer".to_string(),
                percentage: 100.0,
            }],
        };
        let projects = vec![
            PlannedProject {
                title: "one".to_string(),
                effort_days: 20,
                phases: vec![phase.clone()],
            },
            PlannedProject {
                title: "two".to_string(),
                effort_days: 40,
                phases: vec![phase],
            },
        ];

        let rows = required_load(&grid, &projects);
        assert_eq!(rows[0].by_week.get("S1"), Some(&60.0));
    }
}
