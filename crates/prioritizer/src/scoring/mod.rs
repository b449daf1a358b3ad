//! WSJF scoring: categorical questionnaire answers in, priority index out.
//!
//! The engine is a pure function over an injected [`ScoringTable`]. It is
//! total by design: missing or unrecognized codes contribute 0 points and a
//! zero cost sum yields a zero score instead of a division error, so data
//! entry is never blocked by a degenerate questionnaire.

mod fields;
mod table;

pub use fields::{CostField, ProjectAnswers, ValueField};
pub use table::{CodePoints, ScoringTable};

use serde::{Deserialize, Serialize};

/// Three-tier complexity bucket derived from the raw cost-point sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Buckets the raw cost sum: `<50` low, `50..=100` medium, `>100` high.
    pub const fn from_cost_points(points: u32) -> Self {
        if points < 50 {
            Complexity::Low
        } else if points <= 100 {
            Complexity::Medium
        } else {
            Complexity::High
        }
    }

    /// Ordinal class persisted alongside projects (1 = low .. 3 = high).
    pub const fn rank(self) -> u8 {
        match self {
            Complexity::Low => 1,
            Complexity::Medium => 2,
            Complexity::High => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }

    /// Planning placeholder in person-days per complexity class.
    pub const fn effort_days(self) -> u32 {
        match self {
            Complexity::Low => 20,
            Complexity::Medium => 40,
            Complexity::High => 60,
        }
    }
}

/// Output of one scoring pass. Ephemeral; its fields are embedded into the
/// stored project record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Numerator: business-value points.
    pub value_points: u32,
    /// Denominator: implementation-cost points (raw complexity score).
    pub cost_points: u32,
    /// Priority index, rounded to two decimals.
    pub score: f64,
    pub complexity: Complexity,
    pub effort_days: u32,
}

/// Stateless calculator applying a [`ScoringTable`] to raw answers.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    table: ScoringTable,
}

impl ScoringEngine {
    pub fn new(table: ScoringTable) -> Self {
        Self { table }
    }

    pub fn standard() -> Self {
        Self::new(ScoringTable::standard())
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Compute the priority index for one questionnaire snapshot.
    ///
    /// Never fails: unknown codes and unparseable direct entries count as 0.
    pub fn score(&self, answers: &ProjectAnswers) -> ScoreResult {
        let value_points: u32 = ValueField::ALL
            .iter()
            .map(|&field| {
                answers
                    .value_code(field)
                    .map(|code| self.table.value_points(field, code))
                    .unwrap_or(0)
            })
            .sum();

        let cost_points: u32 = CostField::ALL
            .iter()
            .map(|&field| {
                let code = answers.cost_code(field).unwrap_or("");
                if field.is_direct_entry() {
                    code.trim().parse::<u32>().unwrap_or(0)
                } else {
                    self.table.cost_points(field, code)
                }
            })
            .sum();

        let score = if cost_points == 0 {
            0.0
        } else {
            round2(f64::from(value_points) * 2.0 / f64::from(cost_points))
        };

        let complexity = Complexity::from_cost_points(cost_points);

        ScoreResult {
            value_points,
            cost_points,
            score,
            complexity,
            effort_days: complexity.effort_days(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
