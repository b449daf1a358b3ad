use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fields::{CostField, ValueField};

/// Point lookup for one field: answer code -> points.
pub type CodePoints = BTreeMap<String, u32>;

/// The weighted-scoring lookup table. A value passed into the engine, not
/// logic: tests run against fixture tables and a revised table can ship
/// without touching the calculator.
///
/// Codes absent from a field's map are worth 0 points. Q2 never appears
/// here; its raw text is parsed as an integer by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub value: BTreeMap<ValueField, CodePoints>,
    pub cost: BTreeMap<CostField, CodePoints>,
}

impl ScoringTable {
    /// Points for a business-value answer. Unknown codes degrade to 0.
    pub fn value_points(&self, field: ValueField, code: &str) -> u32 {
        self.value
            .get(&field)
            .and_then(|codes| codes.get(code))
            .copied()
            .unwrap_or(0)
    }

    /// Points for a cost-driver answer. Unknown codes degrade to 0.
    pub fn cost_points(&self, field: CostField, code: &str) -> u32 {
        self.cost
            .get(&field)
            .and_then(|codes| codes.get(code))
            .copied()
            .unwrap_or(0)
    }

    /// The stock questionnaire table.
    ///
    /// Value fields use the {2, 8, 21, 55} tiers; cost scales vary per
    /// driver.
    pub fn standard() -> Self {
        let mut value = BTreeMap::new();
        value.insert(
            ValueField::StrategicAlignment,
            tiers([
                "strongly_aligned",
                "aligned",
                "partially_aligned",
                "not_aligned",
            ]),
        );
        value.insert(
            ValueField::RevenueImpact,
            tiers(["over_5m", "from_1m_to_5m", "from_500k_to_1m", "under_500k"]),
        );
        value.insert(
            ValueField::SatisfactionImpact,
            tiers([
                "very_high_impact",
                "high_impact",
                "moderate_impact",
                "limited_impact",
            ]),
        );
        value.insert(
            ValueField::ClientAcquisition,
            tiers([
                "over_10_percent",
                "from_5_to_10_percent",
                "near_zero",
                "negative",
            ]),
        );
        value.insert(
            ValueField::CostMastery,
            tiers(["over_5m", "from_1m_to_5m", "from_500k_to_1m", "under_500k"]),
        );
        value.insert(
            ValueField::ThreatMitigation,
            tiers(["very_high", "high", "acceptable", "limited"]),
        );
        value.insert(
            ValueField::OpportunityCreation,
            tiers(["exceptional", "relevant", "modest", "limited_impact"]),
        );
        value.insert(
            ValueField::TechnicalConditions,
            tiers(["diversified_robust", "relevant", "modest", "limited_impact"]),
        );
        value.insert(
            ValueField::RegulatoryDeadline,
            tiers([
                "extreme_immediate",
                "high_near_term",
                "moderate_manageable",
                "low_manageable",
            ]),
        );
        value.insert(
            ValueField::CompetitivePressure,
            tiers(["extreme", "high", "moderate", "low"]),
        );
        value.insert(
            ValueField::StrategicDeadlines,
            tiers(["extreme", "high", "moderate", "low"]),
        );
        value.insert(
            ValueField::ObsolescenceUrgency,
            tiers(["immediate", "short_term", "medium_term", "long_term"]),
        );

        let mut cost = BTreeMap::new();
        cost.insert(
            CostField::Q1,
            scale(&[("small", 2), ("medium", 8), ("large", 21), ("very_large", 55)]),
        );
        cost.insert(
            CostField::Q3,
            scale(&[("0", 0), ("1", 3), ("2", 5), ("3", 5), ("4_5", 21)]),
        );
        cost.insert(
            CostField::Q4,
            scale(&[
                ("1", 1),
                ("2_3", 2),
                ("4", 4),
                ("5", 5),
                ("6", 6),
                ("7", 7),
                ("8", 8),
                ("9", 9),
                ("over_9", 10),
            ]),
        );
        cost.insert(
            CostField::Q5,
            scale(&[
                ("none", 0),
                ("very_low", 1),
                ("low", 2),
                ("medium", 3),
                ("high", 4),
            ]),
        );
        cost.insert(
            CostField::Q6,
            scale(&[
                ("1_5", 1),
                ("6_10", 2),
                ("11_20", 3),
                ("21_50", 4),
                ("51_100", 5),
                ("101_200", 6),
                ("201_500", 7),
                ("501_1000", 8),
                ("over_1000", 9),
            ]),
        );
        cost.insert(
            CostField::Q7,
            scale(&[
                ("nonexistent", 0),
                ("low", 2),
                ("medium", 8),
                ("high", 21),
                ("very_high", 55),
            ]),
        );
        cost.insert(
            CostField::Q8,
            scale(&[
                ("nonexistent", 0),
                ("low", 2),
                ("medium", 8),
                ("high", 21),
                ("very_high", 55),
            ]),
        );
        cost.insert(
            CostField::Q9,
            scale(&[
                ("very_low", 0),
                ("low", 2),
                ("medium", 8),
                ("high", 21),
                ("very_high", 55),
            ]),
        );
        cost.insert(
            CostField::Q10,
            scale(&[
                ("system_evolution", 2),
                ("partner_integration", 13),
                ("new_build", 21),
            ]),
        );

        Self { value, cost }
    }
}

/// Descending {55, 21, 8, 2} tier assignment for a four-code value field.
fn tiers(codes: [&str; 4]) -> CodePoints {
    const POINTS: [u32; 4] = [55, 21, 8, 2];
    codes
        .iter()
        .zip(POINTS)
        .map(|(code, points)| (code.to_string(), points))
        .collect()
}

fn scale(pairs: &[(&str, u32)]) -> CodePoints {
    pairs
        .iter()
        .map(|(code, points)| (code.to_string(), *points))
        .collect()
}
