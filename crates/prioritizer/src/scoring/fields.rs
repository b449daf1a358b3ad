use serde::{Deserialize, Serialize};

/// Business-value dimensions feeding the WSJF numerator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueField {
    StrategicAlignment,
    RevenueImpact,
    SatisfactionImpact,
    ClientAcquisition,
    CostMastery,
    ThreatMitigation,
    OpportunityCreation,
    TechnicalConditions,
    RegulatoryDeadline,
    CompetitivePressure,
    StrategicDeadlines,
    ObsolescenceUrgency,
}

impl ValueField {
    pub const ALL: [ValueField; 12] = [
        ValueField::StrategicAlignment,
        ValueField::RevenueImpact,
        ValueField::SatisfactionImpact,
        ValueField::ClientAcquisition,
        ValueField::CostMastery,
        ValueField::ThreatMitigation,
        ValueField::OpportunityCreation,
        ValueField::TechnicalConditions,
        ValueField::RegulatoryDeadline,
        ValueField::CompetitivePressure,
        ValueField::StrategicDeadlines,
        ValueField::ObsolescenceUrgency,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ValueField::StrategicAlignment => "strategic_alignment",
            ValueField::RevenueImpact => "revenue_impact",
            ValueField::SatisfactionImpact => "satisfaction_impact",
            ValueField::ClientAcquisition => "client_acquisition",
            ValueField::CostMastery => "cost_mastery",
            ValueField::ThreatMitigation => "threat_mitigation",
            ValueField::OpportunityCreation => "opportunity_creation",
            ValueField::TechnicalConditions => "technical_conditions",
            ValueField::RegulatoryDeadline => "regulatory_deadline",
            ValueField::CompetitivePressure => "competitive_pressure",
            ValueField::StrategicDeadlines => "strategic_deadlines",
            ValueField::ObsolescenceUrgency => "obsolescence_urgency",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// Implementation-cost drivers feeding the WSJF denominator.
///
/// The questionnaire labels these q1..q10. Q2 is a free integer entry
/// (direct cost in points); every other field is a categorical code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CostField {
    /// Delivery size band.
    Q1,
    /// Direct integer entry.
    Q2,
    /// Number of integrations.
    Q3,
    /// Organizational impact.
    Q4,
    /// External dependency risk.
    Q5,
    /// Number of affected users.
    Q6,
    /// Technical risk.
    Q7,
    /// Business risk.
    Q8,
    /// Data volume.
    Q9,
    /// Delivery model.
    Q10,
}

impl CostField {
    pub const ALL: [CostField; 10] = [
        CostField::Q1,
        CostField::Q2,
        CostField::Q3,
        CostField::Q4,
        CostField::Q5,
        CostField::Q6,
        CostField::Q7,
        CostField::Q8,
        CostField::Q9,
        CostField::Q10,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CostField::Q1 => "q1",
            CostField::Q2 => "q2",
            CostField::Q3 => "q3",
            CostField::Q4 => "q4",
            CostField::Q5 => "q5",
            CostField::Q6 => "q6",
            CostField::Q7 => "q7",
            CostField::Q8 => "q8",
            CostField::Q9 => "q9",
            CostField::Q10 => "q10",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }

    pub const fn is_direct_entry(self) -> bool {
        matches!(self, CostField::Q2)
    }
}

/// Raw questionnaire snapshot for one project. Every field is optional;
/// the engine treats missing and unrecognized codes identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectAnswers {
    pub strategic_alignment: Option<String>,
    pub revenue_impact: Option<String>,
    pub satisfaction_impact: Option<String>,
    pub client_acquisition: Option<String>,
    pub cost_mastery: Option<String>,
    pub threat_mitigation: Option<String>,
    pub opportunity_creation: Option<String>,
    pub technical_conditions: Option<String>,
    pub regulatory_deadline: Option<String>,
    pub competitive_pressure: Option<String>,
    pub strategic_deadlines: Option<String>,
    pub obsolescence_urgency: Option<String>,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub q5: Option<String>,
    pub q6: Option<String>,
    pub q7: Option<String>,
    pub q8: Option<String>,
    pub q9: Option<String>,
    pub q10: Option<String>,
}

impl ProjectAnswers {
    pub fn value_code(&self, field: ValueField) -> Option<&str> {
        let slot = match field {
            ValueField::StrategicAlignment => &self.strategic_alignment,
            ValueField::RevenueImpact => &self.revenue_impact,
            ValueField::SatisfactionImpact => &self.satisfaction_impact,
            ValueField::ClientAcquisition => &self.client_acquisition,
            ValueField::CostMastery => &self.cost_mastery,
            ValueField::ThreatMitigation => &self.threat_mitigation,
            ValueField::OpportunityCreation => &self.opportunity_creation,
            ValueField::TechnicalConditions => &self.technical_conditions,
            ValueField::RegulatoryDeadline => &self.regulatory_deadline,
            ValueField::CompetitivePressure => &self.competitive_pressure,
            ValueField::StrategicDeadlines => &self.strategic_deadlines,
            ValueField::ObsolescenceUrgency => &self.obsolescence_urgency,
        };
        slot.as_deref()
    }

    pub fn cost_code(&self, field: CostField) -> Option<&str> {
        let slot = match field {
            CostField::Q1 => &self.q1,
            CostField::Q2 => &self.q2,
            CostField::Q3 => &self.q3,
            CostField::Q4 => &self.q4,
            CostField::Q5 => &self.q5,
            CostField::Q6 => &self.q6,
            CostField::Q7 => &self.q7,
            CostField::Q8 => &self.q8,
            CostField::Q9 => &self.q9,
            CostField::Q10 => &self.q10,
        };
        slot.as_deref()
    }

    /// Assign a raw code by field name. Returns false when the name is not
    /// a questionnaire field, so callers (e.g. the CSV importer) can ignore
    /// unrelated columns.
    pub fn set(&mut self, name: &str, code: String) -> bool {
        let slot = if let Some(field) = ValueField::from_name(name) {
            match field {
                ValueField::StrategicAlignment => &mut self.strategic_alignment,
                ValueField::RevenueImpact => &mut self.revenue_impact,
                ValueField::SatisfactionImpact => &mut self.satisfaction_impact,
                ValueField::ClientAcquisition => &mut self.client_acquisition,
                ValueField::CostMastery => &mut self.cost_mastery,
                ValueField::ThreatMitigation => &mut self.threat_mitigation,
                ValueField::OpportunityCreation => &mut self.opportunity_creation,
                ValueField::TechnicalConditions => &mut self.technical_conditions,
                ValueField::RegulatoryDeadline => &mut self.regulatory_deadline,
                ValueField::CompetitivePressure => &mut self.competitive_pressure,
                ValueField::StrategicDeadlines => &mut self.strategic_deadlines,
                ValueField::ObsolescenceUrgency => &mut self.obsolescence_urgency,
            }
        } else if let Some(field) = CostField::from_name(name) {
            match field {
                CostField::Q1 => &mut self.q1,
                CostField::Q2 => &mut self.q2,
                CostField::Q3 => &mut self.q3,
                CostField::Q4 => &mut self.q4,
                CostField::Q5 => &mut self.q5,
                CostField::Q6 => &mut self.q6,
                CostField::Q7 => &mut self.q7,
                CostField::Q8 => &mut self.q8,
                CostField::Q9 => &mut self.q9,
                CostField::Q10 => &mut self.q10,
            }
        } else {
            return false;
        };

        *slot = Some(code);
        true
    }
}
