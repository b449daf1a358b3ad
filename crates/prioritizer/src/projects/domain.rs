use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::{Complexity, ProjectAnswers, ScoreResult};

/// Identifier wrapper for submitted projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Lifecycle status tracked on every project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    ToPlan,
    InProgress,
    Done,
    Abandoned,
}

impl ProjectStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::ToPlan => "to_plan",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Done => "done",
            ProjectStatus::Abandoned => "abandoned",
        }
    }

    /// Statuses whose effort still weighs on the capacity plan.
    pub const fn is_planned(self) -> bool {
        matches!(
            self,
            ProjectStatus::Pending | ProjectStatus::ToPlan | ProjectStatus::InProgress
        )
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Pending
    }
}

/// A completed intake: descriptive fields plus the full questionnaire
/// snapshot assembled by the (out-of-scope) multi-step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSubmission {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub request_type: String,
    #[serde(default)]
    pub category_id: Option<u32>,
    /// Target go-live date, used to attach the project to a release.
    pub target_live_date: NaiveDate,
    #[serde(default)]
    pub answers: ProjectAnswers,
}

/// Persisted project: the submission snapshot plus the computed score
/// triple. Re-scoring overwrites the triple in place; no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub request_type: String,
    pub category_id: Option<u32>,
    pub release_id: Option<u32>,
    pub target_live_date: NaiveDate,
    pub status: ProjectStatus,
    /// Whether staff marked the project as selected.
    pub retenu: bool,
    pub answers: ProjectAnswers,
    pub score: f64,
    pub complexity: Complexity,
    pub effort_days: u32,
}

impl ProjectRecord {
    pub(crate) fn apply_score(&mut self, result: ScoreResult) {
        self.score = result.score;
        self.complexity = result.complexity;
        self.effort_days = result.effort_days;
    }

    pub fn priority_view(&self) -> ProjectView {
        ProjectView {
            id: self.id.clone(),
            title: self.title.clone(),
            category_id: self.category_id,
            release_id: self.release_id,
            target_live_date: self.target_live_date,
            score: self.score,
            complexity: self.complexity.label(),
            complexity_class: self.complexity.rank(),
            effort_days: self.effort_days,
            status: self.status.label(),
            retenu: self.retenu,
        }
    }
}

/// Flattened representation served by the priorities listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_id: Option<u32>,
    pub target_live_date: NaiveDate,
    pub score: f64,
    pub complexity: &'static str,
    pub complexity_class: u8,
    pub effort_days: u32,
    pub status: &'static str,
    pub retenu: bool,
}

/// Partial edit of the descriptive fields; `None` leaves a field unchanged.
/// Answers are edited through the dedicated re-scoring operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDetailsUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<u32>,
    pub status: Option<ProjectStatus>,
}
