use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::domain::{
    ProjectDetailsUpdate, ProjectId, ProjectRecord, ProjectStatus, ProjectSubmission, ProjectView,
};
use super::repository::{ProjectRepository, RepositoryError};
use crate::reference::{release_for_date, Release};
use crate::scoring::{ProjectAnswers, ScoringEngine};

/// Listing options for the priorities view. The original screen caps the
/// board at the 50 highest-scored projects.
#[derive(Debug, Clone, Copy)]
pub struct PriorityFilter {
    pub retenu_only: bool,
    pub limit: usize,
}

impl Default for PriorityFilter {
    fn default() -> Self {
        Self {
            retenu_only: false,
            limit: 50,
        }
    }
}

/// Service composing the scoring engine, release windows, and repository.
pub struct ProjectService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
    releases: Vec<Release>,
}

static PROJECT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_project_id() -> ProjectId {
    let id = PROJECT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProjectId(format!("proj-{id:06}"))
}

impl<R> ProjectService<R>
where
    R: ProjectRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: ScoringEngine, releases: Vec<Release>) -> Self {
        Self {
            repository,
            engine,
            releases,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Create a project from a completed intake: score the answers, attach
    /// the release containing the go-live date, and persist.
    pub fn submit(
        &self,
        submission: ProjectSubmission,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let result = self.engine.score(&submission.answers);
        let release_id =
            release_for_date(&self.releases, submission.target_live_date).map(|release| release.id);

        let record = ProjectRecord {
            id: next_project_id(),
            title: submission.title,
            description: submission.description,
            request_type: submission.request_type,
            category_id: submission.category_id,
            release_id,
            target_live_date: submission.target_live_date,
            status: ProjectStatus::Pending,
            retenu: false,
            answers: submission.answers,
            score: result.score,
            complexity: result.complexity,
            effort_days: result.effort_days,
        };

        let stored = self.repository.insert(record)?;
        info!(project = %stored.id.0, score = stored.score, "project submitted");
        Ok(stored)
    }

    pub fn get(&self, id: &ProjectId) -> Result<ProjectRecord, ProjectServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Replace a project's questionnaire snapshot and recompute the score
    /// triple in place. The previous score is overwritten, not archived.
    pub fn update_answers(
        &self,
        id: &ProjectId,
        answers: ProjectAnswers,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let mut record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        record.answers = answers;
        record.apply_score(self.engine.score(&record.answers));
        self.repository.update(record.clone())?;
        info!(project = %record.id.0, score = record.score, "project re-scored");
        Ok(record)
    }

    /// Edit descriptive fields without touching answers or the score.
    pub fn update_details(
        &self,
        id: &ProjectId,
        update: ProjectDetailsUpdate,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let mut record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(description) = update.description {
            record.description = description;
        }
        if let Some(category_id) = update.category_id {
            record.category_id = Some(category_id);
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Flip the "retenu" selection flag, returning the new value.
    pub fn toggle_retenu(&self, id: &ProjectId) -> Result<bool, ProjectServiceError> {
        let mut record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        record.retenu = !record.retenu;
        let retenu = record.retenu;
        self.repository.update(record)?;
        Ok(retenu)
    }

    /// Priority board: projects ordered by score descending.
    pub fn prioritized(
        &self,
        filter: PriorityFilter,
    ) -> Result<Vec<ProjectView>, ProjectServiceError> {
        let mut records = self.repository.list()?;
        if filter.retenu_only {
            records.retain(|record| record.retenu);
        }
        records.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        records.truncate(filter.limit);
        Ok(records.iter().map(ProjectRecord::priority_view).collect())
    }

    /// Recompute every stored project against the engine's current table.
    /// Used after the scoring reference data changes. Returns the number of
    /// projects whose persisted triple was rewritten.
    pub fn rescore_all(&self) -> Result<usize, ProjectServiceError> {
        let records = self.repository.list()?;
        let mut rescored = 0usize;
        for mut record in records {
            record.apply_score(self.engine.score(&record.answers));
            self.repository.update(record)?;
            rescored += 1;
        }
        info!(count = rescored, "bulk re-score completed");
        Ok(rescored)
    }
}

/// Error raised by the project service.
#[derive(Debug, thiserror::Error)]
pub enum ProjectServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;
    use crate::scoring::ScoringTable;

    #[derive(Default)]
    struct TestRepository {
        records: Mutex<HashMap<ProjectId, ProjectRecord>>,
    }

    impl ProjectRepository for TestRepository {
        fn insert(&self, record: ProjectRecord) -> Result<ProjectRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&record.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: ProjectRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&record.id) {
                guard.insert(record.id.clone(), record);
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<ProjectRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn service() -> ProjectService<TestRepository> {
        let releases = vec![Release {
            id: 7,
            name: "2025-H1".to_string(),
            start: date(2025, 1, 1),
            end: date(2025, 6, 30),
        }];
        ProjectService::new(
            Arc::new(TestRepository::default()),
            ScoringEngine::standard(),
            releases,
        )
    }

    fn submission(title: &str, live: NaiveDate) -> ProjectSubmission {
        let mut answers = ProjectAnswers::default();
        answers.set("strategic_alignment", "strongly_aligned".to_string());
        answers.set("q1", "medium".to_string());
        ProjectSubmission {
            title: title.to_string(),
            description: "demo".to_string(),
            request_type: "new".to_string(),
            category_id: Some(1),
            target_live_date: live,
            answers,
        }
    }

    #[test]
    fn submit_scores_and_attaches_the_release() {
        let service = service();
        let record = service
            .submit(submission("alpha", date(2025, 3, 1)))
            .expect("submission stored");

        // 55 value points over 8 cost points.
        assert_eq!(record.score, 13.75);
        assert_eq!(record.complexity.rank(), 1);
        assert_eq!(record.effort_days, 20);
        assert_eq!(record.release_id, Some(7));
        assert_eq!(record.status, ProjectStatus::Pending);
        assert!(!record.retenu);
    }

    #[test]
    fn go_live_outside_every_release_leaves_no_attachment() {
        let service = service();
        let record = service
            .submit(submission("late", date(2026, 1, 1)))
            .expect("submission stored");
        assert_eq!(record.release_id, None);
    }

    #[test]
    fn update_answers_recomputes_the_triple_in_place() {
        let service = service();
        let record = service
            .submit(submission("alpha", date(2025, 3, 1)))
            .expect("submission stored");

        let mut answers = ProjectAnswers::default();
        answers.set("q2", "150".to_string());
        let updated = service
            .update_answers(&record.id, answers)
            .expect("re-score succeeds");

        assert_eq!(updated.score, 0.0);
        assert_eq!(updated.complexity.rank(), 3);
        assert_eq!(updated.effort_days, 60);

        let fetched = service.get(&record.id).expect("record persists");
        assert_eq!(fetched, updated);
    }

    #[test]
    fn update_details_keeps_the_score_untouched() {
        let service = service();
        let record = service
            .submit(submission("alpha", date(2025, 3, 1)))
            .expect("submission stored");

        let updated = service
            .update_details(
                &record.id,
                ProjectDetailsUpdate {
                    title: Some("renamed".to_string()),
                    status: Some(ProjectStatus::InProgress),
                    ..ProjectDetailsUpdate::default()
                },
            )
            .expect("details update succeeds");

        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.score, record.score);
        assert_eq!(updated.answers, record.answers);
    }

    #[test]
    fn prioritized_orders_by_score_and_honors_the_retenu_filter() {
        let service = service();
        let low = service
            .submit(submission("low", date(2025, 3, 1)))
            .expect("stored");
        let mut strong = submission("strong", date(2025, 3, 1));
        strong
            .answers
            .set("revenue_impact", "over_5m".to_string());
        let high = service.submit(strong).expect("stored");

        service.toggle_retenu(&high.id).expect("toggle succeeds");

        let board = service.prioritized(PriorityFilter::default()).expect("list");
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].id, high.id);
        assert!(board[0].score > board[1].score);

        let selected = service
            .prioritized(PriorityFilter {
                retenu_only: true,
                limit: 50,
            })
            .expect("filtered list");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, high.id);
        assert!(selected.iter().all(|view| view.retenu));
        let _ = low;
    }

    #[test]
    fn toggle_retenu_flips_back_and_forth() {
        let service = service();
        let record = service
            .submit(submission("alpha", date(2025, 3, 1)))
            .expect("stored");
        assert!(service.toggle_retenu(&record.id).expect("on"));
        assert!(!service.toggle_retenu(&record.id).expect("off"));
    }

    #[test]
    fn missing_project_surfaces_not_found() {
        let service = service();
        let missing = ProjectId("proj-999999".to_string());
        let err = service.get(&missing).expect_err("lookup fails");
        assert!(matches!(
            err,
            ProjectServiceError::Repository(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn rescore_all_rewrites_every_record_with_the_current_table() {
        let repository = Arc::new(TestRepository::default());
        let service = ProjectService::new(
            repository.clone(),
            ScoringEngine::standard(),
            Vec::new(),
        );
        let first = service
            .submit(submission("one", date(2025, 3, 1)))
            .expect("stored");
        service
            .submit(submission("two", date(2025, 3, 1)))
            .expect("stored");

        // Swap in a table where the same codes are worth nothing.
        let neutered = ProjectService::new(
            repository,
            ScoringEngine::new(ScoringTable {
                value: Default::default(),
                cost: Default::default(),
            }),
            Vec::new(),
        );
        let rescored = neutered.rescore_all().expect("bulk rescore");
        assert_eq!(rescored, 2);

        let refreshed = neutered.get(&first.id).expect("record kept");
        assert_eq!(refreshed.score, 0.0);
        assert_eq!(refreshed.complexity.rank(), 1);
    }
}
