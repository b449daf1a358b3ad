use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use prioritizer::import::ProjectImport;
use prioritizer::projects::{
    PriorityFilter, ProjectId, ProjectRecord, ProjectRepository, ProjectService,
    ProjectSubmission, RepositoryError,
};
use prioritizer::reference::Release;
use prioritizer::scoring::{ProjectAnswers, ScoringEngine, ScoringTable};

#[derive(Default)]
struct MemoryRepository {
    records: Mutex<HashMap<ProjectId, ProjectRecord>>,
}

impl ProjectRepository for MemoryRepository {
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

fn service_with_releases() -> ProjectService<MemoryRepository> {
    let releases = vec![
        Release {
            id: 1,
            name: "2025-H1".to_string(),
            start: date(2025, 1, 1),
            end: date(2025, 6, 30),
        },
        Release {
            id: 2,
            name: "2025-H2".to_string(),
            start: date(2025, 7, 1),
            end: date(2025, 12, 31),
        },
    ];
    ProjectService::new(
        Arc::new(MemoryRepository::default()),
        ScoringEngine::standard(),
        releases,
    )
}

fn submission(title: &str, pairs: &[(&str, &str)], live: NaiveDate) -> ProjectSubmission {
    let mut answers = ProjectAnswers::default();
    for (name, code) in pairs {
        assert!(answers.set(name, code.to_string()), "unknown field {name}");
    }
    ProjectSubmission {
        title: title.to_string(),
        description: String::new(),
        request_type: "new".to_string(),
        category_id: None,
        target_live_date: live,
        answers,
    }
}

#[test]
fn intake_to_priority_board_flow() {
    let service = service_with_releases();

    let modest = service
        .submit(submission(
            "modest",
            &[("strategic_alignment", "aligned"), ("q1", "medium")],
            date(2025, 3, 15),
        ))
        .expect("modest stored");
    let flagship = service
        .submit(submission(
            "flagship",
            &[
                ("strategic_alignment", "strongly_aligned"),
                ("revenue_impact", "over_5m"),
                ("q1", "small"),
            ],
            date(2025, 9, 1),
        ))
        .expect("flagship stored");

    assert_eq!(modest.release_id, Some(1));
    assert_eq!(flagship.release_id, Some(2));

    let board = service
        .prioritized(PriorityFilter::default())
        .expect("board lists");
    assert_eq!(board[0].id, flagship.id);
    assert_eq!(board[0].score, 110.0);
    assert_eq!(board[1].id, modest.id);
    assert_eq!(board[1].score, 5.25);

    // Selecting a project and filtering the board down to it.
    assert!(service.toggle_retenu(&flagship.id).expect("toggle"));
    let selected = service
        .prioritized(PriorityFilter {
            retenu_only: true,
            limit: 50,
        })
        .expect("selected board");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, flagship.id);
}

#[test]
fn editing_answers_rescores_in_place_without_history() {
    let service = service_with_releases();
    let record = service
        .submit(submission(
            "editable",
            &[("strategic_alignment", "aligned"), ("q1", "medium")],
            date(2025, 3, 15),
        ))
        .expect("stored");
    assert_eq!(record.score, 5.25);

    let mut heavier = record.answers.clone();
    heavier.set("q2", "95".to_string());
    let updated = service
        .update_answers(&record.id, heavier)
        .expect("re-scored");

    // 21 * 2 / (8 + 95) = 0.407... -> 0.41; cost 103 -> high complexity.
    assert_eq!(updated.score, 0.41);
    assert_eq!(updated.complexity.rank(), 3);
    assert_eq!(updated.effort_days, 60);

    let fetched = service.get(&record.id).expect("fetched");
    assert_eq!(fetched.score, 0.41);
}

#[test]
fn csv_import_feeds_the_same_pipeline_as_manual_intake() {
    let service = service_with_releases();
    let csv = "\
title,target live date,strategic alignment,revenue impact,q1,q2\n\
Imported A,2025-02-01,strongly_aligned,over_5m,small,\n\
Imported B,2025-08-01,aligned,,medium,10\n\
,2025-08-01,aligned,,medium,\n";

    let summary = ProjectImport::from_reader(Cursor::new(csv.as_bytes()))
        .expect("batch parses")
        .apply(&service)
        .expect("batch stored");
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped.len(), 1);

    let board = service
        .prioritized(PriorityFilter::default())
        .expect("board lists");
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].title, "Imported A");
    assert_eq!(board[0].score, 110.0);
    assert_eq!(board[0].release_id, Some(1));
    assert_eq!(board[1].release_id, Some(2));
}

#[test]
fn bulk_rescore_applies_a_replacement_table() {
    let repository = Arc::new(MemoryRepository::default());
    let service = ProjectService::new(
        repository.clone(),
        ScoringEngine::standard(),
        Vec::new(),
    );
    let record = service
        .submit(submission(
            "volatile",
            &[("strategic_alignment", "strongly_aligned"), ("q1", "small")],
            date(2025, 3, 15),
        ))
        .expect("stored");
    assert_eq!(record.score, 55.0);

    // Revised table: the same alignment answer is now worth a tenth.
    let fixture = r#"{
        "value": { "strategic_alignment": { "strongly_aligned": 5 } },
        "cost": { "q1": { "small": 2 } }
    }"#;
    let table: ScoringTable = serde_json::from_str(fixture).expect("fixture parses");
    let revised = ProjectService::new(repository, ScoringEngine::new(table), Vec::new());

    assert_eq!(revised.rescore_all().expect("bulk rescore"), 1);
    let refreshed = revised.get(&record.id).expect("record kept");
    assert_eq!(refreshed.score, 5.0);
    assert_eq!(refreshed.complexity.rank(), 1);
}
