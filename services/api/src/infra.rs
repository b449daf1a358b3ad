use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use prioritizer::capacity::ProfileHeadcount;
use prioritizer::projects::{ProjectId, ProjectRecord, ProjectRepository, RepositoryError};
use prioritizer::reference::{Category, Release};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) planning_year: i32,
    pub(crate) profiles: Arc<Vec<ProfileHeadcount>>,
}

/// Repository used until a relational store is wired in; the service only
/// sees the `ProjectRepository` trait.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProjectRepository {
    records: Arc<Mutex<HashMap<ProjectId, ProjectRecord>>>,
}

impl ProjectRepository for InMemoryProjectRepository {
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

/// Stock portfolio categories served until reference-data administration
/// moves behind its own storage.
pub(crate) fn seed_categories() -> Vec<Category> {
    [
        "Regulatory",
        "Run & Maintain",
        "Business Growth",
        "Internal Efficiency",
    ]
    .iter()
    .enumerate()
    .map(|(index, name)| Category {
        id: (index + 1) as u32,
        name: (*name).to_string(),
    })
    .collect()
}

/// Quarterly release windows for the planning year.
pub(crate) fn seed_releases(year: i32) -> Vec<Release> {
    let quarter = |id: u32, name: &str, from: (u32, u32), to: (u32, u32)| {
        let (fm, fd) = from;
        let (tm, td) = to;
        Release {
            id,
            name: format!("{year}-{name}"),
            start: NaiveDate::from_ymd_opt(year, fm, fd).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(year, tm, td).unwrap_or_default(),
        }
    };
    vec![
        quarter(1, "Q1", (1, 1), (3, 31)),
        quarter(2, "Q2", (4, 1), (6, 30)),
        quarter(3, "Q3", (7, 1), (9, 30)),
        quarter(4, "Q4", (10, 1), (12, 31)),
    ]
}

/// Default staffing mix for the capacity views.
pub(crate) fn default_profiles() -> Vec<ProfileHeadcount> {
    [
        ("business_analyst", 2),
        ("developer", 5),
        ("architect", 1),
        ("tester", 2),
    ]
    .iter()
    .map(|(profile, collaborators)| ProfileHeadcount {
        profile: (*profile).to_string(),
        collaborators: *collaborators,
    })
    .collect()
}
