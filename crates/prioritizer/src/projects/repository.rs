use super::domain::{ProjectId, ProjectRecord};

/// Storage abstraction so the service can be exercised without a database.
/// The surrounding deployment supplies the real store; ordering and retry
/// policy around persistence live behind this seam.
pub trait ProjectRepository: Send + Sync {
    fn insert(&self, record: ProjectRecord) -> Result<ProjectRecord, RepositoryError>;
    fn update(&self, record: ProjectRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<ProjectRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("project already exists")]
    Conflict,
    #[error("project not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
