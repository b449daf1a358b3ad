//! Project lifecycle: intake, persistence seam, priority board, and the
//! HTTP surface around them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    ProjectDetailsUpdate, ProjectId, ProjectRecord, ProjectStatus, ProjectSubmission, ProjectView,
};
pub use repository::{ProjectRepository, RepositoryError};
pub use router::project_router;
pub use service::{PriorityFilter, ProjectService, ProjectServiceError};
