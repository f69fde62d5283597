pub mod auth;
pub mod catalog;
pub mod domain;
pub mod ports;
pub mod store;

pub use auth::{AccountStore, RegisterError};
pub use catalog::{all_groups, CatalogGroup};
pub use domain::{
    Account, DeadlineInfo, Group, Project, ProjectData, Session, Submission, SubmissionStatus,
    Task, Urgency, UserRole,
};
pub use ports::{MemoryStorage, StorageError, StorageService, StoreError, StoreResult};
pub use store::{
    deadline_info, deadline_info_at, group_progress, progress_message, summary, DashboardSummary,
    ProjectStore,
};
