//! crates/eduvista_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage backend; the serde derives
//! pin down the serialized record layout described in `ports`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two account roles the application distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Mentor,
    Student,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Mentor => write!(f, "mentor"),
            UserRole::Student => write!(f, "student"),
        }
    }
}

// Only used internally for registration/login - contains the credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

/// The record identifying the currently authenticated user. A projection of
/// one [`Account`] without the credential; at most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub role: UserRole,
    pub email: String,
}

/// A single unit of work tracked by a group. Ordering is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Review state of a submission. Transitions are unrestricted; any state is
/// reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Reviewed,
    Approved,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Reviewed => write!(f, "reviewed"),
            SubmissionStatus::Approved => write!(f, "approved"),
        }
    }
}

/// A piece of work handed in by a group. There is no real file upload; only
/// the file name is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// A group assigned to a project, with its members, tasks and submissions.
///
/// Instances are owned by their parent [`Project`]; they are deep copies of a
/// catalog template and never alias it. `progress` is derived from `tasks`
/// and recomputed after every task mutation, never set by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
    pub progress: u8,
    pub tasks: Vec<Task>,
    pub submissions: Vec<Submission>,
}

/// A mentor-created project with its assigned groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub assigned_groups: Vec<String>,
    pub groups: Vec<Group>,
}

/// The persisted envelope owning the whole project collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub projects: Vec<Project>,
}

/// The four-level deadline classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    Critical,
    Warning,
    Safe,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Overdue => write!(f, "overdue"),
            Urgency::Critical => write!(f, "critical"),
            Urgency::Warning => write!(f, "warning"),
            Urgency::Safe => write!(f, "safe"),
        }
    }
}

/// Days remaining until a deadline, paired with its [`Urgency`] class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineInfo {
    pub days_left: i64,
    pub urgency: Urgency,
}
