//! crates/eduvista_core/src/catalog.rs
//!
//! The global group catalog: template definitions not yet attached to any
//! project. Assignment always deep-copies a template into an owned
//! [`Group`], so catalog entries and assigned instances can never alias.

use chrono::NaiveDate;

use crate::domain::{Group, Submission, SubmissionStatus, Task};

/// A template group definition. The demo tasks and submissions it carries are
/// only ever used by the default dataset seed; a regular assignment starts
/// the group from a clean slate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGroup {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
    progress: u8,
    tasks: Vec<Task>,
    submissions: Vec<Submission>,
}

impl CatalogGroup {
    /// Copies this template into a fresh assigned instance: no tasks, no
    /// submissions, progress zero.
    pub fn assign(&self) -> Group {
        Group {
            id: self.id.clone(),
            name: self.name.clone(),
            members: self.members.clone(),
            progress: 0,
            tasks: Vec::new(),
            submissions: Vec::new(),
        }
    }

    /// Copies this template in full, demo tasks and submissions included.
    /// Used only when seeding the default dataset.
    pub fn seed(&self) -> Group {
        Group {
            id: self.id.clone(),
            name: self.name.clone(),
            members: self.members.clone(),
            progress: self.progress,
            tasks: self.tasks.clone(),
            submissions: self.submissions.clone(),
        }
    }
}

fn task(id: &str, title: &str, completed: bool) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        completed,
    }
}

fn submission(id: &str, title: &str, date: NaiveDate, status: SubmissionStatus) -> Submission {
    Submission {
        id: id.into(),
        title: title.into(),
        date,
        status,
        file_name: None,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Builds the catalog of all known groups.
pub fn all_groups() -> Vec<CatalogGroup> {
    vec![
        CatalogGroup {
            id: "g1".into(),
            name: "Group Alpha".into(),
            members: vec![
                "Alex Johnson".into(),
                "Maria Garcia".into(),
                "James Lee".into(),
            ],
            progress: 65,
            tasks: vec![
                task("t1", "Research campus map APIs", true),
                task("t2", "Design UI wireframes", true),
                task("t3", "Implement pathfinding algorithm", false),
                task("t4", "Build mobile-friendly frontend", false),
                task("t5", "Write project documentation", false),
            ],
            submissions: vec![
                submission(
                    "s1",
                    "Project Proposal",
                    date(2026, 2, 1),
                    SubmissionStatus::Approved,
                ),
                submission(
                    "s2",
                    "Progress Report 1",
                    date(2026, 2, 15),
                    SubmissionStatus::Reviewed,
                ),
            ],
        },
        CatalogGroup {
            id: "g2".into(),
            name: "Group Beta".into(),
            members: vec![
                "Sarah Kim".into(),
                "David Park".into(),
                "Emma Wilson".into(),
            ],
            progress: 35,
            tasks: vec![
                task("t6", "Gather requirements", true),
                task("t7", "Create database schema", false),
                task("t8", "Develop API endpoints", false),
                task("t9", "Integration testing", false),
            ],
            submissions: vec![submission(
                "s3",
                "Project Proposal",
                date(2026, 2, 1),
                SubmissionStatus::Approved,
            )],
        },
        CatalogGroup {
            id: "g3".into(),
            name: "Group Gamma".into(),
            members: vec!["Ryan Chen".into(), "Lisa Wang".into(), "Tom Brown".into()],
            progress: 90,
            tasks: vec![
                task("t10", "Setup project infrastructure", true),
                task("t11", "Implement core features", true),
                task("t12", "UI polish and testing", true),
                task("t13", "Final documentation", false),
            ],
            submissions: vec![
                submission(
                    "s4",
                    "Project Proposal",
                    date(2026, 2, 1),
                    SubmissionStatus::Approved,
                ),
                submission(
                    "s5",
                    "Progress Report 1",
                    date(2026, 2, 15),
                    SubmissionStatus::Approved,
                ),
                submission(
                    "s6",
                    "Progress Report 2",
                    date(2026, 3, 1),
                    SubmissionStatus::Pending,
                ),
            ],
        },
        CatalogGroup {
            id: "g4".into(),
            name: "Group Delta".into(),
            members: vec![
                "Nina Patel".into(),
                "Oscar Rivera".into(),
                "Fiona Zhang".into(),
            ],
            progress: 0,
            tasks: vec![],
            submissions: vec![],
        },
    ]
}
