//! crates/eduvista_core/src/store.rs
//!
//! The project store: owns the persisted project collection and the derived
//! values every screen reads (task-completion percentage, deadline urgency).
//! Every mutating operation rewrites the whole collection synchronously
//! before returning; there is no batched or deferred write path.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;

use crate::catalog::{self, CatalogGroup};
use crate::domain::{
    DeadlineInfo, Group, Project, ProjectData, Submission, SubmissionStatus, Task, Urgency,
};
use crate::ports::{StorageService, StoreResult};

const DATA_KEY: &str = "eduvista_data";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Owns the persisted project collection.
///
/// Lookup-by-id misses are deliberate no-ops: the operation persists the
/// collection unchanged instead of failing, so a consumer holding a stale id
/// (say, after a concurrent edit through another instance over the same
/// medium) degrades to an empty state rather than an error.
#[derive(Clone)]
pub struct ProjectStore {
    storage: Arc<dyn StorageService>,
}

impl ProjectStore {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }

    /// Returns the persisted collection, seeding the default dataset on the
    /// first read of an empty medium.
    pub fn load(&self) -> StoreResult<ProjectData> {
        if let Some(raw) = self.storage.read(DATA_KEY)? {
            return Ok(serde_json::from_str(&raw)?);
        }
        debug!("no project collection found; seeding default dataset");
        let data = default_data();
        self.save(&data)?;
        Ok(data)
    }

    /// Overwrites the persisted collection unconditionally. Last write wins;
    /// there is no merge and no concurrency check.
    pub fn save(&self, data: &ProjectData) -> StoreResult<()> {
        let raw = serde_json::to_string(data)?;
        self.storage.write(DATA_KEY, &raw)?;
        Ok(())
    }

    /// Creates a project assigned to the given catalog groups and persists it.
    ///
    /// Each selected group is deep-copied from the catalog as a fresh
    /// instance: no tasks, no submissions, progress zero. Unknown ids are
    /// skipped. Returns the created project.
    pub fn create_project(
        &self,
        title: &str,
        description: &str,
        deadline: NaiveDate,
        group_ids: &[String],
    ) -> StoreResult<Project> {
        let groups: Vec<Group> = catalog::all_groups()
            .iter()
            .filter(|g| group_ids.contains(&g.id))
            .map(CatalogGroup::assign)
            .collect();

        let project = Project {
            id: timestamp_id(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            deadline,
            assigned_groups: group_ids.to_vec(),
            groups,
        };

        let mut data = self.load()?;
        data.projects.push(project.clone());
        self.save(&data)?;
        Ok(project)
    }

    /// Edits a project's title, description and deadline in place.
    pub fn update_project(
        &self,
        project_id: &str,
        title: &str,
        description: &str,
        deadline: NaiveDate,
    ) -> StoreResult<ProjectData> {
        let mut data = self.load()?;
        match data.projects.iter_mut().find(|p| p.id == project_id) {
            Some(project) => {
                project.title = title.trim().to_string();
                project.description = description.trim().to_string();
                project.deadline = deadline;
            }
            None => debug!(project_id, "project not found; leaving collection unchanged"),
        }
        self.save(&data)?;
        Ok(data)
    }

    /// Removes the project with a matching id and returns the updated
    /// collection. Unknown ids leave the collection unchanged.
    pub fn delete_project(&self, project_id: &str) -> StoreResult<ProjectData> {
        let mut data = self.load()?;
        data.projects.retain(|p| p.id != project_id);
        self.save(&data)?;
        Ok(data)
    }

    /// Appends a task to a group and recomputes its progress.
    pub fn add_task(
        &self,
        project_id: &str,
        group_id: &str,
        title: &str,
    ) -> StoreResult<ProjectData> {
        self.with_group(project_id, group_id, |group| {
            group.tasks.push(Task {
                id: timestamp_id(),
                title: title.trim().to_string(),
                completed: false,
            });
        })
    }

    /// Flips a task's completed flag and recomputes the group's progress.
    pub fn toggle_task(
        &self,
        project_id: &str,
        group_id: &str,
        task_id: &str,
    ) -> StoreResult<ProjectData> {
        self.with_group(project_id, group_id, |group| {
            match group.tasks.iter_mut().find(|t| t.id == task_id) {
                Some(task) => task.completed = !task.completed,
                None => debug!(task_id, "task not found; leaving group unchanged"),
            }
        })
    }

    /// Retitles a task.
    pub fn rename_task(
        &self,
        project_id: &str,
        group_id: &str,
        task_id: &str,
        title: &str,
    ) -> StoreResult<ProjectData> {
        self.with_group(project_id, group_id, |group| {
            match group.tasks.iter_mut().find(|t| t.id == task_id) {
                Some(task) => task.title = title.trim().to_string(),
                None => debug!(task_id, "task not found; leaving group unchanged"),
            }
        })
    }

    /// Deletes a task and recomputes the group's progress.
    pub fn remove_task(
        &self,
        project_id: &str,
        group_id: &str,
        task_id: &str,
    ) -> StoreResult<ProjectData> {
        self.with_group(project_id, group_id, |group| {
            group.tasks.retain(|t| t.id != task_id);
        })
    }

    /// Records a submission for a group, dated today with status `pending`.
    pub fn submit_work(
        &self,
        project_id: &str,
        group_id: &str,
        title: &str,
        file_name: Option<&str>,
    ) -> StoreResult<ProjectData> {
        let file_name = file_name
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        self.with_group(project_id, group_id, |group| {
            group.submissions.push(Submission {
                id: timestamp_id(),
                title: title.trim().to_string(),
                date: Utc::now().date_naive(),
                status: SubmissionStatus::Pending,
                file_name,
            });
        })
    }

    /// Overwrites a submission's status by its three-level key.
    ///
    /// Transitions are unrestricted: any status may replace any other.
    pub fn update_submission_status(
        &self,
        project_id: &str,
        group_id: &str,
        submission_id: &str,
        status: SubmissionStatus,
    ) -> StoreResult<ProjectData> {
        self.with_group(project_id, group_id, |group| {
            match group.submissions.iter_mut().find(|s| s.id == submission_id) {
                Some(submission) => submission.status = status,
                None => debug!(submission_id, "submission not found; leaving group unchanged"),
            }
        })
    }

    /// Loads the collection, applies `mutate` to the addressed group,
    /// recomputes that group's progress and persists the result. A missing
    /// project or group leaves the collection unchanged.
    fn with_group<F>(&self, project_id: &str, group_id: &str, mutate: F) -> StoreResult<ProjectData>
    where
        F: FnOnce(&mut Group),
    {
        let mut data = self.load()?;
        match data
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .and_then(|p| p.groups.iter_mut().find(|g| g.id == group_id))
        {
            Some(group) => {
                mutate(group);
                group.progress = group_progress(&group.tasks);
            }
            None => debug!(
                project_id,
                group_id, "project or group not found; leaving collection unchanged"
            ),
        }
        self.save(&data)?;
        Ok(data)
    }
}

//=========================================================================================
// Derived Values
//=========================================================================================

/// Percentage of tasks marked complete, rounded to the nearest integer.
/// A group with no tasks is always at zero.
pub fn group_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
}

/// Classifies a deadline relative to the current instant.
pub fn deadline_info(deadline: NaiveDate) -> DeadlineInfo {
    deadline_info_at(deadline, Utc::now())
}

/// Classifies a deadline relative to an explicit instant.
///
/// `days_left` is the ceiling of the remaining time in days, measured to
/// midnight UTC of the deadline date: a deadline later today counts as 0
/// days left, and the 7- and 21-day boundaries are inclusive.
pub fn deadline_info_at(deadline: NaiveDate, now: DateTime<Utc>) -> DeadlineInfo {
    let target = deadline.and_time(NaiveTime::MIN).and_utc();
    let seconds = (target - now).num_seconds();
    let days_left =
        seconds.div_euclid(SECONDS_PER_DAY) + i64::from(seconds.rem_euclid(SECONDS_PER_DAY) > 0);

    let urgency = if days_left < 0 {
        Urgency::Overdue
    } else if days_left <= 7 {
        Urgency::Critical
    } else if days_left <= 21 {
        Urgency::Warning
    } else {
        Urgency::Safe
    };

    DeadlineInfo { days_left, urgency }
}

/// The encouragement line shown under a group's progress bar.
pub fn progress_message(progress: u8) -> &'static str {
    if progress < 40 {
        "Behind schedule – consider prioritizing critical tasks."
    } else if progress <= 80 {
        "Good progress – keep up the consistent effort."
    } else {
        "Excellent work – almost completed!"
    }
}

/// Aggregate counters for the mentor dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub total_groups: usize,
    pub total_submissions: usize,
    pub pending_submissions: usize,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub average_progress: u8,
}

/// Computes the aggregate counters over every group of every project.
pub fn summary(data: &ProjectData) -> DashboardSummary {
    let groups: Vec<&Group> = data.projects.iter().flat_map(|p| p.groups.iter()).collect();

    let average_progress = if groups.is_empty() {
        0
    } else {
        let total: u32 = groups.iter().map(|g| u32::from(g.progress)).sum();
        (f64::from(total) / groups.len() as f64).round() as u8
    };

    DashboardSummary {
        total_projects: data.projects.len(),
        total_groups: groups.len(),
        total_submissions: groups.iter().map(|g| g.submissions.len()).sum(),
        pending_submissions: groups
            .iter()
            .flat_map(|g| g.submissions.iter())
            .filter(|s| s.status == SubmissionStatus::Pending)
            .count(),
        completed_tasks: groups
            .iter()
            .flat_map(|g| g.tasks.iter())
            .filter(|t| t.completed)
            .count(),
        total_tasks: groups.iter().map(|g| g.tasks.len()).sum(),
        average_progress,
    }
}

//=========================================================================================
// Seeding and Ids
//=========================================================================================

/// Entity ids are strings derived from the current timestamp, matching the
/// generator the rest of the system expects. Uniqueness is not enforced.
fn timestamp_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// The dataset a fresh medium starts with: one project assigned to three of
/// the four catalog groups, seeded with their full demo content.
fn default_data() -> ProjectData {
    let catalog = catalog::all_groups();
    ProjectData {
        projects: vec![Project {
            id: "1".into(),
            title: "Smart Campus Navigation System".into(),
            description: "Build a navigation system for campus wayfinding using real-time data \
                          and pathfinding algorithms."
                .into(),
            deadline: NaiveDate::from_ymd_opt(2026, 4, 15).expect("valid calendar date"),
            assigned_groups: vec!["g1".into(), "g2".into(), "g3".into()],
            groups: catalog[..3].iter().map(CatalogGroup::seed).collect(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MemoryStorage;

    fn store() -> ProjectStore {
        ProjectStore::new(Arc::new(MemoryStorage::new()))
    }

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            completed,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_medium_is_seeded_once() {
        let store = store();
        let data = store.load().unwrap();
        assert_eq!(data.projects.len(), 1);

        let project = &data.projects[0];
        assert_eq!(project.title, "Smart Campus Navigation System");
        assert_eq!(project.assigned_groups, vec!["g1", "g2", "g3"]);
        assert_eq!(project.groups.len(), 3);
        // Seeded groups carry their demo content.
        assert_eq!(project.groups[0].progress, 65);
        assert_eq!(project.groups[2].submissions.len(), 3);

        // A second read returns the persisted collection, not a re-seed.
        assert_eq!(store.load().unwrap(), data);
    }

    #[test]
    fn persisted_layout_keeps_the_camel_case_field_names() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ProjectStore::new(storage.clone());
        store.load().unwrap();

        let raw = storage.read("eduvista_data").unwrap().unwrap();
        assert!(raw.contains("\"projects\""));
        assert!(raw.contains("\"assignedGroups\""));
        assert!(raw.contains("\"deadline\":\"2026-04-15\""));
    }

    #[test]
    fn delete_project_removes_only_the_matching_id() {
        let store = store();
        let created = store
            .create_project("Thesis Tracker", "", day(2026, 9, 1), &["g4".into()])
            .unwrap();

        let data = store.delete_project(&created.id).unwrap();
        assert_eq!(data.projects.len(), 1);
        assert_eq!(data.projects[0].id, "1");
    }

    #[test]
    fn delete_project_with_unknown_id_is_a_no_op() {
        let store = store();
        let before = store.load().unwrap();
        let after = store.delete_project("does-not-exist").unwrap();
        assert_eq!(before, after);
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn created_projects_get_fresh_group_copies() {
        let store = store();
        let project = store
            .create_project(
                "  Library Kiosk  ",
                "Self-service checkout",
                day(2026, 8, 15),
                &["g1".into(), "g2".into()],
            )
            .unwrap();

        assert_eq!(project.title, "Library Kiosk");
        assert_eq!(project.assigned_groups.len(), 2);
        assert_eq!(project.groups.len(), 2);
        for group in &project.groups {
            assert_eq!(group.progress, 0);
            assert!(group.tasks.is_empty());
            assert!(group.submissions.is_empty());
        }
        // Catalog templates keep their demo content regardless.
        assert_eq!(catalog::all_groups()[0].seed().tasks.len(), 5);
    }

    #[test]
    fn update_project_edits_fields_in_place() {
        let store = store();
        let data = store
            .update_project("1", "New Title", "New description", day(2026, 5, 1))
            .unwrap();
        let project = &data.projects[0];
        assert_eq!(project.title, "New Title");
        assert_eq!(project.deadline, day(2026, 5, 1));
        // Groups are untouched by a metadata edit.
        assert_eq!(project.groups.len(), 3);
    }

    #[test]
    fn task_mutations_recompute_progress() {
        let store = store();
        let project = store
            .create_project("P", "", day(2026, 8, 15), &["g4".into()])
            .unwrap();

        let data = store.add_task(&project.id, "g4", "Draft outline").unwrap();
        let group = &data.projects[1].groups[0];
        assert_eq!(group.tasks.len(), 1);
        assert_eq!(group.progress, 0);

        let task_id = group.tasks[0].id.clone();
        let data = store.toggle_task(&project.id, "g4", &task_id).unwrap();
        assert_eq!(data.projects[1].groups[0].progress, 100);

        let data = store.remove_task(&project.id, "g4", &task_id).unwrap();
        let group = &data.projects[1].groups[0];
        assert!(group.tasks.is_empty());
        assert_eq!(group.progress, 0);
    }

    #[test]
    fn three_of_four_tasks_complete_is_75_percent() {
        let store = store();
        // Work against the seeded Group Beta: one of four demo tasks done.
        let data = store.toggle_task("1", "g2", "t7").unwrap();
        let beta = &data.projects[0].groups[1];
        assert_eq!(beta.progress, 50);

        let data = store.toggle_task("1", "g2", "t8").unwrap();
        assert_eq!(data.projects[0].groups[1].progress, 75);
    }

    #[test]
    fn mutations_with_stale_ids_leave_the_collection_unchanged() {
        let store = store();
        let before = store.load().unwrap();

        assert_eq!(store.toggle_task("1", "nope", "t1").unwrap(), before);
        assert_eq!(store.toggle_task("nope", "g1", "t1").unwrap(), before);
        assert_eq!(
            store
                .update_submission_status("1", "g1", "nope", SubmissionStatus::Approved)
                .unwrap(),
            before
        );
    }

    #[test]
    fn submission_lifecycle_pending_to_approved() {
        let store = store();
        let data = store
            .submit_work("1", "g1", "Final Report", Some("report.pdf"))
            .unwrap();

        let submissions = &data.projects[0].groups[0].submissions;
        let added = submissions.last().unwrap();
        assert_eq!(added.status, SubmissionStatus::Pending);
        assert_eq!(added.title, "Final Report");
        assert_eq!(added.file_name.as_deref(), Some("report.pdf"));

        let id = added.id.clone();
        let data = store
            .update_submission_status("1", "g1", &id, SubmissionStatus::Approved)
            .unwrap();
        let updated = data.projects[0].groups[0]
            .submissions
            .iter()
            .find(|s| s.id == id)
            .unwrap();
        assert_eq!(updated.status, SubmissionStatus::Approved);
        // Every other field survives the status change.
        assert_eq!(updated.title, "Final Report");
        assert_eq!(updated.file_name.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn blank_file_names_are_dropped() {
        let store = store();
        let data = store.submit_work("1", "g1", "Notes", Some("   ")).unwrap();
        assert!(data.projects[0].groups[0]
            .submissions
            .last()
            .unwrap()
            .file_name
            .is_none());
    }

    #[test]
    fn progress_of_an_empty_task_list_is_zero() {
        assert_eq!(group_progress(&[]), 0);
    }

    #[test]
    fn progress_is_idempotent() {
        let tasks = vec![task("a", true), task("b", false), task("c", true)];
        let first = group_progress(&tasks);
        assert_eq!(first, group_progress(&tasks));
        assert_eq!(first, 67);
    }

    #[test]
    fn urgency_is_a_step_function_of_days_left() {
        let now = at(2026, 3, 10, 12);
        let cases = [
            (day(2026, 3, 9), -1, Urgency::Overdue),
            (day(2026, 3, 10), 0, Urgency::Critical),
            (day(2026, 3, 17), 7, Urgency::Critical),
            (day(2026, 3, 18), 8, Urgency::Warning),
            (day(2026, 3, 31), 21, Urgency::Warning),
            (day(2026, 4, 1), 22, Urgency::Safe),
        ];
        for (deadline, days_left, urgency) in cases {
            let info = deadline_info_at(deadline, now);
            assert_eq!(info.days_left, days_left, "deadline {deadline}");
            assert_eq!(info.urgency, urgency, "deadline {deadline}");
        }
    }

    #[test]
    fn days_left_uses_ceiling_division() {
        // One second past midnight of the deadline is still "0 days left",
        // not overdue; a full day past is.
        let deadline = day(2026, 3, 10);
        let just_past = at(2026, 3, 10, 0) + chrono::Duration::seconds(1);
        assert_eq!(deadline_info_at(deadline, just_past).days_left, 0);

        let next_day = at(2026, 3, 11, 0) + chrono::Duration::seconds(1);
        let info = deadline_info_at(deadline, next_day);
        assert_eq!(info.days_left, -1);
        assert_eq!(info.urgency, Urgency::Overdue);
    }

    #[test]
    fn summary_aggregates_across_all_projects() {
        let store = store();
        store
            .create_project("P2", "", day(2026, 8, 15), &["g4".into()])
            .unwrap();
        let data = store.load().unwrap();

        let stats = summary(&data);
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_groups, 4);
        // Seeded demo data: 13 tasks, 6 of them done, 6 submissions, 1 pending.
        assert_eq!(stats.total_tasks, 13);
        assert_eq!(stats.completed_tasks, 6);
        assert_eq!(stats.total_submissions, 6);
        assert_eq!(stats.pending_submissions, 1);
        // round((65 + 35 + 90 + 0) / 4)
        assert_eq!(stats.average_progress, 48);
    }

    #[test]
    fn summary_of_an_empty_collection_is_all_zeros() {
        let stats = summary(&ProjectData::default());
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.average_progress, 0);
    }

    #[test]
    fn progress_messages_follow_the_banding() {
        assert_eq!(
            progress_message(39),
            "Behind schedule – consider prioritizing critical tasks."
        );
        assert_eq!(
            progress_message(40),
            "Good progress – keep up the consistent effort."
        );
        assert_eq!(
            progress_message(80),
            "Good progress – keep up the consistent effort."
        );
        assert_eq!(progress_message(81), "Excellent work – almost completed!");
    }
}
