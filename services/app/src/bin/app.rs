//! services/app/src/bin/app.rs

use std::sync::Arc;

use app_lib::{adapters::FileStorage, config::Config, error::AppError};
use eduvista_core::{
    auth::AccountStore,
    ports::StorageService,
    store::{self, ProjectStore},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Data directory: {}", config.data_dir.display());

    // --- 2. Open the Storage Medium & Build the Stores ---
    let storage: Arc<dyn StorageService> = Arc::new(FileStorage::new(&config.data_dir));
    let accounts = AccountStore::new(storage.clone());
    let projects = ProjectStore::new(storage);

    // --- 3. Print a Status Snapshot ---
    match accounts.current_session()? {
        Some(session) => info!(
            "Active session: {} <{}> ({})",
            session.name, session.email, session.role
        ),
        None => info!("No active session."),
    }

    let data = projects.load()?;
    let stats = store::summary(&data);
    info!(
        "{} project(s), {} group(s), {}/{} tasks complete, {} submission(s) pending review",
        stats.total_projects,
        stats.total_groups,
        stats.completed_tasks,
        stats.total_tasks,
        stats.pending_submissions
    );

    for project in &data.projects {
        let deadline = store::deadline_info(project.deadline);
        let countdown = if deadline.days_left < 0 {
            format!("{}d overdue", deadline.days_left.abs())
        } else {
            format!("{}d left", deadline.days_left)
        };
        info!(
            "Project '{}' due {} ({}, {})",
            project.title, project.deadline, countdown, deadline.urgency
        );
        for group in &project.groups {
            info!(
                "  {}: {}% complete - {}",
                group.name,
                group.progress,
                store::progress_message(group.progress)
            );
        }
    }

    Ok(())
}
