use services::{Clock, StudyConfig, StudyTracker, init_tracing};
use study_core::stats::Dashboard;

fn prepare_sqlite_file(config: &StudyConfig) -> std::io::Result<()> {
    if config.is_in_memory() {
        return Ok(());
    }
    let Some(path) = config.db_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
    }
    Ok(())
}

fn log_dashboard(dashboard: &Dashboard) {
    let data = &dashboard.data;
    tracing::info!(
        subjects = data.total_subjects,
        studied = data.studied_count,
        reviewed = data.reviewed_count,
        practiced = data.practiced_count,
        overall = dashboard.overall_progress,
        "study progress"
    );

    for category in &dashboard.categories {
        tracing::info!(
            category = %category.category,
            total = category.total,
            completion = category.completion,
            "category progress"
        );
    }

    for share in [dashboard.flags.studied, dashboard.flags.reviewed, dashboard.flags.practiced] {
        tracing::info!(
            flag = %share.flag,
            count = share.count,
            percent = share.percent.round(),
            "flag progress"
        );
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StudyConfig::from_env()?;
    init_tracing(&config.log_filter)?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&config)?;
    let tracker = StudyTracker::from_config(&config, Clock::system()).await?;

    log_dashboard(&tracker.dashboard().await);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
