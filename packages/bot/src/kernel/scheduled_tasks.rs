//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! One periodic task: sweeping expired pending passcodes out of the
//! in-memory store. The sweep uses the same lock discipline as the
//! flow-facing store operations, so it can run concurrently with active
//! verifications.

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::kernel::BotDeps;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: Arc<BotDeps>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Passcode sweep - runs every 5 minutes
    let sweep_deps = deps.clone();
    let sweep_job = Job::new_async("0 */5 * * * *", move |_uuid, _lock| {
        let deps = sweep_deps.clone();
        Box::pin(async move {
            let removed = deps.otp_store.sweep().await;
            if removed > 0 {
                tracing::debug!("Swept {} expired pending passcodes", removed);
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (passcode sweep every 5 minutes)");
    Ok(scheduler)
}
