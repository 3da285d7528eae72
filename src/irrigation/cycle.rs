use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::irrigation::session::{CropSoil, Run, Tick};
use crate::irrigation::SessionHandle;
use crate::repository::{models::irrigation_event::NewIrrigationEvent, Repo};

/// Drives one cycle from 0 to full progress, one unit per tick.
///
/// The task ends early when the stop signal fires, when its sender is dropped, or when the
/// session no longer considers this run active. Only a completed run writes a history row.
#[tracing::instrument(skip(session, run, repo), fields(run = run.id))]
pub async fn run_cycle(
    session: SessionHandle,
    key: CropSoil,
    run: Run,
    tick: Duration,
    repo: Repo,
) {
    let Run { id, mut stop } = run;

    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = &mut stop => {
                tracing::debug!(target = module_path!(), "Irrigation cycle cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        // Held through the write so no reader sees Complete before the record exists.
        let mut guard = session.lock().await;
        let event = match guard.advance(&key, id) {
            Tick::Progress(_) => continue,
            Tick::Stale => return,
            Tick::Completed { moisture_level } => NewIrrigationEvent {
                username: guard.username.clone(),
                crop_type: key.crop_type.clone(),
                soil_type: key.soil_type.clone(),
                moisture_level,
            },
        };

        if let Err(e) = repo.create_irrigation_event(event).await {
            tracing::error!(
                target = module_path!(),
                error = e.to_string(),
                "Could not record completed irrigation"
            );
            guard.record_failure(&key, "Irrigation finished but could not be saved".into());
        } else {
            tracing::info!(target = module_path!(), key = %key, "Irrigation cycle complete");
        }

        return;
    }
}
