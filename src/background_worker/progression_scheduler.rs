use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::application::usecases::progression::ProgressionUseCase;
use crate::config::config_model::Progression;

/// Owns the two progression loops. `start` and `stop` are idempotent, so
/// the process can wire shutdown handling without tracking loop state.
pub struct ProgressionScheduler {
    usecase: Arc<ProgressionUseCase>,
    points_interval: Duration,
    streamer_interval: Duration,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl ProgressionScheduler {
    pub fn new(usecase: Arc<ProgressionUseCase>, progression: &Progression) -> Self {
        Self {
            usecase,
            points_interval: Duration::from_millis(progression.points_interval_ms),
            streamer_interval: Duration::from_millis(progression.streamer_interval_ms),
            handles: Mutex::new(Vec::new()),
        }
    }

    pub fn start(&self) {
        let mut handles = match self.handles.lock() {
            Ok(handles) => handles,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !handles.is_empty() {
            return;
        }

        let participant_usecase = Arc::clone(&self.usecase);
        let points_interval = self.points_interval;
        handles.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(points_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = participant_usecase.participant_tick().await {
                    error!(error = ?err, "progression_scheduler: participant tick failed");
                }
            }
        }));

        let streamer_usecase = Arc::clone(&self.usecase);
        let streamer_interval = self.streamer_interval;
        handles.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(streamer_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = streamer_usecase.streamer_tick().await {
                    error!(error = ?err, "progression_scheduler: streamer tick failed");
                }
            }
        }));

        info!(
            points_interval_ms = points_interval.as_millis() as u64,
            streamer_interval_ms = streamer_interval.as_millis() as u64,
            "progression_scheduler: started"
        );
    }

    pub fn stop(&self) {
        let mut handles = match self.handles.lock() {
            Ok(handles) => handles,
            Err(poisoned) => poisoned.into_inner(),
        };
        for handle in handles.drain(..) {
            handle.abort();
        }
        info!("progression_scheduler: stopped");
    }

    pub fn is_running(&self) -> bool {
        match self.handles.lock() {
            Ok(handles) => !handles.is_empty(),
            Err(poisoned) => !poisoned.into_inner().is_empty(),
        }
    }
}
