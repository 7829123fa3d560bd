//! Named recurring jobs on the tokio runtime.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use formflow_api::{ApiError, ApiResult};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// A job body. Called once per tick and once per manual trigger.
pub type Job = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

struct JobHandle {
    job: Job,
    period: Duration,
    task: JoinHandle<()>,
}

/// Owns every recurring job by name. Injected where needed instead of being
/// held as process-wide state, and aborts its jobs on drop.
#[derive(Default)]
pub struct Scheduler {
    jobs: Mutex<HashMap<String, JobHandle>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `job` every `period`, starting one period from now. A job already
    /// registered under `name` is stopped and replaced.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_interval(&self, name: impl Into<String>, period: Duration, job: Job) -> ApiResult<()> {
        let name = name.into();
        if period.is_zero() {
            return Err(ApiError::InvalidInput(format!("job '{name}' needs a non-zero period")));
        }

        let task = {
            let name = name.clone();
            let job = job.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // The first tick completes immediately
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    debug!(job = %name, "running scheduled job");
                    job().await;
                }
            })
        };

        let previous = self.jobs.lock().insert(name.clone(), JobHandle { job, period, task });
        if let Some(previous) = previous {
            previous.task.abort();
        }
        info!(job = %name, period_secs = period.as_secs(), "scheduled job started");
        Ok(())
    }

    /// Run a registered job's body now, outside its schedule.
    pub async fn run_once(&self, name: &str) -> ApiResult<()> {
        let job = self
            .jobs
            .lock()
            .get(name)
            .map(|handle| handle.job.clone())
            .ok_or_else(|| ApiError::not_found("job", name))?;
        info!(job = %name, "running job manually");
        job().await;
        Ok(())
    }

    /// Returns false when no job was registered under `name`.
    pub fn stop(&self, name: &str) -> bool {
        match self.jobs.lock().remove(name) {
            Some(handle) => {
                handle.task.abort();
                info!(job = %name, "scheduled job stopped");
                true
            }
            None => false,
        }
    }

    pub fn stop_all(&self) {
        let jobs: Vec<(String, JobHandle)> = self.jobs.lock().drain().collect();
        for (name, handle) in jobs {
            handle.task.abort();
            info!(job = %name, "scheduled job stopped");
        }
    }

    /// Registered job names mapped to whether their task is still running.
    pub fn status(&self) -> BTreeMap<String, bool> {
        self.jobs
            .lock()
            .iter()
            .map(|(name, handle)| (name.clone(), !handle.task.is_finished()))
            .collect()
    }

    pub fn period(&self, name: &str) -> Option<Duration> {
        self.jobs.lock().get(name).map(|handle| handle.period)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for handle in self.jobs.get_mut().values() {
            handle.task.abort();
        }
    }
}
