use crate::state::AppState;
use crate::storage::KeyValueStore;
use std::{future::Future, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::debug;

/// A repeating background job. Aborted on `cancel` or when dropped.
#[derive(Debug)]
pub struct PeriodicTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Runs `tick` first after `first_delay`, then every `period`.
    pub fn spawn<F, Fut>(name: &'static str, first_delay: Duration, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + first_delay, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!(task = name, "periodic task fired");
                tick().await;
            }
        });
        Self { name, handle }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Advances the day once per `day_length`, starting one day from now.
pub fn spawn_day_cycle<S: KeyValueStore>(state: AppState<S>, day_length: Duration) -> PeriodicTask {
    PeriodicTask::spawn("day-cycle", day_length, day_length, move || {
        let state = state.clone();
        async move {
            let outcome = state.store.lock().await.advance_day().await;
            state.feed.publish_all(outcome.notices).await;
        }
    })
}

/// Publishes a water reminder every `every` while below the daily goal.
pub fn spawn_reminders<S: KeyValueStore>(state: AppState<S>, every: Duration) -> PeriodicTask {
    PeriodicTask::spawn("reminder", every, every, move || {
        let state = state.clone();
        async move {
            let notice = state.store.lock().await.reminder();
            if let Some(notice) = notice {
                state.feed.publish(notice).await;
            }
        }
    })
}
