use crate::notifications::NotificationFeed;
use crate::storage::FileStore;
use crate::store::DailyMetricsStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct AppState<S = FileStore> {
    pub store: Arc<Mutex<DailyMetricsStore<S>>>,
    pub feed: NotificationFeed,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            feed: self.feed.clone(),
        }
    }
}

impl<S> AppState<S> {
    pub fn new(store: DailyMetricsStore<S>, feed: NotificationFeed) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            feed,
        }
    }
}
