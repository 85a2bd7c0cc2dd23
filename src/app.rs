use crate::handlers;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router<S: KeyValueStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(handlers::index::<S>))
        .route("/water/add", post(handlers::water_add::<S>))
        .route("/water/remove", post(handlers::water_remove::<S>))
        .route("/api/dashboard", get(handlers::get_dashboard::<S>))
        .route("/api/water", post(handlers::water::<S>))
        .route("/api/exercise", post(handlers::exercise::<S>))
        .route("/api/sleep", post(handlers::sleep::<S>))
        .route("/api/sleep/goal", post(handlers::sleep_goal::<S>))
        .route("/api/steps", post(handlers::steps::<S>))
        .route("/api/bmi", post(handlers::bmi::<S>))
        .route("/api/mood", post(handlers::mood::<S>))
        .route("/api/achievements/:id/unlock", post(handlers::unlock_achievement::<S>))
        .route("/api/day/advance", post(handlers::advance_day::<S>))
        .route("/api/tip", get(handlers::get_tip))
        .route("/api/notifications", get(handlers::get_notifications::<S>))
        .route(
            "/api/preferences",
            get(handlers::get_preferences::<S>).post(handlers::set_preferences::<S>),
        )
        .with_state(state)
}
