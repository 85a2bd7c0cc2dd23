use crate::achievements::{AchievementId, achievement_views};
use crate::errors::{AppError, ValidationError};
use crate::models::{
    ActionResponse, BmiRequest, CategoryTip, DashboardResponse, ExerciseRequest, HealthState, MoodRequest,
    NotificationsQuery, Preferences, PreferencesRequest, SleepGoalRequest, SleepRequest, StepsRequest, TipQuery,
    TipResponse, WaterAction, WaterRequest,
};
use crate::notifications::FeedEntry;
use crate::state::AppState;
use crate::stats::{mood_chart, progress, recommendations};
use crate::storage::{KeyValueStore, load_preferences, persist_preferences};
use crate::store::{Outcome, random_exercise, random_sleep_hours};
use crate::tips::{TipCategory, random_tip, tip_from};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::Local;

pub async fn index<S: KeyValueStore>(State(state): State<AppState<S>>) -> Html<String> {
    let store = state.store.lock().await;
    let prefs = load_preferences(store.backend()).await;
    Html(render_index(&today_string(), store.snapshot(), &prefs))
}

pub async fn get_dashboard<S: KeyValueStore>(State(state): State<AppState<S>>) -> Json<DashboardResponse> {
    let store = state.store.lock().await;
    Json(build_dashboard(store.snapshot()))
}

pub async fn water<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<WaterRequest>,
) -> Json<ActionResponse> {
    let mut store = state.store.lock().await;
    let outcome = store.record_water(payload.action).await;
    Json(to_response(outcome, store.snapshot()))
}

pub async fn water_add<S: KeyValueStore>(State(state): State<AppState<S>>) -> Redirect {
    water_form(&state, WaterAction::Add).await
}

pub async fn water_remove<S: KeyValueStore>(State(state): State<AppState<S>>) -> Redirect {
    water_form(&state, WaterAction::Remove).await
}

// Form posts only get a redirect back, so their notices go to the feed.
async fn water_form<S: KeyValueStore>(state: &AppState<S>, action: WaterAction) -> Redirect {
    let outcome = state.store.lock().await.record_water(action).await;
    state.feed.publish_all(outcome.notices).await;
    Redirect::to("/")
}

pub async fn exercise<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<ExerciseRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let (label, minutes) = match (payload.label, payload.minutes) {
        (None, None) => {
            let (label, minutes) = random_exercise(&mut rand::thread_rng());
            (label.to_string(), minutes)
        }
        (Some(label), Some(minutes)) => (label, minutes),
        (None, Some(_)) => return Err(ValidationError::ExerciseLabel.into()),
        (Some(_), None) => return Err(ValidationError::ExerciseMinutes.into()),
    };

    let mut store = state.store.lock().await;
    let outcome = store.record_exercise(&label, minutes).await?;
    Ok(Json(to_response(outcome, store.snapshot())))
}

pub async fn sleep<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<SleepRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let hours = match payload.hours {
        Some(hours) => hours,
        None => random_sleep_hours(&mut rand::thread_rng()),
    };
    let mut store = state.store.lock().await;
    let outcome = store.record_sleep(hours).await?;
    Ok(Json(to_response(outcome, store.snapshot())))
}

pub async fn sleep_goal<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<SleepGoalRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let mut store = state.store.lock().await;
    let outcome = store.set_sleep_goal(payload.hours).await?;
    Ok(Json(to_response(outcome, store.snapshot())))
}

pub async fn steps<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<StepsRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let mut store = state.store.lock().await;
    let outcome = store.record_steps(payload.count).await?;
    Ok(Json(to_response(outcome, store.snapshot())))
}

pub async fn bmi<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<BmiRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let mut store = state.store.lock().await;
    let outcome = store.compute_bmi(payload.height_cm, payload.weight_kg).await?;
    Ok(Json(to_response(outcome, store.snapshot())))
}

pub async fn mood<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let mut store = state.store.lock().await;
    let outcome = match payload.level {
        Some(level) => store.set_mood(level).await?,
        None => store.cycle_mood().await,
    };
    Ok(Json(to_response(outcome, store.snapshot())))
}

pub async fn unlock_achievement<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    let id: AchievementId = id.parse().map_err(|err| AppError::not_found(format!("{err}")))?;
    let mut store = state.store.lock().await;
    let outcome = store.unlock_achievement(id).await;
    Ok(Json(to_response(outcome, store.snapshot())))
}

pub async fn advance_day<S: KeyValueStore>(State(state): State<AppState<S>>) -> Json<ActionResponse> {
    let mut store = state.store.lock().await;
    let outcome = store.advance_day().await;
    Json(to_response(outcome, store.snapshot()))
}

pub async fn get_tip(Query(query): Query<TipQuery>) -> Result<Json<TipResponse>, AppError> {
    let mut rng = rand::thread_rng();
    let (category, text) = match query.category.as_deref() {
        Some(raw) => {
            let category = TipCategory::parse(raw)
                .ok_or_else(|| AppError::bad_request(format!("unknown tip category '{raw}'")))?;
            (category, tip_from(category, &mut rng))
        }
        None => random_tip(&mut rng),
    };
    Ok(Json(TipResponse {
        category: category.as_str().to_string(),
        text: text.to_string(),
    }))
}

pub async fn get_notifications<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<NotificationsQuery>,
) -> Json<Vec<FeedEntry>> {
    Json(state.feed.since(query.after.unwrap_or(0)).await)
}

pub async fn get_preferences<S: KeyValueStore>(State(state): State<AppState<S>>) -> Json<Preferences> {
    let store = state.store.lock().await;
    Json(load_preferences(store.backend()).await)
}

pub async fn set_preferences<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<PreferencesRequest>,
) -> Result<Json<Preferences>, AppError> {
    let store = state.store.lock().await;
    let mut prefs = load_preferences(store.backend()).await;
    if let Some(theme) = payload.theme {
        prefs.theme = theme;
    }
    if let Some(collapsed) = payload.sidebar_collapsed {
        prefs.sidebar_collapsed = collapsed;
    }
    persist_preferences(store.backend(), &prefs).await?;
    Ok(Json(prefs))
}

pub fn build_dashboard(state: &HealthState) -> DashboardResponse {
    let mut rng = rand::thread_rng();
    let tips = TipCategory::FEATURED
        .into_iter()
        .map(|category| CategoryTip {
            category: category.as_str().to_string(),
            text: tip_from(category, &mut rng).to_string(),
        })
        .collect();

    DashboardResponse {
        date: today_string(),
        state: state.clone(),
        progress: progress(state),
        recommendations: recommendations(state),
        achievements: achievement_views(state),
        mood_chart: mood_chart(&state.mood.weekly),
        tips,
    }
}

fn to_response(outcome: Outcome, state: &HealthState) -> ActionResponse {
    ActionResponse {
        notices: outcome.notices,
        unlocked: outcome.unlocked,
        dashboard: build_dashboard(state),
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
