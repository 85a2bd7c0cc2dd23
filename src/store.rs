use crate::achievements::AchievementId;
use crate::errors::ValidationError;
use crate::models::{
    BmiCategory, BmiRecord, ExerciseEntry, HealthState, MOOD_WINDOW, NEUTRAL_MOOD, WATER_OVERFLOW, WaterAction,
};
use crate::notifications::Notice;
use crate::stats::{self, Recommendation};
use crate::storage::{self, KeyValueStore};
use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

pub const MAX_STEPS_PER_ENTRY: i64 = 50_000;

pub const EXERCISE_PRESETS: [(&str, u32); 3] = [("Quick Walk", 15), ("Workout", 30), ("Yoga Session", 45)];

/// What one operation did, for the caller to display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    pub unlocked: Vec<AchievementId>,
}

impl Outcome {
    fn notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

pub fn mood_description(level: u8) -> &'static str {
    match level {
        1 => "Having a tough day",
        2 => "Feeling a bit low",
        3 => "Feeling okay",
        4 => "Having a good day!",
        _ => "Feeling amazing!",
    }
}

pub fn random_exercise<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, u32) {
    *EXERCISE_PRESETS
        .choose(rng)
        .unwrap_or(&EXERCISE_PRESETS[0])
}

/// Simulated night of sleep in [6, 9) hours, one decimal.
pub fn random_sleep_hours<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let hours: f64 = rng.gen_range(6.0..9.0);
    (hours * 10.0).floor() / 10.0
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Owns the day's health metrics and the slot they persist to.
pub struct DailyMetricsStore<S> {
    backend: S,
    state: HealthState,
}

impl<S: KeyValueStore> DailyMetricsStore<S> {
    /// Restores the persisted record over the defaults.
    pub async fn open(backend: S) -> Self {
        let state = storage::load_state(&backend).await;
        Self::with_state(backend, state)
    }

    pub fn with_state(backend: S, mut state: HealthState) -> Self {
        state.stats.health_score = stats::health_score(&state);
        Self { backend, state }
    }

    pub fn snapshot(&self) -> &HealthState {
        &self.state
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        stats::recommendations(&self.state)
    }

    pub fn health_score(&self) -> u8 {
        self.state.stats.health_score
    }

    pub async fn record_water(&mut self, action: WaterAction) -> Outcome {
        let mut outcome = Outcome::default();
        let water = &mut self.state.water;
        match action {
            WaterAction::Add => {
                if water.daily >= water.goal.saturating_add(WATER_OVERFLOW) {
                    debug!(daily = water.daily, "water limit reached");
                    outcome.notice(Notice::warning("You've had enough water for today!"));
                    return outcome;
                }
                water.daily += 1;
                if water.daily == water.goal {
                    outcome.notice(Notice::success("Daily water goal achieved!"));
                    self.try_unlock(AchievementId::HydrationHero, &mut outcome);
                }
            }
            WaterAction::Remove => {
                if water.daily == 0 {
                    return outcome;
                }
                water.daily -= 1;
            }
        }
        self.commit(&mut outcome).await;
        outcome
    }

    pub async fn record_exercise(&mut self, label: &str, minutes: u32) -> Result<Outcome, ValidationError> {
        let label = label.trim();
        if label.is_empty() {
            warn!("rejected exercise without a label");
            return Err(ValidationError::ExerciseLabel);
        }
        if minutes == 0 {
            warn!(label, "rejected exercise with zero minutes");
            return Err(ValidationError::ExerciseMinutes);
        }

        let mut outcome = Outcome::default();
        let exercise = &mut self.state.exercise;
        let before = exercise.minutes;
        exercise.minutes = exercise.minutes.saturating_add(minutes);
        exercise.types.push(ExerciseEntry {
            label: label.to_string(),
            minutes,
            timestamp: Utc::now().timestamp_millis(),
        });

        if before < exercise.goal && exercise.minutes >= exercise.goal {
            outcome.notice(Notice::success("Exercise goal completed!"));
            self.try_unlock(AchievementId::FitnessFanatic, &mut outcome);
        } else {
            outcome.notice(Notice::success(format!("Logged {minutes} minutes of {label}")));
        }
        self.commit(&mut outcome).await;
        Ok(outcome)
    }

    pub async fn set_sleep_goal(&mut self, hours: f64) -> Result<Outcome, ValidationError> {
        if !hours.is_finite() || !(4.0..=12.0).contains(&hours) {
            warn!(hours, "rejected sleep goal");
            return Err(ValidationError::SleepGoal);
        }
        let mut outcome = Outcome::default();
        self.state.sleep.goal = hours;
        outcome.notice(Notice::success(format!("Sleep goal set to {hours} hours")));
        self.commit(&mut outcome).await;
        Ok(outcome)
    }

    pub async fn record_sleep(&mut self, hours: f64) -> Result<Outcome, ValidationError> {
        if !hours.is_finite() || hours < 0.0 {
            warn!(hours, "rejected sleep entry");
            return Err(ValidationError::SleepHours);
        }
        let mut outcome = Outcome::default();
        self.state.sleep.hours = hours;
        outcome.notice(Notice::success(format!("Logged {hours:.1} hours of sleep")));
        if self.state.sleep.hours >= self.state.sleep.goal {
            self.try_unlock(AchievementId::SleepChampion, &mut outcome);
        }
        self.commit(&mut outcome).await;
        Ok(outcome)
    }

    pub async fn record_steps(&mut self, count: i64) -> Result<Outcome, ValidationError> {
        if !(1..=MAX_STEPS_PER_ENTRY).contains(&count) {
            warn!(count, "rejected step entry");
            return Err(ValidationError::Steps);
        }
        let mut outcome = Outcome::default();
        let steps = &mut self.state.steps;
        // In range, so the cast is lossless.
        steps.daily = steps.daily.saturating_add(count as u32).min(steps.goal);

        if steps.daily >= steps.goal {
            outcome.notice(Notice::success("Step goal achieved!"));
            self.try_unlock(AchievementId::StepMaster, &mut outcome);
        } else {
            let remaining = steps.goal - steps.daily;
            outcome.notice(Notice::success(format!(
                "Added {count} steps! {remaining} steps to goal"
            )));
        }
        self.commit(&mut outcome).await;
        Ok(outcome)
    }

    pub async fn compute_bmi(&mut self, height_cm: f64, weight_kg: f64) -> Result<Outcome, ValidationError> {
        let valid = height_cm.is_finite()
            && weight_kg.is_finite()
            && (50.0..=300.0).contains(&height_cm)
            && (20.0..=500.0).contains(&weight_kg);
        if !valid {
            warn!(height_cm, weight_kg, "rejected body measurements");
            return Err(ValidationError::BodyMeasurements);
        }

        let height_m = height_cm / 100.0;
        let value = round_one_decimal(weight_kg / (height_m * height_m));
        self.state.bmi = BmiRecord {
            height: height_cm,
            weight: weight_kg,
            value,
            category: BmiCategory::from_value(value),
        };

        let mut outcome = Outcome::default();
        outcome.notice(Notice::success("BMI calculated successfully!"));
        self.commit(&mut outcome).await;
        Ok(outcome)
    }

    pub async fn set_mood(&mut self, level: i64) -> Result<Outcome, ValidationError> {
        if !(1..=5).contains(&level) {
            warn!(level, "rejected mood level");
            return Err(ValidationError::Mood);
        }
        let level = level as u8;
        let mood = &mut self.state.mood;
        mood.current = level;
        match mood.weekly.last_mut() {
            Some(today) => *today = level,
            None => mood.weekly.push(level),
        }

        let mut outcome = Outcome::default();
        outcome.notice(Notice::success(format!("Mood updated: {}", mood_description(level))));
        self.commit(&mut outcome).await;
        Ok(outcome)
    }

    pub async fn cycle_mood(&mut self) -> Outcome {
        let next = if self.state.mood.current >= 5 {
            1
        } else {
            self.state.mood.current + 1
        };
        match self.set_mood(i64::from(next)).await {
            Ok(outcome) => outcome,
            Err(err) => Outcome {
                notices: vec![Notice::warning(err.to_string())],
                unlocked: Vec::new(),
            },
        }
    }

    /// Day boundary: settle streaks against today's totals, then start a
    /// fresh day.
    pub async fn advance_day(&mut self) -> Outcome {
        let state = &mut self.state;

        let water_met = state.water.daily >= state.water.goal;
        state.water.streak = next_streak(state.water.streak, water_met);
        state.stats.daily_streak = next_streak(state.stats.daily_streak, water_met);
        state.exercise.streak = next_streak(
            state.exercise.streak,
            state.exercise.minutes >= state.exercise.goal,
        );
        state.sleep.streak = next_streak(state.sleep.streak, state.sleep.hours >= state.sleep.goal);
        state.steps.streak = next_streak(state.steps.streak, state.steps.daily >= state.steps.goal);

        state.water.daily = 0;
        state.exercise.minutes = 0;
        state.exercise.types.clear();
        state.sleep.hours = 0.0;
        state.steps.daily = 0;
        state.mood.weekly.push(NEUTRAL_MOOD);
        let overflow = state.mood.weekly.len().saturating_sub(MOOD_WINDOW);
        state.mood.weekly.drain(..overflow);

        info!(
            water_streak = state.water.streak,
            exercise_streak = state.exercise.streak,
            sleep_streak = state.sleep.streak,
            steps_streak = state.steps.streak,
            "day advanced"
        );

        let mut outcome = Outcome::default();
        outcome.notice(Notice::success("A new day has started! Resetting goals."));
        self.commit(&mut outcome).await;
        outcome
    }

    /// Unlocks `id` if its condition holds now. Already unlocked or unmet
    /// achievements are left alone.
    pub async fn unlock_achievement(&mut self, id: AchievementId) -> Outcome {
        let mut outcome = Outcome::default();
        if self.try_unlock(id, &mut outcome) {
            self.commit(&mut outcome).await;
        }
        outcome
    }

    /// Read-only nudge for the reminder timer.
    pub fn reminder(&self) -> Option<Notice> {
        (self.state.water.daily < self.state.water.goal).then(|| Notice::info("Time to drink water!"))
    }

    fn try_unlock(&mut self, id: AchievementId, outcome: &mut Outcome) -> bool {
        if self.state.achievements.contains(&id) || !id.is_satisfied(&self.state) {
            return false;
        }
        self.state.achievements.insert(id);
        info!(achievement = %id, "achievement unlocked");
        outcome.unlocked.push(id);
        outcome.notice(Notice::success(format!(
            "Achievement Unlocked: {}!",
            id.definition().name
        )));
        true
    }

    /// Recomputes derived fields and saves. A failed save keeps the
    /// in-memory state and reports an error notice.
    async fn commit(&mut self, outcome: &mut Outcome) {
        self.state.stats.health_score = stats::health_score(&self.state);
        if let Err(err) = storage::persist_state(&self.backend, &self.state).await {
            error!("failed to save health data: {err}");
            outcome.notice(Notice::error("Error saving data"));
        }
    }
}

fn next_streak(streak: u32, met: bool) -> u32 {
    if met { streak.saturating_add(1) } else { 0 }
}
