use crate::achievements::{AchievementId, AchievementView};
use crate::notifications::Notice;
use crate::stats::{MoodBar, Recommendation};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_WATER_GOAL: u32 = 8;
pub const DEFAULT_EXERCISE_GOAL: u32 = 30;
pub const DEFAULT_SLEEP_GOAL: f64 = 8.0;
pub const DEFAULT_STEPS_GOAL: u32 = 10_000;
pub const NEUTRAL_MOOD: u8 = 3;
pub const MOOD_WINDOW: usize = 7;
/// Glasses allowed past the daily water goal.
pub const WATER_OVERFLOW: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterRecord {
    pub daily: u32,
    pub goal: u32,
    pub streak: u32,
}

impl Default for WaterRecord {
    fn default() -> Self {
        Self {
            daily: 0,
            goal: DEFAULT_WATER_GOAL,
            streak: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    #[serde(rename = "type")]
    pub label: String,
    pub minutes: u32,
    /// Capture time in epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseRecord {
    pub minutes: u32,
    pub goal: u32,
    pub streak: u32,
    pub types: Vec<ExerciseEntry>,
}

impl Default for ExerciseRecord {
    fn default() -> Self {
        Self {
            minutes: 0,
            goal: DEFAULT_EXERCISE_GOAL,
            streak: 0,
            types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepRecord {
    pub hours: f64,
    pub goal: f64,
    pub quality: u8,
    pub streak: u32,
}

impl Default for SleepRecord {
    fn default() -> Self {
        Self {
            hours: 0.0,
            goal: DEFAULT_SLEEP_GOAL,
            quality: 4,
            streak: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepsRecord {
    pub daily: u32,
    pub goal: u32,
    pub streak: u32,
}

impl Default for StepsRecord {
    fn default() -> Self {
        Self {
            daily: 0,
            goal: DEFAULT_STEPS_GOAL,
            streak: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodRecord {
    pub current: u8,
    /// Oldest first; the last slot is today.
    pub weekly: Vec<u8>,
}

impl Default for MoodRecord {
    fn default() -> Self {
        Self {
            current: NEUTRAL_MOOD,
            weekly: vec![3, 4, 3, 5, 4, 3, 4],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BmiCategory {
    Underweight,
    #[default]
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmiRecord {
    pub height: f64,
    pub weight: f64,
    pub value: f64,
    pub category: BmiCategory,
}

impl Default for BmiRecord {
    fn default() -> Self {
        Self {
            height: 170.0,
            weight: 70.0,
            value: 0.0,
            category: BmiCategory::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyStats {
    pub health_score: u8,
    pub daily_streak: u32,
}

/// The whole persisted record. Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HealthState {
    pub water: WaterRecord,
    pub exercise: ExerciseRecord,
    pub sleep: SleepRecord,
    pub steps: StepsRecord,
    pub mood: MoodRecord,
    pub bmi: BmiRecord,
    #[serde(deserialize_with = "known_achievements")]
    pub achievements: BTreeSet<AchievementId>,
    pub stats: DailyStats,
}

impl HealthState {
    /// Repairs values a hand-edited or older record may carry.
    pub fn sanitize(&mut self) {
        if self.water.goal == 0 {
            self.water.goal = DEFAULT_WATER_GOAL;
        }
        if self.exercise.goal == 0 {
            self.exercise.goal = DEFAULT_EXERCISE_GOAL;
        }
        if self.steps.goal == 0 {
            self.steps.goal = DEFAULT_STEPS_GOAL;
        }
        self.water.daily = self.water.daily.min(self.water.goal.saturating_add(WATER_OVERFLOW));
        self.steps.daily = self.steps.daily.min(self.steps.goal);
        self.sleep.goal = if self.sleep.goal.is_finite() {
            self.sleep.goal.clamp(4.0, 12.0)
        } else {
            DEFAULT_SLEEP_GOAL
        };
        if !self.sleep.hours.is_finite() || self.sleep.hours < 0.0 {
            self.sleep.hours = 0.0;
        }
        self.mood.current = self.mood.current.clamp(1, 5);
        for slot in &mut self.mood.weekly {
            *slot = (*slot).clamp(1, 5);
        }
        let overflow = self.mood.weekly.len().saturating_sub(MOOD_WINDOW);
        self.mood.weekly.drain(..overflow);
    }
}

fn known_achievements<'de, D>(deserializer: D) -> Result<BTreeSet<AchievementId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|id| id.parse().ok()).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesRequest {
    pub theme: Option<Theme>,
    pub sidebar_collapsed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterAction {
    Add,
    Remove,
}

#[derive(Debug, Deserialize)]
pub struct WaterRequest {
    pub action: WaterAction,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExerciseRequest {
    pub label: Option<String>,
    pub minutes: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SleepRequest {
    pub hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SleepGoalRequest {
    pub hours: f64,
}

#[derive(Debug, Deserialize)]
pub struct StepsRequest {
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Deserialize, Default)]
pub struct MoodRequest {
    pub level: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TipQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NotificationsQuery {
    pub after: Option<u64>,
}

/// Capped percentages, as drawn on the progress rings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressResponse {
    pub water: f64,
    pub exercise: f64,
    pub sleep: f64,
    pub steps: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTip {
    pub category: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: String,
    pub state: HealthState,
    pub progress: ProgressResponse,
    pub recommendations: Vec<Recommendation>,
    pub achievements: Vec<AchievementView>,
    pub mood_chart: Vec<MoodBar>,
    pub tips: Vec<CategoryTip>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub notices: Vec<Notice>,
    pub unlocked: Vec<AchievementId>,
    pub dashboard: DashboardResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipResponse {
    pub category: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_value(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(30.0), BmiCategory::Obese);
    }

    #[test]
    fn partial_record_keeps_defaults_for_missing_fields() {
        let raw = r#"{"water":{"daily":5},"stats":{"dailyStreak":2}}"#;
        let state: HealthState = serde_json::from_str(raw).expect("parse");
        assert_eq!(state.water.daily, 5);
        assert_eq!(state.water.goal, DEFAULT_WATER_GOAL);
        assert_eq!(state.stats.daily_streak, 2);
        assert_eq!(state.mood.weekly.len(), 7);
        assert_eq!(state.steps.goal, DEFAULT_STEPS_GOAL);
    }

    #[test]
    fn unknown_achievements_are_dropped() {
        let raw = r#"{"achievements":["step-master","retired-badge"]}"#;
        let state: HealthState = serde_json::from_str(raw).expect("parse");
        assert_eq!(
            state.achievements.into_iter().collect::<Vec<_>>(),
            vec![AchievementId::StepMaster]
        );
    }

    #[test]
    fn record_round_trips_field_for_field() {
        let mut state = HealthState::default();
        state.water.daily = 6;
        state.water.streak = 3;
        state.exercise.minutes = 45;
        state.exercise.types.push(ExerciseEntry {
            label: "Yoga Session".to_string(),
            minutes: 45,
            timestamp: 1_767_225_600_123,
        });
        state.sleep.hours = 7.3;
        state.sleep.goal = 7.5;
        state.steps.daily = 4200;
        state.mood.current = 5;
        state.mood.weekly = vec![2, 5];
        state.bmi = BmiRecord {
            height: 180.0,
            weight: 81.0,
            value: 25.0,
            category: BmiCategory::Overweight,
        };
        state.achievements.insert(AchievementId::HydrationHero);
        state.stats = DailyStats {
            health_score: 61,
            daily_streak: 3,
        };

        let json = serde_json::to_string(&state).expect("serialize");
        let reloaded: HealthState = serde_json::from_str(&json).expect("parse");
        assert_eq!(reloaded, state);
    }

    #[test]
    fn serialized_layout_uses_dashboard_keys() {
        let mut state = HealthState::default();
        state.exercise.types.push(ExerciseEntry {
            label: "Workout".to_string(),
            minutes: 30,
            timestamp: 1,
        });
        let value = serde_json::to_value(&state).expect("serialize");
        assert!(value["stats"].get("healthScore").is_some());
        assert!(value["stats"].get("dailyStreak").is_some());
        assert_eq!(value["exercise"]["types"][0]["type"], "Workout");
        assert_eq!(value["bmi"]["category"], "Normal");
    }

    #[test]
    fn sanitize_repairs_goals_and_mood_window() {
        let mut state = HealthState::default();
        state.water.goal = 0;
        state.sleep.goal = 20.0;
        state.mood.current = 9;
        state.mood.weekly = vec![1, 2, 3, 4, 5, 1, 2, 3, 0];
        state.sanitize();
        assert_eq!(state.water.goal, DEFAULT_WATER_GOAL);
        assert_eq!(state.sleep.goal, 12.0);
        assert_eq!(state.mood.current, 5);
        assert_eq!(state.mood.weekly, vec![3, 4, 5, 1, 2, 3, 1]);
    }

    #[test]
    fn sanitize_caps_daily_counts_at_their_limits() {
        let raw = r#"{"steps":{"daily":25000},"water":{"daily":40}}"#;
        let mut state: HealthState = serde_json::from_str(raw).expect("parse");
        state.sanitize();
        assert_eq!(state.steps.daily, DEFAULT_STEPS_GOAL);
        assert_eq!(state.water.daily, DEFAULT_WATER_GOAL + WATER_OVERFLOW);

        let raw = r#"{"steps":{"daily":4000,"goal":0},"water":{"daily":9,"goal":0}}"#;
        let mut state: HealthState = serde_json::from_str(raw).expect("parse");
        state.sanitize();
        assert_eq!(state.steps.daily, 4000);
        assert_eq!(state.water.daily, 9);
    }

    #[test]
    fn full_precision_floats_survive_a_round_trip() {
        let mut state = HealthState::default();
        state.sleep.hours = 0.1 + 0.2;
        state.bmi.height = 222.808_902_675_581_58;
        state.bmi.weight = 1.0 / 3.0 * 250.0;
        state.bmi.value = state.bmi.weight / (state.bmi.height / 100.0).powi(2);

        let json = serde_json::to_string(&state).expect("serialize");
        let reloaded: HealthState = serde_json::from_str(&json).expect("parse");
        assert_eq!(reloaded.sleep.hours.to_bits(), state.sleep.hours.to_bits());
        assert_eq!(reloaded.bmi.height.to_bits(), state.bmi.height.to_bits());
        assert_eq!(reloaded.bmi.weight.to_bits(), state.bmi.weight.to_bits());
        assert_eq!(reloaded, state);
    }

    #[test]
    fn theme_parses_slot_values() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(" light\n"), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
    }
}
