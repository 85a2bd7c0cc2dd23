use crate::models::{HealthState, ProgressResponse};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Uncapped completion percentages for each goal-based metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPercentages {
    pub water: f64,
    pub exercise: f64,
    pub sleep: f64,
    pub steps: f64,
}

impl MetricPercentages {
    pub fn of(state: &HealthState) -> Self {
        Self {
            water: percent(f64::from(state.water.daily), f64::from(state.water.goal)),
            exercise: percent(
                f64::from(state.exercise.minutes),
                f64::from(state.exercise.goal),
            ),
            sleep: percent(state.sleep.hours, state.sleep.goal),
            steps: percent(f64::from(state.steps.daily), f64::from(state.steps.goal)),
        }
    }

    pub fn capped(self) -> Self {
        Self {
            water: self.water.min(100.0),
            exercise: self.exercise.min(100.0),
            sleep: self.sleep.min(100.0),
            steps: self.steps.min(100.0),
        }
    }
}

fn percent(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value.max(0.0) / goal) * 100.0
}

pub fn mood_percent(state: &HealthState) -> f64 {
    f64::from(state.mood.current.min(5)) / 5.0 * 100.0
}

pub fn progress(state: &HealthState) -> ProgressResponse {
    let capped = MetricPercentages::of(state).capped();
    ProgressResponse {
        water: capped.water,
        exercise: capped.exercise,
        sleep: capped.sleep,
        steps: capped.steps,
    }
}

pub fn health_score(state: &HealthState) -> u8 {
    let capped = MetricPercentages::of(state).capped();
    let total = capped.water + capped.exercise + capped.sleep + capped.steps + mood_percent(state);
    (total / 5.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Suggestion,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tone: Tone,
    pub text: String,
}

impl Recommendation {
    fn new(tone: Tone, text: &str) -> Self {
        Self {
            tone,
            text: text.to_string(),
        }
    }
}

struct Advice {
    pct: f64,
    low_below: f64,
    praise: &'static str,
    nudge: &'static str,
}

pub fn recommendations(state: &HealthState) -> Vec<Recommendation> {
    let pct = MetricPercentages::of(state);
    let advice = [
        Advice {
            pct: pct.water,
            low_below: 50.0,
            praise: "Great hydration habits! Keep it up.",
            nudge: "Try to drink more water throughout the day.",
        },
        Advice {
            pct: pct.exercise,
            low_below: 50.0,
            praise: "Excellent exercise routine! You're crushing your goals.",
            nudge: "Try adding 15 more minutes of exercise daily.",
        },
        Advice {
            pct: pct.sleep,
            low_below: 75.0,
            praise: "Perfect sleep schedule! Your body thanks you.",
            nudge: "Consider getting more quality sleep for better recovery.",
        },
        Advice {
            pct: pct.steps,
            low_below: 50.0,
            praise: "Amazing step count! You're staying very active.",
            nudge: "Try to take short walks throughout the day.",
        },
    ];

    let mut out: Vec<Recommendation> = advice
        .iter()
        .filter_map(|item| {
            if item.pct >= 100.0 {
                Some(Recommendation::new(Tone::Positive, item.praise))
            } else if item.pct < item.low_below {
                Some(Recommendation::new(Tone::Suggestion, item.nudge))
            } else {
                None
            }
        })
        .collect();

    if out.is_empty() {
        out.push(Recommendation::new(
            Tone::Info,
            "Keep logging your activities to get personalized recommendations.",
        ));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodBar {
    pub label: String,
    pub value: u8,
    pub height_pct: f64,
}

pub fn mood_chart(weekly: &[u8]) -> Vec<MoodBar> {
    mood_chart_at(Local::now().date_naive(), weekly)
}

/// The last slot is `today`; earlier slots take the preceding weekdays.
pub fn mood_chart_at(today: NaiveDate, weekly: &[u8]) -> Vec<MoodBar> {
    let len = weekly.len();
    weekly
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let date = today - Duration::days((len - 1 - index) as i64);
            MoodBar {
                label: weekday_label(date),
                value: *value,
                height_pct: f64::from(*value) / 5.0 * 100.0,
            }
        })
        .collect()
}

fn weekday_label(date: NaiveDate) -> String {
    date.weekday().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_score_averages_capped_percentages() {
        let mut state = HealthState::default();
        state.water.daily = 8;
        state.exercise.minutes = 15;
        state.sleep.hours = 4.0;
        state.steps.daily = 20_000;
        state.mood.current = 5;
        // (100 + 50 + 50 + 100 + 100) / 5
        assert_eq!(health_score(&state), 80);
    }

    #[test]
    fn health_score_rounds_half_up() {
        let mut state = HealthState::default();
        state.mood.current = 3;
        state.water.daily = 1;
        state.exercise.minutes = 0;
        // (12.5 + 0 + 0 + 0 + 60) / 5 = 14.5
        assert_eq!(health_score(&state), 15);
    }

    #[test]
    fn health_score_stays_in_range_for_extremes() {
        let mut state = HealthState::default();
        for (water, minutes, hours, steps) in [
            (0, 0, 0.0, 0),
            (u32::MAX, u32::MAX, f64::MAX, u32::MAX),
            (10, 300, 12.0, 9_999),
        ] {
            state.water.daily = water;
            state.exercise.minutes = minutes;
            state.sleep.hours = hours;
            state.steps.daily = steps;
            for mood in 1..=5 {
                state.mood.current = mood;
                assert!(health_score(&state) <= 100);
            }
        }
    }

    #[test]
    fn recommendations_default_state() {
        let state = HealthState::default();
        let recs = recommendations(&state);
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|rec| rec.tone == Tone::Suggestion));
        assert_eq!(recs[0].text, "Try to drink more water throughout the day.");
        assert_eq!(recs[3].text, "Try to take short walks throughout the day.");
    }

    #[test]
    fn recommendations_keep_metric_order() {
        let mut state = HealthState::default();
        state.water.daily = 8;
        state.exercise.minutes = 10;
        state.sleep.hours = 5.0;
        state.steps.daily = 10_000;
        let texts: Vec<_> = recommendations(&state)
            .into_iter()
            .map(|rec| rec.text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "Great hydration habits! Keep it up.",
                "Try adding 15 more minutes of exercise daily.",
                "Consider getting more quality sleep for better recovery.",
                "Amazing step count! You're staying very active.",
            ]
        );
    }

    #[test]
    fn recommendations_fall_back_to_generic_message() {
        let mut state = HealthState::default();
        state.water.daily = 5;
        state.exercise.minutes = 20;
        state.sleep.hours = 6.5;
        state.steps.daily = 6_000;
        let recs = recommendations(&state);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].tone, Tone::Info);
    }

    #[test]
    fn progress_is_capped() {
        let mut state = HealthState::default();
        state.water.daily = 10;
        let progress = progress(&state);
        assert_eq!(progress.water, 100.0);
        assert_eq!(progress.steps, 0.0);
    }

    #[test]
    fn mood_chart_labels_end_on_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(); // Monday
        let bars = mood_chart_at(today, &[3, 4, 3, 5, 4, 3, 4]);
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[6].label, "Mon");
        assert_eq!(bars[0].label, "Tue");
        assert_eq!(bars[3].value, 5);
        assert_eq!(bars[3].height_pct, 100.0);
    }
}
